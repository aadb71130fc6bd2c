//! Delimiter search behind TEXTBEFORE and TEXTAFTER.
//!
//! The text is tokenized into a [`Split`]: fragments alternating content and
//! delimiter, `content, delim, content, ..., delim, content`. A split with
//! `m` delimiter occurrences therefore always holds `2m + 1` fragments, and
//! content fragments may be empty (delimiter at either end, or two adjacent
//! delimiters). Choosing the Nth occurrence is then plain index arithmetic on
//! that sequence.
//!
//! Validation runs before any selection, checking in this order:
//!
//! | condition                                                | outcome          |
//! |----------------------------------------------------------|------------------|
//! | instance is 0, or abs(instance) > character count        | `#VALUE!`        |
//! | delimiter is empty, instance beyond capacity             | `#N/A`           |
//! | delimiter is empty                                       | fixed convention |
//! | matcher cannot be built                                  | `#N/A`           |
//! | no occurrence and the text end is not a delimiter        | `NotFound`       |
//! | instance beyond capacity                                 | `#N/A`           |
//! | otherwise                                                | select           |
//!
//! Capacity is measured in `p`, the number of non-empty fragments (one per
//! character for an empty delimiter): `abs(instance) <= floor(p / 2)`, or
//! `abs(instance) - 1 <= ceil(p / 2)` when the text end is a delimiter.

use regex::{Regex, RegexBuilder};
use textcell_common::ExcelError;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum MatchMode {
    #[default]
    CaseSensitive,
    CaseInsensitive,
}

impl MatchMode {
    pub fn from_flag(case_insensitive: bool) -> Self {
        if case_insensitive {
            Self::CaseInsensitive
        } else {
            Self::CaseSensitive
        }
    }
}

/// Whether the boundary of the text counts as one more delimiter occurrence:
/// the end for positive instances, the start for negative ones.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum MatchEnd {
    #[default]
    EndNotDelimiter,
    EndIsDelimiter,
}

impl MatchEnd {
    pub fn from_flag(end_is_delimiter: bool) -> Self {
        if end_is_delimiter {
            Self::EndIsDelimiter
        } else {
            Self::EndNotDelimiter
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Side {
    Before,
    After,
}

/// Successful outcome of a search. `NotFound` tells the caller to substitute
/// its fallback value.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Extraction {
    Text(String),
    NotFound,
}

/// Build a matcher that treats `delimiter` literally.
pub fn literal_matcher(delimiter: &str, mode: MatchMode) -> Result<Regex, regex::Error> {
    RegexBuilder::new(&regex::escape(delimiter))
        .case_insensitive(mode == MatchMode::CaseInsensitive)
        .build()
}

/// Alternating content/delimiter fragments borrowed from the searched text.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Split<'t> {
    fragments: Vec<&'t str>,
}

impl<'t> Split<'t> {
    /// Empty matches are skipped, so a matcher for "" yields a single
    /// fragment holding the whole text.
    pub fn tokenize(text: &'t str, matcher: &Regex) -> Self {
        let mut fragments = Vec::new();
        let mut last = 0;
        for m in matcher.find_iter(text) {
            if m.is_empty() {
                continue;
            }
            fragments.push(&text[last..m.start()]);
            fragments.push(m.as_str());
            last = m.end();
        }
        fragments.push(&text[last..]);
        Self { fragments }
    }

    pub fn fragments(&self) -> &[&'t str] {
        &self.fragments
    }

    pub fn occurrences(&self) -> usize {
        self.fragments.len() / 2
    }

    /// Fragments with any content; empty slots are not counted.
    pub fn pieces(&self) -> usize {
        self.fragments.iter().filter(|f| !f.is_empty()).count()
    }

    /// Concatenate the fragments on `side` of occurrence `instance`.
    ///
    /// `instance` must be non-zero. Instances past `occurrences()` land on the
    /// implicit delimiter at the text boundary: the whole text lies on one
    /// side of it and nothing on the other.
    fn select(&self, side: Side, instance: i64) -> String {
        let n = self.fragments.len() as i64;
        let m = self.occurrences() as i64;
        let forward = instance > 0;

        if instance.abs() > m {
            return match (side, forward) {
                (Side::Before, true) | (Side::After, false) => self.fragments.concat(),
                (Side::Before, false) | (Side::After, true) => String::new(),
            };
        }

        let (start, end) = match (side, forward) {
            (Side::Before, true) => (0, 2 * instance - 1),
            (Side::Before, false) => (0, n + 2 * instance),
            (Side::After, true) => (2 * instance, n),
            (Side::After, false) => (n + 2 * instance + 1, n),
        };
        self.fragments[start as usize..end as usize].concat()
    }
}

/// What validation decided for a search.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Verdict<'t> {
    NotFound,
    EmptyDelimiter,
    Proceed(Split<'t>),
}

/// One TEXTBEFORE/TEXTAFTER search over already coerced arguments.
#[derive(Clone, Copy, Debug)]
pub struct DelimiterSearch<'t> {
    pub text: &'t str,
    pub delimiter: &'t str,
    pub instance: i64,
    pub match_mode: MatchMode,
    pub match_end: MatchEnd,
}

impl<'t> DelimiterSearch<'t> {
    pub fn new(text: &'t str, delimiter: &'t str) -> Self {
        Self {
            text,
            delimiter,
            instance: 1,
            match_mode: MatchMode::default(),
            match_end: MatchEnd::default(),
        }
    }

    pub fn instance(mut self, instance: i64) -> Self {
        self.instance = instance;
        self
    }

    pub fn match_mode(mut self, match_mode: MatchMode) -> Self {
        self.match_mode = match_mode;
        self
    }

    pub fn match_end(mut self, match_end: MatchEnd) -> Self {
        self.match_end = match_end;
        self
    }

    pub fn validate(&self) -> Result<Verdict<'t>, ExcelError> {
        let char_len = self.text.chars().count() as u64;
        if self.instance == 0 || self.instance.unsigned_abs() > char_len {
            return Err(ExcelError::new_value().with_message(format!(
                "instance {} is outside 1..={char_len}",
                self.instance
            )));
        }

        // An empty delimiter falls between every pair of characters, so the
        // text splits into one piece per character.
        if self.delimiter.is_empty() {
            self.check_capacity(char_len)?;
            return Ok(Verdict::EmptyDelimiter);
        }

        let matcher = literal_matcher(self.delimiter, self.match_mode).map_err(|e| {
            ExcelError::new_na().with_message(format!("delimiter cannot be searched: {e}"))
        })?;
        let split = Split::tokenize(self.text, &matcher);

        #[cfg(feature = "tracing")]
        tracing::trace!(
            occurrences = split.occurrences(),
            pieces = split.pieces(),
            instance = self.instance,
            match_end = ?self.match_end,
            "delimiter split"
        );

        if split.occurrences() == 0 && self.match_end == MatchEnd::EndNotDelimiter {
            return Ok(Verdict::NotFound);
        }
        self.check_capacity(split.pieces() as u64)?;

        Ok(Verdict::Proceed(split))
    }

    /// `#N/A` when the split, counted in non-empty `pieces`, cannot hold the
    /// requested instance. The text boundary adds room for one more.
    fn check_capacity(&self, pieces: u64) -> Result<(), ExcelError> {
        let k = self.instance.unsigned_abs();
        let exceeded = match self.match_end {
            MatchEnd::EndNotDelimiter => k > pieces / 2,
            MatchEnd::EndIsDelimiter => k - 1 > pieces.div_ceil(2),
        };
        if exceeded {
            return Err(ExcelError::new_na().with_message(format!(
                "instance {} does not fit a split of {pieces} piece(s)",
                self.instance
            )));
        }
        Ok(())
    }

    pub fn extract(&self, side: Side) -> Result<Extraction, ExcelError> {
        let text = match self.validate()? {
            Verdict::NotFound => return Ok(Extraction::NotFound),
            // Nothing precedes an empty marker at the start, everything
            // precedes it at the end; TEXTAFTER mirrors that.
            Verdict::EmptyDelimiter => match (side, self.instance > 0) {
                (Side::Before, true) | (Side::After, false) => String::new(),
                (Side::Before, false) | (Side::After, true) => self.text.to_string(),
            },
            Verdict::Proceed(split) => split.select(side, self.instance),
        };
        Ok(Extraction::Text(text))
    }

    pub fn before(&self) -> Result<Extraction, ExcelError> {
        self.extract(Side::Before)
    }

    pub fn after(&self) -> Result<Extraction, ExcelError> {
        self.extract(Side::After)
    }
}

pub fn text_before(
    text: &str,
    delimiter: &str,
    instance: i64,
    match_mode: MatchMode,
    match_end: MatchEnd,
) -> Result<Extraction, ExcelError> {
    DelimiterSearch::new(text, delimiter)
        .instance(instance)
        .match_mode(match_mode)
        .match_end(match_end)
        .before()
}

pub fn text_after(
    text: &str,
    delimiter: &str,
    instance: i64,
    match_mode: MatchMode,
    match_end: MatchEnd,
) -> Result<Extraction, ExcelError> {
    DelimiterSearch::new(text, delimiter)
        .instance(instance)
        .match_mode(match_mode)
        .match_end(match_end)
        .after()
}
