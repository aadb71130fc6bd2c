use super::delimited::{DelimiterSearch, Extraction, MatchEnd, MatchMode, Side};
use crate::args::{ArgSchema, PreparedArgs};
use crate::func_caps;
use crate::function::Function;
use textcell_common::{ExcelError, LiteralValue};

/// Shared by TEXTBEFORE and TEXTAFTER.
fn delimited_schema() -> Vec<ArgSchema> {
    vec![
        ArgSchema::text("text"),
        ArgSchema::text("delimiter"),
        ArgSchema::integer("instance_num", i64::MIN).optional(LiteralValue::Int(1)),
        ArgSchema::flag("match_mode").optional(LiteralValue::Int(0)),
        ArgSchema::flag("match_end").optional(LiteralValue::Int(0)),
        ArgSchema::any("if_not_found").optional(LiteralValue::Error(ExcelError::new_na())),
    ]
}

fn eval_delimited(args: &PreparedArgs<'_>, side: Side) -> Result<LiteralValue, ExcelError> {
    let search = DelimiterSearch::new(args.text(0)?, args.text(1)?)
        .instance(args.int(2)?)
        .match_mode(MatchMode::from_flag(args.flag(3)?))
        .match_end(MatchEnd::from_flag(args.flag(4)?));
    match search.extract(side)? {
        Extraction::Text(s) => Ok(LiteralValue::Text(s)),
        Extraction::NotFound => Ok(args.value(5)?.clone()),
    }
}

#[derive(Debug)]
pub struct TextBeforeFn;
/// Returns the text that occurs before a given delimiter occurrence.
///
/// # Remarks
/// - `instance_num` counts occurrences from the start; negative values count from the end.
/// - `instance_num` of `0`, or larger in magnitude than the text length, returns `#VALUE!`.
/// - `match_mode` `1` matches the delimiter case-insensitively; any non-zero value counts as `1`.
/// - `match_end` `1` treats the end of the text as one extra delimiter.
/// - When the delimiter never occurs, `if_not_found` is returned (default `#N/A`).
/// - When the delimiter occurs, but fewer times than requested, the result is `#N/A`.
/// - An empty delimiter matches at the very start (or the very end for negative instances);
///   instances beyond half the text length return `#N/A`.
/// - The delimiter is matched literally; regex metacharacters have no special meaning.
///
/// # Examples
///
/// ```yaml,sandbox
/// title: "Before the first occurrence"
/// formula: '=TEXTBEFORE("Red riding hood''s red hood", "hood")'
/// expected: "Red riding "
/// ```
///
/// ```yaml,sandbox
/// title: "Counting from the end"
/// formula: '=TEXTBEFORE("Red riding hood''s red hood", "hood", -1)'
/// expected: "Red riding hood's red "
/// ```
///
/// ```yaml,sandbox
/// title: "Text end counts as a delimiter"
/// formula: '=TEXTBEFORE("Socrates", " ", 1, 0, 1)'
/// expected: "Socrates"
/// ```
impl Function for TextBeforeFn {
    func_caps!(PURE, ELEMENTWISE);
    fn name(&self) -> &'static str {
        "TEXTBEFORE"
    }
    fn min_args(&self) -> usize {
        2
    }
    fn arg_schema(&self) -> &'static [ArgSchema] {
        use once_cell::sync::Lazy;
        static SCHEMA: Lazy<Vec<ArgSchema>> = Lazy::new(delimited_schema);
        &SCHEMA
    }
    fn eval_scalar(&self, args: &PreparedArgs<'_>) -> Result<LiteralValue, ExcelError> {
        eval_delimited(args, Side::Before)
    }
}

#[derive(Debug)]
pub struct TextAfterFn;
/// Returns the text that occurs after a given delimiter occurrence.
///
/// # Remarks
/// - Arguments and error rules match `TEXTBEFORE`.
/// - With `match_end` `1`, a negative instance may select the start of the text as the delimiter.
///
/// # Examples
///
/// ```yaml,sandbox
/// title: "After the first occurrence"
/// formula: '=TEXTAFTER("Red riding hood''s red hood", "hood")'
/// expected: "'s red hood"
/// ```
///
/// ```yaml,sandbox
/// title: "Case-insensitive match"
/// formula: '=TEXTAFTER("Red riding hood''s red hood", "HOOD", 1, 1)'
/// expected: "'s red hood"
/// ```
///
/// ```yaml,sandbox
/// title: "Fallback when absent"
/// formula: '=TEXTAFTER("abc", "x", 1, 0, 0, "none")'
/// expected: "none"
/// ```
impl Function for TextAfterFn {
    func_caps!(PURE, ELEMENTWISE);
    fn name(&self) -> &'static str {
        "TEXTAFTER"
    }
    fn min_args(&self) -> usize {
        2
    }
    fn arg_schema(&self) -> &'static [ArgSchema] {
        use once_cell::sync::Lazy;
        static SCHEMA: Lazy<Vec<ArgSchema>> = Lazy::new(delimited_schema);
        &SCHEMA
    }
    fn eval_scalar(&self, args: &PreparedArgs<'_>) -> Result<LiteralValue, ExcelError> {
        eval_delimited(args, Side::After)
    }
}

pub fn register_builtins() {
    crate::register_functions!(TextBeforeFn, TextAfterFn);
}
