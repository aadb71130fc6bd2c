//! Spreadsheet literals as typed on the command line.
//!
//! `42`, `-1.5`, `TRUE`, `#N/A`, `"quoted text"` (with `""` for a quote),
//! `{1,2;3,4}` for arrays, and anything else as bare text. An empty string
//! is an omitted argument.

use textcell_common::{ExcelError, LiteralValue};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum LiteralParseError {
    #[error("unterminated quoted text in `{0}`")]
    UnterminatedQuote(String),
    #[error("array literal `{0}` is missing its closing `}}`")]
    UnterminatedArray(String),
    #[error("unexpected characters after quoted text in `{0}`")]
    TrailingAfterQuote(String),
    #[error("arrays cannot be nested")]
    NestedArray,
    #[error("array row {row}, column {col} is empty")]
    EmptyArrayElement { row: usize, col: usize },
    #[error("array row {row} has {found} columns, expected {expected}")]
    RaggedArray {
        row: usize,
        expected: usize,
        found: usize,
    },
}

pub fn parse_literal(raw: &str) -> Result<LiteralValue, LiteralParseError> {
    if raw.is_empty() {
        return Ok(LiteralValue::Empty);
    }
    let trimmed = raw.trim();
    if let Some(body) = trimmed.strip_prefix('{') {
        let body = body
            .strip_suffix('}')
            .ok_or_else(|| LiteralParseError::UnterminatedArray(raw.to_string()))?;
        return parse_array(body);
    }
    parse_scalar(raw)
}

fn parse_scalar(raw: &str) -> Result<LiteralValue, LiteralParseError> {
    let trimmed = raw.trim();
    if trimmed.starts_with('"') {
        return parse_quoted(trimmed).map(LiteralValue::Text);
    }
    if trimmed.eq_ignore_ascii_case("TRUE") {
        return Ok(LiteralValue::Boolean(true));
    }
    if trimmed.eq_ignore_ascii_case("FALSE") {
        return Ok(LiteralValue::Boolean(false));
    }
    if let Some(e) = ExcelError::from_error_string(trimmed) {
        return Ok(LiteralValue::Error(e));
    }
    if let Ok(i) = trimmed.parse::<i64>() {
        return Ok(LiteralValue::Int(i));
    }
    if let Ok(n) = trimmed.parse::<f64>() {
        if n.is_finite() {
            return Ok(LiteralValue::Number(n));
        }
    }
    // Bare words keep their original spacing.
    Ok(LiteralValue::Text(raw.to_string()))
}

/// `"..."` with doubled quotes as escapes.
fn parse_quoted(s: &str) -> Result<String, LiteralParseError> {
    let mut out = String::new();
    let mut chars = s.chars().skip(1).peekable();
    loop {
        match chars.next() {
            None => return Err(LiteralParseError::UnterminatedQuote(s.to_string())),
            Some('"') if chars.peek() == Some(&'"') => {
                chars.next();
                out.push('"');
            }
            Some('"') => break,
            Some(c) => out.push(c),
        }
    }
    if chars.next().is_some() {
        return Err(LiteralParseError::TrailingAfterQuote(s.to_string()));
    }
    Ok(out)
}

/// Split `body` on `sep` outside of quoted text.
fn split_unquoted(body: &str, sep: char) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut in_quotes = false;
    let mut start = 0;
    for (i, c) in body.char_indices() {
        match c {
            '"' => in_quotes = !in_quotes,
            c if c == sep && !in_quotes => {
                parts.push(&body[start..i]);
                start = i + c.len_utf8();
            }
            _ => {}
        }
    }
    parts.push(&body[start..]);
    parts
}

fn parse_array(body: &str) -> Result<LiteralValue, LiteralParseError> {
    let mut rows: Vec<Vec<LiteralValue>> = Vec::new();
    for (r, row_src) in split_unquoted(body, ';').into_iter().enumerate() {
        let mut row = Vec::new();
        for (c, cell) in split_unquoted(row_src, ',').into_iter().enumerate() {
            let cell = cell.trim();
            if cell.is_empty() {
                return Err(LiteralParseError::EmptyArrayElement {
                    row: r + 1,
                    col: c + 1,
                });
            }
            if cell.starts_with('{') {
                return Err(LiteralParseError::NestedArray);
            }
            row.push(parse_scalar(cell)?);
        }
        if let Some(first) = rows.first() {
            if first.len() != row.len() {
                return Err(LiteralParseError::RaggedArray {
                    row: r + 1,
                    expected: first.len(),
                    found: row.len(),
                });
            }
        }
        rows.push(row);
    }
    Ok(LiteralValue::Array(rows))
}
