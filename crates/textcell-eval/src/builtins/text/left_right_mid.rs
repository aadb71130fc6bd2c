use crate::args::{ArgSchema, PreparedArgs};
use crate::func_caps;
use crate::function::Function;
use textcell_common::LiteralValue;

/// First `count` characters of `text`.
pub fn left(text: &str, count: usize) -> String {
    text.chars().take(count).collect()
}

/// Last `count` characters of `text`.
pub fn right(text: &str, count: usize) -> String {
    let len = text.chars().count();
    text.chars().skip(len.saturating_sub(count)).collect()
}

/// `count` characters starting at the 1-based position `start`.
pub fn mid(text: &str, start: usize, count: usize) -> String {
    text.chars()
        .skip(start.saturating_sub(1))
        .take(count)
        .collect()
}

fn left_right_schema() -> Vec<ArgSchema> {
    vec![
        ArgSchema::text("text"),
        ArgSchema::integer("num_chars", 0).optional(LiteralValue::Int(1)),
    ]
}

#[derive(Debug)]
pub struct LeftFn;
/// Returns the leftmost characters of a text value.
///
/// # Remarks
/// - `num_chars` defaults to `1`; an empty argument counts as omitted.
/// - Negative `num_chars` returns `#VALUE!`; counts past the end return the whole text.
/// - Characters are Unicode scalar values, not bytes.
/// - Numbers and booleans are coerced to their display text first.
///
/// # Examples
///
/// ```yaml,sandbox
/// title: "First three characters"
/// formula: '=LEFT("Formula", 3)'
/// expected: "For"
/// ```
///
/// ```yaml,sandbox
/// title: "Default count"
/// formula: '=LEFT("Formula")'
/// expected: "F"
/// ```
impl Function for LeftFn {
    func_caps!(PURE, ELEMENTWISE);
    fn name(&self) -> &'static str {
        "LEFT"
    }
    fn min_args(&self) -> usize {
        1
    }
    fn arg_schema(&self) -> &'static [ArgSchema] {
        use once_cell::sync::Lazy;
        static SCHEMA: Lazy<Vec<ArgSchema>> = Lazy::new(left_right_schema);
        &SCHEMA
    }
    fn eval_scalar(
        &self,
        args: &PreparedArgs<'_>,
    ) -> Result<LiteralValue, textcell_common::ExcelError> {
        Ok(LiteralValue::Text(left(args.text(0)?, args.count(1)?)))
    }
}

#[derive(Debug)]
pub struct RightFn;
/// Returns the rightmost characters of a text value.
///
/// # Remarks
/// - Same argument rules as `LEFT`, counted from the end.
///
/// # Examples
///
/// ```yaml,sandbox
/// title: "Last two characters"
/// formula: '=RIGHT("hello", 2)'
/// expected: "lo"
/// ```
impl Function for RightFn {
    func_caps!(PURE, ELEMENTWISE);
    fn name(&self) -> &'static str {
        "RIGHT"
    }
    fn min_args(&self) -> usize {
        1
    }
    fn arg_schema(&self) -> &'static [ArgSchema] {
        use once_cell::sync::Lazy;
        static SCHEMA: Lazy<Vec<ArgSchema>> = Lazy::new(left_right_schema);
        &SCHEMA
    }
    fn eval_scalar(
        &self,
        args: &PreparedArgs<'_>,
    ) -> Result<LiteralValue, textcell_common::ExcelError> {
        Ok(LiteralValue::Text(right(args.text(0)?, args.count(1)?)))
    }
}

#[derive(Debug)]
pub struct MidFn;
/// Returns a run of characters from a fixed position.
///
/// # Remarks
/// - `start_num` is 1-based; values below `1` return `#VALUE!`.
/// - Negative `num_chars` returns `#VALUE!`.
/// - A start past the end yields empty text; the run is clamped to the end.
///
/// # Examples
///
/// ```yaml,sandbox
/// title: "Middle slice"
/// formula: '=MID("spreadsheet", 7, 5)'
/// expected: "sheet"
/// ```
///
/// ```yaml,sandbox
/// title: "Start past the end"
/// formula: '=MID("abc", 10, 2)'
/// expected: ""
/// ```
impl Function for MidFn {
    func_caps!(PURE, ELEMENTWISE);
    fn name(&self) -> &'static str {
        "MID"
    }
    fn min_args(&self) -> usize {
        3
    }
    fn arg_schema(&self) -> &'static [ArgSchema] {
        use once_cell::sync::Lazy;
        static SCHEMA: Lazy<Vec<ArgSchema>> = Lazy::new(|| {
            vec![
                ArgSchema::text("text"),
                ArgSchema::integer("start_num", 1),
                ArgSchema::integer("num_chars", 0),
            ]
        });
        &SCHEMA
    }
    fn eval_scalar(
        &self,
        args: &PreparedArgs<'_>,
    ) -> Result<LiteralValue, textcell_common::ExcelError> {
        Ok(LiteralValue::Text(mid(
            args.text(0)?,
            args.count(1)?,
            args.count(2)?,
        )))
    }
}

pub fn register_builtins() {
    crate::register_functions!(LeftFn, RightFn, MidFn);
}

#[cfg(test)]
mod tests {
    use super::*;
    use textcell_common::{ExcelError, ExcelErrorKind};

    fn text(s: &str) -> LiteralValue {
        LiteralValue::Text(s.into())
    }

    fn error_kind(v: &LiteralValue) -> Option<ExcelErrorKind> {
        match v {
            LiteralValue::Error(e) => Some(e.kind),
            _ => None,
        }
    }

    #[test]
    fn pure_helpers_clamp() {
        assert_eq!(left("hello", 2), "he");
        assert_eq!(left("hello", 99), "hello");
        assert_eq!(right("hello", 2), "lo");
        assert_eq!(right("hello", 99), "hello");
        assert_eq!(mid("hello", 2, 3), "ell");
        assert_eq!(mid("hello", 5, 9), "o");
        assert_eq!(mid("hello", 6, 1), "");
        assert_eq!(left("", 3), "");
    }

    #[test]
    fn left_right() {
        let s = text("hello");
        let n = LiteralValue::Int(2);
        assert_eq!(LeftFn.dispatch(&[s.clone(), n.clone()]), text("he"));
        assert_eq!(RightFn.dispatch(&[s.clone(), n]), text("lo"));
        assert_eq!(LeftFn.dispatch(&[s.clone()]), text("h"));
        assert_eq!(RightFn.dispatch(&[s]), text("o"));
    }

    #[test]
    fn counts_characters_not_bytes() {
        let s = text("añb日");
        assert_eq!(LeftFn.dispatch(&[s.clone(), LiteralValue::Int(2)]), text("añ"));
        assert_eq!(RightFn.dispatch(&[s.clone(), LiteralValue::Int(1)]), text("日"));
        assert_eq!(
            MidFn.dispatch(&[s, LiteralValue::Int(2), LiteralValue::Int(2)]),
            text("ñb")
        );
    }

    #[test]
    fn empty_count_uses_default() {
        let out = LeftFn.dispatch(&[text("abc"), LiteralValue::Empty]);
        assert_eq!(out, text("a"));
    }

    #[test]
    fn negative_count_is_value_error() {
        let out = LeftFn.dispatch(&[text("abc"), LiteralValue::Int(-1)]);
        assert_eq!(error_kind(&out), Some(ExcelErrorKind::Value));
        let out = MidFn.dispatch(&[text("abc"), LiteralValue::Int(1), LiteralValue::Int(-1)]);
        assert_eq!(error_kind(&out), Some(ExcelErrorKind::Value));
    }

    #[test]
    fn mid_start_below_one_is_value_error() {
        let out = MidFn.dispatch(&[text("abc"), LiteralValue::Int(0), LiteralValue::Int(1)]);
        assert_eq!(error_kind(&out), Some(ExcelErrorKind::Value));
    }

    #[test]
    fn fractional_counts_truncate() {
        let out = LeftFn.dispatch(&[text("abcdef"), LiteralValue::Number(2.9)]);
        assert_eq!(out, text("ab"));
    }

    #[test]
    fn non_text_is_coerced() {
        assert_eq!(
            LeftFn.dispatch(&[LiteralValue::Int(12345), LiteralValue::Int(3)]),
            text("123")
        );
        assert_eq!(
            RightFn.dispatch(&[LiteralValue::Boolean(true), LiteralValue::Int(2)]),
            text("UE")
        );
        assert_eq!(
            LeftFn.dispatch(&[LiteralValue::Empty, LiteralValue::Int(2)]),
            text("")
        );
    }

    #[test]
    fn errors_propagate() {
        let div = LiteralValue::Error(ExcelError::new(ExcelErrorKind::Div));
        assert_eq!(error_kind(&LeftFn.dispatch(&[div.clone()])), Some(ExcelErrorKind::Div));
        let out = MidFn.dispatch(&[text("abc"), div, LiteralValue::Int(1)]);
        assert_eq!(error_kind(&out), Some(ExcelErrorKind::Div));
    }

    #[test]
    fn arity_is_checked() {
        assert_eq!(error_kind(&LeftFn.dispatch(&[])), Some(ExcelErrorKind::Value));
        let out = MidFn.dispatch(&[text("abc"), LiteralValue::Int(1)]);
        assert_eq!(error_kind(&out), Some(ExcelErrorKind::Value));
    }

    #[test]
    fn counts_broadcast_over_text() {
        let counts = LiteralValue::Array(vec![vec![
            LiteralValue::Int(1),
            LiteralValue::Int(2),
            LiteralValue::Int(3),
        ]]);
        let out = LeftFn.dispatch(&[text("abc"), counts]);
        assert_eq!(
            out,
            LiteralValue::Array(vec![vec![text("a"), text("ab"), text("abc")]])
        );
    }
}
