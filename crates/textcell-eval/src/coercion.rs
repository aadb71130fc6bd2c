//! Spreadsheet coercion rules for text-function arguments.
//!
//! Every function here is total: a value that cannot be coerced produces an
//! `ExcelError` (usually `#VALUE!`), and an error value passed in comes back
//! out unchanged.

use std::borrow::Cow;
use textcell_common::{ExcelError, LiteralValue};

/// Significant digits a cell shows for a general-format number.
const DISPLAY_SIG_DIGITS: usize = 15;

/// Collapse a 1x1 array to its element (implicit intersection).
fn scalar(value: &LiteralValue) -> Result<&LiteralValue, ExcelError> {
    match value {
        LiteralValue::Array(rows) => match rows.as_slice() {
            [row] if row.len() == 1 => scalar(&row[0]),
            _ => Err(ExcelError::new_value().with_message("expected a single value, got an array")),
        },
        other => Ok(other),
    }
}

/// Render a number the way a general-format cell displays it.
pub fn number_to_text(n: f64) -> String {
    if n.fract() == 0.0 && n.abs() < 1e15 {
        return format!("{}", n as i64);
    }
    let rounded: f64 = format!("{:.*e}", DISPLAY_SIG_DIGITS - 1, n)
        .parse()
        .unwrap_or(n);
    rounded.to_string()
}

pub fn to_text(value: &LiteralValue) -> Result<Cow<'_, str>, ExcelError> {
    Ok(match scalar(value)? {
        LiteralValue::Text(s) => Cow::Borrowed(s.as_str()),
        LiteralValue::Empty => Cow::Borrowed(""),
        LiteralValue::Boolean(b) => Cow::Borrowed(if *b { "TRUE" } else { "FALSE" }),
        LiteralValue::Int(i) => Cow::Owned(i.to_string()),
        LiteralValue::Number(n) if n.is_finite() => Cow::Owned(number_to_text(*n)),
        LiteralValue::Number(_) => return Err(ExcelError::new_num()),
        LiteralValue::Error(e) => return Err(e.clone()),
        other => match other.as_serial_number() {
            Some(serial) => Cow::Owned(number_to_text(serial)),
            None => return Err(ExcelError::new_value()),
        },
    })
}

fn truncate(n: f64) -> Result<i64, ExcelError> {
    if !n.is_finite() {
        return Err(ExcelError::new_num());
    }
    let t = n.trunc();
    if t < i64::MIN as f64 || t >= i64::MAX as f64 {
        return Err(ExcelError::new_num().with_message(format!("{n} is out of integer range")));
    }
    Ok(t as i64)
}

pub fn to_integer(value: &LiteralValue) -> Result<i64, ExcelError> {
    match scalar(value)? {
        LiteralValue::Int(i) => Ok(*i),
        LiteralValue::Number(n) => truncate(*n),
        LiteralValue::Boolean(b) => Ok(i64::from(*b)),
        LiteralValue::Empty => Ok(0),
        LiteralValue::Text(s) => {
            let parsed = s
                .trim()
                .parse::<f64>()
                .ok()
                .filter(|n| n.is_finite())
                .ok_or_else(|| {
                    ExcelError::new_value().with_message(format!("'{s}' is not a number"))
                })?;
            truncate(parsed)
        }
        LiteralValue::Error(e) => Err(e.clone()),
        other => match other.as_serial_number() {
            Some(serial) => truncate(serial),
            None => Err(ExcelError::new_value()),
        },
    }
}

pub fn to_int_at_least(value: &LiteralValue, min: i64) -> Result<i64, ExcelError> {
    let n = to_integer(value)?;
    if n < min {
        return Err(ExcelError::new_value().with_message(format!("{n} is below minimum {min}")));
    }
    Ok(n)
}

pub fn to_flag(value: &LiteralValue) -> Result<bool, ExcelError> {
    to_integer(value).map(|n| n != 0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use textcell_common::ExcelErrorKind;

    #[test]
    fn text_from_scalars() {
        assert_eq!(to_text(&LiteralValue::Int(42)).unwrap(), "42");
        assert_eq!(to_text(&LiteralValue::Number(2.5)).unwrap(), "2.5");
        assert_eq!(to_text(&LiteralValue::Number(3.0)).unwrap(), "3");
        assert_eq!(to_text(&LiteralValue::Number(0.1 + 0.2)).unwrap(), "0.3");
        assert_eq!(to_text(&LiteralValue::Boolean(false)).unwrap(), "FALSE");
        assert_eq!(to_text(&LiteralValue::Empty).unwrap(), "");
        let date = LiteralValue::Date(NaiveDate::from_ymd_opt(2024, 1, 15).unwrap());
        assert_eq!(to_text(&date).unwrap(), "45306");
    }

    #[test]
    fn errors_pass_through() {
        let na = LiteralValue::Error(ExcelError::new_na());
        assert_eq!(to_text(&na).unwrap_err().kind, ExcelErrorKind::Na);
        assert_eq!(to_integer(&na).unwrap_err().kind, ExcelErrorKind::Na);
    }

    #[test]
    fn single_cell_arrays_intersect() {
        let one = LiteralValue::Array(vec![vec![LiteralValue::text("x")]]);
        assert_eq!(to_text(&one).unwrap(), "x");
        let many = LiteralValue::Array(vec![vec![LiteralValue::Int(1), LiteralValue::Int(2)]]);
        assert_eq!(to_text(&many).unwrap_err().kind, ExcelErrorKind::Value);
    }

    #[test]
    fn integers_truncate_toward_zero() {
        assert_eq!(to_integer(&LiteralValue::Number(2.9)).unwrap(), 2);
        assert_eq!(to_integer(&LiteralValue::Number(-2.9)).unwrap(), -2);
        assert_eq!(to_integer(&LiteralValue::text(" 7 ")).unwrap(), 7);
        assert_eq!(to_integer(&LiteralValue::Boolean(true)).unwrap(), 1);
        assert_eq!(to_integer(&LiteralValue::Empty).unwrap(), 0);
        assert_eq!(
            to_integer(&LiteralValue::text("seven")).unwrap_err().kind,
            ExcelErrorKind::Value
        );
        assert_eq!(
            to_integer(&LiteralValue::Number(f64::NAN)).unwrap_err().kind,
            ExcelErrorKind::Num
        );
        assert_eq!(
            to_integer(&LiteralValue::text("inf")).unwrap_err().kind,
            ExcelErrorKind::Value
        );
    }

    #[test]
    fn bounded_integers_and_flags() {
        assert_eq!(
            to_int_at_least(&LiteralValue::Int(-1), 0).unwrap_err().kind,
            ExcelErrorKind::Value
        );
        assert_eq!(to_int_at_least(&LiteralValue::Int(0), 0).unwrap(), 0);
        assert!(to_flag(&LiteralValue::Int(1)).unwrap());
        assert!(to_flag(&LiteralValue::Int(-3)).unwrap());
        assert!(!to_flag(&LiteralValue::Boolean(false)).unwrap());
    }
}
