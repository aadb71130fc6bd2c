//! Element-wise lifting of scalar functions over array arguments.
//!
//! Shapes combine the way spreadsheet array formulas do: the result takes the
//! largest row count and the largest column count among the arguments; a
//! single row, single column or scalar argument is stretched to fit, and a
//! cell that lies outside an argument which cannot be stretched is `#N/A`.

use textcell_common::{ExcelError, LiteralValue};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Shape {
    pub rows: usize,
    pub cols: usize,
}

/// Result shape for `args`, or `None` when every argument is a scalar.
pub fn broadcast_shape(args: &[LiteralValue]) -> Option<Result<Shape, ExcelError>> {
    let mut shape: Option<Shape> = None;
    for value in args.iter().filter(|v| v.is_array()) {
        let (rows, cols) = value.dims();
        if rows == 0 || cols == 0 {
            return Some(Err(
                ExcelError::new_value().with_message("array argument has no elements")
            ));
        }
        let s = shape.get_or_insert(Shape { rows, cols });
        s.rows = s.rows.max(rows);
        s.cols = s.cols.max(cols);
    }
    shape.map(Ok)
}

/// The element of `value` feeding result cell `(row, col)`, if it has one.
fn element_at(value: &LiteralValue, row: usize, col: usize) -> Option<&LiteralValue> {
    let LiteralValue::Array(rows) = value else {
        return Some(value);
    };
    let r = if rows.len() == 1 { 0 } else { row };
    let cells = rows.get(r)?;
    let c = if cells.len() == 1 { 0 } else { col };
    cells.get(c)
}

/// Apply `f` to every cell of the broadcast shape of `args`.
///
/// Scalar-only argument lists are passed straight through to `f`.
pub fn map_elementwise<F>(args: &[LiteralValue], f: F) -> LiteralValue
where
    F: Fn(&[LiteralValue]) -> LiteralValue,
{
    let shape = match broadcast_shape(args) {
        None => return f(args),
        Some(Ok(shape)) => shape,
        Some(Err(e)) => return LiteralValue::Error(e),
    };

    #[cfg(feature = "tracing")]
    tracing::debug!(rows = shape.rows, cols = shape.cols, "broadcast");

    let mut cell_args: Vec<LiteralValue> = Vec::with_capacity(args.len());
    let mut out = Vec::with_capacity(shape.rows);
    for row in 0..shape.rows {
        let mut out_row = Vec::with_capacity(shape.cols);
        for col in 0..shape.cols {
            cell_args.clear();
            let mut complete = true;
            for arg in args {
                match element_at(arg, row, col) {
                    Some(v) => cell_args.push(v.clone()),
                    None => {
                        complete = false;
                        break;
                    }
                }
            }
            out_row.push(if complete {
                f(&cell_args)
            } else {
                LiteralValue::Error(ExcelError::new_na())
            });
        }
        out.push(out_row);
    }
    LiteralValue::Array(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use textcell_common::ExcelErrorKind;

    fn row(vals: &[i64]) -> LiteralValue {
        LiteralValue::Array(vec![vals.iter().map(|&v| LiteralValue::Int(v)).collect()])
    }

    fn col(vals: &[i64]) -> LiteralValue {
        LiteralValue::Array(vals.iter().map(|&v| vec![LiteralValue::Int(v)]).collect())
    }

    fn sum(args: &[LiteralValue]) -> LiteralValue {
        let total = args
            .iter()
            .map(|v| match v {
                LiteralValue::Int(i) => *i,
                _ => 0,
            })
            .sum();
        LiteralValue::Int(total)
    }

    #[test]
    fn scalars_bypass_broadcasting() {
        assert_eq!(broadcast_shape(&[LiteralValue::Int(1)]), None);
        let out = map_elementwise(&[LiteralValue::Int(1), LiteralValue::Int(2)], sum);
        assert_eq!(out, LiteralValue::Int(3));
    }

    #[test]
    fn row_against_column_makes_a_matrix() {
        let out = map_elementwise(&[row(&[1, 2, 3]), col(&[10, 20])], sum);
        assert_eq!(
            out,
            LiteralValue::Array(vec![
                vec![
                    LiteralValue::Int(11),
                    LiteralValue::Int(12),
                    LiteralValue::Int(13)
                ],
                vec![
                    LiteralValue::Int(21),
                    LiteralValue::Int(22),
                    LiteralValue::Int(23)
                ],
            ])
        );
    }

    #[test]
    fn scalar_is_repeated() {
        let out = map_elementwise(&[row(&[1, 2]), LiteralValue::Int(5)], sum);
        assert_eq!(
            out,
            LiteralValue::Array(vec![vec![LiteralValue::Int(6), LiteralValue::Int(7)]])
        );
    }

    #[test]
    fn short_argument_pads_with_na() {
        let out = map_elementwise(&[row(&[1, 2, 3]), row(&[1, 1])], sum);
        let LiteralValue::Array(rows) = out else {
            panic!("expected array");
        };
        assert_eq!(rows[0][0], LiteralValue::Int(2));
        assert_eq!(rows[0][1], LiteralValue::Int(3));
        assert!(matches!(&rows[0][2], LiteralValue::Error(e) if e.kind == ExcelErrorKind::Na));
    }

    #[test]
    fn empty_array_is_value_error() {
        let out = map_elementwise(&[LiteralValue::Array(vec![])], sum);
        assert!(matches!(out, LiteralValue::Error(e) if e.kind == ExcelErrorKind::Value));
    }
}
