//! textcell-eval/src/function.rs
// Home of the `Function` trait and its capability flags.

use crate::args::{ArgSchema, PreparedArgs, prepare_args};
use crate::broadcast;
use textcell_common::{ExcelError, LiteralValue};

bitflags::bitflags! {
    /// Describes the capabilities and properties of a function.
    ///
    /// Callers use these to pick an evaluation path and to decide whether a
    /// result may be cached or computed in parallel.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
    pub struct FnCaps: u16 {
        /// The function always produces the same output for the same input and has no
        /// side effects.
        const PURE          = 0b0000_0000_0001;
        /// The function operates on each element of its array arguments independently
        /// (e.g., `LEFT`, `TEXTBEFORE`). `dispatch` lifts it over arrays.
        const ELEMENTWISE   = 0b0000_0000_1000;
    }
}

/// Object-safe trait for all spreadsheet functions.
pub trait Function: Send + Sync + 'static {
    /// Capability flags for this function
    fn caps(&self) -> FnCaps {
        FnCaps::PURE
    }

    fn name(&self) -> &'static str;
    fn min_args(&self) -> usize {
        0
    }
    fn arg_schema(&self) -> &'static [ArgSchema] {
        &[]
    }
    fn max_args(&self) -> usize {
        self.arg_schema().len()
    }

    /// Evaluate one scalar call over already coerced arguments.
    fn eval_scalar(&self, args: &PreparedArgs<'_>) -> Result<LiteralValue, ExcelError>;

    /// Coerce `args` against the schema and evaluate them as a single call.
    fn dispatch_scalar(&self, args: &[LiteralValue]) -> LiteralValue {
        prepare_args(args, self.arg_schema())
            .and_then(|prepared| self.eval_scalar(&prepared))
            .unwrap_or_else(LiteralValue::Error)
    }

    /// Entry point for callers holding resolved argument values.
    ///
    /// Checks arity, lifts `ELEMENTWISE` functions over array arguments, and
    /// folds every failure into a `LiteralValue::Error`; it never panics.
    fn dispatch(&self, args: &[LiteralValue]) -> LiteralValue {
        #[cfg(feature = "tracing")]
        tracing::debug!(function = self.name(), args = args.len(), "dispatch");

        if args.len() < self.min_args() || args.len() > self.max_args() {
            return ExcelError::new_value()
                .with_message(format!(
                    "{} takes {} to {} arguments, got {}",
                    self.name(),
                    self.min_args(),
                    self.max_args(),
                    args.len()
                ))
                .into();
        }

        if self.caps().contains(FnCaps::ELEMENTWISE) && args.iter().any(LiteralValue::is_array) {
            return broadcast::map_elementwise(args, |cell| self.dispatch_scalar(cell));
        }

        self.dispatch_scalar(args)
    }

    /// `NAME(arg: kind, [opt: kind])` rendered from the schema.
    fn signature(&self) -> String {
        let params = self
            .arg_schema()
            .iter()
            .map(ArgSchema::signature)
            .collect::<Vec<_>>()
            .join(", ");
        format!("{}({params})", self.name())
    }
}
