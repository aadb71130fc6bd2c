//! Spreadsheet text functions: `LEFT`, `RIGHT`, `MID`, `TEXTBEFORE` and
//! `TEXTAFTER`.
//!
//! Each function implements [`function::Function`]; [`builtins::load_builtins`]
//! registers them all, after which [`function_registry::evaluate`] runs one by
//! name over already resolved argument values:
//!
//! ```
//! use textcell_common::LiteralValue;
//! use textcell_eval::{builtins, function_registry};
//!
//! builtins::load_builtins();
//! let out = function_registry::evaluate(
//!     "textafter",
//!     &[LiteralValue::from("key=value"), LiteralValue::from("=")],
//! );
//! assert_eq!(out, LiteralValue::from("value"));
//! ```

pub mod args;
pub mod broadcast;
pub mod coercion;
pub mod function;
pub mod function_registry;

pub mod builtins;

mod macros;
