use crate::function::Function;
use dashmap::DashMap;
use once_cell::sync::Lazy;
use std::sync::Arc;
use textcell_common::{ExcelError, LiteralValue};

/// Keyed by upper-cased name; lookups are case-insensitive.
static REG: Lazy<DashMap<String, Arc<dyn Function>>> = Lazy::new(DashMap::new);

pub fn register(f: Arc<dyn Function>) {
    REG.insert(f.name().to_ascii_uppercase(), f);
}

pub fn get(name: &str) -> Option<Arc<dyn Function>> {
    REG.get(&name.to_ascii_uppercase())
        .map(|v| Arc::clone(v.value()))
}

/// Registered function names, sorted.
pub fn names() -> Vec<String> {
    let mut names: Vec<String> = REG.iter().map(|e| e.key().clone()).collect();
    names.sort();
    names
}

/// Look up `name` and dispatch it; unknown names evaluate to `#NAME?`.
pub fn evaluate(name: &str, args: &[LiteralValue]) -> LiteralValue {
    match get(name) {
        Some(f) => f.dispatch(args),
        None => ExcelError::new_name()
            .with_message(format!("unknown function '{name}'"))
            .into(),
    }
}
