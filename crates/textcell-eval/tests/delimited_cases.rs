//! Table-driven TEXTBEFORE / TEXTAFTER cases loaded from `tests/data/*.json`.

use serde::Deserialize;
use serde_json::Value;
use textcell_common::{ExcelError, LiteralValue};
use textcell_eval::{builtins, function_registry};

#[derive(Debug, Deserialize)]
struct Case {
    name: String,
    args: Vec<Value>,
    expected: Value,
}

/// Strings that spell an error code (`"#N/A"`) become error values.
fn literal(v: &Value) -> LiteralValue {
    match v {
        Value::Null => LiteralValue::Empty,
        Value::Bool(b) => LiteralValue::Boolean(*b),
        Value::Number(n) => match n.as_i64() {
            Some(i) => LiteralValue::Int(i),
            None => LiteralValue::Number(n.as_f64().unwrap_or(f64::NAN)),
        },
        Value::String(s) => match ExcelError::from_error_string(s) {
            Some(e) => LiteralValue::Error(e),
            None => LiteralValue::Text(s.clone()),
        },
        other => panic!("unsupported fixture value {other}"),
    }
}

/// Errors compare by kind only; messages are diagnostic.
fn same(actual: &LiteralValue, expected: &LiteralValue) -> bool {
    match (actual, expected) {
        (LiteralValue::Error(a), LiteralValue::Error(b)) => a.kind == b.kind,
        _ => actual == expected,
    }
}

fn run_table(function: &str, json: &str) {
    builtins::load_builtins();
    let cases: Vec<Case> = serde_json::from_str(json).expect("fixture parses");
    assert!(!cases.is_empty());

    let failures: Vec<String> = cases
        .iter()
        .filter_map(|case| {
            let args: Vec<LiteralValue> = case.args.iter().map(literal).collect();
            let expected = literal(&case.expected);
            let actual = function_registry::evaluate(function, &args);
            (!same(&actual, &expected)).then(|| {
                format!("{function} {}: expected {expected:?}, got {actual:?}", case.name)
            })
        })
        .collect();
    assert!(failures.is_empty(), "{}", failures.join("\n"));
}

#[test]
fn textbefore_table() {
    run_table("TEXTBEFORE", include_str!("data/textbefore.json"));
}

#[test]
fn textafter_table() {
    run_table("TEXTAFTER", include_str!("data/textafter.json"));
}
