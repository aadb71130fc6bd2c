use crate::coercion;
use smallvec::{SmallVec, smallvec};
use std::borrow::Cow;
use textcell_common::{ArgKind, ExcelError, LiteralValue};

/// How a raw argument is turned into the typed form a function consumes.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum CoercionPolicy {
    /// Passed through verbatim, errors included.
    None,
    Text,
    /// Truncated integer; anything below `min` is `#VALUE!`.
    Integer { min: i64 },
    /// Integer where 0 is off and any other value is on.
    Flag,
}

#[derive(Clone, Debug)]
pub struct ArgSchema {
    pub name: &'static str,
    pub kinds: SmallVec<[ArgKind; 2]>,
    pub required: bool,
    pub coercion: CoercionPolicy,
    pub default: Option<LiteralValue>,
}

impl ArgSchema {
    pub fn any(name: &'static str) -> Self {
        Self {
            name,
            kinds: smallvec![ArgKind::Any],
            required: true,
            coercion: CoercionPolicy::None,
            default: None,
        }
    }

    pub fn text(name: &'static str) -> Self {
        Self {
            name,
            kinds: smallvec![ArgKind::Text, ArgKind::Number],
            required: true,
            coercion: CoercionPolicy::Text,
            default: None,
        }
    }

    pub fn integer(name: &'static str, min: i64) -> Self {
        Self {
            name,
            kinds: smallvec![ArgKind::Number],
            required: true,
            coercion: CoercionPolicy::Integer { min },
            default: None,
        }
    }

    pub fn flag(name: &'static str) -> Self {
        Self {
            name,
            kinds: smallvec![ArgKind::Number, ArgKind::Logical],
            required: true,
            coercion: CoercionPolicy::Flag,
            default: None,
        }
    }

    /// Mark the argument optional; omitted or empty values become `default`.
    pub fn optional(mut self, default: LiteralValue) -> Self {
        self.required = false;
        self.default = Some(default);
        self
    }

    /// `name: kind|kind` or `[name: kind]` for optional arguments.
    pub fn signature(&self) -> String {
        let kinds = self
            .kinds
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("|");
        if self.required {
            format!("{}: {kinds}", self.name)
        } else {
            format!("[{}: {kinds}]", self.name)
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum PreparedArg<'a> {
    Text(Cow<'a, str>),
    Int(i64),
    Flag(bool),
    Value(Cow<'a, LiteralValue>),
}

#[derive(Debug)]
pub struct PreparedArgs<'a> {
    pub items: Vec<PreparedArg<'a>>,
}

impl<'a> PreparedArgs<'a> {
    fn get(&self, idx: usize) -> Result<&PreparedArg<'a>, ExcelError> {
        self.items.get(idx).ok_or_else(|| {
            ExcelError::new_value().with_message(format!("argument {} is missing", idx + 1))
        })
    }

    pub fn text(&self, idx: usize) -> Result<&str, ExcelError> {
        match self.get(idx)? {
            PreparedArg::Text(s) => Ok(&**s),
            other => Err(mismatch(idx, "text", other)),
        }
    }

    pub fn int(&self, idx: usize) -> Result<i64, ExcelError> {
        match self.get(idx)? {
            PreparedArg::Int(i) => Ok(*i),
            other => Err(mismatch(idx, "integer", other)),
        }
    }

    /// Non-negative integer as a character count; huge counts saturate.
    pub fn count(&self, idx: usize) -> Result<usize, ExcelError> {
        let n = self.int(idx)?;
        Ok(usize::try_from(n.max(0)).unwrap_or(usize::MAX))
    }

    pub fn flag(&self, idx: usize) -> Result<bool, ExcelError> {
        match self.get(idx)? {
            PreparedArg::Flag(b) => Ok(*b),
            other => Err(mismatch(idx, "flag", other)),
        }
    }

    pub fn value(&self, idx: usize) -> Result<&LiteralValue, ExcelError> {
        match self.get(idx)? {
            PreparedArg::Value(v) => Ok(&**v),
            other => Err(mismatch(idx, "value", other)),
        }
    }
}

fn mismatch(idx: usize, wanted: &str, got: &PreparedArg<'_>) -> ExcelError {
    ExcelError::new_value().with_message(format!(
        "argument {} prepared as {got:?}, expected {wanted}",
        idx + 1
    ))
}

/// Resolve defaults and coerce every argument according to `schema`.
///
/// The first argument that fails coercion (or carries an error value into a
/// coercing slot) decides the returned error.
pub fn prepare_args<'a>(
    args: &'a [LiteralValue],
    schema: &[ArgSchema],
) -> Result<PreparedArgs<'a>, ExcelError> {
    let mut items = Vec::with_capacity(schema.len());
    for (idx, param) in schema.iter().enumerate() {
        let raw: Cow<'a, LiteralValue> = match (args.get(idx), &param.default) {
            (None | Some(LiteralValue::Empty), Some(default)) => Cow::Owned(default.clone()),
            (Some(v), _) => Cow::Borrowed(v),
            (None, None) if param.required => {
                return Err(ExcelError::new_value()
                    .with_message(format!("missing required argument '{}'", param.name)));
            }
            (None, None) => Cow::Owned(LiteralValue::Empty),
        };

        let item = match param.coercion {
            CoercionPolicy::None => PreparedArg::Value(raw),
            CoercionPolicy::Text => PreparedArg::Text(match raw {
                Cow::Borrowed(v) => coercion::to_text(v)?,
                Cow::Owned(v) => Cow::Owned(coercion::to_text(&v)?.into_owned()),
            }),
            CoercionPolicy::Integer { min } => {
                PreparedArg::Int(coercion::to_int_at_least(&raw, min)?)
            }
            CoercionPolicy::Flag => PreparedArg::Flag(coercion::to_flag(&raw)?),
        };
        items.push(item);
    }
    Ok(PreparedArgs { items })
}
