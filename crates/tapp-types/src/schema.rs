use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};

use crate::error::{ErrorKind, FieldError, Loc, ValidationErrors};

/// Toggles for the optional stricter checks on free-form string fields.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SchemaOptions {
    /// Restrict `Trade.side` to `buy` / `sell`.
    pub strict_side: bool,
    /// Restrict `User.role` to `admin` / `investor` / `trader`.
    pub strict_role: bool,
}

impl SchemaOptions {
    pub fn strict() -> Self {
        Self {
            strict_side: true,
            strict_role: true,
        }
    }
}

/// A record type that can be validated out of a raw JSON value.
///
/// Implementations must be pure and total: every problem in `input` is
/// reported as a [`FieldError`] located under `loc`, never as a panic.
pub trait Schema: Sized {
    fn validate(input: &Value, loc: &Loc, options: &SchemaOptions) -> Result<Self, ValidationErrors>;
}

/// Validate a JSON array whose elements all follow schema `T`.
///
/// Errors from every element are collected. When `max_len` is set, a longer
/// list fails with a single `too_long` error before elements are inspected.
pub fn validate_list<T: Schema>(
    input: &Value,
    loc: &Loc,
    options: &SchemaOptions,
    max_len: Option<usize>,
) -> Result<Vec<T>, ValidationErrors> {
    let items = input
        .as_array()
        .ok_or_else(|| FieldError::new(ErrorKind::ListType, loc.clone(), input.clone()))?;

    if let Some(max) = max_len {
        if items.len() > max {
            let err = FieldError::new(ErrorKind::TooLong, loc.clone(), Value::Null)
                .with_msg(format!(
                    "List should have at most {max} items after validation, not {}",
                    items.len()
                ))
                .with_ctx(json!({
                    "field_type": "List",
                    "max_length": max,
                    "actual_length": items.len(),
                }));
            return Err(err.into());
        }
    }

    let mut out = Vec::with_capacity(items.len());
    let mut errors = Vec::new();
    for (i, item) in items.iter().enumerate() {
        match T::validate(item, &loc.child(i), options) {
            Ok(v) => out.push(v),
            Err(e) => errors.extend(e.into_errors()),
        }
    }
    if errors.is_empty() {
        Ok(out)
    } else {
        Err(ValidationErrors(errors))
    }
}

/// Field-by-field reader over a JSON object that accumulates errors.
///
/// Each accessor returns `None` after recording an error, so a schema can
/// read every field and then call [`ObjectReader::finish`] once.
pub struct ObjectReader<'a> {
    fields: &'a Map<String, Value>,
    loc: &'a Loc,
    errors: Vec<FieldError>,
}

impl<'a> ObjectReader<'a> {
    pub fn new(input: &'a Value, loc: &'a Loc) -> Result<Self, ValidationErrors> {
        let fields = input.as_object().ok_or_else(|| {
            FieldError::new(ErrorKind::ModelAttributesType, loc.clone(), input.clone())
        })?;
        Ok(Self {
            fields,
            loc,
            errors: Vec::new(),
        })
    }

    /// Read a required field through `parse`.
    pub fn required<T>(
        &mut self,
        name: &str,
        parse: impl FnOnce(&Value, &Loc) -> Result<T, FieldError>,
    ) -> Option<T> {
        let loc = self.loc.child(name);
        match self.fields.get(name) {
            None => {
                self.errors.push(FieldError::missing(loc));
                None
            }
            Some(value) => self.record(parse(value, &loc)),
        }
    }

    /// Read a field that may be absent or `null`.
    ///
    /// The outer `Option` is `None` on error; the inner one is `None` when
    /// the field was not supplied.
    pub fn optional<T>(
        &mut self,
        name: &str,
        parse: impl FnOnce(&Value, &Loc) -> Result<T, ValidationErrors>,
    ) -> Option<Option<T>> {
        let loc = self.loc.child(name);
        match self.fields.get(name) {
            None | Some(Value::Null) => Some(None),
            Some(value) => match parse(value, &loc) {
                Ok(v) => Some(Some(v)),
                Err(e) => {
                    self.errors.extend(e.into_errors());
                    None
                }
            },
        }
    }

    /// Record an additional error found by a cross-field or constraint check.
    pub fn push(&mut self, error: FieldError) {
        self.errors.push(error);
    }

    pub fn loc(&self) -> &Loc {
        self.loc
    }

    pub fn finish(self) -> Result<(), ValidationErrors> {
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(ValidationErrors(self.errors))
        }
    }

    fn record<T>(&mut self, result: Result<T, FieldError>) -> Option<T> {
        match result {
            Ok(v) => Some(v),
            Err(e) => {
                self.errors.push(e);
                None
            }
        }
    }
}

/// Check `value` against a closed set of string literals.
pub fn one_of(value: &str, allowed: &[&str], loc: &Loc) -> Result<(), FieldError> {
    if allowed.contains(&value) {
        return Ok(());
    }
    Err(enum_error(Value::String(value.to_string()), allowed, loc))
}

/// The `enum` error for an input outside `allowed`.
pub fn enum_error(input: Value, allowed: &[&str], loc: &Loc) -> FieldError {
    let expected = expected_list(allowed);
    FieldError::new(ErrorKind::Enum, loc.clone(), input)
        .with_msg(format!("Input should be {expected}"))
        .with_ctx(json!({ "expected": expected }))
}

/// `'a'`, `'a' or 'b'`, `'a', 'b' or 'c'`.
fn expected_list(allowed: &[&str]) -> String {
    let quoted: Vec<String> = allowed.iter().map(|s| format!("'{s}'")).collect();
    match quoted.split_last() {
        None => String::new(),
        Some((last, [])) => last.clone(),
        Some((last, rest)) => format!("{} or {last}", rest.join(", ")),
    }
}

/// Check a float against an inclusive lower bound.
pub fn ge(value: f64, bound: i64, loc: &Loc) -> Result<(), FieldError> {
    if value >= bound as f64 {
        return Ok(());
    }
    Err(
        FieldError::new(ErrorKind::GreaterThanEqual, loc.clone(), json!(value))
            .with_msg(format!("Input should be greater than or equal to {bound}"))
            .with_ctx(json!({ "ge": bound })),
    )
}
