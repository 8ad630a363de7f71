use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

/// Machine-readable kind of a single field error.
///
/// Serialized in `snake_case`; the names are part of the wire contract of
/// the `422` response body.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    Missing,
    IntType,
    IntParsing,
    IntFromFloat,
    FloatType,
    FloatParsing,
    StringType,
    ListType,
    ModelAttributesType,
    DatetimeType,
    DatetimeParsing,
    Enum,
    GreaterThanEqual,
    TooLong,
    JsonInvalid,
}

impl ErrorKind {
    /// Default human message for kinds whose message carries no context.
    pub fn default_message(&self) -> &'static str {
        match self {
            Self::Missing => "Field required",
            Self::IntType => "Input should be a valid integer",
            Self::IntParsing => "Input should be a valid integer, unable to parse string as an integer",
            Self::IntFromFloat => "Input should be a valid integer, got a number with a fractional part",
            Self::FloatType => "Input should be a valid number",
            Self::FloatParsing => "Input should be a valid number, unable to parse string as a number",
            Self::StringType => "Input should be a valid string",
            Self::ListType => "Input should be a valid list",
            Self::ModelAttributesType => {
                "Input should be a valid dictionary or object to extract fields from"
            }
            Self::DatetimeType => "Input should be a valid datetime",
            Self::DatetimeParsing => {
                "Input should be a valid datetime, unable to parse string as a datetime"
            }
            Self::Enum => "Input should be a valid enumeration member",
            Self::GreaterThanEqual => "Input should be greater than or equal to the bound",
            Self::TooLong => "Input should be shorter",
            Self::JsonInvalid => "JSON decode error",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tag = serde_json::to_value(self)
            .ok()
            .and_then(|v| v.as_str().map(str::to_owned))
            .unwrap_or_default();
        f.write_str(&tag)
    }
}

/// One segment of an error location: an object key or a list index.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LocItem {
    Index(usize),
    Key(String),
}

impl From<&str> for LocItem {
    fn from(key: &str) -> Self {
        Self::Key(key.to_string())
    }
}

impl From<usize> for LocItem {
    fn from(index: usize) -> Self {
        Self::Index(index)
    }
}

impl fmt::Display for LocItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Index(i) => write!(f, "{i}"),
            Self::Key(k) => f.write_str(k),
        }
    }
}

/// Path from the request root to the offending value, e.g.
/// `["body", 0, "price"]`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Loc(Vec<LocItem>);

impl Loc {
    /// Location of a request part (`body`, `path`, `query`).
    pub fn part(name: &str) -> Self {
        Self(vec![LocItem::from(name)])
    }

    /// A new location one segment below `self`.
    pub fn child(&self, item: impl Into<LocItem>) -> Self {
        let mut items = self.0.clone();
        items.push(item.into());
        Self(items)
    }
}

impl fmt::Display for Loc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self.0.iter().map(ToString::to_string).collect();
        f.write_str(&parts.join("."))
    }
}

/// A single field-level validation failure.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FieldError {
    #[serde(rename = "type")]
    pub kind: ErrorKind,
    pub loc: Loc,
    pub msg: String,
    pub input: Value,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ctx: Option<Value>,
}

impl FieldError {
    /// An error using the kind's default message and no context.
    pub fn new(kind: ErrorKind, loc: Loc, input: Value) -> Self {
        Self {
            kind,
            loc,
            msg: kind.default_message().to_string(),
            input,
            ctx: None,
        }
    }

    pub fn missing(loc: Loc) -> Self {
        Self::new(ErrorKind::Missing, loc, Value::Null)
    }

    pub fn with_msg(mut self, msg: impl Into<String>) -> Self {
        self.msg = msg.into();
        self
    }

    pub fn with_ctx(mut self, ctx: Value) -> Self {
        self.ctx = Some(ctx);
        self
    }
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {} [{}]", self.loc, self.msg, self.kind)
    }
}

/// Every field error collected while validating one input.
///
/// Never empty when returned as an `Err`.
#[derive(Clone, Debug, Default, PartialEq, Error, Serialize, Deserialize)]
#[error("{} validation error(s); first: {}", .0.len(), first_error(.0))]
#[serde(transparent)]
pub struct ValidationErrors(pub Vec<FieldError>);

fn first_error(errors: &[FieldError]) -> String {
    errors.first().map(ToString::to_string).unwrap_or_default()
}

impl ValidationErrors {
    pub fn single(error: FieldError) -> Self {
        Self(vec![error])
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn errors(&self) -> &[FieldError] {
        &self.0
    }

    pub fn into_errors(self) -> Vec<FieldError> {
        self.0
    }
}

impl From<FieldError> for ValidationErrors {
    fn from(error: FieldError) -> Self {
        Self::single(error)
    }
}
