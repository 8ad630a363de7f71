//! Mapping of raw path, query and body input onto typed values.
//!
//! Failures are reported with the same [`FieldError`] records the entity
//! schemas produce, located under `path`, `query` or `body`.

use std::collections::HashMap;

use axum::extract::rejection::PathRejection;
use axum::extract::Path;
use axum::http::Uri;
use serde_json::{json, Value};
use tapp_types::coerce;
use tapp_types::{ErrorKind, FieldError, Loc, ValidationErrors};

/// Parse an integer path parameter.
pub fn path_int(raw: &str, name: &str) -> Result<i64, ValidationErrors> {
    let loc = Loc::part("path").child(name);
    coerce::parse_int_str(raw).ok_or_else(|| {
        FieldError::new(ErrorKind::IntParsing, loc, Value::String(raw.to_string())).into()
    })
}

/// Text of the trailing path parameter.
///
/// A segment that does not percent-decode to UTF-8 is rejected by [`Path`];
/// it is recovered from the request URI and decoded lossily instead.
pub fn path_text(path: Result<Path<String>, PathRejection>, uri: &Uri) -> String {
    match path {
        Ok(Path(value)) => value,
        Err(rejection) => {
            tracing::debug!(%rejection, uri = %uri, "decoding path parameter lossily");
            last_segment_lossy(uri)
        }
    }
}

fn last_segment_lossy(uri: &Uri) -> String {
    let raw = uri.path().rsplit('/').next().unwrap_or_default();
    String::from_utf8_lossy(&urlencoding::decode_binary(raw.as_bytes())).into_owned()
}

/// Parse an optional integer query parameter, falling back to `default`.
pub fn query_int(
    params: &HashMap<String, String>,
    name: &str,
    default: i64,
) -> Result<i64, FieldError> {
    match params.get(name) {
        None => Ok(default),
        Some(raw) => coerce::parse_int_str(raw).ok_or_else(|| {
            FieldError::new(
                ErrorKind::IntParsing,
                Loc::part("query").child(name),
                Value::String(raw.clone()),
            )
        }),
    }
}

/// Decode a JSON request body.
///
/// An empty body is a `missing` error at `["body"]`; malformed JSON is a
/// `json_invalid` error located at the byte offset of the failure.
pub fn json_body(bytes: &[u8]) -> Result<Value, ValidationErrors> {
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Err(FieldError::missing(Loc::part("body")).into());
    }
    serde_json::from_slice(bytes).map_err(|e| {
        let offset = byte_offset(bytes, e.line(), e.column());
        FieldError::new(ErrorKind::JsonInvalid, Loc::part("body").child(offset), json!({}))
            .with_ctx(json!({ "error": e.to_string() }))
            .into()
    })
}

/// Convert serde_json's 1-based line / column into a byte offset.
fn byte_offset(bytes: &[u8], line: usize, column: usize) -> usize {
    let line_start: usize = bytes
        .split(|b| *b == b'\n')
        .take(line.saturating_sub(1))
        .map(|l| l.len() + 1)
        .sum();
    (line_start + column.saturating_sub(1)).min(bytes.len())
}
