//! Normalization of arbitrary failure values into loggable records.
//!
//! Model construction can fail with any error shape a provider SDK
//! produces. [`normalize`] and [`normalize_value`] reduce those shapes to a
//! single [`NormalizedError`] record so log output stays uniform and
//! bounded in size. Normalization never fails.

use std::collections::BTreeSet;
use std::error::Error as StdError;
use std::fmt;

use serde::Serialize;
use serde_json::{Map, Value};

use super::{ErrorCode, TitlerError};

/// Maximum characters kept from an error message.
pub const MAX_MESSAGE_LEN: usize = 500;
/// Maximum characters kept from a trace/debug rendering.
pub const MAX_TRACE_LEN: usize = 1000;
/// Appended to any truncated text.
pub const TRUNCATION_SUFFIX: &str = "... [truncated]";

/// Structured, size-bounded description of a failure.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NormalizedError {
    pub name: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub type_tag: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    #[serde(rename = "providerID", skip_serializing_if = "Option::is_none")]
    pub provider_id: Option<String>,
    #[serde(rename = "modelID", skip_serializing_if = "Option::is_none")]
    pub model_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trace: Option<String>,
    #[serde(skip_serializing_if = "BTreeSet::is_empty")]
    pub field_names: BTreeSet<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cause: Option<Box<NormalizedError>>,
}

impl NormalizedError {
    fn bare(name: impl Into<String>, message: &str) -> Self {
        Self {
            name: name.into(),
            message: truncate(message, MAX_MESSAGE_LEN),
            ..Default::default()
        }
    }

    /// JSON rendering for structured log payloads.
    pub fn to_json(&self) -> Value {
        serde_json::to_value(self).unwrap_or(Value::Null)
    }
}

impl fmt::Display for NormalizedError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.name, self.message)?;
        if let Some(code) = &self.code {
            write!(f, " [{code}]")?;
        }
        Ok(())
    }
}

/// Normalize a Rust error value, including one level of its `source()`.
pub fn normalize(error: &(dyn StdError + 'static)) -> NormalizedError {
    if let Some(body) = error_body(error) {
        return normalize_value(body);
    }
    let mut record = normalize_error_shallow(error);
    if let Some(source) = error.source() {
        record.field_names.insert("cause".to_string());
        record.cause = Some(Box::new(normalize_error_shallow(source)));
    }
    record
}

/// Normalize a loosely-typed failure payload, such as a provider error body.
///
/// Non-object values only produce a type tag and a stringified message.
pub fn normalize_value(value: &Value) -> NormalizedError {
    let mut record = normalize_value_shallow(value);
    if let Some(Value::Object(cause)) = value.get("cause") {
        record.cause = Some(Box::new(normalize_object_shallow(cause)));
    }
    record
}

fn normalize_value_shallow(value: &Value) -> NormalizedError {
    match value {
        Value::Object(map) => normalize_object_shallow(map),
        other => NormalizedError::bare(json_type_tag(other), &stringify(other)),
    }
}

/// The payload carried by [`TitlerError::ErrorBody`], if that is what `error` is.
fn error_body<'a>(error: &'a (dyn StdError + 'static)) -> Option<&'a Value> {
    match error.downcast_ref::<TitlerError>() {
        Some(TitlerError::ErrorBody(body)) => Some(body),
        _ => None,
    }
}

fn normalize_error_shallow(error: &(dyn StdError + 'static)) -> NormalizedError {
    if let Some(body) = error_body(error) {
        return normalize_value_shallow(body);
    }
    let mut record = NormalizedError::bare("Error", &error.to_string());
    record.trace = Some(truncate(&format!("{error:?}"), MAX_TRACE_LEN));

    if let Some(err) = error.downcast_ref::<TitlerError>() {
        record.name = err.name().to_string();
        record.type_tag = Some("TitlerError".to_string());
        record.code = Some(err.code().to_string());
        record.provider_id = err.provider_id().map(str::to_string);
        record.model_id = err.model_id().map(str::to_string);
        record.status = err.status();
    } else if let Some(err) = error.downcast_ref::<reqwest::Error>() {
        record.name = "HttpError".to_string();
        record.type_tag = Some("reqwest::Error".to_string());
        record.status = err.status().map(|s| s.as_u16());
        let code = match record.status {
            Some(status) => ErrorCode::from_status(status),
            None if err.is_timeout() => ErrorCode::Timeout,
            None => ErrorCode::NetworkError,
        };
        record.code = Some(code.to_string());
    } else if let Some(err) = error.downcast_ref::<std::io::Error>() {
        record.name = "IoError".to_string();
        record.type_tag = Some("std::io::Error".to_string());
        record.code = Some(format!("{:?}", err.kind()));
    } else if let Some(err) = error.downcast_ref::<serde_json::Error>() {
        record.name = "SerializationError".to_string();
        record.type_tag = Some("serde_json::Error".to_string());
        record.code = Some(format!("{:?}", err.classify()));
    }

    record.field_names = present_fields(&record);
    record
}

fn present_fields(record: &NormalizedError) -> BTreeSet<String> {
    let optional = [
        ("typeTag", record.type_tag.is_some()),
        ("code", record.code.is_some()),
        ("providerID", record.provider_id.is_some()),
        ("modelID", record.model_id.is_some()),
        ("status", record.status.is_some()),
        ("trace", record.trace.is_some()),
    ];
    ["name", "message"]
        .into_iter()
        .chain(optional.into_iter().filter(|(_, set)| *set).map(|(k, _)| k))
        .map(str::to_string)
        .collect()
}

fn normalize_object_shallow(map: &Map<String, Value>) -> NormalizedError {
    let name = map
        .get("name")
        .and_then(Value::as_str)
        .unwrap_or("Error")
        .to_string();
    let message = match map.get("message") {
        Some(Value::String(s)) => s.clone(),
        Some(other) => stringify(other),
        None => Value::Object(map.clone()).to_string(),
    };

    let mut record = NormalizedError::bare(name, &message);
    record.type_tag = Some(
        ["constructor", "type"]
            .iter()
            .find_map(|key| map.get(*key).and_then(Value::as_str))
            .unwrap_or("Object")
            .to_string(),
    );
    record.code = map.get("code").and_then(|code| match code {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    });
    record.provider_id = string_field(map, &["providerID", "providerId", "provider_id"]);
    record.model_id = string_field(map, &["modelID", "modelId", "model_id"]);
    record.status = ["status", "statusCode"]
        .iter()
        .find_map(|key| map.get(*key).and_then(Value::as_u64))
        .and_then(|s| u16::try_from(s).ok());
    record.trace = map
        .get("stack")
        .and_then(Value::as_str)
        .map(|stack| truncate(stack, MAX_TRACE_LEN));
    record.field_names = map.keys().cloned().collect();
    record
}

fn string_field(map: &Map<String, Value>, keys: &[&str]) -> Option<String> {
    keys.iter()
        .find_map(|key| map.get(*key).and_then(Value::as_str))
        .map(str::to_string)
}

fn json_type_tag(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

fn stringify(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Truncate to `max` characters, appending [`TRUNCATION_SUFFIX`] when cut.
pub fn truncate(text: &str, max: usize) -> String {
    match text.char_indices().nth(max) {
        Some((cut, _)) => format!("{}{TRUNCATION_SUFFIX}", &text[..cut]),
        None => text.to_string(),
    }
}
