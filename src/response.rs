//! Classification of raw API responses into typed outcomes.
//!
//! The server reports failures in-band: a JSON object carrying an
//! `error_code` field is an error regardless of the HTTP status. Bodies
//! without the field are returned verbatim, and so is any empty payload —
//! the API's documented convention for "no results" is an empty list.

use bytes::Bytes;
use http::StatusCode;
use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

use crate::error::{ApiError, ErrorCategory};

/// Error payload shape: `{"error_code": int, "error_msg": string, "error_data": any|null}`
#[derive(Debug, Deserialize)]
struct ErrorPayload {
    error_code: i64,
    #[serde(default)]
    error_msg: Option<String>,
}

/// Classify a raw response body into the decoded payload or a typed error.
pub(crate) fn classify(status: StatusCode, body: &Bytes) -> Result<Value, ApiError> {
    let json: Value = serde_json::from_slice(body).map_err(|e| ApiError::MalformedResponse {
        message: format!("invalid response object: {e}"),
        http_status: status,
        body: body.clone(),
    })?;

    // Special case when an API method returns an empty result.
    if is_empty_payload(&json) {
        return Ok(json);
    }

    let has_error_code = json
        .as_object()
        .is_some_and(|map| map.contains_key("error_code"));
    if !has_error_code {
        return Ok(json);
    }

    let payload: ErrorPayload =
        serde_json::from_value(json).map_err(|e| ApiError::MalformedResponse {
            message: format!("invalid error object: {e}"),
            http_status: status,
            body: body.clone(),
        })?;

    let code = payload.error_code;
    let message = payload.error_msg.unwrap_or_default();
    debug!(code, %message, "API error response");

    Err(match ErrorCategory::of(code) {
        ErrorCategory::Auth => ApiError::Auth {
            code,
            message,
            http_status: status,
            body: body.clone(),
        },
        ErrorCategory::InvalidRequest => ApiError::InvalidRequest {
            code,
            message,
            http_status: status,
            body: body.clone(),
        },
        ErrorCategory::Generic => ApiError::Api {
            code,
            message,
            http_status: status,
            body: body.clone(),
        },
    })
}

/// Empty payloads (empty list, empty object, null, `""`, `false`, `0`)
/// are successes per the API's "no results" convention.
fn is_empty_payload(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(items) => items.is_empty(),
        Value::Object(map) => map.is_empty(),
    }
}
