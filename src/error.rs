use std::io;

use bytes::Bytes;
use http::StatusCode;
use thiserror::Error;

/// Semantic category of a server-reported error code.
///
/// The Odnoklassniki API reports failures through a numeric `error_code`
/// field; the code tables below are part of the server's public contract
/// and must be preserved exactly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Authentication, authorization and signature failures
    Auth,
    /// Invalid request parameters or unknown method
    InvalidRequest,
    /// Any other server-reported error
    Generic,
}

/// Error codes the server classifies as authentication failures.
pub const AUTH_ERROR_CODES: &[i64] = &[
    7, 8, 9, 10, 11, 101, 102, 103, 104, 105, 200, 210, 401, 402, 453, 455,
];

/// Error codes the server classifies as invalid-request failures.
pub const INVALID_REQUEST_ERROR_CODES: &[i64] = &[
    3, 4, 21, 100, 110, 120, 130, 140, 300, 324, 454, 500, 501, 502, 503, 504, 505, 900, 1001,
    1002, 1003,
];

impl ErrorCategory {
    /// Classify a server error code. Codes outside both tables fall into
    /// the generic category; classification itself never fails.
    pub fn of(code: i64) -> Self {
        if AUTH_ERROR_CODES.contains(&code) {
            ErrorCategory::Auth
        } else if INVALID_REQUEST_ERROR_CODES.contains(&code) {
            ErrorCategory::InvalidRequest
        } else {
            ErrorCategory::Generic
        }
    }
}

/// Server's symbolic constant for a known error code, for diagnostics.
pub fn code_name(code: i64) -> Option<&'static str> {
    let name = match code {
        1 => "UNKNOWN",
        2 => "SERVICE",
        3 => "METHOD",
        4 => "REQUEST",
        7 => "ACTION_BLOCKED",
        8 => "FLOOD_BLOCKED",
        9 => "IP_BLOCKED",
        10 => "PERMISSION_DENIED",
        11 => "LIMIT_REACHED",
        21 => "NOT_MULTIPART",
        100 => "PARAM",
        101 => "PARAM_API_KEY",
        102 => "PARAM_SESSION_EXPIRED",
        103 => "PARAM_SESSION_KEY",
        104 => "PARAM_SIGNATURE",
        105 => "PARAM_RESIGNATURE",
        110 => "PARAM_USER_ID",
        120 => "PARAM_ALBUM_ID",
        130 => "PARAM_WIDGET",
        140 => "PARAM_MESSAGE_ID",
        200 => "PARAM_PERMISSION",
        210 => "PARAM_APPLICATION_DISABLED",
        300 => "NOT_FOUND",
        324 => "EDIT_PHOTO_FILE",
        401 => "AUTH_LOGIN",
        402 => "AUTH_LOGIN_CAPTCHA",
        453 => "SESSION_REQUIRED",
        454 => "CENSOR_MATCH",
        455 => "FRIEND_RESTRICTION",
        500 => "PHOTO_SIZE_LIMIT_EXCEEDED",
        501 => "PHOTO_SIZE_TOO_SMALL",
        502 => "PHOTO_SIZE_TOO_BIG",
        503 => "PHOTO_INVALID_FORMAT",
        504 => "PHOTO_IMAGE_CORRUPTED",
        505 => "PHOTO_NO_IMAGE",
        900 => "NO_SUCH_APP",
        1001 => "CALLBACK_INVALID_PAYMENT",
        1002 => "PAYMENT_IS_REQUIRED_PAYMENT",
        1003 => "INVALID_PAYMENT",
        9999 => "SYSTEM",
        _ => return None,
    };
    Some(name)
}

/// Comprehensive error types for API client operations
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("request build error: {0}")]
    Build(String),

    #[error("network communication error: {0}")]
    Connection(String),

    #[error("request timed out: {0}")]
    Timeout(String),

    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("deserialization error: {0}")]
    Deserialization(String),

    #[error("invalid response object: {message}")]
    MalformedResponse {
        message: String,
        http_status: StatusCode,
        body: Bytes,
    },

    #[error("authentication error (code {code}): {message}")]
    Auth {
        code: i64,
        message: String,
        http_status: StatusCode,
        body: Bytes,
    },

    #[error("invalid request (code {code}): {message}")]
    InvalidRequest {
        code: i64,
        message: String,
        http_status: StatusCode,
        body: Bytes,
    },

    #[error("API error (code {code}): {message}")]
    Api {
        code: i64,
        message: String,
        http_status: StatusCode,
        body: Bytes,
    },

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

impl ApiError {
    /// Server-reported error code, if this error carries one.
    pub fn error_code(&self) -> Option<i64> {
        match self {
            ApiError::Auth { code, .. }
            | ApiError::InvalidRequest { code, .. }
            | ApiError::Api { code, .. } => Some(*code),
            _ => None,
        }
    }
}
