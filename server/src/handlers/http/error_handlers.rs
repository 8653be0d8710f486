use std::collections::HashMap;
use std::convert::Infallible;

use bytes::Bytes;
use http_body_util::combinators::BoxBody;
use http_body_util::{BodyExt, Full};
use hyper::header::{self, HeaderValue};
use hyper::{Response, StatusCode};
use serde_json::json;
use tracing::error;

use shared::types::DataValidationError;

/// Body type shared by every response the server produces.
pub type ResponseBody = BoxBody<Bytes, Infallible>;

// ---------------------------------------------------------------------------
// ApiError
// ---------------------------------------------------------------------------

/// The failure categories the API knows how to answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    Validation,
    BadRequest,
    NotFound,
    MethodNotAllowed,
    UnsupportedMediaType,
    Internal,
}

impl ErrorCategory {
    /// Fallback detail used when an error carries no description of its own.
    fn default_detail(self) -> &'static str {
        match self {
            Self::Validation => "Invalid input data",
            Self::BadRequest => "Bad request",
            Self::NotFound => "Resource not found",
            Self::MethodNotAllowed => "Method not allowed",
            Self::UnsupportedMediaType => "Content type not supported",
            Self::Internal => "Internal server error",
        }
    }
}

/// A categorized request failure.
///
/// `Display` yields the detail verbatim when one is present, so the mapped
/// response's `message` field always contains the triggering error's own
/// text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiError {
    category: ErrorCategory,
    detail: Option<String>,
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.message())
    }
}

impl std::error::Error for ApiError {}

impl ApiError {
    pub fn new(category: ErrorCategory, detail: impl Into<String>) -> Self {
        Self {
            category,
            detail: Some(detail.into()),
        }
    }

    /// An error with no description — the mapper degrades to the category's
    /// default message.
    pub fn bare(category: ErrorCategory) -> Self {
        Self {
            category,
            detail: None,
        }
    }

    pub fn category(&self) -> ErrorCategory {
        self.category
    }

    fn message(&self) -> &str {
        self.detail
            .as_deref()
            .unwrap_or_else(|| self.category.default_detail())
    }
}

impl From<DataValidationError> for ApiError {
    fn from(err: DataValidationError) -> Self {
        Self::new(ErrorCategory::Validation, err.to_string())
    }
}

impl From<tokio_rusqlite::Error> for ApiError {
    fn from(err: tokio_rusqlite::Error) -> Self {
        Self::new(ErrorCategory::Internal, err.to_string())
    }
}

// ---------------------------------------------------------------------------
// Handlers — one per category
// ---------------------------------------------------------------------------
//
// Contract (identical for all six):
//
//   - the returned `StatusCode` equals both the response's HTTP status and
//     the `status` field inside the JSON body;
//   - the `error` field is the fixed reason phrase for the category;
//   - the `message` field is the error's `Display` text verbatim;
//   - the function cannot fail: body construction uses only infallible
//     paths, so a broken request can never knock out the error path itself.

pub type ErrorHandler = fn(&ApiError) -> (Response<ResponseBody>, StatusCode);

/// Maps a domain validation failure to 400 Bad Request.
pub fn request_validation_error(error: &ApiError) -> (Response<ResponseBody>, StatusCode) {
    error_pair(StatusCode::BAD_REQUEST, "Bad Request", error)
}

/// Maps a generic malformed request to 400 Bad Request.
pub fn bad_request(error: &ApiError) -> (Response<ResponseBody>, StatusCode) {
    error_pair(StatusCode::BAD_REQUEST, "Bad Request", error)
}

/// Maps a lookup miss to 404 Not Found.
pub fn not_found(error: &ApiError) -> (Response<ResponseBody>, StatusCode) {
    error_pair(StatusCode::NOT_FOUND, "Not Found", error)
}

/// Maps an unsupported HTTP verb to 405 Method Not Allowed.
pub fn method_not_supported(error: &ApiError) -> (Response<ResponseBody>, StatusCode) {
    error_pair(StatusCode::METHOD_NOT_ALLOWED, "Method not Allowed", error)
}

/// Maps an unacceptable content type to 415 Unsupported Media Type.
pub fn mediatype_not_supported(error: &ApiError) -> (Response<ResponseBody>, StatusCode) {
    error_pair(
        StatusCode::UNSUPPORTED_MEDIA_TYPE,
        "Unsupported media type",
        error,
    )
}

/// Maps an unhandled server fault to 500 Internal Server Error.
pub fn internal_server_error(error: &ApiError) -> (Response<ResponseBody>, StatusCode) {
    error_pair(
        StatusCode::INTERNAL_SERVER_ERROR,
        "Internal Server Error",
        error,
    )
}

fn error_pair(
    status: StatusCode,
    reason: &str,
    error: &ApiError,
) -> (Response<ResponseBody>, StatusCode) {
    error!("{} {}: {}", status.as_u16(), reason, error);

    // `json!` + `Value::to_string` cannot fail, and the status/header writes
    // below are infallible — nothing on this path can panic or error.
    let body = json!({
        "status": status.as_u16(),
        "error": reason,
        "message": error.to_string(),
    })
    .to_string();

    let mut response = Response::new(Full::new(Bytes::from(body)).boxed());
    *response.status_mut() = status;
    response.headers_mut().insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static("application/json"),
    );

    (response, status)
}

// ---------------------------------------------------------------------------
// ErrorHandlerTable
// ---------------------------------------------------------------------------

/// Explicit category → handler mapping.
///
/// The table is built once and handed to the router at construction time, so
/// dispatch never depends on ambient global registration and tests can swap
/// in their own handlers.
pub struct ErrorHandlerTable {
    handlers: HashMap<ErrorCategory, ErrorHandler>,
}

impl ErrorHandlerTable {
    pub fn new() -> Self {
        let mut handlers: HashMap<ErrorCategory, ErrorHandler> = HashMap::new();
        handlers.insert(ErrorCategory::Validation, request_validation_error);
        handlers.insert(ErrorCategory::BadRequest, bad_request);
        handlers.insert(ErrorCategory::NotFound, not_found);
        handlers.insert(ErrorCategory::MethodNotAllowed, method_not_supported);
        handlers.insert(
            ErrorCategory::UnsupportedMediaType,
            mediatype_not_supported,
        );
        handlers.insert(ErrorCategory::Internal, internal_server_error);
        Self { handlers }
    }

    /// Replace the handler for one category. Used by tests; also the hook
    /// for embedding the router with custom error rendering.
    pub fn with_handler(mut self, category: ErrorCategory, handler: ErrorHandler) -> Self {
        self.handlers.insert(category, handler);
        self
    }

    /// Look up the handler for the error's category and run it.
    ///
    /// Unknown categories cannot occur (the constructor covers the whole
    /// enum), but a table edited via [`Self::with_handler`] keeps the 500
    /// handler as the terminal fallback.
    pub fn respond(&self, error: &ApiError) -> (Response<ResponseBody>, StatusCode) {
        let handler = self
            .handlers
            .get(&error.category())
            .copied()
            .unwrap_or(internal_server_error);
        handler(error)
    }
}

impl Default for ErrorHandlerTable {
    fn default() -> Self {
        Self::new()
    }
}
