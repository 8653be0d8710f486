use http_body_util::BodyExt;
use hyper::Request;
use hyper::body::Incoming as IncomingBody;
use serde_json::Value;

use crate::handlers::http::error_handlers::{ApiError, ErrorCategory};

/// Collect the request body and parse it as JSON.
///
/// Both failure modes — an unreadable body and a body that is not valid
/// JSON — are the client's fault and map to 400 Bad Request. Field-level
/// validation of the parsed value is the model's job, not ours.
pub async fn read_json_body(req: Request<IncomingBody>) -> Result<Value, ApiError> {
    let body = req
        .into_body()
        .collect()
        .await
        .map_err(|e| {
            ApiError::new(
                ErrorCategory::BadRequest,
                format!("Failed to read request body: {}", e),
            )
        })?
        .to_bytes();

    if body.is_empty() {
        return Err(ApiError::new(
            ErrorCategory::BadRequest,
            "Request body is empty",
        ));
    }

    serde_json::from_slice(&body).map_err(|e| {
        ApiError::new(
            ErrorCategory::BadRequest,
            format!("Request body is not valid JSON: {}", e),
        )
    })
}

/// Parse the trailing `:id` path segment as a product id.
///
/// Mirrors the route converter of a typical web framework: a non-numeric id
/// simply does not name any product, so the failure is a 404 rather than a
/// 400.
pub fn product_id_from_path(path: &str) -> Result<i64, ApiError> {
    path.trim_end_matches('/')
        .rsplit('/')
        .next()
        .and_then(|segment| segment.parse().ok())
        .ok_or_else(|| {
            ApiError::new(
                ErrorCategory::NotFound,
                format!("Product id in '{}' is not a valid integer", path),
            )
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_a_numeric_id() {
        assert_eq!(product_id_from_path("/products/42").unwrap(), 42);
        assert_eq!(product_id_from_path("/products/42/").unwrap(), 42);
    }

    #[test]
    fn rejects_a_non_numeric_id() {
        let err = product_id_from_path("/products/fedora").unwrap_err();
        assert_eq!(err.category(), ErrorCategory::NotFound);
        assert!(err.to_string().contains("fedora"));
    }
}
