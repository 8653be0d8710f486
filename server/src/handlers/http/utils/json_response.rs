use bytes::Bytes;
use http_body_util::{BodyExt, Full};
use hyper::header::{self, HeaderValue};
use hyper::{Response, StatusCode};
use serde::Serialize;
use tracing::debug;

use crate::handlers::http::error_handlers::{ApiError, ErrorCategory, ResponseBody};

/// Serialize any `Serialize` type and deliver it as a JSON response.
/// This is the primary helper all handlers should use instead of
/// writing their own one-off serialization + response-building blocks.
pub fn deliver_serialized_json<T: Serialize>(
    data: &T,
    status: StatusCode,
) -> Result<Response<ResponseBody>, ApiError> {
    let json = serde_json::to_string(data).map_err(|e| {
        ApiError::new(
            ErrorCategory::Internal,
            format!("Failed to serialize response: {}", e),
        )
    })?;

    debug!("Delivering serialized JSON response, size: {} bytes", json.len());

    let mut response = Response::new(Full::new(Bytes::from(json)).boxed());
    *response.status_mut() = status;
    response.headers_mut().insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static("application/json"),
    );

    Ok(response)
}

/// Deliver a freshly created resource: 201 plus a `Location` header
/// pointing at where the resource can now be fetched.
pub fn deliver_created_json<T: Serialize>(
    data: &T,
    location: &str,
) -> Result<Response<ResponseBody>, ApiError> {
    let mut response = deliver_serialized_json(data, StatusCode::CREATED)?;

    let value = HeaderValue::from_str(location).map_err(|e| {
        ApiError::new(
            ErrorCategory::Internal,
            format!("Invalid Location header '{}': {}", location, e),
        )
    })?;
    response.headers_mut().insert(header::LOCATION, value);

    Ok(response)
}

/// A bodyless response — used for DELETE's 204 No Content.
pub fn empty_response(status: StatusCode) -> Response<ResponseBody> {
    let mut response = Response::new(Full::new(Bytes::new()).boxed());
    *response.status_mut() = status;
    response
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn serialized_json_carries_content_type_and_status() {
        let response =
            deliver_serialized_json(&json!({"status": "OK"}), StatusCode::OK).unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers()[header::CONTENT_TYPE],
            "application/json"
        );
        let body =
            tokio_test::block_on(response.into_body().collect()).unwrap().to_bytes();
        assert_eq!(&body[..], br#"{"status":"OK"}"#);
    }

    #[test]
    fn created_json_sets_the_location_header() {
        let response = deliver_created_json(&json!({"id": 7}), "/products/7").unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);
        assert_eq!(response.headers()[header::LOCATION], "/products/7");
    }

    #[test]
    fn empty_response_has_the_requested_status() {
        let response = empty_response(StatusCode::NO_CONTENT);
        assert_eq!(response.status(), StatusCode::NO_CONTENT);
    }
}
