use serde::{Deserialize, Serialize};

/// Standard error response structure.
///
/// The `status` field always mirrors the HTTP status code of the response
/// that carries it, `error` is the canonical reason phrase for that code and
/// `message` holds the human-readable detail of whatever went wrong.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct ErrorResponse {
    pub status: u16,
    pub error: String,
    pub message: String,
}

impl ErrorResponse {
    pub fn new(status: u16, error: &str, message: &str) -> Self {
        Self {
            status,
            error: error.to_string(),
            message: message.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_with_expected_keys() {
        let body = ErrorResponse::new(404, "Not Found", "Resource not found");
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["status"], 404);
        assert_eq!(json["error"], "Not Found");
        assert_eq!(json["message"], "Resource not found");
    }

    #[test]
    fn roundtrips_through_json() {
        let body = ErrorResponse::new(500, "Internal Server Error", "boom");
        let json = serde_json::to_string(&body).unwrap();
        let back: ErrorResponse = serde_json::from_str(&json).unwrap();
        assert_eq!(back, body);
    }
}
