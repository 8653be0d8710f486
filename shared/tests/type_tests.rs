/// Integration-level tests for the `shared` crate.
///
/// Each section tests one module; unit tests that are tightly coupled to
/// private helpers live inside the modules themselves (see `#[cfg(test)]`
/// blocks in `product.rs` and `config.rs`).
// ---------------------------------------------------------------------------
// Error response envelope
// ---------------------------------------------------------------------------
#[cfg(test)]
mod error_response_tests {
    use shared::types::ErrorResponse;

    #[test]
    fn envelope_json_contains_expected_keys() {
        let json =
            serde_json::to_value(ErrorResponse::new(400, "Bad Request", "missing name")).unwrap();
        for key in &["status", "error", "message"] {
            assert!(json.get(key).is_some(), "missing key: {}", key);
        }
    }

    #[test]
    fn status_round_trips_as_a_number() {
        let json = serde_json::to_value(ErrorResponse::new(404, "Not Found", "nope")).unwrap();
        assert!(json["status"].is_number());
        assert_eq!(json["status"], 404);
    }

    #[test]
    fn wire_shape_parses_back_into_the_struct() {
        let wire = r#"{"status":415,"error":"Unsupported media type","message":"use JSON"}"#;
        let parsed: ErrorResponse = serde_json::from_str(wire).unwrap();
        assert_eq!(parsed.status, 415);
        assert_eq!(parsed.error, "Unsupported media type");
        assert_eq!(parsed.message, "use JSON");
    }
}

// ---------------------------------------------------------------------------
// Product model
// ---------------------------------------------------------------------------

#[cfg(test)]
mod product_tests {
    use serde_json::json;
    use shared::types::{DataValidationError, Product};

    #[test]
    fn deserialize_collects_every_field() {
        let product = Product::deserialize(&json!({
            "name": "Hammer",
            "description": "Claw hammer",
            "price": 19.99,
            "available": true,
            "category": "Tools"
        }))
        .unwrap();
        assert_eq!(product.name, "Hammer");
        assert_eq!(product.category, "Tools");
        assert!(product.id.is_none());
    }

    #[test]
    fn every_missing_field_is_named_in_the_error() {
        for field in ["name", "description", "price", "available", "category"] {
            let mut payload = json!({
                "name": "Hammer",
                "description": "Claw hammer",
                "price": 19.99,
                "available": true,
                "category": "Tools"
            });
            payload.as_object_mut().unwrap().remove(field);
            let err = Product::deserialize(&payload).unwrap_err();
            assert!(
                err.to_string().contains(field),
                "error for missing {} was: {}",
                field,
                err
            );
        }
    }

    #[test]
    fn validation_error_displays_its_message() {
        let err = DataValidationError::Invalid("Test validation error".to_string());
        assert_eq!(err.to_string(), "Test validation error");
    }

    #[test]
    fn clone_produces_independent_copy() {
        let p1 = Product::deserialize(&json!({
            "name": "Hammer",
            "description": "Claw hammer",
            "price": 19.99,
            "available": true,
            "category": "Tools"
        }))
        .unwrap();
        let mut p2 = p1.clone().with_id(3);
        p2.name = "Mallet".to_string();
        assert_eq!(p1.name, "Hammer");
        assert_eq!(p2.id, Some(3));
    }
}

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

#[cfg(test)]
mod config_tests {
    use shared::config::parse_config;
    use shared::types::AppConfig;

    #[test]
    fn defaults_are_usable_without_a_file() {
        let config = AppConfig::default();
        assert!(config.server.addr().parse::<std::net::SocketAddr>().is_ok());
        assert!(!config.database.path.is_empty());
    }

    #[test]
    fn a_memory_database_path_is_accepted() {
        let config = parse_config(
            r#"
            [database]
            path = ":memory:"
            "#,
        )
        .unwrap();
        assert_eq!(config.database.path, ":memory:");
    }
}
