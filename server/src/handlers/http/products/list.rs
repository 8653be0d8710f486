use hyper::body::Incoming as IncomingBody;
use hyper::{Request, Response, StatusCode};
use tracing::info;

use crate::database::products::{self as db_products, ProductFilter};
use crate::handlers::http::error_handlers::{ApiError, ErrorCategory, ResponseBody};
use crate::handlers::http::utils::deliver_serialized_json;
use crate::state::AppState;

/// GET /products — list products, optionally filtered by `name`,
/// `category` and/or `available` query parameters.
pub async fn handle_list_products(
    req: Request<IncomingBody>,
    state: AppState,
) -> Result<Response<ResponseBody>, ApiError> {
    let filter = parse_filter(req.uri().query().unwrap_or(""))?;
    info!("Processing list products request, filter: {:?}", filter);

    let products = db_products::list_products(&state.db, filter).await?;

    deliver_serialized_json(&products, StatusCode::OK)
}

fn parse_filter(query: &str) -> Result<ProductFilter, ApiError> {
    let mut filter = ProductFilter::default();

    for (key, value) in form_urlencoded::parse(query.as_bytes()) {
        match key.as_ref() {
            "name" => filter.name = Some(value.into_owned()),
            "category" => filter.category = Some(value.into_owned()),
            "available" => match value.as_ref() {
                "true" | "1" => filter.available = Some(true),
                "false" | "0" => filter.available = Some(false),
                other => {
                    return Err(ApiError::new(
                        ErrorCategory::BadRequest,
                        format!("Invalid value for 'available': {}", other),
                    ));
                }
            },
            // Unknown parameters are ignored, matching common API behavior.
            _ => {}
        }
    }

    Ok(filter)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_all_supported_filters() {
        let filter = parse_filter("name=Fedora&category=Cloth&available=true").unwrap();
        assert_eq!(filter.name.as_deref(), Some("Fedora"));
        assert_eq!(filter.category.as_deref(), Some("Cloth"));
        assert_eq!(filter.available, Some(true));
    }

    #[test]
    fn empty_query_means_no_filter() {
        let filter = parse_filter("").unwrap();
        assert_eq!(filter, ProductFilter::default());
    }

    #[test]
    fn rejects_a_non_boolean_available_value() {
        let err = parse_filter("available=maybe").unwrap_err();
        assert_eq!(err.category(), ErrorCategory::BadRequest);
        assert!(err.to_string().contains("maybe"));
    }

    #[test]
    fn ignores_unknown_parameters() {
        let filter = parse_filter("sort=price&name=Fedora").unwrap();
        assert_eq!(filter.name.as_deref(), Some("Fedora"));
        assert_eq!(filter.category, None);
    }
}
