use hyper::body::Incoming as IncomingBody;
use hyper::{Request, Response, StatusCode};
use tracing::info;

use crate::database::products as db_products;
use crate::handlers::http::error_handlers::{ApiError, ErrorCategory, ResponseBody};
use crate::handlers::http::utils::{deliver_serialized_json, product_id_from_path};
use crate::state::AppState;

/// GET /products/:id — fetch a single product.
pub async fn handle_get_product(
    req: Request<IncomingBody>,
    state: AppState,
) -> Result<Response<ResponseBody>, ApiError> {
    let id = product_id_from_path(req.uri().path())?;
    info!("Processing get product request for id {}", id);

    let product = db_products::get_product(&state.db, id)
        .await?
        .ok_or_else(|| {
            ApiError::new(
                ErrorCategory::NotFound,
                format!("Product with id '{}' was not found", id),
            )
        })?;

    deliver_serialized_json(&product, StatusCode::OK)
}
