use hyper::body::Incoming as IncomingBody;
use hyper::{Request, Response, StatusCode};
use tracing::info;

use shared::types::Product;

use crate::database::products as db_products;
use crate::handlers::http::error_handlers::{ApiError, ErrorCategory, ResponseBody};
use crate::handlers::http::utils::{deliver_serialized_json, product_id_from_path, read_json_body};
use crate::state::AppState;

/// PUT /products/:id — replace a product wholesale.
///
/// The payload is validated exactly like a create; updating a product that
/// does not exist is a 404.
pub async fn handle_update_product(
    req: Request<IncomingBody>,
    state: AppState,
) -> Result<Response<ResponseBody>, ApiError> {
    let id = product_id_from_path(req.uri().path())?;
    info!("Processing update product request for id {}", id);

    let payload = read_json_body(req).await?;
    let product = Product::deserialize(&payload)?.with_id(id);

    let updated = db_products::update_product(&state.db, id, &product).await?;
    if !updated {
        return Err(ApiError::new(
            ErrorCategory::NotFound,
            format!("Product with id '{}' was not found", id),
        ));
    }

    deliver_serialized_json(&product, StatusCode::OK)
}
