use hyper::body::Incoming as IncomingBody;
use hyper::{Request, Response};
use tracing::info;

use shared::types::Product;

use crate::database::products as db_products;
use crate::handlers::http::error_handlers::{ApiError, ResponseBody};
use crate::handlers::http::utils::{deliver_created_json, read_json_body};
use crate::state::AppState;

/// POST /products — create a product from a JSON payload.
///
/// A payload that fails model validation surfaces as 400 via the
/// `Validation` category; the created product is answered with 201 and a
/// `Location` header pointing at the new resource.
pub async fn handle_create_product(
    req: Request<IncomingBody>,
    state: AppState,
) -> Result<Response<ResponseBody>, ApiError> {
    info!("Processing create product request");

    let payload = read_json_body(req).await?;
    let product = Product::deserialize(&payload)?;

    let id = db_products::insert_product(&state.db, &product).await?;
    let created = product.with_id(id);

    info!("Created product {} ({})", id, created.name);

    deliver_created_json(&created, &format!("/products/{}", id))
}
