use hyper::body::Incoming as IncomingBody;
use hyper::{Request, Response, StatusCode};
use tracing::info;

use crate::database::products as db_products;
use crate::handlers::http::error_handlers::{ApiError, ResponseBody};
use crate::handlers::http::utils::{empty_response, product_id_from_path};
use crate::state::AppState;

/// DELETE /products/:id — remove a product.
///
/// Deletes are idempotent: the answer is 204 No Content whether or not the
/// id existed.
pub async fn handle_delete_product(
    req: Request<IncomingBody>,
    state: AppState,
) -> Result<Response<ResponseBody>, ApiError> {
    let id = product_id_from_path(req.uri().path())?;
    info!("Processing delete product request for id {}", id);

    let existed = db_products::delete_product(&state.db, id).await?;
    if !existed {
        info!("Product {} was already absent", id);
    }

    Ok(empty_response(StatusCode::NO_CONTENT))
}
