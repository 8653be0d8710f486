use std::future::Future;
use std::pin::Pin;

use hyper::body::Incoming as IncomingBody;
use hyper::header::{self, HeaderMap};
use hyper::{Method, Request, Response, StatusCode};
use tracing::{info, warn};

use crate::handlers::http::error_handlers::{
    ApiError, ErrorCategory, ErrorHandlerTable, ResponseBody,
};
use crate::handlers::http::products;
use crate::handlers::http::utils::deliver_serialized_json;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Handler type alias
// ---------------------------------------------------------------------------
//
// Every handler receives (req, state) and returns either a finished response
// or an `ApiError`. Errors never propagate past the router: `route` feeds
// them through the error-handler table, so the dispatch surface as a whole
// is infallible.

type RouteHandler = Box<
    dyn Fn(
            Request<IncomingBody>,
            AppState,
        ) -> Pin<Box<dyn Future<Output = Result<Response<ResponseBody>, ApiError>> + Send>>
        + Send
        + Sync,
>;

struct Route {
    method: Method,
    path: String,
    handler: RouteHandler,
}

/// Outcome of matching a request against the route table. Split out from
/// `route` so the 404/405 decision is testable without a live request.
#[derive(Debug, PartialEq, Eq)]
enum Resolution {
    /// Index into the route table.
    Handler(usize),
    /// The path exists but not under this verb.
    MethodNotAllowed,
    NotFound,
}

// ---------------------------------------------------------------------------
// Router
// ---------------------------------------------------------------------------

pub struct Router {
    routes: Vec<Route>,
    error_handlers: ErrorHandlerTable,
}

impl std::fmt::Debug for Router {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Router")
            .field("routes_count", &self.routes.len())
            .finish()
    }
}

impl Router {
    /// The error-handler table is injected here, once, at construction —
    /// there is no global registration anywhere in the crate.
    pub fn new(error_handlers: ErrorHandlerTable) -> Self {
        Self {
            routes: Vec::new(),
            error_handlers,
        }
    }

    pub fn get<F, Fut>(self, path: &str, handler: F) -> Self
    where
        F: Fn(Request<IncomingBody>, AppState) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<Response<ResponseBody>, ApiError>> + Send + 'static,
    {
        self.register(Method::GET, path, handler)
    }

    pub fn post<F, Fut>(self, path: &str, handler: F) -> Self
    where
        F: Fn(Request<IncomingBody>, AppState) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<Response<ResponseBody>, ApiError>> + Send + 'static,
    {
        self.register(Method::POST, path, handler)
    }

    pub fn put<F, Fut>(self, path: &str, handler: F) -> Self
    where
        F: Fn(Request<IncomingBody>, AppState) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<Response<ResponseBody>, ApiError>> + Send + 'static,
    {
        self.register(Method::PUT, path, handler)
    }

    pub fn delete<F, Fut>(self, path: &str, handler: F) -> Self
    where
        F: Fn(Request<IncomingBody>, AppState) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<Response<ResponseBody>, ApiError>> + Send + 'static,
    {
        self.register(Method::DELETE, path, handler)
    }

    fn register<F, Fut>(mut self, method: Method, path: &str, handler: F) -> Self
    where
        F: Fn(Request<IncomingBody>, AppState) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<Response<ResponseBody>, ApiError>> + Send + 'static,
    {
        self.routes.push(Route {
            method,
            path: path.to_string(),
            handler: Box::new(move |req, state| Box::pin(handler(req, state))),
        });
        self
    }

    // ── Dispatch ──────────────────────────────────────────────────────────────

    /// Dispatch a request. Infallible by construction: every failure mode —
    /// unknown path, wrong verb, bad media type, handler error — is turned
    /// into a structured JSON response by the error-handler table.
    pub async fn route(
        &self,
        req: Request<IncomingBody>,
        state: AppState,
    ) -> Response<ResponseBody> {
        let method = req.method().clone();
        let path = req.uri().path().to_string();

        let index = match self.resolve(&method, &path) {
            Resolution::Handler(index) => index,

            Resolution::MethodNotAllowed => {
                warn!("Rejected {} {}: method not registered", method, path);
                let error = ApiError::new(
                    ErrorCategory::MethodNotAllowed,
                    format!("Method {} is not supported for {}", method, path),
                );
                return self.error_handlers.respond(&error).0;
            }

            Resolution::NotFound => {
                info!("No route matched {} {}", method, path);
                let error = ApiError::new(
                    ErrorCategory::NotFound,
                    format!("Resource {} was not found", path),
                );
                return self.error_handlers.respond(&error).0;
            }
        };

        // Body-carrying verbs must declare a JSON payload before the handler
        // ever reads a byte of it.
        if requires_json_body(&method) && !is_json_content_type(req.headers()) {
            warn!("Rejected {} {}: unsupported media type", method, path);
            let error = ApiError::new(
                ErrorCategory::UnsupportedMediaType,
                format!("Content-Type must be application/json for {} {}", method, path),
            );
            return self.error_handlers.respond(&error).0;
        }

        match (self.routes[index].handler)(req, state).await {
            Ok(response) => response,
            Err(error) => self.error_handlers.respond(&error).0,
        }
    }

    fn resolve(&self, method: &Method, path: &str) -> Resolution {
        let mut path_seen = false;

        for (index, route) in self.routes.iter().enumerate() {
            if !Self::path_matches(&route.path, path) {
                continue;
            }
            if route.method == *method {
                return Resolution::Handler(index);
            }
            path_seen = true;
        }

        if path_seen {
            Resolution::MethodNotAllowed
        } else {
            Resolution::NotFound
        }
    }

    // ── Path matching ─────────────────────────────────────────────────────────

    pub fn path_matches(route_path: &str, request_path: &str) -> bool {
        // Strip query string from incoming request path before comparing.
        let clean = request_path.split('?').next().unwrap_or(request_path);

        // Exact match.
        if route_path == clean {
            return true;
        }

        // Segment-by-segment matching for `:param` wildcards.
        // e.g.  "/products/:id"  matches  "/products/42"
        let route_segs: Vec<&str> = route_path.split('/').collect();
        let path_segs: Vec<&str> = clean.split('/').collect();

        if route_segs.len() != path_segs.len() {
            return false;
        }

        route_segs
            .iter()
            .zip(path_segs.iter())
            .all(|(r, p)| r.starts_with(':') || r == p)
    }
}

// ---------------------------------------------------------------------------
// Media type check
// ---------------------------------------------------------------------------

fn requires_json_body(method: &Method) -> bool {
    matches!(*method, Method::POST | Method::PUT | Method::PATCH)
}

fn is_json_content_type(headers: &HeaderMap) -> bool {
    headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        // Allow parameters, e.g. "application/json; charset=utf-8".
        .map(|v| {
            v.split(';')
                .next()
                .unwrap_or(v)
                .trim()
                .eq_ignore_ascii_case("application/json")
        })
        .unwrap_or(false)
}

// ---------------------------------------------------------------------------
// API router
// ---------------------------------------------------------------------------

/// The full route table of the product service.
pub fn build_api_router(error_handlers: ErrorHandlerTable) -> Router {
    Router::new(error_handlers)
        .get("/", |_req, _state| async move {
            let metadata = serde_json::json!({
                "name": "Product REST API Service",
                "version": "1.0",
                "paths": { "list_products": "/products" },
            });
            deliver_serialized_json(&metadata, StatusCode::OK)
        })
        .get("/health", |_req, _state| async move {
            deliver_serialized_json(&serde_json::json!({ "status": "OK" }), StatusCode::OK)
        })
        .get("/products", products::handle_list_products)
        .get("/products/:id", products::handle_get_product)
        .post("/products", products::handle_create_product)
        .put("/products/:id", products::handle_update_product)
        .delete("/products/:id", products::handle_delete_product)
}

#[cfg(test)]
mod tests {
    use super::*;
    use hyper::header::HeaderValue;

    fn test_router() -> Router {
        build_api_router(ErrorHandlerTable::new())
    }

    #[test]
    fn test_path_matches_exact() {
        assert!(Router::path_matches("/products", "/products"));
        assert!(!Router::path_matches("/products", "/health"));
    }

    #[test]
    fn test_path_matches_param_segment() {
        assert!(Router::path_matches("/products/:id", "/products/42"));
        assert!(!Router::path_matches("/products/:id", "/products"));
        assert!(!Router::path_matches("/products/:id", "/products/42/reviews"));
    }

    #[test]
    fn test_path_matches_strips_query_string() {
        assert!(Router::path_matches("/products", "/products?category=Cloth"));
    }

    #[test]
    fn resolve_finds_registered_route() {
        let router = test_router();
        assert!(matches!(
            router.resolve(&Method::GET, "/products/7"),
            Resolution::Handler(_)
        ));
    }

    #[test]
    fn resolve_reports_wrong_method_as_405() {
        let router = test_router();
        assert_eq!(
            router.resolve(&Method::PATCH, "/products"),
            Resolution::MethodNotAllowed
        );
        assert_eq!(
            router.resolve(&Method::DELETE, "/health"),
            Resolution::MethodNotAllowed
        );
    }

    #[test]
    fn resolve_reports_unknown_path_as_404() {
        let router = test_router();
        assert_eq!(
            router.resolve(&Method::GET, "/orders"),
            Resolution::NotFound
        );
    }

    #[test]
    fn json_content_type_accepts_charset_parameter() {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::CONTENT_TYPE,
            HeaderValue::from_static("application/json; charset=utf-8"),
        );
        assert!(is_json_content_type(&headers));
    }

    #[test]
    fn json_content_type_rejects_other_types_and_absence() {
        let mut headers = HeaderMap::new();
        assert!(!is_json_content_type(&headers));
        headers.insert(
            header::CONTENT_TYPE,
            HeaderValue::from_static("text/plain"),
        );
        assert!(!is_json_content_type(&headers));
    }

    #[test]
    fn only_body_carrying_verbs_require_json() {
        assert!(requires_json_body(&Method::POST));
        assert!(requires_json_body(&Method::PUT));
        assert!(!requires_json_body(&Method::GET));
        assert!(!requires_json_body(&Method::DELETE));
    }
}
