pub mod error_handlers;
pub mod products;
pub mod routes;
pub mod utils;
