pub mod create;
pub mod products;
pub mod utils;

pub use create::*;
pub use products::*;
pub use utils::*;
