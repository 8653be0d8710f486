pub mod body;
pub mod json_response;

// Re-export commonly used utilities
pub use body::*;
pub use json_response::*;
