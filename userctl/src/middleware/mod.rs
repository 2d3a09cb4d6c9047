//! HTTP middleware composed around the application router.

pub mod cors;

pub use cors::{CorsHeaders, cors_headers_middleware};
