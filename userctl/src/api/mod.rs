//! REST API for user management.
//!
//! - **[`handlers`]**: Axum route handlers
//! - **[`models`]**: Request/response data structures
//!
//! All routes are nested under `/api/v1`. OpenAPI documentation is served at `/docs`.

pub mod handlers;
pub mod models;
