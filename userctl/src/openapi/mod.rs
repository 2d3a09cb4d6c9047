//! OpenAPI documentation configuration.
//!
//! [`UsersApiDoc`] documents the user management API at `/api/v1/*`. The document is served as JSON
//! at `/api/v1/openapi.json` and rendered with Scalar at `/docs`.

mod users;

pub use users::UsersApiDoc;
