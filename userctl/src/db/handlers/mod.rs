//! Repository implementations for database access.
//!
//! Each repository holds a pool handle, implements the [`Repository`] trait, and runs every
//! statement under the caller's [`crate::context::ExecutionContext`].
//!
//! ```ignore
//! use userctl::context::ExecutionContext;
//! use userctl::db::handlers::{Repository, Users};
//! use userctl::db::models::users::UserCreateDBRequest;
//!
//! async fn example(pool: sqlx::PgPool) -> userctl::db::errors::Result<()> {
//!     let ctx = ExecutionContext::background();
//!     let users = Users::new(pool);
//!
//!     let id = users.create(&ctx, &UserCreateDBRequest::new("alice")).await?;
//!     let user = users.get_by_id(&ctx, &id).await?;
//!     assert!(user.is_some());
//!     Ok(())
//! }
//! ```

pub mod repository;
pub mod users;

pub use repository::Repository;
pub use users::Users;
