//! HTTP request handlers.
//!
//! Each handler validates its input, builds a per-request [`crate::context::ExecutionContext`]
//! from the application's shutdown token, and calls the repository.
//!
//! - [`users`]: User CRUD operations

pub mod users;
