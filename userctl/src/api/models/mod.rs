//! API request and response data models.
//!
//! These are distinct from the database models in [`crate::db::models`] so that the wire contract
//! and the storage representation can change independently. All models are annotated with
//! `utoipa` for the generated API docs.

pub mod users;
