//! Base repository trait for database operations.

use crate::context::ExecutionContext;
use crate::db::errors::Result;

/// Base repository trait providing common database operations
///
/// A repository is a data access layer for a single postgres table. Every operation issues exactly
/// one statement, runs it under the caller's [`ExecutionContext`] and holds no state between calls.
///
/// # Absence and no-op contract
///
/// - [`Repository::get_by_id`] reports a missing row as `Ok(None)`, never as an error.
/// - [`Repository::update`] and [`Repository::delete`] succeed when no row matches. A caller that
///   needs to know whether the row existed must read it separately.
#[async_trait::async_trait]
pub trait Repository {
    /// The request type for creating entities
    type CreateRequest: Sync;

    /// The request type for updating entities
    type UpdateRequest: Sync;

    /// The entity type returned by lookups
    type Response;

    /// The identifier type, assigned by the store on create
    type Id: Send + Sync;

    /// Create a new entity, returning the identifier the store assigned to it
    async fn create(&self, ctx: &ExecutionContext, request: &Self::CreateRequest) -> Result<Self::Id>;

    /// Get an entity by ID
    async fn get_by_id(&self, ctx: &ExecutionContext, id: &Self::Id) -> Result<Option<Self::Response>>;

    /// Update an entity by ID. Matching no row is not an error.
    async fn update(&self, ctx: &ExecutionContext, id: &Self::Id, request: &Self::UpdateRequest) -> Result<()>;

    /// Delete an entity by ID. Matching no row is not an error.
    async fn delete(&self, ctx: &ExecutionContext, id: &Self::Id) -> Result<()>;
}
