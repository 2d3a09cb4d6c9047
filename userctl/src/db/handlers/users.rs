//! Database repository for users.

use crate::context::ExecutionContext;
use crate::types::{UserId, parse_row_id};
use crate::db::{
    errors::Result,
    handlers::repository::Repository,
    models::users::{User, UserCreateDBRequest, UserRow, UserUpdateDBRequest},
};
use sqlx::PgPool;
use tracing::{debug, instrument};

/// Repository for the `users` table.
///
/// Holds a handle to the shared pool and nothing else; cloning it is cheap and every clone talks to
/// the same pool.
#[derive(Debug, Clone)]
pub struct Users {
    db: PgPool,
}

#[async_trait::async_trait]
impl Repository for Users {
    type CreateRequest = UserCreateDBRequest;
    type UpdateRequest = UserUpdateDBRequest;
    type Response = User;
    type Id = UserId;

    #[instrument(skip(self, ctx, request))]
    async fn create(&self, ctx: &ExecutionContext, request: &Self::CreateRequest) -> Result<Self::Id> {
        let id = ctx
            .run(
                sqlx::query_scalar::<_, i64>("INSERT INTO users (name) VALUES ($1) RETURNING id")
                    .bind(&request.name)
                    .fetch_one(&self.db),
            )
            .await?;

        Ok(id.to_string())
    }

    #[instrument(skip(self, ctx), fields(user_id = %id))]
    async fn get_by_id(&self, ctx: &ExecutionContext, id: &Self::Id) -> Result<Option<Self::Response>> {
        let Some(row_id) = parse_row_id(id) else {
            debug!("Identifier is not a store key, no user can match");
            return Ok(None);
        };

        let row = ctx
            .run(
                sqlx::query_as::<_, UserRow>("SELECT id, name FROM users WHERE id = $1")
                    .bind(row_id)
                    .fetch_optional(&self.db),
            )
            .await?;

        Ok(row.map(User::from))
    }

    #[instrument(skip(self, ctx, request), fields(user_id = %id))]
    async fn update(&self, ctx: &ExecutionContext, id: &Self::Id, request: &Self::UpdateRequest) -> Result<()> {
        let Some(row_id) = parse_row_id(id) else {
            debug!("Identifier is not a store key, update is a no-op");
            return Ok(());
        };

        let result = ctx
            .run(
                sqlx::query("UPDATE users SET name = $1 WHERE id = $2")
                    .bind(&request.name)
                    .bind(row_id)
                    .execute(&self.db),
            )
            .await?;

        // Zero rows is still success; callers re-read if they need to know
        debug!(rows_affected = result.rows_affected(), "User update applied");
        Ok(())
    }

    #[instrument(skip(self, ctx), fields(user_id = %id))]
    async fn delete(&self, ctx: &ExecutionContext, id: &Self::Id) -> Result<()> {
        let Some(row_id) = parse_row_id(id) else {
            debug!("Identifier is not a store key, delete is a no-op");
            return Ok(());
        };

        let result = ctx
            .run(sqlx::query("DELETE FROM users WHERE id = $1").bind(row_id).execute(&self.db))
            .await?;

        debug!(rows_affected = result.rows_affected(), "User delete applied");
        Ok(())
    }
}

impl Users {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}
