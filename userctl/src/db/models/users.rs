//! Database models for users.

use crate::types::UserId;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row of the `users` table, exactly as the store returns it
#[derive(Debug, Clone, FromRow)]
pub struct UserRow {
    pub id: i64,
    pub name: String,
}

/// The user entity handed to callers
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub name: String,
}

impl From<UserRow> for User {
    fn from(row: UserRow) -> Self {
        Self {
            id: row.id.to_string(),
            name: row.name,
        }
    }
}

/// Database request for creating a new user
#[derive(Debug, Clone)]
pub struct UserCreateDBRequest {
    pub name: String,
}

impl UserCreateDBRequest {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

/// Database request for updating a user
#[derive(Debug, Clone)]
pub struct UserUpdateDBRequest {
    pub name: String,
}

impl UserUpdateDBRequest {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_row_maps_to_entity_with_string_id() {
        let user = User::from(UserRow {
            id: 42,
            name: "user42".to_string(),
        });
        assert_eq!(
            user,
            User {
                id: "42".to_string(),
                name: "user42".to_string()
            }
        );
    }
}
