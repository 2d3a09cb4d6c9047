//! Test utilities for integration testing (available with `test-utils` feature).
//!
//! Fixtures operate directly on the pool, outside the repository, so tests can set up and inspect
//! the `users` table independently of the code under test.

use crate::config::{Config, CorsConfig, CorsOrigin, DatabaseConfig, PoolSettings};
use axum_test::TestServer;
use sqlx::PgPool;
use std::time::Duration;
use url::Url;

pub async fn create_test_app(pool: PgPool) -> TestServer {
    let config = create_test_config();

    let app = crate::Application::new_with_pool(config, pool)
        .await
        .expect("Failed to create application");

    app.into_test_server()
}

pub fn create_test_config() -> Config {
    Config {
        host: "127.0.0.1".to_string(),
        port: 0,
        database_url: None,
        database: DatabaseConfig {
            // The pool is injected by the test harness
            url: "postgres://unused".to_string(),
            pool: PoolSettings {
                max_connections: 1,
                min_connections: 0,
                ..Default::default()
            },
            statement_timeout: Duration::from_secs(10),
        },
        cors: CorsConfig {
            allowed_origin: CorsOrigin::Url(Url::parse("http://localhost:3000").expect("static URL is valid")),
        },
        enable_otel_export: false,
    }
}

/// Insert users with explicit ids, then move the identity sequence past them so later inserts
/// through the repository continue numbering after the seed.
pub async fn insert_users(pool: &PgPool, users: &[(i64, &str)]) {
    for (id, name) in users {
        sqlx::query("INSERT INTO users (id, name) VALUES ($1, $2)")
            .bind(id)
            .bind(name)
            .execute(pool)
            .await
            .expect("Failed to insert test user");
    }

    sqlx::query("SELECT setval(pg_get_serial_sequence('users', 'id'), COALESCE(MAX(id), 0) + 1, false) FROM users")
        .execute(pool)
        .await
        .expect("Failed to advance users id sequence");
}

/// Empty the given tables and reset their identity sequences.
pub async fn truncate_tables(pool: &PgPool, tables: &[&str]) {
    for table in tables {
        assert!(
            !table.is_empty() && table.chars().all(|c| c.is_ascii_alphanumeric() || c == '_'),
            "invalid table name: {table:?}"
        );
        sqlx::query(&format!("TRUNCATE TABLE {table} RESTART IDENTITY CASCADE"))
            .execute(pool)
            .await
            .expect("Failed to truncate table");
    }
}

pub async fn count_users(pool: &PgPool) -> i64 {
    sqlx::query_scalar("SELECT COUNT(*) FROM users")
        .fetch_one(pool)
        .await
        .expect("Failed to count users")
}
