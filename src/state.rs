//! # Application State
//!
//! This module defines the shared state that's accessible to all request handlers.
//! It is the process-wide source of the database handle that the
//! [`crate::model`] middleware attaches to every request.
//!
//! ## The State Pattern
//! Instead of creating new database connections for each request, we:
//! 1. Create a connection pool once at startup
//! 2. Store it in AppState
//! 3. Share it across all request handlers
//! 4. Axum clones the state for each request (cheap: the pool is reference counted)

use crate::config::{AuthConfig, Config};
use anyhow::Result;
use sqlx::sqlite::SqlitePool;

/// Shared application state
///
/// `SqlitePool` is a clone-able handle to a pool of connections, and `AuthConfig`
/// is a few short strings, so cloning per request is cheap.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool
    pub db: SqlitePool,

    /// Login redirect and session key settings
    pub auth: AuthConfig,
}

impl AppState {
    /// Initialize application state
    ///
    /// This function:
    /// 1. Connects to the SQLite database
    /// 2. Runs database migrations (creates tables if they don't exist)
    /// 3. Returns the initialized state
    ///
    /// # Errors
    /// Returns an error if the database connection or the migrations fail.
    pub async fn new(config: &Config) -> Result<Self> {
        let db = SqlitePool::connect(&config.database_url).await?;

        // Migrations are embedded from ./migrations and tracked so they run once
        sqlx::migrate!("./migrations").run(&db).await?;

        Ok(AppState::from_parts(db, config.auth.clone()))
    }

    /// Build state from an existing pool, e.g. an in-memory database in tests
    pub fn from_parts(db: SqlitePool, auth: AuthConfig) -> Self {
        AppState { db, auth }
    }
}
