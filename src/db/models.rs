//! # Database Models
//!
//! Data structures that map to database tables, with serialization for the
//! JSON API and `sqlx::FromRow` for row mapping.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A person who can sign in with a username and password
///
/// ## Why Strings for dates?
/// SQLite stores timestamps as text (RFC3339 format), which also serializes
/// to JSON without extra work.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Account {
    /// Unique identifier (UUID v4)
    /// Example: "550e8400-e29b-41d4-a716-446655440000"
    ///
    /// This is the value stored in the session once the account logs in.
    pub id: String,

    /// Unique username, used for login
    pub username: String,

    /// Human-readable display name
    pub display_name: String,

    /// Argon2id PHC string; never sent to clients
    #[serde(skip_serializing)]
    pub password_hash: String,

    /// When the account was created (RFC3339 timestamp)
    pub created_at: String,

    /// When the account was last updated (RFC3339 timestamp)
    pub updated_at: String,
}

impl Account {
    /// Create a new account with generated ID and timestamps
    ///
    /// ## Example
    /// ```ignore
    /// let account = Account::new("alice".to_string(), "Alice Smith".to_string(), hash);
    /// println!("Created account with ID: {}", account.id);
    /// ```
    pub fn new(username: String, display_name: String, password_hash: String) -> Self {
        let now = Utc::now().to_rfc3339();

        Self {
            id: Uuid::new_v4().to_string(),
            username,
            display_name,
            password_hash,
            created_at: now.clone(),
            updated_at: now,
        }
    }
}
