//! # HTTP Request Handlers
//!
//! ## Submodules
//! - `health`: Health check endpoint (for monitoring)
//! - `auth`: Login page, register, login, logout, session info
//! - `users`: Current user profile
//!
//! Handlers reach the database through the [`crate::model::Model`] extractor and
//! the current user through [`crate::auth::AuthContext`]; both are attached by
//! middleware in [`crate::routes::router`].

pub mod auth;
pub mod health;
pub mod users;
