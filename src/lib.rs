//! # Session Auth Middleware
//!
//! Request middleware for axum applications:
//!
//! - [`model`]: attaches the shared database handle to each request and hands it
//!   to handlers through the [`model::Model`] extractor.
//! - [`auth`]: loads the current user from the session, guards routes that
//!   require a login, and keeps the session in step with login and logout.
//!
//! The remaining modules make up the demo server built on top of them.

pub mod account;   // Application user type backed by the accounts table
pub mod auth;      // Session authentication middleware and guard
pub mod config;    // Configuration management (environment variables, settings)
pub mod db;        // Database operations (accounts)
pub mod error;     // Error handling and custom error types
pub mod handlers;  // HTTP request handlers (routes)
pub mod model;     // Per-request database handle
pub mod password;  // Password hashing
pub mod routes;    // Router assembly
pub mod state;     // Shared application state
