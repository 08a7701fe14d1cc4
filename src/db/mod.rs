//! # Database Module
//!
//! - `models`: Data structures (Account)
//! - `accounts`: CRUD operations for accounts

pub mod accounts;
pub mod models;
