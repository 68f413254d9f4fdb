//! # Pintxopote Shared Library
//!
//! This crate contains shared types, utilities, and business logic used across
//! the Pintxopote API server and its HTTP client.
//!
//! ## Module Organization
//!
//! - `models`: Database models and data structures
//! - `auth`: Authentication utilities (JWT, password hashing, middleware)
//! - `db`: Connection pool, migrations and collection resets
//! - `requests`: Request payloads and their validation
//! - `validation`: Required-field checks shared by client and server
//! - `envelope`: The `{status, data | error}` response envelope

pub mod auth;
pub mod db;
pub mod envelope;
pub mod models;
pub mod requests;
pub mod validation;

/// Current version of the Pintxopote shared library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
