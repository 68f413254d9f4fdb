//! # Pintxopote API Server Library
//!
//! HTTP API for the pintxopote deals application: user accounts, bearer
//! tokens, daily deals by city, pub details and orders.
//!
//! ## Modules
//!
//! - `app`: Application state and router builder
//! - `config`: Configuration management
//! - `error`: Error handling and KO-envelope responses
//! - `routes`: API route handlers

pub mod app;
pub mod config;
pub mod error;
pub mod routes;
