//! # Pintxopote API Client
//!
//! Async client for the pintxopote HTTP API.
//!
//! Request fields are checked before anything goes on the wire, server
//! errors surface with the message the server sent, and the bearer token
//! issued by [`PintxopoteApi::authenticate_user`] is reused by every call
//! that needs it.
//!
//! ## Modules
//!
//! - `client`: The API client and its token holder
//! - `config`: Environment-driven client configuration
//! - `error`: Client error type
//!
//! ## Example
//!
//! ```no_run
//! use pintxopote_client::{requests::Credentials, PintxopoteApi};
//!
//! # async fn run() -> Result<(), pintxopote_client::ClientError> {
//! let api = PintxopoteApi::new("http://localhost:8080")?;
//!
//! let session = api
//!     .authenticate_user(&Credentials {
//!         email: Some("jd@mail.com".to_string()),
//!         password: Some("123".to_string()),
//!     })
//!     .await?;
//!
//! println!("logged in as {}", session.id);
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod config;
pub mod error;

pub use client::{PintxopoteApi, Session};
pub use config::ClientConfig;
pub use error::ClientError;
pub use pintxopote_shared::requests;
