/// Configuration management for the API server
///
/// This module loads configuration from environment variables and provides
/// a type-safe configuration struct.
///
/// # Environment Variables
///
/// - `DB_URL`: PostgreSQL connection string (required)
/// - `DB_MAX_CONNECTIONS`: Pool size (default: 10)
/// - `TOKEN_SECRET`: Secret key for JWT signing, at least 32 characters (required)
/// - `API_HOST`: Host to bind to (default: 0.0.0.0)
/// - `API_PORT`: Port to bind to (default: 8080)
/// - `CORS_ORIGINS`: Comma-separated allowed origins, `*` for any (default: *)
/// - `RUST_LOG`: Log filter (default: pintxopote_api=debug,tower_http=debug)
///
/// # Example
///
/// ```no_run
/// use pintxopote_api::config::Config;
///
/// # fn example() -> anyhow::Result<()> {
/// let config = Config::from_env()?;
/// println!("Server will listen on {}", config.bind_address());
/// # Ok(())
/// # }
/// ```

use std::env;

use anyhow::Context;
use pintxopote_shared::db::pool::DatabaseConfig;

/// Minimum accepted length of `TOKEN_SECRET`
pub const MIN_SECRET_LEN: usize = 32;

/// Complete application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// API server configuration
    pub api: ApiConfig,

    /// Database configuration
    pub database: DatabaseConfig,

    /// Token signing configuration
    pub token: TokenConfig,
}

/// API server configuration
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Host to bind to
    pub host: String,

    /// Port to bind to
    pub port: u16,

    /// Allowed CORS origins; `*` allows any
    pub cors_origins: Vec<String>,
}

/// Token signing configuration
#[derive(Debug, Clone)]
pub struct TokenConfig {
    /// Secret key for HS256 signing
    ///
    /// Generate with: `openssl rand -hex 32`
    pub secret: String,
}

impl Config {
    /// Loads configuration from the process environment
    ///
    /// A `.env` file in the working directory is read first, if present.
    ///
    /// # Errors
    ///
    /// Returns an error if a required variable is missing or a value can't
    /// be parsed
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds configuration from an arbitrary variable source
    ///
    /// # Errors
    ///
    /// Same as [`Config::from_env`]
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let host = lookup("API_HOST").unwrap_or_else(|| "0.0.0.0".to_string());
        let port = lookup("API_PORT")
            .unwrap_or_else(|| "8080".to_string())
            .parse::<u16>()
            .context("API_PORT must be a port number")?;

        let cors_origins = lookup("CORS_ORIGINS")
            .unwrap_or_else(|| "*".to_string())
            .split(',')
            .map(|origin| origin.trim().to_string())
            .filter(|origin| !origin.is_empty())
            .collect();

        let url = lookup("DB_URL").context("DB_URL environment variable is required")?;
        let max_connections = lookup("DB_MAX_CONNECTIONS")
            .unwrap_or_else(|| "10".to_string())
            .parse::<u32>()
            .context("DB_MAX_CONNECTIONS must be a number")?;

        let secret =
            lookup("TOKEN_SECRET").context("TOKEN_SECRET environment variable is required")?;
        if secret.len() < MIN_SECRET_LEN {
            anyhow::bail!("TOKEN_SECRET must be at least {MIN_SECRET_LEN} characters long");
        }

        Ok(Self {
            api: ApiConfig {
                host,
                port,
                cors_origins,
            },
            database: DatabaseConfig {
                url,
                max_connections,
                ..Default::default()
            },
            token: TokenConfig { secret },
        })
    }

    /// Returns the server bind address
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.api.host, self.api.port)
    }

    /// Whether any origin may call the API
    pub fn allows_any_origin(&self) -> bool {
        self.api.cors_origins.iter().any(|origin| origin == "*")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    const SECRET: &str = "test-secret-key-at-least-32-bytes-long";

    fn load(vars: &[(&str, &str)]) -> anyhow::Result<Config> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = load(&[
            ("DB_URL", "postgresql://localhost/pintxopote"),
            ("TOKEN_SECRET", SECRET),
        ])
        .unwrap();

        assert_eq!(config.bind_address(), "0.0.0.0:8080");
        assert_eq!(config.database.max_connections, 10);
        assert_eq!(config.database.url, "postgresql://localhost/pintxopote");
        assert!(config.allows_any_origin());
    }

    #[test]
    fn test_overrides() {
        let config = load(&[
            ("DB_URL", "postgresql://localhost/pintxopote"),
            ("DB_MAX_CONNECTIONS", "4"),
            ("TOKEN_SECRET", SECRET),
            ("API_HOST", "127.0.0.1"),
            ("API_PORT", "3000"),
            ("CORS_ORIGINS", "http://localhost:5173, https://pintxopote.eus"),
        ])
        .unwrap();

        assert_eq!(config.bind_address(), "127.0.0.1:3000");
        assert_eq!(config.database.max_connections, 4);
        assert_eq!(
            config.api.cors_origins,
            vec!["http://localhost:5173", "https://pintxopote.eus"]
        );
        assert!(!config.allows_any_origin());
    }

    #[test]
    fn test_missing_database_url() {
        let err = load(&[("TOKEN_SECRET", SECRET)]).unwrap_err();
        assert!(err.to_string().contains("DB_URL"));
    }

    #[test]
    fn test_short_secret() {
        let err = load(&[
            ("DB_URL", "postgresql://localhost/pintxopote"),
            ("TOKEN_SECRET", "short"),
        ])
        .unwrap_err();
        assert!(err.to_string().contains("at least 32 characters"));
    }

    #[test]
    fn test_bad_port() {
        let err = load(&[
            ("DB_URL", "postgresql://localhost/pintxopote"),
            ("TOKEN_SECRET", SECRET),
            ("API_PORT", "eighty"),
        ])
        .unwrap_err();
        assert!(err.to_string().contains("API_PORT"));
    }
}
