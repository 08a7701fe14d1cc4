//! # Configuration Management
//!
//! This module handles loading configuration from environment variables.
//! It uses the "12-factor app" methodology where configuration comes from the environment.
//!
//! ## Environment Variables
//! - `HOST`: Server bind address (default: 127.0.0.1)
//! - `PORT`: Server port (default: 8080)
//! - `DATABASE_URL`: SQLite database connection string
//! - `LOGIN_PATH`: Where unauthenticated users are redirected (default: /login)
//! - `REDIRECT_PARAM`: Query parameter carrying the original path (default: return_url)
//! - `SESSION_KEY`: Session entry holding the user's unique id (default: AUTHUNIQUEID)
//! - `SESSION_INACTIVITY_HOURS`: Hours of inactivity before a session expires (default: 24)

use anyhow::Result;
use std::env;

/// Default login route used for guard redirects
pub const DEFAULT_LOGIN_PATH: &str = "/login";

/// Default query parameter set to the page the user was trying to visit
pub const DEFAULT_REDIRECT_PARAM: &str = "return_url";

/// Default session key containing the user's unique id
pub const DEFAULT_SESSION_KEY: &str = "AUTHUNIQUEID";

/// Settings for the authentication middleware
///
/// These are handed to [`crate::auth::Authenticator::new`] and to the
/// [`crate::auth::login_required`] guard explicitly. Nothing here is global, so two
/// routers in the same process can use different login pages or session keys.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthConfig {
    /// Relative URL of the login route
    pub login_path: String,

    /// Query string parameter that will be set with the page the user was
    /// trying to visit before they were intercepted
    pub redirect_param: String,

    /// Session entry holding the authenticated user's unique id
    pub session_key: String,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            login_path: DEFAULT_LOGIN_PATH.to_string(),
            redirect_param: DEFAULT_REDIRECT_PARAM.to_string(),
            session_key: DEFAULT_SESSION_KEY.to_string(),
        }
    }
}

/// Application configuration
///
/// This struct holds all configuration values needed to run the server.
/// All fields are public for easy access from other modules.
#[derive(Debug, Clone)]
pub struct Config {
    /// Server host/IP address to bind to
    /// Examples: "127.0.0.1" (localhost only), "0.0.0.0" (all interfaces)
    pub host: String,

    /// Server port number (1-65535)
    pub port: u16,

    /// SQLite database connection URL
    /// Format: "sqlite:filename.db?mode=rwc"
    /// The "mode=rwc" means: read, write, create if not exists
    pub database_url: String,

    /// Authentication middleware settings
    pub auth: AuthConfig,

    /// Hours without activity before a session expires
    pub session_inactivity_hours: i64,
}

impl Config {
    /// Load configuration from environment variables
    ///
    /// This function:
    /// 1. Loads variables from .env file (if present) using dotenvy
    /// 2. Reads each configuration value from environment
    /// 3. Falls back to sensible defaults if variables aren't set
    /// 4. Returns an error if required parsing fails (e.g., invalid port number)
    ///
    /// ## Example .env file
    /// ```text
    /// HOST=127.0.0.1
    /// PORT=8080
    /// DATABASE_URL=sqlite:session_auth.db?mode=rwc
    /// LOGIN_PATH=/login
    /// REDIRECT_PARAM=return_url
    /// SESSION_KEY=AUTHUNIQUEID
    /// ```
    pub fn from_env() -> Result<Self> {
        // dotenvy doesn't error if the file is missing
        dotenvy::dotenv().ok();

        let defaults = AuthConfig::default();

        Ok(Config {
            host: env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),

            port: env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()?,

            database_url: env::var("DATABASE_URL")
                .unwrap_or_else(|_| "sqlite:session_auth.db?mode=rwc".to_string()),

            auth: AuthConfig {
                login_path: env::var("LOGIN_PATH").unwrap_or(defaults.login_path),
                redirect_param: env::var("REDIRECT_PARAM").unwrap_or(defaults.redirect_param),
                session_key: env::var("SESSION_KEY").unwrap_or(defaults.session_key),
            },

            session_inactivity_hours: env::var("SESSION_INACTIVITY_HOURS")
                .unwrap_or_else(|_| "24".to_string())
                .parse()?,
        })
    }

    /// Get the socket address to bind the server to
    ///
    /// Combines host and port into a format suitable for TCP binding.
    /// Example: "127.0.0.1:8080"
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn auth_defaults() {
        let config = AuthConfig::default();
        assert_eq!(config.login_path, "/login");
        assert_eq!(config.redirect_param, "return_url");
        assert_eq!(config.session_key, "AUTHUNIQUEID");
    }

    #[test]
    fn bind_address_joins_host_and_port() {
        let config = Config {
            host: "0.0.0.0".to_string(),
            port: 3000,
            database_url: "sqlite::memory:".to_string(),
            auth: AuthConfig::default(),
            session_inactivity_hours: 24,
        };
        assert_eq!(config.bind_address(), "0.0.0.0:3000");
    }
}
