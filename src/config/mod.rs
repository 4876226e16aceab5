//! Environment-driven application configuration.
//!
//! Reads server, security and upload settings from environment variables
//! with sensible per-environment defaults.

use std::env;
use std::path::PathBuf;

/// Application runtime environment.
#[derive(Debug, Clone, PartialEq)]
pub enum Environment {
    Development,
    Test,
    Staging,
    Production,
}

impl Environment {
    /// Detects the current environment from the `ENVIRONMENT` variable.
    ///
    /// Defaults to `Production` when unset or unrecognized.
    pub fn current() -> Self {
        match env::var("ENVIRONMENT")
            .unwrap_or_else(|_| "production".to_string())
            .to_lowercase()
            .as_str()
        {
            "development" | "dev" => Environment::Development,
            "test" | "testing" => Environment::Test,
            "staging" | "stage" => Environment::Staging,
            _ => Environment::Production,
        }
    }
}

/// Password hashing settings.
pub struct PasswordConfig;

impl PasswordConfig {
    /// Returns the bcrypt cost for the current environment.
    ///
    /// `BCRYPT_COST` overrides the default when it parses into the 4-15
    /// range. Defaults: 4 for development/test, 10 for staging, 12 for
    /// production.
    pub fn bcrypt_cost() -> u32 {
        if let Ok(cost_str) = env::var("BCRYPT_COST") {
            if let Ok(cost) = cost_str.parse::<u32>() {
                if (4..=15).contains(&cost) {
                    return cost;
                }
            }
        }

        Self::bcrypt_cost_for_env(&Environment::current())
    }

    pub fn bcrypt_cost_for_env(env: &Environment) -> u32 {
        match env {
            Environment::Development | Environment::Test => 4,
            Environment::Staging => 10,
            Environment::Production => 12,
        }
    }
}

/// Server binding settings.
pub struct ServerConfig;

impl ServerConfig {
    /// Returns the address the HTTP server binds to.
    ///
    /// Built from `HOST` (default `127.0.0.1`) and `PORT` (default `8080`).
    pub fn bind_address() -> String {
        let host = env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("PORT").unwrap_or_else(|_| "8080".to_string());
        format!("{}:{}", host, port)
    }
}

/// Rate limiting settings for the governor middleware.
#[derive(Debug)]
pub struct RateLimitConfig {
    pub per_second: u64,
    pub burst_size: u32,
}

impl RateLimitConfig {
    /// Loads rate limiting settings from the environment.
    ///
    /// * `RATE_LIMIT_PER_SECOND` - allowed requests per second (default 100)
    /// * `RATE_LIMIT_BURST_SIZE` - burst allowance (default 200)
    pub fn load() -> Self {
        let per_second = env::var("RATE_LIMIT_PER_SECOND")
            .unwrap_or_else(|_| "100".to_string())
            .parse::<u64>()
            .unwrap_or_else(|e| {
                log::error!("invalid RATE_LIMIT_PER_SECOND: {}. Using default 100", e);
                100
            });

        let burst_size = env::var("RATE_LIMIT_BURST_SIZE")
            .unwrap_or_else(|_| "200".to_string())
            .parse::<u32>()
            .unwrap_or_else(|e| {
                log::error!("invalid RATE_LIMIT_BURST_SIZE: {}. Using default 200", e);
                200
            });

        let config = RateLimitConfig {
            per_second,
            burst_size,
        };

        log::info!("rate limiting configured: {:?}", config);
        config
    }
}

/// Avatar upload storage settings.
///
/// Shared with handlers as actix `web::Data` so tests can point uploads
/// at a temporary directory.
#[derive(Debug, Clone)]
pub struct UploadConfig {
    dir: PathBuf,
}

impl UploadConfig {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Loads the upload directory from `UPLOAD_DIR` (default `images`).
    pub fn load() -> Self {
        let dir = env::var("UPLOAD_DIR").unwrap_or_else(|_| "images".to_string());
        Self::new(dir)
    }

    pub fn dir(&self) -> &PathBuf {
        &self.dir
    }
}

/// Identity settings for the interim static identity provider.
pub struct IdentityConfig;

impl IdentityConfig {
    /// Returns the placeholder user id assumed for uploads until a real
    /// auth context is wired in (`STATIC_USER_ID`, default `7`).
    pub fn static_user_id() -> String {
        env::var("STATIC_USER_ID").unwrap_or_else(|_| "7".to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bcrypt_cost_is_low_outside_production() {
        assert_eq!(PasswordConfig::bcrypt_cost_for_env(&Environment::Test), 4);
        assert_eq!(
            PasswordConfig::bcrypt_cost_for_env(&Environment::Development),
            4
        );
    }

    #[test]
    fn bcrypt_cost_is_high_in_production() {
        assert_eq!(
            PasswordConfig::bcrypt_cost_for_env(&Environment::Production),
            12
        );
    }

    #[test]
    fn upload_config_keeps_directory() {
        let config = UploadConfig::new("avatars");
        assert_eq!(config.dir(), &PathBuf::from("avatars"));
    }
}
