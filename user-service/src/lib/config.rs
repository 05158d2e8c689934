use std::env;
use std::time::Duration;

use auth::SigningContext;
use config::Config as ConfigBuilder;
use config::ConfigError;
use config::Environment;
use config::File;
use serde::Deserialize;

use crate::domain::user::models::TokenSettings;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub database: DatabaseConfig,
    pub server: ServerConfig,
    pub jwt: JwtConfig,
    pub user_counter: UserCounterConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub http_port: u16,
    /// Comma separated list of allowed origins, or `*` for any.
    pub cors_origins: String,
}

#[derive(Deserialize, Clone)]
pub struct JwtConfig {
    pub secret: String,
    pub expiration_seconds: i64,
    pub issuer: String,
    pub audience: String,
}

impl std::fmt::Debug for JwtConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtConfig")
            .field("secret", &"<redacted>")
            .field("expiration_seconds", &self.expiration_seconds)
            .field("issuer", &self.issuer)
            .field("audience", &self.audience)
            .finish()
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct UserCounterConfig {
    pub interval_seconds: u64,
}

impl Config {
    /// Load configuration from files with environment variable overrides
    ///
    /// Priority (highest to lowest):
    /// 1. Environment variables (DATABASE__URL, JWT__SECRET, etc.)
    /// 2. Environment-specific config file (config/{environment}.toml)
    /// 3. Default config file (config/default.toml)
    pub fn load() -> Result<Self, ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let configuration = ConfigBuilder::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", run_mode)).required(false))
            // Example: JWT__SECRET=... overrides jwt.secret
            .add_source(Environment::default().separator("__"))
            .build()?;

        configuration.try_deserialize()
    }
}

impl JwtConfig {
    pub fn signing_context(&self) -> SigningContext {
        SigningContext::new(
            self.secret.as_bytes(),
            chrono::Duration::seconds(self.expiration_seconds),
        )
    }

    pub fn token_settings(&self) -> TokenSettings {
        TokenSettings {
            issuer: self.issuer.clone(),
            audience: self.audience.clone(),
        }
    }
}

impl UserCounterConfig {
    pub fn interval(&self) -> Duration {
        Duration::from_secs(self.interval_seconds.max(1))
    }
}

impl ServerConfig {
    /// Allowed origins, `None` meaning any origin.
    pub fn allowed_origins(&self) -> Option<Vec<String>> {
        let origins = self.cors_origins.trim();
        if origins.is_empty() || origins == "*" {
            return None;
        }

        Some(
            origins
                .split(',')
                .map(str::trim)
                .filter(|origin| !origin.is_empty())
                .map(str::to_string)
                .collect(),
        )
    }
}

#[cfg(test)]
mod tests {
    use config::FileFormat;

    use super::*;

    fn parse(toml: &str) -> Config {
        ConfigBuilder::builder()
            .add_source(File::from_str(toml, FileFormat::Toml))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap()
    }

    #[test]
    fn test_default_config_parses() {
        let config = parse(include_str!("../../config/default.toml"));

        assert_eq!(config.server.http_port, 3000);
        assert_eq!(config.jwt.expiration_seconds, 86400);
        assert_eq!(config.user_counter.interval(), Duration::from_secs(10));
        assert_eq!(config.server.allowed_origins(), None);
    }

    #[test]
    fn test_allowed_origins_list() {
        let server = ServerConfig {
            http_port: 3000,
            cors_origins: "http://a.test, http://b.test,".to_string(),
        };

        assert_eq!(
            server.allowed_origins(),
            Some(vec!["http://a.test".to_string(), "http://b.test".to_string()])
        );
    }

    #[test]
    fn test_jwt_config_builds_signing_context() {
        let jwt = JwtConfig {
            secret: "secret".to_string(),
            expiration_seconds: 60,
            issuer: "issuer".to_string(),
            audience: "audience".to_string(),
        };

        let context = jwt.signing_context();
        assert_eq!(context.secret(), b"secret");
        assert_eq!(context.lifetime(), chrono::Duration::seconds(60));
        assert!(!format!("{:?}", jwt).contains("\"secret\""));
        assert_eq!(jwt.token_settings().issuer, "issuer");
    }
}
