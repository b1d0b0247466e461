use std::env;
use thiserror::Error;
use tower_cookies::Key;

const DEFAULT_HOST: &str = "127.0.0.1";
const DEFAULT_PORT: u16 = 8000;

/// Smallest secret accepted for signing cookies.
const MIN_SECRET_LEN: usize = 64;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{0} is not set in the environment or .env file")]
    Missing(&'static str),

    #[error("PORT must be a port number, got {0:?}")]
    InvalidPort(String),

    #[error("SESSION_SECRET must be at least {MIN_SECRET_LEN} bytes, got {0}")]
    ShortSecret(usize),
}

#[derive(Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub database_url: String,
    pub session_secret: String,
    pub host: String,
    pub port: u16,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("database_url", &self.database_url)
            .field("session_secret", &"<redacted>")
            .field("host", &self.host)
            .field("port", &self.port)
            .finish()
    }
}

impl AppConfig {
    /// Reads the configuration from the process environment, after loading `.env` if present.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let database_url = lookup("DATABASE_URL").ok_or(ConfigError::Missing("DATABASE_URL"))?;
        let session_secret =
            lookup("SESSION_SECRET").ok_or(ConfigError::Missing("SESSION_SECRET"))?;
        if session_secret.len() < MIN_SECRET_LEN {
            return Err(ConfigError::ShortSecret(session_secret.len()));
        }
        let host = lookup("HOST").unwrap_or_else(|| DEFAULT_HOST.to_owned());
        let port = match lookup("PORT") {
            Some(port) => port.parse().map_err(|_| ConfigError::InvalidPort(port))?,
            None => DEFAULT_PORT,
        };

        Ok(Self {
            database_url,
            session_secret,
            host,
            port,
        })
    }

    pub fn server_url(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Key signing the flash cookie.
    pub fn flash_key(&self) -> Result<Key, ConfigError> {
        Key::try_from(self.session_secret.as_bytes())
            .map_err(|_| ConfigError::ShortSecret(self.session_secret.len()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    const SECRET: &str = "0123456789abcdef0123456789abcdef0123456789abcdef0123456789abcdef";

    fn load(vars: &[(&str, &str)]) -> Result<AppConfig, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AppConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_host_and_port() {
        let config = load(&[
            ("DATABASE_URL", "postgres:///blogly"),
            ("SESSION_SECRET", SECRET),
        ])
        .unwrap();

        assert_eq!(config.server_url(), "127.0.0.1:8000");
        assert!(config.flash_key().is_ok());
    }

    #[test]
    fn reads_host_and_port() {
        let config = load(&[
            ("DATABASE_URL", "sqlite::memory:"),
            ("SESSION_SECRET", SECRET),
            ("HOST", "0.0.0.0"),
            ("PORT", "5000"),
        ])
        .unwrap();

        assert_eq!(config.server_url(), "0.0.0.0:5000");
    }

    #[test]
    fn rejects_bad_values() {
        assert_eq!(
            load(&[("SESSION_SECRET", SECRET)]),
            Err(ConfigError::Missing("DATABASE_URL"))
        );
        assert_eq!(
            load(&[("DATABASE_URL", "x")]),
            Err(ConfigError::Missing("SESSION_SECRET"))
        );
        assert_eq!(
            load(&[("DATABASE_URL", "x"), ("SESSION_SECRET", "secret-key")]),
            Err(ConfigError::ShortSecret(10))
        );
        assert_eq!(
            load(&[
                ("DATABASE_URL", "x"),
                ("SESSION_SECRET", SECRET),
                ("PORT", "http")
            ]),
            Err(ConfigError::InvalidPort("http".to_owned()))
        );
    }

    #[test]
    fn debug_hides_the_secret() {
        let config = load(&[("DATABASE_URL", "x"), ("SESSION_SECRET", SECRET)]).unwrap();

        assert!(!format!("{config:?}").contains(SECRET));
    }
}
