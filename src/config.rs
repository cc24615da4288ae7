use std::{env, fmt::Display};

use actix_web::cookie::Key;
use dotenv::dotenv;

const DEFAULT_REDIS_URL: &str = "redis://127.0.0.1:6379";
const DEFAULT_BIND_ADDRESS: &str = "127.0.0.1";
const DEFAULT_PORT: u16 = 8080;
const MIN_SESSION_KEY_LENGTH: usize = 64;

#[derive(Debug, PartialEq, Eq)]
pub enum ConfigError {
    Missing(&'static str),
    Invalid(&'static str, String),
    SessionKeyTooShort,
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Missing(name) => write!(f, "Enviroment variable '{}' not set", name),
            ConfigError::Invalid(name, value) => {
                write!(f, "Enviroment variable '{}' has an invalid value: {}", name, value)
            }
            ConfigError::SessionKeyTooShort => write!(
                f,
                "Enviroment variable 'SESSION_KEY' must be at least {} bytes long",
                MIN_SESSION_KEY_LENGTH
            ),
        }
    }
}

impl std::error::Error for ConfigError {}

/// Server settings, read from the environment (and `.env`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub database_url: String,
    pub redis_url: String,
    pub bind_address: String,
    pub port: u16,
    /// Raw bytes of the cookie signing key, a random one is used when unset.
    pub session_key: Option<Vec<u8>>,
    pub cookie_secure: bool,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenv().ok();
        Self::from_lookup(|name| env::var(name).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let database_url = lookup("DATABASE_URL").ok_or(ConfigError::Missing("DATABASE_URL"))?;

        let port = match lookup("PORT") {
            Some(port) => port
                .parse::<u16>()
                .map_err(|_| ConfigError::Invalid("PORT", port))?,
            None => DEFAULT_PORT,
        };

        let cookie_secure = match lookup("COOKIE_SECURE") {
            Some(value) => match value.to_lowercase().as_str() {
                "1" | "true" | "yes" => true,
                "0" | "false" | "no" => false,
                _ => return Err(ConfigError::Invalid("COOKIE_SECURE", value)),
            },
            None => false,
        };

        let session_key = match lookup("SESSION_KEY") {
            Some(key) if key.len() < MIN_SESSION_KEY_LENGTH => {
                return Err(ConfigError::SessionKeyTooShort)
            }
            Some(key) => Some(key.into_bytes()),
            None => None,
        };

        Ok(Self {
            database_url,
            redis_url: lookup("REDIS_URL").unwrap_or_else(|| DEFAULT_REDIS_URL.to_string()),
            bind_address: lookup("BIND_ADDRESS")
                .unwrap_or_else(|| DEFAULT_BIND_ADDRESS.to_string()),
            port,
            session_key,
            cookie_secure,
        })
    }

    pub fn session_key(&self) -> Key {
        match &self.session_key {
            Some(bytes) => Key::from(bytes),
            None => {
                log::warn!("SESSION_KEY not set, sessions will not survive a restart");
                Key::generate()
            }
        }
    }
}
