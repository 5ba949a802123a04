use std::{env, fmt::Display, str::FromStr};

use axum::http::HeaderValue;
use tracing::info;

use crate::error::ConfigError;

pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 7002;

#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    /// Single origin allowed by CORS. `None` allows any origin.
    pub allowed_origin: Option<HeaderValue>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            allowed_origin: None,
        }
    }
}

impl Config {
    /// Read `TODO_HOST`, `PORT` and `TODO_ALLOWED_ORIGIN` from the environment.
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let host = try_load(&lookup, "TODO_HOST", DEFAULT_HOST.to_string())?;
        let port = try_load(&lookup, "PORT", DEFAULT_PORT)?;
        let allowed_origin = match lookup("TODO_ALLOWED_ORIGIN") {
            Some(origin) => Some(HeaderValue::from_str(&origin).map_err(|e| {
                ConfigError::Invalid {
                    key: "TODO_ALLOWED_ORIGIN",
                    message: e.to_string(),
                }
            })?),
            None => {
                info!("TODO_ALLOWED_ORIGIN not set, allowing any origin");
                None
            }
        };

        Ok(Self {
            host,
            port,
            allowed_origin,
        })
    }

    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn try_load<T>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &'static str,
    default: T,
) -> Result<T, ConfigError>
where
    T: FromStr + Display,
    T::Err: Display,
{
    match lookup(key) {
        Some(raw) => raw.parse().map_err(|e: T::Err| ConfigError::Invalid {
            key,
            message: e.to_string(),
        }),
        None => {
            info!("{key} not set, using default: {default}");
            Ok(default)
        }
    }
}
