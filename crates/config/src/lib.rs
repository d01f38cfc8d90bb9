use std::env;
use thiserror::Error;

/// Local development database, used when `POSTGRES_DSN` is unset or empty.
pub const DEFAULT_POSTGRES_DSN: &str =
    "host=localhost port=5432 user=postgres password=postgres dbname=postgres sslmode=disable";

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Invalid {name}: {value:?}")]
    InvalidValue { name: &'static str, value: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub postgres_dsn: String,
    pub api_host: String,
    pub api_port: u16,
    pub database_pool_size: u32,
}

impl Config {
    /// Load `.env` if present, then resolve from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenv::dotenv().ok();

        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Resolve configuration from any variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &str, default: &str| {
            lookup(name)
                .filter(|value| !value.trim().is_empty())
                .unwrap_or_else(|| default.to_string())
        };

        Ok(Config {
            postgres_dsn: var("POSTGRES_DSN", DEFAULT_POSTGRES_DSN),

            api_host: var("API_HOST", "0.0.0.0"),

            api_port: parse("API_PORT", var("API_PORT", "8080"))?,

            database_pool_size: parse("DATABASE_POOL_SIZE", var("DATABASE_POOL_SIZE", "10"))
                .and_then(|size: u32| {
                    if size == 0 {
                        Err(ConfigError::InvalidValue {
                            name: "DATABASE_POOL_SIZE",
                            value: size.to_string(),
                        })
                    } else {
                        Ok(size)
                    }
                })?,
        })
    }

    pub fn api_address(&self) -> String {
        format!("{}:{}", self.api_host, self.api_port)
    }
}

fn parse<T: std::str::FromStr>(name: &'static str, value: String) -> Result<T, ConfigError> {
    value
        .trim()
        .parse()
        .map_err(|_| ConfigError::InvalidValue { name, value })
}
