// Runtime configuration from the environment.
//
// A `.env` file in the working directory is loaded first; real environment
// variables win over it.

use std::net::{IpAddr, SocketAddr};

use thiserror::Error;

use crate::modules::study_sessions::use_cases::leaderboard::projection::DEFAULT_LEADERBOARD_LIMIT;

pub const IN_MEMORY_DB: &str = ":memory:";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{name} has an invalid value {value:?}")]
    Invalid { name: &'static str, value: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub host: IpAddr,
    pub port: u16,
    /// Path of the SQLite file, or `:memory:` for the in-memory store.
    pub db_path: String,
    pub leaderboard_limit: usize,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        Ok(Self {
            host: parse(&lookup, "HOST", IpAddr::from([0, 0, 0, 0]))?,
            port: parse(&lookup, "PORT", 3000)?,
            db_path: lookup("DB_PATH")
                .filter(|path| !path.trim().is_empty())
                .unwrap_or_else(|| "classclash.db".to_string()),
            leaderboard_limit: parse(&lookup, "LEADERBOARD_LIMIT", DEFAULT_LEADERBOARD_LIMIT)?,
        })
    }

    pub fn addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    pub fn uses_in_memory_store(&self) -> bool {
        self.db_path == IN_MEMORY_DB
    }
}

fn parse<T: std::str::FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    name: &'static str,
    default: T,
) -> Result<T, ConfigError> {
    match lookup(name) {
        None => Ok(default),
        Some(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::Invalid { name, value }),
    }
}
