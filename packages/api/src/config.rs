//! Process configuration, read once from the environment at startup.

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use shared::services::auth_service::DEFAULT_TOKEN_TTL_HOURS;
use shared::services::user_service::{BCRYPT_COST_RANGE, DEFAULT_BCRYPT_COST};

pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:5000";

#[derive(Debug, Clone, PartialEq)]
pub enum StorageConfig {
    DynamoDb {
        users_table: String,
        scores_table: String,
        progress_table: String,
    },
    Memory,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub jwt_secret: String,
    pub token_ttl_hours: i64,
    pub bcrypt_cost: u32,
    pub storage: StorageConfig,
    pub bind_addr: String,
    /// Replaces the bundled game catalog when set.
    pub game_catalog_path: Option<PathBuf>,
    /// `AWS_LAMBDA_RUNTIME_API` is present.
    pub on_lambda: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    Missing(&'static str),
    Invalid { name: &'static str, value: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ConfigError::Missing(name) => write!(f, "{} environment variable must be set", name),
            ConfigError::Invalid { name, value } => {
                write!(f, "{} has an invalid value: {:?}", name, value)
            }
        }
    }
}

impl std::error::Error for ConfigError {}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Builds the config from any variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |name: &'static str| {
            lookup(name)
                .filter(|value| !value.trim().is_empty())
                .ok_or(ConfigError::Missing(name))
        };

        let storage = match lookup("STORAGE_BACKEND").as_deref().map(str::trim) {
            None | Some("") | Some("dynamodb") => StorageConfig::DynamoDb {
                users_table: required("USERS_TABLE")?,
                scores_table: required("SCORES_TABLE")?,
                progress_table: required("PROGRESS_TABLE")?,
            },
            Some("memory") => StorageConfig::Memory,
            Some(other) => {
                return Err(ConfigError::Invalid {
                    name: "STORAGE_BACKEND",
                    value: other.to_string(),
                })
            }
        };

        let bcrypt_cost = parse_or(&lookup, "BCRYPT_COST", DEFAULT_BCRYPT_COST)?;
        if !BCRYPT_COST_RANGE.contains(&bcrypt_cost) {
            return Err(ConfigError::Invalid {
                name: "BCRYPT_COST",
                value: bcrypt_cost.to_string(),
            });
        }

        Ok(Config {
            jwt_secret: required("JWT_SECRET")?,
            token_ttl_hours: parse_or(&lookup, "TOKEN_TTL_HOURS", DEFAULT_TOKEN_TTL_HOURS)?,
            bcrypt_cost,
            storage,
            bind_addr: lookup("BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string()),
            game_catalog_path: lookup("GAME_CATALOG_PATH").map(PathBuf::from),
            on_lambda: lookup("AWS_LAMBDA_RUNTIME_API").is_some(),
        })
    }

    /// A local configuration with in-memory storage.
    pub fn in_memory(jwt_secret: impl Into<String>) -> Self {
        Config {
            jwt_secret: jwt_secret.into(),
            token_ttl_hours: DEFAULT_TOKEN_TTL_HOURS,
            bcrypt_cost: DEFAULT_BCRYPT_COST,
            storage: StorageConfig::Memory,
            bind_addr: DEFAULT_BIND_ADDR.to_string(),
            game_catalog_path: None,
            on_lambda: false,
        }
    }
}

fn parse_or<F, T>(lookup: &F, name: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match lookup(name) {
        None => Ok(default),
        Some(value) => value.trim().parse().map_err(|_| ConfigError::Invalid { name, value }),
    }
}
