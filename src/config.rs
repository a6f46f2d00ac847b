//! Runtime configuration read from the environment (and `.env`, via `dotenv`).

use std::env;
use thiserror::Error;

/// Prefix used for text commands when `COMMAND_PREFIX` is not set.
pub const DEFAULT_COMMAND_PREFIX: &str = "!";

/// Errors raised while loading configuration
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Missing required environment variable {0}")]
    Missing(&'static str),

    #[error("Invalid value for {name}: {reason}")]
    Invalid { name: &'static str, reason: String },
}

/// Settings the bot needs at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BotConfig {
    pub discord_token: String,
    pub command_prefix: String,
}

impl BotConfig {
    /// Read configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from any key lookup. `from_env` is this with `std::env::var`.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let discord_token = lookup("DISCORD_TOKEN")
            .filter(|token| !token.trim().is_empty())
            .ok_or(ConfigError::Missing("DISCORD_TOKEN"))?;

        let command_prefix = match lookup("COMMAND_PREFIX") {
            None => DEFAULT_COMMAND_PREFIX.to_string(),
            Some(prefix) if prefix.trim().is_empty() => {
                return Err(ConfigError::Invalid {
                    name: "COMMAND_PREFIX",
                    reason: "prefix must not be blank".to_string(),
                });
            }
            Some(prefix) => prefix.trim().to_string(),
        };

        Ok(Self {
            discord_token,
            command_prefix,
        })
    }
}
