use std::env;
use std::str::FromStr;
use std::time::Duration;
use thiserror::Error;

use crate::blockchain::{DEFAULT_DIFFICULTY, ProofOfWork};
use crate::node::NodeIdentity;

const DEFAULT_HOST: &str = "127.0.0.1";
const DEFAULT_PORT: u16 = 5000;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {key}: {value:?}")]
    InvalidValue { key: &'static str, value: String },
    #[error("DIFFICULTY must be between 1 and 64, got {0}")]
    DifficultyOutOfRange(usize),
    #[error("NODE_ID must not be blank")]
    BlankNodeId,
}

/// Runtime settings, read from the environment (and `.env` via dotenvy).
#[derive(Debug, Clone)]
pub struct Settings {
    pub host: String,
    pub port: u16,
    pub pow: ProofOfWork,
    pub node_id: NodeIdentity,
    /// Upper bound on a single proof search; `None` searches until found.
    pub mine_timeout: Option<Duration>,
}

impl Settings {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let host = lookup("HOST").unwrap_or_else(|| DEFAULT_HOST.to_string());
        let port = parse_var(&lookup, "PORT")?.unwrap_or(DEFAULT_PORT);

        let difficulty = parse_var(&lookup, "DIFFICULTY")?.unwrap_or(DEFAULT_DIFFICULTY);
        let pow = ProofOfWork::with_difficulty(difficulty)
            .ok_or(ConfigError::DifficultyOutOfRange(difficulty))?;

        let node_id = match lookup("NODE_ID") {
            Some(id) => NodeIdentity::new(id).ok_or(ConfigError::BlankNodeId)?,
            None => NodeIdentity::generate(),
        };

        let timeout_secs: Option<u64> = parse_var(&lookup, "MINE_TIMEOUT_SECS")?;
        let mine_timeout = timeout_secs.map(Duration::from_secs);

        Ok(Self {
            host,
            port,
            pow,
            node_id,
            mine_timeout,
        })
    }
}

fn parse_var<T: FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &'static str,
) -> Result<Option<T>, ConfigError> {
    match lookup(key) {
        None => Ok(None),
        Some(raw) => raw
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| ConfigError::InvalidValue { key, value: raw }),
    }
}
