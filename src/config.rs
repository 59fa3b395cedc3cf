//! Process configuration read from the environment

use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

use crate::customer_db::{self, CustomerDbConfig};
use crate::llm::openai::{OpenAiModel, DEFAULT_BASE_URL};
use crate::llm::GenerationConfig;
use crate::prompt::DEFAULT_PERSONA;
use crate::screenshots::DEFAULT_SCREENSHOT_DIR;

/// Default listen address, all interfaces on port 80
pub fn default_bind_addr() -> SocketAddr {
    SocketAddr::from(([0, 0, 0, 0], 80))
}

/// Default upload size limit (10 MiB)
pub const DEFAULT_SCREENSHOT_MAX_BYTES: u64 = 10 * 1024 * 1024;

/// Errors raised while reading configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required setting {0}")]
    Missing(&'static str),

    #[error("invalid value for {key}: {value:?} ({reason})")]
    Invalid {
        key: &'static str,
        value: String,
        reason: String,
    },

    #[error("invalid database settings: {0}")]
    Database(#[from] customer_db::Error),
}

/// Everything the service needs at startup
#[derive(Clone)]
pub struct AppConfig {
    /// Address the HTTP server listens on
    pub bind_addr: SocketAddr,
    /// Customer database connection
    pub database: CustomerDbConfig,
    /// OpenAI API key
    pub openai_api_key: String,
    /// Chat model
    pub openai_model: OpenAiModel,
    /// OpenAI-compatible API root
    pub openai_base_url: String,
    /// Whole-request timeout for completions; `None` keeps the client default
    pub openai_timeout: Option<Duration>,
    /// Sampling settings sent with every completion
    pub generation: GenerationConfig,
    /// First sentence of every system prompt
    pub persona: String,
    /// Where screenshots are stored
    pub screenshot_dir: PathBuf,
    /// Largest accepted upload
    pub screenshot_max_bytes: u64,
}

impl AppConfig {
    /// Read configuration from process environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read configuration through an arbitrary key lookup
    ///
    /// Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let bind_addr = parse_value("BIND_ADDR", get("BIND_ADDR"))?
            .unwrap_or_else(default_bind_addr);

        let database = match get("DATABASE_URL") {
            Some(url) => CustomerDbConfig::from_connection_string(&url)?,
            None => {
                let defaults = CustomerDbConfig::default();
                CustomerDbConfig {
                    host: get("DB_HOST").unwrap_or(defaults.host),
                    port: parse_value("DB_PORT", get("DB_PORT"))?.unwrap_or(defaults.port),
                    database: get("DB_NAME").unwrap_or(defaults.database),
                    user: get("DB_USER").unwrap_or(defaults.user),
                    password: lookup("DB_PASSWORD").unwrap_or(defaults.password),
                    connect_timeout_ms: defaults.connect_timeout_ms,
                }
            }
        };

        let database = match parse_value::<u64>("DB_CONNECT_TIMEOUT_MS", get("DB_CONNECT_TIMEOUT_MS"))? {
            Some(ms) => CustomerDbConfig {
                connect_timeout_ms: ms,
                ..database
            },
            None => database,
        };

        let openai_api_key = get("OPENAI_API_KEY").ok_or(ConfigError::Missing("OPENAI_API_KEY"))?;

        let openai_model = get("OPENAI_MODEL")
            .map(|name| name.parse().unwrap_or_default())
            .unwrap_or_default();

        let openai_timeout = parse_value::<u64>("OPENAI_TIMEOUT_SECS", get("OPENAI_TIMEOUT_SECS"))?
            .map(Duration::from_secs);

        let generation = GenerationConfig {
            max_tokens: parse_value("OPENAI_MAX_TOKENS", get("OPENAI_MAX_TOKENS"))?,
            temperature: parse_value("OPENAI_TEMPERATURE", get("OPENAI_TEMPERATURE"))?,
        };

        let screenshot_max_bytes =
            parse_value("SCREENSHOT_MAX_BYTES", get("SCREENSHOT_MAX_BYTES"))?
                .unwrap_or(DEFAULT_SCREENSHOT_MAX_BYTES);

        Ok(Self {
            bind_addr,
            database,
            openai_api_key,
            openai_model,
            openai_base_url: get("OPENAI_BASE_URL").unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            openai_timeout,
            generation,
            persona: get("BOT_PERSONA").unwrap_or_else(|| DEFAULT_PERSONA.to_string()),
            screenshot_dir: get("SCREENSHOT_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_SCREENSHOT_DIR)),
            screenshot_max_bytes,
        })
    }
}

fn parse_value<T>(key: &'static str, value: Option<String>) -> Result<Option<T>, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    value
        .map(|raw| {
            raw.trim().parse::<T>().map_err(|e| ConfigError::Invalid {
                key,
                value: raw.clone(),
                reason: e.to_string(),
            })
        })
        .transpose()
}
