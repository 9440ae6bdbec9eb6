//! Environment-driven application configuration.
//!
//! The generation credential is deliberately optional: its absence disables
//! recipe mixing and is reported per request, never at startup.

use std::env;
use std::net::SocketAddr;
use std::time::Duration;

use rand::RngCore;
use tracing::warn;
use url::Url;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
const DEFAULT_CHAT_URL: &str = "https://api.openai.com/v1/chat/completions";
const DEFAULT_MIX_MODEL: &str = "gpt-3.5-turbo";
const DEFAULT_MIX_TEMPERATURE: f32 = 0.7;
const DEFAULT_MIX_MAX_TOKENS: u32 = 200;
const DEFAULT_MIX_TIMEOUT_SECONDS: u64 = 30;
const DEFAULT_TOKEN_TTL_SECONDS: u64 = 86_400;

/// Errors raised while reading configuration from the environment.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// A required variable is absent.
    #[error("missing required environment variable {name}")]
    MissingVar { name: &'static str },

    /// A variable is present but cannot be parsed.
    #[error("invalid value for {name}: {message}")]
    InvalidVar { name: &'static str, message: String },
}

impl ConfigError {
    fn missing(name: &'static str) -> Self {
        Self::MissingVar { name }
    }

    fn invalid(name: &'static str, message: impl Into<String>) -> Self {
        Self::InvalidVar {
            name,
            message: message.into(),
        }
    }
}

/// Settings for the external chat-completion service.
#[derive(Debug, Clone)]
pub struct GenerationConfig {
    pub api_key: String,
    pub endpoint: Url,
    pub model: String,
    pub temperature: f32,
    pub max_tokens: u32,
    pub timeout: Duration,
}

/// Top-level application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub bind_addr: SocketAddr,
    pub database_url: String,
    pub token_secret: Vec<u8>,
    pub token_ttl: Duration,
    /// `None` when no generation credential was supplied.
    pub generation: Option<GenerationConfig>,
}

fn parse_var<T, E>(
    name: &'static str,
    default: T,
    parse: impl FnOnce(&str) -> Result<T, E>,
) -> Result<T, ConfigError>
where
    E: std::fmt::Display,
{
    match env::var(name) {
        Ok(raw) => parse(&raw).map_err(|err| ConfigError::invalid(name, err.to_string())),
        Err(_) => Ok(default),
    }
}

fn token_secret() -> Result<Vec<u8>, ConfigError> {
    match env::var("AUTH_TOKEN_SECRET") {
        Ok(secret) if !secret.is_empty() => Ok(secret.into_bytes()),
        _ if cfg!(debug_assertions) => {
            warn!("using ephemeral token secret (dev only); logins will not survive restarts");
            let mut secret = vec![0_u8; 32];
            rand::thread_rng().fill_bytes(&mut secret);
            Ok(secret)
        }
        _ => Err(ConfigError::missing("AUTH_TOKEN_SECRET")),
    }
}

fn generation_config() -> Result<Option<GenerationConfig>, ConfigError> {
    let Ok(api_key) = env::var("OPENAI_API_KEY") else {
        warn!("OPENAI_API_KEY is not set; recipe mixing is disabled");
        return Ok(None);
    };
    if api_key.is_empty() {
        warn!("OPENAI_API_KEY is empty; recipe mixing is disabled");
        return Ok(None);
    }

    let endpoint = parse_var("OPENAI_CHAT_URL", default_chat_url(), Url::parse)?;
    let model = env::var("MIX_MODEL").unwrap_or_else(|_| DEFAULT_MIX_MODEL.to_owned());
    let temperature = parse_var("MIX_TEMPERATURE", DEFAULT_MIX_TEMPERATURE, str::parse)?;
    let max_tokens = parse_var("MIX_MAX_TOKENS", DEFAULT_MIX_MAX_TOKENS, str::parse)?;
    let timeout_seconds =
        parse_var("MIX_TIMEOUT_SECONDS", DEFAULT_MIX_TIMEOUT_SECONDS, str::parse)?;

    Ok(Some(GenerationConfig {
        api_key,
        endpoint,
        model,
        temperature,
        max_tokens,
        timeout: Duration::from_secs(timeout_seconds),
    }))
}

fn default_chat_url() -> Url {
    Url::parse(DEFAULT_CHAT_URL).unwrap_or_else(|error| {
        panic!("default chat endpoint must parse: {error}");
    })
}

impl AppConfig {
    /// Read configuration from the environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        let bind_addr = parse_var(
            "BIND_ADDR",
            DEFAULT_BIND_ADDR
                .parse()
                .unwrap_or_else(|error| panic!("default bind address must parse: {error}")),
            str::parse,
        )?;
        let database_url =
            env::var("DATABASE_URL").map_err(|_| ConfigError::missing("DATABASE_URL"))?;
        let token_secret = token_secret()?;
        let token_ttl_seconds = parse_var(
            "AUTH_TOKEN_TTL_SECONDS",
            DEFAULT_TOKEN_TTL_SECONDS,
            str::parse,
        )?;

        Ok(Self {
            bind_addr,
            database_url,
            token_secret,
            token_ttl: Duration::from_secs(token_ttl_seconds),
            generation: generation_config()?,
        })
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for parsing helpers that do not touch process
    //! environment state.
    use super::*;

    #[test]
    fn defaults_apply_when_variables_are_absent() {
        let value = parse_var("__POTLUCK_UNSET_VAR__", 42_u32, str::parse)
            .expect("default should be used");
        assert_eq!(value, 42);
    }

    #[test]
    fn default_endpoint_parses() {
        assert_eq!(default_chat_url().as_str(), DEFAULT_CHAT_URL);
    }
}
