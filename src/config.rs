//! Configuration management for the distance agent.
//!
//! Configuration can be set via environment variables (a `.env` file in the
//! working directory is loaded first, if present):
//! - `OPENAI_API_KEY` - Required. API key for the chat-completions backend.
//! - `OPENAI_BASE_URL` - Optional. Defaults to `https://api.openai.com/v1`.
//! - `DEFAULT_MODEL` - Optional. The LLM model to use. Defaults to `gpt-4o-mini`.
//! - `GOOGLE_MAPS_API_KEY` - Optional at startup. Lookups fail until it is set.
//! - `GOOGLE_MAPS_BASE_URL` - Optional. Defaults to `https://maps.googleapis.com/maps/api`.
//! - `HOST` - Optional. Server host. Defaults to `0.0.0.0`.
//! - `PORT` - Optional. Server port. Defaults to `8000`.
//! - `MAX_TURNS` - Optional. Maximum agent loop turns. Defaults to `10`.

use thiserror::Error;

pub const DEFAULT_LLM_BASE_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_MAPS_BASE_URL: &str = "https://maps.googleapis.com/maps/api";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("Invalid value for {0}: {1}")]
    InvalidValue(String, String),
}

/// Mapping-service configuration.
#[derive(Debug, Clone)]
pub struct MapsConfig {
    /// Google Maps API key. `None` is accepted; the client reports it on first use.
    pub api_key: Option<String>,

    /// Base URL of the Maps web services
    pub base_url: String,
}

impl Default for MapsConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: DEFAULT_MAPS_BASE_URL.to_string(),
        }
    }
}

/// Service configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Chat-completions API key
    pub api_key: String,

    /// Chat-completions base URL (OpenAI-compatible)
    pub llm_base_url: String,

    /// LLM model identifier
    pub default_model: String,

    /// Server host
    pub host: String,

    /// Server port
    pub port: u16,

    /// Maximum turns for the agent loop
    pub max_turns: usize,

    /// Mapping-service configuration
    pub maps: MapsConfig,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::MissingEnvVar` if `OPENAI_API_KEY` is not set.
    pub fn from_env() -> Result<Self, ConfigError> {
        // A missing .env file is not an error.
        let _ = dotenvy::dotenv();

        let api_key = std::env::var("OPENAI_API_KEY")
            .map_err(|_| ConfigError::MissingEnvVar("OPENAI_API_KEY".to_string()))?;

        let llm_base_url = std::env::var("OPENAI_BASE_URL")
            .unwrap_or_else(|_| DEFAULT_LLM_BASE_URL.to_string());

        let default_model =
            std::env::var("DEFAULT_MODEL").unwrap_or_else(|_| "gpt-4o-mini".to_string());

        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());

        let port = std::env::var("PORT")
            .unwrap_or_else(|_| "8000".to_string())
            .parse()
            .map_err(|e| ConfigError::InvalidValue("PORT".to_string(), format!("{}", e)))?;

        let max_turns = parse_max_turns(
            &std::env::var("MAX_TURNS").unwrap_or_else(|_| "10".to_string()),
        )?;

        let maps = MapsConfig {
            api_key: std::env::var("GOOGLE_MAPS_API_KEY")
                .ok()
                .filter(|k| !k.trim().is_empty()),
            base_url: std::env::var("GOOGLE_MAPS_BASE_URL")
                .unwrap_or_else(|_| DEFAULT_MAPS_BASE_URL.to_string()),
        };

        Ok(Self {
            api_key,
            llm_base_url,
            default_model,
            host,
            port,
            max_turns,
            maps,
        })
    }

    /// Create a config with custom values (useful for testing).
    pub fn new(api_key: String, default_model: String, maps: MapsConfig) -> Self {
        Self {
            api_key,
            llm_base_url: DEFAULT_LLM_BASE_URL.to_string(),
            default_model,
            host: "127.0.0.1".to_string(),
            port: 8000,
            max_turns: 10,
            maps,
        }
    }

    /// Address the HTTP server binds to.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn parse_max_turns(value: &str) -> Result<usize, ConfigError> {
    let turns: usize = value
        .trim()
        .parse()
        .map_err(|e| ConfigError::InvalidValue("MAX_TURNS".to_string(), format!("{}", e)))?;
    if turns == 0 {
        return Err(ConfigError::InvalidValue(
            "MAX_TURNS".to_string(),
            "must be at least 1".to_string(),
        ));
    }
    Ok(turns)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn max_turns_rejects_zero_and_garbage() {
        assert_eq!(parse_max_turns(" 4 ").expect("parse"), 4);
        assert!(matches!(
            parse_max_turns("0"),
            Err(ConfigError::InvalidValue(name, _)) if name == "MAX_TURNS"
        ));
        assert!(parse_max_turns("many").is_err());
    }

    #[test]
    fn new_config_uses_service_defaults() {
        let config = Config::new(
            "sk-test".to_string(),
            "gpt-4o-mini".to_string(),
            MapsConfig::default(),
        );
        assert_eq!(config.llm_base_url, DEFAULT_LLM_BASE_URL);
        assert_eq!(config.maps.base_url, DEFAULT_MAPS_BASE_URL);
        assert!(config.maps.api_key.is_none());
        assert_eq!(config.bind_addr(), "127.0.0.1:8000");
    }
}
