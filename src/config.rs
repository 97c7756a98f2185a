// src/config.rs
use crate::model::ModelConfig;
use crate::pipeline::SummaryOptions;
use std::env;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub host: String,
    pub port: u16,
    pub max_chunk_chars: usize,
    pub summary_min_length: usize,
    pub summary_max_length: usize,
    pub model: String,
    pub endpoint_url: String,
    pub hf_api_key: Option<String>,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid value for {key}: {value}")]
    InvalidValue { key: String, value: String },
    #[error("SUMMARY_CHUNK_CHARS must be positive")]
    ZeroChunkBudget,
    #[error("SUMMARY_MIN_LENGTH ({min}) must not exceed SUMMARY_MAX_LENGTH ({max})")]
    LengthBoundsReversed { min: usize, max: usize },
}

fn env_or<T: FromStr>(key: &str, default: T) -> Result<T, ConfigError> {
    match env::var(key) {
        Ok(raw) => raw.trim().parse().map_err(|_| ConfigError::InvalidValue {
            key: key.to_string(),
            value: raw,
        }),
        Err(_) => Ok(default),
    }
}

impl ApiConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        let config = Self {
            host: env::var("BACKEND_HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
            port: env_or("BACKEND_PORT", 3010)?,
            max_chunk_chars: env_or("SUMMARY_CHUNK_CHARS", 1000)?,
            summary_min_length: env_or("SUMMARY_MIN_LENGTH", 40)?,
            summary_max_length: env_or("SUMMARY_MAX_LENGTH", 150)?,
            model: env::var("SUMMARY_MODEL")
                .unwrap_or_else(|_| "sshleifer/distilbart-cnn-12-6".to_string()),
            endpoint_url: env::var("SUMMARY_ENDPOINT")
                .unwrap_or_else(|_| "http://localhost:8080".to_string()),
            hf_api_key: env::var("HF_API_KEY").ok().filter(|k| !k.is_empty()),
        };

        if config.max_chunk_chars == 0 {
            return Err(ConfigError::ZeroChunkBudget);
        }
        if config.summary_min_length > config.summary_max_length {
            return Err(ConfigError::LengthBoundsReversed {
                min: config.summary_min_length,
                max: config.summary_max_length,
            });
        }
        Ok(config)
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Picks the hosted inference API when a key is configured, otherwise the
    /// self-hosted endpoint.
    pub fn model_config(&self) -> ModelConfig {
        match &self.hf_api_key {
            Some(key) => ModelConfig::HfInferenceApi {
                api_key: key.clone(),
                model: self.model.clone(),
            },
            None => ModelConfig::HfEndpoint {
                endpoint_url: self.endpoint_url.clone(),
                model: self.model.clone(),
            },
        }
    }

    pub fn summary_options(&self) -> SummaryOptions {
        SummaryOptions {
            max_chunk_chars: self.max_chunk_chars,
            min_length: self.summary_min_length,
            max_length: self.summary_max_length,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_and_bind_addr() {
        // Single test to avoid races on process-wide env vars.
        env::remove_var("BACKEND_HOST");
        env::remove_var("BACKEND_PORT");
        env::remove_var("SUMMARY_CHUNK_CHARS");
        env::remove_var("SUMMARY_MIN_LENGTH");
        env::remove_var("SUMMARY_MAX_LENGTH");
        env::remove_var("SUMMARY_MODEL");
        env::remove_var("HF_API_KEY");
        let config = ApiConfig::from_env().expect("defaults should load");
        assert_eq!(config.bind_addr(), "127.0.0.1:3010");
        assert_eq!(config.max_chunk_chars, 1000);
        assert_eq!(config.summary_min_length, 40);
        assert_eq!(config.summary_max_length, 150);
        match config.model_config() {
            ModelConfig::HfEndpoint { model, .. } => {
                assert_eq!(model, "sshleifer/distilbart-cnn-12-6")
            }
            _ => panic!("expected endpoint config without HF_API_KEY"),
        }

        env::set_var("SUMMARY_CHUNK_CHARS", "not-a-number");
        assert!(ApiConfig::from_env().is_err());
        env::remove_var("SUMMARY_CHUNK_CHARS");
    }
}
