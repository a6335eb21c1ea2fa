//! Runtime configuration for the generator.
//!
//! Values come from the process environment, after `.env.local` and `.env`
//! have been loaded. Everything except the credential has a default.

use std::path::PathBuf;

use llmapi::{LLMClient, ResponseModality};
use tracing::{debug, warn};

use crate::constants::{
    API_KEY_ENV, DEFAULT_GEMINI_ENDPOINT, DEFAULT_IMAGE_MODEL, ENDPOINT_ENV, ENV_FILES,
    MODEL_ENV, OUTPUT_DIR_ENV, OUTPUT_DIR_NAME, PUBLIC_PATH_PREFIX,
};

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error(
        "{0} environment variable not set or is empty. Ensure it is set in your .env.local \
         or export it in your terminal for direct script execution."
    )]
    MissingCredential(&'static str),
}

#[derive(Clone)]
pub struct GeneratorConfig {
    pub api_key: String,
    pub model: String,
    pub endpoint: String,
    pub output_dir: PathBuf,
    pub public_prefix: String,
}

impl GeneratorConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from an arbitrary key lookup. Fails when the
    /// credential is missing or blank.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_key = non_empty(&lookup, API_KEY_ENV)
            .ok_or(ConfigError::MissingCredential(API_KEY_ENV))?;

        Ok(Self {
            api_key,
            model: non_empty(&lookup, MODEL_ENV).unwrap_or_else(|| DEFAULT_IMAGE_MODEL.to_string()),
            endpoint: non_empty(&lookup, ENDPOINT_ENV)
                .unwrap_or_else(|| DEFAULT_GEMINI_ENDPOINT.to_string()),
            output_dir: output_dir_from_lookup(&lookup),
            public_prefix: PUBLIC_PATH_PREFIX.to_string(),
        })
    }

    pub fn client(&self) -> LLMClient {
        LLMClient::new(self.api_key.clone(), self.endpoint.clone(), self.model.clone())
            .with_response_modalities(&[ResponseModality::Text, ResponseModality::Image])
    }
}

impl std::fmt::Debug for GeneratorConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeneratorConfig")
            .field("model", &self.model)
            .field("endpoint", &self.endpoint)
            .field("output_dir", &self.output_dir)
            .field("public_prefix", &self.public_prefix)
            .finish_non_exhaustive()
    }
}

pub fn output_dir_from_lookup<F>(lookup: &F) -> PathBuf
where
    F: Fn(&str) -> Option<String>,
{
    non_empty(lookup, OUTPUT_DIR_ENV)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(OUTPUT_DIR_NAME))
}

/// Loads `.env.local` then `.env`; variables already set are left alone.
pub fn load_env_files() {
    for file_name in ENV_FILES {
        match dotenvy::from_filename(file_name) {
            Ok(path) => debug!(path = %path.display(), "loaded environment file"),
            Err(err) if err.not_found() => {}
            Err(err) => warn!("Failed to load {}: {}", file_name, err),
        }
    }
}

fn non_empty<F>(lookup: &F, key: &str) -> Option<String>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(key)
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}
