use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::constants::{endpoints, models, paths};
use crate::error::PatchpalError;
use crate::llm::{LlmClient, OpenAIClient};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub llm: LlmSettings,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LlmSettings {
    pub base_url: String,
    pub api_key_env: String,
    /// Model that carries the conversation.
    pub main_model: String,
    /// Cheaper model: fallback editor, and the main model under `-3`.
    pub weak_model: String,
}

impl Default for LlmSettings {
    fn default() -> Self {
        Self {
            base_url: endpoints::OPENAI_BASE_URL.to_string(),
            api_key_env: endpoints::DEFAULT_API_KEY_ENV.to_string(),
            main_model: models::DEFAULT_MAIN_MODEL.to_string(),
            weak_model: models::DEFAULT_WEAK_MODEL.to_string(),
        }
    }
}

impl Settings {
    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(paths::CONFIG_DIR)
            .join(paths::CONFIG_FILE)
    }

    /// Load from the user config file, or defaults if it is missing or broken.
    pub fn load() -> Self {
        Self::load_from(&Self::config_path())
    }

    pub fn load_from(path: &std::path::Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(content) => toml::from_str(&content).unwrap_or_else(|e| {
                tracing::warn!("Ignoring invalid config {}: {e}", path.display());
                Self::default()
            }),
            Err(_) => Self::default(),
        }
    }

    /// Get the API key from the environment variable specified in settings.
    pub fn api_key(&self) -> Option<String> {
        std::env::var(&self.llm.api_key_env)
            .ok()
            .filter(|key| !key.is_empty())
    }

    /// Model for the conversation; `weak` selects the cheaper tier.
    pub fn primary_model(&self, weak: bool) -> &str {
        if weak {
            &self.llm.weak_model
        } else {
            &self.llm.main_model
        }
    }

    /// Build an LLM client for `model` from the current settings.
    pub fn build_llm_client(&self, model: &str) -> Result<Box<dyn LlmClient>, PatchpalError> {
        let api_key = self.api_key().ok_or_else(|| {
            PatchpalError::Config(format!(
                "API key not set: export {}",
                self.llm.api_key_env
            ))
        })?;

        Ok(Box::new(
            OpenAIClient::new(api_key)
                .with_model(model)
                .with_base_url(&self.llm.base_url),
        ))
    }
}
