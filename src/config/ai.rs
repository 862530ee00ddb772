//! Completion backend configuration

use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;

/// Which backend answers prompts, and how to reach it.
///
/// `model_id` and `base_url` fall back to the provider's own defaults
/// (`gemini-flash-latest` for Gemini, `gpt-4o-mini` for OpenAI).
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AiConfig {
    pub provider: AiProvider,
    pub api_key: Option<String>,
    pub model_id: Option<String>,
    pub base_url: Option<String>,
    pub timeout_secs: u64,
    pub temperature: Option<f32>,
    pub max_output_tokens: Option<u32>,
}

#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum AiProvider {
    #[default]
    Gemini,
    OpenAI,
    /// Canned replies, no network. For tests and offline runs.
    Mock,
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            provider: AiProvider::Gemini,
            api_key: None,
            model_id: None,
            base_url: None,
            timeout_secs: 120,
            temperature: None,
            max_output_tokens: None,
        }
    }
}

impl AiConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn has_api_key(&self) -> bool {
        self.api_key.as_ref().is_some_and(|k| !k.trim().is_empty())
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.provider != AiProvider::Mock && !self.has_api_key() {
            return Err(ValidationError::MissingRequired("AI__API_KEY"));
        }
        if self.model_id.as_ref().is_some_and(|m| m.trim().is_empty()) {
            return Err(ValidationError::EmptyModelId);
        }
        match self.temperature {
            Some(t) if !(0.0..=2.0).contains(&t) => Err(ValidationError::InvalidTemperature(t)),
            _ if self.timeout_secs == 0 => Err(ValidationError::InvalidTimeout),
            _ => Ok(()),
        }
    }
}
