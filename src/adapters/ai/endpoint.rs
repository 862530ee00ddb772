//! Connection settings for a remote completion backend.

use secrecy::{ExposeSecret, Secret};
use std::time::Duration;

pub const GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const GEMINI_DEFAULT_MODEL: &str = "gemini-flash-latest";

pub const OPENAI_BASE_URL: &str = "https://api.openai.com/v1";
pub const OPENAI_DEFAULT_MODEL: &str = "gpt-4o-mini";

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(120);

/// API key, model and address of one backend.
///
/// The key is held as a [`Secret`] so it never shows up in `Debug` output
/// or logs.
///
/// ```ignore
/// let endpoint = EndpointConfig::gemini(api_key)
///     .with_model("gemini-2.5-flash")
///     .with_timeout(Duration::from_secs(60));
/// let provider = GeminiProvider::new(endpoint)?;
/// ```
#[derive(Debug, Clone)]
pub struct EndpointConfig {
    api_key: Secret<String>,
    pub model: String,
    /// Without a trailing slash.
    pub base_url: String,
    pub timeout: Duration,
}

impl EndpointConfig {
    pub fn new(
        api_key: impl Into<String>,
        model: impl Into<String>,
        base_url: impl Into<String>,
    ) -> Self {
        Self {
            api_key: Secret::new(api_key.into()),
            model: model.into(),
            base_url: String::new(),
            timeout: DEFAULT_TIMEOUT,
        }
        .with_base_url(base_url)
    }

    /// Google Generative Language API defaults.
    pub fn gemini(api_key: impl Into<String>) -> Self {
        Self::new(api_key, GEMINI_DEFAULT_MODEL, GEMINI_BASE_URL)
    }

    /// OpenAI chat completions defaults.
    pub fn openai(api_key: impl Into<String>) -> Self {
        Self::new(api_key, OPENAI_DEFAULT_MODEL, OPENAI_BASE_URL)
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub(crate) fn api_key(&self) -> &str {
        self.api_key.expose_secret()
    }
}
