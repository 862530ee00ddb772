//! Completion Provider Adapters.
//!
//! Implementations of the CompletionProvider port.
//!
//! ## Available Adapters
//!
//! - `GeminiProvider` - Google Gemini models (default)
//! - `OpenAIProvider` - OpenAI chat completions and compatible servers
//! - `MockCompletionProvider` - Configurable mock for testing

mod endpoint;
mod gemini_provider;
mod http;
mod mock_provider;
mod openai_provider;

pub use endpoint::{
    EndpointConfig, GEMINI_BASE_URL, GEMINI_DEFAULT_MODEL, OPENAI_BASE_URL, OPENAI_DEFAULT_MODEL,
};
pub use gemini_provider::GeminiProvider;
pub use mock_provider::{MockCompletionProvider, MockResponse, DEFAULT_MOCK_REPLY};
pub use openai_provider::OpenAIProvider;

use std::sync::Arc;

use crate::config::{AiConfig, AiProvider};
use crate::ports::{CompletionError, CompletionProvider};

/// Builds the provider selected by configuration.
///
/// Real providers require an API key; callers are expected to have run
/// [`AiConfig::validate`] first, and a missing key here is reported as
/// an authentication failure.
pub fn provider_from_config(
    config: &AiConfig,
) -> Result<Arc<dyn CompletionProvider>, CompletionError> {
    let api_key = || {
        config
            .api_key
            .clone()
            .filter(|k| !k.trim().is_empty())
            .ok_or(CompletionError::AuthenticationFailed)
    };

    let configure = |mut endpoint: EndpointConfig| {
        endpoint = endpoint.with_timeout(config.timeout());
        if let Some(model) = &config.model_id {
            endpoint = endpoint.with_model(model.clone());
        }
        if let Some(url) = &config.base_url {
            endpoint = endpoint.with_base_url(url.clone());
        }
        endpoint
    };

    let provider: Arc<dyn CompletionProvider> = match config.provider {
        AiProvider::Gemini => Arc::new(GeminiProvider::new(configure(EndpointConfig::gemini(
            api_key()?,
        )))?),
        AiProvider::OpenAI => Arc::new(OpenAIProvider::new(configure(EndpointConfig::openai(
            api_key()?,
        )))?),
        AiProvider::Mock => Arc::new(MockCompletionProvider::new()),
    };

    let info = provider.provider_info();
    tracing::info!(provider = %info.name, model = %info.model, "Completion provider ready");
    Ok(provider)
}
