//! LLM provider implementations for Scout.
//!
//! All providers implement the `scout_core::Provider` trait. Scout talks
//! to a single OpenAI-compatible endpoint selected by configuration.

pub mod openai_compat;

pub use openai_compat::OpenAiCompatProvider;

use scout_config::AppConfig;
use scout_core::Provider;
use scout_core::error::ProviderError;
use std::sync::Arc;

/// Build the configured provider.
///
/// Fails with [`ProviderError::NotConfigured`] when no API key is set in
/// the config file or environment.
pub fn build_from_config(config: &AppConfig) -> Result<Arc<dyn Provider>, ProviderError> {
    let api_key = config.api_key.clone().ok_or_else(|| {
        ProviderError::NotConfigured(
            "No API key found. Set SCOUT_API_KEY, OPENROUTER_API_KEY, or OPENAI_API_KEY".into(),
        )
    })?;

    let name = if config.provider.api_url.contains("openrouter") {
        "openrouter"
    } else {
        "openai-compat"
    };

    Ok(Arc::new(OpenAiCompatProvider::new(
        name,
        &config.provider.api_url,
        api_key,
    )))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn build_fails_without_api_key() {
        let config = AppConfig::default();
        let result = build_from_config(&config);
        assert!(matches!(result, Err(ProviderError::NotConfigured(_))));
    }

    #[test]
    fn build_names_provider_from_url() {
        let mut config = AppConfig {
            api_key: Some("sk-test".into()),
            ..AppConfig::default()
        };
        let provider = build_from_config(&config).unwrap();
        assert_eq!(provider.name(), "openrouter");

        config.provider.api_url = "https://api.openai.com/v1".into();
        let provider = build_from_config(&config).unwrap();
        assert_eq!(provider.name(), "openai-compat");
    }
}
