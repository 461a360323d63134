//! Optional AI enhancement of rule-generated commit messages.
//!
//! Enhancement is strictly best-effort: a missing key, an unreachable
//! backend, a bad response, or a timeout all degrade to `None` and the
//! caller keeps the rule-generated message. Nothing in this module may
//! surface an error to the user.

pub mod anthropic;
pub mod ollama;
pub mod openai;
pub mod prompt;

use async_trait::async_trait;
use tokio::time::{Duration, timeout};

use crate::analyzer::Analysis;
use crate::config::{AiConfig, AiProvider};
use crate::error::EnhanceError;

pub use prompt::build_prompt;

/// One enhancement backend.
#[async_trait]
pub trait Enhancer: Send + Sync {
    fn name(&self) -> &'static str;

    /// Cheap availability check: API key present for the hosted backends,
    /// a short `/api/tags` probe for Ollama. A `true` here does not
    /// guarantee the enhancement request itself will succeed.
    async fn is_available(&self) -> bool;

    async fn enhance(
        &self,
        analysis: &Analysis,
        rule_message: &str,
    ) -> Result<String, EnhanceError>;
}

/// Construct the configured backend, or `None` when enhancement is off.
pub fn build_enhancer(config: &AiConfig) -> Option<Box<dyn Enhancer>> {
    match config.provider {
        AiProvider::None => None,
        AiProvider::OpenAi => Some(Box::new(openai::OpenAiEnhancer::from_env(config))),
        AiProvider::Anthropic => Some(Box::new(anthropic::AnthropicEnhancer::from_env(config))),
        AiProvider::Ollama => Some(Box::new(ollama::OllamaEnhancer::from_env(config))),
    }
}

/// Run the configured backend against the rule-generated message.
///
/// Returns `Some(cleaned)` only when the backend produced a non-empty
/// response that differs from the rule message within the configured
/// time budget.
pub async fn enhance_message(
    config: &AiConfig,
    analysis: &Analysis,
    rule_message: &str,
) -> Option<String> {
    let enhancer = build_enhancer(config)?;
    if !enhancer.is_available().await {
        tracing::debug!(
            provider = enhancer.name(),
            "enhancer unavailable, keeping rule-based message"
        );
        return None;
    }

    let budget = Duration::from_secs(config.timeout_secs);
    match timeout(budget, enhancer.enhance(analysis, rule_message)).await {
        Ok(Ok(raw)) => {
            let cleaned = clean_response(&raw);
            if cleaned.is_empty() || cleaned == rule_message {
                None
            } else {
                Some(cleaned)
            }
        }
        Ok(Err(err)) => {
            tracing::warn!(provider = enhancer.name(), error = %err, "enhancement failed");
            None
        }
        Err(_) => {
            let err = EnhanceError::Timeout(config.timeout_secs);
            tracing::warn!(provider = enhancer.name(), error = %err, "enhancement failed");
            None
        }
    }
}

/// Normalize a model response down to a single commit-message line:
/// strip surrounding quotes and code fences, keep the first line only.
pub fn clean_response(response: &str) -> String {
    let trimmed = response.trim().trim_matches(['"', '\'']);
    let without_fences = trimmed.replace("```", "");
    without_fences
        .trim()
        .lines()
        .next()
        .unwrap_or("")
        .trim()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_response_strips_quotes_and_fences() {
        assert_eq!(clean_response("\"feat: add login\""), "feat: add login");
        assert_eq!(
            clean_response("```\nfix: handle timeout\n```"),
            "fix: handle timeout"
        );
    }

    #[test]
    fn test_clean_response_keeps_first_line() {
        assert_eq!(
            clean_response("feat: add login\n\nThis adds a login page."),
            "feat: add login"
        );
    }

    #[test]
    fn test_clean_response_empty_input() {
        assert_eq!(clean_response("   \n"), "");
    }

    #[tokio::test]
    async fn test_enhance_message_none_when_provider_off() {
        let config = AiConfig::default();
        let result = enhance_message(&config, &Analysis::default(), "feat: update code").await;
        assert_eq!(result, None);
    }
}
