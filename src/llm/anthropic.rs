//! Anthropic messages backend.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::analyzer::Analysis;
use crate::config::AiConfig;
use crate::error::EnhanceError;
use crate::llm::{Enhancer, prompt};

const DEFAULT_BASE_URL: &str = "https://api.anthropic.com";
const API_VERSION: &str = "2023-06-01";

pub struct AnthropicEnhancer {
    client: reqwest::Client,
    api_key: Option<String>,
    base_url: String,
    model: String,
    temperature: f32,
    max_tokens: u32,
}

impl AnthropicEnhancer {
    /// Read credentials from `ANTHROPIC_API_KEY`.
    pub fn from_env(config: &AiConfig) -> Self {
        Self::new(
            config,
            std::env::var("ANTHROPIC_API_KEY").ok(),
            DEFAULT_BASE_URL.to_string(),
        )
    }

    pub fn new(config: &AiConfig, api_key: Option<String>, base_url: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key,
            base_url,
            model: config.model.clone(),
            temperature: config.temperature,
            max_tokens: config.max_tokens,
        }
    }
}

#[derive(Serialize)]
struct MessagesRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    temperature: f32,
    messages: Vec<UserMessage<'a>>,
}

#[derive(Serialize)]
struct UserMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Deserialize)]
struct MessagesResponse {
    content: Vec<ContentBlock>,
}

#[derive(Deserialize)]
struct ContentBlock {
    text: String,
}

#[async_trait]
impl Enhancer for AnthropicEnhancer {
    fn name(&self) -> &'static str {
        "anthropic"
    }

    async fn is_available(&self) -> bool {
        self.api_key.is_some()
    }

    async fn enhance(
        &self,
        analysis: &Analysis,
        rule_message: &str,
    ) -> Result<String, EnhanceError> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or(EnhanceError::NotConfigured("anthropic"))?;

        let user_prompt = prompt::build_prompt(analysis, rule_message);
        let request = MessagesRequest {
            model: &self.model,
            max_tokens: self.max_tokens,
            temperature: self.temperature,
            messages: vec![UserMessage {
                role: "user",
                content: &user_prompt,
            }],
        };

        let response = self
            .client
            .post(format!("{}/v1/messages", self.base_url))
            .header("x-api-key", api_key)
            .header("anthropic-version", API_VERSION)
            .json(&request)
            .send()
            .await
            .map_err(EnhanceError::RequestFailed)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(EnhanceError::BadStatus {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: MessagesResponse = response
            .json()
            .await
            .map_err(EnhanceError::RequestFailed)?;
        parsed
            .content
            .into_iter()
            .next()
            .map(|block| block.text)
            .ok_or_else(|| {
                EnhanceError::MalformedResponse("message had no content blocks".to_string())
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_enhance_parses_content_block() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/messages"))
            .and(header("x-api-key", "sk-ant-test"))
            .and(header("anthropic-version", API_VERSION))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "content": [{"type": "text", "text": "fix(auth): handle login timeout"}]
            })))
            .mount(&server)
            .await;

        let enhancer = AnthropicEnhancer::new(
            &AiConfig::default(),
            Some("sk-ant-test".to_string()),
            server.uri(),
        );
        let result = enhancer
            .enhance(&Analysis::default(), "fix: update code")
            .await
            .unwrap();
        assert_eq!(result, "fix(auth): handle login timeout");
    }

    #[tokio::test]
    async fn test_enhance_requires_api_key() {
        let enhancer = AnthropicEnhancer::new(
            &AiConfig::default(),
            None,
            "http://localhost:1".to_string(),
        );
        let err = enhancer
            .enhance(&Analysis::default(), "feat: update code")
            .await
            .unwrap_err();
        assert!(matches!(err, EnhanceError::NotConfigured("anthropic")));
    }
}
