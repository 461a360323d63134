//! OpenAI chat-completions backend.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::analyzer::Analysis;
use crate::config::AiConfig;
use crate::error::EnhanceError;
use crate::llm::{Enhancer, prompt};

const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
const SYSTEM_PROMPT: &str = "You are an expert at writing clear, concise commit messages \
that follow conventional commit standards.";

pub struct OpenAiEnhancer {
    client: reqwest::Client,
    api_key: Option<String>,
    base_url: String,
    model: String,
    temperature: f32,
    max_tokens: u32,
}

impl OpenAiEnhancer {
    /// Read credentials from `OPENAI_API_KEY`, endpoint override from
    /// `OPENAI_BASE_URL`.
    pub fn from_env(config: &AiConfig) -> Self {
        let base_url =
            std::env::var("OPENAI_BASE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
        Self::new(config, std::env::var("OPENAI_API_KEY").ok(), base_url)
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
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    max_tokens: u32,
    temperature: f32,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Deserialize)]
struct ChatChoiceMessage {
    content: String,
}

#[async_trait]
impl Enhancer for OpenAiEnhancer {
    fn name(&self) -> &'static str {
        "openai"
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
            .ok_or(EnhanceError::NotConfigured("openai"))?;

        let user_prompt = prompt::build_prompt(analysis, rule_message);
        let request = ChatRequest {
            model: &self.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: SYSTEM_PROMPT,
                },
                ChatMessage {
                    role: "user",
                    content: &user_prompt,
                },
            ],
            max_tokens: self.max_tokens,
            temperature: self.temperature,
        };

        let response = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .bearer_auth(api_key)
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

        let parsed: ChatResponse = response
            .json()
            .await
            .map_err(EnhanceError::RequestFailed)?;
        parsed
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content)
            .ok_or_else(|| EnhanceError::MalformedResponse("completion had no choices".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn enhancer(base_url: String, api_key: Option<&str>) -> OpenAiEnhancer {
        OpenAiEnhancer::new(
            &AiConfig::default(),
            api_key.map(|k| k.to_string()),
            base_url,
        )
    }

    #[tokio::test]
    async fn test_availability_tracks_api_key() {
        assert!(!enhancer("http://localhost".to_string(), None).is_available().await);
        assert!(
            enhancer("http://localhost".to_string(), Some("sk-x"))
                .is_available()
                .await
        );
    }

    #[tokio::test]
    async fn test_enhance_parses_completion() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .and(header("authorization", "Bearer sk-test"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "choices": [{"message": {"role": "assistant", "content": "feat(auth): add login flow"}}]
            })))
            .mount(&server)
            .await;

        let enhancer = enhancer(server.uri(), Some("sk-test"));
        let result = enhancer
            .enhance(&Analysis::default(), "feat: update code")
            .await
            .unwrap();
        assert_eq!(result, "feat(auth): add login flow");
    }

    #[tokio::test]
    async fn test_enhance_reports_bad_status() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(ResponseTemplate::new(429).set_body_string("rate limited"))
            .mount(&server)
            .await;

        let enhancer = enhancer(server.uri(), Some("sk-test"));
        let err = enhancer
            .enhance(&Analysis::default(), "feat: update code")
            .await
            .unwrap_err();
        assert!(matches!(err, EnhanceError::BadStatus { status: 429, .. }));
    }

    #[tokio::test]
    async fn test_enhance_rejects_empty_choices() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"choices": []})))
            .mount(&server)
            .await;

        let enhancer = enhancer(server.uri(), Some("sk-test"));
        let err = enhancer
            .enhance(&Analysis::default(), "feat: update code")
            .await
            .unwrap_err();
        assert!(matches!(err, EnhanceError::MalformedResponse(_)));
    }
}
