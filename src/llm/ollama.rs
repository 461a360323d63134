//! Ollama local-model backend.

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::analyzer::Analysis;
use crate::config::AiConfig;
use crate::error::EnhanceError;
use crate::llm::{Enhancer, prompt};

const DEFAULT_BASE_URL: &str = "http://localhost:11434";

const PROBE_TIMEOUT: Duration = Duration::from_secs(5);

pub struct OllamaEnhancer {
    client: reqwest::Client,
    base_url: String,
    model: String,
    temperature: f32,
    max_tokens: u32,
}

impl OllamaEnhancer {
    /// Endpoint override from `OLLAMA_BASE_URL`; no credentials needed.
    pub fn from_env(config: &AiConfig) -> Self {
        let base_url =
            std::env::var("OLLAMA_BASE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
        Self::new(config, base_url)
    }

    pub fn new(config: &AiConfig, base_url: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url,
            model: config.model.clone(),
            temperature: config.temperature,
            max_tokens: config.max_tokens,
        }
    }
}

#[derive(Serialize)]
struct GenerateRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    stream: bool,
    options: GenerateOptions,
}

#[derive(Serialize)]
struct GenerateOptions {
    temperature: f32,
    num_predict: u32,
}

#[derive(Deserialize)]
struct GenerateResponse {
    response: String,
}

#[async_trait]
impl Enhancer for OllamaEnhancer {
    fn name(&self) -> &'static str {
        "ollama"
    }

    /// Probe the daemon's model-list endpoint with a short timeout so a
    /// stopped daemon is detected without burning the full request budget.
    async fn is_available(&self) -> bool {
        self.client
            .get(format!("{}/api/tags", self.base_url))
            .timeout(PROBE_TIMEOUT)
            .send()
            .await
            .is_ok_and(|response| response.status().is_success())
    }

    async fn enhance(
        &self,
        analysis: &Analysis,
        rule_message: &str,
    ) -> Result<String, EnhanceError> {
        let user_prompt = prompt::build_prompt(analysis, rule_message);
        let request = GenerateRequest {
            model: &self.model,
            prompt: &user_prompt,
            stream: false,
            options: GenerateOptions {
                temperature: self.temperature,
                num_predict: self.max_tokens,
            },
        };

        let response = self
            .client
            .post(format!("{}/api/generate", self.base_url))
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

        let parsed: GenerateResponse = response
            .json()
            .await
            .map_err(EnhanceError::RequestFailed)?;
        Ok(parsed.response)
    }
}
