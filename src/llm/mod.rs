//! LLM collaborator: single-turn chat completion against an
//! OpenAI-compatible hosted endpoint.

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde::Serialize;
use tracing::debug;

use crate::config::LlmConfig;
use crate::errors::Result;
use crate::errors::TwinRagError;

/// Sampling parameters for one completion request
#[derive(Debug, Clone, Copy)]
pub struct SamplingParams {
    pub temperature: f32,
    pub top_p: f32,
    pub max_tokens: u32,
}

/// Abstract LLM collaborator: one system instruction, one user message, one
/// completion. No conversation memory is kept across calls.
#[async_trait]
pub trait ChatCompletion: Send + Sync {
    async fn complete(
        &self,
        system_instruction: &str,
        user_message: &str,
        params: &SamplingParams,
    ) -> Result<String>;
}

#[derive(Debug, Clone, Serialize)]
pub struct ChatMessage {
    pub role: &'static str,
    pub content: String,
}

pub struct LlmService {
    client: Client,
    endpoint: String,
    api_key: String,
    model: String,
}

impl LlmService {
    /// Create a new LLM client from config.
    ///
    /// # Errors
    /// - HTTP client build errors (invalid configuration)
    pub fn new(config: &LlmConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(120))
            .build()
            .map_err(|e| TwinRagError::Http(e.to_string()))?;

        Ok(Self {
            client,
            endpoint: config.llm_endpoint.trim_end_matches('/').to_string(),
            api_key: config.llm_key.clone(),
            model: config.llm_model.clone(),
        })
    }

    /// The configured model name
    pub fn model(&self) -> &str {
        &self.model
    }
}

#[async_trait]
impl ChatCompletion for LlmService {
    async fn complete(
        &self,
        system_instruction: &str,
        user_message: &str,
        params: &SamplingParams,
    ) -> Result<String> {
        #[derive(Serialize)]
        struct CompletionRequest<'a> {
            model: &'a str,
            messages: Vec<ChatMessage>,
            temperature: f32,
            top_p: f32,
            max_tokens: u32,
        }

        #[derive(Deserialize)]
        struct CompletionResponse {
            choices: Vec<Choice>,
        }

        #[derive(Deserialize)]
        struct Choice {
            message: ResponseMessage,
        }

        #[derive(Deserialize)]
        struct ResponseMessage {
            content: String,
        }

        let url = format!("{}/chat/completions", self.endpoint);
        debug!("Calling chat completions API: model={}", self.model);

        let request = CompletionRequest {
            model: &self.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: system_instruction.to_string(),
                },
                ChatMessage {
                    role: "user",
                    content: user_message.to_string(),
                },
            ],
            temperature: params.temperature,
            top_p: params.top_p,
            max_tokens: params.max_tokens,
        };

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| TwinRagError::Http(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(TwinRagError::Llm(format!(
                "completion failed ({status}): {error_text}"
            )));
        }

        let result: CompletionResponse = response
            .json()
            .await
            .map_err(|e| TwinRagError::Llm(format!("failed to parse response: {e}")))?;

        result
            .choices
            .into_iter()
            .next()
            .map(|c| c.message.content.trim().to_string())
            .ok_or_else(|| TwinRagError::Llm("no completion choices in response".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chat_message_serializes_role_and_content() {
        let message = ChatMessage {
            role: "system",
            content: "You are a twin".to_string(),
        };
        let value = serde_json::to_value(&message).unwrap();
        assert_eq!(value["role"], "system");
        assert_eq!(value["content"], "You are a twin");
    }

    #[tokio::test]
    #[ignore = "Requires LLM API key"]
    async fn test_live_completion() {
        let service = LlmService::new(&LlmConfig {
            llm_endpoint: "https://api.groq.com/openai/v1".to_string(),
            llm_key: std::env::var("LLM_API_KEY").unwrap(),
            llm_model: "llama-3.1-8b-instant".to_string(),
        })
        .unwrap();
        let params = SamplingParams {
            temperature: 0.7,
            top_p: 0.9,
            max_tokens: 50,
        };
        let text = service.complete("Reply with one word.", "Hi", &params).await.unwrap();
        assert!(!text.is_empty());
    }
}
