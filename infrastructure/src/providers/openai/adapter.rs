//! CompletionGateway implementation for OpenAI-compatible providers

use super::types::{ChatCompletionRequest, ChatCompletionResponse, ChatMessage};
use async_trait::async_trait;
use clarity_application::{CompletionGateway, GatewayError};
use clarity_domain::{Message, Model};
use tracing::debug;

/// Gateway speaking the OpenAI chat-completions wire format
///
/// Works against api.openai.com and any compatible endpoint (a proxy, a
/// local server) via `base_url`.
pub struct OpenAiCompletionGateway {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
    temperature: Option<f32>,
}

impl OpenAiCompletionGateway {
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into(),
            api_key: api_key.into(),
            temperature: None,
        }
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }

    fn endpoint(&self) -> String {
        format!("{}/chat/completions", self.base_url.trim_end_matches('/'))
    }
}

#[async_trait]
impl CompletionGateway for OpenAiCompletionGateway {
    async fn complete(&self, model: &Model, messages: &[Message]) -> Result<String, GatewayError> {
        let body = ChatCompletionRequest {
            model: model.to_string(),
            messages: messages.iter().map(ChatMessage::from).collect(),
            temperature: self.temperature,
        };

        debug!(model = %model, messages = messages.len(), "Chat completion request");

        let response = self
            .http
            .post(self.endpoint())
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    GatewayError::Timeout
                } else if e.is_connect() {
                    GatewayError::ConnectionError(e.to_string())
                } else {
                    GatewayError::RequestFailed(e.to_string())
                }
            })?;

        let status = response.status();
        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(GatewayError::RateLimited);
        }
        if status == reqwest::StatusCode::BAD_REQUEST
            || status == reqwest::StatusCode::UNPROCESSABLE_ENTITY
        {
            let text = response.text().await.unwrap_or_default();
            let text: String = text.chars().take(200).collect();
            return Err(GatewayError::InvalidRequest(text));
        }
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            let text: String = text.chars().take(200).collect();
            return Err(GatewayError::RequestFailed(format!("HTTP {status}: {text}")));
        }

        let parsed: ChatCompletionResponse = response
            .json()
            .await
            .map_err(|e| GatewayError::RequestFailed(format!("malformed response: {e}")))?;

        let reply = parsed
            .choices
            .into_iter()
            .next()
            .map(|c| c.message.content)
            .unwrap_or_default();

        if reply.is_empty() {
            return Err(GatewayError::RequestFailed(
                "provider returned no completion".to_string(),
            ));
        }

        Ok(reply)
    }
}
