use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use serde::{Deserialize, Serialize};

use crate::client::{CompletionClient, CompletionRequest};
use crate::result::AiError;

/// OpenAI-compatible chat completions endpoint settings.
#[derive(Debug, Clone)]
pub struct HttpCompletionConfig {
    pub endpoint: String,
    pub api_key: Option<String>,
    pub model: String,
    pub timeout_secs: u64,
}

impl Default for HttpCompletionConfig {
    fn default() -> Self {
        Self {
            endpoint: "https://openrouter.ai/api/v1/chat/completions".to_string(),
            api_key: None,
            model: "openai/gpt-3.5-turbo".to_string(),
            timeout_secs: 30,
        }
    }
}

/// Completion client over an OpenAI-compatible HTTP API.
pub struct HttpCompletionClient {
    client: reqwest::Client,
    config: HttpCompletionConfig,
}

impl HttpCompletionClient {
    pub fn new(config: HttpCompletionConfig) -> Result<Self, AiError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| AiError::Http(e.to_string()))?;
        Ok(Self { client, config })
    }

    fn headers(&self) -> Result<HeaderMap, AiError> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        if let Some(key) = &self.config.api_key {
            let value = format!("Bearer {key}");
            headers.insert(
                AUTHORIZATION,
                HeaderValue::from_str(&value).map_err(|e| AiError::InvalidInput(e.to_string()))?,
            );
        }
        Ok(headers)
    }
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatMessageResponse,
}

#[derive(Debug, Deserialize)]
struct ChatMessageResponse {
    content: String,
}

/// Extract the first choice's content from a chat completions body.
fn parse_answer(body: &str) -> Result<String, AiError> {
    let parsed: ChatResponse =
        serde_json::from_str(body).map_err(|e| AiError::Response(e.to_string()))?;
    parsed
        .choices
        .into_iter()
        .next()
        .map(|c| c.message.content)
        .ok_or_else(|| AiError::Response("missing choices".to_string()))
}

#[async_trait]
impl CompletionClient for HttpCompletionClient {
    async fn complete(&self, request: CompletionRequest) -> Result<String, AiError> {
        let body = ChatRequest {
            model: &self.config.model,
            messages: vec![ChatMessage {
                role: "user",
                content: &request.prompt,
            }],
        };

        tracing::debug!(model = %self.config.model, "sending completion request");

        let response = self
            .client
            .post(&self.config.endpoint)
            .headers(self.headers()?)
            .json(&body)
            .send()
            .await
            .map_err(|e| AiError::Http(e.to_string()))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| AiError::Http(e.to_string()))?;

        if !status.is_success() {
            return Err(AiError::Response(format!("HTTP {status}: {text}")));
        }

        parse_answer(&text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_first_choice() {
        let body = r#"{"choices":[{"message":{"role":"assistant","content":"Беріть C16."}}]}"#;
        assert_eq!(parse_answer(body), Ok("Беріть C16.".to_string()));
    }

    #[test]
    fn empty_choices_is_an_error() {
        assert_eq!(
            parse_answer(r#"{"choices":[]}"#),
            Err(AiError::Response("missing choices".to_string()))
        );
    }

    #[test]
    fn error_body_is_an_error() {
        let err = parse_answer(r#"{"error":{"message":"No auth credentials found"}}"#).unwrap_err();
        assert!(matches!(err, AiError::Response(_)));
    }

    #[test]
    fn api_key_becomes_bearer_header() {
        let client = HttpCompletionClient::new(HttpCompletionConfig {
            api_key: Some("sk-test".to_string()),
            ..HttpCompletionConfig::default()
        })
        .unwrap();
        let headers = client.headers().unwrap();
        assert_eq!(headers.get(AUTHORIZATION).unwrap(), "Bearer sk-test");
    }
}
