use std::sync::Arc;

use async_trait::async_trait;

use crate::result::AiError;

/// Single-turn completion request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletionRequest {
    pub prompt: String,
}

impl CompletionRequest {
    /// Build a request from free text. Blank prompts are rejected.
    pub fn new(prompt: impl Into<String>) -> Result<Self, AiError> {
        let prompt = prompt.into();
        if prompt.trim().is_empty() {
            return Err(AiError::InvalidInput("prompt must not be empty".to_string()));
        }
        Ok(Self { prompt })
    }
}

/// External text-completion service.
#[async_trait]
pub trait CompletionClient: Send + Sync {
    async fn complete(&self, request: CompletionRequest) -> Result<String, AiError>;
}

#[async_trait]
impl CompletionClient for Arc<dyn CompletionClient> {
    async fn complete(&self, request: CompletionRequest) -> Result<String, AiError> {
        (**self).complete(request).await
    }
}

/// Fixed-answer client for tests and offline runs.
#[derive(Debug, Clone)]
pub struct StaticCompletionClient {
    answer: Result<String, AiError>,
}

impl StaticCompletionClient {
    pub fn answering(answer: impl Into<String>) -> Self {
        Self {
            answer: Ok(answer.into()),
        }
    }

    pub fn failing(error: AiError) -> Self {
        Self { answer: Err(error) }
    }
}

#[async_trait]
impl CompletionClient for StaticCompletionClient {
    async fn complete(&self, _request: CompletionRequest) -> Result<String, AiError> {
        self.answer.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_prompt_is_rejected() {
        assert!(matches!(
            CompletionRequest::new("  "),
            Err(AiError::InvalidInput(_))
        ));
    }

    #[tokio::test]
    async fn static_client_relays_answer_and_error() {
        let request = CompletionRequest::new("Як вибрати автомат?").unwrap();

        let ok = StaticCompletionClient::answering("C16");
        assert_eq!(ok.complete(request.clone()).await, Ok("C16".to_string()));

        let failing = StaticCompletionClient::failing(AiError::Http("timeout".to_string()));
        assert_eq!(
            failing.complete(request).await,
            Err(AiError::Http("timeout".to_string()))
        );
    }
}
