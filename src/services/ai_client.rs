use std::error::Error;
use std::fmt;
use std::time::Duration;

use rand::Rng;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::config::AppConfig;

pub const TEMPERATURE: f32 = 0.7;
pub const MAX_TOKENS: u32 = 800;

const RETRY_BASE_DELAY_MS: u64 = 500;
const RETRY_JITTER_MS: u64 = 250;

#[derive(Debug, Serialize)]
struct ChatCompletionRequest {
    model: String,
    messages: Vec<ChatMessage>,
    temperature: f32,
    max_tokens: u32,
}

#[derive(Debug, Serialize)]
struct ChatMessage {
    role: String,
    content: String,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    content: Option<String>,
}

#[derive(Debug)]
pub enum AiClientError {
    HttpError(reqwest::Error),
    ApiError { status: u16, body: String },
    MalformedResponse(String),
    EmptyResponse,
    RetriesExhausted { attempts: u32, last_error: String },
}

impl fmt::Display for AiClientError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AiClientError::HttpError(err) => write!(f, "HTTP error: {}", err),
            AiClientError::ApiError { status, body } => {
                write!(f, "AI provider returned status {}: {}", status, body)
            }
            AiClientError::MalformedResponse(msg) => write!(f, "Malformed response: {}", msg),
            AiClientError::EmptyResponse => write!(f, "AI provider returned no content"),
            AiClientError::RetriesExhausted {
                attempts,
                last_error,
            } => write!(
                f,
                "AI provider unavailable after {} attempts, last error: {}",
                attempts, last_error
            ),
        }
    }
}

impl Error for AiClientError {}

impl From<reqwest::Error> for AiClientError {
    fn from(err: reqwest::Error) -> Self {
        AiClientError::HttpError(err)
    }
}

impl AiClientError {
    /// Transport errors, rate limits and server-side failures are worth
    /// retrying; anything else (bad key, bad request) is not.
    fn is_retryable(&self) -> bool {
        match self {
            AiClientError::HttpError(_) => true,
            AiClientError::ApiError { status, .. } => *status == 429 || *status >= 500,
            AiClientError::MalformedResponse(_) => true,
            AiClientError::EmptyResponse => true,
            AiClientError::RetriesExhausted { .. } => false,
        }
    }
}

/// Thin wrapper around the OpenRouter chat-completions API. Every call is
/// bounded by the client timeout, so a slow upstream cannot hold a request
/// forever.
#[derive(Clone)]
pub struct AiClient {
    client: Client,
    api_base: String,
    api_key: String,
    model: String,
    max_retries: u32,
}

impl AiClient {
    pub fn new(config: &AppConfig) -> Result<Self, AiClientError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()?;

        Ok(Self {
            client,
            api_base: config.api_base.clone(),
            api_key: config.api_key.clone(),
            model: config.model.clone(),
            max_retries: config.max_retries,
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// Ask the model for an itinerary and return its raw text. Failed calls
    /// are retried a bounded number of times with exponential backoff and
    /// jitter; after that the error surfaces to the caller. There is no
    /// fabricated fallback content.
    pub async fn request_itinerary(
        &self,
        system_prompt: &str,
        user_prompt: &str,
    ) -> Result<String, AiClientError> {
        let mut last_error: Option<AiClientError> = None;

        for attempt in 0..=self.max_retries {
            if attempt > 0 {
                let backoff = RETRY_BASE_DELAY_MS << (attempt - 1);
                let jitter = rand::thread_rng().gen_range(0..=RETRY_JITTER_MS);
                tokio::time::sleep(Duration::from_millis(backoff + jitter)).await;
            }

            match self.query(system_prompt, user_prompt).await {
                Ok(text) => return Ok(text),
                Err(err) if err.is_retryable() => {
                    eprintln!("AI request attempt {} failed: {}", attempt + 1, err);
                    last_error = Some(err);
                }
                Err(err) => return Err(err),
            }
        }

        Err(AiClientError::RetriesExhausted {
            attempts: self.max_retries + 1,
            last_error: last_error
                .map(|err| err.to_string())
                .unwrap_or_else(|| "unknown".to_string()),
        })
    }

    async fn query(&self, system_prompt: &str, user_prompt: &str) -> Result<String, AiClientError> {
        let request = ChatCompletionRequest {
            model: self.model.clone(),
            messages: vec![
                ChatMessage {
                    role: "system".to_string(),
                    content: system_prompt.to_string(),
                },
                ChatMessage {
                    role: "user".to_string(),
                    content: user_prompt.to_string(),
                },
            ],
            temperature: TEMPERATURE,
            max_tokens: MAX_TOKENS,
        };

        let url = format!("{}/chat/completions", self.api_base);

        let response = self
            .client
            .post(&url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Content-Type", "application/json")
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(AiClientError::ApiError {
                status: status.as_u16(),
                body,
            });
        }

        let completion: ChatCompletionResponse = response.json().await.map_err(|err| {
            AiClientError::MalformedResponse(format!("failed to parse completion: {}", err))
        })?;

        completion
            .choices
            .first()
            .and_then(|choice| choice.message.content.clone())
            .filter(|content| !content.trim().is_empty())
            .ok_or(AiClientError::EmptyResponse)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_retryable_errors() {
        assert!(AiClientError::ApiError {
            status: 429,
            body: "rate limited".to_string()
        }
        .is_retryable());
        assert!(AiClientError::ApiError {
            status: 503,
            body: "overloaded".to_string()
        }
        .is_retryable());
        assert!(AiClientError::EmptyResponse.is_retryable());
        assert!(AiClientError::MalformedResponse("not json".to_string()).is_retryable());
        assert!(!AiClientError::ApiError {
            status: 401,
            body: "bad key".to_string()
        }
        .is_retryable());
    }

    #[test]
    fn test_error_display_includes_context() {
        let err = AiClientError::RetriesExhausted {
            attempts: 3,
            last_error: "status 503".to_string(),
        };
        let message = err.to_string();
        assert!(message.contains("3 attempts"));
        assert!(message.contains("503"));
    }

    #[test]
    fn test_completion_response_parses_openrouter_shape() {
        let body = r#"{
            "id": "gen-123",
            "choices": [{"index": 0, "message": {"role": "assistant", "content": "hello"}}],
            "usage": {"prompt_tokens": 10, "completion_tokens": 2}
        }"#;
        let completion: ChatCompletionResponse = serde_json::from_str(body).unwrap();
        assert_eq!(
            completion.choices[0].message.content.as_deref(),
            Some("hello")
        );
    }
}
