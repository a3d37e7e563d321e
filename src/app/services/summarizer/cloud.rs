//! Cloud summarizer over an OpenAI-compatible Chat Completions endpoint.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{info, instrument, warn};
use zeroize::Zeroize;

use super::{SummarizeError, Summarizer};

/// Maximum number of retry attempts for transient failures.
const MAX_RETRIES: u32 = 3;

/// Initial delay between retries (doubles with each attempt).
const INITIAL_RETRY_DELAY_MS: u64 = 500;

/// System prompt; `{max_length}` is replaced per request.
const SUMMARY_PROMPT_TEMPLATE: &str = "You summarize presentation slides. Shorten the text you are given to at most {max_length} words, keeping its key points and its language. Return only the summary, without any preamble.";

pub struct CloudSummarizer {
    api_key: String,
    endpoint: String,
    model: String,
    timeout_secs: u64,
}

#[derive(Debug, Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
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
    #[serde(default)]
    content: Option<String>,
}

fn build_prompt(max_length: usize) -> String {
    SUMMARY_PROMPT_TEMPLATE.replace("{max_length}", &max_length.to_string())
}

impl CloudSummarizer {
    pub fn new(api_key: &str, endpoint: &str, model: &str, timeout_secs: u64) -> Self {
        Self {
            api_key: api_key.to_string(),
            endpoint: endpoint.to_string(),
            model: model.to_string(),
            timeout_secs,
        }
    }

    fn request_body<'a>(&'a self, text: &str, max_length: usize) -> ChatCompletionRequest<'a> {
        ChatCompletionRequest {
            model: &self.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: build_prompt(max_length),
                },
                ChatMessage {
                    role: "user",
                    content: text.to_string(),
                },
            ],
        }
    }

    fn send_once(&self, body: &ChatCompletionRequest<'_>) -> Result<String, SummarizeError> {
        let response = minreq::post(&self.endpoint)
            .with_header("Authorization", format!("Bearer {}", self.api_key))
            .with_header("Content-Type", "application/json")
            .with_timeout(self.timeout_secs)
            .with_json(body)?
            .send()?;

        if !(200..300).contains(&response.status_code) {
            return Err(SummarizeError::Server {
                status: response.status_code,
                message: response.as_str().unwrap_or_default().to_string(),
            });
        }

        let parsed: ChatCompletionResponse = response.json().map_err(|e| {
            SummarizeError::InvalidResponse(format!("Failed to parse chat response: {}", e))
        })?;
        extract_text(&parsed)
    }
}

fn extract_text(response: &ChatCompletionResponse) -> Result<String, SummarizeError> {
    response
        .choices
        .first()
        .and_then(|choice| choice.message.content.clone())
        .filter(|text| !text.trim().is_empty())
        .ok_or_else(|| SummarizeError::InvalidResponse("No text content in chat response".into()))
}

/// Transport failures, rate limiting and 5xx responses are worth another try.
fn is_retryable(error: &SummarizeError) -> bool {
    match error {
        SummarizeError::Http(_) => true,
        SummarizeError::Server { status, .. } => *status == 429 || (500..600).contains(status),
        _ => false,
    }
}

impl Summarizer for CloudSummarizer {
    #[instrument(skip(self, text), fields(text_len = text.len(), model = %self.model))]
    fn summarize(&self, text: &str, max_length: usize) -> Result<String, SummarizeError> {
        let body = self.request_body(text, max_length);
        let mut retry_delay = Duration::from_millis(INITIAL_RETRY_DELAY_MS);
        let mut attempt = 0;

        loop {
            match self.send_once(&body) {
                Ok(summary) => {
                    if attempt > 0 {
                        info!(attempt, "Cloud summary succeeded after retry");
                    }
                    return Ok(summary);
                }
                Err(e) if attempt < MAX_RETRIES && is_retryable(&e) => {
                    attempt += 1;
                    warn!(
                        error = %e,
                        attempt,
                        max_retries = MAX_RETRIES,
                        delay_ms = retry_delay.as_millis() as u64,
                        "Retrying cloud summary after transient failure"
                    );
                    std::thread::sleep(retry_delay);
                    retry_delay *= 2;
                }
                Err(e) => return Err(e),
            }
        }
    }

    fn name(&self) -> &'static str {
        "cloud"
    }
}

impl Drop for CloudSummarizer {
    fn drop(&mut self) {
        // Clear API key from memory
        self.api_key.zeroize();
    }
}
