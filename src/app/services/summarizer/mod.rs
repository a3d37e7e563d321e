//! Text summarization port and its backends.
//!
//! The editor only ever sees the [`Summarizer`] trait. Backends:
//! - [`local::LocalModelSummarizer`] - exported seq2seq model behind a local HTTP pipeline
//! - [`cloud::CloudSummarizer`] - OpenAI-compatible chat completions API

pub mod cloud;
pub mod local;

use std::fmt;
use std::sync::Arc;

use thiserror::Error;
use tracing::info;

use crate::app::domain::settings::{AppSettings, SummarizerBackend};

pub use cloud::CloudSummarizer;
pub use local::LocalModelSummarizer;

#[derive(Debug, Error)]
pub enum SummarizeError {
    #[error("There is no text to summarize")]
    EmptyInput,

    #[error("Summarization is disabled in settings")]
    Disabled,

    #[error("API key not found; set the {0} environment variable")]
    MissingCredential(String),

    #[error("Network error: {0}")]
    Http(#[from] minreq::Error),

    #[error("Server error ({status}): {message}")]
    Server { status: i32, message: String },

    #[error("Invalid response from summarizer: {0}")]
    InvalidResponse(String),

    #[error("Could not start summarize worker: {0}")]
    Worker(String),

    #[error("Summary ({output} chars) is longer than the original ({input} chars)")]
    NotShorter { input: usize, output: usize },
}

/// Capability to shorten a piece of text.
///
/// Calls may block for a long time; the editor runs them off the control thread.
pub trait Summarizer: Send + Sync {
    fn summarize(&self, text: &str, max_length: usize) -> Result<String, SummarizeError>;

    /// Short human-readable backend name for log lines and notices.
    fn name(&self) -> &'static str;
}

/// Backend selection plus everything a backend constructor needs.
/// Built once at startup and handed to [`build_summarizer`].
#[derive(Clone)]
pub struct SummarizerConfig {
    pub backend: SummarizerBackend,
    pub max_length: usize,
    pub local_endpoint: String,
    pub cloud_endpoint: String,
    pub cloud_model: String,
    pub api_key_env: String,
    pub api_key: Option<String>,
    pub timeout_secs: u64,
}

impl SummarizerConfig {
    /// Combine settings with the API key found in the process environment.
    pub fn from_settings(settings: &AppSettings) -> Self {
        let api_key = std::env::var(&settings.api_key_env)
            .ok()
            .filter(|k| !k.trim().is_empty());
        Self {
            backend: settings.summarizer,
            max_length: settings.summary_max_length,
            local_endpoint: settings.local_endpoint.clone(),
            cloud_endpoint: settings.cloud_endpoint.clone(),
            cloud_model: settings.cloud_model.clone(),
            api_key_env: settings.api_key_env.clone(),
            api_key,
            timeout_secs: settings.request_timeout_secs,
        }
    }
}

impl fmt::Debug for SummarizerConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SummarizerConfig")
            .field("backend", &self.backend)
            .field("max_length", &self.max_length)
            .field("local_endpoint", &self.local_endpoint)
            .field("cloud_endpoint", &self.cloud_endpoint)
            .field("cloud_model", &self.cloud_model)
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

/// Construct the configured backend. `Ok(None)` means summarization is off.
pub fn build_summarizer(config: &SummarizerConfig) -> Result<Option<Arc<dyn Summarizer>>, SummarizeError> {
    let summarizer: Arc<dyn Summarizer> = match config.backend {
        SummarizerBackend::Off => return Ok(None),
        SummarizerBackend::Local => Arc::new(LocalModelSummarizer::new(
            &config.local_endpoint,
            config.timeout_secs,
        )),
        SummarizerBackend::Cloud => {
            let key = config
                .api_key
                .as_deref()
                .ok_or_else(|| SummarizeError::MissingCredential(config.api_key_env.clone()))?;
            Arc::new(CloudSummarizer::new(
                key,
                &config.cloud_endpoint,
                &config.cloud_model,
                config.timeout_secs,
            ))
        }
    };
    info!(backend = summarizer.name(), "Summarizer ready");
    Ok(Some(summarizer))
}

/// Run `summarizer` and hold it to the port contract: non-empty input, and a
/// non-empty result no longer than the input.
pub fn summarize_checked(
    summarizer: &dyn Summarizer,
    text: &str,
    max_length: usize,
) -> Result<String, SummarizeError> {
    let input = text.trim();
    if input.is_empty() {
        return Err(SummarizeError::EmptyInput);
    }

    let summary = summarizer.summarize(input, max_length)?;
    let summary = summary.trim();
    if summary.is_empty() {
        return Err(SummarizeError::InvalidResponse("empty summary".to_string()));
    }

    let input_len = input.chars().count();
    let output_len = summary.chars().count();
    if output_len > input_len {
        return Err(SummarizeError::NotShorter {
            input: input_len,
            output: output_len,
        });
    }

    Ok(summary.to_string())
}
