//! Summarizer for a locally hosted, exported seq2seq model (e.g. a
//! distilbart-cnn export) served behind a summarization pipeline endpoint.
//!
//! Request:  `{"inputs": "...", "parameters": {"max_length": 50, "truncation": true}}`
//! Response: `[{"summary_text": "..."}]`

use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use super::{SummarizeError, Summarizer};

pub struct LocalModelSummarizer {
    endpoint: String,
    timeout_secs: u64,
}

#[derive(Debug, Serialize)]
struct PipelineRequest<'a> {
    inputs: &'a str,
    parameters: PipelineParameters,
}

#[derive(Debug, Serialize)]
struct PipelineParameters {
    max_length: usize,
    truncation: bool,
}

#[derive(Debug, Deserialize)]
struct PipelineOutput {
    summary_text: String,
}

impl LocalModelSummarizer {
    pub fn new(endpoint: &str, timeout_secs: u64) -> Self {
        Self {
            endpoint: endpoint.to_string(),
            timeout_secs,
        }
    }
}

fn parse_outputs(body: &str) -> Result<String, SummarizeError> {
    let outputs: Vec<PipelineOutput> = serde_json::from_str(body).map_err(|e| {
        SummarizeError::InvalidResponse(format!("Failed to parse model output: {}", e))
    })?;
    outputs
        .into_iter()
        .next()
        .map(|o| o.summary_text)
        .ok_or_else(|| SummarizeError::InvalidResponse("Model returned no summaries".into()))
}

impl Summarizer for LocalModelSummarizer {
    #[instrument(skip(self, text), fields(text_len = text.len(), endpoint = %self.endpoint))]
    fn summarize(&self, text: &str, max_length: usize) -> Result<String, SummarizeError> {
        let request = PipelineRequest {
            inputs: text,
            parameters: PipelineParameters {
                max_length,
                truncation: true,
            },
        };

        let response = minreq::post(&self.endpoint)
            .with_timeout(self.timeout_secs)
            .with_json(&request)?
            .send()?;

        let body = response.as_str()?;
        if !(200..300).contains(&response.status_code) {
            return Err(SummarizeError::Server {
                status: response.status_code,
                message: body.to_string(),
            });
        }

        debug!(bytes = body.len(), "Local model responded");
        parse_outputs(body)
    }

    fn name(&self) -> &'static str {
        "local"
    }
}
