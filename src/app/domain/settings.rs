use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use tracing::warn;

use crate::app::infrastructure::error::{AppError, Result};

/// Which summarization backend the editor talks to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum SummarizerBackend {
    /// Summarize button reports that the feature is disabled.
    Off,
    /// Locally hosted exported seq2seq model behind an HTTP pipeline endpoint.
    #[default]
    Local,
    /// Remote chat-completions API; needs an API key in the environment.
    Cloud,
}

impl SummarizerBackend {
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Off => "Disabled",
            Self::Local => "Local model",
            Self::Cloud => "Cloud LLM",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppSettings {
    #[serde(default)]
    pub summarizer: SummarizerBackend,

    /// Maximum summary length hint passed to the backend
    #[serde(default = "default_summary_max_length")]
    pub summary_max_length: usize,

    #[serde(default = "default_local_endpoint")]
    pub local_endpoint: String,

    #[serde(default = "default_cloud_endpoint")]
    pub cloud_endpoint: String,

    #[serde(default = "default_cloud_model")]
    pub cloud_model: String,

    /// Name of the environment variable holding the cloud API key
    #[serde(default = "default_api_key_env")]
    pub api_key_env: String,

    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,

    /// Where Save/Load read and write the deck
    #[serde(default = "default_deck_path")]
    pub deck_path: PathBuf,
}

fn default_summary_max_length() -> usize {
    50
}

fn default_local_endpoint() -> String {
    "http://127.0.0.1:8080/summarize".to_string()
}

fn default_cloud_endpoint() -> String {
    "https://api.openai.com/v1/chat/completions".to_string()
}

fn default_cloud_model() -> String {
    "gpt-4o-mini".to_string()
}

fn default_api_key_env() -> String {
    "OPENAI_API_KEY".to_string()
}

fn default_request_timeout_secs() -> u64 {
    60
}

fn default_deck_path() -> PathBuf {
    PathBuf::from("presentation.json")
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            summarizer: SummarizerBackend::default(),
            summary_max_length: default_summary_max_length(),
            local_endpoint: default_local_endpoint(),
            cloud_endpoint: default_cloud_endpoint(),
            cloud_model: default_cloud_model(),
            api_key_env: default_api_key_env(),
            request_timeout_secs: default_request_timeout_secs(),
            deck_path: default_deck_path(),
        }
    }
}

impl AppSettings {
    /// Load settings from disk, or create default if not exists
    pub fn load() -> Self {
        let config_path = Self::get_config_path();

        match fs::read_to_string(&config_path) {
            Ok(contents) => match serde_json::from_str::<AppSettings>(&contents) {
                Ok(settings) => settings.sanitized(),
                Err(e) => {
                    warn!("Failed to parse settings: {}. Using defaults.", e);
                    Self::default()
                }
            },
            Err(_) => {
                // File doesn't exist, use defaults
                let default = Self::default();
                // Try to save defaults for next time
                let _ = default.save();
                default
            }
        }
    }

    /// Save settings to disk
    pub fn save(&self) -> Result<()> {
        self.validate()?;
        let config_path = Self::get_config_path();

        // Ensure parent directory exists
        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent)?;
        }

        let json = serde_json::to_string_pretty(self)?;
        fs::write(&config_path, json)?;

        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        if self.summary_max_length == 0 {
            return Err(AppError::Settings(
                "summary_max_length must be greater than zero".to_string(),
            ));
        }
        if self.request_timeout_secs == 0 {
            return Err(AppError::Settings(
                "request_timeout_secs must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }

    /// Replace out-of-range values from a hand-edited file with defaults.
    fn sanitized(mut self) -> Self {
        if self.summary_max_length == 0 {
            warn!("summary_max_length of 0 is invalid, using default");
            self.summary_max_length = default_summary_max_length();
        }
        if self.request_timeout_secs == 0 {
            warn!("request_timeout_secs of 0 is invalid, using default");
            self.request_timeout_secs = default_request_timeout_secs();
        }
        self
    }

    /// Get config file path (cross-platform)
    pub fn get_config_path() -> PathBuf {
        let mut path = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
        path.push("ferrisslides");
        path.push("settings.json");
        path
    }
}
