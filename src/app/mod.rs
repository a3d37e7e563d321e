//! Application layer - organized by Clean Architecture principles.
//!
//! # Structure
//!
//! - `domain/` - Core data structures (Slide, Settings, Messages)
//! - `controllers/` - Orchestration (Deck, SummarizeController)
//! - `services/` - Business operations (persistence, summarizer)
//! - `infrastructure/` - External integrations (thumbnails, logging, error)
//! - `state.rs` - Main application coordinator

pub mod controllers;
pub mod domain;
pub mod infrastructure;
pub mod services;
pub mod state;

// Re-exports for convenient external access
pub use controllers::deck::Deck;
pub use controllers::summarize::SummarizeController;
pub use domain::{AppSettings, Direction, ImageRef, Message, Navigation, Slide, SlideId, SummarizerBackend};
pub use infrastructure::error::{AppError, Result};
pub use infrastructure::thumbnails::{ImageCrateDecoder, ImageDecoder, Thumbnail, ThumbnailCache};
pub use services::summarizer::{SummarizeError, Summarizer, SummarizerConfig};
pub use state::{AppState, Notice, NoticeLevel};
