//! Services layer - business operations and utilities.
//!
//! This module contains business logic and operations:
//! - Deck persistence
//! - Text summarization backends

pub mod persistence;
pub mod summarizer;
