//! Controllers layer - orchestration and coordination.
//!
//! This module contains controllers that coordinate between
//! domain models, services, and the front-end:
//! - Deck (slide list and cursor)
//! - Background summarization
pub mod deck;
pub mod summarize;
