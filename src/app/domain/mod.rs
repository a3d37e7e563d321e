//! Domain layer - core data structures and types.
//!
//! This module contains the fundamental domain models:
//! - Slide, SlideId and image references
//! - Navigation addressing
//! - Application settings
//! - Message types for the event system

pub mod messages;
pub mod navigation;
pub mod settings;
pub mod slide;

pub use messages::Message;
pub use navigation::{Direction, Navigation};
pub use settings::{AppSettings, SummarizerBackend};
pub use slide::{ImageRef, Slide, SlideId};
