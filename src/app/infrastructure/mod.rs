//! Infrastructure layer - external integrations and utilities.
//!
//! This module contains code that interfaces with external systems:
//! - Image decoding and the thumbnail render cache
//! - Logging setup
//! - Error types

pub mod error;
pub mod logging;
pub mod thumbnails;
