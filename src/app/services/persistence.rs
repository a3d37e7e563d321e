use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use crate::app::controllers::deck::Deck;
use crate::app::domain::slide::ImageRef;
use crate::app::infrastructure::error::{AppError, Result};
use crate::app::infrastructure::thumbnails::{ImageDecoder, Thumbnail};

/// One slide as stored in `presentation.json`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SlideRecord {
    pub title: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub images: Vec<PathBuf>,
}

/// An image that could not be decoded while loading; the slide was kept
/// without it.
#[derive(Debug)]
pub struct SkippedImage {
    pub slide_index: usize,
    pub path: PathBuf,
    pub error: AppError,
}

/// Result of rebuilding a deck from a document.
pub struct LoadedDeck {
    pub deck: Deck,
    /// Thumbnails decoded along the way, ready for the render cache.
    pub thumbnails: Vec<(PathBuf, Thumbnail)>,
    pub skipped_images: Vec<SkippedImage>,
}

/// Durable form of the deck. Only image paths survive; bitmaps are dropped.
pub fn serialize(deck: &Deck) -> Vec<SlideRecord> {
    deck.slides()
        .iter()
        .map(|slide| SlideRecord {
            title: slide.title.clone(),
            content: slide.content.clone(),
            images: slide.images.iter().map(|i| i.path.clone()).collect(),
        })
        .collect()
}

/// Rebuild a deck in document order, re-decoding every image.
///
/// Undecodable images are omitted from their slide and reported in
/// `skipped_images`; they never fail the whole load. The cursor starts at 0.
pub fn deserialize(records: Vec<SlideRecord>, decoder: &dyn ImageDecoder) -> LoadedDeck {
    let mut thumbnails = Vec::new();
    let mut skipped_images = Vec::new();
    let mut parts = Vec::with_capacity(records.len());

    for (slide_index, record) in records.into_iter().enumerate() {
        let mut images = Vec::with_capacity(record.images.len());
        for path in record.images {
            match decoder.decode(&path) {
                Ok(thumb) => {
                    images.push(ImageRef::new(path.clone()));
                    thumbnails.push((path, thumb));
                }
                Err(error) => {
                    warn!(slide = slide_index, path = %path.display(), "Skipping image: {}", error);
                    skipped_images.push(SkippedImage {
                        slide_index,
                        path,
                        error,
                    });
                }
            }
        }
        parts.push((record.title, record.content, images));
    }

    LoadedDeck {
        deck: Deck::from_parts(parts),
        thumbnails,
        skipped_images,
    }
}

pub fn to_json(deck: &Deck) -> Result<String> {
    Ok(serde_json::to_string_pretty(&serialize(deck))?)
}

pub fn from_json(json: &str) -> Result<Vec<SlideRecord>> {
    Ok(serde_json::from_str(json)?)
}

/// Write the deck to `path`, creating parent directories as needed.
pub fn save_deck(deck: &Deck, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, to_json(deck)?)?;
    info!(path = %path.display(), slides = deck.len(), "Presentation saved");
    Ok(())
}

/// Read and parse a deck document without touching any live deck.
pub fn read_document(path: &Path) -> Result<Vec<SlideRecord>> {
    let contents = fs::read_to_string(path)?;
    from_json(&contents)
}

/// Read, parse and rebuild a deck from `path`.
pub fn load_deck(path: &Path, decoder: &dyn ImageDecoder) -> Result<LoadedDeck> {
    let records = read_document(path)?;
    let loaded = deserialize(records, decoder);
    info!(
        path = %path.display(),
        slides = loaded.deck.len(),
        skipped_images = loaded.skipped_images.len(),
        "Presentation loaded"
    );
    Ok(loaded)
}
