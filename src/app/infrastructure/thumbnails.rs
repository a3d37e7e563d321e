//! Decoded image thumbnails, kept apart from the persisted slide model.
//!
//! Slides only remember image paths. Whatever the presentation layer draws
//! comes from a [`ThumbnailCache`] keyed by path, which can be rebuilt from
//! disk at any time.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use image::imageops::FilterType;
use image::RgbaImage;
use tracing::debug;

use super::error::{AppError, Result};

/// Thumbnail bound in logical units (width and height).
pub const THUMBNAIL_SIZE: u32 = 200;

/// A decoded, fixed-size RGBA bitmap ready for rendering.
#[derive(Debug, Clone, PartialEq)]
pub struct Thumbnail {
    image: RgbaImage,
}

impl Thumbnail {
    pub fn new(image: RgbaImage) -> Self {
        Self { image }
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }
}

/// Turns a file-system path into a renderable thumbnail.
pub trait ImageDecoder {
    fn decode(&self, path: &Path) -> Result<Thumbnail>;
}

/// Decoder backed by the `image` crate. Output is always exactly
/// `THUMBNAIL_SIZE` x `THUMBNAIL_SIZE`.
#[derive(Debug, Default, Clone, Copy)]
pub struct ImageCrateDecoder;

impl ImageDecoder for ImageCrateDecoder {
    fn decode(&self, path: &Path) -> Result<Thumbnail> {
        let img = image::open(path).map_err(|e| AppError::ImageDecode {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        let resized = img.resize_exact(THUMBNAIL_SIZE, THUMBNAIL_SIZE, FilterType::Triangle);
        Ok(Thumbnail::new(resized.to_rgba8()))
    }
}

/// Render cache of decoded thumbnails keyed by image path.
#[derive(Default)]
pub struct ThumbnailCache {
    entries: HashMap<PathBuf, Thumbnail>,
}

impl ThumbnailCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, path: PathBuf, thumbnail: Thumbnail) {
        self.entries.insert(path, thumbnail);
    }

    pub fn get(&self, path: &Path) -> Option<&Thumbnail> {
        self.entries.get(path)
    }

    /// Return the cached thumbnail for `path`, decoding it on a miss.
    pub fn get_or_decode(&mut self, path: &Path, decoder: &dyn ImageDecoder) -> Result<&Thumbnail> {
        if !self.entries.contains_key(path) {
            debug!(path = %path.display(), "Thumbnail cache miss");
            let thumbnail = decoder.decode(path)?;
            self.entries.insert(path.to_path_buf(), thumbnail);
        }
        self.entries.get(path).ok_or_else(|| AppError::ImageDecode {
            path: path.to_path_buf(),
            reason: "thumbnail vanished from cache".to_string(),
        })
    }

    /// Drop every entry whose path is not in `keep`.
    pub fn retain_paths<'a, I>(&mut self, keep: I)
    where
        I: IntoIterator<Item = &'a Path>,
    {
        let keep: Vec<&Path> = keep.into_iter().collect();
        self.entries.retain(|path, _| keep.contains(&path.as_path()));
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ImageBuffer, Rgba};
    use std::cell::Cell;

    struct CountingDecoder {
        calls: Cell<usize>,
    }

    impl ImageDecoder for CountingDecoder {
        fn decode(&self, _path: &Path) -> Result<Thumbnail> {
            self.calls.set(self.calls.get() + 1);
            Ok(Thumbnail::new(RgbaImage::new(THUMBNAIL_SIZE, THUMBNAIL_SIZE)))
        }
    }

    #[test]
    fn test_decoder_resizes_to_thumbnail_bound() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("wide.png");
        let img: RgbaImage = ImageBuffer::from_pixel(640, 120, Rgba([10, 20, 30, 255]));
        img.save(&path).unwrap();

        let thumb = ImageCrateDecoder.decode(&path).unwrap();
        assert_eq!(thumb.width(), THUMBNAIL_SIZE);
        assert_eq!(thumb.height(), THUMBNAIL_SIZE);
        assert_eq!(thumb.image.as_raw().len(), (THUMBNAIL_SIZE * THUMBNAIL_SIZE * 4) as usize);
    }

    #[test]
    fn test_decoder_missing_file() {
        let err = ImageCrateDecoder
            .decode(Path::new("/definitely/not/here.png"))
            .unwrap_err();
        assert!(matches!(err, AppError::ImageDecode { .. }));
    }

    #[test]
    fn test_decoder_rejects_non_image() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("notes.png");
        std::fs::write(&path, "just some text").unwrap();
        assert!(ImageCrateDecoder.decode(&path).is_err());
    }

    #[test]
    fn test_cache_decodes_once_per_path() {
        let decoder = CountingDecoder { calls: Cell::new(0) };
        let mut cache = ThumbnailCache::new();
        let path = Path::new("a.png");

        cache.get_or_decode(path, &decoder).unwrap();
        cache.get_or_decode(path, &decoder).unwrap();
        assert_eq!(decoder.calls.get(), 1);
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_cache_retain_paths() {
        let mut cache = ThumbnailCache::new();
        let blank = Thumbnail::new(RgbaImage::new(1, 1));
        cache.insert(PathBuf::from("a.png"), blank.clone());
        cache.insert(PathBuf::from("b.png"), blank);

        cache.retain_paths([Path::new("b.png")]);
        assert!(cache.get(Path::new("a.png")).is_none());
        assert!(cache.get(Path::new("b.png")).is_some());
    }
}
