use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};

static NEXT_SLIDE_ID: AtomicU64 = AtomicU64::new(1);

/// Runtime identity of a slide. Never persisted; unique for the whole process,
/// so a slide from a previously loaded deck never matches one in the current deck.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SlideId(pub u64);

impl SlideId {
    pub fn next() -> Self {
        SlideId(NEXT_SLIDE_ID.fetch_add(1, Ordering::Relaxed))
    }
}

/// Reference to an image file embedded in a slide.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageRef {
    pub path: PathBuf,
}

impl ImageRef {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Slide {
    pub id: SlideId,
    pub title: String,
    pub content: String,
    pub images: Vec<ImageRef>,
}

impl Slide {
    pub fn new(id: SlideId, title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            content: content.into(),
            images: Vec::new(),
        }
    }

    /// Blank slide named after its 1-based position, e.g. "Slide 3".
    pub fn numbered(id: SlideId, number: usize) -> Self {
        Self::new(id, format!("Slide {}", number), "")
    }

    pub fn image_paths(&self) -> impl Iterator<Item = &Path> {
        self.images.iter().map(ImageRef::path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slide_ids_are_fresh() {
        let a = SlideId::next();
        let b = SlideId::next();
        assert!(b.0 > a.0);
    }

    #[test]
    fn test_numbered_slide() {
        let slide = Slide::numbered(SlideId(7), 3);
        assert_eq!(slide.title, "Slide 3");
        assert!(slide.content.is_empty());
        assert!(slide.images.is_empty());
        assert_eq!(slide.id, SlideId(7));
    }

    #[test]
    fn test_image_paths_in_order() {
        let mut slide = Slide::new(SlideId(1), "Pics", "");
        slide.images.push(ImageRef::new("b.png"));
        slide.images.push(ImageRef::new("a.png"));
        let paths: Vec<&Path> = slide.image_paths().collect();
        assert_eq!(paths, vec![Path::new("b.png"), Path::new("a.png")]);
    }
}
