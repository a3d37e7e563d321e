use std::path::PathBuf;

use tracing::debug;

use crate::app::domain::navigation::{Direction, Navigation};
use crate::app::domain::slide::{ImageRef, Slide, SlideId};
use crate::app::infrastructure::error::{AppError, Result};
use crate::app::infrastructure::thumbnails::{ImageDecoder, Thumbnail};

const WELCOME_TITLE: &str = "Welcome Slide";
const WELCOME_CONTENT: &str = "Welcome to the presentation!";

/// Ordered, never-empty list of slides plus the cursor of the slide in focus.
///
/// Invariants: `slides.len() >= 1` and `current < slides.len()`.
pub struct Deck {
    slides: Vec<Slide>,
    current: usize,
}

impl Deck {
    /// A fresh deck holding the welcome slide.
    pub fn new() -> Self {
        Self {
            slides: vec![Slide::new(SlideId::next(), WELCOME_TITLE, WELCOME_CONTENT)],
            current: 0,
        }
    }

    /// Build a deck from `(title, content, images)` triples in order.
    /// An empty input yields a single blank "Slide 1".
    pub fn from_parts<I>(parts: I) -> Self
    where
        I: IntoIterator<Item = (String, String, Vec<ImageRef>)>,
    {
        let mut slides: Vec<Slide> = parts
            .into_iter()
            .map(|(title, content, images)| {
                let mut slide = Slide::new(SlideId::next(), title, content);
                slide.images = images;
                slide
            })
            .collect();
        if slides.is_empty() {
            slides.push(Slide::numbered(SlideId::next(), 1));
        }
        Self { slides, current: 0 }
    }

    /// Append a blank slide titled "Slide {n+1}" and focus it.
    pub fn add_slide(&mut self) -> SlideId {
        let id = SlideId::next();
        let slide = Slide::numbered(id, self.slides.len() + 1);
        self.slides.push(slide);
        self.current = self.slides.len() - 1;
        id
    }

    /// Remove the slide in focus and focus its predecessor.
    /// Refused when only one slide is left.
    pub fn delete_current(&mut self) -> Result<Slide> {
        if self.slides.len() <= 1 {
            return Err(AppError::LastSlide);
        }
        let removed = self.slides.remove(self.current);
        self.current = self.current.saturating_sub(1);
        debug!(title = %removed.title, remaining = self.slides.len(), "Deleted slide");
        Ok(removed)
    }

    /// Move the cursor. Never wraps; out-of-range targets clamp to the ends.
    pub fn goto(&mut self, nav: Navigation) {
        let last = self.slides.len() - 1;
        self.current = match nav {
            Navigation::First => 0,
            Navigation::Last => last,
            Navigation::Next => (self.current + 1).min(last),
            Navigation::Previous => self.current.saturating_sub(1),
            Navigation::Index(i) => i.min(last),
        };
    }

    pub fn set_current_content(&mut self, text: impl Into<String>) {
        let idx = self.current;
        self.slides[idx].content = text.into();
    }

    pub fn rename_current(&mut self, title: impl Into<String>) {
        let idx = self.current;
        self.slides[idx].title = title.into();
    }

    /// Decode `path` and attach it to the slide in focus.
    /// Leaves the deck untouched if decoding fails.
    pub fn add_image(&mut self, path: impl Into<PathBuf>, decoder: &dyn ImageDecoder) -> Result<Thumbnail> {
        let path = path.into();
        let thumbnail = decoder.decode(&path)?;
        let idx = self.current;
        self.slides[idx].images.push(ImageRef::new(path));
        Ok(thumbnail)
    }

    /// Detach the image at `index` from the slide in focus.
    pub fn remove_image(&mut self, index: usize) -> Option<ImageRef> {
        let idx = self.current;
        let images = &mut self.slides[idx].images;
        if index < images.len() {
            Some(images.remove(index))
        } else {
            None
        }
    }

    /// Move a slide from one index to another. The cursor follows the slide
    /// it was on. Out-of-range `from` is ignored, `to` is clamped.
    pub fn move_slide(&mut self, from: usize, to: usize) {
        if from >= self.slides.len() {
            return;
        }
        let to = to.min(self.slides.len() - 1);
        if from == to {
            return;
        }
        let focused = self.slides[self.current].id;
        let slide = self.slides.remove(from);
        self.slides.insert(to, slide);
        if let Some(pos) = self.slides.iter().position(|s| s.id == focused) {
            self.current = pos;
        }
    }

    /// Shift the slide in focus one position; no-op at the ends.
    pub fn move_current(&mut self, direction: Direction) {
        let from = self.current;
        let to = match direction {
            Direction::Earlier if from > 0 => from - 1,
            Direction::Later if from + 1 < self.slides.len() => from + 1,
            _ => return,
        };
        self.move_slide(from, to);
    }

    pub fn current(&self) -> &Slide {
        &self.slides[self.current]
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn current_id(&self) -> SlideId {
        self.slides[self.current].id
    }

    pub fn slides(&self) -> &[Slide] {
        &self.slides
    }

    pub fn len(&self) -> usize {
        self.slides.len()
    }

    /// Never true for a deck built through this API.
    pub fn is_empty(&self) -> bool {
        self.slides.is_empty()
    }

    pub fn slide_by_id(&self, id: SlideId) -> Option<&Slide> {
        self.slides.iter().find(|s| s.id == id)
    }
}

impl Default for Deck {
    fn default() -> Self {
        Self::new()
    }
}
