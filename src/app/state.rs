use std::path::{Path, PathBuf};
use std::sync::mpsc::Sender;

use tracing::{debug, error, info, warn};

use super::controllers::deck::Deck;
use super::controllers::summarize::SummarizeController;
use super::domain::messages::Message;
use super::domain::navigation::{Direction, Navigation};
use super::domain::slide::SlideId;
use super::infrastructure::thumbnails::{ImageDecoder, Thumbnail, ThumbnailCache};
use super::services::persistence;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Warning,
    Error,
}

/// A user-facing message for the front-end to show.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub text: String,
}

/// Editor controller: owns the deck and applies every [`Message`] to it on
/// the control thread.
pub struct AppState {
    pub deck: Deck,
    pub thumbnails: ThumbnailCache,
    pub summarize: SummarizeController,
    pub deck_path: PathBuf,
    decoder: Box<dyn ImageDecoder>,
    sender: Sender<Message>,
    notices: Vec<Notice>,
    needs_redraw: bool,
    has_unsaved_changes: bool,
}

impl AppState {
    pub fn new(
        decoder: Box<dyn ImageDecoder>,
        summarize: SummarizeController,
        sender: Sender<Message>,
        deck_path: PathBuf,
    ) -> Self {
        Self {
            deck: Deck::new(),
            thumbnails: ThumbnailCache::new(),
            summarize,
            deck_path,
            decoder,
            sender,
            notices: Vec::new(),
            needs_redraw: true,
            has_unsaved_changes: false,
        }
    }

    /// Apply one message. Returns `true` if the app should exit.
    pub fn handle(&mut self, msg: Message) -> bool {
        debug!(?msg, "Dispatch");
        match msg {
            Message::AddSlide => self.add_slide(),
            Message::DeleteSlide => self.delete_slide(),
            Message::RenameSlide(title) => self.rename_slide(title),
            Message::MoveSlide(direction) => self.move_slide(direction),
            Message::Navigate(nav) => self.navigate(nav),
            Message::Refresh => self.request_redraw(),
            Message::ContentEdited(text) => self.content_edited(text),
            Message::AddImage(path) => self.add_image(path),
            Message::RemoveImage(index) => self.remove_image(index),
            Message::Save => self.save(),
            Message::Load => self.load(),
            Message::Summarize => self.request_summary(),
            Message::SummaryReady { slide_id, result } => self.summary_ready(slide_id, result),
            Message::Quit => return self.quit(),
        }
        false
    }

    // --- Notices & redraw ---

    fn notify(&mut self, level: NoticeLevel, text: impl Into<String>) {
        let text = text.into();
        match level {
            NoticeLevel::Info => info!("{}", text),
            NoticeLevel::Warning => warn!("{}", text),
            NoticeLevel::Error => error!("{}", text),
        }
        self.notices.push(Notice { level, text });
    }

    pub fn take_notices(&mut self) -> Vec<Notice> {
        std::mem::take(&mut self.notices)
    }

    /// Returns whether a re-render was requested since the last call.
    pub fn take_redraw(&mut self) -> bool {
        std::mem::replace(&mut self.needs_redraw, false)
    }

    fn request_redraw(&mut self) {
        self.needs_redraw = true;
    }

    fn mark_dirty(&mut self) {
        self.has_unsaved_changes = true;
    }

    pub fn is_dirty(&self) -> bool {
        self.has_unsaved_changes
    }

    /// Thumbnail for an image path, decoding it on a cache miss.
    pub fn thumbnail(&mut self, path: &Path) -> Option<&Thumbnail> {
        self.thumbnails.get_or_decode(path, self.decoder.as_ref()).ok()
    }

    /// Whether the summarize action should be offered for the current slide.
    pub fn can_summarize(&self) -> bool {
        self.summarize.is_enabled() && !self.summarize.is_pending(self.deck.current_id())
    }

    fn prune_thumbnails(&mut self) {
        let deck = &self.deck;
        self.thumbnails
            .retain_paths(deck.slides().iter().flat_map(|s| s.image_paths()));
    }

    // --- Deck operations ---

    pub fn add_slide(&mut self) {
        self.deck.add_slide();
        self.mark_dirty();
        self.request_redraw();
    }

    pub fn delete_slide(&mut self) {
        match self.deck.delete_current() {
            Ok(_) => {
                self.prune_thumbnails();
                self.mark_dirty();
                self.request_redraw();
            }
            Err(e) => self.notify(NoticeLevel::Warning, e.to_string()),
        }
    }

    pub fn rename_slide(&mut self, title: String) {
        self.deck.rename_current(title);
        self.mark_dirty();
        self.request_redraw();
    }

    pub fn move_slide(&mut self, direction: Direction) {
        let before = self.deck.current_index();
        self.deck.move_current(direction);
        if self.deck.current_index() != before {
            self.mark_dirty();
            self.request_redraw();
        }
    }

    pub fn navigate(&mut self, nav: Navigation) {
        self.deck.goto(nav);
        self.request_redraw();
    }

    pub fn content_edited(&mut self, text: String) {
        if self.deck.current().content != text {
            self.deck.set_current_content(text);
            self.mark_dirty();
        }
    }

    pub fn add_image(&mut self, path: PathBuf) {
        match self.deck.add_image(path.clone(), self.decoder.as_ref()) {
            Ok(thumbnail) => {
                self.thumbnails.insert(path, thumbnail);
                self.mark_dirty();
                self.request_redraw();
            }
            Err(e) => self.notify(NoticeLevel::Error, e.to_string()),
        }
    }

    pub fn remove_image(&mut self, index: usize) {
        if self.deck.remove_image(index).is_some() {
            self.prune_thumbnails();
            self.mark_dirty();
            self.request_redraw();
        } else {
            self.notify(
                NoticeLevel::Warning,
                format!("This slide has no image number {}", index.saturating_add(1)),
            );
        }
    }

    // --- File operations ---

    pub fn save(&mut self) {
        match persistence::save_deck(&self.deck, &self.deck_path) {
            Ok(()) => {
                self.has_unsaved_changes = false;
                let text = format!("Presentation saved to {}", self.deck_path.display());
                self.notify(NoticeLevel::Info, text);
            }
            Err(e) => self.notify(NoticeLevel::Error, format!("Error saving presentation: {}", e)),
        }
    }

    /// Replace the deck with the one stored at `deck_path`. On failure the
    /// current deck stays as it was.
    pub fn load(&mut self) {
        let loaded = match persistence::load_deck(&self.deck_path, self.decoder.as_ref()) {
            Ok(loaded) => loaded,
            Err(e) => {
                self.notify(NoticeLevel::Error, format!("Error loading presentation: {}", e));
                return;
            }
        };

        self.deck = loaded.deck;
        self.thumbnails.clear();
        for (path, thumb) in loaded.thumbnails {
            self.thumbnails.insert(path, thumb);
        }
        self.summarize.clear_pending();
        self.has_unsaved_changes = false;

        for skipped in &loaded.skipped_images {
            let text = format!(
                "Slide {}: image {} was left out ({})",
                skipped.slide_index + 1,
                skipped.path.display(),
                skipped.error
            );
            self.notify(NoticeLevel::Warning, text);
        }
        self.notify(NoticeLevel::Info, "Presentation loaded");
        self.request_redraw();
    }

    /// Returns `true`; unsaved changes only produce a warning.
    pub fn quit(&mut self) -> bool {
        if self.has_unsaved_changes {
            self.notify(NoticeLevel::Warning, "Quitting with unsaved changes");
        }
        true
    }

    // --- Summarization ---

    pub fn request_summary(&mut self) {
        let slide = self.deck.current();
        let slide_id = slide.id;
        let text = slide.content.trim().to_string();

        if text.is_empty() {
            self.notify(NoticeLevel::Warning, "There is no text on this slide to summarize");
            return;
        }
        if self.summarize.is_pending(slide_id) {
            self.notify(NoticeLevel::Info, "A summary for this slide is already on its way");
            return;
        }

        match self.summarize.start(slide_id, text, self.sender.clone()) {
            Ok(()) => self.request_redraw(),
            Err(e) => self.notify(NoticeLevel::Warning, e.to_string()),
        }
    }

    /// Write a finished summary back, but only onto the slide that asked for
    /// it, only while that slide is still in focus, and only if its text is
    /// still what was summarized.
    pub fn summary_ready(&mut self, slide_id: SlideId, result: Result<String, String>) {
        let Some(source) = self.summarize.finish(slide_id) else {
            debug!(slide = slide_id.0, "Ignoring summary nobody is waiting for");
            return;
        };

        let summary = match result {
            Ok(summary) => summary,
            Err(e) => {
                self.notify(NoticeLevel::Error, format!("Summarization failed: {}", e));
                self.request_redraw();
                return;
            }
        };

        if self.deck.current_id() != slide_id {
            if self.deck.slide_by_id(slide_id).is_some() {
                info!(slide = slide_id.0, "Slide no longer in focus; discarding summary");
            } else {
                info!(slide = slide_id.0, "Slide was deleted; discarding summary");
            }
            self.request_redraw();
            return;
        }

        if self.deck.current().content.trim() != source {
            self.notify(
                NoticeLevel::Info,
                "Slide text changed while summarizing; summary discarded",
            );
            self.request_redraw();
            return;
        }

        self.deck.set_current_content(summary);
        self.mark_dirty();
        self.request_redraw();
    }
}
