use std::collections::HashMap;
use std::sync::Arc;
use std::sync::mpsc::Sender;
use std::thread;

use tracing::{debug, error, info};

use crate::app::domain::messages::Message;
use crate::app::domain::slide::SlideId;
use crate::app::services::summarizer::{SummarizeError, Summarizer, summarize_checked};

/// Runs summaries off the control thread and tracks which slides are waiting
/// for one. Results come back as [`Message::SummaryReady`].
pub struct SummarizeController {
    summarizer: Option<Arc<dyn Summarizer>>,
    max_length: usize,
    /// Slide -> the exact text that was sent off for summarizing.
    pending: HashMap<SlideId, String>,
}

impl SummarizeController {
    pub fn new(summarizer: Option<Arc<dyn Summarizer>>, max_length: usize) -> Self {
        Self {
            summarizer,
            max_length,
            pending: HashMap::new(),
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.summarizer.is_some()
    }

    pub fn is_pending(&self, id: SlideId) -> bool {
        self.pending.contains_key(&id)
    }

    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    /// Start summarizing `text` for `slide_id` on a worker thread.
    ///
    /// The caller has already rejected empty input and a slide that is
    /// already pending.
    pub fn start(&mut self, slide_id: SlideId, text: String, sender: Sender<Message>) -> Result<(), SummarizeError> {
        let summarizer = self.summarizer.clone().ok_or(SummarizeError::Disabled)?;
        let max_length = self.max_length;
        self.pending.insert(slide_id, text.clone());
        info!(slide = slide_id.0, backend = summarizer.name(), "Summarize requested");

        let spawned = thread::Builder::new()
            .name("summarize".to_string())
            .spawn(move || {
                let result = summarize_checked(summarizer.as_ref(), &text, max_length)
                    .map_err(|e| e.to_string());
                if sender.send(Message::SummaryReady { slide_id, result }).is_err() {
                    debug!(slide = slide_id.0, "Control loop gone; dropping summary");
                }
            });

        if let Err(e) = spawned {
            error!("Failed to spawn summarize worker: {}", e);
            self.pending.remove(&slide_id);
            return Err(SummarizeError::Worker(e.to_string()));
        }
        Ok(())
    }

    /// Mark the request for `slide_id` as settled and hand back the text it
    /// was started with. `None` if nothing was pending for it.
    pub fn finish(&mut self, slide_id: SlideId) -> Option<String> {
        self.pending.remove(&slide_id)
    }

    /// Forget all pending requests, e.g. after a new deck was loaded.
    /// Results still in flight will find no matching slide and be discarded.
    pub fn clear_pending(&mut self) {
        self.pending.clear();
    }
}
