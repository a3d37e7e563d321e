use std::path::PathBuf;

use super::navigation::{Direction, Navigation};
use super::slide::SlideId;

/// All messages that can be sent to the control thread.
/// Front-end input becomes one of these; the dispatch loop in main handles them.
#[derive(Debug, Clone)]
pub enum Message {
    // Deck
    AddSlide,
    DeleteSlide,
    RenameSlide(String),
    MoveSlide(Direction),
    Navigate(Navigation),

    // View
    Refresh,

    // Edit
    ContentEdited(String),
    AddImage(PathBuf),
    RemoveImage(usize),

    // File
    Save,
    Load,
    Quit,

    // AI
    Summarize,

    // Background results
    SummaryReady {
        slide_id: SlideId,
        result: Result<String, String>,
    },
}
