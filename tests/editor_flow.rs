use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::mpsc::{self, Receiver};
use std::sync::Arc;
use std::time::Duration;

use image::{ImageBuffer, Rgba, RgbaImage};

use ferris_slides::app::{
    AppState, ImageCrateDecoder, Message, Navigation, NoticeLevel, SummarizeController,
    SummarizeError, Summarizer,
};

struct CountingSummarizer {
    calls: AtomicUsize,
}

impl Summarizer for CountingSummarizer {
    fn summarize(&self, text: &str, max_length: usize) -> Result<String, SummarizeError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(text.split_whitespace().take(max_length.min(2)).collect::<Vec<_>>().join(" "))
    }

    fn name(&self) -> &'static str {
        "counting"
    }
}

struct FailingSummarizer;

impl Summarizer for FailingSummarizer {
    fn summarize(&self, _text: &str, _max_length: usize) -> Result<String, SummarizeError> {
        Err(SummarizeError::Server {
            status: 500,
            message: "model crashed".to_string(),
        })
    }

    fn name(&self) -> &'static str {
        "failing"
    }
}

fn write_png(dir: &Path, name: &str) -> PathBuf {
    let path = dir.join(name);
    let img: RgbaImage = ImageBuffer::from_pixel(32, 48, Rgba([200, 100, 50, 255]));
    img.save(&path).unwrap();
    path
}

fn new_state(
    summarizer: Option<Arc<dyn Summarizer>>,
    deck_path: PathBuf,
) -> (AppState, Receiver<Message>) {
    let (tx, rx) = mpsc::channel();
    let state = AppState::new(
        Box::new(ImageCrateDecoder),
        SummarizeController::new(summarizer, 50),
        tx,
        deck_path,
    );
    (state, rx)
}

fn pump_one(state: &mut AppState, rx: &Receiver<Message>) {
    let msg = rx.recv_timeout(Duration::from_secs(5)).expect("no background result");
    state.handle(msg);
}

#[test]
fn test_save_then_load_round_trip_with_images() {
    let dir = tempfile::tempdir().unwrap();
    let deck_path = dir.path().join("presentation.json");
    let photo = write_png(dir.path(), "photo.png");

    let (mut state, _rx) = new_state(None, deck_path.clone());
    state.handle(Message::AddImage(photo.clone()));
    state.handle(Message::AddSlide);
    state.handle(Message::ContentEdited("Agenda\n- one\n- two".into()));
    state.handle(Message::RenameSlide("Agenda".into()));
    state.handle(Message::Save);
    assert!(!state.is_dirty());

    let (mut fresh, _rx2) = new_state(None, deck_path);
    fresh.handle(Message::Load);
    assert_eq!(fresh.deck.len(), 2);
    assert_eq!(fresh.deck.current_index(), 0);
    assert_eq!(fresh.deck.slides()[0].images[0].path, photo);
    assert_eq!(fresh.deck.slides()[1].title, "Agenda");
    assert_eq!(fresh.deck.slides()[1].content, "Agenda\n- one\n- two");

    let thumb = fresh.thumbnails.get(&photo).expect("thumbnail rebuilt on load");
    assert_eq!((thumb.width(), thumb.height()), (200, 200));
}

#[test]
fn test_load_with_missing_image_keeps_slide() {
    let dir = tempfile::tempdir().unwrap();
    let deck_path = dir.path().join("presentation.json");
    std::fs::write(
        &deck_path,
        r#"[{"title": "Gallery", "content": "Pictures", "images": ["/nowhere/lost.png"]}]"#,
    )
    .unwrap();

    let (mut state, _rx) = new_state(None, deck_path);
    state.handle(Message::Load);

    assert_eq!(state.deck.len(), 1);
    assert_eq!(state.deck.current().title, "Gallery");
    assert!(state.deck.current().images.is_empty());

    let notices = state.take_notices();
    assert!(notices.iter().any(|n| n.level == NoticeLevel::Warning && n.text.contains("lost.png")));
    assert!(notices.iter().any(|n| n.text == "Presentation loaded"));
}

#[test]
fn test_failed_load_leaves_deck_unchanged() {
    let dir = tempfile::tempdir().unwrap();
    let deck_path = dir.path().join("presentation.json");
    std::fs::write(&deck_path, "[{ broken").unwrap();

    let (mut state, _rx) = new_state(None, deck_path.clone());
    state.handle(Message::AddSlide);
    state.handle(Message::Load);
    assert_eq!(state.deck.len(), 2);
    assert_eq!(state.take_notices()[0].level, NoticeLevel::Error);

    std::fs::remove_file(&deck_path).unwrap();
    state.handle(Message::Load);
    assert_eq!(state.deck.len(), 2);
    assert_eq!(state.take_notices()[0].level, NoticeLevel::Error);
}

#[test]
fn test_summarize_empty_slide_never_calls_port() {
    let counting = Arc::new(CountingSummarizer {
        calls: AtomicUsize::new(0),
    });
    let (mut state, rx) = new_state(Some(counting.clone()), PathBuf::from("unused.json"));

    state.handle(Message::AddSlide);
    state.handle(Message::Summarize);
    state.handle(Message::ContentEdited("   \n ".into()));
    state.handle(Message::Summarize);

    assert!(rx.recv_timeout(Duration::from_millis(200)).is_err());
    assert_eq!(counting.calls.load(Ordering::SeqCst), 0);
    let notices = state.take_notices();
    assert_eq!(notices.len(), 2);
    assert!(notices.iter().all(|n| n.level == NoticeLevel::Warning));
}

#[test]
fn test_summarize_replaces_content_on_success() {
    let counting = Arc::new(CountingSummarizer {
        calls: AtomicUsize::new(0),
    });
    let (mut state, rx) = new_state(Some(counting.clone()), PathBuf::from("unused.json"));
    state.handle(Message::ContentEdited("Quarterly revenue grew strongly".into()));
    state.handle(Message::Summarize);
    // A second request while the first is in flight is refused
    state.handle(Message::Summarize);

    pump_one(&mut state, &rx);
    assert_eq!(state.deck.current().content, "Quarterly revenue");
    assert_eq!(counting.calls.load(Ordering::SeqCst), 1);
}

#[test]
fn test_summary_for_unfocused_slide_is_discarded() {
    let counting = Arc::new(CountingSummarizer {
        calls: AtomicUsize::new(0),
    });
    let (mut state, rx) = new_state(Some(counting), PathBuf::from("unused.json"));
    state.handle(Message::ContentEdited("Long opening remarks here".into()));
    state.handle(Message::Summarize);
    state.handle(Message::AddSlide);
    state.handle(Message::ContentEdited("Other slide".into()));

    pump_one(&mut state, &rx);
    assert_eq!(state.deck.current().content, "Other slide");
    state.handle(Message::Navigate(Navigation::First));
    assert_eq!(state.deck.current().content, "Long opening remarks here");
    assert!(state.can_summarize());
}

#[test]
fn test_edit_during_summary_keeps_new_text() {
    let counting = Arc::new(CountingSummarizer {
        calls: AtomicUsize::new(0),
    });
    let (mut state, rx) = new_state(Some(counting), PathBuf::from("unused.json"));
    state.handle(Message::ContentEdited("Old draft text here".into()));
    state.handle(Message::Summarize);
    // The result stays queued until pumped, so this edit lands first
    state.handle(Message::ContentEdited("User typed a brand new paragraph meanwhile".into()));
    state.take_notices();

    pump_one(&mut state, &rx);
    assert_eq!(
        state.deck.current().content,
        "User typed a brand new paragraph meanwhile"
    );
    let notices = state.take_notices();
    assert!(notices.iter().any(|n| n.level == NoticeLevel::Info && n.text.contains("discarded")));
    assert!(state.can_summarize());
}

#[test]
fn test_backend_failure_keeps_content() {
    let (mut state, rx) = new_state(Some(Arc::new(FailingSummarizer)), PathBuf::from("unused.json"));
    let before = state.deck.current().content.clone();
    state.handle(Message::Summarize);
    pump_one(&mut state, &rx);

    assert_eq!(state.deck.current().content, before);
    let notices = state.take_notices();
    assert!(notices.iter().any(|n| n.level == NoticeLevel::Error && n.text.contains("model crashed")));
}

#[test]
fn test_deck_never_empties_through_controller() {
    let (mut state, _rx) = new_state(None, PathBuf::from("unused.json"));
    for _ in 0..3 {
        state.handle(Message::AddSlide);
    }
    for _ in 0..10 {
        state.handle(Message::DeleteSlide);
        assert!(state.deck.len() >= 1);
        assert!(state.deck.current_index() < state.deck.len());
    }
    assert_eq!(state.deck.len(), 1);
}
