#[cfg(not(target_os = "windows"))]
#[global_allocator]
static GLOBAL: tikv_jemallocator::Jemalloc = tikv_jemallocator::Jemalloc;

use std::io::{self, BufRead, Write};
use std::sync::mpsc;
use std::thread;

use tracing::{error, info, warn};

use ferris_slides::app::infrastructure::logging::init_logging;
use ferris_slides::app::services::summarizer::{build_summarizer, SummarizerConfig};
use ferris_slides::app::{AppSettings, AppState, ImageCrateDecoder, Message, SummarizeController};
use ferris_slides::ui::console::{parse_command, render_notice, render_slide, Command, HELP};

fn main() {
    // .env is optional; the process environment wins
    let _ = dotenvy::dotenv();
    init_logging();

    let settings = AppSettings::load();
    let config = SummarizerConfig::from_settings(&settings);
    info!(backend = settings.summarizer.display_name(), "Starting FerrisSlides");

    let summarizer = match build_summarizer(&config) {
        Ok(s) => s,
        Err(e) => {
            warn!("AI summarization unavailable: {}", e);
            None
        }
    };

    let (sender, receiver) = mpsc::channel::<Message>();
    let mut state = AppState::new(
        Box::new(ImageCrateDecoder),
        SummarizeController::new(summarizer, config.max_length),
        sender.clone(),
        settings.deck_path.clone(),
    );

    // Input thread: every typed command becomes a message on the same
    // channel the summarize workers report to.
    let input_sender = sender.clone();
    let spawned = thread::Builder::new().name("input".to_string()).spawn(move || {
        let stdin = io::stdin();
        for line in stdin.lock().lines() {
            let Ok(line) = line else { break };
            match parse_command(&line) {
                Ok(Some(Command::Send(msg))) => {
                    if input_sender.send(msg).is_err() {
                        break;
                    }
                }
                Ok(Some(Command::Help)) => println!("{}", HELP),
                Ok(None) => {}
                Err(e) => println!("{}", e),
            }
        }
        let _ = input_sender.send(Message::Quit);
    });
    if let Err(e) = spawned {
        error!("Failed to start input thread: {}", e);
        return;
    }
    drop(sender);

    println!("{}", HELP);
    redraw(&mut state);

    while let Ok(msg) = receiver.recv() {
        let quit = state.handle(msg);
        redraw(&mut state);
        if quit {
            break;
        }
    }
}

fn redraw(state: &mut AppState) {
    let mut out = io::stdout().lock();
    for notice in state.take_notices() {
        let _ = writeln!(out, "{}", render_notice(&notice));
    }
    if state.take_redraw() {
        let _ = write!(out, "{}", render_slide(state));
    }
    let _ = out.flush();
}
