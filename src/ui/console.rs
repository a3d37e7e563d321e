//! Line-oriented front-end: turns typed commands into [`Message`]s and
//! renders the slide in focus as plain text.

use std::path::{Path, PathBuf};

use crate::app::domain::messages::Message;
use crate::app::domain::navigation::{Direction, Navigation};
use crate::app::state::{AppState, Notice, NoticeLevel};

pub const HELP: &str = "\
Commands:
  next | prev | first | last | goto <n>   move between slides
  add | delete | title <text>             manage slides
  up | down                               reorder the current slide
  edit <text>                             replace slide text (\\n for newline)
  image <path> | rmimage <n>              manage images
  summarize                               shorten the slide text with AI
  save | load                             write/read the presentation file
  show | help | quit";

#[derive(Debug, Clone)]
pub enum Command {
    Send(Message),
    Help,
}

/// Parse one input line. `Ok(None)` for a blank line.
pub fn parse_command(line: &str) -> Result<Option<Command>, String> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }
    let (verb, rest) = match line.split_once(char::is_whitespace) {
        Some((verb, rest)) => (verb, rest.trim()),
        None => (line, ""),
    };

    let msg = match verb.to_lowercase().as_str() {
        "next" | "n" => Message::Navigate(Navigation::Next),
        "prev" | "p" => Message::Navigate(Navigation::Previous),
        "first" => Message::Navigate(Navigation::First),
        "last" => Message::Navigate(Navigation::Last),
        "goto" => Message::Navigate(Navigation::Index(parse_position(rest)?)),
        "add" => Message::AddSlide,
        "delete" => Message::DeleteSlide,
        "title" => Message::RenameSlide(require_arg(verb, rest)?.to_string()),
        "up" => Message::MoveSlide(Direction::Earlier),
        "down" => Message::MoveSlide(Direction::Later),
        "edit" => Message::ContentEdited(rest.replace("\\n", "\n")),
        "image" => Message::AddImage(PathBuf::from(require_arg(verb, rest)?)),
        "rmimage" => Message::RemoveImage(parse_position(rest)?),
        "summarize" | "ai" => Message::Summarize,
        "save" => Message::Save,
        "load" => Message::Load,
        "quit" | "exit" => Message::Quit,
        "show" => Message::Refresh,
        "help" | "?" => return Ok(Some(Command::Help)),
        other => return Err(format!("Unknown command '{}'. Type 'help'.", other)),
    };
    Ok(Some(Command::Send(msg)))
}

fn require_arg<'a>(verb: &str, rest: &'a str) -> Result<&'a str, String> {
    if rest.is_empty() {
        Err(format!("'{}' needs an argument", verb))
    } else {
        Ok(rest)
    }
}

/// 1-based position as typed by the user, returned 0-based.
fn parse_position(arg: &str) -> Result<usize, String> {
    match arg.parse::<usize>() {
        Ok(n) if n >= 1 => Ok(n - 1),
        _ => Err(format!("'{}' is not a valid position (1, 2, 3, ...)", arg)),
    }
}

/// Render the slide in focus. Thumbnails missing from the cache are decoded
/// again on the way.
pub fn render_slide(state: &mut AppState) -> String {
    let paths: Vec<PathBuf> = state
        .deck
        .current()
        .image_paths()
        .map(Path::to_path_buf)
        .collect();
    let sizes: Vec<String> = paths
        .iter()
        .map(|path| {
            state
                .thumbnail(path)
                .map(|t| format!("{}x{}", t.width(), t.height()))
                .unwrap_or_else(|| "unreadable".to_string())
        })
        .collect();

    let deck = &state.deck;
    let slide = deck.current();
    let mut out = format!(
        "--- [{}/{}] {}{} ---\n",
        deck.current_index() + 1,
        deck.len(),
        slide.title,
        if state.is_dirty() { " *" } else { "" }
    );
    if slide.content.is_empty() {
        out.push_str("(no text)\n");
    } else {
        out.push_str(&slide.content);
        out.push('\n');
    }
    for (i, (path, size)) in paths.iter().zip(&sizes).enumerate() {
        out.push_str(&format!("  [image {}] {} ({})\n", i + 1, path.display(), size));
    }
    if state.summarize.is_pending(slide.id) {
        out.push_str("  (summarizing...)\n");
    }
    out
}

pub fn render_notice(notice: &Notice) -> String {
    let prefix = match notice.level {
        NoticeLevel::Info => "",
        NoticeLevel::Warning => "Warning: ",
        NoticeLevel::Error => "Error: ",
    };
    format!("{}{}", prefix, notice.text)
}
