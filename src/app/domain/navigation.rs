/// Cursor addressing for moving between slides.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Navigation {
    First,
    Last,
    Next,
    Previous,
    /// Absolute 0-based index; values past the end clamp to the last slide.
    Index(usize),
}

/// Direction for reordering the current slide.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Earlier,
    Later,
}
