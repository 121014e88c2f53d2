use serde::{Deserialize, Serialize};
use std::fmt;

use crate::util::case::is_blank;

/// Location in a document: 0-based line and column, both counted in `char`s.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
pub struct Position {
    /// 0-based line number.
    pub line: usize,
    /// 0-based column within the line.
    pub column: usize,
}

impl Position {
    /// Construct a position.
    pub const fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line + 1, self.column + 1)
    }
}

/// Ordered span between two positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Range {
    /// Inclusive start.
    pub start: Position,
    /// Exclusive end.
    pub end: Position,
}

impl Range {
    /// Build a range, swapping the ends if needed.
    pub fn new(a: Position, b: Position) -> Self {
        if a <= b {
            Self { start: a, end: b }
        } else {
            Self { start: b, end: a }
        }
    }

    /// Whether the range covers no text.
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

/// Selection with a fixed anchor and a moving active end (the cursor).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Selection {
    /// End that stays put while extending.
    pub anchor: Position,
    /// End that moves; this is the cursor.
    pub active: Position,
}

impl Selection {
    /// Selection spanning `anchor` to `active`.
    pub const fn new(anchor: Position, active: Position) -> Self {
        Self { anchor, active }
    }

    /// Empty selection at `position`.
    pub const fn caret(position: Position) -> Self {
        Self::new(position, position)
    }

    /// Whether nothing is selected.
    pub fn is_empty(&self) -> bool {
        self.anchor == self.active
    }

    /// Earlier of the two ends.
    pub fn start(&self) -> Position {
        self.anchor.min(self.active)
    }

    /// Later of the two ends.
    pub fn end(&self) -> Position {
        self.anchor.max(self.active)
    }

    /// The selected span.
    pub fn range(&self) -> Range {
        Range::new(self.anchor, self.active)
    }

    /// Same span with anchor and active exchanged.
    pub fn swapped(&self) -> Self {
        Self::new(self.active, self.anchor)
    }
}

/// Native cursor moves a surface provides.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CursorMotion {
    /// One character back, wrapping to the previous line.
    Left,
    /// One character forward, wrapping to the next line.
    Right,
    /// One line up, keeping the column where possible.
    Up,
    /// One line down, keeping the column where possible.
    Down,
    /// Column 0 of the line.
    LineStart,
    /// End of the line.
    LineEnd,
    /// First non-blank character of the line.
    LineFirstNonBlank,
    /// Just past the last non-blank character of the line.
    LineLastNonBlank,
    /// Next blank line.
    NextBlankLine,
    /// Previous blank line.
    PreviousBlankLine,
}

/// Which way a host find action searches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FindDirection {
    /// Towards the end of the document.
    Next,
    /// Towards the start of the document.
    Previous,
}

/// Editable text supplied by the host.
///
/// Queries are synchronous. Mutations are `async` so hosts whose edits
/// complete later can be awaited; the player never issues the next call
/// before the previous one has finished. Failures are reported through
/// [`TextSurface::Error`] and absorbed by the player.
#[allow(async_fn_in_trait)]
pub trait TextSurface {
    /// Error type surfaced by host mutations.
    type Error: fmt::Display;

    /// Current selection.
    fn selection(&self) -> Selection;
    /// Number of lines (at least 1).
    fn line_count(&self) -> usize;
    /// Text of `line` without its terminator.
    fn line_text(&self, line: usize) -> Option<String>;
    /// Text covered by `range`.
    fn text_in(&self, range: Range) -> String;
    /// Range of the word touching `position`, if any.
    fn word_range_at(&self, position: Position) -> Option<Range>;
    /// Clipboard contents, if any.
    fn read_clipboard(&self) -> Option<String>;

    /// Replace the selection.
    async fn set_selection(&mut self, selection: Selection) -> Result<(), Self::Error>;
    /// Replace `range` with `text` as one edit (an empty range inserts).
    async fn replace(&mut self, range: Range, text: &str) -> Result<(), Self::Error>;
    /// Overwrite the clipboard.
    async fn write_clipboard(&mut self, text: &str) -> Result<(), Self::Error>;
    /// Apply a native cursor move `count` times, extending when `select`.
    async fn move_cursor(
        &mut self,
        motion: CursorMotion,
        count: usize,
        select: bool,
    ) -> Result<(), Self::Error>;
    /// Run the host's find-next or find-previous action.
    async fn find(&mut self, direction: FindDirection) -> Result<(), Self::Error>;

    /// Full range of the line containing `position`.
    fn line_range_at(&self, position: Position) -> Option<Range> {
        let text = self.line_text(position.line)?;
        Some(Range::new(
            Position::new(position.line, 0),
            Position::new(position.line, text.chars().count()),
        ))
    }

    /// Character offset of `position`, counting each line break as one.
    fn offset_at(&self, position: Position) -> usize {
        let mut offset = 0;
        for line in 0..position.line.min(self.line_count()) {
            offset += self.line_text(line).map_or(0, |text| text.chars().count()) + 1;
        }
        offset + position.column
    }

    /// Position of a character offset, clamped to the end of the document.
    fn position_at(&self, offset: usize) -> Position {
        let mut remaining = offset;
        let last = self.line_count().saturating_sub(1);
        for line in 0..=last {
            let length = self.line_text(line).map_or(0, |text| text.chars().count());
            if remaining <= length || line == last {
                return Position::new(line, remaining.min(length));
            }
            remaining -= length + 1;
        }
        Position::default()
    }

    /// Range of the line containing `position`, without outer blanks.
    fn trimmed_line_range_at(&self, position: Position) -> Option<Range> {
        let text = self.line_text(position.line)?;
        let chars: Vec<char> = text.chars().collect();
        let leading = chars.iter().take_while(|ch| is_blank(**ch)).count();
        let trailing = chars[leading..]
            .iter()
            .rev()
            .take_while(|ch| is_blank(**ch))
            .count();
        Some(Range::new(
            Position::new(position.line, leading),
            Position::new(position.line, chars.len() - trailing),
        ))
    }
}
