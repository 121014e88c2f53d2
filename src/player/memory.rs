//! In-memory [`TextSurface`] used by the CLI and by tests.

use thiserror::Error;

use super::surface::{CursorMotion, FindDirection, Position, Range, Selection, TextSurface};
use crate::util::case::is_blank;

/// Errors raised by [`MemorySurface`] mutations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MemorySurfaceError {
    /// A position lies outside the document.
    #[error("position {0} is outside the document")]
    OutOfBounds(Position),
}

/// A document held as lines of text, with a selection and a clipboard.
///
/// Words are runs of alphanumeric characters and `_`. Find actions search
/// for the selected text, or the word under the cursor when nothing is
/// selected, wrapping around the document.
#[derive(Debug, Clone)]
pub struct MemorySurface {
    lines: Vec<String>,
    crlf: bool,
    selection: Selection,
    clipboard: Option<String>,
}

impl MemorySurface {
    /// Load `text` with the cursor at the start of the document.
    pub fn new(text: &str) -> Self {
        let crlf = text.contains("\r\n");
        let lines = text
            .split('\n')
            .map(|line| line.strip_suffix('\r').unwrap_or(line).to_string())
            .collect();
        Self {
            lines,
            crlf,
            selection: Selection::default(),
            clipboard: None,
        }
    }

    /// Builder-style cursor placement (clamped into the document).
    pub fn with_cursor(mut self, position: Position) -> Self {
        self.selection = Selection::caret(self.clamp(position));
        self
    }

    /// Builder-style selection (both ends clamped into the document).
    pub fn with_selection(mut self, selection: Selection) -> Self {
        self.selection = Selection::new(self.clamp(selection.anchor), self.clamp(selection.active));
        self
    }

    /// Builder-style clipboard contents.
    pub fn with_clipboard(mut self, text: impl Into<String>) -> Self {
        self.clipboard = Some(text.into());
        self
    }

    /// Document text, using the line ending it was loaded with.
    pub fn text(&self) -> String {
        self.lines.join(if self.crlf { "\r\n" } else { "\n" })
    }

    fn line_length(&self, line: usize) -> usize {
        self.lines.get(line).map_or(0, |text| text.chars().count())
    }

    fn last_line(&self) -> usize {
        self.lines.len().saturating_sub(1)
    }

    fn clamp(&self, position: Position) -> Position {
        let line = position.line.min(self.last_line());
        Position::new(line, position.column.min(self.line_length(line)))
    }

    fn check(&self, position: Position) -> Result<(), MemorySurfaceError> {
        if position.line < self.lines.len() && position.column <= self.line_length(position.line) {
            Ok(())
        } else {
            Err(MemorySurfaceError::OutOfBounds(position))
        }
    }

    fn step(&self, from: Position, motion: CursorMotion) -> Position {
        let length = self.line_length(from.line);
        match motion {
            CursorMotion::Left if from.column > 0 => Position::new(from.line, from.column - 1),
            CursorMotion::Left if from.line > 0 => {
                Position::new(from.line - 1, self.line_length(from.line - 1))
            }
            CursorMotion::Right if from.column < length => {
                Position::new(from.line, from.column + 1)
            }
            CursorMotion::Right if from.line < self.last_line() => Position::new(from.line + 1, 0),
            CursorMotion::Up if from.line > 0 => {
                self.clamp(Position::new(from.line - 1, from.column))
            }
            CursorMotion::Down if from.line < self.last_line() => {
                self.clamp(Position::new(from.line + 1, from.column))
            }
            CursorMotion::LineStart => Position::new(from.line, 0),
            CursorMotion::LineEnd => Position::new(from.line, length),
            CursorMotion::LineFirstNonBlank | CursorMotion::LineLastNonBlank => {
                let range = self
                    .trimmed_line_range_at(from)
                    .unwrap_or(Range::new(from, from));
                if motion == CursorMotion::LineFirstNonBlank {
                    range.start
                } else {
                    range.end
                }
            }
            CursorMotion::NextBlankLine => (from.line + 1..self.lines.len())
                .find(|line| self.is_blank_line(*line))
                .map(|line| Position::new(line, 0))
                .unwrap_or_else(|| {
                    Position::new(self.last_line(), self.line_length(self.last_line()))
                }),
            CursorMotion::PreviousBlankLine => (0..from.line)
                .rev()
                .find(|line| self.is_blank_line(*line))
                .map(|line| Position::new(line, 0))
                .unwrap_or_default(),
            _ => from,
        }
    }

    fn is_blank_line(&self, line: usize) -> bool {
        self.lines
            .get(line)
            .is_some_and(|text| text.chars().all(is_blank))
    }

    /// Whole document joined with `\n`, so offsets match [`TextSurface::offset_at`].
    fn flat_text(&self) -> String {
        self.lines.join("\n")
    }

    fn search_term(&self) -> Option<String> {
        let range = if self.selection.is_empty() {
            self.word_range_at(self.selection.active)?
        } else {
            self.selection.range()
        };
        let term = self.text_in(range);
        (!term.is_empty()).then_some(term)
    }
}

fn is_word_char(ch: char) -> bool {
    ch.is_alphanumeric() || ch == '_'
}

fn char_to_byte(text: &str, offset: usize) -> usize {
    text.char_indices()
        .nth(offset)
        .map_or(text.len(), |(index, _)| index)
}

impl TextSurface for MemorySurface {
    type Error = MemorySurfaceError;

    fn selection(&self) -> Selection {
        self.selection
    }

    fn line_count(&self) -> usize {
        self.lines.len()
    }

    fn line_text(&self, line: usize) -> Option<String> {
        self.lines.get(line).cloned()
    }

    fn text_in(&self, range: Range) -> String {
        let start = self.offset_at(self.clamp(range.start));
        let end = self.offset_at(self.clamp(range.end));
        self.flat_text()
            .chars()
            .skip(start)
            .take(end.saturating_sub(start))
            .collect::<String>()
            .replace('\n', if self.crlf { "\r\n" } else { "\n" })
    }

    fn word_range_at(&self, position: Position) -> Option<Range> {
        let chars: Vec<char> = self.lines.get(position.line)?.chars().collect();
        let column = position.column.min(chars.len());
        let mut start = column;
        while start > 0 && is_word_char(chars[start - 1]) {
            start -= 1;
        }
        let mut end = column;
        while end < chars.len() && is_word_char(chars[end]) {
            end += 1;
        }
        (start < end).then(|| {
            Range::new(
                Position::new(position.line, start),
                Position::new(position.line, end),
            )
        })
    }

    fn read_clipboard(&self) -> Option<String> {
        self.clipboard.clone()
    }

    async fn set_selection(&mut self, selection: Selection) -> Result<(), Self::Error> {
        self.check(selection.anchor)?;
        self.check(selection.active)?;
        self.selection = selection;
        Ok(())
    }

    async fn replace(&mut self, range: Range, text: &str) -> Result<(), Self::Error> {
        self.check(range.start)?;
        self.check(range.end)?;
        let first = &self.lines[range.start.line];
        let last = &self.lines[range.end.line];
        let prefix = &first[..char_to_byte(first, range.start.column)];
        let suffix = &last[char_to_byte(last, range.end.column)..];
        let joined = format!("{prefix}{text}{suffix}");
        let replacement: Vec<String> = joined
            .split('\n')
            .map(|line| line.strip_suffix('\r').unwrap_or(line).to_string())
            .collect();

        let inserted_lines = replacement.len();
        let suffix_length = suffix.chars().count();
        self.lines
            .splice(range.start.line..=range.end.line, replacement);

        let end_line = range.start.line + inserted_lines - 1;
        let cursor = Position::new(end_line, self.line_length(end_line) - suffix_length);
        self.selection = Selection::caret(cursor);
        Ok(())
    }

    async fn write_clipboard(&mut self, text: &str) -> Result<(), Self::Error> {
        self.clipboard = Some(text.to_string());
        Ok(())
    }

    async fn move_cursor(
        &mut self,
        motion: CursorMotion,
        count: usize,
        select: bool,
    ) -> Result<(), Self::Error> {
        let mut active = self.selection.active;
        for _ in 0..count.max(1) {
            active = self.step(active, motion);
        }
        let anchor = if select { self.selection.anchor } else { active };
        self.selection = Selection::new(anchor, active);
        Ok(())
    }

    async fn find(&mut self, direction: FindDirection) -> Result<(), Self::Error> {
        let Some(term) = self.search_term() else {
            return Ok(());
        };
        let text = self.flat_text();
        let term = term.replace("\r\n", "\n");
        let found = match direction {
            FindDirection::Next => {
                let from = char_to_byte(&text, self.offset_at(self.selection.end()));
                text[from..]
                    .find(&term)
                    .map(|index| from + index)
                    .or_else(|| text.find(&term))
            }
            FindDirection::Previous => {
                let until = char_to_byte(&text, self.offset_at(self.selection.start()));
                text[..until].rfind(&term).or_else(|| text.rfind(&term))
            }
        };
        if let Some(index) = found {
            let start = text[..index].chars().count();
            let end = start + term.chars().count();
            self.selection = Selection::new(self.position_at(start), self.position_at(end));
        }
        Ok(())
    }
}
