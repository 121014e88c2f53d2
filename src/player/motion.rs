//! Cursor moves the player resolves itself.
//!
//! Simple directional steps are delegated to [`TextSurface::move_cursor`].
//! Word snapping, word stepping, absolute offsets, and match-in-line scans
//! have no native equivalent and are computed here from the surface's text.

use crate::language::{MoveKind, Operation, Target, Value};
use crate::util::case::is_blank;

use super::surface::{CursorMotion, Position, Selection, TextSurface};

/// Execute a `move` operation.
pub(crate) async fn apply<S: TextSurface>(
    surface: &mut S,
    operation: &Operation,
) -> Result<(), S::Error> {
    let (Some(target), Some(movement)) = (operation.target, operation.movement) else {
        tracing::debug!(line = operation.source_line, "move without direction");
        return Ok(());
    };
    let count = operation.count();
    let select = operation.select;

    match (target, movement) {
        (Target::Character, MoveKind::Increment) => {
            surface.move_cursor(CursorMotion::Right, count, select).await
        }
        (Target::Character, MoveKind::Decrement) => {
            surface.move_cursor(CursorMotion::Left, count, select).await
        }
        (Target::Line, MoveKind::Increment) => {
            surface.move_cursor(CursorMotion::Down, count, select).await
        }
        (Target::Line, MoveKind::Decrement) => {
            surface.move_cursor(CursorMotion::Up, count, select).await
        }
        (Target::Line, MoveKind::Start) => {
            surface.move_cursor(CursorMotion::LineStart, 1, select).await
        }
        (Target::Line, MoveKind::End) => {
            surface.move_cursor(CursorMotion::LineEnd, 1, select).await
        }
        (Target::TrimmedLine, MoveKind::Start) => {
            surface
                .move_cursor(CursorMotion::LineFirstNonBlank, 1, select)
                .await
        }
        (Target::TrimmedLine, MoveKind::End) => {
            surface
                .move_cursor(CursorMotion::LineLastNonBlank, 1, select)
                .await
        }
        (Target::EmptyLine, MoveKind::Next) => {
            for _ in 0..count {
                surface
                    .move_cursor(CursorMotion::NextBlankLine, 1, select)
                    .await?;
            }
            Ok(())
        }
        (Target::EmptyLine, MoveKind::Previous) => {
            for _ in 0..count {
                surface
                    .move_cursor(CursorMotion::PreviousBlankLine, 1, select)
                    .await?;
            }
            Ok(())
        }
        (Target::Word, MoveKind::Start) => snap_to_word(surface, true, select).await,
        (Target::Word, MoveKind::End) => snap_to_word(surface, false, select).await,
        (Target::Word, MoveKind::Next) => {
            for _ in 0..count {
                step_word(surface, false, select).await?;
            }
            Ok(())
        }
        (Target::Word, MoveKind::Previous) => {
            for _ in 0..count {
                step_word(surface, true, select).await?;
            }
            Ok(())
        }
        (_, MoveKind::Forward) => move_by_offset(surface, count as isize, select).await,
        (_, MoveKind::Backward) => move_by_offset(surface, -(count as isize), select).await,
        (Target::ForwardMatch | Target::BackwardMatch, MoveKind::MatchInLine) => {
            let Value::Match {
                pattern,
                occurrence,
            } = &operation.value
            else {
                return Ok(());
            };
            let backward = target == Target::BackwardMatch;
            match find_match_in_lines(surface, pattern, *occurrence, backward) {
                Some((start, end)) => {
                    let selection = if select {
                        Selection::new(start, end)
                    } else {
                        Selection::caret(start)
                    };
                    surface.set_selection(selection).await
                }
                None => Ok(()),
            }
        }
        (target, movement) => {
            tracing::debug!(?target, ?movement, "move combination has no effect");
            Ok(())
        }
    }
}

/// Place the active end at `to`, keeping the anchor when extending.
async fn move_active<S: TextSurface>(
    surface: &mut S,
    to: Position,
    select: bool,
) -> Result<(), S::Error> {
    let anchor = if select {
        surface.selection().anchor
    } else {
        to
    };
    surface.set_selection(Selection::new(anchor, to)).await
}

async fn snap_to_word<S: TextSurface>(
    surface: &mut S,
    start: bool,
    select: bool,
) -> Result<(), S::Error> {
    let cursor = surface.selection().active;
    match surface.word_range_at(cursor) {
        Some(range) => {
            let to = if start { range.start } else { range.end };
            move_active(surface, to, select).await
        }
        None => Ok(()),
    }
}

async fn step_word<S: TextSurface>(
    surface: &mut S,
    backward: bool,
    select: bool,
) -> Result<(), S::Error> {
    let cursor = surface.selection().active;
    let Some(text) = surface.line_text(cursor.line) else {
        return Ok(());
    };
    let starts = word_starts(&text);
    let column = if backward {
        starts.iter().rev().find(|start| **start < cursor.column)
    } else {
        starts.iter().find(|start| **start > cursor.column)
    };
    match column {
        Some(column) => move_active(surface, Position::new(cursor.line, *column), select).await,
        None => Ok(()),
    }
}

/// Columns where a blank-delimited word begins.
pub(crate) fn word_starts(line: &str) -> Vec<usize> {
    let mut starts = Vec::new();
    let mut previous_blank = true;
    for (column, ch) in line.chars().enumerate() {
        let blank = is_blank(ch);
        if previous_blank && !blank {
            starts.push(column);
        }
        previous_blank = blank;
    }
    starts
}

async fn move_by_offset<S: TextSurface>(
    surface: &mut S,
    delta: isize,
    select: bool,
) -> Result<(), S::Error> {
    let offset = surface.offset_at(surface.selection().active);
    let target = offset.saturating_add_signed(delta);
    let to = surface.position_at(target);
    move_active(surface, to, select).await
}

/// Scan lines from the cursor's line for the `occurrence`-th match.
///
/// Returns the start and end of the match on the first line that has
/// enough non-overlapping occurrences.
pub(crate) fn find_match_in_lines<S: TextSurface>(
    surface: &S,
    pattern: &str,
    occurrence: usize,
    backward: bool,
) -> Option<(Position, Position)> {
    if pattern.is_empty() {
        return None;
    }
    let first = surface.selection().active.line;
    let last = surface.line_count().saturating_sub(1);
    let lines: Box<dyn Iterator<Item = usize>> = if backward {
        Box::new((0..=first.min(last)).rev())
    } else {
        Box::new(first..=last)
    };
    let pattern_length = pattern.chars().count();
    for line in lines {
        let Some(text) = surface.line_text(line) else {
            continue;
        };
        if let Some(column) = nth_occurrence(&text, pattern, occurrence, backward) {
            return Some((
                Position::new(line, column),
                Position::new(line, column + pattern_length),
            ));
        }
    }
    None
}

/// Column of the `occurrence`-th non-overlapping match of `pattern` in `text`.
pub(crate) fn nth_occurrence(
    text: &str,
    pattern: &str,
    occurrence: usize,
    backward: bool,
) -> Option<usize> {
    let mut found = None;
    if backward {
        let mut until = text.len();
        for _ in 0..occurrence.max(1) {
            let index = text[..until].rfind(pattern)?;
            until = index;
            found = Some(index);
        }
    } else {
        let mut from = 0;
        for _ in 0..occurrence.max(1) {
            let index = from + text[from..].find(pattern)?;
            from = index + pattern.len();
            found = Some(index);
        }
    }
    found.map(|index| text[..index].chars().count())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finds_nth_occurrence_forward() {
        assert_eq!(nth_occurrence("abc abc abc", "abc", 2, false), Some(4));
        assert_eq!(nth_occurrence("abc abc abc", "abc", 4, false), None);
        assert_eq!(nth_occurrence("aaaa", "aa", 2, false), Some(2));
    }

    #[test]
    fn finds_nth_occurrence_backward() {
        assert_eq!(nth_occurrence("abc abc abc", "abc", 1, true), Some(8));
        assert_eq!(nth_occurrence("abc abc abc", "abc", 3, true), Some(0));
        assert_eq!(nth_occurrence("abc", "x", 1, true), None);
    }

    #[test]
    fn columns_count_characters() {
        assert_eq!(nth_occurrence("ééx", "x", 1, false), Some(2));
    }

    #[test]
    fn word_starts_skip_blank_runs() {
        assert_eq!(word_starts("  foo   bar\tbaz"), vec![2, 8, 12]);
        assert!(word_starts("   ").is_empty());
    }
}
