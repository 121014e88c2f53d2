use serde::{Deserialize, Serialize};

use crate::language::{MoveKind, Operation, OperationKind, Program, Target};

use super::motion;
use super::surface::{FindDirection, Position, Range, Selection, TextSurface};

/// How a call to [`Player::play`] ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlayOutcome {
    /// Every remaining operation ran (or the program was empty).
    Completed,
    /// A `return` operation ended the run.
    Returned,
    /// A `pause` operation at `index` suspended the run.
    Paused {
        /// Index of the pause operation in the program.
        index: usize,
    },
}

impl PlayOutcome {
    /// Whether the next play resumes where this one stopped.
    pub fn is_suspended(&self) -> bool {
        matches!(self, PlayOutcome::Paused { .. })
    }
}

/// Serializable copy of a player's session state.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerSnapshot {
    /// Remembered cursor positions, bottom first.
    pub position_stack: Vec<Position>,
    /// Remembered text snippets, bottom first.
    pub text_stack: Vec<String>,
    /// Index of the pause operation a suspended run stopped at.
    pub pause_index: Option<usize>,
    /// Digest of the program that was suspended.
    pub paused_digest: Option<String>,
}

/// Replays compiled programs against a [`TextSurface`].
///
/// A player owns the session state of one editing surface: the position
/// stack, the text stack, and the pause point. Hosts that drive several
/// surfaces keep one player per surface.
#[derive(Debug, Default)]
pub struct Player {
    position_stack: Vec<Position>,
    text_stack: Vec<String>,
    pause_index: Option<usize>,
    paused_digest: Option<String>,
}

impl Player {
    /// Create a player with empty session state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Run `program` until it completes, returns, or pauses.
    ///
    /// A fresh run (no pause pending) clears both stacks and starts at the
    /// first operation. A pending pause for the same program resumes right
    /// after the pause operation, keeping the stacks. Operations that cannot
    /// take effect, and surface failures, are skipped.
    pub async fn play<S: TextSurface>(
        &mut self,
        surface: &mut S,
        program: &Program,
    ) -> PlayOutcome {
        if program.is_empty() {
            return PlayOutcome::Completed;
        }
        if self.pause_index.is_some() && self.paused_digest.as_deref() != Some(program.digest()) {
            tracing::debug!("pending pause belongs to another program");
            self.reset_pause();
        }

        let start = match self.pause_index.take() {
            Some(index) => {
                self.paused_digest = None;
                tracing::debug!(resume_at = index + 1, "resuming paused macro");
                index + 1
            }
            None => {
                self.position_stack.clear();
                self.text_stack.clear();
                0
            }
        };

        for (index, operation) in program.operations().iter().enumerate().skip(start) {
            tracing::debug!(
                index,
                kind = ?operation.kind,
                line = operation.source_line,
                "executing operation"
            );
            match operation.kind {
                OperationKind::Pause => {
                    self.pause_index = Some(index);
                    self.paused_digest = Some(program.digest().to_string());
                    tracing::info!(index, line = operation.source_line, "macro paused");
                    return PlayOutcome::Paused { index };
                }
                OperationKind::Return => {
                    tracing::info!(index, line = operation.source_line, "macro returned");
                    return PlayOutcome::Returned;
                }
                _ => {
                    if let Err(err) = self.execute(surface, operation).await {
                        tracing::warn!(
                            index,
                            line = operation.source_line,
                            kind = ?operation.kind,
                            error = %err,
                            "operation failed; continuing"
                        );
                    }
                }
            }
        }

        tracing::info!(operations = program.len(), "macro completed");
        PlayOutcome::Completed
    }

    /// Forget a pending pause so the next play starts from the beginning.
    pub fn reset_pause(&mut self) {
        self.pause_index = None;
        self.paused_digest = None;
    }

    /// Index of the pause operation a suspended run stopped at.
    pub fn pause_index(&self) -> Option<usize> {
        self.pause_index
    }

    /// Remembered cursor positions, bottom first.
    pub fn position_stack(&self) -> &[Position] {
        &self.position_stack
    }

    /// Remembered text snippets, bottom first.
    pub fn text_stack(&self) -> &[String] {
        &self.text_stack
    }

    /// Capture the current session state.
    pub fn snapshot(&self) -> PlayerSnapshot {
        PlayerSnapshot {
            position_stack: self.position_stack.clone(),
            text_stack: self.text_stack.clone(),
            pause_index: self.pause_index,
            paused_digest: self.paused_digest.clone(),
        }
    }

    /// Restore a player from a previously captured snapshot.
    pub fn from_snapshot(snapshot: PlayerSnapshot) -> Self {
        Self {
            position_stack: snapshot.position_stack,
            text_stack: snapshot.text_stack,
            pause_index: snapshot.pause_index,
            paused_digest: snapshot.paused_digest,
        }
    }

    async fn execute<S: TextSurface>(
        &mut self,
        surface: &mut S,
        operation: &Operation,
    ) -> Result<(), S::Error> {
        match operation.kind {
            OperationKind::Move => motion::apply(surface, operation).await,
            OperationKind::InsertText => match operation.value.as_text() {
                Some(text) => insert_or_replace(surface, text).await,
                None => Ok(()),
            },
            OperationKind::Copy => {
                match target_range(surface, operation.target) {
                    Some(range) if !range.is_empty() => {
                        let text = surface.text_in(range);
                        surface.write_clipboard(&text).await
                    }
                    _ => Ok(()),
                }
            }
            OperationKind::Paste => match surface.read_clipboard() {
                Some(text) if !text.is_empty() => insert_or_replace(surface, &text).await,
                _ => Ok(()),
            },
            OperationKind::Select => match target_range(surface, operation.target) {
                Some(range) => {
                    surface
                        .set_selection(Selection::new(range.start, range.end))
                        .await
                }
                None => Ok(()),
            },
            OperationKind::Delete => {
                let selection = surface.selection();
                if selection.is_empty() {
                    return Ok(());
                }
                surface.replace(selection.range(), "").await
            }
            OperationKind::SwapSelection => {
                let selection = surface.selection();
                if selection.is_empty() {
                    return Ok(());
                }
                surface.set_selection(selection.swapped()).await
            }
            OperationKind::Find => {
                let direction = match operation.movement {
                    Some(MoveKind::Previous) => FindDirection::Previous,
                    _ => FindDirection::Next,
                };
                for _ in 0..operation.count() {
                    surface.find(direction).await?;
                }
                Ok(())
            }
            OperationKind::Deselect => {
                let selection = surface.selection();
                if selection.is_empty() {
                    return Ok(());
                }
                let to = match operation.movement {
                    Some(MoveKind::End) => selection.end(),
                    _ => selection.start(),
                };
                surface.set_selection(Selection::caret(to)).await
            }
            OperationKind::PushPosition => {
                self.position_stack.push(surface.selection().active);
                Ok(())
            }
            OperationKind::PopPosition => {
                let Some(position) = self.position_stack.pop() else {
                    return Ok(());
                };
                let selection = if operation.select {
                    Selection::new(surface.selection().active, position)
                } else {
                    Selection::caret(position)
                };
                surface.set_selection(selection).await
            }
            OperationKind::PushText => {
                if let Some(range) = target_range(surface, operation.target) {
                    self.text_stack.push(surface.text_in(range));
                }
                Ok(())
            }
            OperationKind::PopText => match self.text_stack.pop() {
                Some(text) => insert_or_replace(surface, &text).await,
                None => Ok(()),
            },
            OperationKind::CaseConversion => {
                let selection = surface.selection();
                let Some(conversion) = operation.case_conversion else {
                    return Ok(());
                };
                if selection.is_empty() {
                    return Ok(());
                }
                let range = selection.range();
                let converted = conversion.apply(&surface.text_in(range));
                surface.replace(range, &converted).await?;
                let end = end_of_inserted(range.start, &converted);
                surface.set_selection(Selection::new(range.start, end)).await
            }
            // Handled by the play loop.
            OperationKind::Pause | OperationKind::Return => Ok(()),
        }
    }
}

/// Insert at the cursor, or replace the selection when there is one.
async fn insert_or_replace<S: TextSurface>(surface: &mut S, text: &str) -> Result<(), S::Error> {
    let selection = surface.selection();
    let range = if selection.is_empty() {
        Range::new(selection.active, selection.active)
    } else {
        selection.range()
    };
    surface.replace(range, text).await
}

/// Range an operation's target refers to; no target means the selection.
fn target_range<S: TextSurface>(surface: &S, target: Option<Target>) -> Option<Range> {
    let cursor = surface.selection().active;
    match target {
        None | Some(Target::Selection) => Some(surface.selection().range()),
        Some(Target::Word) => surface.word_range_at(cursor),
        Some(Target::Line) => surface.line_range_at(cursor),
        Some(Target::TrimmedLine) => surface.trimmed_line_range_at(cursor),
        Some(_) => None,
    }
}

/// Position just past `text` when it is inserted at `start`.
fn end_of_inserted(start: Position, text: &str) -> Position {
    let mut lines = text.split('\n');
    let first = lines.next().unwrap_or_default();
    match lines.last() {
        None => Position::new(start.line, start.column + first.chars().count()),
        Some(last) => Position::new(
            start.line + text.matches('\n').count(),
            last.trim_end_matches('\r').chars().count(),
        ),
    }
}
