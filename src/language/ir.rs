use serde::{Deserialize, Serialize};

use crate::util::case;

/// What an operation does.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OperationKind {
    /// Move the cursor (optionally extending the selection).
    Move,
    /// Insert or replace with literal text.
    InsertText,
    /// Copy a range to the clipboard.
    Copy,
    /// Insert or replace with the clipboard contents.
    Paste,
    /// Select the word or line under the cursor.
    Select,
    /// Delete the current selection.
    Delete,
    /// Exchange the anchor and active ends of the selection.
    SwapSelection,
    /// Run the host's find-next or find-previous action.
    Find,
    /// Collapse the selection to one of its ends.
    Deselect,
    /// Remember the cursor position.
    PushPosition,
    /// Return to the most recently remembered position.
    PopPosition,
    /// Remember the text of a range.
    PushText,
    /// Insert the most recently remembered text.
    PopText,
    /// Suspend the run; the next play resumes after this operation.
    Pause,
    /// End the run.
    Return,
    /// Convert the selected text.
    CaseConversion,
}

/// Unit or range an operation applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Target {
    /// Single character.
    Character,
    /// Whole line.
    Line,
    /// Line without leading and trailing blanks.
    TrimmedLine,
    /// Blank line (paragraph boundary).
    EmptyLine,
    /// Word under the cursor.
    Word,
    /// Current selection.
    Selection,
    /// Pattern searched towards the end of the document.
    ForwardMatch,
    /// Pattern searched towards the start of the document.
    BackwardMatch,
}

/// Direction or anchor of a movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MoveKind {
    /// One unit forward (right / down).
    Increment,
    /// One unit backward (left / up).
    Decrement,
    /// Start of the target.
    Start,
    /// End of the target.
    End,
    /// Next target.
    Next,
    /// Previous target.
    Previous,
    /// Absolute character offset forward.
    Forward,
    /// Absolute character offset backward.
    Backward,
    /// N-th occurrence of a pattern, scanning line by line.
    MatchInLine,
}

/// Named text conversion applied to a selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CaseConversion {
    /// `lower case`
    Lower,
    /// `UPPER CASE`
    Upper,
    /// `Title Case`
    Title,
    /// `camelCase`
    Camel,
    /// Flip every letter.
    Toggle,
    /// `member.syntax`
    MemberSyntax,
    /// `kebab-syntax`
    KebabSyntax,
    /// `snake_syntax`
    SnakeSyntax,
    /// `splitByCase` → `split By Case`
    SplitByCase,
    /// `a.b/c` → `a b c`
    RemovePunctuation,
}

impl CaseConversion {
    /// Apply the conversion to `text`.
    pub fn apply(self, text: &str) -> String {
        match self {
            CaseConversion::Lower => text.to_lowercase(),
            CaseConversion::Upper => text.to_uppercase(),
            CaseConversion::Title => case::title_case(text),
            CaseConversion::Camel => case::camel_case(text),
            CaseConversion::Toggle => case::toggle_case(text),
            CaseConversion::MemberSyntax => {
                case::programming_syntax(text, case::MEMBER_SEPARATOR)
            }
            CaseConversion::KebabSyntax => case::programming_syntax(text, case::KEBAB_SEPARATOR),
            CaseConversion::SnakeSyntax => case::programming_syntax(text, case::SNAKE_SEPARATOR),
            CaseConversion::SplitByCase => case::split_by_case(text),
            CaseConversion::RemovePunctuation => case::remove_punctuation(text),
        }
    }
}

/// Payload of an operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "kebab-case")]
pub enum Value {
    /// Repeat count, always at least 1.
    Count(usize),
    /// Literal text for [`OperationKind::InsertText`].
    Text(String),
    /// Pattern and occurrence for [`MoveKind::MatchInLine`].
    Match {
        /// Literal text to search for.
        pattern: String,
        /// Which occurrence on the matching line (1-based).
        occurrence: usize,
    },
}

impl Value {
    /// Repeat count carried by the value; non-count values count once.
    pub fn count(&self) -> usize {
        match self {
            Value::Count(count) => (*count).max(1),
            Value::Text(_) | Value::Match { .. } => 1,
        }
    }

    /// Literal text, if the value carries any.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Value::Text(text) => Some(text),
            _ => None,
        }
    }
}

impl Default for Value {
    fn default() -> Self {
        Value::Count(1)
    }
}

/// One compiled instruction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Operation {
    /// What the operation does.
    pub kind: OperationKind,
    /// Unit or range the operation applies to, when relevant.
    pub target: Option<Target>,
    /// Direction of a move (also used by find and deselect).
    pub movement: Option<MoveKind>,
    /// Count, literal text or match pattern.
    pub value: Value,
    /// Conversion to apply, for [`OperationKind::CaseConversion`].
    pub case_conversion: Option<CaseConversion>,
    /// Extend the selection instead of collapsing it.
    pub select: bool,
    /// 1-based line in the macro source.
    pub source_line: usize,
}

impl Operation {
    /// A bare operation of `kind` compiled from `source_line`.
    pub fn new(kind: OperationKind, source_line: usize) -> Self {
        Self {
            kind,
            target: None,
            movement: None,
            value: Value::default(),
            case_conversion: None,
            select: false,
            source_line,
        }
    }

    /// An [`OperationKind::InsertText`] operation carrying `text`.
    pub fn insert_text(text: impl Into<String>, source_line: usize) -> Self {
        Self {
            value: Value::Text(text.into()),
            ..Self::new(OperationKind::InsertText, source_line)
        }
    }

    /// Repeat count of the operation.
    pub fn count(&self) -> usize {
        self.value.count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn remove_punctuation_routes_to_punctuation_stripping() {
        assert_eq!(
            CaseConversion::RemovePunctuation.apply("a.b/c-d_e"),
            "a b c d e"
        );
        assert_eq!(CaseConversion::SplitByCase.apply("camelCase"), "camel Case");
    }

    #[test]
    fn counts_are_never_zero() {
        assert_eq!(Value::Count(0).count(), 1);
        assert_eq!(Value::Text("x".into()).count(), 1);
        assert_eq!(Value::Count(4).count(), 4);
    }

    #[test]
    fn operations_serialize_with_kebab_names() {
        let mut op = Operation::new(OperationKind::Move, 3);
        op.target = Some(Target::TrimmedLine);
        op.movement = Some(MoveKind::Start);
        let json = serde_json::to_value(&op).unwrap();
        assert_eq!(json["kind"], "move");
        assert_eq!(json["target"], "trimmed-line");
        assert_eq!(json["value"]["type"], "count");
        let back: Operation = serde_json::from_value(json).unwrap();
        assert_eq!(back, op);
    }
}
