//! Keyword tables for the macro language.
//!
//! Word 0 of an instruction line is looked up in the operation table, word 1
//! in the move table. Both tables are built once and shared.

use std::collections::HashMap;
use std::sync::OnceLock;

use super::ir::{CaseConversion, MoveKind, Operation, OperationKind, Target};

static KEYWORDS: OnceLock<Keywords> = OnceLock::new();

/// Fields an operation keyword sets on a fresh operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OperationPreset {
    /// Operation kind.
    pub kind: OperationKind,
    /// Preset target, if the keyword implies one (`copy-word`).
    pub target: Option<Target>,
    /// Preset direction, if the keyword implies one (`find-next`).
    pub movement: Option<MoveKind>,
    /// Preset conversion for case-conversion keywords.
    pub case_conversion: Option<CaseConversion>,
}

impl OperationPreset {
    const fn kind(kind: OperationKind) -> Self {
        Self {
            kind,
            target: None,
            movement: None,
            case_conversion: None,
        }
    }

    const fn with_target(kind: OperationKind, target: Target) -> Self {
        Self {
            target: Some(target),
            ..Self::kind(kind)
        }
    }

    const fn with_move(kind: OperationKind, movement: MoveKind) -> Self {
        Self {
            movement: Some(movement),
            ..Self::kind(kind)
        }
    }

    const fn conversion(conversion: CaseConversion) -> Self {
        Self {
            case_conversion: Some(conversion),
            ..Self::kind(OperationKind::CaseConversion)
        }
    }

    /// Whether a move keyword may follow. Only `move` takes one.
    pub fn takes_movement(&self) -> bool {
        self.kind == OperationKind::Move
    }

    /// Write the preset into `operation`.
    pub fn apply(&self, operation: &mut Operation) {
        operation.kind = self.kind;
        if self.target.is_some() {
            operation.target = self.target;
        }
        if self.movement.is_some() {
            operation.movement = self.movement;
        }
        if self.case_conversion.is_some() {
            operation.case_conversion = self.case_conversion;
        }
    }
}

/// Fields a move keyword sets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MovePreset {
    /// Unit being moved over.
    pub target: Target,
    /// Direction of the move.
    pub movement: MoveKind,
}

impl MovePreset {
    /// Whether the rest of the line carries a `[pattern]` and an occurrence.
    pub fn takes_pattern(&self) -> bool {
        self.movement == MoveKind::MatchInLine
    }

    /// Write the preset into `operation`.
    pub fn apply(&self, operation: &mut Operation) {
        operation.target = Some(self.target);
        operation.movement = Some(self.movement);
    }
}

/// Both keyword tables.
#[derive(Debug)]
pub struct Keywords {
    operations: HashMap<&'static str, OperationPreset>,
    moves: HashMap<&'static str, MovePreset>,
}

impl Keywords {
    /// The shared keyword tables.
    pub fn global() -> &'static Keywords {
        KEYWORDS.get_or_init(Keywords::builtin)
    }

    /// Look up an operation keyword.
    pub fn operation(&self, word: &str) -> Option<&OperationPreset> {
        self.operations.get(word)
    }

    /// Look up a move keyword.
    pub fn movement(&self, word: &str) -> Option<&MovePreset> {
        self.moves.get(word)
    }

    /// All operation keywords, sorted.
    pub fn operation_keywords(&self) -> Vec<&'static str> {
        let mut words: Vec<_> = self.operations.keys().copied().collect();
        words.sort_unstable();
        words
    }

    /// All move keywords, sorted.
    pub fn move_keywords(&self) -> Vec<&'static str> {
        let mut words: Vec<_> = self.moves.keys().copied().collect();
        words.sort_unstable();
        words
    }

    fn builtin() -> Self {
        use OperationKind as K;

        let operations = HashMap::from([
            ("move", OperationPreset::kind(K::Move)),
            ("copy", OperationPreset::kind(K::Copy)),
            ("copy-word", OperationPreset::with_target(K::Copy, Target::Word)),
            ("copy-line", OperationPreset::with_target(K::Copy, Target::Line)),
            (
                "copy-trimmed-line",
                OperationPreset::with_target(K::Copy, Target::TrimmedLine),
            ),
            ("paste", OperationPreset::kind(K::Paste)),
            ("delete", OperationPreset::kind(K::Delete)),
            ("select-word", OperationPreset::with_target(K::Select, Target::Word)),
            ("select-line", OperationPreset::with_target(K::Select, Target::Line)),
            (
                "select-trimmed-line",
                OperationPreset::with_target(K::Select, Target::TrimmedLine),
            ),
            ("swap-selection", OperationPreset::kind(K::SwapSelection)),
            ("find-next", OperationPreset::with_move(K::Find, MoveKind::Next)),
            (
                "find-previous",
                OperationPreset::with_move(K::Find, MoveKind::Previous),
            ),
            (
                "deselect-start",
                OperationPreset::with_move(K::Deselect, MoveKind::Start),
            ),
            (
                "deselect-end",
                OperationPreset::with_move(K::Deselect, MoveKind::End),
            ),
            ("push-position", OperationPreset::kind(K::PushPosition)),
            ("pop-position", OperationPreset::kind(K::PopPosition)),
            (
                "push-text",
                OperationPreset::with_target(K::PushText, Target::Selection),
            ),
            ("push-word", OperationPreset::with_target(K::PushText, Target::Word)),
            ("push-line", OperationPreset::with_target(K::PushText, Target::Line)),
            (
                "push-trimmed-line",
                OperationPreset::with_target(K::PushText, Target::TrimmedLine),
            ),
            ("pop-text", OperationPreset::kind(K::PopText)),
            ("pause", OperationPreset::kind(K::Pause)),
            ("return", OperationPreset::kind(K::Return)),
            ("lower-case", OperationPreset::conversion(CaseConversion::Lower)),
            ("upper-case", OperationPreset::conversion(CaseConversion::Upper)),
            ("title-case", OperationPreset::conversion(CaseConversion::Title)),
            ("camel-case", OperationPreset::conversion(CaseConversion::Camel)),
            ("toggle-case", OperationPreset::conversion(CaseConversion::Toggle)),
            (
                "member-syntax",
                OperationPreset::conversion(CaseConversion::MemberSyntax),
            ),
            (
                "kebab-syntax",
                OperationPreset::conversion(CaseConversion::KebabSyntax),
            ),
            (
                "snake-syntax",
                OperationPreset::conversion(CaseConversion::SnakeSyntax),
            ),
            (
                "split-by-case",
                OperationPreset::conversion(CaseConversion::SplitByCase),
            ),
            (
                "remove-punctuation",
                OperationPreset::conversion(CaseConversion::RemovePunctuation),
            ),
        ]);

        let preset = |target, movement| MovePreset { target, movement };
        let moves = HashMap::from([
            ("left", preset(Target::Character, MoveKind::Decrement)),
            ("right", preset(Target::Character, MoveKind::Increment)),
            ("up", preset(Target::Line, MoveKind::Decrement)),
            ("down", preset(Target::Line, MoveKind::Increment)),
            ("word-start", preset(Target::Word, MoveKind::Start)),
            ("word-end", preset(Target::Word, MoveKind::End)),
            ("start-line", preset(Target::Line, MoveKind::Start)),
            ("end-line", preset(Target::Line, MoveKind::End)),
            ("start-trimmed-line", preset(Target::TrimmedLine, MoveKind::Start)),
            ("end-trimmed-line", preset(Target::TrimmedLine, MoveKind::End)),
            ("next-word", preset(Target::Word, MoveKind::Next)),
            ("previous-word", preset(Target::Word, MoveKind::Previous)),
            ("next-empty-line", preset(Target::EmptyLine, MoveKind::Next)),
            ("previous-empty-line", preset(Target::EmptyLine, MoveKind::Previous)),
            ("forward", preset(Target::Character, MoveKind::Forward)),
            ("backward", preset(Target::Character, MoveKind::Backward)),
            (
                "match-in-line-forward",
                preset(Target::ForwardMatch, MoveKind::MatchInLine),
            ),
            (
                "match-in-line-backward",
                preset(Target::BackwardMatch, MoveKind::MatchInLine),
            ),
        ]);

        Self { operations, moves }
    }
}
