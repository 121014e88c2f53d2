//! The macro language: operation model, keyword tables, and compiler.
//!
//! Macro source is line oriented. Each non-blank line compiles to one
//! [`Operation`]; lines the compiler does not understand still produce an
//! operation (so numbering stays aligned) plus a [`Diagnostic`]. A
//! [`Compilation`] with diagnostics must not be played.

/// Line compiler.
pub mod compiler;
/// Operation model.
pub mod ir;
/// Operation and move keyword tables.
pub mod keywords;

pub use compiler::{Compiler, compile};
pub use ir::{CaseConversion, MoveKind, Operation, OperationKind, Target, Value};
pub use keywords::{Keywords, MovePreset, OperationPreset};

use serde::{Deserialize, Serialize};

use crate::error::CompileError;

/// A source line the compiler did not understand.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    /// 1-based line number in the macro source.
    pub line_number: usize,
    /// The line as written.
    pub raw_line: String,
    /// The token that was not recognized.
    pub unrecognized_token: String,
}

impl std::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "line {}: unrecognized '{}' in '{}'",
            self.line_number, self.unrecognized_token, self.raw_line
        )
    }
}

/// Compiled macro: an immutable, ordered list of operations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Program {
    operations: Vec<Operation>,
    /// blake3 digest of the source the program was compiled from.
    digest: String,
}

impl Program {
    /// Wrap `operations` compiled from `source`.
    pub fn new(operations: Vec<Operation>, source: &str) -> Self {
        Self {
            operations,
            digest: blake3::hash(source.as_bytes()).to_hex().to_string(),
        }
    }

    /// The operations, in source order.
    pub fn operations(&self) -> &[Operation] {
        &self.operations
    }

    /// Digest identifying the source text.
    pub fn digest(&self) -> &str {
        &self.digest
    }

    /// Number of operations.
    pub fn len(&self) -> usize {
        self.operations.len()
    }

    /// Whether the program has no operations.
    pub fn is_empty(&self) -> bool {
        self.operations.is_empty()
    }
}

/// Result of one compile pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Compilation {
    /// Every operation produced, including partial ones from bad lines.
    pub program: Program,
    /// `None` when the program is safe to load.
    pub diagnostics: Option<Vec<Diagnostic>>,
}

impl Compilation {
    /// Whether the program may be handed to a player.
    pub fn is_loadable(&self) -> bool {
        self.diagnostics.is_none()
    }

    /// The program, or the diagnostics that block it.
    pub fn into_program(self) -> Result<Program, CompileError> {
        match self.diagnostics {
            None => Ok(self.program),
            Some(diagnostics) => Err(CompileError::Rejected { diagnostics }),
        }
    }
}
