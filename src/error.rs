//! Error types for macroscope
//!
//! Domain errors use thiserror; the CLI converts them with anyhow at its
//! boundary. Playing a macro never fails: runtime problems are absorbed by
//! the player, so there is no player error type here.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

use crate::language::Diagnostic;

/// Top-level error
#[derive(Debug, Error)]
pub enum MacroError {
    /// The macro source did not compile cleanly
    #[error("Compile error: {0}")]
    Compile(#[from] CompileError),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

/// Compilation produced diagnostics, so the program must not be played
#[derive(Debug, Error)]
pub enum CompileError {
    /// One or more lines were not understood
    #[error(
        "{} unrecognized token(s), first on line {}",
        .diagnostics.len(),
        first_line(.diagnostics)
    )]
    Rejected {
        /// Every diagnostic reported by the compile pass
        diagnostics: Vec<Diagnostic>,
    },
}

impl CompileError {
    /// Diagnostics carried by the error.
    pub fn diagnostics(&self) -> &[Diagnostic] {
        match self {
            CompileError::Rejected { diagnostics } => diagnostics,
        }
    }
}

fn first_line(diagnostics: &[Diagnostic]) -> usize {
    diagnostics.first().map(|d| d.line_number).unwrap_or(0)
}

/// Configuration file errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Config file not found
    #[error("Config file not found: {0}")]
    NotFound(PathBuf),

    /// Config value out of range
    #[error("Invalid config value: {0}")]
    Invalid(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// JSON error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Convenience result alias for config operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Result type using MacroError
pub type Result<T> = std::result::Result<T, MacroError>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::language::compile;

    #[test]
    fn rejected_compile_converts_to_top_level_error() {
        let rejected = compile("move left\nwobble")
            .into_program()
            .expect_err("diagnostics block loading");
        assert_eq!(rejected.diagnostics()[0].line_number, 2);
        assert_eq!(
            rejected.to_string(),
            "1 unrecognized token(s), first on line 2"
        );

        let err: MacroError = rejected.into();
        assert!(matches!(err, MacroError::Compile(_)));
    }
}
