//! Macroscope – a macro language for programmatic text editing
//!
//! This crate implements:
//! - A line-oriented macro language compiled into typed editing operations,
//!   with per-line diagnostics for anything it does not understand
//! - A player that replays those operations against a host-supplied text
//!   surface, with a position stack, a text stack, and pause/resume
//! - Case and identifier-syntax conversions applied to selections
//!
//! ```
//! use macroscope::language::compile;
//! use macroscope::player::{MemorySurface, Player};
//!
//! let program = compile("move end-line\n[;]").into_program().unwrap();
//! let mut surface = MemorySurface::new("let x = 1");
//! let mut player = Player::new();
//! let outcome = tokio::runtime::Runtime::new()
//!     .unwrap()
//!     .block_on(player.play(&mut surface, &program));
//! assert!(!outcome.is_suspended());
//! assert_eq!(surface.text(), "let x = 1;");
//! ```

#![warn(missing_docs)]
#![warn(rust_2018_idioms)]

/// Engine configuration.
pub mod config;
/// Error types.
pub mod error;
/// Macro language: operation model, keywords, compiler.
pub mod language;
/// Player and the text surface it drives.
pub mod player;
/// Text conversion helpers.
pub mod util;

// Re-export key types for convenience
pub use config::MacroConfig;
pub use language::{Compilation, Compiler, Diagnostic, Operation, Program, compile};
pub use player::{PlayOutcome, Player, TextSurface};

/// Current version of macroscope
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
