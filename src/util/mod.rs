//! Shared helpers that carry no editor state.

/// Case and identifier-syntax conversions applied to selected text.
pub mod case;
