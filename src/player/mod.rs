//! Macro player.
//!
//! The [`Player`] replays a compiled [`Program`](crate::language::Program)
//! against any [`TextSurface`] the host supplies, one operation at a time.
//! It keeps a position stack, a text stack, and a pause point between
//! calls, so a macro can stop at `pause` and continue on the next play.

/// In-memory surface for tools and tests.
pub mod memory;
/// Cursor moves resolved by the player.
pub mod motion;
/// Player state machine.
pub mod runtime;
/// Host capability trait and position types.
pub mod surface;

pub use memory::{MemorySurface, MemorySurfaceError};
pub use runtime::{PlayOutcome, Player, PlayerSnapshot};
pub use surface::{CursorMotion, FindDirection, Position, Range, Selection, TextSurface};
