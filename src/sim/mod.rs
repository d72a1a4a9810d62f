//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only (delays are whole ticks)
//! - Seeded RNG only
//! - Wall-clock time is passed in, never read
//! - No rendering or platform dependencies

pub mod actions;
pub mod duck;
pub mod schedule;
pub mod spawn;
pub mod state;
pub mod tick;

pub use duck::{Duck, DuckColor, DuckExit, DuckStatus};
pub use schedule::{Deferred, Scheduler};
pub use state::{DogReaction, GameEvent, GameState, GameStatus};
pub use tick::{TickInput, settle, tick};
