//! Duck Hunt - A single-screen duck shooting arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (duck motion, hit/status machine, spawning, progression)
//! - `energy`: Session attempts gate with wall-clock recovery
//! - `wallet`: Simulated wallet connect + mint refill
//! - `session`: Owning session context, input events and read-only snapshots
//! - `platform`: Fixed timestep frame driver
//! - `persistence`: Key/value storage backends
//! - `clock`: Wall-clock sources and countdown formatting

pub mod clock;
pub mod energy;
pub mod persistence;
pub mod platform;
pub mod session;
pub mod settings;
pub mod sim;
pub mod snapshot;
pub mod wallet;

#[cfg(target_arch = "wasm32")]
pub mod web;

pub use session::Session;
pub use settings::Settings;
pub use snapshot::{DuckView, Snapshot};

/// Game configuration constants
pub mod consts {
    /// Fixed simulation rate. Duck speeds are expressed in pixels per tick.
    pub const SIM_HZ: u32 = 60;
    /// Fixed simulation timestep in seconds
    pub const SIM_DT: f32 = 1.0 / SIM_HZ as f32;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Play area dimensions (pixels)
    pub const GAME_WIDTH: f32 = 800.0;
    pub const GAME_HEIGHT: f32 = 600.0;
    pub const GRASS_HEIGHT: f32 = 120.0;
    pub const DUCK_SIZE: f32 = 60.0;

    /// Per-round resources
    pub const INITIAL_LIVES: u8 = 3;
    pub const INITIAL_AMMO: u8 = 3;

    /// Session energy
    pub const MAX_ATTEMPTS: u8 = 3;
    /// 3 hours
    pub const RECOVERY_TIME_SECS: u64 = 10_800;

    /// Scoring
    pub const POINTS_PER_LEVEL: u64 = 100;
    pub const DUCKS_PER_LEVEL: u32 = 5;

    /// Duck motion (pixels/tick)
    pub const BASE_DUCK_SPEED: f32 = 3.0;
    pub const SPEED_PER_LEVEL: f32 = 0.5;
    pub const FALL_SPEED: f32 = 12.0;
    pub const ASCENT_SPEED: f32 = 10.0;
    pub const CEILING_BOUNCE: f32 = 0.8;
    pub const FLUTTER_CHANCE: f32 = 0.02;
    /// How far past the side edges a duck may fly before it counts as escaped
    pub const ESCAPE_MARGIN: f32 = 100.0;
    /// Landing line sits this far above the grass
    pub const LANDING_OFFSET: f32 = 30.0;

    /// Deferred transition delays (milliseconds)
    pub const HIT_TO_FALL_MS: u32 = 400;
    pub const RELOAD_GRACE_MS: u32 = 300;
    pub const LAUGH_DELAY_MS: u32 = 100;
    pub const DOG_REACTION_MS: u32 = 2200;
    pub const SPAWN_DELAY_MS: u32 = 600;
    pub const MINT_DELAY_MS: u32 = 2000;

    /// Energy poll cadence (seconds)
    pub const ENERGY_POLL_SECS: f32 = 1.0;
}

/// Convert a delay in milliseconds to whole simulation ticks (rounded up)
#[inline]
pub fn ms_to_ticks(ms: u32) -> u64 {
    let ms = ms as u64;
    let hz = consts::SIM_HZ as u64;
    (ms * hz).div_ceil(1000)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_delays_are_whole_ticks() {
        assert_eq!(ms_to_ticks(consts::HIT_TO_FALL_MS), 24);
        assert_eq!(ms_to_ticks(consts::RELOAD_GRACE_MS), 18);
        assert_eq!(ms_to_ticks(consts::LAUGH_DELAY_MS), 6);
        assert_eq!(ms_to_ticks(consts::DOG_REACTION_MS), 132);
        assert_eq!(ms_to_ticks(consts::SPAWN_DELAY_MS), 36);
        assert_eq!(ms_to_ticks(consts::MINT_DELAY_MS), 120);
    }

    #[test]
    fn test_partial_tick_rounds_up() {
        assert_eq!(ms_to_ticks(1), 1);
        assert_eq!(ms_to_ticks(0), 0);
    }
}
