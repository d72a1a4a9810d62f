//! Spawn controller
//!
//! A duck is released once the field has been empty, with no dog on screen,
//! for `SPAWN_DELAY_MS` of uninterrupted play. Any interruption restarts the wait.

use glam::Vec2;
use rand::Rng;

use super::duck::{Duck, DuckColor};
use super::state::{DogReaction, GameEvent, GameState, GameStatus};
use crate::consts::*;
use crate::ms_to_ticks;

/// Which edge the duck enters from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Left,
    Right,
}

/// Field is ready for a new duck
pub fn ready_for_duck(state: &GameState) -> bool {
    state.status == GameStatus::Playing && state.duck.is_none() && state.dog == DogReaction::None
}

/// Horizontal speed for a level (pixels/tick)
pub fn speed_for_level(level: u32) -> f32 {
    BASE_DUCK_SPEED + SPEED_PER_LEVEL * level as f32
}

/// Roll a new duck for `level`
pub fn roll_duck<R: Rng>(id: u32, level: u32, rng: &mut R) -> Duck {
    let side = if rng.random_bool(0.5) {
        Side::Left
    } else {
        Side::Right
    };
    let x = match side {
        Side::Left => -DUCK_SIZE,
        Side::Right => GAME_WIDTH,
    };
    let y = GAME_HEIGHT - GRASS_HEIGHT - 120.0 - rng.random::<f32>() * 200.0;
    let speed = speed_for_level(level);
    let vx = match side {
        Side::Left => speed,
        Side::Right => -speed,
    };
    let vy = -(rng.random::<f32>() * 2.0 + 1.5);
    let color = DuckColor::ALL[rng.random_range(0..DuckColor::ALL.len())];

    Duck::new(id, Vec2::new(x, y), Vec2::new(vx, vy), color)
}

/// Put a fresh duck in the slot. Refills ammo and clears the dog.
pub fn spawn_duck(state: &mut GameState) {
    let id = state.next_duck_id();
    let level = state.level;
    let duck = roll_duck(id, level, &mut state.rng);
    log::debug!(
        "Spawned duck {} at ({:.0}, {:.0}) vel ({:.1}, {:.1})",
        id,
        duck.pos.x,
        duck.pos.y,
        duck.vel.x,
        duck.vel.y
    );
    state.duck = Some(duck);
    state.ammo = INITIAL_AMMO;
    state.dog = DogReaction::None;
    state.spawn_due = None;
    state.emit(GameEvent::DuckSpawned { id });
}

/// Arm, disarm or fire the spawn timer
pub fn update(state: &mut GameState) {
    if !ready_for_duck(state) {
        state.spawn_due = None;
        return;
    }
    match state.spawn_due {
        None => state.spawn_due = Some(state.time_ticks + ms_to_ticks(SPAWN_DELAY_MS)),
        Some(due) if state.time_ticks >= due => spawn_duck(state),
        Some(_) => {}
    }
}
