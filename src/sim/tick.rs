//! Fixed timestep simulation tick
//!
//! Order within a tick:
//! 1. one-shot inputs (start, click)
//! 2. deferred transitions due this tick
//! 3. duck motion and exit handling (only while playing)
//! 4. watchers: spawn controller, reload grace

use super::actions;
use super::duck::DuckExit;
use super::schedule::Deferred;
use super::spawn;
use super::state::{DogReaction, GameEvent, GameState, GameStatus};
use crate::consts::*;
use crate::wallet::MINT_DONE_MESSAGE;

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Start/retry pressed
    pub start: bool,
    /// Trigger pulled this tick
    pub shoot: bool,
    /// Duck under the crosshair when `shoot` is set
    pub target: Option<u32>,
    /// Idle/demo mode - AI plays free demo rounds (no attempts spent)
    pub idle_mode: bool,
}

/// Wall-clock time is only needed for `start` (it may stamp energy depletion)
pub fn tick(state: &mut GameState, input: &TickInput, now_ms: i64) {
    let mut input = input.clone();
    let demo_start = input.idle_mode && idle_input(state, &mut input);

    if input.start {
        actions::start(state, now_ms);
    } else if demo_start {
        actions::start_demo(state);
    }
    if input.shoot {
        actions::click(state, input.target);
    }

    state.time_ticks += 1;

    for event in state.scheduler.take_due(state.time_ticks) {
        apply_deferred(state, event);
    }

    if state.status == GameStatus::Playing {
        advance_duck(state);
    }

    settle(state);
}

/// Re-evaluate the state watchers. Runs after every tick and every input.
pub fn settle(state: &mut GameState) {
    spawn::update(state);
    watch_reload(state);
}

/// Out of shells with the duck still flying: it leaves after the reload grace
fn watch_reload(state: &mut GameState) {
    if state.ammo > 0 {
        return;
    }
    let Some(duck) = state.duck.as_mut() else {
        return;
    };
    if !duck.is_alive() || duck.fly_away_pending {
        return;
    }
    duck.fly_away_pending = true;
    let duck_id = duck.id;
    state.defer(RELOAD_GRACE_MS, Deferred::DuckFliesAway { duck_id });
}

fn apply_deferred(state: &mut GameState, event: Deferred) {
    match event {
        Deferred::DuckFalls { duck_id } => {
            if state.duck_mut(duck_id).is_some_and(|d| d.start_falling()) {
                state.emit(GameEvent::DuckFalling { id: duck_id });
            }
        }
        Deferred::DuckFliesAway { duck_id } => {
            if state.duck_mut(duck_id).is_some_and(|d| d.fly_away()) {
                log::debug!("Duck {} flying away", duck_id);
                state.emit(GameEvent::DuckFlewAway { id: duck_id });
            }
        }
        Deferred::ShowDog { reaction, round } => {
            if round == state.round && state.status == GameStatus::Playing {
                state.show_dog(reaction);
            }
        }
        Deferred::HideDog { appearance } => {
            if appearance == state.dog_appearance {
                state.dog = DogReaction::None;
            }
        }
        Deferred::MintCompletes => {
            // Refill and back to the title; score and level stay on display
            // until the next start resets them
            if state.wallet.finish_mint() {
                state.energy.refill();
                state.duck = None;
                state.demo = false;
                state.status = GameStatus::Start;
                state.message = Some(MINT_DONE_MESSAGE.to_string());
                log::info!("Mint complete, attempts refilled");
                state.emit(GameEvent::Minted);
            }
        }
    }
}

fn advance_duck(state: &mut GameState) {
    let flutter = state.flutter_chance;
    let Some(duck) = state.duck.as_mut() else {
        return;
    };
    let Some(exit) = duck.advance(flutter, &mut state.rng) else {
        return;
    };
    let id = duck.id;
    state.duck = None;
    match exit {
        DuckExit::Landed => duck_landed(state, id),
        DuckExit::Escaped => duck_escaped(state, id),
    }
}

fn duck_landed(state: &mut GameState, id: u32) {
    state.ducks_hit += 1;
    let points = POINTS_PER_LEVEL * state.level as u64;
    state.score += points;
    state.emit(GameEvent::DuckLanded { id, points });

    if state.ducks_hit % DUCKS_PER_LEVEL == 0 {
        state.level += 1;
        log::info!("Level up: {}", state.level);
        let level = state.level;
        state.emit(GameEvent::LevelUp { level });
    }
    state.show_dog(DogReaction::Happy);
}

fn duck_escaped(state: &mut GameState, id: u32) {
    state.lives = state.lives.saturating_sub(1);
    state.emit(GameEvent::DuckEscaped { id });

    if state.lives == 0 {
        state.status = GameStatus::GameOver;
        log::info!("Game over, final score {}", state.score);
        let score = state.score;
        state.emit(GameEvent::GameOver { score });
    } else {
        let round = state.round;
        state.defer(
            LAUGH_DELAY_MS,
            Deferred::ShowDog {
                reaction: DogReaction::Laughing,
                round,
            },
        );
    }
}

/// Demo player: asks for a free demo round off the title or game over
/// screen (returns true) and takes aimed shots at a steady cadence. Every
/// fourth duck gets shots at empty sky instead.
fn idle_input(state: &GameState, input: &mut TickInput) -> bool {
    const SHOT_INTERVAL_TICKS: u64 = 45;

    match state.status {
        GameStatus::Start | GameStatus::GameOver => !state.wallet.is_minting,
        GameStatus::Playing => {
            // A real round belongs to the player
            let Some(duck) = state.duck.as_ref().filter(|_| state.demo) else {
                return false;
            };
            let on_screen = duck.pos.x >= 0.0 && duck.pos.x <= GAME_WIDTH - DUCK_SIZE;
            if duck.is_alive() && on_screen && state.time_ticks % SHOT_INTERVAL_TICKS == 0 {
                input.shoot = true;
                input.target = (duck.id % 4 != 0).then_some(duck.id);
            }
            false
        }
    }
}
