//! Player input handlers
//!
//! Every guard failure is a silent no-op: the handler returns `false` and the
//! state is left exactly as it was.

use super::schedule::Deferred;
use super::state::{GameEvent, GameState, GameStatus};
use super::tick::settle;
use crate::consts::*;
use crate::wallet::MINT_PROMPT_MESSAGE;

/// Start (or retry) a round, spending one attempt. A running demo round is
/// taken over.
pub fn start(state: &mut GameState, now_ms: i64) -> bool {
    if state.status == GameStatus::Playing && !state.demo {
        log::debug!("Start ignored: round already running");
        return false;
    }
    if !state.energy.consume(now_ms) {
        log::debug!("Start ignored: no attempts left");
        return false;
    }

    state.reset_round();
    state.status = GameStatus::Playing;
    state.message = None;
    let attempts_left = state.energy.attempts;
    log::info!("Round started ({} attempts left)", attempts_left);
    state.emit(GameEvent::Started { attempts_left });
    settle(state);
    true
}

/// Start a free attract-mode round. Energy is never touched.
pub fn start_demo(state: &mut GameState) -> bool {
    if state.status == GameStatus::Playing {
        return false;
    }
    state.reset_round();
    state.status = GameStatus::Playing;
    state.demo = true;
    log::debug!("Demo round started");
    state.emit(GameEvent::DemoStarted);
    settle(state);
    true
}

/// Pull the trigger. Costs one shell whether or not anything was hit.
pub fn shoot(state: &mut GameState) -> bool {
    if !state.can_fire() {
        return false;
    }
    state.ammo = state.ammo.saturating_sub(1);
    let ammo_left = state.ammo;
    state.emit(GameEvent::Shot { ammo_left });
    settle(state);
    true
}

/// Register a hit on a specific duck. Does not spend ammo.
pub fn hit(state: &mut GameState, duck_id: u32) -> bool {
    if !state.can_fire() {
        return false;
    }
    let Some(duck) = state.duck_mut(duck_id) else {
        return false;
    };
    if !duck.mark_hit() {
        return false;
    }
    log::debug!("Duck {} hit", duck_id);
    state.emit(GameEvent::DuckHit { id: duck_id });
    state.defer(HIT_TO_FALL_MS, Deferred::DuckFalls { duck_id });
    settle(state);
    true
}

/// A click on the field: the targeted duck (if any) is resolved first, then
/// the shell is spent, both against the pre-click guard state.
pub fn click(state: &mut GameState, target: Option<u32>) -> bool {
    let hit_landed = target.is_some_and(|id| hit(state, id));
    let fired = shoot(state);
    hit_landed || fired
}

pub fn connect_wallet(state: &mut GameState) {
    state.wallet.connect();
}

/// Begin the simulated mint. Refill lands `MINT_DELAY_MS` later.
pub fn mint_lives(state: &mut GameState) -> bool {
    if !state.wallet.begin_mint() {
        log::debug!("Mint ignored: wallet missing or mint already running");
        return false;
    }
    log::info!("Mint started");
    state.message = Some(MINT_PROMPT_MESSAGE.to_string());
    state.defer(MINT_DELAY_MS, Deferred::MintCompletes);
    state.emit(GameEvent::MintStarted);
    true
}
