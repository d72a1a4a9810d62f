//! Read-only view of the session for the presentation layer
//!
//! Built fresh after every tick and input. Serializes to JSON for the web shell.

use serde::Serialize;

use crate::clock::format_countdown;
use crate::sim::{DogReaction, DuckStatus, GameEvent, GameState, GameStatus};

/// Countdown turns urgent (blinks) below this many seconds
pub const URGENT_COUNTDOWN_SECS: u64 = 60;

/// Render data for the active duck
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DuckView {
    pub id: u32,
    pub x: f32,
    pub y: f32,
    pub status: DuckStatus,
    pub color: &'static str,
    pub facing_right: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Snapshot {
    pub status: GameStatus,
    /// Attract-mode round, shown with a DEMO banner
    pub demo: bool,
    pub score: u64,
    pub lives: u8,
    pub ammo: u8,
    pub level: u32,
    pub ducks_hit: u32,
    pub dog: DogReaction,
    pub session_attempts: u8,
    pub last_lives_depleted_ms: Option<i64>,
    pub seconds_until_recovery: Option<u64>,
    /// `HH:MM:SS` form of `seconds_until_recovery`
    pub recovery_countdown: Option<String>,
    pub countdown_urgent: bool,
    pub wallet_address: Option<String>,
    pub is_minting: bool,
    pub message: Option<String>,
    pub duck: Option<DuckView>,
    /// "Out of ammo, reloading" banner
    pub reloading: bool,
    /// Wing whistle should be audible
    pub whistle: bool,
}

impl Snapshot {
    pub fn capture(state: &GameState) -> Self {
        let countdown = state.energy.countdown_secs;
        let playing = state.status == GameStatus::Playing;
        let duck = state.duck.as_ref().map(|d| DuckView {
            id: d.id,
            x: d.pos.x,
            y: d.pos.y,
            status: d.status,
            color: d.color.hex(),
            facing_right: d.facing_right(),
        });
        let whistle = playing
            && duck
                .as_ref()
                .is_some_and(|d| matches!(d.status, DuckStatus::Alive | DuckStatus::FlyingAway));

        Self {
            status: state.status,
            demo: state.demo,
            score: state.score,
            lives: state.lives,
            ammo: state.ammo,
            level: state.level,
            ducks_hit: state.ducks_hit,
            dog: state.dog,
            session_attempts: state.energy.attempts,
            last_lives_depleted_ms: state.energy.depleted_at_ms,
            seconds_until_recovery: countdown,
            recovery_countdown: countdown.map(format_countdown),
            countdown_urgent: countdown.is_some_and(|s| s < URGENT_COUNTDOWN_SECS),
            wallet_address: state.wallet.address.clone(),
            is_minting: state.wallet.is_minting,
            message: state.message.clone(),
            reloading: playing && state.ammo == 0 && duck.is_some(),
            whistle,
            duck,
        }
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_default()
    }
}

/// Serialize drained events for the presentation layer
pub fn events_to_json(events: &[GameEvent]) -> String {
    serde_json::to_string(events).unwrap_or_else(|_| "[]".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::energy::{Energy, EnergyRecord};
    use crate::sim::{actions, spawn::spawn_duck};

    fn state() -> GameState {
        GameState::new(5, Energy::from_record(EnergyRecord::default(), 0))
    }

    #[test]
    fn test_title_snapshot() {
        let snap = Snapshot::capture(&state());
        assert_eq!(snap.status, GameStatus::Start);
        assert_eq!(snap.session_attempts, 3);
        assert!(snap.duck.is_none());
        assert!(!snap.whistle);
        assert!(!snap.reloading);
        assert_eq!(snap.recovery_countdown, None);
    }

    #[test]
    fn test_reloading_and_whistle_flags() {
        let mut s = state();
        actions::start(&mut s, 0);
        spawn_duck(&mut s);
        let snap = Snapshot::capture(&s);
        assert!(snap.whistle);
        assert!(!snap.reloading);

        s.ammo = 0;
        let snap = Snapshot::capture(&s);
        assert!(snap.reloading);
        assert_eq!(snap.duck.unwrap().color, s.duck.as_ref().unwrap().color.hex());
    }

    #[test]
    fn test_countdown_formatting() {
        let mut s = state();
        s.energy.attempts = 0;
        s.energy.depleted_at_ms = Some(0);
        s.energy.poll(10_800_000 - 59_000, 10_800);
        let snap = Snapshot::capture(&s);
        assert_eq!(snap.seconds_until_recovery, Some(59));
        assert_eq!(snap.recovery_countdown.as_deref(), Some("00:00:59"));
        assert!(snap.countdown_urgent);
    }

    #[test]
    fn test_events_json() {
        let mut s = state();
        actions::start(&mut s, 0);
        actions::shoot(&mut s);
        let json = events_to_json(&s.drain_events());
        assert!(json.starts_with('['));
        assert!(json.contains(r#"{"Started":{"attempts_left":2}}"#));
        assert!(json.contains("Shot"));
        assert_eq!(events_to_json(&s.drain_events()), "[]");
    }

    #[test]
    fn test_snapshot_json_names() {
        let json = Snapshot::capture(&state()).to_json();
        assert!(json.contains("\"status\":\"Start\""));
        assert!(json.contains("\"session_attempts\":3"));
    }
}
