//! Session context
//!
//! Owns the game state together with its storage and wall clock. Every input
//! goes through here; after each one the energy record is written back if it
//! changed. The presentation layer only ever sees `Snapshot`s.

use crate::clock::Clock;
use crate::energy::{Energy, EnergyRecord, RESTORED_MESSAGE, Recovery};
use crate::persistence::KeyValueStore;
use crate::settings::Settings;
use crate::sim::{GameEvent, GameState, TickInput, actions, tick};
use crate::snapshot::Snapshot;

pub struct Session {
    state: GameState,
    store: Box<dyn KeyValueStore>,
    clock: Box<dyn Clock>,
    /// Last record written to the store
    persisted: EnergyRecord,
}

impl Session {
    /// Load energy from `store` and open on the title screen
    pub fn new(settings: &Settings, store: Box<dyn KeyValueStore>, clock: Box<dyn Clock>) -> Self {
        let now = clock.now_ms();
        let persisted = EnergyRecord::load(&*store);
        let energy = Energy::from_record(persisted, now);

        let seed = settings.seed_or(now as u64);
        let mut state = GameState::new(seed, energy);
        state.flutter_chance = settings.flutter_chance;
        state.recovery_secs = settings.recovery_secs;
        log::info!(
            "Session ready: seed {}, {} attempts",
            seed,
            state.energy.attempts
        );

        let mut session = Self {
            state,
            store,
            clock,
            persisted,
        };
        // Recovery may have finished while we were closed
        session.poll_energy();
        session.sync();
        session
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot::capture(&self.state)
    }

    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        self.state.drain_events()
    }

    pub fn start(&mut self) -> bool {
        let now = self.clock.now_ms();
        let started = actions::start(&mut self.state, now);
        self.sync();
        started
    }

    pub fn shoot(&mut self) -> bool {
        actions::shoot(&mut self.state)
    }

    pub fn hit(&mut self, duck_id: u32) -> bool {
        actions::hit(&mut self.state, duck_id)
    }

    /// Click on the field, optionally over a duck
    pub fn click(&mut self, target: Option<u32>) -> bool {
        actions::click(&mut self.state, target)
    }

    pub fn connect_wallet(&mut self) {
        actions::connect_wallet(&mut self.state);
    }

    pub fn mint_lives(&mut self) -> bool {
        actions::mint_lives(&mut self.state)
    }

    /// Advance one fixed simulation tick
    pub fn step(&mut self, input: &TickInput) {
        let now = self.clock.now_ms();
        tick(&mut self.state, input, now);
        self.sync();
    }

    /// One-second energy check against the wall clock
    pub fn poll_energy(&mut self) -> Recovery {
        let now = self.clock.now_ms();
        let recovery_secs = self.state.recovery_secs;
        let result = self.state.energy.poll(now, recovery_secs);
        if result == Recovery::Restored {
            self.state.message = Some(RESTORED_MESSAGE.to_string());
            self.state.emit(GameEvent::EnergyRestored);
        }
        self.sync();
        result
    }

    /// Hand the store back (teardown)
    pub fn into_store(self) -> Box<dyn KeyValueStore> {
        self.store
    }

    /// Write the energy record if it changed
    fn sync(&mut self) {
        debug_assert!(self.state.energy.is_consistent());
        let record = self.state.energy.record();
        if record == self.persisted {
            return;
        }
        if let Err(e) = record.save(&mut *self.store) {
            log::warn!("Failed to save energy: {:#}", e);
        }
        self.persisted = record;
    }
}
