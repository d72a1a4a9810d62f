//! Game state and core simulation types
//!
//! Everything the simulation reads or writes lives in `GameState`. Nothing
//! outside the `sim` handlers and the owning `Session` mutates it.

use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::duck::Duck;
use super::schedule::{Deferred, Scheduler};
use crate::consts::*;
use crate::energy::Energy;
use crate::ms_to_ticks;
use crate::wallet::Wallet;

/// Current phase of the session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameStatus {
    /// Title screen, waiting for start
    Start,
    /// Round in progress
    Playing,
    /// Lives exhausted
    GameOver,
}

/// Dog overlay. Anything but `None` locks the trigger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum DogReaction {
    #[default]
    None,
    /// Holding up the duck that was shot
    Happy,
    /// Mocking the player after an escape
    Laughing,
}

/// Things that happened during a tick or input, for sound and visual cues
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    Started { attempts_left: u8 },
    DemoStarted,
    Shot { ammo_left: u8 },
    DuckSpawned { id: u32 },
    DuckHit { id: u32 },
    DuckFalling { id: u32 },
    DuckFlewAway { id: u32 },
    DuckLanded { id: u32, points: u64 },
    DuckEscaped { id: u32 },
    LevelUp { level: u32 },
    GameOver { score: u64 },
    DogShown { reaction: DogReaction },
    EnergyRestored,
    MintStarted,
    Minted,
}

/// Undrained events kept before the oldest are dropped
pub const MAX_PENDING_EVENTS: usize = 1024;

/// Complete session state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Seeded from the session seed; the only randomness source
    pub rng: Pcg32,
    pub status: GameStatus,
    /// Current round is a free attract-mode round
    pub demo: bool,
    pub score: u64,
    pub lives: u8,
    pub ammo: u8,
    pub level: u32,
    /// Ducks landed this game; never reset on level up
    pub ducks_hit: u32,
    pub dog: DogReaction,
    pub energy: Energy,
    pub wallet: Wallet,
    /// Banner text
    pub message: Option<String>,
    /// The single active duck slot
    pub duck: Option<Duck>,
    /// Simulation tick counter
    pub time_ticks: u64,
    /// Bumped on every start so deferred events from an older round no-op
    pub round: u32,
    /// Bumped on every dog appearance so only the latest one auto-hides
    pub dog_appearance: u32,
    /// Tick at which the spawn controller will release the next duck
    pub spawn_due: Option<u64>,
    pub scheduler: Scheduler,
    /// Events since the last drain
    pub events: Vec<GameEvent>,
    /// Per-tick chance that an alive duck flips its vertical direction
    pub flutter_chance: f32,
    /// Wall-clock seconds until an empty energy bar refills
    pub recovery_secs: u64,
    next_duck_id: u32,
}

impl GameState {
    /// Create a new session state on the title screen
    pub fn new(seed: u64, energy: Energy) -> Self {
        Self {
            rng: Pcg32::seed_from_u64(seed),
            status: GameStatus::Start,
            demo: false,
            score: 0,
            lives: INITIAL_LIVES,
            ammo: INITIAL_AMMO,
            level: 1,
            ducks_hit: 0,
            dog: DogReaction::None,
            energy,
            wallet: Wallet::default(),
            message: None,
            duck: None,
            time_ticks: 0,
            round: 0,
            dog_appearance: 0,
            spawn_due: None,
            scheduler: Scheduler::new(),
            events: Vec::new(),
            flutter_chance: FLUTTER_CHANCE,
            recovery_secs: RECOVERY_TIME_SECS,
            next_duck_id: 1,
        }
    }

    /// Allocate a duck ID (creation order)
    pub fn next_duck_id(&mut self) -> u32 {
        let id = self.next_duck_id;
        self.next_duck_id += 1;
        id
    }

    /// Trigger guard shared by shoot and hit
    pub fn can_fire(&self) -> bool {
        self.status == GameStatus::Playing && self.ammo > 0 && self.dog == DogReaction::None
    }

    /// The active duck, if it has this id
    pub fn duck_mut(&mut self, id: u32) -> Option<&mut Duck> {
        self.duck.as_mut().filter(|d| d.id == id)
    }

    /// Queue a deferred transition `delay_ms` from now
    pub fn defer(&mut self, delay_ms: u32, event: Deferred) {
        self.scheduler
            .schedule(self.time_ticks, ms_to_ticks(delay_ms), event);
    }

    /// Put the dog up and schedule it to go back down
    pub fn show_dog(&mut self, reaction: DogReaction) {
        self.dog = reaction;
        self.dog_appearance = self.dog_appearance.wrapping_add(1);
        let appearance = self.dog_appearance;
        self.defer(DOG_REACTION_MS, Deferred::HideDog { appearance });
        self.emit(GameEvent::DogShown { reaction });
    }

    /// Fresh round values; energy and wallet are untouched
    pub fn reset_round(&mut self) {
        self.demo = false;
        self.score = 0;
        self.lives = INITIAL_LIVES;
        self.ammo = INITIAL_AMMO;
        self.level = 1;
        self.ducks_hit = 0;
        self.dog = DogReaction::None;
        self.duck = None;
        self.spawn_due = None;
        self.round = self.round.wrapping_add(1);
        self.scheduler
            .cancel_where(|e| !matches!(e, Deferred::MintCompletes));
    }

    /// Queue an event. If nobody drains the queue the oldest events go first.
    pub fn emit(&mut self, event: GameEvent) {
        if self.events.len() >= MAX_PENDING_EVENTS {
            self.events.remove(0);
        }
        self.events.push(event);
    }

    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}
