//! Session energy (attempts)
//!
//! Starting a round costs one attempt. When the last attempt is spent the
//! depletion time is stamped, and once `recovery_secs` of wall-clock time have
//! passed the attempts are refilled. Only `attempts` and `depleted_at_ms` are
//! persisted; the countdown is derived on every poll.
//!
//! Invariant: `depleted_at_ms.is_some() == (attempts == 0)`.

use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::clock::elapsed_secs;
use crate::consts::MAX_ATTEMPTS;
use crate::persistence::KeyValueStore;

/// Storage key for the attempts counter
pub const ATTEMPTS_STORAGE_KEY: &str = "duck_hunt_attempts";
/// Storage key for the depletion timestamp (epoch ms)
pub const RECOVERY_STORAGE_KEY: &str = "duck_hunt_recovery_time";

/// Banner shown when the wait is over
pub const RESTORED_MESSAGE: &str = "ENERGY RESTORED! READY FOR HUNT?";

/// The persisted pair
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnergyRecord {
    pub attempts: u8,
    pub depleted_at_ms: Option<i64>,
}

impl Default for EnergyRecord {
    fn default() -> Self {
        Self {
            attempts: MAX_ATTEMPTS,
            depleted_at_ms: None,
        }
    }
}

impl EnergyRecord {
    /// Read both keys, falling back to defaults for anything missing or unparsable
    pub fn load(store: &dyn KeyValueStore) -> Self {
        let attempts = match store.get(ATTEMPTS_STORAGE_KEY) {
            Some(raw) => match raw.trim().parse::<i64>() {
                Ok(n) => n.clamp(0, MAX_ATTEMPTS as i64) as u8,
                Err(_) => {
                    log::warn!("Corrupt attempts value {:?}, using default", raw);
                    MAX_ATTEMPTS
                }
            },
            None => MAX_ATTEMPTS,
        };

        let depleted_at_ms = store
            .get(RECOVERY_STORAGE_KEY)
            .and_then(|raw| match raw.trim().parse::<i64>() {
                Ok(ts) => Some(ts),
                Err(_) => {
                    log::warn!("Corrupt recovery timestamp {:?}, ignoring", raw);
                    None
                }
            });

        Self {
            attempts,
            depleted_at_ms,
        }
    }

    /// Write both keys. An absent timestamp removes its key.
    pub fn save(&self, store: &mut dyn KeyValueStore) -> Result<()> {
        store.set(ATTEMPTS_STORAGE_KEY, &self.attempts.to_string())?;
        match self.depleted_at_ms {
            Some(ts) => store.set(RECOVERY_STORAGE_KEY, &ts.to_string()),
            None => store.remove(RECOVERY_STORAGE_KEY),
        }
    }
}

/// Result of a recovery poll
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Recovery {
    /// Attempts available, nothing to count down
    Ready,
    /// Still waiting; seconds remaining
    Waiting(u64),
    /// The wait just finished and attempts were refilled
    Restored,
}

/// Live energy state
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Energy {
    pub attempts: u8,
    pub depleted_at_ms: Option<i64>,
    /// Seconds left until refill, only while depleted
    pub countdown_secs: Option<u64>,
}

impl Energy {
    /// Build from a stored record, repairing a record that breaks the invariant
    pub fn from_record(record: EnergyRecord, now_ms: i64) -> Self {
        let depleted_at_ms = match (record.attempts, record.depleted_at_ms) {
            (0, None) => {
                log::warn!("Stored energy empty without a timestamp, recovery starts now");
                Some(now_ms)
            }
            (n, Some(_)) if n > 0 => {
                log::warn!("Dropping stale recovery timestamp ({} attempts stored)", n);
                None
            }
            (_, ts) => ts,
        };
        Self {
            attempts: record.attempts.min(MAX_ATTEMPTS),
            depleted_at_ms,
            countdown_secs: None,
        }
    }

    pub fn record(&self) -> EnergyRecord {
        EnergyRecord {
            attempts: self.attempts,
            depleted_at_ms: self.depleted_at_ms,
        }
    }

    pub fn has_attempts(&self) -> bool {
        self.attempts > 0
    }

    /// Spend one attempt. Returns false (and changes nothing) when empty.
    pub fn consume(&mut self, now_ms: i64) -> bool {
        if self.attempts == 0 {
            return false;
        }
        self.attempts -= 1;
        if self.attempts == 0 {
            self.depleted_at_ms = Some(now_ms);
            log::info!("Energy depleted, recovery started");
        }
        true
    }

    /// Refill to full and clear the recovery timer in one step
    pub fn refill(&mut self) {
        self.attempts = MAX_ATTEMPTS;
        self.depleted_at_ms = None;
        self.countdown_secs = None;
    }

    /// One-second recovery check
    pub fn poll(&mut self, now_ms: i64, recovery_secs: u64) -> Recovery {
        let depleted_at = match (self.attempts, self.depleted_at_ms) {
            (0, Some(ts)) => ts,
            _ => {
                self.countdown_secs = None;
                return Recovery::Ready;
            }
        };

        let elapsed = elapsed_secs(depleted_at, now_ms);
        if elapsed >= recovery_secs {
            self.refill();
            log::info!("Energy recovered after {}s", elapsed);
            Recovery::Restored
        } else {
            let remaining = recovery_secs - elapsed;
            self.countdown_secs = Some(remaining);
            Recovery::Waiting(remaining)
        }
    }

    /// Invariant check used by tests and debug assertions
    pub fn is_consistent(&self) -> bool {
        self.depleted_at_ms.is_some() == (self.attempts == 0)
    }
}
