//! Platform timing
//!
//! Hosts call `FrameDriver::frame` once per display refresh with the real
//! frame delta. The driver turns it into whole simulation ticks and fires the
//! once-a-second energy poll, keeping the simulation independent of refresh rate.

use crate::consts::{ENERGY_POLL_SECS, MAX_SUBSTEPS, SIM_DT};
use crate::session::Session;
use crate::sim::TickInput;

/// Longest frame delta honoured; anything longer (tab hidden, debugger) is clamped
const MAX_FRAME_DT: f32 = 0.1;

#[derive(Debug, Clone)]
pub struct FrameDriver {
    accumulator: f32,
    energy_accumulator: f32,
    running: bool,
    /// Input applied on the next tick, then cleared (except idle mode)
    pub input: TickInput,
}

impl Default for FrameDriver {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameDriver {
    pub fn new() -> Self {
        Self {
            accumulator: 0.0,
            energy_accumulator: 0.0,
            running: true,
            input: TickInput::default(),
        }
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Tear down: later frames do nothing
    pub fn stop(&mut self) {
        self.running = false;
        self.accumulator = 0.0;
    }

    /// Run simulation ticks for `dt` seconds of real time. Returns ticks run.
    pub fn frame(&mut self, session: &mut Session, dt: f32) -> u32 {
        if !self.running {
            return 0;
        }
        let dt = dt.clamp(0.0, MAX_FRAME_DT);
        self.accumulator += dt;
        self.energy_accumulator += dt;

        let mut substeps = 0;
        while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
            session.step(&self.input);
            self.accumulator -= SIM_DT;
            substeps += 1;

            // Clear one-shot inputs after processing
            self.input.start = false;
            self.input.shoot = false;
            self.input.target = None;
        }

        while self.energy_accumulator >= ENERGY_POLL_SECS {
            self.energy_accumulator -= ENERGY_POLL_SECS;
            session.poll_energy();
        }

        substeps
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Settings;
    use crate::clock::ManualClock;
    use crate::persistence::MemoryStore;
    use crate::sim::GameStatus;

    fn session() -> Session {
        let settings = Settings {
            seed: Some(1),
            ..Default::default()
        };
        Session::new(
            &settings,
            Box::new(MemoryStore::new()),
            Box::new(ManualClock::new(0)),
        )
    }

    #[test]
    fn test_frame_runs_fixed_ticks() {
        let mut s = session();
        let mut driver = FrameDriver::new();
        // Two 60 Hz frames' worth in one 30 Hz frame
        let ticks = driver.frame(&mut s, 2.0 / 60.0 + 0.0001);
        assert_eq!(ticks, 2);
        assert_eq!(s.state().time_ticks, 2);
    }

    #[test]
    fn test_long_frame_is_clamped() {
        let mut s = session();
        let mut driver = FrameDriver::new();
        let ticks = driver.frame(&mut s, 5.0);
        assert!(ticks <= MAX_SUBSTEPS);
        assert!(s.state().time_ticks <= MAX_SUBSTEPS as u64);
    }

    #[test]
    fn test_one_shot_input_consumed() {
        let mut s = session();
        let mut driver = FrameDriver::new();
        driver.input.start = true;
        driver.frame(&mut s, SIM_DT * 1.5);
        assert_eq!(s.state().status, GameStatus::Playing);
        assert!(!driver.input.start);
    }

    #[test]
    fn test_stopped_driver_is_inert() {
        let mut s = session();
        let mut driver = FrameDriver::new();
        driver.stop();
        assert!(!driver.is_running());
        assert_eq!(driver.frame(&mut s, 0.05), 0);
        assert_eq!(s.state().time_ticks, 0);
    }
}
