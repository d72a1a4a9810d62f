//! Browser bindings
//!
//! The page owns the canvas, sprites and sound. It calls `frame` from
//! `requestAnimationFrame`, forwards clicks, draws from `snapshot_json` and
//! plays cues from `events_json`.

use wasm_bindgen::prelude::*;

use crate::clock::SystemClock;
use crate::persistence::local::LocalStore;
use crate::platform::FrameDriver;
use crate::session::Session;
use crate::settings::Settings;
use crate::snapshot::events_to_json;

#[wasm_bindgen(start)]
pub fn wasm_start() {
    console_error_panic_hook::set_once();
    if console_log::init_with_level(log::Level::Info).is_err() {
        web_sys::console::warn_1(&"Logger already initialized".into());
    }
    log::info!("Duck Hunt core loaded");
}

#[wasm_bindgen]
pub struct WebSession {
    session: Session,
    driver: FrameDriver,
}

#[wasm_bindgen]
impl WebSession {
    #[wasm_bindgen(constructor)]
    pub fn new() -> WebSession {
        let settings = Settings::load();
        let session = Session::new(
            &settings,
            Box::new(LocalStore::new()),
            Box::new(SystemClock),
        );
        WebSession {
            session,
            driver: FrameDriver::new(),
        }
    }

    /// Advance by the real frame delta (seconds). Returns ticks run.
    pub fn frame(&mut self, dt: f32) -> u32 {
        self.driver.frame(&mut self.session, dt)
    }

    /// Game events since the last call, as a JSON array, for sound and effects
    pub fn events_json(&mut self) -> String {
        events_to_json(&self.session.drain_events())
    }

    pub fn start(&mut self) -> bool {
        self.session.start()
    }

    pub fn shoot(&mut self) -> bool {
        self.session.shoot()
    }

    pub fn hit(&mut self, duck_id: u32) -> bool {
        self.session.hit(duck_id)
    }

    /// Click on the field; `duck_id` is set when the pointer was over the duck
    pub fn click(&mut self, duck_id: Option<u32>) -> bool {
        self.session.click(duck_id)
    }

    pub fn connect_wallet(&mut self) {
        self.session.connect_wallet();
    }

    pub fn mint_lives(&mut self) -> bool {
        self.session.mint_lives()
    }

    /// Let the game play itself on the title screen
    pub fn set_idle_mode(&mut self, enabled: bool) {
        self.driver.input.idle_mode = enabled;
    }

    pub fn snapshot_json(&self) -> String {
        self.session.snapshot().to_json()
    }

    pub fn stop(&mut self) {
        self.driver.stop();
        log::info!("Session stopped");
    }
}

impl Default for WebSession {
    fn default() -> Self {
        Self::new()
    }
}
