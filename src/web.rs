//! Browser bindings
//!
//! The page owns the canvas, DOM text and event listeners. It forwards raw
//! input here and pulls a JSON snapshot each frame to draw from.

use wasm_bindgen::prelude::*;

use crate::game::Game;
use crate::sim::{ActionResult, Direction};
use crate::tuning::Tuning;

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_namespace = console, js_name = error)]
    fn console_error(msg: &str);
}

#[wasm_bindgen(start)]
pub fn wasm_start() {
    console_error_panic_hook::set_once();
    // Fails if a logger is already installed (module started twice)
    if let Err(e) = console_log::init_with_level(log::Level::Info) {
        console_error(&format!("Failed to init logger: {}", e));
    }
    log::info!("Paper Route (web) starting...");
}

/// Handle the page holds for the lifetime of the game
#[wasm_bindgen]
pub struct WebGame {
    game: Game,
}

#[wasm_bindgen]
impl WebGame {
    /// New game seeded from the clock. `tuning_json` may be empty.
    #[wasm_bindgen(constructor)]
    pub fn new(tuning_json: &str) -> WebGame {
        let tuning = if tuning_json.trim().is_empty() {
            Tuning::default()
        } else {
            Tuning::from_json_or_default(tuning_json)
        };
        let seed = js_sys::Date::now() as u64;
        log::info!("New game with seed: {}", seed);
        WebGame {
            game: Game::with_tuning(seed, tuning),
        }
    }

    /// Key or swipe started. Unknown direction names are ignored.
    #[wasm_bindgen(js_name = applyMovementIntent)]
    pub fn apply_movement_intent(&mut self, direction: &str) {
        if let Some(dir) = Direction::from_name(direction) {
            self.game.apply_movement_intent(dir);
        }
    }

    #[wasm_bindgen(js_name = clearMovementIntent)]
    pub fn clear_movement_intent(&mut self, direction: &str) {
        if let Some(dir) = Direction::from_name(direction) {
            self.game.clear_movement_intent(dir);
        }
    }

    #[wasm_bindgen(js_name = clearAllIntents)]
    pub fn clear_all_intents(&mut self) {
        self.game.clear_all_intents();
    }

    /// Returns true if a newspaper was thrown
    #[wasm_bindgen(js_name = requestThrow)]
    pub fn request_throw(&mut self) -> bool {
        self.game.request_throw() == ActionResult::Applied
    }

    pub fn tick(&mut self) {
        self.game.tick();
    }

    /// Feed wall-clock milliseconds since the last frame
    pub fn advance(&mut self, elapsed_ms: f64) -> u32 {
        self.game.advance((elapsed_ms / 1000.0) as f32)
    }

    pub fn start(&mut self) -> bool {
        self.game.start().is_applied()
    }

    pub fn reset(&mut self) {
        self.game.reset();
    }

    pub fn restart(&mut self) -> bool {
        self.game.restart().is_applied()
    }

    /// "start" | "playing" | "gameOver"
    pub fn phase(&self) -> String {
        match self.game.phase() {
            crate::sim::GamePhase::Start => "start",
            crate::sim::GamePhase::Playing => "playing",
            crate::sim::GamePhase::GameOver => "gameOver",
        }
        .to_string()
    }

    pub fn score(&self) -> f64 {
        self.game.score() as f64
    }

    pub fn lives(&self) -> u8 {
        self.game.lives()
    }

    pub fn packages(&self) -> u32 {
        self.game.packages()
    }

    /// Whole round state for the renderer
    #[wasm_bindgen(js_name = snapshotJson)]
    pub fn snapshot_json(&self) -> String {
        serde_json::to_string(self.game.state()).unwrap_or_else(|e| {
            log::error!("Snapshot serialization failed: {}", e);
            String::from("{}")
        })
    }

    /// Events since the last call, as a JSON array
    #[wasm_bindgen(js_name = drainEventsJson)]
    pub fn drain_events_json(&mut self) -> String {
        let events = self.game.drain_events();
        serde_json::to_string(&events).unwrap_or_else(|_| String::from("[]"))
    }
}
