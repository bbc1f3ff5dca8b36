//! Frame-facing game facade
//!
//! Owns the current round plus the bits a host needs between frames: held
//! movement keys, the fixed-timestep accumulator and lifecycle commands.
//! Input collaborators call the intent/throw methods per raw event; the frame
//! scheduler calls [`Game::tick`] or [`Game::advance`]; renderers read
//! [`Game::state`].

use rand::RngCore;

use crate::consts::{MAX_SUBSTEPS, SIM_DT};
use crate::sim::{
    ActionResult, Direction, GameEvent, GamePhase, RoundState, RoundSummary, TickInput,
    TickOutcome, start_round, throw_package, tick,
};
use crate::tuning::Tuning;

/// A running game: one round at a time
#[derive(Debug, Clone)]
pub struct Game {
    state: RoundState,
    /// Latched movement intents, read at the start of each tick
    input: TickInput,
    accumulator: f32,
}

impl Game {
    pub fn new(seed: u64) -> Self {
        Self::with_tuning(seed, Tuning::default())
    }

    /// Invalid tuning is replaced by the defaults
    pub fn with_tuning(seed: u64, tuning: Tuning) -> Self {
        Self {
            state: RoundState::with_tuning(seed, tuning),
            input: TickInput::default(),
            accumulator: 0.0,
        }
    }

    // === Input ===

    /// A direction key went down
    pub fn apply_movement_intent(&mut self, dir: Direction) {
        self.input.set(dir, true);
    }

    /// A direction key came up
    pub fn clear_movement_intent(&mut self, dir: Direction) {
        self.input.set(dir, false);
    }

    /// Drop every held direction (touch end, focus loss)
    pub fn clear_all_intents(&mut self) {
        self.input = TickInput::default();
    }

    /// Throw right now if the round allows it
    pub fn request_throw(&mut self) -> ActionResult {
        throw_package(&mut self.state)
    }

    // === Frame loop ===

    /// Advance exactly one simulation tick
    pub fn tick(&mut self) -> TickOutcome {
        let input = self.input;
        tick(&mut self.state, &input)
    }

    /// Run as many fixed ticks as `elapsed` seconds covers. Returns ticks run.
    pub fn advance(&mut self, elapsed: f32) -> u32 {
        if !self.state.is_playing() {
            self.accumulator = 0.0;
            return 0;
        }

        // A bad frame time (NaN from an unset timestamp) would poison the accumulator
        if !elapsed.is_finite() {
            log::warn!("Ignoring non-finite frame time: {}", elapsed);
            return 0;
        }
        self.accumulator += elapsed.clamp(0.0, 0.1);

        let mut substeps = 0;
        while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
            self.accumulator -= SIM_DT;
            substeps += 1;
            if let TickOutcome::Ended(_) = self.tick() {
                self.accumulator = 0.0;
                break;
            }
        }
        substeps
    }

    // === Lifecycle ===

    /// Start → Playing
    pub fn start(&mut self) -> ActionResult {
        start_round(&mut self.state)
    }

    /// Throw away the current round and lay out a new route with a fresh seed
    pub fn reset(&mut self) {
        let seed = self.state.rng.next_u64();
        self.reset_with_seed(seed);
    }

    pub fn reset_with_seed(&mut self, seed: u64) {
        let tuning = self.state.tuning.clone();
        self.state = RoundState::with_tuning(seed, tuning);
        self.accumulator = 0.0;
        log::info!("Round reset with seed: {}", seed);
    }

    /// Reset then start, what the "play again" button does
    pub fn restart(&mut self) -> ActionResult {
        self.reset();
        self.start()
    }

    // === Read-only views ===

    pub fn state(&self) -> &RoundState {
        &self.state
    }

    pub fn input(&self) -> TickInput {
        self.input
    }

    pub fn phase(&self) -> GamePhase {
        self.state.phase
    }

    pub fn score(&self) -> u64 {
        self.state.score
    }

    pub fn lives(&self) -> u8 {
        self.state.lives
    }

    pub fn packages(&self) -> u32 {
        self.state.packages
    }

    pub fn summary(&self) -> Option<RoundSummary> {
        self.state.summary
    }

    /// Take every event queued since the last drain
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.state.events)
    }
}
