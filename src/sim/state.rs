//! Round state and core simulation types
//!
//! Everything one round of deliveries needs lives in [`RoundState`]. The tick
//! mutates it in place; renderers and UI only ever read it.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::entities::{
    FinishLine, House, Mailbox, Obstacle, Package, Particle, ParticleKind, Player,
};
use super::route::{Route, generate_route};
use crate::consts::*;
use crate::tuning::Tuning;

/// Current phase of a round
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Route generated, waiting for the start command
    Start,
    /// Active gameplay
    Playing,
    /// Round ended, see [`RoundState::summary`]
    GameOver,
}

/// How a round ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoundOutcome {
    /// Ran out of lives
    Failed,
    /// Crossed the finish line
    RouteComplete,
}

/// Final tally, fixed at the moment the round ends
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundSummary {
    pub outcome: RoundOutcome,
    pub base_score: u64,
    /// Houses delivered (only rewarded on route completion)
    pub deliveries: u32,
    pub delivery_bonus: u64,
    pub final_score: u64,
}

/// Why an action was dropped
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum IgnoreReason {
    /// Only valid while playing
    NotPlaying,
    /// Inventory is empty
    OutOfPackages,
    /// Round already started
    AlreadyPlaying,
    /// Needs a reset before it can start again
    RoundOver,
}

/// Result of a player or lifecycle action. Invalid actions are no-ops.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionResult {
    Applied,
    Ignored(IgnoreReason),
}

impl ActionResult {
    pub fn is_applied(self) -> bool {
        self == ActionResult::Applied
    }
}

/// Notable things that happened, for UI and audio consumers
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    PackageThrown { remaining: u32 },
    PlayerHit { lives: u8 },
    /// A package landed in a mailbox; indices into the route vectors
    Delivered { mailbox: usize, house: usize },
    RoundEnded(RoundSummary),
}

/// Pending events kept before the oldest are dropped
pub const MAX_PENDING_EVENTS: usize = 64;

/// Complete state of one round
#[derive(Debug, Clone, Serialize)]
pub struct RoundState {
    /// Seed the route and all round randomness came from
    pub seed: u64,
    pub tuning: Tuning,
    pub phase: GamePhase,
    /// Simulation ticks while playing
    pub time_ticks: u64,
    pub score: u64,
    pub lives: u8,
    /// Newspapers left to throw
    pub packages: u32,
    /// Horizontal scroll; never decreases
    pub world_offset: f32,
    /// Ticks of hit protection remaining
    pub invulnerable_ticks: u32,

    pub player: Player,
    pub houses: Vec<House>,
    pub mailboxes: Vec<Mailbox>,
    pub obstacles: Vec<Obstacle>,
    pub finish_line: FinishLine,
    pub thrown_packages: Vec<Package>,
    pub particles: Vec<Particle>,

    /// Set once the round has ended
    pub summary: Option<RoundSummary>,
    /// Undrained events, oldest first
    #[serde(skip)]
    pub events: Vec<GameEvent>,
    #[serde(skip)]
    pub(crate) rng: Pcg32,
}

impl RoundState {
    /// Fresh round with stock tuning
    pub fn new(seed: u64) -> Self {
        Self::with_tuning(seed, Tuning::default())
    }

    /// Fresh round: full inventory, new route, waiting in `Start`.
    /// Invalid tuning is replaced by the defaults.
    pub fn with_tuning(seed: u64, tuning: Tuning) -> Self {
        let tuning = match tuning.validate() {
            Ok(()) => tuning,
            Err(e) => {
                log::warn!("Ignoring tuning override: {}", e);
                Tuning::default()
            }
        };
        let mut rng = Pcg32::seed_from_u64(seed);
        let Route {
            houses,
            mailboxes,
            obstacles,
            finish_line,
        } = generate_route(&mut rng, &tuning);

        log::debug!(
            "Round seed {}: {} houses, {} mailboxes, {} obstacles, finish at {}",
            seed,
            houses.len(),
            mailboxes.len(),
            obstacles.len(),
            finish_line.x
        );

        Self {
            seed,
            phase: GamePhase::Start,
            time_ticks: 0,
            score: 0,
            lives: tuning.starting_lives,
            packages: tuning.starting_packages,
            world_offset: 0.0,
            invulnerable_ticks: 0,
            player: Player::default(),
            houses,
            mailboxes,
            obstacles,
            finish_line,
            thrown_packages: Vec::new(),
            particles: Vec::new(),
            summary: None,
            events: Vec::new(),
            rng,
            tuning,
        }
    }

    pub fn is_playing(&self) -> bool {
        self.phase == GamePhase::Playing
    }

    pub fn is_invulnerable(&self) -> bool {
        self.invulnerable_ticks > 0
    }

    /// Player's x along the route
    pub fn player_world_x(&self) -> f32 {
        super::collision::screen_to_world_x(self.player.pos.x, self.world_offset)
    }

    pub fn delivered_count(&self) -> u32 {
        self.houses.iter().filter(|h| h.delivered).count() as u32
    }

    /// Houses still waiting for a paper
    pub fn pending_deliveries(&self) -> usize {
        self.houses.iter().filter(|h| h.needs_delivery).count()
    }

    /// Queue an event, dropping the oldest if nobody is draining
    pub fn emit(&mut self, event: GameEvent) {
        if self.events.len() >= MAX_PENDING_EVENTS {
            self.events.remove(0);
        }
        self.events.push(event);
    }

    /// Spawn a burst of particles at a screen-space point
    pub fn burst(&mut self, at: Vec2, kind: ParticleKind) {
        for _ in 0..PARTICLE_BURST {
            let particle = Particle::new(at, kind, &mut self.rng);
            self.particles.push(particle);
        }
    }

    /// Close out the round and compute the final tally
    pub(crate) fn finish(&mut self, outcome: RoundOutcome) -> RoundSummary {
        let deliveries = self.delivered_count();
        let delivery_bonus = match outcome {
            RoundOutcome::RouteComplete => deliveries as u64 * self.tuning.delivery_bonus,
            RoundOutcome::Failed => 0,
        };
        let summary = RoundSummary {
            outcome,
            base_score: self.score,
            deliveries,
            delivery_bonus,
            final_score: self.score + delivery_bonus,
        };

        self.phase = GamePhase::GameOver;
        self.summary = Some(summary);
        self.emit(GameEvent::RoundEnded(summary));

        match outcome {
            RoundOutcome::Failed => log::info!("Game over - final score {}", summary.final_score),
            RoundOutcome::RouteComplete => log::info!(
                "Route complete - base {} + bonus {} ({} deliveries) = {}",
                summary.base_score,
                summary.delivery_bonus,
                summary.deliveries,
                summary.final_score
            ),
        }

        summary
    }
}
