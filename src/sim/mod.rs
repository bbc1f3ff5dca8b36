//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (route order)
//! - No rendering or platform dependencies

pub mod collision;
pub mod entities;
pub mod route;
pub mod state;
pub mod tick;

pub use collision::{Rect, rects_overlap, screen_to_world_x, world_to_screen_x};
pub use entities::{
    DogState, Facing, FinishLine, House, HouseLook, Mailbox, Obstacle, ObstacleKind, Package,
    Particle, ParticleKind, Player, Side, TreeKind,
};
pub use route::{Route, generate_route};
pub use state::{
    ActionResult, GameEvent, GamePhase, IgnoreReason, MAX_PENDING_EVENTS, RoundOutcome,
    RoundState, RoundSummary,
};
pub use tick::{Direction, TickInput, TickOutcome, start_round, throw_package, tick};
