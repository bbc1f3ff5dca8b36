//! Paper Route - A side-scrolling newspaper delivery arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (entities, collisions, scoring, game state)
//! - `game`: Frame-facing facade (input intents, lifecycle, fixed timestep)
//! - `tuning`: Data-driven game balance
//! - `web`: wasm-bindgen handle for the browser host (wasm32 only)

pub mod game;
pub mod sim;
pub mod tuning;
#[cfg(target_arch = "wasm32")]
pub mod web;

pub use game::Game;
pub use tuning::{Tuning, TuningError};

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (60 Hz, one tick per animation frame)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Visible canvas
    pub const CANVAS_WIDTH: f32 = 800.0;
    pub const CANVAS_HEIGHT: f32 = 600.0;
    /// Player can't get closer than this to any canvas edge
    pub const SCREEN_MARGIN: f32 = 10.0;
    /// Packages further than this outside the canvas are discarded
    pub const OFFSCREEN_SLACK: f32 = 50.0;

    /// Player defaults
    pub const PLAYER_START_X: f32 = 100.0;
    pub const PLAYER_START_Y: f32 = 300.0;
    pub const PLAYER_WIDTH: f32 = 30.0;
    pub const PLAYER_HEIGHT: f32 = 40.0;

    /// Houses sit on the verges above and below the street
    pub const HOUSE_WIDTH: f32 = 60.0;
    pub const HOUSE_HEIGHT: f32 = 80.0;
    pub const HOUSE_TOP_Y: f32 = 80.0;
    pub const HOUSE_BOTTOM_Y: f32 = 420.0;

    /// Mailboxes sit on the sidewalks
    pub const MAILBOX_WIDTH: f32 = 20.0;
    pub const MAILBOX_HEIGHT: f32 = 30.0;
    pub const MAILBOX_TOP_Y: f32 = CANVAS_HEIGHT / 2.0 - 75.0;
    pub const MAILBOX_BOTTOM_Y: f32 = CANVAS_HEIGHT / 2.0 + 55.0;

    /// Parked cars
    pub const CAR_WIDTH: f32 = 60.0;
    pub const CAR_HEIGHT: f32 = 30.0;
    pub const CAR_LANES: [f32; 3] = [
        CANVAS_HEIGHT / 2.0 - 35.0,
        CANVAS_HEIGHT / 2.0 - 15.0,
        CANVAS_HEIGHT / 2.0 + 5.0,
    ];

    /// Dogs wander from one sidewalk to the other
    pub const DOG_WIDTH: f32 = 25.0;
    pub const DOG_HEIGHT: f32 = 20.0;
    pub const DOG_TOP_SIDEWALK_Y: f32 = CANVAS_HEIGHT / 2.0 - 65.0;
    pub const DOG_BOTTOM_SIDEWALK_Y: f32 = CANVAS_HEIGHT / 2.0 + 65.0;
    pub const DOG_MIN_SPEED: f32 = 1.0;
    pub const DOG_MAX_SPEED: f32 = 3.0;
    pub const DOG_MAX_WAIT_TICKS: u32 = 180;
    /// A crossing dog has arrived once it is this close to the far sidewalk
    pub const DOG_ARRIVAL_DISTANCE: f32 = 2.0;

    /// Thrown packages
    pub const PACKAGE_SIZE: f32 = 12.0;
    /// Spawn offset from the player's top-left corner
    pub const PACKAGE_SPAWN_OFFSET_X: f32 = 20.0;
    pub const PACKAGE_SPAWN_OFFSET_Y: f32 = 10.0;

    /// Particle bursts
    pub const PARTICLE_LIFE: u32 = 30;
    pub const PARTICLE_BURST: usize = 10;
    pub const PARTICLE_MAX_SPEED: f32 = 3.0;

    /// Finish line
    pub const FINISH_LINE_WIDTH: f32 = 20.0;
}
