//! Entity models
//!
//! Plain state holders plus their per-type update rules. Nothing here draws;
//! the renderer reads these through the round state.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::collision::Rect;
use crate::consts::*;

/// Which way the player faces (and throws)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Facing {
    Left,
    #[default]
    Right,
}

impl Facing {
    /// +1 for right, -1 for left
    #[inline]
    pub fn sign(self) -> f32 {
        match self {
            Facing::Left => -1.0,
            Facing::Right => 1.0,
        }
    }
}

/// Side of the street
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Side {
    Top,
    Bottom,
}

impl Side {
    pub fn random(rng: &mut impl Rng) -> Self {
        if rng.random_bool(0.5) {
            Side::Top
        } else {
            Side::Bottom
        }
    }
}

/// The paper carrier. Screen-space; x is relative to the camera.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub pos: Vec2,
    pub size: Vec2,
    pub facing: Facing,
}

impl Default for Player {
    fn default() -> Self {
        Self {
            pos: Vec2::new(PLAYER_START_X, PLAYER_START_Y),
            size: Vec2::new(PLAYER_WIDTH, PLAYER_HEIGHT),
            facing: Facing::Right,
        }
    }
}

impl Player {
    pub fn rect(&self) -> Rect {
        Rect::from_pos_size(self.pos, self.size)
    }

    pub fn move_left(&mut self, speed: f32) {
        self.pos.x = (self.pos.x - speed).max(SCREEN_MARGIN);
        self.facing = Facing::Left;
    }

    pub fn move_right(&mut self, speed: f32) {
        self.pos.x = (self.pos.x + speed).min(CANVAS_WIDTH - self.size.x - SCREEN_MARGIN);
        self.facing = Facing::Right;
    }

    pub fn move_up(&mut self, speed: f32) {
        self.pos.y = (self.pos.y - speed).max(SCREEN_MARGIN);
    }

    pub fn move_down(&mut self, speed: f32) {
        self.pos.y = (self.pos.y + speed).min(CANVAS_HEIGHT - self.size.y - SCREEN_MARGIN);
    }
}

/// Decorative house attributes, picked once and never read by the simulation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HouseLook {
    /// 0-3
    pub style: u8,
    /// Palette indices, 0-3 each
    pub roof_color: u8,
    pub body_color: u8,
    pub door_color: u8,
    pub has_chimney: bool,
    pub has_garage: bool,
    pub window_lights: bool,
    pub tree: TreeKind,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TreeKind {
    None,
    Oak,
    Pine,
}

impl HouseLook {
    pub fn random(rng: &mut impl Rng) -> Self {
        Self {
            style: rng.random_range(0..4),
            roof_color: rng.random_range(0..4),
            body_color: rng.random_range(0..4),
            door_color: rng.random_range(0..4),
            has_chimney: rng.random_bool(0.6),
            has_garage: rng.random_bool(0.4),
            window_lights: rng.random_bool(0.7),
            tree: match rng.random_range(0..3) {
                0 => TreeKind::None,
                1 => TreeKind::Oak,
                _ => TreeKind::Pine,
            },
        }
    }
}

/// A house along the route (world-space x)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct House {
    pub x: f32,
    pub side: Side,
    pub needs_delivery: bool,
    pub delivered: bool,
    pub look: HouseLook,
}

impl House {
    pub fn y(&self) -> f32 {
        match self.side {
            Side::Top => HOUSE_TOP_Y,
            Side::Bottom => HOUSE_BOTTOM_Y,
        }
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y(), HOUSE_WIDTH, HOUSE_HEIGHT)
    }

    /// Flip to delivered. Returns false if it was already delivered.
    pub fn mark_delivered(&mut self) -> bool {
        if self.delivered {
            return false;
        }
        self.needs_delivery = false;
        self.delivered = true;
        true
    }
}

/// A mailbox in front of a house that wants a paper (world-space x)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Mailbox {
    pub x: f32,
    pub side: Side,
    /// Index into the route's houses
    pub house: usize,
    pub has_newspaper: bool,
}

impl Mailbox {
    pub fn y(&self) -> f32 {
        match self.side {
            Side::Top => MAILBOX_TOP_Y,
            Side::Bottom => MAILBOX_BOTTOM_Y,
        }
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y(), MAILBOX_WIDTH, MAILBOX_HEIGHT)
    }
}

/// What a dog is currently up to
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum DogState {
    /// Sitting on the start sidewalk
    Waiting { ticks_left: u32 },
    /// Heading for the far sidewalk
    Crossing { target_y: f32 },
    /// Wandering along the far sidewalk, `dir` is +1 or -1
    Drifting { dir: f32 },
}

/// Obstacle types
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum ObstacleKind {
    /// Parked in a lane, never moves
    Car,
    Dog { speed: f32, state: DogState },
}

/// A hazard along the route. `x` is world-space, `y` screen-space.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Obstacle {
    pub x: f32,
    pub y: f32,
    pub kind: ObstacleKind,
}

impl Obstacle {
    pub fn car(x: f32, rng: &mut impl Rng) -> Self {
        let lane = CAR_LANES[rng.random_range(0..CAR_LANES.len())];
        Self {
            x,
            y: lane,
            kind: ObstacleKind::Car,
        }
    }

    pub fn dog(x: f32, rng: &mut impl Rng) -> Self {
        let start = Side::random(rng);
        let speed = rng.random_range(DOG_MIN_SPEED..DOG_MAX_SPEED);
        let ticks_left = rng.random_range(0..DOG_MAX_WAIT_TICKS);
        Self {
            x,
            y: dog_sidewalk_y(start),
            kind: ObstacleKind::Dog {
                speed,
                state: DogState::Waiting { ticks_left },
            },
        }
    }

    pub fn is_car(&self) -> bool {
        matches!(self.kind, ObstacleKind::Car)
    }

    pub fn size(&self) -> Vec2 {
        match self.kind {
            ObstacleKind::Car => Vec2::new(CAR_WIDTH, CAR_HEIGHT),
            ObstacleKind::Dog { .. } => Vec2::new(DOG_WIDTH, DOG_HEIGHT),
        }
    }

    pub fn rect(&self) -> Rect {
        Rect::from_pos_size(Vec2::new(self.x, self.y), self.size())
    }

    /// Advance one tick. Cars are static; dogs wait, cross once, then drift.
    pub fn update(&mut self, rng: &mut impl Rng) {
        let ObstacleKind::Dog { speed, ref mut state } = self.kind else {
            return;
        };

        if let DogState::Waiting { ticks_left } = *state {
            if ticks_left > 0 {
                *state = DogState::Waiting {
                    ticks_left: ticks_left - 1,
                };
                return;
            }
            // Wait is over, start crossing this tick
            let target_y = if self.y < CANVAS_HEIGHT / 2.0 {
                DOG_BOTTOM_SIDEWALK_Y
            } else {
                DOG_TOP_SIDEWALK_Y
            };
            *state = DogState::Crossing { target_y };
        }

        match *state {
            DogState::Waiting { .. } => {}
            DogState::Crossing { target_y } => {
                let delta = target_y - self.y;
                if delta.abs() > DOG_ARRIVAL_DISTANCE {
                    self.y += delta.signum() * speed;
                } else {
                    self.y = target_y;
                    let dir = if rng.random_bool(0.5) { 1.0 } else { -1.0 };
                    self.x += dir * speed;
                    *state = DogState::Drifting { dir };
                }
            }
            DogState::Drifting { dir } => {
                self.x += dir * speed;
            }
        }
    }
}

/// Sidewalk line a dog sits on
pub fn dog_sidewalk_y(side: Side) -> f32 {
    match side {
        Side::Top => DOG_TOP_SIDEWALK_Y,
        Side::Bottom => DOG_BOTTOM_SIDEWALK_Y,
    }
}

/// A newspaper in flight (screen-space)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Package {
    pub pos: Vec2,
    pub vel: Vec2,
    pub gravity: f32,
}

impl Package {
    pub fn new(pos: Vec2, facing: Facing, speed: f32, lift: f32, gravity: f32) -> Self {
        Self {
            pos,
            vel: Vec2::new(speed * facing.sign(), lift),
            gravity,
        }
    }

    pub fn rect(&self) -> Rect {
        Rect::from_pos_size(self.pos, Vec2::splat(PACKAGE_SIZE))
    }

    pub fn update(&mut self) {
        self.pos += self.vel;
        self.vel.y += self.gravity;
    }

    /// Still worth simulating. Once out past the slack it never comes back.
    pub fn in_play(&self) -> bool {
        self.pos.x < CANVAS_WIDTH + OFFSCREEN_SLACK
            && self.pos.x > -OFFSCREEN_SLACK - PACKAGE_SIZE
            && self.pos.y < CANVAS_HEIGHT + OFFSCREEN_SLACK
    }
}

/// What spawned a particle, used by the renderer to pick a color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ParticleKind {
    Hit,
    Delivery,
}

/// A particle for visual effects (screen-space)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    pub kind: ParticleKind,
    /// Ticks remaining
    pub life: u32,
}

impl Particle {
    pub fn new(pos: Vec2, kind: ParticleKind, rng: &mut impl Rng) -> Self {
        let vel = Vec2::new(
            rng.random_range(-PARTICLE_MAX_SPEED..PARTICLE_MAX_SPEED),
            rng.random_range(-PARTICLE_MAX_SPEED..PARTICLE_MAX_SPEED),
        );
        Self {
            pos,
            vel,
            kind,
            life: PARTICLE_LIFE,
        }
    }

    pub fn update(&mut self) {
        self.pos += self.vel;
        self.life = self.life.saturating_sub(1);
    }

    /// Opacity for rendering, 1.0 when fresh
    pub fn alpha(&self) -> f32 {
        self.life as f32 / PARTICLE_LIFE as f32
    }
}

/// End of the route (world-space x)
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct FinishLine {
    pub x: f32,
}

impl FinishLine {
    pub fn rect(&self) -> Rect {
        Rect::new(self.x, 0.0, FINISH_LINE_WIDTH, CANVAS_HEIGHT)
    }
}
