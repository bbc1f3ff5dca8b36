//! Axis-aligned bounding box collision
//!
//! Every gameplay check (player vs obstacle, package vs mailbox) reduces to
//! one rectangle overlap test. World-space boxes are brought into screen
//! space first by subtracting the world offset.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// An axis-aligned rectangle, `pos` is the top-left corner
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub pos: Vec2,
    pub size: Vec2,
}

impl Rect {
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self {
            pos: Vec2::new(x, y),
            size: Vec2::new(w, h),
        }
    }

    pub fn from_pos_size(pos: Vec2, size: Vec2) -> Self {
        Self { pos, size }
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.pos.x + self.size.x
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.pos.y + self.size.y
    }

    pub fn center(&self) -> Vec2 {
        self.pos + self.size * 0.5
    }

    /// Shift a world-space box into screen space
    #[inline]
    pub fn to_screen(self, world_offset: f32) -> Self {
        Self {
            pos: Vec2::new(world_to_screen_x(self.pos.x, world_offset), self.pos.y),
            size: self.size,
        }
    }

    /// Strict overlap test. Boxes that only share an edge do not collide.
    #[inline]
    pub fn overlaps(&self, other: &Rect) -> bool {
        rects_overlap(*self, *other)
    }
}

/// `a.x < b.x + b.w && a.x + a.w > b.x && a.y < b.y + b.h && a.y + a.h > b.y`
#[inline]
pub fn rects_overlap(a: Rect, b: Rect) -> bool {
    a.pos.x < b.right() && a.right() > b.pos.x && a.pos.y < b.bottom() && a.bottom() > b.pos.y
}

/// Project a world-space x onto the canvas
#[inline]
pub fn world_to_screen_x(world_x: f32, world_offset: f32) -> f32 {
    world_x - world_offset
}

/// Inverse of [`world_to_screen_x`]
#[inline]
pub fn screen_to_world_x(screen_x: f32, world_offset: f32) -> f32 {
    screen_x + world_offset
}
