//! The hippo: vertical physics and playfield bounds

use serde::{Deserialize, Serialize};

use super::geometry::Rect;
use crate::config::GameConfig;

/// Which playfield edge the hippo ran into during a clamp
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoundaryContact {
    None,
    /// Soft ceiling: position and velocity are zeroed, play continues
    Ceiling,
    /// Hard floor: ends the run
    Floor,
}

/// The player-controlled sprite. Only moves vertically.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Actor {
    /// Left edge (fixed for the whole run)
    pub x: f32,
    /// Top edge
    pub y: f32,
    /// Vertical velocity, pixels per tick (positive = down)
    pub velocity: f32,
    /// Edge length of the square sprite
    pub size: f32,
}

impl Actor {
    pub fn new(config: &GameConfig) -> Self {
        Self {
            x: config.sprite_x,
            y: config.initial_actor_y(),
            velocity: 0.0,
            size: config.sprite_size,
        }
    }

    /// Back to the starting position, at rest
    pub fn reset(&mut self, config: &GameConfig) {
        *self = Self::new(config);
    }

    /// Semi-implicit Euler: velocity first, then position with the new velocity
    pub fn apply_gravity_step(&mut self, gravity: f32) {
        self.velocity += gravity;
        self.y += self.velocity;
    }

    /// Replace (not add to) the current velocity
    pub fn apply_impulse(&mut self, impulse_velocity: f32) {
        self.velocity = impulse_velocity;
    }

    /// Keep the sprite inside `[0, height - size]`.
    ///
    /// Reaching the floor is reported as `Floor`; the ceiling only stops the
    /// sprite.
    pub fn clamp_to_playfield(&mut self, height: f32) -> BoundaryContact {
        let floor = height - self.size;
        if self.y >= floor {
            self.y = floor;
            return BoundaryContact::Floor;
        }
        if self.y < 0.0 {
            self.y = 0.0;
            self.velocity = 0.0;
            return BoundaryContact::Ceiling;
        }
        BoundaryContact::None
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.size
    }

    /// Collision box
    pub fn bounds(&self) -> Rect {
        Rect::new(self.x, self.y, self.size, self.size)
    }
}
