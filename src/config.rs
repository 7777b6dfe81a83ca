//! Game tuning
//!
//! Every constant the simulation reads lives here so tests and hosts can
//! build sessions with their own numbers. Loaded from JSON on native, derived
//! from the canvas size on web.

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::ConfigError;

/// Complete simulation configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Added to the hippo's vertical velocity every tick
    pub gravity: f32,
    /// Vertical velocity after a flap (negative = up)
    pub impulse_velocity: f32,
    /// Horizontal reed speed, pixels per tick
    pub obstacle_speed: f32,
    /// Vertical size of the opening between the reeds
    pub gap: f32,
    /// Horizontal size of a reed
    pub obstacle_width: f32,
    /// Ticks between two reed spawns
    pub spawn_period_ticks: u64,
    /// Edge length of the (square) hippo
    pub sprite_size: f32,
    /// Left edge of the hippo
    pub sprite_x: f32,
    /// Minimum distance between the gap and the top/bottom of the playfield
    pub gap_margin: f32,
    /// How far past x = 0 a reed's trailing edge travels before removal
    pub eviction_margin: f32,
    pub playfield_width: f32,
    pub playfield_height: f32,
    /// Gap RNG seed (falls back to `DEFAULT_SEED`)
    pub seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::for_playfield(DEFAULT_PLAYFIELD_WIDTH, DEFAULT_PLAYFIELD_HEIGHT)
    }
}

impl GameConfig {
    /// Default tuning scaled to a viewport: the gap and the reed width grow
    /// with the screen but never drop below their minimums.
    pub fn for_playfield(width: f32, height: f32) -> Self {
        Self {
            gravity: GRAVITY,
            impulse_velocity: IMPULSE_VELOCITY,
            obstacle_speed: OBSTACLE_SPEED,
            gap: MIN_GAP.max((height * GAP_HEIGHT_FRACTION).floor()),
            obstacle_width: MIN_OBSTACLE_WIDTH.max((width * OBSTACLE_WIDTH_FRACTION).floor()),
            spawn_period_ticks: SPAWN_PERIOD_TICKS,
            sprite_size: SPRITE_SIZE,
            sprite_x: SPRITE_X,
            gap_margin: GAP_MARGIN,
            eviction_margin: EVICTION_MARGIN,
            playfield_width: width,
            playfield_height: height,
            seed: None,
        }
    }

    /// Parse and validate a JSON document; missing fields take defaults
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Seed for the gap RNG
    pub fn effective_seed(&self) -> u64 {
        self.seed.unwrap_or(DEFAULT_SEED)
    }

    /// Hippo's starting top edge
    pub fn initial_actor_y(&self) -> f32 {
        self.playfield_height / 2.0
    }

    /// Range the top edge of a new gap is drawn from
    pub fn gap_top_range(&self) -> (f32, f32) {
        let min = self.gap_margin;
        let max = self.playfield_height - self.gap - self.gap_margin;
        (min, max.max(min))
    }

    /// Reject configurations the simulation cannot run with
    pub fn validate(&self) -> Result<(), ConfigError> {
        let finite = [
            ("gravity", self.gravity),
            ("impulse_velocity", self.impulse_velocity),
            ("obstacle_speed", self.obstacle_speed),
            ("gap", self.gap),
            ("obstacle_width", self.obstacle_width),
            ("sprite_size", self.sprite_size),
            ("sprite_x", self.sprite_x),
            ("gap_margin", self.gap_margin),
            ("eviction_margin", self.eviction_margin),
            ("playfield_width", self.playfield_width),
            ("playfield_height", self.playfield_height),
        ];
        if let Some((field, _)) = finite.into_iter().find(|(_, v)| !v.is_finite()) {
            return Err(ConfigError::NonFinite { field });
        }

        if self.playfield_width <= 0.0 || self.playfield_height <= 0.0 {
            return Err(ConfigError::InvalidPlayfield {
                width: self.playfield_width,
                height: self.playfield_height,
            });
        }

        let positive = [
            ("obstacle_speed", self.obstacle_speed),
            ("gap", self.gap),
            ("obstacle_width", self.obstacle_width),
            ("sprite_size", self.sprite_size),
        ];
        for (field, value) in positive {
            if value <= 0.0 {
                return Err(ConfigError::NonPositive { field, value });
            }
        }

        let non_negative = [
            ("gravity", self.gravity),
            ("gap_margin", self.gap_margin),
            ("eviction_margin", self.eviction_margin),
        ];
        for (field, value) in non_negative {
            if value < 0.0 {
                return Err(ConfigError::Negative { field, value });
            }
        }

        if self.spawn_period_ticks == 0 {
            return Err(ConfigError::ZeroSpawnPeriod);
        }
        if self.impulse_velocity >= 0.0 {
            return Err(ConfigError::ImpulseNotUpward {
                value: self.impulse_velocity,
            });
        }
        if self.sprite_size > self.playfield_height {
            return Err(ConfigError::SpriteTooLarge {
                size: self.sprite_size,
                height: self.playfield_height,
            });
        }
        if self.sprite_x < 0.0 || self.sprite_x + self.sprite_size > self.playfield_width {
            return Err(ConfigError::SpriteOutsidePlayfield {
                x: self.sprite_x,
                width: self.playfield_width,
            });
        }
        if self.gap + 2.0 * self.gap_margin > self.playfield_height {
            return Err(ConfigError::GapDoesNotFit {
                gap: self.gap,
                margin: self.gap_margin,
                height: self.playfield_height,
            });
        }

        Ok(())
    }
}
