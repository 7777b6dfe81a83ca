//! Configuration errors
//!
//! The simulation itself has no failure paths; everything that can go wrong is
//! caught once, when a `GameConfig` is validated.

use core::fmt;

#[derive(Clone, Debug, PartialEq)]
pub enum ConfigError {
    /// A numeric field is NaN or infinite
    NonFinite { field: &'static str },
    /// Playfield width or height is zero or negative
    InvalidPlayfield { width: f32, height: f32 },
    /// A size or rate that must be strictly positive
    NonPositive { field: &'static str, value: f32 },
    /// A margin or acceleration that must not be negative
    Negative { field: &'static str, value: f32 },
    ZeroSpawnPeriod,
    /// Flap velocity must point up (negative y)
    ImpulseNotUpward { value: f32 },
    SpriteTooLarge { size: f32, height: f32 },
    SpriteOutsidePlayfield { x: f32, width: f32 },
    /// gap + 2 * margin does not fit in the playfield height
    GapDoesNotFit { gap: f32, margin: f32, height: f32 },
    /// JSON config could not be parsed
    Parse(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NonFinite { field } => write!(f, "{field} must be a finite number"),
            Self::InvalidPlayfield { width, height } => {
                write!(f, "playfield must be positive, got {width}x{height}")
            }
            Self::NonPositive { field, value } => {
                write!(f, "{field} must be greater than zero, got {value}")
            }
            Self::Negative { field, value } => {
                write!(f, "{field} must not be negative, got {value}")
            }
            Self::ZeroSpawnPeriod => write!(f, "spawn_period_ticks must be at least 1"),
            Self::ImpulseNotUpward { value } => {
                write!(f, "impulse_velocity must be negative (upward), got {value}")
            }
            Self::SpriteTooLarge { size, height } => {
                write!(f, "sprite size {size} does not fit playfield height {height}")
            }
            Self::SpriteOutsidePlayfield { x, width } => {
                write!(f, "sprite_x {x} lies outside playfield width {width}")
            }
            Self::GapDoesNotFit { gap, margin, height } => write!(
                f,
                "gap {gap} with margin {margin} on both sides exceeds playfield height {height}"
            ),
            Self::Parse(msg) => write!(f, "invalid config JSON: {msg}"),
        }
    }
}

impl std::error::Error for ConfigError {}

impl From<serde_json::Error> for ConfigError {
    fn from(err: serde_json::Error) -> Self {
        Self::Parse(err.to_string())
    }
}
