//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One step per display frame, no wall-clock time
//! - Seeded RNG only
//! - Reeds kept in spawn order
//! - No rendering or platform dependencies

pub mod actor;
pub mod autopilot;
pub mod geometry;
pub mod obstacles;
pub mod state;
pub mod tick;

pub use actor::{Actor, BoundaryContact};
pub use geometry::{Rect, rects_overlap};
pub use obstacles::{Obstacle, ObstacleField, SweepOutcome};
pub use state::{CrashCause, GameEvent, GamePhase, GameSession, Snapshot};
pub use tick::{Command, tick};
