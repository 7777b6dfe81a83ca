//! Game session: everything one run of the game owns

use serde::Serialize;

use super::actor::Actor;
use super::obstacles::{Obstacle, ObstacleField};
use crate::config::GameConfig;
use crate::error::ConfigError;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum GamePhase {
    /// Hippo is flying, reeds are scrolling
    Running,
    /// Run is over, waiting for a restart
    Ended,
}

/// What ended a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum CrashCause {
    Floor,
    Obstacle,
}

/// Things that happened during a tick or command, for audio and HUD
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum GameEvent {
    Flapped,
    Spawned { id: u32 },
    Scored { score: u32 },
    Evicted { count: usize },
    Crashed { cause: CrashCause, score: u32 },
    Restarted,
}

/// Read-only view handed to the renderer and the HUD once per frame
#[derive(Debug, Clone, Copy, Serialize)]
pub struct Snapshot<'a> {
    pub actor: &'a Actor,
    pub obstacles: &'a [Obstacle],
    pub score: u32,
    pub phase: GamePhase,
    pub tick: u64,
    #[serde(skip)]
    pub config: &'a GameConfig,
}

/// One game: the hippo, the reeds, score and tick counter.
///
/// Created once at startup and reset in place on restart.
#[derive(Debug, Clone)]
pub struct GameSession {
    pub(crate) config: GameConfig,
    pub(crate) actor: Actor,
    pub(crate) obstacles: ObstacleField,
    pub(crate) phase: GamePhase,
    pub(crate) score: u32,
    pub(crate) tick_counter: u64,
    pub(crate) events: Vec<GameEvent>,
}

impl GameSession {
    /// Start a new run. The config is validated first.
    pub fn new(config: GameConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        log::info!(
            "New session {}x{} (seed {})",
            config.playfield_width,
            config.playfield_height,
            config.effective_seed()
        );
        Ok(Self {
            actor: Actor::new(&config),
            obstacles: ObstacleField::new(config.effective_seed()),
            phase: GamePhase::Running,
            score: 0,
            tick_counter: 0,
            events: Vec::new(),
            config,
        })
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn actor(&self) -> &Actor {
        &self.actor
    }

    pub fn obstacles(&self) -> &[Obstacle] {
        self.obstacles.obstacles()
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn is_running(&self) -> bool {
        self.phase == GamePhase::Running
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn tick_counter(&self) -> u64 {
        self.tick_counter
    }

    pub fn snapshot(&self) -> Snapshot<'_> {
        Snapshot {
            actor: &self.actor,
            obstacles: self.obstacles.obstacles(),
            score: self.score,
            phase: self.phase,
            tick: self.tick_counter,
            config: &self.config,
        }
    }

    /// Events recorded since the last drain
    pub fn events(&self) -> &[GameEvent] {
        &self.events
    }

    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Follow a viewport resize. Live reeds keep their gap; new spawns and
    /// the boundary clamp use the new dimensions.
    pub fn resize(&mut self, width: f32, height: f32) -> Result<(), ConfigError> {
        let config = GameConfig {
            playfield_width: width,
            playfield_height: height,
            ..self.config.clone()
        };
        config.validate()?;
        log::debug!("Playfield resized to {}x{}", width, height);
        self.config = config;
        Ok(())
    }

    /// Back to the initial state of a run (RNG stream is kept)
    pub(crate) fn reset(&mut self) {
        self.actor.reset(&self.config);
        self.obstacles.clear();
        self.score = 0;
        self.tick_counter = 0;
        self.phase = GamePhase::Running;
    }

    pub(crate) fn push_event(&mut self, event: GameEvent) {
        self.events.push(event);
    }
}
