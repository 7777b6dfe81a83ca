//! Frame scheduler
//!
//! The host owns the clock (requestAnimationFrame on web, a plain loop on
//! native) and calls `GameLoop::tick` once per frame. The loop advances the
//! session and fires the end-of-game notification on the frame a run ends.

use crate::platform::{GameOverNotifier, NoopNotifier, NotifyError};
use crate::sim::{GameSession, autopilot, tick};

/// Drives one `GameSession` and its end-of-game notifier
pub struct GameLoop<N: GameOverNotifier = NoopNotifier> {
    session: GameSession,
    notifier: N,
    /// Idle/demo mode: the autopilot flaps for the player
    autopilot: bool,
}

impl GameLoop<NoopNotifier> {
    /// Loop without anyone listening for game over
    pub fn headless(session: GameSession) -> Self {
        Self::new(session, NoopNotifier)
    }
}

impl<N: GameOverNotifier> GameLoop<N> {
    pub fn new(session: GameSession, notifier: N) -> Self {
        Self {
            session,
            notifier,
            autopilot: false,
        }
    }

    pub fn session(&self) -> &GameSession {
        &self.session
    }

    /// Input adapters apply commands through this
    pub fn session_mut(&mut self) -> &mut GameSession {
        &mut self.session
    }

    pub fn notifier(&self) -> &N {
        &self.notifier
    }

    pub fn autopilot(&self) -> bool {
        self.autopilot
    }

    pub fn set_autopilot(&mut self, enabled: bool) {
        self.autopilot = enabled;
    }

    /// Run one frame. Returns true on the frame the run ended.
    pub fn tick(&mut self) -> bool {
        if self.autopilot {
            if let Some(command) = autopilot::decide(&self.session.snapshot()) {
                self.session.apply(command);
            }
        }

        let was_running = self.session.is_running();
        tick(&mut self.session);
        let ended = was_running && !self.session.is_running();

        if ended {
            self.notify_game_over();
        }
        ended
    }

    /// Fire-and-forget: failures are logged, never retried
    fn notify_game_over(&mut self) {
        let score = self.session.score();
        match self.notifier.notify_game_over(score) {
            Ok(()) => {}
            Err(NotifyError::Unavailable) => {
                log::debug!("No game-over notifier available");
            }
            Err(err) => log::warn!("Game-over notification failed: {}", err),
        }
    }
}
