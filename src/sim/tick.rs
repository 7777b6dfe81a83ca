//! Per-frame simulation step and player commands
//!
//! One call to `tick` is one display frame. Commands are applied the moment
//! they arrive; there is no input buffer.

use super::actor::BoundaryContact;
use super::state::{CrashCause, GameEvent, GamePhase, GameSession};

/// Semantic player commands produced by the input layer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Flap (only while running)
    Impulse,
    /// Start a new run (only once ended)
    Restart,
}

impl Command {
    /// A tap flaps while running and restarts once the run is over
    pub fn for_tap(phase: GamePhase) -> Self {
        match phase {
            GamePhase::Running => Command::Impulse,
            GamePhase::Ended => Command::Restart,
        }
    }
}

impl GameSession {
    /// Flap. Returns false (and does nothing) once the run has ended.
    pub fn on_impulse_requested(&mut self) -> bool {
        if self.phase != GamePhase::Running {
            return false;
        }
        self.actor.apply_impulse(self.config.impulse_velocity);
        self.push_event(GameEvent::Flapped);
        true
    }

    /// Restart. Returns false (and does nothing) while a run is in progress.
    pub fn on_restart_requested(&mut self) -> bool {
        if self.phase != GamePhase::Ended {
            return false;
        }
        self.reset();
        self.push_event(GameEvent::Restarted);
        log::info!("Game restarted");
        true
    }

    pub fn apply(&mut self, command: Command) -> bool {
        match command {
            Command::Impulse => self.on_impulse_requested(),
            Command::Restart => self.on_restart_requested(),
        }
    }

    /// Raw gesture from the host: flap or restart depending on the phase
    pub fn on_tap(&mut self) -> bool {
        self.apply(Command::for_tap(self.phase))
    }
}

/// Advance the session by one frame
pub fn tick(session: &mut GameSession) {
    if session.phase == GamePhase::Running {
        step_running(session);
    }
    session.tick_counter += 1;
}

fn step_running(session: &mut GameSession) {
    let config = &session.config;
    let mut crash = None;

    // Hippo physics
    session.actor.apply_gravity_step(config.gravity);
    match session.actor.clamp_to_playfield(config.playfield_height) {
        BoundaryContact::Floor => crash = Some(CrashCause::Floor),
        BoundaryContact::Ceiling | BoundaryContact::None => {}
    }

    // Reeds
    let spawned = session
        .obstacles
        .maybe_spawn(session.tick_counter, config)
        .map(|o| o.id);
    session.obstacles.advance(config.obstacle_speed);

    if crash.is_none() && session.obstacles.collides_with(&session.actor.bounds(), config) {
        crash = Some(CrashCause::Obstacle);
    }

    let sweep = session.obstacles.score_and_evict(session.actor.x, config);

    if let Some(id) = spawned {
        session.push_event(GameEvent::Spawned { id });
    }
    for _ in 0..sweep.newly_passed {
        session.score += 1;
        let score = session.score;
        session.push_event(GameEvent::Scored { score });
    }
    if sweep.evicted > 0 {
        session.push_event(GameEvent::Evicted {
            count: sweep.evicted,
        });
    }

    if let Some(cause) = crash {
        session.phase = GamePhase::Ended;
        let score = session.score;
        log::info!("Game over ({:?}) with score {}", cause, score);
        session.push_event(GameEvent::Crashed { cause, score });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;
    use crate::sim::Obstacle;

    fn session() -> GameSession {
        GameSession::new(GameConfig::default()).unwrap()
    }

    #[test]
    fn test_gravity_integration_per_tick() {
        let mut session = session();
        let config = session.config().clone();
        for _ in 0..5 {
            let prior_v = session.actor().velocity;
            let prior_y = session.actor().y;
            tick(&mut session);
            let v = session.actor().velocity;
            assert_eq!(v, prior_v + config.gravity);
            assert_eq!(session.actor().y, prior_y + v);
        }
    }

    #[test]
    fn test_impulse_is_not_additive() {
        let mut session = session();
        assert!(session.on_impulse_requested());
        assert!(session.on_impulse_requested());
        assert!(session.on_impulse_requested());
        assert_eq!(session.actor().velocity, session.config().impulse_velocity);
    }

    #[test]
    fn test_first_tick_spawns_and_counts() {
        let mut session = session();
        tick(&mut session);
        assert_eq!(session.obstacles().len(), 1);
        assert_eq!(session.tick_counter(), 1);
        assert_eq!(
            session.obstacles()[0].x,
            session.config().playfield_width - session.config().obstacle_speed
        );
        assert!(session.events().contains(&GameEvent::Spawned { id: 1 }));
    }

    #[test]
    fn test_spawn_every_period() {
        // Margins pin every gap to 288..512, around the resting hippo
        let config = GameConfig {
            gravity: 0.0,
            gap_margin: 288.0,
            ..Default::default()
        };
        let mut session = GameSession::new(config).unwrap();
        for _ in 0..301 {
            tick(&mut session);
        }
        let spawns = session
            .events()
            .iter()
            .filter(|e| matches!(e, GameEvent::Spawned { .. }))
            .count();
        assert_eq!(spawns, 4);
    }

    #[test]
    fn test_floor_violation_ends_game_without_obstacles() {
        let config = GameConfig {
            gravity: 1.0,
            ..Default::default()
        };
        let mut session = GameSession::new(config).unwrap();
        let floor = session.config().playfield_height - session.actor().size;
        session.actor.y = floor - 1.0;
        session.actor.velocity = 0.0;
        session.tick_counter = 1; // no spawn this tick
        tick(&mut session);

        assert!(session.obstacles().is_empty());

        assert_eq!(session.actor().y + session.actor().size, 800.0);
        assert_eq!(session.phase(), GamePhase::Ended);
        assert!(session.events().contains(&GameEvent::Crashed {
            cause: CrashCause::Floor,
            score: 0
        }));
    }

    #[test]
    fn test_ceiling_does_not_end_game() {
        let mut session = session();
        session.actor.y = 2.0;
        session.on_impulse_requested();
        tick(&mut session);
        assert_eq!(session.actor().y, 0.0);
        assert_eq!(session.actor().velocity, 0.0);
        assert_eq!(session.phase(), GamePhase::Running);
    }

    #[test]
    fn test_collision_ends_game_and_blocks_impulse() {
        let mut session = session();
        let actor = session.actor().clone();
        let width = session.config().obstacle_width;
        // Upper reed bottom one pixel below the hippo's top edge after the
        // next gravity step, reed already horizontally over the hippo
        let next_y = actor.y + session.config().gravity;
        let gap = session.config().gap;
        session
            .obstacles
            .spawn_at(actor.x + 3.0 + 10.0 - width, next_y + 1.0, gap);
        session.tick_counter = 1; // skip the spawn on tick 0

        tick(&mut session);
        assert_eq!(session.phase(), GamePhase::Ended);

        let y = session.actor().y;
        assert!(!session.on_impulse_requested());
        tick(&mut session);
        assert_eq!(session.actor().y, y);
        assert_eq!(session.actor().velocity, session.config().gravity);
    }

    #[test]
    fn test_scoring_and_eviction_through_ticks() {
        let config = GameConfig {
            gravity: 0.0,
            spawn_period_ticks: 10_000,
            ..Default::default()
        };
        let mut session = GameSession::new(config).unwrap();
        session.tick_counter = 1;
        let gap = session.config().gap;
        // Gap wide around the hippo so it never collides
        let gap_top = session.actor().y - 50.0;
        session.obstacles.spawn_at(200.0, gap_top, gap);
        session.obstacles.spawn_at(500.0, gap_top, gap);

        // First reed behind the hippo but still inside the eviction margin
        for _ in 0..100 {
            tick(&mut session);
        }
        assert_eq!(session.score(), 1);
        assert_eq!(session.obstacles().len(), 2);

        // First reed gone, second one passed
        for _ in 0..100 {
            tick(&mut session);
        }
        assert_eq!(session.score(), 2);
        assert_eq!(session.obstacles().len(), 1);
        assert!(session.obstacles().iter().all(|o: &Obstacle| o.passed));

        for _ in 0..100 {
            tick(&mut session);
        }
        assert!(session.obstacles().is_empty());
        assert_eq!(session.score(), 2);
        assert_eq!(session.phase(), GamePhase::Running);

        let scored: Vec<u32> = session
            .events()
            .iter()
            .filter_map(|e| match e {
                GameEvent::Scored { score } => Some(*score),
                _ => None,
            })
            .collect();
        assert_eq!(scored, vec![1, 2]);
    }

    #[test]
    fn test_tick_counter_advances_while_ended() {
        let mut session = session();
        session.phase = GamePhase::Ended;
        session.tick_counter = 10;
        let y = session.actor().y;
        tick(&mut session);
        assert_eq!(session.tick_counter(), 11);
        assert_eq!(session.actor().y, y);
    }

    #[test]
    fn test_restart_resets_everything() {
        let mut session = session();
        for _ in 0..3 {
            tick(&mut session);
        }
        session.phase = GamePhase::Ended;
        session.score = 7;
        session.actor.velocity = 5.0;
        session.actor.y = 123.0;
        assert!(!session.obstacles().is_empty());
        assert!(session.tick_counter() > 0);

        assert!(session.on_restart_requested());
        assert_eq!(session.score(), 0);
        assert!(session.obstacles().is_empty());
        assert_eq!(session.tick_counter(), 0);
        assert_eq!(session.actor().y, session.config().initial_actor_y());
        assert_eq!(session.actor().velocity, 0.0);
        assert_eq!(session.phase(), GamePhase::Running);
        assert_eq!(session.events().last(), Some(&GameEvent::Restarted));
    }

    #[test]
    fn test_restart_ignored_while_running() {
        let mut session = session();
        tick(&mut session);
        assert!(!session.on_restart_requested());
        assert_eq!(session.tick_counter(), 1);
        assert_eq!(session.obstacles().len(), 1);
    }

    #[test]
    fn test_tap_maps_to_phase_command() {
        assert_eq!(Command::for_tap(GamePhase::Running), Command::Impulse);
        assert_eq!(Command::for_tap(GamePhase::Ended), Command::Restart);

        let mut session = session();
        assert!(session.on_tap());
        assert_eq!(session.actor().velocity, session.config().impulse_velocity);

        session.phase = GamePhase::Ended;
        assert!(session.on_tap());
        assert_eq!(session.phase(), GamePhase::Running);
    }

    #[test]
    fn test_determinism() {
        let mut a = session();
        let mut b = session();
        for i in 0..250 {
            if i % 17 == 0 {
                a.on_impulse_requested();
                b.on_impulse_requested();
            }
            tick(&mut a);
            tick(&mut b);
        }
        assert_eq!(a.obstacles(), b.obstacles());
        assert_eq!(a.actor(), b.actor());
        assert_eq!(a.phase(), b.phase());
    }
}
