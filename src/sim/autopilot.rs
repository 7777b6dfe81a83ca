//! Idle/demo mode - a tiny controller that plays the game
//!
//! Keeps the hippo's bottom edge just above the lower reed of the next gap:
//! flap whenever the coming gravity step would carry it below that line.

use super::state::{GamePhase, Snapshot};
use super::tick::Command;

/// Distance kept between the hippo and the lower reed
const FLOOR_CLEARANCE: f32 = 6.0;

/// Decide whether to flap this frame. Never restarts a finished run.
pub fn decide(snapshot: &Snapshot<'_>) -> Option<Command> {
    if snapshot.phase != GamePhase::Running {
        return None;
    }

    let config = snapshot.config;
    let actor = snapshot.actor;

    // Nearest reed the hippo has not fully cleared yet
    let target_line = snapshot
        .obstacles
        .iter()
        .find(|o| o.trailing_edge(config.obstacle_width) >= actor.x)
        .map(|o| o.gap_bottom - FLOOR_CLEARANCE)
        .unwrap_or(config.playfield_height * 0.5 + config.gap * 0.5);

    let next_bottom = actor.bottom() + actor.velocity + config.gravity;
    (next_bottom > target_line).then_some(Command::Impulse)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;
    use crate::sim::{GameSession, tick};

    #[test]
    fn test_flaps_when_about_to_sink_below_gap() {
        let mut session = GameSession::new(GameConfig::default()).unwrap();
        let gap = session.config().gap;
        // Gap bottom right at the hippo's bottom edge
        let gap_top = session.actor().bottom() - gap;
        session.obstacles.spawn_at(200.0, gap_top, gap);
        session.actor.velocity = 2.0;
        assert_eq!(decide(&session.snapshot()), Some(Command::Impulse));
    }

    #[test]
    fn test_holds_when_well_above_line() {
        let mut session = GameSession::new(GameConfig::default()).unwrap();
        let gap = session.config().gap;
        let gap_top = session.actor().y - 20.0;
        session.obstacles.spawn_at(200.0, gap_top, gap);
        assert_eq!(decide(&session.snapshot()), None);
    }

    #[test]
    fn test_ignores_cleared_reeds() {
        let mut session = GameSession::new(GameConfig::default()).unwrap();
        let gap = session.config().gap;
        // Behind the hippo with a gap far above it: irrelevant
        session.obstacles.spawn_at(-30.0, 40.0, gap);
        assert_eq!(decide(&session.snapshot()), None);
    }

    #[test]
    fn test_never_restarts() {
        let mut session = GameSession::new(GameConfig::default()).unwrap();
        session.phase = GamePhase::Ended;
        session.actor.y = 730.0;
        assert_eq!(decide(&session.snapshot()), None);
    }

    #[test]
    fn test_clears_reeds_with_fixed_gap() {
        // Margins pin every gap to 200..400
        let config = GameConfig {
            playfield_width: 400.0,
            playfield_height: 600.0,
            gap: 200.0,
            gap_margin: 200.0,
            ..GameConfig::default()
        };
        let mut session = GameSession::new(config).unwrap();
        for _ in 0..1000 {
            if let Some(command) = decide(&session.snapshot()) {
                session.apply(command);
            }
            tick(&mut session);
        }
        assert_eq!(session.phase(), GamePhase::Running);
        assert!(session.score() >= 8, "score {}", session.score());
    }
}
