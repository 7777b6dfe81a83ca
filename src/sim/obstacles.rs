//! Reed pairs: spawning, scrolling, scoring and removal
//!
//! Reeds live in a `Vec` in spawn order, which is also left-to-right order
//! since they all scroll at the same speed.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::geometry::Rect;
use crate::config::GameConfig;

/// An upper and a lower reed with a gap between them
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Obstacle {
    pub id: u32,
    /// Leading (left) edge
    pub x: f32,
    /// Bottom of the upper reed
    pub gap_top: f32,
    /// Top of the lower reed
    pub gap_bottom: f32,
    /// Set once, when the trailing edge moves behind the hippo
    pub passed: bool,
}

impl Obstacle {
    #[inline]
    pub fn trailing_edge(&self, width: f32) -> f32 {
        self.x + width
    }

    /// Upper and lower reed as rectangles spanning the full playfield height
    pub fn occluders(&self, width: f32, height: f32) -> [Rect; 2] {
        [
            Rect::new(self.x, 0.0, width, self.gap_top),
            Rect::new(self.x, self.gap_bottom, width, height - self.gap_bottom),
        ]
    }
}

/// Result of one scoring/removal sweep
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SweepOutcome {
    /// Reeds that moved behind the hippo this sweep
    pub newly_passed: u32,
    /// Reeds removed off the left side
    pub evicted: usize,
}

/// Owns the live reeds and the RNG that places their gaps
#[derive(Debug, Clone)]
pub struct ObstacleField {
    obstacles: Vec<Obstacle>,
    rng: Pcg32,
    next_id: u32,
}

impl ObstacleField {
    pub fn new(seed: u64) -> Self {
        Self {
            obstacles: Vec::new(),
            rng: Pcg32::seed_from_u64(seed),
            next_id: 1,
        }
    }

    pub fn obstacles(&self) -> &[Obstacle] {
        &self.obstacles
    }

    pub fn len(&self) -> usize {
        self.obstacles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.obstacles.is_empty()
    }

    /// Drop every reed. The RNG stream continues.
    pub fn clear(&mut self) {
        self.obstacles.clear();
    }

    /// Spawn a reed pair when `tick` is a multiple of the spawn period
    pub fn maybe_spawn(&mut self, tick: u64, config: &GameConfig) -> Option<&Obstacle> {
        if tick % config.spawn_period_ticks != 0 {
            return None;
        }
        Some(self.spawn(config))
    }

    /// Append a reed pair at the right edge with a random gap position
    pub fn spawn(&mut self, config: &GameConfig) -> &Obstacle {
        let (min, max) = config.gap_top_range();
        // `gap_top_range` never returns max < min; equal bounds yield `min`
        let gap_top = self.rng.random_range(min..=max);
        self.spawn_at(config.playfield_width, gap_top, config.gap)
    }

    /// Append a reed pair with an explicit position and gap
    pub fn spawn_at(&mut self, x: f32, gap_top: f32, gap: f32) -> &Obstacle {
        let id = self.next_id;
        self.next_id += 1;
        log::debug!("Spawned reed {} at x={} gap_top={:.1}", id, x, gap_top);
        self.obstacles.push(Obstacle {
            id,
            x,
            gap_top,
            gap_bottom: gap_top + gap,
            passed: false,
        });
        &self.obstacles[self.obstacles.len() - 1]
    }

    /// Scroll every reed left by `speed`
    pub fn advance(&mut self, speed: f32) {
        for obstacle in &mut self.obstacles {
            obstacle.x -= speed;
        }
    }

    /// Whether `bounds` overlaps any reed
    pub fn collides_with(&self, bounds: &Rect, config: &GameConfig) -> bool {
        self.obstacles.iter().any(|o| {
            o.occluders(config.obstacle_width, config.playfield_height)
                .iter()
                .any(|r| r.overlaps(bounds))
        })
    }

    /// Mark reeds whose trailing edge is behind `actor_x` as passed, then
    /// remove those far enough off screen.
    pub fn score_and_evict(&mut self, actor_x: f32, config: &GameConfig) -> SweepOutcome {
        let width = config.obstacle_width;
        let mut outcome = SweepOutcome::default();

        for obstacle in &mut self.obstacles {
            if !obstacle.passed && obstacle.trailing_edge(width) < actor_x {
                obstacle.passed = true;
                outcome.newly_passed += 1;
            }
        }

        let before = self.obstacles.len();
        let cutoff = -config.eviction_margin;
        self.obstacles.retain(|o| o.trailing_edge(width) >= cutoff);
        outcome.evicted = before - self.obstacles.len();
        if outcome.evicted > 0 {
            log::debug!("Evicted {} reed(s), {} live", outcome.evicted, self.obstacles.len());
        }

        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn config() -> GameConfig {
        GameConfig::default()
    }

    #[test]
    fn test_spawn_cadence() {
        let config = config();
        let mut field = ObstacleField::new(1);
        let mut spawned_at = Vec::new();
        for tick in 0..=350 {
            if field.maybe_spawn(tick, &config).is_some() {
                spawned_at.push(tick);
            }
        }
        assert_eq!(spawned_at, vec![0, 100, 200, 300]);
        assert_eq!(field.len(), 4);
    }

    #[test]
    fn test_spawn_at_right_edge_with_configured_gap() {
        let config = config();
        let mut field = ObstacleField::new(42);
        let obstacle = field.spawn(&config).clone();
        assert_eq!(obstacle.x, config.playfield_width);
        assert!((obstacle.gap_bottom - obstacle.gap_top - config.gap).abs() < 1e-3);
        assert!(!obstacle.passed);
    }

    #[test]
    fn test_same_seed_same_gaps() {
        let config = config();
        let mut a = ObstacleField::new(7);
        let mut b = ObstacleField::new(7);
        for _ in 0..5 {
            a.spawn(&config);
            b.spawn(&config);
        }
        assert_eq!(a.obstacles(), b.obstacles());
    }

    #[test]
    fn test_collapsed_gap_range() {
        let config = GameConfig {
            playfield_height: 304.0,
            gap: 224.0,
            gap_margin: 40.0,
            ..GameConfig::default()
        };
        let mut field = ObstacleField::new(3);
        assert_eq!(field.spawn(&config).gap_top, 40.0);
    }

    #[test]
    fn test_gap_stays_inside_narrow_closed_range() {
        // Range is [40, 40.5]: both ends are valid gap positions
        let config = GameConfig {
            playfield_height: 304.5,
            gap: 224.0,
            gap_margin: 40.0,
            ..GameConfig::default()
        };
        assert_eq!(config.gap_top_range(), (40.0, 40.5));
        let mut field = ObstacleField::new(11);
        for _ in 0..64 {
            let gap_top = field.spawn(&config).gap_top;
            assert!((40.0..=40.5).contains(&gap_top), "gap_top {}", gap_top);
        }
    }

    #[test]
    fn test_advance_moves_all() {
        let config = config();
        let mut field = ObstacleField::new(1);
        field.spawn_at(300.0, 100.0, config.gap);
        field.spawn_at(600.0, 200.0, config.gap);
        field.advance(3.0);
        let xs: Vec<f32> = field.obstacles().iter().map(|o| o.x).collect();
        assert_eq!(xs, vec![297.0, 597.0]);
    }

    #[test]
    fn test_scored_exactly_once() {
        let config = config();
        let mut field = ObstacleField::new(1);
        // Trailing edge at 61: not yet behind the hippo at x = 60
        field.spawn_at(1.0, 100.0, config.gap);
        assert_eq!(field.score_and_evict(60.0, &config).newly_passed, 0);

        field.advance(3.0);
        assert_eq!(field.score_and_evict(60.0, &config).newly_passed, 1);
        assert!(field.obstacles()[0].passed);

        field.advance(3.0);
        assert_eq!(field.score_and_evict(60.0, &config).newly_passed, 0);
    }

    #[test]
    fn test_trailing_edge_equal_to_actor_is_not_passed() {
        let config = config();
        let mut field = ObstacleField::new(1);
        field.spawn_at(0.0, 100.0, config.gap);
        assert_eq!(field.score_and_evict(60.0, &config).newly_passed, 0);
    }

    #[test]
    fn test_eviction_past_margin() {
        let config = config();
        let mut field = ObstacleField::new(1);
        // Trailing edge exactly at -50 stays; one more step removes it
        field.spawn_at(-110.0, 100.0, config.gap);
        field.spawn_at(200.0, 100.0, config.gap);
        let outcome = field.score_and_evict(60.0, &config);
        assert_eq!(outcome.evicted, 0);
        assert_eq!(field.len(), 2);

        field.advance(1.0);
        let outcome = field.score_and_evict(60.0, &config);
        assert_eq!(outcome.evicted, 1);
        assert_eq!(field.len(), 1);
        assert_eq!(field.obstacles()[0].x, 199.0);

        // Never comes back
        for _ in 0..10 {
            field.advance(3.0);
            field.score_and_evict(60.0, &config);
            assert!(field.obstacles().iter().all(|o| o.id != 1));
        }
    }

    #[test]
    fn test_collision_with_top_and_bottom_reed() {
        let config = config();
        let mut field = ObstacleField::new(1);
        field.spawn_at(100.0, 200.0, config.gap); // gap spans 200..424

        // Inside the gap horizontally overlapping the reed
        assert!(!field.collides_with(&Rect::new(80.0, 250.0, 64.0, 64.0), &config));
        // One pixel into the upper reed
        assert!(field.collides_with(&Rect::new(80.0, 199.0, 64.0, 64.0), &config));
        // One pixel into the lower reed
        assert!(field.collides_with(&Rect::new(80.0, 361.0, 64.0, 64.0), &config));
        // Touching the upper reed's bottom edge only
        assert!(!field.collides_with(&Rect::new(80.0, 200.0, 64.0, 64.0), &config));
        // Far to the left of the reed
        assert!(!field.collides_with(&Rect::new(0.0, 0.0, 64.0, 64.0), &config));
    }

    proptest! {
        #[test]
        fn gaps_stay_within_margins(seed in any::<u64>(), height in 400.0f32..1600.0) {
            let config = GameConfig::for_playfield(480.0, height);
            let mut field = ObstacleField::new(seed);
            for _ in 0..16 {
                let o = field.spawn(&config).clone();
                prop_assert!(o.gap_top >= config.gap_margin);
                prop_assert!(o.gap_bottom <= config.playfield_height - config.gap_margin + 1e-3);
                prop_assert!((o.gap_bottom - o.gap_top - config.gap).abs() < 1e-3);
            }
        }
    }
}
