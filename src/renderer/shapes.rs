//! Shape generation for the savanna scene
//!
//! Everything is built in playfield pixels (origin top-left, y down); the
//! pipeline maps to clip space when uploading.

use super::vertex::{Vertex, colors};
use crate::consts::GROUND_HEIGHT;
use crate::sim::{GamePhase, Snapshot};

/// Width of the leaf strip painted on the leading side of each reed
const LEAF_WIDTH: f32 = 6.0;
/// Leaves cover at most this much of a reed, starting at its root
const LEAF_MAX_LENGTH: f32 = 80.0;

/// Append an axis-aligned rectangle as two triangles
pub fn rect(out: &mut Vec<Vertex>, x: f32, y: f32, w: f32, h: f32, color: [f32; 4]) {
    if w <= 0.0 || h <= 0.0 {
        return;
    }
    let (x0, y0, x1, y1) = (x, y, x + w, y + h);
    out.extend_from_slice(&[
        Vertex::new(x0, y0, color),
        Vertex::new(x1, y0, color),
        Vertex::new(x0, y1, color),
        Vertex::new(x1, y0, color),
        Vertex::new(x1, y1, color),
        Vertex::new(x0, y1, color),
    ]);
}

/// Build the whole frame: sky, ground, reeds, hippo and the game-over shade
pub fn scene(snapshot: &Snapshot<'_>) -> Vec<Vertex> {
    let config = snapshot.config;
    let (w, h) = (config.playfield_width, config.playfield_height);
    let reed_w = config.obstacle_width;

    let mut out = Vec::with_capacity(6 * (3 + snapshot.obstacles.len() * 4 + 1));

    rect(&mut out, 0.0, 0.0, w, h, colors::SKY);
    rect(&mut out, 0.0, h - GROUND_HEIGHT, w, GROUND_HEIGHT, colors::GROUND);

    for reed in snapshot.obstacles {
        let lower_h = h - reed.gap_bottom;
        rect(&mut out, reed.x, 0.0, reed_w, reed.gap_top, colors::REED);
        rect(&mut out, reed.x, reed.gap_bottom, reed_w, lower_h, colors::REED);

        rect(
            &mut out,
            reed.x - LEAF_WIDTH,
            0.0,
            LEAF_WIDTH,
            reed.gap_top.min(LEAF_MAX_LENGTH),
            colors::LEAF,
        );
        rect(
            &mut out,
            reed.x - LEAF_WIDTH,
            reed.gap_bottom,
            LEAF_WIDTH,
            lower_h.min(LEAF_MAX_LENGTH),
            colors::LEAF,
        );
    }

    let hippo = snapshot.actor;
    rect(&mut out, hippo.x, hippo.y, hippo.size, hippo.size, colors::HIPPO);

    if snapshot.phase == GamePhase::Ended {
        rect(&mut out, 0.0, 0.0, w, h, colors::GAME_OVER_SHADE);
    }

    out
}
