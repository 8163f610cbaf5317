//! Padded rectangle overlap
//!
//! Collisions are axis-aligned rectangle tests with the player's rectangle
//! inset by a small pad on every side, so grazing contact along an edge does
//! not end the run.

use glam::Vec2;

use super::lanes::LaneLayout;
use super::state::Shadow;
use crate::consts::*;

/// An axis-aligned rectangle in play-area coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub min: Vec2,
    pub max: Vec2,
}

impl Rect {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self {
            min: Vec2::new(x, y),
            max: Vec2::new(x + w, y + h),
        }
    }
}

/// The player's rectangle for its current lane
pub fn player_rect(lane: u32, layout: &LaneLayout) -> Rect {
    Rect::new(PLAYER_X, layout.lane_to_y(lane), ENTITY_SIZE, ENTITY_SIZE)
}

/// A shadow's rectangle at its current position
pub fn shadow_rect(shadow: &Shadow, layout: &LaneLayout) -> Rect {
    Rect::new(
        shadow.x,
        layout.lane_to_y(shadow.lane),
        ENTITY_SIZE,
        ENTITY_SIZE,
    )
}

/// Overlap test with rectangle `a` inset by `pad` on every side.
///
/// Separation on either axis means no collision; the inset makes contact
/// shallower than `pad` count as separation.
pub fn overlaps_with_pad(a: &Rect, b: &Rect, pad: f32) -> bool {
    let separated = a.max.x - pad < b.min.x
        || a.min.x + pad > b.max.x
        || a.max.y - pad < b.min.y
        || a.min.y + pad > b.max.y;
    !separated
}
