//! Shadow spawning
//!
//! Runs on a fixed wall-clock cadence while a session is running. Lanes are
//! drawn uniformly at random without replacement; a lane whose shadow is
//! still near the spawn edge is skipped so two shadows can never stack there.
//! When every lane is blocked the whole cycle is skipped - that is a normal
//! outcome, not an error.

use rand::Rng;

use super::lanes::LaneLayout;
use super::state::{SessionState, Shadow, ShadowTint};
use crate::consts::*;

/// Try to spawn one shadow at the spawn edge.
///
/// `near_spawn_x` is the horizontal band inside which an existing shadow
/// blocks its lane. Returns the spawned shadow (also pushed onto the active
/// set), or `None` when not running or when every candidate lane is blocked
/// this cycle.
pub fn spawn_shadow(
    state: &mut SessionState,
    layout: &LaneLayout,
    near_spawn_x: f32,
) -> Option<Shadow> {
    if !state.is_running() {
        return None;
    }

    let mut candidates: Vec<u32> = (0..=layout.max_lane()).collect();

    while !candidates.is_empty() {
        let index = state.rng.random_range(0..candidates.len());
        let lane = candidates.swap_remove(index);

        if state
            .shadows
            .iter()
            .any(|s| s.lane == lane && s.x > near_spawn_x)
        {
            continue;
        }

        let tint = ShadowTint::ALL[state.rng.random_range(0..ShadowTint::ALL.len())];
        let shadow = Shadow {
            id: state.next_shadow_id(),
            x: SPAWN_X,
            lane,
            speed_offset: state.rng.random_range(0.0..SPEED_OFFSET_MAX),
            tint,
        };
        state.shadows.push(shadow.clone());
        return Some(shadow);
    }

    None
}
