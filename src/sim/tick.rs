//! Per-frame simulation tick
//!
//! Advances every shadow by the elapsed time, clears the ones that scrolled
//! off the left edge, then runs collision detection over what remains.
//! Clearing (and its score increment) always happens before the collision
//! pass, so one shadow can never both score and end the run in the same
//! frame.

use super::collision::{overlaps_with_pad, player_rect, shadow_rect};
use super::lanes::LaneLayout;
use super::state::SessionState;
use crate::consts::*;

/// A shadow that scrolled off the left edge this tick
#[derive(Debug, Clone, Copy)]
pub struct ClearedShadow {
    pub id: u32,
    /// Final horizontal position, for the particle burst
    pub x: f32,
    pub lane: u32,
}

/// What one tick produced
#[derive(Debug, Default)]
pub struct TickOutcome {
    /// Shadows cleared (and scored) this tick
    pub cleared: Vec<ClearedShadow>,
    /// The player overlapped a shadow; the session must end
    pub collided: bool,
}

/// Advance the session by `dt_ms` of elapsed wall-clock time.
///
/// Movement is scaled against a nominal 16 ms frame, so a throttled or
/// skipped frame produces the same trajectory as several fast ones. No-op
/// unless the session is running.
pub fn tick(state: &mut SessionState, layout: &LaneLayout, dt_ms: f64) -> TickOutcome {
    let mut outcome = TickOutcome::default();
    if !state.is_running() {
        return outcome;
    }

    let scale = (dt_ms / FRAME_MS) as f32;

    for shadow in &mut state.shadows {
        shadow.x -= (state.base_speed + shadow.speed_offset) * scale;
    }

    state.shadows.retain(|s| {
        if s.x < DESPAWN_X {
            outcome.cleared.push(ClearedShadow {
                id: s.id,
                x: s.x,
                lane: s.lane,
            });
            false
        } else {
            true
        }
    });
    state.score += outcome.cleared.len() as u32;

    let player = player_rect(state.player.lane(), layout);
    outcome.collided = state
        .shadows
        .iter()
        .any(|s| overlaps_with_pad(&player, &shadow_rect(s, layout), COLLISION_PAD));

    state.base_speed = BASE_SPEED + state.score as f32 * SPEED_PER_POINT;

    outcome
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::{Phase, Shadow, ShadowTint};

    fn running_state(layout: &LaneLayout) -> SessionState {
        let mut state = SessionState::new(1, layout);
        state.phase = Phase::Running;
        state
    }

    fn shadow(id: u32, x: f32, lane: u32) -> Shadow {
        Shadow {
            id,
            x,
            lane,
            speed_offset: 0.0,
            tint: ShadowTint::Black,
        }
    }

    #[test]
    fn test_shadow_past_threshold_is_cleared_and_scored() {
        let layout = LaneLayout::with_max_lane(9);
        let mut state = running_state(&layout);
        state.shadows.push(shadow(1, DESPAWN_X - 1.0, 0));

        let outcome = tick(&mut state, &layout, 16.0);

        assert_eq!(outcome.cleared.len(), 1);
        assert_eq!(outcome.cleared[0].id, 1);
        assert!(state.shadows.is_empty());
        assert_eq!(state.score, 1);
        assert_eq!(state.base_speed, BASE_SPEED + SPEED_PER_POINT);
        assert!(!outcome.collided);
    }

    #[test]
    fn test_movement_is_frame_rate_independent() {
        let layout = LaneLayout::with_max_lane(9);
        let mut slow = running_state(&layout);
        let mut fast = running_state(&layout);
        slow.shadows.push(shadow(1, SPAWN_X, 0));
        fast.shadows.push(shadow(1, SPAWN_X, 0));

        // One 32ms frame must travel as far as two 16ms frames
        tick(&mut slow, &layout, 32.0);
        tick(&mut fast, &layout, 16.0);
        tick(&mut fast, &layout, 16.0);

        assert!((slow.shadows[0].x - fast.shadows[0].x).abs() < 1e-4);
    }

    #[test]
    fn test_base_speed_tracks_score() {
        let layout = LaneLayout::with_max_lane(9);
        let mut state = running_state(&layout);
        for id in 0..5 {
            state.shadows.push(shadow(id, DESPAWN_X - 1.0, id % 2));
        }

        tick(&mut state, &layout, 16.0);

        assert_eq!(state.score, 5);
        assert!((state.base_speed - (BASE_SPEED + 5.0 * SPEED_PER_POINT)).abs() < 1e-6);
    }

    #[test]
    fn test_overlap_reports_collision() {
        let layout = LaneLayout::with_max_lane(9);
        let mut state = running_state(&layout);
        let player_lane = state.player.lane();
        state.shadows.push(shadow(1, PLAYER_X, player_lane));

        let outcome = tick(&mut state, &layout, 0.0);

        assert!(outcome.collided);
        assert!(outcome.cleared.is_empty());
    }

    #[test]
    fn test_other_lane_does_not_collide() {
        let layout = LaneLayout::with_max_lane(9);
        let mut state = running_state(&layout);
        let other_lane = (state.player.lane() + 1) % layout.lane_count();
        state.shadows.push(shadow(1, PLAYER_X, other_lane));

        let outcome = tick(&mut state, &layout, 16.0);

        assert!(!outcome.collided);
    }

    #[test]
    fn test_tick_is_noop_unless_running() {
        let layout = LaneLayout::with_max_lane(9);
        let mut state = SessionState::new(1, &layout);
        state.shadows.push(shadow(1, DESPAWN_X - 1.0, 0));

        let outcome = tick(&mut state, &layout, 16.0);

        assert!(outcome.cleared.is_empty());
        assert!(!outcome.collided);
        assert_eq!(state.score, 0);
        assert_eq!(state.shadows.len(), 1);
    }

    #[test]
    fn test_score_never_decreases() {
        let layout = LaneLayout::with_max_lane(9);
        let mut state = running_state(&layout);
        state.shadows.push(shadow(1, DESPAWN_X + 5.0, 0));

        let mut last = state.score;
        for _ in 0..20 {
            tick(&mut state, &layout, 16.0);
            assert!(state.score >= last);
            last = state.score;
        }
        assert_eq!(state.score, 1);
    }
}
