//! Lane geometry
//!
//! Lanes are the discrete vertical tracks the player and shadows occupy.
//! Every conversion clamps out-of-range values into `[0, max_lane]` - a move
//! is never rejected, only snapped to bounds.

use crate::consts::*;

/// Discrete lane bounds derived from the current play-area size
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LaneLayout {
    max_lane: u32,
}

impl LaneLayout {
    /// Build a layout for the current play area.
    ///
    /// Narrow viewports reserve vertical space for the on-screen touch
    /// controls, which lowers the bottom lane. Recomputed at session start
    /// and whenever the play area resizes.
    pub fn from_viewport(play_height: f32, viewport_width: f32) -> Self {
        let touch_offset = if viewport_width <= TOUCH_BREAKPOINT {
            TOUCH_CONTROLS_OFFSET
        } else {
            0.0
        };
        let usable = play_height - touch_offset - ENTITY_SIZE;
        let max_lane = (usable / LANE_HEIGHT).floor().max(0.0) as u32;
        Self { max_lane }
    }

    /// Layout with an explicit top lane (tests and fixed-size arenas)
    pub fn with_max_lane(max_lane: u32) -> Self {
        Self { max_lane }
    }

    /// Highest valid lane index
    pub fn max_lane(&self) -> u32 {
        self.max_lane
    }

    /// Number of lanes
    pub fn lane_count(&self) -> u32 {
        self.max_lane + 1
    }

    /// Vertical pixel position of a lane
    pub fn lane_to_y(&self, lane: u32) -> f32 {
        lane as f32 * LANE_HEIGHT
    }

    /// Nearest lane for a vertical position, clamped to bounds
    pub fn y_to_lane(&self, y: f32) -> u32 {
        self.clamp_lane((y / LANE_HEIGHT).round() as i64)
    }

    /// Clamp a possibly out-of-range lane index into `[0, max_lane]`
    pub fn clamp_lane(&self, lane: i64) -> u32 {
        lane.clamp(0, self.max_lane as i64) as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_max_lane_desktop() {
        // 600px tall play area, wide viewport: floor((600 - 40) / 60) = 9
        let layout = LaneLayout::from_viewport(600.0, 1280.0);
        assert_eq!(layout.max_lane(), 9);
    }

    #[test]
    fn test_max_lane_reserves_touch_controls() {
        // Same height, narrow viewport: floor((600 - 100 - 40) / 60) = 7
        let layout = LaneLayout::from_viewport(600.0, 480.0);
        assert_eq!(layout.max_lane(), 7);
    }

    #[test]
    fn test_tiny_play_area_keeps_lane_zero() {
        let layout = LaneLayout::from_viewport(30.0, 480.0);
        assert_eq!(layout.max_lane(), 0);
        assert_eq!(layout.y_to_lane(1000.0), 0);
    }

    #[test]
    fn test_y_to_lane_rounds_to_nearest() {
        let layout = LaneLayout::with_max_lane(9);
        assert_eq!(layout.y_to_lane(280.0), 5);
        assert_eq!(layout.y_to_lane(290.0), 5);
        assert_eq!(layout.y_to_lane(329.0), 5);
        assert_eq!(layout.y_to_lane(331.0), 6);
    }

    proptest! {
        #[test]
        fn prop_y_to_lane_stays_in_bounds(y in -10_000.0f32..10_000.0, max in 0u32..32) {
            let layout = LaneLayout::with_max_lane(max);
            prop_assert!(layout.y_to_lane(y) <= layout.max_lane());
        }

        #[test]
        fn prop_clamp_lane_stays_in_bounds(lane in -100i64..100, max in 0u32..32) {
            let layout = LaneLayout::with_max_lane(max);
            prop_assert!(layout.clamp_lane(lane) <= max);
        }
    }
}
