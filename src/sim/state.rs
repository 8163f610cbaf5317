//! Session state and core simulation types

use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::lanes::LaneLayout;
use crate::consts::*;

/// Current phase of play
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Menu shown, nothing simulated
    Idle,
    /// Spawner and frame loop active
    Running,
    /// Run over, end-of-run summary shown
    Ended,
}

/// Dark shade picked for a shadow at spawn. A render hint only - collision
/// and movement never look at it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShadowTint {
    Black,
    Midnight,
    Charcoal,
}

impl ShadowTint {
    pub const ALL: [ShadowTint; 3] = [
        ShadowTint::Black,
        ShadowTint::Midnight,
        ShadowTint::Charcoal,
    ];
}

/// The player token: a lane index plus the derived vertical position
#[derive(Debug, Clone, Copy)]
pub struct Player {
    lane: u32,
}

impl Player {
    /// Place the player at the default spawn height, snapped to its lane
    pub fn at_default(layout: &LaneLayout) -> Self {
        Self {
            lane: layout.y_to_lane(DEFAULT_PLAYER_Y),
        }
    }

    pub fn lane(&self) -> u32 {
        self.lane
    }

    /// Vertical pixel position
    pub fn y(&self, layout: &LaneLayout) -> f32 {
        layout.lane_to_y(self.lane)
    }

    /// Move to a lane, snapped into the layout bounds
    pub fn set_lane(&mut self, lane: i64, layout: &LaneLayout) {
        self.lane = layout.clamp_lane(lane);
    }

    pub fn move_up(&mut self, layout: &LaneLayout) {
        self.set_lane(self.lane as i64 - 1, layout);
    }

    pub fn move_down(&mut self, layout: &LaneLayout) {
        self.set_lane(self.lane as i64 + 1, layout);
    }
}

/// A scrolling hazard the player must dodge
#[derive(Debug, Clone)]
pub struct Shadow {
    pub id: u32,
    /// Horizontal position, decreasing each tick
    pub x: f32,
    /// Lane, fixed at spawn
    pub lane: u32,
    /// Per-instance variance added to the session base speed
    pub speed_offset: f32,
    pub tint: ShadowTint,
}

/// Mutable state of one play session
#[derive(Debug)]
pub struct SessionState {
    /// Points scored this run
    pub score: u32,
    /// Scroll speed applied to every shadow; a pure function of score
    pub base_speed: f32,
    /// Spawn and tick act only while Running
    pub phase: Phase,
    /// Active shadows, oldest first
    pub shadows: Vec<Shadow>,
    pub player: Player,
    /// Seeded RNG driving lane selection, speed offsets, and tints
    pub rng: Pcg32,
    next_id: u32,
}

impl SessionState {
    /// Fresh Idle state with the given RNG seed
    pub fn new(seed: u64, layout: &LaneLayout) -> Self {
        Self {
            score: 0,
            base_speed: BASE_SPEED,
            phase: Phase::Idle,
            shadows: Vec::new(),
            player: Player::at_default(layout),
            rng: Pcg32::seed_from_u64(seed),
            next_id: 1,
        }
    }

    pub fn is_running(&self) -> bool {
        self.phase == Phase::Running
    }

    /// Allocate a new shadow ID
    pub fn next_shadow_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Reset for a new run. The RNG keeps its stream so consecutive runs
    /// differ.
    pub fn reset(&mut self, layout: &LaneLayout) {
        self.score = 0;
        self.base_speed = BASE_SPEED;
        self.shadows.clear();
        self.player = Player::at_default(layout);
    }
}
