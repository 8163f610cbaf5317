//! Shadow Dash - a lane-dodging endless runner
//!
//! Core modules:
//! - `sim`: Deterministic simulation (lanes, spawning, collisions, session)
//! - `score`: Score tracking and the persisted best score
//! - `audio`: Background loop and death sting playback
//! - `platform`: Render/audio/storage/viewport boundary traits and their
//!   browser implementations

pub mod audio;
pub mod platform;
pub mod score;
pub mod sim;

pub use score::{BestScore, ScoreBoard};

/// Game configuration constants
pub mod consts {
    /// Vertical distance between adjacent lanes (pixels)
    pub const LANE_HEIGHT: f32 = 60.0;
    /// Square side of both the player token and a shadow (pixels)
    pub const ENTITY_SIZE: f32 = 40.0;
    /// Fixed horizontal position of the player in play-area coordinates
    pub const PLAYER_X: f32 = 50.0;
    /// Player spawn height; snapped to the nearest lane at session start
    pub const DEFAULT_PLAYER_Y: f32 = 280.0;

    /// Horizontal position where new shadows enter the play area
    pub const SPAWN_X: f32 = 400.0;
    /// Shadows left of this position are cleared and scored
    pub const DESPAWN_X: f32 = -50.0;
    /// A lane counts as occupied for spawning while its shadow is right of this
    pub const NEAR_SPAWN_X: f32 = 350.0;
    /// Upper bound (exclusive) of the per-shadow random speed offset
    pub const SPEED_OFFSET_MAX: f32 = 0.5;

    /// Scroll speed at score 0
    pub const BASE_SPEED: f32 = 3.0;
    /// Scroll speed gained per point scored
    pub const SPEED_PER_POINT: f32 = 0.1;
    /// Nominal frame duration the speed values are expressed against (ms)
    pub const FRAME_MS: f64 = 16.0;

    /// Inset applied to both rectangles before the overlap test
    pub const COLLISION_PAD: f32 = 2.0;

    /// Wall-clock spawn cadence (ms)
    pub const SPAWN_INTERVAL_MS: i32 = 700;

    /// Vertical space reserved for on-screen touch controls
    pub const TOUCH_CONTROLS_OFFSET: f32 = 100.0;
    /// Viewport width at or below which touch controls are assumed present
    pub const TOUCH_BREAKPOINT: f32 = 768.0;

    /// Particles emitted where a cleared shadow left the play area
    pub const PARTICLE_COUNT: u32 = 3;
    /// Particle lifetime before the glue removes the elements (ms)
    pub const PARTICLE_LIFETIME_MS: i32 = 300;
}
