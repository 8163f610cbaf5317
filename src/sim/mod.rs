//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must stay deterministic and
//! host-free:
//! - Seeded RNG only
//! - Movement scaled by elapsed time, never by tick count
//! - The outside world is reached only through the `platform` boundary traits

pub mod collision;
pub mod lanes;
pub mod session;
pub mod spawn;
pub mod state;
pub mod tick;

pub use collision::{Rect, overlaps_with_pad, player_rect, shadow_rect};
pub use lanes::LaneLayout;
pub use session::Session;
pub use spawn::spawn_shadow;
pub use state::{Phase, Player, SessionState, Shadow, ShadowTint};
pub use tick::{ClearedShadow, TickOutcome, tick};
