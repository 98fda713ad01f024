//! Physics module
//!
//! Integer-pixel platformer physics. Nothing here knows about players or
//! levels; it only provides the geometry and the accumulator stepping that the
//! game-side controllers are built from.
//!
//! # Unit System
//!
//! **1 unit = 1 pixel**. Velocities are in pixels per fixed step, timers in
//! seconds.
//!
//! # Submodules
//!
//! - [`types`] - IRect, glam vector re-exports, `approach`, `sign`, lerp
//! - [`mover`] - Sub-pixel remainder accumulation and unit stepping

pub mod mover;
pub mod types;

pub use mover::{AxisMove, step_units, take_whole_units};
pub use types::{IRect, IVec2, Vec2, approach, lerp_ivec2, point_in_rect, rect_collision, sign};
