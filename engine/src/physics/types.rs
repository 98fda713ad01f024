//! Geometry types and scalar helpers
//!
//! Vector types are re-exported from glam. Everything that collides works in
//! whole pixels, so the one rectangle type here is integer based ([`IRect`]).
//!
//! # Coordinate System
//!
//! - +X points right, +Y points **down** (screen space)
//! - Rectangles are stored as top-left position + size
//! - `right()` / `bottom()` are exclusive edges

pub use glam::{IVec2, Vec2};

/// Axis-aligned integer rectangle (top-left + size, exclusive far edges).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct IRect {
    /// Top-left corner
    pub pos: IVec2,
    /// Width and height in pixels
    pub size: IVec2,
}

impl IRect {
    /// Create a rectangle from its top-left corner and size.
    #[inline]
    pub const fn new(pos: IVec2, size: IVec2) -> Self {
        Self { pos, size }
    }

    #[inline]
    pub fn left(&self) -> i32 {
        self.pos.x
    }

    #[inline]
    pub fn top(&self) -> i32 {
        self.pos.y
    }

    /// Exclusive right edge.
    #[inline]
    pub fn right(&self) -> i32 {
        self.pos.x + self.size.x
    }

    /// Exclusive bottom edge.
    #[inline]
    pub fn bottom(&self) -> i32 {
        self.pos.y + self.size.y
    }

    /// Same rectangle moved by `offset`.
    #[inline]
    pub fn offset(&self, offset: IVec2) -> Self {
        Self::new(self.pos + offset, self.size)
    }

    /// Grow the rectangle by `amount` on every side of the given axes.
    ///
    /// `inflate(IVec2::new(1, 0))` widens the rect by one pixel left and right.
    #[inline]
    pub fn inflate(&self, amount: IVec2) -> Self {
        Self::new(self.pos - amount, self.size + amount * 2)
    }

    /// Check whether this rectangle overlaps `other` (touching edges do not count).
    #[inline]
    pub fn intersects(&self, other: &IRect) -> bool {
        rect_collision(*self, *other)
    }
}

/// Overlap test between two rectangles. Shared edges are not an overlap.
#[inline]
pub fn rect_collision(a: IRect, b: IRect) -> bool {
    a.left() < b.right() && a.right() > b.left() && a.top() < b.bottom() && a.bottom() > b.top()
}

/// Check whether `point` lies inside `rect` (top/left inclusive, bottom/right exclusive).
#[inline]
pub fn point_in_rect(point: Vec2, rect: IRect) -> bool {
    point.x >= rect.left() as f32
        && point.x < rect.right() as f32
        && point.y >= rect.top() as f32
        && point.y < rect.bottom() as f32
}

/// Move `current` toward `target` by at most `max_delta`, never overshooting.
///
/// This is the single rate limiter behind acceleration, friction and gravity.
#[inline]
pub fn approach(current: f32, target: f32, max_delta: f32) -> f32 {
    if current < target {
        (current + max_delta).min(target)
    } else {
        (current - max_delta).max(target)
    }
}

/// Sign of `value` as -1, 0 or 1. Unlike `f32::signum`, zero maps to zero.
#[inline]
pub fn sign(value: f32) -> i32 {
    if value > 0.0 {
        1
    } else if value < 0.0 {
        -1
    } else {
        0
    }
}

/// Linear interpolation between two integer points, returned in float space.
#[inline]
pub fn lerp_ivec2(a: IVec2, b: IVec2, t: f32) -> Vec2 {
    a.as_vec2().lerp(b.as_vec2(), t)
}
