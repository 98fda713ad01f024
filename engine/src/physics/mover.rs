//! Sub-pixel accumulator movement
//!
//! Bodies keep a float velocity but an integer position. Each step the
//! velocity is added to a per-axis remainder, the remainder is rounded to a
//! whole number of pixels, and only the fraction is carried to the next step.
//! The whole pixels are then applied one at a time so a collision check can run
//! before every single pixel of motion.
//!
//! ```rust,ignore
//! let amount = take_whole_units(&mut remainder.x, speed.x);
//! let result = step_units(amount, |dir| {
//!     let next = rect.offset(IVec2::new(dir, 0));
//!     if blocked(next) { return Some(()); }
//!     rect = next;
//!     None
//! });
//! ```

/// Add `velocity` to `remainder` and pull out the whole units to move this step.
///
/// Rounds to the nearest integer; the fractional part stays in `remainder`
/// (so it always ends up in `[-0.5, 0.5]`).
#[inline]
pub fn take_whole_units(remainder: &mut f32, velocity: f32) -> i32 {
    *remainder += velocity;
    let amount = remainder.round() as i32;
    *remainder -= amount as f32;
    amount
}

/// Result of a unit-stepped move along one axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AxisMove<H> {
    /// Signed number of units actually committed
    pub moved: i32,
    /// What stopped the move, if anything
    pub blocked_by: Option<H>,
}

impl<H> AxisMove<H> {
    /// True when a collision stopped the move before `amount` was used up.
    #[inline]
    pub fn was_blocked(&self) -> bool {
        self.blocked_by.is_some()
    }
}

/// Apply `amount` one unit at a time.
///
/// `step` is called with the unit direction (`-1` or `1`) before every unit.
/// It returns `Some(hit)` to refuse the unit (nothing is committed and the
/// move ends), or `None` after committing the unit itself.
pub fn step_units<H>(amount: i32, mut step: impl FnMut(i32) -> Option<H>) -> AxisMove<H> {
    let dir = amount.signum();
    let mut remaining = amount;
    let mut moved = 0;

    while remaining != 0 {
        if let Some(hit) = step(dir) {
            return AxisMove {
                moved,
                blocked_by: Some(hit),
            };
        }
        moved += dir;
        remaining -= dir;
    }

    AxisMove {
        moved,
        blocked_by: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_take_whole_units_keeps_fraction() {
        let mut remainder = 0.0;
        assert_eq!(take_whole_units(&mut remainder, 0.4), 0);
        assert!((remainder - 0.4).abs() < 1e-6);
        assert_eq!(take_whole_units(&mut remainder, 0.4), 1);
        assert!((remainder - (-0.2)).abs() < 1e-6);
    }

    #[test]
    fn test_take_whole_units_negative() {
        let mut remainder = 0.0;
        assert_eq!(take_whole_units(&mut remainder, -2.7), -3);
        assert!((remainder - 0.3).abs() < 1e-5);
    }

    #[test]
    fn test_step_units_unblocked() {
        let mut pos = 0;
        let result: AxisMove<()> = step_units(-4, |dir| {
            pos += dir;
            None
        });
        assert_eq!(result.moved, -4);
        assert_eq!(pos, -4);
        assert!(!result.was_blocked());
    }

    #[test]
    fn test_step_units_stops_at_first_hit() {
        let wall = 3;
        let mut pos = 0;
        let mut calls = 0;
        let result = step_units(10, |dir| {
            calls += 1;
            if pos + dir >= wall {
                return Some("wall");
            }
            pos += dir;
            None
        });
        assert_eq!(result.moved, 2);
        assert_eq!(result.blocked_by, Some("wall"));
        assert_eq!(pos, 2);
        // Nothing is examined after the blocking unit
        assert_eq!(calls, 3);
    }

    #[test]
    fn test_zero_amount_never_calls_step() {
        let result: AxisMove<()> = step_units(0, |_| panic!("should not step"));
        assert_eq!(result.moved, 0);
    }
}
