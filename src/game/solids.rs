//! Solids (Moving Platforms)
//!
//! Kinematic rectangles that follow a looping keyframe path. Solids never stop
//! for the player: they push the player out of the way or carry a rider along,
//! and crush the player back to spawn when there is nowhere to go.
//!
//! ## Path Timing
//!
//! Keyframe times are strictly increasing and the loop period is the last
//! keyframe's time. The segment from the last keyframe back to the first runs
//! over `[0, keyframes[0].time)`, so a first keyframe at `time = 0` snaps back
//! instantly while a later one makes the return trip take that long.
//!
//! ## Per-step Order
//!
//! ```text
//! for each solid (insertion order):
//!     advance time, lerp target
//!     decide rider (before moving)
//!     move X one pixel at a time, then Y:
//!         overlaps player  -> push
//!         else rider       -> carry
//! ```

use glam::{IVec2, Vec2};

use crate::physics::{IRect, lerp_ivec2, rect_collision, step_units, take_whole_units};
use crate::render::SpriteId;
use crate::world::RoomStack;

use super::collision::{CollisionFilter, CollisionHit, WALL_CHECK_DISTANCE, first_collision};
use super::player::Player;

/// Maximum keyframes on one solid.
pub const MAX_KEYFRAMES: usize = 8;

/// How far below the feet a solid still counts as "under" the player.
pub const RIDE_CHECK_DISTANCE: i32 = 2;

/// One waypoint of a solid's path.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Keyframe {
    pub pos: IVec2,
    /// Seconds into the loop
    pub time: f32,
}

impl Keyframe {
    pub fn new(pos: IVec2, time: f32) -> Self {
        Self { pos, time }
    }
}

/// A kinematic platform.
#[derive(Debug, Clone, PartialEq)]
pub struct Solid {
    pub sprite_id: SpriteId,
    /// Top-left corner
    pub pos: IVec2,
    pub prev_pos: IVec2,
    pub size: IVec2,
    pub remainder: Vec2,
    keyframes: Vec<Keyframe>,
    /// Position within the loop, seconds
    pub time: f32,
}

impl Solid {
    /// A solid that never moves.
    pub fn new(sprite_id: SpriteId, pos: IVec2, size: IVec2) -> Self {
        Self {
            sprite_id,
            pos,
            prev_pos: pos,
            size,
            remainder: Vec2::ZERO,
            keyframes: Vec::with_capacity(MAX_KEYFRAMES),
            time: 0.0,
        }
    }

    /// A solid following `keyframes`, starting at the first one (position
    /// and time).
    ///
    /// # Panics
    ///
    /// On more than [`MAX_KEYFRAMES`] keyframes or times that do not strictly
    /// increase.
    pub fn with_path(sprite_id: SpriteId, size: IVec2, keyframes: &[Keyframe]) -> Self {
        let start = keyframes.first().map_or(IVec2::ZERO, |k| k.pos);
        let mut solid = Self::new(sprite_id, start, size);
        for &keyframe in keyframes {
            solid.push_keyframe(keyframe);
        }
        solid.reset_path();
        solid
    }

    /// Append a waypoint.
    ///
    /// # Panics
    ///
    /// When full or when `keyframe.time` is not after the previous one.
    pub fn push_keyframe(&mut self, keyframe: Keyframe) {
        assert!(
            self.keyframes.len() < MAX_KEYFRAMES,
            "Solid keyframes full ({MAX_KEYFRAMES})"
        );
        if let Some(last) = self.keyframes.last() {
            assert!(
                keyframe.time > last.time,
                "Keyframe times must strictly increase: {} after {}",
                keyframe.time,
                last.time
            );
        }
        self.keyframes.push(keyframe);
    }

    #[inline]
    pub fn keyframes(&self) -> &[Keyframe] {
        &self.keyframes
    }

    /// Zero or one keyframe.
    #[inline]
    pub fn is_static(&self) -> bool {
        self.keyframes.len() < 2
    }

    #[inline]
    pub fn rect(&self) -> IRect {
        IRect::new(self.pos, self.size)
    }

    /// Restart the path from its first keyframe.
    pub fn reset_path(&mut self) {
        if let Some(first) = self.keyframes.first() {
            self.pos = first.pos;
            self.time = first.time;
        } else {
            self.time = 0.0;
        }
        self.prev_pos = self.pos;
        self.remainder = Vec2::ZERO;
    }

    /// Advance path time by `dt` and return the interpolated target.
    fn advance_path(&mut self, dt: f32) -> Vec2 {
        let (Some(first), Some(last)) = (self.keyframes.first(), self.keyframes.last()) else {
            return self.pos.as_vec2();
        };
        let period = last.time;

        self.time += dt;
        if period > 0.0 && self.time >= period {
            self.time = self.time.rem_euclid(period);
        }

        let next = self
            .keyframes
            .iter()
            .position(|k| k.time > self.time)
            .unwrap_or(0);
        let (from_pos, from_time) = if next == 0 {
            (last.pos, 0.0)
        } else {
            let current = self.keyframes[next - 1];
            (current.pos, current.time)
        };
        let to = self.keyframes[next];

        let span = to.time - from_time;
        if span <= 0.0 {
            return first.pos.as_vec2();
        }
        let t = ((self.time - from_time) / span).clamp(0.0, 1.0);
        lerp_ivec2(from_pos, to.pos, t)
    }
}

/// Is `player` riding `solid`: standing on it, or grabbing it as a wall.
pub fn is_riding(player: &Player, solid: IRect) -> bool {
    let rect = player.rect();
    let feet = IRect::new(
        IVec2::new(rect.left(), rect.bottom()),
        IVec2::new(rect.size.x, RIDE_CHECK_DISTANCE),
    );
    let standing = solid.top() >= rect.bottom() && rect_collision(feet, solid);
    let grabbing = player.grabbing_wall
        && rect_collision(rect.inflate(IVec2::new(WALL_CHECK_DISTANCE, 0)), solid);
    standing || grabbing
}

/// Advance every solid one fixed step, in insertion order.
///
/// Clears `player.solid_speed` first; each pushed or carried pixel is added to
/// it.
pub fn update_solids(
    solids: &mut [Solid],
    player: &mut Player,
    rooms: &RoomStack,
    spawn: IVec2,
    dt: f32,
) {
    player.solid_speed = Vec2::ZERO;
    for index in 0..solids.len() {
        update_solid(solids, index, player, rooms, spawn, dt);
    }
}

fn update_solid(
    solids: &mut [Solid],
    index: usize,
    player: &mut Player,
    rooms: &RoomStack,
    spawn: IVec2,
    dt: f32,
) {
    let solid = &mut solids[index];
    solid.prev_pos = solid.pos;
    if solid.is_static() {
        return;
    }

    let target = solid.advance_path(dt);
    let delta = target - (solid.pos.as_vec2() + solid.remainder);
    let move_x = take_whole_units(&mut solid.remainder.x, delta.x);
    let move_y = take_whole_units(&mut solid.remainder.y, delta.y);

    let mut riding = is_riding(player, solids[index].rect());

    for (axis, amount) in [(IVec2::X, move_x), (IVec2::Y, move_y)] {
        step_units(amount, |dir| -> Option<()> {
            let unit = axis * dir;
            solids[index].pos += unit;
            let solid_rect = solids[index].rect();

            let pushing = rect_collision(solid_rect, player.rect());
            if !pushing && !riding {
                return None;
            }

            let filter = CollisionFilter {
                spikes: true,
                ignore_solid: Some(index),
            };
            let shifted = player.rect().offset(unit);
            match first_collision(shifted, solids, rooms, filter) {
                None => {
                    player.pos += unit;
                    player.solid_speed += unit.as_vec2();
                }
                Some(hit) if pushing || matches!(hit, CollisionHit::Solid(_)) => {
                    tracing::info!(?hit, "Player squeezed by solid {index}, resetting to spawn");
                    player.reset_to(spawn);
                    riding = false;
                }
                // Carry blocked by a tile: the rider stays behind
                Some(_) => riding = false,
            }
            None
        });
    }
}
