//! Room Camera
//!
//! An orthographic 2D camera that frames exactly one room. The view snaps to
//! the room containing the player; there is no scrolling inside a room.

use glam::Vec2;

use crate::world::{ROOM_SIZE_PX, room_bounds, room_index_for_y};

/// Orthographic camera in world pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera2D {
    /// World position of the view centre
    pub position: Vec2,
    /// World size of the view
    pub dimensions: Vec2,
    /// Room currently framed
    pub room_index: usize,
}

impl Default for Camera2D {
    fn default() -> Self {
        let dimensions = ROOM_SIZE_PX.as_vec2();
        Self {
            position: dimensions * 0.5,
            dimensions,
            room_index: 0,
        }
    }
}

impl Camera2D {
    /// Frame room `index`.
    pub fn frame_room(&mut self, index: usize) {
        let bounds = room_bounds(index);
        self.room_index = index;
        self.dimensions = bounds.size.as_vec2();
        self.position = bounds.pos.as_vec2() + self.dimensions * 0.5;
    }

    /// Frame whichever room contains `world_y`.
    pub fn follow(&mut self, world_y: f32, room_count: usize) {
        self.frame_room(room_index_for_y(world_y.floor() as i32, room_count));
    }

    /// World top-left of the view.
    #[inline]
    pub fn top_left(&self) -> Vec2 {
        self.position - self.dimensions * 0.5
    }

    /// Project a window pixel into world pixels.
    ///
    /// `screen_size` is the window size in pixels. Returns the view's top-left
    /// when the window has no area.
    pub fn screen_to_world(&self, screen_pos: Vec2, screen_size: Vec2) -> Vec2 {
        if screen_size.x <= 0.0 || screen_size.y <= 0.0 {
            return self.top_left();
        }
        self.top_left() + screen_pos / screen_size * self.dimensions
    }
}
