//! Room Partition
//!
//! A level is a vertical stack of equally sized rooms. Room `i` covers world
//! tile rows `[i * ROOM_GRID.y, (i + 1) * ROOM_GRID.y)`. Each room owns one
//! collidable foreground grid and one decorative background grid.
//!
//! The camera frames whichever room contains the player, so the room index
//! doubles as the camera partition.

use glam::IVec2;

use super::tile_grid::{TILE_SIZE, Tile, TileGrid, TileType};
use crate::physics::IRect;

/// Size of one room in tiles.
pub const ROOM_GRID: IVec2 = IVec2::new(40, 23);

/// Size of one room in pixels.
pub const ROOM_SIZE_PX: IVec2 = IVec2::new(ROOM_GRID.x * TILE_SIZE, ROOM_GRID.y * TILE_SIZE);

/// Which grid of a room to address.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TileLayer {
    /// Collidable, autotiled
    Foreground,
    /// Decorative only
    Background,
}

/// One screen worth of tiles.
#[derive(Debug, Clone, PartialEq)]
pub struct Room {
    pub foreground: TileGrid,
    pub background: TileGrid,
}

impl Default for Room {
    fn default() -> Self {
        Self::new()
    }
}

impl Room {
    pub fn new() -> Self {
        Self {
            foreground: TileGrid::new(ROOM_GRID.x, ROOM_GRID.y),
            background: TileGrid::new(ROOM_GRID.x, ROOM_GRID.y),
        }
    }

    #[inline]
    pub fn layer(&self, layer: TileLayer) -> &TileGrid {
        match layer {
            TileLayer::Foreground => &self.foreground,
            TileLayer::Background => &self.background,
        }
    }

    #[inline]
    pub fn layer_mut(&mut self, layer: TileLayer) -> &mut TileGrid {
        match layer {
            TileLayer::Foreground => &mut self.foreground,
            TileLayer::Background => &mut self.background,
        }
    }
}

/// Room index for a world pixel row, clamped into `[0, room_count)`.
///
/// Returns 0 when there are no rooms.
pub fn room_index_for_y(world_y: i32, room_count: usize) -> usize {
    if room_count == 0 {
        return 0;
    }
    let index = world_y.div_euclid(ROOM_SIZE_PX.y).max(0) as usize;
    index.min(room_count - 1)
}

/// Pixel bounds of room `index`.
pub fn room_bounds(index: usize) -> IRect {
    IRect::new(IVec2::new(0, index as i32 * ROOM_SIZE_PX.y), ROOM_SIZE_PX)
}

/// Vertical stack of rooms with world-cell addressing.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RoomStack {
    rooms: Vec<Room>,
}

impl RoomStack {
    pub fn new(room_count: usize) -> Self {
        Self {
            rooms: (0..room_count).map(|_| Room::new()).collect(),
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.rooms.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.rooms.is_empty()
    }

    #[inline]
    pub fn rooms(&self) -> &[Room] {
        &self.rooms
    }

    #[inline]
    pub fn room(&self, index: usize) -> Option<&Room> {
        self.rooms.get(index)
    }

    #[inline]
    pub fn room_mut(&mut self, index: usize) -> Option<&mut Room> {
        self.rooms.get_mut(index)
    }

    /// Total pixel height of the stack.
    pub fn height_px(&self) -> i32 {
        self.rooms.len() as i32 * ROOM_SIZE_PX.y
    }

    /// Map a world cell to `(room index, cell inside that room)`.
    ///
    /// `None` when the cell lies outside every room.
    pub fn locate(&self, cell: IVec2) -> Option<(usize, IVec2)> {
        if cell.x < 0 || cell.x >= ROOM_GRID.x || cell.y < 0 {
            return None;
        }
        let index = (cell.y / ROOM_GRID.y) as usize;
        (index < self.rooms.len()).then(|| (index, IVec2::new(cell.x, cell.y % ROOM_GRID.y)))
    }

    /// Bounds-checked tile read by world cell.
    pub fn tile_at(&self, layer: TileLayer, cell: IVec2) -> Option<&Tile> {
        let (index, local) = self.locate(cell)?;
        self.rooms[index].layer(layer).get_tile(local.x, local.y)
    }

    /// Write a tile by world cell and refresh that room's autotile masks.
    ///
    /// Returns the room that changed, or `None` when the cell is outside
    /// every room.
    pub fn set_tile(&mut self, layer: TileLayer, cell: IVec2, kind: TileType) -> Option<usize> {
        let (index, local) = self.locate(cell)?;
        let grid = self.rooms[index].layer_mut(layer);
        if grid.get_tile(local.x, local.y).map(|t| t.kind) != Some(kind) {
            grid.set_tile(local.x, local.y, kind);
            grid.compute_neighbour_masks();
        }
        Some(index)
    }

    /// Refresh autotile masks of every grid.
    pub fn compute_neighbour_masks(&mut self) {
        for room in &mut self.rooms {
            room.foreground.compute_neighbour_masks();
            room.background.compute_neighbour_masks();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_room_index_for_y() {
        assert_eq!(room_index_for_y(0, 3), 0);
        assert_eq!(room_index_for_y(ROOM_SIZE_PX.y - 1, 3), 0);
        assert_eq!(room_index_for_y(ROOM_SIZE_PX.y, 3), 1);
        // Clamped on both ends
        assert_eq!(room_index_for_y(-50, 3), 0);
        assert_eq!(room_index_for_y(ROOM_SIZE_PX.y * 10, 3), 2);
        assert_eq!(room_index_for_y(100, 0), 0);
    }

    #[test]
    fn test_locate_maps_into_room() {
        let stack = RoomStack::new(2);
        assert_eq!(stack.locate(IVec2::new(3, 4)), Some((0, IVec2::new(3, 4))));
        assert_eq!(
            stack.locate(IVec2::new(3, ROOM_GRID.y + 1)),
            Some((1, IVec2::new(3, 1)))
        );
        assert_eq!(stack.locate(IVec2::new(3, ROOM_GRID.y * 2)), None);
        assert_eq!(stack.locate(IVec2::new(-1, 0)), None);
        assert_eq!(stack.locate(IVec2::new(ROOM_GRID.x, 0)), None);
    }

    #[test]
    fn test_set_tile_refreshes_masks() {
        let mut stack = RoomStack::new(1);
        stack.set_tile(TileLayer::Foreground, IVec2::new(10, 10), TileType::Solid);
        stack.set_tile(TileLayer::Foreground, IVec2::new(11, 10), TileType::Solid);
        let tile = stack
            .tile_at(TileLayer::Foreground, IVec2::new(10, 10))
            .copied()
            .unwrap();
        assert_eq!(tile.neighbour_mask, 0b0100);
    }

    #[test]
    fn test_set_tile_outside_rooms() {
        let mut stack = RoomStack::new(1);
        assert_eq!(
            stack.set_tile(TileLayer::Foreground, IVec2::new(0, 500), TileType::Solid),
            None
        );
    }
}
