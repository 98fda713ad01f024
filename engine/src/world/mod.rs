//! World Module
//!
//! Tile storage, autotiling and the room partition.
//!
//! ## Default World
//! A room is 40x23 tiles of 8 pixels. Rooms stack downward; the camera
//! frames one room at a time.

pub mod rooms;
pub mod tile_grid;

pub use rooms::{ROOM_GRID, ROOM_SIZE_PX, Room, RoomStack, TileLayer, room_bounds, room_index_for_y};
pub use tile_grid::{
    AUTOTILE_PALETTE_SIZE, MASK_ENCLOSED, NEIGHBOUR_OFFSETS, TILE_SIZE, Tile, TileGrid, TileType,
    spike_rect, tile_rect, world_to_cell,
};
