//! Tile Grid and Autotiling
//!
//! A fixed-size dense grid of tiles addressed in tile units. Reads outside the
//! grid return `None`; nothing ever wraps.
//!
//! ## Autotiling
//!
//! Each solid tile picks its art from a 21-entry palette using a neighbour
//! mask computed from 12 sampled cells:
//!
//! ```text
//!             [8]
//!        [4]  [0]  [5]
//!   [9]  [1]  (x)  [2]  [10]
//!        [6]  [3]  [7]
//!             [11]
//! ```
//!
//! - Slots 0-3 are the cardinal neighbours (bits 0-3 of the mask)
//! - Slots 4-7 are the diagonals, 8-11 the cells two away on each axis
//! - A sampled cell is *filled* when it is off-grid or a `Solid` tile
//!
//! Mask selection:
//! - 7 of the 8 near cells filled and the open one a diagonal: `16 + (slot - 4)`
//! - all 8 near and all 4 extended filled: [`MASK_ENCLOSED`]
//! - otherwise: the 4 cardinal bits
//!
//! Spike tiles skip all of this and always use their own sprite.

use glam::IVec2;

use crate::physics::IRect;

/// Edge length of one tile in pixels.
pub const TILE_SIZE: i32 = 8;

/// Mask of the fully enclosed ("black inside") variant.
pub const MASK_ENCLOSED: u8 = 20;

/// Number of entries in the autotile palette (masks 0..=20).
pub const AUTOTILE_PALETTE_SIZE: usize = 21;

/// Sample offsets in slot order. See the module docs for the layout.
pub const NEIGHBOUR_OFFSETS: [IVec2; 12] = [
    // Cardinal: top, left, right, bottom
    IVec2::new(0, -1),
    IVec2::new(-1, 0),
    IVec2::new(1, 0),
    IVec2::new(0, 1),
    // Diagonal: top-left, top-right, bottom-left, bottom-right
    IVec2::new(-1, -1),
    IVec2::new(1, -1),
    IVec2::new(-1, 1),
    IVec2::new(1, 1),
    // Extended: two away on each axis
    IVec2::new(0, -2),
    IVec2::new(-2, 0),
    IVec2::new(2, 0),
    IVec2::new(0, 2),
];

/// What occupies a tile cell.
#[repr(u8)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum TileType {
    #[default]
    None = 0,
    Solid = 1,
    Spike = 2,
}

impl TileType {
    /// Decode a stored byte. Unknown values read as empty.
    #[inline]
    pub fn from_u8(value: u8) -> Self {
        match value {
            1 => TileType::Solid,
            2 => TileType::Spike,
            _ => TileType::None,
        }
    }

    #[inline]
    pub fn to_u8(self) -> u8 {
        self as u8
    }

    /// Solid and spike tiles take part in collision.
    #[inline]
    pub fn is_filled(self) -> bool {
        self != TileType::None
    }
}

/// One grid cell.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Tile {
    pub kind: TileType,
    /// Autotile palette index; only meaningful for `Solid` tiles.
    pub neighbour_mask: u8,
}

impl Tile {
    pub fn new(kind: TileType) -> Self {
        Self {
            kind,
            neighbour_mask: 0,
        }
    }
}

/// Fixed-size 2D tile array.
#[derive(Debug, Clone, PartialEq)]
pub struct TileGrid {
    width: i32,
    height: i32,
    tiles: Vec<Tile>,
}

impl TileGrid {
    /// Create an empty grid. Dimensions never change afterwards.
    pub fn new(width: i32, height: i32) -> Self {
        assert!(
            width > 0 && height > 0,
            "TileGrid dimensions must be positive, got {width}x{height}"
        );
        Self {
            width,
            height,
            tiles: vec![Tile::default(); (width * height) as usize],
        }
    }

    #[inline]
    pub fn width(&self) -> i32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> i32 {
        self.height
    }

    #[inline]
    pub fn contains(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && x < self.width && y < self.height
    }

    #[inline]
    fn index(&self, x: i32, y: i32) -> Option<usize> {
        self.contains(x, y).then(|| (y * self.width + x) as usize)
    }

    /// Bounds-checked read.
    #[inline]
    pub fn get_tile(&self, x: i32, y: i32) -> Option<&Tile> {
        self.index(x, y).map(|i| &self.tiles[i])
    }

    /// Bounds-checked mutable access.
    #[inline]
    pub fn get_tile_mut(&mut self, x: i32, y: i32) -> Option<&mut Tile> {
        self.index(x, y).map(move |i| &mut self.tiles[i])
    }

    /// Write a tile type. Returns `false` (and changes nothing) when off-grid.
    ///
    /// Neighbour masks are not refreshed; call
    /// [`compute_neighbour_masks`](Self::compute_neighbour_masks) afterwards.
    pub fn set_tile(&mut self, x: i32, y: i32, kind: TileType) -> bool {
        match self.get_tile_mut(x, y) {
            Some(tile) => {
                tile.kind = kind;
                true
            }
            None => false,
        }
    }

    /// Iterate `(x, y, tile)` in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = (i32, i32, &Tile)> + '_ {
        let width = self.width;
        self.tiles
            .iter()
            .enumerate()
            .map(move |(i, tile)| (i as i32 % width, i as i32 / width, tile))
    }

    /// Raw tile types in row-major order (for persistence).
    pub fn kinds(&self) -> impl Iterator<Item = TileType> + '_ {
        self.tiles.iter().map(|t| t.kind)
    }

    /// Overwrite all tile types from row-major bytes. Extra bytes are ignored,
    /// missing ones leave cells untouched.
    pub fn fill_from_bytes(&mut self, bytes: &[u8]) {
        for (tile, &b) in self.tiles.iter_mut().zip(bytes) {
            tile.kind = TileType::from_u8(b);
            tile.neighbour_mask = 0;
        }
        self.compute_neighbour_masks();
    }

    /// Autotile sample: off-grid or solid counts as filled.
    #[inline]
    fn is_filled_for_autotile(&self, x: i32, y: i32) -> bool {
        match self.get_tile(x, y) {
            None => true,
            Some(tile) => tile.kind == TileType::Solid,
        }
    }

    /// Compute the autotile mask for the tile at `(x, y)`.
    ///
    /// Pure function of the grid contents. Returns 0 for empty, spike and
    /// off-grid cells.
    pub fn neighbour_mask_at(&self, x: i32, y: i32) -> u8 {
        match self.get_tile(x, y) {
            Some(tile) if tile.kind == TileType::Solid => {}
            _ => return 0,
        }

        let mut mask: u32 = 0;
        let mut neighbour_count = 0;
        let mut extended_neighbour_count = 0;
        let mut empty_neighbour_slot = 0;

        for (slot, offset) in NEIGHBOUR_OFFSETS.iter().enumerate() {
            if self.is_filled_for_autotile(x + offset.x, y + offset.y) {
                mask |= 1 << slot;
                if slot < 8 {
                    neighbour_count += 1;
                } else {
                    extended_neighbour_count += 1;
                }
            } else if slot < 8 {
                empty_neighbour_slot = slot;
            }
        }

        if neighbour_count == 7 && empty_neighbour_slot >= 4 {
            16 + (empty_neighbour_slot as u8 - 4)
        } else if neighbour_count == 8 && extended_neighbour_count == 4 {
            MASK_ENCLOSED
        } else {
            (mask & 0b1111) as u8
        }
    }

    /// Recompute the neighbour mask of every tile.
    pub fn compute_neighbour_masks(&mut self) {
        let masks: Vec<u8> = (0..self.height)
            .flat_map(|y| (0..self.width).map(move |x| (x, y)))
            .map(|(x, y)| self.neighbour_mask_at(x, y))
            .collect();
        for (tile, mask) in self.tiles.iter_mut().zip(masks) {
            tile.neighbour_mask = mask;
        }
    }
}

/// Pixel rect of the world cell `cell`.
#[inline]
pub fn tile_rect(cell: IVec2) -> IRect {
    IRect::new(cell * TILE_SIZE, IVec2::splat(TILE_SIZE))
}

/// Hazard rect of a spike cell: the bottom half of the tile.
#[inline]
pub fn spike_rect(cell: IVec2) -> IRect {
    let inset = TILE_SIZE / 2;
    IRect::new(
        cell * TILE_SIZE + IVec2::new(0, inset),
        IVec2::new(TILE_SIZE, TILE_SIZE - inset),
    )
}

/// Grid cell containing the world pixel `pos` (floors toward -inf).
#[inline]
pub fn world_to_cell(pos: IVec2) -> IVec2 {
    IVec2::new(pos.x.div_euclid(TILE_SIZE), pos.y.div_euclid(TILE_SIZE))
}
