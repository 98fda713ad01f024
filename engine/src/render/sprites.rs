//! Sprite Atlas Layout
//!
//! Every drawable lives in one texture atlas. A sprite is a rectangle of that
//! atlas plus a frame count; animation frames sit side by side to the right of
//! the first one.
//!
//! ## Atlas Map
//!
//! ```text
//!  (0,0)                    (32,0) spike   (48,0) white texel
//!  +--------------------+
//!  | autotile masks 0-15|   (48,8) platform
//!  | 4x4 cells of 8 px  |
//!  +--------------------+   (117,0)  player idle / (117,20) run
//!  | masks 16-20 (y=32) |   (168,0)  player jump / (168,20) death
//!  +--------------------+
//! ```

use glam::IVec2;

use crate::world::{AUTOTILE_PALETTE_SIZE, TILE_SIZE};

/// Named sprites in the atlas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u32)]
pub enum SpriteId {
    /// Single white texel, stretched for untextured quads
    White = 0,
    PlayerIdle = 1,
    PlayerRun = 2,
    PlayerJump = 3,
    PlayerDeath = 4,
    Spike = 5,
    Platform = 6,
}

impl SpriteId {
    /// Decode a stored id. Unknown ids fall back to `White`.
    pub fn from_u32(value: u32) -> Self {
        match value {
            1 => SpriteId::PlayerIdle,
            2 => SpriteId::PlayerRun,
            3 => SpriteId::PlayerJump,
            4 => SpriteId::PlayerDeath,
            5 => SpriteId::Spike,
            6 => SpriteId::Platform,
            _ => SpriteId::White,
        }
    }
}

/// Atlas rectangle of a sprite.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sprite {
    /// Top-left of the first frame in atlas pixels
    pub atlas_offset: IVec2,
    /// Size of one frame in pixels
    pub size: IVec2,
    pub frame_count: u32,
}

impl Sprite {
    const fn new(x: i32, y: i32, w: i32, h: i32, frame_count: u32) -> Self {
        Self {
            atlas_offset: IVec2::new(x, y),
            size: IVec2::new(w, h),
            frame_count,
        }
    }
}

/// Look up the atlas rectangle of `id`.
pub fn get_sprite(id: SpriteId) -> Sprite {
    match id {
        SpriteId::White => Sprite::new(48, 0, 1, 1, 1),
        SpriteId::PlayerIdle => Sprite::new(117, 0, 17, 20, 1),
        SpriteId::PlayerRun => Sprite::new(117, 20, 17, 20, 3),
        SpriteId::PlayerJump => Sprite::new(168, 0, 17, 20, 1),
        SpriteId::PlayerDeath => Sprite::new(168, 20, 17, 20, 4),
        SpriteId::Spike => Sprite::new(32, 0, TILE_SIZE, TILE_SIZE, 1),
        SpriteId::Platform => Sprite::new(48, 8, 24, 8, 1),
    }
}

/// Atlas offset of autotile palette entry `mask`.
///
/// Masks 0-15 fill a 4x4 block, 16-20 the row beneath it. Out-of-range masks
/// map to entry 0.
pub fn autotile_atlas_offset(mask: u8) -> IVec2 {
    let mask = if (mask as usize) < AUTOTILE_PALETTE_SIZE { mask as i32 } else { 0 };
    if mask < 16 {
        IVec2::new(mask % 4, mask / 4) * TILE_SIZE
    } else {
        IVec2::new(mask - 16, 4) * TILE_SIZE
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_autotile_offsets_are_unique() {
        let mut seen = std::collections::HashSet::new();
        for mask in 0..AUTOTILE_PALETTE_SIZE as u8 {
            assert!(seen.insert(autotile_atlas_offset(mask)), "duplicate cell for mask {mask}");
        }
    }

    #[test]
    fn test_corner_masks_on_fifth_row() {
        assert_eq!(autotile_atlas_offset(16), IVec2::new(0, 32));
        assert_eq!(autotile_atlas_offset(20), IVec2::new(32, 32));
        assert_eq!(autotile_atlas_offset(99), IVec2::ZERO);
    }

    #[test]
    fn test_sprite_id_round_trip() {
        for id in [SpriteId::White, SpriteId::Platform, SpriteId::PlayerDeath] {
            assert_eq!(SpriteId::from_u32(id as u32), id);
        }
        assert_eq!(SpriteId::from_u32(1234), SpriteId::White);
    }
}
