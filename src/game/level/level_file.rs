//! Level File Save/Load (level.bin)
//!
//! The whole level is one fixed-size `#[repr(C)]` record written verbatim:
//!
//! ```text
//! [LevelHeader                 24 bytes]
//! [foreground tiles  4 x 920 bytes]   one byte per cell, row-major per room
//! [background tiles  4 x 920 bytes]
//! [SolidRecord      16 x 120 bytes]
//! ```
//!
//! Unused room and solid slots are zeroed. A file whose length differs from
//! `size_of::<LevelBlob>()` is rejected outright; there is no migration
//! between layouts.

use std::path::Path;

use bytemuck::{Pod, Zeroable};
use glam::IVec2;

use crate::render::SpriteId;
use crate::world::{ROOM_GRID, ROOM_SIZE_PX, TileLayer};

use super::{LEVEL_VERSION, Level, MAX_ROOMS, MAX_SOLIDS};
use crate::game::solids::{Keyframe, MAX_KEYFRAMES, Solid};

// ============================================================================
// CONSTANTS
// ============================================================================

/// Magic bytes identifying a level file.
pub const LEVEL_MAGIC: [u8; 4] = *b"SZLV";

/// Bytes of one room layer.
const ROOM_CELLS: usize = (ROOM_GRID.x * ROOM_GRID.y) as usize;

// ============================================================================
// RECORDS
// ============================================================================

#[repr(C)]
#[derive(Clone, Copy, Debug, Pod, Zeroable)]
pub struct LevelHeader {
    pub magic: [u8; 4],
    pub version: u32,
    pub spawn: [i32; 2],
    pub room_count: u32,
    pub solid_count: u32,
}

static_assertions::assert_eq_size!(LevelHeader, [u8; 24]);

#[repr(C)]
#[derive(Clone, Copy, Debug, Pod, Zeroable)]
pub struct KeyframeRecord {
    pub pos: [i32; 2],
    pub time: f32,
}

static_assertions::assert_eq_size!(KeyframeRecord, [u8; 12]);

#[repr(C)]
#[derive(Clone, Copy, Debug, Pod, Zeroable)]
pub struct SolidRecord {
    pub sprite_id: u32,
    pub pos: [i32; 2],
    pub size: [i32; 2],
    pub keyframe_count: u32,
    pub keyframes: [KeyframeRecord; MAX_KEYFRAMES],
}

static_assertions::assert_eq_size!(SolidRecord, [u8; 120]);

/// The complete on-disk level.
#[repr(C)]
#[derive(Clone, Copy, Pod, Zeroable)]
pub struct LevelBlob {
    pub header: LevelHeader,
    pub foreground: [[u8; ROOM_CELLS]; MAX_ROOMS],
    pub background: [[u8; ROOM_CELLS]; MAX_ROOMS],
    pub solids: [SolidRecord; MAX_SOLIDS],
}

static_assertions::assert_eq_size!(LevelBlob, [u8; 9304]);

// ============================================================================
// ERRORS
// ============================================================================

/// Errors that can occur during level save/load.
#[derive(Debug)]
pub enum LevelFileError {
    Io(std::io::Error),
    /// File length is not exactly one `LevelBlob`
    SizeMismatch { expected: usize, actual: usize },
    InvalidMagic,
    UnsupportedVersion(u32),
    /// A count or keyframe sequence that cannot be rebuilt
    InvalidRecord(String),
}

impl std::fmt::Display for LevelFileError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LevelFileError::Io(e) => write!(f, "IO error: {e}"),
            LevelFileError::SizeMismatch { expected, actual } => {
                write!(f, "level file is {actual} bytes, expected {expected}")
            }
            LevelFileError::InvalidMagic => write!(f, "invalid magic bytes (expected SZLV)"),
            LevelFileError::UnsupportedVersion(v) => {
                write!(f, "unsupported level version {v} (expected {LEVEL_VERSION})")
            }
            LevelFileError::InvalidRecord(msg) => write!(f, "invalid level record: {msg}"),
        }
    }
}

impl std::error::Error for LevelFileError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            LevelFileError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for LevelFileError {
    fn from(e: std::io::Error) -> Self {
        LevelFileError::Io(e)
    }
}

// ============================================================================
// CONVERSION
// ============================================================================

impl LevelBlob {
    /// Pack a level into its on-disk record.
    ///
    /// # Panics
    ///
    /// When the level exceeds the file's room or solid capacity (both are
    /// asserted on construction, so this only fires on hand-built levels).
    pub fn from_level(level: &Level) -> Self {
        assert!(level.rooms.len() <= MAX_ROOMS, "Too many rooms to save");
        assert!(level.solids.len() <= MAX_SOLIDS, "Too many solids to save");

        let mut blob = Self::zeroed();
        blob.header = LevelHeader {
            magic: LEVEL_MAGIC,
            version: level.version,
            spawn: level.spawn.to_array(),
            room_count: level.rooms.len() as u32,
            solid_count: level.solids.len() as u32,
        };

        for (i, room) in level.rooms.rooms().iter().enumerate() {
            for (dst, kind) in blob.foreground[i].iter_mut().zip(room.foreground.kinds()) {
                *dst = kind.to_u8();
            }
            for (dst, kind) in blob.background[i].iter_mut().zip(room.background.kinds()) {
                *dst = kind.to_u8();
            }
        }

        for (record, solid) in blob.solids.iter_mut().zip(&level.solids) {
            record.sprite_id = solid.sprite_id as u32;
            record.pos = solid.pos.to_array();
            record.size = solid.size.to_array();
            record.keyframe_count = solid.keyframes().len() as u32;
            for (dst, keyframe) in record.keyframes.iter_mut().zip(solid.keyframes()) {
                *dst = KeyframeRecord {
                    pos: keyframe.pos.to_array(),
                    time: keyframe.time,
                };
            }
        }

        blob
    }

    /// Rebuild a level, validating header and counts.
    pub fn to_level(&self) -> Result<Level, LevelFileError> {
        let header = self.header;
        if header.magic != LEVEL_MAGIC {
            return Err(LevelFileError::InvalidMagic);
        }
        if header.version != LEVEL_VERSION {
            return Err(LevelFileError::UnsupportedVersion(header.version));
        }

        let room_count = header.room_count as usize;
        if !(1..=MAX_ROOMS).contains(&room_count) {
            return Err(LevelFileError::InvalidRecord(format!(
                "room count {room_count} outside 1..={MAX_ROOMS}"
            )));
        }
        let solid_count = header.solid_count as usize;
        if solid_count > MAX_SOLIDS {
            return Err(LevelFileError::InvalidRecord(format!(
                "solid count {solid_count} above {MAX_SOLIDS}"
            )));
        }

        let mut level = Level::new(room_count, IVec2::from_array(header.spawn));
        for i in 0..room_count {
            let Some(room) = level.rooms.room_mut(i) else {
                continue;
            };
            room.layer_mut(TileLayer::Foreground).fill_from_bytes(&self.foreground[i]);
            room.layer_mut(TileLayer::Background).fill_from_bytes(&self.background[i]);
        }

        let extent = IVec2::new(ROOM_SIZE_PX.x, level.rooms.height_px());
        for (index, record) in self.solids[..solid_count].iter().enumerate() {
            level.add_solid(solid_from_record(index, record, extent)?);
        }

        Ok(level)
    }
}

/// Keyframe positions must lie within `0..=extent` so a path never spans
/// more pixels than the room stack.
fn solid_from_record(
    index: usize,
    record: &SolidRecord,
    extent: IVec2,
) -> Result<Solid, LevelFileError> {
    let count = record.keyframe_count as usize;
    if count > MAX_KEYFRAMES {
        return Err(LevelFileError::InvalidRecord(format!(
            "solid {index} has {count} keyframes (max {MAX_KEYFRAMES})"
        )));
    }

    let keyframes = &record.keyframes[..count];
    let increasing = keyframes
        .windows(2)
        .all(|w| w[1].time.partial_cmp(&w[0].time) == Some(std::cmp::Ordering::Greater));
    if !increasing {
        return Err(LevelFileError::InvalidRecord(format!(
            "solid {index} keyframe times do not strictly increase"
        )));
    }

    if let Some(k) = keyframes.iter().find(|k| {
        let pos = IVec2::from_array(k.pos);
        pos.cmplt(IVec2::ZERO).any() || pos.cmpgt(extent).any()
    }) {
        return Err(LevelFileError::InvalidRecord(format!(
            "solid {index} keyframe at {:?} outside the level (0..={extent})",
            k.pos
        )));
    }

    let sprite_id = SpriteId::from_u32(record.sprite_id);
    let size = IVec2::from_array(record.size);
    if keyframes.is_empty() {
        return Ok(Solid::new(sprite_id, IVec2::from_array(record.pos), size));
    }

    let keyframes: Vec<Keyframe> = keyframes
        .iter()
        .map(|k| Keyframe::new(IVec2::from_array(k.pos), k.time))
        .collect();
    Ok(Solid::with_path(sprite_id, size, &keyframes))
}

// ============================================================================
// SAVE / LOAD
// ============================================================================

/// Write `level` to `path`, creating parent directories as needed.
pub fn save_level(path: &Path, level: &Level) -> Result<(), LevelFileError> {
    let blob = LevelBlob::from_level(level);

    // Ensure parent directories exist.
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, bytemuck::bytes_of(&blob))?;

    tracing::info!("Saved level to {}", path.display());
    Ok(())
}

/// Read a level file. Any mismatch is an error; the caller decides the fallback.
pub fn load_level(path: &Path) -> Result<Level, LevelFileError> {
    let data = std::fs::read(path)?;

    let expected = std::mem::size_of::<LevelBlob>();
    if data.len() != expected {
        return Err(LevelFileError::SizeMismatch {
            expected,
            actual: data.len(),
        });
    }

    let blob: LevelBlob = bytemuck::pod_read_unaligned(&data);
    blob.to_level()
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::world::TileType;

    #[test]
    fn test_record_sizes() {
        assert_eq!(std::mem::size_of::<LevelHeader>(), 24);
        assert_eq!(std::mem::size_of::<SolidRecord>(), 120);
        assert_eq!(std::mem::size_of::<LevelBlob>(), 9304);
    }

    #[test]
    fn test_blob_round_trip_in_memory() {
        let mut level = Level::new(2, IVec2::new(16, 32));
        level
            .rooms
            .set_tile(TileLayer::Foreground, IVec2::new(3, 30), TileType::Spike);
        level
            .rooms
            .set_tile(TileLayer::Background, IVec2::new(5, 5), TileType::Solid);
        level.add_solid(Solid::new(SpriteId::Platform, IVec2::new(40, 40), IVec2::new(24, 8)));

        let restored = LevelBlob::from_level(&level).to_level().unwrap();
        assert_eq!(restored, level);
    }

    #[test]
    fn test_zeroed_blob_has_bad_magic() {
        let blob = LevelBlob::zeroed();
        assert!(matches!(blob.to_level(), Err(LevelFileError::InvalidMagic)));
    }

    #[test]
    fn test_bad_room_count() {
        let mut blob = LevelBlob::from_level(&Level::new(1, IVec2::ZERO));
        blob.header.room_count = 9;
        assert!(matches!(blob.to_level(), Err(LevelFileError::InvalidRecord(_))));
    }

    #[test]
    fn test_unordered_keyframes_rejected() {
        let mut blob = LevelBlob::from_level(&Level::new(1, IVec2::ZERO));
        blob.header.solid_count = 1;
        blob.solids[0].keyframe_count = 2;
        blob.solids[0].keyframes[0].time = 2.0;
        blob.solids[0].keyframes[1].time = 1.0;
        assert!(matches!(blob.to_level(), Err(LevelFileError::InvalidRecord(_))));
    }

    #[test]
    fn test_keyframes_outside_level_rejected() {
        let mut blob = LevelBlob::from_level(&Level::new(1, IVec2::ZERO));
        blob.header.solid_count = 1;
        blob.solids[0].keyframe_count = 2;
        blob.solids[0].keyframes[0] = KeyframeRecord {
            pos: [-2_000_000_000, 0],
            time: 0.0,
        };
        blob.solids[0].keyframes[1] = KeyframeRecord {
            pos: [2_000_000_000, 0],
            time: 1.0,
        };
        assert!(matches!(blob.to_level(), Err(LevelFileError::InvalidRecord(_))));
    }

    #[test]
    fn test_keyframes_on_level_edge_accepted() {
        let mut level = Level::new(2, IVec2::ZERO);
        level.add_solid(Solid::with_path(
            SpriteId::Platform,
            IVec2::new(24, 8),
            &[
                Keyframe::new(IVec2::ZERO, 0.0),
                Keyframe::new(IVec2::new(ROOM_SIZE_PX.x, ROOM_SIZE_PX.y * 2), 1.0),
            ],
        ));
        assert_eq!(LevelBlob::from_level(&level).to_level().unwrap(), level);
    }
}
