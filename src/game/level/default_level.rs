//! Procedural first-run level.
//!
//! Two rooms. The top room has a floor with a gap, a floating ledge, a spike
//! row, a climbing column and one moving platform; the gap drops into the
//! bottom room.

use glam::IVec2;

use crate::render::SpriteId;
use crate::world::{ROOM_GRID, TileLayer, TileType};

use super::Level;
use crate::game::solids::{Keyframe, Solid};

const ROOM_COUNT: usize = 2;
const SPAWN: IVec2 = IVec2::new(24, 152);
const FLOOR_GAP: std::ops::RangeInclusive<i32> = 30..=33;

fn fill(level: &mut Level, layer: TileLayer, min: IVec2, max: IVec2, kind: TileType) {
    for x in min.x..=max.x {
        for y in min.y..=max.y {
            level.rooms.set_tile(layer, IVec2::new(x, y), kind);
        }
    }
}

/// Build the default level.
pub fn default_level() -> Level {
    let mut level = Level::new(ROOM_COUNT, SPAWN);
    let height = ROOM_GRID.y * ROOM_COUNT as i32;
    let fg = TileLayer::Foreground;

    // Side walls through every room
    fill(&mut level, fg, IVec2::new(0, 0), IVec2::new(0, height - 1), TileType::Solid);
    let right = ROOM_GRID.x - 1;
    fill(&mut level, fg, IVec2::new(right, 0), IVec2::new(right, height - 1), TileType::Solid);

    // Top room floor, with a gap into the room below
    for x in 1..right {
        if !FLOOR_GAP.contains(&x) {
            fill(&mut level, fg, IVec2::new(x, 21), IVec2::new(x, 22), TileType::Solid);
        }
    }
    fill(&mut level, fg, IVec2::new(10, 15), IVec2::new(16, 15), TileType::Solid);
    fill(&mut level, fg, IVec2::new(20, 20), IVec2::new(22, 20), TileType::Spike);
    fill(&mut level, fg, IVec2::new(36, 8), IVec2::new(38, 20), TileType::Solid);

    // Bottom room floor
    let bottom = height - 2;
    fill(&mut level, fg, IVec2::new(1, bottom), IVec2::new(right - 1, bottom + 1), TileType::Solid);

    // Decorative backdrop
    fill(
        &mut level,
        TileLayer::Background,
        IVec2::new(4, 3),
        IVec2::new(8, 6),
        TileType::Solid,
    );

    level.add_solid(Solid::with_path(
        SpriteId::Platform,
        IVec2::new(24, 8),
        &[
            Keyframe::new(IVec2::new(200, 120), 0.0),
            Keyframe::new(IVec2::new(260, 120), 2.0),
            Keyframe::new(IVec2::new(200, 120), 4.0),
        ],
    ));

    level
}
