//! World Collision Queries
//!
//! First-hit-wins overlap tests of a rectangle against the level. Scan order
//! is fixed:
//!
//! 1. Solids, in insertion order
//! 2. Foreground tiles under the rectangle, column-major (x outer, y inner)
//!
//! The first overlapping body is returned and nothing after it is examined.
//! Cells outside every room never collide.

use glam::IVec2;

use crate::physics::{IRect, rect_collision};
use crate::world::{RoomStack, TileLayer, TileType, spike_rect, tile_rect, world_to_cell};

use super::solids::Solid;

/// Horizontal reach of the wall probe, in pixels.
pub const WALL_CHECK_DISTANCE: i32 = 2;

/// What a query ran into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollisionHit {
    /// Index into the level's solids
    Solid(usize),
    /// Foreground tile at a world cell
    Tile { cell: IVec2, kind: TileType },
}

impl CollisionHit {
    #[inline]
    pub fn is_spike(&self) -> bool {
        matches!(
            self,
            CollisionHit::Tile {
                kind: TileType::Spike,
                ..
            }
        )
    }

    /// Collision rect of the body that was hit.
    pub fn rect(&self, solids: &[Solid]) -> IRect {
        match *self {
            CollisionHit::Solid(index) => solids[index].rect(),
            CollisionHit::Tile {
                cell,
                kind: TileType::Spike,
            } => spike_rect(cell),
            CollisionHit::Tile { cell, .. } => tile_rect(cell),
        }
    }
}

/// Which bodies a query considers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CollisionFilter {
    /// Count spike tiles (their bottom-half rect) as hits
    pub spikes: bool,
    /// Skip this solid (the one doing the moving)
    pub ignore_solid: Option<usize>,
}

impl Default for CollisionFilter {
    fn default() -> Self {
        Self {
            spikes: true,
            ignore_solid: None,
        }
    }
}

impl CollisionFilter {
    /// Solid geometry only: no spikes.
    pub fn walls() -> Self {
        Self {
            spikes: false,
            ignore_solid: None,
        }
    }
}

/// First body overlapping `rect`, in scan order.
pub fn first_collision(
    rect: IRect,
    solids: &[Solid],
    rooms: &RoomStack,
    filter: CollisionFilter,
) -> Option<CollisionHit> {
    for (index, solid) in solids.iter().enumerate() {
        if filter.ignore_solid == Some(index) {
            continue;
        }
        if rect_collision(rect, solid.rect()) {
            return Some(CollisionHit::Solid(index));
        }
    }
    first_tile_collision(rect, rooms, filter.spikes)
}

/// First foreground tile overlapping `rect`, column-major.
pub fn first_tile_collision(rect: IRect, rooms: &RoomStack, spikes: bool) -> Option<CollisionHit> {
    if rect.size.x <= 0 || rect.size.y <= 0 {
        return None;
    }
    let min = world_to_cell(rect.pos);
    let max = world_to_cell(IVec2::new(rect.right() - 1, rect.bottom() - 1));

    for x in min.x..=max.x {
        for y in min.y..=max.y {
            let cell = IVec2::new(x, y);
            let Some(tile) = rooms.tile_at(TileLayer::Foreground, cell) else {
                continue;
            };
            match tile.kind {
                TileType::Solid => {
                    return Some(CollisionHit::Tile {
                        cell,
                        kind: TileType::Solid,
                    });
                }
                TileType::Spike if spikes && rect_collision(rect, spike_rect(cell)) => {
                    return Some(CollisionHit::Tile {
                        cell,
                        kind: TileType::Spike,
                    });
                }
                _ => {}
            }
        }
    }
    None
}

/// Side of the player a touched wall is on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WallSide {
    Left,
    Right,
}

impl WallSide {
    /// Horizontal direction pointing away from the wall.
    #[inline]
    pub fn away(self) -> f32 {
        match self {
            WallSide::Left => 1.0,
            WallSide::Right => -1.0,
        }
    }
}

/// Pick the wall side by comparing overlap depths: the side with less
/// overlap is the one the wall is on.
pub fn wall_side(player: IRect, wall: IRect) -> WallSide {
    if wall.right() - player.left() < player.right() - wall.left() {
        WallSide::Left
    } else {
        WallSide::Right
    }
}

/// Wall touching `rect` within [`WALL_CHECK_DISTANCE`] horizontally.
///
/// Spikes never count as walls.
pub fn wall_contact(
    rect: IRect,
    solids: &[Solid],
    rooms: &RoomStack,
) -> Option<(WallSide, CollisionHit)> {
    let probe = rect.inflate(IVec2::new(WALL_CHECK_DISTANCE, 0));
    let hit = first_collision(probe, solids, rooms, CollisionFilter::walls())?;
    Some((wall_side(rect, hit.rect(solids)), hit))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::SpriteId;

    fn rooms_with(cells: &[(i32, i32, TileType)]) -> RoomStack {
        let mut rooms = RoomStack::new(1);
        for &(x, y, kind) in cells {
            rooms.set_tile(TileLayer::Foreground, IVec2::new(x, y), kind);
        }
        rooms
    }

    #[test]
    fn test_solids_scanned_before_tiles() {
        let rooms = rooms_with(&[(2, 2, TileType::Solid)]);
        let solids = vec![Solid::new(SpriteId::Platform, IVec2::new(16, 16), IVec2::new(8, 8))];
        let rect = IRect::new(IVec2::new(16, 16), IVec2::new(8, 8));
        assert_eq!(
            first_collision(rect, &solids, &rooms, CollisionFilter::default()),
            Some(CollisionHit::Solid(0))
        );
    }

    #[test]
    fn test_tiles_scanned_column_major() {
        // (1, 2) and (2, 1) both overlap; x = 1 column is scanned first
        let rooms = rooms_with(&[(2, 1, TileType::Solid), (1, 2, TileType::Solid)]);
        let rect = IRect::new(IVec2::new(8, 8), IVec2::new(16, 16));
        assert_eq!(
            first_tile_collision(rect, &rooms, true),
            Some(CollisionHit::Tile {
                cell: IVec2::new(1, 2),
                kind: TileType::Solid
            })
        );
    }

    #[test]
    fn test_spike_top_half_is_not_a_hit() {
        let rooms = rooms_with(&[(3, 3, TileType::Spike)]);
        let top_half = IRect::new(IVec2::new(24, 24), IVec2::new(8, 4));
        assert_eq!(first_tile_collision(top_half, &rooms, true), None);
        let bottom_half = top_half.offset(IVec2::new(0, 1));
        assert!(first_tile_collision(bottom_half, &rooms, true).is_some_and(|h| h.is_spike()));
        assert_eq!(first_tile_collision(bottom_half, &rooms, false), None);
    }

    #[test]
    fn test_off_grid_never_collides() {
        let rooms = RoomStack::new(1);
        let rect = IRect::new(IVec2::new(-40, -40), IVec2::new(8, 16));
        assert_eq!(first_tile_collision(rect, &rooms, true), None);
    }

    #[test]
    fn test_wall_side_right() {
        let player = IRect::new(IVec2::new(100, 100), IVec2::new(8, 16));
        let wall = IRect::new(IVec2::new(109, 90), IVec2::new(16, 40));
        assert_eq!(wall_side(player, wall), WallSide::Right);
        assert_eq!(WallSide::Right.away(), -1.0);
    }

    #[test]
    fn test_wall_side_left() {
        let player = IRect::new(IVec2::new(100, 100), IVec2::new(8, 16));
        let wall = IRect::new(IVec2::new(84, 90), IVec2::new(16, 40));
        assert_eq!(wall_side(player, wall), WallSide::Left);
    }

    #[test]
    fn test_wall_contact_ignores_floor() {
        let rooms = rooms_with(&[(10, 12, TileType::Solid)]);
        // Standing exactly on top of the tile
        let player = IRect::new(IVec2::new(80, 96 - 16), IVec2::new(8, 16));
        assert_eq!(wall_contact(player, &[], &rooms), None);
    }
}
