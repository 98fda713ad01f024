//! Pixel-stepped movement resolution
//!
//! X is resolved completely before Y. Each axis takes the whole pixels out of
//! its remainder and applies them one at a time, testing the shifted hitbox
//! against the level before every pixel. The first hit ends the move on that
//! axis.
//!
//! | Hit                   | X axis                  | Y axis (down)                        | Y axis (up) |
//! |-----------------------|-------------------------|--------------------------------------|-------------|
//! | solid / solid tile    | `speed.x = 0`, rem = 0  | grounded, dash refill, `speed.y = 0` | `speed.y = 0` |
//! | spike (while alive)   | kill                    | kill                                 | kill        |
//!
//! Spikes are ignored while the death animation plays.

use glam::{IVec2, Vec2};

use crate::physics::{AxisMove, step_units, take_whole_units};
use crate::world::RoomStack;

use super::Player;
use crate::game::collision::{CollisionFilter, CollisionHit, first_collision};
use crate::game::solids::Solid;

/// Knockback applied on a spike death: reverse the current motion at `speed`.
#[inline]
pub fn death_knockback(current: Vec2, speed: f32) -> Vec2 {
    (-current).normalize_or_zero() * speed
}

fn filter_for(player: &Player) -> CollisionFilter {
    CollisionFilter {
        spikes: player.is_alive(),
        ignore_solid: None,
    }
}

/// Resolve this step's horizontal motion.
pub fn move_x(
    player: &mut Player,
    solids: &[Solid],
    rooms: &RoomStack,
    knockback_speed: f32,
) -> AxisMove<CollisionHit> {
    let amount = take_whole_units(&mut player.remainder.x, player.speed.x);
    let filter = filter_for(player);

    let result = step_units(amount, |dir| {
        let next = player.rect().offset(IVec2::new(dir, 0));
        if let Some(hit) = first_collision(next, solids, rooms, filter) {
            return Some(hit);
        }
        player.pos.x += dir;
        None
    });

    if let Some(hit) = result.blocked_by {
        if hit.is_spike() {
            player.kill(death_knockback(player.speed, knockback_speed));
        } else {
            player.speed.x = 0.0;
            player.remainder.x = 0.0;
        }
    }
    result
}

/// Resolve this step's vertical motion and recompute `grounded`.
///
/// When no whole pixel is due and the player is not rising, a one-pixel
/// probe below the feet stands in for the downward step so a resting player
/// stays grounded.
pub fn move_y(
    player: &mut Player,
    solids: &[Solid],
    rooms: &RoomStack,
    knockback_speed: f32,
) -> AxisMove<CollisionHit> {
    player.grounded = false;
    let amount = take_whole_units(&mut player.remainder.y, player.speed.y);
    let filter = filter_for(player);

    let (result, moving_down) = if amount == 0 && player.speed.y >= 0.0 {
        let probe = player.rect().offset(IVec2::Y);
        let hit = first_collision(probe, solids, rooms, filter);
        (
            AxisMove {
                moved: 0,
                blocked_by: hit,
            },
            true,
        )
    } else {
        let result = step_units(amount, |dir| {
            let next = player.rect().offset(IVec2::new(0, dir));
            if let Some(hit) = first_collision(next, solids, rooms, filter) {
                return Some(hit);
            }
            player.pos.y += dir;
            None
        });
        (result, amount > 0)
    };

    if let Some(hit) = result.blocked_by {
        if hit.is_spike() {
            player.kill(death_knockback(player.speed, knockback_speed));
        } else if moving_down {
            player.grounded = true;
            player.dash_counter = 1;
            player.speed.y = 0.0;
            player.remainder.y = 0.0;
        } else {
            player.speed.y = 0.0;
        }
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::world::{TileLayer, TileType};

    fn floor_rooms(row: i32) -> RoomStack {
        let mut rooms = RoomStack::new(1);
        for x in 0..40 {
            rooms.set_tile(TileLayer::Foreground, IVec2::new(x, row), TileType::Solid);
        }
        rooms
    }

    #[test]
    fn test_fall_lands_and_refills_dash() {
        let rooms = floor_rooms(10);
        // Feet 3 px above the floor at y = 80
        let mut player = Player::new(IVec2::new(40, 80 - 16 - 3));
        player.speed.y = 3.6;
        player.dash_counter = 0;

        let result = move_y(&mut player, &[], &rooms, 4.0);
        assert_eq!(result.moved, 3);
        assert!(result.was_blocked());
        assert!(player.grounded);
        assert_eq!(player.dash_counter, 1);
        assert_eq!(player.speed.y, 0.0);
        assert_eq!(player.remainder.y, 0.0);
        assert_eq!(player.rect().bottom(), 80);
    }

    #[test]
    fn test_resting_player_probes_ground() {
        let rooms = floor_rooms(10);
        let mut player = Player::new(IVec2::new(40, 80 - 16));
        player.speed.y = 0.2;

        let result = move_y(&mut player, &[], &rooms, 4.0);
        assert_eq!(result.moved, 0);
        assert!(player.grounded);
        assert_eq!(player.remainder.y, 0.0);
    }

    #[test]
    fn test_ceiling_bump_keeps_airborne() {
        let rooms = floor_rooms(2);
        // Head 1 px below the ceiling at y = 24
        let mut player = Player::new(IVec2::new(40, 25));
        player.speed.y = -3.0;

        move_y(&mut player, &[], &rooms, 4.0);
        assert_eq!(player.pos.y, 24);
        assert!(!player.grounded);
        assert_eq!(player.speed.y, 0.0);
    }

    #[test]
    fn test_wall_stops_x() {
        let mut rooms = RoomStack::new(1);
        for y in 0..23 {
            rooms.set_tile(TileLayer::Foreground, IVec2::new(10, y), TileType::Solid);
        }
        let mut player = Player::new(IVec2::new(80 - 8 - 1, 40));
        player.speed.x = 2.0;

        let result = move_x(&mut player, &[], &rooms, 4.0);
        assert_eq!(result.moved, 1);
        assert_eq!(player.rect().right(), 80);
        assert_eq!(player.speed.x, 0.0);
        assert_eq!(player.remainder.x, 0.0);
    }

    #[test]
    fn test_spike_kills_with_knockback() {
        let mut rooms = RoomStack::new(1);
        rooms.set_tile(TileLayer::Foreground, IVec2::new(5, 10), TileType::Spike);
        // Spike hazard starts at y = 84
        let mut player = Player::new(IVec2::new(40, 84 - 16 - 2));
        player.speed.y = 3.0;

        move_y(&mut player, &[], &rooms, 4.0);
        assert!(!player.is_alive());
        assert_eq!(player.death_anim_timer, 0.0);
        assert_eq!(player.speed, Vec2::new(0.0, -4.0));
        assert!(!player.grounded);
    }

    #[test]
    fn test_dying_player_passes_spikes() {
        let mut rooms = RoomStack::new(1);
        rooms.set_tile(TileLayer::Foreground, IVec2::new(5, 10), TileType::Spike);
        let mut player = Player::new(IVec2::new(40, 84 - 16 - 2));
        player.death_anim_timer = 0.1;
        player.speed.y = 3.0;

        let result = move_y(&mut player, &[], &rooms, 4.0);
        assert_eq!(result.moved, 3);
        assert!(!result.was_blocked());
    }

    #[test]
    fn test_death_knockback_zero_speed() {
        assert_eq!(death_knockback(Vec2::ZERO, 4.0), Vec2::ZERO);
        let k = death_knockback(Vec2::new(3.0, 4.0), 5.0);
        assert!((k - Vec2::new(-3.0, -4.0)).length() < 1e-5);
    }
}
