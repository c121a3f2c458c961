//! # Level Transition
//!
//! Descending and winning. When the player stands on a descend trigger the
//! whole level is torn down: every entity except the player (and the items
//! the player's inventory owns) is destroyed, a fresh dungeon is generated
//! at the same dimensions, and the player is relocated to the new start
//! room.

use crate::game::{Entity, GameLog, GameMap, World};
use crate::generation::LevelGenerator;
use crate::DelveResult;
use std::collections::HashSet;

/// Checks for a descend trigger under the player and performs the level
/// transition when one fires. Returns whether a transition happened.
pub fn check_descend(
    world: &mut World,
    map: &mut GameMap,
    log: &mut GameLog,
    level_gen: &LevelGenerator,
    player: Entity,
    level: &mut u32,
) -> DelveResult<bool> {
    let player_pos = match world.positions.get(player) {
        Some(pos) => *pos,
        None => return Ok(false),
    };

    let triggered = world
        .can_descend
        .iter()
        .any(|(entity, _)| world.positions.get(entity) == Some(&player_pos));
    if !triggered {
        return Ok(false);
    }

    *level += 1;
    log.add("Descending Stairs!");

    // Everything except the player and its held items goes. Held items
    // carry no Position, so the occupancy rebuild cannot resurrect them.
    let mut keep: HashSet<Entity> = HashSet::new();
    keep.insert(player);
    if let Some(inventory) = world.inventories.get(player) {
        keep.extend(inventory.items.iter().copied());
    }
    for entity in world.entities() {
        if !keep.contains(&entity) {
            world.despawn(entity);
        }
    }

    let data = level_gen.generate_level(world, map.width, map.height, *level)?;
    *map = data.map;

    if let Some(pos) = world.positions.get_mut(player) {
        *pos = data.player_start;
    }
    if let Some(viewshed) = world.viewsheds.get_mut(player) {
        viewshed.dirty = true;
    }

    Ok(true)
}

/// Whether a win trigger shares the player's exact tile.
pub fn check_win(world: &World, player: Entity) -> bool {
    let player_pos = match world.positions.get(player) {
        Some(pos) => *pos,
        None => return false,
    };

    world
        .win_on_pickup
        .iter()
        .any(|(entity, _)| world.positions.get(entity) == Some(&player_pos))
}
