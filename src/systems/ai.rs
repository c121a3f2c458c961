//! # Hostile AI
//!
//! Each hostile that currently sees the player either closes the distance
//! along a shortest path or, when already adjacent on the path, attempts a
//! melee attack. Pathfinding is breadth-first search on the four-connected
//! grid with Wall tiles impassable.
//!
//! [`Game::tick`](crate::game::Game::tick) invokes this only during the
//! enemy turn.

use crate::game::{try_move_entity, Entity, GameMap, MeleeIntent, Position, TileType, World};
use log::debug;
use pathfinding::prelude::bfs;

fn walkable_neighbors(map: &GameMap, pos: Position) -> Vec<Position> {
    pos.cardinal_neighbors()
        .into_iter()
        .filter(|n| map.tile_at(*n) == Some(TileType::Floor))
        .collect()
}

/// Runs one decision for every hostile with a position and a viewshed.
pub fn enemy_ai(world: &mut World, map: &mut GameMap, player: Entity) {
    let player_pos = match world.positions.get(player) {
        Some(pos) => *pos,
        None => return,
    };

    for enemy in world.enemies.entities() {
        let start = match world.positions.get(enemy) {
            Some(pos) => *pos,
            None => continue,
        };
        let sees_player = world
            .viewsheds
            .get(enemy)
            .is_some_and(|viewshed| viewshed.contains(player_pos));
        if !sees_player {
            continue;
        }

        let path = bfs(
            &start,
            |pos| walkable_neighbors(map, *pos),
            |pos| *pos == player_pos,
        );

        let path = match path {
            Some(path) => path,
            None => {
                debug!("{enemy:?} found no path to the player; giving up this turn");
                continue;
            }
        };

        if let Some(&next_step) = path.get(1) {
            if next_step == player_pos {
                world
                    .melee_intents
                    .insert(enemy, MeleeIntent { defender: player });
            } else {
                try_move_entity(world, map, enemy, next_step, true);
            }
        }
    }
}
