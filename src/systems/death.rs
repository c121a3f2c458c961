//! # Death Sweep
//!
//! Collects every entity at or below zero hit points after the damage pass.
//! NPC corpses are destroyed immediately; a dead player is left in the
//! world (the corpse stays visible) and the caller moves the state machine
//! to its lost-terminal state.

use crate::game::{Entity, GameLog, World};

/// Removes dead non-player entities and reports whether the player died.
pub fn death_sweep(world: &mut World, log: &mut GameLog, player: Entity) -> bool {
    let mut dead = Vec::new();
    for (entity, stats) in world.combat_stats.iter() {
        if stats.hp <= 0 {
            dead.push(entity);
        }
    }

    let mut player_died = false;
    for entity in dead {
        if let Some(name) = world.names.get(entity) {
            log.add(format!("{} died!", name.text));
        }

        if entity == player {
            player_died = true;
        } else {
            world.despawn(entity);
        }
    }

    player_died
}
