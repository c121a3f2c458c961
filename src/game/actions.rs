//! # Actions
//!
//! Validation and application of move/attack/pickup/consume intents against
//! the current occupancy and blocking state.
//!
//! Two failure classes apply here: acting on an entity that is legitimately
//! missing a component (moving something with no position, picking up from
//! an empty tile) logs and no-ops, while violations of invariants the
//! content population guarantees (consuming a non-consumable, using an item
//! without an inventory) return an error.

use crate::game::{
    Consumable, Entity, GameLog, GameMap, IncomingDamage, IncomingHealing, MeleeIntent,
    PickupIntent, Position, World,
};
use crate::{DelveError, DelveResult};
use log::warn;

/// Attempts to move an entity by a delta, or to an absolute tile when
/// `absolute` is set.
///
/// If the destination holds a combat-capable occupant the move becomes a
/// melee attempt against the first such occupant and the mover stays put.
/// Moving into a blocked tile is a silent no-op. A successful move keeps
/// the blocked layer consistent and dirties the mover's viewshed.
pub fn try_move_entity(
    world: &mut World,
    map: &mut GameMap,
    entity: Entity,
    target: Position,
    absolute: bool,
) {
    let pos = match world.positions.get(entity) {
        Some(pos) => *pos,
        None => {
            warn!("tried to move an entity without a position: {entity:?}");
            return;
        }
    };

    let destination = if absolute { target } else { pos + target };
    if !map.in_bounds(destination) {
        return;
    }

    // First combat-capable occupant wins; encounter order is the
    // occupancy list order.
    for &other in map.tile_content_at(destination) {
        if world.combat_stats.contains(other) {
            world
                .melee_intents
                .insert(entity, MeleeIntent { defender: other });
            return;
        }
    }

    if !map.is_blocked(destination) {
        if world.blocks_tile.contains(entity) {
            map.set_blocked(pos, false);
            map.set_blocked(destination, true);
        }

        if let Some(pos_mut) = world.positions.get_mut(entity) {
            *pos_mut = destination;
        }

        if let Some(viewshed) = world.viewsheds.get_mut(entity) {
            viewshed.dirty = true;
        }
    }
}

/// Accumulates damage to be applied on this turn's damage pass.
pub fn inflict_damage(world: &mut World, entity: Entity, amount: i32) {
    let total = world
        .incoming_damage
        .get(entity)
        .map_or(amount, |incoming| incoming.amount + amount);
    world
        .incoming_damage
        .insert(entity, IncomingDamage { amount: total });
}

/// Accumulates healing to be applied on this turn's damage pass.
pub fn add_healing(world: &mut World, entity: Entity, amount: i32) {
    let total = world
        .incoming_healing
        .get(entity)
        .map_or(amount, |incoming| incoming.amount + amount);
    world
        .incoming_healing
        .insert(entity, IncomingHealing { amount: total });
}

/// Scans a tile for the first item and attaches a pickup intent for it.
/// An empty tile produces an in-log message instead.
pub fn attempt_pickup(
    world: &mut World,
    map: &GameMap,
    log: &mut GameLog,
    entity: Entity,
    position: Position,
) {
    let target = map
        .tile_content_at(position)
        .iter()
        .copied()
        .find(|e| world.items.contains(*e));

    match target {
        Some(item) => world.pickup_intents.insert(entity, PickupIntent { item }),
        None => log.add("No item to pick up!"),
    }
}

/// Consumes an inventory item: logs the use, schedules its healing, and
/// removes the item from the actor's inventory by identity.
///
/// This path is only reachable through validated inventory selection, so a
/// missing `Consumable` or `Inventory` is a programming error, not a
/// user-facing outcome.
pub fn consume_item(
    world: &mut World,
    log: &mut GameLog,
    actor: Entity,
    item: Entity,
) -> DelveResult<()> {
    let actor_name = world.display_name(actor, "Unknown Entity");
    let item_name = world.display_name(item, "Unknown Item");

    let consumable = world
        .consumables
        .get(item)
        .ok_or(DelveError::MissingComponent {
            entity: item,
            component: "Consumable",
        })?;
    let Consumable { verb, healing } = consumable.clone();

    let inventory = world
        .inventories
        .get_mut(actor)
        .ok_or(DelveError::MissingComponent {
            entity: actor,
            component: "Inventory",
        })?;
    inventory.items.retain(|&held| held != item);

    log.add(format!("{actor_name} {verb} {item_name}"));

    if healing > 0 {
        add_healing(world, actor, healing);
    }

    world.despawn(item);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{BlocksTile, CombatStats, Item, Name, Rect, Viewshed};
    use crate::systems::indexing::reindex;

    fn open_map() -> GameMap {
        let mut map = GameMap::new(20, 20);
        map.apply_room(&Rect::new(1, 1, 17, 17));
        map
    }

    #[test]
    fn test_move_into_wall_is_rejected() {
        let mut world = World::new();
        let mut map = open_map();
        let mover = world.spawn();
        world.positions.insert(mover, Position::new(1, 1));
        world.blocks_tile.insert(mover, BlocksTile);
        reindex(&mut world, &mut map);

        try_move_entity(&mut world, &mut map, mover, Position::new(-1, 0), false);
        assert_eq!(world.positions.get(mover), Some(&Position::new(1, 1)));
    }

    #[test]
    fn test_successful_move_updates_blocked_and_dirties_viewshed() {
        let mut world = World::new();
        let mut map = open_map();
        let mover = world.spawn();
        world.positions.insert(mover, Position::new(5, 5));
        world.blocks_tile.insert(mover, BlocksTile);
        let mut viewshed = Viewshed::new(7);
        viewshed.dirty = false;
        world.viewsheds.insert(mover, viewshed);
        reindex(&mut world, &mut map);

        try_move_entity(&mut world, &mut map, mover, Position::new(1, 0), false);

        assert_eq!(world.positions.get(mover), Some(&Position::new(6, 5)));
        assert!(!map.is_blocked(Position::new(5, 5)));
        assert!(map.is_blocked(Position::new(6, 5)));
        assert!(world.viewsheds.get(mover).unwrap().dirty);
    }

    #[test]
    fn test_bump_into_combatant_becomes_melee_intent() {
        let mut world = World::new();
        let mut map = open_map();
        let mover = world.spawn();
        let other = world.spawn();
        world.positions.insert(mover, Position::new(5, 5));
        world.positions.insert(other, Position::new(6, 5));
        world.blocks_tile.insert(other, BlocksTile);
        world.combat_stats.insert(
            other,
            CombatStats {
                hp: 10,
                max_hp: 10,
                defense: 2,
                power: 5,
            },
        );
        reindex(&mut world, &mut map);

        try_move_entity(&mut world, &mut map, mover, Position::new(1, 0), false);

        assert_eq!(world.positions.get(mover), Some(&Position::new(5, 5)));
        let intent = world.melee_intents.get(mover).expect("melee intent");
        assert_eq!(intent.defender, other);
    }

    #[test]
    fn test_move_without_position_is_a_noop() {
        let mut world = World::new();
        let mut map = open_map();
        let ghost = world.spawn();
        try_move_entity(&mut world, &mut map, ghost, Position::new(1, 0), false);
        assert!(world.positions.get(ghost).is_none());
    }

    #[test]
    fn test_pickup_from_empty_tile_logs() {
        let mut world = World::new();
        let mut map = open_map();
        let mut log = GameLog::new();
        let actor = world.spawn();
        world.positions.insert(actor, Position::new(5, 5));
        reindex(&mut world, &mut map);

        attempt_pickup(&mut world, &map, &mut log, actor, Position::new(5, 5));
        assert!(world.pickup_intents.get(actor).is_none());
        assert_eq!(log.recent(1), vec!["No item to pick up!"]);
    }

    #[test]
    fn test_pickup_attaches_intent_for_first_item() {
        let mut world = World::new();
        let mut map = open_map();
        let mut log = GameLog::new();
        let actor = world.spawn();
        let item = world.spawn();
        world.positions.insert(actor, Position::new(5, 5));
        world.positions.insert(item, Position::new(5, 5));
        world.items.insert(item, Item);
        reindex(&mut world, &mut map);

        attempt_pickup(&mut world, &map, &mut log, actor, Position::new(5, 5));
        assert_eq!(world.pickup_intents.get(actor).unwrap().item, item);
    }

    #[test]
    fn test_consume_requires_consumable_and_inventory() {
        let mut world = World::new();
        let mut log = GameLog::new();
        let actor = world.spawn();
        let junk = world.spawn();
        world.names.insert(junk, Name::new("Rock"));

        let err = consume_item(&mut world, &mut log, actor, junk);
        assert!(matches!(err, Err(DelveError::MissingComponent { .. })));
    }
}
