//! # Inventory Resolver
//!
//! Consumes pickup intents: the item moves off the map (loses its
//! `Position`) and into the holder's inventory list. The intent is removed
//! whether or not the pickup succeeds.

use crate::game::{GameLog, World};

/// Applies every pending pickup intent.
pub fn resolve_pickups(world: &mut World, log: &mut GameLog) {
    for holder in world.pickup_intents.entities() {
        let intent = match world.pickup_intents.remove(holder) {
            Some(intent) => intent,
            None => continue,
        };
        let item = intent.item;

        if world.inventories.contains(holder) {
            let holder_name = world.display_name(holder, "Someone");
            let item_name = world.display_name(item, "something");

            world.positions.remove(item);
            if let Some(inventory) = world.inventories.get_mut(holder) {
                inventory.items.push(item);
            }
            log.add(format!("{holder_name} picked up {item_name}"));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{Inventory, Item, Name, PickupIntent, Position};

    #[test]
    fn test_pickup_moves_item_into_inventory() {
        let mut world = World::new();
        let mut log = GameLog::new();

        let holder = world.spawn();
        world.names.insert(holder, Name::new("Player"));
        world.inventories.insert(holder, Inventory::default());

        let item = world.spawn();
        world.names.insert(item, Name::new("Healing Salve"));
        world.items.insert(item, Item);
        world.positions.insert(item, Position::new(4, 4));

        world.pickup_intents.insert(holder, PickupIntent { item });
        resolve_pickups(&mut world, &mut log);

        assert!(world.pickup_intents.get(holder).is_none());
        assert!(world.positions.get(item).is_none());
        assert_eq!(world.inventories.get(holder).unwrap().items, vec![item]);
        assert_eq!(log.recent(1), vec!["Player picked up Healing Salve"]);
    }

    #[test]
    fn test_pickup_without_inventory_still_clears_intent() {
        let mut world = World::new();
        let mut log = GameLog::new();

        let holder = world.spawn();
        let item = world.spawn();
        world.items.insert(item, Item);
        world.positions.insert(item, Position::new(4, 4));

        world.pickup_intents.insert(holder, PickupIntent { item });
        resolve_pickups(&mut world, &mut log);

        assert!(world.pickup_intents.get(holder).is_none());
        assert!(world.positions.get(item).is_some());
        assert!(log.is_empty());
    }
}
