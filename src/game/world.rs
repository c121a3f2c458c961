//! # Entity World
//!
//! A registry of entities, each an open set of typed component values.
//!
//! Entities are opaque generational identifiers: destroying an entity bumps
//! its slot's generation, so a stale identifier held inside another component
//! (a melee intent's defender, an inventory's items) can be detected as dead
//! instead of silently aliasing a recycled slot.
//!
//! Components live in one sparse store per type, keyed by entity. Queries are
//! intersections over stores: iterate the narrowest store and filter on the
//! others. Stores use ordered maps so iteration order is stable across runs,
//! which keeps the whole simulation deterministic for a fixed seed.

use crate::game::components::*;
use crate::game::Position;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Opaque, stable identifier for an entity.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct Entity {
    index: u32,
    generation: u32,
}

/// Sparse component storage for a single component type.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComponentStore<T> {
    components: BTreeMap<Entity, T>,
}

impl<T> Default for ComponentStore<T> {
    fn default() -> Self {
        Self {
            components: BTreeMap::new(),
        }
    }
}

impl<T> ComponentStore<T> {

    /// Attaches a component, replacing any previous value.
    pub fn insert(&mut self, entity: Entity, component: T) {
        self.components.insert(entity, component);
    }

    /// Detaches and returns the component, if present.
    pub fn remove(&mut self, entity: Entity) -> Option<T> {
        self.components.remove(&entity)
    }

    pub fn get(&self, entity: Entity) -> Option<&T> {
        self.components.get(&entity)
    }

    pub fn get_mut(&mut self, entity: Entity) -> Option<&mut T> {
        self.components.get_mut(&entity)
    }

    pub fn contains(&self, entity: Entity) -> bool {
        self.components.contains_key(&entity)
    }

    /// Iterates `(entity, component)` pairs in stable entity order.
    pub fn iter(&self) -> impl Iterator<Item = (Entity, &T)> {
        self.components.iter().map(|(e, c)| (*e, c))
    }

    /// Entities carrying this component, in stable order. Collected up
    /// front so callers can mutate stores while walking the result.
    pub fn entities(&self) -> Vec<Entity> {
        self.components.keys().copied().collect()
    }

    pub fn len(&self) -> usize {
        self.components.len()
    }

    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }
}

/// The entity registry and every per-type component store.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct World {
    generations: Vec<u32>,
    alive: Vec<bool>,
    free: Vec<u32>,

    pub positions: ComponentStore<Position>,
    pub renderables: ComponentStore<Renderable>,
    pub players: ComponentStore<Player>,
    pub enemies: ComponentStore<Enemy>,
    pub blocks_tile: ComponentStore<BlocksTile>,
    pub viewsheds: ComponentStore<Viewshed>,
    pub combat_stats: ComponentStore<CombatStats>,
    pub melee_intents: ComponentStore<MeleeIntent>,
    pub incoming_damage: ComponentStore<IncomingDamage>,
    pub incoming_healing: ComponentStore<IncomingHealing>,
    pub names: ComponentStore<Name>,
    pub items: ComponentStore<Item>,
    pub pickup_intents: ComponentStore<PickupIntent>,
    pub inventories: ComponentStore<Inventory>,
    pub consumables: ComponentStore<Consumable>,
    pub descriptions: ComponentStore<Description>,
    pub can_descend: ComponentStore<CanDescend>,
    pub win_on_pickup: ComponentStore<WinOnPickup>,
}

impl World {
    /// Creates an empty world.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a new entity with no components.
    pub fn spawn(&mut self) -> Entity {
        if let Some(index) = self.free.pop() {
            self.alive[index as usize] = true;
            Entity {
                index,
                generation: self.generations[index as usize],
            }
        } else {
            let index = self.generations.len() as u32;
            self.generations.push(0);
            self.alive.push(true);
            Entity {
                index,
                generation: 0,
            }
        }
    }

    /// Whether an identifier still refers to a live entity.
    pub fn is_alive(&self, entity: Entity) -> bool {
        let idx = entity.index as usize;
        idx < self.generations.len()
            && self.alive[idx]
            && self.generations[idx] == entity.generation
    }

    /// Destroys an entity and detaches all of its components. The slot's
    /// generation is bumped so outstanding identifiers go stale.
    pub fn despawn(&mut self, entity: Entity) {
        if !self.is_alive(entity) {
            return;
        }

        self.positions.remove(entity);
        self.renderables.remove(entity);
        self.players.remove(entity);
        self.enemies.remove(entity);
        self.blocks_tile.remove(entity);
        self.viewsheds.remove(entity);
        self.combat_stats.remove(entity);
        self.melee_intents.remove(entity);
        self.incoming_damage.remove(entity);
        self.incoming_healing.remove(entity);
        self.names.remove(entity);
        self.items.remove(entity);
        self.pickup_intents.remove(entity);
        self.inventories.remove(entity);
        self.consumables.remove(entity);
        self.descriptions.remove(entity);
        self.can_descend.remove(entity);
        self.win_on_pickup.remove(entity);

        let idx = entity.index as usize;
        self.alive[idx] = false;
        self.generations[idx] += 1;
        self.free.push(entity.index);
    }

    /// All live entities, in stable index order.
    pub fn entities(&self) -> Vec<Entity> {
        self.alive
            .iter()
            .enumerate()
            .filter(|(_, alive)| **alive)
            .map(|(idx, _)| Entity {
                index: idx as u32,
                generation: self.generations[idx],
            })
            .collect()
    }

    /// Display name of an entity, or a fallback for the nameless.
    pub fn display_name(&self, entity: Entity, fallback: &str) -> String {
        self.names
            .get(entity)
            .map(|n| n.text.clone())
            .unwrap_or_else(|| fallback.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spawn_despawn_lifecycle() {
        let mut world = World::new();
        let e = world.spawn();
        assert!(world.is_alive(e));

        world.positions.insert(e, Position::new(1, 2));
        world.despawn(e);

        assert!(!world.is_alive(e));
        assert!(world.positions.get(e).is_none());
    }

    #[test]
    fn test_recycled_slot_gets_new_generation() {
        let mut world = World::new();
        let stale = world.spawn();
        world.despawn(stale);

        let fresh = world.spawn();
        assert_ne!(stale, fresh);
        assert!(!world.is_alive(stale));
        assert!(world.is_alive(fresh));

        // A component written for the fresh entity must not be reachable
        // through the stale identifier.
        world.positions.insert(fresh, Position::new(3, 4));
        assert!(world.positions.get(stale).is_none());
    }

    #[test]
    fn test_store_iteration_is_in_entity_order() {
        let mut world = World::new();
        let a = world.spawn();
        let b = world.spawn();
        let c = world.spawn();
        world.positions.insert(c, Position::new(3, 0));
        world.positions.insert(a, Position::new(1, 0));
        world.positions.insert(b, Position::new(2, 0));

        let order: Vec<Entity> = world.positions.entities();
        assert_eq!(order, vec![a, b, c]);
    }

    #[test]
    fn test_display_name_fallback() {
        let mut world = World::new();
        let named = world.spawn();
        let anon = world.spawn();
        world.names.insert(
            named,
            Name {
                text: "Goblin".to_string(),
            },
        );

        assert_eq!(world.display_name(named, "Someone"), "Goblin");
        assert_eq!(world.display_name(anon, "Someone"), "Someone");
    }
}
