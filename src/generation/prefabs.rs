//! # Prefabs
//!
//! Spawn functions for every entity kind the populator places. Stats and
//! sight ranges live here; spawn positions are the populator's business.

use crate::config;
use crate::game::{
    BlocksTile, CanDescend, CombatStats, Consumable, Description, Enemy, Entity, GlyphColor,
    Inventory, Item, Name, Player, Position, Renderable, Viewshed, WinOnPickup, World,
};

/// Places an already spawned entity on the map.
pub fn place(world: &mut World, entity: Entity, position: Position) {
    world.positions.insert(entity, position);
}

/// The player: combat-capable, sighted, and carrying a few starting salves.
pub fn spawn_player(world: &mut World, position: Position) -> Entity {
    let player = world.spawn();
    world.players.insert(player, Player);
    world.positions.insert(player, position);
    world.renderables.insert(
        player,
        Renderable {
            glyph: '@',
            color: GlyphColor::Yellow,
            z_index: 10,
        },
    );
    world.blocks_tile.insert(player, BlocksTile);
    world
        .viewsheds
        .insert(player, Viewshed::new(config::PLAYER_VIEW_RANGE));
    world.combat_stats.insert(
        player,
        CombatStats {
            hp: 50,
            max_hp: 50,
            defense: 2,
            power: 5,
        },
    );
    world.names.insert(player, Name::new("Player"));

    let mut inventory = Inventory::default();
    for _ in 0..config::STARTING_SALVES {
        inventory.items.push(spawn_salve(world));
    }
    world.inventories.insert(player, inventory);

    player
}

fn spawn_hostile(world: &mut World, name: &str, glyph: char) -> Entity {
    let hostile = world.spawn();
    world.enemies.insert(hostile, Enemy);
    world.blocks_tile.insert(hostile, BlocksTile);
    world
        .viewsheds
        .insert(hostile, Viewshed::new(config::ENEMY_VIEW_RANGE));
    world.combat_stats.insert(
        hostile,
        CombatStats {
            hp: 10,
            max_hp: 10,
            defense: 2,
            power: 5,
        },
    );
    world.renderables.insert(
        hostile,
        Renderable {
            glyph,
            color: GlyphColor::Red,
            z_index: 10,
        },
    );
    world.names.insert(hostile, Name::new(name));
    hostile
}

pub fn spawn_goblin(world: &mut World) -> Entity {
    spawn_hostile(world, "Goblin", 'g')
}

pub fn spawn_orc(world: &mut World) -> Entity {
    spawn_hostile(world, "Orc", 'o')
}

/// A consumable healing item.
pub fn spawn_salve(world: &mut World) -> Entity {
    let salve = world.spawn();
    world.items.insert(salve, Item);
    world.names.insert(salve, Name::new("Healing Salve"));
    world.renderables.insert(
        salve,
        Renderable {
            glyph: '!',
            color: GlyphColor::Orange,
            z_index: 0,
        },
    );
    world.consumables.insert(
        salve,
        Consumable {
            verb: "applied".to_string(),
            healing: 5,
        },
    );
    world.descriptions.insert(
        salve,
        Description {
            text: "A bit worn, but will still heal".to_string(),
        },
    );
    salve
}

/// Stairs down to the next level.
pub fn spawn_stairs(world: &mut World) -> Entity {
    let stairs = world.spawn();
    world.renderables.insert(
        stairs,
        Renderable {
            glyph: '>',
            color: GlyphColor::Cyan,
            z_index: 0,
        },
    );
    world.names.insert(stairs, Name::new("Stairs"));
    world.can_descend.insert(stairs, CanDescend);
    stairs
}

/// The victory item that spawns in place of the stairs on the final level.
pub fn spawn_amulet(world: &mut World) -> Entity {
    let amulet = world.spawn();
    world.renderables.insert(
        amulet,
        Renderable {
            glyph: '*',
            color: GlyphColor::Yellow,
            z_index: 0,
        },
    );
    world.names.insert(amulet, Name::new("Ancient Amulet"));
    world.win_on_pickup.insert(amulet, WinOnPickup);
    amulet
}
