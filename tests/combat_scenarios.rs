//! Scenario tests for the combat pipeline: melee, damage ordering, and the
//! death sweep, driven directly through the systems.

use delve::game::{CombatStats, GameLog, MeleeIntent, Name, Position, World};
use delve::systems::{death_sweep, resolve_damage, resolve_melee};
use delve::{add_healing, consume_item, inflict_damage};

fn combatant(world: &mut World, name: &str, hp: i32, max_hp: i32, power: i32, defense: i32) -> delve::Entity {
    let entity = world.spawn();
    world.names.insert(entity, Name::new(name));
    world.combat_stats.insert(
        entity,
        CombatStats {
            hp,
            max_hp,
            defense,
            power,
        },
    );
    entity
}

#[test]
fn melee_kills_hostile_on_fourth_hit() {
    let mut world = World::new();
    let mut log = GameLog::new();

    let player = combatant(&mut world, "Player", 30, 30, 5, 2);
    world.positions.insert(player, Position::new(5, 5));
    let hostile = combatant(&mut world, "Goblin", 10, 10, 5, 2);
    world.positions.insert(hostile, Position::new(6, 5));

    // Per-hit damage is max(0, 5 - 2) = 3.
    for turn in 1..=4 {
        world
            .melee_intents
            .insert(player, MeleeIntent { defender: hostile });
        resolve_melee(&mut world, &mut log).expect("combat stats present");
        resolve_damage(&mut world);
        let player_died = death_sweep(&mut world, &mut log, player);
        assert!(!player_died);

        if turn < 4 {
            let hp = world.combat_stats.get(hostile).expect("still alive").hp;
            assert_eq!(hp, 10 - 3 * turn);
        }
    }

    // 10 - 12 <= 0: removed on the fourth sweep, with a death message.
    assert!(!world.is_alive(hostile));
    assert!(world.combat_stats.get(hostile).is_none());
    assert!(log.messages().any(|m| m == "Goblin died!"));
}

#[test]
fn healing_applies_before_damage_and_caps() {
    let mut world = World::new();
    let mut log = GameLog::new();
    let target = combatant(&mut world, "Target", 10, 10, 0, 0);

    add_healing(&mut world, target, 5);
    inflict_damage(&mut world, target, 8);
    resolve_damage(&mut world);

    // min(10 + 5, 10) - 8 = 2
    assert_eq!(world.combat_stats.get(target).unwrap().hp, 2);

    let player_died = death_sweep(&mut world, &mut log, target);
    assert!(!player_died);
    assert!(world.is_alive(target));
}

#[test]
fn player_death_is_terminal_but_not_removal() {
    let mut world = World::new();
    let mut log = GameLog::new();
    let player = combatant(&mut world, "Player", 3, 30, 5, 2);
    let brute = combatant(&mut world, "Brute", 10, 10, 9, 0);

    world
        .melee_intents
        .insert(brute, MeleeIntent { defender: player });
    resolve_melee(&mut world, &mut log).unwrap();
    resolve_damage(&mut world);
    let player_died = death_sweep(&mut world, &mut log, player);

    assert!(player_died);
    // The corpse stays in the world for rendering.
    assert!(world.is_alive(player));
    assert!(world.combat_stats.get(player).is_some());
    assert!(log.messages().any(|m| m == "Player died!"));
}

#[test]
fn consuming_a_healing_item_updates_hp_and_inventory() {
    let mut world = World::new();
    let mut log = GameLog::new();

    let actor = combatant(&mut world, "Player", 20, 30, 5, 2);
    let salve = world.spawn();
    world.names.insert(salve, Name::new("Healing Salve"));
    world.consumables.insert(
        salve,
        delve::game::Consumable {
            verb: "applied".to_string(),
            healing: 5,
        },
    );
    world.inventories.insert(
        actor,
        delve::game::Inventory { items: vec![salve] },
    );

    consume_item(&mut world, &mut log, actor, salve).expect("valid consume");
    resolve_damage(&mut world);

    assert_eq!(world.combat_stats.get(actor).unwrap().hp, 25);
    assert!(world
        .inventories
        .get(actor)
        .unwrap()
        .items
        .is_empty());
    assert!(log.messages().any(|m| m == "Player applied Healing Salve"));
}
