//! # Combat Resolver
//!
//! Two passes, in fixed order each turn: melee intents become accumulated
//! damage markers, then the damage pass applies healing (capped at max hp)
//! before subtracting damage. The death sweep runs afterwards in
//! [`death`](crate::systems::death).

use crate::game::{inflict_damage, GameLog, World};
use crate::{DelveError, DelveResult};

/// Consumes every melee intent, logging the outcome and accumulating
/// damage on the defender.
///
/// An attacker or defender without `CombatStats` violates a content
/// invariant and is reported as an error rather than skipped.
pub fn resolve_melee(world: &mut World, log: &mut GameLog) -> DelveResult<()> {
    for attacker in world.melee_intents.entities() {
        let intent = match world.melee_intents.remove(attacker) {
            Some(intent) => intent,
            None => continue,
        };
        let defender = intent.defender;

        let attacker_stats =
            *world
                .combat_stats
                .get(attacker)
                .ok_or(DelveError::MissingComponent {
                    entity: attacker,
                    component: "CombatStats",
                })?;
        let defender_stats =
            *world
                .combat_stats
                .get(defender)
                .ok_or(DelveError::MissingComponent {
                    entity: defender,
                    component: "CombatStats",
                })?;

        let attacker_name = world.display_name(attacker, "An unknown attacker");
        let defender_name = world.display_name(defender, "An unknown defender");

        let damage = (attacker_stats.power - defender_stats.defense).max(0);
        if damage == 0 {
            log.add(format!("{attacker_name} couldn't hurt {defender_name}!"));
        } else {
            log.add(format!(
                "{attacker_name} attacked {defender_name} for {damage} damage!"
            ));
            inflict_damage(world, defender, damage);
        }
    }

    Ok(())
}

/// Applies the turn's accumulated healing, then its accumulated damage.
///
/// Healing lands first and is capped at `max_hp`, so a wounded entity that
/// both healed and was hit this turn computes from the healed total. Hp may
/// go negative; the death sweep handles it.
pub fn resolve_damage(world: &mut World) {
    for entity in world.incoming_healing.entities() {
        let healing = match world.incoming_healing.remove(entity) {
            Some(healing) => healing,
            None => continue,
        };
        if let Some(stats) = world.combat_stats.get_mut(entity) {
            stats.hp = (stats.hp + healing.amount).min(stats.max_hp);
        }
    }

    for entity in world.incoming_damage.entities() {
        let damage = match world.incoming_damage.remove(entity) {
            Some(damage) => damage,
            None => continue,
        };
        if let Some(stats) = world.combat_stats.get_mut(entity) {
            stats.hp -= damage.amount;
        }
    }
}
