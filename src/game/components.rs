//! # Components
//!
//! Typed values attachable to entities. Presence is the only "type": an
//! entity may carry any subset. Marker components are empty structs.
//!
//! `MeleeIntent`, `PickupIntent`, `IncomingDamage`, and `IncomingHealing`
//! are one-turn transients: the resolver that consumes them removes them
//! within the same turn.

use crate::game::{Entity, Position};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Marker: the designated player entity.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct Player;

/// Marker: a hostile that acts on the enemy turn.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct Enemy;

/// Marker: the entity's tile counts as blocked for movement.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct BlocksTile;

/// Marker: the entity can be picked up off the floor.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct Item;

/// Marker: standing on this entity's tile triggers a level transition.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct CanDescend;

/// Marker: standing on this entity's tile wins the game.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct WinOnPickup;

/// Foreground color of a render glyph. Interpretation belongs to the
/// rendering collaborator; the simulation only carries it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GlyphColor {
    White,
    Yellow,
    Orange,
    Red,
    Cyan,
}

/// Display data for the render snapshot: glyph, color, and draw order.
/// Higher `z_index` draws on top.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Renderable {
    pub glyph: char,
    pub color: GlyphColor,
    pub z_index: i32,
}

/// Cached field-of-view result for one entity.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Viewshed {
    pub visible_tiles: HashSet<Position>,
    pub range: i32,
    /// Forces recomputation on the next visibility pass. Set by any
    /// successful move of the owning entity.
    pub dirty: bool,
}

impl Viewshed {
    /// Creates a dirty viewshed with the given sight radius.
    pub fn new(range: i32) -> Self {
        Self {
            visible_tiles: HashSet::new(),
            range,
            dirty: true,
        }
    }

    /// Whether a tile is in the cached visible set.
    pub fn contains(&self, tile: Position) -> bool {
        self.visible_tiles.contains(&tile)
    }
}

/// Hit points and melee attributes. `hp <= 0` triggers the death sweep.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct CombatStats {
    pub hp: i32,
    pub max_hp: i32,
    pub defense: i32,
    pub power: i32,
}

/// One-turn marker: the holder attempts a melee attack this turn.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct MeleeIntent {
    pub defender: Entity,
}

/// Damage accumulated this turn; multiple sources sum.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct IncomingDamage {
    pub amount: i32,
}

/// Healing accumulated this turn; multiple sources sum. Applied before
/// damage, capped at `max_hp`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct IncomingHealing {
    pub amount: i32,
}

/// Display name.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Name {
    pub text: String,
}

impl Name {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

/// Flavor text shown alongside an item.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Description {
    pub text: String,
}

/// One-turn marker: the holder attempts to pick up an item this turn.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct PickupIntent {
    pub item: Entity,
}

/// Item entities held by an entity. Held items carry no `Position`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Inventory {
    pub items: Vec<Entity>,
}

/// An item that can be used up for an effect.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Consumable {
    /// Verb for the consumption log line, e.g. "quaffed".
    pub verb: String,
    pub healing: i32,
}
