//! # Delve
//!
//! The simulation core of a turn-based, tile-grid dungeon crawler.
//!
//! ## Architecture Overview
//!
//! The crate is organized around a few key pieces:
//!
//! - **Entity World**: a registry of entities with sparse per-type component
//!   stores, keyed by generational identifiers
//! - **Tile Map**: Wall/Floor grid plus derived visibility and occupancy layers
//! - **Generation**: seeded room-and-corridor dungeon generation and level
//!   population
//! - **Systems**: the fixed, ordered turn pipeline (indexing, visibility,
//!   hostile AI, combat, inventory, level transition)
//! - **Game**: the turn state machine and the input/render boundary
//!
//! Rendering, input capture, and process bootstrap live outside this crate.
//! The [`Game`] type exposes one entry point per player intent and read-only
//! snapshots for a renderer; everything else is internal simulation.

pub mod game;
pub mod generation;
pub mod systems;

pub use game::{
    add_healing, attempt_pickup, consume_item, inflict_damage, try_move_entity, CombatStats,
    Consumable, Description, Entity, Game, GameLog, GameMap, GlyphColor, Inventory, Name, Position,
    Rect, Renderable, RenderableSnapshot, RunState, TileType, Viewshed, World,
};

pub use generation::{generate_map, LevelData, LevelGenerator};

/// Core error type for the Delve simulation.
#[derive(thiserror::Error, Debug)]
pub enum DelveError {
    /// I/O operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    /// Game state is invalid
    #[error("Invalid game state: {0}")]
    InvalidState(String),

    /// Action cannot be performed
    #[error("Invalid action: {0}")]
    InvalidAction(String),

    /// An entity is missing a component the content population is supposed
    /// to guarantee
    #[error("Entity {entity:?} is missing required component {component}")]
    MissingComponent {
        entity: game::Entity,
        component: &'static str,
    },

    /// Generation failed
    #[error("Generation failed: {0}")]
    GenerationFailed(String),
}

/// Result type used throughout the Delve codebase.
pub type DelveResult<T> = Result<T, DelveError>;

/// Version information for the crate.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Game configuration constants.
pub mod config {
    /// Dungeon width in tiles
    pub const MAP_WIDTH: i32 = 80;

    /// Dungeon height in tiles
    pub const MAP_HEIGHT: i32 = 43;

    /// Maximum rooms attempted per generated map
    pub const MAX_ROOMS: u32 = 30;

    /// Minimum room width/height
    pub const MIN_ROOM_SIZE: i32 = 6;

    /// Maximum room width/height
    pub const MAX_ROOM_SIZE: i32 = 10;

    /// Player sight radius in tiles
    pub const PLAYER_VIEW_RANGE: i32 = 7;

    /// Hostile sight radius in tiles
    pub const ENEMY_VIEW_RANGE: i32 = 5;

    /// Number of log messages retained before the oldest is dropped
    pub const LOG_MAX_HISTORY: usize = 10;

    /// Level on which the win item spawns in place of the stairs
    pub const WIN_LEVEL: u32 = 2;

    /// Healing items the player starts with
    pub const STARTING_SALVES: usize = 3;
}
