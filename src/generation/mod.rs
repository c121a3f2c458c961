//! # Generation Module
//!
//! Procedural content: seeded room-and-corridor map generation, entity
//! prefabs, and per-level population.

pub mod dungeon;
pub mod level;
pub mod prefabs;

pub use dungeon::generate_map;
pub use level::{LevelData, LevelGenerator};
