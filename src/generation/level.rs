//! # Level Population
//!
//! Builds a playable level: a generated map plus its hostiles, items, and
//! the stairs (or, on the final level, the win item). The same rules run at
//! game start and on every descend.

use crate::game::{GameMap, Position, Rect, World};
use crate::generation::{dungeon, prefabs};
use crate::{config, DelveError, DelveResult};
use rand::{rngs::StdRng, Rng, SeedableRng};

/// A freshly generated and populated level.
#[derive(Debug)]
pub struct LevelData {
    pub map: GameMap,
    pub player_start: Position,
}

/// Deterministic level factory. Each level draws from its own seeded
/// stream derived from the game seed, so regeneration is reproducible.
#[derive(Debug, Clone, Copy)]
pub struct LevelGenerator {
    seed: u64,
}

impl LevelGenerator {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }

    fn random_room_position(rng: &mut StdRng, room: &Rect) -> Position {
        let x = rng.gen_range(room.x1..=room.x2);
        let y = rng.gen_range(room.y1..=room.y2);
        Position::new(x, y)
    }

    /// Generates the map for `level` and populates it with hostiles, items,
    /// and the descend/win trigger. The player itself is not spawned here.
    pub fn generate_level(
        &self,
        world: &mut World,
        width: i32,
        height: i32,
        level: u32,
    ) -> DelveResult<LevelData> {
        let mut rng = StdRng::seed_from_u64(self.seed.wrapping_add(level as u64));
        let map = dungeon::build_rooms_and_corridors(width, height, &mut rng);

        if map.rooms.is_empty() {
            return Err(DelveError::GenerationFailed(format!(
                "no rooms placed for level {level} ({width}x{height})"
            )));
        }

        let player_start = map.rooms[0].center();

        // The start room stays empty; every other room rolls for an item
        // and spawns one hostile.
        for room in map.rooms.iter().skip(1) {
            if rng.gen_bool(0.5) {
                let salve = prefabs::spawn_salve(world);
                prefabs::place(world, salve, Self::random_room_position(&mut rng, room));
            }

            let hostile = if rng.gen_range(0..100) < 50 {
                prefabs::spawn_goblin(world)
            } else {
                prefabs::spawn_orc(world)
            };
            prefabs::place(world, hostile, Self::random_room_position(&mut rng, room));
        }

        // Stairs go in a random non-start room; the final level gets the
        // win item instead.
        let trigger_room = if map.rooms.len() > 1 {
            &map.rooms[rng.gen_range(1..map.rooms.len())]
        } else {
            &map.rooms[0]
        };
        let trigger = if level == config::WIN_LEVEL {
            prefabs::spawn_amulet(world)
        } else {
            prefabs::spawn_stairs(world)
        };
        prefabs::place(
            world,
            trigger,
            Self::random_room_position(&mut rng, trigger_room),
        );

        Ok(LevelData { map, player_start })
    }
}
