//! # Dungeon Generation
//!
//! Room-and-corridor map generation: random rectangular rooms carved out of
//! solid Wall, connected by L-shaped corridors. Output is fully determined
//! by the seed, which is what makes generation testable.

use crate::config;
use crate::game::{GameMap, Rect};
use rand::{rngs::StdRng, Rng, SeedableRng};

/// Generates a map with rooms and corridors from a fixed seed.
///
/// Identical `(width, height, seed)` inputs produce bit-identical maps.
/// Rooms are recorded on the map in acceptance order; `rooms[0]` is the
/// player-start room.
pub fn generate_map(width: i32, height: i32, seed: u64) -> GameMap {
    let mut rng = StdRng::seed_from_u64(seed);
    build_rooms_and_corridors(width, height, &mut rng)
}

/// Carves rooms and corridors using the caller's random stream.
pub(crate) fn build_rooms_and_corridors(width: i32, height: i32, rng: &mut StdRng) -> GameMap {
    let mut map = GameMap::new(width, height);

    for _ in 0..config::MAX_ROOMS {
        let w = rng.gen_range(config::MIN_ROOM_SIZE..=config::MAX_ROOM_SIZE);
        let h = rng.gen_range(config::MIN_ROOM_SIZE..=config::MAX_ROOM_SIZE);
        // Keep the candidate fully inside the 1-tile border so the map
        // perimeter stays solid Wall.
        let x = rng.gen_range(1..width - w - 1);
        let y = rng.gen_range(1..height - h - 1);
        let candidate = Rect::new(x, y, w, h);

        if map.rooms.iter().any(|room| room.intersects(&candidate)) {
            continue;
        }

        let prev_center = map.rooms.last().map(|prev| prev.center());
        map.apply_room(&candidate);

        if let Some(prev_center) = prev_center {
            let new_center = candidate.center();

            // Coin flip on segment order so corridors don't all bend the
            // same way.
            if rng.gen_bool(0.5) {
                map.apply_horizontal_tunnel(prev_center.x, new_center.x, prev_center.y);
                map.apply_vertical_tunnel(prev_center.y, new_center.y, new_center.x);
            } else {
                map.apply_vertical_tunnel(prev_center.y, new_center.y, prev_center.x);
                map.apply_horizontal_tunnel(prev_center.x, new_center.x, new_center.y);
            }
        }

        map.rooms.push(candidate);
    }

    map
}
