//! # Map Indexer
//!
//! Rebuilds the derived occupancy layers once per turn: the tile -> entities
//! index and the blocked layer. Runs strictly before hostile AI and movement
//! so both see a consistent snapshot.

use crate::game::{GameMap, World};

/// Clears `blocked` back to tile-kind-only values and the occupant index to
/// empty, then registers every positioned entity. Entities carrying
/// `BlocksTile` also mark their tile blocked.
pub fn reindex(world: &mut World, map: &mut GameMap) {
    map.clear_tile_content();
    map.populate_blocked();

    for (entity, pos) in world.positions.iter() {
        map.add_tile_content(*pos, entity);
        if world.blocks_tile.contains(entity) {
            map.set_blocked(*pos, true);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{BlocksTile, Position, Rect, TileType};

    #[test]
    fn test_blocked_reflects_walls_and_blockers() {
        let mut world = World::new();
        let mut map = GameMap::new(10, 10);
        map.apply_room(&Rect::new(1, 1, 7, 7));

        let blocker = world.spawn();
        world.positions.insert(blocker, Position::new(4, 4));
        world.blocks_tile.insert(blocker, BlocksTile);

        let bystander = world.spawn();
        world.positions.insert(bystander, Position::new(5, 5));

        reindex(&mut world, &mut map);

        // Wall tiles stay blocked regardless of occupants.
        assert_eq!(map.tile_at(Position::new(0, 0)), Some(TileType::Wall));
        assert!(map.is_blocked(Position::new(0, 0)));

        assert!(map.is_blocked(Position::new(4, 4)));
        assert!(!map.is_blocked(Position::new(5, 5)));

        assert_eq!(map.tile_content_at(Position::new(4, 4)), &[blocker]);
        assert_eq!(map.tile_content_at(Position::new(5, 5)), &[bystander]);
    }

    #[test]
    fn test_reindex_clears_stale_entries() {
        let mut world = World::new();
        let mut map = GameMap::new(10, 10);
        map.apply_room(&Rect::new(1, 1, 7, 7));

        let walker = world.spawn();
        world.positions.insert(walker, Position::new(2, 2));
        world.blocks_tile.insert(walker, BlocksTile);
        reindex(&mut world, &mut map);

        world.positions.insert(walker, Position::new(3, 3));
        reindex(&mut world, &mut map);

        assert!(!map.is_blocked(Position::new(2, 2)));
        assert!(map.tile_content_at(Position::new(2, 2)).is_empty());
        assert!(map.is_blocked(Position::new(3, 3)));
    }
}
