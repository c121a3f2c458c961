//! # Tile Map
//!
//! The Wall/Floor grid for one dungeon level, plus the derived layers that
//! the turn pipeline maintains: `visible` and `explored` (Visibility Engine),
//! `blocked` and `tile_content` (Map Indexer and Movement Resolver).
//!
//! All layers share the map's exact dimensions. Coordinates outside
//! `[0, width) x [0, height)` are invalid: read accessors return `None` and
//! mutators panic rather than wrap or clamp.

use crate::game::{Entity, Position};
use serde::{Deserialize, Serialize};

/// The kind of a single map cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TileType {
    Floor,
    Wall,
}

/// An axis-aligned rectangle with inclusive corners, used for rooms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rect {
    pub x1: i32,
    pub y1: i32,
    pub x2: i32,
    pub y2: i32,
}

impl Rect {
    /// Creates a rectangle from a top-left corner and a width/height extent.
    pub fn new(x: i32, y: i32, w: i32, h: i32) -> Self {
        Self {
            x1: x,
            y1: y,
            x2: x + w,
            y2: y + h,
        }
    }

    /// Inclusive overlap test against another rectangle.
    pub fn intersects(&self, other: &Rect) -> bool {
        self.x1 <= other.x2 && self.x2 >= other.x1 && self.y1 <= other.y2 && self.y2 >= other.y1
    }

    /// Center point of the rectangle.
    pub fn center(&self) -> Position {
        Position::new((self.x1 + self.x2) / 2, (self.y1 + self.y2) / 2)
    }
}

/// The tile grid for one level and its derived layers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameMap {
    pub width: i32,
    pub height: i32,
    pub tiles: Vec<TileType>,
    /// Rooms in acceptance order; `rooms[0]` is the player-start room.
    pub rooms: Vec<Rect>,
    visible: Vec<bool>,
    explored: Vec<bool>,
    blocked: Vec<bool>,
    tile_content: Vec<Vec<Entity>>,
}

impl GameMap {
    /// Creates a map of the given dimensions, filled with Wall.
    pub fn new(width: i32, height: i32) -> Self {
        let len = (width * height) as usize;
        Self {
            width,
            height,
            tiles: vec![TileType::Wall; len],
            rooms: Vec::new(),
            visible: vec![false; len],
            explored: vec![false; len],
            blocked: vec![false; len],
            tile_content: vec![Vec::new(); len],
        }
    }

    /// Whether a position lies inside the map.
    pub fn in_bounds(&self, pos: Position) -> bool {
        pos.x >= 0 && pos.x < self.width && pos.y >= 0 && pos.y < self.height
    }

    fn idx(&self, pos: Position) -> usize {
        assert!(self.in_bounds(pos), "map access out of bounds: {:?}", pos);
        (pos.y * self.width + pos.x) as usize
    }

    /// Tile kind at a position, or `None` out of bounds.
    pub fn tile_at(&self, pos: Position) -> Option<TileType> {
        if self.in_bounds(pos) {
            Some(self.tiles[(pos.y * self.width + pos.x) as usize])
        } else {
            None
        }
    }

    /// Whether a tile occludes sight.
    pub fn is_opaque(&self, pos: Position) -> bool {
        self.tile_at(pos) != Some(TileType::Floor)
    }

    /// Whether a tile is impassable (Wall or an occupying blocker).
    pub fn is_blocked(&self, pos: Position) -> bool {
        self.in_bounds(pos) && self.blocked[(pos.y * self.width + pos.x) as usize]
    }

    /// Sets or clears the blocked flag for one tile.
    pub fn set_blocked(&mut self, pos: Position, value: bool) {
        let idx = self.idx(pos);
        self.blocked[idx] = value;
    }

    /// Resets the blocked layer to tile-kind-only values: Wall tiles
    /// blocked, Floor tiles clear.
    pub fn populate_blocked(&mut self) {
        for (idx, tile) in self.tiles.iter().enumerate() {
            self.blocked[idx] = *tile == TileType::Wall;
        }
    }

    /// Empties the per-tile occupant lists.
    pub fn clear_tile_content(&mut self) {
        for content in self.tile_content.iter_mut() {
            content.clear();
        }
    }

    /// Registers an entity as standing on a tile.
    pub fn add_tile_content(&mut self, pos: Position, entity: Entity) {
        let idx = self.idx(pos);
        self.tile_content[idx].push(entity);
    }

    /// Entities currently standing on a tile, in registration order.
    pub fn tile_content_at(&self, pos: Position) -> &[Entity] {
        if self.in_bounds(pos) {
            &self.tile_content[(pos.y * self.width + pos.x) as usize]
        } else {
            &[]
        }
    }

    /// Whether a tile is in the player's current field of view.
    pub fn is_visible(&self, pos: Position) -> bool {
        self.in_bounds(pos) && self.visible[(pos.y * self.width + pos.x) as usize]
    }

    /// Whether a tile has ever been seen by the player. Monotonic.
    pub fn is_explored(&self, pos: Position) -> bool {
        self.in_bounds(pos) && self.explored[(pos.y * self.width + pos.x) as usize]
    }

    /// Clears the visible layer ahead of a fresh player FOV pass.
    pub fn reset_visible(&mut self) {
        for v in self.visible.iter_mut() {
            *v = false;
        }
    }

    /// Marks a tile visible and explored.
    pub fn reveal(&mut self, pos: Position) {
        let idx = self.idx(pos);
        self.visible[idx] = true;
        self.explored[idx] = true;
    }

    /// Carves a room's interior to Floor, corners inclusive.
    pub fn apply_room(&mut self, room: &Rect) {
        for y in room.y1..=room.y2 {
            for x in room.x1..=room.x2 {
                let idx = self.idx(Position::new(x, y));
                self.tiles[idx] = TileType::Floor;
            }
        }
    }

    /// Carves a horizontal line of Floor between two x coordinates.
    pub fn apply_horizontal_tunnel(&mut self, x1: i32, x2: i32, y: i32) {
        for x in x1.min(x2)..=x1.max(x2) {
            let idx = self.idx(Position::new(x, y));
            self.tiles[idx] = TileType::Floor;
        }
    }

    /// Carves a vertical line of Floor between two y coordinates.
    pub fn apply_vertical_tunnel(&mut self, y1: i32, y2: i32, x: i32) {
        for y in y1.min(y2)..=y1.max(y2) {
            let idx = self.idx(Position::new(x, y));
            self.tiles[idx] = TileType::Floor;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_map_is_all_wall() {
        let map = GameMap::new(10, 8);
        for y in 0..8 {
            for x in 0..10 {
                assert_eq!(map.tile_at(Position::new(x, y)), Some(TileType::Wall));
            }
        }
    }

    #[test]
    fn test_out_of_bounds_reads() {
        let map = GameMap::new(10, 8);
        assert_eq!(map.tile_at(Position::new(10, 0)), None);
        assert_eq!(map.tile_at(Position::new(0, -1)), None);
        assert!(!map.is_blocked(Position::new(-1, 3)));
        assert!(map.tile_content_at(Position::new(99, 99)).is_empty());
    }

    #[test]
    #[should_panic(expected = "out of bounds")]
    fn test_out_of_bounds_write_panics() {
        let mut map = GameMap::new(10, 8);
        map.set_blocked(Position::new(10, 0), true);
    }

    #[test]
    fn test_rect_intersects_is_inclusive() {
        let a = Rect::new(0, 0, 4, 4);
        let b = Rect::new(4, 4, 4, 4);
        let c = Rect::new(5, 5, 2, 2);
        assert!(a.intersects(&b));
        assert!(!a.intersects(&c));
    }

    #[test]
    fn test_rect_center() {
        let r = Rect::new(2, 2, 4, 6);
        assert_eq!(r.center(), Position::new(4, 5));
    }

    #[test]
    fn test_carve_room() {
        let mut map = GameMap::new(10, 10);
        let room = Rect::new(2, 2, 3, 3);
        map.apply_room(&room);
        assert_eq!(map.tile_at(Position::new(2, 2)), Some(TileType::Floor));
        assert_eq!(map.tile_at(Position::new(5, 5)), Some(TileType::Floor));
        assert_eq!(map.tile_at(Position::new(6, 6)), Some(TileType::Wall));
    }

    #[test]
    fn test_populate_blocked_tracks_walls() {
        let mut map = GameMap::new(10, 10);
        map.apply_room(&Rect::new(1, 1, 7, 7));
        map.populate_blocked();
        assert!(map.is_blocked(Position::new(0, 0)));
        assert!(!map.is_blocked(Position::new(4, 4)));
    }

    #[test]
    fn test_explored_survives_visible_reset() {
        let mut map = GameMap::new(10, 10);
        let pos = Position::new(3, 3);
        map.reveal(pos);
        assert!(map.is_visible(pos));
        map.reset_visible();
        assert!(!map.is_visible(pos));
        assert!(map.is_explored(pos));
    }
}
