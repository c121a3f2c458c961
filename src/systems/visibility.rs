//! # Visibility Engine
//!
//! Field-of-view computation via recursive shadowcasting over the eight
//! octants. Wall tiles occlude, Floor tiles transmit, and results are
//! bounded by a Euclidean sight radius.
//!
//! Viewsheds are cached: only entities whose `dirty` flag is set are
//! recomputed. When the dirty viewshed belongs to the player the map's
//! `visible` layer is rebuilt from scratch and every freshly seen tile is
//! also marked `explored` (explored never clears).

use crate::game::{Entity, GameMap, Position, World};
use std::collections::HashSet;

/// Octant transforms for the shadowcasting sweep.
const OCTANTS: [(i32, i32, i32, i32); 8] = [
    (1, 0, 0, 1),
    (0, 1, 1, 0),
    (0, -1, 1, 0),
    (-1, 0, 0, 1),
    (-1, 0, 0, -1),
    (0, -1, -1, 0),
    (0, 1, -1, 0),
    (1, 0, 0, -1),
];

/// Computes the set of tiles visible from `origin` out to `range`.
///
/// Tiles outside the map are discarded, never stored.
pub fn compute_fov(map: &GameMap, origin: Position, range: i32) -> HashSet<Position> {
    let mut visible = HashSet::new();
    if map.in_bounds(origin) {
        visible.insert(origin);
    }

    for &(xx, xy, yx, yy) in OCTANTS.iter() {
        cast_octant(map, &mut visible, origin, range, 1, 1.0, 0.0, xx, xy, yx, yy);
    }

    visible
}

#[allow(clippy::too_many_arguments)]
fn cast_octant(
    map: &GameMap,
    visible: &mut HashSet<Position>,
    origin: Position,
    range: i32,
    row: i32,
    mut start_slope: f64,
    end_slope: f64,
    xx: i32,
    xy: i32,
    yx: i32,
    yy: i32,
) {
    if start_slope < end_slope {
        return;
    }

    let mut next_start = start_slope;
    let mut blocked = false;

    let mut depth = row;
    while depth <= range && !blocked {
        let dy = -depth;
        for dx in -depth..=0 {
            let left_slope = (dx as f64 - 0.5) / (dy as f64 + 0.5);
            let right_slope = (dx as f64 + 0.5) / (dy as f64 - 0.5);

            if start_slope < right_slope {
                continue;
            }
            if end_slope > left_slope {
                break;
            }

            let pos = Position::new(origin.x + dx * xx + dy * xy, origin.y + dx * yx + dy * yy);
            let in_range = dx * dx + dy * dy <= range * range;
            if in_range && map.in_bounds(pos) {
                visible.insert(pos);
            }

            let opaque = map.is_opaque(pos);
            if blocked {
                if opaque {
                    next_start = right_slope;
                } else {
                    blocked = false;
                    start_slope = next_start;
                }
            } else if opaque && depth < range {
                blocked = true;
                cast_octant(
                    map,
                    visible,
                    origin,
                    range,
                    depth + 1,
                    start_slope,
                    left_slope,
                    xx,
                    xy,
                    yx,
                    yy,
                );
                next_start = right_slope;
            }
        }
        depth += 1;
    }
}

/// Recomputes every dirty viewshed and refreshes the player's map layers.
pub fn recompute_viewsheds(world: &mut World, map: &mut GameMap, player: Entity) {
    for entity in world.viewsheds.entities() {
        let (range, dirty) = match world.viewsheds.get(entity) {
            Some(viewshed) => (viewshed.range, viewshed.dirty),
            None => continue,
        };
        if !dirty {
            continue;
        }

        let origin = match world.positions.get(entity) {
            Some(pos) => *pos,
            None => continue,
        };

        let visible = compute_fov(map, origin, range);

        if entity == player {
            map.reset_visible();
            for &tile in &visible {
                map.reveal(tile);
            }
        }

        if let Some(viewshed) = world.viewsheds.get_mut(entity) {
            viewshed.visible_tiles = visible;
            viewshed.dirty = false;
        }
    }
}
