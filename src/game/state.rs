//! # Game State
//!
//! The turn state machine and the crate's outward face. One [`Game`] owns
//! the entity world, the current map, and the message log; external
//! collaborators drive it by calling one entry point per player intent and
//! [`Game::tick`] once per frame. The tick never blocks: waiting for input
//! just means the state machine sits in `AwaitingInput` across ticks.

use crate::config;
use crate::game::{
    actions, CombatStats, Entity, GameLog, GameMap, GlyphColor, Position, World,
};
use crate::generation::{prefabs, LevelGenerator};
use crate::systems;
use crate::{DelveError, DelveResult};
use serde::{Deserialize, Serialize};

/// The turn state machine's states.
///
/// `Won` and `Lost` are terminal: once reached, ticks become no-ops and
/// the world is render-only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RunState {
    Init,
    PlayerTurn,
    EnemyTurn,
    AwaitingInput,
    Inventory,
    Won,
    Lost,
}

impl RunState {
    /// Whether the simulation is frozen in a terminal state.
    pub fn is_terminal(self) -> bool {
        matches!(self, RunState::Won | RunState::Lost)
    }
}

/// One renderable entity for the drawing collaborator. The returned list
/// is sorted by `z_index` ascending, so drawing in order leaves the
/// highest-priority entity on top of each tile.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct RenderableSnapshot {
    pub entity: Entity,
    pub position: Position,
    pub glyph: char,
    pub color: GlyphColor,
    pub z_index: i32,
}

/// The whole simulation for one run: world, map, log, and turn machinery.
#[derive(Debug)]
pub struct Game {
    pub world: World,
    pub map: GameMap,
    pub log: GameLog,
    player: Entity,
    state: RunState,
    level: u32,
    level_gen: LevelGenerator,
    selected_index: usize,
}

impl Game {
    /// Creates a new run from a seed: generates and populates the first
    /// level and spawns the player in the start room.
    pub fn new(seed: u64) -> DelveResult<Self> {
        let mut world = World::new();
        let level_gen = LevelGenerator::new(seed);
        let data =
            level_gen.generate_level(&mut world, config::MAP_WIDTH, config::MAP_HEIGHT, 1)?;
        let player = prefabs::spawn_player(&mut world, data.player_start);

        let mut log = GameLog::new();
        log.add("Game Start!");

        Ok(Self {
            world,
            map: data.map,
            log,
            player,
            state: RunState::Init,
            level: 1,
            level_gen,
            selected_index: 0,
        })
    }

    pub fn player(&self) -> Entity {
        self.player
    }

    pub fn run_state(&self) -> RunState {
        self.state
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    /// Runs one pass of the fixed phase pipeline and advances the state
    /// machine by exactly one step. No-op in terminal states.
    pub fn tick(&mut self) -> DelveResult<()> {
        if self.state.is_terminal() {
            return Ok(());
        }

        systems::reindex(&mut self.world, &mut self.map);
        systems::recompute_viewsheds(&mut self.world, &mut self.map, self.player);

        if self.state == RunState::EnemyTurn {
            systems::enemy_ai(&mut self.world, &mut self.map, self.player);
        }

        systems::resolve_melee(&mut self.world, &mut self.log)?;
        systems::resolve_damage(&mut self.world);
        let player_died = systems::death_sweep(&mut self.world, &mut self.log, self.player);
        systems::resolve_pickups(&mut self.world, &mut self.log);

        systems::check_descend(
            &mut self.world,
            &mut self.map,
            &mut self.log,
            &self.level_gen,
            self.player,
            &mut self.level,
        )?;

        if systems::check_win(&self.world, self.player) {
            self.state = RunState::Won;
            return Ok(());
        }
        if player_died {
            self.state = RunState::Lost;
            return Ok(());
        }

        self.state = match self.state {
            RunState::Init => RunState::PlayerTurn,
            RunState::PlayerTurn => RunState::EnemyTurn,
            RunState::EnemyTurn => RunState::AwaitingInput,
            other => other,
        };

        Ok(())
    }

    // ------------------------------------------------------------------
    // Input entry points. Each is honored only in the state that accepts
    // it; anything else is a silent no-op, mirroring keys that do nothing.
    // ------------------------------------------------------------------

    /// Attempts to move (or melee) by one tile. Accepted input hands the
    /// turn to the simulation.
    pub fn move_player(&mut self, dx: i32, dy: i32) {
        if self.state != RunState::AwaitingInput {
            return;
        }
        actions::try_move_entity(
            &mut self.world,
            &mut self.map,
            self.player,
            Position::new(dx, dy),
            false,
        );
        self.state = RunState::PlayerTurn;
    }

    /// Attempts to pick up from the player's own tile.
    pub fn pickup_at_player(&mut self) {
        if self.state != RunState::AwaitingInput {
            return;
        }
        if let Some(pos) = self.world.positions.get(self.player).copied() {
            actions::attempt_pickup(&mut self.world, &self.map, &mut self.log, self.player, pos);
        }
    }

    pub fn open_inventory(&mut self) {
        if self.state == RunState::AwaitingInput {
            self.state = RunState::Inventory;
        }
    }

    pub fn close_inventory(&mut self) {
        if self.state == RunState::Inventory {
            self.state = RunState::AwaitingInput;
        }
    }

    /// The current inventory cursor, wrapped into range. Empty inventories
    /// report index 0.
    pub fn selected_inventory_index(&self) -> usize {
        let len = self.inventory_len();
        if len == 0 || self.selected_index >= len {
            0
        } else {
            self.selected_index
        }
    }

    fn inventory_len(&self) -> usize {
        self.world
            .inventories
            .get(self.player)
            .map_or(0, |inv| inv.items.len())
    }

    /// Moves the inventory cursor down, wrapping to the top.
    pub fn inventory_next(&mut self) {
        if self.state != RunState::Inventory {
            return;
        }
        let len = self.inventory_len();
        if len == 0 {
            self.selected_index = 0;
        } else {
            self.selected_index = (self.selected_inventory_index() + 1) % len;
        }
    }

    /// Moves the inventory cursor up, wrapping to the bottom.
    pub fn inventory_previous(&mut self) {
        if self.state != RunState::Inventory {
            return;
        }
        let len = self.inventory_len();
        if len == 0 {
            self.selected_index = 0;
        } else {
            let current = self.selected_inventory_index();
            self.selected_index = if current == 0 { len - 1 } else { current - 1 };
        }
    }

    /// Consumes the selected item and hands the turn to the simulation.
    pub fn inventory_select(&mut self) -> DelveResult<()> {
        if self.state != RunState::Inventory {
            return Ok(());
        }

        let index = self.selected_inventory_index();
        let item = self
            .world
            .inventories
            .get(self.player)
            .and_then(|inv| inv.items.get(index).copied())
            .ok_or_else(|| DelveError::InvalidAction("inventory is empty".to_string()))?;

        actions::consume_item(&mut self.world, &mut self.log, self.player, item)?;
        self.state = RunState::PlayerTurn;
        Ok(())
    }

    // ------------------------------------------------------------------
    // Read-only snapshots for the rendering collaborator.
    // ------------------------------------------------------------------

    /// Every positioned, drawable entity, sorted by draw order.
    pub fn renderables(&self) -> Vec<RenderableSnapshot> {
        let mut list: Vec<RenderableSnapshot> = self
            .world
            .renderables
            .iter()
            .filter_map(|(entity, renderable)| {
                self.world
                    .positions
                    .get(entity)
                    .map(|pos| RenderableSnapshot {
                        entity,
                        position: *pos,
                        glyph: renderable.glyph,
                        color: renderable.color,
                        z_index: renderable.z_index,
                    })
            })
            .collect();
        list.sort_by_key(|snapshot| snapshot.z_index);
        list
    }

    /// The highest-priority renderable on one tile, for cursor and label
    /// lookups.
    pub fn top_renderable_at(&self, position: Position) -> Option<RenderableSnapshot> {
        self.renderables()
            .into_iter()
            .filter(|snapshot| snapshot.position == position)
            .max_by_key(|snapshot| snapshot.z_index)
    }

    /// The player's combat stats for HUD display.
    pub fn player_stats(&self) -> Option<&CombatStats> {
        self.world.combat_stats.get(self.player)
    }

    /// The most recent log messages, newest first.
    pub fn recent_messages(&self, count: usize) -> Vec<&str> {
        self.log.recent(count)
    }
}
