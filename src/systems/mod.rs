//! # Systems
//!
//! The per-turn simulation phases. Ordering is load-bearing and owned by
//! [`Game::tick`](crate::game::Game::tick): indexing runs before AI and
//! movement so both see a consistent occupancy snapshot, healing applies
//! before damage, and the death sweep follows damage.

pub mod ai;
pub mod combat;
pub mod death;
pub mod indexing;
pub mod inventory;
pub mod level;
pub mod visibility;

pub use ai::enemy_ai;
pub use combat::{resolve_damage, resolve_melee};
pub use death::death_sweep;
pub use indexing::reindex;
pub use inventory::resolve_pickups;
pub use level::{check_descend, check_win};
pub use visibility::recompute_viewsheds;
