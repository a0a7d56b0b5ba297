//! ECS Components для игровых entity
//!
//! Организация по доменам:
//! - actor: health/death lifecycle (Health, DamageOutcome, Tint)
//! - movement: команды pathfinding коллаборатора (MovementCommand, MovementSpeed)
//! - world: collision volume + layers (BodyVolume, layers)

pub mod actor;
pub mod movement;
pub mod world;

// Re-exports для удобного импорта
pub use actor::*;
pub use movement::*;
pub use world::*;
