//! Combat system module
//!
//! ECS ответственность:
//! - Game state: Health (components::actor), Weapon (ammo, cadence, reload)
//! - Combat rules: hit-scan resolution, damage application contract
//! - Events: DamageDealt, EntityDied, ShotFired, ReloadStarted/Finished
//!
//! Presentation (tracers, muzzle flash, звук) — внешние подписчики событий.

use bevy::prelude::*;

pub mod damage;
pub mod systems;
pub mod weapon;

#[cfg(test)]
mod weapon_tests;

// Re-export основных типов
pub use damage::{
    DamageApplier, DamageDealt, DamageRequest, DamageSource, Dead, DespawnAfter, EntityDied,
    Respawn,
};
pub use weapon::{
    ReloadFinished, ReloadInProgress, ReloadStarted, ShotFired, Tracer, Weapon, WeaponFireIntent,
    WeaponReloadIntent, WeaponState,
};

use crate::{SimulationStep, StepSet};

/// Combat Plugin
///
/// Регистрирует combat системы в `SimulationStep`.
///
/// Порядок выполнения:
/// 1. Weapons: process_fire_intents → process_reload_intents
/// 2. Completions: complete_reloads → despawn_after_timeout
/// 3. Reactions: handle_respawns
pub struct CombatPlugin;

impl Plugin for CombatPlugin {
    fn build(&self, app: &mut App) {
        // Регистрация событий
        app.add_event::<DamageDealt>()
            .add_event::<EntityDied>()
            .add_event::<Respawn>()
            .add_event::<WeaponFireIntent>()
            .add_event::<WeaponReloadIntent>()
            .add_event::<ShotFired>()
            .add_event::<ReloadStarted>()
            .add_event::<ReloadFinished>();

        app.add_systems(
            SimulationStep,
            (
                (systems::process_fire_intents, systems::process_reload_intents)
                    .chain()
                    .in_set(StepSet::Weapons),
                (systems::complete_reloads, systems::despawn_after_timeout)
                    .chain()
                    .in_set(StepSet::Completions),
                systems::handle_respawns.in_set(StepSet::Reactions),
            ),
        );
    }
}
