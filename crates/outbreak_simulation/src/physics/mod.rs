//! Physics module (headless)
//!
//! Spatial queries и contact detection поверх `BodyVolume` + rapier
//! collision layers. Полноценный rapier backend опционален: внешний
//! physics слой может сам писать `ContactStay`.

use bevy::prelude::*;

pub mod contact;
pub mod queries;

// Re-export основных типов
pub use contact::{detect_contacts, ContactReporter, ContactStay};
pub use queries::{ray_sphere, RayHit, WorldQueries};

use crate::{SimulationStep, StepSet};

/// Physics Plugin
///
/// Регистрирует ContactStay и headless детектор контактов
/// в начале фазы `StepSet::Contacts`.
pub struct PhysicsPlugin;

impl Plugin for PhysicsPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<ContactStay>().add_systems(
            SimulationStep,
            detect_contacts.in_set(StepSet::Contacts),
        );
    }
}
