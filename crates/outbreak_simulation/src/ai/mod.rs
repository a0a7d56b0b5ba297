//! Hostile agent AI module
//!
//! Perception/pursuit loop + attack-on-contact + death reaction.
//! Цель — weak reference (Entity), валидируется перед каждым использованием.

use bevy::prelude::*;

pub mod components;
pub mod systems;

// Re-export основных типов
pub use components::{HostileAgent, TargetSelection};

use crate::{physics, SimulationStep, StepSet};

/// AI Plugin
///
/// Регистрирует AI системы в `SimulationStep`.
/// Порядок выполнения:
/// 1. Perception: agent_perception — тик perception/pursuit
/// 2. Contacts: agent_contact_attacks — после detect_contacts
/// 3. Reactions: hostile_death_reaction
pub struct AIPlugin;

impl Plugin for AIPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            SimulationStep,
            (
                systems::agent_perception.in_set(StepSet::Perception),
                systems::agent_contact_attacks
                    .in_set(StepSet::Contacts)
                    .after(physics::detect_contacts),
                systems::hostile_death_reaction.in_set(StepSet::Reactions),
            ),
        );
    }
}
