//! Player domain — стрелок под управлением внешнего input

use bevy::prelude::*;

pub mod player;
pub mod systems;


// Re-export основных типов
pub use player::{Player, ShooterDisabled, ShooterInput};

use crate::{SimulationStep, StepSet};

/// Player Plugin
///
/// 1. Input: shooter_input_intents
/// 2. Reactions: player_death_reaction
/// 3. Movement: player_locomotion
pub struct PlayerPlugin;

impl Plugin for PlayerPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            SimulationStep,
            (
                systems::shooter_input_intents.in_set(StepSet::Input),
                systems::player_death_reaction.in_set(StepSet::Reactions),
                systems::player_locomotion.in_set(StepSet::Movement),
            ),
        );
    }
}
