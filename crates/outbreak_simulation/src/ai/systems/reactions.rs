//! AI reaction systems (death).

use bevy::prelude::*;
use bevy_rapier3d::prelude::ColliderDisabled;

use crate::ai::HostileAgent;
use crate::combat::EntityDied;
use crate::components::{MovementCommand, NavigationDisabled};

/// System: смерть hostile агента
///
/// - collision volume отключён (ColliderDisabled)
/// - pathfinding: Stop + NavigationDisabled
/// - perception loop завершён навсегда, цель сброшена
pub fn hostile_death_reaction(
    mut commands: Commands,
    mut deaths: EventReader<EntityDied>,
    mut agents: Query<(&mut HostileAgent, &mut MovementCommand)>,
) {
    for event in deaths.read() {
        let Ok((mut agent, mut command)) = agents.get_mut(event.entity) else {
            continue;
        };

        agent.shutdown();
        command.set_if_neq(MovementCommand::Stop);

        commands
            .entity(event.entity)
            .try_insert((ColliderDisabled, NavigationDisabled));

        crate::log_info(&format!(
            "🧟 Hostile {:?} down → collider/navigation disabled",
            event.entity
        ));
    }
}
