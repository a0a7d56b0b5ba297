//! Death lifecycle systems: timed despawn, respawn.

use bevy::prelude::*;
use bevy_rapier3d::prelude::ColliderDisabled;

use crate::ai::HostileAgent;
use crate::combat::{Dead, DespawnAfter, ReloadInProgress, Respawn, Weapon};
use crate::components::{Health, MovementCommand, NavigationDisabled};
use crate::player::ShooterDisabled;
use crate::SimClock;

/// Система: деспавн entities с истёкшим DespawnAfter timeout
///
/// Tracers и всё, что владелец пометил на уборку.
pub fn despawn_after_timeout(
    mut commands: Commands,
    query: Query<(Entity, &DespawnAfter)>,
    clock: Res<SimClock>,
) {
    for (entity, despawn_after) in query.iter() {
        if clock.now >= despawn_after.despawn_time {
            commands.entity(entity).despawn();
        }
    }
}

/// Система: Respawn → полный reset
///
/// Health → max, снимает death маркеры, оружие активируется заново,
/// perception агента запускается с первого шага.
pub fn handle_respawns(
    mut commands: Commands,
    mut respawns: EventReader<Respawn>,
    mut actors: Query<(
        &mut Health,
        Option<&mut Weapon>,
        Option<&mut HostileAgent>,
        Option<&mut MovementCommand>,
    )>,
    clock: Res<SimClock>,
) {
    for event in respawns.read() {
        let Ok((mut health, weapon, agent, movement)) = actors.get_mut(event.entity) else {
            crate::log_warning(&format!(
                "Respawn: entity {:?} has no Health (skipped)",
                event.entity
            ));
            continue;
        };

        health.reset();

        if let Some(mut weapon) = weapon {
            weapon.activate();
        }

        if let Some(mut agent) = agent {
            agent.restart(clock.now);
        }

        if let Some(mut movement) = movement {
            movement.set_if_neq(MovementCommand::Idle);
        }

        commands.entity(event.entity).remove::<(
            Dead,
            ShooterDisabled,
            NavigationDisabled,
            ColliderDisabled,
            ReloadInProgress,
        )>();

        crate::log_info(&format!("♻️ Entity {:?} respawned", event.entity));
    }
}
