//! AI perception/pursuit loop.

use bevy::prelude::*;

use crate::ai::{HostileAgent, TargetSelection};
use crate::components::{Health, MovementCommand};
use crate::physics::WorldQueries;
use crate::SimClock;

/// Система: perception/pursuit тик агентов
///
/// Каждый шаг: `pursuing` = "цель есть и жива".
/// На perception тике (раз в perception_interval):
/// 1. Цель жива → MoveToPosition к её текущей позиции, без re-scan
/// 2. Иначе → Stop, overlap_sphere по target_layers, выбор кандидата
///
/// Выход из радиуса цель не теряет — только смерть/despawn.
pub fn agent_perception(
    mut agents: Query<(Entity, &mut HostileAgent, &Transform, &mut MovementCommand)>,
    targets: Query<(&Health, &Transform)>,
    world_queries: WorldQueries,
    clock: Res<SimClock>,
) {
    let now = clock.now;

    for (entity, mut agent, transform, mut command) in agents.iter_mut() {
        if !agent.perception_active {
            continue;
        }

        // Loop завершается на смерти агента (death reaction ещё не отработала)
        if targets.get(entity).is_ok_and(|(health, _)| health.is_dead()) {
            continue;
        }

        let live_target = agent
            .current_target
            .and_then(|target| targets.get(target).ok().map(|found| (target, found)))
            .filter(|(_, (health, _))| health.is_alive())
            .map(|(target, (_, target_transform))| (target, target_transform.translation));

        let pursuing = live_target.is_some();
        if agent.pursuing != pursuing {
            agent.pursuing = pursuing;
        }

        if !agent.perception_due(now) {
            continue;
        }
        agent.schedule_next_perception(now);

        if let Some((_, target_position)) = live_target {
            command.set_if_neq(MovementCommand::MoveToPosition {
                target: target_position,
            });
            continue;
        }

        if let Some(lost) = agent.current_target.take() {
            crate::log(&format!("❌ {:?} lost target {:?} (dead)", entity, lost));
        }
        command.set_if_neq(MovementCommand::Stop);

        let origin = transform.translation;
        let candidates = world_queries
            .overlap_sphere(origin, agent.perception_radius, agent.target_layers())
            .into_iter()
            .filter(|&candidate| candidate != entity)
            .filter_map(|candidate| {
                let (health, candidate_transform) = targets.get(candidate).ok()?;
                health
                    .is_alive()
                    .then(|| (candidate, candidate_transform.translation.distance(origin)))
            });

        let selected = match agent.target_selection {
            TargetSelection::FirstFound => candidates.map(|(candidate, _)| candidate).next(),
            TargetSelection::Nearest => candidates
                .min_by(|(_, a), (_, b)| a.total_cmp(b))
                .map(|(candidate, _)| candidate),
        };

        if let Some(target) = selected {
            agent.current_target = Some(target);
            agent.pursuing = true;
            crate::log(&format!("👁️ {:?} acquired target {:?}", entity, target));
        }
    }
}
