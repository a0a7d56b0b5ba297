//! Movement domain — headless pathfinding коллаборатор
//!
//! Ядро только пишет MovementCommand. Внешний NavigationAgent может
//! заменить этот executor; встроенный идёт к цели по прямой.

use bevy::prelude::*;

use crate::components::{MovementCommand, MovementSpeed, NavigationDisabled};
use crate::{SimClock, SimulationStep, StepSet};

/// Movement Plugin (последняя фаза шага)
pub struct MovementPlugin;

impl Plugin for MovementPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            SimulationStep,
            follow_movement_commands.in_set(StepSet::Movement),
        );
    }
}

/// Система: исполнение MovementCommand
///
/// MoveToPosition → шаг speed × delta к цели (без overshoot), разворот
/// по горизонтали. Idle/Stop — стоим. NavigationDisabled — пропуск.
pub fn follow_movement_commands(
    mut movers: Query<
        (&MovementCommand, &MovementSpeed, &mut Transform),
        Without<NavigationDisabled>,
    >,
    clock: Res<SimClock>,
) {
    for (command, speed, mut transform) in movers.iter_mut() {
        let MovementCommand::MoveToPosition { target } = *command else {
            continue;
        };

        let to_target = target - transform.translation;
        let distance = to_target.length();
        let step = speed.speed * clock.delta;

        if distance <= step {
            transform.translation = target;
        } else {
            transform.translation += to_target / distance * step;
        }

        let facing = Vec3::new(to_target.x, 0.0, to_target.z);
        if let Ok(direction) = Dir3::new(facing) {
            transform.look_to(direction, Vec3::Y);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{create_headless_app, step_simulation, SimulationPlugin};

    fn app_with_mover(command: MovementCommand) -> (App, Entity) {
        let mut app = create_headless_app(7);
        app.add_plugins(SimulationPlugin);
        let entity = app
            .world_mut()
            .spawn((Transform::default(), MovementSpeed { speed: 2.0 }, command))
            .id();
        (app, entity)
    }

    fn position(app: &App, entity: Entity) -> Vec3 {
        app.world()
            .get::<Transform>(entity)
            .map(|transform| transform.translation)
            .unwrap_or(Vec3::NAN)
    }

    #[test]
    fn test_moves_toward_target_at_speed() {
        let (mut app, entity) = app_with_mover(MovementCommand::MoveToPosition {
            target: Vec3::new(10.0, 0.0, 0.0),
        });

        step_simulation(app.world_mut(), 0.0);
        step_simulation(app.world_mut(), 1.0);

        let pos = position(&app, entity);
        assert!((pos.x - 2.0).abs() < 1e-4, "pos = {:?}", pos);
    }

    #[test]
    fn test_does_not_overshoot() {
        let (mut app, entity) = app_with_mover(MovementCommand::MoveToPosition {
            target: Vec3::new(1.0, 0.0, 0.0),
        });

        step_simulation(app.world_mut(), 0.0);
        step_simulation(app.world_mut(), 5.0);

        assert_eq!(position(&app, entity), Vec3::new(1.0, 0.0, 0.0));
    }

    #[test]
    fn test_stop_and_disabled_do_not_move() {
        let (mut app, stopped) = app_with_mover(MovementCommand::Stop);
        let disabled = app
            .world_mut()
            .spawn((
                Transform::default(),
                MovementSpeed { speed: 2.0 },
                MovementCommand::MoveToPosition {
                    target: Vec3::new(10.0, 0.0, 0.0),
                },
                NavigationDisabled,
            ))
            .id();

        step_simulation(app.world_mut(), 0.0);
        step_simulation(app.world_mut(), 1.0);

        assert_eq!(position(&app, stopped), Vec3::ZERO);
        assert_eq!(position(&app, disabled), Vec3::ZERO);
    }
}
