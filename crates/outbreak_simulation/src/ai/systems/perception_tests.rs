//! Tests for AI perception/pursuit loop.

#[cfg(test)]
mod tests {
    use bevy::ecs::system::RunSystemOnce;
    use bevy::prelude::*;

    use crate::ai::{HostileAgent, TargetSelection};
    use crate::combat::DamageApplier;
    use crate::components::{Health, MovementCommand};
    use crate::config::{AgentTemplate, WeaponConfig};
    use crate::spawner::{hostile_bundle, player_bundle};
    use crate::{create_headless_app, step_simulation, SimulationPlugin};

    fn test_app() -> App {
        let mut app = create_headless_app(42);
        app.add_plugins(SimulationPlugin);
        app
    }

    fn spawn_agent(app: &mut App, template: &AgentTemplate, position: Vec3) -> Entity {
        app.world_mut().spawn(hostile_bundle(template, position)).id()
    }

    fn spawn_player(app: &mut App, position: Vec3) -> Entity {
        app.world_mut()
            .spawn(player_bundle(position, 100.0, WeaponConfig::default()))
            .id()
    }

    fn agent(app: &App, entity: Entity) -> HostileAgent {
        app.world()
            .get::<HostileAgent>(entity)
            .cloned()
            .expect("agent exists")
    }

    fn command(app: &App, entity: Entity) -> MovementCommand {
        app.world()
            .get::<MovementCommand>(entity)
            .copied()
            .unwrap_or_default()
    }

    fn run_until(app: &mut App, from: f32, to: f32, dt: f32) {
        let mut now = from;
        while now <= to + 1e-4 {
            step_simulation(app.world_mut(), now);
            now += dt;
        }
    }

    #[test]
    fn test_no_candidate_stays_targetless() {
        let mut app = test_app();
        let hostile = spawn_agent(&mut app, &AgentTemplate::default(), Vec3::ZERO);
        spawn_player(&mut app, Vec3::new(50.0, 0.0, 0.0));

        run_until(&mut app, 0.0, 3.0, 0.25);

        let state = agent(&app, hostile);
        assert!(state.current_target.is_none());
        assert!(!state.pursuing);
        assert_eq!(command(&app, hostile), MovementCommand::Stop);
    }

    #[test]
    fn test_target_kept_after_leaving_radius() {
        let mut app = test_app();
        let hostile = spawn_agent(&mut app, &AgentTemplate::default(), Vec3::ZERO);
        let player = spawn_player(&mut app, Vec3::new(10.0, 0.0, 0.0));

        step_simulation(app.world_mut(), 0.0);
        assert_eq!(agent(&app, hostile).current_target, Some(player));

        // Игрок уходит далеко за perception_radius
        let far = Vec3::new(100.0, 0.0, 0.0);
        if let Some(mut transform) = app.world_mut().get_mut::<Transform>(player) {
            transform.translation = far;
        }

        step_simulation(app.world_mut(), 0.25);

        let state = agent(&app, hostile);
        assert_eq!(state.current_target, Some(player));
        assert!(state.pursuing);
        assert_eq!(
            command(&app, hostile),
            MovementCommand::MoveToPosition { target: far }
        );
    }

    #[test]
    fn test_reacquires_after_target_dies() {
        let mut app = test_app();
        let hostile = spawn_agent(&mut app, &AgentTemplate::default(), Vec3::ZERO);
        let first = spawn_player(&mut app, Vec3::new(5.0, 0.0, 0.0));
        let second = spawn_player(&mut app, Vec3::new(0.0, 0.0, 8.0));

        step_simulation(app.world_mut(), 0.0);
        assert_eq!(agent(&app, hostile).current_target, Some(first));

        app.world_mut()
            .run_system_once(move |mut damage: DamageApplier| damage.kill(first, None))
            .expect("system runs");

        // Тик 0.25: мёртвая цель сброшена, re-scan находит второго
        step_simulation(app.world_mut(), 0.25);
        let state = agent(&app, hostile);
        assert_eq!(state.current_target, Some(second));
        assert_eq!(command(&app, hostile), MovementCommand::Stop);

        step_simulation(app.world_mut(), 0.5);
        assert_eq!(
            command(&app, hostile),
            MovementCommand::MoveToPosition {
                target: Vec3::new(0.0, 0.0, 8.0)
            }
        );
    }

    #[test]
    fn test_pursuing_clears_when_target_dies_between_ticks() {
        let mut app = test_app();
        let hostile = spawn_agent(&mut app, &AgentTemplate::default(), Vec3::ZERO);
        let player = spawn_player(&mut app, Vec3::new(5.0, 0.0, 0.0));

        step_simulation(app.world_mut(), 0.0);
        assert!(agent(&app, hostile).pursuing);

        if let Some(mut health) = app.world_mut().get_mut::<Health>(player) {
            health.die();
        }

        // 0.1 — не perception тик, но статус обновляется каждый шаг
        step_simulation(app.world_mut(), 0.1);
        assert!(!agent(&app, hostile).pursuing);
    }

    #[test]
    fn test_dead_agent_issues_no_movement() {
        let mut app = test_app();
        let hostile = spawn_agent(&mut app, &AgentTemplate::default(), Vec3::ZERO);
        spawn_player(&mut app, Vec3::new(5.0, 0.0, 0.0));

        app.world_mut()
            .run_system_once(move |mut damage: DamageApplier| damage.kill(hostile, None))
            .expect("system runs");

        run_until(&mut app, 0.0, 2.0, 0.25);

        let state = agent(&app, hostile);
        assert!(!state.perception_active);
        assert!(state.current_target.is_none());
        assert_eq!(command(&app, hostile), MovementCommand::Stop);
        assert_eq!(
            app.world().get::<Transform>(hostile).map(|t| t.translation),
            Some(Vec3::ZERO)
        );
    }

    #[test]
    fn test_first_found_vs_nearest() {
        let far = Vec3::new(15.0, 0.0, 0.0);
        let near = Vec3::new(0.0, 0.0, 5.0);

        for (selection, expect_near) in [
            (TargetSelection::FirstFound, false),
            (TargetSelection::Nearest, true),
        ] {
            let mut app = test_app();
            let template = AgentTemplate {
                target_selection: selection,
                ..Default::default()
            };
            let hostile = spawn_agent(&mut app, &template, Vec3::ZERO);
            let far_player = spawn_player(&mut app, far);
            let near_player = spawn_player(&mut app, near);

            step_simulation(app.world_mut(), 0.0);

            let expected = if expect_near { near_player } else { far_player };
            assert_eq!(agent(&app, hostile).current_target, Some(expected));
        }
    }

    #[test]
    fn test_other_layers_are_not_candidates() {
        let mut app = test_app();
        let hostile = spawn_agent(&mut app, &AgentTemplate::default(), Vec3::ZERO);
        // Другой hostile рядом (layers::HOSTILE)
        spawn_agent(&mut app, &AgentTemplate::default(), Vec3::new(2.0, 0.0, 0.0));

        step_simulation(app.world_mut(), 0.0);

        assert!(agent(&app, hostile).current_target.is_none());
    }
}
