//! Spawn helpers: игрок, hostile агенты, препятствия, horde
//!
//! `*_bundle` функции работают и с Commands, и с World напрямую.
//! Collision: rapier Collider + CollisionGroups (layers), плюс BodyVolume
//! для headless queries.

use bevy::prelude::*;
use bevy_rapier3d::prelude::Collider;
use rand::Rng;
use std::f32::consts::TAU;

use crate::ai::HostileAgent;
use crate::combat::Weapon;
use crate::components::{groups_for, layers, BodyVolume, Health, MovementSpeed, Tint};
use crate::config::{AgentTemplate, WeaponConfig};
use crate::player::Player;
use crate::DeterministicRng;

/// Радиус volume игрока (метры)
pub const PLAYER_RADIUS: f32 = 0.4;

pub fn player_bundle(position: Vec3, max_health: f32, weapon: WeaponConfig) -> impl Bundle {
    (
        Player,
        Name::new("player"),
        Transform::from_translation(position),
        Health::new(max_health),
        Weapon::new(weapon),
        BodyVolume::new(PLAYER_RADIUS),
        Collider::ball(PLAYER_RADIUS),
        groups_for(layers::PLAYER),
    )
}

pub fn hostile_bundle(template: &AgentTemplate, position: Vec3) -> impl Bundle {
    (
        HostileAgent::from_template(template),
        Name::new(template.name.clone()),
        Transform::from_translation(position),
        Health::default().with_max(template.health),
        MovementSpeed {
            speed: template.speed,
        },
        Tint(template.tint),
        BodyVolume::new(template.body_radius),
        Collider::ball(template.body_radius),
        groups_for(layers::HOSTILE),
    )
}

/// Статичный blocker (стена, ящик): volume без Health
pub fn obstacle_bundle(position: Vec3, radius: f32) -> impl Bundle {
    (
        Name::new("obstacle"),
        Transform::from_translation(position),
        BodyVolume::new(radius),
        Collider::ball(radius),
        groups_for(layers::ENVIRONMENT),
    )
}

pub fn spawn_player(
    commands: &mut Commands,
    position: Vec3,
    max_health: f32,
    weapon: WeaponConfig,
) -> Entity {
    let entity = commands
        .spawn(player_bundle(position, max_health, weapon))
        .id();
    crate::log(&format!("Spawned player {:?} at {:?}", entity, position));
    entity
}

pub fn spawn_hostile(commands: &mut Commands, template: &AgentTemplate, position: Vec3) -> Entity {
    commands.spawn(hostile_bundle(template, position)).id()
}

pub fn spawn_obstacle(commands: &mut Commands, position: Vec3, radius: f32) -> Entity {
    commands.spawn(obstacle_bundle(position, radius)).id()
}

/// Horde: `count` агентов случайных шаблонов на кольце вокруг `center`
///
/// Детерминирован через DeterministicRng (одинаковый seed → одинаковая horde).
pub fn spawn_horde(
    commands: &mut Commands,
    rng: &mut DeterministicRng,
    templates: &[AgentTemplate],
    center: Vec3,
    count: u32,
    ring_radius: f32,
) -> Vec<Entity> {
    if templates.is_empty() {
        crate::log_warning("spawn_horde: no agent templates, nothing spawned");
        return Vec::new();
    }

    let horde: Vec<Entity> = (0..count)
        .map(|_| {
            let template = &templates[rng.rng.gen_range(0..templates.len())];
            let angle = rng.rng.gen_range(0.0..TAU);
            let offset = Vec3::new(angle.cos(), 0.0, angle.sin()) * ring_radius;
            spawn_hostile(commands, template, center + offset)
        })
        .collect();

    crate::log_info(&format!(
        "Spawned horde of {} around {:?} (seed {})",
        horde.len(),
        center,
        rng.seed
    ));
    horde
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::MovementCommand;
    use crate::physics::ContactReporter;
    use bevy::ecs::system::RunSystemOnce;
    use bevy_rapier3d::prelude::CollisionGroups;

    #[test]
    fn test_hostile_bundle_applies_template() {
        let mut world = World::new();
        let template = AgentTemplate {
            health: 250.0,
            speed: 1.2,
            tint: [0.3, 0.6, 0.3, 1.0],
            ..Default::default()
        };
        let entity = world.spawn(hostile_bundle(&template, Vec3::ZERO)).id();

        let health = world.get::<Health>(entity).copied();
        assert_eq!(health.map(|health| health.max), Some(250.0));
        assert_eq!(
            world.get::<MovementSpeed>(entity).map(|speed| speed.speed),
            Some(1.2)
        );
        assert_eq!(world.get::<Tint>(entity), Some(&Tint([0.3, 0.6, 0.3, 1.0])));
        // Required components
        assert_eq!(
            world.get::<MovementCommand>(entity),
            Some(&MovementCommand::Idle)
        );
        assert!(world.get::<ContactReporter>(entity).is_some());
        assert_eq!(
            world
                .get::<CollisionGroups>(entity)
                .map(|groups| groups.memberships),
            Some(layers::HOSTILE)
        );
    }

    #[test]
    fn test_player_bundle_has_weapon() {
        let mut world = World::new();
        let entity = world
            .spawn(player_bundle(Vec3::ZERO, 100.0, WeaponConfig::default()))
            .id();

        let weapon = world.get::<Weapon>(entity).cloned();
        assert_eq!(weapon.map(|weapon| weapon.magazine_ammo), Some(25));
        assert!(world.get::<crate::player::ShooterInput>(entity).is_some());
    }

    fn horde_positions(seed: u64) -> Vec<Vec3> {
        let mut world = World::new();
        world.insert_resource(DeterministicRng::new(seed));
        let templates = vec![AgentTemplate::default()];

        let horde = world
            .run_system_once(
                move |mut commands: Commands, mut rng: ResMut<DeterministicRng>| {
                    spawn_horde(&mut commands, &mut rng, &templates, Vec3::ZERO, 5, 10.0)
                },
            )
            .expect("system runs");

        horde
            .into_iter()
            .filter_map(|entity| world.get::<Transform>(entity).map(|t| t.translation))
            .collect()
    }

    #[test]
    fn test_horde_is_seeded() {
        let first = horde_positions(11);
        let second = horde_positions(11);

        assert_eq!(first.len(), 5);
        assert_eq!(first, second);
        for position in first {
            assert!((position.length() - 10.0).abs() < 1e-3);
        }
    }
}
