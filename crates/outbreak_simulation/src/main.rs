//! Headless симуляция Outbreak
//!
//! Скриптовая стычка: игрок в центре, horde на кольце, стрелок
//! доворачивает на ближайшего живого hostile и стреляет/перезаряжается.
//! Конфиг: первый аргумент — путь к RON файлу (иначе default).

use bevy::ecs::system::RunSystemOnce;
use bevy::prelude::*;
use outbreak_simulation::spawner::{obstacle_bundle, player_bundle, spawn_horde};
use outbreak_simulation::{
    create_headless_app, step_simulation, DeterministicRng, Health, HostileAgent, Player,
    ShooterInput, SimulationConfig, SimulationPlugin, Weapon, WeaponState,
};

const BACKPEDAL_DISTANCE: f32 = 3.0;

fn main() {
    let config = match std::env::args().nth(1) {
        Some(path) => match SimulationConfig::load(&path) {
            Ok(config) => config,
            Err(err) => {
                eprintln!("Failed to load config {}: {}", path, err);
                std::process::exit(1);
            }
        },
        None => SimulationConfig::default(),
    };

    println!(
        "Starting Outbreak headless simulation (seed: {}, {} Hz)",
        config.seed, config.fixed_hz
    );

    let mut app = create_headless_app(config.seed);
    app.insert_resource(config.clone());
    app.add_plugins(SimulationPlugin);

    let world = app.world_mut();
    let player = world
        .spawn(player_bundle(Vec3::ZERO, config.player_health, config.weapon.clone()))
        .id();
    world.spawn(obstacle_bundle(Vec3::new(4.0, 0.0, 4.0), 1.0));
    world.spawn(obstacle_bundle(Vec3::new(-5.0, 0.0, 2.0), 1.5));

    let templates = config.agents.clone();
    let horde = config.horde.clone();
    if let Err(err) = world.run_system_once(
        move |mut commands: Commands, mut rng: ResMut<DeterministicRng>| {
            spawn_horde(
                &mut commands,
                &mut rng,
                &templates,
                Vec3::ZERO,
                horde.count,
                horde.ring_radius,
            );
        },
    ) {
        eprintln!("Failed to spawn horde: {}", err);
        std::process::exit(1);
    }

    let dt = (1.0 / config.fixed_hz) as f32;

    // Запускаем 1800 тиков симуляции (30 секунд при 60 Hz)
    for tick in 0..1800u32 {
        let world = app.world_mut();
        drive_shooter(world, player);
        step_simulation(world, tick as f32 * dt);

        if tick % 300 == 0 {
            let (alive, total) = hostile_census(world);
            let health = world.get::<Health>(player).map_or(0.0, |health| health.current);
            println!(
                "Tick {}: player HP {:.0}, hostiles alive {}/{}",
                tick, health, alive, total
            );
        }

        if world.get::<Health>(player).is_none_or(|health| health.is_dead()) {
            println!("Tick {}: player is down", tick);
            break;
        }

        if hostile_census(world).0 == 0 {
            println!("Tick {}: horde cleared", tick);
            break;
        }
    }

    println!("Simulation complete!");
}

/// Input/aim коллаборатор: довернуть на ближайшего живого hostile
fn drive_shooter(world: &mut World, player: Entity) {
    let Some(origin) = world.get::<Transform>(player).map(|t| t.translation) else {
        return;
    };

    let mut hostiles = world.query_filtered::<(&Transform, &Health), With<HostileAgent>>();
    let nearest = hostiles
        .iter(world)
        .filter(|(_, health)| health.is_alive())
        .map(|(transform, _)| transform.translation)
        .min_by(|a, b| a.distance(origin).total_cmp(&b.distance(origin)));

    let needs_reload = world
        .get::<Weapon>(player)
        .is_some_and(|weapon| weapon.state == WeaponState::Empty);

    let Ok(mut entity) = world.get_entity_mut(player) else {
        return;
    };

    if let Some(target) = nearest {
        if let Some(mut transform) = entity.get_mut::<Transform>() {
            let facing = Vec3::new(target.x - origin.x, 0.0, target.z - origin.z);
            if let Ok(direction) = Dir3::new(facing) {
                transform.look_to(direction, Vec3::Y);
            }
        }
    }

    // Отступаем, если hostile ближе BACKPEDAL_DISTANCE
    let too_close = nearest.is_some_and(|target| target.distance(origin) < BACKPEDAL_DISTANCE);

    if let Some(mut input) = entity.get_mut::<ShooterInput>() {
        input.fire = nearest.is_some() && !needs_reload;
        input.reload = needs_reload;
        input.move_axis = if too_close { -1.0 } else { 0.0 };
    }
}

fn hostile_census(world: &mut World) -> (usize, usize) {
    let mut hostiles = world.query_filtered::<&Health, (With<HostileAgent>, Without<Player>)>();
    let total = hostiles.iter(world).count();
    let alive = hostiles.iter(world).filter(|health| health.is_alive()).count();
    (alive, total)
}
