//! Outbreak Simulation Core
//!
//! ECS-симуляция на Bevy 0.16: combat-and-targeting ядро shooter-vs-AI.
//!
//! Три связанных state machine:
//! - Health/Death lifecycle (components::actor + combat::damage)
//! - Weapon fire/reload + hit-scan (combat::weapon + combat::systems)
//! - Hostile agent perception/pursuit/contact attack (ai)
//!
//! Все мутации происходят внутри одного `SimulationStep` schedule,
//! который гоняется single-threaded с явно переданным временем (`SimClock`).
//! Rendering, audio, input, pathfinding mesh — внешние коллабораторы:
//! ядро пишет события/команды и ничего от них не ждёт.

use bevy::ecs::component::Tick;
use bevy::ecs::event::EventRegistry;
use bevy::ecs::schedule::{ExecutorKind, ScheduleLabel};
use bevy::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

// Публичные модули
pub mod ai;
pub mod combat;
pub mod components;
pub mod config;
pub mod logger;
pub mod movement;
pub mod physics;
pub mod player;
pub mod spawner;

// Re-export базовых типов для удобства
pub use ai::{AIPlugin, HostileAgent, TargetSelection};
pub use combat::{
    CombatPlugin, DamageApplier, DamageDealt, DamageRequest, DamageSource, Dead, EntityDied,
    ReloadFinished, ReloadStarted, Respawn, ShotFired, Tracer, Weapon, WeaponFireIntent,
    WeaponReloadIntent, WeaponState,
};
pub use components::*;
pub use config::{AgentTemplate, ConfigError, SimulationConfig, WeaponConfig};
pub use logger::{init_logger, log, log_error, log_info, log_warning};
pub use physics::{ContactStay, WorldQueries};
pub use player::{Player, PlayerPlugin, ShooterDisabled, ShooterInput};

/// Schedule одного шага симуляции (все core системы живут здесь)
///
/// Запускается из FixedUpdate через `drive_simulation_step`
/// или напрямую через `step_simulation` (тесты, headless replay).
#[derive(ScheduleLabel, Debug, Clone, PartialEq, Eq, Hash)]
pub struct SimulationStep;

/// Фазы шага симуляции (выполняются строго по порядку)
#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StepSet {
    /// ShooterInput → fire/reload intents
    Input,
    /// Perception/pursuit ticks агентов
    Perception,
    /// Fire (hit-scan + damage) и reload requests
    Weapons,
    /// Contact detection + contact attacks
    Contacts,
    /// Отложенные завершения (reload, tracer teardown)
    Completions,
    /// Death reactions, respawn
    Reactions,
    /// Headless исполнение MovementCommand
    Movement,
}

/// Simulation clock — явно передаваемое время шага
///
/// Все cooldown сравнения (fire_interval, attack_cooldown, reload) идут
/// только через этот ресурс, никаких глобальных часов внутри систем.
#[derive(Resource, Debug, Clone, Copy, Default, Reflect)]
#[reflect(Resource)]
pub struct SimClock {
    /// Текущее время шага (секунды от старта симуляции)
    pub now: f32,
    /// Время с предыдущего шага
    pub delta: f32,
    /// Номер шага (1 = первый шаг)
    pub step: u64,
}

/// Главный plugin симуляции (объединяет все подсистемы)
pub struct SimulationPlugin;

impl Plugin for SimulationPlugin {
    fn build(&self, app: &mut App) {
        let fixed_hz = app
            .world()
            .get_resource::<SimulationConfig>()
            .map(|config| config.fixed_hz)
            .unwrap_or(60.0);

        app.init_resource::<SimClock>()
            // Fixed timestep (по умолчанию 60Hz)
            .insert_resource(Time::<Fixed>::from_hz(fixed_hz))
            .edit_schedule(SimulationStep, |schedule| {
                // Single-threaded cooperative модель: никакой параллельной мутации Health
                schedule.set_executor_kind(ExecutorKind::SingleThreaded);
            })
            .configure_sets(
                SimulationStep,
                (
                    StepSet::Input,
                    StepSet::Perception,
                    StepSet::Weapons,
                    StepSet::Contacts,
                    StepSet::Completions,
                    StepSet::Reactions,
                    StepSet::Movement,
                )
                    .chain(),
            )
            .add_systems(
                SimulationStep,
                advance_event_buffers.before(StepSet::Input),
            )
            // Подсистемы
            .add_plugins((
                physics::PhysicsPlugin,
                CombatPlugin,
                AIPlugin,
                PlayerPlugin,
                movement::MovementPlugin,
            ))
            .add_systems(FixedUpdate, drive_simulation_step);
    }
}

/// Выполняет один шаг симуляции в момент `now`
///
/// Обновляет `SimClock` и синхронно прогоняет `SimulationStep`.
/// Время не идёт назад: `now` меньше текущего зажимается (delta = 0).
pub fn step_simulation(world: &mut World, now: f32) {
    {
        let mut clock = world.get_resource_or_insert_with(SimClock::default);
        let now = now.max(clock.now);
        clock.delta = now - clock.now;
        clock.now = now;
        clock.step += 1;
    }

    if let Err(err) = world.try_run_schedule(SimulationStep) {
        log_error(&format!("SimulationStep not initialized: {err}"));
    }
}

/// Exclusive system: double-buffer swap всех `Events<T>` в начале шага
///
/// `step_simulation` не проходит через `First`, поэтому буферы событий
/// двигаем сами. После шага current-буфер содержит события этого шага,
/// событие живёт не дольше двух шагов.
fn advance_event_buffers(world: &mut World, mut last_change_tick: Local<Tick>) {
    if world.contains_resource::<EventRegistry>() {
        world.resource_scope(|world, mut registry: Mut<EventRegistry>| {
            registry.run_updates(world, *last_change_tick);
        });
    }
    *last_change_tick = world.change_tick();
}

/// Exclusive system: FixedUpdate → один шаг симуляции
fn drive_simulation_step(world: &mut World) {
    // Внутри FixedUpdate `Time` — это fixed clock
    let now = world.resource::<Time>().elapsed_secs();
    step_simulation(world, now);
}

/// Детерминистичный RNG resource (seeded)
#[derive(Resource)]
pub struct DeterministicRng {
    pub rng: ChaCha8Rng,
    pub seed: u64,
}

impl DeterministicRng {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }
}

/// Создаёт minimal Bevy App для headless симуляции
pub fn create_headless_app(seed: u64) -> App {
    let mut app = App::new();
    init_logger();
    app.add_plugins(MinimalPlugins)
        .insert_resource(DeterministicRng::new(seed));

    app
}

/// Snapshot мира для сравнения детерминизма
///
/// Сортировка по Entity index, сериализация через Debug.
pub fn world_snapshot<T>(world: &mut World) -> Vec<u8>
where
    T: Component + std::fmt::Debug,
{
    let mut snapshot = Vec::new();

    let mut query = world.query::<(Entity, &T)>();
    let mut entities: Vec<_> = query.iter(world).collect();
    entities.sort_by_key(|(entity, _)| entity.index());

    for (entity, component) in entities {
        snapshot.extend_from_slice(&entity.index().to_le_bytes());
        snapshot.extend_from_slice(format!("{:?}", component).as_bytes());
    }

    snapshot
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_step_simulation_advances_clock() {
        let mut app = create_headless_app(1);
        app.add_plugins(SimulationPlugin);

        step_simulation(app.world_mut(), 0.5);
        step_simulation(app.world_mut(), 0.75);

        let clock = *app.world().resource::<SimClock>();
        assert_eq!(clock.now, 0.75);
        assert_eq!(clock.delta, 0.25);
        assert_eq!(clock.step, 2);
    }

    #[test]
    fn test_step_simulation_clock_never_goes_negative() {
        let mut app = create_headless_app(1);
        app.add_plugins(SimulationPlugin);

        step_simulation(app.world_mut(), 1.0);
        step_simulation(app.world_mut(), 0.5);

        let clock = *app.world().resource::<SimClock>();
        assert_eq!(clock.delta, 0.0);
        assert_eq!(clock.now, 1.0);

        step_simulation(app.world_mut(), 1.25);
        assert_eq!(app.world().resource::<SimClock>().delta, 0.25);
    }

    #[test]
    fn test_event_buffers_stay_bounded() {
        use crate::config::AgentTemplate;
        use crate::spawner::{hostile_bundle, obstacle_bundle};

        let mut app = create_headless_app(1);
        app.add_plugins(SimulationPlugin);
        // Агент вечно касается препятствия: ContactStay каждый шаг
        app.world_mut()
            .spawn(hostile_bundle(&AgentTemplate::default(), Vec3::ZERO));
        app.world_mut()
            .spawn(obstacle_bundle(Vec3::new(0.8, 0.0, 0.0), 0.5));

        for tick in 0..2000 {
            step_simulation(app.world_mut(), tick as f32 / 60.0);
        }

        let contacts = app.world().resource::<Events<ContactStay>>();
        assert!(contacts.len() <= 2, "buffered: {}", contacts.len());
        assert_eq!(contacts.iter_current_update_events().count(), 1);
    }

    #[test]
    fn test_step_without_plugin_does_not_panic() {
        let mut world = World::new();
        step_simulation(&mut world, 0.1);
        assert_eq!(world.resource::<SimClock>().step, 1);
    }
}
