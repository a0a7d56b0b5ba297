//! Movement компоненты: команды перемещения, скорость

use bevy::prelude::*;

/// Команда движения для актора (выполняется pathfinding коллаборатором)
///
/// Архитектура:
/// - AI/death системы пишут MovementCommand (high-level intent)
/// - Внешний NavigationAgent (или встроенный headless executor) читает его
/// - Ядро ничего не ждёт в ответ
#[derive(Component, Debug, Clone, Copy, PartialEq, Default, Reflect)]
#[reflect(Component)]
pub enum MovementCommand {
    /// Стоять на месте (команд не было)
    #[default]
    Idle,
    /// Двигаться к позиции (world coordinates)
    MoveToPosition { target: Vec3 },
    /// Остановиться немедленно
    Stop,
}

/// Скорость движения актора (метры/сек)
#[derive(Component, Clone, Copy, Debug, PartialEq, Reflect)]
#[reflect(Component)]
pub struct MovementSpeed {
    pub speed: f32,
}

impl Default for MovementSpeed {
    fn default() -> Self {
        Self { speed: 2.0 } // 2 m/s — базовая скорость ходьбы
    }
}

/// Маркер: pathfinding коллаборатор отключён (смерть)
///
/// Executor пропускает такие entity, AI больше не шлёт им команды.
#[derive(Component, Debug, Clone, Copy, Default, Reflect)]
#[reflect(Component)]
pub struct NavigationDisabled;
