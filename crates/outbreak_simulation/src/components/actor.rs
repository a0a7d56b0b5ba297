//! Базовые компоненты акторов: Health, Tint

use bevy::prelude::*;

/// Здоровье актора (любой damageable entity: игрок, hostile, разрушаемый объект)
///
/// Инварианты:
/// - 0 ≤ current ≤ max
/// - `dead` монотонен (false → true), назад только через `reset`
/// - после смерти current == 0 и урон больше ничего не меняет
#[derive(Component, Debug, Clone, Copy, PartialEq, Reflect)]
#[reflect(Component)]
pub struct Health {
    pub current: f32,
    pub max: f32,
    pub dead: bool,
}

impl Default for Health {
    fn default() -> Self {
        Self::new(100.0) // Default 100 HP
    }
}

/// Результат применения урона
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DamageOutcome {
    /// Entity уже мёртв — no-op
    Ignored,
    /// Урон применён, entity жив
    Wounded,
    /// Урон применён и вызвал смерть (ровно один раз)
    Killed,
}

impl Health {
    pub fn new(max: f32) -> Self {
        Self {
            current: max,
            max,
            dead: false,
        }
    }

    /// Re-base max health (шаблон агента заменяет и max, и current)
    pub fn with_max(mut self, max: f32) -> Self {
        self.max = max;
        self.current = max;
        self
    }

    /// Spawn/respawn: полное здоровье, жив
    pub fn reset(&mut self) {
        self.current = self.max;
        self.dead = false;
    }

    pub fn is_alive(&self) -> bool {
        !self.dead
    }

    pub fn is_dead(&self) -> bool {
        self.dead
    }

    /// Применяет урон
    ///
    /// Отрицательный урон клампится в 0 (попадание никогда не лечит).
    /// Если health упал до ≤ 0 — переход в dead ровно один раз.
    pub fn apply_damage(&mut self, amount: f32) -> DamageOutcome {
        if self.dead {
            return DamageOutcome::Ignored;
        }

        let amount = amount.max(0.0);
        self.current = (self.current - amount).max(0.0);

        if self.current <= 0.0 && self.die() {
            DamageOutcome::Killed
        } else {
            DamageOutcome::Wounded
        }
    }

    /// Переход в dead (idempotent)
    ///
    /// Возвращает true только при первом вызове.
    pub fn die(&mut self) -> bool {
        if self.dead {
            return false;
        }
        self.dead = true;
        self.current = 0.0;
        true
    }
}

/// Цвет визуала (RGBA) из шаблона агента — только для presentation
#[derive(Component, Debug, Clone, Copy, PartialEq, Reflect)]
#[reflect(Component)]
pub struct Tint(pub [f32; 4]);

impl Default for Tint {
    fn default() -> Self {
        Self([1.0, 1.0, 1.0, 1.0])
    }
}
