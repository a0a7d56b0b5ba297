//! Hostile agent components (perception/pursuit/attack state).

use bevy::prelude::*;
use bevy_rapier3d::prelude::Group;
use serde::{Deserialize, Serialize};

use crate::components::{BodyVolume, Health, MovementCommand, MovementSpeed, Tint};
use crate::config::AgentTemplate;
use crate::physics::ContactReporter;

/// Политика выбора цели из кандидатов perception scan
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, Reflect)]
pub enum TargetSelection {
    /// Первый найденный в порядке enumeration
    #[default]
    FirstFound,
    /// Ближайший к агенту
    Nearest,
}

/// Hostile агент: perception → pursuit → contact attack
///
/// `current_target` — weak reference: перед каждым использованием
/// проверяется через Query<&Health> (despawn = dead).
#[derive(Component, Debug, Clone, Reflect)]
#[reflect(Component)]
#[require(
    Health,
    MovementCommand,
    MovementSpeed,
    BodyVolume,
    Tint,
    Transform,
    ContactReporter
)]
pub struct HostileAgent {
    pub attack_damage: f32,
    pub attack_cooldown: f32,
    pub perception_radius: f32,
    pub perception_interval: f32,
    /// Bitmask rapier `Group` (кого считаем целью)
    pub target_layers: u32,
    pub target_selection: TargetSelection,

    pub current_target: Option<Entity>,
    pub last_attack_time: Option<f32>,
    /// Время следующего perception тика (SimClock.now)
    pub next_perception_at: f32,
    /// false после смерти — loop завершён навсегда (до Respawn)
    pub perception_active: bool,
    /// "Есть живая цель" — для animation коллаборатора
    pub pursuing: bool,
}

impl Default for HostileAgent {
    fn default() -> Self {
        Self::from_template(&AgentTemplate::default())
    }
}

impl HostileAgent {
    pub fn from_template(template: &AgentTemplate) -> Self {
        Self {
            attack_damage: template.damage,
            attack_cooldown: template.attack_cooldown,
            perception_radius: template.perception_radius,
            perception_interval: template.perception_interval,
            target_layers: template.target_layers,
            target_selection: template.target_selection,
            current_target: None,
            last_attack_time: None,
            next_perception_at: 0.0,
            perception_active: true,
            pursuing: false,
        }
    }

    pub fn target_layers(&self) -> Group {
        Group::from_bits_truncate(self.target_layers)
    }

    pub fn attack_ready(&self, now: f32) -> bool {
        self.last_attack_time
            .is_none_or(|last| now - last >= self.attack_cooldown)
    }

    pub fn perception_due(&self, now: f32) -> bool {
        self.perception_active && now >= self.next_perception_at
    }

    /// Планирует следующий тик: next += interval, без catch-up после длинного шага
    pub fn schedule_next_perception(&mut self, now: f32) {
        let next = self.next_perception_at + self.perception_interval;
        self.next_perception_at = if next > now {
            next
        } else {
            now + self.perception_interval
        };
    }

    /// Death: loop завершается навсегда, цель сброшена
    pub fn shutdown(&mut self) {
        self.perception_active = false;
        self.current_target = None;
        self.pursuing = false;
    }

    /// Respawn: loop снова активен, первый тик на ближайшем шаге
    pub fn restart(&mut self, now: f32) {
        self.perception_active = true;
        self.current_target = None;
        self.pursuing = false;
        self.last_attack_time = None;
        self.next_perception_at = now;
    }
}
