//! Configuration templates (data-driven)
//!
//! Immutable records: загружаются один раз при spawn/activation,
//! ядро их никогда не мутирует.
//! - WeaponConfig — параметры оружия (cadence, magazine, reload, damage, range)
//! - AgentTemplate — шаблон hostile агента (health, damage, speed, tint, perception)
//! - SimulationConfig — всё вместе + fixed timestep, seed, horde
//!
//! Текстовый формат — RON.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::ai::TargetSelection;
use crate::components::layers;

/// Ошибки загрузки/валидации конфигурации
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[from] ron::error::SpannedError),

    #[error("failed to serialize config: {0}")]
    Serialize(#[from] ron::Error),

    #[error("invalid config field `{field}`: {reason}")]
    Invalid { field: &'static str, reason: String },
}

impl ConfigError {
    fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        Self::Invalid {
            field,
            reason: reason.into(),
        }
    }
}

/// Параметры ranged оружия
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Reflect)]
#[serde(default)]
pub struct WeaponConfig {
    /// Минимальный интервал между выстрелами (секунды)
    pub fire_interval: f32,
    /// Ёмкость магазина
    pub magazine_capacity: u32,
    /// Длительность перезарядки (секунды)
    pub reload_duration: f32,
    /// Урон за попадание
    pub damage: f32,
    /// Дальность hit-scan (метры)
    pub max_range: f32,
    /// Запас патронов при activation
    pub starting_reserve: u32,
    /// Сколько живёт tracer (секунды)
    pub tracer_duration: f32,
    /// Offset точки выстрела от transform носителя (local space)
    pub muzzle_offset: [f32; 3],
}

impl Default for WeaponConfig {
    fn default() -> Self {
        Self {
            fire_interval: 0.12,
            magazine_capacity: 25,
            reload_duration: 1.8,
            damage: 25.0,
            max_range: 50.0,
            starting_reserve: 100,
            tracer_duration: 0.03,
            muzzle_offset: [0.0, 0.0, -0.5],
        }
    }
}

impl WeaponConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.magazine_capacity == 0 {
            return Err(ConfigError::invalid("weapon.magazine_capacity", "must be > 0"));
        }
        if !(self.fire_interval >= 0.0) {
            return Err(ConfigError::invalid("weapon.fire_interval", "must be >= 0"));
        }
        if !(self.reload_duration >= 0.0) {
            return Err(ConfigError::invalid("weapon.reload_duration", "must be >= 0"));
        }
        if !(self.max_range > 0.0) {
            return Err(ConfigError::invalid("weapon.max_range", "must be > 0"));
        }
        if !(self.damage >= 0.0) {
            return Err(ConfigError::invalid("weapon.damage", "must be >= 0"));
        }
        Ok(())
    }

    pub fn muzzle_offset(&self) -> Vec3 {
        Vec3::from_array(self.muzzle_offset)
    }
}

/// Шаблон hostile агента (здоровье, урон, скорость, цвет)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Reflect)]
#[serde(default)]
pub struct AgentTemplate {
    pub name: String,
    pub health: f32,
    pub damage: f32,
    pub speed: f32,
    /// RGBA tint для визуала
    pub tint: [f32; 4],
    pub attack_cooldown: f32,
    pub perception_radius: f32,
    pub perception_interval: f32,
    /// Bitmask rapier `Group` — кого агент считает целью
    pub target_layers: u32,
    pub target_selection: TargetSelection,
    /// Радиус collision volume (метры)
    pub body_radius: f32,
}

impl Default for AgentTemplate {
    fn default() -> Self {
        Self {
            name: "walker".to_string(),
            health: 100.0,
            damage: 20.0,
            speed: 2.0,
            tint: [1.0, 1.0, 1.0, 1.0],
            attack_cooldown: 0.5,
            perception_radius: 20.0,
            perception_interval: 0.25,
            target_layers: layers::PLAYER.bits(),
            target_selection: TargetSelection::FirstFound,
            body_radius: 0.5,
        }
    }
}

impl AgentTemplate {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.health > 0.0) {
            return Err(ConfigError::invalid("agent.health", "must be > 0"));
        }
        if !(self.damage >= 0.0) {
            return Err(ConfigError::invalid("agent.damage", "must be >= 0"));
        }
        if !(self.speed >= 0.0) {
            return Err(ConfigError::invalid("agent.speed", "must be >= 0"));
        }
        if !(self.attack_cooldown >= 0.0) {
            return Err(ConfigError::invalid("agent.attack_cooldown", "must be >= 0"));
        }
        if !(self.perception_interval > 0.0) {
            return Err(ConfigError::invalid("agent.perception_interval", "must be > 0"));
        }
        if !(self.perception_radius >= 0.0) {
            return Err(ConfigError::invalid("agent.perception_radius", "must be >= 0"));
        }
        if !(self.body_radius > 0.0) {
            return Err(ConfigError::invalid("agent.body_radius", "must be > 0"));
        }
        Ok(())
    }
}

/// Параметры horde spawner
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HordeConfig {
    pub count: u32,
    pub ring_radius: f32,
}

impl Default for HordeConfig {
    fn default() -> Self {
        Self {
            count: 8,
            ring_radius: 15.0,
        }
    }
}

/// Полная конфигурация симуляции
#[derive(Resource, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Частота FixedUpdate (Hz)
    pub fixed_hz: f64,
    pub seed: u64,
    pub player_health: f32,
    pub weapon: WeaponConfig,
    pub agents: Vec<AgentTemplate>,
    pub horde: HordeConfig,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            fixed_hz: 60.0,
            seed: 42,
            player_health: 100.0,
            weapon: WeaponConfig::default(),
            agents: vec![
                AgentTemplate::default(),
                AgentTemplate {
                    name: "runner".to_string(),
                    health: 60.0,
                    damage: 10.0,
                    speed: 4.0,
                    tint: [0.8, 0.3, 0.3, 1.0],
                    ..default()
                },
                AgentTemplate {
                    name: "brute".to_string(),
                    health: 250.0,
                    damage: 35.0,
                    speed: 1.2,
                    tint: [0.3, 0.6, 0.3, 1.0],
                    body_radius: 0.8,
                    ..default()
                },
            ],
            horde: HordeConfig::default(),
        }
    }
}

impl SimulationConfig {
    /// Парсит RON и валидирует
    pub fn from_ron_str(text: &str) -> Result<Self, ConfigError> {
        let config: Self = ron::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Загружает RON файл
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_ron_str(&text)
    }

    pub fn to_ron_string(&self) -> Result<String, ConfigError> {
        Ok(ron::ser::to_string_pretty(
            self,
            ron::ser::PrettyConfig::default(),
        )?)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.fixed_hz > 0.0) {
            return Err(ConfigError::invalid("fixed_hz", "must be > 0"));
        }
        if !(self.player_health > 0.0) {
            return Err(ConfigError::invalid("player_health", "must be > 0"));
        }
        self.weapon.validate()?;
        if self.agents.is_empty() {
            return Err(ConfigError::invalid("agents", "at least one template required"));
        }
        for template in &self.agents {
            template.validate()?;
        }
        Ok(())
    }
}
