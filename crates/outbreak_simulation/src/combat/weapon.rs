//! Weapon — fire/reload state machine + ammo accounting
//!
//! Ready → (fire, магазин пуст) → Empty
//! Ready/Empty → (reload принят) → Reloading → (reload завершён) → Ready
//!
//! Компонент живёт на носителе (игрок). Все методы чистые:
//! hit-scan и урон делает `systems::weapon::process_fire_intents`.

use bevy::prelude::*;

use crate::config::WeaponConfig;

/// Состояние оружия
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Reflect)]
pub enum WeaponState {
    #[default]
    Ready,
    Empty,
    Reloading,
}

/// Ranged оружие носителя
///
/// Инварианты:
/// - magazine_ammo ≤ config.magazine_capacity
/// - state == Empty ⇔ magazine_ammo == 0 и не Reloading
#[derive(Component, Debug, Clone, Reflect)]
#[reflect(Component)]
pub struct Weapon {
    pub config: WeaponConfig,
    pub state: WeaponState,
    pub magazine_ammo: u32,
    pub reserve_ammo: u32,
    /// None — ещё не стреляли (первый выстрел не блокируется cooldown)
    pub last_fire_time: Option<f32>,
}

impl Default for Weapon {
    fn default() -> Self {
        Self::new(WeaponConfig::default())
    }
}

impl Weapon {
    pub fn new(config: WeaponConfig) -> Self {
        let mut weapon = Self {
            config,
            state: WeaponState::Ready,
            magazine_ammo: 0,
            reserve_ammo: 0,
            last_fire_time: None,
        };
        weapon.activate();
        weapon
    }

    /// Activation: полный магазин + стартовый запас
    pub fn activate(&mut self) {
        self.magazine_ammo = self.config.magazine_capacity;
        self.reserve_ammo = self.config.starting_reserve;
        self.last_fire_time = None;
        self.state = if self.magazine_ammo > 0 {
            WeaponState::Ready
        } else {
            WeaponState::Empty
        };
    }

    pub fn cooldown_ready(&self, now: f32) -> bool {
        self.last_fire_time
            .is_none_or(|last| now - last >= self.config.fire_interval)
    }

    pub fn can_fire(&self, now: f32) -> bool {
        self.state == WeaponState::Ready && self.magazine_ammo > 0 && self.cooldown_ready(now)
    }

    /// Fire: true = выстрел произошёл (патрон списан, timestamp записан)
    pub fn fire(&mut self, now: f32) -> bool {
        if !self.can_fire(now) {
            return false;
        }

        self.last_fire_time = Some(now);
        self.magazine_ammo -= 1;
        if self.magazine_ammo == 0 {
            self.state = WeaponState::Empty;
        }
        true
    }

    pub fn can_reload(&self) -> bool {
        self.state != WeaponState::Reloading
            && self.reserve_ammo > 0
            && self.magazine_ammo < self.config.magazine_capacity
    }

    /// Reload request: true = перезарядка началась
    pub fn start_reload(&mut self) -> bool {
        if !self.can_reload() {
            return false;
        }
        self.state = WeaponState::Reloading;
        true
    }

    /// Завершение reload: переносит патроны из запаса, возвращает сколько
    pub fn finish_reload(&mut self) -> u32 {
        if self.state != WeaponState::Reloading {
            return 0;
        }

        let missing = self.config.magazine_capacity - self.magazine_ammo;
        let transferred = self.reserve_ammo.min(missing);
        self.magazine_ammo += transferred;
        self.reserve_ammo -= transferred;
        self.state = if self.magazine_ammo > 0 {
            WeaponState::Ready
        } else {
            WeaponState::Empty
        };
        transferred
    }

    pub fn is_reloading(&self) -> bool {
        self.state == WeaponState::Reloading
    }

    /// Firing origin: позиция носителя + muzzle offset (в local space)
    pub fn muzzle_position(&self, wielder: &Transform) -> Vec3 {
        wielder.translation + wielder.rotation * self.config.muzzle_offset()
    }
}

/// Компонент: перезарядка в процессе (one-shot completion по времени)
#[derive(Component, Debug, Clone, Copy, Reflect)]
#[reflect(Component)]
pub struct ReloadInProgress {
    pub completes_at: f32,
}

/// Hit-scan tracer (presentation entity, живёт tracer_duration)
#[derive(Component, Debug, Clone, Copy, Reflect)]
#[reflect(Component)]
pub struct Tracer {
    pub shooter: Entity,
    pub start: Vec3,
    pub end: Vec3,
}

/// Event: носитель хочет выстрелить
#[derive(Event, Debug, Clone)]
pub struct WeaponFireIntent {
    pub shooter: Entity,
}

/// Event: носитель хочет перезарядиться
#[derive(Event, Debug, Clone)]
pub struct WeaponReloadIntent {
    pub shooter: Entity,
}

/// Event: выстрел произошёл (для presentation)
///
/// `end` — точка попадания или конец луча на max_range.
#[derive(Event, Debug, Clone)]
pub struct ShotFired {
    pub shooter: Entity,
    pub origin: Vec3,
    pub end: Vec3,
    /// Damageable entity, получивший урон
    pub victim: Option<Entity>,
}

/// Event: перезарядка началась
#[derive(Event, Debug, Clone)]
pub struct ReloadStarted {
    pub shooter: Entity,
    pub completes_at: f32,
}

/// Event: перезарядка завершена
#[derive(Event, Debug, Clone)]
pub struct ReloadFinished {
    pub shooter: Entity,
    pub transferred: u32,
}
