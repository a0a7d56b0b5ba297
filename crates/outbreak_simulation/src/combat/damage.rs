//! Damage application contract
//!
//! Единственный путь изменения Health в ядре — `DamageApplier`:
//! - применяет урон через `Health::apply_damage`
//! - пишет DamageDealt (presentation: hit point/normal, source)
//! - на Killed вставляет `Dead` и пишет EntityDied ровно один раз
//!
//! Death reactions (hostile / player) подписаны на EntityDied отдельными системами.

use bevy::ecs::system::SystemParam;
use bevy::prelude::*;

use crate::components::{DamageOutcome, Health};

/// Источник урона
#[derive(Debug, Clone, Copy, PartialEq, Eq, Reflect)]
pub enum DamageSource {
    /// Контактная атака hostile агента
    Melee,
    /// Hit-scan выстрел
    Ranged,
}

/// Событие: урон нанесен
///
/// Генерируется после применения damage к Health.
/// Используется для UI, звуков, эффектов (hit_point/hit_normal только для них).
#[derive(Event, Debug, Clone)]
pub struct DamageDealt {
    pub attacker: Entity,
    pub target: Entity,
    pub amount: f32,
    pub hit_point: Vec3,
    pub hit_normal: Vec3,
    pub source: DamageSource,
    pub remaining_health: f32,
    pub target_died: bool,
}

/// Событие: entity умер (переход в dead, ровно один раз)
#[derive(Event, Debug, Clone)]
pub struct EntityDied {
    pub entity: Entity,
    pub killer: Option<Entity>,
}

/// Событие: вернуть entity к жизни (spawn reset)
#[derive(Event, Debug, Clone)]
pub struct Respawn {
    pub entity: Entity,
}

/// Компонент-маркер: entity мертв
///
/// Используется для визуальных эффектов (death animation, fade-out).
/// Деспавн не автоматический — трупы убирает владелец.
#[derive(Component, Debug, Clone, Copy, Reflect)]
#[reflect(Component)]
pub struct Dead;

/// Компонент-маркер: деспавн entity после указанного времени
#[derive(Component, Debug, Clone, Copy, Reflect)]
#[reflect(Component)]
pub struct DespawnAfter {
    /// Время деспавна (SimClock.now)
    pub despawn_time: f32,
}

/// Запрос на урон
#[derive(Debug, Clone, Copy)]
pub struct DamageRequest {
    pub attacker: Entity,
    pub target: Entity,
    pub amount: f32,
    pub hit_point: Vec3,
    pub hit_normal: Vec3,
    pub source: DamageSource,
}

/// SystemParam: apply damage contract
#[derive(SystemParam)]
pub struct DamageApplier<'w, 's> {
    healths: Query<'w, 's, &'static mut Health>,
    commands: Commands<'w, 's>,
    damage_events: EventWriter<'w, DamageDealt>,
    death_events: EventWriter<'w, EntityDied>,
}

impl DamageApplier<'_, '_> {
    /// ApplyDamage: no-op для мёртвых и entity без Health
    pub fn apply(&mut self, request: DamageRequest) -> DamageOutcome {
        let Ok(mut health) = self.healths.get_mut(request.target) else {
            crate::log_warning(&format!(
                "Damage target {:?} has no Health (skipped)",
                request.target
            ));
            return DamageOutcome::Ignored;
        };

        let outcome = health.apply_damage(request.amount);
        if outcome == DamageOutcome::Ignored {
            return outcome;
        }

        let killed = outcome == DamageOutcome::Killed;
        self.damage_events.write(DamageDealt {
            attacker: request.attacker,
            target: request.target,
            amount: request.amount.max(0.0),
            hit_point: request.hit_point,
            hit_normal: request.hit_normal,
            source: request.source,
            remaining_health: health.current,
            target_died: killed,
        });

        crate::log(&format!(
            "💥 {:?} hit {:?} for {} ({:?}, HP left: {})",
            request.attacker, request.target, request.amount, request.source, health.current
        ));

        if killed {
            self.mark_dead(request.target, Some(request.attacker));
        }

        outcome
    }

    /// Die без урона (idempotent). true — переход случился сейчас.
    pub fn kill(&mut self, target: Entity, killer: Option<Entity>) -> bool {
        let Ok(mut health) = self.healths.get_mut(target) else {
            return false;
        };

        if !health.die() {
            return false;
        }

        self.mark_dead(target, killer);
        true
    }

    /// Жив ли entity (отсутствие Health = не damageable = не жив)
    pub fn is_alive(&self, entity: Entity) -> bool {
        self.healths
            .get(entity)
            .is_ok_and(|health| health.is_alive())
    }

    /// Мёртв ли entity (entity без Health мёртвым не считается)
    pub fn is_dead(&self, entity: Entity) -> bool {
        self.healths.get(entity).is_ok_and(|health| health.is_dead())
    }

    fn mark_dead(&mut self, entity: Entity, killer: Option<Entity>) {
        self.commands.entity(entity).try_insert(Dead);
        self.death_events.write(EntityDied { entity, killer });
        crate::log_info(&format!("💀 Entity {:?} died (killer: {:?})", entity, killer));
    }
}
