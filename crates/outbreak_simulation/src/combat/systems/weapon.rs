//! Weapon systems: fire (hit-scan), reload request, reload completion.

use bevy::prelude::*;

use crate::combat::{
    DamageApplier, DamageRequest, DamageSource, DespawnAfter, ReloadFinished, ReloadInProgress,
    ReloadStarted, ShotFired, Tracer, Weapon, WeaponFireIntent, WeaponReloadIntent,
};
use crate::components::Health;
use crate::physics::WorldQueries;
use crate::player::ShooterDisabled;
use crate::SimClock;

/// Система: обработка WeaponFireIntent
///
/// Выстрел полностью резолвится (hit-scan + урон) внутри системы:
/// 1. Guard: носитель жив, не ShooterDisabled, Weapon::fire(now) == true
/// 2. Hit-scan от muzzle вдоль forward до max_range (свой volume исключён)
/// 3. Damageable → DamageApplier; blocker глушит луч без урона, конец на max range
/// 4. ShotFired + Tracer entity (DespawnAfter tracer_duration)
pub fn process_fire_intents(
    mut commands: Commands,
    mut intents: EventReader<WeaponFireIntent>,
    mut shooters: Query<(&mut Weapon, &Transform), Without<ShooterDisabled>>,
    world_queries: WorldQueries,
    mut damage: DamageApplier,
    mut shots: EventWriter<ShotFired>,
    clock: Res<SimClock>,
) {
    let now = clock.now;

    for intent in intents.read() {
        let Ok((mut weapon, transform)) = shooters.get_mut(intent.shooter) else {
            continue;
        };

        if damage.is_dead(intent.shooter) {
            continue;
        }

        if !weapon.fire(now) {
            continue;
        }

        let origin = weapon.muzzle_position(transform);
        let direction = transform.forward().as_vec3();
        let max_range = weapon.config.max_range;

        let hit = world_queries.cast_ray(origin, direction, max_range, Some(intent.shooter));

        let (end, victim) = match hit {
            Some(hit) if hit.damageable => {
                damage.apply(DamageRequest {
                    attacker: intent.shooter,
                    target: hit.entity,
                    amount: weapon.config.damage,
                    hit_point: hit.point,
                    hit_normal: hit.normal,
                    source: DamageSource::Ranged,
                });
                (hit.point, Some(hit.entity))
            }
            // Не-damageable (blocker) или промах: конец на max range
            _ => (origin + direction * max_range, None),
        };

        shots.write(ShotFired {
            shooter: intent.shooter,
            origin,
            end,
            victim,
        });

        commands.spawn((
            Tracer {
                shooter: intent.shooter,
                start: origin,
                end,
            },
            DespawnAfter {
                despawn_time: now + weapon.config.tracer_duration,
            },
        ));

        crate::log(&format!(
            "🔫 {:?} fired (mag: {}/{}, reserve: {}, victim: {:?})",
            intent.shooter,
            weapon.magazine_ammo,
            weapon.config.magazine_capacity,
            weapon.reserve_ammo,
            victim
        ));
    }
}

/// Система: обработка WeaponReloadIntent
///
/// Принятый reload ставит ReloadInProgress { completes_at = now + reload_duration }.
pub fn process_reload_intents(
    mut commands: Commands,
    mut intents: EventReader<WeaponReloadIntent>,
    mut shooters: Query<(&mut Weapon, Option<&Health>), Without<ShooterDisabled>>,
    mut started: EventWriter<ReloadStarted>,
    clock: Res<SimClock>,
) {
    for intent in intents.read() {
        let Ok((mut weapon, health)) = shooters.get_mut(intent.shooter) else {
            continue;
        };

        if health.is_some_and(|health| health.is_dead()) {
            continue;
        }

        if !weapon.start_reload() {
            continue;
        }

        let completes_at = clock.now + weapon.config.reload_duration;
        commands
            .entity(intent.shooter)
            .insert(ReloadInProgress { completes_at });
        started.write(ReloadStarted {
            shooter: intent.shooter,
            completes_at,
        });

        crate::log(&format!(
            "🔄 {:?} reloading (done at {:.2})",
            intent.shooter, completes_at
        ));
    }
}

/// Система: завершение перезарядок (one-shot, guarded)
///
/// Завершение применяется только если носитель жив, не ShooterDisabled
/// и оружие всё ещё Reloading. Иначе completion просто сбрасывается.
pub fn complete_reloads(
    mut commands: Commands,
    mut pending: Query<(
        Entity,
        &ReloadInProgress,
        &mut Weapon,
        Option<&Health>,
        Has<ShooterDisabled>,
    )>,
    mut finished: EventWriter<ReloadFinished>,
    clock: Res<SimClock>,
) {
    for (entity, reload, mut weapon, health, disabled) in pending.iter_mut() {
        if clock.now < reload.completes_at {
            continue;
        }

        commands.entity(entity).remove::<ReloadInProgress>();

        let alive = health.is_none_or(|health| health.is_alive());
        if !alive || disabled || !weapon.is_reloading() {
            crate::log(&format!("⏹️ Reload of {:?} dropped", entity));
            continue;
        }

        let transferred = weapon.finish_reload();
        finished.write(ReloadFinished {
            shooter: entity,
            transferred,
        });

        crate::log(&format!(
            "✅ {:?} reloaded +{} (mag: {}, reserve: {})",
            entity, transferred, weapon.magazine_ammo, weapon.reserve_ammo
        ));
    }
}
