//! Spatial queries: hit-scan raycast + overlap sphere
//!
//! Аналитические sphere проверки по `BodyVolume` (как hitbox overlap):
//! rapier здесь даёт только collision layers и `ColliderDisabled`.
//! Порядок результатов = порядок итерации query (детерминирован для
//! одинаковой истории spawn).

use bevy::ecs::system::SystemParam;
use bevy::prelude::*;
use bevy_rapier3d::prelude::{ColliderDisabled, CollisionGroups, Group};

use crate::components::{BodyVolume, Health};

/// Результат hit-scan: ближайшая блокирующая поверхность
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RayHit {
    pub entity: Entity,
    pub point: Vec3,
    pub normal: Vec3,
    pub distance: f32,
    /// true если у entity есть Health (иначе — статичный blocker)
    pub damageable: bool,
}

/// SystemParam: spatial query provider
///
/// Читает только Transform/BodyVolume/CollisionGroups (+ `Has<Health>`),
/// поэтому совместим с `DamageApplier` (`&mut Health`) в одной системе.
#[derive(SystemParam)]
pub struct WorldQueries<'w, 's> {
    volumes: Query<
        'w,
        's,
        (
            Entity,
            &'static Transform,
            &'static BodyVolume,
            Option<&'static CollisionGroups>,
            Has<Health>,
        ),
        Without<ColliderDisabled>,
    >,
}

impl WorldQueries<'_, '_> {
    /// Hit-scan от `origin` вдоль `direction` до `max_distance`
    ///
    /// `exclude` — обычно сам стрелок (его volume не блокирует свой выстрел).
    pub fn cast_ray(
        &self,
        origin: Vec3,
        direction: Vec3,
        max_distance: f32,
        exclude: Option<Entity>,
    ) -> Option<RayHit> {
        let direction = direction.try_normalize()?;
        let mut nearest: Option<RayHit> = None;

        for (entity, transform, volume, _, damageable) in self.volumes.iter() {
            if Some(entity) == exclude {
                continue;
            }

            let center = transform.translation;
            let Some(distance) = ray_sphere(origin, direction, center, volume.radius) else {
                continue;
            };

            if distance > max_distance {
                continue;
            }

            // Строго меньше: при равенстве остаётся первый найденный
            if nearest.is_some_and(|hit| hit.distance <= distance) {
                continue;
            }

            let point = origin + direction * distance;
            let normal = (point - center).try_normalize().unwrap_or(-direction);

            nearest = Some(RayHit {
                entity,
                point,
                normal,
                distance,
                damageable,
            });
        }

        nearest
    }

    /// Все volumes пересекающие сферу (center, radius) в слоях `layers`
    ///
    /// Volume без CollisionGroups считается членом всех слоёв.
    pub fn overlap_sphere(&self, center: Vec3, radius: f32, layers: Group) -> Vec<Entity> {
        self.volumes
            .iter()
            .filter(|(_, transform, volume, groups, _)| {
                let memberships = groups.map_or(Group::ALL, |groups| groups.memberships);
                memberships.intersects(layers)
                    && transform.translation.distance(center) <= radius + volume.radius
            })
            .map(|(entity, ..)| entity)
            .collect()
    }
}

/// Пересечение луча со сферой
///
/// `direction` должен быть нормализован. Возвращает расстояние до
/// первой точки входа (0 если origin внутри сферы) или None.
pub fn ray_sphere(origin: Vec3, direction: Vec3, center: Vec3, radius: f32) -> Option<f32> {
    let offset = origin - center;
    let b = offset.dot(direction);
    let c = offset.length_squared() - radius * radius;

    // Origin снаружи и луч смотрит от сферы
    if c > 0.0 && b > 0.0 {
        return None;
    }

    let discriminant = b * b - c;
    if discriminant < 0.0 {
        return None;
    }

    Some((-b - discriminant.sqrt()).max(0.0))
}
