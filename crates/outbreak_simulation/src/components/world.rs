//! World компоненты: collision volume и collision layers

use bevy::prelude::*;
use bevy_rapier3d::prelude::{CollisionGroups, Group};

/// Collision volume актора (sphere вокруг Transform.translation)
///
/// Headless queries (hit-scan, overlap, contacts) работают по этой сфере.
/// Volume без Health — статичный blocker (стена, ящик).
#[derive(Component, Debug, Clone, Copy, PartialEq, Reflect)]
#[reflect(Component)]
pub struct BodyVolume {
    pub radius: f32,
}

impl Default for BodyVolume {
    fn default() -> Self {
        Self { radius: 0.5 }
    }
}

impl BodyVolume {
    pub fn new(radius: f32) -> Self {
        Self { radius }
    }

    /// Ближайшая точка поверхности к `point` (center — позиция владельца)
    pub fn closest_point(&self, center: Vec3, point: Vec3) -> Vec3 {
        let offset = point - center;
        if offset.length() <= self.radius {
            return point;
        }
        center + offset.normalize_or_zero() * self.radius
    }
}

/// Collision layers (rapier `Group`)
pub mod layers {
    use super::Group;

    pub const PLAYER: Group = Group::GROUP_1;
    pub const HOSTILE: Group = Group::GROUP_2;
    pub const ENVIRONMENT: Group = Group::GROUP_3;
}

/// CollisionGroups для membership: взаимодействует со всеми слоями
pub fn groups_for(membership: Group) -> CollisionGroups {
    CollisionGroups::new(membership, Group::ALL)
}

/// Rapier правило фильтрации пары: каждый должен быть в фильтре другого
pub fn groups_interact(a: &CollisionGroups, b: &CollisionGroups) -> bool {
    a.memberships.intersects(b.filters) && b.memberships.intersects(a.filters)
}
