//! Contact detection (continuous proximity signal)
//!
//! Для каждого entity с `ContactReporter` пишет по одному `ContactStay`
//! на каждый пересекающийся volume за шаг. Не буферизуется: пока
//! volumes пересекаются — событие каждый шаг.

use bevy::prelude::*;
use bevy_rapier3d::prelude::{ColliderDisabled, CollisionGroups};

use crate::components::{groups_interact, BodyVolume};

/// Маркер: entity получает ContactStay о своих касаниях
#[derive(Component, Debug, Clone, Copy, Default, Reflect)]
#[reflect(Component)]
pub struct ContactReporter;

/// Событие: `entity` касается `other` в этом шаге
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContactStay {
    pub entity: Entity,
    pub other: Entity,
}

type Volume = (
    Entity,
    &'static Transform,
    &'static BodyVolume,
    Option<&'static CollisionGroups>,
);

/// Система: headless детектор контактов (sphere vs sphere)
pub fn detect_contacts(
    reporters: Query<Volume, (With<ContactReporter>, Without<ColliderDisabled>)>,
    volumes: Query<Volume, Without<ColliderDisabled>>,
    mut contacts: EventWriter<ContactStay>,
) {
    for (entity, transform, volume, groups) in reporters.iter() {
        for (other, other_transform, other_volume, other_groups) in volumes.iter() {
            if other == entity {
                continue;
            }

            if let (Some(a), Some(b)) = (groups, other_groups) {
                if !groups_interact(a, b) {
                    continue;
                }
            }

            let distance = transform.translation.distance(other_transform.translation);
            if distance <= volume.radius + other_volume.radius {
                contacts.write(ContactStay { entity, other });
            }
        }
    }
}
