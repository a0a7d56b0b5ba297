//! AI contact attack.

use bevy::prelude::*;

use crate::ai::HostileAgent;
use crate::combat::{DamageApplier, DamageRequest, DamageSource};
use crate::components::BodyVolume;
use crate::physics::ContactStay;
use crate::SimClock;

/// Система: атака на контакте (ContactStay)
///
/// Урон только если:
/// - агент жив
/// - cooldown прошёл (now - last_attack ≥ attack_cooldown)
/// - контакт ровно с current_target, и цель жива
///
/// Геометрия: hit point — ближайшая к агенту точка volume цели,
/// normal — от цели к агенту.
pub fn agent_contact_attacks(
    mut contacts: EventReader<ContactStay>,
    mut agents: Query<(&mut HostileAgent, &Transform)>,
    bodies: Query<(&Transform, &BodyVolume)>,
    mut damage: DamageApplier,
    clock: Res<SimClock>,
) {
    let now = clock.now;

    for contact in contacts.read() {
        let Ok((mut agent, agent_transform)) = agents.get_mut(contact.entity) else {
            continue;
        };

        if damage.is_dead(contact.entity) {
            continue;
        }

        if agent.current_target != Some(contact.other) || !damage.is_alive(contact.other) {
            continue;
        }

        if !agent.attack_ready(now) {
            continue;
        }

        let Ok((target_transform, target_volume)) = bodies.get(contact.other) else {
            continue;
        };

        agent.last_attack_time = Some(now);

        let agent_position = agent_transform.translation;
        let target_position = target_transform.translation;
        let hit_point = target_volume.closest_point(target_position, agent_position);
        let hit_normal = (agent_position - target_position).normalize_or_zero();

        damage.apply(DamageRequest {
            attacker: contact.entity,
            target: contact.other,
            amount: agent.attack_damage,
            hit_point,
            hit_normal,
            source: DamageSource::Melee,
        });
    }
}
