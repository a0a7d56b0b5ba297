//! Player systems: input bridge, locomotion, death reaction.

use bevy::prelude::*;

use crate::combat::{EntityDied, WeaponFireIntent, WeaponReloadIntent};
use crate::components::{MovementCommand, MovementSpeed, NavigationDisabled};
use crate::player::{Player, ShooterDisabled, ShooterInput};
use crate::SimClock;

/// Система: ShooterInput → fire/reload intents
///
/// fire → WeaponFireIntent, иначе reload → WeaponReloadIntent.
pub fn shooter_input_intents(
    shooters: Query<(Entity, &ShooterInput), Without<ShooterDisabled>>,
    mut fire_intents: EventWriter<WeaponFireIntent>,
    mut reload_intents: EventWriter<WeaponReloadIntent>,
) {
    for (shooter, input) in shooters.iter() {
        if input.fire {
            fire_intents.write(WeaponFireIntent { shooter });
        } else if input.reload {
            reload_intents.write(WeaponReloadIntent { shooter });
        }
    }
}

/// Система: локомоция игрока вдоль forward
///
/// Смещение = forward × move_axis × speed × delta. Ориентацию не трогает.
pub fn player_locomotion(
    mut players: Query<
        (&ShooterInput, &MovementSpeed, &mut Transform),
        (With<Player>, Without<NavigationDisabled>),
    >,
    clock: Res<SimClock>,
) {
    for (input, speed, mut transform) in players.iter_mut() {
        if !input.move_axis.is_finite() || input.move_axis == 0.0 {
            continue;
        }

        let axis = input.move_axis.clamp(-1.0, 1.0);
        let forward = transform.forward().as_vec3();
        transform.translation += forward * axis * speed.speed * clock.delta;
    }
}

/// System: смерть игрока
///
/// Отключает стрелка (ShooterDisabled) и movement (Stop + NavigationDisabled).
pub fn player_death_reaction(
    mut commands: Commands,
    mut deaths: EventReader<EntityDied>,
    mut players: Query<&mut MovementCommand, With<Player>>,
) {
    for event in deaths.read() {
        let Ok(mut command) = players.get_mut(event.entity) else {
            continue;
        };

        command.set_if_neq(MovementCommand::Stop);
        commands
            .entity(event.entity)
            .try_insert((ShooterDisabled, NavigationDisabled));

        crate::log_info(&format!(
            "☠️ Player {:?} down → shooter/movement disabled",
            event.entity
        ));
    }
}
