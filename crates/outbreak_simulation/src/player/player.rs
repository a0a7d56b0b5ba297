//! Player components: marker, shooter input bridge, disabled shooter

use bevy::prelude::*;

use crate::combat::Weapon;
use crate::components::{BodyVolume, Health, MovementCommand, MovementSpeed};

/// Marker component для player-controlled entity
///
/// Акторы С этим компонентом получают команды от input коллаборатора
/// (ShooterInput) и являются целью hostile агентов (layers::PLAYER).
#[derive(Component, Debug, Clone, Copy, Default, Reflect)]
#[reflect(Component)]
#[require(
    Health,
    Weapon,
    ShooterInput,
    MovementCommand,
    MovementSpeed,
    BodyVolume,
    Transform
)]
pub struct Player;

/// Состояние input стрелка (заполняет внешний input коллаборатор)
///
/// fire имеет приоритет: если зажат fire, reload в этом шаге игнорируется.
/// move_axis: -1..1 вдоль forward (назад/вперёд), поворот делает aim.
#[derive(Component, Debug, Clone, Copy, Default, PartialEq, Reflect)]
#[reflect(Component)]
pub struct ShooterInput {
    pub fire: bool,
    pub reload: bool,
    pub move_axis: f32,
}

/// Маркер: стрелок отключён (смерть)
///
/// Никаких fire/reload; перезарядка в процессе никогда не завершится.
#[derive(Component, Debug, Clone, Copy, Default, Reflect)]
#[reflect(Component)]
pub struct ShooterDisabled;
