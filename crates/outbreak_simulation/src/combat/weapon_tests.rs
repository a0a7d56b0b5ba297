//! Weapon state machine tests (без App)

#[cfg(test)]
mod tests {
    use super::super::weapon::*;
    use crate::config::WeaponConfig;
    use proptest::prelude::*;

    fn weapon_with(capacity: u32, magazine: u32, reserve: u32) -> Weapon {
        let mut weapon = Weapon::new(WeaponConfig {
            magazine_capacity: capacity,
            ..Default::default()
        });
        weapon.magazine_ammo = magazine;
        weapon.reserve_ammo = reserve;
        weapon.state = if magazine == 0 {
            WeaponState::Empty
        } else {
            WeaponState::Ready
        };
        weapon
    }

    #[test]
    fn test_activation_fills_magazine() {
        let weapon = Weapon::default();
        assert_eq!(weapon.state, WeaponState::Ready);
        assert_eq!(weapon.magazine_ammo, 25);
        assert_eq!(weapon.reserve_ammo, 100);
        assert_eq!(weapon.last_fire_time, None);
    }

    #[test]
    fn test_first_shot_at_time_zero() {
        let mut weapon = Weapon::default();
        assert!(weapon.fire(0.0));
        assert_eq!(weapon.magazine_ammo, 24);
        assert_eq!(weapon.last_fire_time, Some(0.0));
    }

    #[test]
    fn test_fire_respects_interval() {
        let mut weapon = Weapon::default();

        assert!(weapon.fire(1.0));
        // 0.05 < fire_interval (0.12)
        assert!(!weapon.fire(1.05));
        assert_eq!(weapon.magazine_ammo, 24);

        assert!(weapon.fire(1.2));
        assert_eq!(weapon.magazine_ammo, 23);
    }

    #[test]
    fn test_last_round_empties_weapon() {
        let mut weapon = weapon_with(30, 1, 10);

        assert!(weapon.fire(0.0));
        assert_eq!(weapon.state, WeaponState::Empty);
        assert_eq!(weapon.magazine_ammo, 0);

        // Пустой магазин: всегда false
        assert!(!weapon.fire(10.0));
        assert_eq!(weapon.magazine_ammo, 0);
    }

    #[test]
    fn test_fire_rejected_while_reloading() {
        let mut weapon = weapon_with(30, 10, 50);

        assert!(weapon.start_reload());
        assert_eq!(weapon.state, WeaponState::Reloading);
        assert!(!weapon.fire(100.0));
        assert_eq!(weapon.magazine_ammo, 10);
    }

    #[test]
    fn test_reload_from_empty() {
        let mut weapon = weapon_with(30, 0, 90);

        assert!(weapon.start_reload());
        assert_eq!(weapon.finish_reload(), 30);
        assert_eq!(weapon.magazine_ammo, 30);
        assert_eq!(weapon.reserve_ammo, 60);
        assert_eq!(weapon.state, WeaponState::Ready);
    }

    #[test]
    fn test_reload_limited_by_reserve() {
        let mut weapon = weapon_with(30, 25, 10);

        assert!(weapon.start_reload());
        assert_eq!(weapon.finish_reload(), 5);
        assert_eq!(weapon.magazine_ammo, 30);
        assert_eq!(weapon.reserve_ammo, 5);
    }

    #[test]
    fn test_partial_reserve_top_up() {
        let mut weapon = weapon_with(30, 0, 7);

        assert!(weapon.start_reload());
        assert_eq!(weapon.finish_reload(), 7);
        assert_eq!(weapon.magazine_ammo, 7);
        assert_eq!(weapon.reserve_ammo, 0);
        assert_eq!(weapon.state, WeaponState::Ready);
    }

    #[test]
    fn test_reload_rejections() {
        // Нет запаса
        let mut weapon = weapon_with(30, 0, 0);
        assert!(!weapon.start_reload());
        assert_eq!(weapon.state, WeaponState::Empty);

        // Полный магазин
        let mut weapon = weapon_with(30, 30, 90);
        assert!(!weapon.start_reload());
        assert_eq!(weapon.state, WeaponState::Ready);

        // Уже перезаряжаемся
        let mut weapon = weapon_with(30, 5, 90);
        assert!(weapon.start_reload());
        assert!(!weapon.start_reload());
    }

    #[test]
    fn test_finish_without_reload_is_noop() {
        let mut weapon = weapon_with(30, 5, 90);
        assert_eq!(weapon.finish_reload(), 0);
        assert_eq!(weapon.magazine_ammo, 5);
        assert_eq!(weapon.reserve_ammo, 90);
    }

    proptest! {
        #[test]
        fn prop_reload_conserves_ammo(
            capacity in 1u32..60,
            magazine_seed in 0u32..60,
            reserve in 0u32..200,
        ) {
            let magazine = magazine_seed % (capacity + 1);
            let mut weapon = weapon_with(capacity, magazine, reserve);
            let total = magazine + reserve;

            if weapon.start_reload() {
                weapon.finish_reload();
            }

            prop_assert_eq!(weapon.magazine_ammo + weapon.reserve_ammo, total);
            prop_assert!(weapon.magazine_ammo <= capacity);
        }

        #[test]
        fn prop_shots_never_exceed_magazine(shots in 0usize..80) {
            let mut weapon = Weapon::default();
            let start = weapon.magazine_ammo;
            let mut fired = 0u32;

            for i in 0..shots {
                if weapon.fire(i as f32) {
                    fired += 1;
                }
            }

            prop_assert_eq!(fired, start.min(shots as u32));
            prop_assert_eq!(weapon.magazine_ammo, start - fired);
        }
    }
}
