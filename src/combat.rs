use crate::ecs::components::CombatStats;

pub struct AttackOutcome {
    pub damage: i32,
    pub defeated: bool,
}

/// Resolves one attack. Damage never drops below 1 no matter the defense.
/// The defender's hp may go negative here; removing a defeated entity from
/// the entity set is the caller's job, exactly once.
pub fn attack(attacker: &CombatStats, defender: &mut CombatStats) -> AttackOutcome {
    let damage = (attacker.power - defender.defense).max(1);
    defender.hp -= damage;
    AttackOutcome {
        damage,
        defeated: defender.hp <= 0,
    }
}

/// Heals without ever exceeding max_hp or raising a downed fighter.
pub fn heal(stats: &mut CombatStats, amount: i32) -> i32 {
    if stats.hp <= 0 {
        return 0;
    }
    let before = stats.hp;
    stats.hp = (stats.hp + amount).min(stats.max_hp);
    stats.hp - before
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn stats(hp: i32, defense: i32, power: i32) -> CombatStats {
        CombatStats {
            max_hp: hp,
            hp,
            defense,
            power,
        }
    }

    #[test]
    fn damage_is_power_minus_defense() {
        let attacker = stats(10, 0, 5);
        let mut defender = stats(10, 2, 0);
        let outcome = attack(&attacker, &mut defender);
        assert_eq!(outcome.damage, 3);
        assert_eq!(defender.hp, 7);
        assert!(!outcome.defeated);
    }

    #[test]
    fn lethal_blow_reports_defeat_once() {
        let attacker = stats(10, 0, 12);
        let mut defender = stats(5, 1, 0);
        let outcome = attack(&attacker, &mut defender);
        assert!(outcome.defeated);
        assert!(defender.hp <= 0);
    }

    #[test]
    fn heal_clamps_to_max() {
        let mut fighter = stats(20, 0, 0);
        fighter.hp = 19;
        assert_eq!(heal(&mut fighter, 5), 1);
        assert_eq!(fighter.hp, 20);
        assert_eq!(heal(&mut fighter, 5), 0);
    }

    #[test]
    fn downed_fighters_do_not_heal() {
        let mut fighter = stats(20, 0, 0);
        fighter.hp = -2;
        assert_eq!(heal(&mut fighter, 5), 0);
        assert_eq!(fighter.hp, -2);
    }

    proptest! {
        #[test]
        fn damage_floor_is_one(power in 0i32..50, defense in 0i32..200) {
            let attacker = stats(10, 0, power);
            let mut defender = stats(100, defense, 0);
            let outcome = attack(&attacker, &mut defender);
            prop_assert!(outcome.damage >= 1);
        }

        #[test]
        fn heal_preserves_hp_bounds(hp in 1i32..40, max_hp in 1i32..40, amount in 0i32..60) {
            let mut fighter = stats(max_hp.max(hp), 0, 0);
            fighter.hp = hp.min(fighter.max_hp);
            heal(&mut fighter, amount);
            prop_assert!(fighter.hp >= 1);
            prop_assert!(fighter.hp <= fighter.max_hp);
        }
    }
}
