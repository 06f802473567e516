//! Damage and counterattack computation.
//!
//! The damage table is asymmetric on purpose: a miss deals and provokes
//! nothing, while every other zone resolves to at least 1 point somewhere.
//! The floor distinguishes "no hit" from "minimal hit" and keeps heavily
//! armored matchups from stalling forever.

use crate::common::{Attack, Defense, Roll};

use super::zone::HitZone;

// =============================================================================
// CombatantStats
// =============================================================================

/// The attack/defense pair of one side of an exchange.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CombatantStats {
    attack: Attack,
    defense: Defense,
}

impl CombatantStats {
    #[must_use]
    pub const fn new(attack: Attack, defense: Defense) -> Self {
        Self { attack, defense }
    }

    #[must_use]
    pub const fn attack(&self) -> Attack {
        self.attack
    }

    #[must_use]
    pub const fn defense(&self) -> Defense {
        self.defense
    }
}

// =============================================================================
// AttackResolution
// =============================================================================

/// The numeric outcome of one resolved tap.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AttackResolution {
    zone: HitZone,
    damage_to_enemy: u32,
    damage_to_player: u32,
}

impl AttackResolution {
    #[must_use]
    pub const fn zone(&self) -> HitZone {
        self.zone
    }

    /// Damage the player dealt to the enemy.
    #[must_use]
    pub const fn damage_to_enemy(&self) -> u32 {
        self.damage_to_enemy
    }

    /// Damage the player received, whether from the enemy counterattack or a
    /// self-inflicted injure.
    #[must_use]
    pub const fn damage_to_player(&self) -> u32 {
        self.damage_to_player
    }
}

// =============================================================================
// Resolution
// =============================================================================

/// Resolves a classified tap into damage on both sides.
///
/// - `miss`: nothing happens on either side.
/// - `injure`: the player eats `max(1, enemy attack - player defense)`; the
///   enemy is untouched and does not counterattack on top of it.
/// - `graze` / `normal` / `crit`: the enemy takes the zone's multiple of the
///   player's attack less enemy defense, floored to an integer with a hard
///   floor of 1; the enemy counterattacks for
///   `max(1, enemy attack - player defense)`.
///
/// The crit multiplier is `1.6 + crit_roll`, putting crits in the
/// `[1.6, 2.6)` range. The roll is ignored for every other zone.
///
/// # Examples
///
/// ```
/// use skirmish_domain::combat::{CombatantStats, HitZone, resolve_attack};
/// use skirmish_domain::common::{Attack, Defense, Roll};
///
/// let player = CombatantStats::new(Attack::new(30), Defense::new(5));
/// let enemy = CombatantStats::new(Attack::new(12), Defense::new(10));
///
/// let outcome = resolve_attack(HitZone::Normal, player, enemy, Roll::zero());
/// assert_eq!(outcome.damage_to_enemy(), 20);
/// assert_eq!(outcome.damage_to_player(), 7);
/// ```
#[must_use]
pub fn resolve_attack(
    zone: HitZone,
    player: CombatantStats,
    enemy: CombatantStats,
    crit_roll: Roll,
) -> AttackResolution {
    let counter = flat_damage(enemy.attack(), player.defense());

    match zone {
        HitZone::Miss => AttackResolution {
            zone,
            damage_to_enemy: 0,
            damage_to_player: 0,
        },
        HitZone::Injure => AttackResolution {
            zone,
            damage_to_enemy: 0,
            damage_to_player: counter,
        },
        HitZone::Graze | HitZone::Normal => AttackResolution {
            zone,
            damage_to_enemy: scaled_damage(player.attack(), zone.damage_multiplier(), enemy.defense()),
            damage_to_player: counter,
        },
        HitZone::Crit => AttackResolution {
            zone,
            damage_to_enemy: scaled_damage(
                player.attack(),
                zone.damage_multiplier() + crit_roll.value(),
                enemy.defense(),
            ),
            damage_to_player: counter,
        },
    }
}

/// `max(1, floor(attack * multiplier - defense))` for a landed hit.
fn scaled_damage(attack: Attack, multiplier: f64, defense: Defense) -> u32 {
    let raw = f64::from(attack.value()) * multiplier - f64::from(defense.value());
    if raw < 1.0 {
        1
    } else {
        // raw < u32::MAX for any in-range stats; the multiplier tops out
        // below 2.6 and stats are bounded well under 2^30.
        raw.floor() as u32
    }
}

/// `max(1, attack - defense)` for unscaled exchanges.
fn flat_damage(attack: Attack, defense: Defense) -> u32 {
    attack.value().saturating_sub(defense.value()).max(1)
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};

    #[fixture]
    fn player() -> CombatantStats {
        CombatantStats::new(Attack::new(30), Defense::new(8))
    }

    #[fixture]
    fn enemy() -> CombatantStats {
        CombatantStats::new(Attack::new(12), Defense::new(10))
    }

    mod miss {
        use super::*;

        #[rstest]
        fn nothing_happens(player: CombatantStats, enemy: CombatantStats) {
            let outcome = resolve_attack(HitZone::Miss, player, enemy, Roll::zero());
            assert_eq!(outcome.damage_to_enemy(), 0);
            assert_eq!(outcome.damage_to_player(), 0);
        }
    }

    mod injure {
        use super::*;

        #[rstest]
        fn player_takes_the_self_penalty(player: CombatantStats, enemy: CombatantStats) {
            let outcome = resolve_attack(HitZone::Injure, player, enemy, Roll::zero());
            assert_eq!(outcome.damage_to_enemy(), 0);
            assert_eq!(outcome.damage_to_player(), 4);
        }

        #[rstest]
        fn self_penalty_is_floored_at_one() {
            let tank = CombatantStats::new(Attack::new(30), Defense::new(500));
            let weak = CombatantStats::new(Attack::new(3), Defense::new(0));
            let outcome = resolve_attack(HitZone::Injure, tank, weak, Roll::zero());
            assert_eq!(outcome.damage_to_player(), 1);
        }
    }

    mod landed_hits {
        use super::*;

        #[rstest]
        fn graze_deals_reduced_damage(player: CombatantStats, enemy: CombatantStats) {
            // 30 * 0.6 - 10 = 8
            let outcome = resolve_attack(HitZone::Graze, player, enemy, Roll::zero());
            assert_eq!(outcome.damage_to_enemy(), 8);
        }

        #[rstest]
        fn normal_deals_exact_formula_damage() {
            let player = CombatantStats::new(Attack::new(30), Defense::new(0));
            let enemy = CombatantStats::new(Attack::new(1), Defense::new(10));
            let outcome = resolve_attack(HitZone::Normal, player, enemy, Roll::zero());
            assert_eq!(outcome.damage_to_enemy(), 20);
        }

        #[rstest]
        fn fractional_damage_is_floored(enemy: CombatantStats) {
            // 26 * 0.6 - 10 = 5.6, floored to 5.
            let player = CombatantStats::new(Attack::new(26), Defense::new(0));
            let outcome = resolve_attack(HitZone::Graze, player, enemy, Roll::zero());
            assert_eq!(outcome.damage_to_enemy(), 5);
        }

        #[rstest]
        #[case(HitZone::Graze)]
        #[case(HitZone::Normal)]
        #[case(HitZone::Crit)]
        fn every_landed_hit_counterattacks(
            player: CombatantStats,
            enemy: CombatantStats,
            #[case] zone: HitZone,
        ) {
            let outcome = resolve_attack(zone, player, enemy, Roll::zero());
            assert_eq!(outcome.damage_to_player(), 4);
        }

        #[rstest]
        #[case(HitZone::Graze)]
        #[case(HitZone::Normal)]
        #[case(HitZone::Crit)]
        fn landed_damage_is_floored_at_one(#[case] zone: HitZone) {
            let player = CombatantStats::new(Attack::new(5), Defense::new(0));
            let fortress = CombatantStats::new(Attack::new(1), Defense::new(999));
            let outcome = resolve_attack(zone, player, fortress, Roll::zero());
            assert_eq!(outcome.damage_to_enemy(), 1, "zone {}", zone);
        }
    }

    mod crit {
        use super::*;

        #[rstest]
        fn base_crit_multiplier_applies_at_roll_zero(enemy: CombatantStats) {
            // 30 * 1.6 - 10 = 38
            let player = CombatantStats::new(Attack::new(30), Defense::new(0));
            let outcome = resolve_attack(HitZone::Crit, player, enemy, Roll::zero());
            assert_eq!(outcome.damage_to_enemy(), 38);
        }

        #[rstest]
        fn crit_roll_raises_the_multiplier(enemy: CombatantStats) {
            // 30 * (1.6 + 0.5) - 10 = 53
            let player = CombatantStats::new(Attack::new(30), Defense::new(0));
            let outcome = resolve_attack(HitZone::Crit, player, enemy, Roll::new(0.5).unwrap());
            assert_eq!(outcome.damage_to_enemy(), 53);
        }

        #[rstest]
        fn crit_roll_never_reaches_the_doubled_bonus(enemy: CombatantStats) {
            let player = CombatantStats::new(Attack::new(100), Defense::new(0));
            let outcome = resolve_attack(
                HitZone::Crit,
                player,
                enemy,
                Roll::new(0.999_999_999).unwrap(),
            );
            // 100 * (1.6 + r) - 10 < 250 for every r < 1.
            assert!(outcome.damage_to_enemy() < 250);
        }
    }

    mod properties {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            /// For every zone other than miss, someone takes at least one
            /// point of damage, and landed hits always deal at least one.
            #[test]
            fn prop_damage_floor_holds(
                player_attack in 0u32..1000,
                player_defense in 0u32..1000,
                enemy_attack in 0u32..1000,
                enemy_defense in 0u32..1000,
                roll_value in 0.0f64..1.0
            ) {
                let player = CombatantStats::new(Attack::new(player_attack), Defense::new(player_defense));
                let enemy = CombatantStats::new(Attack::new(enemy_attack), Defense::new(enemy_defense));
                let roll = Roll::new(roll_value).unwrap();

                for zone in [HitZone::Graze, HitZone::Normal, HitZone::Crit] {
                    let outcome = resolve_attack(zone, player, enemy, roll);
                    prop_assert!(outcome.damage_to_enemy() >= 1);
                    prop_assert!(outcome.damage_to_player() >= 1);
                }

                let injure = resolve_attack(HitZone::Injure, player, enemy, roll);
                prop_assert_eq!(injure.damage_to_enemy(), 0);
                prop_assert!(injure.damage_to_player() >= 1);

                let miss = resolve_attack(HitZone::Miss, player, enemy, roll);
                prop_assert_eq!(miss.damage_to_enemy(), 0);
                prop_assert_eq!(miss.damage_to_player(), 0);
            }
        }
    }
}
