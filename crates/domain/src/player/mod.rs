//! Player combat profile.
//!
//! The profile is an aggregate the account service computes from equipment
//! and skills; the combat core only reads it.

use crate::common::{Accuracy, Attack, Defense, Health};

// =============================================================================
// PlayerCombatProfile
// =============================================================================

/// Aggregate combat stats of a player at the moment a session starts.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlayerCombatProfile {
    attack: Attack,
    defense: Defense,
    hp: Health,
    accuracy: Accuracy,
}

impl PlayerCombatProfile {
    #[must_use]
    pub const fn new(attack: Attack, defense: Defense, hp: Health, accuracy: Accuracy) -> Self {
        Self {
            attack,
            defense,
            hp,
            accuracy,
        }
    }

    #[must_use]
    pub const fn attack(&self) -> Attack {
        self.attack
    }

    #[must_use]
    pub const fn defense(&self) -> Defense {
        self.defense
    }

    #[must_use]
    pub const fn hp(&self) -> Health {
        self.hp
    }

    #[must_use]
    pub const fn accuracy(&self) -> Accuracy {
        self.accuracy
    }
}
