//! Loot generation.
//!
//! Victory loot is drawn from the location's aggregated loot pools. Material
//! candidates are re-weighted by the defeated enemy's power tier before the
//! draw; item candidates never are. Drawn materials inherit the enemy's style
//! verbatim, items carry none.

pub mod identifier;

pub use identifier::LootableId;

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::common::Roll;
use crate::enemy::{EnemyTier, StyleId};
use crate::selection::draw_weighted;

// =============================================================================
// LootKind
// =============================================================================

/// Category of a lootable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LootKind {
    /// Crafting material; tier-scaled and style-inheriting.
    Material,

    /// Equipment or consumable item; never tier-scaled, never styled.
    Item,
}

impl LootKind {
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Material => "material",
            Self::Item => "item",
        }
    }
}

impl fmt::Display for LootKind {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "{}", self.name())
    }
}

// =============================================================================
// LootCandidate
// =============================================================================

/// One entry of the merged loot pool, pre tier scaling.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LootCandidate {
    lootable: LootableId,
    kind: LootKind,
    weight: f64,
}

impl LootCandidate {
    #[must_use]
    pub const fn new(lootable: LootableId, kind: LootKind, weight: f64) -> Self {
        Self {
            lootable,
            kind,
            weight,
        }
    }

    #[must_use]
    pub const fn lootable(&self) -> &LootableId {
        &self.lootable
    }

    #[must_use]
    pub const fn kind(&self) -> LootKind {
        self.kind
    }

    #[must_use]
    pub const fn weight(&self) -> f64 {
        self.weight
    }
}

// =============================================================================
// TierWeight
// =============================================================================

/// Multiplier applied to material candidate weights for one enemy tier.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TierWeight {
    tier: EnemyTier,
    multiplier: f64,
}

impl TierWeight {
    #[must_use]
    pub const fn new(tier: EnemyTier, multiplier: f64) -> Self {
        Self { tier, multiplier }
    }

    #[must_use]
    pub const fn tier(&self) -> EnemyTier {
        self.tier
    }

    #[must_use]
    pub const fn multiplier(&self) -> f64 {
        self.multiplier
    }
}

/// Finds the multiplier for a tier; tiers without an entry stay unscaled.
fn tier_multiplier(tier_weights: &[TierWeight], tier: EnemyTier) -> f64 {
    tier_weights
        .iter()
        .find(|entry| entry.tier() == tier)
        .map_or(1.0, TierWeight::multiplier)
}

// =============================================================================
// LootDrop
// =============================================================================

/// One generated drop. Ephemeral output; the inventory service owns what
/// happens to it next.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LootDrop {
    kind: LootKind,
    lootable: LootableId,
    style: Option<StyleId>,
    quantity: u32,
}

impl LootDrop {
    #[must_use]
    pub const fn kind(&self) -> LootKind {
        self.kind
    }

    #[must_use]
    pub const fn lootable(&self) -> &LootableId {
        &self.lootable
    }

    #[must_use]
    pub const fn style(&self) -> Option<&StyleId> {
        self.style.as_ref()
    }

    #[must_use]
    pub const fn quantity(&self) -> u32 {
        self.quantity
    }
}

// =============================================================================
// Generation
// =============================================================================

/// Draws loot from a merged candidate pool.
///
/// One independent draw is made per supplied roll, with replacement:
/// repeated draws of the same candidate are expected and accumulate into the
/// drop's quantity. Material weights are multiplied by the tier weight
/// matching the defeated enemy's tier before drawing; item weights pass
/// through untouched.
///
/// Returns an empty list when there are no candidates, no rolls, or no
/// positive weight left after tier scaling. Loot generation never fails: a
/// sub-type whose weights all vanish is simply unreachable for the draw.
#[must_use]
pub fn generate_loot(
    candidates: &[LootCandidate],
    tier_weights: &[TierWeight],
    enemy_tier: EnemyTier,
    enemy_style: &StyleId,
    rolls: &[Roll],
) -> Vec<LootDrop> {
    if candidates.is_empty() || rolls.is_empty() {
        return Vec::new();
    }

    let multiplier = tier_multiplier(tier_weights, enemy_tier);
    let weighted: Vec<(usize, f64)> = candidates
        .iter()
        .enumerate()
        .map(|(index, candidate)| {
            let weight = match candidate.kind() {
                LootKind::Material => candidate.weight() * multiplier,
                LootKind::Item => candidate.weight(),
            };
            (index, weight.max(0.0))
        })
        .collect();

    let mut drops: Vec<LootDrop> = Vec::new();

    for roll in rolls {
        let Ok(index) = draw_weighted(&weighted, *roll) else {
            // Nothing reachable in the pool; an empty result, not an error.
            return Vec::new();
        };
        let candidate = &candidates[*index];

        let style = match candidate.kind() {
            LootKind::Material => Some(enemy_style.clone()),
            LootKind::Item => None,
        };

        match drops
            .iter_mut()
            .find(|drop| drop.lootable == candidate.lootable && drop.kind == candidate.kind())
        {
            Some(existing) => existing.quantity += 1,
            None => drops.push(LootDrop {
                kind: candidate.kind(),
                lootable: candidate.lootable,
                style,
                quantity: 1,
            }),
        }
    }

    drops
}

// =============================================================================
// Tests
// =============================================================================
