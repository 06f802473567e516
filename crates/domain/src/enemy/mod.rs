//! Enemy catalog types.
//!
//! Enemy base stats, power tier, and visual style come from the external
//! content catalog; this module defines the shapes the combat core consumes
//! plus the combat-level scaling applied when a session spawns an enemy.

pub mod enemy_type;
pub mod identifier;
pub mod style;
pub mod tier;

pub use enemy_type::{EnemyName, EnemyType, ScaledEnemyStats};
pub use identifier::EnemyTypeId;
pub use style::StyleId;
pub use tier::EnemyTier;
