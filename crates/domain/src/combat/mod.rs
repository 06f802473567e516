//! Combat resolution primitives.
//!
//! A timed tap resolves in three pure steps:
//!
//! 1. [`bands`] scales the equipped weapon's hit-zone arcs by the player's
//!    accuracy into a full 360 degree partition.
//! 2. [`zone`] locates the tap on that partition, classifying it as one of
//!    the five hit zones.
//! 3. [`damage`] turns the zone into damage dealt and damage taken,
//!    including the enemy counterattack.

pub mod bands;
pub mod damage;
pub mod errors;
pub mod zone;

pub use bands::{AdjustedBands, WeaponBandConfig};
pub use damage::{AttackResolution, CombatantStats, resolve_attack};
pub use errors::BandConfigError;
pub use zone::{HitZone, TapPosition, resolve_zone};
