//! Shared value objects and error types used across all subdomains.

pub mod errors;
pub mod identifier;
pub mod numeric;
pub mod random;

pub use errors::ValidationError;
pub use identifier::{LocationId, UserId};
pub use numeric::{Accuracy, Attack, CombatLevel, Defense, Health};
pub use random::{RandomSeed, Roll};
