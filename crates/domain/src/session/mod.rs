//! Combat session aggregate, lifecycle events, and errors.

pub mod aggregate;
pub mod errors;
pub mod events;
pub mod identifier;
pub mod status;

pub use aggregate::CombatSession;
pub use errors::SessionError;
pub use events::{CombatLogEvent, CombatLogEventKind, LogActor};
pub use identifier::CombatId;
pub use status::CombatOutcome;
