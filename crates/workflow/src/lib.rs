//! Workflow layer for the skirmish combat resolution engine
//!
//! This crate orchestrates the pure domain functions into the session
//! lifecycle operations: start, attack, complete, and the expiry sweep.
//! All effects go through the port traits in [`ports`]; the infrastructure
//! crate supplies the production adapters.

pub mod errors;
pub mod ports;
pub mod workflows;

#[cfg(test)]
pub(crate) mod testing;

pub use errors::WorkflowError;
pub use ports::{
    Clock, CombatLogStore, ContentCatalog, HistoryRepository, RandomGenerator, SessionCache,
    SessionRepository, WorkflowResult,
};
pub use workflows::attack::{AttackCommand, AttackReport, attack};
pub use workflows::complete::{CompleteCommand, CompletionReport, complete};
pub use workflows::lookup::{fetch_history, fetch_session};
pub use workflows::start_combat::{StartCombatCommand, start_combat};
pub use workflows::sweep::sweep_expired;
