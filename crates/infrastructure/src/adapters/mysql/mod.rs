//! MySQL adapters.
//!
//! Durable state lives in MySQL (schema in `migrations/`):
//!
//! - `combat_sessions` backs [`MySqlSessionRepository`]; a unique index on a
//!   generated active-user column enforces the one-active-session invariant,
//!   and updates are compare-and-set on the event sequence.
//! - `combat_log_events` backs [`MySqlCombatLogStore`]; a unique
//!   (combat, sequence) key makes the log append-only and gap-checked.
//! - `player_combat_history` backs [`MySqlHistoryRepository`].
//! - The catalog tables back [`MySqlContentCatalog`] read-only.

mod catalog;
mod config;
mod event_log;
mod factory;
mod history_repository;
mod pool;
mod session_repository;

pub use catalog::MySqlContentCatalog;
pub use config::MySqlPoolConfig;
pub use event_log::MySqlCombatLogStore;
pub use factory::MySqlPoolFactory;
pub use history_repository::MySqlHistoryRepository;
pub use pool::MySqlPool;
pub use session_repository::MySqlSessionRepository;
