//! HTTP handlers.

pub mod combat;
pub mod health;
pub mod history;

pub use combat::{attack, complete_combat, get_combat, start_combat, sweep_expired};
pub use health::health_check;
pub use history::get_history;
