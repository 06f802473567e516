//! Providers for the skirmish combat resolution engine
//!
//! This crate bundles the workflow ports into a [`CombatService`] facade the
//! API layer consumes as a trait object, keeping handler signatures free of
//! the seven-way port generics.

pub mod workflows;

pub use workflows::combat::{CombatProvider, CombatService};
