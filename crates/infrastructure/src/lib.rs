//! Infrastructure layer for the skirmish combat resolution engine
//!
//! This crate provides concrete implementations of the ports defined in the
//! workflow layer. It handles all external I/O: MySQL for durable session,
//! log, history, and catalog state, Redis for the session cache, plus the
//! system random generator and clock.

pub mod adapters;
pub mod errors;
