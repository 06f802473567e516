//! API layer for the skirmish combat resolution engine
//!
//! Axum HTTP surface over the combat provider: routes, handlers, DTOs,
//! error mapping, and middleware.

pub mod dto;
pub mod errors;
pub mod handlers;
pub mod middleware;
pub mod routes;
pub mod server;
pub mod state;
