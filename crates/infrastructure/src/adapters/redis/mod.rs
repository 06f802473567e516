//! Redis adapters.
//!
//! Redis holds the combat session cache under `session:{combat_id}` keys
//! with the session TTL. The cache is purely an optimization: every adapter
//! operation swallows transport errors (logging them) and lets the caller
//! fall back to MySQL.

mod cache;
mod config;
mod connection;
mod factory;

pub use cache::RedisSessionCache;
pub use config::RedisConfig;
pub use connection::RedisConnection;
pub use factory::RedisConnectionFactory;
