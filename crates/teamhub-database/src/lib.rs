//! # teamhub-database
//!
//! PostgreSQL connection management and concrete repository
//! implementations for all TeamHub entities.

pub mod connection;
pub mod migration;
pub mod repositories;

pub use connection::create_pool;
