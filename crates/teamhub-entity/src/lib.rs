//! # teamhub-entity
//!
//! Entity models mapping one-to-one onto the TeamHub database schema.
//! Every struct derives `sqlx::FromRow` and serde traits; `CreateX`
//! companions carry the caller-supplied fields for inserts.

pub mod activity;
pub mod board;
pub mod chat;
pub mod file;
pub mod post;
pub mod schedule;
pub mod session;
pub mod user;
pub mod workspace;
