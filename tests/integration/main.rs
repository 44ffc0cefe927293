//! End-to-end tests driving the real router against PostgreSQL.
//!
//! These need a reachable database (TEAMHUB_TEST_DATABASE_URL or the
//! default local URL) and are `#[ignore]`d so the default suite passes
//! without infrastructure. Run them with `cargo test -- --ignored`.

mod helpers;

mod auth_flow;
mod board_flow;
mod file_flow;
