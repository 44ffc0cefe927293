//! # teamhub-api
//!
//! The HTTP and WebSocket surface: axum router, handlers, DTOs, the
//! cookie-session extractor, and middleware. Handlers stay thin — they
//! parse input, call one service, and shape the response.

pub mod dto;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod state;

pub use error::ApiError;
pub use router::build_router;
pub use state::AppState;
