//! Request and response shapes for the HTTP API.

pub mod request;
pub mod response;
