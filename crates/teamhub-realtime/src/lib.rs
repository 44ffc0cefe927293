//! # teamhub-realtime
//!
//! The in-process realtime layer: a registry of rooms (keyed by project id)
//! holding live socket connections, with broadcast-excluding-sender fan-out.
//! Used by both chat rooms and WebRTC voice-signaling rooms.
//!
//! Rooms are ephemeral — created on first join, removed when the last
//! member leaves. There is no buffering or replay: a dropped connection
//! must rejoin, and traffic sent during the gap is lost.

pub mod connection;
pub mod message;
pub mod registry;

pub use connection::{ConnectionHandle, ConnectionId};
pub use message::{ChatInbound, RoomEvent};
pub use registry::RoomRegistry;
