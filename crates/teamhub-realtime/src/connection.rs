//! Individual socket connection handle.

use std::sync::atomic::{AtomicBool, Ordering};

use tokio::sync::mpsc;
use uuid::Uuid;

/// Unique connection identifier.
pub type ConnectionId = Uuid;

/// A handle to one live socket connection.
///
/// Holds the sender half of the connection's outbound queue; the socket
/// task owns the receiver and forwards queued text frames to the peer.
/// The handle stays valid after the peer drops — sends then fail and the
/// handle is marked dead until the registry reaps it via `leave`.
#[derive(Debug)]
pub struct ConnectionHandle {
    /// Unique connection ID.
    pub id: ConnectionId,
    /// The authenticated user behind the connection, when known.
    /// Voice-signaling connections may be anonymous at the transport level.
    pub user_id: Option<i64>,
    /// Sender for outbound text frames.
    sender: mpsc::Sender<String>,
    /// Whether the connection is still deliverable.
    alive: AtomicBool,
}

impl ConnectionHandle {
    /// Create a new connection handle.
    pub fn new(user_id: Option<i64>, sender: mpsc::Sender<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id,
            sender,
            alive: AtomicBool::new(true),
        }
    }

    /// Queue an outbound text frame for this connection.
    ///
    /// Returns `false` when the frame could not be queued. A closed
    /// channel (peer gone) marks the connection dead; a full buffer drops
    /// the frame but keeps the connection, since the peer may catch up.
    pub fn send(&self, text: String) -> bool {
        if !self.is_alive() {
            return false;
        }
        match self.sender.try_send(text) {
            Ok(()) => true,
            Err(mpsc::error::TrySendError::Full(_)) => {
                tracing::warn!(conn_id = %self.id, "Send buffer full, dropping frame");
                false
            }
            Err(mpsc::error::TrySendError::Closed(_)) => {
                self.mark_dead();
                false
            }
        }
    }

    /// Whether the connection is still deliverable.
    pub fn is_alive(&self) -> bool {
        self.alive.load(Ordering::SeqCst)
    }

    /// Mark the connection as dead. Idempotent.
    pub fn mark_dead(&self) {
        self.alive.store(false, Ordering::SeqCst);
    }
}
