//! Room registry — tracks which connections belong to which room and
//! fans out messages to room members.

use std::collections::HashSet;
use std::sync::Arc;

use dashmap::DashMap;
use tracing::{debug, warn};

use crate::connection::{ConnectionHandle, ConnectionId};

/// Registry of all active rooms.
///
/// A room is identified by its project id and exists only while it has
/// members. Per-room mutual exclusion comes from the map's per-entry
/// locking; broadcasts snapshot the member set before sending so the set
/// is never iterated while being mutated.
#[derive(Debug, Default)]
pub struct RoomRegistry {
    /// Room id → member connection ids.
    rooms: DashMap<i64, HashSet<ConnectionId>>,
    /// Connection id → handle, for delivery.
    connections: DashMap<ConnectionId, Arc<ConnectionHandle>>,
}

impl RoomRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self {
            rooms: DashMap::new(),
            connections: DashMap::new(),
        }
    }

    /// Register a connection as a member of a room, creating the room on
    /// first join.
    pub fn join(&self, room_id: i64, handle: Arc<ConnectionHandle>) {
        let conn_id = handle.id;
        self.connections.insert(conn_id, handle);
        self.rooms.entry(room_id).or_default().insert(conn_id);

        debug!(room_id, conn_id = %conn_id, "Connection joined room");
    }

    /// Remove a connection from a room. Idempotent — removing a
    /// connection that is not a member is a no-op. The room entry is
    /// dropped when its member set becomes empty.
    pub fn leave(&self, room_id: i64, conn_id: ConnectionId) {
        if let Some(mut members) = self.rooms.get_mut(&room_id) {
            members.remove(&conn_id);
            if members.is_empty() {
                drop(members);
                self.rooms.remove(&room_id);
            }
        }
        self.connections.remove(&conn_id);

        debug!(room_id, conn_id = %conn_id, "Connection left room");
    }

    /// Deliver `message` to every member of the room except `exclude`.
    ///
    /// The member set is snapshotted before sending. A recipient whose
    /// send fails is logged and marked dead — its own socket task is
    /// responsible for the eventual `leave` — and delivery to the
    /// remaining members proceeds regardless. Returns the number of
    /// successful deliveries.
    pub fn broadcast(&self, room_id: i64, message: &str, exclude: Option<ConnectionId>) -> usize {
        let snapshot: Vec<ConnectionId> = match self.rooms.get(&room_id) {
            Some(members) => members.iter().copied().collect(),
            None => return 0,
        };

        let mut delivered = 0;
        for conn_id in snapshot {
            if Some(conn_id) == exclude {
                continue;
            }
            let Some(handle) = self.connections.get(&conn_id).map(|h| h.value().clone()) else {
                continue;
            };
            if handle.send(message.to_string()) {
                delivered += 1;
            } else {
                warn!(room_id, conn_id = %conn_id, "Broadcast delivery failed");
            }
        }
        delivered
    }

    /// Current members of a room. Empty when the room does not exist.
    pub fn members(&self, room_id: i64) -> Vec<ConnectionId> {
        self.rooms
            .get(&room_id)
            .map(|members| members.iter().copied().collect())
            .unwrap_or_default()
    }

    /// Whether the room currently exists (has at least one member).
    pub fn contains_room(&self, room_id: i64) -> bool {
        self.rooms.contains_key(&room_id)
    }

    /// Number of live rooms.
    pub fn room_count(&self) -> usize {
        self.rooms.len()
    }

    /// Number of registered connections across all rooms.
    pub fn connection_count(&self) -> usize {
        self.connections.len()
    }

    /// Tear down the registry: mark every connection dead and drop all
    /// rooms. Called once at server shutdown.
    pub fn close_all(&self) {
        for entry in self.connections.iter() {
            entry.value().mark_dead();
        }
        self.connections.clear();
        self.rooms.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::sync::mpsc;

    fn peer(buffer: usize) -> (Arc<ConnectionHandle>, mpsc::Receiver<String>) {
        let (tx, rx) = mpsc::channel(buffer);
        (Arc::new(ConnectionHandle::new(None, tx)), rx)
    }

    #[tokio::test]
    async fn membership_tracks_joins_and_leaves() {
        let registry = RoomRegistry::new();
        let (a, _rx_a) = peer(8);
        let (b, _rx_b) = peer(8);

        registry.join(7, a.clone());
        registry.join(7, b.clone());
        assert_eq!(registry.members(7).len(), 2);

        registry.leave(7, a.id);
        assert_eq!(registry.members(7), vec![b.id]);

        // Removing a connection that already left is a no-op.
        registry.leave(7, a.id);
        assert_eq!(registry.members(7), vec![b.id]);
    }

    #[tokio::test]
    async fn empty_room_is_removed_entirely() {
        let registry = RoomRegistry::new();
        let (a, _rx) = peer(8);

        registry.join(42, a.clone());
        assert!(registry.contains_room(42));

        registry.leave(42, a.id);
        assert!(!registry.contains_room(42));
        assert_eq!(registry.room_count(), 0);
        assert_eq!(registry.connection_count(), 0);
    }

    #[tokio::test]
    async fn broadcast_excludes_sender_and_reaches_everyone_else() {
        let registry = RoomRegistry::new();
        let (a, mut rx_a) = peer(8);
        let (b, mut rx_b) = peer(8);
        let (c, mut rx_c) = peer(8);

        registry.join(42, a.clone());
        registry.join(42, b.clone());
        registry.join(42, c.clone());

        let delivered = registry.broadcast(42, "M", Some(a.id));
        assert_eq!(delivered, 2);
        assert_eq!(rx_b.recv().await.unwrap(), "M");
        assert_eq!(rx_c.recv().await.unwrap(), "M");
        assert!(rx_a.try_recv().is_err());

        registry.leave(42, c.id);
        let delivered = registry.broadcast(42, "N", Some(a.id));
        assert_eq!(delivered, 1);
        assert_eq!(rx_b.recv().await.unwrap(), "N");
        assert!(rx_c.try_recv().is_err());
    }

    #[tokio::test]
    async fn broadcast_to_missing_room_delivers_nothing() {
        let registry = RoomRegistry::new();
        assert_eq!(registry.broadcast(999, "hello", None), 0);
    }

    #[tokio::test]
    async fn dead_recipient_does_not_stop_the_broadcast() {
        let registry = RoomRegistry::new();
        let (a, _rx_a) = peer(8);
        let (b, rx_b) = peer(8);
        let (c, mut rx_c) = peer(8);

        registry.join(1, a.clone());
        registry.join(1, b.clone());
        registry.join(1, c.clone());

        // b's peer is gone; its channel is closed.
        drop(rx_b);

        let delivered = registry.broadcast(1, "still flowing", Some(a.id));
        assert_eq!(delivered, 1);
        assert_eq!(rx_c.recv().await.unwrap(), "still flowing");
        assert!(!b.is_alive());
    }

    #[tokio::test]
    async fn rooms_are_isolated() {
        let registry = RoomRegistry::new();
        let (a, mut rx_a) = peer(8);
        let (b, mut rx_b) = peer(8);

        registry.join(1, a.clone());
        registry.join(2, b.clone());

        registry.broadcast(1, "room one only", None);
        assert_eq!(rx_a.recv().await.unwrap(), "room one only");
        assert!(rx_b.try_recv().is_err());
    }

    #[tokio::test]
    async fn close_all_clears_everything() {
        let registry = RoomRegistry::new();
        let (a, _rx_a) = peer(8);
        let (b, _rx_b) = peer(8);

        registry.join(1, a.clone());
        registry.join(2, b.clone());

        registry.close_all();
        assert_eq!(registry.room_count(), 0);
        assert_eq!(registry.connection_count(), 0);
        assert!(!a.is_alive());
        assert!(!b.is_alive());
    }
}
