//! # Client Connection Management
//!
//! The roster of connected clients, in join order, each with its role,
//! optional display name and outbound sink.
//!
//! ## Delivery
//!
//! Sends never block. A sink that reports full or closed is closed and the
//! client is marked dropped; no further messages are attempted. The gateway
//! then sees the socket end and enqueues the usual leave.

use gridduel_shared::{Role, ServerMessage};

use crate::traits::ClientSink;

/// Unique identifier for a client connection.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ConnectionId(pub u64);

impl std::fmt::Display for ConnectionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A connected client.
pub struct ClientConnection {
    /// Connection ID.
    pub id: ConnectionId,
    /// Current role.
    pub role: Role,
    /// Display name, once set.
    pub name: Option<String>,
    sink: Box<dyn ClientSink>,
    dropped: bool,
}

impl ClientConnection {
    /// Creates a connection with no name.
    #[must_use]
    pub fn new(id: ConnectionId, role: Role, sink: Box<dyn ClientSink>) -> Self {
        Self {
            id,
            role,
            name: None,
            sink,
            dropped: false,
        }
    }

    /// How notices refer to this client: `ada (player_a)` or `player_a`.
    #[must_use]
    pub fn label(&self) -> String {
        match &self.name {
            Some(name) => format!("{name} ({})", self.role),
            None => self.role.to_string(),
        }
    }

    /// Returns true once the outbound path has failed.
    #[must_use]
    pub const fn is_dropped(&self) -> bool {
        self.dropped
    }

    /// Queues a message. A failed queue drops the client.
    ///
    /// Returns false if the message was not queued.
    pub fn send(&mut self, message: &ServerMessage) -> bool {
        if self.dropped {
            return false;
        }
        match self.sink.deliver(message) {
            Ok(()) => true,
            Err(err) => {
                tracing::warn!("Dropping client {} ({}): {}", self.id, self.role, err);
                self.dropped = true;
                self.sink.close();
                false
            }
        }
    }

    /// Asks the transport to close.
    pub fn close(&mut self) {
        self.dropped = true;
        self.sink.close();
    }
}

impl std::fmt::Debug for ClientConnection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientConnection")
            .field("id", &self.id)
            .field("role", &self.role)
            .field("name", &self.name)
            .field("dropped", &self.dropped)
            .finish_non_exhaustive()
    }
}

/// Connected clients, in join order.
#[derive(Debug)]
pub struct Roster {
    clients: Vec<ClientConnection>,
    capacity: usize,
}

impl Roster {
    /// Creates an empty roster.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        Self {
            clients: Vec::with_capacity(capacity),
            capacity,
        }
    }

    /// Maximum number of clients.
    #[must_use]
    pub const fn capacity(&self) -> usize {
        self.capacity
    }

    /// Number of connected clients.
    #[must_use]
    pub fn len(&self) -> usize {
        self.clients.len()
    }

    /// Returns true when nobody is connected.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.clients.is_empty()
    }

    /// Returns true when no more clients are admitted.
    #[must_use]
    pub fn is_full(&self) -> bool {
        self.clients.len() >= self.capacity
    }

    /// Returns true if `id` is connected.
    #[must_use]
    pub fn contains(&self, id: ConnectionId) -> bool {
        self.get(id).is_some()
    }

    /// Appends a client. Callers check [`Roster::is_full`] first.
    pub fn add(&mut self, client: ClientConnection) {
        self.clients.push(client);
    }

    /// Removes a client, preserving the order of the rest.
    pub fn remove(&mut self, id: ConnectionId) -> Option<ClientConnection> {
        let index = self.clients.iter().position(|c| c.id == id)?;
        Some(self.clients.remove(index))
    }

    /// Gets a client by ID.
    #[must_use]
    pub fn get(&self, id: ConnectionId) -> Option<&ClientConnection> {
        self.clients.iter().find(|c| c.id == id)
    }

    /// Gets a mutable client reference.
    pub fn get_mut(&mut self, id: ConnectionId) -> Option<&mut ClientConnection> {
        self.clients.iter_mut().find(|c| c.id == id)
    }

    /// Clients in join order.
    pub fn iter(&self) -> impl Iterator<Item = &ClientConnection> {
        self.clients.iter()
    }

    /// Clients in join order, mutably.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut ClientConnection> {
        self.clients.iter_mut()
    }

    /// Longest-connected spectator.
    #[must_use]
    pub fn first_spectator(&self) -> Option<ConnectionId> {
        self.clients.iter().find(|c| c.role == Role::Spectator).map(|c| c.id)
    }

    /// Sends to one client. Unknown IDs are ignored.
    pub fn send(&mut self, id: ConnectionId, message: &ServerMessage) {
        if let Some(client) = self.get_mut(id) {
            client.send(message);
        }
    }

    /// Sends to every client. Returns how many were reached.
    pub fn broadcast(&mut self, message: &ServerMessage) -> usize {
        self.clients.iter_mut().map(|c| c.send(message)).filter(|&sent| sent).count()
    }
}
