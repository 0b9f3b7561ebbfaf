//! # Actor Runtime
//!
//! Runs the [`GameActor`] on a dedicated thread behind an unbounded queue.
//!
//! ## Architecture
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────┐
//! │                      GRIDDUEL SERVER                       │
//! ├────────────────────────────────────────────────────────────┤
//! │  ┌──────────────┐   Action    ┌──────────────┐             │
//! │  │ WS sessions  │────────────▶│ Game actor   │             │
//! │  │ (tokio)      │  (queue)    │ (own thread) │             │
//! │  └──────▲───────┘             └──────┬───────┘             │
//! │         │      ServerMessage (per-client bounded queue)   │
//! │         └────────────────────────────┘                    │
//! └────────────────────────────────────────────────────────────┘
//! ```

mod action;
mod actor;
pub mod connection;
mod stats;

pub use action::Action;
pub use actor::GameActor;
pub use connection::{ClientConnection, ConnectionId, Roster};
pub use stats::ActorStats;

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::thread::JoinHandle;

use crossbeam_channel::{unbounded, Sender};

use crate::config::ServerConfig;
use crate::traits::{ClientSink, Dice};

/// Cloneable entry point into the actor's queue.
///
/// Also hands out connection IDs, so every session gets a unique one.
#[derive(Clone, Debug)]
pub struct ActionSender {
    tx: Sender<Action>,
    next_id: Arc<AtomicU64>,
}

impl ActionSender {
    /// Allocates an ID and enqueues its join.
    ///
    /// Returns `None` once the actor has stopped.
    pub fn connect(&self, sink: Box<dyn ClientSink>) -> Option<ConnectionId> {
        let id = ConnectionId(self.next_id.fetch_add(1, Ordering::Relaxed));
        self.send(Action::Join { id, sink }).then_some(id)
    }

    /// Enqueues an action. Returns false once the actor has stopped.
    pub fn send(&self, action: Action) -> bool {
        self.tx.send(action).is_ok()
    }
}

/// Owner of the actor thread.
pub struct ActorHandle {
    sender: ActionSender,
    thread: Option<JoinHandle<ActorStats>>,
}

impl ActorHandle {
    /// A sender for sessions.
    #[must_use]
    pub fn sender(&self) -> ActionSender {
        self.sender.clone()
    }

    /// Asks the actor to stop after what is already queued, then waits.
    ///
    /// Returns the final statistics, or `None` if the actor thread panicked.
    pub fn shutdown(mut self) -> Option<ActorStats> {
        self.sender.send(Action::Shutdown);
        self.thread.take().and_then(|thread| thread.join().ok())
    }
}

impl Drop for ActorHandle {
    fn drop(&mut self) {
        if let Some(thread) = self.thread.take() {
            self.sender.send(Action::Shutdown);
            if thread.join().is_err() {
                tracing::error!("Game actor panicked");
            }
        }
    }
}

/// Starts the actor on its own thread.
///
/// # Errors
///
/// Returns an error if the OS refuses to spawn the thread.
pub fn spawn_actor<D>(config: &ServerConfig, dice: D) -> std::io::Result<ActorHandle>
where
    D: Dice + 'static,
{
    let (tx, rx) = unbounded();
    let actor = GameActor::new(config, dice);
    let thread = std::thread::Builder::new()
        .name("game-actor".into())
        .spawn(move || actor.run(&rx))?;

    Ok(ActorHandle {
        sender: ActionSender {
            tx,
            next_id: Arc::new(AtomicU64::new(1)),
        },
        thread: Some(thread),
    })
}
