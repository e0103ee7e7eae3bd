//! High-level session orchestrator.
//!
//! The session owns the background workers, wires up command/event channels,
//! and exposes a builder-based API for hosting pages to drive one player's
//! run through one room.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{broadcast, mpsc, watch};
use tokio::task::JoinHandle;
use tracing::{info, warn};

use room_core::{PlayerId, RoomConfig, RoomState};

use crate::api::{Result, RuntimeError, SessionHandle};
use crate::events::{Event, EventBus, Topic};
use crate::repository::{InMemorySnapshotRepository, SnapshotRepository};
use crate::workers::{AutosaveWorker, SessionWorker};

/// Session tuning shared across the orchestrator and workers.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    pub event_buffer_size: usize,
    pub command_buffer_size: usize,
    /// Periodic snapshot interval. `None` (the default) disables auto-save.
    pub autosave_period: Option<Duration>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            event_buffer_size: 100,
            command_buffer_size: 32,
            autosave_period: None,
        }
    }
}

/// One player's live run through one room.
///
/// Design: the session owns workers and coordinates execution;
/// [`SessionHandle`] provides a cloneable façade for clients.
#[derive(Debug)]
pub struct RoomSession {
    handle: SessionHandle,
    worker_handle: JoinHandle<()>,
    autosave_handle: Option<JoinHandle<()>>,
    autosave_stop: Option<watch::Sender<bool>>,
}

impl RoomSession {
    /// Create a new session builder.
    pub fn builder() -> RoomSessionBuilder {
        RoomSessionBuilder::new()
    }

    /// Get a cloneable handle to this session.
    ///
    /// The handle can be shared across clients and async tasks.
    pub fn handle(&self) -> SessionHandle {
        self.handle.clone()
    }

    /// Subscribe to events from a specific topic.
    pub fn subscribe(&self, topic: Topic) -> broadcast::Receiver<Event> {
        self.handle.subscribe(topic)
    }

    /// Shutdown the session gracefully.
    ///
    /// Stops the auto-save timer, closes the command channel, and waits for
    /// the worker's final best-effort save.
    pub async fn shutdown(self) -> Result<()> {
        if let Some(stop) = self.autosave_stop {
            let _ = stop.send(true);
        }
        if let Some(autosave_handle) = self.autosave_handle {
            autosave_handle.await.map_err(RuntimeError::WorkerJoin)?;
        }

        drop(self.handle);

        self.worker_handle.await.map_err(RuntimeError::WorkerJoin)?;

        Ok(())
    }
}

/// Builder for [`RoomSession`] with flexible configuration.
pub struct RoomSessionBuilder {
    session_config: SessionConfig,
    room: Option<RoomConfig>,
    player: Option<PlayerId>,
    repository: Option<Arc<dyn SnapshotRepository>>,
}

impl RoomSessionBuilder {
    fn new() -> Self {
        Self {
            session_config: SessionConfig::default(),
            room: None,
            player: None,
            repository: None,
        }
    }

    /// Set the static room configuration (required).
    pub fn with_room(mut self, room: RoomConfig) -> Self {
        self.room = Some(room);
        self
    }

    /// Set the player owning this session (required).
    pub fn with_player(mut self, player: impl Into<PlayerId>) -> Self {
        self.player = Some(player.into());
        self
    }

    /// Set the snapshot repository. Defaults to an in-memory one.
    pub fn with_repository(mut self, repository: Arc<dyn SnapshotRepository>) -> Self {
        self.repository = Some(repository);
        self
    }

    /// Enable periodic snapshots at the given interval.
    pub fn with_autosave(mut self, period: Duration) -> Self {
        self.session_config.autosave_period = Some(period);
        self
    }

    /// Override buffer sizes and other tuning.
    pub fn with_session_config(mut self, session_config: SessionConfig) -> Self {
        self.session_config = session_config;
        self
    }

    /// Validate the configuration, perform the one best-effort snapshot
    /// load, and spawn the workers.
    pub async fn start(self) -> Result<RoomSession> {
        let room = self.room.ok_or(RuntimeError::MissingRoomConfig)?;
        room.validate()?;
        let player = self.player.ok_or(RuntimeError::MissingPlayer)?;
        let repository = self
            .repository
            .unwrap_or_else(|| Arc::new(InMemorySnapshotRepository::new()));

        let room = Arc::new(room);
        let mut state = RoomState::initialize(&room, player.clone());

        // Exactly one load attempt; absence, mismatch, or a corrupt slot all
        // fall back to the freshly initialized state.
        match repository.load(&room.id, &player) {
            Ok(Some(snapshot)) if snapshot.room_id == room.id => {
                info!(
                    "Resuming {} for {} from snapshot (saved at {})",
                    room.id, player, snapshot.timestamp
                );
                state.absorb_snapshot(snapshot.state);
            }
            Ok(Some(snapshot)) => {
                warn!(
                    "Ignoring snapshot for room {} in slot for {}",
                    snapshot.room_id, room.id
                );
            }
            Ok(None) => {}
            Err(error) => {
                warn!("Snapshot load failed, starting fresh: {}", error);
            }
        }

        let event_bus = EventBus::with_capacity(self.session_config.event_buffer_size);
        let (command_tx, command_rx) = mpsc::channel(self.session_config.command_buffer_size);

        let worker = SessionWorker::new(
            Arc::clone(&room),
            state,
            repository,
            command_rx,
            event_bus.clone(),
        );
        let worker_handle = tokio::spawn(worker.run());

        let (autosave_handle, autosave_stop) =
            if let Some(period) = self.session_config.autosave_period {
                let (stop_tx, stop_rx) = watch::channel(false);
                let autosave = AutosaveWorker::new(period, command_tx.clone(), stop_rx);
                (Some(tokio::spawn(autosave.run())), Some(stop_tx))
            } else {
                (None, None)
            };

        let handle = SessionHandle::new(command_tx, event_bus);

        Ok(RoomSession {
            handle,
            worker_handle,
            autosave_handle,
            autosave_stop,
        })
    }
}
