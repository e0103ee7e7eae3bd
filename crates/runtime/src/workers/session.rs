//! Session worker that owns the authoritative [`room_core::RoomState`].
//!
//! Receives commands from [`crate::api::SessionHandle`], executes them via
//! [`room_core::RoomEngine`], and publishes events to the EventBus. Routing
//! every mutation through this single-writer loop is what serializes
//! concurrent callers; the engine itself holds no lock.

use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

use tokio::sync::{mpsc, oneshot};
use tracing::{debug, info, warn};

use room_core::{
    Clue, CommandResult, ElementId, ElementState, ExecutionOutcome, InventoryItem, RoomConfig,
    RoomEngine, RoomEnv, RoomProgress, RoomSnapshot, RoomState, SolveOutcome, Timestamp,
};

use crate::api::{Result, RuntimeError};
use crate::events::{Event, EventBus, ProgressUpdate, RoomEvent, RoomResults};
use crate::repository::SnapshotRepository;

/// Commands that can be sent to the session worker.
pub(crate) enum Command {
    /// Execute a room command through the engine.
    Execute {
        command: room_core::Command,
        reply: oneshot::Sender<Result<ExecutionOutcome>>,
    },
    /// Query the full room state (read-only).
    QueryState { reply: oneshot::Sender<RoomState> },
    /// Progress-only view.
    QueryProgress { reply: oneshot::Sender<RoomProgress> },
    /// Clues-only view.
    QueryClues { reply: oneshot::Sender<Vec<Clue>> },
    /// Inventory-only view.
    QueryInventory {
        reply: oneshot::Sender<Vec<InventoryItem>>,
    },
    /// Single-element view.
    QueryElement {
        element: ElementId,
        reply: oneshot::Sender<Option<ElementState>>,
    },
    /// Last soft failure recorded on the session, if any.
    QueryLastError {
        reply: oneshot::Sender<Option<String>>,
    },
    /// Persist the current state. `reply` is `None` on auto-save ticks.
    Save {
        reply: Option<oneshot::Sender<Result<()>>>,
    },
    /// Merge a snapshot over the current state.
    Restore {
        snapshot: RoomSnapshot,
        reply: oneshot::Sender<Result<()>>,
    },
    /// Persist, then stop the worker.
    Exit { reply: oneshot::Sender<Result<()>> },
}

/// Background task that processes session commands.
pub(crate) struct SessionWorker {
    config: Arc<RoomConfig>,
    state: RoomState,
    repository: Arc<dyn SnapshotRepository>,
    command_rx: mpsc::Receiver<Command>,
    event_bus: EventBus,
    /// Completion guard: [`RoomEvent::RoomCompleted`] fires at most once per
    /// run, no matter how many mutations follow.
    has_completed: bool,
    /// Last soft failure, kept for diagnostics.
    last_error: Option<String>,
}

impl SessionWorker {
    pub(crate) fn new(
        config: Arc<RoomConfig>,
        state: RoomState,
        repository: Arc<dyn SnapshotRepository>,
        command_rx: mpsc::Receiver<Command>,
        event_bus: EventBus,
    ) -> Self {
        // A restored run that already finished must not re-announce
        // completion.
        let has_completed = state.is_complete();

        info!(
            "SessionWorker initialized: room={}, player={}, elements={}",
            state.room_id,
            state.player_id,
            state.total_elements()
        );

        Self {
            config,
            state,
            repository,
            command_rx,
            event_bus,
            has_completed,
            last_error: None,
        }
    }

    /// Main worker loop.
    pub(crate) async fn run(mut self) {
        let mut exited = false;
        loop {
            tokio::select! {
                Some(cmd) = self.command_rx.recv() => {
                    if self.handle_command(cmd) {
                        exited = true;
                        break;
                    }
                }
                else => break,
            }
        }

        if !exited {
            // Handle dropped without an explicit exit; keep whatever
            // progress the player made.
            let _ = self.persist();
        }

        info!("SessionWorker stopped: room={}", self.state.room_id);
    }

    /// Handles one command. Returns true when the worker should stop.
    fn handle_command(&mut self, cmd: Command) -> bool {
        match cmd {
            Command::Execute { command, reply } => {
                let result = self.handle_execute(&command);
                if reply.send(result).is_err() {
                    debug!("Execute reply channel closed (caller dropped)");
                }
            }
            Command::QueryState { reply } => {
                if reply.send(self.state.clone()).is_err() {
                    debug!("QueryState reply channel closed (caller dropped)");
                }
            }
            Command::QueryProgress { reply } => {
                let _ = reply.send(self.state.progress());
            }
            Command::QueryClues { reply } => {
                let _ = reply.send(self.state.clues().to_vec());
            }
            Command::QueryInventory { reply } => {
                let _ = reply.send(self.state.inventory().to_vec());
            }
            Command::QueryElement { element, reply } => {
                let _ = reply.send(self.state.element(&element).cloned());
            }
            Command::QueryLastError { reply } => {
                let _ = reply.send(self.last_error.clone());
            }
            Command::Save { reply } => {
                let result = self.persist();
                if let Some(reply) = reply {
                    let _ = reply.send(result);
                }
            }
            Command::Restore { snapshot, reply } => {
                let result = self.handle_restore(snapshot);
                let _ = reply.send(result);
            }
            Command::Exit { reply } => {
                let result = self.persist();
                let _ = reply.send(result);
                return true;
            }
        }
        false
    }

    fn handle_execute(&mut self, command: &room_core::Command) -> Result<ExecutionOutcome> {
        let now = wall_clock();
        let env = RoomEnv::new(&self.config, now);

        match RoomEngine::new(&mut self.state).execute(env, command) {
            Ok(outcome) => {
                debug!(
                    "Executed {}: progress {:.1}%",
                    command.name(),
                    outcome.progress.percentage
                );
                self.publish_outcome(&outcome);
                Ok(outcome)
            }
            Err(error) => {
                if error.severity().is_internal() {
                    // Configuration drift or state corruption: record it and
                    // tell subscribers, but keep the session usable.
                    self.last_error = Some(error.to_string());
                    self.event_bus
                        .publish(Event::Room(RoomEvent::SessionError {
                            message: error.to_string(),
                        }));
                }
                warn!("Command {} rejected: {}", command.name(), error);
                Err(RuntimeError::Engine(error))
            }
        }
    }

    fn publish_outcome(&mut self, outcome: &ExecutionOutcome) {
        match &outcome.result {
            CommandResult::Interact { element, attempts } => {
                self.event_bus
                    .publish(Event::Room(RoomEvent::ElementInteraction {
                        element: element.clone(),
                        attempts: *attempts,
                    }));
            }
            CommandResult::Unlock { unlocked } => {
                self.publish_unlocks(unlocked);
            }
            CommandResult::Solve { element, outcome } => {
                self.publish_solve(element, outcome);
            }
            CommandResult::ClueAdded { clue } => {
                self.event_bus
                    .publish(Event::Room(RoomEvent::ClueDiscovered(clue.clone())));
            }
            CommandResult::ItemAdded { item } => {
                self.event_bus
                    .publish(Event::Room(RoomEvent::ItemCollected(item.clone())));
            }
            CommandResult::HintUsed {
                element,
                hints_used,
            } => {
                self.event_bus.publish(Event::Room(RoomEvent::HintUsed {
                    element: element.clone(),
                    hints_used: *hints_used,
                }));
            }
            CommandResult::ElementUpdated { .. }
            | CommandResult::TimeLogged
            | CommandResult::ClockAdvanced => {}
            CommandResult::Reset => {
                // An explicit retry starts a fresh run, so completion may
                // fire again.
                self.has_completed = false;
                self.event_bus.publish(Event::Room(RoomEvent::RoomReset));
            }
        }

        self.event_bus
            .publish(Event::Progress(self.progress_update()));
        self.check_completion();
    }

    fn publish_unlocks(&self, unlocked: &[ElementId]) {
        for element in unlocked {
            self.event_bus
                .publish(Event::Room(RoomEvent::ElementUnlocked {
                    element: element.clone(),
                }));
        }
    }

    fn publish_solve(&self, element: &ElementId, outcome: &SolveOutcome) {
        self.publish_unlocks(&outcome.unlocked);

        self.event_bus.publish(Event::Room(RoomEvent::PuzzleSolved {
            element: element.clone(),
            attempts: outcome.attempts,
            time_spent_secs: outcome.time_spent_secs,
            score: outcome.score_awarded,
        }));

        for clue in &outcome.clues {
            self.event_bus
                .publish(Event::Room(RoomEvent::ClueDiscovered(clue.clone())));
        }
        for item in &outcome.items {
            self.event_bus
                .publish(Event::Room(RoomEvent::ItemCollected(item.clone())));
        }
        // Emitted exactly once, synchronously within the solve that produced
        // them; delivery is the external relay's concern.
        for cross in &outcome.cross_room {
            self.event_bus.publish(Event::Relay(cross.clone()));
        }
    }

    fn progress_update(&self) -> ProgressUpdate {
        let progress = self.state.progress();
        ProgressUpdate {
            room_id: self.state.room_id.clone(),
            percentage: progress.percentage,
            completed: self.state.solved_elements(),
            total_elements: progress.total_elements,
            time_elapsed_secs: progress.time_elapsed_secs,
            clues: self.state.clues().to_vec(),
        }
    }

    fn check_completion(&mut self) {
        if self.has_completed || !self.state.is_complete() {
            return;
        }
        self.has_completed = true;

        let results = RoomResults {
            room_id: self.state.room_id.clone(),
            player_id: self.state.player_id.clone(),
            score: self.state.score(),
            time_elapsed_secs: self.state.time_elapsed_secs(),
            elements_completed: self.state.solved_elements(),
            clues_found: self.state.clues().to_vec(),
            hints_used: self.state.hints_used_total(),
            attempts: self.state.attempts_by_element(),
        };

        info!(
            "Room complete: room={}, score={}, time={}s",
            results.room_id, results.score, results.time_elapsed_secs
        );

        self.event_bus
            .publish(Event::Room(RoomEvent::RoomCompleted(results)));
    }

    /// Writes the current state into the snapshot slot. Failure is soft:
    /// recorded, announced, and returned, never fatal to the session.
    fn persist(&mut self) -> Result<()> {
        let snapshot = RoomSnapshot::capture(&self.state, wall_clock());
        match self.repository.save(&snapshot) {
            Ok(()) => Ok(()),
            Err(error) => {
                warn!("Snapshot save failed: {}", error);
                self.last_error = Some(error.to_string());
                self.event_bus
                    .publish(Event::Room(RoomEvent::SessionError {
                        message: error.to_string(),
                    }));
                Err(RuntimeError::Repository(error))
            }
        }
    }

    fn handle_restore(&mut self, snapshot: RoomSnapshot) -> Result<()> {
        if snapshot.room_id != self.state.room_id {
            return Err(RuntimeError::SnapshotMismatch {
                session: self.state.room_id.clone(),
                snapshot: snapshot.room_id,
            });
        }

        self.state.absorb_snapshot(snapshot.state);
        // Arm the guard without firing: a restored finished run is old news.
        if self.state.is_complete() {
            self.has_completed = true;
        }
        self.event_bus
            .publish(Event::Progress(self.progress_update()));
        Ok(())
    }
}

/// Current wall-clock time as engine timestamp.
fn wall_clock() -> Timestamp {
    let millis = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis() as u64;
    Timestamp(millis)
}
