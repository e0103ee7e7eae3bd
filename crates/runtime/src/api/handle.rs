//! Cloneable façade for issuing commands to the session worker.
//!
//! [`SessionHandle`] hides channel plumbing and offers async helpers for
//! mutating room state or streaming events from specific topics.
use tokio::sync::{broadcast, mpsc, oneshot};

use room_core::{
    AddClueCommand, AddItemCommand, AdvanceClockCommand, Clue, Command as RoomCommand,
    CommandResult, ElementId, ElementPatch, ElementState, ExecutionOutcome, InteractCommand,
    InventoryItem, LogTimeCommand, ResetCommand, RewardConfig, RoomProgress, RoomSnapshot,
    RoomState, SolveCommand, SolveOutcome, UnlockCommand, UpdateElementCommand, UseHintCommand,
};

use super::errors::{Result, RuntimeError};
use crate::events::{Event, EventBus, Topic};
use crate::workers::Command;

/// Client-facing handle to interact with one room session.
#[derive(Clone, Debug)]
pub struct SessionHandle {
    command_tx: mpsc::Sender<Command>,
    event_bus: EventBus,
}

impl SessionHandle {
    pub(crate) fn new(command_tx: mpsc::Sender<Command>, event_bus: EventBus) -> Self {
        Self {
            command_tx,
            event_bus,
        }
    }

    /// Run a room command through the engine and return its full outcome.
    pub async fn execute(&self, command: RoomCommand) -> Result<ExecutionOutcome> {
        let (reply_tx, reply_rx) = oneshot::channel();

        self.command_tx
            .send(Command::Execute {
                command,
                reply: reply_tx,
            })
            .await
            .map_err(|_| RuntimeError::CommandChannelClosed)?;

        reply_rx.await.map_err(RuntimeError::ReplyChannelClosed)?
    }

    /// Record a player interaction with an element. Returns the attempt
    /// count after this interaction.
    pub async fn interact(&self, element: impl Into<ElementId>) -> Result<u32> {
        let outcome = self
            .execute(RoomCommand::Interact(InteractCommand::new(element)))
            .await?;
        match outcome.result {
            CommandResult::Interact { attempts, .. } => Ok(attempts),
            _ => unreachable!("interact command returns an interact result"),
        }
    }

    /// Unlock an element directly. Returns every id that transitioned,
    /// dependency propagation included.
    pub async fn unlock(&self, element: impl Into<ElementId>) -> Result<Vec<ElementId>> {
        let outcome = self
            .execute(RoomCommand::Unlock(UnlockCommand::new(element)))
            .await?;
        match outcome.result {
            CommandResult::Unlock { unlocked } => Ok(unlocked),
            _ => unreachable!("unlock command returns an unlock result"),
        }
    }

    /// Mark an element solved and apply its rewards.
    pub async fn solve(
        &self,
        element: impl Into<ElementId>,
        rewards: Vec<RewardConfig>,
    ) -> Result<SolveOutcome> {
        let outcome = self
            .execute(RoomCommand::Solve(SolveCommand::new(element, rewards)))
            .await?;
        match outcome.result {
            CommandResult::Solve { outcome, .. } => Ok(outcome),
            _ => unreachable!("solve command returns a solve result"),
        }
    }

    /// Apply a field patch to one element's bookkeeping state.
    pub async fn update_element(
        &self,
        element: impl Into<ElementId>,
        patch: ElementPatch,
    ) -> Result<()> {
        self.execute(RoomCommand::UpdateElement(UpdateElementCommand::new(
            element, patch,
        )))
        .await?;
        Ok(())
    }

    /// Append a clue, e.g. one arriving from another room via the relay.
    pub async fn add_clue(&self, clue: Clue) -> Result<()> {
        self.execute(RoomCommand::AddClue(AddClueCommand::new(clue)))
            .await?;
        Ok(())
    }

    /// Append an inventory item.
    pub async fn add_item(&self, item: InventoryItem) -> Result<()> {
        self.execute(RoomCommand::AddItem(AddItemCommand::new(item)))
            .await?;
        Ok(())
    }

    /// Consume a hint against an element. Returns the hint count after.
    pub async fn use_hint(&self, element: impl Into<ElementId>) -> Result<u32> {
        let outcome = self
            .execute(RoomCommand::UseHint(UseHintCommand::new(element)))
            .await?;
        match outcome.result {
            CommandResult::HintUsed { hints_used, .. } => Ok(hints_used),
            _ => unreachable!("use hint command returns a hint result"),
        }
    }

    /// Add puzzle-facing seconds to one element's timer.
    pub async fn log_element_time(
        &self,
        element: impl Into<ElementId>,
        seconds: u64,
    ) -> Result<()> {
        self.execute(RoomCommand::LogTime(LogTimeCommand::new(element, seconds)))
            .await?;
        Ok(())
    }

    /// Advance the room's elapsed-time clock.
    pub async fn advance_clock(&self, seconds: u64) -> Result<()> {
        self.execute(RoomCommand::AdvanceClock(AdvanceClockCommand::new(seconds)))
            .await?;
        Ok(())
    }

    /// Reset the session for an explicit retry.
    pub async fn reset(&self) -> Result<()> {
        self.execute(RoomCommand::Reset(ResetCommand)).await?;
        Ok(())
    }

    /// Persist the current state into the snapshot slot.
    pub async fn save(&self) -> Result<()> {
        let (reply_tx, reply_rx) = oneshot::channel();

        self.command_tx
            .send(Command::Save {
                reply: Some(reply_tx),
            })
            .await
            .map_err(|_| RuntimeError::CommandChannelClosed)?;

        reply_rx.await.map_err(RuntimeError::ReplyChannelClosed)?
    }

    /// Merge a snapshot over the current state (top-level shallow merge).
    pub async fn restore(&self, snapshot: RoomSnapshot) -> Result<()> {
        let (reply_tx, reply_rx) = oneshot::channel();

        self.command_tx
            .send(Command::Restore {
                snapshot,
                reply: reply_tx,
            })
            .await
            .map_err(|_| RuntimeError::CommandChannelClosed)?;

        reply_rx.await.map_err(RuntimeError::ReplyChannelClosed)?
    }

    /// Persist, then stop the session worker. Navigation away from the room
    /// is the caller's concern.
    pub async fn exit(&self) -> Result<()> {
        let (reply_tx, reply_rx) = oneshot::channel();

        self.command_tx
            .send(Command::Exit { reply: reply_tx })
            .await
            .map_err(|_| RuntimeError::CommandChannelClosed)?;

        reply_rx.await.map_err(RuntimeError::ReplyChannelClosed)?
    }

    /// Query the full room state (read-only snapshot).
    pub async fn state(&self) -> Result<RoomState> {
        self.query(|reply| Command::QueryState { reply }).await
    }

    /// Progress-only view.
    pub async fn progress(&self) -> Result<RoomProgress> {
        self.query(|reply| Command::QueryProgress { reply }).await
    }

    /// Clues-only view, discovery order.
    pub async fn clues(&self) -> Result<Vec<Clue>> {
        self.query(|reply| Command::QueryClues { reply }).await
    }

    /// Inventory-only view, acquisition order.
    pub async fn inventory(&self) -> Result<Vec<InventoryItem>> {
        self.query(|reply| Command::QueryInventory { reply }).await
    }

    /// Single-element view.
    pub async fn element(&self, element: impl Into<ElementId>) -> Result<Option<ElementState>> {
        let element = element.into();
        self.query(move |reply| Command::QueryElement { element, reply })
            .await
    }

    /// Last soft failure (e.g. a save that could not reach disk), if any.
    pub async fn last_error(&self) -> Result<Option<String>> {
        self.query(|reply| Command::QueryLastError { reply }).await
    }

    async fn query<T>(&self, make: impl FnOnce(oneshot::Sender<T>) -> Command) -> Result<T> {
        let (reply_tx, reply_rx) = oneshot::channel();

        self.command_tx
            .send(make(reply_tx))
            .await
            .map_err(|_| RuntimeError::CommandChannelClosed)?;

        reply_rx.await.map_err(RuntimeError::ReplyChannelClosed)
    }

    /// Subscribe to events from a specific topic.
    ///
    /// # Topics
    ///
    /// - `Topic::Room` - interactions, solves, discoveries, completion
    /// - `Topic::Progress` - aggregate progress snapshots
    /// - `Topic::Relay` - cross-room clue emissions
    pub fn subscribe(&self, topic: Topic) -> broadcast::Receiver<Event> {
        self.event_bus.subscribe(topic)
    }

    /// Subscribe to multiple topics at once.
    pub fn subscribe_multiple(
        &self,
        topics: &[Topic],
    ) -> std::collections::HashMap<Topic, broadcast::Receiver<Event>> {
        self.event_bus.subscribe_multiple(topics)
    }

    /// Get a reference to the event bus for advanced usage.
    pub fn event_bus(&self) -> &EventBus {
        &self.event_bus
    }
}
