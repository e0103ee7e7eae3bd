//! Session orchestration for the room state engine.
//!
//! This crate wires the pure engine, the snapshot repository, and worker
//! tasks into a cohesive session API. Consumers embed [`RoomSession`] to
//! drive a player's run through one room, subscribe to events, and persist
//! progress through [`SessionHandle`].
//!
//! Modules are organized by responsibility:
//! - [`session`] hosts the orchestrator and builder
//! - [`api`] exposes the types downstream clients interact with
//! - [`events`] provides a topic-based event bus for flexible event routing
//! - [`workers`] keeps background tasks internal to the crate
//! - [`repository`] provides the persistence-slot adapters
pub mod api;
pub mod events;
pub mod repository;
pub mod session;

mod workers;

pub use api::{Result, RuntimeError, SessionHandle};
pub use events::{Event, EventBus, ProgressUpdate, RoomEvent, RoomResults, Topic};
pub use repository::{
    FileSnapshotRepository, InMemorySnapshotRepository, RepositoryError, SnapshotRepository,
};
pub use session::{RoomSession, RoomSessionBuilder, SessionConfig};
