//! Persistence-slot adapters for session snapshots.

mod error;
mod file;
mod memory;
mod traits;

pub use error::{RepositoryError, Result};
pub use file::FileSnapshotRepository;
pub use memory::InMemorySnapshotRepository;
pub use traits::SnapshotRepository;
