//! Background tasks internal to the crate.

mod autosave;
mod session;

pub(crate) use autosave::AutosaveWorker;
pub(crate) use session::{Command, SessionWorker};
