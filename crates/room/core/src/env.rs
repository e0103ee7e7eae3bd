//! Execution environment handed to every command.

use serde::{Deserialize, Serialize};

use crate::config::{ElementConfig, RoomConfig};
use crate::state::ElementId;

/// Milliseconds since the Unix epoch.
///
/// The engine never reads the wall clock; the moment of each interaction
/// flows in through [`RoomEnv`] so command execution stays deterministic
/// and replayable.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct Timestamp(pub u64);

impl Timestamp {
    pub const fn as_millis(self) -> u64 {
        self.0
    }
}

impl core::fmt::Display for Timestamp {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Read-only environment for command execution: the static room
/// configuration plus the moment the triggering interaction happened.
#[derive(Clone, Copy)]
pub struct RoomEnv<'a> {
    config: &'a RoomConfig,
    now: Timestamp,
}

impl<'a> RoomEnv<'a> {
    pub fn new(config: &'a RoomConfig, now: Timestamp) -> Self {
        Self { config, now }
    }

    pub fn config(&self) -> &'a RoomConfig {
        self.config
    }

    pub fn now(&self) -> Timestamp {
        self.now
    }

    /// Looks up the static configuration for one element.
    pub fn element(&self, id: &ElementId) -> Option<&'a ElementConfig> {
        self.config.element(id)
    }
}
