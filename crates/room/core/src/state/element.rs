//! Per-element live state.

use serde::{Deserialize, Serialize};

use crate::config::ElementConfig;
use crate::env::Timestamp;

/// Identifier of one interactive element within a room.
///
/// Element ids are authored strings and referenced by dependency lists and
/// unlock rewards.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ElementId(pub String);

impl ElementId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl core::fmt::Display for ElementId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ElementId {
    fn from(id: &str) -> Self {
        Self(id.to_owned())
    }
}

/// Live state of one element for one player session.
///
/// Created at store initialization and never removed during a session;
/// `is_unlocked` and `is_solved` only transition false to true outside an
/// explicit reset.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ElementState {
    pub is_unlocked: bool,
    pub is_solved: bool,
    pub is_active: bool,
    pub attempts: u32,
    pub hints_used: u32,
    pub time_spent_secs: u64,
    pub last_interaction: Option<Timestamp>,
}

impl ElementState {
    /// Initial state per the configuration: unlocked iff the element declares
    /// no dependencies, unless `starts_unlocked` overrides it.
    pub fn initial(config: &ElementConfig) -> Self {
        let is_unlocked = config
            .starts_unlocked
            .unwrap_or_else(|| config.dependencies.is_empty());
        Self {
            is_unlocked,
            ..Self::default()
        }
    }

    /// A locked, untouched state.
    pub fn locked() -> Self {
        Self::default()
    }
}
