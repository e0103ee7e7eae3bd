//! Error types for the command execution pipeline.

use crate::command::{
    AddClueCommand, AddItemCommand, AdvanceClockCommand, CommandTransition, InteractCommand,
    LogTimeCommand, ResetCommand, SolveCommand, UnlockCommand, UpdateElementCommand,
    UseHintCommand,
};
use crate::error::{EngineError, ErrorSeverity};

/// Identifies which stage of the transition pipeline produced an error.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TransitionPhase {
    PreValidate,
    Apply,
    PostValidate,
}

impl TransitionPhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransitionPhase::PreValidate => "pre_validate",
            TransitionPhase::Apply => "apply",
            TransitionPhase::PostValidate => "post_validate",
        }
    }
}

/// Associates a transition phase with the underlying error.
#[derive(Clone, Debug, PartialEq)]
pub struct TransitionPhaseError<E> {
    pub phase: TransitionPhase,
    pub error: E,
}

impl<E> TransitionPhaseError<E> {
    pub fn new(phase: TransitionPhase, error: E) -> Self {
        Self { phase, error }
    }
}

impl<E: std::fmt::Display> std::fmt::Display for TransitionPhaseError<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} failed: {}", self.phase.as_str(), self.error)
    }
}

impl<E: std::fmt::Display + std::fmt::Debug> std::error::Error for TransitionPhaseError<E> {}

/// Errors surfaced while executing a command through the room engine.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum ExecuteError {
    #[error("interact command failed: {0}")]
    Interact(TransitionPhaseError<<InteractCommand as CommandTransition>::Error>),

    #[error("unlock command failed: {0}")]
    Unlock(TransitionPhaseError<<UnlockCommand as CommandTransition>::Error>),

    #[error("solve command failed: {0}")]
    Solve(TransitionPhaseError<<SolveCommand as CommandTransition>::Error>),

    #[error("update element command failed: {0}")]
    UpdateElement(TransitionPhaseError<<UpdateElementCommand as CommandTransition>::Error>),

    #[error("add clue command failed: {0}")]
    AddClue(TransitionPhaseError<<AddClueCommand as CommandTransition>::Error>),

    #[error("add item command failed: {0}")]
    AddItem(TransitionPhaseError<<AddItemCommand as CommandTransition>::Error>),

    #[error("use hint command failed: {0}")]
    UseHint(TransitionPhaseError<<UseHintCommand as CommandTransition>::Error>),

    #[error("log time command failed: {0}")]
    LogTime(TransitionPhaseError<<LogTimeCommand as CommandTransition>::Error>),

    #[error("advance clock command failed: {0}")]
    AdvanceClock(TransitionPhaseError<<AdvanceClockCommand as CommandTransition>::Error>),

    #[error("reset command failed: {0}")]
    Reset(TransitionPhaseError<<ResetCommand as CommandTransition>::Error>),
}

impl ExecuteError {
    /// Severity of the underlying command error.
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            Self::Interact(e) => e.error.severity(),
            Self::Unlock(e) => e.error.severity(),
            Self::Solve(e) => e.error.severity(),
            Self::UpdateElement(e) => e.error.severity(),
            Self::AddClue(e) => e.error.severity(),
            Self::AddItem(e) => e.error.severity(),
            Self::UseHint(e) => e.error.severity(),
            Self::LogTime(e) => e.error.severity(),
            Self::AdvanceClock(e) => e.error.severity(),
            Self::Reset(e) => e.error.severity(),
        }
    }

    /// The phase that rejected the command.
    pub fn phase(&self) -> TransitionPhase {
        match self {
            Self::Interact(e) => e.phase,
            Self::Unlock(e) => e.phase,
            Self::Solve(e) => e.phase,
            Self::UpdateElement(e) => e.phase,
            Self::AddClue(e) => e.phase,
            Self::AddItem(e) => e.phase,
            Self::UseHint(e) => e.phase,
            Self::LogTime(e) => e.phase,
            Self::AdvanceClock(e) => e.phase,
            Self::Reset(e) => e.phase,
        }
    }
}
