//! Error types shared by the element commands.

use crate::error::{EngineError, ErrorSeverity};
use crate::state::ElementId;

/// Validation failures for commands addressing one element.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ElementError {
    #[error("element '{element}' is not declared in this room")]
    NotFound { element: ElementId },

    #[error("element '{element}' is still locked")]
    Locked { element: ElementId },

    #[error("element '{element}' is already solved")]
    AlreadySolved { element: ElementId },
}

impl EngineError for ElementError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Validation
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::NotFound { .. } => "element_not_found",
            Self::Locked { .. } => "element_locked",
            Self::AlreadySolved { .. } => "element_already_solved",
        }
    }
}

/// Failures while solving an element or applying its rewards.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum SolveError {
    #[error(transparent)]
    Element(#[from] ElementError),

    /// An unlock reward names an element the room does not declare. This is
    /// a configuration bug surfaced at apply time; validated configs cannot
    /// reach it.
    #[error("unlock reward on '{element}' targets unknown element '{target}'")]
    UnknownRewardTarget { element: ElementId, target: ElementId },
}

impl EngineError for SolveError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::Element(inner) => inner.severity(),
            Self::UnknownRewardTarget { .. } => ErrorSeverity::Internal,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::Element(inner) => inner.error_code(),
            Self::UnknownRewardTarget { .. } => "unknown_reward_target",
        }
    }
}
