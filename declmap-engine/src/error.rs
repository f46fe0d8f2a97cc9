//! Error types for the reconciliation engine.

use crate::HandlerError;
use std::fmt;
use thiserror::Error;

/// Result type for mapper operations.
pub type MapperResult<T> = Result<T, MapperError>;

/// The mapping callback that was running when a failure occurred.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    Create,
    Update,
    Destroy,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operation::Create => write!(f, "create"),
            Operation::Update => write!(f, "update"),
            Operation::Destroy => write!(f, "destroyed"),
        }
    }
}

/// Errors that can occur while building or running a mapper.
///
/// Ids and kinds are carried in their `Debug` rendering so the error stays
/// independent of the caller's declaration type.
#[derive(Debug, Error)]
pub enum MapperError {
    /// A declaration names a kind with no registered mapping.
    #[error("no mapping registered for declaration kind {kind}")]
    UnregisteredKind { kind: String },

    /// Two mappings were registered for the same kind.
    #[error("more than one mapping registered for declaration kind {kind}")]
    DuplicateKind { kind: String },

    /// The same id appeared twice in one pass under `DuplicateIdPolicy::Reject`.
    #[error("declaration id {id} appears more than once in one pass")]
    DuplicateId { id: String },

    /// A mapping callback failed.
    #[error("{op} failed for declaration {id} (kind {kind}): {source}")]
    Handler {
        id: String,
        kind: String,
        op: Operation,
        #[source]
        source: HandlerError,
    },

    /// A stored instance is not the type the kind's mapping produces.
    #[error("mapped instance for declaration {id} does not belong to kind {kind}")]
    InstanceMismatch { id: String, kind: String },

    /// A best-effort clear emptied the registry but some teardowns failed.
    #[error("clear destroyed {destroyed} instances, {} teardowns failed", failures.len())]
    ClearIncomplete {
        destroyed: usize,
        failures: Vec<MapperError>,
    },

    /// Configuration could not be parsed.
    #[error("invalid mapper configuration: {0}")]
    Config(#[from] serde_json::Error),
}

impl MapperError {
    pub(crate) fn unregistered(kind: &impl fmt::Debug) -> Self {
        Self::UnregisteredKind {
            kind: format!("{kind:?}"),
        }
    }

    pub(crate) fn handler(
        id: &impl fmt::Debug,
        kind: &impl fmt::Debug,
        op: Operation,
        source: HandlerError,
    ) -> Self {
        Self::Handler {
            id: format!("{id:?}"),
            kind: format!("{kind:?}"),
            op,
            source,
        }
    }

    pub(crate) fn mismatch(id: &impl fmt::Debug, kind: &impl fmt::Debug) -> Self {
        Self::InstanceMismatch {
            id: format!("{id:?}"),
            kind: format!("{kind:?}"),
        }
    }

    /// Returns the failing operation for `Handler` errors.
    pub fn operation(&self) -> Option<Operation> {
        match self {
            Self::Handler { op, .. } => Some(*op),
            _ => None,
        }
    }
}
