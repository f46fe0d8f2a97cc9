//! Error types for the shape mappings.

use crate::{ShapeKind, StrokeId};
use thiserror::Error;

/// Errors raised by the canvas and the shape mappings.
#[derive(Debug, Error)]
pub enum ShapeError {
    /// A mapping received a declaration of another kind.
    #[error("expected a {expected} declaration, found {found}")]
    WrongKind { expected: ShapeKind, found: ShapeKind },

    /// The stroke was already erased or never drawn.
    #[error("stroke {0} is not on the canvas")]
    UnknownStroke(StrokeId),

    /// A script could not be parsed.
    #[error("invalid script: {0}")]
    Script(#[from] serde_json::Error),
}
