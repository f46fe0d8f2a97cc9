//! Shape declarations.
//!
//! The JSON form carries the kind in a `type` field next to the id and the
//! payload, e.g. `{"type":"circle","id":"2","radius":5}`.

use crate::ShapeError;
use declmap_engine::Declaration;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Discriminator for [`Shape`] declarations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShapeKind {
    Line,
    Circle,
    Square,
}

impl fmt::Display for ShapeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShapeKind::Line => write!(f, "line"),
            ShapeKind::Circle => write!(f, "circle"),
            ShapeKind::Square => write!(f, "square"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Line {
    pub id: String,
    pub length: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Circle {
    pub id: String,
    pub radius: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Square {
    pub id: String,
    pub side: u32,
}

/// A declared shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Shape {
    Line(Line),
    Circle(Circle),
    Square(Square),
}

impl Shape {
    pub fn line(id: impl Into<String>, length: u32) -> Self {
        Shape::Line(Line {
            id: id.into(),
            length,
        })
    }

    pub fn circle(id: impl Into<String>, radius: u32) -> Self {
        Shape::Circle(Circle {
            id: id.into(),
            radius,
        })
    }

    pub fn square(id: impl Into<String>, side: u32) -> Self {
        Shape::Square(Square {
            id: id.into(),
            side,
        })
    }

    pub fn as_line(&self) -> Result<&Line, ShapeError> {
        match self {
            Shape::Line(line) => Ok(line),
            other => Err(other.wrong_kind(ShapeKind::Line)),
        }
    }

    pub fn as_circle(&self) -> Result<&Circle, ShapeError> {
        match self {
            Shape::Circle(circle) => Ok(circle),
            other => Err(other.wrong_kind(ShapeKind::Circle)),
        }
    }

    pub fn as_square(&self) -> Result<&Square, ShapeError> {
        match self {
            Shape::Square(square) => Ok(square),
            other => Err(other.wrong_kind(ShapeKind::Square)),
        }
    }

    fn wrong_kind(&self, expected: ShapeKind) -> ShapeError {
        ShapeError::WrongKind {
            expected,
            found: self.kind(),
        }
    }
}

impl Declaration for Shape {
    type Id = String;
    type Kind = ShapeKind;

    fn id(&self) -> &String {
        match self {
            Shape::Line(line) => &line.id,
            Shape::Circle(circle) => &circle.id,
            Shape::Square(square) => &square.id,
        }
    }

    fn kind(&self) -> ShapeKind {
        match self {
            Shape::Line(_) => ShapeKind::Line,
            Shape::Circle(_) => ShapeKind::Circle,
            Shape::Square(_) => ShapeKind::Square,
        }
    }
}
