//! A recording canvas used as the mapping context.

use crate::ShapeError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use tracing::trace;

/// Handle to a stroke on a [`Canvas`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StrokeId(u64);

impl fmt::Display for StrokeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// What a stroke depicts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "shape", rename_all = "snake_case")]
pub enum Stroke {
    Line { length: u32 },
    Circle { radius: u32 },
    Square { side: u32 },
}

impl fmt::Display for Stroke {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stroke::Line { length } => write!(f, "line({length})"),
            Stroke::Circle { radius } => write!(f, "circle({radius})"),
            Stroke::Square { side } => write!(f, "square({side})"),
        }
    }
}

/// One recorded canvas operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum CanvasOp {
    Draw { id: StrokeId, stroke: Stroke },
    Erase { id: StrokeId, stroke: Stroke },
}

impl fmt::Display for CanvasOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CanvasOp::Draw { id, stroke } => write!(f, "draw  {id} {stroke}"),
            CanvasOp::Erase { id, stroke } => write!(f, "erase {id} {stroke}"),
        }
    }
}

/// Mutable drawing surface. Keeps the visible strokes and a history of
/// every draw and erase.
#[derive(Debug, Default)]
pub struct Canvas {
    next_id: u64,
    strokes: BTreeMap<StrokeId, Stroke>,
    history: Vec<CanvasOp>,
}

impl Canvas {
    pub fn new() -> Self {
        Self::default()
    }

    /// Draws a stroke and returns its handle.
    pub fn draw(&mut self, stroke: Stroke) -> StrokeId {
        self.next_id += 1;
        let id = StrokeId(self.next_id);
        trace!("draw {} {}", id, stroke);
        self.strokes.insert(id, stroke);
        self.history.push(CanvasOp::Draw { id, stroke });
        id
    }

    /// Erases a visible stroke.
    pub fn erase(&mut self, id: StrokeId) -> Result<Stroke, ShapeError> {
        let stroke = self
            .strokes
            .remove(&id)
            .ok_or(ShapeError::UnknownStroke(id))?;
        trace!("erase {} {}", id, stroke);
        self.history.push(CanvasOp::Erase { id, stroke });
        Ok(stroke)
    }

    pub fn stroke(&self, id: StrokeId) -> Option<&Stroke> {
        self.strokes.get(&id)
    }

    /// Visible strokes, oldest first.
    pub fn strokes(&self) -> impl Iterator<Item = (StrokeId, &Stroke)> {
        self.strokes.iter().map(|(id, stroke)| (*id, stroke))
    }

    /// Number of visible strokes.
    pub fn len(&self) -> usize {
        self.strokes.len()
    }

    pub fn is_blank(&self) -> bool {
        self.strokes.is_empty()
    }

    pub fn history(&self) -> &[CanvasOp] {
        &self.history
    }

    /// Returns and forgets the recorded history.
    pub fn take_history(&mut self) -> Vec<CanvasOp> {
        std::mem::take(&mut self.history)
    }
}

/// A shape realized on the canvas: the mapped instance of every shape kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Drawn {
    stroke: StrokeId,
    shape: Stroke,
}

impl Drawn {
    pub(crate) fn draw(canvas: &mut Canvas, shape: Stroke) -> Self {
        Self {
            stroke: canvas.draw(shape),
            shape,
        }
    }

    /// Erases the current stroke and draws `shape` in its place.
    pub(crate) fn redraw(&mut self, canvas: &mut Canvas, shape: Stroke) -> Result<(), ShapeError> {
        canvas.erase(self.stroke)?;
        *self = Self::draw(canvas, shape);
        Ok(())
    }

    pub(crate) fn clear(self, canvas: &mut Canvas) -> Result<(), ShapeError> {
        canvas.erase(self.stroke)?;
        Ok(())
    }

    pub fn stroke(&self) -> StrokeId {
        self.stroke
    }

    pub fn shape(&self) -> Stroke {
        self.shape
    }
}
