//! Shape drawing on top of the DeclMap engine.
//!
//! Declarations describe lines, circles and squares. A [`Canvas`] is the
//! mutable context; each shape kind has a mapping that draws, redraws and
//! erases strokes on it.
//!
//! ```
//! use declmap_engine::MapperConfig;
//! use declmap_shapes::{mapper_for, Canvas, Shape, ShapeKind};
//!
//! let mut mapper = mapper_for(&[ShapeKind::Line, ShapeKind::Circle], MapperConfig::default())?;
//! let mut canvas = Canvas::new();
//!
//! mapper.reconcile(&mut canvas, vec![Shape::line("1", 10), Shape::circle("2", 5)])?;
//! assert_eq!(canvas.len(), 2);
//!
//! mapper.clear(&mut canvas)?;
//! assert!(canvas.is_blank());
//! # Ok::<(), declmap_engine::MapperError>(())
//! ```

mod canvas;
mod error;
mod mappings;
pub mod script;
mod shape;

pub use canvas::{Canvas, CanvasOp, Drawn, Stroke, StrokeId};
pub use error::ShapeError;
pub use mappings::{mapper_for, CircleMapping, LineMapping, SquareMapping};
pub use script::{Outcome, Script, Step};
pub use shape::{Circle, Line, Shape, ShapeKind, Square};
