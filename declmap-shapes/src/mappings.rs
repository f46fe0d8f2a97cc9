//! One mapping per shape kind.
//!
//! Updates compare the payload first and leave the stroke alone when it is
//! unchanged; otherwise the stroke is erased and redrawn.

use crate::{Canvas, Drawn, Shape, ShapeKind, Stroke};
use declmap_engine::{DeclarationMapper, HandlerError, MapperConfig, MapperResult, Mapping};

/// Draws [`Shape::Line`] declarations.
#[derive(Debug, Clone, Copy, Default)]
pub struct LineMapping;

impl Mapping<Canvas, Shape> for LineMapping {
    type Mapped = Drawn;

    fn kind(&self) -> ShapeKind {
        ShapeKind::Line
    }

    fn create(&self, canvas: &mut Canvas, dec: &Shape) -> Result<Drawn, HandlerError> {
        let line = dec.as_line()?;
        Ok(Drawn::draw(canvas, Stroke::Line { length: line.length }))
    }

    fn update(
        &self,
        canvas: &mut Canvas,
        dec: &Shape,
        old: &Shape,
        drawn: &mut Drawn,
    ) -> Result<(), HandlerError> {
        let (line, old) = (dec.as_line()?, old.as_line()?);
        if line.length == old.length {
            return Ok(());
        }
        drawn.redraw(canvas, Stroke::Line { length: line.length })?;
        Ok(())
    }

    fn destroyed(&self, canvas: &mut Canvas, _old: &Shape, drawn: Drawn) -> Result<(), HandlerError> {
        drawn.clear(canvas)?;
        Ok(())
    }
}

/// Draws [`Shape::Circle`] declarations.
#[derive(Debug, Clone, Copy, Default)]
pub struct CircleMapping;

impl Mapping<Canvas, Shape> for CircleMapping {
    type Mapped = Drawn;

    fn kind(&self) -> ShapeKind {
        ShapeKind::Circle
    }

    fn create(&self, canvas: &mut Canvas, dec: &Shape) -> Result<Drawn, HandlerError> {
        let circle = dec.as_circle()?;
        Ok(Drawn::draw(canvas, Stroke::Circle { radius: circle.radius }))
    }

    fn update(
        &self,
        canvas: &mut Canvas,
        dec: &Shape,
        old: &Shape,
        drawn: &mut Drawn,
    ) -> Result<(), HandlerError> {
        let (circle, old) = (dec.as_circle()?, old.as_circle()?);
        if circle.radius == old.radius {
            return Ok(());
        }
        drawn.redraw(canvas, Stroke::Circle { radius: circle.radius })?;
        Ok(())
    }

    fn destroyed(&self, canvas: &mut Canvas, _old: &Shape, drawn: Drawn) -> Result<(), HandlerError> {
        drawn.clear(canvas)?;
        Ok(())
    }
}

/// Draws [`Shape::Square`] declarations.
#[derive(Debug, Clone, Copy, Default)]
pub struct SquareMapping;

impl Mapping<Canvas, Shape> for SquareMapping {
    type Mapped = Drawn;

    fn kind(&self) -> ShapeKind {
        ShapeKind::Square
    }

    fn create(&self, canvas: &mut Canvas, dec: &Shape) -> Result<Drawn, HandlerError> {
        let square = dec.as_square()?;
        Ok(Drawn::draw(canvas, Stroke::Square { side: square.side }))
    }

    fn update(
        &self,
        canvas: &mut Canvas,
        dec: &Shape,
        old: &Shape,
        drawn: &mut Drawn,
    ) -> Result<(), HandlerError> {
        let (square, old) = (dec.as_square()?, old.as_square()?);
        if square.side == old.side {
            return Ok(());
        }
        drawn.redraw(canvas, Stroke::Square { side: square.side })?;
        Ok(())
    }

    fn destroyed(&self, canvas: &mut Canvas, _old: &Shape, drawn: Drawn) -> Result<(), HandlerError> {
        drawn.clear(canvas)?;
        Ok(())
    }
}

/// Builds a mapper with one mapping for each of `kinds`.
///
/// Listing a kind twice fails with `DuplicateKind`.
pub fn mapper_for(
    kinds: &[ShapeKind],
    config: MapperConfig,
) -> MapperResult<DeclarationMapper<Canvas, Shape>> {
    let mut builder = DeclarationMapper::builder().config(config);
    for kind in kinds {
        builder = match kind {
            ShapeKind::Line => builder.register(LineMapping),
            ShapeKind::Circle => builder.register(CircleMapping),
            ShapeKind::Square => builder.register(SquareMapping),
        };
    }
    builder.build()
}
