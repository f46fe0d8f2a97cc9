use declmap_shapes::{Canvas, CanvasOp, ShapeError, Stroke};
use pretty_assertions::assert_eq;

#[test]
fn new_canvas_is_blank() {
    let canvas = Canvas::new();
    assert!(canvas.is_blank());
    assert_eq!(canvas.len(), 0);
    assert!(canvas.history().is_empty());
}

#[test]
fn draw_assigns_increasing_handles() {
    let mut canvas = Canvas::new();
    let a = canvas.draw(Stroke::Line { length: 1 });
    let b = canvas.draw(Stroke::Circle { radius: 2 });

    assert!(a < b);
    assert_eq!(canvas.len(), 2);
    assert_eq!(canvas.stroke(b), Some(&Stroke::Circle { radius: 2 }));
    assert_eq!(a.to_string(), "#1");
}

#[test]
fn erase_removes_stroke_and_records_it() {
    let mut canvas = Canvas::new();
    let id = canvas.draw(Stroke::Square { side: 3 });

    let erased = canvas.erase(id).unwrap();

    assert_eq!(erased, Stroke::Square { side: 3 });
    assert!(canvas.is_blank());
    assert_eq!(
        canvas.history(),
        [
            CanvasOp::Draw { id, stroke: erased },
            CanvasOp::Erase { id, stroke: erased },
        ]
    );
}

#[test]
fn erase_twice_fails() {
    let mut canvas = Canvas::new();
    let id = canvas.draw(Stroke::Line { length: 7 });
    canvas.erase(id).unwrap();

    let err = canvas.erase(id).unwrap_err();
    assert!(matches!(err, ShapeError::UnknownStroke(stroke) if stroke == id));
    assert!(err.to_string().contains("#1"));
}

#[test]
fn strokes_iterate_oldest_first() {
    let mut canvas = Canvas::new();
    canvas.draw(Stroke::Line { length: 1 });
    let middle = canvas.draw(Stroke::Line { length: 2 });
    canvas.draw(Stroke::Line { length: 3 });
    canvas.erase(middle).unwrap();

    let shapes: Vec<_> = canvas.strokes().map(|(_, stroke)| stroke.to_string()).collect();
    assert_eq!(shapes, ["line(1)", "line(3)"]);
}

#[test]
fn take_history_leaves_strokes() {
    let mut canvas = Canvas::new();
    canvas.draw(Stroke::Circle { radius: 9 });

    assert_eq!(canvas.take_history().len(), 1);
    assert!(canvas.history().is_empty());
    assert_eq!(canvas.len(), 1);
}

#[test]
fn canvas_op_serializes_with_tags() {
    let mut canvas = Canvas::new();
    canvas.draw(Stroke::Line { length: 4 });
    let json = serde_json::to_string(&canvas.history()[0]).unwrap();
    assert_eq!(json, r#"{"op":"draw","id":1,"stroke":{"shape":"line","length":4}}"#);
}
