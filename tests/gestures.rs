use egui::{Color32, pos2};
use sketch_canvas::input::{InputEvent, InputInterpreter, InputLocation};
use sketch_canvas::{Document, Geometry, PaintStyle, Tool};

fn draw(doc: &mut Document, tool: Tool, from: (f32, f32), to: (f32, f32)) {
    doc.set_tool(tool);
    doc.begin_gesture(pos2(from.0, from.1));
    doc.extend_gesture(pos2(to.0, to.1));
    doc.end_gesture(pos2(to.0, to.1));
}

#[test]
fn test_rectangle_independent_of_drag_direction() {
    let mut forward = Document::new();
    let mut backward = Document::new();
    draw(&mut forward, Tool::Rectangle, (10.0, 10.0), (50.0, 30.0));
    draw(&mut backward, Tool::Rectangle, (50.0, 30.0), (10.0, 10.0));

    assert_eq!(forward.strokes()[0].geometry(), backward.strokes()[0].geometry());
    let Geometry::Rectangle(rect) = forward.strokes()[0].geometry() else {
        panic!("expected a rectangle");
    };
    assert_eq!(rect.min, pos2(10.0, 10.0));
    assert_eq!(rect.max, pos2(50.0, 30.0));
}

#[test]
fn test_ellipse_independent_of_drag_direction() {
    let mut forward = Document::new();
    let mut backward = Document::new();
    draw(&mut forward, Tool::Ellipse, (0.0, 40.0), (80.0, 0.0));
    draw(&mut backward, Tool::Ellipse, (80.0, 0.0), (0.0, 40.0));
    assert_eq!(forward.strokes()[0].geometry(), backward.strokes()[0].geometry());
}

#[test]
fn test_triangle_vertices() {
    let mut doc = Document::new();
    doc.set_tool(Tool::Triangle);
    doc.begin_gesture(pos2(10.0, 10.0));
    doc.extend_gesture(pos2(30.0, 20.0));
    doc.extend_gesture(pos2(50.0, 50.0));
    doc.end_gesture(pos2(50.0, 50.0));

    assert_eq!(
        doc.strokes()[0].geometry(),
        &Geometry::Triangle([pos2(10.0, 10.0), pos2(50.0, 10.0), pos2(30.0, 50.0)])
    );
}

#[test]
fn test_eraser_produces_one_segment_per_move() {
    let mut doc = Document::new();
    doc.set_tool(Tool::Eraser);
    let path = [(0.0, 0.0), (10.0, 0.0), (20.0, 5.0), (30.0, 10.0), (40.0, 10.0)];

    doc.begin_gesture(pos2(path[0].0, path[0].1));
    for (moves, (x, y)) in path[1..].iter().enumerate() {
        doc.extend_gesture(pos2(*x, *y));
        // Each move is visible immediately, before the finger lifts
        assert_eq!(doc.strokes().len(), moves + 1);
    }
    assert_eq!(doc.strokes().len(), path.len() - 1);
    assert_eq!(doc.history().len(), 1);
    doc.end_gesture(pos2(40.0, 10.0));

    assert_eq!(doc.strokes().len(), path.len() - 1);
    assert_eq!(doc.history().len(), 2);
    for (segment, pair) in doc.strokes().iter().zip(path.windows(2)) {
        let Geometry::Freehand(points) = segment.geometry() else {
            panic!("eraser segments are freehand");
        };
        assert_eq!(points, &vec![pos2(pair[0].0, pair[0].1), pos2(pair[1].0, pair[1].1)]);
        assert_eq!(segment.style().color, Color32::WHITE);
        assert_eq!(segment.style().width, 20.0);
    }
}

#[test]
fn test_tool_switch_mid_gesture_discards_stroke() {
    let mut doc = Document::new();
    doc.begin_gesture(pos2(0.0, 0.0));
    doc.extend_gesture(pos2(5.0, 5.0));
    doc.set_tool(Tool::Ellipse);

    assert!(doc.in_progress_stroke().is_none());
    doc.end_gesture(pos2(10.0, 10.0));
    assert!(doc.strokes().is_empty());
    assert_eq!(doc.history().len(), 1);
}

#[test]
fn test_abandoned_erase_leaves_no_orphan_segments() {
    let mut doc = Document::new();
    draw(&mut doc, Tool::Freehand, (0.0, 0.0), (30.0, 0.0));

    doc.set_tool(Tool::Eraser);
    doc.begin_gesture(pos2(0.0, 0.0));
    doc.extend_gesture(pos2(10.0, 0.0));
    doc.extend_gesture(pos2(20.0, 0.0));
    assert_eq!(doc.strokes().len(), 3);

    doc.set_tool(Tool::Freehand);
    assert_eq!(doc.strokes(), doc.history().current().strokes());
    assert_eq!(doc.strokes().len(), 1);

    assert!(doc.undo());
    assert!(doc.strokes().is_empty());
}

#[test]
fn test_style_applies_to_next_stroke_only() {
    let mut doc = Document::new();
    draw(&mut doc, Tool::Freehand, (0.0, 0.0), (10.0, 0.0));
    doc.set_paint_style(PaintStyle::default().with_color(Color32::RED).with_width(12.0));
    draw(&mut doc, Tool::Freehand, (0.0, 10.0), (10.0, 10.0));

    assert_eq!(doc.strokes()[0].style().color, Color32::BLACK);
    assert_eq!(doc.strokes()[0].style().width, 5.0);
    assert_eq!(doc.strokes()[1].style().color, Color32::RED);
    assert_eq!(doc.strokes()[1].style().width, 12.0);
}

#[test]
fn test_interpreter_drives_document() {
    let mut doc = Document::new();
    let mut input = InputInterpreter::new();
    let at = |x: f32, y: f32| InputLocation::in_canvas(pos2(x, y));

    let events = [
        InputEvent::PointerDown {
            location: at(0.0, 0.0),
            button: egui::PointerButton::Primary,
        },
        InputEvent::PointerMove {
            location: at(5.0, 0.0),
            held_buttons: vec![egui::PointerButton::Primary],
        },
        InputEvent::PointerMove {
            location: at(10.0, 0.0),
            held_buttons: vec![egui::PointerButton::Primary],
        },
        InputEvent::PointerUp {
            location: at(10.0, 0.0),
            button: egui::PointerButton::Primary,
        },
    ];
    for event in &events {
        assert!(input.handle_event(event, &mut doc).is_handled());
    }

    assert_eq!(
        doc.strokes()[0].geometry(),
        &Geometry::Freehand(vec![pos2(0.0, 0.0), pos2(5.0, 0.0), pos2(10.0, 0.0)])
    );
}
