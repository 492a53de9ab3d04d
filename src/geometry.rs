use egui::{Pos2, Rect, pos2};

/// Number of line segments used when an ellipse is flattened to a polyline
pub const ELLIPSE_SEGMENTS: usize = 64;

/// Bounding box spanned by two drag corners, with `min <= max` on both axes
/// regardless of the drag direction.
pub fn normalized_rect(a: Pos2, b: Pos2) -> Rect {
    Rect::from_min_max(
        pos2(a.x.min(b.x), a.y.min(b.y)),
        pos2(a.x.max(b.x), a.y.max(b.y)),
    )
}

/// Vertices of the triangle dragged from `start` to `end`: the start point, the end
/// x at the start y, and the horizontal midpoint at the end y.
pub fn triangle_vertices(start: Pos2, end: Pos2) -> [Pos2; 3] {
    [
        start,
        pos2(end.x, start.y),
        pos2((start.x + end.x) / 2.0, end.y),
    ]
}

/// Points along the ellipse inscribed in `rect`, clockwise from the rightmost point.
/// The first point is not repeated at the end.
pub fn ellipse_outline(rect: Rect, segments: usize) -> Vec<Pos2> {
    let center = rect.center();
    let rx = rect.width() / 2.0;
    let ry = rect.height() / 2.0;
    (0..segments)
        .map(|i| {
            let t = i as f32 / segments as f32 * std::f32::consts::TAU;
            pos2(center.x + rx * t.cos(), center.y + ry * t.sin())
        })
        .collect()
}

/// Corners of `rect` in clockwise order starting at the top-left
pub fn rect_outline(rect: Rect) -> Vec<Pos2> {
    vec![rect.left_top(), rect.right_top(), rect.right_bottom(), rect.left_bottom()]
}

/// Calculate the bounding box for a set of points
pub fn calculate_bounds(points: &[Pos2], padding: f32) -> Rect {
    if points.is_empty() {
        return Rect::NOTHING;
    }

    let mut min_x = f32::INFINITY;
    let mut min_y = f32::INFINITY;
    let mut max_x = f32::NEG_INFINITY;
    let mut max_y = f32::NEG_INFINITY;

    for point in points {
        min_x = min_x.min(point.x);
        min_y = min_y.min(point.y);
        max_x = max_x.max(point.x);
        max_y = max_y.max(point.y);
    }

    Rect::from_min_max(
        Pos2::new(min_x - padding, min_y - padding),
        Pos2::new(max_x + padding, max_y + padding),
    )
}
