//! Dodge — deterministic two-label collision avoidance.
//!
//! Given two anchors in data space and their rendered box sizes in
//! pixels, project to screen space, test axis-aligned bounding boxes for
//! strict overlap, and if they collide displace `b` along the requested
//! direction by its own extent plus padding, inverting the result back
//! to data space. `a` is the anchor of record and never moves.
//!
//! This is a single-pass, two-item resolver. Sequencing more than two
//! potentially colliding labels is the caller's job (the annotation
//! layer does its own adjacent-pair scan).

use crate::scale::LinearScale;

/// Anything dodge can reposition: a point with data-space coordinates
/// that can be rebuilt at a new position, carrying its other fields.
pub trait ChartPoint: Clone {
    fn x(&self) -> f64;
    fn y(&self) -> f64;
    fn with_position(&self, x: f64, y: f64) -> Self;
}

impl ChartPoint for crate::run_table::SeriesPoint {
    fn x(&self) -> f64 {
        self.x
    }
    fn y(&self) -> f64 {
        self.y
    }
    fn with_position(&self, x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

/// Box sizes and displacement policy for one dodge call.
#[derive(Debug, Clone, Copy)]
pub struct DodgeBoxes {
    /// Rendered size of `a`'s label box, pixels.
    pub a_width: f64,
    pub a_height: f64,
    /// `b`'s box; defaults to `a`'s size when `None`.
    pub b_width: Option<f64>,
    pub b_height: Option<f64>,
    pub direction: Direction,
    /// Gap left between the boxes after displacement, pixels.
    pub padding: f64,
    /// Widen the overlap test by this much per axis, pixels: a near
    /// miss inside the tolerance still counts as a collision.
    pub x_tolerance: f64,
    pub y_tolerance: f64,
}

impl DodgeBoxes {
    pub fn new(width: f64, height: f64, direction: Direction) -> Self {
        Self {
            a_width: width,
            a_height: height,
            b_width: None,
            b_height: None,
            direction,
            padding: 1.0,
            x_tolerance: 0.0,
            y_tolerance: 0.0,
        }
    }

    pub fn padding(mut self, padding: f64) -> Self {
        self.padding = padding;
        self
    }
}

/// Resolve one potential collision. Returns `(a, b)` unchanged when the
/// projected boxes do not overlap; otherwise `b` is displaced.
pub fn dodge<P: ChartPoint>(
    a: &P,
    b: &P,
    boxes: &DodgeBoxes,
    x_scale: &LinearScale,
    y_scale: &LinearScale,
) -> (P, P) {
    let b_width = boxes.b_width.unwrap_or(boxes.a_width);
    let b_height = boxes.b_height.unwrap_or(boxes.a_height);

    let ax = x_scale.apply(a.x());
    let ay = y_scale.apply(a.y());
    let bx = x_scale.apply(b.x());
    let by = y_scale.apply(b.y());

    // Strict AABB overlap, widened by the tolerances. Touching edges do
    // not collide.
    let colliding = !(ax + boxes.a_width + boxes.x_tolerance <= bx
        || ax >= bx + b_width + boxes.x_tolerance
        || ay + boxes.a_height + boxes.y_tolerance <= by
        || ay >= by + b_height + boxes.y_tolerance);

    if !colliding {
        return (a.clone(), b.clone());
    }

    let (new_bx, new_by) = match boxes.direction {
        Direction::Left => (ax - b_width - boxes.padding, by),
        Direction::Right => (ax + boxes.a_width + boxes.padding, by),
        Direction::Up => (bx, ay - b_height - boxes.padding),
        Direction::Down => (bx, ay + boxes.a_height + boxes.padding),
    };

    let moved = b.with_position(x_scale.invert(new_bx), y_scale.invert(new_by));
    (a.clone(), moved)
}
