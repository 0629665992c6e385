//! Chart cursor — pointer position to nearest data x, at pointer-move
//! frequency.
//!
//! One cursor is bound to one rendered chart for the lifetime of that
//! chart's data. It owns a sorted array of the distinct x values present
//! and a bucket of rows per x, resolves the pointer via bisect-center in
//! O(log n), repositions the vertical guide line, and hands `(nearest_x,
//! rows_at_x)` to a caller-supplied renderer. What the renderer draws is
//! entirely its business — the cursor knows coordinates and callbacks,
//! nothing else.
//!
//! Teardown: `cleanup()` drops the renderer and marks the cursor
//! detached. A detached cursor resolves nothing and never fires — charts
//! are torn down and rebuilt when their data changes shape, and a stale
//! cursor must not call into a renderer whose chart is gone.

use crate::error::{VizError, VizResult};
use crate::scale::LinearScale;

/// Receives `(nearest_x, rows_at_x)` on every resolved pointer move.
pub type CursorRenderer<P> = Box<dyn FnMut(f64, &[P])>;

/// One resolved pointer position.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CursorHit {
    /// Nearest data x value present in the chart's points.
    pub x: f64,
    /// That value's screen position — where the guide line goes.
    pub screen_x: f64,
}

pub struct ChartCursor<P> {
    x_scale: LinearScale,
    guide_range: (f64, f64),
    xs: Vec<f64>,
    buckets: Vec<Vec<P>>,
    renderer: Option<CursorRenderer<P>>,
    guide_x: Option<f64>,
    visible: bool,
    detached: bool,
}

impl<P: Clone> ChartCursor<P> {
    /// Bind a cursor to one chart.
    ///
    /// `x_scale` must be the chart's x scale (invertibility is enforced
    /// by [`LinearScale`] construction); `guide_range` is the pixel
    /// y-interval the guide line spans and must be non-degenerate;
    /// `x_of` extracts each point's data x. Points sharing an x value
    /// land in one bucket, in input order.
    pub fn new<F>(
        x_scale: LinearScale,
        guide_range: (f64, f64),
        points: &[P],
        x_of: F,
        renderer: CursorRenderer<P>,
    ) -> VizResult<Self>
    where
        F: Fn(&P) -> f64,
    {
        if guide_range.0 == guide_range.1 {
            return Err(VizError::DegenerateGuideRange(guide_range.0));
        }

        // Bucket points by exact x equality, sorted by x.
        let mut order: Vec<usize> = (0..points.len()).collect();
        order.sort_by(|&i, &j| x_of(&points[i]).total_cmp(&x_of(&points[j])));

        let mut xs: Vec<f64> = Vec::new();
        let mut buckets: Vec<Vec<P>> = Vec::new();
        for i in order {
            let x = x_of(&points[i]);
            if xs.last() != Some(&x) {
                xs.push(x);
                buckets.push(Vec::new());
            }
            if let Some(bucket) = buckets.last_mut() {
                bucket.push(points[i].clone());
            }
        }

        Ok(Self {
            x_scale,
            guide_range,
            xs,
            buckets,
            renderer: Some(renderer),
            guide_x: None,
            visible: false,
            detached: false,
        })
    }

    /// Pointer entered the chart area.
    pub fn pointer_enter(&mut self) {
        if !self.detached {
            self.visible = true;
        }
    }

    /// Pointer moved to pixel x `px`. Resolves the nearest data x, moves
    /// the guide, fires the renderer, and returns the hit. Returns `None`
    /// if the cursor is detached or the chart has no points.
    pub fn pointer_move(&mut self, px: f64) -> Option<CursorHit> {
        if self.detached || self.xs.is_empty() {
            return None;
        }
        // A move without a preceding enter counts as an enter.
        if !self.visible {
            self.pointer_enter();
        }

        let target = self.x_scale.invert(px);
        let index = bisect_center(&self.xs, target);
        let nearest = self.xs[index];
        let screen_x = self.x_scale.apply(nearest);
        self.guide_x = Some(screen_x);

        if let Some(renderer) = self.renderer.as_mut() {
            renderer(nearest, &self.buckets[index]);
        }

        Some(CursorHit {
            x: nearest,
            screen_x,
        })
    }

    /// Pointer left the chart area: hide the guide, keep the binding.
    pub fn pointer_leave(&mut self) {
        self.visible = false;
        self.guide_x = None;
    }

    /// Detach for good. After cleanup the renderer is dropped and no
    /// pointer event will ever fire it again.
    pub fn cleanup(&mut self) {
        self.renderer = None;
        self.guide_x = None;
        self.visible = false;
        self.detached = true;
    }

    /// Rows sharing the exact x value, if any.
    pub fn points_at(&self, x: f64) -> Option<&[P]> {
        let i = self.xs.partition_point(|v| v.total_cmp(&x).is_lt());
        (self.xs.get(i) == Some(&x)).then(|| self.buckets[i].as_slice())
    }

    /// Current guide-line screen x, `None` while hidden.
    pub fn guide_x(&self) -> Option<f64> {
        self.guide_x
    }

    /// Pixel y-interval the guide line spans.
    pub fn guide_range(&self) -> (f64, f64) {
        self.guide_range
    }

    pub fn is_detached(&self) -> bool {
        self.detached
    }
}

/// Index of the value in sorted `xs` nearest to `target`, comparing the
/// candidate against its left neighbor and breaking ties toward the
/// lower index.
fn bisect_center(xs: &[f64], target: f64) -> usize {
    debug_assert!(!xs.is_empty());
    let i = xs.partition_point(|v| v.total_cmp(&target).is_lt());
    if i == 0 {
        return 0;
    }
    if i == xs.len() {
        return xs.len() - 1;
    }
    if target - xs[i - 1] <= xs[i] - target {
        i - 1
    } else {
        i
    }
}
