//! Linear pixel <-> data coordinate mapping for one chart axis.
//!
//! The rendering boundary hands this layer its already-computed axis
//! scales; everything here (cursor, dodge, annotation widths) only needs
//! the apply/invert pair. A scale that cannot invert is useless for
//! cursor resolution, so degenerate domains and ranges are rejected at
//! construction — configuration errors are fatal, not deferred.

use crate::error::{VizError, VizResult};

#[derive(Debug, Clone, Copy)]
pub struct LinearScale {
    axis: &'static str,
    domain: (f64, f64),
    range: (f64, f64),
}

impl LinearScale {
    /// Build a scale mapping `domain` (data space) onto `range` (pixels).
    /// Either interval having zero span is a configuration error.
    pub fn new(axis: &'static str, domain: (f64, f64), range: (f64, f64)) -> VizResult<Self> {
        if domain.0 == domain.1 {
            return Err(VizError::DegenerateDomain {
                axis,
                lo: domain.0,
                hi: domain.1,
            });
        }
        if range.0 == range.1 {
            return Err(VizError::DegenerateRange {
                axis,
                lo: range.0,
                hi: range.1,
            });
        }
        Ok(Self {
            axis,
            domain,
            range,
        })
    }

    pub fn axis(&self) -> &'static str {
        self.axis
    }

    /// Data -> pixel.
    pub fn apply(&self, v: f64) -> f64 {
        let t = (v - self.domain.0) / (self.domain.1 - self.domain.0);
        self.range.0 + t * (self.range.1 - self.range.0)
    }

    /// Pixel -> data. Always defined: construction rejected zero spans.
    pub fn invert(&self, px: f64) -> f64 {
        let t = (px - self.range.0) / (self.range.1 - self.range.0);
        self.domain.0 + t * (self.domain.1 - self.domain.0)
    }

    /// Convert a pixel extent into the data-space span it covers.
    /// Used for the annotation text-width heuristic.
    pub fn invert_extent(&self, px: f64) -> f64 {
        (self.invert(self.range.0 + px) - self.domain.0).abs()
    }
}

/// The x/y pair a rendered chart exposes.
#[derive(Debug, Clone, Copy)]
pub struct ScalePair {
    pub x: LinearScale,
    pub y: LinearScale,
}
