//! Policy annotations — labelled day windows drawn under the mitigation
//! chart, with a deterministic text-collision heuristic.
//!
//! Each enabled mitigation policy contributes one window (vaccination
//! campaign, community mitigation). Window y anchors are looked up from
//! the mitigated series; a window whose anchor day has no data point is
//! dropped with a warning rather than crashing the dashboard — that can
//! legitimately happen when a policy starts after the simulated horizon.
//!
//! Collisions between adjacent window labels are resolved with a fixed
//! per-character width estimate, not real text metrics: if the estimated
//! label width (in data units) exceeds the gap between window starts,
//! the later label is pushed down by two line heights.

use crate::format::short_number;
use crate::run_table::SeriesPoint;
use crate::scale::LinearScale;
use crate::scenario::MitigationPolicy;
use crate::types::Day;

/// Length of the vertical tick dropped below the axis, pixels.
pub const RULE_LENGTH_PX: f64 = 30.0;
pub const TEXT_SIZE_PX: f64 = 12.0;
pub const LINE_HEIGHT_PX: f64 = 14.0;
/// Estimated rendered width of one label character.
const CHAR_WIDTH_PX: f64 = 8.0;

pub const VACCINE_COLOR: &str = "var(--purple)";
pub const COMMUNITY_COLOR: &str = "var(--pink)";

/// One annotated policy window, ready for the rendering layer.
#[derive(Debug, Clone, PartialEq)]
pub struct Annotation {
    pub start_day: Day,
    pub end_day: Day,
    /// Curve y at the window's start and (clamped) end day.
    pub start_y: f64,
    pub end_y: f64,
    /// Vertical text offset below the axis, pixels. Bumped by the
    /// collision scan.
    pub dy: f64,
    /// e.g. "Day 31–58".
    pub heading: String,
    pub detail: String,
    pub color: &'static str,
}

/// Annotations plus, per annotation, the mitigated-curve points inside
/// its window (used to highlight the curve segment).
#[derive(Debug, Clone, Default)]
pub struct AnnotationLayout {
    pub annotations: Vec<Annotation>,
    pub segments: Vec<Vec<SeriesPoint>>,
}

/// Build the annotation layer for one mitigated series.
pub fn policy_annotations(
    policy: &MitigationPolicy,
    mitigated: &[SeriesPoint],
    x_scale: &LinearScale,
) -> AnnotationLayout {
    let Some(last) = mitigated.last() else {
        return AnnotationLayout::default();
    };
    let last_day = last.x as Day;

    let mut annotations: Vec<Annotation> = Vec::new();

    let mut try_add = |start_day: Day, end_day: Day, detail: String, color: &'static str| {
        let end_clamped = end_day.min(last_day);
        let start_point = point_at(mitigated, start_day);
        let end_point = point_at(mitigated, end_clamped);
        match (start_point, end_point) {
            (Some(start), Some(end)) => annotations.push(Annotation {
                start_day,
                end_day,
                start_y: start.y,
                end_y: end.y,
                dy: RULE_LENGTH_PX + TEXT_SIZE_PX + 2.0,
                heading: format!("Day {start_day}\u{2013}{end_day}"),
                detail,
                color,
            }),
            _ => log::warn!(
                "no mitigated data point at day {start_day} or {end_clamped}; dropping '{detail}' annotation"
            ),
        }
    };

    if policy.vaccine.enabled {
        let start = policy.vaccine.start + 1;
        let campaign_days =
            (policy.vaccine.doses_available / policy.vaccine.administration_rate).ceil() as Day;
        try_add(
            start,
            start + campaign_days,
            format!(
                "{} vaccines administered",
                short_number(policy.vaccine.doses_available)
            ),
            VACCINE_COLOR,
        );
    }

    if policy.community.enabled {
        let start = policy.community.start + 1;
        try_add(
            start,
            start + policy.community.duration,
            "Community mitigation".to_string(),
            COMMUNITY_COLOR,
        );
    }

    annotations.sort_by_key(|a| a.start_day);

    // Adjacent-pair collision scan: push the later label down when the
    // earlier label's estimated width reaches past the later start.
    for i in 0..annotations.len().saturating_sub(1) {
        let width_px = annotations[i].detail.len() as f64 * CHAR_WIDTH_PX;
        let width_days = x_scale.invert_extent(width_px);
        let gap = f64::from(annotations[i + 1].start_day.abs_diff(annotations[i].start_day));
        if gap < width_days {
            annotations[i + 1].dy += LINE_HEIGHT_PX * 2.0;
        }
    }

    let segments = annotations
        .iter()
        .map(|annotation| {
            mitigated
                .iter()
                .copied()
                .filter(|p| {
                    p.x >= f64::from(annotation.start_day) && p.x <= f64::from(annotation.end_day)
                })
                .collect()
        })
        .collect();

    AnnotationLayout {
        annotations,
        segments,
    }
}

fn point_at(points: &[SeriesPoint], day: Day) -> Option<SeriesPoint> {
    points.iter().copied().find(|p| p.x == f64::from(day))
}
