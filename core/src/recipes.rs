//! The fixed aggregation pipelines behind each dashboard view.
//!
//! These are not configurable engine behavior — each function is one
//! chart's (or table's) exact data-preparation policy:
//!   1. Per-arm time series for the mitigation comparison chart
//!   2. Faceted per-arm series with an optional shared y axis
//!   3. The prevented-cases summary table
//!   4. Peak labels with dodge-based collision avoidance
//!
//! Rounding happens here (display policy), never inside the table
//! engine.

use crate::dodge::{dodge, ChartPoint, Direction, DodgeBoxes};
use crate::format::round_to_thousand;
use crate::run_table::SeriesPoint;
use crate::scale::ScalePair;
use crate::table::PointTable;
use crate::types::{Day, MitigationType, OutputType};
use std::collections::BTreeMap;

/// Chart line colors. The unmitigated curve drops to the secondary color
/// whenever a mitigated curve is present to compare against.
pub const PRIMARY_COLOR: &str = "#000";
pub const SECONDARY_COLOR: &str = "#999";

/// A series point that still knows which arm it belongs to. This is the
/// flat per-chart shape the cursor engine consumes.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ArmPoint {
    pub x: f64,
    pub y: f64,
    pub mitigation_type: MitigationType,
}

impl ChartPoint for ArmPoint {
    fn x(&self) -> f64 {
        self.x
    }
    fn y(&self) -> f64 {
        self.y
    }
    fn with_position(&self, x: f64, y: f64) -> Self {
        Self { x, y, ..*self }
    }
}

// ── Time series by arm ───────────────────────────────────────────────────────

/// Filter to one output type, sum over age groups per (arm, day).
/// Each arm's series comes back sorted by day.
pub fn arm_series(
    table: &PointTable,
    output_type: OutputType,
) -> BTreeMap<MitigationType, Vec<SeriesPoint>> {
    let sums = table
        .filter(|row| row.output_type == output_type)
        .rollup_sum(|row| (row.mitigation_type, row.day));

    let mut series: BTreeMap<MitigationType, Vec<SeriesPoint>> = BTreeMap::new();
    for ((arm, day), y) in sums {
        series.entry(arm).or_default().push(SeriesPoint {
            x: f64::from(day),
            y,
        });
    }
    series
}

/// Flatten per-arm series into the single point array a chart (and its
/// cursor) renders from.
pub fn arm_points(series: &BTreeMap<MitigationType, Vec<SeriesPoint>>) -> Vec<ArmPoint> {
    series
        .iter()
        .flat_map(|(&arm, points)| {
            points.iter().map(move |p| ArmPoint {
                x: p.x,
                y: p.y,
                mitigation_type: arm,
            })
        })
        .collect()
}

/// Legend colors for the arms present.
pub fn arm_colors(arms: &[MitigationType]) -> BTreeMap<MitigationType, &'static str> {
    let has_mitigated = arms.contains(&MitigationType::Mitigated);
    arms.iter()
        .map(|&arm| {
            let color = match arm {
                MitigationType::Unmitigated if has_mitigated => SECONDARY_COLOR,
                _ => PRIMARY_COLOR,
            };
            (arm, color)
        })
        .collect()
}

// ── Faceted time series ──────────────────────────────────────────────────────

/// Per-facet arm series plus, when a shared y axis was requested, the
/// axis maxima applied uniformly to every facet.
#[derive(Debug, Clone)]
pub struct FacetedSeries<K: Ord> {
    pub facets: BTreeMap<K, BTreeMap<MitigationType, Vec<SeriesPoint>>>,
    /// Whole-chart maxima; `None` when each facet scales independently.
    pub max_x: Option<f64>,
    pub max_y: Option<f64>,
}

/// As [`arm_series`], additionally partitioned by a facet key. With
/// `shared_y_axis` the maxima are computed once over the per-(facet,
/// arm, day) sums of ALL facets — never per facet — so the small
/// multiples stay visually comparable.
pub fn faceted_arm_series<K, F>(
    table: &PointTable,
    pred: impl Fn(&crate::table::PointRow) -> bool,
    facet: F,
    shared_y_axis: bool,
) -> FacetedSeries<K>
where
    K: Ord + Copy,
    F: Fn(&crate::table::PointRow) -> K,
{
    let filtered = table.filter(pred);
    let sums = filtered.rollup_sum(|row| (facet(row), row.mitigation_type, row.day));

    let mut facets: BTreeMap<K, BTreeMap<MitigationType, Vec<SeriesPoint>>> = BTreeMap::new();
    let mut max_x = f64::NEG_INFINITY;
    let mut max_y = f64::NEG_INFINITY;
    for ((facet_key, arm, day), y) in sums {
        let x = f64::from(day);
        max_x = max_x.max(x);
        max_y = max_y.max(y);
        facets
            .entry(facet_key)
            .or_default()
            .entry(arm)
            .or_default()
            .push(SeriesPoint { x, y });
    }

    let (max_x, max_y) = if shared_y_axis && !facets.is_empty() {
        (Some(max_x), Some(max_y))
    } else {
        (None, None)
    };

    FacetedSeries {
        facets,
        max_x,
        max_y,
    }
}

// ── Prevented-cases summary ──────────────────────────────────────────────────

/// One row of the summary table. Cells absent from the source pivot stay
/// `None` — "no data", never zero.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct PreventedRow {
    pub group: String,
    /// Summed value per arm, rounded to the nearest thousand.
    pub unmitigated: Option<f64>,
    pub mitigated: Option<f64>,
    /// Unmitigated minus mitigated, from the rounded cells.
    pub prevented: Option<f64>,
    /// Prevented share of the rounded unmitigated total; `None` when the
    /// denominator is zero.
    pub prevented_pct: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct PreventedSummary {
    pub output_type: OutputType,
    /// Arms present in the source data, in display column order
    /// (unmitigated before mitigated).
    pub arms: Vec<MitigationType>,
    /// Whether both arms were present so prevented columns exist.
    pub has_prevented: bool,
    /// One row per age group present, then the "All ages" total row.
    pub rows: Vec<PreventedRow>,
}

/// Pivot age group x arm of summed values. Every cell is rounded to the
/// nearest thousand BEFORE the prevented delta is taken, and the
/// percentage divides by the rounded denominator. The "All ages" row is
/// a pre-pivot total — not a sum of the per-age rounded rows — so it
/// does not accumulate double-rounding drift.
pub fn prevented_summary(
    table: &PointTable,
    output_type: OutputType,
    group_labels: &[&str],
) -> PreventedSummary {
    let filtered = table.filter(|row| row.output_type == output_type);

    // The table shows the baseline column first, so arms follow the
    // ALL declaration order rather than the map's key order.
    let present = filtered.grouped(|row| row.mitigation_type);
    let arms: Vec<MitigationType> = MitigationType::ALL
        .into_iter()
        .filter(|arm| present.contains_key(arm))
        .collect();
    let has_prevented = arms.contains(&MitigationType::Unmitigated)
        && arms.contains(&MitigationType::Mitigated);

    let by_age = filtered.pivot_sum(|row| row.age_group, |row| row.mitigation_type);
    let all_ages = filtered.pivot_sum(|_| (), |row| row.mitigation_type);

    let mut rows = Vec::with_capacity(by_age.len() + 1);
    for (age_group, cells) in &by_age {
        let group = group_labels
            .get(*age_group)
            .map(|label| (*label).to_string())
            .unwrap_or_else(|| format!("Group {age_group}"));
        rows.push(prevented_row(group, cells, has_prevented));
    }
    if let Some(cells) = all_ages.get(&()) {
        rows.push(prevented_row("All ages".to_string(), cells, has_prevented));
    }

    PreventedSummary {
        output_type,
        arms,
        has_prevented,
        rows,
    }
}

fn prevented_row(
    group: String,
    cells: &BTreeMap<MitigationType, f64>,
    has_prevented: bool,
) -> PreventedRow {
    let unmitigated = cells
        .get(&MitigationType::Unmitigated)
        .map(|&v| round_to_thousand(v));
    let mitigated = cells
        .get(&MitigationType::Mitigated)
        .map(|&v| round_to_thousand(v));

    let prevented = match (has_prevented, unmitigated, mitigated) {
        (true, Some(u), Some(m)) => Some(u - m),
        _ => None,
    };
    let prevented_pct = match (prevented, unmitigated) {
        (Some(_), Some(u)) if u == 0.0 => {
            log::warn!("prevented share undefined for '{group}': unmitigated total is zero");
            None
        }
        (Some(p), Some(u)) => Some(p / u),
        _ => None,
    };

    PreventedRow {
        group,
        unmitigated,
        mitigated,
        prevented,
        prevented_pct,
    }
}

// ── Peak labels ──────────────────────────────────────────────────────────────

/// Peak-label box size and padding, pixels.
const PEAK_LABEL_WIDTH: f64 = 60.0;
const PEAK_LABEL_HEIGHT: f64 = 20.0;
const PEAK_LABEL_PADDING: f64 = 4.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PeakLabel {
    pub arm: MitigationType,
    pub at: SeriesPoint,
}

/// The highest point of a series; the earlier point wins a tie.
pub fn peak_of(points: &[SeriesPoint]) -> Option<SeriesPoint> {
    points.iter().copied().reduce(|best, p| {
        if p.y > best.y {
            p
        } else {
            best
        }
    })
}

/// One label per arm at its curve's peak. With both arms present the
/// unmitigated peak is the anchor of record and the mitigated label
/// yields downward when their boxes collide.
pub fn peak_labels(
    series: &BTreeMap<MitigationType, Vec<SeriesPoint>>,
    scales: &ScalePair,
) -> Vec<PeakLabel> {
    let unmitigated = series
        .get(&MitigationType::Unmitigated)
        .and_then(|points| peak_of(points));
    let mitigated = series
        .get(&MitigationType::Mitigated)
        .and_then(|points| peak_of(points));

    match (unmitigated, mitigated) {
        (Some(anchor), Some(yielding)) => {
            let boxes = DodgeBoxes::new(PEAK_LABEL_WIDTH, PEAK_LABEL_HEIGHT, Direction::Down)
                .padding(PEAK_LABEL_PADDING);
            let (anchor, yielding) = dodge(&anchor, &yielding, &boxes, &scales.x, &scales.y);
            vec![
                PeakLabel {
                    arm: MitigationType::Unmitigated,
                    at: anchor,
                },
                PeakLabel {
                    arm: MitigationType::Mitigated,
                    at: yielding,
                },
            ]
        }
        (Some(peak), None) => vec![PeakLabel {
            arm: MitigationType::Unmitigated,
            at: peak,
        }],
        (None, Some(peak)) => vec![PeakLabel {
            arm: MitigationType::Mitigated,
            at: peak,
        }],
        (None, None) => Vec::new(),
    }
}

/// Distinct days present for one output type — handy for cursor setup.
pub fn days_present(table: &PointTable, output_type: OutputType) -> Vec<Day> {
    table
        .filter(|row| row.output_type == output_type)
        .grouped(|row| row.day)
        .into_keys()
        .collect()
}
