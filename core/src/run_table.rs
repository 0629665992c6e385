//! Run table builder — flattens one [`ScenarioRun`] into row form.
//!
//! One row per (arm, output type, day, age group) quadruple, value taken
//! verbatim from the grouped sample. Nothing is aggregated or rounded
//! here; the recipes layer does that on top of the table.
//!
//! Ordering guarantee: arms and output types are visited in lexicographic
//! key order (the BTreeMap order of the scenario structure), days and age
//! groups in their series order. Rebuilding from logically identical
//! input therefore yields row-for-row identical output — tests and
//! memoized re-renders depend on it.
//!
//! Ragged input: if `grouped_values` lengths differ across samples the
//! builder loads exactly what is present and does not reconcile or error.
//! Downstream consumers that assume a uniform group count must treat an
//! uncovered (day, group) cell as absent.

use crate::scenario::ScenarioRun;
use crate::table::{PointRow, PointTable};
use crate::types::{MitigationType, OutputType};
use std::collections::BTreeMap;

/// A point on a prepared chart series, in data space.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct SeriesPoint {
    pub x: f64,
    pub y: f64,
}

/// The flattened analytical form of one scenario run.
#[derive(Debug, Clone)]
pub struct RunTable {
    pub table: PointTable,
    /// Arms present, lexicographic. Drives legends without a table scan.
    pub mitigation_types: Vec<MitigationType>,
    /// Output types present, lexicographic. Drives facet columns.
    pub output_types: Vec<OutputType>,
    /// Per-arm detection probability series, already in `{x, y}` form.
    pub p_detect: BTreeMap<MitigationType, Vec<SeriesPoint>>,
}

impl RunTable {
    pub fn build(run: &ScenarioRun) -> RunTable {
        let mut table = PointTable::new();

        for (&mitigation_type, by_output) in &run.output {
            for (&output_type, samples) in by_output {
                for sample in samples {
                    for (age_group, &value) in sample.grouped_values.iter().enumerate() {
                        table.push(PointRow {
                            day: sample.time,
                            value,
                            age_group,
                            output_type,
                            mitigation_type,
                        });
                    }
                }
            }
        }

        let p_detect = run
            .p_detect
            .iter()
            .map(|(&arm, samples)| {
                let series = samples
                    .iter()
                    .map(|s| SeriesPoint {
                        x: f64::from(s.time),
                        y: s.value,
                    })
                    .collect();
                (arm, series)
            })
            .collect();

        let run_table = RunTable {
            mitigation_types: run.arms(),
            output_types: run.output_types(),
            p_detect,
            table,
        };

        log::debug!(
            "run table built: {} rows, {} arms, {} output types",
            run_table.table.len(),
            run_table.mitigation_types.len(),
            run_table.output_types.len(),
        );

        run_table
    }
}
