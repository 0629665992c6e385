//! The simulation-engine boundary.
//!
//! A [`ScenarioRun`] is the nested structure returned by one simulation
//! invocation: per mitigation arm, per output type, an ordered series of
//! per-day samples broken down by age group. The analytical layer never
//! mutates a run — each new run fully replaces the previous one and is
//! flattened from scratch by the run table builder.
//!
//! Maps are BTreeMaps keyed by enums whose `Ord` is lexicographic by
//! canonical name, so iteration order (and therefore flattened row
//! order) is stable across rebuilds of logically identical data.

use crate::types::{Day, MitigationType, OutputType};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One day's output for every age group.
///
/// `grouped_values[g]` is the value for age group `g`. The builder loads
/// whatever groups are present; a run with ragged group arrays is loaded
/// as-is (the missing groups simply produce no rows for that day).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GroupedSample {
    pub time: Day,
    pub grouped_values: Vec<f64>,
}

/// One day's scalar detection probability.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DetectionSample {
    pub time: Day,
    pub value: f64,
}

/// Complete output of one simulation invocation.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScenarioRun {
    /// arm -> output type -> per-day grouped samples
    pub output: BTreeMap<MitigationType, BTreeMap<OutputType, Vec<GroupedSample>>>,
    /// arm -> per-day detection probability
    #[serde(default)]
    pub p_detect: BTreeMap<MitigationType, Vec<DetectionSample>>,
}

impl ScenarioRun {
    /// Arms present in this run, in lexicographic order.
    pub fn arms(&self) -> Vec<MitigationType> {
        self.output.keys().copied().collect()
    }

    /// Output types present in any arm, in lexicographic order.
    pub fn output_types(&self) -> Vec<OutputType> {
        let mut types: Vec<OutputType> = self
            .output
            .values()
            .flat_map(|by_type| by_type.keys().copied())
            .collect();
        types.sort();
        types.dedup();
        types
    }
}

// ── Mitigation policy parameters ─────────────────────────────────────────────
//
// The slice of the simulation parameter set the annotation layer needs:
// when each policy window starts and how long it runs. Everything else
// about the parameter set stays on the far side of the boundary.

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct VaccinePolicy {
    pub enabled: bool,
    /// Day the campaign begins administering doses.
    pub start: Day,
    pub doses_available: f64,
    /// Doses administered per day.
    pub administration_rate: f64,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct CommunityPolicy {
    pub enabled: bool,
    pub start: Day,
    pub duration: Day,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct MitigationPolicy {
    pub vaccine: VaccinePolicy,
    pub community: CommunityPolicy,
}

impl Default for MitigationPolicy {
    fn default() -> Self {
        Self {
            vaccine: VaccinePolicy {
                enabled: false,
                start: 0,
                doses_available: 0.0,
                administration_rate: 1.0,
            },
            community: CommunityPolicy {
                enabled: false,
                start: 0,
                duration: 0,
            },
        }
    }
}
