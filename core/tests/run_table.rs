use epiviz_core::run_table::RunTable;
use epiviz_core::scenario::{DetectionSample, GroupedSample, ScenarioRun};
use epiviz_core::types::{MitigationType, OutputType};
use std::collections::BTreeMap;

// ── Helpers ──────────────────────────────────────────────────────────────────

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// A fully populated run: every arm x output type x day x age group cell
/// filled with a value encoding its coordinates.
fn full_run(days: u32, age_groups: usize) -> ScenarioRun {
    let mut output = BTreeMap::new();
    for (arm_index, arm) in MitigationType::ALL.into_iter().enumerate() {
        let mut by_type = BTreeMap::new();
        for (type_index, output_type) in OutputType::ALL.into_iter().enumerate() {
            let samples = (0..days)
                .map(|day| GroupedSample {
                    time: day,
                    grouped_values: (0..age_groups)
                        .map(|g| {
                            (arm_index * 10_000 + type_index * 1_000 + day as usize * 10 + g)
                                as f64
                        })
                        .collect(),
                })
                .collect();
            by_type.insert(output_type, samples);
        }
        output.insert(arm, by_type);
    }
    ScenarioRun {
        output,
        p_detect: BTreeMap::new(),
    }
}

// ── Tests ────────────────────────────────────────────────────────────────────

/// Round-trip: one row per (arm, output type, day, age group), none
/// dropped, none duplicated, tuples intact.
#[test]
fn build_produces_one_row_per_quadruple() {
    init_logging();
    let run = full_run(3, 2);
    let built = RunTable::build(&run);

    assert_eq!(
        built.table.len(),
        2 * 4 * 3 * 2,
        "expected arms x types x days x groups rows"
    );

    let rows = built.table.objects();
    for arm in MitigationType::ALL {
        for output_type in OutputType::ALL {
            for day in 0..3u32 {
                for group in 0..2usize {
                    let matched: Vec<_> = rows
                        .iter()
                        .filter(|r| {
                            r.mitigation_type == arm
                                && r.output_type == output_type
                                && r.day == day
                                && r.age_group == group
                        })
                        .collect();
                    assert_eq!(
                        matched.len(),
                        1,
                        "exactly one row for ({arm}, {output_type}, {day}, {group})"
                    );
                }
            }
        }
    }
}

/// Values land verbatim — no aggregation or rounding at build time.
#[test]
fn values_are_verbatim() {
    let run = full_run(2, 2);
    let built = RunTable::build(&run);

    let row = built
        .table
        .iter()
        .find(|r| {
            r.mitigation_type == MitigationType::Mitigated
                && r.output_type == OutputType::DeathIncidence
                && r.day == 1
                && r.age_group == 1
        })
        .expect("row present");

    // Mitigated is arm_index 1, DeathIncidence is type_index 3.
    assert_eq!(row.value, (10_000 + 3 * 1_000 + 10 + 1) as f64);
}

/// Arm and output-type metadata come back in lexicographic order,
/// without a full-table scan being needed by callers.
#[test]
fn metadata_lists_are_lexicographic() {
    let run = full_run(1, 1);
    let built = RunTable::build(&run);

    assert_eq!(
        built.mitigation_types,
        vec![MitigationType::Mitigated, MitigationType::Unmitigated]
    );
    assert_eq!(
        built.output_types,
        vec![
            OutputType::DeathIncidence,
            OutputType::HospitalIncidence,
            OutputType::InfectionIncidence,
            OutputType::SymptomaticIncidence,
        ]
    );
}

/// Ragged grouped_values arrays are loaded as-is: no reconciliation, no
/// panic, and the uncovered group simply has no row for that day.
#[test]
fn ragged_group_arrays_load_without_error() {
    init_logging();
    let mut output = BTreeMap::new();
    let mut by_type = BTreeMap::new();
    by_type.insert(
        OutputType::InfectionIncidence,
        vec![
            GroupedSample {
                time: 0,
                grouped_values: vec![1.0, 2.0, 3.0],
            },
            GroupedSample {
                time: 1,
                grouped_values: vec![4.0],
            },
        ],
    );
    output.insert(MitigationType::Unmitigated, by_type);
    let run = ScenarioRun {
        output,
        p_detect: BTreeMap::new(),
    };

    let built = RunTable::build(&run);
    assert_eq!(built.table.len(), 4, "3 groups on day 0 + 1 group on day 1");
    assert!(
        !built
            .table
            .iter()
            .any(|r| r.day == 1 && r.age_group > 0),
        "day 1 must not grow rows for groups it never reported"
    );
}

/// Detection series are carried through as per-arm {x, y} points.
#[test]
fn detection_series_become_points() {
    let mut run = full_run(1, 1);
    run.p_detect.insert(
        MitigationType::Unmitigated,
        vec![
            DetectionSample {
                time: 0,
                value: 0.1,
            },
            DetectionSample {
                time: 1,
                value: 0.4,
            },
        ],
    );

    let built = RunTable::build(&run);
    let series = built
        .p_detect
        .get(&MitigationType::Unmitigated)
        .expect("detection series present");
    assert_eq!(series.len(), 2);
    assert_eq!(series[1].x, 1.0);
    assert_eq!(series[1].y, 0.4);
}

/// The runner accepts runs straight off the simulation-engine boundary
/// as JSON.
#[test]
fn scenario_run_parses_from_boundary_json() {
    let raw = r#"{
        "output": {
            "Unmitigated": {
                "InfectionIncidence": [
                    { "time": 0, "grouped_values": [10.0, 20.0] },
                    { "time": 1, "grouped_values": [30.0, 40.0] }
                ]
            }
        },
        "p_detect": {
            "Unmitigated": [ { "time": 0, "value": 0.05 } ]
        }
    }"#;

    let run: ScenarioRun = serde_json::from_str(raw).expect("boundary JSON parses");
    let built = RunTable::build(&run);
    assert_eq!(built.table.len(), 4);
    assert_eq!(built.mitigation_types, vec![MitigationType::Unmitigated]);
}
