//! Seeded synthetic scenario generator.
//!
//! Stands in for the real simulation engine in the headless runner and
//! the integration tests: a plausible two-arm epidemic run with a
//! bell-shaped incidence curve, age-group shares, per-day jitter, and a
//! detection-probability ramp. Fully deterministic — the same seed
//! always produces the identical [`ScenarioRun`].
//!
//! Each arm draws from its own RNG stream derived from the master seed,
//! so enabling the mitigated arm never perturbs the unmitigated one.

use crate::scenario::{DetectionSample, GroupedSample, ScenarioRun};
use crate::types::{Day, MitigationType, OutputType};
use rand::{RngCore, SeedableRng};
use rand_pcg::Pcg64Mcg;
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy)]
pub struct SyntheticConfig {
    pub seed: u64,
    pub days: Day,
    pub age_groups: usize,
    /// Include the mitigated arm alongside the unmitigated baseline.
    pub mitigated: bool,
}

impl Default for SyntheticConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            days: 200,
            age_groups: 2,
            mitigated: true,
        }
    }
}

/// Per-arm deterministic stream, derived from the master seed.
struct ArmRng {
    inner: Pcg64Mcg,
}

impl ArmRng {
    fn new(master_seed: u64, arm_index: u64) -> Self {
        let derived = master_seed ^ arm_index.wrapping_mul(0x9e37_79b9_7f4a_7c15);
        Self {
            inner: Pcg64Mcg::seed_from_u64(derived),
        }
    }

    /// Float in [0.0, 1.0).
    fn next_f64(&mut self) -> f64 {
        let bits = self.inner.next_u64();
        (bits >> 11) as f64 * (1.0 / (1u64 << 53) as f64)
    }

    /// Multiplicative noise in [1 - spread, 1 + spread).
    fn jitter(&mut self, spread: f64) -> f64 {
        1.0 + (self.next_f64() * 2.0 - 1.0) * spread
    }
}

/// Shape of one arm's epidemic: where the infection curve peaks and how
/// hard mitigation damps it.
struct ArmShape {
    peak_day: f64,
    width: f64,
    scale: f64,
}

impl ArmShape {
    fn for_arm(arm: MitigationType, days: Day) -> Self {
        let days = f64::from(days);
        match arm {
            MitigationType::Unmitigated => Self {
                peak_day: days * 0.35,
                width: days * 0.12,
                scale: 120_000.0,
            },
            // Mitigation flattens and delays the curve.
            MitigationType::Mitigated => Self {
                peak_day: days * 0.35 + days * 0.08,
                width: days * 0.16,
                scale: 120_000.0 * 0.45,
            },
        }
    }

    fn incidence(&self, day: Day) -> f64 {
        let t = (f64::from(day) - self.peak_day) / self.width;
        self.scale * (-t * t).exp()
    }
}

/// Severity share and onset lag per output type, relative to infections.
fn severity(output_type: OutputType) -> (f64, Day) {
    match output_type {
        OutputType::InfectionIncidence => (1.0, 0),
        OutputType::SymptomaticIncidence => (0.6, 2),
        OutputType::HospitalIncidence => (0.05, 7),
        OutputType::DeathIncidence => (0.01, 14),
    }
}

pub fn generate(config: &SyntheticConfig) -> ScenarioRun {
    let mut arms = vec![MitigationType::Unmitigated];
    if config.mitigated {
        arms.push(MitigationType::Mitigated);
    }

    let mut output = BTreeMap::new();
    let mut p_detect = BTreeMap::new();

    for (arm_index, &arm) in arms.iter().enumerate() {
        let mut rng = ArmRng::new(config.seed, arm_index as u64);
        let shape = ArmShape::for_arm(arm, config.days);

        // Age-group population shares, normalized.
        let raw: Vec<f64> = (0..config.age_groups)
            .map(|_| 0.2 + rng.next_f64())
            .collect();
        let total: f64 = raw.iter().sum();
        let shares: Vec<f64> = raw.iter().map(|w| w / total).collect();

        let mut by_type: BTreeMap<OutputType, Vec<GroupedSample>> = BTreeMap::new();
        for output_type in OutputType::ALL {
            let (share, lag) = severity(output_type);
            let samples = (0..=config.days)
                .map(|day| {
                    let base = shape.incidence(day.saturating_sub(lag)) * share;
                    let grouped_values = shares
                        .iter()
                        .map(|group_share| base * group_share * rng.jitter(0.05))
                        .collect();
                    GroupedSample {
                        time: day,
                        grouped_values,
                    }
                })
                .collect();
            by_type.insert(output_type, samples);
        }
        output.insert(arm, by_type);

        // Detection probability ramps up as the outbreak grows.
        let midpoint = shape.peak_day * 0.6;
        let detection = (0..=config.days)
            .map(|day| {
                let t = (f64::from(day) - midpoint) / (shape.width * 0.5);
                DetectionSample {
                    time: day,
                    value: 0.8 / (1.0 + (-t).exp()),
                }
            })
            .collect();
        p_detect.insert(arm, detection);
    }

    ScenarioRun { output, p_detect }
}
