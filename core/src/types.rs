//! Shared primitive types used across the analytical layer.

use crate::error::VizError;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

/// A simulated day. Day 0 is the first day of the scenario.
pub type Day = u32;

/// Index into the scenario's age-group partition.
pub type AgeGroup = usize;

/// One mitigation-policy arm of a scenario run.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum MitigationType {
    Unmitigated,
    Mitigated,
}

impl MitigationType {
    pub const ALL: [MitigationType; 2] = [MitigationType::Unmitigated, MitigationType::Mitigated];

    pub fn as_str(&self) -> &'static str {
        match self {
            MitigationType::Unmitigated => "Unmitigated",
            MitigationType::Mitigated => "Mitigated",
        }
    }
}

// Ordering is lexicographic by canonical name, NOT declaration order.
// The run table builder iterates BTreeMaps keyed by these types and the
// resulting row order must be identical across rebuilds.
impl Ord for MitigationType {
    fn cmp(&self, other: &Self) -> Ordering {
        self.as_str().cmp(other.as_str())
    }
}

impl PartialOrd for MitigationType {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for MitigationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MitigationType {
    type Err = VizError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Unmitigated" => Ok(MitigationType::Unmitigated),
            "Mitigated" => Ok(MitigationType::Mitigated),
            other => Err(VizError::UnknownMitigation(other.to_string())),
        }
    }
}

/// One kind of per-day model output.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum OutputType {
    InfectionIncidence,
    SymptomaticIncidence,
    HospitalIncidence,
    DeathIncidence,
}

impl OutputType {
    pub const ALL: [OutputType; 4] = [
        OutputType::InfectionIncidence,
        OutputType::SymptomaticIncidence,
        OutputType::HospitalIncidence,
        OutputType::DeathIncidence,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            OutputType::InfectionIncidence => "InfectionIncidence",
            OutputType::SymptomaticIncidence => "SymptomaticIncidence",
            OutputType::HospitalIncidence => "HospitalIncidence",
            OutputType::DeathIncidence => "DeathIncidence",
        }
    }

    /// Human-readable chart heading for one output type.
    pub fn label(&self) -> &'static str {
        match self {
            OutputType::InfectionIncidence => "Infections",
            OutputType::SymptomaticIncidence => "Symptomatic Infections",
            OutputType::HospitalIncidence => "Hospitalizations",
            OutputType::DeathIncidence => "Deaths",
        }
    }
}

// Same rule as MitigationType: lexicographic by canonical name.
impl Ord for OutputType {
    fn cmp(&self, other: &Self) -> Ordering {
        self.as_str().cmp(other.as_str())
    }
}

impl PartialOrd for OutputType {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for OutputType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OutputType {
    type Err = VizError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "InfectionIncidence" => Ok(OutputType::InfectionIncidence),
            "SymptomaticIncidence" => Ok(OutputType::SymptomaticIncidence),
            "HospitalIncidence" => Ok(OutputType::HospitalIncidence),
            "DeathIncidence" => Ok(OutputType::DeathIncidence),
            other => Err(VizError::UnknownOutputType(other.to_string())),
        }
    }
}
