//! epiviz-core — the analytical data layer behind the epidemic-scenario
//! dashboard.
//!
//! DATA FLOW (one direction, rebuilt wholesale per simulation run):
//!   ScenarioRun -> RunTable -> PointTable -> recipes -> per-chart
//!   point arrays -> ChartCursor / dodge at interaction time.
//!
//! RULES:
//!   - Tables are immutable; every query op returns a new value.
//!   - Configuration errors (degenerate scales, guide ranges) fail at
//!     construction. Data-quality anomalies (ragged groups, zero
//!     denominators) degrade gracefully with a logged warning.
//!   - No persistence, no retries: a new run replaces the old one and
//!     everything downstream is recomputed.

pub mod annotate;
pub mod cursor;
pub mod dodge;
pub mod error;
pub mod format;
pub mod recipes;
pub mod run_table;
pub mod scale;
pub mod scenario;
pub mod session;
pub mod synthetic;
pub mod table;
pub mod types;

pub use cursor::{ChartCursor, CursorHit};
pub use error::{VizError, VizResult};
pub use run_table::{RunTable, SeriesPoint};
pub use scale::{LinearScale, ScalePair};
pub use scenario::ScenarioRun;
pub use session::Session;
pub use table::{PointRow, PointTable};
pub use types::{AgeGroup, Day, MitigationType, OutputType};
