//! Process-wide run state: one owned slot holding the current run's
//! flattened table.
//!
//! The simulation is re-run (debounced, upstream of this crate) whenever
//! parameters change; each completed run is ingested here and fully
//! replaces the previous one. There is no partial update and no shared
//! mutable table — readers borrow the immutable [`RunTable`] and derive
//! whatever aggregations they need from it.

use crate::run_table::RunTable;
use crate::scenario::ScenarioRun;

#[derive(Debug, Default)]
pub struct Session {
    current: Option<RunTable>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the current run wholesale. Dependent cursors must be torn
    /// down and rebuilt by the chart layer; this slot only owns the data.
    pub fn ingest(&mut self, run: &ScenarioRun) -> &RunTable {
        let table = RunTable::build(run);
        log::info!(
            "scenario run ingested: {} rows across {} arms",
            table.table.len(),
            table.mitigation_types.len(),
        );
        self.current.insert(table)
    }

    /// Drop the current run without a replacement.
    pub fn clear(&mut self) {
        self.current = None;
    }

    pub fn current(&self) -> Option<&RunTable> {
        self.current.as_ref()
    }
}
