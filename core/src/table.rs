//! Columnar point table — the query engine under every chart.
//!
//! A [`PointTable`] stores one `Vec` per field of [`PointRow`]; all
//! columns share length and row order, so index `i` across columns is
//! one logical row. Tables are immutable: every operation returns a new
//! table or an owned map, never touching the receiver.
//!
//! The operation set is deliberately small — exactly what the dashboard
//! recipes need:
//!   - `filter`       keep rows matching a predicate
//!   - `grouped`      partition rows by an arbitrary Ord key
//!   - `rollup_sum`   per-group sum of the value column
//!   - `rollup_max`   per-group max of the value column
//!   - `pivot_sum`    (group, category) -> summed value cells
//!   - `derive_value` recompute the value column row-by-row
//!   - `objects`      materialize plain rows
//!
//! Group keys are closures returning any `Ord` tuple, so composite keys
//! like `(arm, day)` are ordinary Rust tuples and a mistyped column is a
//! compile error rather than a silent `undefined`. Bound parameters are
//! whatever the closure captures. Sums and maxima accumulate in plain
//! f64 — rounding policy belongs to callers, via `derive_value`.

use crate::types::{AgeGroup, Day, MitigationType, OutputType};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One analytical row: one (day, age group, output type, arm) cell.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PointRow {
    pub day: Day,
    pub value: f64,
    pub age_group: AgeGroup,
    pub output_type: OutputType,
    pub mitigation_type: MitigationType,
}

/// Column-oriented container for [`PointRow`] data.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PointTable {
    day: Vec<Day>,
    value: Vec<f64>,
    age_group: Vec<AgeGroup>,
    output_type: Vec<OutputType>,
    mitigation_type: Vec<MitigationType>,
}

impl PointTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_rows<I: IntoIterator<Item = PointRow>>(rows: I) -> Self {
        let mut table = Self::new();
        for row in rows {
            table.push(row);
        }
        table
    }

    /// Append one row. Crate-private: tables are immutable once built,
    /// only the run table builder writes.
    pub(crate) fn push(&mut self, row: PointRow) {
        self.day.push(row.day);
        self.value.push(row.value);
        self.age_group.push(row.age_group);
        self.output_type.push(row.output_type);
        self.mitigation_type.push(row.mitigation_type);
    }

    /// Row count. All columns share it by construction.
    pub fn len(&self) -> usize {
        debug_assert_eq!(self.day.len(), self.value.len());
        debug_assert_eq!(self.day.len(), self.age_group.len());
        debug_assert_eq!(self.day.len(), self.output_type.len());
        debug_assert_eq!(self.day.len(), self.mitigation_type.len());
        self.day.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn row(&self, i: usize) -> PointRow {
        PointRow {
            day: self.day[i],
            value: self.value[i],
            age_group: self.age_group[i],
            output_type: self.output_type[i],
            mitigation_type: self.mitigation_type[i],
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = PointRow> + '_ {
        (0..self.len()).map(|i| self.row(i))
    }

    /// Materialize as plain rows, in table order.
    pub fn objects(&self) -> Vec<PointRow> {
        self.iter().collect()
    }

    // ── Query operations ─────────────────────────────────────────────────────

    /// Keep rows where the predicate holds. Row order is preserved.
    pub fn filter<F>(&self, pred: F) -> PointTable
    where
        F: Fn(&PointRow) -> bool,
    {
        Self::from_rows(self.iter().filter(|row| pred(row)))
    }

    /// Partition rows into groups by an arbitrary key, preserving row
    /// order within each group. Equivalent of `objects({grouped: true})`.
    pub fn grouped<K, F>(&self, key: F) -> BTreeMap<K, Vec<PointRow>>
    where
        K: Ord,
        F: Fn(&PointRow) -> K,
    {
        let mut groups: BTreeMap<K, Vec<PointRow>> = BTreeMap::new();
        for row in self.iter() {
            groups.entry(key(&row)).or_default().push(row);
        }
        groups
    }

    /// Per-group sum of the value column. Addition is commutative, so
    /// the result is independent of row order within a group.
    pub fn rollup_sum<K, F>(&self, key: F) -> BTreeMap<K, f64>
    where
        K: Ord,
        F: Fn(&PointRow) -> K,
    {
        let mut sums: BTreeMap<K, f64> = BTreeMap::new();
        for row in self.iter() {
            *sums.entry(key(&row)).or_insert(0.0) += row.value;
        }
        sums
    }

    /// Per-group maximum of the value column.
    pub fn rollup_max<K, F>(&self, key: F) -> BTreeMap<K, f64>
    where
        K: Ord,
        F: Fn(&PointRow) -> K,
    {
        let mut maxes: BTreeMap<K, f64> = BTreeMap::new();
        for row in self.iter() {
            maxes
                .entry(key(&row))
                .and_modify(|m| *m = m.max(row.value))
                .or_insert(row.value);
        }
        maxes
    }

    /// Pivot: for each group key, one summed cell per distinct category.
    /// A (group, category) pair with no source rows is simply absent —
    /// callers must treat missing cells as "no data", not zero.
    pub fn pivot_sum<K, C, FK, FC>(&self, group: FK, category: FC) -> BTreeMap<K, BTreeMap<C, f64>>
    where
        K: Ord,
        C: Ord,
        FK: Fn(&PointRow) -> K,
        FC: Fn(&PointRow) -> C,
    {
        let mut cells: BTreeMap<K, BTreeMap<C, f64>> = BTreeMap::new();
        for row in self.iter() {
            *cells
                .entry(group(&row))
                .or_default()
                .entry(category(&row))
                .or_insert(0.0) += row.value;
        }
        cells
    }

    /// Recompute the value column row-by-row. Row count and all other
    /// columns are unchanged.
    pub fn derive_value<F>(&self, f: F) -> PointTable
    where
        F: Fn(&PointRow) -> f64,
    {
        let mut derived = self.clone();
        for i in 0..derived.len() {
            let row = self.row(i);
            derived.value[i] = f(&row);
        }
        derived
    }

    // ── Whole-table aggregates ───────────────────────────────────────────────

    /// Maximum of the value column, `None` on an empty table.
    pub fn max_value(&self) -> Option<f64> {
        self.value.iter().copied().reduce(f64::max)
    }

    /// Last simulated day present, `None` on an empty table.
    pub fn max_day(&self) -> Option<Day> {
        self.day.iter().copied().max()
    }
}
