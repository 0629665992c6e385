//! Display formatting shared by axes, tooltips, and summary tables.
//!
//! The table engine never rounds; these helpers are where the display
//! rounding policy lives.

/// Round to the nearest thousand. The prevented-cases summary rounds
/// each cell with this BEFORE differencing.
pub fn round_to_thousand(n: f64) -> f64 {
    (n / 1000.0).round() * 1000.0
}

/// Group digits with commas: 1234567 -> "1,234,567".
pub fn thousands(n: f64) -> String {
    let negative = n < 0.0;
    let digits = format!("{:.0}", n.abs());
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    if negative {
        format!("-{out}")
    } else {
        out
    }
}

/// Compact annotation numbers: 40_000_000 -> "40.0M", 500_000 -> "500K".
pub fn short_number(n: f64) -> String {
    if n >= 1_000_000.0 {
        format!("{:.1}M", n / 1_000_000.0)
    } else if n >= 1_000.0 {
        format!("{:.0}K", (n / 1_000.0).round())
    } else {
        thousands(n)
    }
}

/// Axis magnitude policy: how tick values are scaled and what suffix the
/// axis label carries, chosen from the chart's maximum y.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickScale {
    Plain,
    Thousands,
    Millions,
}

impl TickScale {
    pub fn for_max(max_y: f64) -> TickScale {
        if max_y >= 1_000_000.0 {
            TickScale::Millions
        } else if max_y >= 10_000.0 {
            TickScale::Thousands
        } else {
            TickScale::Plain
        }
    }

    /// Suffix appended to the y-axis label, e.g. "Incidence (Millions)".
    pub fn label_suffix(&self) -> &'static str {
        match self {
            TickScale::Plain => "",
            TickScale::Thousands => " (Thousands)",
            TickScale::Millions => " (Millions)",
        }
    }

    pub fn extend_label(&self, label: &str) -> String {
        format!("{label}{}", self.label_suffix())
    }

    /// Format one tick value under this policy.
    pub fn format(&self, v: f64) -> String {
        match self {
            TickScale::Plain => thousands(v),
            TickScale::Thousands => format!("{:.0}", v / 1_000.0),
            TickScale::Millions => format!("{:.1}", v / 1_000_000.0),
        }
    }
}

/// Tooltip values are shown rounded to the nearest thousand, grouped.
pub fn tooltip_number(v: f64) -> String {
    thousands(round_to_thousand(v))
}
