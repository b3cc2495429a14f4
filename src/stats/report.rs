//! Stats report type and terminal formatting.

use serde::Serialize;
use std::fmt;

/// A point-in-time copy of the running statistics.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct StatsSnapshot {
    /// Records currently in the catalog.
    pub records_loaded: usize,
    /// Records folded into the statistics (may exceed `records_loaded`).
    pub records_observed: usize,
    /// Total detections across every observed record.
    pub total_detections: usize,
    /// Every category seen, sorted.
    pub categories: Vec<String>,
    pub min_width: Option<u32>,
    pub max_width: Option<u32>,
    pub min_height: Option<u32>,
    pub max_height: Option<u32>,
    pub min_detection_area: Option<i64>,
    pub max_detection_area: Option<i64>,
}

impl fmt::Display for StatsSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Number of loaded records: {}", self.records_loaded)?;
        writeln!(f, "Total number of detections: {}", self.total_detections)?;
        writeln!(f, "Detection categories: {}", self.categories.join(", "))?;
        writeln!(f, "Minimum record height: {}", fmt_opt(self.min_height))?;
        writeln!(f, "Maximum record height: {}", fmt_opt(self.max_height))?;
        writeln!(f, "Minimum record width: {}", fmt_opt(self.min_width))?;
        writeln!(f, "Maximum record width: {}", fmt_opt(self.max_width))?;
        writeln!(
            f,
            "Minimum detection area: {}",
            fmt_opt(self.min_detection_area)
        )?;
        writeln!(
            f,
            "Maximum detection area: {}",
            fmt_opt(self.max_detection_area)
        )
    }
}

fn fmt_opt<T: fmt::Display>(value: Option<T>) -> String {
    value
        .map(|v| v.to_string())
        .unwrap_or_else(|| "-".to_string())
}
