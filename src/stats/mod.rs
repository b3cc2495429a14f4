//! Running annotation statistics.
//!
//! [`StatsAccumulator`] folds every constructed record into a set of
//! monotonic aggregates: a detection count, the set of categories seen,
//! and extrema over record dimensions and detection areas. Nothing is ever
//! recomputed or removed; minima only shrink, maxima only grow.

mod report;

pub use report::StatsSnapshot;

use std::collections::BTreeSet;

use tracing::trace;

use crate::record::Record;

/// Monotonic aggregates over every observed record.
#[derive(Clone, Debug, Default)]
pub struct StatsAccumulator {
    records_observed: usize,
    total_detections: usize,
    categories: BTreeSet<String>,
    width: Extrema<u32>,
    height: Extrema<u32>,
    detection_area: Extrema<i64>,
}

/// A running `(min, max)` pair, empty until the first value.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
struct Extrema<T> {
    min: Option<T>,
    max: Option<T>,
}

impl<T: Copy + Ord> Extrema<T> {
    fn update(&mut self, value: T) {
        self.min = Some(self.min.map_or(value, |m| m.min(value)));
        self.max = Some(self.max.map_or(value, |m| m.max(value)));
    }
}

impl StatsAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one record into the aggregates.
    ///
    /// Registers the record's width and height, every detection category and
    /// area, and adds the detection count to the running total.
    pub fn observe(&mut self, record: &Record) {
        self.records_observed += 1;
        self.width.update(record.width());
        self.height.update(record.height());

        for detection in record.detections() {
            if !self.categories.contains(detection.category()) {
                self.categories.insert(detection.category().to_owned());
            }
            self.detection_area.update(detection.area());
        }
        self.total_detections += record.detections().len();

        trace!(
            key = record.key(),
            total_detections = self.total_detections,
            categories = self.categories.len(),
            "observed record"
        );
    }

    /// Number of `observe` calls so far.
    pub fn records_observed(&self) -> usize {
        self.records_observed
    }

    pub fn total_detections(&self) -> usize {
        self.total_detections
    }

    /// Every category seen so far, sorted.
    pub fn categories(&self) -> &BTreeSet<String> {
        &self.categories
    }

    pub fn min_width(&self) -> Option<u32> {
        self.width.min
    }

    pub fn max_width(&self) -> Option<u32> {
        self.width.max
    }

    pub fn min_height(&self) -> Option<u32> {
        self.height.min
    }

    pub fn max_height(&self) -> Option<u32> {
        self.height.max
    }

    pub fn min_detection_area(&self) -> Option<i64> {
        self.detection_area.min
    }

    pub fn max_detection_area(&self) -> Option<i64> {
        self.detection_area.max
    }

    /// Largest observed record width, or 0 before any observation.
    ///
    /// Used as the default upper width bound of dimension queries.
    pub fn max_width_or_zero(&self) -> u32 {
        self.width.max.unwrap_or(0)
    }

    /// Largest observed record height, or 0 before any observation.
    pub fn max_height_or_zero(&self) -> u32 {
        self.height.max.unwrap_or(0)
    }

    /// Copy the current aggregates into a report.
    ///
    /// `records_loaded` is the catalog size, which can be smaller than
    /// [`records_observed`](Self::records_observed) when duplicates were
    /// rejected.
    pub fn snapshot(&self, records_loaded: usize) -> StatsSnapshot {
        StatsSnapshot {
            records_loaded,
            records_observed: self.records_observed,
            total_detections: self.total_detections,
            categories: self.categories.iter().cloned().collect(),
            min_width: self.width.min,
            max_width: self.width.max,
            min_height: self.height.min,
            max_height: self.height.max,
            min_detection_area: self.detection_area.min,
            max_detection_area: self.detection_area.max,
        }
    }
}
