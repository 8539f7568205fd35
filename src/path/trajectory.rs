use std::cmp::Ordering;

use itertools::Itertools;

use crate::record::GeodeticRecord;

/// Dense position log, sorted in chronological order once at construction.
/// [Trajectory] is the ground truth of the flown path shape and is never
/// modified afterwards.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Trajectory {
    samples: Vec<GeodeticRecord>,
}

impl Trajectory {
    /// Builds a new [Trajectory] from samples in any order
    pub fn new(mut samples: Vec<GeodeticRecord>) -> Self {
        samples.sort_by(|a, b| a.time.partial_cmp(&b.time).unwrap_or(Ordering::Equal));
        Self { samples }
    }

    pub fn samples(&self) -> &[GeodeticRecord] {
        &self.samples
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Samples within [t0_s, t1_s] (continuous GPST seconds, bounds included)
    pub fn window(&self, t0_s: f64, t1_s: f64) -> &[GeodeticRecord] {
        let start = self.samples.partition_point(|s| s.gpst_seconds() < t0_s);
        let end = self.samples.partition_point(|s| s.gpst_seconds() <= t1_s);
        if start < end {
            &self.samples[start..end]
        } else {
            &[]
        }
    }

    /// Samples within ]t0_s, t1_s[ (bounds excluded)
    pub fn inner_window(&self, t0_s: f64, t1_s: f64) -> &[GeodeticRecord] {
        let start = self.samples.partition_point(|s| s.gpst_seconds() <= t0_s);
        let end = self.samples.partition_point(|s| s.gpst_seconds() < t1_s);
        if start < end {
            &self.samples[start..end]
        } else {
            &[]
        }
    }

    /// Sum of the great circle distances between consecutive samples
    /// within [t0_s, t1_s]. None when less than 2 samples lie in that window.
    pub fn path_length_m(&self, t0_s: f64, t1_s: f64) -> Option<f64> {
        let window = self.window(t0_s, t1_s);
        if window.len() < 2 {
            return None;
        }
        Some(
            window
                .iter()
                .tuple_windows()
                .map(|(a, b)| a.distance_m(b))
                .sum(),
        )
    }

    /// Time span between first and last sample (s)
    pub fn duration_s(&self) -> f64 {
        match (self.samples.first(), self.samples.last()) {
            (Some(first), Some(last)) if self.samples.len() > 1 => {
                last.time.seconds_since(&first.time)
            },
            _ => 0.0,
        }
    }
}
