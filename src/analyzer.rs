//! Trigger spacing analysis
use std::cmp::Ordering;

use itertools::Itertools;
use log::debug;

use crate::{
    cfg::BaselineWindow,
    path::Trajectory,
    record::{GeodeticRecord, TriggerRecord},
    stats::{median, Averager},
};

/// Baseline spacing between consecutive recorded triggers
#[derive(Debug, Copy, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GapStatistics {
    /// Shortest spacing (m)
    pub minimum_spacing_m: f64,
    /// Median spacing (m)
    pub median_spacing_m: f64,
    /// Mean spacing (m)
    pub mean_spacing_m: f64,
}

impl GapStatistics {
    /// Derives [GapStatistics] from a distance series, None if empty
    pub fn from_distances(distances: &[f64]) -> Option<Self> {
        let median_spacing_m = median(distances)?;
        let (minimum_spacing_m, mean_spacing_m) =
            distances.iter().copied().collect::<Averager>().min_mean()?;
        Some(Self {
            minimum_spacing_m,
            median_spacing_m,
            mean_spacing_m,
        })
    }
}

/// Interval between two consecutive recorded triggers
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Gap {
    /// Index of the opening trigger, in the sorted trigger list
    pub index: usize,
    /// Path distance between both triggers (m)
    pub distance_m: f64,
    /// True when the dense log did not cover this interval and
    /// the direct point to point distance was used
    pub direct: bool,
}

/// Result of the [analyze] process
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GapAnalysis {
    /// Recorded triggers, sorted in chronological order, with their
    /// path distance from the previous trigger
    pub triggers: Vec<TriggerRecord>,
    /// One [Gap] per consecutive trigger pair
    pub gaps: Vec<Gap>,
    /// Baseline statistics, None with less than 2 triggers
    pub statistics: Option<GapStatistics>,
}

/// True path distance between two records: sum of the dense sample
/// segments within [a, b], or direct distance when less than 2 dense
/// samples cover that window. Returns the distance and whether it is direct.
pub fn path_distance_m(
    a: &GeodeticRecord,
    b: &GeodeticRecord,
    trajectory: &Trajectory,
) -> (f64, bool) {
    match trajectory.path_length_m(a.gpst_seconds(), b.gpst_seconds()) {
        Some(distance) => (distance, false),
        None => (a.distance_m(b), true),
    }
}

/// Measures the path distance between every consecutive trigger pair
/// and derives the baseline spacing statistics.
pub fn analyze(
    triggers: &[TriggerRecord],
    trajectory: &Trajectory,
    baseline: BaselineWindow,
) -> GapAnalysis {
    let mut triggers = triggers
        .iter()
        .sorted_by(|a, b| {
            a.record
                .time
                .partial_cmp(&b.record.time)
                .unwrap_or(Ordering::Equal)
        })
        .cloned()
        .collect::<Vec<_>>();

    let gaps = triggers
        .iter()
        .tuple_windows()
        .enumerate()
        .map(|(index, (prev, next))| {
            let (distance_m, direct) = path_distance_m(&prev.record, &next.record, trajectory);
            if direct {
                debug!(
                    "{} - {}: not covered by dense log, direct distance {:.3}m",
                    prev.record.time, next.record.time, distance_m
                );
            }
            Gap {
                index,
                distance_m,
                direct,
            }
        })
        .collect::<Vec<_>>();

    for gap in gaps.iter() {
        triggers[gap.index + 1].path_distance_from_prev_m = Some(gap.distance_m);
    }

    let distances = gaps.iter().map(|gap| gap.distance_m).collect::<Vec<_>>();
    let statistics = GapStatistics::from_distances(baseline.select(&distances));

    if let Some(stats) = &statistics {
        debug!(
            "baseline spacing: min={:.3}m median={:.3}m mean={:.3}m ({} intervals)",
            stats.minimum_spacing_m,
            stats.median_spacing_m,
            stats.mean_spacing_m,
            baseline.select(&distances).len()
        );
    }

    GapAnalysis {
        triggers,
        gaps,
        statistics,
    }
}

#[cfg(test)]
mod test {
    use super::{analyze, GapStatistics};
    use crate::{
        cfg::BaselineWindow,
        path::Trajectory,
        record::{GeodeticRecord, TriggerRecord},
        time::GpsTime,
    };

    /// ~1.112m of latitude
    const STEP_DEG: f64 = 1.0E-5;

    fn record(tow_s: f64, lat: f64, lon: f64) -> GeodeticRecord {
        GeodeticRecord::new(GpsTime::new(2360, tow_s), lat, lon, 100.0)
    }

    fn trigger(tow_s: f64, lat: f64, lon: f64) -> TriggerRecord {
        TriggerRecord::original(record(tow_s, lat, lon))
    }

    #[test]
    fn statistics() {
        let stats = GapStatistics::from_distances(&[20.0, 20.0, 20.0, 100.0]).unwrap();
        assert_eq!(stats.minimum_spacing_m, 20.0);
        assert_eq!(stats.median_spacing_m, 20.0);
        assert_eq!(stats.mean_spacing_m, 40.0);
        assert!(GapStatistics::from_distances(&[]).is_none());
    }

    #[test]
    fn path_distance_not_chord() {
        // U turn: 100 samples north, 100 samples back south, 1m east
        let mut samples = Vec::new();
        for i in 0..=100 {
            samples.push(record(i as f64, 45.0 + i as f64 * STEP_DEG, 7.0));
        }
        for i in 0..=100 {
            samples.push(record(101.0 + i as f64, 45.0 + (100 - i) as f64 * STEP_DEG, 7.00001));
        }
        let trajectory = Trajectory::new(samples);

        let triggers = vec![trigger(0.0, 45.0, 7.0), trigger(201.0, 45.0, 7.00001)];

        let analysis = analyze(&triggers, &trajectory, BaselineWindow::Full);
        assert_eq!(analysis.gaps.len(), 1);
        let gap = analysis.gaps[0];
        assert!(!gap.direct);

        let chord = triggers[0].record.distance_m(&triggers[1].record);
        assert!(chord < 1.0);
        assert!(gap.distance_m > 220.0, "{}", gap.distance_m);
    }

    #[test]
    fn sorting_and_distances() {
        let trajectory = Trajectory::new(
            (0..=30)
                .map(|i| record(i as f64, 45.0 + i as f64 * STEP_DEG, 7.0))
                .collect(),
        );

        // out of order
        let triggers = vec![
            trigger(30.0, 45.0 + 30.0 * STEP_DEG, 7.0),
            trigger(0.0, 45.0, 7.0),
            trigger(10.0, 45.0 + 10.0 * STEP_DEG, 7.0),
        ];

        let analysis = analyze(&triggers, &trajectory, BaselineWindow::Full);
        assert_eq!(analysis.triggers[0].record.time.tow_s, 0.0);
        assert_eq!(analysis.triggers[2].record.time.tow_s, 30.0);

        assert!(analysis.triggers[0].path_distance_from_prev_m.is_none());
        let d1 = analysis.triggers[1].path_distance_from_prev_m.unwrap();
        let d2 = analysis.triggers[2].path_distance_from_prev_m.unwrap();
        assert!((d2 - 2.0 * d1).abs() < 1.0E-6);

        let stats = analysis.statistics.unwrap();
        assert_eq!(stats.minimum_spacing_m, d1);
        assert!((stats.median_spacing_m - 1.5 * d1).abs() < 1.0E-6);
    }

    #[test]
    fn direct_fallback() {
        let trajectory = Trajectory::default();
        let triggers = vec![trigger(0.0, 45.0, 7.0), trigger(10.0, 45.001, 7.0)];
        let analysis = analyze(&triggers, &trajectory, BaselineWindow::Full);
        assert!(analysis.gaps[0].direct);
        let chord = triggers[0].record.distance_m(&triggers[1].record);
        assert_eq!(analysis.gaps[0].distance_m, chord);
    }

    #[test]
    fn leading_window() {
        let trajectory = Trajectory::default();
        let triggers = vec![
            trigger(0.0, 45.0, 7.0),
            trigger(1.0, 45.0 + 5.0 * STEP_DEG, 7.0),
            trigger(2.0, 45.0 + 25.0 * STEP_DEG, 7.0),
            trigger(3.0, 45.0 + 45.0 * STEP_DEG, 7.0),
        ];
        let full = analyze(&triggers, &trajectory, BaselineWindow::Full);
        let leading = analyze(&triggers, &trajectory, BaselineWindow::Leading(1));
        assert_eq!(full.gaps.len(), 3);
        assert_eq!(leading.gaps.len(), 3);
        let full = full.statistics.unwrap();
        let leading = leading.statistics.unwrap();
        assert_eq!(full.minimum_spacing_m, leading.minimum_spacing_m);
        assert!(leading.median_spacing_m < full.median_spacing_m);
    }

    #[test]
    fn not_enough_triggers() {
        let trajectory = Trajectory::default();
        for triggers in [vec![], vec![trigger(0.0, 45.0, 7.0)]] {
            let analysis = analyze(&triggers, &trajectory, BaselineWindow::Full);
            assert!(analysis.gaps.is_empty());
            assert!(analysis.statistics.is_none());
            assert_eq!(analysis.triggers.len(), triggers.len());
        }
    }
}
