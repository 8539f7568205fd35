//! Missing trigger synthesis
use log::{debug, info, warn};

use crate::{
    analyzer::{analyze, GapAnalysis},
    cfg::{BaselineWindow, Config},
    constants::SPACING_TOLERANCE_M,
    path::{interpolate, PathPoint, Trajectory},
    record::{GeodeticRecord, TriggerRecord},
    time::GpsTime,
};

/// Number of triggers missing in a gap of this path length, for this nominal
/// spacing: floor(distance / threshold) - 1, and zero when the gap does not
/// exceed the threshold.
pub fn missing_count(distance_m: f64, threshold_m: f64) -> usize {
    if !(threshold_m > 0.0 && distance_m > threshold_m) {
        return 0;
    }
    let count = (distance_m / threshold_m).floor() - 1.0;
    if count > 0.0 {
        count as usize
    } else {
        0
    }
}

/// [Synthesizer] fills the gaps of a trigger log with synthesized
/// triggers, evenly spaced along the flown path.
#[derive(Debug, Clone)]
pub struct Synthesizer {
    /// Nominal spacing, baseline median when None
    threshold_m: Option<f64>,
    /// Scaling of the baseline minimum spacing
    min_spacing_factor: f64,
    /// Polyline coalescing distance
    coalesce_m: f64,
    /// Baseline statistics window
    baseline: BaselineWindow,
}

impl Default for Synthesizer {
    fn default() -> Self {
        Self::new(&Config::default())
    }
}

impl Synthesizer {
    /// Builds a new [Synthesizer] from a (validated) [Config]
    pub fn new(cfg: &Config) -> Self {
        Self {
            threshold_m: cfg.threshold_m,
            min_spacing_factor: cfg.min_spacing_factor,
            coalesce_m: cfg.coalesce_distance_m,
            baseline: cfg.baseline,
        }
    }

    /// Analyzes the recorded triggers, then synthesizes the missing ones.
    pub fn synthesize(
        &self,
        triggers: &[TriggerRecord],
        trajectory: &Trajectory,
    ) -> Vec<TriggerRecord> {
        let analysis = analyze(triggers, trajectory, self.baseline);
        self.synthesize_gaps(&analysis, trajectory)
    }

    /// Resolves the nominal spacing applicable to this analysis
    pub fn threshold_m(&self, analysis: &GapAnalysis) -> Option<f64> {
        self.threshold_m
            .or_else(|| analysis.statistics.map(|stats| stats.median_spacing_m))
    }

    /// Synthesizes the missing triggers of previously analyzed gaps.
    /// Output follows gap order and is not merged with the recorded triggers.
    pub fn synthesize_gaps(
        &self,
        analysis: &GapAnalysis,
        trajectory: &Trajectory,
    ) -> Vec<TriggerRecord> {
        let mut synthesized = Vec::new();

        let stats = match analysis.statistics {
            Some(stats) => stats,
            None => {
                debug!("less than 2 triggers: nothing to synthesize");
                return synthesized;
            },
        };

        let threshold_m = match self.threshold_m(analysis) {
            Some(threshold) if threshold > 0.0 => threshold,
            threshold => {
                warn!("unusable trigger spacing threshold {:?}", threshold);
                return synthesized;
            },
        };

        let min_spacing_m = stats.minimum_spacing_m * self.min_spacing_factor;

        for gap in analysis.gaps.iter() {
            let missing = missing_count(gap.distance_m, threshold_m);
            if missing == 0 {
                continue;
            }

            let start = &analysis.triggers[gap.index].record;
            let end = &analysis.triggers[gap.index + 1].record;

            let filled = self.fill_gap(start, end, missing, min_spacing_m, trajectory);

            info!(
                "{} - {}: {:.3}m gap, {} missing, {} synthesized",
                start.time,
                end.time,
                gap.distance_m,
                missing,
                filled.len()
            );

            synthesized.extend(filled);
        }

        synthesized
    }

    /// Interpolates the missing triggers between two recorded ones and drops
    /// the candidates that would crowd a neighbor.
    fn fill_gap(
        &self,
        start: &GeodeticRecord,
        end: &GeodeticRecord,
        missing: usize,
        min_spacing_m: f64,
        trajectory: &Trajectory,
    ) -> Vec<TriggerRecord> {
        let interp = interpolate(
            &PathPoint::from(start),
            &PathPoint::from(end),
            missing,
            trajectory,
            self.coalesce_m,
        );

        let mut accepted = Vec::<(PathPoint, f64)>::with_capacity(interp.points.len());
        let mut last_cumulative_m = 0.0;

        for candidate in interp.points.iter() {
            let distance_m = candidate.point.cumulative_m - last_cumulative_m;
            if distance_m + SPACING_TOLERANCE_M < min_spacing_m {
                debug!(
                    "{:.3}s: candidate {:.3}m from previous trigger, dropped",
                    candidate.point.gpst_s, distance_m
                );
                continue;
            }
            last_cumulative_m = candidate.point.cumulative_m;
            accepted.push((candidate.point, distance_m));
        }

        if let Some((last, _)) = accepted.last() {
            let to_end_m = interp.distance_to_end_m(last);
            if to_end_m + SPACING_TOLERANCE_M < min_spacing_m {
                debug!(
                    "{:.3}s: candidate {:.3}m from next trigger, dropped",
                    last.gpst_s, to_end_m
                );
                accepted.pop();
            }
        }

        accepted
            .into_iter()
            .map(|(point, distance_m)| {
                let record = GeodeticRecord::new(
                    GpsTime::from_gpst_seconds(point.gpst_s),
                    point.latitude_deg,
                    point.longitude_deg,
                    point.height_m,
                );
                TriggerRecord::synthesized(record, distance_m)
            })
            .collect()
    }
}
