//! Processing entry point
use std::cmp::Ordering;

use log::info;

use crate::{
    analyzer::{analyze, GapStatistics},
    cfg::{Config, Threshold},
    parser::{parse, Format},
    path::{PathPoint, Polyline, Trajectory},
    prelude::Error,
    record::{Role, TriggerRecord},
    stats::Averager,
    synthesizer::Synthesizer,
};

/// Figures of one processing run
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Summary {
    /// Number of dense position samples
    pub position_count: usize,
    /// Number of recorded triggers
    pub trigger_count: usize,
    /// Number of synthesized triggers
    pub synthesized_count: usize,
    /// Time span of the position log (s)
    pub flight_duration_s: f64,
    /// Baseline spacing of the recorded triggers
    pub spacing: Option<GapStatistics>,
    /// Nominal spacing that was applied (m)
    pub threshold_m: Option<f64>,
    /// Shortest spacing ahead of a synthesized trigger (m)
    pub synthesized_min_spacing_m: Option<f64>,
    /// Mean spacing ahead of the synthesized triggers (m)
    pub synthesized_mean_spacing_m: Option<f64>,
    /// Encoding of the position log
    pub position_format: Format,
    /// Encoding of the events log
    pub trigger_format: Format,
}

/// Outcome of [Processor::process]. Immutable.
#[derive(Debug, Clone, PartialEq)]
pub struct ProcessingResult {
    trajectory: Trajectory,
    triggers: Vec<TriggerRecord>,
    synthesized: Vec<TriggerRecord>,
    trigger_comments: Vec<String>,
    summary: Summary,
    coalesce_m: f64,
}

impl ProcessingResult {
    /// Dense position log
    pub fn trajectory(&self) -> &Trajectory {
        &self.trajectory
    }

    /// Recorded triggers, in chronological order
    pub fn triggers(&self) -> &[TriggerRecord] {
        &self.triggers
    }

    /// Synthesized triggers, in gap order
    pub fn synthesized(&self) -> &[TriggerRecord] {
        &self.synthesized
    }

    /// Comment lines of the source events log
    pub fn trigger_comments(&self) -> &[String] {
        &self.trigger_comments
    }

    pub fn summary(&self) -> &Summary {
        &self.summary
    }

    /// Recorded and synthesized triggers merged in chronological order.
    /// Path distances refer to the previous trigger of the merged sequence.
    pub fn merged(&self) -> Vec<TriggerRecord> {
        let mut merged = self
            .triggers
            .iter()
            .chain(self.synthesized.iter())
            .cloned()
            .collect::<Vec<_>>();

        // stable: a recorded trigger precedes a synthesized one at equal time
        merged.sort_by(|a, b| {
            a.record
                .time
                .partial_cmp(&b.record.time)
                .unwrap_or(Ordering::Equal)
        });

        for i in 1..merged.len() {
            if merged[i].synthesized || !merged[i - 1].synthesized {
                continue;
            }
            let polyline = Polyline::between(
                &PathPoint::from(&merged[i - 1].record),
                &PathPoint::from(&merged[i].record),
                &self.trajectory,
                self.coalesce_m,
            );
            merged[i].path_distance_from_prev_m = Some(polyline.length_m());
        }

        if let Some(first) = merged.first_mut() {
            first.path_distance_from_prev_m = None;
        }

        merged
    }
}

/// [Processor] runs the full pipeline: parsing, gap analysis and
/// trigger synthesis.
#[derive(Debug, Clone, Default)]
pub struct Processor {
    cfg: Config,
}

impl Processor {
    /// Builds a new [Processor], validating the [Config].
    pub fn new(cfg: Config) -> Result<Self, Error> {
        cfg.validate()?;
        Ok(Self { cfg })
    }

    pub fn config(&self) -> &Config {
        &self.cfg
    }

    /// Processes a position log and an events log.
    /// threshold: nominal trigger spacing (m), overriding the configured one.
    /// When neither is defined, the baseline median spacing applies.
    /// Fails only on an invalid threshold.
    pub fn process(
        &self,
        position_text: &str,
        events_text: &str,
        threshold: Option<f64>,
    ) -> Result<ProcessingResult, Error> {
        let mut cfg = self.cfg.clone();
        if let Some(threshold) = threshold {
            cfg = cfg.with_threshold(Threshold::new(threshold)?);
        }

        let positions = parse(position_text, Role::Position);
        let events = parse(events_text, Role::Trigger);

        let position_format = positions.format;
        let trigger_format = events.format;
        let trigger_comments = events.comments.clone();

        let trajectory = Trajectory::new(positions.records);
        let triggers = events.into_triggers();

        info!(
            "{} position samples, {} triggers",
            trajectory.len(),
            triggers.len()
        );

        let analysis = analyze(&triggers, &trajectory, cfg.baseline);

        let synthesizer = Synthesizer::new(&cfg);
        let threshold_m = synthesizer.threshold_m(&analysis);
        let synthesized = synthesizer.synthesize_gaps(&analysis, &trajectory);

        let synthesized_spacing = synthesized
            .iter()
            .filter_map(|t| t.path_distance_from_prev_m)
            .collect::<Averager>()
            .min_mean();

        info!("{} synthesized triggers", synthesized.len());

        let summary = Summary {
            position_count: trajectory.len(),
            trigger_count: analysis.triggers.len(),
            synthesized_count: synthesized.len(),
            flight_duration_s: trajectory.duration_s(),
            spacing: analysis.statistics,
            threshold_m,
            synthesized_min_spacing_m: synthesized_spacing.map(|(min, _)| min),
            synthesized_mean_spacing_m: synthesized_spacing.map(|(_, mean)| mean),
            position_format,
            trigger_format,
        };

        Ok(ProcessingResult {
            trajectory,
            triggers: analysis.triggers,
            synthesized,
            trigger_comments,
            summary,
            coalesce_m: cfg.coalesce_distance_m,
        })
    }
}

/// Processes both logs with default [Config].
pub fn process(
    position_text: &str,
    events_text: &str,
    threshold: Option<f64>,
) -> Result<ProcessingResult, Error> {
    Processor::default().process(position_text, events_text, threshold)
}
