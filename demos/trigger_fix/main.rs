// Command line front end: reads both logs, fills the trigger gaps
// and writes the combined events log and the synthesized events table.

#[macro_use]
extern crate log;

use env_logger::{Builder, Target};
use std::fs::{read_to_string, write};

mod cli;
use cli::Cli;

use gnss_trigger_fix::prelude::{to_csv, CanonicalLog, Error, Processor};

pub fn main() {
    let mut builder = Builder::from_default_env();
    builder
        .target(Target::Stdout)
        .format_timestamp_secs()
        .format_module_path(false)
        .init();

    let cli = Cli::new();
    let cfg = cli.config();

    let processor =
        Processor::new(cfg).unwrap_or_else(|e| panic!("invalid configuration: {}", e));

    let position_text = read_to_string(cli.positions())
        .unwrap_or_else(|e| panic!("failed to read {}: {}", cli.positions().display(), e));

    let events_text = read_to_string(cli.events())
        .unwrap_or_else(|e| panic!("failed to read {}: {}", cli.events().display(), e));

    let result = match processor.process(&position_text, &events_text, cli.threshold()) {
        Ok(result) => result,
        Err(Error::InvalidThreshold(threshold)) => {
            warn!("invalid threshold {}m: using median spacing instead", threshold);
            processor
                .process(&position_text, &events_text, None)
                .unwrap_or_else(|e| panic!("processing failed: {}", e))
        },
        Err(e) => panic!("processing failed: {}", e),
    };

    let summary = result.summary();

    info!(
        "{} position samples ({} format), {:.1}s flight",
        summary.position_count, summary.position_format, summary.flight_duration_s
    );

    match (&summary.spacing, summary.threshold_m) {
        (Some(spacing), Some(threshold)) => {
            info!(
                "{} triggers: spacing min={:.3}m median={:.3}m mean={:.3}m, threshold={:.3}m",
                summary.trigger_count,
                spacing.minimum_spacing_m,
                spacing.median_spacing_m,
                spacing.mean_spacing_m,
                threshold
            );
        },
        _ => warn!("{} triggers: not enough to analyze", summary.trigger_count),
    }

    match (
        summary.synthesized_min_spacing_m,
        summary.synthesized_mean_spacing_m,
    ) {
        (Some(min), Some(mean)) => info!(
            "{} synthesized triggers: spacing min={:.3}m mean={:.3}m",
            summary.synthesized_count, min, mean
        ),
        _ => info!("no trigger synthesized"),
    }

    let source_name = cli
        .events()
        .file_name()
        .map(|name| name.to_string_lossy().to_string())
        .unwrap_or_default();

    let stem = cli
        .events()
        .file_stem()
        .map(|stem| stem.to_string_lossy().to_string())
        .unwrap_or_else(|| "events".to_string());

    let output_dir = cli.output_dir();

    let combined = CanonicalLog::new(&result)
        .with_config(processor.config())
        .with_source_name(&source_name)
        .with_source_header(cli.keep_header())
        .render();

    let combined_path = output_dir.join(format!("{}_fixed.pos", stem));
    write(&combined_path, combined)
        .unwrap_or_else(|e| panic!("failed to write {}: {}", combined_path.display(), e));

    info!("combined events log: {}", combined_path.display());

    let table = to_csv(result.synthesized()).unwrap_or_else(|e| panic!("{}", e));

    let table_path = output_dir.join(format!("{}_interpolated.csv", stem));
    write(&table_path, table)
        .unwrap_or_else(|e| panic!("failed to write {}: {}", table_path.display(), e));

    info!("synthesized events table: {}", table_path.display());
}
