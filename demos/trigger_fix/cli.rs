use clap::{Arg, ArgAction, ArgMatches, ColorChoice, Command};
use std::{
    path::{Path, PathBuf},
    str::FromStr,
};

use gnss_trigger_fix::prelude::{BaselineWindow, Config, Threshold};

pub struct Cli {
    matches: ArgMatches,
}

impl Cli {
    pub fn new() -> Self {
        let cmd = Command::new("trigger_fix")
            .version(env!("CARGO_PKG_VERSION"))
            .about("Recovers missing camera trigger events from GNSS position logs")
            .arg_required_else_help(true)
            .color(ColorChoice::Always)
            .arg(
                Arg::new("positions")
                    .short('p')
                    .long("positions")
                    .action(ArgAction::Set)
                    .required(true)
                    .help("Dense position log (.pos)"),
            )
            .arg(
                Arg::new("events")
                    .short('e')
                    .long("events")
                    .action(ArgAction::Set)
                    .required(true)
                    .help("Trigger events log (.pos)"),
            )
            .arg(
                Arg::new("threshold")
                    .short('t')
                    .long("threshold")
                    .action(ArgAction::Set)
                    .required(false)
                    .help("Nominal trigger spacing, in meters. Defaults to the median spacing."),
            )
            .arg(
                Arg::new("baseline")
                    .short('b')
                    .long("baseline")
                    .action(ArgAction::Set)
                    .required(false)
                    .help("Baseline statistics window: \"full\" (default) or \"leading:n\""),
            )
            .arg(
                Arg::new("min-spacing-factor")
                    .short('f')
                    .long("min-spacing-factor")
                    .action(ArgAction::Set)
                    .required(false)
                    .help("Scaling of the minimal spacing, below which synthesized triggers are dropped"),
            )
            .arg(
                Arg::new("no-annotation")
                    .long("no-annotation")
                    .action(ArgAction::SetTrue)
                    .help("Do not tag synthesized events in the combined log"),
            )
            .arg(
                Arg::new("keep-header")
                    .long("keep-header")
                    .action(ArgAction::SetTrue)
                    .help("Carry the events log header over to the combined log"),
            )
            .arg(
                Arg::new("output")
                    .short('o')
                    .long("output")
                    .action(ArgAction::Set)
                    .required(false)
                    .help("Output directory. Defaults to the events log directory."),
            );
        Self {
            matches: cmd.get_matches(),
        }
    }

    pub fn positions(&self) -> &Path {
        Path::new(
            self.matches
                .get_one::<String>("positions")
                .map(|s| s.as_str())
                .unwrap_or_default(),
        )
    }

    pub fn events(&self) -> &Path {
        Path::new(
            self.matches
                .get_one::<String>("events")
                .map(|s| s.as_str())
                .unwrap_or_default(),
        )
    }

    /// User threshold. Invalid values are reported and ignored.
    pub fn threshold(&self) -> Option<f64> {
        let value = self.matches.get_one::<String>("threshold")?;
        match Threshold::from_str(value) {
            Ok(threshold) => Some(threshold.meters()),
            Err(e) => {
                warn!("{}: using median spacing instead", e);
                None
            },
        }
    }

    pub fn output_dir(&self) -> PathBuf {
        match self.matches.get_one::<String>("output") {
            Some(dir) => PathBuf::from(dir),
            None => self
                .events()
                .parent()
                .map(|p| p.to_path_buf())
                .unwrap_or_default(),
        }
    }

    pub fn keep_header(&self) -> bool {
        self.matches.get_flag("keep-header")
    }

    pub fn config(&self) -> Config {
        let mut cfg = Config::default().with_annotation(!self.matches.get_flag("no-annotation"));

        if let Some(baseline) = self.matches.get_one::<String>("baseline") {
            let baseline = BaselineWindow::from_str(baseline)
                .unwrap_or_else(|e| panic!("invalid baseline window: {}", e));
            cfg = cfg.with_baseline(baseline);
        }

        if let Some(factor) = self.matches.get_one::<String>("min-spacing-factor") {
            let factor = factor
                .trim()
                .parse::<f64>()
                .unwrap_or_else(|e| panic!("invalid minimal spacing factor: {}", e));
            cfg = cfg.with_min_spacing_factor(factor);
        }

        cfg
    }
}
