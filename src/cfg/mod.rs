#[cfg(feature = "serde")]
use serde::Deserialize;

use crate::{
    constants::{MIN_RECORD_SEPARATION_S, MIN_VERTEX_SEPARATION_M},
    prelude::Error,
};

mod baseline;
pub use baseline::BaselineWindow;

/// Nominal trigger spacing, in meters.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Threshold(f64);

impl Threshold {
    /// Builds a new [Threshold], which must be finite and strictly positive.
    pub fn new(meters: f64) -> Result<Self, Error> {
        if meters.is_finite() && meters > 0.0 {
            Ok(Self(meters))
        } else {
            Err(Error::InvalidThreshold(meters))
        }
    }

    /// Returns the spacing in meters
    pub fn meters(&self) -> f64 {
        self.0
    }
}

impl std::str::FromStr for Threshold {
    type Err = Error;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let s = s.strip_suffix('m').unwrap_or(s).trim();
        let meters = s
            .parse::<f64>()
            .map_err(|_| Error::ThresholdParsing(s.to_string()))?;
        Self::new(meters)
    }
}

fn default_threshold() -> Option<f64> {
    None
}

fn default_min_spacing_factor() -> f64 {
    1.0
}

fn default_coalesce_distance() -> f64 {
    MIN_VERTEX_SEPARATION_M
}

fn default_nudge() -> f64 {
    MIN_RECORD_SEPARATION_S
}

fn default_annotation() -> bool {
    true
}

/// Processing parametrization
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Deserialize))]
pub struct Config {
    /// Expected nominal trigger spacing (m). When not defined,
    /// the baseline median spacing is used.
    #[cfg_attr(feature = "serde", serde(default = "default_threshold"))]
    pub threshold_m: Option<f64>,
    /// Synthesized points closer than baseline minimum spacing times
    /// this factor to a neighbor are dropped.
    #[cfg_attr(feature = "serde", serde(default = "default_min_spacing_factor"))]
    pub min_spacing_factor: f64,
    /// Intervals used to derive the baseline statistics
    #[cfg_attr(feature = "serde", serde(default))]
    pub baseline: BaselineWindow,
    /// Dense samples closer than this to the previous path vertex are coalesced (m)
    #[cfg_attr(feature = "serde", serde(default = "default_coalesce_distance"))]
    pub coalesce_distance_m: f64,
    /// Minimal time separation between exported records (s)
    #[cfg_attr(feature = "serde", serde(default = "default_nudge"))]
    pub nudge_s: f64,
    /// Append a trailing comment to synthesized lines in the canonical log
    #[cfg_attr(feature = "serde", serde(default = "default_annotation"))]
    pub annotate_synthesized: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            threshold_m: default_threshold(),
            min_spacing_factor: default_min_spacing_factor(),
            baseline: BaselineWindow::default(),
            coalesce_distance_m: default_coalesce_distance(),
            nudge_s: default_nudge(),
            annotate_synthesized: default_annotation(),
        }
    }
}

impl Config {
    /// Copies and returns [Config] with nominal trigger spacing
    pub fn with_threshold(&self, threshold: Threshold) -> Self {
        let mut s = self.clone();
        s.threshold_m = Some(threshold.meters());
        s
    }

    /// Copies and returns [Config] with updated too-close filter factor
    pub fn with_min_spacing_factor(&self, factor: f64) -> Self {
        let mut s = self.clone();
        s.min_spacing_factor = factor;
        s
    }

    /// Copies and returns [Config] with desired [BaselineWindow]
    pub fn with_baseline(&self, baseline: BaselineWindow) -> Self {
        let mut s = self.clone();
        s.baseline = baseline;
        s
    }

    /// Copies and returns [Config] with synthesized line annotation preference
    pub fn with_annotation(&self, annotate: bool) -> Self {
        let mut s = self.clone();
        s.annotate_synthesized = annotate;
        s
    }

    /// Verifies this [Config] is usable
    pub fn validate(&self) -> Result<(), Error> {
        if let Some(threshold) = self.threshold_m {
            Threshold::new(threshold)?;
        }
        if !(self.min_spacing_factor.is_finite() && self.min_spacing_factor > 0.0) {
            return Err(Error::InvalidMinSpacingFactor(self.min_spacing_factor));
        }
        if let BaselineWindow::Leading(0) = self.baseline {
            return Err(Error::InvalidBaselineWindow);
        }
        if !(self.coalesce_distance_m.is_finite() && self.coalesce_distance_m >= 0.0) {
            return Err(Error::InvalidConfig("coalescing distance"));
        }
        if !(self.nudge_s.is_finite() && self.nudge_s > 0.0) {
            return Err(Error::InvalidConfig("record separation"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::{BaselineWindow, Config, Threshold};
    use crate::prelude::Error;
    use std::str::FromStr;

    #[test]
    fn default_config() {
        let cfg = Config::default();
        assert!(cfg.validate().is_ok());
        assert_eq!(cfg.threshold_m, None);
        assert_eq!(cfg.min_spacing_factor, 1.0);
        assert_eq!(cfg.baseline, BaselineWindow::Full);
        assert_eq!(cfg.coalesce_distance_m, 0.1);
        assert_eq!(cfg.nudge_s, 0.001);
        assert!(cfg.annotate_synthesized);
    }

    #[test]
    fn threshold_boundary() {
        assert_eq!(Threshold::new(20.0).map(|t| t.meters()), Ok(20.0));
        assert_eq!(Threshold::new(0.0), Err(Error::InvalidThreshold(0.0)));
        assert_eq!(Threshold::new(-5.0), Err(Error::InvalidThreshold(-5.0)));
        assert!(Threshold::new(f64::NAN).is_err());
        assert!(Threshold::new(f64::INFINITY).is_err());

        assert_eq!(Threshold::from_str(" 12.5 ").map(|t| t.meters()), Ok(12.5));
        assert_eq!(Threshold::from_str("12.5m").map(|t| t.meters()), Ok(12.5));
        assert_eq!(
            Threshold::from_str("twelve"),
            Err(Error::ThresholdParsing("twelve".to_string()))
        );
        assert_eq!(Threshold::from_str("-1"), Err(Error::InvalidThreshold(-1.0)));
    }

    #[test]
    fn validation() {
        let cfg = Config::default().with_min_spacing_factor(0.0);
        assert_eq!(cfg.validate(), Err(Error::InvalidMinSpacingFactor(0.0)));

        let cfg = Config::default().with_baseline(BaselineWindow::Leading(0));
        assert_eq!(cfg.validate(), Err(Error::InvalidBaselineWindow));

        let mut cfg = Config::default();
        cfg.threshold_m = Some(-3.0);
        assert_eq!(cfg.validate(), Err(Error::InvalidThreshold(-3.0)));

        let mut cfg = Config::default();
        cfg.nudge_s = 0.0;
        assert!(cfg.validate().is_err());

        let cfg = Config::default()
            .with_threshold(Threshold::new(15.0).unwrap())
            .with_baseline(BaselineWindow::Leading(10))
            .with_min_spacing_factor(0.8)
            .with_annotation(false);
        assert!(cfg.validate().is_ok());
        assert_eq!(cfg.threshold_m, Some(15.0));
    }
}
