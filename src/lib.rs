#![doc = include_str!("../README.md")]
#![cfg_attr(docrs, feature(doc_cfg))]

// private modules
mod analyzer;
mod cfg;
mod constants;
mod distance;
mod dms;
mod error;
mod export;
mod parser;
mod path;
mod processor;
mod record;
mod stats;
mod synthesizer;
mod time;

#[cfg(test)]
mod tests;

// prelude
pub mod prelude {
    pub use crate::analyzer::{analyze, path_distance_m, Gap, GapAnalysis, GapStatistics};
    pub use crate::cfg::{BaselineWindow, Config, Threshold};
    pub use crate::constants::{EARTH_RADIUS_M, PROGRAM_NAME};
    pub use crate::distance::haversine_m;
    pub use crate::dms::Dms;
    pub use crate::error::Error;
    pub use crate::export::{nudge, to_csv, CanonicalLog, NO_DATA, SYNTHESIZED_ANNOTATION};
    pub use crate::parser::{parse, Format, ParsedLog};
    pub use crate::path::{interpolate, Interpolated, Interpolation, PathPoint, Polyline, Trajectory};
    pub use crate::processor::{process, ProcessingResult, Processor, Summary};
    pub use crate::record::{GeodeticRecord, Quality, QualityField, Role, TriggerRecord};
    pub use crate::stats::{median, Averager};
    pub use crate::synthesizer::{missing_count, Synthesizer};
    pub use crate::time::GpsTime;
    // re-export
    pub use hifitime::{Epoch, TimeScale};
}

// pub export
pub use error::Error;
