/// Mean Earth radius used by the haversine model (meters)
pub const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// Number of seconds in one GPS week
pub const SECONDS_PER_WEEK: f64 = 604_800.0;

/// Dense samples closer than this to the previous polyline vertex are coalesced (meters)
pub const MIN_VERTEX_SEPARATION_M: f64 = 0.1;

/// Minimal time separation between two exported records (seconds)
pub const MIN_RECORD_SEPARATION_S: f64 = 0.001;

/// Floating point tolerance applied to spacing comparisons (meters)
pub const SPACING_TOLERANCE_M: f64 = 1.0E-6;

/// Any line carrying less fields than this is considered truncated
pub const MIN_FIELDS_PER_LINE: usize = 8;

/// Program identifier written in exported headers
pub const PROGRAM_NAME: &str = "GNSS Trigger Fix";

/// Comment marker of the positional log formats
pub const COMMENT_MARKER: char = '%';

