use std::collections::BTreeMap;

use crate::{constants::SECONDS_PER_WEEK, distance::haversine_m, dms::Dms, time::GpsTime};

/// Optional solution quality columns, in the order they appear
/// in the positional log formats.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum QualityField {
    /// Solution quality flag (1:fix, 2:float, 3:sbas, 4:dgps, 5:single, 6:ppp)
    Q,
    /// Number of satellites
    Ns,
    /// North standard deviation (m)
    Sdn,
    /// East standard deviation (m)
    Sde,
    /// Up standard deviation (m)
    Sdu,
    /// North-East covariance term (m)
    Sdne,
    /// East-Up covariance term (m)
    Sdeu,
    /// Up-North covariance term (m)
    Sdun,
    /// Differential age (s)
    Age,
    /// Ambiguity ratio
    Ratio,
    /// Any further numeric column, by index past the standard ones
    Extra(usize),
}

impl QualityField {
    /// Standard columns, in file order
    pub const STANDARD: [Self; 10] = [
        Self::Q,
        Self::Ns,
        Self::Sdn,
        Self::Sde,
        Self::Sdu,
        Self::Sdne,
        Self::Sdeu,
        Self::Sdun,
        Self::Age,
        Self::Ratio,
    ];

    /// Returns the field name for the nth quality column
    pub fn from_index(index: usize) -> Self {
        Self::STANDARD
            .get(index)
            .copied()
            .unwrap_or_else(|| Self::Extra(index - Self::STANDARD.len()))
    }
}

impl std::fmt::Display for QualityField {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Self::Q => write!(f, "Q"),
            Self::Ns => write!(f, "ns"),
            Self::Sdn => write!(f, "sdn"),
            Self::Sde => write!(f, "sde"),
            Self::Sdu => write!(f, "sdu"),
            Self::Sdne => write!(f, "sdne"),
            Self::Sdeu => write!(f, "sdeu"),
            Self::Sdun => write!(f, "sdun"),
            Self::Age => write!(f, "age"),
            Self::Ratio => write!(f, "ratio"),
            Self::Extra(n) => write!(f, "ext{}", n),
        }
    }
}

/// Opaque quality values, passed through as parsed.
pub type Quality = BTreeMap<QualityField, f64>;

/// Log being parsed
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Role {
    /// Dense position log (the trajectory)
    Position,
    /// Sparse trigger (events) log
    Trigger,
}

/// One position or trigger sample.
#[derive(Debug, Clone, PartialEq)]
pub struct GeodeticRecord {
    /// Sampling instant
    pub time: GpsTime,
    /// Latitude in decimal degrees
    pub latitude_deg: f64,
    /// Longitude in decimal degrees
    pub longitude_deg: f64,
    /// Ellipsoidal height (m)
    pub height_m: f64,
    /// Quality columns present in the source line
    pub quality: Quality,
}

impl GeodeticRecord {
    pub fn new(time: GpsTime, latitude_deg: f64, longitude_deg: f64, height_m: f64) -> Self {
        Self {
            time,
            latitude_deg,
            longitude_deg,
            height_m,
            quality: Quality::new(),
        }
    }

    /// Copies and attaches a quality column
    pub fn with_quality(&self, field: QualityField, value: f64) -> Self {
        let mut s = self.clone();
        s.quality.insert(field, value);
        s
    }

    /// Continuous GPST seconds (see [GpsTime::gpst_seconds])
    pub fn gpst_seconds(&self) -> f64 {
        self.time.gpst_seconds()
    }

    /// Latitude as [Dms]
    pub fn latitude_dms(&self) -> Dms {
        Dms::from_decimal(self.latitude_deg)
    }

    /// Longitude as [Dms]
    pub fn longitude_dms(&self) -> Dms {
        Dms::from_decimal(self.longitude_deg)
    }

    /// Great circle distance to rhs, in meters
    pub fn distance_m(&self, rhs: &Self) -> f64 {
        haversine_m(
            self.latitude_deg,
            self.longitude_deg,
            rhs.latitude_deg,
            rhs.longitude_deg,
        )
    }

    /// True when latitude and longitude lie within their valid range
    pub fn is_valid(&self) -> bool {
        self.latitude_deg.is_finite()
            && self.longitude_deg.is_finite()
            && self.height_m.is_finite()
            && (0.0..SECONDS_PER_WEEK).contains(&self.time.tow_s)
            && (-90.0..=90.0).contains(&self.latitude_deg)
            && (-180.0..=180.0).contains(&self.longitude_deg)
    }
}

/// A trigger event, either recorded or synthesized.
#[derive(Debug, Clone, PartialEq)]
pub struct TriggerRecord {
    /// Geodetic sample
    pub record: GeodeticRecord,
    /// True when this event was inserted to fill a gap
    pub synthesized: bool,
    /// True path distance from the previous trigger, when known (m)
    pub path_distance_from_prev_m: Option<f64>,
}

impl TriggerRecord {
    /// Wraps a recorded event
    pub fn original(record: GeodeticRecord) -> Self {
        Self {
            record,
            synthesized: false,
            path_distance_from_prev_m: None,
        }
    }

    /// Builds a synthesized event
    pub fn synthesized(record: GeodeticRecord, path_distance_from_prev_m: f64) -> Self {
        Self {
            record,
            synthesized: true,
            path_distance_from_prev_m: Some(path_distance_from_prev_m),
        }
    }

    /// Trigger instant
    pub fn time(&self) -> GpsTime {
        self.record.time
    }

    /// Continuous GPST seconds of this trigger, see [GpsTime::gpst_seconds]
    pub fn gpst_seconds(&self) -> f64 {
        self.record.gpst_seconds()
    }
}
