use std::cmp::Ordering;

use hifitime::{Epoch, TimeScale};

use crate::constants::SECONDS_PER_WEEK;

/// [GpsTime] is a (week, time of week) pair expressed in [TimeScale::GPST],
/// the native time representation of the positional logs.
#[derive(Debug, Default, Copy, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GpsTime {
    /// Week counter, since the GPST origin (1980-01-06T00:00:00)
    pub week: u32,
    /// Seconds within the week
    pub tow_s: f64,
}

impl GpsTime {
    /// Builds a new [GpsTime]
    pub fn new(week: u32, tow_s: f64) -> Self {
        Self { week, tow_s }
    }

    /// Builds [GpsTime] from a GPST calendar date.
    /// Returns None on invalid calendar values, or dates
    /// preceding the GPST origin.
    pub fn from_gregorian(
        year: i32,
        month: u8,
        day: u8,
        hour: u8,
        minute: u8,
        second: u8,
        nanos: u32,
    ) -> Option<Self> {
        let t = Epoch::maybe_from_gregorian(
            year,
            month,
            day,
            hour,
            minute,
            second,
            nanos,
            TimeScale::GPST,
        )
        .ok()?;
        if t < Epoch::from_time_of_week(0, 0, TimeScale::GPST) {
            return None;
        }
        Some(Self::from_epoch(t))
    }

    /// Builds [GpsTime] from any [Epoch]
    pub fn from_epoch(t: Epoch) -> Self {
        let (week, nanos) = t.to_time_scale(TimeScale::GPST).to_time_of_week();
        Self {
            week,
            tow_s: nanos as f64 * 1.0E-9,
        }
    }

    /// Converts to [Epoch], with nanosecond precision.
    pub fn to_epoch(&self) -> Epoch {
        let nanos = (self.tow_s * 1.0E9).round().max(0.0) as u64;
        Epoch::from_time_of_week(self.week, nanos, TimeScale::GPST)
    }

    /// Continuous number of seconds since the GPST origin.
    /// Every time comparison goes through this representation,
    /// which makes week rollovers transparent.
    pub fn gpst_seconds(&self) -> f64 {
        self.week as f64 * SECONDS_PER_WEEK + self.tow_s
    }

    /// Builds [GpsTime] from continuous GPST seconds (see [Self::gpst_seconds]).
    pub fn from_gpst_seconds(seconds: f64) -> Self {
        let week = (seconds / SECONDS_PER_WEEK).floor().max(0.0);
        let mut tow_s = seconds - week * SECONDS_PER_WEEK;
        if tow_s < 0.0 {
            tow_s = 0.0;
        }
        Self {
            week: week as u32,
            tow_s,
        }
    }

    /// Returns a copy of [GpsTime] shifted by dt_s seconds.
    /// The week counter is adjusted on rollover.
    pub fn offset(&self, dt_s: f64) -> Self {
        let tow_s = self.tow_s + dt_s;
        if (0.0..SECONDS_PER_WEEK).contains(&tow_s) {
            Self {
                week: self.week,
                tow_s,
            }
        } else {
            Self::from_gpst_seconds(self.gpst_seconds() + dt_s)
        }
    }

    /// Elapsed seconds between self and rhs (self - rhs)
    pub fn seconds_since(&self, rhs: &Self) -> f64 {
        (self.week as f64 - rhs.week as f64) * SECONDS_PER_WEEK + (self.tow_s - rhs.tow_s)
    }
}

impl PartialOrd for GpsTime {
    fn partial_cmp(&self, rhs: &Self) -> Option<Ordering> {
        match self.week.cmp(&rhs.week) {
            Ordering::Equal => self.tow_s.partial_cmp(&rhs.tow_s),
            ordering => Some(ordering),
        }
    }
}

impl std::fmt::Display for GpsTime {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "week{} {:.3}s", self.week, self.tow_s)
    }
}

#[cfg(test)]
mod test {
    use super::GpsTime;
    use crate::constants::SECONDS_PER_WEEK;

    #[test]
    fn gpst_origin() {
        let t = GpsTime::from_gregorian(1980, 1, 6, 0, 0, 0, 0).unwrap();
        assert_eq!(t.week, 0);
        assert_eq!(t.tow_s, 0.0);
    }

    #[test]
    fn gregorian_to_time_of_week() {
        // 2025/04/03 is a thursday of week 2360
        let t = GpsTime::from_gregorian(2025, 4, 3, 10, 59, 51, 500_000_000).unwrap();
        assert_eq!(t.week, 2360);
        let expected = 4.0 * 86400.0 + 10.0 * 3600.0 + 59.0 * 60.0 + 51.5;
        assert!((t.tow_s - expected).abs() < 1.0E-6);
    }

    #[test]
    fn invalid_gregorian() {
        assert!(GpsTime::from_gregorian(2025, 13, 3, 10, 59, 51, 0).is_none());
    }

    #[test]
    fn before_gpst_origin() {
        assert!(GpsTime::from_gregorian(1979, 12, 31, 10, 0, 0, 0).is_none());
        assert!(GpsTime::from_gregorian(1980, 1, 5, 23, 59, 59, 999_999_999).is_none());
        assert!(GpsTime::from_gregorian(1980, 1, 6, 0, 0, 0, 1).is_some());
    }

    #[test]
    fn week_rollover() {
        let t = GpsTime::new(2360, SECONDS_PER_WEEK - 0.0005);
        let t = t.offset(0.001);
        assert_eq!(t.week, 2361);
        assert!((t.tow_s - 0.0005).abs() < 1.0E-6);

        let t0 = GpsTime::new(2360, SECONDS_PER_WEEK - 1.0);
        let t1 = GpsTime::new(2361, 1.0);
        assert!(t0 < t1);
        assert!((t1.seconds_since(&t0) - 2.0).abs() < 1.0E-9);
    }

    #[test]
    fn continuous_seconds() {
        let t = GpsTime::new(2360, 388_799.25);
        let s = t.gpst_seconds();
        let back = GpsTime::from_gpst_seconds(s);
        assert_eq!(back.week, 2360);
        assert!((back.tow_s - 388_799.25).abs() < 1.0E-6);
    }

    #[test]
    fn epoch_round_trip() {
        let t = GpsTime::new(2360, 388_799.125);
        let epoch = t.to_epoch();
        let back = GpsTime::from_epoch(epoch);
        assert_eq!(back, t);
    }
}
