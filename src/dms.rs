/// Sexagesimal (degrees, minutes, seconds) angle representation.
/// Decimal degrees remain the primary storage: [Dms] is only
/// used to decode and encode the positional log formats.
#[derive(Debug, Default, Copy, Clone, PartialEq)]
pub struct Dms {
    /// True for southern latitudes and western longitudes.
    /// Carried separately so that angles within 1° of the origin keep their sign.
    pub negative: bool,
    /// Integer degrees
    pub degrees: u32,
    /// Integer minutes
    pub minutes: u32,
    /// Seconds
    pub seconds: f64,
}

impl Dms {
    /// Decomposes decimal degrees: the integer part gives the degrees,
    /// the fractional part times 60 gives the minutes, and the
    /// remainder times 60 gives the seconds. Sign consistent.
    pub fn from_decimal(decimal: f64) -> Self {
        let abs = decimal.abs();
        let degrees = abs.trunc();
        let minutes_f64 = (abs - degrees) * 60.0;
        let minutes = minutes_f64.trunc();
        let seconds = (minutes_f64 - minutes) * 60.0;
        Self {
            negative: decimal.is_sign_negative() && abs > 0.0,
            degrees: degrees as u32,
            minutes: minutes as u32,
            seconds,
        }
    }

    /// Converts to decimal degrees
    pub fn to_decimal(&self) -> f64 {
        let abs = self.degrees as f64 + self.minutes as f64 / 60.0 + self.seconds / 3600.0;
        if self.negative {
            -abs
        } else {
            abs
        }
    }

    /// Decodes three whitespace separated fields into decimal degrees.
    /// The sign is carried by the degree field: "-0 30 0" is -0.5°.
    pub(crate) fn parse_decimal(degrees: &str, minutes: &str, seconds: &str) -> Option<f64> {
        let d = degrees.parse::<f64>().ok()?;
        let m = minutes.parse::<f64>().ok()?;
        let s = seconds.parse::<f64>().ok()?;

        if !(d.is_finite() && m.is_finite() && s.is_finite()) {
            return None;
        }

        let negative = degrees.trim_start().starts_with('-') || d < 0.0;
        let abs = d.abs() + m.abs() / 60.0 + s.abs() / 3600.0;

        if negative {
            Some(-abs)
        } else {
            Some(abs)
        }
    }
}

impl std::fmt::Display for Dms {
    /// Formats as "d m s" with 9 decimal places on the seconds,
    /// carrying over when seconds round up to 60.
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        let (mut degrees, mut minutes) = (self.degrees, self.minutes);
        let mut seconds = (self.seconds * 1.0E9).round() / 1.0E9;

        if seconds >= 60.0 {
            seconds -= 60.0;
            minutes += 1;
        }
        if minutes >= 60 {
            minutes -= 60;
            degrees += 1;
        }

        let sign = if self.negative { "-" } else { "" };
        write!(f, "{}{} {} {:.9}", sign, degrees, minutes, seconds)
    }
}
