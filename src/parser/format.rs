/// Input encodings of the positional logs
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Format {
    /// `week tow lat_d lat_m lat_s lon_d lon_m lon_s height [quality..]`
    #[default]
    Dms,
    /// `YYYY/MM/DD HH:MM:SS.sss lat lon height [quality..]`
    Decimal,
}

impl Format {
    /// Identifies the [Format] from a column header line, that must
    /// contain both the latitude and longitude labels.
    pub(crate) fn from_header(line: &str) -> Option<Self> {
        let line = line.to_lowercase();
        if !(line.contains("latitude") && line.contains("longitude")) {
            return None;
        }
        if line.contains("(deg)") {
            Some(Self::Decimal)
        } else if line.contains("(d'") {
            Some(Self::Dms)
        } else {
            None
        }
    }

    /// Guesses the [Format] from the first field of a data line:
    /// calendar dates carry separators, week counters do not.
    pub(crate) fn guess(first_field: &str) -> Self {
        let date_separator = first_field.contains('/')
            || first_field
                .char_indices()
                .any(|(i, c)| c == '-' && i > 0);
        if date_separator {
            Self::Decimal
        } else {
            Self::Dms
        }
    }
}

impl std::fmt::Display for Format {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Self::Dms => write!(f, "DMS"),
            Self::Decimal => write!(f, "decimal"),
        }
    }
}
