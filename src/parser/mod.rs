//! Positional log parser
use std::cmp::Ordering;

use log::debug;

use crate::{
    constants::{COMMENT_MARKER, MIN_FIELDS_PER_LINE},
    dms::Dms,
    record::{GeodeticRecord, Quality, QualityField, Role, TriggerRecord},
    time::GpsTime,
};

mod format;
pub use format::Format;

/// Records decoded from one positional log
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedLog {
    /// Log [Role]
    pub role: Role,
    /// Detected input [Format]
    pub format: Format,
    /// True when [Format] was identified from a column header,
    /// false when it was guessed from the data
    pub from_header: bool,
    /// Comment lines found in the log, marker included
    pub comments: Vec<String>,
    /// Records, sorted in chronological order
    pub records: Vec<GeodeticRecord>,
}

impl ParsedLog {
    /// Converts these records to recorded [TriggerRecord]s
    pub fn into_triggers(self) -> Vec<TriggerRecord> {
        self.records
            .into_iter()
            .map(TriggerRecord::original)
            .collect()
    }
}

fn is_comment(line: &str) -> bool {
    line.starts_with(COMMENT_MARKER) || line.starts_with('#')
}

/// Strips the trailing annotation some writers append to data lines
fn strip_annotation(line: &str) -> &str {
    match line.find('#') {
        Some(offset) => &line[..offset],
        None => line,
    }
}

/// Decodes any positional log text, tolerating the DMS and decimal
/// encodings. Blank, comment and malformed lines are skipped;
/// empty input produces an empty record list.
pub fn parse(text: &str, role: Role) -> ParsedLog {
    let mut comments = Vec::new();
    let mut header_format = None;
    let mut first_field = None;

    for line in text.lines() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if is_comment(line) {
            if header_format.is_none() {
                header_format = Format::from_header(line);
            }
            comments.push(line.to_string());
        } else if first_field.is_none() {
            first_field = line.split_whitespace().next();
        }
    }

    let (format, from_header) = match header_format {
        Some(format) => (format, true),
        None => (first_field.map(Format::guess).unwrap_or_default(), false),
    };

    debug!(
        "{:?} log: {} format ({})",
        role,
        format,
        if from_header { "header" } else { "guessed" }
    );

    let mut records = Vec::new();

    for (nth, line) in text.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || is_comment(line) {
            continue;
        }

        let fields = strip_annotation(line).split_whitespace().collect::<Vec<_>>();

        if fields.len() < MIN_FIELDS_PER_LINE {
            debug!("line {}: truncated ({} fields)", nth + 1, fields.len());
            continue;
        }

        let record = match format {
            Format::Dms => parse_dms_fields(&fields),
            Format::Decimal => parse_decimal_fields(&fields),
        };

        match record {
            Some(record) if record.is_valid() => records.push(record),
            Some(_) => debug!("line {}: value out of range", nth + 1),
            None => debug!("line {}: malformed", nth + 1),
        }
    }

    records.sort_by(|a, b| a.time.partial_cmp(&b.time).unwrap_or(Ordering::Equal));

    ParsedLog {
        role,
        format,
        from_header,
        comments,
        records,
    }
}

/// Collects numeric quality columns, up to the first non numeric token
fn parse_quality(fields: &[&str]) -> Quality {
    let mut quality = Quality::new();
    for (index, field) in fields.iter().enumerate() {
        match field.parse::<f64>() {
            Ok(value) if value.is_finite() => {
                quality.insert(QualityField::from_index(index), value);
            },
            _ => break,
        }
    }
    quality
}

fn parse_dms_fields(fields: &[&str]) -> Option<GeodeticRecord> {
    let week = fields[0].parse::<u32>().ok()?;
    let tow_s = fields[1].parse::<f64>().ok()?;

    let latitude_deg = Dms::parse_decimal(fields[2], fields[3], fields[4])?;
    let longitude_deg = Dms::parse_decimal(fields[5], fields[6], fields[7])?;

    // events logs may be truncated right after the coordinates
    let height_m = match fields.get(8) {
        Some(height) => height.parse::<f64>().ok()?,
        None => 0.0,
    };

    let quality = fields.get(9..).map(parse_quality).unwrap_or_default();

    Some(GeodeticRecord {
        time: GpsTime::new(week, tow_s),
        latitude_deg,
        longitude_deg,
        height_m,
        quality,
    })
}

fn parse_decimal_fields(fields: &[&str]) -> Option<GeodeticRecord> {
    let time = parse_gpst_datetime(fields[0], fields[1])?;

    let latitude_deg = fields[2].parse::<f64>().ok()?;
    let longitude_deg = fields[3].parse::<f64>().ok()?;
    let height_m = fields[4].parse::<f64>().ok()?;

    let quality = parse_quality(&fields[5..]);

    Some(GeodeticRecord {
        time,
        latitude_deg,
        longitude_deg,
        height_m,
        quality,
    })
}

/// Parses "YYYY/MM/DD" "HH:MM:SS.sss", expressed in GPST.
fn parse_gpst_datetime(date: &str, time: &str) -> Option<GpsTime> {
    let mut ymd = date.split(|c| c == '/' || c == '-');
    let year = ymd.next()?.parse::<i32>().ok()?;
    let month = ymd.next()?.parse::<u8>().ok()?;
    let day = ymd.next()?.parse::<u8>().ok()?;
    if ymd.next().is_some() {
        return None;
    }

    let mut hms = time.split(':');
    let hour = hms.next()?.parse::<u8>().ok()?;
    let minute = hms.next()?.parse::<u8>().ok()?;
    let seconds = hms.next()?.parse::<f64>().ok()?;
    if hms.next().is_some() || !(0.0..60.0).contains(&seconds) {
        return None;
    }

    let second = seconds.trunc();
    let nanos = ((seconds - second) * 1.0E9).round().min(999_999_999.0) as u32;

    GpsTime::from_gregorian(year, month, day, hour, minute, second as u8, nanos)
}

#[cfg(test)]
mod test {
    use super::{parse, parse_gpst_datetime, Format};
    use crate::record::{QualityField, Role};

    const DMS_LOG: &str = "% program   : RTKPOST ver.2.4.3
% inp file  : Reach_raw_20250403105951.25O
%
% (lat/lon/height=WGS84/ellipsoidal,Q=1:fix,2:float,3:sbas,4:dgps,5:single,6:ppp,ns=# of satellites)
%  GPST            latitude(d'\")   longitude(d'\")  height(m)   Q  ns   sdn(m)   sde(m)   sdu(m)  sdne(m)  sdeu(m)  sdun(m) age(s)  ratio
2360 388799.200   48 51 23.760000000    2 21 7.920000000   120.4510   1  18   0.0040   0.0030   0.0090  -0.0010   0.0020  -0.0030   0.20   99.9
2360 388799.000   48 51 23.700000000    2 21 7.900000000   120.4500   1  18   0.0040   0.0030   0.0090  -0.0010   0.0020  -0.0030   0.20   99.9

2360 388799.400   48 51 23.8
";

    const DECIMAL_LOG: &str = "%  GPST                  latitude(deg) longitude(deg)  height(m)   Q  ns   sdn(m)   sde(m)   sdu(m)  sdne(m)  sdeu(m)  sdun(m) age(s)  ratio
2025/04/03 10:59:51.500   48.856600000    2.352200000   120.4500   2  15   0.0100   0.0100   0.0200   0.0000   0.0000   0.0000   1.00    3.2
2025/04/03 10:59:51.700   48.856610000    2.352210000   120.4600   2  15   0.0100   0.0100   0.0200   0.0000   0.0000   0.0000   1.00    3.2
";

    #[test]
    fn dms_log() {
        let log = parse(DMS_LOG, Role::Position);
        assert_eq!(log.format, Format::Dms);
        assert!(log.from_header);
        assert_eq!(log.comments.len(), 5);

        // truncated line is dropped, others sorted
        assert_eq!(log.records.len(), 2);
        let first = &log.records[0];
        assert_eq!(first.time.week, 2360);
        assert_eq!(first.time.tow_s, 388799.0);
        assert!((first.latitude_deg - (48.0 + 51.0 / 60.0 + 23.7 / 3600.0)).abs() < 1.0E-12);
        assert!((first.longitude_deg - (2.0 + 21.0 / 60.0 + 7.9 / 3600.0)).abs() < 1.0E-12);
        assert_eq!(first.height_m, 120.45);

        assert_eq!(first.quality.len(), 10);
        assert_eq!(first.quality.get(&QualityField::Q), Some(&1.0));
        assert_eq!(first.quality.get(&QualityField::Ns), Some(&18.0));
        assert_eq!(first.quality.get(&QualityField::Sdne), Some(&-0.001));
        assert_eq!(first.quality.get(&QualityField::Ratio), Some(&99.9));
    }

    #[test]
    fn decimal_log() {
        let log = parse(DECIMAL_LOG, Role::Position);
        assert_eq!(log.format, Format::Decimal);
        assert_eq!(log.records.len(), 2);

        let first = &log.records[0];
        assert_eq!(first.time.week, 2360);
        let expected = 4.0 * 86400.0 + 10.0 * 3600.0 + 59.0 * 60.0 + 51.5;
        assert!((first.time.tow_s - expected).abs() < 1.0E-6);
        assert_eq!(first.latitude_deg, 48.8566);
        assert_eq!(first.longitude_deg, 2.3522);
        assert_eq!(first.quality.get(&QualityField::Q), Some(&2.0));
        assert_eq!(first.quality.get(&QualityField::Ratio), Some(&3.2));
    }

    #[test]
    fn headerless_guess() {
        let text = "2360 100.000   -33 52 15.0   151 12 30.0   10.0\n\
                    2360 101.000   -33 52 15.1   151 12 30.1   10.0\n";
        let log = parse(text, Role::Trigger);
        assert_eq!(log.format, Format::Dms);
        assert!(!log.from_header);
        assert_eq!(log.records.len(), 2);
        assert!(log.records[0].latitude_deg < -33.0);
        assert!(log.records[0].quality.is_empty());

        let text = "2025-04-03 10:59:51.500 48.8566 2.3522 120.45 5 12 0.5\n";
        let log = parse(text, Role::Position);
        assert_eq!(log.format, Format::Decimal);
        assert_eq!(log.records.len(), 1);
        assert_eq!(log.records[0].quality.len(), 3);
    }

    #[test]
    fn events_without_height() {
        let text = "2360 100.000 48 51 23.7 2 21 7.9\n";
        let log = parse(text, Role::Trigger);
        assert_eq!(log.records.len(), 1);
        assert_eq!(log.records[0].height_m, 0.0);

        let triggers = log.into_triggers();
        assert_eq!(triggers.len(), 1);
        assert!(!triggers[0].synthesized);
        assert!(triggers[0].path_distance_from_prev_m.is_none());
    }

    #[test]
    fn annotated_lines() {
        let text = "2360 100.000 48 51 23.7 2 21 7.9 120.0 1 18  # interpolated\n";
        let log = parse(text, Role::Trigger);
        assert_eq!(log.records.len(), 1);
        assert_eq!(log.records[0].quality.len(), 2);
    }

    #[test]
    fn malformed_lines() {
        let text = "% comment only\n\
                    2360 100.000 48 51 abc 2 21 7.9 120.0\n\
                    2360 101.000 95 0 0 2 21 7.9 120.0\n\
                    week tow lat lon\n\
                    2360 102.000 48 51 23.7 2 21 7.9 120.0 1 x 3\n";
        let log = parse(text, Role::Trigger);
        assert_eq!(log.records.len(), 1);
        assert_eq!(log.records[0].quality.len(), 1);
    }

    #[test]
    fn empty_input() {
        for text in ["", "\n\n", "% header\n% only\n"] {
            let log = parse(text, Role::Position);
            assert!(log.records.is_empty());
            assert_eq!(log.format, Format::Dms);
        }
    }

    #[test]
    fn time_out_of_range() {
        let text = "1979/12/31 10:00:00.000 48.0 2.0 100.0 1 18 0.1\n";
        let log = parse(text, Role::Position);
        assert_eq!(log.format, Format::Decimal);
        assert!(log.records.is_empty());

        let text = "2360 700000.0 48 0 0.0 2 0 0.0 100.0\n\
                    2360 -1.0 48 0 0.0 2 0 0.0 100.0\n\
                    2360 100.000 48 0 0.0 2 0 0.0 100.0\n";
        let log = parse(text, Role::Position);
        assert_eq!(log.records.len(), 1);
        assert_eq!(log.records[0].time.tow_s, 100.0);
    }

    #[test]
    fn gpst_datetime() {
        assert!(parse_gpst_datetime("2025/04/03", "10:59:51.500").is_some());
        assert!(parse_gpst_datetime("1979/12/31", "10:00:00.000").is_none());
        assert!(parse_gpst_datetime("2025/04/03", "10:59:61.000").is_none());
        assert!(parse_gpst_datetime("2025/04", "10:59:51.000").is_none());
        assert!(parse_gpst_datetime("2025/04/03", "10:59").is_none());
    }
}
