use csv::{QuoteStyle, WriterBuilder};

use crate::{prelude::Error, record::TriggerRecord};

/// Single line emitted when there is nothing to export
pub const NO_DATA: &str = "no data";

enum Cell {
    Integer(i64),
    Float(f64),
    Flag(bool),
}

impl std::fmt::Display for Cell {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Self::Integer(value) => write!(f, "{}", value),
            Self::Float(value) => write!(f, "{}", value),
            Self::Flag(value) => write!(f, "{}", value),
        }
    }
}

fn signed_degrees(negative: bool, degrees: u32) -> String {
    if negative {
        format!("-{}", degrees)
    } else {
        degrees.to_string()
    }
}

fn cells(trigger: &TriggerRecord) -> Vec<(String, String)> {
    let rec = &trigger.record;
    let (lat, lon) = (rec.latitude_dms(), rec.longitude_dms());

    let mut cells = vec![
        ("week".to_string(), Cell::Integer(rec.time.week as i64).to_string()),
        ("seconds".to_string(), Cell::Float(rec.time.tow_s).to_string()),
        ("lat".to_string(), Cell::Float(rec.latitude_deg).to_string()),
        ("lon".to_string(), Cell::Float(rec.longitude_deg).to_string()),
        ("height".to_string(), Cell::Float(rec.height_m).to_string()),
        ("lat_d".to_string(), signed_degrees(lat.negative, lat.degrees)),
        ("lat_m".to_string(), Cell::Integer(lat.minutes as i64).to_string()),
        ("lat_s".to_string(), Cell::Float(lat.seconds).to_string()),
        ("lon_d".to_string(), signed_degrees(lon.negative, lon.degrees)),
        ("lon_m".to_string(), Cell::Integer(lon.minutes as i64).to_string()),
        ("lon_s".to_string(), Cell::Float(lon.seconds).to_string()),
        ("interpolated".to_string(), Cell::Flag(trigger.synthesized).to_string()),
    ];

    if let Some(distance) = trigger.path_distance_from_prev_m {
        cells.push((
            "distance_from_prev".to_string(),
            Cell::Float(distance).to_string(),
        ));
    }

    for (field, value) in rec.quality.iter() {
        cells.push((field.to_string(), Cell::Float(*value).to_string()));
    }

    cells
}

/// Renders trigger records as CSV: one column per field name appearing
/// in any record, in order of first appearance. Missing fields render as
/// empty cells and non numeric values are quoted.
pub fn to_csv(records: &[TriggerRecord]) -> Result<String, Error> {
    if records.is_empty() {
        return Ok(format!("{}\n", NO_DATA));
    }

    let rows = records.iter().map(cells).collect::<Vec<_>>();

    let mut columns = Vec::<String>::new();
    for row in rows.iter() {
        for (name, _) in row.iter() {
            if !columns.contains(name) {
                columns.push(name.clone());
            }
        }
    }

    let mut writer = WriterBuilder::new()
        .quote_style(QuoteStyle::NonNumeric)
        .from_writer(Vec::new());

    writer.write_record(&columns)?;

    for row in rows.iter() {
        let values = columns.iter().map(|column| {
            row.iter()
                .find(|(name, _)| name == column)
                .map(|(_, value)| value.as_str())
                .unwrap_or_default()
        });
        writer.write_record(values)?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| Error::Csv(e.to_string()))?;

    String::from_utf8(bytes).map_err(|e| Error::Csv(e.to_string()))
}
