use hifitime::Epoch;

use crate::{
    cfg::Config,
    constants::{COMMENT_MARKER, MIN_RECORD_SEPARATION_S, PROGRAM_NAME},
    parser::Format,
    processor::ProcessingResult,
    record::TriggerRecord,
};

const QUALITY_LEGEND: &str = "% (lat/lon/height=WGS84/ellipsoidal,Q=1:fix,2:float,3:sbas,4:dgps,5:single,6:ppp,ns=# of satellites)";

const DMS_COLUMNS: &str = "%  GPST            latitude(d'\")   longitude(d'\")  height(m)   Q  ns   sdn(m)   sde(m)   sdu(m)  sdne(m)  sdeu(m)  sdun(m) age(s)  ratio";

/// Trailing comment of synthesized lines
pub const SYNTHESIZED_ANNOTATION: &str = "# interpolated";

/// Separates records that are less than min_separation_s apart, by shifting
/// the later one. Records must be sorted in chronological order.
pub fn nudge(records: &mut [TriggerRecord], min_separation_s: f64) {
    for i in 1..records.len() {
        let prev = records[i - 1].record.time;
        let time = records[i].record.time;
        if time.seconds_since(&prev) < min_separation_s {
            let mut nudged = time.offset(min_separation_s);
            if nudged.seconds_since(&prev) <= 0.0 {
                nudged = prev.offset(min_separation_s);
            }
            records[i].record.time = nudged;
        }
    }
}

/// [CanonicalLog] renders recorded and synthesized triggers as one
/// positional log in DMS encoding, preceded by a descriptive header.
#[derive(Debug, Clone)]
pub struct CanonicalLog<'a> {
    result: &'a ProcessingResult,
    source_name: Option<String>,
    processed: Option<Epoch>,
    annotate: bool,
    source_header: bool,
    min_separation_s: f64,
}

impl<'a> CanonicalLog<'a> {
    pub fn new(result: &'a ProcessingResult) -> Self {
        Self {
            result,
            source_name: None,
            processed: None,
            annotate: true,
            source_header: false,
            min_separation_s: MIN_RECORD_SEPARATION_S,
        }
    }

    /// Applies the export preferences of a [Config]
    pub fn with_config(self, cfg: &Config) -> Self {
        self.with_annotation(cfg.annotate_synthesized)
            .with_min_separation(cfg.nudge_s)
    }

    /// Name of the original events log, reported in the header
    pub fn with_source_name(mut self, name: &str) -> Self {
        self.source_name = Some(name.to_string());
        self
    }

    /// Processing instant reported in the header.
    /// Defaults to the system clock at render time.
    pub fn with_processing_time(mut self, t: Epoch) -> Self {
        self.processed = Some(t);
        self
    }

    /// Append [SYNTHESIZED_ANNOTATION] to synthesized lines
    pub fn with_annotation(mut self, annotate: bool) -> Self {
        self.annotate = annotate;
        self
    }

    /// Carry the comment lines of the source events log over
    pub fn with_source_header(mut self, keep: bool) -> Self {
        self.source_header = keep;
        self
    }

    /// Minimal time separation between two records (s)
    pub fn with_min_separation(mut self, seconds: f64) -> Self {
        self.min_separation_s = seconds;
        self
    }

    /// Merged, chronologically sorted and separated records
    pub fn records(&self) -> Vec<TriggerRecord> {
        let mut records = self.result.merged();
        nudge(&mut records, self.min_separation_s);
        records
    }

    /// Formats one record line
    pub fn format_line(record: &TriggerRecord, annotate: bool) -> String {
        let rec = &record.record;
        let mut line = format!(
            "{} {:.3}   {}   {}   {:.4}",
            rec.time.week,
            rec.time.tow_s,
            rec.latitude_dms(),
            rec.longitude_dms(),
            rec.height_m,
        );
        for value in rec.quality.values() {
            line.push_str(&format!("   {:.4}", value));
        }
        if annotate && record.synthesized {
            line.push_str("  ");
            line.push_str(SYNTHESIZED_ANNOTATION);
        }
        line
    }

    fn header(&self, records: &[TriggerRecord]) -> Vec<String> {
        let summary = self.result.summary();
        let mut header = Vec::new();

        if self.source_header {
            // source column legend would contradict ours
            header.extend(
                self.result
                    .trigger_comments()
                    .iter()
                    .filter(|line| Format::from_header(line).is_none())
                    .cloned(),
            );
        }

        header.push(format!(
            "{} program   : {} v{}",
            COMMENT_MARKER,
            PROGRAM_NAME,
            env!("CARGO_PKG_VERSION")
        ));

        let processed = self.processed.or_else(|| Epoch::now().ok());
        match processed {
            Some(t) => header.push(format!("{} processed : {}", COMMENT_MARKER, t)),
            None => header.push(format!("{} processed : unknown", COMMENT_MARKER)),
        }

        if let Some(name) = &self.source_name {
            header.push(format!("{} original  : {}", COMMENT_MARKER, name));
        }

        header.push(format!(
            "{} summary   : Added {} interpolated triggers to {} recorded ({} position samples)",
            COMMENT_MARKER,
            summary.synthesized_count,
            summary.trigger_count,
            summary.position_count,
        ));

        match summary.threshold_m {
            Some(threshold) => header.push(format!(
                "{} threshold : {:.3}m",
                COMMENT_MARKER, threshold
            )),
            None => header.push(format!("{} threshold : none", COMMENT_MARKER)),
        }

        if let Some(spacing) = &summary.spacing {
            header.push(format!(
                "{} spacing   : min {:.3}m median {:.3}m mean {:.3}m",
                COMMENT_MARKER,
                spacing.minimum_spacing_m,
                spacing.median_spacing_m,
                spacing.mean_spacing_m
            ));
        }

        if let (Some(first), Some(last)) = (records.first(), records.last()) {
            let (start, end) = (first.record.time, last.record.time);
            header.push(format!(
                "{} obs start : week{} {:.1}s",
                COMMENT_MARKER, start.week, start.tow_s
            ));
            header.push(format!(
                "{} obs end   : week{} {:.1}s",
                COMMENT_MARKER, end.week, end.tow_s
            ));
        }

        header.push(COMMENT_MARKER.to_string());
        header.push(QUALITY_LEGEND.to_string());
        header.push(DMS_COLUMNS.to_string());
        header
    }

    /// Renders the complete log
    pub fn render(&self) -> String {
        let records = self.records();
        let mut content = String::new();

        for line in self.header(&records) {
            content.push_str(&line);
            content.push('\n');
        }

        for record in records.iter() {
            content.push_str(&Self::format_line(record, self.annotate));
            content.push('\n');
        }

        content
    }
}
