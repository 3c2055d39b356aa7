//! Report row schema and CSV encoding
//!
//! Column order is fixed and shared by every row ever written to a report
//! file. Optional values are written as empty fields.

use std::path::PathBuf;

use chrono::NaiveDateTime;

use crate::error::{Result, SvError};
use crate::metrics::MetricSet;
use crate::rules::{Status, Verdict};
use crate::signal::SignalMode;

/// Timestamp layout used in report rows and summaries
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// Separator between individual reasons in the `reasons` column
pub const REASON_SEPARATOR: &str = "; ";

/// Report columns, in file order
pub const COLUMNS: [&str; 15] = [
    "run_id",
    "timestamp",
    "mode",
    "freq_hz",
    "noise_std",
    "seed",
    "snr_db",
    "fft_peak_hz",
    "fft_peak_mag",
    "mean",
    "std",
    "rms",
    "status",
    "reasons",
    "plot",
];

/// One evaluated point, as recorded in the report
#[derive(Debug, Clone, PartialEq)]
pub struct ReportRow {
    pub run_id: String,
    pub timestamp: NaiveDateTime,
    pub mode: SignalMode,
    pub freq_hz: f64,
    pub noise_std: f64,
    pub seed: Option<u64>,
    pub snr_db: f64,
    pub fft_peak_hz: f64,
    pub fft_peak_mag: f64,
    pub mean: f64,
    pub std: f64,
    pub rms: f64,
    pub status: Status,
    pub reasons: Vec<String>,
    pub plot: Option<PathBuf>,
}

/// Run-level fields shared by every row of one invocation
#[derive(Debug, Clone, PartialEq)]
pub struct RowContext<'a> {
    pub run_id: &'a str,
    pub timestamp: NaiveDateTime,
    pub mode: SignalMode,
    pub freq_hz: f64,
    pub noise_std: f64,
    pub seed: Option<u64>,
}

impl ReportRow {
    /// Combine run metadata with one point's metrics and verdict
    pub fn new(ctx: RowContext<'_>, metrics: &MetricSet, verdict: &Verdict, plot: Option<PathBuf>) -> Self {
        Self {
            run_id: ctx.run_id.to_string(),
            timestamp: ctx.timestamp,
            mode: ctx.mode,
            freq_hz: ctx.freq_hz,
            noise_std: ctx.noise_std,
            seed: ctx.seed,
            snr_db: metrics.snr_db,
            fft_peak_hz: metrics.fft_peak_hz,
            fft_peak_mag: metrics.fft_peak_mag,
            mean: metrics.mean,
            std: metrics.std,
            rms: metrics.rms,
            status: verdict.status,
            reasons: verdict.reasons.clone(),
            plot,
        }
    }

    /// Output as CSV header
    pub fn csv_header() -> String {
        COLUMNS.join(",")
    }

    /// Field values in column order, unquoted
    pub fn fields(&self) -> [String; 15] {
        [
            self.run_id.clone(),
            self.timestamp.format(TIMESTAMP_FORMAT).to_string(),
            self.mode.to_string(),
            format_float(self.freq_hz),
            format_float(self.noise_std),
            self.seed.map(|s| s.to_string()).unwrap_or_default(),
            format_float(self.snr_db),
            format_float(self.fft_peak_hz),
            format_float(self.fft_peak_mag),
            format_float(self.mean),
            format_float(self.std),
            format_float(self.rms),
            self.status.to_string(),
            self.reasons.join(REASON_SEPARATOR),
            self.plot
                .as_ref()
                .map(|p| p.display().to_string())
                .unwrap_or_default(),
        ]
    }

    /// Output as CSV row (no trailing newline)
    pub fn to_csv_row(&self) -> String {
        self.fields()
            .iter()
            .map(|f| quote_field(f))
            .collect::<Vec<_>>()
            .join(",")
    }

    /// Rebuild a row from parsed field values
    ///
    /// `line` is only used for error messages.
    pub fn from_fields(fields: &[String], line: usize) -> Result<Self> {
        if fields.len() != COLUMNS.len() {
            return Err(SvError::ReportParse {
                line,
                reason: format!("expected {} fields, found {}", COLUMNS.len(), fields.len()),
            });
        }

        let float = |idx: usize| -> Result<f64> {
            fields[idx].parse::<f64>().map_err(|e| SvError::ReportParse {
                line,
                reason: format!("column '{}': {}", COLUMNS[idx], e),
            })
        };
        let parse_err = |idx: usize, reason: String| SvError::ReportParse {
            line,
            reason: format!("column '{}': {}", COLUMNS[idx], reason),
        };

        let timestamp = NaiveDateTime::parse_from_str(&fields[1], TIMESTAMP_FORMAT)
            .map_err(|e| parse_err(1, e.to_string()))?;
        let mode = fields[2]
            .parse::<SignalMode>()
            .map_err(|e| parse_err(2, e.to_string()))?;
        let seed = match fields[5].as_str() {
            "" => None,
            s => Some(s.parse::<u64>().map_err(|e| parse_err(5, e.to_string()))?),
        };
        let status = fields[12].parse::<Status>().map_err(|e| parse_err(12, e))?;
        let reasons = match fields[13].as_str() {
            "" => Vec::new(),
            s => s.split(REASON_SEPARATOR).map(str::to_string).collect(),
        };
        let plot = match fields[14].as_str() {
            "" => None,
            s => Some(PathBuf::from(s)),
        };

        Ok(Self {
            run_id: fields[0].clone(),
            timestamp,
            mode,
            freq_hz: float(3)?,
            noise_std: float(4)?,
            seed,
            snr_db: float(6)?,
            fft_peak_hz: float(7)?,
            fft_peak_mag: float(8)?,
            mean: float(9)?,
            std: float(10)?,
            rms: float(11)?,
            status,
            reasons,
            plot,
        })
    }
}

/// Shortest representation that parses back to the same value
fn format_float(value: f64) -> String {
    format!("{:?}", value)
}

/// Quote a field only when it contains a delimiter, quote or line break
pub(crate) fn quote_field(field: &str) -> String {
    if field.contains(&[',', '"', '\n', '\r'][..]) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

/// Split CSV text into records of unquoted fields
///
/// Returns `(line_number, fields)` pairs, where the line number is where the
/// record starts (1-based). Blank lines are skipped.
pub(crate) fn parse_records(text: &str) -> Result<Vec<(usize, Vec<String>)>> {
    let mut records = Vec::new();
    let mut fields: Vec<String> = Vec::new();
    let mut field = String::new();
    let mut in_quotes = false;
    let mut line = 1;
    let mut record_line = 1;
    let mut chars = text.chars().peekable();

    while let Some(c) = chars.next() {
        if in_quotes {
            match c {
                '"' if chars.peek() == Some(&'"') => {
                    chars.next();
                    field.push('"');
                }
                '"' => in_quotes = false,
                '\n' => {
                    line += 1;
                    field.push(c);
                }
                _ => field.push(c),
            }
            continue;
        }

        match c {
            '"' if field.is_empty() => in_quotes = true,
            ',' => fields.push(std::mem::take(&mut field)),
            '\r' if chars.peek() == Some(&'\n') => {}
            '\n' => {
                fields.push(std::mem::take(&mut field));
                if !(fields.len() == 1 && fields[0].is_empty()) {
                    records.push((record_line, std::mem::take(&mut fields)));
                }
                fields.clear();
                line += 1;
                record_line = line;
            }
            _ => field.push(c),
        }
    }

    if in_quotes {
        return Err(SvError::ReportParse {
            line: record_line,
            reason: "unterminated quoted field".to_string(),
        });
    }
    if !field.is_empty() || !fields.is_empty() {
        fields.push(field);
        records.push((record_line, fields));
    }

    Ok(records)
}
