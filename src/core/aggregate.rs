//! Resampling of minute OHLCV bars into coarser bars (hour or day).
//!
//! Every output bar takes the open of the earliest input bar of its period,
//! the close of the latest one, the extreme high/low and the summed volume.
//! Periods without input bars are not emitted.

use crate::core::reader::{read_header, record_line};
use crate::errors::{AppError, AppResult};
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use csv::{ReaderBuilder, StringRecord, Trim};
use std::collections::BTreeMap;
use std::fmt;
use std::io::Read;

const PRICE_COLUMNS: [&str; 4] = ["Open", "High", "Low", "Close"];
const VOLUME_COLUMNS: [&str; 2] = ["Volume BTC", "Volume"];

/// Header of the aggregated CSV.
pub const BAR_HEADER: [&str; 6] = ["Timestamp", "Open", "High", "Low", "Close", "Volume"];

const NAIVE_FORMATS: [&str; 6] = [
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M",
];

/// Target bar length.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum Period {
    /// Normalise only: one bar per minute
    Minute,
    #[default]
    Hour,
    Day,
}

impl Period {
    pub fn seconds(&self) -> i64 {
        match self {
            Period::Minute => 60,
            Period::Hour => 3_600,
            Period::Day => 86_400,
        }
    }

    /// Start (epoch seconds) of the period containing `ts`.
    pub fn bucket(&self, ts: i64) -> i64 {
        ts.div_euclid(self.seconds()) * self.seconds()
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Period::Minute => "minute",
            Period::Hour => "hour",
            Period::Day => "day",
        }
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Input column names. `volume: None` picks the first of
/// `Volume BTC` / `Volume` present in the header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BarColumns {
    pub date: String,
    pub volume: Option<String>,
}

impl Default for BarColumns {
    fn default() -> Self {
        Self {
            date: "Date".to_string(),
            volume: None,
        }
    }
}

/// One OHLCV bar. `timestamp` is the epoch second of its first input bar.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bar {
    pub timestamp: i64,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: f64,
}

impl Bar {
    /// Fields as written to the output CSV, prices with two decimals.
    pub fn to_fields(&self) -> [String; 6] {
        [
            self.timestamp.to_string(),
            format!("{:.2}", self.open),
            format!("{:.2}", self.high),
            format!("{:.2}", self.low),
            format!("{:.2}", self.close),
            format!("{:.2}", self.volume),
        ]
    }
}

/// Summary of an aggregation pass.
#[derive(Debug, Clone, Default)]
pub struct AggregateReport {
    pub period: Period,
    pub input_rows: usize,
    pub output_rows: usize,
    pub first: Option<NaiveDateTime>,
    pub last: Option<NaiveDateTime>,
}

#[derive(Debug, Clone)]
pub struct Aggregated {
    pub bars: Vec<Bar>,
    pub report: AggregateReport,
}

/// Resolved positions of the columns an aggregation reads.
#[derive(Debug, Clone)]
struct BarLayout {
    date: usize,
    prices: [usize; 4],
    volume: usize,
    names: [String; 6],
}

impl BarLayout {
    fn resolve(header: &StringRecord, cols: &BarColumns) -> AppResult<Self> {
        let position = |wanted: &str| {
            header
                .iter()
                .enumerate()
                .position(|(i, c)| {
                    let c = if i == 0 { c.trim_start_matches('\u{feff}') } else { c };
                    c == wanted
                })
                .ok_or_else(|| AppError::MissingColumn(format!("'{wanted}'")))
        };

        let date = position(cols.date.as_str())?;
        let mut prices = [0; 4];
        for (slot, name) in prices.iter_mut().zip(PRICE_COLUMNS) {
            *slot = position(name)?;
        }

        let volume_name = match &cols.volume {
            Some(v) => v.clone(),
            None => VOLUME_COLUMNS
                .iter()
                .find(|v| position(**v).is_ok())
                .map(|v| v.to_string())
                .ok_or_else(|| {
                    AppError::MissingColumn(
                        VOLUME_COLUMNS.map(|v| format!("'{v}'")).join(" or "),
                    )
                })?,
        };
        let volume = position(volume_name.as_str())?;

        Ok(Self {
            date,
            prices,
            volume,
            names: [
                cols.date.clone(),
                PRICE_COLUMNS[0].to_string(),
                PRICE_COLUMNS[1].to_string(),
                PRICE_COLUMNS[2].to_string(),
                PRICE_COLUMNS[3].to_string(),
                volume_name,
            ],
        })
    }

    fn width(&self) -> usize {
        self.prices
            .iter()
            .chain([&self.date, &self.volume])
            .max()
            .map_or(0, |m| m + 1)
    }

    fn parse(&self, rec: &StringRecord) -> AppResult<(NaiveDateTime, Bar)> {
        let line = record_line(rec);
        if rec.len() < self.width() {
            return Err(AppError::SchemaMismatch {
                line,
                expected: self.width(),
                found: rec.len(),
            });
        }

        let raw = &rec[self.date];
        let when = parse_date(raw).ok_or_else(|| AppError::InvalidDateTime {
            line,
            value: raw.to_string(),
        })?;

        let bar = Bar {
            timestamp: when.and_utc().timestamp(),
            open: parse_number(rec, self.prices[0], &self.names[1])?,
            high: parse_number(rec, self.prices[1], &self.names[2])?,
            low: parse_number(rec, self.prices[2], &self.names[3])?,
            close: parse_number(rec, self.prices[3], &self.names[4])?,
            volume: parse_number(rec, self.volume, &self.names[5])?,
        };
        Ok((when, bar))
    }
}

fn parse_number(rec: &StringRecord, idx: usize, column: &str) -> AppResult<f64> {
    rec[idx]
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| AppError::InvalidNumber {
            line: record_line(rec),
            column: column.to_string(),
            value: rec[idx].to_string(),
        })
}

/// Parse a bar date. Offsets are converted to UTC; naive values are taken
/// as UTC already.
pub fn parse_date(raw: &str) -> Option<NaiveDateTime> {
    let raw = raw.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.naive_utc());
    }
    if let Ok(dt) = DateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S%:z") {
        return Some(dt.naive_utc());
    }

    NAIVE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
        .or_else(|| {
            NaiveDate::parse_from_str(raw, "%Y-%m-%d")
                .ok()
                .and_then(|d| d.and_hms_opt(0, 0, 0))
        })
}

/// Bar under construction plus the epoch second of its latest input.
struct Bucket {
    bar: Bar,
    latest: i64,
}

impl Bucket {
    fn new(bar: Bar) -> Self {
        Self {
            latest: bar.timestamp,
            bar,
        }
    }

    fn absorb(&mut self, b: Bar) {
        if b.timestamp < self.bar.timestamp {
            self.bar.timestamp = b.timestamp;
            self.bar.open = b.open;
        }
        if b.timestamp >= self.latest {
            self.latest = b.timestamp;
            self.bar.close = b.close;
        }
        self.bar.high = self.bar.high.max(b.high);
        self.bar.low = self.bar.low.min(b.low);
        self.bar.volume += b.volume;
    }
}

/// Read minute bars from `input` (CSV with header) and resample them.
///
/// Input order does not matter: open and close follow the timestamps.
pub fn aggregate<R: Read>(input: R, cols: &BarColumns, period: Period) -> AppResult<Aggregated> {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(Trim::All)
        .from_reader(input);

    let header = read_header(&mut reader)?;
    let layout = BarLayout::resolve(&header, cols)?;

    let mut buckets: BTreeMap<i64, Bucket> = BTreeMap::new();
    let mut report = AggregateReport {
        period,
        ..AggregateReport::default()
    };

    for rec in reader.records() {
        let rec = rec?;
        let (when, bar) = layout.parse(&rec)?;

        buckets
            .entry(period.bucket(bar.timestamp))
            .and_modify(|b| b.absorb(bar))
            .or_insert_with(|| Bucket::new(bar));

        report.input_rows += 1;
        report.first = Some(report.first.map_or(when, |f| f.min(when)));
        report.last = Some(report.last.map_or(when, |l| l.max(when)));
    }

    let bars: Vec<Bar> = buckets.into_values().map(|b| b.bar).collect();
    report.output_rows = bars.len();

    Ok(Aggregated { bars, report })
}
