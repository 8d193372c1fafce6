//! Gap filler: walks the rows in input order and inserts a synthetic row for
//! every missing hour between two consecutive original rows.
//!
//! The pass is a fold: the only state carried from one row to the next is a
//! [`Pass`] value (cursor + running report), so the filler can run over any
//! row source (CSV reader, raw lines, an in-memory vector) and push records
//! straight to a sink without buffering the whole file.

use crate::core::calculator::gaps::{Cadence, Gap, GapReport, classify};
use crate::core::schema::{ColumnNames, Schema};
use crate::errors::{AppError, AppResult};
use crate::models::{Holiday, HourStamp, Record};
use serde::{Deserialize, Serialize};

/// What to do with a row whose hour does not follow the previous one.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderPolicy {
    /// Pass the row through untouched and move the cursor to it.
    #[default]
    Permissive,
    /// Abort with [`AppError::NonMonotonic`].
    Strict,
}

impl OrderPolicy {
    pub fn from_strict(strict: bool) -> Self {
        if strict {
            OrderPolicy::Strict
        } else {
            OrderPolicy::Permissive
        }
    }
}

/// A data line as read from the input, before validation.
#[derive(Debug, Clone)]
pub struct RawRow {
    /// 1-based line in the input file.
    pub line: u64,
    pub fields: Vec<String>,
}

impl RawRow {
    pub fn new<S: Into<String>>(line: u64, fields: impl IntoIterator<Item = S>) -> Self {
        Self {
            line,
            fields: fields.into_iter().map(Into::into).collect(),
        }
    }
}

/// Last original row seen: its hour and the instrument to copy into gaps.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cursor {
    pub stamp: HourStamp,
    pub name: String,
}

/// Fold accumulator threaded through the rows.
#[derive(Debug, Default)]
pub struct Pass {
    pub cursor: Option<Cursor>,
    pub report: GapReport,
}

impl Pass {
    /// Consume one original record, emitting any synthetic rows that precede
    /// it and then the record itself.
    pub fn advance<F>(
        mut self,
        schema: &Schema,
        policy: OrderPolicy,
        line: u64,
        record: Record,
        emit: &mut F,
    ) -> AppResult<Pass>
    where
        F: FnMut(Record) -> AppResult<()>,
    {
        match self.cursor.take() {
            None => {}
            Some(prev) => match classify(&prev.stamp, &record.stamp) {
                Cadence::Next => {}
                Cadence::Gap { missing } => {
                    for stamp in prev.stamp.hours_between(&record.stamp) {
                        emit(synthesize(schema, stamp, &prev.name))?;
                    }
                    self.report.record_gap(Gap {
                        previous: prev.stamp,
                        next: record.stamp,
                        missing_hours: missing,
                        name: prev.name,
                    });
                }
                Cadence::NotAfter => match policy {
                    OrderPolicy::Strict => {
                        return Err(AppError::NonMonotonic {
                            line,
                            previous: prev.stamp.to_string(),
                            current: record.stamp.to_string(),
                        });
                    }
                    OrderPolicy::Permissive => self.report.out_of_order_rows += 1,
                },
            },
        }

        self.cursor = Some(Cursor {
            stamp: record.stamp,
            name: record.fields[schema.name_idx].clone(),
        });
        self.report.original_rows += 1;
        // in modalità permissiva l'input può tornare indietro: intervallo = min..max
        let stamp = record.stamp;
        self.report.first = Some(self.report.first.map_or(stamp, |f| f.min(stamp)));
        self.report.last = Some(self.report.last.map_or(stamp, |l| l.max(stamp)));

        emit(record)?;
        Ok(self)
    }
}

/// Validate the width of a raw row and parse its `dateTime` field.
pub fn parse_row(schema: &Schema, row: RawRow) -> AppResult<Record> {
    if row.fields.len() != schema.width() {
        return Err(AppError::SchemaMismatch {
            line: row.line,
            expected: schema.width(),
            found: row.fields.len(),
        });
    }

    let raw = &row.fields[schema.datetime_idx];
    let stamp = HourStamp::parse(raw).ok_or_else(|| AppError::InvalidDateTime {
        line: row.line,
        value: raw.clone(),
    })?;

    Ok(Record::original(row.fields, stamp))
}

/// Placeholder row for a missing hour.
pub fn synthesize(schema: &Schema, stamp: HourStamp, name: &str) -> Record {
    Record {
        fields: schema.synthetic_fields(&stamp.to_string(), name),
        stamp,
        holiday: Holiday::Synthetic,
    }
}

/// Run the filler over `rows`, handing every output record to `emit` in
/// chronological order. Stops at the first error.
pub fn fill_rows<I, F>(
    schema: &Schema,
    policy: OrderPolicy,
    rows: I,
    mut emit: F,
) -> AppResult<GapReport>
where
    I: IntoIterator<Item = AppResult<RawRow>>,
    F: FnMut(Record) -> AppResult<()>,
{
    let pass = rows.into_iter().try_fold(Pass::default(), |pass, row| -> AppResult<Pass> {
        let row = row?;
        let line = row.line;
        let record = parse_row(schema, row)?;
        pass.advance(schema, policy, line, record, &mut emit)
    })?;

    Ok(pass.report)
}

/// In-memory variant of [`fill_rows`].
pub fn fill_gaps<I>(
    schema: &Schema,
    policy: OrderPolicy,
    rows: I,
) -> AppResult<(Vec<Record>, GapReport)>
where
    I: IntoIterator<Item = AppResult<RawRow>>,
{
    let mut records = Vec::new();
    let report = fill_rows(schema, policy, rows, |r| {
        records.push(r);
        Ok(())
    })?;
    Ok((records, report))
}

/// Result of filling a series given as raw text lines.
#[derive(Debug)]
pub struct Filled {
    pub schema: Schema,
    pub records: Vec<Record>,
    pub report: GapReport,
}

impl Filled {
    /// Header and rows joined back with commas.
    pub fn to_lines(&self) -> Vec<String> {
        std::iter::once(self.schema.output_header().join(","))
            .chain(
                self.records
                    .iter()
                    .map(|r| self.schema.output_row(r).join(",")),
            )
            .collect()
    }
}

/// Fill a series from plain comma separated lines (header first). Blank
/// lines are skipped; no quoting is interpreted.
pub fn fill_lines<'a, I>(lines: I, names: &ColumnNames, policy: OrderPolicy) -> AppResult<Filled>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut numbered = lines
        .into_iter()
        .enumerate()
        .map(|(i, l)| (i as u64 + 1, l.trim_end_matches(['\r', '\n'])))
        .filter(|(_, l)| !l.is_empty());

    let (_, header) = numbered.next().ok_or(AppError::EmptyInput)?;
    let schema = Schema::from_header_line(header, names)?;

    let rows = numbered.map(|(line, l)| Ok(RawRow::new(line, l.split(','))));
    let (records, report) = fill_gaps(&schema, policy, rows)?;

    Ok(Filled {
        schema,
        records,
        report,
    })
}
