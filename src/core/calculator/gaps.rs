//! Cadence analysis between consecutive hourly bars and the report that
//! summarizes one fill pass.

use crate::models::hour::HourStamp;
use serde::Serialize;

/// Relation between two consecutive timestamps.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cadence {
    /// Exactly one hour apart.
    Next,
    /// More than one hour apart; `missing` hours must be synthesized.
    Gap { missing: i64 },
    /// Same hour or earlier than the previous row.
    NotAfter,
}

pub fn classify(prev: &HourStamp, next: &HourStamp) -> Cadence {
    match prev.hours_until(next) {
        1 => Cadence::Next,
        d if d > 1 => Cadence::Gap { missing: d - 1 },
        _ => Cadence::NotAfter,
    }
}

/// A span of missing hours between two original rows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Gap {
    /// Hour of the row *before* the gap.
    pub previous: HourStamp,
    /// Hour of the row *after* the gap.
    pub next: HourStamp,
    pub missing_hours: i64,
    /// Instrument copied into the synthetic rows.
    pub name: String,
}

/// Summary of a fill (or check) pass.
#[derive(Debug, Clone, Default, Serialize)]
pub struct GapReport {
    pub first: Option<HourStamp>,
    pub last: Option<HourStamp>,
    pub original_rows: usize,
    pub synthetic_rows: usize,
    /// Rows passed through whose hour did not follow the previous one.
    pub out_of_order_rows: usize,
    pub gaps: Vec<Gap>,
}

impl GapReport {
    pub fn is_clean(&self) -> bool {
        self.gaps.is_empty() && self.out_of_order_rows == 0
    }

    pub fn total_rows(&self) -> usize {
        self.original_rows + self.synthetic_rows
    }

    /// Hours in `[first, last]`, i.e. the row count of a contiguous series.
    pub fn expected_rows(&self) -> usize {
        match (&self.first, &self.last) {
            (Some(first), Some(last)) => first.hours_until(last).max(0) as usize + 1,
            _ => 0,
        }
    }

    pub(crate) fn record_gap(&mut self, gap: Gap) {
        self.synthetic_rows += gap.missing_hours as usize;
        self.gaps.push(gap);
    }
}
