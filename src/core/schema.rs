//! Header resolution: locates the mandatory columns and remembers the full
//! column list so the output can reproduce it.

use crate::errors::{AppError, AppResult};
use crate::models::record::{Holiday, Record, SENTINEL};

/// Names of the columns the filler needs to find in the header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnNames {
    pub datetime: String,
    pub name: String,
    pub holiday: String,
}

impl Default for ColumnNames {
    fn default() -> Self {
        Self {
            datetime: "dateTime".to_string(),
            name: "name".to_string(),
            holiday: "holiday".to_string(),
        }
    }
}

/// Resolved header.
#[derive(Debug, Clone)]
pub struct Schema {
    columns: Vec<String>,
    holiday_name: String,
    pub datetime_idx: usize,
    pub name_idx: usize,
    /// Position of an already present holiday column (re-run on own output).
    pub holiday_idx: Option<usize>,
    /// Columns that carry the synthetic timestamp instead of the sentinel.
    pub echo_idx: Vec<usize>,
}

impl Schema {
    /// Resolve a header given as already split column names.
    pub fn resolve<S: AsRef<str>>(header: &[S], names: &ColumnNames) -> AppResult<Self> {
        if header.is_empty() {
            return Err(AppError::EmptyInput);
        }

        let columns: Vec<String> = header
            .iter()
            .enumerate()
            .map(|(i, c)| {
                let c = c.as_ref();
                // BOM solo sulla prima colonna
                if i == 0 {
                    c.trim_start_matches('\u{feff}').to_string()
                } else {
                    c.to_string()
                }
            })
            .collect();

        let position = |wanted: &str| columns.iter().position(|c| c.trim() == wanted);

        let (Some(datetime_idx), Some(name_idx)) =
            (position(&names.datetime), position(&names.name))
        else {
            return Err(AppError::MissingRequiredColumns {
                datetime: names.datetime.clone(),
                name: names.name.clone(),
            });
        };

        let holiday_idx = position(&names.holiday);

        Ok(Self {
            columns,
            holiday_name: names.holiday.clone(),
            datetime_idx,
            name_idx,
            holiday_idx,
            echo_idx: Vec::new(),
        })
    }

    /// Resolve a raw, comma separated header line.
    pub fn from_header_line(line: &str, names: &ColumnNames) -> AppResult<Self> {
        let line = line.trim_end_matches(['\r', '\n']);
        if line.is_empty() {
            return Err(AppError::EmptyInput);
        }
        let header: Vec<&str> = line.split(',').collect();
        Self::resolve(&header, names)
    }

    /// Register the timestamp-echo columns. Returns the names that are not in
    /// the header so the caller can warn about them.
    pub fn with_echo_columns<S: AsRef<str>>(mut self, echo: &[S]) -> (Self, Vec<String>) {
        let mut unknown = Vec::new();
        for wanted in echo {
            let wanted = wanted.as_ref();
            match self.index_of(wanted) {
                Some(idx) if idx != self.datetime_idx && idx != self.name_idx => {
                    if !self.echo_idx.contains(&idx) {
                        self.echo_idx.push(idx);
                    }
                }
                Some(_) => {}
                None => unknown.push(wanted.to_string()),
            }
        }
        (self, unknown)
    }

    pub fn index_of(&self, column: &str) -> Option<usize> {
        self.columns.iter().position(|c| c.trim() == column)
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Number of fields every data row must carry.
    pub fn width(&self) -> usize {
        self.columns.len()
    }

    /// True when the holiday column has to be appended on output.
    pub fn appends_holiday(&self) -> bool {
        self.holiday_idx.is_none()
    }

    /// Input header plus the holiday column (unless already present).
    pub fn output_header(&self) -> Vec<String> {
        let mut header = self.columns.clone();
        if self.appends_holiday() {
            header.push(self.holiday_name.clone());
        }
        header
    }

    /// Field values of a record in output order.
    pub fn output_row<'a>(&self, record: &'a Record) -> Vec<&'a str> {
        let mut row: Vec<&str> = record.fields.iter().map(String::as_str).collect();
        if self.appends_holiday() {
            row.push(record.holiday.as_str());
        }
        row
    }

    /// Field values of a synthetic row at `stamp` for instrument `name`.
    pub fn synthetic_fields(&self, stamp: &str, name: &str) -> Vec<String> {
        (0..self.width())
            .map(|idx| {
                if idx == self.datetime_idx || self.echo_idx.contains(&idx) {
                    stamp.to_string()
                } else if idx == self.name_idx {
                    name.to_string()
                } else if Some(idx) == self.holiday_idx {
                    Holiday::Synthetic.as_str().to_string()
                } else {
                    SENTINEL.to_string()
                }
            })
            .collect()
    }
}
