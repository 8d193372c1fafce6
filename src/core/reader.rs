//! CSV input: opens the file (gzip aware), resolves the header and yields
//! the data rows with their line numbers.

use crate::core::fill::RawRow;
use crate::core::schema::{ColumnNames, Schema};
use crate::errors::{AppError, AppResult};
use crate::utils::path::is_gzip;
use csv::{ReaderBuilder, StringRecord};
use flate2::read::MultiGzDecoder;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

/// Open `path` for reading, decompressing `.gz` files on the fly.
pub fn open_input(path: &Path) -> AppResult<Box<dyn Read>> {
    let file = File::open(path)?;
    if is_gzip(path) {
        Ok(Box::new(MultiGzDecoder::new(BufReader::new(file))))
    } else {
        Ok(Box::new(BufReader::new(file)))
    }
}

/// Comma separated reader with no quote interpretation: every byte between
/// two commas is kept as is. Row width is checked by the caller.
pub fn plain_reader<R: Read>(input: R) -> csv::Reader<R> {
    ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .quoting(false)
        .from_reader(input)
}

/// First record of the input; `EmptyInput` when there is none.
pub fn read_header<R: Read>(reader: &mut csv::Reader<R>) -> AppResult<StringRecord> {
    // Header gestito a mano: file senza righe → EmptyInput
    let mut header = StringRecord::new();
    if !reader.read_record(&mut header)? {
        return Err(AppError::EmptyInput);
    }
    Ok(header)
}

/// 1-based input line of a record read by [`plain_reader`].
pub fn record_line(rec: &StringRecord) -> u64 {
    rec.position().map(|p| p.line()).unwrap_or_default()
}

pub struct CsvSource<R: Read> {
    reader: csv::Reader<R>,
    schema: Schema,
}

impl CsvSource<Box<dyn Read>> {
    pub fn open(path: &Path, names: &ColumnNames) -> AppResult<Self> {
        Self::from_reader(open_input(path)?, names)
    }
}

impl<R: Read> CsvSource<R> {
    /// Read the header line and resolve it. Fails before any data row is read.
    pub fn from_reader(input: R, names: &ColumnNames) -> AppResult<Self> {
        let mut reader = plain_reader(input);
        let header = read_header(&mut reader)?;

        let columns: Vec<&str> = header.iter().collect();
        let schema = Schema::resolve(&columns, names)?;

        Ok(Self { reader, schema })
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    /// Register timestamp-echo columns; returns those missing from the header.
    pub fn with_echo_columns<S: AsRef<str>>(&mut self, echo: &[S]) -> Vec<String> {
        let (schema, unknown) = self.schema.clone().with_echo_columns(echo);
        self.schema = schema;
        unknown
    }

    /// Split into schema and row iterator so both can be borrowed at once.
    pub fn split(&mut self) -> (&Schema, impl Iterator<Item = AppResult<RawRow>> + '_) {
        let schema = &self.schema;
        let rows = self.reader.records().map(|rec| -> AppResult<RawRow> {
            let rec = rec?;
            Ok(RawRow::new(record_line(&rec), rec.iter()))
        });
        (schema, rows)
    }
}
