use crate::core::aggregate::{BAR_HEADER, Bar};
use crate::core::schema::Schema;
use crate::errors::AppResult;
use crate::models::Record;
use crate::utils::path::is_gzip;
use csv::{QuoteStyle, Writer, WriterBuilder};
use flate2::Compression;
use flate2::write::GzEncoder;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

/// Output file, plain or gzip-compressed.
///
/// Must be closed with [`Output::finish`]: dropping it would swallow the
/// errors of the last flush and of the gzip trailer.
pub enum Output {
    Plain(BufWriter<File>),
    Gz(GzEncoder<BufWriter<File>>),
}

impl Output {
    /// Create `path`, gzip-compressing `.gz` files.
    pub fn create(path: &Path) -> AppResult<Self> {
        let file = BufWriter::new(File::create(path)?);
        if is_gzip(path) {
            Ok(Output::Gz(GzEncoder::new(file, Compression::default())))
        } else {
            Ok(Output::Plain(file))
        }
    }

    /// Write the gzip trailer (if any) and flush everything to disk.
    pub fn finish(self) -> io::Result<()> {
        let buffered = match self {
            Output::Plain(w) => w,
            Output::Gz(enc) => enc.finish()?,
        };
        let file = buffered.into_inner().map_err(io::IntoInnerError::into_error)?;
        file.sync_all()
    }
}

impl Write for Output {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self {
            Output::Plain(w) => w.write(buf),
            Output::Gz(w) => w.write(buf),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self {
            Output::Plain(w) => w.flush(),
            Output::Gz(w) => w.flush(),
        }
    }
}

/// Comma separated writer that never adds quotes, so original field bytes
/// come out exactly as they were read.
pub fn plain_writer<W: Write>(out: W) -> Writer<W> {
    WriterBuilder::new()
        .quote_style(QuoteStyle::Never)
        .from_writer(out)
}

/// Flush `writer` and hand back the inner output.
pub fn into_output<W: Write>(writer: Writer<W>) -> AppResult<W> {
    let inner = writer
        .into_inner()
        .map_err(|e| io::Error::other(format!("CSV flush error: {}", e.error())))?;
    Ok(inner)
}

/// Scrive header e righe (originali + sintetiche) nel CSV di output.
pub struct CsvSink<'s, W: Write> {
    writer: Writer<W>,
    schema: &'s Schema,
}

impl<'s> CsvSink<'s, Output> {
    pub fn create(path: &Path, schema: &'s Schema) -> AppResult<Self> {
        Self::from_writer(Output::create(path)?, schema)
    }
}

impl<'s, W: Write> CsvSink<'s, W> {
    /// Wrap `out` and write the augmented header immediately.
    pub fn from_writer(out: W, schema: &'s Schema) -> AppResult<Self> {
        let mut writer = plain_writer(out);
        writer.write_record(schema.output_header())?;
        Ok(Self { writer, schema })
    }

    pub fn write(&mut self, record: &Record) -> AppResult<()> {
        self.writer.write_record(self.schema.output_row(record))?;
        Ok(())
    }

    /// Flush and hand back the inner writer.
    pub fn finish(self) -> AppResult<W> {
        into_output(self.writer)
    }
}

/// Write aggregated bars under the `Timestamp,Open,High,Low,Close,Volume` header.
pub fn write_bars<W: Write>(out: W, bars: &[Bar]) -> AppResult<W> {
    let mut writer = plain_writer(out);
    writer.write_record(BAR_HEADER)?;
    for bar in bars {
        writer.write_record(bar.to_fields())?;
    }
    into_output(writer)
}
