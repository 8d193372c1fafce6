use crate::config::Config;
use crate::core::aggregate::{AggregateReport, BarColumns, Period, aggregate};
use crate::core::calculator::gaps::GapReport;
use crate::core::fill::{OrderPolicy, RawRow, fill_rows};
use crate::core::reader::{CsvSource, open_input};
use crate::core::schema::{ColumnNames, Schema};
use crate::errors::{AppError, AppResult};
use crate::export::{CsvSink, Output, ensure_writable, write_bars};
use crate::ui::messages::{info, warning};
use crate::utils::path::same_file;
use std::fs;
use std::path::Path;

/// Knobs for a single run, built from the config plus CLI overrides.
#[derive(Debug, Clone, Default)]
pub struct FillOptions {
    pub names: ColumnNames,
    pub echo_columns: Vec<String>,
    pub policy: OrderPolicy,
}

impl FillOptions {
    pub fn from_config(cfg: &Config) -> Self {
        Self {
            names: cfg.column_names(),
            echo_columns: cfg.echo_columns.clone(),
            policy: cfg.order_policy(),
        }
    }
}

/// Logica di alto livello: file → file.
pub struct FillLogic;

impl FillLogic {
    /// Fill every missing hour of `input` and write the result to `output`.
    ///
    /// Nothing is written unless the header resolves. If the pass fails
    /// half-way the partial output file is removed.
    pub fn fill(
        input: &Path,
        output: &Path,
        opts: &FillOptions,
        force: bool,
    ) -> AppResult<GapReport> {
        check_distinct(input, output)?;

        let mut source = open_source(input, opts)?;

        ensure_writable(output, force)?;
        info(format!(
            "Filling {} → {}",
            input.display(),
            output.display()
        ));

        let (schema, rows) = source.split();
        discard_on_error(write_filled(schema, opts.policy, rows, output), output)
    }

    /// Run the same pass as [`FillLogic::fill`] without writing anything.
    pub fn check(input: &Path, opts: &FillOptions) -> AppResult<GapReport> {
        let mut source = open_source(input, opts)?;
        let (schema, rows) = source.split();
        fill_rows(schema, opts.policy, rows, |_| Ok(()))
    }
}

/// Resampling di barre al minuto: file → file.
pub struct AggregateLogic;

impl AggregateLogic {
    /// Resample the minute bars of `input` to `period` bars in `output`.
    ///
    /// The whole input is read before the output is created, so a bad row
    /// never leaves a file behind.
    pub fn aggregate(
        input: &Path,
        output: &Path,
        columns: &BarColumns,
        period: Period,
        force: bool,
    ) -> AppResult<AggregateReport> {
        check_distinct(input, output)?;

        let aggregated = aggregate(open_input(input)?, columns, period)?;

        ensure_writable(output, force)?;
        info(format!(
            "Aggregating {} → {} ({period} bars)",
            input.display(),
            output.display()
        ));

        let written = Output::create(output)
            .and_then(|out| write_bars(out, &aggregated.bars))
            .and_then(|out| out.finish().map_err(AppError::from));
        discard_on_error(written, output)?;

        Ok(aggregated.report)
    }
}

fn check_distinct(input: &Path, output: &Path) -> AppResult<()> {
    if same_file(input, output) {
        return Err(AppError::Other(format!(
            "Input and output must be different files: {}",
            input.display()
        )));
    }
    Ok(())
}

/// Remove `output` when `result` is an error: niente output parziale.
fn discard_on_error<T>(result: AppResult<T>, output: &Path) -> AppResult<T> {
    if result.is_err()
        && output.exists()
        && let Err(e) = fs::remove_file(output)
    {
        warning(format!(
            "Failed to remove partial output {}: {}",
            output.display(),
            e
        ));
    }
    result
}

fn open_source(
    input: &Path,
    opts: &FillOptions,
) -> AppResult<CsvSource<Box<dyn std::io::Read>>> {
    let mut source = CsvSource::open(input, &opts.names)?;

    for col in source.with_echo_columns(&opts.echo_columns) {
        warning(format!("Echo column '{col}' not found in header, ignored"));
    }

    Ok(source)
}

fn write_filled<I>(
    schema: &Schema,
    policy: OrderPolicy,
    rows: I,
    output: &Path,
) -> AppResult<GapReport>
where
    I: IntoIterator<Item = AppResult<RawRow>>,
{
    let mut sink = CsvSink::create(output, schema)?;
    let report = fill_rows(schema, policy, rows, |record| sink.write(&record))?;
    sink.finish()?.finish()?;
    Ok(report)
}
