pub mod aggregate;
pub mod check;
pub mod config;
pub mod fill;
pub mod init;

use crate::cli::parser::ColumnArgs;
use crate::config::Config;
use crate::core::fill::OrderPolicy;
use crate::core::logic::FillOptions;

/// Merge config values with per-run CLI overrides.
pub(crate) fn build_options(
    cfg: &Config,
    columns: &ColumnArgs,
    strict: bool,
    echo: &[String],
) -> FillOptions {
    let mut opts = FillOptions::from_config(cfg);

    if let Some(c) = &columns.datetime_column {
        opts.names.datetime = c.clone();
    }
    if let Some(c) = &columns.name_column {
        opts.names.name = c.clone();
    }
    if let Some(c) = &columns.holiday_column {
        opts.names.holiday = c.clone();
    }
    if strict {
        opts.policy = OrderPolicy::Strict;
    }
    for col in echo {
        if !opts.echo_columns.contains(col) {
            opts.echo_columns.push(col.clone());
        }
    }

    opts
}
