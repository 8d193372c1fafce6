use crate::core::aggregate::Period;
use clap::{Parser, Subcommand};

/// Command-line interface definition for rHourFill
/// CLI application to make hourly bar files contiguous
#[derive(Parser)]
#[command(
    name = "rhourfill",
    version = env!("CARGO_PKG_VERSION"),
    about = "Insert placeholder rows for missing hours in hourly market bar CSV files",
    long_about = None
)]
pub struct Cli {
    /// Use a custom configuration file instead of ~/.rhourfill/rhourfill.conf
    #[arg(global = true, long = "config", value_name = "FILE")]
    pub config: Option<String>,

    /// Print errors only
    #[arg(global = true, long = "quiet", short = 'q')]
    pub quiet: bool,

    /// Run in test mode (no config file update)
    #[arg(global = true, long = "test", hide = true)]
    pub test: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Create the configuration file with default values
    Init,

    /// Manage the configuration file (view, check or edit)
    Config {
        #[arg(long = "print", help = "Print the current configuration")]
        print_config: bool,

        #[arg(long = "check", help = "Check the configuration for problems")]
        check: bool,

        #[arg(
            long = "edit",
            help = "Edit the configuration file (default editor: $EDITOR, or nano/notepad)"
        )]
        edit_config: bool,

        #[arg(
            long = "editor",
            help = "Specify the editor to use (vim, nano, or custom path)"
        )]
        editor: Option<String>,
    },

    /// Fill missing hours and write the augmented CSV
    Fill {
        /// Input CSV (header first; `.gz` is decompressed)
        input: String,

        /// Output CSV (`.gz` is compressed)
        output: String,

        /// Overwrite output file without confirmation
        #[arg(long, short = 'f')]
        force: bool,

        /// Reject rows whose hour does not follow the previous one
        #[arg(long)]
        strict: bool,

        /// Column that repeats the synthetic timestamp instead of -1 (repeatable)
        #[arg(long = "echo", value_name = "COLUMN")]
        echo: Vec<String>,

        #[command(flatten)]
        columns: ColumnArgs,
    },

    /// Resample minute OHLCV bars into hourly or daily bars
    Aggregate {
        /// Input CSV with Date, Open, High, Low, Close and Volume columns
        input: String,

        /// Output CSV (`.gz` is compressed)
        output: String,

        /// Target bar length
        #[arg(long, short = 'p', value_enum, default_value_t = Period::Hour)]
        period: Period,

        /// Overwrite output file without confirmation
        #[arg(long, short = 'f')]
        force: bool,

        #[arg(long = "date-column", value_name = "NAME", default_value = "Date")]
        date_column: String,

        /// Volume column (default: 'Volume BTC', else 'Volume')
        #[arg(long = "volume-column", value_name = "NAME")]
        volume_column: Option<String>,
    },

    /// Report gaps without writing any output
    Check {
        /// Input CSV (header first; `.gz` is decompressed)
        input: String,

        /// Reject rows whose hour does not follow the previous one
        #[arg(long)]
        strict: bool,

        /// Also export the report as JSON
        #[arg(long, value_name = "FILE")]
        json: Option<String>,

        #[command(flatten)]
        columns: ColumnArgs,
    },
}

/// Per-run overrides of the configured column names.
#[derive(clap::Args, Debug, Clone, Default)]
pub struct ColumnArgs {
    #[arg(long = "datetime-column", value_name = "NAME")]
    pub datetime_column: Option<String>,

    #[arg(long = "name-column", value_name = "NAME")]
    pub name_column: Option<String>,

    #[arg(long = "holiday-column", value_name = "NAME")]
    pub holiday_column: Option<String>,
}
