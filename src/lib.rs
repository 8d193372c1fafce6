//! rHourFill library root.
//! Exposes the CLI parser, the high-level run() function, and the gap
//! filling core so it can be used without the binary.

pub mod cli;
pub mod config;
pub mod core;
pub mod errors;
pub mod export;
pub mod models;
pub mod ui;
pub mod utils;

use clap::Parser;
use cli::parser::{Cli, Commands};
use config::Config;
use errors::AppResult;
use std::path::PathBuf;

pub use crate::core::fill::{OrderPolicy, fill_gaps, fill_lines, fill_rows};
pub use crate::core::aggregate::{BarColumns, Period};
pub use crate::core::logic::{AggregateLogic, FillLogic, FillOptions};
pub use crate::core::schema::{ColumnNames, Schema};

/// Config file selected by `--config`, or the platform default.
pub fn config_path(cli: &Cli) -> PathBuf {
    cli.config
        .as_deref()
        .map(utils::path::expand_tilde)
        .unwrap_or_else(Config::config_file)
}

/// Central command dispatcher
pub fn dispatch(cli: &Cli, cfg: &Config) -> AppResult<()> {
    match &cli.command {
        Commands::Init => cli::commands::init::handle(cli),
        Commands::Config { .. } => cli::commands::config::handle(&cli.command, cfg, &config_path(cli)),
        Commands::Fill { .. } => cli::commands::fill::handle(&cli.command, cfg),
        Commands::Check { .. } => cli::commands::check::handle(&cli.command, cfg),
        Commands::Aggregate { .. } => cli::commands::aggregate::handle(&cli.command),
    }
}

/// Entry point usato da main.rs
pub fn run() -> AppResult<()> {
    // 1️⃣ parse CLI
    let cli = Cli::parse();
    ui::messages::set_quiet(cli.quiet);

    // 2️⃣ init non ha bisogno di una config valida
    if let Commands::Init = cli.command {
        return dispatch(&cli, &Config::default());
    }

    // 3️⃣ carica config UNA sola volta
    let cfg = Config::load_from(&config_path(&cli))?;

    // 4️⃣ passa tutto al dispatcher
    dispatch(&cli, &cfg)
}
