use crate::cli::parser::Cli;
use crate::config::Config;
use crate::errors::AppResult;
use crate::ui::messages::{info, success, warning};

/// Handle the `init` command
///
/// Creates the config directory and a configuration file with default
/// values. An existing file is never overwritten.
pub fn handle(cli: &Cli) -> AppResult<()> {
    let path = crate::config_path(cli);

    if path.exists() {
        warning(format!(
            "Configuration file already exists: {}",
            path.display()
        ));
        return Ok(());
    }

    let cfg = Config::default();

    if cli.test {
        info(format!("Test mode: {} not written", path.display()));
    } else {
        cfg.save_to(&path)?;
        success(format!("Config file: {}", path.display()));
    }

    Ok(())
}
