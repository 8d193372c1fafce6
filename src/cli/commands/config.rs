use crate::cli::parser::Commands;
use crate::config::Config;
use crate::errors::{AppError, AppResult};
use crate::ui::messages::{error, success, warning};
use std::path::Path;
use std::process::Command;

/// Handle the `config` subcommand
pub fn handle(cmd: &Commands, cfg: &Config, path: &Path) -> AppResult<()> {
    if let Commands::Config {
        print_config,
        check,
        edit_config,
        editor,
    } = cmd
    {
        // ---- PRINT CONFIG ----
        if *print_config {
            let yaml = serde_yaml::to_string(cfg).map_err(|e| AppError::Config(e.to_string()))?;
            println!("📄 Current configuration ({}):\n", path.display());
            println!("{}", yaml);
        }

        // ---- CHECK CONFIG ----
        if *check {
            let issues = cfg.check();
            if issues.is_empty() {
                success("Configuration is valid.");
            } else {
                for issue in &issues {
                    warning(issue);
                }
                return Err(AppError::Config(format!(
                    "{} problem(s) found in {}",
                    issues.len(),
                    path.display()
                )));
            }
        }

        // ---- EDIT CONFIG ----
        if *edit_config {
            if !path.exists() {
                cfg.save_to(path)?;
            }

            let default_editor = std::env::var("EDITOR")
                .or_else(|_| std::env::var("VISUAL"))
                .unwrap_or_else(|_| {
                    if cfg!(target_os = "windows") {
                        "notepad".to_string()
                    } else {
                        "nano".to_string()
                    }
                });

            // Se l'utente ha passato --editor, usiamo quello
            let editor_to_use = editor.clone().unwrap_or_else(|| default_editor.clone());

            let edited = run_editor(&editor_to_use, path)
                || (editor_to_use != default_editor && {
                    warning(format!(
                        "Editor '{}' not available, falling back to '{}'",
                        editor_to_use, default_editor
                    ));
                    run_editor(&default_editor, path)
                });

            if !edited {
                error("Failed to edit configuration file");
                return Err(AppError::Config(format!(
                    "could not launch an editor for {}",
                    path.display()
                )));
            }

            // verifica che il file modificato sia ancora leggibile
            Config::load_from(path)?;
            success("Configuration file edited successfully");
        }
    }

    Ok(())
}

fn run_editor(editor: &str, path: &Path) -> bool {
    matches!(Command::new(editor).arg(path).status(), Ok(s) if s.success())
}
