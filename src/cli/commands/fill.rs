use crate::cli::commands::build_options;
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::logic::FillLogic;
use crate::errors::AppResult;
use crate::export::notify_export_success;
use crate::ui::messages::info;
use crate::utils::formatting::plural;
use crate::utils::path::expand_tilde;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Fill {
        input,
        output,
        force,
        strict,
        echo,
        columns,
    } = cmd
    {
        let opts = build_options(cfg, columns, *strict, echo);
        let input = expand_tilde(input);
        let output = expand_tilde(output);

        let report = FillLogic::fill(&input, &output, &opts, *force)?;

        info(format!(
            "{} original, {} synthetic in {}",
            report.original_rows,
            report.synthetic_rows,
            plural(report.gaps.len(), "gap")
        ));
        if report.out_of_order_rows > 0 {
            info(format!(
                "{} passed through without filling",
                plural(report.out_of_order_rows, "out-of-order row")
            ));
        }
        notify_export_success("Filled CSV", &output);
    }
    Ok(())
}
