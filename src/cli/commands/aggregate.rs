use crate::cli::parser::Commands;
use crate::core::aggregate::BarColumns;
use crate::core::logic::AggregateLogic;
use crate::errors::AppResult;
use crate::export::notify_export_success;
use crate::ui::messages::{info, warning};
use crate::utils::formatting::plural;
use crate::utils::path::expand_tilde;

pub fn handle(cmd: &Commands) -> AppResult<()> {
    if let Commands::Aggregate {
        input,
        output,
        period,
        force,
        date_column,
        volume_column,
    } = cmd
    {
        let columns = BarColumns {
            date: date_column.clone(),
            volume: volume_column.clone(),
        };
        let input = expand_tilde(input);
        let output = expand_tilde(output);

        let report = AggregateLogic::aggregate(&input, &output, &columns, *period, *force)?;

        match (report.first, report.last) {
            (Some(first), Some(last)) => info(format!(
                "{} → {} from {} ({} to {})",
                plural(report.input_rows, "row"),
                plural(report.output_rows, &format!("{period} bar")),
                input.display(),
                first,
                last
            )),
            _ => warning(format!("No bars in {}", input.display())),
        }
        notify_export_success("Aggregated CSV", &output);
    }
    Ok(())
}
