use crate::cli::commands::build_options;
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::calculator::gaps::GapReport;
use crate::core::logic::FillLogic;
use crate::errors::AppResult;
use crate::export::json::export_report;
use crate::ui::messages::{header, success, warning};
use crate::utils::formatting::{bold, plural};
use crate::utils::hours2readable;
use crate::utils::path::expand_tilde;
use crate::utils::table::{Column, Table};
use ansi_term::Colour;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Check {
        input,
        strict,
        json,
        columns,
    } = cmd
    {
        let opts = build_options(cfg, columns, *strict, &[]);
        let input = expand_tilde(input);

        let report = FillLogic::check(&input, &opts)?;

        header(format!("Gap report: {}", input.display()));
        print_report(&report);

        if let Some(path) = json {
            export_report(&report, &expand_tilde(path))?;
        }
    }
    Ok(())
}

fn print_report(report: &GapReport) {
    let span = match (&report.first, &report.last) {
        (Some(first), Some(last)) => format!("{first} → {last}"),
        _ => "no data rows".to_string(),
    };

    println!("{} {}", bold("Span:"), span);
    println!(
        "{} {} read, {} after fill (expected {})",
        bold("Rows:"),
        report.original_rows,
        report.total_rows(),
        report.expected_rows()
    );

    if !report.gaps.is_empty() {
        let mut table = Table::new(vec![
            Column::right("#"),
            Column::left("after"),
            Column::left("before"),
            Column::right("missing"),
            Column::left("span"),
            Column::left("name"),
        ]);

        for (i, gap) in report.gaps.iter().enumerate() {
            table.add_row(vec![
                (i + 1).to_string(),
                gap.previous.to_string(),
                gap.next.to_string(),
                Colour::Yellow.paint(gap.missing_hours.to_string()).to_string(),
                hours2readable(gap.missing_hours + 1),
                gap.name.clone(),
            ]);
        }

        println!();
        print!("{}", table.render());
        println!();
    }

    if report.out_of_order_rows > 0 {
        warning(format!(
            "{} not after the previous one",
            plural(report.out_of_order_rows, "row")
        ));
    }

    if report.is_clean() {
        success("No gaps found: series is contiguous.");
    } else if !report.gaps.is_empty() {
        warning(format!(
            "{} → {} would be inserted",
            plural(report.gaps.len(), "gap"),
            plural(report.synthetic_rows, "synthetic row")
        ));
    }
}
