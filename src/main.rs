mod cli;

use clap::Parser;
use cli::OutputFormat;
use log::error;
use std::process::ExitCode;

/*-------------------------------------------------------------------------------------------------
  Main
-------------------------------------------------------------------------------------------------*/

fn main() -> ExitCode {
    let args = cli::Args::parse();

    if let Err(error) = stderrlog::new()
        .module(module_path!())
        .verbosity(args.verbose.log_level_filter())
        .init()
    {
        eprintln!("Failed to initialize logging: {error}");
    }

    let rule = cli::build_rule(&args);
    let target_list = cli::target_list(&args);

    let report = match rule.check(&target_list) {
        Ok(report) => report,
        Err(target_error) => {
            cli::log::target_error(&target_error);
            if args.output == OutputFormat::Json {
                let _ = cli::output::json_error(&target_error)
                    .inspect_err(|error| error!("Failed to write JSON: {error}"));
            }
            return ExitCode::FAILURE;
        }
    };

    cli::log::target_report(&report);

    match args.output {
        OutputFormat::Table => cli::output::target_table(&report),
        OutputFormat::Count => cli::output::address_count(&report),
        OutputFormat::Json => {
            if let Err(error) = cli::output::json_report(&report) {
                error!("Failed to write JSON: {error}");
                return ExitCode::FAILURE;
            }
        }
    }

    if let Some(csv_file) = &args.csv_file {
        if let Err(error) = cli::csv::save(&report, csv_file) {
            error!("Failed to save targets to `{:?}`: {}", csv_file, error);
            return ExitCode::FAILURE;
        }
    }

    ExitCode::SUCCESS
}
