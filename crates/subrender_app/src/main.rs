use std::process::ExitCode;

use subrender_app::cli::{CliArgs, RunSummary, USAGE, run};

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = match CliArgs::parse(std::env::args().skip(1)) {
        Ok(Some(args)) => args,
        Ok(None) => {
            println!("{USAGE}");
            return ExitCode::SUCCESS;
        }
        Err(err) => {
            eprintln!("error: {err}\n\n{USAGE}");
            return ExitCode::from(2);
        }
    };

    match run(&args) {
        Ok(RunSummary::Batch(report)) => {
            for warning in &report.warnings {
                println!("warning: {warning}");
            }
            for path in &report.rendered {
                println!("{}", path.display());
            }
            ExitCode::SUCCESS
        }
        Ok(RunSummary::Single(path)) => {
            println!("{}", path.display());
            ExitCode::SUCCESS
        }
        Err(err) => {
            log::error!("{err:#}");
            ExitCode::FAILURE
        }
    }
}
