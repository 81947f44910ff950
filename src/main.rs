use std::process::ExitCode;

use clap::Parser;

mod app;
mod cli;
mod config;
mod core;
mod utils;

fn main() -> ExitCode {
    let cli = match cli::Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            // help/version go to stdout and are not failures
            let _ = e.print();
            return if e.use_stderr() {
                ExitCode::FAILURE
            } else {
                ExitCode::SUCCESS
            };
        }
    };

    app::common::init_color(cli.no_color);

    let config = match config::Config::init(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            app::common::init_logging(cli.verbose, &config::Config::default());
            tracing::error!("{e}");
            return ExitCode::FAILURE;
        }
    };
    app::common::init_logging(cli.verbose, &config);

    if let Err(e) = app::rename::run(&cli, &config) {
        tracing::error!("{e}");
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}
