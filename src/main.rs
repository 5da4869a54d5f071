use std::process::ExitCode;

use clap::Parser;
use pdf_annotator::{app, cli::Args};

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    // Any start-up failure ends here: no window, no input.
    match Args::parse().into_config().and_then(app::run) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{e}");
            ExitCode::FAILURE
        }
    }
}
