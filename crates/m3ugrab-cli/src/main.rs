use m3ugrab_core::logging;

mod cli;

use crate::cli::Cli;
use clap::Parser;

fn main() {
    // Log to the state-dir file when possible; stderr otherwise. Never stdout,
    // which may carry the playlist itself.
    if logging::init_logging().is_err() {
        logging::init_logging_stderr();
    }

    let cli = Cli::parse();
    if let Err(err) = cli.run() {
        eprintln!("m3ugrab error: {:#}", err);
        std::process::exit(1);
    }
}
