// vidsweep-cli/src/main.rs
//
// Entry point for the vidsweep binary: parse flags, set up logging, run one
// sweep, and map the result to an exit code.
//
// Exit codes:
// - 0: run completed and no file failed
// - 1: fatal error (invalid configuration, missing input directory, ...)
// - 2: run completed but at least one copy or transcode failed

use clap::Parser;
use std::process;
use vidsweep_cli::error::suggestion_for;
use vidsweep_cli::{Cli, logging, run, terminal};

const EXIT_FATAL: i32 = 1;

fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    match run(&cli) {
        Ok(code) => process::exit(code),
        Err(e) => {
            log::debug!("Fatal error: {e:?}");
            terminal::print_error("Run aborted", &e.to_string(), suggestion_for(&e));
            process::exit(EXIT_FATAL);
        }
    }
}
