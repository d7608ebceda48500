// ============================================================================
// vidsweep-cli/src/logging.rs
// ============================================================================
//
// LOGGING SETUP: env_logger Initialization for the CLI
//
// All user-facing output goes through the `log` macros. Info records are the
// normal terminal output and are printed bare to stdout; every other level
// gets a colored level tag (and a timestamp in verbose mode).
//
// USAGE:
// - default: info and above
// - -v/--verbose: debug and above
// - RUST_LOG overrides both, e.g. RUST_LOG=vidsweep_core=trace

use log::LevelFilter;
use owo_colors::OwoColorize;
use std::io::Write;

/// Initializes the global logger. Safe to call more than once.
pub fn init(verbose: bool) {
    let level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    let use_color = std::env::var_os("NO_COLOR").is_none();

    let mut builder = env_logger::Builder::new();
    builder
        .filter_level(level)
        .target(env_logger::Target::Stdout)
        .format(move |buf, record| {
            if record.level() == log::Level::Info {
                return writeln!(buf, "{}", record.args());
            }

            let tag = match record.level() {
                log::Level::Error => "ERROR",
                log::Level::Warn => "WARN ",
                log::Level::Info => "INFO ",
                log::Level::Debug => "DEBUG",
                log::Level::Trace => "TRACE",
            };
            let tag = if !use_color {
                tag.to_string()
            } else {
                match record.level() {
                    log::Level::Error => tag.bright_red().to_string(),
                    log::Level::Warn => tag.yellow().to_string(),
                    log::Level::Info => tag.green().to_string(),
                    log::Level::Debug => tag.blue().to_string(),
                    log::Level::Trace => tag.magenta().to_string(),
                }
            };

            if verbose {
                writeln!(buf, "{} {} {}", get_timestamp(), tag, record.args())
            } else {
                writeln!(buf, "{} {}", tag, record.args())
            }
        })
        .parse_default_env();

    // Ignore the error if a logger was already installed (e.g. by a test).
    let _ = builder.try_init();
}

/// Returns the current local time formatted as "HH:MM:SS".
pub fn get_timestamp() -> String {
    chrono::Local::now().format("%H:%M:%S").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timestamp_shape() {
        let ts = get_timestamp();
        assert_eq!(ts.len(), 8);
        assert_eq!(ts.matches(':').count(), 2);
    }

    #[test]
    fn test_init_twice_does_not_panic() {
        init(false);
        init(true);
    }
}
