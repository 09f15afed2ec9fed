// ============================================================================
// vconv-cli/src/logging.rs
// ============================================================================
//
// LOGGING: Console Logger Setup
//
// The CLI logs through the `log` facade with `env_logger` as the backend.
// Per-run diagnostic logs are written by vconv-core itself; their lines are
// shown on the console only with --verbose, since the CLI already presents
// them as notices.
//
// USAGE:
// - default: warnings and errors
// - --verbose: debug output from every crate
// - RUST_LOG: overrides both

use console::style;
use log::LevelFilter;
use std::io::Write;

/// Module whose records mirror the diagnostic log.
const RUN_LOG_MODULE: &str = "vconv_core::file_logging";

/// Initialize the console logger.
pub fn init(verbose: bool) {
    let mut builder = env_logger::Builder::new();
    builder.format(|buf, record| {
        let level = match record.level() {
            log::Level::Error => style("ERROR").red().bold(),
            log::Level::Warn => style("WARN ").yellow(),
            log::Level::Info => style("INFO ").green(),
            log::Level::Debug => style("DEBUG").blue(),
            log::Level::Trace => style("TRACE").magenta(),
        };
        writeln!(buf, "{} {}", level, record.args())
    });

    if verbose {
        builder.filter_level(LevelFilter::Debug);
    } else {
        builder
            .filter_level(LevelFilter::Warn)
            .filter_module(RUN_LOG_MODULE, LevelFilter::Off);
    }

    // RUST_LOG wins over the defaults above
    builder.parse_default_env();

    if builder.try_init().is_err() {
        eprintln!("Logger already initialized");
    }
    log::debug!("Logger initialized (verbose: {})", verbose);
}
