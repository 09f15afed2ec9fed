// vconv-cli/src/main.rs
//
// Entry point for the vconv command-line tool.
//
// Responsibilities:
// - Parsing arguments (`Cli`, `Commands`).
// - Setting up console logging.
// - Dispatching to the command implementations.
// - Exiting with the code the command returned: 0 when every file was
//   converted, 1 when the run did not start or was aborted, 2 when some
//   files failed.

use clap::Parser;
use std::process;
use vconv_cli::{Cli, Commands, logging, run_codecs, run_convert};

fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let code = match &cli.command {
        Commands::Convert(args) => run_convert(args),
        Commands::Codecs => run_codecs(),
    };

    process::exit(code);
}
