//! rosterd binary entry point
//!
//! Argument parsing, command dispatch, and error reporting all live in
//! the cli module; main only maps a failed command to a nonzero exit.

use rosterd::cli;

fn main() {
    if let Err(e) = cli::run() {
        eprintln!("{}", e);
        std::process::exit(1);
    }
}
