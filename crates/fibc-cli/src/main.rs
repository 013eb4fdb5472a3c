//! FIBC unit-weight calculator
//!
//! Computes the empty weight of a woven bulk bag from its specification.

mod cli;
mod commands;
mod logger;
mod output;

use clap::Parser;
use cli::Cli;

fn main() {
    let cli = Cli::parse();
    logger::init_cli_logger(cli.verbose);

    if let Err(e) = commands::execute(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
