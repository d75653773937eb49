//! `tlay` binary entry point.

use clap::Parser;
use colored::Colorize;
use term_layout::cli_app::{Cli, run};

fn main() {
    let cli = Cli::parse();
    if let Err(err) = run(&cli) {
        eprintln!("{} {err}", "tlay:".red().bold());
        std::process::exit(1);
    }
}
