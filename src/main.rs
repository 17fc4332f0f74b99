mod cli;
mod execute;

use std::process::ExitCode;
use clap::Parser;
use ring_dt::{init_logging, Spinner};
use crate::cli::CLI;
use anyhow::Result;

fn main() -> Result<ExitCode> {
    let cli = CLI::parse();
    let spinner = Spinner::new();
    init_logging(cli.verbose, &spinner);
    execute::execute(cli, &spinner)
}
