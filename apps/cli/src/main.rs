//! handbookgen CLI — assemble a tree of Markdown docs into a navigable
//! handbook with a generated summary/table-of-contents page.

mod commands;

use clap::Parser;
use color_eyre::eyre::Result;

use commands::Cli;

fn main() -> Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();
    commands::init_tracing(&cli);
    commands::run(cli)
}
