//! imsakia CLI: convert a Ramadan schedule workbook to JSON.
//!
//! Reads the first sheet of the schedule spreadsheet and writes one JSON
//! object per calendar day.

mod commands;

use std::io::IsTerminal;

use clap::Parser;
use color_eyre::config::{HookBuilder, Theme};
use color_eyre::eyre::Result;

use commands::Cli;

fn main() -> Result<()> {
    report_hooks(std::io::stderr().is_terminal()).install()?;
    let cli = Cli::parse();
    commands::init_tracing(&cli);
    commands::run(cli)
}

/// Error report hooks; colour only when stderr is a terminal.
fn report_hooks(colored: bool) -> HookBuilder {
    if colored {
        HookBuilder::default()
    } else {
        HookBuilder::default().theme(Theme::new())
    }
}
