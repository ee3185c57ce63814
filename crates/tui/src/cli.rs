use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser, Debug, Clone)]
#[command(
    name = "tido",
    version,
    about = "A local-first to-do list for the terminal.",
    after_help = "Examples:\n  tido                      Launch the TUI (same as `tido tui`)\n  tido --data-dir ~/tido    Keep the list in a custom directory"
)]
pub struct Cli {
    /// Override the data directory (defaults to platform-specific app dir)
    #[arg(long, value_name = "PATH", global = true)]
    pub data_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<CliCommand>,
}

#[derive(Subcommand, Debug, Clone)]
pub enum CliCommand {
    /// Launch the keyboard-first terminal UI (default command)
    Tui,
}
