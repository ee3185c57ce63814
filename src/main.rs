use anyhow::Result;
use clap::Parser;

fn main() -> Result<()> {
    let cli = tido::cli::Cli::parse();

    match cli.command.clone() {
        Some(tido::cli::CliCommand::Tui) | None => {
            let config = tido::config::from_cli(&cli)?;
            tido::tui::run(config)?;
        }
    }

    Ok(())
}
