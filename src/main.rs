use anyhow::Result;
use clap::Parser;

use todos::logging::{init_tracing, LogSink};

fn main() -> Result<()> {
    let cli = todos::cli::Cli::parse();
    let config = todos::config::from_cli(&cli)?;
    let log_filter = cli.log_filter.as_deref();

    match cli.command.clone() {
        Some(todos::cli::CliCommand::Tui) | None => {
            init_tracing(log_filter, LogSink::File(config.log_path()))?;
            todos::tui::run(config)?;
        }
        Some(command) => {
            init_tracing(log_filter, LogSink::Stderr)?;
            let stdout = std::io::stdout();
            let mut handle = stdout.lock();
            todos::commands::execute(&config, command, &mut handle)?;
        }
    }

    Ok(())
}
