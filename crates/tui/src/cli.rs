use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

#[derive(Parser, Debug, Clone)]
#[command(
    name = "todos",
    version,
    about = "A tiny keyboard-driven to-do list that lives for one session.",
    after_help = "Examples:\n  todos             Launch the TUI (same as `todos tui`)\n  todos replay plan.txt --yes\n  todos replay --format json < plan.txt"
)]
pub struct Cli {
    /// Override the data directory used for the log file
    #[arg(long, value_name = "PATH", global = true)]
    pub data_dir: Option<PathBuf>,

    /// Override the tracing filter (e.g. "info", "debug", or full directives)
    #[arg(long = "log", value_name = "DIRECTIVE", global = true)]
    pub log_filter: Option<String>,

    #[command(subcommand)]
    pub command: Option<CliCommand>,
}

#[derive(Subcommand, Debug, Clone)]
pub enum CliCommand {
    /// Launch the keyboard-first terminal UI (default command)
    Tui,
    /// Run a script of list operations against a fresh list and print the result
    Replay(ReplayArgs),
}

#[derive(Args, Debug, Clone)]
pub struct ReplayArgs {
    /// Script file to run (reads stdin when omitted)
    #[arg(value_name = "SCRIPT")]
    pub script: Option<PathBuf>,

    /// Accept removal confirmations that the script does not answer itself
    #[arg(long, short = 'y')]
    pub yes: bool,

    /// How to print the final list
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_subcommand_means_tui() {
        let cli = Cli::try_parse_from(["todos"]).unwrap();
        assert!(cli.command.is_none());
        assert!(cli.log_filter.is_none());
    }

    #[test]
    fn replay_accepts_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "todos", "replay", "plan.txt", "--yes", "--format", "json", "--log", "debug",
        ])
        .unwrap();

        let Some(CliCommand::Replay(args)) = cli.command else {
            panic!("expected replay");
        };
        assert_eq!(args.script, Some(PathBuf::from("plan.txt")));
        assert!(args.yes);
        assert_eq!(args.format, OutputFormat::Json);
        assert_eq!(cli.log_filter.as_deref(), Some("debug"));
    }
}
