use std::fmt;
use std::fs;
use std::io::{Read, Write};

use anyhow::{anyhow, Context, Result};
use serde_json::json;
use todos_core::{Answer, Removal, StoreError, TaskCollection, TaskStore};

use crate::cli::{CliCommand, OutputFormat, ReplayArgs};
use crate::config::AppConfig;
use crate::script::{parse_script, ScriptCommand};

pub fn execute<W: Write>(config: &AppConfig, command: CliCommand, mut writer: W) -> Result<()> {
    match command {
        CliCommand::Replay(args) => handle_replay(config, &args, &mut writer),
        CliCommand::Tui => Err(anyhow!("launch interactive surfaces directly")),
    }
}

fn handle_replay<W: Write>(config: &AppConfig, args: &ReplayArgs, writer: W) -> Result<()> {
    let source = match &args.script {
        Some(path) => fs::read_to_string(path)
            .with_context(|| format!("Failed to read script at {}", path.display()))?,
        None => {
            let mut buffer = String::new();
            std::io::stdin()
                .read_to_string(&mut buffer)
                .context("Failed to read script from stdin")?;
            buffer
        }
    };
    tracing::info!(data_dir = %config.data_dir().display(), "replaying script");

    let mut store = TaskStore::new();
    replay(&mut store, &source, Answer::from(args.yes), args.format, writer)
}

/// Run `source` against `store`, writing one report line per script line and the final list.
pub fn replay<W: Write>(
    store: &mut TaskStore,
    source: &str,
    default_answer: Answer,
    format: OutputFormat,
    mut writer: W,
) -> Result<()> {
    let mut reports = Vec::new();
    for (line, parsed) in parse_script(source) {
        let outcome = match parsed {
            Ok(command) => apply(store, command, default_answer),
            Err(err) => Outcome::Invalid(err.to_string()),
        };
        if let Outcome::Listed(tasks) = &outcome {
            if format == OutputFormat::Text {
                writeln!(writer, "line {}: list", line)?;
                write_tasks(&mut writer, tasks)?;
                continue;
            }
        }
        reports.push(Report { line, outcome });
        if format == OutputFormat::Text {
            if let Some(report) = reports.last() {
                writeln!(writer, "{}", report)?;
            }
        }
    }

    let tasks = store.snapshot();
    match format {
        OutputFormat::Text => {
            writeln!(writer, "{}", ListHeading::for_tasks(&tasks))?;
            write_tasks(&mut writer, &tasks)?;
        }
        OutputFormat::Json => {
            let report: Vec<String> = reports.iter().map(|report| report.to_string()).collect();
            let document = json!({ "report": report, "tasks": tasks });
            writeln!(writer, "{}", serde_json::to_string_pretty(&document)?)?;
        }
    }
    Ok(())
}

fn apply(store: &mut TaskStore, command: ScriptCommand, default_answer: Answer) -> Outcome {
    match command {
        ScriptCommand::Add(title) => match store.add(title.as_str()) {
            Ok(_) => Outcome::Added {
                position: store.len(),
                title,
            },
            Err(err) => Outcome::Rejected(err),
        },
        ScriptCommand::Toggle(position) => {
            let Some(id) = store.id_at(position) else {
                return Outcome::Missing(position);
            };
            match store.toggle(id) {
                Ok(done) => Outcome::Toggled { position, done },
                Err(err) => Outcome::Rejected(err),
            }
        }
        ScriptCommand::Edit(position, title) => {
            let Some(id) = store.id_at(position) else {
                return Outcome::Missing(position);
            };
            match store.edit(id, &title) {
                Ok(()) => Outcome::Renamed { position, title },
                Err(err) => Outcome::Rejected(err),
            }
        }
        ScriptCommand::Remove(position, answer) => {
            let Some(id) = store.id_at(position) else {
                return Outcome::Missing(position);
            };
            let mut answer = answer.unwrap_or(default_answer);
            match store.remove(id, &mut answer) {
                Ok(Removal::Removed(task)) => Outcome::Removed {
                    position,
                    title: task.title,
                },
                Ok(Removal::Declined) => Outcome::Kept(position),
                Err(err) => Outcome::Rejected(err),
            }
        }
        ScriptCommand::List => Outcome::Listed(store.snapshot()),
    }
}

fn write_tasks<W: Write>(mut writer: W, tasks: &TaskCollection) -> Result<()> {
    for (index, task) in tasks.iter().enumerate() {
        let marker = if task.done { "x" } else { " " };
        writeln!(writer, "  {}. [{}] {}", index + 1, marker, task.title)?;
    }
    Ok(())
}

struct Report {
    line: usize,
    outcome: Outcome,
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}: {}", self.line, self.outcome)
    }
}

enum Outcome {
    Added { position: usize, title: String },
    Toggled { position: usize, done: bool },
    Renamed { position: usize, title: String },
    Removed { position: usize, title: String },
    Kept(usize),
    Listed(TaskCollection),
    Missing(usize),
    Rejected(StoreError),
    Invalid(String),
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Added { position, title } => write!(f, "added #{} \"{}\"", position, title),
            Outcome::Toggled { position, done } => write!(
                f,
                "toggled #{} ({})",
                position,
                if *done { "done" } else { "open" }
            ),
            Outcome::Renamed { position, title } => {
                write!(f, "renamed #{} to \"{}\"", position, title)
            }
            Outcome::Removed { position, title } => {
                write!(f, "removed #{} \"{}\"", position, title)
            }
            Outcome::Kept(position) => write!(f, "kept #{} (removal declined)", position),
            Outcome::Listed(tasks) => write!(f, "list ({} tasks)", tasks.len()),
            Outcome::Missing(position) => write!(f, "no task at position {}", position),
            Outcome::Rejected(err) => write!(f, "skipped: {}", err),
            Outcome::Invalid(err) => write!(f, "error: {}", err),
        }
    }
}

struct ListHeading {
    total: usize,
    done: usize,
}

impl ListHeading {
    fn for_tasks(tasks: &TaskCollection) -> Self {
        Self {
            total: tasks.len(),
            done: tasks.done_count(),
        }
    }
}

impl fmt::Display for ListHeading {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.total == 0 {
            return write!(f, "No tasks");
        }
        write!(
            f,
            "{} task{}, {} done",
            self.total,
            if self.total == 1 { "" } else { "s" },
            self.done
        )
    }
}
