//! Line-oriented scripts for `todos replay`.
//!
//! Tasks are addressed by their 1-based position in the list at the time the
//! line runs, since ids are creation timestamps nobody can predict.

use std::str::FromStr;

use anyhow::{anyhow, bail, Result};
use todos_core::Answer;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScriptCommand {
    Add(String),
    Toggle(usize),
    Edit(usize, String),
    Remove(usize, Option<Answer>),
    List,
}

impl FromStr for ScriptCommand {
    type Err = anyhow::Error;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim();
        let (verb, rest) = match line.split_once(char::is_whitespace) {
            Some((verb, rest)) => (verb, rest.trim()),
            None => (line, ""),
        };

        match verb.to_ascii_lowercase().as_str() {
            "add" => {
                if rest.is_empty() {
                    bail!("add needs a title");
                }
                Ok(ScriptCommand::Add(rest.to_string()))
            }
            "toggle" => Ok(ScriptCommand::Toggle(parse_position(rest)?)),
            "edit" => {
                let (position, title) = rest
                    .split_once(char::is_whitespace)
                    .ok_or_else(|| anyhow!("edit needs a position and a new title"))?;
                Ok(ScriptCommand::Edit(
                    parse_position(position)?,
                    title.trim().to_string(),
                ))
            }
            "remove" => {
                let mut parts = rest.split_whitespace();
                let position = parse_position(parts.next().unwrap_or(""))?;
                let answer = parts.next().map(parse_answer).transpose()?;
                if parts.next().is_some() {
                    bail!("remove takes a position and an optional yes|no");
                }
                Ok(ScriptCommand::Remove(position, answer))
            }
            "list" if rest.is_empty() => Ok(ScriptCommand::List),
            "list" => bail!("list takes no arguments"),
            other => Err(anyhow!(
                "Unknown command '{}': expected add|toggle|edit|remove|list",
                other
            )),
        }
    }
}

/// Parse every meaningful line, keeping 1-based line numbers for reporting.
pub fn parse_script(source: &str) -> Vec<(usize, Result<ScriptCommand>)> {
    source
        .lines()
        .enumerate()
        .filter(|(_, line)| {
            let trimmed = line.trim();
            !trimmed.is_empty() && !trimmed.starts_with('#')
        })
        .map(|(index, line)| (index + 1, line.parse()))
        .collect()
}

fn parse_position(token: &str) -> Result<usize> {
    let position: usize = token
        .trim()
        .parse()
        .map_err(|_| anyhow!("Invalid position '{}': expected a number from 1", token))?;
    if position == 0 {
        bail!("Positions start at 1");
    }
    Ok(position)
}

fn parse_answer(token: &str) -> Result<Answer> {
    match token.to_ascii_lowercase().as_str() {
        "yes" | "y" => Ok(Answer::Yes),
        "no" | "n" => Ok(Answer::No),
        other => Err(anyhow!("Unknown answer '{}': expected yes|no", other)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[rstest]
    #[case("add Buy milk", ScriptCommand::Add("Buy milk".into()))]
    #[case("  ADD   Buy  milk ", ScriptCommand::Add("Buy  milk".into()))]
    #[case("toggle 2", ScriptCommand::Toggle(2))]
    #[case("edit 1 Buy oat milk", ScriptCommand::Edit(1, "Buy oat milk".into()))]
    #[case("remove 3", ScriptCommand::Remove(3, None))]
    #[case("remove 3 yes", ScriptCommand::Remove(3, Some(Answer::Yes)))]
    #[case("remove 1 n", ScriptCommand::Remove(1, Some(Answer::No)))]
    #[case("list", ScriptCommand::List)]
    fn parses_commands(#[case] line: &str, #[case] expected: ScriptCommand) {
        assert_eq!(line.parse::<ScriptCommand>().unwrap(), expected);
    }

    #[rstest]
    #[case("add")]
    #[case("toggle")]
    #[case("toggle 0")]
    #[case("toggle first")]
    #[case("edit 1")]
    #[case("remove 1 maybe")]
    #[case("remove 1 yes please")]
    #[case("list all")]
    #[case("archive 1")]
    fn rejects_malformed_lines(#[case] line: &str) {
        assert!(line.parse::<ScriptCommand>().is_err());
    }

    #[test]
    fn parse_script_skips_comments_and_blanks() {
        let parsed = parse_script("# plan\nadd A\n\n  # note\ntoggle 1\n");
        let lines: Vec<usize> = parsed.iter().map(|(line, _)| *line).collect();
        assert_eq!(lines, vec![2, 5]);
        assert!(parsed.iter().all(|(_, command)| command.is_ok()));
    }
}
