//! Content and answer plumbing for the two blocking prompts the list raises.
//!
//! Front-ends own how a prompt is shown; the store only asks a [`ConfirmRemoval`]
//! and acts on the boolean it gets back.

use crate::model::Task;

/// Port through which [`crate::TaskStore::remove`] asks whether a removal may proceed.
pub trait ConfirmRemoval {
    fn confirm_removal(&mut self, task: &Task) -> bool;
}

impl<F> ConfirmRemoval for F
where
    F: FnMut(&Task) -> bool,
{
    fn confirm_removal(&mut self, task: &Task) -> bool {
        self(task)
    }
}

/// A pre-collected answer, e.g. from a modal the user already dismissed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Answer {
    Yes,
    No,
}

impl Answer {
    pub fn toggle(self) -> Self {
        match self {
            Answer::Yes => Answer::No,
            Answer::No => Answer::Yes,
        }
    }

    pub fn is_yes(self) -> bool {
        matches!(self, Answer::Yes)
    }

    pub fn label(self) -> &'static str {
        match self {
            Answer::Yes => RemovalPrompt::ACCEPT,
            Answer::No => RemovalPrompt::DECLINE,
        }
    }
}

impl From<bool> for Answer {
    fn from(value: bool) -> Self {
        if value {
            Answer::Yes
        } else {
            Answer::No
        }
    }
}

impl ConfirmRemoval for Answer {
    fn confirm_removal(&mut self, _task: &Task) -> bool {
        self.is_yes()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemovalPrompt {
    pub title: &'static str,
    pub message: &'static str,
    pub task_title: String,
    /// Choice highlighted when the prompt opens.
    pub default_answer: Answer,
}

impl RemovalPrompt {
    pub const ACCEPT: &'static str = "Yes";
    pub const DECLINE: &'static str = "No";

    pub fn for_task(task: &Task) -> Self {
        Self {
            title: "Remove item",
            message: "Are you sure you want to remove this item?",
            task_title: task.title.clone(),
            default_answer: Answer::No,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DuplicateTitleAlert {
    pub title: &'static str,
    pub message: &'static str,
    pub duplicate: String,
}

impl DuplicateTitleAlert {
    pub const DISMISS: &'static str = "OK";

    pub fn new(duplicate: impl Into<String>) -> Self {
        Self {
            title: "Task already registered",
            message: "You cannot register a task with the same name",
            duplicate: duplicate.into(),
        }
    }
}
