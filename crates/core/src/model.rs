use std::fmt;
use std::ops::Deref;
use std::str::FromStr;
use std::sync::Arc;

use anyhow::anyhow;
use chrono::{DateTime, TimeZone, Utc};
use serde::{Serialize, Serializer};

/// Identity of a task: the creation timestamp in milliseconds since the Unix epoch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct TaskId(i64);

impl TaskId {
    pub fn from_millis(millis: i64) -> Self {
        Self(millis)
    }

    pub fn as_millis(&self) -> i64 {
        self.0
    }

    /// Creation time recovered from the id, if it is a representable timestamp.
    pub fn created_at(&self) -> Option<DateTime<Utc>> {
        Utc.timestamp_millis_opt(self.0).single()
    }
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for TaskId {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse::<i64>()
            .map(TaskId)
            .map_err(|_| anyhow!("Invalid task id '{}': expected an integer", s))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Task {
    pub id: TaskId,
    pub title: String,
    pub done: bool,
}

impl Task {
    pub fn new(id: TaskId, title: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            done: false,
        }
    }

    pub(crate) fn with_done(&self, done: bool) -> Self {
        Self {
            done,
            ..self.clone()
        }
    }

    pub(crate) fn with_title(&self, title: &str) -> Self {
        Self {
            title: title.to_string(),
            ..self.clone()
        }
    }
}

/// Immutable, cheaply cloneable view of the task list.
///
/// Every mutation of [`crate::TaskStore`] swaps in a fresh collection, so two
/// handles taken across a mutation never share storage. Use [`TaskCollection::same_as`]
/// to detect whether anything changed between renders.
#[derive(Debug, Clone, Default)]
pub struct TaskCollection {
    tasks: Arc<Vec<Task>>,
}

impl TaskCollection {
    pub(crate) fn from_vec(tasks: Vec<Task>) -> Self {
        Self {
            tasks: Arc::new(tasks),
        }
    }

    pub fn same_as(&self, other: &TaskCollection) -> bool {
        Arc::ptr_eq(&self.tasks, &other.tasks)
    }

    pub fn find(&self, id: TaskId) -> Option<&Task> {
        self.tasks.iter().find(|task| task.id == id)
    }

    pub fn contains_title(&self, title: &str) -> bool {
        self.tasks.iter().any(|task| task.title == title)
    }

    pub fn done_count(&self) -> usize {
        self.tasks.iter().filter(|task| task.done).count()
    }
}

impl Deref for TaskCollection {
    type Target = [Task];

    fn deref(&self) -> &Self::Target {
        self.tasks.as_slice()
    }
}

impl PartialEq for TaskCollection {
    fn eq(&self, other: &Self) -> bool {
        self.tasks.as_slice() == other.tasks.as_slice()
    }
}

impl Eq for TaskCollection {}

impl Serialize for TaskCollection {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.tasks.as_slice().serialize(serializer)
    }
}
