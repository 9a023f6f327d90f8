use thiserror::Error;

use crate::model::TaskId;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error("A task titled '{0}' already exists")]
    DuplicateTitle(String),
    #[error("No task with id {0}")]
    NotFound(TaskId),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RowError {
    #[error("Finish or cancel the edit before removing this task")]
    EditInProgress,
    #[error(transparent)]
    Store(#[from] StoreError),
}
