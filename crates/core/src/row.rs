//! Per-row inline editing: a row stages a new title locally and only reaches
//! the store when the edit is committed.

use crate::buffer::TextBuffer;
use crate::error::{RowError, StoreError};
use crate::model::{Task, TaskId};
use crate::prompt::ConfirmRemoval;
use crate::store::{Removal, TaskStore};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RowMode {
    #[default]
    Viewing,
    Editing,
}

/// Receiver of committed title edits.
pub trait TitleEditor {
    fn edit_title(&mut self, id: TaskId, title: &str) -> Result<(), StoreError>;
}

impl TitleEditor for TaskStore {
    fn edit_title(&mut self, id: TaskId, title: &str) -> Result<(), StoreError> {
        self.edit(id, title)
    }
}

#[derive(Debug, Clone)]
pub struct TaskRowController {
    task_id: TaskId,
    committed: String,
    staged: TextBuffer,
    mode: RowMode,
    focused: bool,
}

impl TaskRowController {
    pub fn new(task: &Task) -> Self {
        let mut staged = TextBuffer::new();
        staged.set(task.title.as_str());
        Self {
            task_id: task.id,
            committed: task.title.clone(),
            staged,
            mode: RowMode::Viewing,
            focused: false,
        }
    }

    pub fn task_id(&self) -> TaskId {
        self.task_id
    }

    pub fn mode(&self) -> RowMode {
        self.mode
    }

    pub fn is_editing(&self) -> bool {
        self.mode == RowMode::Editing
    }

    pub fn has_focus(&self) -> bool {
        self.focused
    }

    pub fn can_remove(&self) -> bool {
        !self.is_editing()
    }

    pub fn committed_title(&self) -> &str {
        &self.committed
    }

    pub fn staged_title(&self) -> &str {
        self.staged.as_str()
    }

    pub fn staged_cursor(&self) -> usize {
        self.staged.cursor_column()
    }

    /// Pick up the latest committed state of this row's task after a re-render.
    pub fn observe(&mut self, task: &Task) {
        if task.id != self.task_id {
            return;
        }
        self.committed.clone_from(&task.title);
        if self.mode == RowMode::Viewing && self.staged.as_str() != task.title {
            self.staged.set(task.title.as_str());
        }
    }

    pub fn start_edit(&mut self) {
        if self.is_editing() {
            return;
        }
        self.mode = RowMode::Editing;
        self.focused = true;
        tracing::debug!(task_id = %self.task_id, "row edit started");
    }

    pub fn cancel(&mut self) {
        if !self.is_editing() {
            return;
        }
        self.staged.set(self.committed.as_str());
        self.leave_editing();
        tracing::debug!(task_id = %self.task_id, "row edit cancelled");
    }

    /// Commit the staged title. The row returns to viewing even if the store rejects the edit.
    pub fn submit<E>(&mut self, editor: &mut E) -> Result<(), StoreError>
    where
        E: TitleEditor + ?Sized,
    {
        if !self.is_editing() {
            return Ok(());
        }
        let result = editor.edit_title(self.task_id, self.staged.as_str());
        if result.is_ok() {
            self.committed = self.staged.as_str().to_string();
        }
        self.leave_editing();
        result
    }

    /// Staged text while editing; `None` in view mode so keystrokes cannot leak in.
    pub fn staged_mut(&mut self) -> Option<&mut TextBuffer> {
        if self.is_editing() {
            Some(&mut self.staged)
        } else {
            None
        }
    }

    pub fn set_staged(&mut self, title: &str) {
        if let Some(staged) = self.staged_mut() {
            staged.set(title);
        }
    }

    pub fn toggle(&self, store: &mut TaskStore) -> Result<bool, StoreError> {
        store.toggle(self.task_id)
    }

    pub fn remove<C>(&self, store: &mut TaskStore, confirm: &mut C) -> Result<Removal, RowError>
    where
        C: ConfirmRemoval + ?Sized,
    {
        if !self.can_remove() {
            return Err(RowError::EditInProgress);
        }
        Ok(store.remove(self.task_id, confirm)?)
    }

    fn leave_editing(&mut self) {
        self.mode = RowMode::Viewing;
        self.focused = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prompt::Answer;
    use pretty_assertions::assert_eq;

    #[derive(Debug, Default)]
    struct RecordingEditor {
        calls: Vec<(TaskId, String)>,
    }

    impl TitleEditor for RecordingEditor {
        fn edit_title(&mut self, id: TaskId, title: &str) -> Result<(), StoreError> {
            self.calls.push((id, title.to_string()));
            Ok(())
        }
    }

    fn task() -> Task {
        Task::new(TaskId::from_millis(10), "Buy milk")
    }

    #[test]
    fn starts_viewing_with_committed_title() {
        let row = TaskRowController::new(&task());
        assert_eq!(row.mode(), RowMode::Viewing);
        assert_eq!(row.staged_title(), "Buy milk");
        assert!(!row.has_focus());
        assert!(row.can_remove());
    }

    #[test]
    fn editing_gains_focus_and_disables_remove() {
        let mut row = TaskRowController::new(&task());
        row.start_edit();

        assert!(row.is_editing());
        assert!(row.has_focus());
        assert!(!row.can_remove());
        assert_eq!(row.staged_title(), "Buy milk");
    }

    #[test]
    fn cancel_restores_committed_title_without_editing() {
        let mut row = TaskRowController::new(&task());
        let mut editor = RecordingEditor::default();
        row.start_edit();
        if let Some(staged) = row.staged_mut() {
            staged.backspace();
            staged.insert_char('k');
            staged.insert_char('s');
        }
        assert_eq!(row.staged_title(), "Buy milks");

        row.cancel();

        assert_eq!(row.mode(), RowMode::Viewing);
        assert_eq!(row.staged_title(), "Buy milk");
        assert!(!row.has_focus());
        assert!(editor.calls.is_empty());
        row.submit(&mut editor).unwrap();
        assert!(editor.calls.is_empty());
    }

    #[test]
    fn submit_sends_exactly_one_edit() {
        let mut row = TaskRowController::new(&task());
        let mut editor = RecordingEditor::default();
        row.start_edit();
        row.set_staged("New");

        row.submit(&mut editor).unwrap();

        assert_eq!(editor.calls, vec![(TaskId::from_millis(10), "New".to_string())]);
        assert_eq!(row.mode(), RowMode::Viewing);
        assert!(!row.has_focus());
        assert_eq!(row.committed_title(), "New");
    }

    #[test]
    fn typing_is_ignored_while_viewing() {
        let mut row = TaskRowController::new(&task());
        row.set_staged("Sneaky");
        assert!(row.staged_mut().is_none());
        assert_eq!(row.staged_title(), "Buy milk");
    }

    #[test]
    fn restarting_an_edit_keeps_staged_text() {
        let mut row = TaskRowController::new(&task());
        row.start_edit();
        row.set_staged("Buy bread");
        row.start_edit();
        assert_eq!(row.staged_title(), "Buy bread");
    }

    #[test]
    fn observe_resyncs_only_when_viewing() {
        let mut row = TaskRowController::new(&task());
        let renamed = Task::new(TaskId::from_millis(10), "Buy oat milk");
        row.observe(&renamed);
        assert_eq!(row.staged_title(), "Buy oat milk");

        row.start_edit();
        row.set_staged("Draft");
        row.observe(&Task::new(TaskId::from_millis(10), "Buy soy milk"));
        assert_eq!(row.staged_title(), "Draft");
        row.cancel();
        assert_eq!(row.staged_title(), "Buy soy milk");
    }

    #[test]
    fn commits_through_the_store() {
        let mut store = TaskStore::new();
        let id = store.add("Buy milk").unwrap();
        let mut row = TaskRowController::new(store.get(id).unwrap());

        row.start_edit();
        row.set_staged("Buy oat milk");
        row.submit(&mut store).unwrap();

        assert_eq!(store.get(id).unwrap().title, "Buy oat milk");
    }

    #[test]
    fn submit_for_a_vanished_task_reports_not_found() {
        let mut store = TaskStore::new();
        let id = store.add("Buy milk").unwrap();
        let mut row = TaskRowController::new(store.get(id).unwrap());
        store.remove(id, &mut Answer::Yes).unwrap();

        row.start_edit();
        assert_eq!(row.submit(&mut store), Err(StoreError::NotFound(id)));
        assert_eq!(row.mode(), RowMode::Viewing);
        assert_eq!(row.committed_title(), "Buy milk");
    }

    #[test]
    fn remove_is_refused_mid_edit() {
        let mut store = TaskStore::new();
        let id = store.add("Buy milk").unwrap();
        let mut row = TaskRowController::new(store.get(id).unwrap());
        row.start_edit();

        assert_eq!(
            row.remove(&mut store, &mut Answer::Yes),
            Err(RowError::EditInProgress)
        );
        assert_eq!(store.len(), 1);

        row.cancel();
        assert!(row.remove(&mut store, &mut Answer::Yes).unwrap().is_removed());
        assert!(store.is_empty());
    }

    #[test]
    fn toggle_delegates_to_the_store() {
        let mut store = TaskStore::new();
        let id = store.add("Buy milk").unwrap();
        let row = TaskRowController::new(store.get(id).unwrap());

        assert_eq!(row.toggle(&mut store), Ok(true));
        assert!(store.get(id).unwrap().done);
    }
}
