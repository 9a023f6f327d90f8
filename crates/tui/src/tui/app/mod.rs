use std::time::Instant;

use ratatui::style::{Color, Style};
use ratatui::widgets::ListState;
use todos_core::{
    Answer, DuplicateTitleAlert, RemovalPrompt, Removal, RowError, StoreError, TaskId,
    TaskRowController, TaskStore, TextBuffer,
};

use super::constants::*;
use crate::config::AppConfig;

mod input;
mod render;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum InputMode {
    Normal,
    Add,
    Edit,
    Alert,
    ConfirmRemove,
}

#[derive(Debug, Clone)]
struct StatusMessage {
    text: String,
    kind: StatusKind,
    created_at: Instant,
}

impl StatusMessage {
    fn new<T: Into<String>>(text: T, kind: StatusKind) -> Self {
        Self {
            text: text.into(),
            kind,
            created_at: Instant::now(),
        }
    }

    fn style(&self) -> Style {
        match self.kind {
            StatusKind::Info => Style::default().fg(Color::Cyan),
            StatusKind::Error => Style::default().fg(Color::Red),
        }
    }
}

#[derive(Debug, Clone, Copy)]
enum StatusKind {
    Info,
    Error,
}

/// Removal waiting on the confirmation modal.
#[derive(Debug, Clone)]
struct PendingRemoval {
    task_id: TaskId,
    prompt: RemovalPrompt,
    choice: Answer,
}

pub(crate) struct App {
    config: AppConfig,
    store: TaskStore,
    rows: Vec<TaskRowController>,
    synced_revision: Option<u64>,
    selected: usize,
    list_state: ListState,
    input_mode: InputMode,
    input: TextBuffer,
    alert: Option<DuplicateTitleAlert>,
    pending_removal: Option<PendingRemoval>,
    status: Option<StatusMessage>,
    should_quit: bool,
}

impl App {
    pub(crate) fn new(config: AppConfig) -> Self {
        Self::with_store(config, TaskStore::new())
    }

    pub(crate) fn with_store(config: AppConfig, store: TaskStore) -> Self {
        let mut app = Self {
            config,
            store,
            rows: Vec::new(),
            synced_revision: None,
            selected: 0,
            list_state: ListState::default(),
            input_mode: InputMode::Normal,
            input: TextBuffer::new(),
            alert: None,
            pending_removal: None,
            status: None,
            should_quit: false,
        };
        app.sync_rows();
        app
    }

    pub(crate) fn should_quit(&self) -> bool {
        self.should_quit
    }

    pub(crate) fn task_count(&self) -> usize {
        self.store.len()
    }

    pub(crate) fn on_tick(&mut self) {
        if let Some(status) = &self.status {
            if status.created_at.elapsed() >= STATUS_TTL {
                self.status = None;
            }
        }
    }

    pub(crate) fn set_status_info<T: Into<String>>(&mut self, text: T) {
        self.status = Some(StatusMessage::new(text, StatusKind::Info));
    }

    pub(crate) fn set_status_error<T: Into<String>>(&mut self, text: T) {
        self.status = Some(StatusMessage::new(text, StatusKind::Error));
    }

    /// Rebuild row controllers when the store has moved on, keeping per-row edit state by id.
    fn sync_rows(&mut self) {
        if self.synced_revision == Some(self.store.revision()) {
            return;
        }

        let mut previous = std::mem::take(&mut self.rows);
        self.rows = self
            .store
            .tasks()
            .iter()
            .map(|task| {
                match previous.iter().position(|row| row.task_id() == task.id) {
                    Some(index) => {
                        let mut row = previous.swap_remove(index);
                        row.observe(task);
                        row
                    }
                    None => TaskRowController::new(task),
                }
            })
            .collect();
        self.synced_revision = Some(self.store.revision());

        if self.rows.is_empty() {
            self.selected = 0;
            self.list_state.select(None);
        } else {
            if self.selected >= self.rows.len() {
                self.selected = self.rows.len() - 1;
            }
            self.list_state.select(Some(self.selected));
        }
    }

    fn selected_row(&self) -> Option<&TaskRowController> {
        self.rows.get(self.selected)
    }

    fn select(&mut self, index: usize) {
        if self.rows.is_empty() {
            return;
        }
        self.selected = index.min(self.rows.len() - 1);
        self.list_state.select(Some(self.selected));
    }

    fn start_add(&mut self) {
        self.input.clear();
        self.input_mode = InputMode::Add;
    }

    fn submit_add(&mut self) {
        // Blank submissions are dropped by the input bar; the store itself accepts any title.
        if self.input.as_str().trim().is_empty() {
            self.input_mode = InputMode::Normal;
            return;
        }

        match self.store.add(self.input.as_str()) {
            Ok(_) => {
                self.input.clear();
                self.input_mode = InputMode::Normal;
                self.sync_rows();
                self.select(self.rows.len().saturating_sub(1));
                self.set_status_info(STATUS_ADDED);
            }
            Err(StoreError::DuplicateTitle(title)) => {
                self.alert = Some(DuplicateTitleAlert::new(title));
                self.input_mode = InputMode::Alert;
            }
            Err(err) => self.set_status_error(err.to_string()),
        }
    }

    fn dismiss_alert(&mut self) {
        self.alert = None;
        self.input_mode = InputMode::Add;
    }

    fn toggle_selected(&mut self) {
        let Some(row) = self.rows.get(self.selected) else {
            self.set_status_info(STATUS_NOTHING_SELECTED);
            return;
        };
        if let Err(err) = row.toggle(&mut self.store) {
            tracing::debug!(error = %err, "ignored toggle for missing task");
        }
        self.sync_rows();
    }

    fn start_edit_selected(&mut self) {
        let Some(row) = self.rows.get_mut(self.selected) else {
            self.set_status_info(STATUS_NOTHING_SELECTED);
            return;
        };
        row.start_edit();
        self.input_mode = InputMode::Edit;
    }

    fn cancel_edit(&mut self) {
        if let Some(row) = self.rows.get_mut(self.selected) {
            row.cancel();
        }
        self.input_mode = InputMode::Normal;
        self.set_status_info(STATUS_EDIT_CANCELLED);
    }

    fn submit_edit(&mut self) {
        if let Some(row) = self.rows.get_mut(self.selected) {
            match row.submit(&mut self.store) {
                Ok(()) => {
                    self.status = Some(StatusMessage::new(STATUS_RENAMED, StatusKind::Info))
                }
                Err(err) => tracing::debug!(error = %err, "ignored edit for missing task"),
            }
        }
        self.input_mode = InputMode::Normal;
        self.sync_rows();
    }

    fn editing_row_mut(&mut self) -> Option<&mut TextBuffer> {
        self.rows
            .get_mut(self.selected)
            .and_then(|row| row.staged_mut())
    }

    fn prompt_remove(&mut self) {
        let Some((task_id, can_remove)) = self
            .selected_row()
            .map(|row| (row.task_id(), row.can_remove()))
        else {
            self.set_status_info(STATUS_NOTHING_SELECTED);
            return;
        };
        if !can_remove {
            self.set_status_error(RowError::EditInProgress.to_string());
            return;
        }
        let Some(task) = self.store.get(task_id) else {
            return;
        };

        let prompt = RemovalPrompt::for_task(task);
        self.pending_removal = Some(PendingRemoval {
            task_id: task.id,
            choice: prompt.default_answer,
            prompt,
        });
        self.input_mode = InputMode::ConfirmRemove;
    }

    fn resolve_removal(&mut self, answer: Answer) {
        self.input_mode = InputMode::Normal;
        let Some(pending) = self.pending_removal.take() else {
            return;
        };
        let Some(row) = self.rows.iter().find(|row| row.task_id() == pending.task_id) else {
            return;
        };

        let mut answer = answer;
        match row.remove(&mut self.store, &mut answer) {
            Ok(Removal::Removed(task)) => {
                tracing::info!(task_id = %task.id, "removed task from terminal ui");
                self.set_status_info(STATUS_REMOVED);
            }
            Ok(Removal::Declined) => self.set_status_info(STATUS_REMOVAL_DECLINED),
            Err(RowError::Store(err)) => {
                tracing::debug!(error = %err, "ignored removal for missing task")
            }
            Err(err) => self.set_status_error(err.to_string()),
        }
        self.sync_rows();
    }
}
