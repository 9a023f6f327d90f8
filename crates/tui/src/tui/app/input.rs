use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use todos_core::Answer;

use super::{App, InputMode};

#[derive(Debug, Clone, Copy)]
pub(crate) enum NormalAction {
    Quit,
    EnterAdd,
    EnterEdit,
    Toggle,
    Remove,
    SelectNext,
    SelectPrev,
    SelectFirst,
    SelectLast,
}

impl NormalAction {
    fn from_event(key: &KeyEvent) -> Option<Self> {
        if matches!(key.code, KeyCode::Char('c')) && key.modifiers.contains(KeyModifiers::CONTROL) {
            return Some(Self::Quit);
        }

        match key.code {
            KeyCode::Char('q') => Some(Self::Quit),
            KeyCode::Char('a') => Some(Self::EnterAdd),
            KeyCode::Char('e') => Some(Self::EnterEdit),
            KeyCode::Char(' ') | KeyCode::Char('d') => Some(Self::Toggle),
            KeyCode::Char('x') | KeyCode::Delete => Some(Self::Remove),
            KeyCode::Char('j') | KeyCode::Down => Some(Self::SelectNext),
            KeyCode::Char('k') | KeyCode::Up => Some(Self::SelectPrev),
            KeyCode::Home => Some(Self::SelectFirst),
            KeyCode::End => Some(Self::SelectLast),
            _ => None,
        }
    }
}

impl App {
    pub(crate) fn on_key(&mut self, key: KeyEvent) {
        match self.input_mode {
            InputMode::Normal => self.handle_normal_mode(key),
            InputMode::Add => self.handle_add_mode(key),
            InputMode::Edit => self.handle_edit_mode(key),
            InputMode::Alert => self.handle_alert_mode(key),
            InputMode::ConfirmRemove => self.handle_confirm_remove_mode(key),
        }
    }

    fn handle_normal_mode(&mut self, key: KeyEvent) {
        let Some(action) = NormalAction::from_event(&key) else {
            return;
        };
        match action {
            NormalAction::Quit => self.should_quit = true,
            NormalAction::EnterAdd => self.start_add(),
            NormalAction::EnterEdit => self.start_edit_selected(),
            NormalAction::Toggle => self.toggle_selected(),
            NormalAction::Remove => self.prompt_remove(),
            NormalAction::SelectNext => self.select(self.selected + 1),
            NormalAction::SelectPrev => self.select(self.selected.saturating_sub(1)),
            NormalAction::SelectFirst => self.select(0),
            NormalAction::SelectLast => self.select(self.rows.len().saturating_sub(1)),
        }
    }

    fn handle_add_mode(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Enter => self.submit_add(),
            KeyCode::Esc => {
                self.input.clear();
                self.input_mode = InputMode::Normal;
            }
            KeyCode::Backspace => self.input.backspace(),
            KeyCode::Delete => self.input.delete_char(),
            KeyCode::Left => self.input.move_left(),
            KeyCode::Right => self.input.move_right(),
            KeyCode::Home => self.input.move_home(),
            KeyCode::End => self.input.move_end(),
            KeyCode::Char(c) => self.input.insert_char(c),
            _ => {}
        }
    }

    fn handle_edit_mode(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Enter => self.submit_edit(),
            KeyCode::Esc => self.cancel_edit(),
            code => {
                let Some(staged) = self.editing_row_mut() else {
                    self.input_mode = InputMode::Normal;
                    return;
                };
                match code {
                    KeyCode::Backspace => staged.backspace(),
                    KeyCode::Delete => staged.delete_char(),
                    KeyCode::Left => staged.move_left(),
                    KeyCode::Right => staged.move_right(),
                    KeyCode::Home => staged.move_home(),
                    KeyCode::End => staged.move_end(),
                    KeyCode::Char(c) => staged.insert_char(c),
                    _ => {}
                }
            }
        }
    }

    fn handle_alert_mode(&mut self, key: KeyEvent) {
        if matches!(key.code, KeyCode::Enter | KeyCode::Esc) {
            self.dismiss_alert();
        }
    }

    fn handle_confirm_remove_mode(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc | KeyCode::Char('n') => self.resolve_removal(Answer::No),
            KeyCode::Char('y') => self.resolve_removal(Answer::Yes),
            KeyCode::Left | KeyCode::Right | KeyCode::Tab | KeyCode::Char(' ') => {
                if let Some(pending) = self.pending_removal.as_mut() {
                    pending.choice = pending.choice.toggle();
                }
            }
            KeyCode::Enter => {
                let choice = self
                    .pending_removal
                    .as_ref()
                    .map(|pending| pending.choice)
                    .unwrap_or(Answer::No);
                self.resolve_removal(choice);
            }
            _ => {}
        }
    }
}
