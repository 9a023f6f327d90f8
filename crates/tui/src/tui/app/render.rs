use std::cmp::min;

use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, List, ListItem, Paragraph, Wrap};
use ratatui::Frame;
use todos_core::{Answer, DuplicateTitleAlert, Task, TaskRowController};

use crate::tui::constants::{
    APP_VERSION, HINT_ADD, HINT_ALERT, HINT_CONFIRM, HINT_EDIT, HINT_NORMAL, INPUT_PLACEHOLDER,
};
use crate::tui::helpers::{
    accent_title, centered_rect, format_created, inset_rect, task_count_label, BG_BASE, BG_PANEL,
    FG_ACCENT, FG_DONE, FG_MUTED, FG_TEXT,
};

use super::{App, InputMode};

const ROW_HIGHLIGHT: &str = "▶ ";

impl App {
    pub(crate) fn draw(&mut self, f: &mut Frame<'_>) {
        self.sync_rows();

        let size = f.size();
        f.render_widget(Clear, size);
        f.render_widget(Block::default().style(Style::default().bg(BG_BASE)), size);
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(2),
                Constraint::Length(3),
                Constraint::Min(3),
                Constraint::Length(1),
            ])
            .split(size);

        self.draw_header(f, chunks[0]);
        self.draw_input_bar(f, chunks[1]);
        self.draw_tasks(f, chunks[2]);
        self.draw_footer(f, chunks[3]);

        match self.input_mode {
            InputMode::Alert => self.draw_alert_overlay(f, size),
            InputMode::ConfirmRemove => self.draw_confirm_overlay(f, size),
            InputMode::Normal | InputMode::Add | InputMode::Edit => {}
        }
    }

    fn draw_header(&self, f: &mut Frame<'_>, area: Rect) {
        let lines = vec![
            Line::from(vec![
                Span::styled(
                    format!(" todos v{} ", APP_VERSION),
                    Style::default().fg(FG_ACCENT).add_modifier(Modifier::BOLD),
                ),
                Span::raw("  "),
                Span::styled(
                    format!("log: {}", self.config.log_path().display()),
                    Style::default().fg(Color::DarkGray),
                ),
            ]),
            Line::from(Span::styled(
                format!(" {}", task_count_label(self.store.len())),
                Style::default().fg(FG_TEXT),
            )),
        ];
        f.render_widget(
            Paragraph::new(lines).style(Style::default().bg(BG_BASE)),
            area,
        );
    }

    fn draw_input_bar(&self, f: &mut Frame<'_>, area: Rect) {
        let adding = matches!(self.input_mode, InputMode::Add | InputMode::Alert);
        let border = if adding { FG_ACCENT } else { FG_MUTED };
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(border))
            .style(Style::default().bg(BG_PANEL));
        let inner = block.inner(area);

        let text = if adding {
            Span::styled(self.input.as_str().to_string(), Style::default().fg(FG_TEXT))
        } else {
            Span::styled(INPUT_PLACEHOLDER, Style::default().fg(FG_MUTED))
        };
        f.render_widget(Paragraph::new(Line::from(text)).block(block), area);

        if self.input_mode == InputMode::Add {
            let column = self.input.cursor_column() as u16;
            f.set_cursor(inner.x + min(column, inner.width.saturating_sub(1)), inner.y);
        }
    }

    fn draw_tasks(&mut self, f: &mut Frame<'_>, area: Rect) {
        let block = Block::default()
            .borders(Borders::ALL)
            .title(accent_title("Tasks"))
            .border_style(Style::default().fg(FG_MUTED))
            .style(Style::default().bg(BG_PANEL));
        let inner = block.inner(area);

        let items: Vec<ListItem> = self
            .rows
            .iter()
            .filter_map(|row| {
                self.store
                    .get(row.task_id())
                    .map(|task| ListItem::new(row_line(row, task)))
            })
            .collect();

        let list = List::new(items)
            .block(block)
            .highlight_symbol(ROW_HIGHLIGHT)
            .highlight_style(Style::default().add_modifier(Modifier::BOLD));
        f.render_stateful_widget(list, area, &mut self.list_state);

        if let Some(row) = self.rows.get(self.selected) {
            if row.has_focus() && inner.height > 0 {
                let visible = self.selected.saturating_sub(self.list_state.offset()) as u16;
                let prefix = (ROW_HIGHLIGHT.chars().count() + 4) as u16;
                let x = inner.x + prefix + row.staged_cursor() as u16;
                let y = inner.y + min(visible, inner.height - 1);
                f.set_cursor(min(x, inner.x + inner.width.saturating_sub(1)), y);
            }
        }
    }

    fn draw_footer(&self, f: &mut Frame<'_>, area: Rect) {
        let line = match &self.status {
            Some(status) => Line::from(Span::styled(format!(" {}", status.text), status.style())),
            None => {
                let hint = match self.input_mode {
                    InputMode::Normal => HINT_NORMAL,
                    InputMode::Add => HINT_ADD,
                    InputMode::Edit => HINT_EDIT,
                    InputMode::Alert => HINT_ALERT,
                    InputMode::ConfirmRemove => HINT_CONFIRM,
                };
                Line::from(Span::styled(
                    format!(" {}", hint),
                    Style::default().fg(Color::DarkGray),
                ))
            }
        };
        f.render_widget(
            Paragraph::new(line).style(Style::default().bg(BG_BASE)),
            area,
        );
    }

    fn draw_alert_overlay(&self, f: &mut Frame<'_>, area: Rect) {
        let Some(alert) = &self.alert else {
            return;
        };
        let width = min(area.width.saturating_sub(10), 56).max(30);
        let popup_area = centered_rect(width, 8, area);
        f.render_widget(Clear, popup_area);

        let block = Block::default()
            .borders(Borders::ALL)
            .title(accent_title(alert.title))
            .border_style(Style::default().fg(Color::Yellow))
            .style(Style::default().bg(BG_PANEL));
        let inner = block.inner(popup_area);
        f.render_widget(block, popup_area);

        let lines = vec![
            Line::from(Span::styled(alert.message, Style::default().fg(FG_TEXT))),
            Line::from(Span::styled(
                format!("'{}'", alert.duplicate),
                Style::default().fg(FG_MUTED),
            )),
            Line::default(),
            Line::from(Span::styled(
                format!("  {}  ", DuplicateTitleAlert::DISMISS),
                Style::default()
                    .fg(Color::Black)
                    .bg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            )),
        ];
        f.render_widget(
            Paragraph::new(lines)
                .wrap(Wrap { trim: true })
                .alignment(Alignment::Center),
            inset_rect(inner, 1),
        );
    }

    fn draw_confirm_overlay(&self, f: &mut Frame<'_>, area: Rect) {
        let Some(pending) = &self.pending_removal else {
            return;
        };
        let width = min(area.width.saturating_sub(10), 60).max(36);
        let popup_area = centered_rect(width, 8, area);
        f.render_widget(Clear, popup_area);

        let block = Block::default()
            .borders(Borders::ALL)
            .title(accent_title(pending.prompt.title))
            .border_style(Style::default().fg(Color::Red))
            .style(Style::default().bg(BG_PANEL));
        let inner = block.inner(popup_area);
        f.render_widget(block, popup_area);

        let choice_style = |answer: Answer, accent: Color| {
            if pending.choice == answer {
                Style::default()
                    .fg(Color::Black)
                    .bg(accent)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(accent)
            }
        };

        let lines = vec![
            Line::from(Span::styled(
                pending.prompt.message,
                Style::default().fg(FG_TEXT),
            )),
            Line::from(Span::styled(
                format!("'{}'", pending.prompt.task_title),
                Style::default().fg(FG_MUTED),
            )),
            Line::default(),
            Line::from(vec![
                Span::styled(
                    format!("  {}  ", Answer::No.label()),
                    choice_style(Answer::No, Color::Gray),
                ),
                Span::raw("    "),
                Span::styled(
                    format!("  {}  ", Answer::Yes.label()),
                    choice_style(Answer::Yes, Color::Red),
                ),
            ]),
        ];
        f.render_widget(
            Paragraph::new(lines)
                .wrap(Wrap { trim: true })
                .alignment(Alignment::Center),
            inset_rect(inner, 1),
        );
    }
}

fn row_line(row: &TaskRowController, task: &Task) -> Line<'static> {
    let marker = if task.done {
        Span::styled("[✓] ", Style::default().fg(FG_DONE))
    } else {
        Span::styled("[ ] ", Style::default().fg(FG_MUTED))
    };

    let title_style = if task.done {
        Style::default()
            .fg(FG_DONE)
            .add_modifier(Modifier::CROSSED_OUT)
    } else {
        Style::default().fg(FG_TEXT)
    };
    let title = if row.is_editing() {
        Span::styled(
            row.staged_title().to_string(),
            title_style.add_modifier(Modifier::UNDERLINED),
        )
    } else {
        Span::styled(task.title.clone(), title_style)
    };

    let edit_affordance = if row.is_editing() { "  ✕ cancel" } else { "  ✎ edit" };
    let remove_style = if row.can_remove() {
        Style::default().fg(Color::Red)
    } else {
        Style::default().fg(FG_MUTED).add_modifier(Modifier::DIM)
    };

    Line::from(vec![
        marker,
        title,
        Span::styled(edit_affordance, Style::default().fg(FG_MUTED)),
        Span::styled("  🗑 remove", remove_style),
        Span::styled(
            format!("  {}", format_created(task.id)),
            Style::default().fg(Color::DarkGray),
        ),
    ])
}
