use std::cmp::min;

use chrono::Local;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Span;

use todos_core::TaskId;

pub const BG_BASE: Color = Color::Rgb(235, 235, 235);
pub const BG_PANEL: Color = Color::Rgb(255, 255, 255);
pub const FG_TEXT: Color = Color::Rgb(102, 102, 102);
pub const FG_MUTED: Color = Color::Rgb(178, 178, 178);
pub const FG_DONE: Color = Color::Rgb(29, 184, 99);
pub const FG_ACCENT: Color = Color::Rgb(136, 84, 208);

pub fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let w = min(width, area.width);
    let h = min(height, area.height);
    Rect {
        x: area.x + (area.width.saturating_sub(w)) / 2,
        y: area.y + (area.height.saturating_sub(h)) / 2,
        width: w,
        height: h,
    }
}

pub fn inset_rect(area: Rect, padding: u16) -> Rect {
    if area.width == 0 || area.height == 0 {
        return area;
    }
    let px = padding.min(area.width / 2);
    let py = padding.min(area.height / 2);
    Rect {
        x: area.x + px,
        y: area.y + py,
        width: area.width.saturating_sub(px * 2),
        height: area.height.saturating_sub(py * 2),
    }
}

pub fn accent_title(text: &str) -> Span<'static> {
    Span::styled(
        format!(" {} ", text),
        Style::default().fg(FG_ACCENT).add_modifier(Modifier::BOLD),
    )
}

pub fn task_count_label(count: usize) -> String {
    format!(
        "You have {} task{}",
        count,
        if count == 1 { "" } else { "s" }
    )
}

/// Local wall-clock time a task was created, as `HH:MM`.
pub fn format_created(id: TaskId) -> String {
    id.created_at()
        .map(|created| created.with_timezone(&Local).format("%H:%M").to_string())
        .unwrap_or_else(|| "--:--".to_string())
}
