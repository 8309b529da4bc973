use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Clear, Paragraph},
};

use crate::app::{App, NotificationKind};

use super::theme;

/// Toast in the bottom-right corner, just above the status bar.
pub fn draw(frame: &mut Frame, app: &App) {
    let Some(notification) = app.notifier.recent() else {
        return;
    };

    let (icon, color) = match notification.kind {
        NotificationKind::Info => ("ℹ", theme::BLUE),
        NotificationKind::Success => ("✔", theme::GREEN),
        NotificationKind::Error => ("✗", theme::RED),
    };

    let text = format!("{icon} {}", notification.message);

    let screen = frame.area();
    let max_inner = (screen.width / 2) as usize;
    let width = text.chars().count().min(max_inner) as u16 + 1;

    let area = Rect {
        x: screen.width.saturating_sub(width + 1),
        y: screen.height.saturating_sub(3),
        width,
        height: 1,
    };

    let block = Block::default()
        .borders(Borders::LEFT)
        .border_style(Style::default().fg(color));

    let paragraph = Paragraph::new(text)
        .block(block)
        .style(Style::default().fg(color).bg(theme::SURFACE0));

    frame.render_widget(Clear, area);
    frame.render_widget(paragraph, area);
}
