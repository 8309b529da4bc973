use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Paragraph},
};

use super::theme;
use crate::app::App;

pub fn draw(frame: &mut Frame, app: &App, area: Rect) {
    let block = Block::default()
        .title(format!(" Latest Run · {} ", app.active_run_label()))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme::SURFACE2));

    let summary = app.active_document().and_then(|d| d.summary());

    let first = match summary {
        Some(s) => Line::from(vec![
            Span::styled(format!(" {} tests", s.total()), Style::default().fg(theme::TEXT)),
            Span::styled(format!("   ✔ {}", s.passed()), Style::default().fg(theme::GREEN)),
            Span::styled(format!("  ✘ {}", s.failed()), Style::default().fg(theme::RED)),
            Span::styled(format!("  ⊘ {}", s.skipped()), Style::default().fg(theme::TEAL)),
            Span::styled(
                format!("   {:.1}% pass", s.pass_rate()),
                Style::default().fg(theme::rate_color(s.pass_rate())),
            ),
            Span::styled(
                format!("   {:.1}s", s.duration_secs()),
                Style::default().fg(theme::MAUVE),
            ),
        ]),
        None => Line::styled(
            " No run summary available",
            Style::default().fg(theme::OVERLAY0),
        ),
    };

    let started = summary
        .and_then(|s| s.start_time_short())
        .map(|t| format!("started {t}   "))
        .unwrap_or_default();
    let loaded_at = app
        .dataset()
        .map(|d| d.loaded_at.format("%H:%M:%S").to_string())
        .unwrap_or_default();
    let second = Line::styled(
        format!(
            " {started}loaded {loaded_at} from {}",
            app.data_dir.display()
        ),
        Style::default().fg(theme::OVERLAY0),
    );

    frame.render_widget(Paragraph::new(vec![first, second]).block(block), area);
}
