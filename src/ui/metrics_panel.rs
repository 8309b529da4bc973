use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Gauge, Paragraph},
};

use super::theme;
use crate::app::App;

pub fn draw(frame: &mut Frame, app: &App, area: Rect) {
    let block = Block::default()
        .title(" Metrics ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme::SURFACE2));

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let [gauge_area, counts_area, distribution_area] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Length(4),
        Constraint::Min(1),
    ])
    .areas(inner);

    let m = &app.metrics;
    let color = theme::rate_color(m.pass_rate);
    let gauge = Gauge::default()
        .gauge_style(Style::default().fg(color).bg(theme::SURFACE0))
        .ratio((m.pass_rate / 100.0).clamp(0.0, 1.0))
        .label(format!("{:.2}% pass", m.pass_rate));
    frame.render_widget(gauge, gauge_area);

    let counts = vec![
        Line::from(vec![
            Span::styled(" Total    ", Style::default().fg(theme::SUBTEXT0)),
            Span::styled(m.total_tests.to_string(), Style::default().fg(theme::TEXT).bold()),
        ]),
        Line::from(vec![
            Span::styled(" ✔ ", Style::default().fg(theme::GREEN)),
            Span::styled(format!("{:<6}", m.passed), Style::default().fg(theme::GREEN)),
            Span::styled("✘ ", Style::default().fg(theme::RED)),
            Span::styled(format!("{:<6}", m.failed), Style::default().fg(theme::RED)),
            Span::styled("⊘ ", Style::default().fg(theme::TEAL)),
            Span::styled(m.skipped.to_string(), Style::default().fg(theme::TEAL)),
        ]),
        Line::from(vec![
            Span::styled(" Avg      ", Style::default().fg(theme::SUBTEXT0)),
            Span::styled(
                format!("{:.2}s", m.avg_execution_time),
                Style::default().fg(theme::MAUVE),
            ),
        ]),
        Line::from(vec![
            Span::styled(" Total    ", Style::default().fg(theme::SUBTEXT0)),
            Span::styled(
                format!("{:.2}s", m.total_execution_time),
                Style::default().fg(theme::MAUVE),
            ),
        ]),
    ];
    frame.render_widget(Paragraph::new(counts), counts_area);

    let distribution: Vec<Span> = app
        .distribution
        .iter()
        .flat_map(|(status, count)| {
            let color = theme::status_color(status);
            [
                Span::styled(format!(" {} ", status.icon()), Style::default().fg(color)),
                Span::styled(format!("{status} {count} "), Style::default().fg(color)),
            ]
        })
        .collect();
    frame.render_widget(Paragraph::new(Line::from(distribution)), distribution_area);
}
