use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Cell, Row, Table},
};

use super::theme;
use crate::app::{App, Panel};

pub fn draw(frame: &mut Frame, app: &mut App, area: Rect) {
    let focused = app.active_panel == Panel::Modules;
    let block = Block::default()
        .title(format!(" Modules ({}) ", app.modules.len()))
        .borders(Borders::ALL)
        .border_style(theme::border(focused));

    // Inner height minus the header row.
    let inner_height = block.inner(area).height.saturating_sub(1) as usize;
    app.modules_viewport_height = inner_height;

    let end = (app.modules_scroll_offset + inner_height).min(app.modules.len());
    let start = app.modules_scroll_offset.min(end);

    let rows: Vec<Row> = app.modules[start..end]
        .iter()
        .enumerate()
        .map(|(view_i, stats)| {
            let selected = focused && view_i + start == app.selected_module_index;
            let rate = stats.passed as f64 / stats.total.max(1) as f64 * 100.0;
            let row = Row::new(vec![
                Cell::from(stats.module.as_str()),
                Cell::from(stats.total.to_string()),
                Cell::from(stats.failed.to_string()).style(if stats.failed > 0 {
                    Style::default().fg(theme::RED)
                } else {
                    Style::default().fg(theme::OVERLAY0)
                }),
                Cell::from(format!("{rate:.0}%")).style(Style::default().fg(theme::rate_color(rate))),
                Cell::from(format!("{:.2}s", stats.avg_time())),
            ]);
            if selected {
                row.style(Style::default().bg(theme::SURFACE1))
            } else {
                row
            }
        })
        .collect();

    let header = Row::new(["Module", "Tests", "Fail", "Pass", "Avg"])
        .style(Style::default().fg(theme::SUBTEXT0).bold());

    let table = Table::new(
        rows,
        [
            Constraint::Min(12),
            Constraint::Length(6),
            Constraint::Length(5),
            Constraint::Length(5),
            Constraint::Length(8),
        ],
    )
    .header(header)
    .block(block);
    frame.render_widget(table, area);
}
