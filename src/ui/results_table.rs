use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Cell, Row, Table},
};

use qa_lens::export::Column;

use super::theme;
use crate::app::{App, Panel};

const COLUMNS: [Column; 6] = [
    Column::Name,
    Column::Module,
    Column::Suite,
    Column::Status,
    Column::Time,
    Column::Browser,
];

pub fn draw(frame: &mut Frame, app: &mut App, area: Rect) {
    let focused = app.active_panel == Panel::Results;
    let title = if app.filtered.is_empty() {
        " Results ".to_string()
    } else {
        format!(
            " Results {}/{} ",
            app.selected_result_index + 1,
            app.filtered.len()
        )
    };
    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(theme::border(focused));

    let inner_height = block.inner(area).height.saturating_sub(1) as usize;
    app.results_viewport_height = inner_height;

    let rows = app.filtered.rows();
    let end = (app.results_scroll_offset + inner_height).min(rows.len());
    let start = app.results_scroll_offset.min(end);

    let body: Vec<Row> = rows[start..end]
        .iter()
        .enumerate()
        .map(|(view_i, result)| {
            let status_style = Style::default().fg(theme::status_color(&result.status));
            let cells = COLUMNS.iter().map(|column| match column {
                Column::Status => Cell::from(format!(
                    "{} {}",
                    result.status.icon(),
                    result.status
                ))
                .style(status_style),
                Column::Time => Cell::from(format!("{:.2}s", result.time)),
                other => Cell::from(other.value(result)),
            });
            let row = Row::new(cells);
            if focused && view_i + start == app.selected_result_index {
                row.style(Style::default().bg(theme::SURFACE1))
            } else {
                row
            }
        })
        .collect();

    let header = Row::new(COLUMNS.iter().map(|c| c.header()))
        .style(Style::default().fg(theme::SUBTEXT0).bold());

    let table = Table::new(
        body,
        [
            Constraint::Min(20),
            Constraint::Percentage(25),
            Constraint::Length(12),
            Constraint::Length(10),
            Constraint::Length(8),
            Constraint::Length(10),
        ],
    )
    .header(header)
    .block(block);
    frame.render_widget(table, area);
}
