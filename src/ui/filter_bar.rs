use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Paragraph},
};

use super::theme;
use crate::app::{App, selector::Selector};

pub fn draw(frame: &mut Frame, app: &App, area: Rect) {
    let [selectors_area, search_area] =
        Layout::horizontal([Constraint::Min(1), Constraint::Length(32)]).areas(area);

    let mut spans = Vec::new();
    for (key, selector) in [
        ('s', &app.suite),
        ('t', &app.status),
        ('b', &app.browser),
        ('e', &app.environment),
    ] {
        spans.extend(selector_spans(key, selector));
    }

    let block = Block::default()
        .title(" Filters ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme::SURFACE2));
    frame.render_widget(Paragraph::new(Line::from(spans)).block(block), selectors_area);

    draw_search(frame, app, search_area);
}

fn selector_spans(key: char, selector: &Selector) -> [Span<'_>; 3] {
    let value_style = if selector.is_filtering() {
        Style::default().fg(theme::MAUVE).bold()
    } else {
        Style::default().fg(theme::SUBTEXT0)
    };
    [
        Span::styled(format!(" [{key}]"), Style::default().fg(theme::YELLOW)),
        Span::raw(format!(" {}: ", selector.label)),
        Span::styled(format!("{}  ", selector.display()), value_style),
    ]
}

fn draw_search(frame: &mut Frame, app: &App, area: Rect) {
    let query = app.search.value();
    let (display, border_color, text_style) = if app.search_active {
        (
            format!("/ {query}│"),
            theme::BLUE,
            Style::default().fg(theme::TEXT),
        )
    } else {
        (
            format!("/ {query}"),
            theme::SURFACE2,
            Style::default().fg(theme::OVERLAY0),
        )
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color))
        .title(" Search ");
    frame.render_widget(Paragraph::new(display).style(text_style).block(block), area);
}
