use ratatui::{prelude::*, widgets::Paragraph};

use super::theme;
use crate::app::{App, View};

const SPINNER_FRAMES: &[&str] = &["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

fn hint(key: &'static str, label: &'static str) -> [Span<'static>; 2] {
    [
        Span::styled(key, Style::default().fg(theme::YELLOW)),
        Span::raw(label),
    ]
}

pub fn draw(frame: &mut Frame, app: &App, area: Rect) {
    let mut spans: Vec<Span> = if app.search_active {
        [hint(" [esc]", " clear  "), hint("[enter]", " apply")]
            .into_iter()
            .flatten()
            .collect()
    } else {
        let view_label = match app.view {
            View::Dashboard => " analysis  ",
            View::Analysis => " dashboard  ",
        };
        [
            hint(" [/]", " search  "),
            hint("[c]", " clear  "),
            hint("[v]", view_label),
            hint("[R]", " reload  "),
            hint("[x]", " export  "),
            hint("[y]", " copy  "),
            hint("[q]", " quit"),
        ]
        .into_iter()
        .flatten()
        .collect()
    };

    if app.loading {
        let spinner = SPINNER_FRAMES[app.spinner_tick % SPINNER_FRAMES.len()];
        spans.push(Span::styled(
            format!("  {spinner} loading..."),
            Style::default().fg(theme::YELLOW),
        ));
    } else if app.load_error.is_some() {
        spans.push(Span::styled("  ✘ load failed", Style::default().fg(theme::RED)));
    } else if !app.nothing_to_show() {
        spans.push(Span::styled(
            format!("  {} rows", app.filtered.len()),
            Style::default().fg(theme::OVERLAY0),
        ));
    }

    let paragraph = Paragraph::new(Line::from(spans)).style(Style::default().bg(theme::SURFACE0));
    frame.render_widget(paragraph, area);
}
