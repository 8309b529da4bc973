use ratatui::{prelude::*, widgets::Paragraph};

use super::theme;
use crate::app::App;

/// One-line strip of the environments found, with the active one highlighted.
pub fn draw(frame: &mut Frame, app: &App, area: Rect) {
    let Some(dataset) = app.dataset() else {
        return;
    };
    let active = app.environment.selected();

    let mut spans = vec![Span::styled(" [e] env ", Style::default().fg(theme::YELLOW))];
    let latest_style = if active.is_none() {
        Style::default().fg(theme::TEXT).bg(theme::SURFACE1).bold()
    } else {
        Style::default().fg(theme::OVERLAY0)
    };
    spans.push(Span::styled(" Latest run ", latest_style));

    for (name, document) in &dataset.environments {
        let selected = active == Some(name.as_str());
        let rate = document.summary().map(|s| s.pass_rate());
        let style = if selected {
            Style::default().fg(theme::TEXT).bg(theme::SURFACE1).bold()
        } else {
            Style::default().fg(rate.map_or(theme::OVERLAY0, theme::rate_color))
        };
        let label = match rate {
            Some(rate) => format!(" {name} {rate:.0}% "),
            None => format!(" {name} "),
        };
        spans.push(Span::raw(" "));
        spans.push(Span::styled(label, style));
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}
