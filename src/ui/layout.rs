use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Paragraph, Wrap},
};

use crate::app::{App, View};

use super::{
    analysis_panel, environment_panel, filter_bar, metrics_panel, module_table, results_table,
    status_bar, summary_panel, theme,
};

pub fn draw(frame: &mut Frame, app: &mut App) {
    let [main_area, status_area] =
        Layout::vertical([Constraint::Min(1), Constraint::Length(1)]).areas(frame.area());

    status_bar::draw(frame, app, status_area);

    if app.nothing_to_show() {
        draw_placeholder(frame, app, main_area);
        return;
    }

    match app.view {
        View::Dashboard => draw_dashboard(frame, app, main_area),
        View::Analysis => analysis_panel::draw(frame, app, main_area),
    }
}

fn draw_dashboard(frame: &mut Frame, app: &mut App, area: Rect) {
    let env_height = match app.dataset() {
        Some(d) if d.environments.len() > 1 => 1,
        _ => 0,
    };

    let [summary_area, env_area, filter_area, body_area] = Layout::vertical([
        Constraint::Length(4),
        Constraint::Length(env_height),
        Constraint::Length(3),
        Constraint::Min(1),
    ])
    .areas(area);

    let [left_area, results_area] =
        Layout::horizontal([Constraint::Percentage(40), Constraint::Percentage(60)])
            .areas(body_area);

    let [metrics_area, modules_area] =
        Layout::vertical([Constraint::Length(11), Constraint::Min(3)]).areas(left_area);

    summary_panel::draw(frame, app, summary_area);
    if env_height > 0 {
        environment_panel::draw(frame, app, env_area);
    }
    filter_bar::draw(frame, app, filter_area);
    metrics_panel::draw(frame, app, metrics_area);
    module_table::draw(frame, app, modules_area);
    results_table::draw(frame, app, results_area);
}

/// Shown before the first load lands, after a failed load with no data,
/// or when the directory has no recognised files.
fn draw_placeholder(frame: &mut Frame, app: &App, area: Rect) {
    let (title, lines, color) = if let Some(message) = &app.load_error {
        (
            " Load failed ",
            vec![
                Line::from("Could not read the test results:"),
                Line::from(""),
                Line::from(message.as_str()),
                Line::from(""),
                Line::from("Fix the file and press [R] to reload."),
            ],
            theme::RED,
        )
    } else if app.loading || app.dataset().is_none() {
        (
            " Loading ",
            vec![Line::from(format!(
                "Reading {} ...",
                app.data_dir.display()
            ))],
            theme::YELLOW,
        )
    } else {
        (
            " No data ",
            vec![
                Line::from("No test results were found."),
                Line::from(""),
                Line::from(format!(
                    "Put JSON result bundles or JUnit XML reports in {} and press [R].",
                    app.data_dir.display()
                )),
            ],
            theme::SUBTEXT0,
        )
    };

    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(color));

    let paragraph = Paragraph::new(lines)
        .block(block)
        .style(Style::default().fg(theme::TEXT))
        .wrap(Wrap { trim: false });
    frame.render_widget(paragraph, area);
}
