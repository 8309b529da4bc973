use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Paragraph, Wrap},
};

use qa_lens::AnalysisReport;

use super::theme;
use crate::app::App;

pub fn draw(frame: &mut Frame, app: &mut App, area: Rect) {
    let block = Block::default()
        .title(" Suite Analysis ")
        .borders(Borders::ALL)
        .border_style(theme::border(true));

    let lines = match app.dataset().and_then(|d| d.analysis.as_ref()) {
        Some(report) => report_lines(report),
        None => vec![Line::styled(
            format!(
                " No {} found in {}",
                app.config.analysis.file,
                app.data_dir.display()
            ),
            Style::default().fg(theme::OVERLAY0),
        )],
    };

    let viewport = block.inner(area).height as usize;
    let max_scroll = lines.len().saturating_sub(viewport);
    app.analysis_scroll_offset = app.analysis_scroll_offset.min(max_scroll as u16);

    let paragraph = Paragraph::new(lines)
        .block(block)
        .wrap(Wrap { trim: false })
        .scroll((app.analysis_scroll_offset, 0));
    frame.render_widget(paragraph, area);
}

fn heading(title: &str) -> Line<'static> {
    Line::styled(format!(" {title}"), Style::default().fg(theme::BLUE).bold())
}

fn field(label: &str, value: String) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("   {label:<18}"), Style::default().fg(theme::SUBTEXT0)),
        Span::styled(value, Style::default().fg(theme::TEXT)),
    ])
}

fn or_dash<T: ToString>(value: Option<T>) -> String {
    value.map_or_else(|| "-".to_string(), |v| v.to_string())
}

fn report_lines(report: &AnalysisReport) -> Vec<Line<'static>> {
    let mut lines = vec![
        heading("Project"),
        field("Name", or_dash(report.project_name())),
        field("Generated", or_dash(report.generated_at())),
        field("Framework", or_dash(report.framework())),
        field("Browsers", report.browsers().join(", ")),
        field("Projects", report.project_names().join(", ")),
        Line::from(""),
        heading("Structure"),
        field("Test cases", or_dash(report.total_test_cases())),
        field("Test files", or_dash(report.total_test_files())),
        field("Page objects", or_dash(report.total_page_objects())),
        Line::from(""),
        heading("Coverage"),
        field(
            "Coverage",
            or_dash(report.coverage_percentage().map(|p| format!("{p:.1}%"))),
        ),
        field(
            "Modules",
            or_dash(
                report
                    .covered_modules()
                    .map(|(covered, total)| format!("{covered}/{total}")),
            ),
        ),
        Line::from(""),
        heading("Scores"),
    ];

    if let Some(overall) = report.overall_score() {
        lines.push(Line::from(vec![
            Span::styled(format!("   {:<18}", "Overall"), Style::default().fg(theme::SUBTEXT0)),
            Span::styled(
                format!("{overall:.1}"),
                Style::default().fg(theme::rate_color(overall)).bold(),
            ),
        ]));
    }
    for (category, score) in report.category_scores() {
        lines.push(Line::from(vec![
            Span::styled(format!("   {category:<18}"), Style::default().fg(theme::SUBTEXT0)),
            Span::styled(format!("{score:.1}"), Style::default().fg(theme::rate_color(score))),
        ]));
    }

    let by_type = report.tests_by_type();
    if !by_type.is_empty() {
        lines.push(Line::from(""));
        lines.push(heading("Tests by type"));
        for (kind, count) in by_type {
            lines.push(field(kind, count.to_string()));
        }
    }

    if let Some(run) = report.last_run() {
        lines.push(Line::from(""));
        lines.push(heading("Last recorded run"));
        lines.push(field(
            "Passed",
            format!("{}/{} ({} failed)", run.passed, run.total, run.failed),
        ));
        lines.push(field("Execution time", format!("{:.1}s", run.execution_time)));
    }

    let issues = report.issues();
    if !issues.is_empty() {
        lines.push(Line::from(""));
        lines.push(heading(&format!("Issues ({})", issues.len())));
        for issue in issues {
            let color = match issue.severity {
                "high" | "critical" => theme::RED,
                "medium" => theme::PEACH,
                _ => theme::YELLOW,
            };
            lines.push(Line::from(vec![
                Span::styled(
                    format!("   [{}] ", issue.severity),
                    Style::default().fg(color).bold(),
                ),
                Span::styled(issue.category.to_string(), Style::default().fg(theme::MAUVE)),
                Span::raw(format!(": {}", issue.description)),
            ]));
            if !issue.impact.is_empty() {
                lines.push(Line::styled(
                    format!("       {}", issue.impact),
                    Style::default().fg(theme::OVERLAY0),
                ));
            }
        }
    }

    let recommendations = report.recommendations();
    if !recommendations.is_empty() {
        lines.push(Line::from(""));
        lines.push(heading("Recommendations"));
        for rec in recommendations {
            lines.push(Line::from(vec![
                Span::styled(
                    format!("   [{}] ", rec.priority),
                    Style::default().fg(theme::YELLOW),
                ),
                Span::styled(rec.title.to_string(), Style::default().fg(theme::TEXT).bold()),
                Span::styled(
                    format!("  ({})", rec.estimated_effort),
                    Style::default().fg(theme::OVERLAY0),
                ),
            ]));
            if !rec.description.is_empty() {
                lines.push(Line::styled(
                    format!("       {}", rec.description),
                    Style::default().fg(theme::SUBTEXT0),
                ));
            }
        }
    }

    lines
}
