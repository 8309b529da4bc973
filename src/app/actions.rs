use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tui_input::InputRequest;

use qa_lens::export::{DETAIL_COLUMNS, to_csv, write_csv};
use tracing::{error, info};

use crate::app::{App, Panel, View};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Quit,
    FocusNext,
    ToggleView,
    NavigateUp,
    NavigateDown,
    ScrollUp,
    ScrollDown,
    JumpToStart,
    JumpToEnd,
    NextSuite,
    PreviousSuite,
    NextStatus,
    PreviousStatus,
    NextBrowser,
    PreviousBrowser,
    NextEnvironment,
    PreviousEnvironment,
    ClearFilters,
    SearchEnter,
    SearchInput(char),
    SearchBackspace,
    SearchExit,
    SearchApply,
    Refresh,
    Export,
    CopyCsv,
}

/// Process a keyboard action.
pub fn handle_action(app: &mut App, action: Action) {
    match action {
        Action::Quit => app.should_quit = true,

        Action::FocusNext => {
            app.active_panel = match app.active_panel {
                Panel::Modules => Panel::Results,
                Panel::Results => Panel::Modules,
            };
        }

        Action::ToggleView => {
            app.view = match app.view {
                View::Dashboard => View::Analysis,
                View::Analysis => View::Dashboard,
            };
        }

        Action::NavigateUp => move_selection(app, -1),
        Action::NavigateDown => move_selection(app, 1),

        Action::ScrollUp => {
            let half = (current_viewport(app) / 2).max(1) as isize;
            move_selection(app, -half);
        }

        Action::ScrollDown => {
            let half = (current_viewport(app) / 2).max(1) as isize;
            move_selection(app, half);
        }

        Action::JumpToStart => move_selection(app, isize::MIN),
        Action::JumpToEnd => move_selection(app, isize::MAX),

        Action::NextSuite => cycle(app, |a| a.suite.next()),
        Action::PreviousSuite => cycle(app, |a| a.suite.previous()),
        Action::NextStatus => cycle(app, |a| a.status.next()),
        Action::PreviousStatus => cycle(app, |a| a.status.previous()),
        Action::NextBrowser => cycle(app, |a| a.browser.next()),
        Action::PreviousBrowser => cycle(app, |a| a.browser.previous()),

        // The environment only swaps the summary shown; rows are unaffected.
        Action::NextEnvironment => app.environment.next(),
        Action::PreviousEnvironment => app.environment.previous(),

        Action::ClearFilters => {
            app.suite.reset();
            app.status.reset();
            app.browser.reset();
            app.search.reset();
            reset_selection(app);
            app.apply_filters();
        }

        Action::SearchEnter => {
            app.search_active = true;
        }

        Action::SearchInput(c) => {
            app.search.handle(InputRequest::InsertChar(c));
            reset_selection(app);
            app.apply_filters();
        }

        Action::SearchBackspace => {
            app.search.handle(InputRequest::DeletePrevChar);
            app.apply_filters();
        }

        Action::SearchExit => {
            app.search.reset();
            app.search_active = false;
            app.apply_filters();
        }

        Action::SearchApply => {
            app.search_active = false;
        }

        Action::Refresh => {
            app.cache.invalidate();
            app.pending_reload = true;
            app.apply_filters();
        }

        Action::Export => match write_csv(&app.filtered, &app.config.export.dir) {
            Ok(path) => {
                info!(path = %path.display(), rows = app.filtered.len(), "exported results");
                app.notifier
                    .success(format!("Exported {} rows to {}", app.filtered.len(), path.display()));
            }
            Err(e) => {
                error!(error = %e, "export failed");
                app.notifier.error(format!("Export failed: {e}"));
            }
        },

        Action::CopyCsv => {
            let csv = to_csv(&app.filtered, &DETAIL_COLUMNS);
            match arboard::Clipboard::new().and_then(|mut c| c.set_text(csv)) {
                Ok(()) => app.notifier.info("Copied results to clipboard"),
                Err(e) => app.notifier.error(format!("Clipboard unavailable: {e}")),
            }
        }
    }
}

pub fn trigger_action(key: KeyEvent, search_active: bool) -> Option<Action> {
    if search_active {
        match key.code {
            KeyCode::Esc => Some(Action::SearchExit),
            KeyCode::Enter => Some(Action::SearchApply),
            KeyCode::Backspace => Some(Action::SearchBackspace),
            KeyCode::Up => Some(Action::NavigateUp),
            KeyCode::Down => Some(Action::NavigateDown),
            KeyCode::Char(c) => Some(Action::SearchInput(c)),
            _ => None,
        }
    } else {
        map_key(key)
    }
}

fn map_key(key: KeyEvent) -> Option<Action> {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return match key.code {
            KeyCode::Char('c') => Some(Action::Quit),
            KeyCode::Char('u') => Some(Action::ScrollUp),
            KeyCode::Char('d') => Some(Action::ScrollDown),
            _ => None,
        };
    }

    match key.code {
        KeyCode::Char('q') => Some(Action::Quit),
        KeyCode::Tab | KeyCode::BackTab => Some(Action::FocusNext),
        KeyCode::Char('v') => Some(Action::ToggleView),
        KeyCode::Up | KeyCode::Char('k') => Some(Action::NavigateUp),
        KeyCode::Down | KeyCode::Char('j') => Some(Action::NavigateDown),
        KeyCode::Char('g') | KeyCode::Home => Some(Action::JumpToStart),
        KeyCode::Char('G') | KeyCode::End => Some(Action::JumpToEnd),
        KeyCode::PageUp => Some(Action::ScrollUp),
        KeyCode::PageDown => Some(Action::ScrollDown),
        KeyCode::Char('s') => Some(Action::NextSuite),
        KeyCode::Char('S') => Some(Action::PreviousSuite),
        KeyCode::Char('t') => Some(Action::NextStatus),
        KeyCode::Char('T') => Some(Action::PreviousStatus),
        KeyCode::Char('b') => Some(Action::NextBrowser),
        KeyCode::Char('B') => Some(Action::PreviousBrowser),
        KeyCode::Char('e') => Some(Action::NextEnvironment),
        KeyCode::Char('E') => Some(Action::PreviousEnvironment),
        KeyCode::Char('c') => Some(Action::ClearFilters),
        KeyCode::Char('/') | KeyCode::Char('f') => Some(Action::SearchEnter),
        KeyCode::Char('r') | KeyCode::Char('R') => Some(Action::Refresh),
        KeyCode::Char('x') => Some(Action::Export),
        KeyCode::Char('y') => Some(Action::CopyCsv),
        _ => None,
    }
}

fn cycle(app: &mut App, step: impl FnOnce(&mut App)) {
    step(app);
    reset_selection(app);
    app.apply_filters();
}

fn reset_selection(app: &mut App) {
    app.selected_result_index = 0;
    app.results_scroll_offset = 0;
    app.selected_module_index = 0;
    app.modules_scroll_offset = 0;
}

fn current_viewport(app: &App) -> usize {
    match (app.view, app.active_panel) {
        (View::Analysis, _) => 20,
        (View::Dashboard, Panel::Modules) => app.modules_viewport_height,
        (View::Dashboard, Panel::Results) => app.results_viewport_height,
    }
}

/// Move the focused cursor by `delta`, clamped to the list bounds.
fn move_selection(app: &mut App, delta: isize) {
    if app.view == View::Analysis {
        app.analysis_scroll_offset = match delta {
            isize::MIN => 0,
            isize::MAX => u16::MAX,
            d => (app.analysis_scroll_offset as isize + d).clamp(0, u16::MAX as isize) as u16,
        };
        return;
    }

    let (index, len) = match app.active_panel {
        Panel::Modules => (&mut app.selected_module_index, app.modules.len()),
        Panel::Results => (&mut app.selected_result_index, app.filtered.len()),
    };
    let max = len.saturating_sub(1);
    *index = match delta {
        isize::MIN => 0,
        isize::MAX => max,
        d => index.saturating_add_signed(d).min(max),
    };
    match app.active_panel {
        Panel::Modules => app.adjust_modules_scroll(),
        Panel::Results => app.adjust_results_scroll(),
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;
    use std::sync::Arc;

    use crossterm::event::KeyEventKind;
    use qa_lens::models::{TestResultRow, TestStatus};
    use qa_lens::{Config, Dataset, ResultTable};

    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new_with_kind(code, KeyModifiers::NONE, KeyEventKind::Press)
    }

    fn app() -> App {
        let rows = (0..30)
            .map(|i| TestResultRow {
                suite: if i % 2 == 0 { "Playwright" } else { "JUnit" }.into(),
                name: format!("case {i}"),
                module: format!("m{}", i % 3),
                status: if i % 5 == 0 {
                    TestStatus::Failed
                } else {
                    TestStatus::Passed
                },
                time: 1.0,
                timestamp: "2025-01-01T00:00:00".into(),
                browser: "chromium".into(),
            })
            .collect();
        let (mut app, _rx) = App::new(PathBuf::from("data"), Config::default());
        app.set_dataset(Arc::new(Dataset {
            data_dir: PathBuf::from("data"),
            table: ResultTable::new(rows),
            latest: None,
            environments: Default::default(),
            analysis: None,
            loaded_at: chrono::Local::now(),
        }));
        app.results_viewport_height = 10;
        app
    }

    #[test]
    fn search_mode_captures_characters() {
        assert_eq!(
            trigger_action(key(KeyCode::Char('q')), true),
            Some(Action::SearchInput('q'))
        );
        assert_eq!(trigger_action(key(KeyCode::Char('q')), false), Some(Action::Quit));
    }

    #[test]
    fn navigation_is_clamped() {
        let mut app = app();
        handle_action(&mut app, Action::NavigateUp);
        assert_eq!(app.selected_result_index, 0);
        handle_action(&mut app, Action::JumpToEnd);
        assert_eq!(app.selected_result_index, 29);
        assert_eq!(app.results_scroll_offset, 20);
        handle_action(&mut app, Action::NavigateDown);
        assert_eq!(app.selected_result_index, 29);
        handle_action(&mut app, Action::ScrollUp);
        assert_eq!(app.selected_result_index, 24);
    }

    #[test]
    fn cycling_suite_filters_and_clear_restores() {
        let mut app = app();
        handle_action(&mut app, Action::NextSuite);
        assert_eq!(app.suite.selected(), Some("Playwright"));
        assert_eq!(app.metrics.total_tests, 15);

        handle_action(&mut app, Action::ClearFilters);
        assert_eq!(app.metrics.total_tests, 30);
    }

    #[test]
    fn typing_filters_by_name() {
        let mut app = app();
        handle_action(&mut app, Action::SearchEnter);
        for c in "case 2".chars() {
            handle_action(&mut app, Action::SearchInput(c));
        }
        // case 2, case 20..29
        assert_eq!(app.filtered.len(), 11);
        handle_action(&mut app, Action::SearchExit);
        assert!(!app.search_active);
        assert_eq!(app.filtered.len(), 30);
    }

    #[test]
    fn refresh_requests_reload() {
        let mut app = app();
        app.pending_reload = false;
        handle_action(&mut app, Action::Refresh);
        assert!(app.pending_reload);
        assert!(app.dataset().is_none());
    }

    #[test]
    fn export_writes_filtered_rows() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = app();
        app.config.export.dir = dir.path().to_path_buf();
        handle_action(&mut app, Action::NextStatus);
        handle_action(&mut app, Action::Export);

        let file = std::fs::read_dir(dir.path()).unwrap().next().unwrap().unwrap();
        let content = std::fs::read_to_string(file.path()).unwrap();
        // header plus one row per filtered result
        assert_eq!(content.lines().count(), app.filtered.len() + 1);
    }
}
