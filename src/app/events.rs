use std::sync::Arc;

use qa_lens::Dataset;
use tracing::{info, warn};

use crate::app::App;

/// Results of background loads, sent back into the app.
#[derive(Debug)]
pub enum LoadEvent {
    Loaded(Arc<Dataset>),
    Failed { message: String },
}

/// Apply a finished load to the app.
pub fn handle_load_event(app: &mut App, event: LoadEvent) {
    app.loading = false;
    match event {
        LoadEvent::Loaded(dataset) => {
            info!(
                rows = dataset.table.len(),
                environments = dataset.environments.len(),
                "dataset loaded"
            );
            let was_error = app.load_error.take().is_some();
            app.set_dataset(dataset);
            if was_error {
                app.notifier.success("Data reloaded");
            }
        }

        LoadEvent::Failed { message } => {
            warn!(%message, "dataset load failed");
            app.notifier.error(message.clone());
            app.load_error = Some(message);
            // Keep showing the previous data and retry after another window.
            if let Some(previous) = app.cache.peek().cloned() {
                app.cache.insert(previous);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use qa_lens::{Config, ResultTable};

    use super::*;

    fn dataset() -> Arc<Dataset> {
        Arc::new(Dataset {
            data_dir: PathBuf::from("data"),
            table: ResultTable::empty(),
            latest: None,
            environments: Default::default(),
            analysis: None,
            loaded_at: chrono::Local::now(),
        })
    }

    #[test]
    fn failure_keeps_message_and_previous_data() {
        let (mut app, _rx) = App::new(PathBuf::from("data"), Config::default());
        handle_load_event(&mut app, LoadEvent::Loaded(dataset()));
        app.loading = true;

        handle_load_event(
            &mut app,
            LoadEvent::Failed {
                message: "data/junit_results.xml: unexpected end of document".into(),
            },
        );

        assert!(!app.loading);
        assert!(app.dataset().is_some());
        assert!(app.load_error.as_deref().unwrap().contains("junit_results.xml"));
    }

    #[test]
    fn successful_load_clears_error() {
        let (mut app, _rx) = App::new(PathBuf::from("data"), Config::default());
        app.load_error = Some("boom".into());
        handle_load_event(&mut app, LoadEvent::Loaded(dataset()));
        assert!(app.load_error.is_none());
        assert_eq!(app.notifier.recent().unwrap().message, "Data reloaded");
    }
}
