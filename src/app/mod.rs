use std::path::PathBuf;
use std::sync::Arc;

use tokio::sync::mpsc;

use qa_lens::cache::TtlCache;
use qa_lens::metrics::{ModuleStats, module_breakdown, status_distribution};
use qa_lens::models::{ResultDocument, ResultTable, RowFilter, TestStatus};
use qa_lens::{Config, Dataset, MetricsResult, calculate_metrics};

use crate::app::notifier::Notifier;
use crate::app::selector::Selector;

pub mod actions;
pub mod events;
pub mod notifier;
pub mod selector;

pub use actions::{handle_action, trigger_action};
pub use events::{LoadEvent, handle_load_event};
pub use notifier::NotificationKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    Dashboard,
    Analysis,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Panel {
    Modules,
    Results,
}

pub struct App {
    pub data_dir: PathBuf,
    pub config: Config,
    /// Last loaded dataset. Stale values stay visible until a reload lands.
    pub cache: TtlCache<Arc<Dataset>>,
    pub loading: bool,
    pub pending_reload: bool,
    pub load_error: Option<String>,
    pub view: View,
    pub active_panel: Panel,
    pub suite: Selector,
    pub status: Selector,
    pub browser: Selector,
    pub environment: Selector,
    pub search_active: bool,
    pub search: tui_input::Input,
    pub filtered: ResultTable,
    pub metrics: MetricsResult,
    pub distribution: Vec<(TestStatus, usize)>,
    pub modules: Vec<ModuleStats>,
    pub selected_module_index: usize,
    pub modules_scroll_offset: usize,
    pub modules_viewport_height: usize,
    pub selected_result_index: usize,
    pub results_scroll_offset: usize,
    pub results_viewport_height: usize,
    pub analysis_scroll_offset: u16,
    pub event_tx: mpsc::UnboundedSender<LoadEvent>,
    pub should_quit: bool,
    pub spinner_tick: usize,
    pub notifier: Notifier,
}

impl App {
    pub fn new(data_dir: PathBuf, config: Config) -> (Self, mpsc::UnboundedReceiver<LoadEvent>) {
        let (event_tx, event_rx) = mpsc::unbounded_channel();
        let app = Self {
            data_dir,
            cache: TtlCache::new(config.cache.ttl()),
            config,
            loading: false,
            pending_reload: true,
            load_error: None,
            view: View::Dashboard,
            active_panel: Panel::Results,
            suite: Selector::new("Suite", "All"),
            status: Selector::new("Status", "All"),
            browser: Selector::new("Browser", "All"),
            environment: Selector::new("Environment", "Latest run"),
            search_active: false,
            search: tui_input::Input::default(),
            filtered: ResultTable::empty(),
            metrics: MetricsResult::default(),
            distribution: Vec::new(),
            modules: Vec::new(),
            selected_module_index: 0,
            modules_scroll_offset: 0,
            modules_viewport_height: 0,
            selected_result_index: 0,
            results_scroll_offset: 0,
            results_viewport_height: 0,
            analysis_scroll_offset: 0,
            event_tx,
            should_quit: false,
            spinner_tick: 0,
            notifier: Notifier::new(),
        };
        (app, event_rx)
    }

    pub fn dataset(&self) -> Option<&Arc<Dataset>> {
        self.cache.peek()
    }

    /// A dataset is held but no longer fresh, and no load is queued or running.
    pub fn needs_reload(&self) -> bool {
        !self.loading
            && !self.pending_reload
            && self.cache.peek().is_some()
            && self.cache.get().is_none()
    }

    /// Install a freshly loaded dataset and recompute everything derived from it.
    pub fn set_dataset(&mut self, dataset: Arc<Dataset>) {
        let table = &dataset.table;
        self.suite.set_options(table.distinct_suites());
        self.status.set_options(
            table
                .distinct_statuses()
                .into_iter()
                .map(String::from)
                .collect(),
        );
        self.browser.set_options(table.distinct_browsers());
        self.environment.set_options(
            dataset
                .environment_names()
                .into_iter()
                .map(str::to_string)
                .collect(),
        );
        self.cache.insert(dataset);
        self.apply_filters();
    }

    pub fn row_filter(&self) -> RowFilter {
        let query = self.search.value().trim();
        RowFilter {
            suite: self.suite.selected().map(str::to_string),
            status: self.status.selected().map(TestStatus::from_label),
            browser: self.browser.selected().map(str::to_string),
            name_query: (!query.is_empty()).then(|| query.to_string()),
        }
    }

    /// Re-filter the table and recompute metrics for the current selection.
    pub fn apply_filters(&mut self) {
        self.filtered = match self.dataset() {
            Some(dataset) => dataset.table.filter(&self.row_filter()),
            None => ResultTable::empty(),
        };
        self.metrics = calculate_metrics(&self.filtered);
        self.distribution = status_distribution(&self.filtered);
        self.modules = module_breakdown(&self.filtered);

        self.selected_result_index = self
            .selected_result_index
            .min(self.filtered.len().saturating_sub(1));
        self.selected_module_index = self
            .selected_module_index
            .min(self.modules.len().saturating_sub(1));
        self.adjust_results_scroll();
        self.adjust_modules_scroll();
    }

    /// The bundle shown as "latest run", swapped for the selected environment's.
    pub fn active_document(&self) -> Option<&ResultDocument> {
        self.dataset()?
            .active_document(self.environment.selected())
    }

    pub fn active_run_label(&self) -> &str {
        self.environment.display()
    }

    /// Nothing loaded, or the load found no sources at all.
    pub fn nothing_to_show(&self) -> bool {
        self.dataset().is_none_or(|d| d.is_empty())
    }

    fn adjust_results_scroll(&mut self) {
        adjust_scroll(
            self.selected_result_index,
            &mut self.results_scroll_offset,
            self.results_viewport_height,
        );
    }

    fn adjust_modules_scroll(&mut self) {
        adjust_scroll(
            self.selected_module_index,
            &mut self.modules_scroll_offset,
            self.modules_viewport_height,
        );
    }
}

fn adjust_scroll(selected: usize, offset: &mut usize, viewport: usize) {
    if viewport == 0 {
        return;
    }
    if selected < *offset {
        *offset = selected;
    } else if selected >= *offset + viewport {
        *offset = selected - viewport + 1;
    }
}
