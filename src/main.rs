mod app;
mod ui;

use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    ExecutableCommand,
    event::{Event, EventStream, KeyEventKind},
    terminal::{self, EnterAlternateScreen, LeaveAlternateScreen},
};
use futures_util::StreamExt;
use ratatui::prelude::*;
use tokio::sync::mpsc;
use tokio::time::{Duration, interval};
use tracing::{debug, info};
use tracing_appender::non_blocking::WorkerGuard;

use app::{App, LoadEvent, handle_action, handle_load_event, trigger_action};
use qa_lens::metrics::{slowest_modules, status_distribution};
use qa_lens::{Config, Dataset, calculate_metrics, export};

/// Terminal dashboard for Playwright result bundles and JUnit XML reports.
#[derive(Parser, Debug)]
#[command(name = "qa-lens", version)]
struct Cli {
    /// Directory holding the result files
    #[arg(default_value = "data")]
    data_dir: PathBuf,

    /// Config file (defaults to ./qa-lens.toml)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Print metrics as JSON and exit
    #[arg(long)]
    summary: bool,

    /// Write all rows as CSV into the export directory and exit
    #[arg(long, conflicts_with = "summary")]
    export: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let _guard = init_logging()?;

    let config = match &cli.config {
        Some(path) => Config::load_file(path),
        None => Config::load(Path::new(".")),
    };
    info!(data_dir = %cli.data_dir.display(), "starting qa-lens v{}", env!("CARGO_PKG_VERSION"));

    if cli.summary {
        return print_summary(&cli.data_dir, &config);
    }
    if cli.export {
        return export_csv(&cli.data_dir, &config);
    }

    // Setup terminal
    terminal::enable_raw_mode()?;
    io::stdout().execute(EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(io::stdout());
    let mut terminal = Terminal::new(backend)?;

    let result = run(&mut terminal, cli.data_dir, config).await;

    // Teardown terminal
    terminal::disable_raw_mode()?;
    io::stdout().execute(LeaveAlternateScreen)?;

    result
}

/// Install a file subscriber when `QA_LENS_LOG` names a log file. The
/// terminal belongs to the UI, so nothing is logged otherwise.
fn init_logging() -> Result<Option<WorkerGuard>> {
    let Some(path) = std::env::var_os("QA_LENS_LOG").map(PathBuf::from) else {
        return Ok(None);
    };
    let dir = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or(Path::new("."));
    let file_name = path
        .file_name()
        .with_context(|| format!("QA_LENS_LOG is not a file path: {}", path.display()))?;

    let appender = tracing_appender::rolling::never(dir, file_name);
    let (writer, guard) = tracing_appender::non_blocking(appender);
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "qa_lens=debug".into()),
        )
        .with_writer(writer)
        .with_ansi(false)
        .init();
    Ok(Some(guard))
}

fn print_summary(data_dir: &Path, config: &Config) -> Result<()> {
    let dataset = Dataset::load(data_dir, config)?;
    let distribution: serde_json::Map<String, serde_json::Value> =
        status_distribution(&dataset.table)
            .into_iter()
            .map(|(status, count)| (status.to_string(), count.into()))
            .collect();

    let report = serde_json::json!({
        "data_dir": data_dir,
        "metrics": calculate_metrics(&dataset.table),
        "status_distribution": distribution,
        "slowest_modules": slowest_modules(&dataset.table, 5),
        "latest_run": dataset.latest.as_ref().and_then(|d| d.summary()),
        "environments": dataset.environment_names(),
    });
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

fn export_csv(data_dir: &Path, config: &Config) -> Result<()> {
    let dataset = Dataset::load(data_dir, config)?;
    let path = export::write_csv(&dataset.table, &config.export.dir)
        .with_context(|| format!("writing CSV into {}", config.export.dir.display()))?;
    println!("{} rows written to {}", dataset.table.len(), path.display());
    Ok(())
}

async fn run(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    data_dir: PathBuf,
    config: Config,
) -> Result<()> {
    let (mut app, mut event_rx) = App::new(data_dir, config);
    let mut tick = interval(Duration::from_millis(100));
    let mut event_stream = EventStream::new();

    loop {
        if app.pending_reload && !app.loading {
            app.pending_reload = false;
            app.loading = true;
            start_load(app.data_dir.clone(), app.config.clone(), app.event_tx.clone());
        }

        terminal.draw(|frame| ui::draw(frame, &mut app))?;

        tokio::select! {
            maybe_event = event_stream.next() => {
                match maybe_event {
                    None => break,
                    Some(Err(e)) => return Err(e.into()),
                    Some(Ok(Event::Key(key))) if key.kind == KeyEventKind::Press => {
                        if let Some(action) = trigger_action(key, app.search_active) {
                            handle_action(&mut app, action);
                        }
                    }
                    Some(Ok(_)) => {}
                }
            }

            Some(load_event) = event_rx.recv() => {
                handle_load_event(&mut app, load_event);
            }

            _ = tick.tick() => {
                if app.loading {
                    app.spinner_tick = app.spinner_tick.wrapping_add(1);
                }
                if app.needs_reload() {
                    debug!("cached dataset expired, reloading");
                    app.pending_reload = true;
                }
                app.notifier.prune_expired();
            }
        }

        if app.should_quit {
            break;
        }
    }

    Ok(())
}

/// Read the data directory off the async runtime and report back through `tx`.
fn start_load(data_dir: PathBuf, config: Config, tx: mpsc::UnboundedSender<LoadEvent>) {
    tokio::spawn(async move {
        let result = tokio::task::spawn_blocking(move || Dataset::load(&data_dir, &config)).await;
        let event = match result {
            Ok(Ok(dataset)) => LoadEvent::Loaded(Arc::new(dataset)),
            Ok(Err(e)) => LoadEvent::Failed {
                message: e.to_string(),
            },
            Err(e) => LoadEvent::Failed {
                message: format!("load task failed: {e}"),
            },
        };
        let _ = tx.send(event);
    });
}
