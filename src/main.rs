//! Data Charts - Main Entry Point

use anyhow::Context;
use data_charts::{
    config::{self, Preferences},
    storage::FileStorage,
    store::PersistentStore,
    DataChartsApp,
};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Set up stderr logging plus a daily log file in the app data directory
fn init_logging() -> anyhow::Result<Option<WorkerGuard>> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,data_charts=debug"));

    let (file_layer, guard) = match config::logs_dir() {
        Some(dir) => {
            std::fs::create_dir_all(&dir)
                .with_context(|| format!("creating log directory {:?}", dir))?;
            let appender = tracing_appender::rolling::daily(dir, "data-charts.log");
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let layer = tracing_subscriber::fmt::layer()
                .with_writer(writer)
                .with_ansi(false);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .with(file_layer)
        .try_init()
        .context("installing tracing subscriber")?;

    Ok(guard)
}

fn main() -> anyhow::Result<()> {
    let _log_guard = init_logging()?;

    tracing::info!("Starting Data Charts");

    let preferences = Preferences::load_or_default();

    let storage = FileStorage::in_app_data_dir().context("opening session storage")?;
    tracing::debug!("Session storage at {:?}", storage.root());
    let store = PersistentStore::open(storage).context("starting snapshot writer")?;

    let inner_size = preferences.window_size.unwrap_or([1280.0, 720.0]);
    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size(inner_size)
            .with_min_inner_size([640.0, 480.0])
            .with_title("Data Charts"),
        ..Default::default()
    };

    eframe::run_native(
        "Data Charts",
        native_options,
        Box::new(move |cc| Ok(Box::new(DataChartsApp::new(cc, store, preferences)))),
    )
    .map_err(|e| anyhow::anyhow!("eframe: {}", e))?;

    tracing::info!("Shutting down...");
    Ok(())
}
