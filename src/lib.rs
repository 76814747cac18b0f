pub mod catalog;
pub mod config;
pub mod db;
pub mod models;
pub mod pipeline;
pub mod reference;
pub mod storage;

use tracing_subscriber::EnvFilter;

pub use models::{HealthMetric, HealthReport, Hint, MetricCategory, ReportSource};
pub use pipeline::processor::{DocumentProcessor, ProcessingError, ProcessingOutcome};
pub use storage::{ReportStore, ReportsChanged, StorageError};

/// Install the global tracing subscriber.
///
/// Filter comes from `RUST_LOG`, else `config::default_log_filter()`.
/// Calling it again (or after the host installed its own) is a no-op.
pub fn init_logging() {
    let result = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config::default_log_filter())),
        )
        .try_init();

    if result.is_ok() {
        tracing::info!("{} starting v{}", config::APP_NAME, config::APP_VERSION);
    }
}

/// Report store backed by the SQLite file under the application data dir.
pub fn open_default_store() -> Result<ReportStore, StorageError> {
    let backend = storage::SqliteStore::open(&config::database_path())?;
    Ok(ReportStore::new(Box::new(backend)))
}
