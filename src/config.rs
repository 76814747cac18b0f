use std::path::PathBuf;

/// Application-level constants
pub const APP_NAME: &str = "ARHealth";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Storage key holding the JSON array of saved reports.
pub const REPORTS_KEY: &str = "savedHealthReports";

/// Overrides the data directory (tests, sandboxed hosts).
pub const DATA_DIR_ENV: &str = "ARHEALTH_DATA_DIR";

/// When set, per-report diagnostic artifacts are written under this directory.
pub const DUMP_DIR_ENV: &str = "ARHEALTH_DUMP_DIR";

const DATABASE_FILE: &str = "arhealth.db";

/// Get the application data directory.
/// `ARHEALTH_DATA_DIR` if set, else the platform data dir joined with
/// `ARHealth`, else a relative `ARHealth` directory.
pub fn app_data_dir() -> PathBuf {
    if let Some(dir) = std::env::var_os(DATA_DIR_ENV).filter(|v| !v.is_empty()) {
        return PathBuf::from(dir);
    }
    dirs::data_dir()
        .map(|d| d.join(APP_NAME))
        .unwrap_or_else(|| PathBuf::from(APP_NAME))
}

/// SQLite file backing the report store.
pub fn database_path() -> PathBuf {
    app_data_dir().join(DATABASE_FILE)
}

/// Diagnostic dump directory, if enabled.
pub fn dump_dir() -> Option<PathBuf> {
    std::env::var_os(DUMP_DIR_ENV)
        .filter(|v| !v.is_empty())
        .map(PathBuf::from)
}

/// Log filter used when `RUST_LOG` is not set.
pub fn default_log_filter() -> String {
    if cfg!(debug_assertions) {
        "arhealth_lib=debug,info".to_string()
    } else {
        "arhealth_lib=info,warn".to_string()
    }
}

/// Geometry used to turn page observations into table rows.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutConfig {
    /// Maximum vertical distance, in page points, from the row anchor.
    pub row_tolerance: f32,
    /// Column boundaries as fractions of page width.
    pub item_column_end: f32,
    pub value_column_end: f32,
    pub unit_column_end: f32,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            row_tolerance: 20.0,
            item_column_end: 0.30,
            value_column_end: 0.50,
            unit_column_end: 0.60,
        }
    }
}
