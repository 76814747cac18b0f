//! Pipeline diagnostic dump: writes intermediate artifacts to disk.
//!
//! Disabled unless `ARHEALTH_DUMP_DIR` is set.
//!
//! **Output structure**:
//! ```text
//! {dump_dir}/{report_id}/
//!   01-recognized-text.txt
//!   02-report.json
//! ```

use std::path::{Path, PathBuf};

use crate::config;

pub const RECOGNIZED_TEXT_FILE: &str = "01-recognized-text.txt";
pub const REPORT_FILE: &str = "02-report.json";

// ──────────────────────────────────────────────
// Dump directory resolution
// ──────────────────────────────────────────────

/// Returns the dump directory for a report, or `None` if diagnostics are disabled.
pub fn dump_dir_for(report_id: &str) -> Option<PathBuf> {
    let base = config::dump_dir()?;
    dump_dir_in(&base, report_id)
}

/// Create `{base}/{report_id}`. Returns `None` (with a warning) if directory
/// creation fails; never blocks the pipeline.
pub fn dump_dir_in(base: &Path, report_id: &str) -> Option<PathBuf> {
    let dir = base.join(report_id);

    if let Err(e) = std::fs::create_dir_all(&dir) {
        tracing::warn!(
            path = %dir.display(),
            error = %e,
            "Diagnostic dump: failed to create directory"
        );
        return None;
    }

    Some(dir)
}

// ──────────────────────────────────────────────
// Dump writers
// ──────────────────────────────────────────────

/// Write a JSON artifact, pretty-printed. Never panics.
pub fn dump_json<T: serde::Serialize>(dir: &Path, filename: &str, value: &T) {
    let path = dir.join(filename);
    match serde_json::to_string_pretty(value) {
        Ok(json) => match std::fs::write(&path, json.as_bytes()) {
            Ok(()) => tracing::debug!(
                path = %path.display(),
                size = json.len(),
                "Diagnostic dump: JSON written"
            ),
            Err(e) => tracing::warn!(
                path = %path.display(),
                error = %e,
                "Diagnostic dump: failed to write JSON"
            ),
        },
        Err(e) => tracing::warn!(
            path = %path.display(),
            error = %e,
            "Diagnostic dump: failed to serialize JSON"
        ),
    }
}

/// Write a text artifact. Never panics.
pub fn dump_text(dir: &Path, filename: &str, text: &str) {
    let path = dir.join(filename);
    match std::fs::write(&path, text.as_bytes()) {
        Ok(()) => tracing::debug!(
            path = %path.display(),
            size = text.len(),
            "Diagnostic dump: text written"
        ),
        Err(e) => tracing::warn!(
            path = %path.display(),
            error = %e,
            "Diagnostic dump: failed to write text"
        ),
    }
}

/// Write the recognized text and the assembled report into `dir`.
pub fn dump_report_artifacts<T: serde::Serialize>(dir: &Path, recognized_text: &str, report: &T) {
    dump_text(dir, RECOGNIZED_TEXT_FILE, recognized_text);
    dump_json(dir, REPORT_FILE, report);
}

// ──────────────────────────────────────────────
// Tests
// ──────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dump_dir_in_creates_directory() {
        let tmp = tempfile::tempdir().unwrap();
        let dir = dump_dir_in(tmp.path(), "report-1").unwrap();
        assert!(dir.exists());
        assert!(dir.ends_with("report-1"));
    }

    #[test]
    fn dump_json_writes_pretty_json() {
        let tmp = tempfile::tempdir().unwrap();

        #[derive(serde::Serialize)]
        struct Info {
            name: String,
            value: u32,
        }

        let info = Info {
            name: "test".to_string(),
            value: 42,
        };

        dump_json(tmp.path(), "info.json", &info);

        let content = std::fs::read_to_string(tmp.path().join("info.json")).unwrap();
        assert!(content.contains("\"name\": \"test\""));
        assert!(content.contains("\"value\": 42"));
        assert!(content.contains('\n'));
    }

    #[test]
    fn dump_text_writes_text() {
        let tmp = tempfile::tempdir().unwrap();
        dump_text(tmp.path(), "text.txt", "血红蛋白: 150 g/L");
        let content = std::fs::read_to_string(tmp.path().join("text.txt")).unwrap();
        assert_eq!(content, "血红蛋白: 150 g/L");
    }

    #[test]
    fn report_artifacts_use_fixed_names() {
        let tmp = tempfile::tempdir().unwrap();
        dump_report_artifacts(tmp.path(), "体温: 36.8 ℃", &vec!["x"]);
        assert!(tmp.path().join(RECOGNIZED_TEXT_FILE).exists());
        assert!(tmp.path().join(REPORT_FILE).exists());
    }

    #[test]
    fn write_failures_are_swallowed() {
        let bad_dir = Path::new("/nonexistent/path/that/does/not/exist");
        dump_json(bad_dir, "test.json", &"data");
        dump_text(bad_dir, "test.txt", "data");
        // No panic = success
    }
}
