use std::sync::Mutex;

use tokio::sync::broadcast;

use super::{KeyValueStore, StorageError};
use crate::config::REPORTS_KEY;
use crate::models::HealthReport;

const EVENT_CAPACITY: usize = 16;

/// Published after every successful mutation. Observers re-read the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReportsChanged;

/// Saved reports, kept as one JSON array under a fixed key.
///
/// Built once at startup and shared. Mutations are read-modify-write and are
/// serialized by an internal lock; readers never take it.
pub struct ReportStore {
    backend: Box<dyn KeyValueStore>,
    write_lock: Mutex<()>,
    events: broadcast::Sender<ReportsChanged>,
}

impl ReportStore {
    pub fn new(backend: Box<dyn KeyValueStore>) -> Self {
        let (events, _) = broadcast::channel(EVENT_CAPACITY);
        Self {
            backend,
            write_lock: Mutex::new(()),
            events,
        }
    }

    /// Receive a `ReportsChanged` per mutation made after this call.
    pub fn subscribe(&self) -> broadcast::Receiver<ReportsChanged> {
        self.events.subscribe()
    }

    /// Append a report.
    pub fn save(&self, report: HealthReport) -> Result<(), StorageError> {
        let _guard = self.write_lock.lock().map_err(|_| StorageError::LockPoisoned)?;
        let mut reports = self.load()?;
        let report_id = report.id.clone();
        let metric_count = report.metrics.len();
        reports.push(report);
        self.store(&reports)?;
        tracing::info!(report_id = %report_id, metric_count, total = reports.len(), "Report saved");
        self.notify();
        Ok(())
    }

    /// All reports, newest first. Reports with equal timestamps keep their
    /// save order. Read failures are logged and yield an empty list.
    pub fn get_all(&self) -> Vec<HealthReport> {
        let mut reports = match self.load() {
            Ok(reports) => reports,
            Err(e) => {
                tracing::warn!(error = %e, "Cannot read saved reports");
                Vec::new()
            }
        };
        reports.sort_by(|a, b| b.date.cmp(&a.date));
        reports
    }

    pub fn get(&self, id: &str) -> Option<HealthReport> {
        self.get_all().into_iter().find(|r| r.id == id)
    }

    /// Remove the report with this id. Returns whether one was removed.
    pub fn delete(&self, id: &str) -> Result<bool, StorageError> {
        let _guard = self.write_lock.lock().map_err(|_| StorageError::LockPoisoned)?;
        let mut reports = self.load()?;
        let before = reports.len();
        reports.retain(|r| r.id != id);
        let removed = reports.len() < before;
        self.store(&reports)?;
        tracing::info!(report_id = id, removed, "Report deleted");
        self.notify();
        Ok(removed)
    }

    /// Drop every saved report.
    pub fn clear_all(&self) -> Result<(), StorageError> {
        let _guard = self.write_lock.lock().map_err(|_| StorageError::LockPoisoned)?;
        self.backend.remove(REPORTS_KEY)?;
        tracing::info!("All reports cleared");
        self.notify();
        Ok(())
    }

    /// Stored order. Undecodable data reads as an empty list.
    fn load(&self) -> Result<Vec<HealthReport>, StorageError> {
        let Some(bytes) = self.backend.get(REPORTS_KEY)? else {
            return Ok(Vec::new());
        };
        match serde_json::from_slice(&bytes) {
            Ok(reports) => Ok(reports),
            Err(e) => {
                tracing::warn!(error = %e, bytes = bytes.len(), "Saved reports undecodable, treating as empty");
                Ok(Vec::new())
            }
        }
    }

    fn store(&self, reports: &[HealthReport]) -> Result<(), StorageError> {
        let encoded = serde_json::to_vec(reports)?;
        self.backend.set(REPORTS_KEY, &encoded)
    }

    fn notify(&self) {
        // No receivers is fine.
        let _ = self.events.send(ReportsChanged);
    }
}
