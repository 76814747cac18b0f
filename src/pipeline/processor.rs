//! Document processing orchestrator.
//!
//! Single entry point that drives the report pipeline:
//! recognize pages → compose text → parse → aggregate → assemble → save.
//!
//! The OCR engine and the document renderer are trait objects, so the
//! orchestrator stays testable with mock implementations.

use std::sync::Arc;

use serde::Serialize;

use crate::config::LayoutConfig;
use crate::models::{HealthMetric, HealthReport, ReportSource};
use crate::pipeline::aggregate::{abnormal_count, aggregate, aggregate_unclassified};
use crate::pipeline::diagnostic;
use crate::pipeline::extraction::{
    compose_plain_text, compose_table_text, recognize_pages, ExtractionError, PageRecognition,
    PageRenderer, TextRecognizer,
};
use crate::pipeline::parsing::{parse_report_text, MetricParser, ScanTextParser};
use crate::storage::{ReportStore, StorageError};

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

/// Errors that can occur during document processing.
#[derive(Debug, thiserror::Error)]
pub enum ProcessingError {
    #[error("Extraction failed: {0}")]
    Extraction(#[from] ExtractionError),

    #[error("Saving report failed: {0}")]
    Storage(#[from] StorageError),

    #[error("Save task failed: {0}")]
    SaveTask(#[from] tokio::task::JoinError),
}

// ---------------------------------------------------------------------------
// Result types
// ---------------------------------------------------------------------------

/// What one processing run produced.
#[derive(Debug, Clone, Serialize)]
pub struct ProcessingOutcome {
    pub report: HealthReport,
    /// Text handed to the parsers.
    pub recognized_text: String,
    pub page_count: usize,
    /// Pages that produced at least one observation.
    pub pages_recognized: usize,
    /// False when a scan found nothing and the report was not stored.
    pub saved: bool,
}

/// Wrap metrics into a new report with a fresh id and the current time.
pub fn assemble_report(metrics: Vec<HealthMetric>, source: ReportSource) -> HealthReport {
    HealthReport::new(metrics, source)
}

// ---------------------------------------------------------------------------
// Orchestrator
// ---------------------------------------------------------------------------

pub struct DocumentProcessor {
    recognizer: Arc<dyn TextRecognizer>,
    layout: LayoutConfig,
}

impl DocumentProcessor {
    pub fn new(recognizer: Arc<dyn TextRecognizer>) -> Self {
        Self {
            recognizer,
            layout: LayoutConfig::default(),
        }
    }

    pub fn with_layout(mut self, layout: LayoutConfig) -> Self {
        self.layout = layout;
        self
    }

    /// Table-style report (PDF). The report is saved even when no metric was
    /// found.
    pub async fn process_pdf(
        &self,
        document: Arc<dyn PageRenderer>,
        store: &Arc<ReportStore>,
    ) -> Result<ProcessingOutcome, ProcessingError> {
        let pages = recognize_pages(document, Arc::clone(&self.recognizer)).await?;
        let text = compose_table_text(&pages, &self.layout);
        let outcome = self.prepare(text, ReportSource::Pdf, &pages);
        save_blocking(&outcome, store).await?;
        log_outcome(&outcome);
        Ok(outcome)
    }

    /// Camera scan. Saved only when at least one metric was found.
    pub async fn process_scan(
        &self,
        document: Arc<dyn PageRenderer>,
        store: &Arc<ReportStore>,
    ) -> Result<ProcessingOutcome, ProcessingError> {
        let pages = recognize_pages(document, Arc::clone(&self.recognizer)).await?;
        let text = compose_plain_text(&pages);
        let outcome = self.prepare(text, ReportSource::Scan, &pages);
        save_blocking(&outcome, store).await?;
        log_outcome(&outcome);
        Ok(outcome)
    }

    /// Already-recognized text, parsed the way `source` documents are. Saves
    /// on the calling thread.
    pub fn process_text(
        &self,
        text: &str,
        source: ReportSource,
        store: &ReportStore,
    ) -> Result<ProcessingOutcome, ProcessingError> {
        let outcome = self.prepare(text.to_string(), source, &[]);
        if outcome.saved {
            store.save(outcome.report.clone())?;
        }
        log_outcome(&outcome);
        Ok(outcome)
    }

    /// Parse, assemble and dump. `saved` records whether the report must be
    /// stored; nothing is written to the store here.
    fn prepare(
        &self,
        text: String,
        source: ReportSource,
        pages: &[PageRecognition],
    ) -> ProcessingOutcome {
        let metrics = parse_metrics(&text, source);
        let report = assemble_report(metrics, source);

        if let Some(dir) = diagnostic::dump_dir_for(&report.id) {
            diagnostic::dump_report_artifacts(&dir, &text, &report);
        }

        let saved = match source {
            ReportSource::Pdf => true,
            ReportSource::Scan => !report.metrics.is_empty(),
        };

        ProcessingOutcome {
            recognized_text: text,
            page_count: pages.len(),
            pages_recognized: pages.iter().filter(|p| !p.is_empty()).count(),
            saved,
            report,
        }
    }
}

/// The store write is a blocking SQLite call, so it runs on the blocking pool.
async fn save_blocking(
    outcome: &ProcessingOutcome,
    store: &Arc<ReportStore>,
) -> Result<(), ProcessingError> {
    if !outcome.saved {
        return Ok(());
    }
    let store = Arc::clone(store);
    let report = outcome.report.clone();
    tokio::task::spawn_blocking(move || store.save(report)).await??;
    Ok(())
}

fn log_outcome(outcome: &ProcessingOutcome) {
    let report = &outcome.report;
    tracing::info!(
        report_id = %report.id,
        source = report.source.as_str(),
        metrics = report.metrics.len(),
        abnormal = abnormal_count(&report.metrics),
        pages = outcome.page_count,
        saved = outcome.saved,
        "Processing complete"
    );
}

fn parse_metrics(text: &str, source: ReportSource) -> Vec<HealthMetric> {
    match source {
        ReportSource::Pdf => {
            let batches = parse_report_text(text);
            aggregate(batches.general, batches.blood, batches.urine)
        }
        ReportSource::Scan => aggregate_unclassified(ScanTextParser.parse(text)),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
