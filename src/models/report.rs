use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::enums::{MetricCategory, ReportSource};
use super::metric::{reclassify, HealthMetric};

/// A timestamped set of metrics from one processing run.
///
/// Reports are never edited in place: a correction is a new report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthReport {
    pub id: String,
    pub date: DateTime<Utc>,
    pub metrics: Vec<HealthMetric>,
    pub source: ReportSource,
}

impl HealthReport {
    /// New report with a fresh id, stamped now.
    pub fn new(metrics: Vec<HealthMetric>, source: ReportSource) -> Self {
        Self::with_date(Utc::now(), metrics, source)
    }

    /// New report with a fresh id and an explicit timestamp.
    pub fn with_date(date: DateTime<Utc>, metrics: Vec<HealthMetric>, source: ReportSource) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            date,
            metrics,
            source,
        }
    }

    pub fn metrics_in(&self, category: MetricCategory) -> impl Iterator<Item = &HealthMetric> {
        self.metrics.iter().filter(move |m| m.category == category)
    }

    pub fn abnormal_metrics(&self) -> Vec<&HealthMetric> {
        self.metrics.iter().filter(|m| !m.is_normal()).collect()
    }

    /// Group metrics for display, each section sorted by type name.
    pub fn sections(&self) -> ReportSections<'_> {
        let mut sections = ReportSections::default();
        for metric in &self.metrics {
            match reclassify(metric.category, &metric.type_name) {
                MetricCategory::Blood => sections.blood.push(metric),
                MetricCategory::Urine => sections.urine.push(metric),
                MetricCategory::General | MetricCategory::Other => sections.general.push(metric),
            }
        }
        sections.general.sort_by(|a, b| a.type_name.cmp(&b.type_name));
        sections.blood.sort_by(|a, b| a.type_name.cmp(&b.type_name));
        sections.urine.sort_by(|a, b| a.type_name.cmp(&b.type_name));
        sections
    }
}

/// Display grouping of a report's metrics.
#[derive(Debug, Default)]
pub struct ReportSections<'a> {
    pub general: Vec<&'a HealthMetric>,
    pub blood: Vec<&'a HealthMetric>,
    pub urine: Vec<&'a HealthMetric>,
}

impl ReportSections<'_> {
    pub fn is_empty(&self) -> bool {
        self.general.is_empty() && self.blood.is_empty() && self.urine.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Hint;
    use chrono::TimeZone;

    fn metric(type_name: &str, value: &str, reference: &str, category: MetricCategory) -> HealthMetric {
        HealthMetric {
            type_name: type_name.into(),
            abbreviation: String::new(),
            value: value.into(),
            hint: None,
            reference: reference.into(),
            unit: String::new(),
            category,
            original_text: format!("{type_name}: {value}"),
        }
    }

    #[test]
    fn new_report_gets_unique_ids() {
        let a = HealthReport::new(vec![], ReportSource::Pdf);
        let b = HealthReport::new(vec![], ReportSource::Pdf);
        assert_ne!(a.id, b.id);
        assert!(Uuid::parse_str(&a.id).is_ok());
    }

    #[test]
    fn json_round_trip_preserves_metrics_and_timestamp() {
        let date = Utc.with_ymd_and_hms(2024, 12, 20, 8, 30, 15).unwrap()
            + chrono::Duration::nanoseconds(123_456_789);
        let mut hinted = metric("血红蛋白(HGB)", "180", "130-175", MetricCategory::Blood);
        hinted.hint = Some(Hint::High);
        let report = HealthReport::with_date(
            date,
            vec![
                metric("身高", "172", "", MetricCategory::General),
                hinted,
                metric("尿蛋白(PRO)", "阴性", "阴性", MetricCategory::Urine),
            ],
            ReportSource::Pdf,
        );

        let encoded = serde_json::to_vec(&report).unwrap();
        let decoded: HealthReport = serde_json::from_slice(&encoded).unwrap();

        assert_eq!(decoded, report);
        assert_eq!(decoded.date, date);
        assert_eq!(decoded.metrics, report.metrics);
    }

    #[test]
    fn sections_reclassify_other_and_sort_by_name() {
        let report = HealthReport::new(
            vec![
                metric("体重", "65", "", MetricCategory::General),
                metric("ALT(GPT)", "30", "9-50", MetricCategory::Other),
                metric("心率", "72", "60-100", MetricCategory::Other),
                metric("白细胞计数(WBC)", "6.1", "3.5-9.5", MetricCategory::Blood),
                metric("尿糖(GLU)", "阴性", "阴性", MetricCategory::Urine),
            ],
            ReportSource::Scan,
        );

        let sections = report.sections();
        let names = |list: &[&HealthMetric]| {
            list.iter().map(|m| m.type_name.clone()).collect::<Vec<_>>()
        };
        assert_eq!(names(&sections.blood), vec!["ALT(GPT)", "白细胞计数(WBC)"]);
        assert_eq!(names(&sections.general), vec!["体重", "心率"]);
        assert_eq!(names(&sections.urine), vec!["尿糖(GLU)"]);
        assert!(!sections.is_empty());
    }

    #[test]
    fn abnormal_metrics_uses_reference_ranges() {
        let report = HealthReport::new(
            vec![
                metric("收缩压", "145", "90-140", MetricCategory::General),
                metric("舒张压", "80", "60-90", MetricCategory::General),
            ],
            ReportSource::Pdf,
        );
        let abnormal = report.abnormal_metrics();
        assert_eq!(abnormal.len(), 1);
        assert_eq!(abnormal[0].type_name, "收缩压");
    }

    #[test]
    fn metrics_in_filters_by_category() {
        let report = HealthReport::new(
            vec![
                metric("身高", "170", "", MetricCategory::General),
                metric("尿糖(GLU)", "阴性", "阴性", MetricCategory::Urine),
            ],
            ReportSource::Pdf,
        );
        assert_eq!(report.metrics_in(MetricCategory::Urine).count(), 1);
        assert_eq!(report.metrics_in(MetricCategory::Blood).count(), 0);
    }
}
