use super::{catalog_matches, scalar_metric, MetricParser};
use crate::models::{MetricCategory, ParsedMetric, ValueKind};

/// Urinalysis items: dipstick chemistry and physical appearance.
#[derive(Debug, Default, Clone, Copy)]
pub struct UrineRoutineParser;

impl MetricParser for UrineRoutineParser {
    fn category(&self) -> MetricCategory {
        MetricCategory::Urine
    }

    fn parse(&self, text: &str) -> Vec<ParsedMetric> {
        let mut results = Vec::new();

        for (definition, caps) in catalog_matches(MetricCategory::Urine, text) {
            let Some(mut metric) = scalar_metric(definition, &caps) else {
                continue;
            };
            if definition.value_kind == ValueKind::Qualitative {
                metric.value = normalize_qualitative(&metric.value);
            }
            results.push(metric);
        }

        tracing::debug!(count = results.len(), "Urine routine items parsed");
        results
    }
}

/// English and symbolic dipstick readings mapped onto the printed Chinese
/// markers. Graded results ("2+", "±") and numbers are left as printed.
fn normalize_qualitative(value: &str) -> String {
    let trimmed = value.trim();
    match trimmed.to_lowercase().as_str() {
        "-" | "negative" => "阴性".to_string(),
        "positive" => "阳性".to_string(),
        _ => trimmed.to_string(),
    }
}
