use super::{catalog_matches, scalar_metric, MetricParser};
use crate::models::{MetricCategory, ParsedMetric};

/// Complete blood count items.
#[derive(Debug, Default, Clone, Copy)]
pub struct BloodRoutineParser;

impl MetricParser for BloodRoutineParser {
    fn category(&self) -> MetricCategory {
        MetricCategory::Blood
    }

    fn parse(&self, text: &str) -> Vec<ParsedMetric> {
        let results: Vec<ParsedMetric> = catalog_matches(MetricCategory::Blood, text)
            .into_iter()
            .filter_map(|(definition, caps)| scalar_metric(definition, &caps))
            .collect();

        tracing::debug!(count = results.len(), "Blood routine items parsed");
        results
    }
}
