use regex::Captures;

use super::{catalog_matches, scalar_metric, MetricParser};
use crate::catalog::{Catalog, BLOOD_PRESSURE_REFERENCE};
use crate::models::{MetricCategory, MetricDefinition, ParsedMetric, ValueKind};

/// General examination items: body measurements, blood pressure, vitals,
/// vision and hearing.
#[derive(Debug, Default, Clone, Copy)]
pub struct GeneralExamParser;

impl MetricParser for GeneralExamParser {
    fn category(&self) -> MetricCategory {
        MetricCategory::General
    }

    fn parse(&self, text: &str) -> Vec<ParsedMetric> {
        let mut results = Vec::new();

        for (definition, caps) in catalog_matches(MetricCategory::General, text) {
            match definition.value_kind {
                ValueKind::Composite => results.extend(split_blood_pressure(definition, &caps)),
                _ => results.extend(scalar_metric(definition, &caps)),
            }
        }

        tracing::debug!(count = results.len(), "General exam items parsed");
        results
    }
}

/// "血压: 120/80 mmHg" → systolic, diastolic, then the combined reading.
/// All three share the matched text.
fn split_blood_pressure(
    definition: &'static MetricDefinition,
    caps: &Captures<'_>,
) -> Vec<ParsedMetric> {
    let (Some(first), Some(second), Some(whole)) =
        (caps.name("first"), caps.name("second"), caps.get(0))
    else {
        return Vec::new();
    };

    let unit = caps
        .name("unit")
        .map(|m| m.as_str().to_string())
        .unwrap_or_else(|| definition.unit.to_string());

    let component = |key: &'static str, value: &str| {
        let (type_name, reference) = Catalog::global()
            .by_key(key)
            .map(|d| (d.name.to_string(), d.reference.to_string()))
            .unwrap_or_default();
        ParsedMetric {
            key: Some(key),
            type_name,
            value: value.to_string(),
            unit: unit.clone(),
            reference,
            hint: None,
            category: MetricCategory::General,
            matched_text: whole.as_str().to_string(),
            span: whole.range(),
        }
    };

    let systolic = component("systolic_pressure", first.as_str());
    let diastolic = component("diastolic_pressure", second.as_str());
    let combined = ParsedMetric {
        key: Some(definition.key),
        type_name: definition.name.to_string(),
        value: format!("{}/{}", first.as_str(), second.as_str()),
        unit: unit.clone(),
        reference: BLOOD_PRESSURE_REFERENCE.to_string(),
        hint: None,
        category: MetricCategory::General,
        matched_text: whole.as_str().to_string(),
        span: whole.range(),
    };

    vec![systolic, diastolic, combined]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_entry_yields_exactly_one_record() {
        for definition in Catalog::entries(MetricCategory::General) {
            if definition.value_kind == ValueKind::Composite {
                continue;
            }
            let text = format!("{}: 42.5 {}", definition.name, definition.unit);
            let results = GeneralExamParser.parse(&text);
            assert_eq!(results.len(), 1, "{text}");
            assert_eq!(results[0].key, Some(definition.key));
            assert_eq!(results[0].value, "42.5");
            assert_eq!(results[0].unit, definition.unit);
        }
    }

    #[test]
    fn blood_pressure_splits_into_three_records() {
        let results = GeneralExamParser.parse("血压: 120/80 mmHg");
        assert_eq!(results.len(), 3);

        assert_eq!(results[0].key, Some("systolic_pressure"));
        assert_eq!(results[0].value, "120");
        assert_eq!(results[0].reference, "90-140");

        assert_eq!(results[1].key, Some("diastolic_pressure"));
        assert_eq!(results[1].value, "80");
        assert_eq!(results[1].reference, "60-90");

        assert_eq!(results[2].key, Some("blood_pressure"));
        assert_eq!(results[2].value, "120/80");
        assert_eq!(results[2].reference, BLOOD_PRESSURE_REFERENCE);
        assert!(results.iter().all(|r| r.matched_text == "血压: 120/80 mmHg"));
        assert!(results.iter().all(|r| r.unit == "mmHg"));
    }

    #[test]
    fn blood_pressure_without_unit_uses_catalog_unit() {
        let results = GeneralExamParser.parse("BP：135/85");
        assert_eq!(results.len(), 3);
        assert_eq!(results[2].value, "135/85");
        assert_eq!(results[0].unit, "mmHg");
    }

    #[test]
    fn duplicates_are_preserved() {
        let results = GeneralExamParser.parse("体温: 36.5 ℃\n体温: 37.8 ℃");
        assert_eq!(results.len(), 2);
        assert_eq!(results[0].value, "36.5");
        assert_eq!(results[1].value, "37.8");
    }

    #[test]
    fn output_follows_catalog_order() {
        let results = GeneralExamParser.parse("体重: 70 kg\n身高: 175 cm");
        let keys: Vec<_> = results.iter().filter_map(|r| r.key).collect();
        assert_eq!(keys, vec!["height", "weight"]);
    }

    #[test]
    fn similar_names_do_not_cross_match() {
        let results = GeneralExamParser.parse("体重指数: 22.1 kg/m²\n左眼矫正视力: 4.9");
        let keys: Vec<_> = results.iter().filter_map(|r| r.key).collect();
        assert_eq!(keys, vec!["bmi", "corrected_left_vision"]);
    }

    #[test]
    fn hint_is_captured() {
        let results = GeneralExamParser.parse("心率: 110 次/分 提示: 偏高");
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].hint, Some(crate::models::Hint::High));
    }
}
