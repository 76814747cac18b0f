//! Combine category parser output into the persisted metric list.
//!
//! Order is general, then blood, then urine; within a category the parser's
//! catalog-driven order is kept.

use crate::catalog::Catalog;
use crate::models::{
    reclassify, split_abbreviation, HealthMetric, Hint, MetricCategory, ParsedMetric,
};
use crate::reference;

/// Merge the three catalog parser batches.
pub fn aggregate(
    general: Vec<ParsedMetric>,
    blood: Vec<ParsedMetric>,
    urine: Vec<ParsedMetric>,
) -> Vec<HealthMetric> {
    let counts = (general.len(), blood.len(), urine.len());

    let metrics: Vec<HealthMetric> = general
        .into_iter()
        .chain(blood)
        .chain(urine)
        .map(to_health_metric)
        .collect();

    tracing::debug!(
        general = counts.0,
        blood = counts.1,
        urine = counts.2,
        total = metrics.len(),
        "Metrics aggregated"
    );
    metrics
}

/// Map free-text results (category `other`) onto categorized metrics.
pub fn aggregate_unclassified(others: Vec<ParsedMetric>) -> Vec<HealthMetric> {
    others.into_iter().map(to_health_metric).collect()
}

/// Convert one parsed record into its persisted form.
pub fn to_health_metric(parsed: ParsedMetric) -> HealthMetric {
    let category = reclassify(parsed.category, &parsed.type_name);
    let definition = parsed.key.and_then(|key| Catalog::global().by_key(key));

    let (type_name, abbreviation) = match (definition, parsed.category) {
        (Some(def), MetricCategory::Blood | MetricCategory::Urine) => {
            (def.display_name(), def.abbreviation.to_string())
        }
        (Some(def), _) => (parsed.type_name.clone(), def.abbreviation.to_string()),
        (None, _) => {
            let abbreviation = split_abbreviation(&parsed.type_name)
                .map(|(_, abbr)| abbr.to_string())
                .unwrap_or_default();
            (parsed.type_name.clone(), abbreviation)
        }
    };

    let hint = parsed
        .hint
        .or_else(|| reference::derive_hint(&parsed.value, &parsed.reference));

    let mut original_text = join_value(&type_name, &parsed.value, &parsed.unit);
    if parsed.category == MetricCategory::Blood {
        if let Some(printed) = parsed.hint {
            original_text.push_str(&format!(" ({})", printed.label()));
        }
    }

    HealthMetric {
        type_name,
        abbreviation,
        value: parsed.value,
        hint,
        reference: parsed.reference,
        unit: parsed.unit,
        category,
        original_text,
    }
}

/// "label: value unit", without a trailing space when the unit is empty.
fn join_value(label: &str, value: &str, unit: &str) -> String {
    if unit.is_empty() {
        format!("{label}: {value}")
    } else {
        format!("{label}: {value} {unit}")
    }
}

/// Number of aggregated metrics whose hint marks them out of range.
pub fn abnormal_count(metrics: &[HealthMetric]) -> usize {
    metrics
        .iter()
        .filter(|m| m.hint.is_some_and(|h| h != Hint::Normal))
        .count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::parsing::{parse_report_text, MetricParser, ScanTextParser};

    fn other(type_name: &str, value: &str, reference: &str) -> ParsedMetric {
        ParsedMetric {
            key: None,
            type_name: type_name.into(),
            value: value.into(),
            unit: "U/L".into(),
            reference: reference.into(),
            hint: None,
            category: MetricCategory::Other,
            matched_text: String::new(),
            span: 0..0,
        }
    }

    #[test]
    fn order_is_general_blood_urine() {
        let batches = parse_report_text("尿蛋白: 阴性\n白细胞计数: 5.0 10^9/L\n身高: 170 cm");
        let metrics = aggregate(batches.general, batches.blood, batches.urine);
        let categories: Vec<_> = metrics.iter().map(|m| m.category).collect();
        assert_eq!(
            categories,
            vec![MetricCategory::General, MetricCategory::Blood, MetricCategory::Urine]
        );
    }

    #[test]
    fn display_text_per_category() {
        let batches = parse_report_text(
            "身高: 170 cm\n白细胞计数: 11.0 10^9/L ↑\n尿蛋白: 阴性\n尿比重: 1.020",
        );
        let metrics = aggregate(batches.general, batches.blood, batches.urine);

        assert_eq!(metrics[0].type_name, "身高");
        assert_eq!(metrics[0].original_text, "身高: 170 cm");

        assert_eq!(metrics[1].type_name, "白细胞计数(WBC)");
        assert_eq!(metrics[1].abbreviation, "WBC");
        assert_eq!(metrics[1].original_text, "白细胞计数(WBC): 11.0 10^9/L (偏高)");
        assert_eq!(metrics[1].hint, Some(Hint::High));

        // urine: specific gravity comes first in catalog order
        assert_eq!(metrics[2].type_name, "尿比重");
        assert_eq!(metrics[2].original_text, "尿比重: 1.020");
        assert_eq!(metrics[3].type_name, "尿蛋白(PRO)");
        assert_eq!(metrics[3].original_text, "尿蛋白(PRO): 阴性");
    }

    #[test]
    fn hint_is_derived_when_not_printed() {
        let batches = parse_report_text("血红蛋白: 120 g/L\n血小板计数: 200 10^9/L");
        let metrics = aggregate(Vec::new(), batches.blood, Vec::new());
        assert_eq!(metrics[0].hint, Some(Hint::Low));
        assert_eq!(metrics[0].original_text, "血红蛋白(HGB): 120 g/L");
        assert_eq!(metrics[1].hint, Some(Hint::Normal));
    }

    #[test]
    fn parenthesized_other_becomes_blood() {
        let metrics = aggregate_unclassified(vec![other("ALT(GPT)", "35", "0-40")]);
        assert_eq!(metrics[0].category, MetricCategory::Blood);
        assert_eq!(metrics[0].abbreviation, "GPT");
        assert_eq!(metrics[0].hint, Some(Hint::Normal));

        let merged = aggregate(vec![other("ALT(GPT)", "35", "0-40")], Vec::new(), Vec::new());
        assert_eq!(merged[0].category, MetricCategory::Blood);
        assert_eq!(merged[0].original_text, "ALT(GPT): 35 U/L");
    }

    #[test]
    fn plain_other_becomes_general() {
        let metrics = aggregate_unclassified(ScanTextParser.parse("血压 150/95 mmHg"));
        assert_eq!(metrics.len(), 1);
        assert_eq!(metrics[0].category, MetricCategory::General);
        assert_eq!(metrics[0].abbreviation, "");
        assert_eq!(metrics[0].hint, Some(Hint::High));
        assert_eq!(abnormal_count(&metrics), 1);
    }

    #[test]
    fn empty_input_yields_empty_list() {
        assert!(aggregate(Vec::new(), Vec::new(), Vec::new()).is_empty());
    }
}
