//! Category parsers: recognized text in, matched metric records out.
//!
//! Parsing never fails. A catalog entry without a match, or without a
//! compiled pattern, contributes nothing; absence is silent.

pub mod blood;
pub mod general;
pub mod patterns;
pub mod scan;
pub mod urine;

pub use blood::BloodRoutineParser;
pub use general::GeneralExamParser;
pub use patterns::PatternTable;
pub use scan::ScanTextParser;
pub use urine::UrineRoutineParser;

use regex::Captures;

use crate::catalog::Catalog;
use crate::models::{Hint, MetricCategory, MetricDefinition, ParsedMetric};

/// A parser for one category of report items.
pub trait MetricParser: Send + Sync {
    fn category(&self) -> MetricCategory;

    /// Every match in `text`, in catalog order then text order. Repeated
    /// occurrences are all returned.
    fn parse(&self, text: &str) -> Vec<ParsedMetric>;
}

/// Results of the three catalog parsers over one text.
#[derive(Debug, Default, Clone)]
pub struct ParsedBatches {
    pub general: Vec<ParsedMetric>,
    pub blood: Vec<ParsedMetric>,
    pub urine: Vec<ParsedMetric>,
}

impl ParsedBatches {
    pub fn len(&self) -> usize {
        self.general.len() + self.blood.len() + self.urine.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Run the general, blood and urine parsers over the same text.
pub fn parse_report_text(text: &str) -> ParsedBatches {
    let batches = ParsedBatches {
        general: GeneralExamParser.parse(text),
        blood: BloodRoutineParser.parse(text),
        urine: UrineRoutineParser.parse(text),
    };

    tracing::debug!(
        general = batches.general.len(),
        blood = batches.blood.len(),
        urine = batches.urine.len(),
        text_length = text.len(),
        "Report text parsed"
    );

    batches
}

/// Pair every catalog entry of `category` with each of its matches in `text`.
pub(crate) fn catalog_matches(
    category: MetricCategory,
    text: &str,
) -> Vec<(&'static MetricDefinition, Captures<'_>)> {
    let table = PatternTable::global();
    let mut matches = Vec::new();

    for definition in Catalog::entries(category) {
        let Some(regex) = table.get(definition.key) else {
            continue;
        };
        for caps in regex.captures_iter(text) {
            matches.push((definition, caps));
        }
    }

    matches
}

/// Build a record from a single-value match. Unit and reference fall back to
/// the catalog when the text does not carry them.
pub(crate) fn scalar_metric(
    definition: &'static MetricDefinition,
    caps: &Captures<'_>,
) -> Option<ParsedMetric> {
    let value = caps.name("value")?.as_str().trim().to_string();
    let whole = caps.get(0)?;

    let unit = caps
        .name("unit")
        .map(|m| m.as_str().to_string())
        .unwrap_or_else(|| definition.unit.to_string());

    let reference = caps
        .name("reference")
        .map(|m| normalize_reference(m.as_str()))
        .unwrap_or_else(|| definition.reference.to_string());

    let hint = caps
        .name("hint")
        .and_then(|m| Hint::from_text(m.as_str()))
        .or_else(|| caps.name("flag").and_then(|m| Hint::from_text(m.as_str())));

    Some(ParsedMetric {
        key: Some(definition.key),
        type_name: definition.name.to_string(),
        value,
        unit,
        reference,
        hint,
        category: definition.category,
        matched_text: whole.as_str().to_string(),
        span: whole.range(),
    })
}

/// "4.3 ~ 5.8" → "4.3-5.8".
fn normalize_reference(raw: &str) -> String {
    raw.chars()
        .filter(|c| !c.is_whitespace())
        .map(|c| if matches!(c, '~' | '～') { '-' } else { c })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "身高: 172 cm\n\
        体重: 68.5 kg\n\
        血压: 128/82 mmHg\n\
        血红蛋白(HGB): 150 g/L\n\
        参考值: 130-175\n\
        白细胞计数: 10.2 10^9/L 偏高\n\
        尿蛋白(PRO): 阴性\n\
        尿比重: 1.020\n";

    #[test]
    fn parse_report_text_fills_every_batch() {
        let batches = parse_report_text(SAMPLE);
        assert_eq!(batches.general.len(), 5); // height, weight, systolic, diastolic, composite
        assert_eq!(batches.blood.len(), 2);
        assert_eq!(batches.urine.len(), 2);
        assert_eq!(batches.len(), 9);
    }

    #[test]
    fn reference_on_following_line_is_captured() {
        let batches = parse_report_text(SAMPLE);
        let hgb = batches.blood.iter().find(|m| m.key == Some("hgb")).unwrap();
        assert_eq!(hgb.value, "150");
        assert_eq!(hgb.reference, "130-175");
    }

    #[test]
    fn trailing_flag_becomes_hint() {
        let batches = parse_report_text(SAMPLE);
        let wbc = batches.blood.iter().find(|m| m.key == Some("wbc")).unwrap();
        assert_eq!(wbc.hint, Some(Hint::High));
        assert_eq!(wbc.unit, "10^9/L");
    }

    #[test]
    fn empty_text_yields_nothing() {
        assert!(parse_report_text("").is_empty());
        assert!(parse_report_text("无相关检查").is_empty());
    }

    #[test]
    fn span_points_at_matched_text() {
        let text = "前言 体温: 36.8 ℃";
        let batches = parse_report_text(text);
        let temp = &batches.general[0];
        assert_eq!(&text[temp.span.clone()], temp.matched_text);
    }

    #[test]
    fn normalize_reference_rewrites_tilde() {
        assert_eq!(normalize_reference("4.3 ~ 5.8"), "4.3-5.8");
        assert_eq!(normalize_reference("1～2"), "1-2");
    }
}
