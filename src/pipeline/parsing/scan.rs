//! Vital signs in free camera-scan text.
//!
//! Scanned photos rarely keep a table layout, so only a handful of vitals are
//! picked out, and only when the unit is printed next to the number. Results
//! carry no catalog key and are tagged `other`.

use std::sync::LazyLock;

use regex::Regex;

use super::MetricParser;
use crate::catalog::BLOOD_PRESSURE_REFERENCE;
use crate::models::{MetricCategory, ParsedMetric};

/// A compiled vital-sign pattern with the metadata attached to its matches.
struct VitalPattern {
    regex: Regex,
    type_name: &'static str,
    unit: &'static str,
    reference: &'static str,
}

static VITAL_PATTERNS: LazyLock<Vec<VitalPattern>> = LazyLock::new(|| {
    [
        vital(
            r"血压\s*[：:]*\s*(?P<value>\d{2,3}\s*[/\\]\s*\d{2,3})\s*mmHg",
            "血压",
            "mmHg",
            BLOOD_PRESSURE_REFERENCE,
        ),
        vital(r"心率\s*[：:]*\s*(?P<value>\d{2,3})\s*次/分", "心率", "次/分", "60-100"),
        vital(
            r"血糖\s*[：:]*\s*(?P<value>\d+(?:\.\d+)?)\s*mmol/L",
            "血糖",
            "mmol/L",
            "3.9-6.1",
        ),
        vital(
            r"体温\s*[：:]*\s*(?P<value>\d+(?:\.\d+)?)\s*(?:℃|°C?)",
            "体温",
            "℃",
            "36.3-37.2",
        ),
        vital(r"血氧\s*[：:]*\s*(?P<value>\d{2,3})\s*%", "血氧", "%", "95-100"),
        vital(r"体重\s*[：:]*\s*(?P<value>\d+(?:\.\d+)?)\s*kg", "体重", "kg", ""),
        vital(r"身高\s*[：:]*\s*(?P<value>\d+(?:\.\d+)?)\s*cm", "身高", "cm", ""),
    ]
    .into_iter()
    .flatten()
    .collect()
});

fn vital(
    source: &str,
    type_name: &'static str,
    unit: &'static str,
    reference: &'static str,
) -> Option<VitalPattern> {
    match Regex::new(source) {
        Ok(regex) => Some(VitalPattern {
            regex,
            type_name,
            unit,
            reference,
        }),
        Err(e) => {
            tracing::warn!(type_name, error = %e, "Vital-sign pattern failed to compile");
            None
        }
    }
}

/// Free-text parser used on the camera scan path.
#[derive(Debug, Default, Clone, Copy)]
pub struct ScanTextParser;

impl MetricParser for ScanTextParser {
    fn category(&self) -> MetricCategory {
        MetricCategory::Other
    }

    fn parse(&self, text: &str) -> Vec<ParsedMetric> {
        let mut results = Vec::new();

        for pattern in VITAL_PATTERNS.iter() {
            for caps in pattern.regex.captures_iter(text) {
                let (Some(whole), Some(value)) = (caps.get(0), caps.name("value")) else {
                    continue;
                };
                results.push(ParsedMetric {
                    key: None,
                    type_name: pattern.type_name.to_string(),
                    value: normalize_value(value.as_str()),
                    unit: pattern.unit.to_string(),
                    reference: pattern.reference.to_string(),
                    hint: None,
                    category: MetricCategory::Other,
                    matched_text: whole.as_str().to_string(),
                    span: whole.range(),
                });
            }
        }

        tracing::debug!(count = results.len(), "Scan vitals parsed");
        results
    }
}

/// "120 \ 80" → "120/80".
fn normalize_value(raw: &str) -> String {
    raw.chars()
        .filter(|c| !c.is_whitespace())
        .map(|c| if c == '\\' { '/' } else { c })
        .collect()
}
