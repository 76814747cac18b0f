use std::ops::Range;

use serde::{Deserialize, Serialize};

use super::enums::{Hint, MetricCategory, Panel};
use crate::reference;

/// Shape of the value printed next to a metric name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    /// Plain decimal number ("4.52").
    Numeric,
    /// Two numbers separated by a slash ("120/80").
    Composite,
    /// Dipstick-style result ("阴性", "2+"), numbers also accepted.
    Qualitative,
    /// Free word ("淡黄色", "清晰").
    Descriptive,
}

/// One known metric in the catalog.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MetricDefinition {
    /// Stable identifier, unique across the whole catalog.
    pub key: &'static str,
    pub name: &'static str,
    /// Empty when the metric has no conventional abbreviation.
    pub abbreviation: &'static str,
    pub unit: &'static str,
    /// "low-high", a composite multi-line string, a qualitative marker, or empty.
    pub reference: &'static str,
    pub category: MetricCategory,
    pub panel: Panel,
    pub value_kind: ValueKind,
}

impl MetricDefinition {
    /// Type name used on the persisted metric ("血红蛋白(HGB)").
    pub fn display_name(&self) -> String {
        if self.abbreviation.is_empty() {
            self.name.to_string()
        } else {
            format!("{}({})", self.name, self.abbreviation)
        }
    }
}

/// A single pattern match, produced by a parser and consumed by the aggregator.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedMetric {
    /// Catalog key, `None` for matches that did not come from the catalog.
    pub key: Option<&'static str>,
    pub type_name: String,
    pub value: String,
    pub unit: String,
    pub reference: String,
    pub hint: Option<Hint>,
    pub category: MetricCategory,
    pub matched_text: String,
    /// Byte range of `matched_text` in the parsed input.
    pub span: Range<usize>,
}

/// Persisted and displayed form of a metric.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthMetric {
    #[serde(rename = "type")]
    pub type_name: String,
    #[serde(default)]
    pub abbreviation: String,
    pub value: String,
    #[serde(default)]
    pub hint: Option<Hint>,
    #[serde(default)]
    pub reference: String,
    #[serde(default)]
    pub unit: String,
    pub category: MetricCategory,
    #[serde(default)]
    pub original_text: String,
}

impl HealthMetric {
    /// "value unit (hint)\n参考范围: reference", omitting empty parts.
    pub fn display_value(&self) -> String {
        let mut display = if self.unit.is_empty() {
            self.value.clone()
        } else {
            format!("{} {}", self.value, self.unit)
        };
        if let Some(hint) = self.hint {
            display.push_str(&format!(" ({})", hint.label()));
        }
        if !self.reference.is_empty() {
            display.push_str(&format!("\n参考范围: {}", self.reference));
        }
        display
    }

    /// An explicit high/low hint wins; otherwise the value is compared
    /// against the reference range.
    pub fn is_normal(&self) -> bool {
        match self.hint {
            Some(hint) if hint.is_abnormal() => false,
            _ => reference::is_normal(&self.value, &self.reference),
        }
    }
}

/// Resolve the effective category of a metric.
///
/// Precedence:
/// 1. an explicit general, blood or urine category is kept as is;
/// 2. `Other` with a parenthesized suffix ("ALT(GPT)", "谷丙转氨酶（ALT）") is
///    treated as blood routine;
/// 3. anything else falls back to general.
///
/// The suffix test is a heuristic and can misfile unusual names.
pub fn reclassify(declared: MetricCategory, type_name: &str) -> MetricCategory {
    match declared {
        MetricCategory::General | MetricCategory::Blood | MetricCategory::Urine => declared,
        MetricCategory::Other => {
            if split_abbreviation(type_name).is_some() {
                MetricCategory::Blood
            } else {
                MetricCategory::General
            }
        }
    }
}

/// Split "name(ABBR)" into its parts. Full-width parentheses are accepted.
/// Returns `None` unless an opening parenthesis precedes a closing one.
pub fn split_abbreviation(type_name: &str) -> Option<(&str, &str)> {
    let open = type_name.find(['(', '（'])?;
    let open_len = type_name[open..].chars().next()?.len_utf8();
    let inner_start = open + open_len;
    let close = inner_start + type_name[inner_start..].find([')', '）'])?;
    Some((
        type_name[..open].trim(),
        type_name[inner_start..close].trim(),
    ))
}
