//! Static catalog of recognized metrics.
//!
//! One table per category; table order is the iteration order the parsers
//! follow, which in turn fixes the order of parsed results. The catalog favours
//! precision: a metric that is not listed here is never reported.

mod blood;
mod general;
mod urine;

use std::collections::HashMap;
use std::sync::LazyLock;

use crate::models::{MetricCategory, MetricDefinition};

pub use general::BLOOD_PRESSURE_REFERENCE;

static CATALOG: LazyLock<Catalog> = LazyLock::new(Catalog::build);

/// Lookup table over all metric definitions.
pub struct Catalog {
    by_key: HashMap<&'static str, &'static MetricDefinition>,
    by_name: HashMap<&'static str, &'static MetricDefinition>,
    /// Keyed by uppercase abbreviation.
    by_abbreviation: HashMap<String, &'static MetricDefinition>,
}

impl Catalog {
    /// The process-wide catalog, built on first use.
    pub fn global() -> &'static Catalog {
        &CATALOG
    }

    fn build() -> Self {
        let mut by_key = HashMap::new();
        let mut by_name = HashMap::new();
        let mut by_abbreviation = HashMap::new();

        for definition in Self::all() {
            by_key.insert(definition.key, definition);
            by_name.insert(definition.name, definition);
            if !definition.abbreviation.is_empty() {
                by_abbreviation.insert(definition.abbreviation.to_uppercase(), definition);
            }
        }

        tracing::debug!(entries = by_key.len(), "Metric catalog built");

        Self {
            by_key,
            by_name,
            by_abbreviation,
        }
    }

    /// Definitions of one category, in table order. `Other` has no table.
    pub fn entries(category: MetricCategory) -> &'static [MetricDefinition] {
        match category {
            MetricCategory::General => general::GENERAL_EXAM,
            MetricCategory::Blood => blood::BLOOD_ROUTINE,
            MetricCategory::Urine => urine::URINE_ROUTINE,
            MetricCategory::Other => &[],
        }
    }

    /// Every definition: general, then blood, then urine.
    pub fn all() -> impl Iterator<Item = &'static MetricDefinition> {
        general::GENERAL_EXAM
            .iter()
            .chain(blood::BLOOD_ROUTINE)
            .chain(urine::URINE_ROUTINE)
    }

    pub fn by_key(&self, key: &str) -> Option<&'static MetricDefinition> {
        self.by_key.get(key).copied()
    }

    /// Find a definition by canonical name or abbreviation (case-insensitive).
    pub fn lookup(&self, name_or_abbreviation: &str) -> Option<&'static MetricDefinition> {
        let needle = name_or_abbreviation.trim();
        self.by_name
            .get(needle)
            .or_else(|| self.by_abbreviation.get(&needle.to_uppercase()))
            .copied()
    }

    pub fn len(&self) -> usize {
        self.by_key.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_key.is_empty()
    }
}
