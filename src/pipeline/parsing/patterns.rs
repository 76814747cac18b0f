//! Precompiled search patterns, one per catalog entry.
//!
//! Built once on first use. An entry whose pattern fails to compile is logged
//! and left out of the table, so it simply never matches.

use std::collections::HashMap;
use std::sync::LazyLock;

use regex::Regex;

use crate::catalog::Catalog;
use crate::models::{MetricDefinition, ValueKind};

/// Horizontal whitespace only; a value never starts on the next line.
const INLINE_SPACE: &str = r"[^\S\r\n]*";

/// Optional colon (ASCII or full-width) between a name and its value, on the
/// same line.
const SEPARATOR: &str = r"[^\S\r\n]*[：:]*[^\S\r\n]*";

const NUMBER: &str = r"\d+(?:\.\d+)?";

/// "参考值: 4.3-5.8", "参考范围：阴性", "Ref 90-140".
const REFERENCE_TAIL: &str = r"(?:\s*(?:参考(?:值|范围|区间)?|[Rr]ef(?:erence)?)[：:]*\s*(?P<reference>\d+(?:\.\d+)?\s*[-~～]\s*\d+(?:\.\d+)?|阴性|阳性))?";

/// "提示: 偏高" or a bare trailing flag.
const HINT_TAIL: &str = r"(?:[ \t]*(?:提示[：:]*[ \t]*(?P<hint>[^\n]+)|(?P<flag>偏高|偏低|正常|↑|↓)))?";

static PATTERN_TABLE: LazyLock<PatternTable> =
    LazyLock::new(|| PatternTable::build(Catalog::all()));

/// Compiled pattern per metric key.
pub struct PatternTable {
    patterns: HashMap<&'static str, Regex>,
}

impl PatternTable {
    pub fn global() -> &'static PatternTable {
        &PATTERN_TABLE
    }

    pub fn build<'a>(definitions: impl IntoIterator<Item = &'a MetricDefinition>) -> Self {
        let mut patterns = HashMap::new();
        for definition in definitions {
            let source = pattern_source(definition);
            match Regex::new(&source) {
                Ok(regex) => {
                    patterns.insert(definition.key, regex);
                }
                Err(e) => {
                    tracing::warn!(
                        key = definition.key,
                        error = %e,
                        "Metric pattern failed to compile, entry disabled"
                    );
                }
            }
        }
        Self { patterns }
    }

    pub fn get(&self, key: &str) -> Option<&Regex> {
        self.patterns.get(key)
    }

    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }
}

/// Regex source for one definition.
///
/// Capture names: `value` (or `first`/`second` for composite values), `unit`,
/// `reference`, `hint`, `flag`.
pub fn pattern_source(definition: &MetricDefinition) -> String {
    let label = label_alternation(definition);

    let value = match definition.value_kind {
        ValueKind::Numeric => format!("(?P<value>{NUMBER})"),
        ValueKind::Composite => {
            format!(r"(?P<first>{NUMBER}){INLINE_SPACE}[/\\]{INLINE_SPACE}(?P<second>{NUMBER})")
        }
        ValueKind::Qualitative => format!(
            r"(?P<value>弱阳性|阳性|阴性|[1-4]\+|\+{{1,4}}|±|[Nn]egative|[Pp]ositive|{NUMBER}|-)"
        ),
        ValueKind::Descriptive => r"(?P<value>[^\s：:，,；;]+)".to_string(),
    };

    let unit = if definition.unit.is_empty() {
        String::new()
    } else {
        format!(r"(?:{INLINE_SPACE}(?P<unit>{}))?", regex::escape(definition.unit))
    };

    let tails = match definition.value_kind {
        ValueKind::Composite => String::new(),
        _ => format!("{REFERENCE_TAIL}{HINT_TAIL}"),
    };

    format!("{label}{SEPARATOR}{value}{unit}{tails}")
}

/// "(HGB)" or "（HGB）" printed after a name.
const PAREN_SUFFIX: &str = r"(?:\s*[(（][^)）\n]{1,16}[)）])?";

/// `(?:name(ABBR)?|\bABBR\b)`; the trailing word boundary is only added when
/// the abbreviation ends in a word character ("NEUT%" cannot take one).
fn label_alternation(definition: &MetricDefinition) -> String {
    let name = regex::escape(definition.name);
    if definition.abbreviation.is_empty() {
        return format!("(?:{name}{PAREN_SUFFIX})");
    }

    let abbreviation = regex::escape(definition.abbreviation);
    let ends_in_word = definition
        .abbreviation
        .chars()
        .last()
        .is_some_and(|c| c.is_alphanumeric() || c == '_');
    let trailing = if ends_in_word { r"\b" } else { "" };
    format!(r"(?:{name}{PAREN_SUFFIX}|\b{abbreviation}{trailing})")
}
