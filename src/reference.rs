//! Reference-range model and the single normality policy used everywhere.
//!
//! Policy:
//! - numeric value against a numeric range: inclusive bounds, except a strict
//!   "<"/">" bound, which excludes its limit;
//! - "a/b" value against a composite range: every component must be in range;
//! - positive dipstick result against a negative reference: out of range (high);
//! - any other non-numeric value: normal;
//! - empty or unparseable reference: normal, no hint derived.

use crate::models::Hint;

/// Parsed form of a reference-range string.
#[derive(Debug, Clone, PartialEq)]
pub enum ReferenceRange {
    Interval { low: f64, high: f64 },
    /// "≤ 5"
    AtMost(f64),
    /// "< 5"
    Below(f64),
    /// "≥ 60"
    AtLeast(f64),
    /// "> 60"
    Above(f64),
    /// One range per line, e.g. "收缩压：90-140\n舒张压：60-90".
    Composite(Vec<ReferenceRange>),
    /// Non-numeric expectation such as "阴性" or "淡黄色".
    Qualitative(String),
}

impl ReferenceRange {
    pub fn parse(text: &str) -> Option<Self> {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return None;
        }

        let lines: Vec<&str> = trimmed
            .lines()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .collect();

        if lines.len() > 1 {
            let parts: Vec<ReferenceRange> = lines
                .iter()
                .filter_map(|line| parse_scalar(strip_label(line)))
                .collect();
            return if parts.is_empty() {
                None
            } else {
                Some(Self::Composite(parts))
            };
        }

        let body = strip_label(trimmed);
        parse_scalar(body).or_else(|| Some(Self::Qualitative(body.to_string())))
    }

    /// Compare a number against a scalar range. `None` for composite and
    /// qualitative ranges.
    pub fn assess(&self, value: f64) -> Option<Hint> {
        match *self {
            Self::Interval { low, high } => Some(if value < low {
                Hint::Low
            } else if value > high {
                Hint::High
            } else {
                Hint::Normal
            }),
            Self::AtMost(high) => Some(if value > high { Hint::High } else { Hint::Normal }),
            Self::Below(limit) => Some(if value >= limit { Hint::High } else { Hint::Normal }),
            Self::AtLeast(low) => Some(if value < low { Hint::Low } else { Hint::Normal }),
            Self::Above(limit) => Some(if value <= limit { Hint::Low } else { Hint::Normal }),
            Self::Composite(_) | Self::Qualitative(_) => None,
        }
    }
}

/// Derive a hint by comparing a value with its reference range.
///
/// Returns `None` when there is nothing to compare against.
pub fn derive_hint(value: &str, reference: &str) -> Option<Hint> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }
    let range = ReferenceRange::parse(reference)?;

    match &range {
        ReferenceRange::Composite(parts) => {
            let components = parse_composite_value(value)?;
            if components.len() != parts.len() {
                return None;
            }
            for (component, part) in components.into_iter().zip(parts) {
                match part.assess(component)? {
                    Hint::Normal => {}
                    abnormal => return Some(abnormal),
                }
            }
            Some(Hint::Normal)
        }
        ReferenceRange::Qualitative(expected) => {
            if is_positive_marker(value) && is_negative_marker(expected) {
                Some(Hint::High)
            } else {
                Some(Hint::Normal)
            }
        }
        scalar => match value.parse::<f64>() {
            Ok(number) => scalar.assess(number),
            Err(_) => Some(Hint::Normal),
        },
    }
}

/// Inclusive-bounds normality test. See the module docs for the full policy.
pub fn is_normal(value: &str, reference: &str) -> bool {
    !derive_hint(value, reference).is_some_and(|hint| hint.is_abnormal())
}

pub fn is_positive_marker(value: &str) -> bool {
    let lower = value.trim().to_lowercase();
    lower.contains("阳性") || lower.contains("positive") || lower.ends_with('+')
}

pub fn is_negative_marker(value: &str) -> bool {
    let lower = value.trim().to_lowercase();
    lower == "-" || lower.contains("阴性") || lower.contains("negative")
}

/// Drop a leading "label：" or "label:" prefix.
fn strip_label(line: &str) -> &str {
    match line.rfind(['：', ':']) {
        Some(idx) => {
            let sep_len = line[idx..].chars().next().map_or(1, char::len_utf8);
            line[idx + sep_len..].trim()
        }
        None => line.trim(),
    }
}

fn parse_scalar(text: &str) -> Option<ReferenceRange> {
    let text = text.trim();

    // Two-char inclusive markers are tried before their strict prefixes.
    let bounds: [(&str, fn(f64) -> ReferenceRange); 8] = [
        ("<=", ReferenceRange::AtMost),
        ("≤", ReferenceRange::AtMost),
        ("<", ReferenceRange::Below),
        ("＜", ReferenceRange::Below),
        (">=", ReferenceRange::AtLeast),
        ("≥", ReferenceRange::AtLeast),
        (">", ReferenceRange::Above),
        ("＞", ReferenceRange::Above),
    ];
    for (prefix, bound) in bounds {
        if let Some(rest) = text.strip_prefix(prefix) {
            return rest.trim().parse().ok().map(bound);
        }
    }

    // Separator search skips the first char so a leading sign is not a split point.
    let (idx, sep) = text
        .char_indices()
        .skip(1)
        .find(|(_, c)| matches!(c, '-' | '~' | '～' | '–' | '—'))?;
    let low: f64 = text[..idx].trim().parse().ok()?;
    let high: f64 = text[idx + sep.len_utf8()..].trim().parse().ok()?;
    if low > high {
        return None;
    }
    Some(ReferenceRange::Interval { low, high })
}

fn parse_composite_value(value: &str) -> Option<Vec<f64>> {
    value
        .split(['/', '\\'])
        .map(|part| part.trim().parse::<f64>().ok())
        .collect()
}
