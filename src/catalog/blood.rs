use crate::models::{MetricCategory, MetricDefinition, Panel, ValueKind};

const fn blood(
    key: &'static str,
    name: &'static str,
    abbreviation: &'static str,
    unit: &'static str,
    reference: &'static str,
    panel: Panel,
) -> MetricDefinition {
    MetricDefinition {
        key,
        name,
        abbreviation,
        unit,
        reference,
        category: MetricCategory::Blood,
        panel,
        value_kind: ValueKind::Numeric,
    }
}

/// Complete blood count items, adult reference intervals.
pub(super) const BLOOD_ROUTINE: &[MetricDefinition] = &[
    // Red cell line
    blood("rbc", "红细胞计数", "RBC", "10^12/L", "4.3-5.8", Panel::RedBloodCell),
    blood("hgb", "血红蛋白", "HGB", "g/L", "130-175", Panel::RedBloodCell),
    blood("hct", "红细胞压积", "HCT", "%", "40.0-50.0", Panel::RedBloodCell),
    blood("mcv", "平均红细胞体积", "MCV", "fL", "82.0-100.0", Panel::RedBloodCell),
    blood("mch", "平均红细胞血红蛋白含量", "MCH", "pg", "27.0-34.0", Panel::RedBloodCell),
    blood("mchc", "平均红细胞血红蛋白浓度", "MCHC", "g/L", "316-354", Panel::RedBloodCell),
    blood("rdw", "红细胞分布宽度", "RDW", "%", "11.5-14.5", Panel::RedBloodCell),
    // White cell line
    blood("wbc", "白细胞计数", "WBC", "10^9/L", "3.5-9.5", Panel::WhiteBloodCell),
    blood("neut_pct", "中性粒细胞百分比", "NEUT%", "%", "40.0-75.0", Panel::WhiteBloodCell),
    blood("lymph_pct", "淋巴细胞百分比", "LYMPH%", "%", "20.0-50.0", Panel::WhiteBloodCell),
    blood("mono_pct", "单核细胞百分比", "MONO%", "%", "3.0-10.0", Panel::WhiteBloodCell),
    blood("eo_pct", "嗜酸性粒细胞百分比", "EO%", "%", "0.4-8.0", Panel::WhiteBloodCell),
    blood("baso_pct", "嗜碱性粒细胞百分比", "BASO%", "%", "0.0-1.0", Panel::WhiteBloodCell),
    blood("neut_count", "中性粒细胞计数", "NEUT#", "10^9/L", "1.8-6.3", Panel::WhiteBloodCell),
    blood("lymph_count", "淋巴细胞计数", "LYMPH#", "10^9/L", "1.1-3.2", Panel::WhiteBloodCell),
    blood("mono_count", "单核细胞计数", "MONO#", "10^9/L", "0.1-0.6", Panel::WhiteBloodCell),
    blood("eo_count", "嗜酸性粒细胞计数", "EO#", "10^9/L", "0.02-0.52", Panel::WhiteBloodCell),
    blood("baso_count", "嗜碱性粒细胞计数", "BASO#", "10^9/L", "0.00-0.06", Panel::WhiteBloodCell),
    // Platelets
    blood("plt", "血小板计数", "PLT", "10^9/L", "125-350", Panel::Platelet),
    blood("mpv", "平均血小板体积", "MPV", "fL", "6.5-12.0", Panel::Platelet),
    blood("pct", "血小板压积", "PCT", "%", "0.108-0.282", Panel::Platelet),
    blood("pdw", "血小板分布宽度", "PDW", "%", "15.5-18.1", Panel::Platelet),
];
