use crate::models::{MetricCategory, MetricDefinition, Panel, ValueKind};

const fn urine(
    key: &'static str,
    name: &'static str,
    abbreviation: &'static str,
    reference: &'static str,
    panel: Panel,
    value_kind: ValueKind,
) -> MetricDefinition {
    MetricDefinition {
        key,
        name,
        abbreviation,
        unit: "",
        reference,
        category: MetricCategory::Urine,
        panel,
        value_kind,
    }
}

pub(super) const URINE_ROUTINE: &[MetricDefinition] = &[
    urine("specific_gravity", "尿比重", "", "1.005-1.030", Panel::UrinePhysical, ValueKind::Numeric),
    urine("ph", "尿酸碱度", "", "4.5-8.0", Panel::UrineChemistry, ValueKind::Numeric),
    urine("leukocytes", "尿白细胞", "LEU", "阴性", Panel::UrineChemistry, ValueKind::Qualitative),
    urine("protein", "尿蛋白", "PRO", "阴性", Panel::UrineChemistry, ValueKind::Qualitative),
    urine("glucose", "尿糖", "GLU", "阴性", Panel::UrineChemistry, ValueKind::Qualitative),
    urine("ketone", "尿酮体", "KET", "阴性", Panel::UrineChemistry, ValueKind::Qualitative),
    urine("urobilinogen", "尿胆原", "URO", "阴性", Panel::UrineChemistry, ValueKind::Qualitative),
    urine("bilirubin", "尿胆红素", "BIL", "阴性", Panel::UrineChemistry, ValueKind::Qualitative),
    urine("occult_blood", "尿隐血", "BLD", "阴性", Panel::UrineChemistry, ValueKind::Qualitative),
    urine("nitrite", "尿亚硝酸盐", "NIT", "阴性", Panel::UrineChemistry, ValueKind::Qualitative),
    urine("color", "尿颜色", "", "淡黄色", Panel::UrinePhysical, ValueKind::Descriptive),
    urine("clarity", "尿透明度", "", "清晰", Panel::UrinePhysical, ValueKind::Descriptive),
    urine("sediment", "尿沉渣", "", "", Panel::UrinePhysical, ValueKind::Descriptive),
];
