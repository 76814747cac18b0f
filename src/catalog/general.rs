use crate::models::{MetricCategory, MetricDefinition, Panel, ValueKind};

const fn general(
    key: &'static str,
    name: &'static str,
    abbreviation: &'static str,
    unit: &'static str,
    reference: &'static str,
    panel: Panel,
    value_kind: ValueKind,
) -> MetricDefinition {
    MetricDefinition {
        key,
        name,
        abbreviation,
        unit,
        reference,
        category: MetricCategory::General,
        panel,
        value_kind,
    }
}

pub const BLOOD_PRESSURE_REFERENCE: &str = "收缩压：90-140\n舒张压：60-90";

/// General examination room items.
pub(super) const GENERAL_EXAM: &[MetricDefinition] = &[
    general("height", "身高", "", "cm", "", Panel::BodyMeasurement, ValueKind::Numeric),
    general("weight", "体重", "", "kg", "", Panel::BodyMeasurement, ValueKind::Numeric),
    general("bmi", "体重指数", "BMI", "kg/m²", "18.5-23.9", Panel::BodyMeasurement, ValueKind::Numeric),
    general("waistline", "腰围", "", "cm", "", Panel::BodyMeasurement, ValueKind::Numeric),
    general(
        "blood_pressure",
        "血压",
        "BP",
        "mmHg",
        BLOOD_PRESSURE_REFERENCE,
        Panel::Cardiovascular,
        ValueKind::Composite,
    ),
    general("systolic_pressure", "收缩压", "", "mmHg", "90-140", Panel::Cardiovascular, ValueKind::Numeric),
    general("diastolic_pressure", "舒张压", "", "mmHg", "60-90", Panel::Cardiovascular, ValueKind::Numeric),
    general("heart_rate", "心率", "HR", "次/分", "60-100", Panel::Cardiovascular, ValueKind::Numeric),
    general("pulse_rate", "脉率", "", "次/分", "60-100", Panel::Cardiovascular, ValueKind::Numeric),
    general("temperature", "体温", "", "℃", "36.3-37.2", Panel::Temperature, ValueKind::Numeric),
    general("left_vision", "左眼视力", "", "", "4.0-5.0", Panel::Vision, ValueKind::Numeric),
    general("right_vision", "右眼视力", "", "", "4.0-5.0", Panel::Vision, ValueKind::Numeric),
    general("corrected_left_vision", "左眼矫正视力", "", "", "4.0-5.0", Panel::Vision, ValueKind::Numeric),
    general("corrected_right_vision", "右眼矫正视力", "", "", "4.0-5.0", Panel::Vision, ValueKind::Numeric),
    general("left_hearing", "左耳听力", "", "Hz", "", Panel::Hearing, ValueKind::Numeric),
    general("right_hearing", "右耳听力", "", "Hz", "", Panel::Hearing, ValueKind::Numeric),
];
