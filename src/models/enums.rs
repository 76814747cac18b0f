use serde::{Deserialize, Serialize};

use super::ModelError;

/// Macro to generate enum with as_str + std::str::FromStr pattern
macro_rules! str_enum {
    ($name:ident { $($variant:ident => $s:literal),+ $(,)? }) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(rename_all = "snake_case")]
        pub enum $name {
            $($variant),+
        }

        impl $name {
            pub fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $s),+
                }
            }
        }

        impl std::str::FromStr for $name {
            type Err = ModelError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($s => Ok(Self::$variant)),+,
                    _ => Err(ModelError::InvalidEnum {
                        field: stringify!($name).into(),
                        value: s.into(),
                    }),
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

str_enum!(MetricCategory {
    General => "general",
    Blood => "blood",
    Urine => "urine",
    Other => "other",
});

str_enum!(ReportSource {
    Scan => "scan",
    Pdf => "pdf",
});

str_enum!(Hint {
    High => "high",
    Low => "low",
    Normal => "normal",
});

str_enum!(Panel {
    BodyMeasurement => "body_measurement",
    Cardiovascular => "cardiovascular",
    Temperature => "temperature",
    Vision => "vision",
    Hearing => "hearing",
    RedBloodCell => "red_blood_cell",
    WhiteBloodCell => "white_blood_cell",
    Platelet => "platelet",
    UrineChemistry => "urine_chemistry",
    UrinePhysical => "urine_physical",
});

impl MetricCategory {
    /// Section title shown on report cards.
    pub fn label(&self) -> &'static str {
        match self {
            Self::General => "一般检查",
            Self::Blood => "血常规",
            Self::Urine => "尿常规",
            Self::Other => "其他",
        }
    }
}

impl ReportSource {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Scan => "扫描",
            Self::Pdf => "PDF",
        }
    }
}

impl Panel {
    pub fn label(&self) -> &'static str {
        match self {
            Self::BodyMeasurement => "身体测量",
            Self::Cardiovascular => "心血管",
            Self::Temperature => "体温",
            Self::Vision => "视力",
            Self::Hearing => "听力",
            Self::RedBloodCell => "红细胞系统",
            Self::WhiteBloodCell => "白细胞系统",
            Self::Platelet => "血小板系统",
            Self::UrineChemistry => "尿液化学",
            Self::UrinePhysical => "尿液理学",
        }
    }
}

impl Hint {
    /// Wording used in composed report text.
    pub fn label(&self) -> &'static str {
        match self {
            Self::High => "偏高",
            Self::Low => "偏低",
            Self::Normal => "正常",
        }
    }

    /// Interpret a hint annotation as printed on a report.
    ///
    /// Accepts the Chinese wording, arrow markers, single-letter lab flags and
    /// English words. Returns `None` for anything else.
    pub fn from_text(text: &str) -> Option<Self> {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return None;
        }

        let lower = trimmed.to_lowercase();
        match lower.as_str() {
            "h" | "↑" | "high" | "高" => return Some(Self::High),
            "l" | "↓" | "low" | "低" => return Some(Self::Low),
            "n" | "normal" => return Some(Self::Normal),
            _ => {}
        }

        if trimmed.contains("偏高") || trimmed.contains('↑') || lower.starts_with("high") {
            Some(Self::High)
        } else if trimmed.contains("偏低") || trimmed.contains('↓') || lower.starts_with("low") {
            Some(Self::Low)
        } else if trimmed.contains("正常") || lower.starts_with("normal") {
            Some(Self::Normal)
        } else {
            None
        }
    }

    pub fn is_abnormal(&self) -> bool {
        matches!(self, Self::High | Self::Low)
    }
}
