//! School fee line items and their billing cadence.

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::domain::common::{coded_text, Coded, Displayable};

/// Classification of a fee. Never affects totals.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum FeeType {
    Admission,
    Tuition,
    Textbook,
    Facility,
    Insurance,
    Exam,
    Other,
}

impl Coded for FeeType {
    const KIND: &'static str = "fee type";

    fn all() -> &'static [Self] {
        &[
            FeeType::Admission,
            FeeType::Tuition,
            FeeType::Textbook,
            FeeType::Facility,
            FeeType::Insurance,
            FeeType::Exam,
            FeeType::Other,
        ]
    }

    fn code(&self) -> &'static str {
        match self {
            FeeType::Admission => "admission",
            FeeType::Tuition => "tuition",
            FeeType::Textbook => "textbook",
            FeeType::Facility => "facility",
            FeeType::Insurance => "insurance",
            FeeType::Exam => "exam",
            FeeType::Other => "other",
        }
    }

    fn label(&self) -> &'static str {
        match self {
            FeeType::Admission => "入学金",
            FeeType::Tuition => "授业料",
            FeeType::Textbook => "教材费",
            FeeType::Facility => "设施费",
            FeeType::Insurance => "保险费",
            FeeType::Exam => "考试费",
            FeeType::Other => "其他",
        }
    }
}

coded_text!(FeeType);

/// Billing cadence of a fee.
///
/// Stored data may carry a period this build does not know about; such values
/// load as [`FeePeriod::Unrecognized`] instead of failing the whole record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FeePeriod {
    OneTime,
    Annual,
    SemiAnnual,
    Monthly,
    Unrecognized,
}

impl FeePeriod {
    /// Maps a storage code onto a period, falling back to `Unrecognized`.
    pub fn from_code_lenient(raw: &str) -> Self {
        Self::parse_code(raw).unwrap_or(FeePeriod::Unrecognized)
    }
}

impl Coded for FeePeriod {
    const KIND: &'static str = "fee period";

    fn all() -> &'static [Self] {
        &[
            FeePeriod::OneTime,
            FeePeriod::Annual,
            FeePeriod::SemiAnnual,
            FeePeriod::Monthly,
        ]
    }

    fn code(&self) -> &'static str {
        match self {
            FeePeriod::OneTime => "one_time",
            FeePeriod::Annual => "annual",
            FeePeriod::SemiAnnual => "semi_annual",
            FeePeriod::Monthly => "monthly",
            FeePeriod::Unrecognized => "unrecognized",
        }
    }

    fn label(&self) -> &'static str {
        match self {
            FeePeriod::OneTime => "一次性",
            FeePeriod::Annual => "年额",
            FeePeriod::SemiAnnual => "半年",
            FeePeriod::Monthly => "月额",
            FeePeriod::Unrecognized => "未知",
        }
    }
}

coded_text!(FeePeriod);

impl Serialize for FeePeriod {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.code())
    }
}

impl<'de> Deserialize<'de> for FeePeriod {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(FeePeriod::from_code_lenient(&raw))
    }
}

/// One charge a school levies, in whole yen.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FeeItem {
    pub fee_type: FeeType,
    pub name_zh: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name_ja: Option<String>,
    pub amount: i64,
    pub period: FeePeriod,
    #[serde(default = "default_required")]
    pub is_required: bool,
    #[serde(default)]
    pub display_order: i32,
}

fn default_required() -> bool {
    true
}

impl FeeItem {
    /// Creates a required fee named after its type label.
    pub fn new(fee_type: FeeType, amount: i64, period: FeePeriod) -> Self {
        Self {
            fee_type,
            name_zh: fee_type.label().to_string(),
            name_ja: None,
            amount,
            period,
            is_required: true,
            display_order: 0,
        }
    }

    pub fn named(mut self, name_zh: impl Into<String>, name_ja: Option<&str>) -> Self {
        self.name_zh = name_zh.into();
        self.name_ja = name_ja.map(str::to_string);
        self
    }

    pub fn optional(mut self) -> Self {
        self.is_required = false;
        self
    }

    pub fn ordered(mut self, display_order: i32) -> Self {
        self.display_order = display_order;
        self
    }
}

impl Displayable for FeeItem {
    fn display_label(&self) -> String {
        match &self.name_ja {
            Some(name_ja) if name_ja != &self.name_zh => format!("{} ({})", self.name_zh, name_ja),
            _ => self.name_zh.clone(),
        }
    }
}
