//! Monthly living-cost tiers per city and the choices that select among them.

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::domain::common::{coded_text, Coded};

/// Recurring monthly expense category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum LivingCostCategory {
    HousingDormitory,
    HousingApartment,
    Food,
    Transportation,
    PhoneInternet,
    DailyNecessities,
    Entertainment,
    Unrecognized,
}

/// Categories added on top of the housing row, in breakdown order.
pub const NON_HOUSING_CATEGORIES: [LivingCostCategory; 5] = [
    LivingCostCategory::Food,
    LivingCostCategory::Transportation,
    LivingCostCategory::PhoneInternet,
    LivingCostCategory::DailyNecessities,
    LivingCostCategory::Entertainment,
];

impl Coded for LivingCostCategory {
    const KIND: &'static str = "living cost category";

    fn all() -> &'static [Self] {
        &[
            LivingCostCategory::HousingDormitory,
            LivingCostCategory::HousingApartment,
            LivingCostCategory::Food,
            LivingCostCategory::Transportation,
            LivingCostCategory::PhoneInternet,
            LivingCostCategory::DailyNecessities,
            LivingCostCategory::Entertainment,
        ]
    }

    fn code(&self) -> &'static str {
        match self {
            LivingCostCategory::HousingDormitory => "housing_dormitory",
            LivingCostCategory::HousingApartment => "housing_apartment",
            LivingCostCategory::Food => "food",
            LivingCostCategory::Transportation => "transportation",
            LivingCostCategory::PhoneInternet => "phone_internet",
            LivingCostCategory::DailyNecessities => "daily_necessities",
            LivingCostCategory::Entertainment => "entertainment",
            LivingCostCategory::Unrecognized => "unrecognized",
        }
    }

    fn label(&self) -> &'static str {
        match self {
            LivingCostCategory::HousingDormitory => "住宿(宿舍)",
            LivingCostCategory::HousingApartment => "住宿(租房)",
            LivingCostCategory::Food => "饮食",
            LivingCostCategory::Transportation => "交通",
            LivingCostCategory::PhoneInternet => "通讯",
            LivingCostCategory::DailyNecessities => "日用品",
            LivingCostCategory::Entertainment => "娱乐",
            LivingCostCategory::Unrecognized => "其他",
        }
    }
}

coded_text!(LivingCostCategory);

impl Serialize for LivingCostCategory {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.code())
    }
}

impl<'de> Deserialize<'de> for LivingCostCategory {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(Self::parse_code(&raw).unwrap_or(LivingCostCategory::Unrecognized))
    }
}

/// Where the student plans to live.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "snake_case")]
pub enum HousingType {
    #[default]
    Dormitory,
    Apartment,
}

impl HousingType {
    /// The living-cost row that prices this housing choice.
    pub fn category(self) -> LivingCostCategory {
        match self {
            HousingType::Dormitory => LivingCostCategory::HousingDormitory,
            HousingType::Apartment => LivingCostCategory::HousingApartment,
        }
    }
}

impl Coded for HousingType {
    const KIND: &'static str = "housing type";

    fn all() -> &'static [Self] {
        &[HousingType::Dormitory, HousingType::Apartment]
    }

    fn code(&self) -> &'static str {
        match self {
            HousingType::Dormitory => "dormitory",
            HousingType::Apartment => "apartment",
        }
    }

    fn label(&self) -> &'static str {
        match self {
            HousingType::Dormitory => "学校宿舍",
            HousingType::Apartment => "租房",
        }
    }
}

coded_text!(HousingType);

/// Budget level applied uniformly across every category.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "snake_case")]
pub enum LifestyleTier {
    Low,
    #[default]
    Mid,
    High,
}

impl Coded for LifestyleTier {
    const KIND: &'static str = "lifestyle tier";

    fn all() -> &'static [Self] {
        &[LifestyleTier::Low, LifestyleTier::Mid, LifestyleTier::High]
    }

    fn code(&self) -> &'static str {
        match self {
            LifestyleTier::Low => "low",
            LifestyleTier::Mid => "mid",
            LifestyleTier::High => "high",
        }
    }

    fn label(&self) -> &'static str {
        match self {
            LifestyleTier::Low => "节省",
            LifestyleTier::Mid => "普通",
            LifestyleTier::High => "宽裕",
        }
    }
}

coded_text!(LifestyleTier);

/// One category of recurring monthly cost for a city.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LivingCostEntry {
    pub city: String,
    pub category: LivingCostCategory,
    pub monthly_low: i64,
    pub monthly_mid: i64,
    pub monthly_high: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes_zh: Option<String>,
}

impl LivingCostEntry {
    pub fn new(
        city: impl Into<String>,
        category: LivingCostCategory,
        monthly_low: i64,
        monthly_mid: i64,
        monthly_high: i64,
    ) -> Self {
        Self {
            city: city.into(),
            category,
            monthly_low,
            monthly_mid,
            monthly_high,
            notes_zh: None,
        }
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes_zh = Some(notes.into());
        self
    }

    /// Selects the monthly column for a lifestyle tier.
    pub fn monthly_for(&self, tier: LifestyleTier) -> i64 {
        match tier {
            LifestyleTier::Low => self.monthly_low,
            LifestyleTier::Mid => self.monthly_mid,
            LifestyleTier::High => self.monthly_high,
        }
    }

    /// True when the tiers follow the low ≤ mid ≤ high data convention.
    pub fn tiers_ordered(&self) -> bool {
        self.monthly_low <= self.monthly_mid && self.monthly_mid <= self.monthly_high
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn monthly_for_selects_matching_column() {
        let entry = LivingCostEntry::new("东京", LivingCostCategory::Food, 20_000, 35_000, 60_000);
        assert_eq!(entry.monthly_for(LifestyleTier::Low), 20_000);
        assert_eq!(entry.monthly_for(LifestyleTier::Mid), 35_000);
        assert_eq!(entry.monthly_for(LifestyleTier::High), 60_000);
        assert!(entry.tiers_ordered());
    }

    #[test]
    fn housing_type_maps_to_category_row() {
        assert_eq!(
            HousingType::Dormitory.category(),
            LivingCostCategory::HousingDormitory
        );
        assert_eq!(
            HousingType::Apartment.category(),
            LivingCostCategory::HousingApartment
        );
    }

    #[test]
    fn unknown_category_loads_as_unrecognized() {
        let json = r#"{"city":"东京","category":"pets","monthly_low":1,"monthly_mid":2,"monthly_high":3}"#;
        let entry: LivingCostEntry = serde_json::from_str(json).unwrap();
        assert_eq!(entry.category, LivingCostCategory::Unrecognized);
    }
}
