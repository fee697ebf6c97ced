//! School records as edited in the admin back-office and shown in listings.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::common::{coded_text, Coded, Displayable, NamedEntity};
use crate::domain::fee::FeeItem;

pub type SchoolId = u32;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum SchoolType {
    LanguageSchool,
    PrepSchool,
}

impl Coded for SchoolType {
    const KIND: &'static str = "school type";

    fn all() -> &'static [Self] {
        &[SchoolType::LanguageSchool, SchoolType::PrepSchool]
    }

    fn code(&self) -> &'static str {
        match self {
            SchoolType::LanguageSchool => "language_school",
            SchoolType::PrepSchool => "prep_school",
        }
    }

    fn label(&self) -> &'static str {
        match self {
            SchoolType::LanguageSchool => "语言学校",
            SchoolType::PrepSchool => "预备校",
        }
    }
}

coded_text!(SchoolType);

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ScheduleType {
    Morning,
    Afternoon,
    FullDay,
}

impl ScheduleType {
    pub fn label(self) -> &'static str {
        match self {
            ScheduleType::Morning => "上午班",
            ScheduleType::Afternoon => "下午班",
            ScheduleType::FullDay => "全天",
        }
    }
}

/// A course a school offers.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Course {
    pub name_zh: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration_months: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hours_per_week: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schedule_type: Option<ScheduleType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_level: Option<String>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum MediaType {
    #[default]
    Photo,
    Video,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Media {
    pub url: String,
    #[serde(default)]
    pub media_type: MediaType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub caption_zh: Option<String>,
    #[serde(default)]
    pub is_cover: bool,
    #[serde(default)]
    pub display_order: i32,
}

/// A school and everything attached to it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct School {
    /// Zero until the school is added to a directory.
    #[serde(default)]
    pub id: SchoolId,
    pub slug: String,
    pub name_ja: String,
    pub name_zh: String,
    pub school_type: SchoolType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description_zh: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub established_year: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prefecture: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address_ja: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nearest_station: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub walking_minutes: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub latitude: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub longitude: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_capacity: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chinese_ratio: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub class_size_avg: Option<u32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub jlpt_n1_pass_rate: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub jlpt_n2_pass_rate: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub university_acceptance_rate: Option<f64>,

    #[serde(default)]
    pub has_dormitory: bool,
    #[serde(default = "default_true")]
    pub has_visa_support: bool,
    #[serde(default)]
    pub has_part_time_support: bool,

    #[serde(default)]
    pub enrollment_periods: Vec<String>,
    #[serde(default)]
    pub course_durations: Vec<String>,
    #[serde(default)]
    pub tags: Vec<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub commission_rate: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub commission_amount: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub commission_notes: Option<String>,

    #[serde(default)]
    pub is_published: bool,
    #[serde(default)]
    pub is_featured: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cover_image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,

    #[serde(default)]
    pub fees: Vec<FeeItem>,
    #[serde(default)]
    pub courses: Vec<Course>,
    #[serde(default)]
    pub media: Vec<Media>,

    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,
    #[serde(default = "Utc::now")]
    pub updated_at: DateTime<Utc>,
}

fn default_true() -> bool {
    true
}

impl School {
    /// Creates an unpublished school with every optional attribute empty.
    /// The id is assigned when the school is added to a directory.
    pub fn new(
        slug: impl Into<String>,
        name_ja: impl Into<String>,
        name_zh: impl Into<String>,
        school_type: SchoolType,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: 0,
            slug: slug.into(),
            name_ja: name_ja.into(),
            name_zh: name_zh.into(),
            school_type,
            description_zh: None,
            established_year: None,
            prefecture: None,
            city: None,
            address_ja: None,
            nearest_station: None,
            walking_minutes: None,
            latitude: None,
            longitude: None,
            total_capacity: None,
            chinese_ratio: None,
            class_size_avg: None,
            jlpt_n1_pass_rate: None,
            jlpt_n2_pass_rate: None,
            university_acceptance_rate: None,
            has_dormitory: false,
            has_visa_support: true,
            has_part_time_support: false,
            enrollment_periods: Vec::new(),
            course_durations: Vec::new(),
            tags: Vec::new(),
            commission_rate: None,
            commission_amount: None,
            commission_notes: None,
            is_published: false,
            is_featured: false,
            cover_image: None,
            website: None,
            phone: None,
            email: None,
            fees: Vec::new(),
            courses: Vec::new(),
            media: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    pub fn located(mut self, prefecture: impl Into<String>, city: impl Into<String>) -> Self {
        self.prefecture = Some(prefecture.into());
        self.city = Some(city.into());
        self
    }

    pub fn with_fees(mut self, fees: Vec<FeeItem>) -> Self {
        self.fees = fees;
        self
    }

    pub fn published(mut self) -> Self {
        self.is_published = true;
        self
    }

    pub fn featured(mut self) -> Self {
        self.is_featured = true;
        self
    }

    /// Fees in presentation order. Sums never depend on this order.
    pub fn fees_in_display_order(&self) -> Vec<FeeItem> {
        let mut fees = self.fees.clone();
        fees.sort_by_key(|fee| fee.display_order);
        fees
    }

    /// "prefecture city", skipping whichever part is missing.
    pub fn region(&self) -> String {
        [self.prefecture.as_deref(), self.city.as_deref()]
            .into_iter()
            .flatten()
            .collect::<Vec<_>>()
            .join(" ")
    }

    pub fn has_commission(&self) -> bool {
        self.commission_amount.is_some_and(|amount| amount != 0)
            || self.commission_rate.is_some_and(|rate| rate != 0.0)
    }

    pub fn summary(&self) -> SchoolSummary {
        SchoolSummary {
            id: self.id,
            slug: self.slug.clone(),
            name_zh: self.name_zh.clone(),
        }
    }

    /// Sets `updated_at` to now.
    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

impl NamedEntity for School {
    fn name(&self) -> &str {
        &self.name_zh
    }
}

impl Displayable for School {
    fn display_label(&self) -> String {
        format!("{} ({})", self.name_zh, self.name_ja)
    }
}

/// Minimal projection used for sitemaps and selectors.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SchoolSummary {
    pub id: SchoolId,
    pub slug: String,
    pub name_zh: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn region_skips_missing_parts() {
        let school = School::new("a", "A校", "A校", SchoolType::LanguageSchool);
        assert_eq!(school.region(), "");
        let school = school.located("东京都", "东京");
        assert_eq!(school.region(), "东京都 东京");
    }

    #[test]
    fn commission_requires_non_zero_value() {
        let mut school = School::new("a", "A校", "A校", SchoolType::PrepSchool);
        assert!(!school.has_commission());
        school.commission_amount = Some(0);
        assert!(!school.has_commission());
        school.commission_rate = Some(0.12);
        assert!(school.has_commission());
    }
}
