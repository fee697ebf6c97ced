//! The school directory aggregate: every record the platform persists.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::{ConsultationRequest, FeeItem, LivingCostEntry, School, SchoolId};

pub const DIRECTORY_SCHEMA_VERSION: u32 = 1;

/// Read access to a school's fee schedule.
pub trait FeeSource {
    /// Fee items in display order; empty when the school is unknown.
    fn fee_items(&self, school_id: SchoolId) -> Vec<FeeItem>;
}

/// Read access to a city's living-cost table.
pub trait LivingCostSource {
    fn living_costs(&self, city: &str) -> Vec<LivingCostEntry>;
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Directory {
    pub name: String,
    #[serde(default = "Directory::schema_version_default")]
    pub schema_version: u32,
    #[serde(default)]
    pub schools: Vec<School>,
    #[serde(default)]
    pub living_costs: Vec<LivingCostEntry>,
    #[serde(default)]
    pub consultations: Vec<ConsultationRequest>,
    #[serde(default)]
    pub site_content: BTreeMap<String, serde_json::Value>,
    #[serde(default = "Directory::first_id")]
    pub next_school_id: SchoolId,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Directory {
    pub fn new(name: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            name: name.into(),
            schema_version: DIRECTORY_SCHEMA_VERSION,
            schools: Vec::new(),
            living_costs: Vec::new(),
            consultations: Vec::new(),
            site_content: BTreeMap::new(),
            next_school_id: Self::first_id(),
            created_at: now,
            updated_at: now,
        }
    }

    fn schema_version_default() -> u32 {
        DIRECTORY_SCHEMA_VERSION
    }

    fn first_id() -> SchoolId {
        1
    }

    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }

    /// Stores `school` under a freshly assigned id and returns that id.
    /// Slug uniqueness is checked by the admin service, not here.
    pub fn add_school(&mut self, mut school: School) -> SchoolId {
        let next = self
            .schools
            .iter()
            .map(|existing| existing.id + 1)
            .max()
            .unwrap_or(1)
            .max(self.next_school_id);
        school.id = next;
        self.next_school_id = next + 1;
        self.schools.push(school);
        self.touch();
        next
    }

    pub fn school(&self, id: SchoolId) -> Option<&School> {
        self.schools.iter().find(|school| school.id == id)
    }

    pub fn school_mut(&mut self, id: SchoolId) -> Option<&mut School> {
        self.schools.iter_mut().find(|school| school.id == id)
    }

    /// Looks up a school by slug regardless of publication state.
    pub fn school_by_slug(&self, slug: &str) -> Option<&School> {
        self.schools.iter().find(|school| school.slug == slug)
    }

    pub fn published_schools(&self) -> impl Iterator<Item = &School> {
        self.schools.iter().filter(|school| school.is_published)
    }

    /// Cities with at least one living-cost row, in first-seen order.
    pub fn cities(&self) -> Vec<String> {
        let mut cities: Vec<String> = Vec::new();
        for entry in &self.living_costs {
            if !cities.contains(&entry.city) {
                cities.push(entry.city.clone());
            }
        }
        cities
    }

    pub fn consultation(&self, id: Uuid) -> Option<&ConsultationRequest> {
        self.consultations.iter().find(|request| request.id == id)
    }

    pub fn consultation_mut(&mut self, id: Uuid) -> Option<&mut ConsultationRequest> {
        self.consultations.iter_mut().find(|request| request.id == id)
    }
}

impl FeeSource for Directory {
    fn fee_items(&self, school_id: SchoolId) -> Vec<FeeItem> {
        self.school(school_id)
            .map(School::fees_in_display_order)
            .unwrap_or_default()
    }
}

impl LivingCostSource for Directory {
    fn living_costs(&self, city: &str) -> Vec<LivingCostEntry> {
        self.living_costs
            .iter()
            .filter(|entry| entry.city == city)
            .cloned()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{FeePeriod, FeeType, LivingCostCategory, SchoolType};

    #[test]
    fn add_school_assigns_increasing_ids() {
        let mut directory = Directory::new("test");
        let first = directory.add_school(School::new("a", "A", "A", SchoolType::LanguageSchool));
        let second = directory.add_school(School::new("b", "B", "B", SchoolType::PrepSchool));
        assert_eq!(first, 1);
        assert_eq!(second, 2);
        assert_eq!(directory.school(2).map(|s| s.slug.as_str()), Some("b"));
    }

    #[test]
    fn fee_source_orders_by_display_order() {
        let mut directory = Directory::new("test");
        let id = directory.add_school(
            School::new("a", "A", "A", SchoolType::LanguageSchool).with_fees(vec![
                FeeItem::new(FeeType::Tuition, 1_000, FeePeriod::Annual).ordered(2),
                FeeItem::new(FeeType::Admission, 500, FeePeriod::OneTime).ordered(1),
            ]),
        );
        let fees = directory.fee_items(id);
        assert_eq!(fees[0].fee_type, FeeType::Admission);
        assert!(directory.fee_items(99).is_empty());
    }

    #[test]
    fn living_cost_source_filters_by_city() {
        let mut directory = Directory::new("test");
        directory.living_costs = vec![
            LivingCostEntry::new("东京", LivingCostCategory::Food, 1, 2, 3),
            LivingCostEntry::new("大阪", LivingCostCategory::Food, 4, 5, 6),
        ];
        let tokyo = directory.living_costs("东京");
        assert_eq!(tokyo.len(), 1);
        assert_eq!(tokyo[0].monthly_mid, 2);
        assert_eq!(directory.cities(), vec!["东京".to_string(), "大阪".to_string()]);
    }
}
