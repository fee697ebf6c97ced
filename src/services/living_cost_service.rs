use tracing::info;

use crate::directory::Directory;
use crate::domain::{Coded, LivingCostCategory, LivingCostEntry};
use crate::errors::{DirectoryError, Result};

pub struct LivingCostService;

impl LivingCostService {
    /// Inserts or replaces the row for `(entry.city, entry.category)`, so each
    /// city keeps at most one row per category.
    pub fn upsert(directory: &mut Directory, entry: LivingCostEntry) -> Result<()> {
        if entry.city.trim().is_empty() {
            return Err(DirectoryError::InvalidInput("city must not be empty".into()));
        }
        if entry.category == LivingCostCategory::Unrecognized {
            return Err(DirectoryError::InvalidInput(
                "living cost category is not recognized".into(),
            ));
        }
        if entry.monthly_low < 0 || entry.monthly_mid < 0 || entry.monthly_high < 0 {
            return Err(DirectoryError::InvalidInput(format!(
                "{} / {}: amounts must not be negative",
                entry.city,
                entry.category.label()
            )));
        }
        info!(city = %entry.city, category = entry.category.code(), "living cost upserted");
        let position = directory
            .living_costs
            .iter()
            .position(|existing| existing.city == entry.city && existing.category == entry.category);
        match position {
            Some(index) => directory.living_costs[index] = entry,
            None => directory.living_costs.push(entry),
        }
        directory.touch();
        Ok(())
    }

    pub fn remove(directory: &mut Directory, city: &str, category: LivingCostCategory) -> Result<()> {
        let before = directory.living_costs.len();
        directory
            .living_costs
            .retain(|entry| !(entry.city == city && entry.category == category));
        if directory.living_costs.len() == before {
            return Err(DirectoryError::InvalidInput(format!(
                "no {} row for {city}",
                category.label()
            )));
        }
        directory.touch();
        Ok(())
    }

    pub fn cities(directory: &Directory) -> Vec<String> {
        directory.cities()
    }

    /// The city's rows in category order.
    pub fn for_city<'a>(directory: &'a Directory, city: &str) -> Vec<&'a LivingCostEntry> {
        let order = |category: LivingCostCategory| {
            LivingCostCategory::all()
                .iter()
                .position(|candidate| *candidate == category)
                .unwrap_or(usize::MAX)
        };
        let mut rows: Vec<&LivingCostEntry> = directory
            .living_costs
            .iter()
            .filter(|entry| entry.city == city)
            .collect();
        rows.sort_by_key(|entry| order(entry.category));
        rows
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn upsert_replaces_existing_pair() {
        let mut directory = Directory::new("test");
        let first = LivingCostEntry::new("札幌", LivingCostCategory::Food, 1, 2, 3);
        let second = LivingCostEntry::new("札幌", LivingCostCategory::Food, 10, 20, 30);
        LivingCostService::upsert(&mut directory, first).unwrap();
        LivingCostService::upsert(&mut directory, second).unwrap();
        assert_eq!(directory.living_costs.len(), 1);
        assert_eq!(directory.living_costs[0].monthly_mid, 20);
    }

    #[test]
    fn rows_come_back_in_category_order() {
        let mut directory = Directory::new("test");
        for category in [LivingCostCategory::Entertainment, LivingCostCategory::HousingDormitory] {
            LivingCostService::upsert(&mut directory, LivingCostEntry::new("京都", category, 1, 1, 1))
                .unwrap();
        }
        let rows = LivingCostService::for_city(&directory, "京都");
        assert_eq!(rows[0].category, LivingCostCategory::HousingDormitory);
        assert!(LivingCostService::remove(&mut directory, "京都", LivingCostCategory::Food).is_err());
    }
}
