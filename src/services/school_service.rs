use tracing::{debug, info};

use crate::directory::Directory;
use crate::domain::{FeeItem, FeePeriod, School, SchoolId};
use crate::errors::{DirectoryError, Result};

/// Back-office school management.
pub struct SchoolService;

impl SchoolService {
    pub fn add(directory: &mut Directory, school: School) -> Result<SchoolId> {
        Self::validate(directory, None, &school)?;
        let slug = school.slug.clone();
        let id = directory.add_school(school);
        info!(id, %slug, "school added");
        Ok(id)
    }

    pub fn get(directory: &Directory, id: SchoolId) -> Result<&School> {
        directory
            .school(id)
            .ok_or_else(|| DirectoryError::SchoolNotFound(id.to_string()))
    }

    /// Resolves a slug to an id regardless of publication state.
    pub fn id_for_slug(directory: &Directory, slug: &str) -> Result<SchoolId> {
        directory
            .school_by_slug(slug)
            .map(|school| school.id)
            .ok_or_else(|| {
                debug!(slug, "school slug lookup missed");
                DirectoryError::SchoolNotFound(slug.to_string())
            })
    }

    /// Replaces every editable attribute. The id and creation time are kept
    /// and the update time is bumped.
    pub fn edit(directory: &mut Directory, id: SchoolId, changes: School) -> Result<()> {
        Self::validate(directory, Some(id), &changes)?;
        let school = directory
            .school_mut(id)
            .ok_or_else(|| DirectoryError::SchoolNotFound(id.to_string()))?;
        let created_at = school.created_at;
        *school = School {
            id,
            created_at,
            ..changes
        };
        school.touch();
        info!(id, slug = %school.slug, "school updated");
        directory.touch();
        Ok(())
    }

    pub fn set_published(directory: &mut Directory, id: SchoolId, published: bool) -> Result<()> {
        let school = directory
            .school_mut(id)
            .ok_or_else(|| DirectoryError::SchoolNotFound(id.to_string()))?;
        school.is_published = published;
        school.touch();
        info!(id, published, "school publication changed");
        directory.touch();
        Ok(())
    }

    pub fn set_featured(directory: &mut Directory, id: SchoolId, featured: bool) -> Result<()> {
        let school = directory
            .school_mut(id)
            .ok_or_else(|| DirectoryError::SchoolNotFound(id.to_string()))?;
        school.is_featured = featured;
        school.touch();
        directory.touch();
        Ok(())
    }

    /// Swaps the whole fee schedule for `fees`.
    pub fn replace_fees(directory: &mut Directory, id: SchoolId, fees: Vec<FeeItem>) -> Result<()> {
        for fee in &fees {
            if fee.amount < 0 {
                return Err(DirectoryError::InvalidInput(format!(
                    "fee `{}` has a negative amount",
                    fee.name_zh
                )));
            }
            if fee.period == FeePeriod::Unrecognized {
                return Err(DirectoryError::InvalidInput(format!(
                    "fee `{}` has no recognized billing period",
                    fee.name_zh
                )));
            }
        }
        let school = directory
            .school_mut(id)
            .ok_or_else(|| DirectoryError::SchoolNotFound(id.to_string()))?;
        school.fees = fees;
        school.touch();
        info!(id, count = school.fees.len(), "fee schedule replaced");
        directory.touch();
        Ok(())
    }

    fn validate(directory: &Directory, exclude: Option<SchoolId>, school: &School) -> Result<()> {
        let slug = school.slug.trim();
        if slug.is_empty() {
            return Err(DirectoryError::InvalidInput("slug must not be empty".into()));
        }
        if !slug
            .chars()
            .all(|ch| ch.is_ascii_lowercase() || ch.is_ascii_digit() || ch == '-')
        {
            return Err(DirectoryError::InvalidInput(format!(
                "slug `{slug}` may only contain lowercase letters, digits and dashes"
            )));
        }
        if school.name_zh.trim().is_empty() || school.name_ja.trim().is_empty() {
            return Err(DirectoryError::InvalidInput(
                "school names must not be empty".into(),
            ));
        }
        let duplicate = directory
            .schools
            .iter()
            .any(|existing| existing.slug == slug && exclude.map_or(true, |id| existing.id != id));
        if duplicate {
            return Err(DirectoryError::InvalidInput(format!(
                "slug `{slug}` is already taken"
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{FeeType, SchoolType};

    fn directory_with_school() -> (Directory, SchoolId) {
        let mut directory = Directory::new("test");
        let id = SchoolService::add(
            &mut directory,
            School::new("tokyo-a", "東京A", "东京A", SchoolType::LanguageSchool),
        )
        .unwrap();
        (directory, id)
    }

    #[test]
    fn edit_keeps_identity_and_creation_time() {
        let (mut directory, id) = directory_with_school();
        let created_at = directory.school(id).unwrap().created_at;
        let mut changes = School::new("tokyo-a", "東京A校", "东京A校", SchoolType::PrepSchool);
        changes.id = 999;
        SchoolService::edit(&mut directory, id, changes).unwrap();
        let school = SchoolService::get(&directory, id).unwrap();
        assert_eq!(school.id, id);
        assert_eq!(school.created_at, created_at);
        assert_eq!(school.school_type, SchoolType::PrepSchool);
        assert!(school.updated_at >= created_at);
    }

    #[test]
    fn duplicate_slug_is_rejected() {
        let (mut directory, _) = directory_with_school();
        let clash = School::new("tokyo-a", "X", "X", SchoolType::LanguageSchool);
        assert!(matches!(
            SchoolService::add(&mut directory, clash),
            Err(DirectoryError::InvalidInput(_))
        ));
        let bad = School::new("Tokyo A", "X", "X", SchoolType::LanguageSchool);
        assert!(SchoolService::add(&mut directory, bad).is_err());
    }

    #[test]
    fn publish_and_replace_fees() {
        let (mut directory, id) = directory_with_school();
        SchoolService::set_published(&mut directory, id, true).unwrap();
        assert!(directory.school(id).unwrap().is_published);

        let negative = vec![FeeItem::new(FeeType::Tuition, -1, FeePeriod::Annual)];
        assert!(SchoolService::replace_fees(&mut directory, id, negative).is_err());
        let fees = vec![FeeItem::new(FeeType::Tuition, 800_000, FeePeriod::Annual)];
        SchoolService::replace_fees(&mut directory, id, fees).unwrap();
        assert_eq!(directory.school(id).unwrap().fees.len(), 1);
        assert!(matches!(
            SchoolService::set_published(&mut directory, 77, true),
            Err(DirectoryError::SchoolNotFound(_))
        ));
    }
}
