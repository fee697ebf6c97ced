use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::directory::Directory;
use crate::domain::{ConsultationStatus, School};

/// Headline figures for the back-office landing view.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct DashboardCounts {
    /// Every school, drafts included.
    pub schools: usize,
    pub published_schools: usize,
    pub consultations: usize,
    pub pending_consultations: usize,
}

impl DashboardCounts {
    pub fn draft_schools(&self) -> usize {
        self.schools - self.published_schools
    }
}

pub struct DashboardService;

impl DashboardService {
    pub fn counts(directory: &Directory) -> DashboardCounts {
        let counts = DashboardCounts {
            schools: directory.schools.len(),
            published_schools: directory.published_schools().count(),
            consultations: directory.consultations.len(),
            pending_consultations: directory
                .consultations
                .iter()
                .filter(|request| request.status == ConsultationStatus::Pending)
                .count(),
        };
        debug!(?counts, "dashboard counts");
        counts
    }

    /// Every school regardless of publication state, newest first.
    pub fn all_schools(directory: &Directory) -> Vec<&School> {
        let mut schools: Vec<&School> = directory.schools.iter().collect();
        schools.sort_by(|a, b| b.created_at.cmp(&a.created_at).then_with(|| b.id.cmp(&a.id)));
        schools
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ConsultationForm, SchoolType};
    use crate::seed::sample_directory;
    use crate::services::{ConsultationService, SchoolService};

    fn form(name: &str) -> ConsultationForm {
        ConsultationForm {
            name: name.into(),
            ..ConsultationForm::default()
        }
    }

    #[test]
    fn counts_include_drafts_and_pending_requests() {
        let mut directory = sample_directory();
        let seeded = directory.schools.len();
        SchoolService::add(
            &mut directory,
            School::new("draft-school", "下書き学院", "草稿学院", SchoolType::LanguageSchool),
        )
        .unwrap();
        let first = ConsultationService::submit(&mut directory, form("王小明")).unwrap();
        ConsultationService::submit(&mut directory, form("李华")).unwrap();
        ConsultationService::update_status(
            &mut directory,
            first.id,
            ConsultationStatus::Contacted,
            None,
        )
        .unwrap();

        let counts = DashboardService::counts(&directory);
        assert_eq!(counts.schools, seeded + 1);
        assert_eq!(counts.published_schools, seeded);
        assert_eq!(counts.draft_schools(), 1);
        assert_eq!(counts.consultations, 2);
        assert_eq!(counts.pending_consultations, 1);
    }

    #[test]
    fn all_schools_lists_drafts_newest_first() {
        let mut directory = sample_directory();
        let id = SchoolService::add(
            &mut directory,
            School::new("draft-school", "下書き学院", "草稿学院", SchoolType::PrepSchool),
        )
        .unwrap();
        let schools = DashboardService::all_schools(&directory);
        assert_eq!(schools.len(), directory.schools.len());
        assert_eq!(schools[0].id, id);
        assert!(!schools[0].is_published);
    }
}
