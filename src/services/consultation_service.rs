use tracing::{debug, info};
use uuid::Uuid;

use crate::directory::Directory;
use crate::domain::{ConsultationForm, ConsultationRequest, ConsultationStatus};
use crate::errors::{DirectoryError, Result};

pub struct ConsultationService;

impl ConsultationService {
    /// Validates the form and stores a new pending request.
    pub fn submit(directory: &mut Directory, form: ConsultationForm) -> Result<ConsultationRequest> {
        let request = form.into_request()?;
        if let Some(school_id) = request.school_id {
            if directory.school(school_id).is_none() {
                return Err(DirectoryError::InvalidInput(format!(
                    "school {school_id} does not exist"
                )));
            }
        }
        info!(id = %request.short_id(), school = ?request.school_id, "consultation submitted");
        directory.consultations.push(request.clone());
        directory.touch();
        Ok(request)
    }

    /// All requests, newest first.
    pub fn list(directory: &Directory) -> Vec<&ConsultationRequest> {
        let mut requests: Vec<&ConsultationRequest> = directory.consultations.iter().collect();
        requests.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        requests
    }

    pub fn with_status(directory: &Directory, status: ConsultationStatus) -> Vec<&ConsultationRequest> {
        Self::list(directory)
            .into_iter()
            .filter(|request| request.status == status)
            .collect()
    }

    /// Resolves a full id or a unique prefix of its hex form.
    pub fn resolve(directory: &Directory, reference: &str) -> Result<Uuid> {
        let needle = reference.trim().to_ascii_lowercase().replace('-', "");
        if needle.is_empty() {
            return Err(DirectoryError::InvalidInput("consultation id is empty".into()));
        }
        let mut matches = directory
            .consultations
            .iter()
            .filter(|request| request.id.simple().to_string().starts_with(&needle));
        match (matches.next(), matches.next()) {
            (Some(request), None) => Ok(request.id),
            (None, _) => {
                debug!(reference, "consultation lookup missed");
                Err(DirectoryError::ConsultationNotFound(reference.to_string()))
            }
            (Some(_), Some(_)) => Err(DirectoryError::InvalidInput(format!(
                "consultation id `{reference}` is ambiguous"
            ))),
        }
    }

    pub fn get(directory: &Directory, id: Uuid) -> Result<&ConsultationRequest> {
        directory
            .consultation(id)
            .ok_or_else(|| DirectoryError::ConsultationNotFound(id.to_string()))
    }

    /// Sets the status; `notes`, when given, replace the admin notes.
    pub fn update_status(
        directory: &mut Directory,
        id: Uuid,
        status: ConsultationStatus,
        notes: Option<String>,
    ) -> Result<()> {
        let request = directory
            .consultation_mut(id)
            .ok_or_else(|| DirectoryError::ConsultationNotFound(id.to_string()))?;
        request.status = status;
        if let Some(notes) = notes {
            let notes = notes.trim();
            request.admin_notes = (!notes.is_empty()).then(|| notes.to_string());
        }
        info!(id = %request.short_id(), status = %status, "consultation status updated");
        directory.touch();
        Ok(())
    }
}
