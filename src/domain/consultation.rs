//! Consultation intake: what a prospective student submits and how the
//! back-office tracks it.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::domain::common::{coded_text, Coded};
use crate::domain::school::SchoolId;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum ConsultationStatus {
    #[default]
    Pending,
    Contacted,
    Completed,
}

impl Coded for ConsultationStatus {
    const KIND: &'static str = "consultation status";

    fn all() -> &'static [Self] {
        &[
            ConsultationStatus::Pending,
            ConsultationStatus::Contacted,
            ConsultationStatus::Completed,
        ]
    }

    fn code(&self) -> &'static str {
        match self {
            ConsultationStatus::Pending => "pending",
            ConsultationStatus::Contacted => "contacted",
            ConsultationStatus::Completed => "completed",
        }
    }

    fn label(&self) -> &'static str {
        match self {
            ConsultationStatus::Pending => "待处理",
            ConsultationStatus::Contacted => "已联系",
            ConsultationStatus::Completed => "已完成",
        }
    }
}

coded_text!(ConsultationStatus);

/// Raw form input. Blank strings count as "not provided".
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ConsultationForm {
    pub name: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub wechat_id: Option<String>,
    #[serde(default)]
    pub school_id: Option<SchoolId>,
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormError {
    #[error("请输入姓名")]
    MissingName,
    #[error("请输入有效的邮箱地址: {0}")]
    InvalidEmail(String),
}

impl ConsultationForm {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Checks the form without modifying it.
    pub fn validate(&self) -> Result<(), FormError> {
        if self.name.trim().is_empty() {
            return Err(FormError::MissingName);
        }
        if let Some(email) = non_blank(&self.email) {
            if !looks_like_email(&email) {
                return Err(FormError::InvalidEmail(email));
            }
        }
        Ok(())
    }

    /// Validates and converts into a new pending request.
    pub fn into_request(self) -> Result<ConsultationRequest, FormError> {
        self.validate()?;
        Ok(ConsultationRequest {
            id: Uuid::new_v4(),
            school_id: self.school_id.filter(|id| *id != 0),
            name: self.name.trim().to_string(),
            email: non_blank(&self.email),
            phone: non_blank(&self.phone),
            wechat_id: non_blank(&self.wechat_id),
            message: non_blank(&self.message),
            status: ConsultationStatus::Pending,
            admin_notes: None,
            created_at: Utc::now(),
        })
    }
}

fn non_blank(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|text| !text.is_empty())
        .map(str::to_string)
}

/// Structural check only: one `@`, a non-empty local part, and at least two
/// non-empty domain labels. Label characters are not inspected.
fn looks_like_email(candidate: &str) -> bool {
    if candidate.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = candidate.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }
    let labels: Vec<&str> = domain.split('.').collect();
    labels.len() >= 2 && labels.iter().all(|label| !label.is_empty())
}

/// A stored consultation request.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ConsultationRequest {
    pub id: Uuid,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub school_id: Option<SchoolId>,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wechat_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default)]
    pub status: ConsultationStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub admin_notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl ConsultationRequest {
    /// First eight hex digits of the id, used as a short reference.
    pub fn short_id(&self) -> String {
        self.id.simple().to_string()[..8].to_string()
    }

    /// Best available way to reach the requester.
    pub fn contact_line(&self) -> String {
        if let Some(email) = &self.email {
            return email.clone();
        }
        if let Some(phone) = &self.phone {
            return phone.clone();
        }
        match &self.wechat_id {
            Some(id) => format!("WeChat: {id}"),
            None => "—".to_string(),
        }
    }
}
