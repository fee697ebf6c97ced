//! Operations over a [`Directory`](crate::directory::Directory): the estimate
//! flow, consultation intake, and the admin back-office.

pub mod consultation_service;
pub mod content_service;
pub mod dashboard_service;
pub mod estimate_service;
pub mod living_cost_service;
pub mod school_service;

pub use consultation_service::ConsultationService;
pub use content_service::{ContentService, CONTENT_KEYS};
pub use dashboard_service::{DashboardCounts, DashboardService};
pub use estimate_service::{Estimate, EstimateQuery, EstimateService};
pub use living_cost_service::LivingCostService;
pub use school_service::SchoolService;
