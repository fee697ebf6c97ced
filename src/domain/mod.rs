//! Directory domain models shared by the estimator, catalog, and services.

pub mod common;
pub mod consultation;
pub mod fee;
pub mod living_cost;
pub mod school;

pub use common::{Coded, Displayable, NamedEntity, ParseCodeError};
pub use consultation::{ConsultationForm, ConsultationRequest, ConsultationStatus, FormError};
pub use fee::{FeeItem, FeePeriod, FeeType};
pub use living_cost::{
    HousingType, LifestyleTier, LivingCostCategory, LivingCostEntry, NON_HOUSING_CATEGORIES,
};
pub use school::{
    Course, Media, MediaType, ScheduleType, School, SchoolId, SchoolSummary, SchoolType,
};
