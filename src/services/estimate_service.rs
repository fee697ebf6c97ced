use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::directory::{Directory, FeeSource, LivingCostSource};
use crate::domain::{HousingType, LifestyleTier, SchoolSummary};
use crate::errors::{DirectoryError, Result};
use crate::estimator::{CalculationRequest, CalculationResult, CostEstimator};

/// What the calculator form submits.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct EstimateQuery {
    pub school_slug: String,
    pub city: String,
    pub housing_type: HousingType,
    pub lifestyle_tier: LifestyleTier,
    pub duration_months: i32,
}

impl EstimateQuery {
    pub fn new(school_slug: impl Into<String>, city: impl Into<String>) -> Self {
        Self {
            school_slug: school_slug.into(),
            city: city.into(),
            housing_type: HousingType::default(),
            lifestyle_tier: LifestyleTier::default(),
            duration_months: 12,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Estimate {
    pub school: SchoolSummary,
    pub city: String,
    pub housing_type: HousingType,
    pub lifestyle_tier: LifestyleTier,
    pub result: CalculationResult,
}

pub struct EstimateService;

impl EstimateService {
    /// Prices a stay at the published school identified by `query.school_slug`,
    /// using the living costs of `query.city`. Drafts are reported as missing.
    pub fn estimate(
        directory: &Directory,
        estimator: &CostEstimator,
        query: &EstimateQuery,
    ) -> Result<Estimate> {
        let school = directory
            .published_schools()
            .find(|school| school.slug == query.school_slug)
            .ok_or_else(|| DirectoryError::SchoolNotFound(query.school_slug.clone()))?;

        let living_costs = directory.living_costs(&query.city);
        if living_costs.is_empty() {
            warn!(city = %query.city, "no living cost data for city; living total will be zero");
        }

        let request = CalculationRequest::new(query.duration_months)
            .with_fees(directory.fee_items(school.id))
            .with_living_costs(living_costs)
            .housing(query.housing_type)
            .lifestyle(query.lifestyle_tier);
        let result = estimator.estimate(&request)?;

        info!(
            school = %school.slug,
            city = %query.city,
            months = query.duration_months,
            grand_total = result.grand_total,
            "estimate produced"
        );
        Ok(Estimate {
            school: school.summary(),
            city: query.city.clone(),
            housing_type: query.housing_type,
            lifestyle_tier: query.lifestyle_tier,
            result,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seed::sample_directory;
    use crate::services::SchoolService;

    #[test]
    fn unknown_school_is_reported() {
        let directory = sample_directory();
        let query = EstimateQuery::new("missing", "东京");
        let err = EstimateService::estimate(&directory, &CostEstimator::default(), &query)
            .unwrap_err();
        assert!(matches!(err, DirectoryError::SchoolNotFound(slug) if slug == "missing"));
    }

    #[test]
    fn unpublished_school_cannot_be_priced() {
        let mut directory = sample_directory();
        let id = SchoolService::id_for_slug(&directory, "osaka-ymca-international").unwrap();
        SchoolService::set_published(&mut directory, id, false).unwrap();

        let query = EstimateQuery::new("osaka-ymca-international", "大阪");
        let err = EstimateService::estimate(&directory, &CostEstimator::default(), &query)
            .unwrap_err();
        assert!(
            matches!(err, DirectoryError::SchoolNotFound(slug) if slug == "osaka-ymca-international")
        );

        SchoolService::set_published(&mut directory, id, true).unwrap();
        assert!(EstimateService::estimate(&directory, &CostEstimator::default(), &query).is_ok());
    }

    #[test]
    fn non_positive_duration_is_invalid_argument() {
        let directory = sample_directory();
        let mut query = EstimateQuery::new("isi-language-school-osaka", "大阪");
        query.duration_months = 0;
        let err = EstimateService::estimate(&directory, &CostEstimator::default(), &query)
            .unwrap_err();
        assert!(matches!(err, DirectoryError::InvalidArgument(_)));
    }

    #[test]
    fn osaka_dormitory_mid_year() {
        let directory = sample_directory();
        let query = EstimateQuery::new("osaka-ymca-international", "大阪");
        let estimate =
            EstimateService::estimate(&directory, &CostEstimator::default(), &query).unwrap();
        // 50,000 one-time + (580,000 + 30,000 + 50,000 + 10,000) annual
        assert_eq!(estimate.result.tuition_total, 720_000);
        // 40,000 + 35,000 + 8,000 + 5,000 + 8,000 + 12,000 per month
        assert_eq!(estimate.result.monthly_living_total, 108_000);
        assert_eq!(estimate.result.living_total, 1_296_000);
        assert_eq!(estimate.result.grand_total, 2_016_000);
        assert_eq!(estimate.result.grand_total_secondary, 96_768);
    }
}
