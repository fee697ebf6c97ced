//! Total-cost estimation for a stay at one school in one city.
//!
//! The estimator is a pure computation: fee items are projected linearly over
//! the requested duration, the city's living-cost rows are priced at one
//! lifestyle tier, and the two are combined into a grand total in yen plus a
//! converted figure in the secondary currency.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::domain::{
    Coded, FeeItem, FeePeriod, HousingType, LifestyleTier, LivingCostCategory, LivingCostEntry,
    NON_HOUSING_CATEGORIES,
};

/// JPY → CNY rate used when no configured rate is supplied.
pub const DEFAULT_EXCHANGE_RATE: f64 = 0.048;

const MONTHS_PER_YEAR: i128 = 12;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EstimateError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

/// Everything one estimate needs. Both sequences must be fully materialized.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CalculationRequest {
    pub fee_items: Vec<FeeItem>,
    pub living_cost_entries: Vec<LivingCostEntry>,
    pub housing_type: HousingType,
    pub lifestyle_tier: LifestyleTier,
    pub duration_months: i32,
}

impl CalculationRequest {
    pub fn new(duration_months: i32) -> Self {
        Self {
            fee_items: Vec::new(),
            living_cost_entries: Vec::new(),
            housing_type: HousingType::default(),
            lifestyle_tier: LifestyleTier::default(),
            duration_months,
        }
    }

    pub fn with_fees(mut self, fee_items: Vec<FeeItem>) -> Self {
        self.fee_items = fee_items;
        self
    }

    pub fn with_living_costs(mut self, entries: Vec<LivingCostEntry>) -> Self {
        self.living_cost_entries = entries;
        self
    }

    pub fn housing(mut self, housing_type: HousingType) -> Self {
        self.housing_type = housing_type;
        self
    }

    pub fn lifestyle(mut self, tier: LifestyleTier) -> Self {
        self.lifestyle_tier = tier;
        self
    }
}

/// One row of the monthly living-cost breakdown.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct BreakdownItem {
    pub category: LivingCostCategory,
    pub label: String,
    pub monthly_amount: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CalculationResult {
    pub tuition_total: i64,
    pub living_total: i64,
    pub grand_total: i64,
    pub grand_total_secondary: i64,
    pub monthly_living_total: i64,
    pub duration_months: i32,
    pub monthly_breakdown: Vec<BreakdownItem>,
}

/// Estimator bound to a primary → secondary currency rate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CostEstimator {
    exchange_rate: f64,
}

impl Default for CostEstimator {
    fn default() -> Self {
        Self::new(DEFAULT_EXCHANGE_RATE)
    }
}

impl CostEstimator {
    pub fn new(exchange_rate: f64) -> Self {
        Self { exchange_rate }
    }

    pub fn exchange_rate(&self) -> f64 {
        self.exchange_rate
    }

    /// Produces a cost estimate.
    ///
    /// Returns [`EstimateError::InvalidArgument`] when `duration_months` is not
    /// positive; every other gap in the input (no fees, missing categories,
    /// unrecognized periods) contributes zero instead of failing.
    pub fn estimate(&self, request: &CalculationRequest) -> Result<CalculationResult, EstimateError> {
        let months = request.duration_months;
        if months <= 0 {
            return Err(EstimateError::InvalidArgument(format!(
                "duration must be a positive number of months, got {months}"
            )));
        }

        let tuition_total = project_tuition(&request.fee_items, months);
        let monthly_breakdown = living_breakdown(
            &request.living_cost_entries,
            request.housing_type,
            request.lifestyle_tier,
        );
        let monthly_living_total = monthly_breakdown
            .iter()
            .fold(0_i64, |sum, item| sum.saturating_add(item.monthly_amount));
        let living_total = saturate(i128::from(monthly_living_total) * i128::from(months));
        let grand_total = tuition_total.saturating_add(living_total);
        let grand_total_secondary = (grand_total as f64 * self.exchange_rate).round() as i64;

        debug!(
            months,
            tuition_total, living_total, grand_total, "cost estimate computed"
        );

        Ok(CalculationResult {
            tuition_total,
            living_total,
            grand_total,
            grand_total_secondary,
            monthly_living_total,
            duration_months: months,
            monthly_breakdown,
        })
    }
}

/// Estimates with [`DEFAULT_EXCHANGE_RATE`].
pub fn estimate(request: &CalculationRequest) -> Result<CalculationResult, EstimateError> {
    CostEstimator::default().estimate(request)
}

/// Sums every fee projected over `months`, rounding once at the end.
///
/// Contributions are accumulated exactly in twelfths of a yen so prorated
/// annual and semi-annual fees never pick up per-item rounding error.
pub fn project_tuition(fees: &[FeeItem], months: i32) -> i64 {
    let months = i128::from(months);
    let twelfths: i128 = fees.iter().map(|fee| fee_twelfths(fee, months)).sum();
    saturate(round_half_away(twelfths, MONTHS_PER_YEAR))
}

fn fee_twelfths(fee: &FeeItem, months: i128) -> i128 {
    let amount = i128::from(fee.amount);
    match fee.period {
        FeePeriod::OneTime => amount * MONTHS_PER_YEAR,
        FeePeriod::Annual => amount * months,
        FeePeriod::SemiAnnual => amount * months * 2,
        FeePeriod::Monthly => amount * months * MONTHS_PER_YEAR,
        FeePeriod::Unrecognized => {
            debug!(fee = %fee.name_zh, "skipping fee with unrecognized period");
            0
        }
    }
}

/// Housing row plus the five fixed categories, in breakdown order, priced at
/// `tier`. Categories without an entry are left out.
pub fn living_breakdown(
    entries: &[LivingCostEntry],
    housing: HousingType,
    tier: LifestyleTier,
) -> Vec<BreakdownItem> {
    std::iter::once(housing.category())
        .chain(NON_HOUSING_CATEGORIES)
        .filter_map(|category| {
            let Some(entry) = entries.iter().find(|entry| entry.category == category) else {
                debug!(category = category.code(), "no living cost entry for category");
                return None;
            };
            Some(BreakdownItem {
                category,
                label: category.label().to_string(),
                monthly_amount: entry.monthly_for(tier),
            })
        })
        .collect()
}

fn round_half_away(numerator: i128, denominator: i128) -> i128 {
    let quotient = numerator / denominator;
    let remainder = numerator % denominator;
    if remainder.abs() * 2 >= denominator {
        quotient + numerator.signum()
    } else {
        quotient
    }
}

fn saturate(value: i128) -> i64 {
    i64::try_from(value).unwrap_or(if value < 0 { i64::MIN } else { i64::MAX })
}
