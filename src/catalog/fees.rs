use serde::{Deserialize, Serialize};

use crate::currency::format_jpy;
use crate::domain::{Coded, Displayable, FeeItem, FeePeriod};

/// First-year cost of a fee schedule: one-time and annual amounts once,
/// semi-annual twice, monthly twelve times. Unrecognized periods count zero.
pub fn first_year_total(fees: &[FeeItem]) -> i64 {
    fees.iter().fold(0_i64, |total, fee| {
        let yearly = match fee.period {
            FeePeriod::OneTime | FeePeriod::Annual => fee.amount,
            FeePeriod::SemiAnnual => fee.amount.saturating_mul(2),
            FeePeriod::Monthly => fee.amount.saturating_mul(12),
            FeePeriod::Unrecognized => 0,
        };
        total.saturating_add(yearly)
    })
}

/// One line of a school's fee table.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FeeRow {
    pub name: String,
    pub period: String,
    pub amount: String,
    pub required: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FeeTable {
    pub rows: Vec<FeeRow>,
    pub first_year_total: i64,
}

impl FeeTable {
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Builds the display table for `fees`, sorted by display order.
pub fn fee_table(fees: &[FeeItem]) -> FeeTable {
    let mut ordered: Vec<&FeeItem> = fees.iter().collect();
    ordered.sort_by_key(|fee| fee.display_order);
    let rows = ordered
        .into_iter()
        .map(|fee| FeeRow {
            name: fee.display_label(),
            period: fee.period.label().to_string(),
            amount: format_jpy(fee.amount),
            required: fee.is_required,
        })
        .collect();
    FeeTable {
        rows,
        first_year_total: first_year_total(fees),
    }
}
