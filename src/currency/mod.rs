//! Currency codes, conversion, and display formatting for yen/yuan amounts.

use serde::{Deserialize, Serialize};

/// ISO 4217 currency representation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct CurrencyCode(pub String);

impl CurrencyCode {
    pub fn new(code: impl Into<String>) -> Self {
        Self(code.into().to_uppercase())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn jpy() -> Self {
        Self::new("JPY")
    }

    pub fn cny() -> Self {
        Self::new("CNY")
    }
}

impl Default for CurrencyCode {
    fn default() -> Self {
        Self::jpy()
    }
}

/// Digit grouping used when rendering amounts.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LocaleConfig {
    pub language_tag: String,
    pub grouping_separator: char,
}

impl Default for LocaleConfig {
    fn default() -> Self {
        Self {
            language_tag: "zh-CN".into(),
            grouping_separator: ',',
        }
    }
}

pub fn symbol_for(code: &str) -> String {
    match code {
        "JPY" | "CNY" => "¥".into(),
        "USD" => "$".into(),
        "EUR" => "€".into(),
        _ => code.into(),
    }
}

fn group_digits(digits: &str, separator: char) -> String {
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (idx, ch) in digits.chars().enumerate() {
        if idx != 0 && (digits.len() - idx) % 3 == 0 {
            grouped.push(separator);
        }
        grouped.push(ch);
    }
    grouped
}

/// Renders a whole-unit amount as symbol + grouped digits, e.g. `¥1,405,000`.
pub fn format_amount(amount: i64, code: &CurrencyCode, locale: &LocaleConfig) -> String {
    let sign = if amount < 0 { "-" } else { "" };
    let digits = group_digits(&amount.unsigned_abs().to_string(), locale.grouping_separator);
    format!("{sign}{}{digits}", symbol_for(code.as_str()))
}

pub fn format_jpy(amount: i64) -> String {
    format_amount(amount, &CurrencyCode::jpy(), &LocaleConfig::default())
}

pub fn format_cny(amount: i64) -> String {
    format_amount(amount, &CurrencyCode::cny(), &LocaleConfig::default())
}

/// Converts yen to yuan at `rate`, rounded to the nearest yuan.
pub fn jpy_to_cny(jpy_amount: i64, rate: f64) -> i64 {
    (jpy_amount as f64 * rate).round() as i64
}

/// Yen per one yuan, rounded, as shown next to converted totals.
pub fn yen_per_unit(rate: f64) -> i64 {
    if rate.abs() < f64::EPSILON {
        0
    } else {
        (1.0 / rate).round() as i64
    }
}

/// Ratio (0.385) → "38.5%"; missing → "—".
pub fn format_percentage(value: Option<f64>) -> String {
    match value {
        Some(ratio) => format!("{:.1}%", ratio * 100.0),
        None => "—".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::estimator::DEFAULT_EXCHANGE_RATE;

    #[test]
    fn groups_thousands() {
        assert_eq!(format_jpy(0), "¥0");
        assert_eq!(format_jpy(999), "¥999");
        assert_eq!(format_jpy(1_000), "¥1,000");
        assert_eq!(format_jpy(2_545_000), "¥2,545,000");
        assert_eq!(format_jpy(-55_000), "-¥55,000");
    }

    #[test]
    fn converts_and_formats_yuan() {
        assert_eq!(jpy_to_cny(2_545_000, DEFAULT_EXCHANGE_RATE), 122_160);
        assert_eq!(format_cny(122_160), "¥122,160");
        assert_eq!(yen_per_unit(0.048), 21);
    }

    #[test]
    fn percentage_has_one_decimal() {
        assert_eq!(format_percentage(Some(0.385)), "38.5%");
        assert_eq!(format_percentage(Some(0.8)), "80.0%");
        assert_eq!(format_percentage(None), "—");
    }
}
