use thiserror::Error;

/// Provides access to a human-friendly entity name.
pub trait NamedEntity {
    fn name(&self) -> &str;
}

/// Supplies a presentation-ready label for UI or logs.
pub trait Displayable {
    fn display_label(&self) -> String;
}

/// Closed vocabularies (fee types, periods, categories) that carry a fixed
/// storage code and a Chinese display label.
pub trait Coded: Sized + Copy + 'static {
    const KIND: &'static str;

    fn all() -> &'static [Self];
    fn code(&self) -> &'static str;
    fn label(&self) -> &'static str;

    /// Parses a storage code, case-insensitively, also accepting `-` for `_`.
    fn parse_code(raw: &str) -> Result<Self, ParseCodeError> {
        let normalized = raw.trim().to_ascii_lowercase().replace('-', "_");
        Self::all()
            .iter()
            .copied()
            .find(|value| value.code() == normalized)
            .ok_or_else(|| ParseCodeError {
                kind: Self::KIND,
                value: raw.to_string(),
                expected: Self::all().iter().map(|value| value.code()).collect(),
            })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown {kind} `{value}` (expected one of: {})", .expected.join(", "))]
pub struct ParseCodeError {
    pub kind: &'static str,
    pub value: String,
    pub expected: Vec<&'static str>,
}

/// Implements `FromStr` and `Display` for a [`Coded`] enum.
macro_rules! coded_text {
    ($ty:ty) => {
        impl std::str::FromStr for $ty {
            type Err = $crate::domain::common::ParseCodeError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                <$ty as $crate::domain::common::Coded>::parse_code(s)
            }
        }

        impl std::fmt::Display for $ty {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str($crate::domain::common::Coded::code(self))
            }
        }
    };
}

pub(crate) use coded_text;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::living_cost::LifestyleTier;

    #[test]
    fn parse_code_accepts_dashes_and_case() {
        assert_eq!(LifestyleTier::parse_code(" HIGH ").unwrap(), LifestyleTier::High);
        let err = LifestyleTier::parse_code("luxury").unwrap_err();
        assert_eq!(err.kind, "lifestyle tier");
        assert!(err.to_string().contains("low, mid, high"));
    }
}
