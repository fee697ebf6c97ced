//! Side-by-side school comparison.

use serde::{Deserialize, Serialize};

use crate::catalog::fees::first_year_total;
use crate::currency::{format_jpy, format_percentage};
use crate::domain::{Coded, School};

pub const MAX_COMPARE: usize = 4;

const MISSING: &str = "—";

/// Why a slug could not be added to the comparison set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddOutcome {
    Added,
    AlreadyPresent,
    Full,
}

/// Ordered set of at most [`MAX_COMPARE`] school slugs.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ComparisonSet {
    slugs: Vec<String>,
}

impl ComparisonSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses the comma-separated `ids` form. Blank parts and duplicates are
    /// dropped and anything past the fourth slug is ignored.
    pub fn parse(raw: &str) -> Self {
        let mut set = Self::new();
        for slug in raw.split(',').map(str::trim).filter(|slug| !slug.is_empty()) {
            set.add(slug);
        }
        set
    }

    pub fn add(&mut self, slug: &str) -> AddOutcome {
        if self.contains(slug) {
            return AddOutcome::AlreadyPresent;
        }
        if self.is_full() {
            return AddOutcome::Full;
        }
        self.slugs.push(slug.to_string());
        AddOutcome::Added
    }

    pub fn remove(&mut self, slug: &str) -> bool {
        let before = self.slugs.len();
        self.slugs.retain(|existing| existing != slug);
        before != self.slugs.len()
    }

    pub fn clear(&mut self) {
        self.slugs.clear();
    }

    pub fn contains(&self, slug: &str) -> bool {
        self.slugs.iter().any(|existing| existing == slug)
    }

    pub fn is_full(&self) -> bool {
        self.slugs.len() >= MAX_COMPARE
    }

    pub fn is_empty(&self) -> bool {
        self.slugs.is_empty()
    }

    pub fn len(&self) -> usize {
        self.slugs.len()
    }

    pub fn slugs(&self) -> &[String] {
        &self.slugs
    }

    /// Renders back to the `a,b,c` form.
    pub fn to_query(&self) -> String {
        self.slugs.join(",")
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ComparisonRow {
    pub label: String,
    pub values: Vec<String>,
    pub highlight: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ComparisonTable {
    pub headers: Vec<String>,
    pub rows: Vec<ComparisonRow>,
}

fn row(
    label: &str,
    schools: &[&School],
    highlight: bool,
    cell: impl Fn(&School) -> String,
) -> ComparisonRow {
    ComparisonRow {
        label: label.to_string(),
        values: schools.iter().map(|school| cell(*school)).collect(),
        highlight,
    }
}

fn or_missing<T: ToString>(value: Option<T>) -> String {
    value.map_or_else(|| MISSING.to_string(), |value| value.to_string())
}

fn flag(value: bool) -> String {
    let text = if value { "有" } else { "无" };
    text.to_string()
}

/// Builds the comparison grid, one column per school in the given order.
pub fn comparison_table(schools: &[&School]) -> ComparisonTable {
    let headers = schools.iter().map(|school| school.name_zh.clone()).collect();
    let rows = vec![
        row("类型", schools, false, |s| s.school_type.label().to_string()),
        row("地区", schools, false, |s| {
            let region = s.region();
            if region.is_empty() {
                MISSING.to_string()
            } else {
                region
            }
        }),
        row("创立年份", schools, false, |s| or_missing(s.established_year)),
        row("总定员", schools, false, |s| or_missing(s.total_capacity)),
        row("班级人数", schools, false, |s| or_missing(s.class_size_avg)),
        row("中国学生比例", schools, false, |s| format_percentage(s.chinese_ratio)),
        row("N1合格率", schools, false, |s| format_percentage(s.jlpt_n1_pass_rate)),
        row("N2合格率", schools, false, |s| format_percentage(s.jlpt_n2_pass_rate)),
        row("升学率", schools, true, |s| format_percentage(s.university_acceptance_rate)),
        row("首年学费", schools, true, |s| {
            if s.fees.is_empty() {
                MISSING.to_string()
            } else {
                format_jpy(first_year_total(&s.fees))
            }
        }),
        row("佣金", schools, false, |s| {
            commission_disclosure(s).unwrap_or_else(|| MISSING.to_string())
        }),
        row("宿舍", schools, false, |s| flag(s.has_dormitory)),
        row("签证支持", schools, false, |s| flag(s.has_visa_support)),
        row("打工支持", schools, false, |s| flag(s.has_part_time_support)),
        row("入学时期", schools, false, |s| {
            if s.enrollment_periods.is_empty() {
                MISSING.to_string()
            } else {
                s.enrollment_periods.join("、")
            }
        }),
    ];
    ComparisonTable { headers, rows }
}

/// Describes the referral commission, or `None` when the school pays none.
pub fn commission_disclosure(school: &School) -> Option<String> {
    if !school.has_commission() {
        return None;
    }
    let mut parts = Vec::new();
    if let Some(amount) = school.commission_amount.filter(|amount| *amount != 0) {
        parts.push(format_jpy(amount));
    }
    if let Some(rate) = school.commission_rate.filter(|rate| *rate != 0.0) {
        parts.push(format_percentage(Some(rate)));
    }
    let mut text = parts.join(" / ");
    if let Some(notes) = school.commission_notes.as_deref().filter(|notes| !notes.is_empty()) {
        text.push_str(&format!(" ({notes})"));
    }
    Some(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{FeeItem, FeePeriod, FeeType, SchoolType};

    #[test]
    fn set_caps_at_four_and_rejects_duplicates() {
        let mut set = ComparisonSet::parse("a, b,,a,c");
        assert_eq!(set.to_query(), "a,b,c");
        assert_eq!(set.add("b"), AddOutcome::AlreadyPresent);
        assert_eq!(set.add("d"), AddOutcome::Added);
        assert_eq!(set.add("e"), AddOutcome::Full);
        assert!(set.remove("a"));
        assert!(!set.remove("a"));
        assert_eq!(set.slugs(), ["b", "c", "d"]);
    }

    #[test]
    fn table_marks_missing_values_and_flags() {
        let mut school = School::new("a", "A", "A校", SchoolType::LanguageSchool);
        school.has_dormitory = true;
        school.fees = vec![FeeItem::new(FeeType::Tuition, 700_000, FeePeriod::SemiAnnual)];
        let bare = School::new("b", "B", "B校", SchoolType::PrepSchool);

        let table = comparison_table(&[&school, &bare]);
        assert_eq!(table.headers, vec!["A校", "B校"]);
        let find = |label: &str| table.rows.iter().find(|row| row.label == label).unwrap();
        assert_eq!(find("地区").values, vec!["—", "—"]);
        assert_eq!(find("宿舍").values, vec!["有", "无"]);
        assert_eq!(find("首年学费").values, vec!["¥1,400,000", "—"]);
        assert!(find("首年学费").highlight);
    }

    #[test]
    fn commission_shown_only_when_present() {
        let mut school = School::new("a", "A", "A校", SchoolType::LanguageSchool);
        assert_eq!(commission_disclosure(&school), None);
        school.commission_amount = Some(50_000);
        school.commission_rate = Some(0.1);
        school.commission_notes = Some("首年".into());
        assert_eq!(
            commission_disclosure(&school).as_deref(),
            Some("¥50,000 / 10.0% (首年)")
        );
    }
}
