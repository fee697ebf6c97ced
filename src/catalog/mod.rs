//! Public-facing school listings: filtering, sorting, paging, and search.
//!
//! Everything here reads only published schools.

pub mod compare;
pub mod fees;

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::directory::Directory;
use crate::domain::common::{coded_text, Coded};
use crate::domain::{School, SchoolSummary, SchoolType};

pub use compare::{
    commission_disclosure, comparison_table, AddOutcome, ComparisonRow, ComparisonSet,
    ComparisonTable, MAX_COMPARE,
};
pub use fees::{fee_table, first_year_total, FeeRow, FeeTable};

pub const DEFAULT_PAGE_SIZE: usize = 12;
pub const FEATURED_LIMIT: usize = 6;
pub const QUICK_SEARCH_LIMIT: usize = 10;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum SortOrder {
    #[default]
    Newest,
    FeeLow,
    FeeHigh,
    Rating,
}

impl Coded for SortOrder {
    const KIND: &'static str = "sort order";

    fn all() -> &'static [Self] {
        &[
            SortOrder::Newest,
            SortOrder::FeeLow,
            SortOrder::FeeHigh,
            SortOrder::Rating,
        ]
    }

    fn code(&self) -> &'static str {
        match self {
            SortOrder::Newest => "newest",
            SortOrder::FeeLow => "fee_low",
            SortOrder::FeeHigh => "fee_high",
            SortOrder::Rating => "rating",
        }
    }

    fn label(&self) -> &'static str {
        match self {
            SortOrder::Newest => "最新",
            SortOrder::FeeLow => "学费从低到高",
            SortOrder::FeeHigh => "学费从高到低",
            SortOrder::Rating => "升学率",
        }
    }
}

coded_text!(SortOrder);

/// Listing criteria. `None` means "all" for every filter.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SchoolFilters {
    pub school_type: Option<SchoolType>,
    pub prefecture: Option<String>,
    pub search: Option<String>,
    pub tag: Option<String>,
    pub sort: SortOrder,
    pub page: usize,
    pub page_size: usize,
}

impl Default for SchoolFilters {
    fn default() -> Self {
        Self {
            school_type: None,
            prefecture: None,
            search: None,
            tag: None,
            sort: SortOrder::default(),
            page: 1,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl SchoolFilters {
    /// Accepts the literal `all` (or blank) as "no prefecture filter".
    pub fn with_prefecture(mut self, prefecture: &str) -> Self {
        self.prefecture = normalize_choice(prefecture);
        self
    }

    pub fn with_search(mut self, query: &str) -> Self {
        let query = query.trim();
        self.search = (!query.is_empty()).then(|| query.to_string());
        self
    }

    pub fn with_tag(mut self, tag: &str) -> Self {
        self.tag = normalize_choice(tag);
        self
    }

    fn matches(&self, school: &School) -> bool {
        if self.school_type.is_some_and(|kind| kind != school.school_type) {
            return false;
        }
        if let Some(prefecture) = &self.prefecture {
            if school.prefecture.as_deref() != Some(prefecture.as_str()) {
                return false;
            }
        }
        if let Some(tag) = &self.tag {
            if !school.tags.iter().any(|existing| existing == tag) {
                return false;
            }
        }
        match &self.search {
            Some(query) => {
                let needle = query.to_lowercase();
                [
                    Some(school.name_zh.as_str()),
                    Some(school.name_ja.as_str()),
                    school.description_zh.as_deref(),
                ]
                .into_iter()
                .flatten()
                .any(|field| field.to_lowercase().contains(&needle))
            }
            None => true,
        }
    }
}

fn normalize_choice(raw: &str) -> Option<String> {
    let raw = raw.trim();
    if raw.is_empty() || raw.eq_ignore_ascii_case("all") {
        None
    } else {
        Some(raw.to_string())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SchoolPage {
    pub schools: Vec<School>,
    pub total: usize,
    pub page: usize,
    pub page_size: usize,
    pub total_pages: usize,
}

/// Filters, sorts, and pages the published schools.
pub fn list_schools(directory: &Directory, filters: &SchoolFilters) -> SchoolPage {
    let page_size = filters.page_size.max(1);
    let page = filters.page.max(1);

    let mut matching: Vec<&School> = directory
        .published_schools()
        .filter(|school| filters.matches(school))
        .collect();
    sort_schools(&mut matching, filters.sort);

    let total = matching.len();
    let total_pages = total.div_ceil(page_size);
    let schools = matching
        .into_iter()
        .skip((page - 1).saturating_mul(page_size))
        .take(page_size)
        .cloned()
        .collect();
    debug!(total, page, sort = filters.sort.code(), "school listing");

    SchoolPage {
        schools,
        total,
        page,
        page_size,
        total_pages,
    }
}

fn sort_schools(schools: &mut [&School], order: SortOrder) {
    match order {
        SortOrder::Newest => schools.sort_by(|a, b| newest_first(a, b)),
        SortOrder::FeeLow => schools.sort_by(|a, b| {
            first_year_total(&a.fees)
                .cmp(&first_year_total(&b.fees))
                .then_with(|| newest_first(a, b))
        }),
        SortOrder::FeeHigh => schools.sort_by(|a, b| {
            first_year_total(&b.fees)
                .cmp(&first_year_total(&a.fees))
                .then_with(|| newest_first(a, b))
        }),
        SortOrder::Rating => schools.sort_by(|a, b| {
            match (a.university_acceptance_rate, b.university_acceptance_rate) {
                (Some(x), Some(y)) => y.partial_cmp(&x).unwrap_or(Ordering::Equal),
                (Some(_), None) => Ordering::Less,
                (None, Some(_)) => Ordering::Greater,
                (None, None) => Ordering::Equal,
            }
            .then_with(|| newest_first(a, b))
        }),
    }
}

fn newest_first(a: &School, b: &School) -> Ordering {
    b.created_at.cmp(&a.created_at).then_with(|| b.id.cmp(&a.id))
}

/// A published school with fees and media in display order.
pub fn find_by_slug(directory: &Directory, slug: &str) -> Option<School> {
    let school = directory
        .published_schools()
        .find(|school| school.slug == slug)?;
    let mut school = school.clone();
    school.fees.sort_by_key(|fee| fee.display_order);
    school.media.sort_by_key(|media| media.display_order);
    Some(school)
}

/// Published schools for the given slugs, in request order; unknown slugs
/// are skipped.
pub fn by_slugs(directory: &Directory, slugs: &[String]) -> Vec<School> {
    slugs
        .iter()
        .filter_map(|slug| find_by_slug(directory, slug))
        .collect()
}

pub fn featured(directory: &Directory) -> Vec<School> {
    let mut schools: Vec<&School> = directory
        .published_schools()
        .filter(|school| school.is_featured)
        .collect();
    sort_schools(&mut schools, SortOrder::Newest);
    schools.into_iter().take(FEATURED_LIMIT).cloned().collect()
}

/// Header search box: names, description, prefecture, and city.
pub fn quick_search(directory: &Directory, query: &str) -> Vec<SchoolSummary> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return Vec::new();
    }
    directory
        .published_schools()
        .filter(|school| {
            [
                Some(school.name_zh.as_str()),
                Some(school.name_ja.as_str()),
                school.description_zh.as_deref(),
                school.prefecture.as_deref(),
                school.city.as_deref(),
            ]
            .into_iter()
            .flatten()
            .any(|field| field.to_lowercase().contains(&needle))
        })
        .take(QUICK_SEARCH_LIMIT)
        .map(School::summary)
        .collect()
}

pub fn published_summaries(directory: &Directory) -> Vec<SchoolSummary> {
    directory.published_schools().map(School::summary).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{FeeItem, FeePeriod, FeeType};

    fn directory() -> Directory {
        let mut directory = Directory::new("test");
        let mut cheap = School::new("cheap", "安い学院", "平价学院", SchoolType::LanguageSchool)
            .located("大阪府", "大阪")
            .with_fees(vec![FeeItem::new(FeeType::Tuition, 600_000, FeePeriod::Annual)])
            .published();
        cheap.university_acceptance_rate = Some(0.4);
        cheap.tags = vec!["升学".into()];
        let pricey = School::new("pricey", "高い学院", "高端学院", SchoolType::PrepSchool)
            .located("东京都", "东京")
            .with_fees(vec![FeeItem::new(FeeType::Tuition, 100_000, FeePeriod::Monthly)])
            .published()
            .featured();
        let hidden = School::new("hidden", "隠れ", "隐藏", SchoolType::LanguageSchool);
        directory.add_school(cheap);
        directory.add_school(pricey);
        directory.add_school(hidden);
        directory
    }

    #[test]
    fn listing_excludes_unpublished() {
        let page = list_schools(&directory(), &SchoolFilters::default());
        assert_eq!(page.total, 2);
        assert!(page.schools.iter().all(|school| school.slug != "hidden"));
    }

    #[test]
    fn fee_sorts_use_first_year_total() {
        let mut filters = SchoolFilters {
            sort: SortOrder::FeeLow,
            ..SchoolFilters::default()
        };
        let slugs = |page: SchoolPage| page.schools.into_iter().map(|s| s.slug).collect::<Vec<_>>();
        assert_eq!(slugs(list_schools(&directory(), &filters)), ["cheap", "pricey"]);
        filters.sort = SortOrder::FeeHigh;
        assert_eq!(slugs(list_schools(&directory(), &filters)), ["pricey", "cheap"]);
        filters.sort = SortOrder::Rating;
        assert_eq!(slugs(list_schools(&directory(), &filters)), ["cheap", "pricey"]);
    }

    #[test]
    fn filters_combine() {
        let filters = SchoolFilters::default().with_prefecture("all").with_tag("升学");
        let page = list_schools(&directory(), &filters);
        assert_eq!(page.total, 1);
        let filters = SchoolFilters {
            school_type: Some(SchoolType::PrepSchool),
            ..SchoolFilters::default()
        }
        .with_search("高端");
        assert_eq!(list_schools(&directory(), &filters).schools[0].slug, "pricey");
    }

    #[test]
    fn paging_reports_totals() {
        let filters = SchoolFilters {
            page: 2,
            page_size: 1,
            ..SchoolFilters::default()
        };
        let page = list_schools(&directory(), &filters);
        assert_eq!(page.total_pages, 2);
        assert_eq!(page.schools.len(), 1);
    }

    #[test]
    fn quick_search_matches_city_and_ignores_blank() {
        let directory = directory();
        assert!(quick_search(&directory, "  ").is_empty());
        let hits = quick_search(&directory, "东京");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].slug, "pricey");
        assert!(quick_search(&directory, "隐藏").is_empty());
    }

    #[test]
    fn slug_lookup_hides_unpublished() {
        let directory = directory();
        assert!(find_by_slug(&directory, "hidden").is_none());
        let found = by_slugs(&directory, &["pricey".into(), "nope".into(), "cheap".into()]);
        assert_eq!(found.len(), 2);
        assert_eq!(found[0].slug, "pricey");
        assert_eq!(featured(&directory).len(), 1);
    }
}
