use ryugaku_core::catalog::{
    self, by_slugs, comparison_table, featured, find_by_slug, first_year_total, list_schools,
    quick_search, ComparisonSet, SchoolFilters, SortOrder,
};
use ryugaku_core::domain::{School, SchoolType};
use ryugaku_core::seed::sample_directory;
use ryugaku_core::services::SchoolService;

fn slugs(schools: &[School]) -> Vec<&str> {
    schools.iter().map(|school| school.slug.as_str()).collect()
}

#[test]
fn fee_sort_orders_by_first_year_total() {
    let directory = sample_directory();
    let filters = SchoolFilters {
        sort: SortOrder::FeeLow,
        ..SchoolFilters::default()
    };
    let page = list_schools(&directory, &filters);
    assert_eq!(page.schools[0].slug, "osaka-ymca-international");
    let totals: Vec<i64> = page
        .schools
        .iter()
        .map(|school| first_year_total(&school.fees))
        .collect();
    assert!(totals.windows(2).all(|pair| pair[0] <= pair[1]));

    let high = list_schools(
        &directory,
        &SchoolFilters {
            sort: SortOrder::FeeHigh,
            ..SchoolFilters::default()
        },
    );
    assert_eq!(high.schools.last().map(|s| s.slug.as_str()), Some("osaka-ymca-international"));
}

#[test]
fn rating_sort_puts_best_acceptance_first() {
    let directory = sample_directory();
    let filters = SchoolFilters {
        sort: "rating".parse().unwrap(),
        ..SchoolFilters::default()
    };
    let page = list_schools(&directory, &filters);
    assert_eq!(page.schools[0].slug, "elite-japanese-language");
    assert_eq!(page.schools.last().unwrap().slug, "asia-house-umikaze");
}

#[test]
fn prefecture_filter_and_paging() {
    let directory = sample_directory();
    let filters = SchoolFilters::default().with_prefecture("大阪府");
    let page = list_schools(&directory, &filters);
    assert_eq!(page.total, 2);

    let filters = SchoolFilters {
        page_size: 4,
        page: 2,
        ..SchoolFilters::default()
    };
    let page = list_schools(&directory, &filters);
    assert_eq!(page.total, 6);
    assert_eq!(page.total_pages, 2);
    assert_eq!(page.schools.len(), 2);

    let beyond = list_schools(
        &directory,
        &SchoolFilters {
            page: 9,
            ..SchoolFilters::default()
        },
    );
    assert!(beyond.schools.is_empty());
    assert_eq!(beyond.total, 6);
}

#[test]
fn type_filter_excludes_other_types() {
    let directory = sample_directory();
    let filters = SchoolFilters {
        school_type: Some(SchoolType::PrepSchool),
        ..SchoolFilters::default()
    };
    assert_eq!(list_schools(&directory, &filters).total, 0);
}

#[test]
fn unpublishing_hides_a_school_everywhere() {
    let mut directory = sample_directory();
    let id = SchoolService::id_for_slug(&directory, "elite-japanese-language").unwrap();
    SchoolService::set_published(&mut directory, id, false).unwrap();

    assert!(find_by_slug(&directory, "elite-japanese-language").is_none());
    assert!(quick_search(&directory, "精英").is_empty());
    assert!(!slugs(&featured(&directory)).contains(&"elite-japanese-language"));
    assert_eq!(catalog::published_summaries(&directory).len(), 5);
}

#[test]
fn quick_search_matches_prefecture_and_is_capped() {
    let directory = sample_directory();
    let hits = quick_search(&directory, "大阪");
    let found: Vec<&str> = hits.iter().map(|hit| hit.slug.as_str()).collect();
    assert!(found.contains(&"isi-language-school-osaka"));
    assert!(found.contains(&"osaka-ymca-international"));
    assert!(hits.len() <= catalog::QUICK_SEARCH_LIMIT);
    assert!(quick_search(&directory, "").is_empty());
}

#[test]
fn featured_is_limited_and_published_only() {
    let directory = sample_directory();
    let featured = featured(&directory);
    assert!(!featured.is_empty());
    assert!(featured.len() <= catalog::FEATURED_LIMIT);
    assert!(featured.iter().all(|school| school.is_featured && school.is_published));
}

#[test]
fn comparison_follows_the_requested_order() {
    let directory = sample_directory();
    let set = ComparisonSet::parse("osaka-ymca-international,unknown,ecc-japanese-nagoya");
    assert_eq!(set.len(), 3);
    let schools = by_slugs(&directory, set.slugs());
    assert_eq!(slugs(&schools), ["osaka-ymca-international", "ecc-japanese-nagoya"]);

    let refs: Vec<&School> = schools.iter().collect();
    let table = comparison_table(&refs);
    assert_eq!(table.headers.len(), 2);
    let fee_row = table.rows.iter().find(|row| row.label == "首年学费").unwrap();
    assert_eq!(fee_row.values[0], "¥720,000");
    assert!(table.rows.iter().all(|row| row.values.len() == 2));
}
