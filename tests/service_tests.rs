use std::thread::sleep;
use std::time::Duration;

use ryugaku_core::directory::{Directory, FeeSource, LivingCostSource};
use ryugaku_core::domain::{
    ConsultationForm, ConsultationStatus, FeeItem, FeePeriod, FeeType, HousingType,
    LifestyleTier, LivingCostCategory, LivingCostEntry, School, SchoolType,
};
use ryugaku_core::errors::DirectoryError;
use ryugaku_core::estimator::CostEstimator;
use ryugaku_core::seed::sample_directory;
use ryugaku_core::services::{
    ConsultationService, ContentService, EstimateQuery, EstimateService, LivingCostService,
    SchoolService, CONTENT_KEYS,
};
use serde_json::json;

#[test]
fn estimate_uses_the_city_rows_only() {
    let directory = sample_directory();
    let mut query = EstimateQuery::new("aoyama-international-education", "东京");
    query.housing_type = HousingType::Apartment;
    query.lifestyle_tier = LifestyleTier::Low;
    query.duration_months = 6;

    let estimate = EstimateService::estimate(&directory, &CostEstimator::new(0.05), &query).unwrap();
    let result = &estimate.result;
    assert_eq!(estimate.school.slug, "aoyama-international-education");
    assert_eq!(result.monthly_breakdown.len(), 6);
    assert_eq!(
        result.monthly_breakdown[0].category,
        LivingCostCategory::HousingApartment
    );
    let monthly: i64 = result.monthly_breakdown.iter().map(|item| item.monthly_amount).sum();
    assert_eq!(result.monthly_living_total, monthly);
    assert_eq!(result.living_total, monthly * 6);
    assert_eq!(
        result.grand_total_secondary,
        (result.grand_total as f64 * 0.05).round() as i64
    );
}

#[test]
fn estimate_for_unknown_city_has_no_living_costs() {
    let directory = sample_directory();
    let query = EstimateQuery::new("osaka-ymca-international", "札幌");
    let estimate = EstimateService::estimate(&directory, &CostEstimator::default(), &query).unwrap();
    assert_eq!(estimate.result.living_total, 0);
    assert_eq!(estimate.result.tuition_total, 720_000);
}

#[test]
fn estimate_for_unknown_school_fails() {
    let directory = sample_directory();
    let query = EstimateQuery::new("nope", "东京");
    assert!(matches!(
        EstimateService::estimate(&directory, &CostEstimator::default(), &query),
        Err(DirectoryError::SchoolNotFound(_))
    ));
}

#[test]
fn read_interfaces_follow_display_order() {
    let directory = sample_directory();
    let id = SchoolService::id_for_slug(&directory, "isi-language-school-osaka").unwrap();
    let orders: Vec<i32> = directory.fee_items(id).iter().map(|fee| fee.display_order).collect();
    assert!(orders.windows(2).all(|pair| pair[0] <= pair[1]));
    assert!(directory.fee_items(999).is_empty());
    assert_eq!(directory.living_costs("大阪").len(), 7);
    assert!(directory.living_costs("札幌").is_empty());
}

#[test]
fn consultations_list_newest_first_and_filter_by_status() {
    let mut directory = sample_directory();
    let first = ConsultationService::submit(&mut directory, ConsultationForm::new("张三")).unwrap();
    sleep(Duration::from_millis(5));
    let mut form = ConsultationForm::new("李四");
    form.email = Some("  ".into());
    form.wechat_id = Some("lisi_jp".into());
    let second = ConsultationService::submit(&mut directory, form).unwrap();
    assert_eq!(second.email, None);

    let listed: Vec<&str> = ConsultationService::list(&directory)
        .iter()
        .map(|request| request.name.as_str())
        .collect();
    assert_eq!(listed, ["李四", "张三"]);

    ConsultationService::update_status(
        &mut directory,
        first.id,
        ConsultationStatus::Completed,
        Some("已入学".into()),
    )
    .unwrap();
    let completed = ConsultationService::with_status(&directory, ConsultationStatus::Completed);
    assert_eq!(completed.len(), 1);
    assert_eq!(completed[0].admin_notes.as_deref(), Some("已入学"));
    assert_eq!(
        ConsultationService::with_status(&directory, ConsultationStatus::Pending).len(),
        1
    );
}

#[test]
fn consultation_validation() {
    let mut directory = Directory::new("test");
    assert!(matches!(
        ConsultationService::submit(&mut directory, ConsultationForm::new(" ")),
        Err(DirectoryError::InvalidInput(_))
    ));
    let mut form = ConsultationForm::new("王五");
    form.email = Some("not-an-email".into());
    assert!(ConsultationService::submit(&mut directory, form).is_err());
    assert!(directory.consultations.is_empty());
    assert!(matches!(
        ConsultationService::resolve(&directory, "abcd"),
        Err(DirectoryError::ConsultationNotFound(_))
    ));
}

#[test]
fn school_edit_keeps_identity() {
    let mut directory = sample_directory();
    let id = SchoolService::id_for_slug(&directory, "ecc-japanese-nagoya").unwrap();
    let original = SchoolService::get(&directory, id).unwrap().clone();

    let mut changes = original.clone();
    changes.name_zh = "ECC名古屋".into();
    changes.id = 777;
    SchoolService::edit(&mut directory, id, changes).unwrap();

    let edited = SchoolService::get(&directory, id).unwrap();
    assert_eq!(edited.id, id);
    assert_eq!(edited.name_zh, "ECC名古屋");
    assert_eq!(edited.created_at, original.created_at);
    assert!(edited.updated_at >= original.updated_at);
}

#[test]
fn school_slugs_must_be_unique_and_clean() {
    let mut directory = sample_directory();
    let duplicate = School::new("osaka-ymca-international", "x", "x", SchoolType::LanguageSchool);
    assert!(matches!(
        SchoolService::add(&mut directory, duplicate),
        Err(DirectoryError::InvalidInput(_))
    ));
    let messy = School::new("Bad Slug", "x", "x", SchoolType::LanguageSchool);
    assert!(SchoolService::add(&mut directory, messy).is_err());
    let fresh = School::new("new-school", "新しい", "新学校", SchoolType::PrepSchool);
    let id = SchoolService::add(&mut directory, fresh).unwrap();
    assert!(!SchoolService::get(&directory, id).unwrap().is_published);
}

#[test]
fn fee_replacement_rejects_bad_items() {
    let mut directory = sample_directory();
    let id = SchoolService::id_for_slug(&directory, "asia-house-umikaze").unwrap();
    let negative = vec![FeeItem::new(FeeType::Tuition, -1, FeePeriod::Annual)];
    assert!(SchoolService::replace_fees(&mut directory, id, negative).is_err());
    let unknown = vec![FeeItem::new(FeeType::Tuition, 1, FeePeriod::Unrecognized)];
    assert!(SchoolService::replace_fees(&mut directory, id, unknown).is_err());

    let monthly = vec![FeeItem::new(FeeType::Tuition, 60_000, FeePeriod::Monthly)];
    SchoolService::replace_fees(&mut directory, id, monthly).unwrap();
    assert_eq!(directory.fee_items(id).len(), 1);
}

#[test]
fn living_cost_upsert_keeps_one_row_per_category() {
    let mut directory = sample_directory();
    let before = directory.living_costs("东京").len();
    let entry = LivingCostEntry::new("东京", LivingCostCategory::Food, 1, 2, 3);
    LivingCostService::upsert(&mut directory, entry).unwrap();
    let rows = directory.living_costs("东京");
    assert_eq!(rows.len(), before);
    let food: Vec<_> = rows
        .iter()
        .filter(|row| row.category == LivingCostCategory::Food)
        .collect();
    assert_eq!(food.len(), 1);
    assert_eq!(food[0].monthly_mid, 2);

    let new_city = LivingCostEntry::new("札幌", LivingCostCategory::Food, 20_000, 30_000, 45_000);
    LivingCostService::upsert(&mut directory, new_city).unwrap();
    assert!(LivingCostService::cities(&directory).contains(&"札幌".to_string()));

    LivingCostService::remove(&mut directory, "札幌", LivingCostCategory::Food).unwrap();
    assert!(LivingCostService::remove(&mut directory, "札幌", LivingCostCategory::Food).is_err());
}

#[test]
fn content_falls_back_to_defaults() {
    let mut directory = Directory::new("test");
    let settings = ContentService::get(&directory, "site_settings").unwrap();
    assert_eq!(settings["siteName"], "日本留学Lab");

    ContentService::set(&mut directory, "homepage_stats", json!([{"label": "合作学校"}])).unwrap();
    assert_eq!(
        ContentService::get(&directory, "homepage_stats").unwrap(),
        json!([{"label": "合作学校"}])
    );
    ContentService::reset(&mut directory, "homepage_stats").unwrap();
    assert_eq!(
        &ContentService::get(&directory, "homepage_stats").unwrap(),
        ContentService::default_for("homepage_stats").unwrap()
    );

    assert!(matches!(
        ContentService::set(&mut directory, "hero_banner", json!({})),
        Err(DirectoryError::InvalidContentKey(_))
    ));
    assert_eq!(ContentService::get_all(&directory).len(), CONTENT_KEYS.len());
}
