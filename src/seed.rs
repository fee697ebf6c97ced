//! Starter data for a fresh directory: a handful of real schools and the
//! living-cost table for every supported city.

use crate::directory::Directory;
use crate::domain::{
    Course, FeeItem, FeePeriod, FeeType, LivingCostCategory, LivingCostEntry, ScheduleType,
    School, SchoolType,
};

struct SchoolSeed {
    slug: &'static str,
    name_ja: &'static str,
    name_zh: &'static str,
    prefecture: &'static str,
    city: &'static str,
    established_year: i32,
    nearest_station: &'static str,
    walking_minutes: u32,
    total_capacity: u32,
    chinese_ratio: f64,
    class_size_avg: u32,
    n1: f64,
    n2: f64,
    acceptance: f64,
    has_dormitory: bool,
    four_intakes: bool,
    commission_rate: f64,
    commission_amount: i64,
    featured: bool,
    description_zh: &'static str,
}

const SCHOOLS: &[SchoolSeed] = &[
    SchoolSeed {
        slug: "isi-language-school-osaka",
        name_ja: "ISIランゲージスクール大阪校",
        name_zh: "ISI语言学校大阪校",
        prefecture: "大阪府",
        city: "大阪",
        established_year: 2002,
        nearest_station: "なんば駅",
        walking_minutes: 7,
        total_capacity: 600,
        chinese_ratio: 0.3,
        class_size_avg: 16,
        n1: 0.38,
        n2: 0.72,
        acceptance: 0.85,
        has_dormitory: true,
        four_intakes: true,
        commission_rate: 0.12,
        commission_amount: 202_920,
        featured: true,
        description_zh: "日本最大规模的语言教育集团之一，大阪校位于市中心，提供升学指导和商务日语课程。",
    },
    SchoolSeed {
        slug: "aoyama-international-education",
        name_ja: "青山国際教育学院",
        name_zh: "青山国际教育学院",
        prefecture: "东京都",
        city: "东京",
        established_year: 1988,
        nearest_station: "表参道駅",
        walking_minutes: 5,
        total_capacity: 500,
        chinese_ratio: 0.35,
        class_size_avg: 18,
        n1: 0.4,
        n2: 0.75,
        acceptance: 0.88,
        has_dormitory: true,
        four_intakes: true,
        commission_rate: 0.15,
        commission_amount: 249_000,
        featured: true,
        description_zh: "位于东京青山地区的老牌语言学校，以严谨的教学和优质的升学指导闻名。",
    },
    SchoolSeed {
        slug: "elite-japanese-language",
        name_ja: "エリート日本語学校",
        name_zh: "精英日本语学校",
        prefecture: "东京都",
        city: "东京",
        established_year: 1993,
        nearest_station: "新大久保駅",
        walking_minutes: 3,
        total_capacity: 500,
        chinese_ratio: 0.5,
        class_size_avg: 18,
        n1: 0.45,
        n2: 0.8,
        acceptance: 0.9,
        has_dormitory: true,
        four_intakes: true,
        commission_rate: 0.15,
        commission_amount: 226_050,
        featured: true,
        description_zh: "以升学为导向的精英语言学校，提供针对名校的专项辅导。",
    },
    SchoolSeed {
        slug: "ecc-japanese-nagoya",
        name_ja: "ECC日本語学院名古屋校",
        name_zh: "ECC日本语学院名古屋校",
        prefecture: "爱知县",
        city: "名古屋",
        established_year: 1975,
        nearest_station: "金山駅",
        walking_minutes: 3,
        total_capacity: 400,
        chinese_ratio: 0.3,
        class_size_avg: 15,
        n1: 0.4,
        n2: 0.76,
        acceptance: 0.85,
        has_dormitory: true,
        four_intakes: true,
        commission_rate: 0.12,
        commission_amount: 188_880,
        featured: true,
        description_zh: "知名教育品牌ECC的名古屋校，注重听说读写全面发展。",
    },
    SchoolSeed {
        slug: "osaka-ymca-international",
        name_ja: "大阪YMCA国際専門学校",
        name_zh: "大阪YMCA国际专门学校",
        prefecture: "大阪府",
        city: "大阪",
        established_year: 1985,
        nearest_station: "肥後橋駅",
        walking_minutes: 5,
        total_capacity: 400,
        chinese_ratio: 0.25,
        class_size_avg: 16,
        n1: 0.36,
        n2: 0.72,
        acceptance: 0.82,
        has_dormitory: false,
        four_intakes: false,
        commission_rate: 0.1,
        commission_amount: 72_000,
        featured: false,
        description_zh: "历史悠久的教育机构，强调实用日语能力，提供奖学金制度和就业支持。",
    },
    SchoolSeed {
        slug: "asia-house-umikaze",
        name_ja: "アジアハウス附属海風日本語学舎",
        name_zh: "亚洲屋附属海风日本语学舍",
        prefecture: "冲绳县",
        city: "冲绳",
        established_year: 2003,
        nearest_station: "美栄橋駅",
        walking_minutes: 8,
        total_capacity: 200,
        chinese_ratio: 0.2,
        class_size_avg: 14,
        n1: 0.25,
        n2: 0.6,
        acceptance: 0.65,
        has_dormitory: true,
        four_intakes: false,
        commission_rate: 0.1,
        commission_amount: 149_000,
        featured: false,
        description_zh: "以海洋文化为背景的沉浸式日语学习体验，学费相对亲民。",
    },
];

/// (slug, admission, tuition, textbook, facility, insurance, optional extra)
type FeeSeed = (&'static str, i64, i64, i64, i64, i64, Option<(FeeType, &'static str, &'static str, i64)>);

const FEES: &[FeeSeed] = &[
    ("isi-language-school-osaka", 55_000, 1_350_000, 66_000, 132_000, 18_000, Some((FeeType::Other, "活动费", "活動費", 70_000))),
    ("aoyama-international-education", 60_000, 1_320_000, 50_000, 140_000, 20_000, Some((FeeType::Other, "课外活动费", "課外活動費", 70_000))),
    ("elite-japanese-language", 55_000, 1_200_000, 42_000, 132_000, 18_000, Some((FeeType::Exam, "模拟考试费", "模試費", 60_000))),
    ("ecc-japanese-nagoya", 55_000, 1_250_000, 44_000, 132_000, 18_000, None),
    ("osaka-ymca-international", 50_000, 580_000, 30_000, 50_000, 10_000, None),
    ("asia-house-umikaze", 50_000, 1_180_000, 40_000, 120_000, 15_000, None),
];

/// (city, category, low, mid, high, notes)
type CostSeed = (&'static str, LivingCostCategory, i64, i64, i64, &'static str);

const LIVING_COSTS: &[CostSeed] = {
    use LivingCostCategory::*;
    &[
        ("东京", HousingDormitory, 35_000, 50_000, 65_000, "学校宿舍，含水电"),
        ("东京", HousingApartment, 55_000, 75_000, 100_000, "1K公寓，23区内"),
        ("东京", Food, 25_000, 40_000, 60_000, "自炊为主/外食混合/外食为主"),
        ("东京", Transportation, 5_000, 10_000, 15_000, "学生月票"),
        ("东京", PhoneInternet, 3_000, 5_000, 8_000, "格安SIM/普通套餐"),
        ("东京", DailyNecessities, 5_000, 10_000, 15_000, "日用品、洗护等"),
        ("东京", Entertainment, 5_000, 15_000, 30_000, "娱乐社交"),
        ("大阪", HousingDormitory, 28_000, 40_000, 55_000, "学校宿舍，含水电"),
        ("大阪", HousingApartment, 40_000, 58_000, 80_000, "1K公寓"),
        ("大阪", Food, 22_000, 35_000, 50_000, "自炊/外食混合/外食为主"),
        ("大阪", Transportation, 5_000, 8_000, 12_000, "学生月票"),
        ("大阪", PhoneInternet, 3_000, 5_000, 8_000, "格安SIM/普通套餐"),
        ("大阪", DailyNecessities, 5_000, 8_000, 12_000, "日用品"),
        ("大阪", Entertainment, 5_000, 12_000, 25_000, "娱乐社交"),
        ("京都", HousingDormitory, 25_000, 38_000, 50_000, "学校宿舍"),
        ("京都", HousingApartment, 38_000, 52_000, 75_000, "1K公寓"),
        ("京都", Food, 22_000, 35_000, 50_000, "自炊/混合/外食"),
        ("京都", Transportation, 4_000, 7_000, 10_000, "公交/地铁"),
        ("京都", PhoneInternet, 3_000, 5_000, 8_000, "格安SIM/普通套餐"),
        ("京都", DailyNecessities, 5_000, 7_000, 10_000, "日用品"),
        ("京都", Entertainment, 5_000, 10_000, 20_000, "娱乐社交"),
        ("福冈", HousingDormitory, 22_000, 32_000, 42_000, "学校宿舍"),
        ("福冈", HousingApartment, 32_000, 48_000, 65_000, "1K公寓"),
        ("福冈", Food, 20_000, 30_000, 45_000, "自炊/混合/外食"),
        ("福冈", Transportation, 4_000, 6_000, 10_000, "公交/地铁"),
        ("福冈", PhoneInternet, 3_000, 5_000, 8_000, "格安SIM"),
        ("福冈", DailyNecessities, 4_000, 6_000, 9_000, "日用品"),
        ("福冈", Entertainment, 4_000, 10_000, 20_000, "娱乐社交"),
        ("札幌", HousingDormitory, 20_000, 30_000, 40_000, "学校宿舍"),
        ("札幌", HousingApartment, 28_000, 42_000, 60_000, "1K公寓"),
        ("札幌", Food, 20_000, 30_000, 45_000, "自炊/混合/外食"),
        ("札幌", Transportation, 5_000, 8_000, 12_000, "地铁"),
        ("札幌", PhoneInternet, 3_000, 5_000, 8_000, "格安SIM"),
        ("札幌", DailyNecessities, 4_000, 6_000, 9_000, "日用品"),
        ("札幌", Entertainment, 4_000, 10_000, 18_000, "娱乐社交"),
        ("名古屋", HousingDormitory, 25_000, 35_000, 48_000, "学校宿舍"),
        ("名古屋", HousingApartment, 38_000, 55_000, 72_000, "1K公寓"),
        ("名古屋", Food, 22_000, 33_000, 48_000, "自炊/混合/外食"),
        ("名古屋", Transportation, 5_000, 8_000, 12_000, "地铁"),
        ("名古屋", PhoneInternet, 3_000, 5_000, 8_000, "格安SIM"),
        ("名古屋", DailyNecessities, 5_000, 7_000, 10_000, "日用品"),
        ("名古屋", Entertainment, 5_000, 12_000, 22_000, "娱乐社交"),
        ("冲绳", HousingDormitory, 18_000, 28_000, 38_000, "学校宿舍"),
        ("冲绳", HousingApartment, 28_000, 40_000, 55_000, "1K公寓"),
        ("冲绳", Food, 18_000, 28_000, 40_000, "自炊/混合/外食"),
        ("冲绳", Transportation, 3_000, 5_000, 8_000, "公交/单轨"),
        ("冲绳", PhoneInternet, 3_000, 5_000, 8_000, "格安SIM"),
        ("冲绳", DailyNecessities, 4_000, 6_000, 8_000, "日用品"),
        ("冲绳", Entertainment, 3_000, 8_000, 15_000, "娱乐社交"),
    ]
};

fn fee_schedule(slug: &str) -> Vec<FeeItem> {
    let Some(&(_, admission, tuition, textbook, facility, insurance, extra)) =
        FEES.iter().find(|seed| seed.0 == slug)
    else {
        return Vec::new();
    };
    let mut fees = vec![
        FeeItem::new(FeeType::Admission, admission, FeePeriod::OneTime).ordered(1),
        FeeItem::new(FeeType::Tuition, tuition, FeePeriod::Annual)
            .named("授业料", Some("授業料"))
            .ordered(2),
        FeeItem::new(FeeType::Textbook, textbook, FeePeriod::Annual)
            .named("教材费", Some("教材費"))
            .ordered(3),
        FeeItem::new(FeeType::Facility, facility, FeePeriod::Annual)
            .named("设施费", Some("施設費"))
            .ordered(4),
        FeeItem::new(FeeType::Insurance, insurance, FeePeriod::Annual)
            .named("保险费", Some("保険料"))
            .ordered(5),
    ];
    if let Some((fee_type, name_zh, name_ja, amount)) = extra {
        fees.push(
            FeeItem::new(fee_type, amount, FeePeriod::Annual)
                .named(name_zh, Some(name_ja))
                .optional()
                .ordered(6),
        );
    }
    fees
}

fn course(name_zh: &str, months: u32, hours: u32, schedule: ScheduleType, level: &str) -> Course {
    Course {
        name_zh: name_zh.to_string(),
        duration_months: Some(months),
        hours_per_week: Some(hours),
        schedule_type: Some(schedule),
        target_level: Some(level.to_string()),
    }
}

fn build_school(seed: &SchoolSeed) -> School {
    let mut school = School::new(seed.slug, seed.name_ja, seed.name_zh, SchoolType::LanguageSchool)
        .located(seed.prefecture, seed.city)
        .with_fees(fee_schedule(seed.slug))
        .published();
    school.description_zh = Some(seed.description_zh.to_string());
    school.established_year = Some(seed.established_year);
    school.nearest_station = Some(seed.nearest_station.to_string());
    school.walking_minutes = Some(seed.walking_minutes);
    school.total_capacity = Some(seed.total_capacity);
    school.chinese_ratio = Some(seed.chinese_ratio);
    school.class_size_avg = Some(seed.class_size_avg);
    school.jlpt_n1_pass_rate = Some(seed.n1);
    school.jlpt_n2_pass_rate = Some(seed.n2);
    school.university_acceptance_rate = Some(seed.acceptance);
    school.has_dormitory = seed.has_dormitory;
    school.has_part_time_support = true;
    school.enrollment_periods = if seed.four_intakes {
        vec!["1月".into(), "4月".into(), "7月".into(), "10月".into()]
    } else {
        vec!["4月".into(), "10月".into()]
    };
    school.course_durations = if seed.four_intakes {
        vec!["1年".into(), "1.5年".into(), "2年".into()]
    } else {
        vec!["1年".into(), "2年".into()]
    };
    school.commission_rate = Some(seed.commission_rate);
    school.commission_amount = Some(seed.commission_amount);
    school.commission_notes = Some(format!(
        "学费的{}%，入学后支付",
        (seed.commission_rate * 100.0).round()
    ));
    school.is_featured = seed.featured;
    school.courses = vec![
        course("综合日语课程", 24, 20, ScheduleType::Morning, "N5-N1"),
        course("升学准备课程", 12, 20, ScheduleType::Afternoon, "N3-N1"),
    ];
    school
}

/// A directory pre-filled with sample schools and all city living costs.
pub fn sample_directory() -> Directory {
    let mut directory = Directory::new("main");
    for seed in SCHOOLS {
        directory.add_school(build_school(seed));
    }
    directory.living_costs = LIVING_COSTS
        .iter()
        .map(|&(city, category, low, mid, high, notes)| {
            LivingCostEntry::new(city, category, low, mid, high).with_notes(notes)
        })
        .collect();
    directory
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_city_has_a_full_row_set() {
        let directory = sample_directory();
        let cities = directory.cities();
        assert_eq!(cities.len(), 7);
        for city in &cities {
            let rows = directory.living_costs.iter().filter(|entry| &entry.city == city);
            assert_eq!(rows.clone().count(), 7, "{city}");
            assert!(rows.into_iter().all(LivingCostEntry::tiers_ordered));
        }
    }

    #[test]
    fn seeded_slugs_are_unique_and_priced() {
        let directory = sample_directory();
        for school in &directory.schools {
            assert_eq!(
                directory.schools.iter().filter(|other| other.slug == school.slug).count(),
                1
            );
            assert!(!school.fees.is_empty(), "{} has no fees", school.slug);
        }
    }
}
