use criterion::{black_box, criterion_group, criterion_main, Criterion};
use ryugaku_core::{
    catalog::{list_schools, SchoolFilters, SortOrder},
    directory::{Directory, LivingCostSource},
    domain::{FeeItem, FeePeriod, FeeType, HousingType, LifestyleTier, School, SchoolType},
    estimator::{CalculationRequest, CostEstimator},
    seed::sample_directory,
    storage::{JsonStorage, StorageBackend},
};
use tempfile::tempdir;

fn large_directory(school_count: usize) -> Directory {
    let mut directory = sample_directory();
    let periods = [
        FeePeriod::OneTime,
        FeePeriod::Annual,
        FeePeriod::SemiAnnual,
        FeePeriod::Monthly,
    ];
    for idx in 0..school_count {
        let fees = (0..8)
            .map(|n| {
                FeeItem::new(
                    FeeType::Tuition,
                    10_000 + (idx * 37 + n * 1_000) as i64,
                    periods[n % periods.len()],
                )
                .ordered(n as i32)
            })
            .collect();
        let mut school = School::new(
            format!("bench-school-{idx}"),
            format!("ベンチ{idx}"),
            format!("基准学校{idx}"),
            SchoolType::LanguageSchool,
        )
        .located("东京都", "东京")
        .with_fees(fees)
        .published();
        school.university_acceptance_rate = Some((idx % 100) as f64 / 100.0);
        directory.add_school(school);
    }
    directory
}

fn bench_estimate(c: &mut Criterion) {
    let directory = sample_directory();
    let school = directory
        .school_by_slug("aoyama-international-education")
        .expect("seeded school");
    let request = CalculationRequest::new(18)
        .with_fees(school.fees.clone())
        .with_living_costs(directory.living_costs("东京"))
        .housing(HousingType::Apartment)
        .lifestyle(LifestyleTier::High);
    let estimator = CostEstimator::default();

    c.bench_function("estimate_single_school", |b| {
        b.iter(|| black_box(estimator.estimate(black_box(&request)).expect("estimate")))
    });
}

fn bench_listing(c: &mut Criterion) {
    let directory = large_directory(black_box(2_000));
    let filters = SchoolFilters {
        sort: SortOrder::FeeLow,
        ..SchoolFilters::default()
    }
    .with_search("基准");

    c.bench_function("list_schools_fee_sorted_2k", |b| {
        b.iter(|| black_box(list_schools(&directory, &filters)))
    });
}

fn bench_storage(c: &mut Criterion) {
    let directory = large_directory(black_box(2_000));
    let dir = tempdir().expect("tempdir");
    let storage = JsonStorage::new(Some(dir.path().to_path_buf()), Some(1)).expect("storage");

    c.bench_function("directory_save_2k", |b| {
        b.iter(|| storage.save(&directory, "bench").expect("save"))
    });

    c.bench_function("directory_load_2k", |b| {
        b.iter(|| black_box(storage.load("bench").expect("load")))
    });
}

criterion_group!(benches, bench_estimate, bench_listing, bench_storage);
criterion_main!(benches);
