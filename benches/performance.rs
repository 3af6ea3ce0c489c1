use chrono::{Duration, TimeZone, Utc};
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use tally_core::{AggregationService, CalendarLabels, ProgressService};
use tally_domain::{Goal, Transaction, ViewMode};

fn build_sample_income(count: usize) -> Vec<Transaction> {
    let start = Utc.with_ymd_and_hms(2023, 1, 1, 9, 0, 0).unwrap();
    (0..count)
        .map(|idx| {
            let at = start + Duration::hours((idx % (3 * 365 * 24)) as i64);
            Transaction::new(format!("Invoice {idx}"), 50.0 + (idx % 100) as f64, at)
        })
        .collect()
}

fn bench_aggregation(c: &mut Criterion) {
    let income = build_sample_income(black_box(10_000));
    let now = Utc.with_ymd_and_hms(2025, 6, 19, 12, 0, 0).unwrap();
    let labels = CalendarLabels::default();

    for mode in ViewMode::ALL {
        c.bench_function(&format!("aggregate_{}_10k", mode), |b| {
            b.iter(|| AggregationService::aggregate(black_box(&income), mode, &now, &labels))
        });
    }
}

fn bench_goal_progress(c: &mut Criterion) {
    let income = build_sample_income(10_000);
    let goal = Goal::new(1_000_000.0, chrono::NaiveDate::from_ymd_opt(2025, 12, 31).unwrap());
    let now = Utc.with_ymd_and_hms(2025, 6, 19, 12, 0, 0).unwrap();

    c.bench_function("goal_progress_10k", |b| {
        b.iter(|| {
            let total = tally_domain::sum_amounts(black_box(&income));
            ProgressService::progress(&goal, total, &now)
        })
    });
}

criterion_group!(benches, bench_aggregation, bench_goal_progress);
criterion_main!(benches);
