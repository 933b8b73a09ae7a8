use std::hint::black_box;

use chrono::{Duration, TimeZone, Utc};
use criterion::{criterion_group, criterion_main, Criterion};
use money_tracker::{
    cli::ui::{render_history, ViewOptions},
    core::services::SummaryService,
    domain::{AppState, Bucket, Expense, Period},
};

fn busy_period(expenses: usize) -> Period {
    let start = Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap();
    let mut period = Period::new(5_000_000, 1_000_000, start);
    for index in 0..expenses {
        let bucket = if index % 3 == 0 { Bucket::Cold } else { Bucket::Hot };
        period.expenses.push(Expense::new(
            format!("expense {index}"),
            (index as i64 % 50_000) + 1,
            bucket,
            start + Duration::minutes(index as i64),
        ));
    }
    period
}

fn bench_summary(c: &mut Criterion) {
    let period = busy_period(10_000);
    c.bench_function("summary.compute.10k_expenses", |b| {
        b.iter(|| SummaryService::compute(black_box(&period)));
    });
}

fn bench_history(c: &mut Criterion) {
    let state = AppState {
        periods: (0..24).map(|_| busy_period(200)).collect(),
        active_period_id: None,
    };
    let options = ViewOptions::default();
    c.bench_function("history.render.24_periods", |b| {
        b.iter(|| render_history(black_box(&state.periods), None, &options));
    });
}

criterion_group!(benches, bench_summary, bench_history);
criterion_main!(benches);
