use std::hint::black_box;

use chrono::{TimeZone, Utc};
use chrono_tz::Tz;
use criterion::{criterion_group, criterion_main, Criterion};
use overlap_engine::{find_optimal_slots_in, DateRange, Participant, DEFAULT_HORIZON_DAYS};

fn team(size: usize) -> Vec<Participant> {
    const ZONES: &[&str] = &[
        "America/New_York",
        "America/Los_Angeles",
        "Europe/London",
        "Europe/Berlin",
        "Asia/Kolkata",
        "Asia/Tokyo",
        "Australia/Sydney",
    ];
    (0..size)
        .map(|i| Participant::new(i.to_string(), format!("p{i}"), ZONES[i % ZONES.len()]))
        .collect()
}

fn bench_search(c: &mut Criterion) {
    let start = Utc.with_ymd_and_hms(2026, 3, 2, 0, 0, 0).unwrap();
    let range = DateRange::next_days(start, DEFAULT_HORIZON_DAYS).unwrap();

    for size in [2, 10, 50] {
        let participants = team(size);
        c.bench_function(&format!("two_week_search_{size}_participants"), |b| {
            b.iter(|| find_optimal_slots_in(black_box(&participants), &range, 60, &Tz::UTC))
        });
    }
}

criterion_group!(benches, bench_search);
criterion_main!(benches);
