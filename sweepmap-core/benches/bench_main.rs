use std::hint::black_box;

use chrono::NaiveDate;
use criterion::{Criterion, criterion_group, criterion_main};
use geo::{Coord, LineString};
use sweepmap_core::prelude::*;

fn synthetic_records(count: usize) -> Vec<ScheduleRecord> {
    let weekdays = ["Mon", "Tues", "Wed", "Thu", "Fri"];
    let sides = [BlockSide::North, BlockSide::East, BlockSide::SouthWest, BlockSide::Left];
    (0..count)
        .map(|i| {
            let lat = 37.70 + (i % 100) as f64 * 0.001;
            let lng = -122.50 + (i / 100) as f64 * 0.001;
            let geometry: LineString<f64> = vec![
                Coord { x: lng, y: lat },
                Coord { x: lng + 0.0005, y: lat + 0.0003 },
                Coord { x: lng + 0.0010, y: lat + 0.0004 },
            ]
            .into();
            let weekday = weekdays[i % weekdays.len()];
            let side = sides[i % sides.len()];
            ScheduleRecord {
                cnn: i.to_string(),
                corridor: format!("Street {}", i / 10),
                limits: String::new(),
                side_label: side.to_string(),
                block_side: side,
                weekday_label: weekday.to_string(),
                weekday: sweepmap_core::model::parse_weekday_label(weekday),
                from_hour: 8,
                to_hour: 10,
                week_flags: WeekFlags([i % 2 == 0, true, i % 3 == 0, true, false]),
                holiday: false,
                geometry,
            }
        })
        .collect()
}

fn bench_aggregate(c: &mut Criterion) {
    let records = synthetic_records(20_000);
    let start = NaiveDate::from_ymd_opt(2025, 10, 1).unwrap();
    let horizon = DateHorizon::from_dates(start.iter_days().take(30).collect());
    let disc = DiscFilter::from_miles(37.75, -122.45, 2.0).unwrap();

    let mut group = c.benchmark_group("aggregate");
    for (name, mode) in [
        ("centerline", RenderMode::Centerline),
        ("offset", RenderMode::Offset { meters: 4.0 }),
        ("corridor", RenderMode::Corridor { half_width_meters: 8.0 }),
    ] {
        let aggregator = ScheduleAggregator::new(mode).unwrap();
        group.bench_function(name, |b| {
            b.iter(|| {
                aggregator
                    .aggregate(black_box(&records), &horizon, &disc)
                    .unwrap()
            });
        });
    }
    group.finish();
}

criterion_group!(benches, bench_aggregate);
criterion_main!(benches);
