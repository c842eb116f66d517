use chrono::{DateTime, Duration, NaiveDate, Utc};
use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use solar_lunar::zodiac::{self, CelestialBody, Sign, ZodiacEvent};
use solar_lunar::{moon, sun, AstronomicalSeason, GeoLocation, MoonPhase, SolarTime};
use std::hint::black_box;

fn benchmark_positions(c: &mut Criterion) {
    let datetime = "2023-06-21T12:00:00Z".parse::<DateTime<Utc>>().unwrap();
    let location = GeoLocation::new(37.7749, -122.4194, 0.0).unwrap();

    c.bench_function("sun_position", |b| {
        b.iter(|| sun::position(black_box(&datetime), black_box(&location)).unwrap())
    });
    c.bench_function("moon_position", |b| {
        b.iter(|| moon::position(black_box(&datetime), black_box(&location)).unwrap())
    });
}

fn benchmark_sunrise_by_calculator(c: &mut Criterion) {
    let mut group = c.benchmark_group("sunrise_one_year");
    let location = GeoLocation::new(53.55, 10.0, 0.0).unwrap();
    let start = NaiveDate::from_ymd_opt(2023, 1, 1).unwrap();
    let dates: Vec<NaiveDate> = (0..365).map(|i| start + Duration::days(i)).collect();
    group.throughput(Throughput::Elements(dates.len() as u64));

    for name in ["SIMPLE", "NOAA", "CC", "PRECISE"] {
        let solar_time = SolarTime::with_calculator(location, name).unwrap();
        group.bench_with_input(BenchmarkId::from_parameter(name), &dates, |b, dates| {
            b.iter(|| {
                for &date in dates {
                    black_box(solar_time.sunrise(black_box(date)).unwrap());
                }
            })
        });
    }

    group.finish();
}

fn benchmark_lunar_time(c: &mut Criterion) {
    let location = GeoLocation::new(52.52, 13.40, 34.0).unwrap();
    let date = NaiveDate::from_ymd_opt(2024, 3, 10).unwrap();

    c.bench_function("lunar_time", |b| {
        b.iter(|| moon::lunar_time(black_box(&location), black_box(date), &Utc).unwrap())
    });
}

fn benchmark_searches(c: &mut Criterion) {
    let mut group = c.benchmark_group("searches");
    let start = "2024-01-01T00:00:00Z".parse::<DateTime<Utc>>().unwrap();

    group.bench_function("season", |b| {
        b.iter(|| AstronomicalSeason::WinterSolstice.in_year(black_box(2024)).unwrap())
    });
    group.bench_function("moon_phase_lunation", |b| {
        b.iter(|| MoonPhase::Full.at_lunation(black_box(300)).unwrap())
    });
    group.bench_function("moon_phase_after", |b| {
        b.iter(|| MoonPhase::New.after(black_box(&start)).unwrap())
    });
    group.bench_function("sun_sign_entry", |b| {
        b.iter(|| {
            zodiac::crossing(
                CelestialBody::Sun,
                Sign::Aries,
                ZodiacEvent::Entry,
                black_box(&start),
            )
            .unwrap()
        })
    });

    group.finish();
}

criterion_group!(
    benches,
    benchmark_positions,
    benchmark_sunrise_by_calculator,
    benchmark_lunar_time,
    benchmark_searches
);
criterion_main!(benches);
