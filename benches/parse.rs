use chrono::{Duration, NaiveDate, TimeZone, Utc};
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use locationforecast::CacheEnvelope;
use serde_json::{json, Value};
use std::collections::BTreeMap;

/// Roughly the shape of a real compact response: 48 hourly steps then 6-hourly ones.
fn synthetic_envelope() -> CacheEnvelope {
    let start = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
    let mut timeseries: Vec<Value> = Vec::new();
    let mut time = start;
    for i in 0..80 {
        let block = if i < 48 { "next_1_hours" } else { "next_6_hours" };
        timeseries.push(json!({
            "time": time.format("%Y-%m-%dT%H:%M:%SZ").to_string(),
            "data": {
                "instant": {"details": {
                    "air_pressure_at_sea_level": 1003.2,
                    "air_temperature": -1.5 + i as f64 * 0.1,
                    "cloud_area_fraction": 87.5,
                    "relative_humidity": 91.2,
                    "wind_from_direction": 201.4,
                    "wind_speed": 3.4
                }},
                block: {
                    "summary": {"symbol_code": "cloudy"},
                    "details": {"precipitation_amount": 0.2}
                }
            }
        }));
        time += if i < 48 { Duration::hours(1) } else { Duration::hours(6) };
    }
    let data = json!({
        "type": "Feature",
        "properties": {
            "meta": {
                "updated_at": "2023-12-31T23:45:12Z",
                "units": {
                    "air_pressure_at_sea_level": "hPa",
                    "air_temperature": "celsius",
                    "cloud_area_fraction": "%",
                    "precipitation_amount": "mm",
                    "relative_humidity": "%",
                    "wind_from_direction": "degrees",
                    "wind_speed": "m/s"
                }
            },
            "timeseries": timeseries
        }
    });
    let headers = BTreeMap::from([
        ("last-modified".to_string(), "Mon, 01 Jan 2024 00:00:00 GMT".to_string()),
        ("expires".to_string(), "Mon, 01 Jan 2024 01:00:00 GMT".to_string()),
    ]);
    CacheEnvelope::new(200, headers, Some(data))
}

fn bench_parse(c: &mut Criterion) {
    let envelope = synthetic_envelope();
    c.bench_function("to_series", |b| b.iter(|| black_box(&envelope).to_series()));

    let series = envelope.to_series().unwrap();
    let day = NaiveDate::from_ymd_opt(2024, 1, 2).unwrap();
    c.bench_function("bucket_averages", |b| {
        b.iter(|| series.bucket_averages(black_box("air_temperature"), day, Duration::hours(6)))
    });
}

criterion_group!(benches, bench_parse);
criterion_main!(benches);
