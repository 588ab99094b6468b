//! Prints tomorrow's hourly temperatures and 6-hour averages for a Norwegian city.
//!
//! Usage: `cargo run --example tomorrow -- [city]` (defaults to Oslo).
//! Set RUST_LOG=info to see cache hits and downloads.

use chrono::{Duration, Utc};
use locationforecast::{ForecastCache, ForecastConfig, ForecastError, PlaceList};
use std::env;
use std::path::Path;

const USER_AGENT: &str = "locationforecast-demo/0.1 demo@example.com";

#[tokio::main]
async fn main() -> Result<(), ForecastError> {
    env_logger::init();

    let city = env::args().nth(1).unwrap_or_else(|| "Oslo".to_string());
    let places = PlaceList::load(Path::new("data/nor.json")).await?;
    let Some(place) = places.find(&city) else {
        eprintln!("Unknown city '{}'. Known cities:", city);
        for place in places.iter() {
            eprintln!("  {}", place.name());
        }
        return Ok(());
    };

    let config = ForecastConfig::builder().user_agent(USER_AGENT).build()?;
    let mut cache = ForecastCache::new(place.clone(), &config)?;
    let status = cache.refresh().await?;
    println!("Refresh: {:?}", status);

    let Some(series) = cache.series() else {
        return Ok(());
    };
    let tomorrow = (Utc::now() + Duration::days(1)).date_naive();

    println!("\n--- Forecast for {}, {} (UTC) ---", place.name(), tomorrow);
    for interval in series.intervals_for(tomorrow) {
        let show = |name: &str| {
            interval
                .variable(name)
                .map(|m| m.to_string())
                .unwrap_or_else(|| "-".to_string())
        };
        println!(
            "{}  {:>12}  {:>6}  {:>7}  {}",
            interval.start_time().format("%H:%M"),
            show("air_temperature"),
            show("precipitation_amount"),
            show("wind_speed"),
            interval.symbol_code().unwrap_or("")
        );
    }

    println!("\n--- Average temperature per 6 hours ---");
    for bucket in series.bucket_averages("air_temperature", tomorrow, Duration::hours(6))? {
        let mean = match &bucket.mean {
            Some(m) => format!("{:.2}{}", m.value(), m.units()),
            None => "no data".to_string(),
        };
        println!(
            "{}-{}: {} ({} samples)",
            bucket.start.format("%H:%M"),
            bucket.end.format("%H:%M"),
            mean,
            bucket.samples
        );
    }

    Ok(())
}
