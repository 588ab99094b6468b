use crate::forecast_data::error::ForecastDataError;
use chrono::{DateTime, NaiveDateTime, Utc};
use log::info;
use std::io;
use std::path::{Path, PathBuf};

const CACHE_DIR_NAME: &str = "locationforecast_rs_cache";

/// IMF-fixdate, the preferred HTTP date format (RFC 7231 §7.1.1.1).
const HTTP_DATE_FORMAT: &str = "%a, %d %b %Y %H:%M:%S GMT";
/// Obsolete forms recipients must still accept.
const RFC850_DATE_FORMAT: &str = "%A, %d-%b-%y %H:%M:%S GMT";
const ASCTIME_DATE_FORMAT: &str = "%a %b %e %H:%M:%S %Y";

pub fn get_cache_dir() -> Option<PathBuf> {
    dirs::cache_dir().map(|p| p.join(CACHE_DIR_NAME))
}

pub async fn ensure_cache_dir_exists(path: &Path) -> Result<(), ForecastDataError> {
    match tokio::fs::metadata(path).await {
        Ok(metadata) => {
            if !metadata.is_dir() {
                return Err(ForecastDataError::CacheDirNotADirectory(path.to_path_buf()));
            }
            Ok(())
        }
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            info!("Creating cache directory: {}", path.display());
            tokio::fs::create_dir_all(path)
                .await
                .map_err(|e| ForecastDataError::CacheDirCreation(path.to_path_buf(), e))
        }
        Err(e) => Err(ForecastDataError::CacheMetadataRead(path.to_path_buf(), e)),
    }
}

/// Rounds a coordinate to the 4 decimals the API accepts.
pub fn round_coordinate(value: f64) -> f64 {
    // `+ 0.0` folds -0.0 into 0.0 so file keys never carry a signed zero.
    (value * 10_000.0).round() / 10_000.0 + 0.0
}

pub fn format_http_date(datetime: &DateTime<Utc>) -> String {
    datetime.format(HTTP_DATE_FORMAT).to_string()
}

/// Parses an HTTP date in IMF-fixdate, RFC 850 or asctime form.
pub fn parse_http_date(value: &str) -> Option<DateTime<Utc>> {
    let value = value.trim();
    if let Ok(dt) = DateTime::parse_from_rfc2822(value) {
        return Some(dt.with_timezone(&Utc));
    }
    [RFC850_DATE_FORMAT, ASCTIME_DATE_FORMAT]
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(value, format).ok())
        .map(|naive| naive.and_utc())
}
