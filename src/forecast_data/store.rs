use crate::forecast_data::envelope::CacheEnvelope;
use crate::forecast_data::error::ForecastDataError;
use crate::types::location::Location;
use crate::utils::ensure_cache_dir_exists;
use log::{debug, info};
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tokio::{fs, task};

/// On-disk storage of one envelope file per location.
///
/// Files live at `{cache_dir}/{location.file_key()}.json`. Writes go to a
/// temporary file in the same directory which is then renamed over the
/// target, so a failed write never leaves a truncated envelope behind.
#[derive(Debug, Clone)]
pub struct EnvelopeStore {
    cache_dir: PathBuf,
}

impl EnvelopeStore {
    pub fn new(cache_dir: &Path) -> Self {
        Self {
            cache_dir: cache_dir.to_path_buf(),
        }
    }

    pub fn cache_dir(&self) -> &Path {
        &self.cache_dir
    }

    pub fn path_for(&self, location: &Location) -> PathBuf {
        self.cache_dir.join(format!("{}.json", location.file_key()))
    }

    /// Reads the envelope for `location`, or `None` if no file exists yet
    /// (including when the cache path is not a directory at all).
    pub async fn load(&self, location: &Location) -> Result<Option<CacheEnvelope>, ForecastDataError> {
        let path = self.path_for(location);
        let bytes = match fs::read(&path).await {
            Ok(bytes) => bytes,
            Err(e)
                if matches!(
                    e.kind(),
                    std::io::ErrorKind::NotFound | std::io::ErrorKind::NotADirectory
                ) =>
            {
                debug!("No cache file for {} at {}", location, path.display());
                return Ok(None);
            }
            Err(e) => return Err(ForecastDataError::CacheRead(path, e)),
        };
        let envelope = serde_json::from_slice::<CacheEnvelope>(&bytes)
            .map_err(|e| ForecastDataError::CacheDecode(path.clone(), e))?;
        info!("Loaded cached envelope for {} from {}", location, path.display());
        Ok(Some(envelope))
    }

    /// Atomically replaces the envelope file for `location`, creating the
    /// cache directory if needed.
    pub async fn save(
        &self,
        location: &Location,
        envelope: &CacheEnvelope,
    ) -> Result<PathBuf, ForecastDataError> {
        ensure_cache_dir_exists(&self.cache_dir).await?;
        let path = self.path_for(location);
        let bytes = serde_json::to_vec_pretty(envelope)
            .map_err(|e| ForecastDataError::CacheEncode(path.clone(), e))?;

        let cache_dir = self.cache_dir.clone();
        let target = path.clone();
        task::spawn_blocking(move || {
            let mut temp_file = NamedTempFile::new_in(&cache_dir)
                .map_err(|e| ForecastDataError::CacheWrite(target.clone(), e))?;
            temp_file
                .write_all(&bytes)
                .map_err(|e| ForecastDataError::CacheWrite(target.clone(), e))?;
            temp_file
                .as_file()
                .sync_all()
                .map_err(|e| ForecastDataError::CacheWrite(target.clone(), e))?;
            temp_file
                .persist(&target)
                .map_err(|e| ForecastDataError::CacheWrite(target.clone(), e.error))?;
            Ok::<(), ForecastDataError>(())
        })
        .await??;

        info!("Wrote envelope for {} to {}", location, path.display());
        Ok(path)
    }
}
