use std::fs::File;
use std::path::Path;

use crate::error::{CleanerError, Result};
use crate::segment_filter::SpeedThreshold;

/// Reasonable upper limit for running activities.
pub const DEFAULT_MAX_THRESHOLD_KMH: f64 = 100.0;

/// Checks that `path` exists, has a `.gpx` extension, is a regular file and
/// can be opened for reading.
pub fn validate_gpx_file(path: &Path) -> Result<()> {
    if !path.exists() {
        return Err(CleanerError::FileNotFound(path.to_path_buf()));
    }

    let is_gpx = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.eq_ignore_ascii_case("gpx"))
        .unwrap_or(false);
    if !is_gpx {
        return Err(CleanerError::WrongExtension(path.to_path_buf()));
    }

    if !path.is_file() {
        return Err(CleanerError::NotAFile(path.to_path_buf()));
    }

    File::open(path).map_err(|source| CleanerError::Unreadable {
        path: path.to_path_buf(),
        source,
    })?;

    Ok(())
}

pub fn validate_speed_threshold(kmh: f64, max_kmh: f64) -> Result<SpeedThreshold> {
    let threshold = SpeedThreshold::new(kmh)?;

    if threshold.kmh() > max_kmh {
        return Err(CleanerError::InvalidThreshold(format!(
            "Speed threshold too high for running activity ({} > {})",
            kmh, max_kmh
        )));
    }

    Ok(threshold)
}
