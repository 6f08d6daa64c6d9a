//! Error types for data loading and configuration.
//!
//! The chart itself never fails: drawing without data is logged and ignored.
//! These errors belong to the collaborators that feed it.

use std::path::PathBuf;
use thiserror::Error;

/// Errors produced while reading input files.
#[derive(Debug, Error)]
pub enum DataError {
    /// File could not be read.
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Record file is not valid JSON for the expected shape.
    #[error("invalid quake records: {0}")]
    Json(#[from] simd_json::Error),

    /// GeoJSON could not be parsed.
    #[error("invalid GeoJSON: {0}")]
    GeoJson(#[from] geojson::Error),

    /// A tab-separated row is malformed.
    #[error("line {line}: {reason}")]
    Row { line: usize, reason: String },

    /// The region-name file has no `id`, `name` and `code` columns.
    #[error("missing column `{0}` in header")]
    MissingColumn(&'static str),

    /// A color string is not `#rgb` or `#rrggbb`.
    #[error("invalid color `{0}`")]
    Color(String),
}

/// Errors produced while loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("unknown projection `{0}` (expected natural-earth, equirectangular or orthographic)")]
    Projection(String),

    #[error("unknown value field `{0}` (expected value, mag or depth)")]
    ValueField(String),

    #[error(transparent)]
    Color(#[from] DataError),
}

/// Error reporter collaborator: log the error and return the banner text the
/// UI shows above the map.
pub fn report_error(error: &anyhow::Error) -> String {
    tracing::error!("{error:#}");
    format!("Error: {error:#}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_error_banner() {
        let err = anyhow::Error::new(DataError::Color("#zz".into()));
        assert_eq!(report_error(&err), "Error: invalid color `#zz`");
    }

    #[test]
    fn test_row_error_display() {
        let err = DataError::Row {
            line: 3,
            reason: "bad id".into(),
        };
        assert_eq!(err.to_string(), "line 3: bad id");
    }
}
