//! Settings file plus command-line overrides.

use std::fs;
use std::path::{Path, PathBuf};

use clap::Parser;
use serde::Deserialize;

use crate::chart::ValueAccessor;
use crate::color::{ColorScale, Rgb};
use crate::error::ConfigError;
use crate::map::{Projection, ProjectionKind};
use crate::scale::SqrtScale;

/// Command-line flags; any flag given wins over the settings file
#[derive(Debug, Default, Parser)]
#[command(name = "quake-map", version, about = "Earthquake symbol map in the terminal")]
pub struct Args {
    /// Settings file (default: <config dir>/quake-map/config.toml)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Landmass GeoJSON
    #[arg(long)]
    pub landmass: Option<PathBuf>,

    /// Quake records (JSON array or GeoJSON FeatureCollection)
    #[arg(long)]
    pub quakes: Option<PathBuf>,

    /// Region names, tab separated with id/name/code columns
    #[arg(long)]
    pub regions: Option<PathBuf>,

    /// natural-earth, equirectangular or orthographic
    #[arg(long)]
    pub projection: Option<String>,

    /// Record field sizing the symbols: value, mag or depth
    #[arg(long)]
    pub value_field: Option<String>,

    /// Log file (the terminal is taken by the map)
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

#[derive(Debug, Default, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub data: DataSettings,
    #[serde(default)]
    pub chart: ChartSettings,
    #[serde(default)]
    pub log: LogSettings,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct DataSettings {
    pub landmass: Option<PathBuf>,
    pub quakes: Option<PathBuf>,
    pub regions: Option<PathBuf>,
}

impl Default for DataSettings {
    fn default() -> Self {
        let data_dir = Path::new("data");
        Self {
            landmass: Some(data_dir.join("land.json")),
            quakes: Some(data_dir.join("quakes.json")),
            regions: Some(data_dir.join("us-state-names.tsv")),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ChartSettings {
    pub projection: String,
    pub value_field: String,
    pub radius_range: (f64, f64),
    pub color_domain: (f64, f64),
    pub color_range: (String, String),
}

impl Default for ChartSettings {
    fn default() -> Self {
        Self {
            projection: "natural-earth".to_string(),
            value_field: "mag".to_string(),
            radius_range: SqrtScale::DEFAULT_RANGE,
            color_domain: ColorScale::DEFAULT_DOMAIN,
            color_range: (
                ColorScale::DEFAULT_RANGE.0.hex(),
                ColorScale::DEFAULT_RANGE.1.hex(),
            ),
        }
    }
}

impl ChartSettings {
    pub fn projection(&self) -> Result<Projection, ConfigError> {
        Ok(self.projection.parse::<ProjectionKind>()?.build())
    }

    pub fn value_accessor(&self) -> Result<ValueAccessor, ConfigError> {
        ValueAccessor::field(&self.value_field)
    }

    pub fn radius_scale(&self) -> SqrtScale {
        SqrtScale::new(self.radius_range)
    }

    pub fn color_scale(&self) -> Result<ColorScale, ConfigError> {
        let low: Rgb = self.color_range.0.parse()?;
        let high: Rgb = self.color_range.1.parse()?;
        Ok(ColorScale::new(self.color_domain, (low, high)))
    }
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct LogSettings {
    pub file: PathBuf,
    /// `EnvFilter` directive used when `RUST_LOG` is unset
    pub filter: String,
}

impl Default for LogSettings {
    fn default() -> Self {
        Self {
            file: dirs::data_local_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join("quake-map")
                .join("quake-map.log"),
            filter: "info".to_string(),
        }
    }
}

impl Settings {
    /// Load the settings file; a missing file means defaults
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&content, path)
    }

    pub fn parse(content: &str, path: &Path) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("quake-map")
            .join("config.toml")
    }

    /// Settings for `args`: file first, then flags on top
    pub fn resolve(args: &Args) -> Result<Self, ConfigError> {
        let path = args.config.clone().unwrap_or_else(Self::config_path);
        let mut settings = Self::load(&path)?;
        settings.apply(args);
        Ok(settings)
    }

    pub fn apply(&mut self, args: &Args) {
        if let Some(p) = &args.landmass {
            self.data.landmass = Some(p.clone());
        }
        if let Some(p) = &args.quakes {
            self.data.quakes = Some(p.clone());
        }
        if let Some(p) = &args.regions {
            self.data.regions = Some(p.clone());
        }
        if let Some(p) = &args.projection {
            self.chart.projection = p.clone();
        }
        if let Some(v) = &args.value_field {
            self.chart.value_field = v.clone();
        }
        if let Some(f) = &args.log_file {
            self.log.file = f.clone();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.chart.radius_range, (5.0, 15.0));
        assert_eq!(settings.chart.color_domain, (0.0, 200.0));
        assert_eq!(settings.chart.color_range.0, "#fde0dd");
        assert_eq!(settings.chart.color_range.1, "#c51b8a");
        assert_eq!(settings.chart.color_scale().unwrap(), ColorScale::default());
        assert_eq!(settings.chart.projection().unwrap().name(), "natural-earth");
    }

    #[test]
    fn test_parse_partial_file() {
        let toml = r#"
            [chart]
            projection = "orthographic"
            radius_range = [2.0, 6.0]

            [log]
            filter = "quake_map=debug"
        "#;
        let settings = Settings::parse(toml, Path::new("config.toml")).unwrap();
        assert_eq!(settings.chart.projection, "orthographic");
        assert_eq!(settings.chart.radius_range, (2.0, 6.0));
        assert_eq!(settings.chart.value_field, "mag");
        assert_eq!(settings.log.filter, "quake_map=debug");
        assert!(settings.data.quakes.is_some());
    }

    #[test]
    fn test_parse_error_is_typed() {
        let err = Settings::parse("[chart\nprojection = 1", Path::new("bad.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn test_invalid_values() {
        let mut chart = ChartSettings::default();
        chart.projection = "mercator".into();
        assert!(matches!(chart.projection(), Err(ConfigError::Projection(_))));
        chart.value_field = "place".into();
        assert!(matches!(chart.value_accessor(), Err(ConfigError::ValueField(_))));
        chart.color_range.0 = "red".into();
        assert!(matches!(chart.color_scale(), Err(ConfigError::Color(_))));
    }

    #[test]
    fn test_flags_override_file() {
        let mut settings = Settings::default();
        let args = Args::parse_from([
            "quake-map",
            "--quakes",
            "week.geojson",
            "--projection",
            "equirectangular",
            "--value-field",
            "depth",
        ]);
        settings.apply(&args);
        assert_eq!(settings.data.quakes, Some(PathBuf::from("week.geojson")));
        assert_eq!(settings.chart.projection, "equirectangular");
        assert_eq!(settings.chart.value_field, "depth");
        assert_eq!(settings.data.regions, DataSettings::default().regions);
    }

    #[test]
    fn test_missing_file_is_default() {
        let settings = Settings::load(Path::new("/no/such/quake-map.toml")).unwrap();
        assert_eq!(settings.chart.projection, "natural-earth");
    }
}
