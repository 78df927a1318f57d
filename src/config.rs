//! Application configuration

use crate::error::ConfigError;
use crate::layer::Extent;
use crate::map::Basemap;
use crate::view::Point;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const WINE_REGIONS_URL: &str = "http://services.arcgis.com/OLiydejKCZTGhvWg/arcgis/rest/services/WeinanbauGebiete/FeatureServer/0";

/// Initial camera of a view
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ViewConfig {
    pub center: Point,
    pub zoom: f64,
}

/// The operational layer revealed once the map view is ready
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayerConfig {
    pub url: String,
    pub title: Option<String>,
    pub where_clause: String,
    pub out_fields: Vec<String>,
    /// Precomputed extent of the layer's features
    pub extent: Option<Extent>,
}

impl Default for LayerConfig {
    fn default() -> Self {
        Self {
            url: WINE_REGIONS_URL.to_string(),
            title: Some("Wine regions".to_string()),
            where_clause: "1=1".to_string(),
            out_fields: vec!["*".to_string()],
            extent: Some(Extent::new(5.9, 47.4, 13.9, 52.6)),
        }
    }
}

/// Application configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub basemap: Basemap,
    pub map_view: ViewConfig,
    /// Where the scene camera starts before its intro flight
    pub scene_intro: ViewConfig,
    pub scene_view: ViewConfig,
    pub layer: LayerConfig,
    /// Camera smoothing factor (0.0-1.0, higher = faster)
    pub smoothing: f64,
    /// Interval between view ticks in milliseconds
    pub tick_ms: u64,
}

impl Default for Config {
    fn default() -> Self {
        let los_angeles = Point::new(-118.244, 34.052);
        Self {
            basemap: Basemap::Gray,
            map_view: ViewConfig {
                center: los_angeles,
                zoom: 12.0,
            },
            scene_intro: ViewConfig {
                center: Point::with_z(0.0, 20.0, 20_000_000.0),
                zoom: 1.0,
            },
            scene_view: ViewConfig {
                center: Point::with_z(-118.244, 34.052, 5_000.0),
                zoom: 12.0,
            },
            layer: LayerConfig::default(),
            smoothing: 0.08,
            tick_ms: 16,
        }
    }
}

impl Config {
    /// Load config from file or create default
    pub fn load() -> Self {
        let config_path = Self::config_path();

        if config_path.exists() {
            match Self::load_from(&config_path) {
                Ok(config) => return config,
                Err(e) => tracing::warn!("Falling back to default config: {e}"),
            }
        }

        Self::default()
    }

    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&contents).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Save config to the default location
    pub fn save(&self) -> Result<(), ConfigError> {
        self.save_to(&Self::config_path())
    }

    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        let write_err = |source| ConfigError::Write {
            path: path.to_path_buf(),
            source,
        };

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(write_err)?;
        }

        let contents = serde_json::to_string_pretty(self)?;
        std::fs::write(path, contents).map_err(write_err)?;
        tracing::info!("Config saved to {:?}", path);

        Ok(())
    }

    /// Tick interval as seconds, never zero
    pub fn tick_seconds(&self) -> f64 {
        self.tick_ms.max(1) as f64 / 1000.0
    }

    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| dirs::home_dir().unwrap_or_default())
            .join("LinkedViews")
            .join("config.json")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_sample_map() {
        let config = Config::default();
        assert_eq!(config.basemap, Basemap::Gray);
        assert_eq!(config.map_view.center, Point::new(-118.244, 34.052));
        assert_eq!(config.map_view.zoom, 12.0);
        assert_eq!(config.layer.where_clause, "1=1");
        assert_eq!(config.layer.out_fields, vec!["*".to_string()]);
    }

    #[test]
    fn partial_file_fills_in_defaults() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{ "basemap": "Topo", "tick_ms": 33 }"#).expect("write config");

        let config = Config::load_from(&path).expect("load config");
        assert_eq!(config.basemap, Basemap::Topo);
        assert_eq!(config.tick_ms, 33);
        assert_eq!(config.layer, LayerConfig::default());
    }

    #[test]
    fn saved_config_loads_back() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("nested").join("config.json");
        let mut config = Config::default();
        config.smoothing = 0.25;
        config.layer.extent = None;

        config.save_to(&path).expect("save config");
        let loaded = Config::load_from(&path).expect("load config");
        assert_eq!(loaded, config);
    }

    #[test]
    fn malformed_file_is_a_parse_error() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("config.json");
        std::fs::write(&path, "{ not json").expect("write config");

        let err = Config::load_from(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn missing_file_is_a_read_error() {
        let dir = tempfile::tempdir().expect("temp dir");
        let err = Config::load_from(&dir.path().join("absent.json")).unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }

    #[test]
    fn tick_seconds_never_zero() {
        let mut config = Config::default();
        config.tick_ms = 0;
        assert_eq!(config.tick_seconds(), 0.001);
    }
}
