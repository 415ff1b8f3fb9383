use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::analysis::arima::ArimaOrder;

/// Optional overrides are read from this file in the working directory.
pub const CONFIG_FILE: &str = "peatland.json";

// ---------------------------------------------------------------------------
// Dashboard configuration
// ---------------------------------------------------------------------------

/// Every field has a default, so a partial `peatland.json` is fine.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    pub window_title: String,
    /// Directory image file names are resolved against.
    pub image_dir: PathBuf,
    pub hero_image: String,
    pub ndmi_diff_map: String,
    pub ndwi_diff_map: String,
    pub ndvi_diff_map: String,
    pub forecast_order: ArimaOrder,
    pub forecast_horizon: usize,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            window_title: "Peatland Monitoring".to_string(),
            image_dir: PathBuf::from("assets"),
            hero_image: "peatland-7.jpg".to_string(),
            ndmi_diff_map: "ndmi_diff_map.png".to_string(),
            ndwi_diff_map: "ndwi_diff_map.png".to_string(),
            ndvi_diff_map: "ndvi_diff_map.png".to_string(),
            forecast_order: ArimaOrder::default(),
            forecast_horizon: 2,
        }
    }
}

impl DashboardConfig {
    /// Parse a config file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?;
        serde_json::from_str(&text).with_context(|| format!("parsing {}", path.display()))
    }

    /// Load `peatland.json` from the working directory if it exists.
    ///
    /// A malformed file is logged and ignored rather than aborting startup.
    pub fn load_or_default() -> Self {
        let path = Path::new(CONFIG_FILE);
        if !path.exists() {
            return Self::default();
        }
        match Self::from_file(path) {
            Ok(cfg) => {
                log::info!("Loaded configuration from {}", path.display());
                cfg
            }
            Err(e) => {
                log::error!("Ignoring invalid configuration: {e:#}");
                Self::default()
            }
        }
    }

    /// Full path of an image file name.
    pub fn image_path(&self, file_name: &str) -> PathBuf {
        self.image_dir.join(file_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_file_keeps_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        std::fs::write(
            &path,
            r#"{ "image_dir": "/data/site", "forecast_order": { "p": 2, "d": 1, "q": 0 } }"#,
        )
        .unwrap();

        let cfg = DashboardConfig::from_file(&path).unwrap();
        assert_eq!(cfg.image_dir, PathBuf::from("/data/site"));
        assert_eq!(cfg.forecast_order, ArimaOrder::new(2, 1, 0));
        assert_eq!(cfg.forecast_horizon, 2);
        assert_eq!(cfg.hero_image, "peatland-7.jpg");
        assert_eq!(cfg.image_path("x.png"), PathBuf::from("/data/site/x.png"));
    }

    #[test]
    fn malformed_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        std::fs::write(&path, "{ not json").unwrap();
        let err = DashboardConfig::from_file(&path).unwrap_err();
        assert!(format!("{err:#}").contains("parsing"));
    }
}
