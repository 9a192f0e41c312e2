//! View configuration loaded from TOML.

use std::path::Path;

use serde::Deserialize;

use archview_error::{Error, Result};

use crate::zoom::ZoomLevel;

/// Storage key the preference subset is saved under.
pub const DEFAULT_STORAGE_KEY: &str = "architecture-view-storage";

/// Layer names shown by default.
pub const DEFAULT_LAYERS: [&str; 3] = ["services", "dependencies", "labels"];

/// Options controlling store defaults and viewport limits.
///
/// Every field is optional in TOML; missing fields take the defaults below.
///
/// ```toml
/// storage_key = "architecture-view-storage"
/// default_zoom = 2
/// default_layers = ["services", "dependencies", "labels"]
/// show_minimap = true
/// show_legend = true
/// min_scale = 0.1
/// max_scale = 10.0
/// zoom_step = 1.2
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ViewConfig {
    pub storage_key: String,
    pub default_zoom: ZoomLevel,
    pub default_layers: Vec<String>,
    pub show_minimap: bool,
    pub show_legend: bool,
    pub min_scale: f64,
    pub max_scale: f64,
    /// Multiplicative factor used by viewport zoom in/out helpers.
    pub zoom_step: f64,
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            default_zoom: ZoomLevel::default(),
            default_layers: DEFAULT_LAYERS.iter().map(|s| s.to_string()).collect(),
            show_minimap: true,
            show_legend: true,
            min_scale: 0.1,
            max_scale: 10.0,
            zoom_step: 1.2,
        }
    }
}

impl ViewConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_toml_str(text: &str) -> Result<Self> {
        let config: ViewConfig = toml::from_str(text).map_err(|err| {
            Error::config_invalid(err.to_string())
                .with_operation("config::from_toml_str")
                .set_source(err)
        })?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .map_err(|err| Error::from(err).with_context("path", path.display().to_string()))?;
        Self::from_toml_str(&text)
            .map_err(|err| err.with_context("path", path.display().to_string()))
    }

    /// Reject settings the store cannot honour.
    pub fn validate(&self) -> Result<()> {
        if self.storage_key.trim().is_empty() {
            return Err(Error::config_invalid("storage_key must not be blank"));
        }
        if !(self.min_scale > 0.0 && self.min_scale <= self.max_scale) {
            return Err(Error::config_invalid(format!(
                "scale range {}..{} is invalid",
                self.min_scale, self.max_scale
            )));
        }
        if self.zoom_step <= 1.0 {
            return Err(Error::config_invalid("zoom_step must be greater than 1.0"));
        }
        Ok(())
    }

    pub fn with_storage_key(mut self, key: impl Into<String>) -> Self {
        self.storage_key = key.into();
        self
    }

    pub fn with_default_zoom(mut self, level: ZoomLevel) -> Self {
        self.default_zoom = level;
        self
    }

    pub fn with_scale_range(mut self, min: f64, max: f64) -> Self {
        self.min_scale = min;
        self.max_scale = max;
        self
    }

    /// Clamp `scale` into the configured range. The bounds are taken in
    /// either order, so an unvalidated config never panics here.
    pub fn clamp_scale(&self, scale: f64) -> f64 {
        let lo = self.min_scale.min(self.max_scale);
        let hi = self.min_scale.max(self.max_scale);
        scale.max(lo).min(hi)
    }
}
