//! Controller configuration, loaded from TOML.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Duration;

use crate::geometry::{RadiusMethod, DEFAULT_RADIUS_M};
use crate::models::BoundaryStyle;

/// Which shape the pointer draws
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DrawMode {
    /// Drag from one corner to the opposite corner
    #[default]
    Rectangle,
    /// Trace a polygon with a continuous path
    Freehand,
    /// Drag outward from the center
    Circle,
}

/// Which shape a place selection produces
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlaceShape {
    #[default]
    Rectangle,
    /// Four-corner polygon following the computed bounds
    Polygon,
    Circle,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(default)]
pub struct ControllerConfig {
    pub draw_mode: DrawMode,
    pub place_shape: PlaceShape,
    pub radius_method: RadiusMethod,
    /// Radius for places that have a location but no viewport
    pub default_radius_m: f64,
    /// Seconds before the instruction banner hides itself
    pub banner_delay_secs: u64,
    /// Put the previous boundary back when a drawing is cancelled
    pub restore_on_cancel: bool,
    pub min_freehand_points: usize,
    pub style: BoundaryStyle,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            draw_mode: DrawMode::default(),
            place_shape: PlaceShape::default(),
            radius_method: RadiusMethod::default(),
            default_radius_m: DEFAULT_RADIUS_M,
            banner_delay_secs: 5,
            restore_on_cancel: true,
            min_freehand_points: 3,
            style: BoundaryStyle::default(),
        }
    }
}

impl ControllerConfig {
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path).context("Failed to read config file")?;
        let config: ControllerConfig =
            toml::from_str(&content).context("Failed to parse config file")?;
        Ok(config)
    }

    pub fn banner_delay(&self) -> Duration {
        Duration::from_secs(self.banner_delay_secs)
    }
}
