// SPDX-License-Identifier: MIT OR Apache-2.0
//! Editor settings.
//!
//! Settings are stored as RON and cover:
//! - Canvas grid and zoom behaviour
//! - Node spawn position and size
//! - Link curve shape
//! - Pin sizes

use crate::geometry::{LINK_ARCH, LINK_SEGMENTS};
use crate::pin::PIN_HIT_RADIUS;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Current settings format version
pub const SETTINGS_FORMAT_VERSION: u32 = 1;

/// Default settings file name
pub const SETTINGS_FILE_NAME: &str = "lumagraph.ron";

/// Canvas settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CanvasSettings {
    /// Grid spacing at 100% zoom
    pub grid_spacing: f32,
    /// Zoom change per wheel notch
    pub zoom_step: f32,
    /// Minimum zoom
    pub zoom_min: f32,
    /// Maximum zoom
    pub zoom_max: f32,
    /// Width of the node palette panel
    pub palette_width: f32,
}

impl Default for CanvasSettings {
    fn default() -> Self {
        Self {
            grid_spacing: 20.0,
            zoom_step: 0.1,
            zoom_min: 0.5,
            zoom_max: 2.0,
            palette_width: 260.0,
        }
    }
}

/// Node settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NodeSettings {
    /// Where new nodes appear, relative to the canvas origin
    pub spawn_offset: [f32; 2],
    /// Size of new nodes
    pub size: [f32; 2],
}

impl Default for NodeSettings {
    fn default() -> Self {
        Self {
            spawn_offset: [50.0, 50.0],
            size: [150.0, 250.0],
        }
    }
}

/// Link rendering settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LinkSettings {
    /// Points per rendered curve
    pub segments: usize,
    /// Vertical offset of the control point
    pub arch: f32,
    /// Stroke width
    pub thickness: f32,
}

impl Default for LinkSettings {
    fn default() -> Self {
        Self {
            segments: LINK_SEGMENTS,
            arch: LINK_ARCH,
            thickness: 1.5,
        }
    }
}

/// Pin settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PinSettings {
    /// Hit-test radius
    pub hit_radius: f32,
    /// Drawn radius
    pub draw_radius: f32,
}

impl Default for PinSettings {
    fn default() -> Self {
        Self {
            hit_radius: PIN_HIT_RADIUS,
            draw_radius: 5.0,
        }
    }
}

/// All editor settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorSettings {
    /// Settings format version
    pub version: u32,
    /// Canvas settings
    pub canvas: CanvasSettings,
    /// Node settings
    pub nodes: NodeSettings,
    /// Link settings
    pub links: LinkSettings,
    /// Pin settings
    pub pins: PinSettings,
}

impl Default for EditorSettings {
    fn default() -> Self {
        Self {
            version: SETTINGS_FORMAT_VERSION,
            canvas: CanvasSettings::default(),
            nodes: NodeSettings::default(),
            links: LinkSettings::default(),
            pins: PinSettings::default(),
        }
    }
}

impl EditorSettings {
    /// Parse settings from RON text
    pub fn from_ron(content: &str) -> std::io::Result<Self> {
        let settings: EditorSettings = ron::from_str(content).map_err(|e| {
            std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string())
        })?;

        // Version check
        if settings.version > SETTINGS_FORMAT_VERSION {
            return Err(std::io::Error::new(
                std::io::ErrorKind::InvalidData,
                format!(
                    "Settings version {} is newer than supported version {}",
                    settings.version, SETTINGS_FORMAT_VERSION
                ),
            ));
        }

        Ok(settings)
    }

    /// Load settings from a file
    pub fn load(path: &Path) -> std::io::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_ron(&content)
    }

    /// Save settings to a file
    pub fn save(&self, path: &Path) -> std::io::Result<()> {
        let config = ron::ser::PrettyConfig::default()
            .struct_names(true)
            .enumerate_arrays(false);

        let content = ron::ser::to_string_pretty(self, config).map_err(|e| {
            std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string())
        })?;

        std::fs::write(path, content)
    }

    /// Clamp a zoom level to the configured range
    pub fn clamp_zoom(&self, zoom: f32) -> f32 {
        zoom.max(self.canvas.zoom_min).min(self.canvas.zoom_max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings() {
        let settings = EditorSettings::default();
        assert_eq!(settings.version, SETTINGS_FORMAT_VERSION);
        assert_eq!(settings.links.segments, 30);
        assert_eq!(settings.links.arch, -50.0);
        assert_eq!(settings.nodes.size, [150.0, 250.0]);
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(SETTINGS_FILE_NAME);

        let mut settings = EditorSettings::default();
        settings.canvas.zoom_max = 3.0;
        settings.save(&path).unwrap();

        let loaded = EditorSettings::load(&path).unwrap();
        assert_eq!(loaded, settings);
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let loaded = EditorSettings::from_ron("(links: (segments: 12))").unwrap();
        assert_eq!(loaded.links.segments, 12);
        assert_eq!(loaded.links.arch, LINK_ARCH);
        assert_eq!(loaded.canvas, CanvasSettings::default());
    }

    #[test]
    fn test_newer_version_rejected() {
        let err = EditorSettings::from_ron("(version: 99)").unwrap_err();
        assert_eq!(err.kind(), std::io::ErrorKind::InvalidData);
    }

    #[test]
    fn test_clamp_zoom() {
        let settings = EditorSettings::default();
        assert_eq!(settings.clamp_zoom(0.1), 0.5);
        assert_eq!(settings.clamp_zoom(5.0), 2.0);
        assert_eq!(settings.clamp_zoom(1.3), 1.3);
    }
}
