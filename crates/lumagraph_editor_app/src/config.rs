// SPDX-License-Identifier: MIT OR Apache-2.0
//! Locating and loading the editor settings file.

use lumagraph_editor_graph::settings::SETTINGS_FILE_NAME;
use lumagraph_editor_graph::EditorSettings;
use std::path::{Path, PathBuf};

/// Environment variable overriding the settings file location
pub const SETTINGS_ENV: &str = "LUMAGRAPH_SETTINGS";

/// Settings file to use: `$LUMAGRAPH_SETTINGS`, or `lumagraph.ron` in the
/// working directory
pub fn settings_path() -> PathBuf {
    std::env::var_os(SETTINGS_ENV).map_or_else(|| PathBuf::from(SETTINGS_FILE_NAME), PathBuf::from)
}

/// Load settings, falling back to defaults when the file is missing or bad
pub fn load_settings(path: &Path) -> EditorSettings {
    match EditorSettings::load(path) {
        Ok(settings) => {
            tracing::info!("Loaded settings from {}", path.display());
            settings
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!("No settings at {}, using defaults", path.display());
            EditorSettings::default()
        }
        Err(e) => {
            tracing::warn!("Ignoring settings at {}: {e}", path.display());
            EditorSettings::default()
        }
    }
}
