use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, warn};

use mandelview_core::{EngineConfig, View};

// ---------------------------------------------------------------------------
// Application preferences
// ---------------------------------------------------------------------------

/// Settings persisted between sessions as `preferences.json`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppPreferences {
    /// Frame size, iteration cap, detail levels and worker count. The window
    /// opens at the frame size.
    #[serde(default)]
    pub engine: EngineConfig,
    #[serde(default = "default_true")]
    pub restore_last_view: bool,
    #[serde(default)]
    pub last_view: Option<View>,
    #[serde(default = "default_true")]
    pub show_hud: bool,
}

fn default_true() -> bool {
    true
}

impl Default for AppPreferences {
    fn default() -> Self {
        Self {
            engine: EngineConfig::default(),
            restore_last_view: true,
            last_view: None,
            show_hud: true,
        }
    }
}

impl AppPreferences {
    /// Load preferences from next to the executable, falling back to defaults.
    pub fn load() -> Self {
        Self::load_from(&config_path())
    }

    fn load_from(path: &Path) -> Self {
        if !path.exists() {
            debug!("No preferences file at {}", path.display());
            return Self::default();
        }
        let json = match fs::read_to_string(path) {
            Ok(json) => json,
            Err(e) => {
                error!("Failed to read preferences file: {e}");
                return Self::default();
            }
        };
        match Self::from_json(&json) {
            Ok(prefs) => {
                info!("Loaded preferences from {}", path.display());
                prefs
            }
            Err(e) => {
                error!("Failed to parse preferences: {e}");
                Self::default()
            }
        }
    }

    /// Parse preferences, replacing an engine config that would not start.
    fn from_json(json: &str) -> serde_json::Result<Self> {
        let mut prefs: AppPreferences = serde_json::from_str(json)?;
        if let Err(e) = prefs.engine.validate() {
            warn!("Ignoring saved engine settings: {e}");
            prefs.engine = EngineConfig::default();
        }
        Ok(prefs)
    }

    /// Persist preferences to disk.
    pub fn save(&self) {
        self.save_to(&config_path());
    }

    fn save_to(&self, path: &Path) {
        if let Some(parent) = path.parent() {
            if let Err(e) = fs::create_dir_all(parent) {
                error!("Failed to create config directory: {e}");
                return;
            }
        }
        match serde_json::to_string_pretty(self) {
            Ok(json) => {
                if let Err(e) = fs::write(path, &json) {
                    error!("Failed to write preferences: {e}");
                } else {
                    debug!("Saved preferences");
                }
            }
            Err(e) => error!("Failed to serialize preferences: {e}"),
        }
    }
}

fn config_path() -> PathBuf {
    crate::app_dir::exe_directory().join("preferences.json")
}

#[cfg(test)]
mod tests {
    use super::*;
    use mandelview_core::Complex;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("mandelview-{}-{name}", std::process::id()))
    }

    #[test]
    fn empty_object_gives_defaults() {
        assert_eq!(AppPreferences::from_json("{}").unwrap(), AppPreferences::default());
    }

    #[test]
    fn partial_engine_section_keeps_other_defaults() {
        let prefs =
            AppPreferences::from_json(r#"{ "engine": { "width": 800, "height": 600 } }"#).unwrap();
        assert_eq!(prefs.engine.width, 800);
        assert_eq!(prefs.engine.height, 600);
        assert_eq!(prefs.engine.max_iterations, EngineConfig::DEFAULT_MAX_ITERATIONS);
        assert!(prefs.restore_last_view);
    }

    #[test]
    fn invalid_engine_settings_fall_back() {
        let prefs = AppPreferences::from_json(r#"{ "engine": { "width": 0 } }"#).unwrap();
        assert_eq!(prefs.engine, EngineConfig::default());
    }

    #[test]
    fn garbage_file_loads_defaults() {
        let path = temp_path("garbage.json");
        fs::write(&path, "not json").unwrap();
        assert_eq!(AppPreferences::load_from(&path), AppPreferences::default());
        let _ = fs::remove_file(&path);
    }

    #[test]
    fn saved_preferences_load_back() {
        let path = temp_path("roundtrip.json");
        let prefs = AppPreferences {
            last_view: Some(View::new(Complex::new(-0.75, 0.1), 12.0).unwrap()),
            show_hud: false,
            ..AppPreferences::default()
        };
        prefs.save_to(&path);
        assert_eq!(AppPreferences::load_from(&path), prefs);
        let _ = fs::remove_file(&path);
    }
}
