//! Runtime settings
//!
//! Where files live and how the headless runner behaves. Loaded from a JSON
//! file next to the binary; anything missing or unreadable falls back to
//! defaults.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// File holding the single best score as plain text
    pub high_score_path: PathBuf,
    /// Optional balance overrides (see [`crate::Tuning`])
    pub tuning_path: PathBuf,
    /// Obstacle RNG seed; `None` picks one from the clock
    pub seed: Option<u64>,
    /// Frame cap for the headless runner
    pub max_frames: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            high_score_path: PathBuf::from("highscore.dat"),
            tuning_path: PathBuf::from("tuning.json"),
            seed: None,
            max_frames: 60 * 60,
        }
    }
}

impl Settings {
    /// Default settings file name
    pub const FILE_NAME: &'static str = "slope-rider.json";

    /// Load settings from a JSON file
    pub fn load(path: &Path) -> Self {
        if let Ok(json) = std::fs::read_to_string(path) {
            match serde_json::from_str(&json) {
                Ok(settings) => {
                    log::info!("Loaded settings from {}", path.display());
                    return settings;
                }
                Err(e) => log::warn!("Ignoring malformed settings {}: {}", path.display(), e),
            }
        }

        log::info!("Using default settings");
        Self::default()
    }

    /// Save settings as pretty JSON
    pub fn save(&self, path: &Path) -> std::io::Result<()> {
        let json = serde_json::to_string_pretty(self).map_err(std::io::Error::other)?;
        std::fs::write(path, json)?;
        log::info!("Settings saved");
        Ok(())
    }

    /// Seed to use for this run
    pub fn effective_seed(&self) -> u64 {
        self.seed.unwrap_or_else(|| {
            std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)
                .map(|d| d.as_nanos() as u64)
                .unwrap_or(0)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_settings_json() {
        let settings: Settings = serde_json::from_str(r#"{ "seed": 7 }"#).unwrap();
        assert_eq!(settings.seed, Some(7));
        assert_eq!(settings.high_score_path, PathBuf::from("highscore.dat"));
        assert_eq!(settings.effective_seed(), 7);
    }

    #[test]
    fn test_settings_round_trip_through_file() {
        let path = std::env::temp_dir().join(format!("slope-rider-settings-{}.json", std::process::id()));
        let settings = Settings {
            seed: Some(42),
            max_frames: 10,
            ..Default::default()
        };
        settings.save(&path).unwrap();
        assert_eq!(Settings::load(&path), settings);
        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn test_missing_settings_file() {
        assert_eq!(Settings::load(Path::new("/nonexistent/slope-rider.json")), Settings::default());
    }
}
