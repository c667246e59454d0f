//! Settings types and file-system paths.
//!
//! The host application owns persistence: every button carries whatever
//! settings the user gave it, and hands them to this crate as JSON on each
//! press. The standalone binary reads the same shape from a TOML file.

mod error;
mod paths;

pub use error::ConfigError;
pub use paths::ConfigPaths;

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::services::mpris::{PlayerSelection, SelectionPolicy};

/// Per-action settings handed over by the host.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ActionSettings {
    /// Separator between title and artist on info buttons.
    pub separator: String,

    /// Restrict actions to players whose identity contains this string.
    pub player: Option<String>,

    /// Tie-break policy when several players are available.
    pub selection: SelectionPolicy,

    /// List of player bus name patterns to ignore during discovery.
    pub ignored_players: Vec<String>,

    /// Override for the artwork cache directory.
    pub artwork_cache_dir: Option<PathBuf>,
}

impl Default for ActionSettings {
    fn default() -> Self {
        Self {
            separator: " - ".to_string(),
            player: None,
            selection: SelectionPolicy::default(),
            ignored_players: Vec::new(),
            artwork_cache_dir: None,
        }
    }
}

impl ActionSettings {
    /// Deserialize settings as stored by the host.
    ///
    /// Hosts persist settings opaquely and may hand back stale shapes from
    /// older plugin versions; anything missing or malformed falls back to
    /// the defaults rather than failing the button press.
    pub fn from_host_value(value: serde_json::Value) -> Self {
        serde_json::from_value(value).unwrap_or_default()
    }

    /// Load settings from a TOML file (used by the standalone binary).
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the file cannot be read or parsed
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path)?;
        toml::from_str(&raw).map_err(|e| ConfigError::toml_parse(e, Some(path)))
    }

    /// Player selection derived from these settings.
    pub fn selection(&self) -> PlayerSelection {
        PlayerSelection {
            policy: self.selection,
            player: self.player.clone(),
            ignored: self.ignored_players.clone(),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_sensible() {
        let settings = ActionSettings::default();
        assert_eq!(settings.separator, " - ");
        assert_eq!(settings.player, None);
        assert_eq!(settings.selection, SelectionPolicy::PreferPlaying);
        assert!(settings.ignored_players.is_empty());
    }

    #[test]
    fn host_values_deserialize_partially() {
        let settings = ActionSettings::from_host_value(serde_json::json!({
            "separator": " | ",
            "selection": "first-available",
        }));

        assert_eq!(settings.separator, " | ");
        assert_eq!(settings.selection, SelectionPolicy::FirstAvailable);
        assert_eq!(settings.player, None);
    }

    #[test]
    fn malformed_host_values_fall_back_to_defaults() {
        let settings = ActionSettings::from_host_value(serde_json::json!("not an object"));
        assert_eq!(settings.separator, " - ");
    }

    #[test]
    fn loads_settings_from_toml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            r#"
separator = " / "
player = "spotify"
ignored_players = ["playerctld"]
"#,
        )
        .unwrap();

        let settings = ActionSettings::load(&path).unwrap();
        assert_eq!(settings.separator, " / ");
        assert_eq!(settings.player.as_deref(), Some("spotify"));
        assert_eq!(settings.ignored_players, vec!["playerctld".to_string()]);

        let selection = settings.selection();
        assert_eq!(selection.player.as_deref(), Some("spotify"));
        assert_eq!(selection.ignored, vec!["playerctld".to_string()]);
    }

    #[test]
    fn rejects_malformed_toml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "separator = ").unwrap();

        assert!(matches!(
            ActionSettings::load(&path),
            Err(ConfigError::TomlParse(_))
        ));
    }
}
