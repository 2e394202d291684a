//! Configuration types for the assistant.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::session::Mode;

/// Top-level configuration for the assistant.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AssistantConfig {
    /// HTTP server settings (served variant).
    pub server: ServerConfig,
    /// Locations of the on-disk resources the actions read and write.
    pub resources: ResourceConfig,
    /// URLs opened by the browser actions.
    pub links: LinkConfig,
    /// Alarm notification settings.
    pub alarm: AlarmConfig,
    /// Dialogue engine settings.
    pub dialogue: DialogueConfig,
    /// Encyclopedia lookup settings.
    pub encyclopedia: EncyclopediaConfig,
}

/// HTTP server configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Bind host.
    pub host: String,
    /// Bind port.
    pub port: u16,
    /// Open the UI in the default browser once the listener is up.
    pub open_ui_on_start: bool,
    /// Acquisition mode the served session starts in.
    ///
    /// The terminal variant prompts for this interactively; a server must
    /// not gate startup on stdin, so it reads the mode from here.
    pub start_mode: Mode,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_owned(),
            port: 5000,
            open_ui_on_start: true,
            start_mode: Mode::Text,
        }
    }
}

/// On-disk resource locations.
///
/// All paths are used as given; relative paths resolve against the working
/// directory, matching how the assistant has always been deployed.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ResourceConfig {
    /// Append-only note log file.
    pub note_file: PathBuf,
    /// Directory of per-program path files (`<name>.txt`).
    pub paths_dir: PathBuf,
    /// Help text returned verbatim by the help action.
    pub help_file: PathBuf,
    /// Directory the play action and alarm sound resolve against.
    pub media_dir: PathBuf,
}

impl Default for ResourceConfig {
    fn default() -> Self {
        Self {
            note_file: PathBuf::from("notes").join("assistant_note.txt"),
            paths_dir: PathBuf::from("paths"),
            help_file: PathBuf::from("help_text").join("help_function_text.txt"),
            media_dir: PathBuf::from("audio"),
        }
    }
}

/// URLs opened by the browser-facing actions.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LinkConfig {
    /// Home page opened by the plain browser action.
    pub home_url: String,
    /// Search results prefix; the cleaned query is appended verbatim.
    pub search_url_prefix: String,
    /// Webmail page opened by the email action.
    pub webmail_url: String,
}

impl Default for LinkConfig {
    fn default() -> Self {
        Self {
            home_url: "https://www.google.com".to_owned(),
            search_url_prefix: "https://letmegooglethat.com/?q=".to_owned(),
            webmail_url: "https://gmail.com".to_owned(),
        }
    }
}

/// Alarm notification configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AlarmConfig {
    /// Sound file (relative to the media directory) opened when the alarm fires.
    pub sound_file: String,
}

impl Default for AlarmConfig {
    fn default() -> Self {
        Self {
            sound_file: "Loud_Alarm_Clock_Buzzer.mp3".to_owned(),
        }
    }
}

/// Dialogue engine configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DialogueConfig {
    /// Endpoint of the dialogue-response service.
    ///
    /// When `None`, the canned fallback engine answers every chat turn.
    pub endpoint: Option<String>,
}

/// Encyclopedia lookup configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EncyclopediaConfig {
    /// Base URL of the encyclopedia REST service.
    pub base_url: String,
}

impl Default for EncyclopediaConfig {
    fn default() -> Self {
        Self {
            base_url: "https://en.wikipedia.org".to_owned(),
        }
    }
}

impl AssistantConfig {
    /// Load configuration from a TOML file, falling back to defaults for missing fields.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: &std::path::Path) -> crate::error::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|e| crate::error::AssistantError::Config(e.to_string()))
    }

    /// Save configuration to a TOML file, creating parent directories as needed.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written or the config cannot be serialized.
    pub fn save_to_file(&self, path: &std::path::Path) -> crate::error::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)
            .map_err(|e| crate::error::AssistantError::Config(e.to_string()))?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Returns the default config file path: `<config dir>/vai/config.toml`.
    pub fn default_config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("/tmp/vai-config"))
            .join("vai")
            .join("config.toml")
    }

    /// Load from the default path, or fall back to defaults when the file
    /// does not exist yet.
    ///
    /// # Errors
    ///
    /// Returns an error only when a config file exists but cannot be parsed.
    pub fn load_default() -> crate::error::Result<Self> {
        let path = Self::default_config_path();
        if path.exists() {
            Self::from_file(&path)
        } else {
            Ok(Self::default())
        }
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used)]

    use super::*;

    #[test]
    fn default_config_is_valid() {
        let config = AssistantConfig::default();
        assert_eq!(config.server.port, 5000);
        assert_eq!(config.server.start_mode, Mode::Text);
        assert!(config.links.search_url_prefix.ends_with("?q="));
        assert!(config.resources.note_file.ends_with("assistant_note.txt"));
        assert!(config.dialogue.endpoint.is_none());
    }

    #[test]
    fn save_and_load_round_trip() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("config.toml");

        let mut config = AssistantConfig::default();
        config.server.port = 8123;
        config.server.start_mode = Mode::Voice;
        config.dialogue.endpoint = Some("http://localhost:9000".to_owned());
        config.save_to_file(&path).expect("save");

        let loaded = AssistantConfig::from_file(&path).expect("load");
        assert_eq!(loaded.server.port, 8123);
        assert_eq!(loaded.server.start_mode, Mode::Voice);
        assert_eq!(
            loaded.dialogue.endpoint.as_deref(),
            Some("http://localhost:9000")
        );
    }

    #[test]
    fn partial_file_fills_defaults() {
        let config: AssistantConfig = toml::from_str("[server]\nport = 9000\n").unwrap();
        assert_eq!(config.server.port, 9000);
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.links.home_url, "https://www.google.com");
    }

    #[test]
    fn empty_file_is_all_defaults() {
        let config: AssistantConfig = toml::from_str("").unwrap();
        assert_eq!(config.server.port, 5000);
        assert_eq!(config.alarm.sound_file, "Loud_Alarm_Clock_Buzzer.mp3");
    }
}
