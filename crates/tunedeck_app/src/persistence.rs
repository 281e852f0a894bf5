use std::fs;
use std::io::Write;
use std::path::Path;

use client_logging::{client_error, client_info, client_warn};
use serde::{Deserialize, Serialize};
use tunedeck_core::Theme;

const PREFS_FILENAME: &str = ".tunedeck_prefs.ron";

/// Local-only preferences; everything else lives on the backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Preferences {
    pub server_url: String,
    pub user: Option<String>,
    pub theme: Theme,
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            server_url: "ws://localhost:5002/channel".to_string(),
            user: None,
            theme: Theme::Dark,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct PersistedPrefs {
    server_url: String,
    user: Option<String>,
    dark_theme: bool,
}

pub fn load_preferences(dir: &Path) -> Preferences {
    let path = dir.join(PREFS_FILENAME);
    let content = match fs::read_to_string(&path) {
        Ok(text) => text,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            return Preferences::default();
        }
        Err(err) => {
            client_warn!("Failed to read preferences from {:?}: {}", path, err);
            return Preferences::default();
        }
    };

    let persisted: PersistedPrefs = match ron::from_str(&content) {
        Ok(persisted) => persisted,
        Err(err) => {
            client_warn!("Failed to parse preferences from {:?}: {}", path, err);
            return Preferences::default();
        }
    };

    client_info!("Loaded preferences from {:?}", path);
    Preferences {
        server_url: persisted.server_url,
        user: persisted.user,
        theme: if persisted.dark_theme {
            Theme::Dark
        } else {
            Theme::Light
        },
    }
}

pub fn save_preferences(dir: &Path, prefs: &Preferences) {
    let persisted = PersistedPrefs {
        server_url: prefs.server_url.clone(),
        user: prefs.user.clone(),
        dark_theme: matches!(prefs.theme, Theme::Dark),
    };

    let pretty = ron::ser::PrettyConfig::new();
    let content = match ron::ser::to_string_pretty(&persisted, pretty) {
        Ok(text) => text,
        Err(err) => {
            client_error!("Failed to serialize preferences: {}", err);
            return;
        }
    };

    if let Err(err) = write_atomic(dir, PREFS_FILENAME, &content) {
        client_error!("Failed to write preferences to {:?}: {}", dir, err);
    }
}

/// Write-then-rename so a crash mid-save never truncates the prefs file.
fn write_atomic(dir: &Path, filename: &str, content: &str) -> std::io::Result<()> {
    let target = dir.join(filename);
    let mut tmp = tempfile::NamedTempFile::new_in(dir)?;
    tmp.write_all(content.as_bytes())?;
    tmp.flush()?;
    tmp.persist(&target).map_err(|err| err.error)?;
    Ok(())
}
