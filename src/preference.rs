//! The one persisted preference: light or dark theme.
//!
//! Stored as a small JSON document in the user's config directory. The
//! terminal engine never reads it; only the host's theme toggle does.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::{Error, Result};

/// Preference file name within the config directory.
const PREFERENCE_FILENAME: &str = "preferences.json";

/// Color scheme of the host page and terminal window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeMode {
    Light,
    #[default]
    Dark,
}

impl ThemeMode {
    pub fn toggled(self) -> Self {
        match self {
            ThemeMode::Light => ThemeMode::Dark,
            ThemeMode::Dark => ThemeMode::Light,
        }
    }
}

impl fmt::Display for ThemeMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ThemeMode::Light => f.write_str("light"),
            ThemeMode::Dark => f.write_str("dark"),
        }
    }
}

/// On-disk shape of the preference file.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Preferences {
    pub theme: ThemeMode,
}

/// Returns the default preference file path.
///
/// Linux: ~/.config/cv-term/preferences.json
pub fn default_preference_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("cv-term")
        .join(PREFERENCE_FILENAME)
}

/// Read the stored theme, if any.
///
/// A missing file means no preference was ever saved. A file that cannot
/// be read or parsed is logged and treated the same way.
pub fn load_theme(path: &Path) -> Option<ThemeMode> {
    let raw = match fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(e) => {
            debug!(path = %path.display(), error = %e, "no stored preferences");
            return None;
        }
    };
    match serde_json::from_str::<Preferences>(&raw) {
        Ok(prefs) => Some(prefs.theme),
        Err(e) => {
            warn!(path = %path.display(), error = %e, "ignoring malformed preferences");
            None
        }
    }
}

/// Environment variable terminals set to `"<fg>;<bg>"` ANSI color indices.
pub const COLORFGBG_ENV: &str = "COLORFGBG";

/// The terminal's own light or dark preference, when it advertises one.
pub fn system_theme() -> Option<ThemeMode> {
    std::env::var(COLORFGBG_ENV)
        .ok()
        .and_then(|value| theme_from_colorfgbg(&value))
}

/// Classify a `COLORFGBG` value by its background, the last field.
///
/// Indices 7 and 15 are the white backgrounds; the other standard
/// colors read as dark. Anything else, like `default`, says nothing.
pub fn theme_from_colorfgbg(value: &str) -> Option<ThemeMode> {
    let bg: u8 = value.rsplit(';').next()?.trim().parse().ok()?;
    match bg {
        7 | 15 => Some(ThemeMode::Light),
        0..=6 | 8..=14 => Some(ThemeMode::Dark),
        _ => None,
    }
}

/// Starting theme: the explicit choice, else the stored one, else the
/// terminal's, else dark.
pub fn resolve_theme(
    forced: Option<ThemeMode>,
    stored: Option<ThemeMode>,
    system: Option<ThemeMode>,
) -> ThemeMode {
    forced.or(stored).or(system).unwrap_or_default()
}

/// Persist the theme, creating the parent directory if needed.
pub fn save_theme(path: &Path, theme: ThemeMode) -> Result<()> {
    let to_error = |reason: String| Error::Preference {
        path: path.to_path_buf(),
        reason,
    };

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| to_error(e.to_string()))?;
    }
    let json = serde_json::to_string_pretty(&Preferences { theme })
        .map_err(|e| to_error(e.to_string()))?;
    fs::write(path, json).map_err(|e| to_error(e.to_string()))?;
    debug!(path = %path.display(), %theme, "preferences saved");
    Ok(())
}

// ============================================================================
// TESTS
// ============================================================================
