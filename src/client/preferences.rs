//! Settings that the client keeps between sessions.

use std::{
    fs, io,
    path::{Path, PathBuf},
};

use serde::{Deserialize, Serialize};

/// The number of expenses per page when no preference has been saved.
pub const DEFAULT_ITEMS_PER_PAGE: u64 = 10;

/// The errors from reading or writing the preferences file.
#[derive(Debug, thiserror::Error)]
pub enum PreferencesError {
    /// The file could not be read or written.
    #[error("could not access the preferences file: {0}")]
    Io(#[from] io::Error),

    /// The file does not hold valid preferences.
    #[error("could not parse the preferences file: {0}")]
    Json(#[from] serde_json::Error),
}

/// The client's saved settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Preferences {
    /// How many expenses to show on each page.
    pub items_per_page: u64,
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            items_per_page: DEFAULT_ITEMS_PER_PAGE,
        }
    }
}

/// A JSON file holding [Preferences].
#[derive(Debug, Clone)]
pub struct PreferencesFile {
    path: PathBuf,
}

impl PreferencesFile {
    /// Use the file at `path`. The file does not need to exist yet.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The location of the file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the saved preferences, or the defaults if nothing has been saved.
    ///
    /// # Errors
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load(&self) -> Result<Preferences, PreferencesError> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(error) if error.kind() == io::ErrorKind::NotFound => {
                return Ok(Preferences::default());
            }
            Err(error) => return Err(error.into()),
        };

        let mut preferences: Preferences = serde_json::from_str(&content)?;
        if preferences.items_per_page == 0 {
            preferences.items_per_page = DEFAULT_ITEMS_PER_PAGE;
        }

        Ok(preferences)
    }

    /// Write `preferences` to the file, creating parent directories as needed.
    ///
    /// # Errors
    /// Returns an error if the file cannot be written.
    pub fn save(&self, preferences: &Preferences) -> Result<(), PreferencesError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }

        fs::write(&self.path, serde_json::to_string_pretty(preferences)?)?;

        Ok(())
    }
}
