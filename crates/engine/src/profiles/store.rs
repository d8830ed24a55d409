use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::Serialize;
use thiserror::Error;
use tracing::warn;

use super::atomic_io::write_text_atomic;
use super::{GameSettings, PlayerProfile};

const PROFILE_DIR_NAME: &str = "profiles";
const SETTINGS_FILE_NAME: &str = "settings.json";
const PROFILE_FILE_STEM_MAX: usize = 32;

#[derive(Debug, Error)]
pub enum ProfileStoreError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to parse {path} at {json_path}: {detail}")]
    Parse {
        path: PathBuf,
        json_path: String,
        detail: String,
    },
    #[error("failed to encode {path}: {source}")]
    Encode {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// JSON key-value store for player profiles and settings. Records live under
/// a single root directory; a missing file is `None`, not an error, and all
/// writes go through the atomic temp-file path.
#[derive(Debug)]
pub struct ProfileStore {
    root: PathBuf,
}

impl ProfileStore {
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn load_profile(&self, name: &str) -> Result<Option<PlayerProfile>, ProfileStoreError> {
        self.load_json(&self.profile_path(name))
    }

    pub fn save_profile(&self, profile: &PlayerProfile) -> Result<(), ProfileStoreError> {
        self.save_json(&self.profile_path(&profile.name), profile)
    }

    /// Profile names present on disk, sorted. Unreadable directories degrade
    /// to an empty list with a logged warning.
    pub fn list_profiles(&self) -> Vec<String> {
        let dir = self.profiles_dir();
        let entries = match fs::read_dir(&dir) {
            Ok(entries) => entries,
            Err(error) if error.kind() == io::ErrorKind::NotFound => return Vec::new(),
            Err(error) => {
                warn!(path = %dir.display(), error = %error, "profile_dir_unreadable");
                return Vec::new();
            }
        };

        let mut names: Vec<String> = entries
            .filter_map(|entry| entry.ok())
            .map(|entry| entry.path())
            .filter(|path| path.extension().is_some_and(|ext| ext == "json"))
            .filter_map(|path| {
                path.file_stem()
                    .and_then(|stem| stem.to_str())
                    .map(str::to_string)
            })
            .collect();
        names.sort();
        names
    }

    pub fn load_settings(&self) -> Result<Option<GameSettings>, ProfileStoreError> {
        self.load_json(&self.settings_path())
    }

    pub fn save_settings(&self, settings: &GameSettings) -> Result<(), ProfileStoreError> {
        self.save_json(&self.settings_path(), settings)
    }

    fn profiles_dir(&self) -> PathBuf {
        self.root.join(PROFILE_DIR_NAME)
    }

    fn profile_path(&self, name: &str) -> PathBuf {
        self.profiles_dir()
            .join(format!("{}.json", profile_file_stem(name)))
    }

    fn settings_path(&self) -> PathBuf {
        self.root.join(SETTINGS_FILE_NAME)
    }

    fn load_json<T: DeserializeOwned>(&self, path: &Path) -> Result<Option<T>, ProfileStoreError> {
        let raw = match fs::read_to_string(path) {
            Ok(raw) => raw,
            Err(error) if error.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(source) => {
                return Err(ProfileStoreError::Read {
                    path: path.to_path_buf(),
                    source,
                })
            }
        };

        let mut deserializer = serde_json::Deserializer::from_str(&raw);
        match serde_path_to_error::deserialize::<_, T>(&mut deserializer) {
            Ok(value) => Ok(Some(value)),
            Err(error) => {
                let json_path = error.path().to_string();
                Err(ProfileStoreError::Parse {
                    path: path.to_path_buf(),
                    json_path,
                    detail: error.into_inner().to_string(),
                })
            }
        }
    }

    fn save_json<T: Serialize>(&self, path: &Path, value: &T) -> Result<(), ProfileStoreError> {
        let text =
            serde_json::to_string_pretty(value).map_err(|source| ProfileStoreError::Encode {
                path: path.to_path_buf(),
                source,
            })?;
        write_text_atomic(path, &text).map_err(|source| ProfileStoreError::Write {
            path: path.to_path_buf(),
            source,
        })
    }
}

/// File stem for a user-entered profile name: lowercase, alphanumerics kept,
/// everything else folded to `_`, truncated. Keeps names portable across
/// filesystems.
fn profile_file_stem(name: &str) -> String {
    let mut stem: String = name
        .chars()
        .map(|ch| {
            if ch.is_ascii_alphanumeric() {
                ch.to_ascii_lowercase()
            } else {
                '_'
            }
        })
        .take(PROFILE_FILE_STEM_MAX)
        .collect();
    if stem.is_empty() {
        stem.push('_');
    }
    stem
}
