use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

pub mod app;
pub mod profiles;

pub use app::{
    arbitrator_config_from_settings, draw_widgets, run_app, run_app_with_metrics, text_width,
    AppError, ArbitratorConfig, ArbitratorEvent, Component, ComponentKind, DrawFrame, Entity,
    EntityId, EntityWorld, GamepadButton, GameSystem, InputArbitrator, InputClass, InputSnapshot,
    ItemKind, LoopConfig, LoopMetricsSnapshot, MetricsHandle, NavDirection, PointerButton,
    RawDeviceEvent, Renderer, Scene, SceneCommand, SceneContext, SceneDirector, SceneError,
    SceneKey, ScreenMapper, SystemSchedule, UiEvent, UiRect, UiRegistry, VisualState, Widget,
    WidgetId, WidgetKind, GLYPH_ADVANCE, LINE_ADVANCE, SLOW_FRAME_ENV_VAR, TEXT_HEIGHT, UI_HEIGHT,
    UI_WIDTH,
};
pub use profiles::{GameSettings, PlayerProfile, ProfileStore, ProfileStoreError};

pub const ROOT_ENV_VAR: &str = "EMBERWAKE_ROOT";

const DATA_DIR_NAME: &str = "save";

#[derive(Debug, Clone)]
pub struct AppPaths {
    pub root: PathBuf,
    pub data_dir: PathBuf,
}

#[derive(Debug, Error)]
pub enum StartupError {
    #[error("failed to read environment variable {var}: {source}")]
    EnvVar {
        var: &'static str,
        #[source]
        source: env::VarError,
    },
    #[error("failed to resolve current executable path: {0}")]
    CurrentExe(#[source] std::io::Error),
    #[error("current executable path has no parent directory: {0}")]
    ExeHasNoParent(PathBuf),
    #[error("failed to create save directory at {path}: {source}")]
    CreateDataDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error(
        "EMBERWAKE_ROOT is set but does not point to a valid project root: {path}\n\
A valid root must contain Cargo.toml and a crates/ directory."
    )]
    InvalidEnvRoot { path: PathBuf },
    #[error(
        "Could not detect the project root by walking upward from the executable directory: {start_dir}\n\
Expected a directory containing Cargo.toml and crates/.\n\
Set {env_var} explicitly, for example:\n\
Bash/zsh: export {env_var}=\"/path/to/emberwake\""
    )]
    RootNotFound {
        start_dir: PathBuf,
        env_var: &'static str,
    },
}

/// Resolves the project root and the writable save directory, creating the
/// latter if needed.
pub fn resolve_app_paths() -> Result<AppPaths, StartupError> {
    let root = resolve_root()?;
    let data_dir = root.join(DATA_DIR_NAME);

    fs::create_dir_all(&data_dir).map_err(|source| StartupError::CreateDataDir {
        path: data_dir.clone(),
        source,
    })?;

    Ok(AppPaths { root, data_dir })
}

fn resolve_root() -> Result<PathBuf, StartupError> {
    match env::var(ROOT_ENV_VAR) {
        Ok(value) => {
            let raw = PathBuf::from(value);
            let normalized = normalize_path(&raw);
            if is_repo_marker(&normalized) {
                Ok(normalized)
            } else {
                Err(StartupError::InvalidEnvRoot { path: normalized })
            }
        }
        Err(env::VarError::NotPresent) => {
            let exe = env::current_exe().map_err(StartupError::CurrentExe)?;
            let exe_dir = exe
                .parent()
                .map(Path::to_path_buf)
                .ok_or_else(|| StartupError::ExeHasNoParent(exe.clone()))?;

            for candidate in exe_dir.ancestors() {
                if is_repo_marker(candidate) {
                    return Ok(normalize_path(candidate));
                }
            }

            Err(StartupError::RootNotFound {
                start_dir: normalize_path(&exe_dir),
                env_var: ROOT_ENV_VAR,
            })
        }
        Err(source) => Err(StartupError::EnvVar {
            var: ROOT_ENV_VAR,
            source,
        }),
    }
}

fn is_repo_marker(path: &Path) -> bool {
    path.join("Cargo.toml").is_file() && path.join("crates").is_dir()
}

fn normalize_path(path: &Path) -> PathBuf {
    fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn repo_marker_requires_cargo_toml_and_crates_dir() {
        let dir = tempfile::tempdir().expect("tempdir");
        assert!(!is_repo_marker(dir.path()));

        fs::write(dir.path().join("Cargo.toml"), "[workspace]").expect("write manifest");
        assert!(!is_repo_marker(dir.path()));

        fs::create_dir(dir.path().join("crates")).expect("mkdir");
        assert!(is_repo_marker(dir.path()));
    }

    #[test]
    fn normalize_path_passes_through_missing_paths() {
        let ghost = PathBuf::from("/definitely/not/here");
        assert_eq!(normalize_path(&ghost), ghost);
    }
}
