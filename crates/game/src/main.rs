mod app;

use ember_engine::{
    resolve_app_paths, run_app, GameSettings, LoopConfig, ProfileStore,
};
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use app::{build_scenes, new_session};

fn main() {
    init_tracing();
    info!("=== Emberwake Startup ===");

    let session = new_session(load_settings());
    let scenes = build_scenes(&session);

    if let Err(err) = run_app(LoopConfig::default(), scenes) {
        error!(error = %err, "startup_failed");
        std::process::exit(1);
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_names(true)
        .compact()
        .init();
}

/// The session keeps its own copy of the persisted settings for the settings
/// scene to edit; any load problem degrades to defaults.
fn load_settings() -> GameSettings {
    let paths = match resolve_app_paths() {
        Ok(paths) => paths,
        Err(error) => {
            warn!(error = %error, "app_paths_unresolved; using default settings");
            return GameSettings::default();
        }
    };
    let store = ProfileStore::new(paths.data_dir);
    match store.load_settings() {
        Ok(Some(settings)) => settings,
        Ok(None) => GameSettings::default(),
        Err(error) => {
            warn!(error = %error, "settings_load_failed; using defaults");
            GameSettings::default()
        }
    }
}
