mod atomic_io;
mod store;

use serde::{Deserialize, Serialize};

pub use store::{ProfileStore, ProfileStoreError};

/// Per-player progress, one JSON file per profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerProfile {
    pub name: String,
    #[serde(default)]
    pub runs_played: u32,
    #[serde(default)]
    pub best_survival_seconds: f32,
    #[serde(default)]
    pub embers_banked: u32,
}

impl PlayerProfile {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            runs_played: 0,
            best_survival_seconds: 0.0,
            embers_banked: 0,
        }
    }

    /// Folds one finished run into the profile; returns true when the run
    /// set a new survival record.
    pub fn record_run(&mut self, survival_seconds: f32, embers: u32) -> bool {
        self.runs_played = self.runs_played.saturating_add(1);
        self.embers_banked = self.embers_banked.saturating_add(embers);
        if survival_seconds > self.best_survival_seconds {
            self.best_survival_seconds = survival_seconds;
            true
        } else {
            false
        }
    }
}

/// Player-tunable runtime settings, persisted next to the profiles.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GameSettings {
    pub stick_deadzone: f32,
    pub stick_repeat_seconds: f64,
    pub overlay_visible: bool,
}

impl Default for GameSettings {
    fn default() -> Self {
        Self {
            stick_deadzone: 0.5,
            stick_repeat_seconds: 0.2,
            overlay_visible: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_run_tracks_best_and_totals() {
        let mut profile = PlayerProfile::named("Wren");
        assert!(profile.record_run(42.0, 3));
        assert!(!profile.record_run(30.0, 2));
        assert!(profile.record_run(60.5, 0));

        assert_eq!(profile.runs_played, 3);
        assert_eq!(profile.embers_banked, 5);
        assert!((profile.best_survival_seconds - 60.5).abs() < 0.001);
    }

    #[test]
    fn profile_json_tolerates_missing_fields() {
        let profile: PlayerProfile =
            serde_json::from_str(r#"{"name":"Old"}"#).expect("parse legacy record");
        assert_eq!(profile.name, "Old");
        assert_eq!(profile.runs_played, 0);
    }
}
