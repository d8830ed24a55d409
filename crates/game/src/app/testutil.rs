use ember_engine::{InputClass, ProfileStore, SceneContext, UiRegistry};

/// Scene-test fixture: a real registry plus a profile store rooted in a
/// temp directory that lives as long as the harness.
pub struct SceneHarness {
    pub ui: UiRegistry,
    pub profiles: ProfileStore,
    _dir: tempfile::TempDir,
}

impl SceneHarness {
    pub fn new() -> Self {
        let dir = tempfile::tempdir().expect("tempdir");
        Self {
            ui: UiRegistry::new(),
            profiles: ProfileStore::new(dir.path().to_path_buf()),
            _dir: dir,
        }
    }

    pub fn ctx(&mut self) -> SceneContext<'_> {
        SceneContext {
            ui: &mut self.ui,
            profiles: &mut self.profiles,
            input_class: InputClass::None,
        }
    }
}
