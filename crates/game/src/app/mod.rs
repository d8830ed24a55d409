mod gameplay;
mod menu;
mod profile_select;
mod session;
mod settings;
#[cfg(test)]
mod testutil;

use ember_engine::{Scene, SceneKey};

pub use gameplay::GameplayScene;
pub use menu::MenuScene;
pub use profile_select::ProfileSelectScene;
pub use session::{new_session, RunSummary, SessionHandle, SessionState};
pub use settings::SettingsScene;

/// All four scenes wired to one shared session, in registration order.
pub fn build_scenes(session: &SessionHandle) -> Vec<(SceneKey, Box<dyn Scene>)> {
    vec![
        (
            SceneKey::Menu,
            Box::new(MenuScene::new(session.clone())) as Box<dyn Scene>,
        ),
        (
            SceneKey::ProfileSelect,
            Box::new(ProfileSelectScene::new(session.clone())),
        ),
        (
            SceneKey::Settings,
            Box::new(SettingsScene::new(session.clone())),
        ),
        (
            SceneKey::Gameplay,
            Box::new(GameplayScene::new(session.clone())),
        ),
    ]
}
