use ember_engine::{
    EntityWorld, InputSnapshot, PlayerProfile, Scene, SceneCommand, SceneContext, SceneKey,
    UiEvent, UiRect, Widget, WidgetId,
};
use tracing::warn;

use super::session::SessionHandle;

const MAX_LISTED_PROFILES: usize = 5;
const TITLE_Y: f32 = 48.0;
const ROW_X: f32 = 220.0;
const ROW_WIDTH: f32 = 200.0;
const ROW_HEIGHT: f32 = 26.0;
const ROW_FIRST_Y: f32 = 88.0;
const ROW_GAP_Y: f32 = 34.0;

pub struct ProfileSelectScene {
    session: SessionHandle,
    widgets: Vec<WidgetId>,
    profile_rows: Vec<(WidgetId, String)>,
    new_button: Option<WidgetId>,
    back_button: Option<WidgetId>,
}

impl ProfileSelectScene {
    pub fn new(session: SessionHandle) -> Self {
        Self {
            session,
            widgets: Vec::new(),
            profile_rows: Vec::new(),
            new_button: None,
            back_button: None,
        }
    }

    /// Loads the picked profile, falling back to a fresh slate when the
    /// record is unreadable (the run must still be playable).
    fn adopt_profile(&mut self, ctx: &mut SceneContext<'_>, name: &str) {
        let profile = match ctx.profiles.load_profile(name) {
            Ok(Some(profile)) => profile,
            Ok(None) => PlayerProfile::named(name),
            Err(error) => {
                warn!(profile = name, error = %error, "profile_load_failed; starting fresh");
                PlayerProfile::named(name)
            }
        };
        self.session.borrow_mut().profile = Some(profile);
    }

    fn create_profile(&mut self, ctx: &mut SceneContext<'_>) {
        let existing = ctx.profiles.list_profiles();
        let name = next_free_name(&existing);
        let profile = PlayerProfile::named(name.clone());
        if let Err(error) = ctx.profiles.save_profile(&profile) {
            warn!(profile = %name, error = %error, "profile_save_failed");
        }
        self.session.borrow_mut().profile = Some(profile);
    }
}

impl Scene for ProfileSelectScene {
    fn load(&mut self, ctx: &mut SceneContext<'_>, _world: &mut EntityWorld) {
        let title = ctx.ui.add(Widget::label(
            UiRect::new(ROW_X, TITLE_Y, ROW_WIDTH, 12.0),
            "CHOOSE YOUR WISP",
        ));
        self.widgets.push(title);

        let names: Vec<String> = ctx
            .profiles
            .list_profiles()
            .into_iter()
            .take(MAX_LISTED_PROFILES)
            .collect();

        let mut buttons = Vec::new();
        let mut row_y = ROW_FIRST_Y;
        for name in names {
            let id = ctx.ui.add(Widget::button(
                UiRect::new(ROW_X, row_y, ROW_WIDTH, ROW_HEIGHT),
                name.to_uppercase(),
            ));
            self.profile_rows.push((id, name));
            self.widgets.push(id);
            buttons.push(id);
            row_y += ROW_GAP_Y;
        }

        let new_button = ctx.ui.add(Widget::button(
            UiRect::new(ROW_X, row_y, ROW_WIDTH, ROW_HEIGHT),
            "NEW WISP",
        ));
        let back_button = ctx.ui.add(Widget::button(
            UiRect::new(ROW_X, row_y + ROW_GAP_Y, ROW_WIDTH, ROW_HEIGHT),
            "BACK",
        ));
        buttons.push(new_button);
        buttons.push(back_button);
        self.widgets.push(new_button);
        self.widgets.push(back_button);
        ctx.ui.link_column(&buttons);
        self.new_button = Some(new_button);
        self.back_button = Some(back_button);
    }

    fn update(
        &mut self,
        _dt_seconds: f32,
        input: &InputSnapshot,
        ctx: &mut SceneContext<'_>,
        _world: &mut EntityWorld,
    ) -> SceneCommand {
        if input.cancel_pressed() {
            return SceneCommand::SwitchTo(SceneKey::Menu);
        }

        for event in ctx.ui.take_events() {
            let UiEvent::Clicked(id) = event else {
                continue;
            };
            if self.new_button == Some(id) {
                self.create_profile(ctx);
                return SceneCommand::SwitchTo(SceneKey::Gameplay);
            }
            if self.back_button == Some(id) {
                return SceneCommand::SwitchTo(SceneKey::Menu);
            }
            if let Some((_, name)) = self
                .profile_rows
                .iter()
                .find(|(row_id, _)| *row_id == id)
                .cloned()
            {
                self.adopt_profile(ctx, &name);
                return SceneCommand::SwitchTo(SceneKey::Gameplay);
            }
        }
        SceneCommand::None
    }

    fn unload(&mut self, ctx: &mut SceneContext<'_>, _world: &mut EntityWorld) {
        for id in self.widgets.drain(..) {
            ctx.ui.remove(id);
        }
        self.profile_rows.clear();
        self.new_button = None;
        self.back_button = None;
    }
}

/// First `wisp_N` not already taken on disk.
fn next_free_name(existing: &[String]) -> String {
    let mut index = existing.len().saturating_add(1);
    loop {
        let candidate = format!("wisp_{index}");
        if !existing.iter().any(|name| *name == candidate) {
            return candidate;
        }
        index = index.saturating_add(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::session::new_session;
    use crate::app::testutil::SceneHarness;
    use ember_engine::{GameSettings, InputClass};

    fn click(harness: &mut SceneHarness, id: WidgetId) {
        harness.ui.sync_input_class(InputClass::Keyboard);
        harness.ui.set_focused(Some(id));
        harness.ui.activate_focused();
    }

    #[test]
    fn new_wisp_saves_a_profile_and_enters_gameplay() {
        let mut harness = SceneHarness::new();
        let session = new_session(GameSettings::default());
        let mut scene = ProfileSelectScene::new(session.clone());
        let mut world = EntityWorld::new();
        scene.load(&mut harness.ctx(), &mut world);

        let new_button = scene.new_button.expect("new button");
        click(&mut harness, new_button);
        let command = scene.update(
            1.0 / 60.0,
            &InputSnapshot::empty(),
            &mut harness.ctx(),
            &mut world,
        );

        assert_eq!(command, SceneCommand::SwitchTo(SceneKey::Gameplay));
        assert_eq!(
            session.borrow().profile.as_ref().map(|p| p.name.clone()),
            Some("wisp_1".to_string())
        );
        assert_eq!(harness.profiles.list_profiles(), vec!["wisp_1"]);
    }

    #[test]
    fn existing_profiles_are_listed_and_selectable() {
        let mut harness = SceneHarness::new();
        let mut saved = PlayerProfile::named("ash");
        saved.runs_played = 7;
        harness.profiles.save_profile(&saved).expect("save");

        let session = new_session(GameSettings::default());
        let mut scene = ProfileSelectScene::new(session.clone());
        let mut world = EntityWorld::new();
        scene.load(&mut harness.ctx(), &mut world);
        assert_eq!(scene.profile_rows.len(), 1);

        let row = scene.profile_rows[0].0;
        click(&mut harness, row);
        let command = scene.update(
            1.0 / 60.0,
            &InputSnapshot::empty(),
            &mut harness.ctx(),
            &mut world,
        );

        assert_eq!(command, SceneCommand::SwitchTo(SceneKey::Gameplay));
        assert_eq!(
            session.borrow().profile.as_ref().map(|p| p.runs_played),
            Some(7)
        );
    }

    #[test]
    fn back_returns_to_the_menu() {
        let mut harness = SceneHarness::new();
        let session = new_session(GameSettings::default());
        let mut scene = ProfileSelectScene::new(session);
        let mut world = EntityWorld::new();
        scene.load(&mut harness.ctx(), &mut world);

        let back = scene.back_button.expect("back button");
        click(&mut harness, back);
        let command = scene.update(
            1.0 / 60.0,
            &InputSnapshot::empty(),
            &mut harness.ctx(),
            &mut world,
        );
        assert_eq!(command, SceneCommand::SwitchTo(SceneKey::Menu));
    }

    #[test]
    fn cancel_returns_to_the_menu_too() {
        let mut harness = SceneHarness::new();
        let session = new_session(GameSettings::default());
        let mut scene = ProfileSelectScene::new(session);
        let mut world = EntityWorld::new();
        scene.load(&mut harness.ctx(), &mut world);

        let command = scene.update(
            1.0 / 60.0,
            &InputSnapshot::empty().with_cancel_pressed(true),
            &mut harness.ctx(),
            &mut world,
        );
        assert_eq!(command, SceneCommand::SwitchTo(SceneKey::Menu));
    }

    #[test]
    fn corrupt_profile_record_degrades_to_a_fresh_slate() {
        let mut harness = SceneHarness::new();
        let dir = harness.profiles.root().join("profiles");
        std::fs::create_dir_all(&dir).expect("mkdir");
        std::fs::write(dir.join("ash.json"), "not json at all").expect("write");

        let session = new_session(GameSettings::default());
        let mut scene = ProfileSelectScene::new(session.clone());
        let mut world = EntityWorld::new();
        scene.load(&mut harness.ctx(), &mut world);

        let row = scene.profile_rows[0].0;
        click(&mut harness, row);
        scene.update(
            1.0 / 60.0,
            &InputSnapshot::empty(),
            &mut harness.ctx(),
            &mut world,
        );

        let state = session.borrow();
        let profile = state.profile.as_ref().expect("fresh profile");
        assert_eq!(profile.runs_played, 0);
    }

    #[test]
    fn next_free_name_skips_taken_slots() {
        assert_eq!(next_free_name(&[]), "wisp_1");
        assert_eq!(
            next_free_name(&["wisp_1".to_string(), "wisp_2".to_string()]),
            "wisp_3"
        );
        assert_eq!(
            next_free_name(&["wisp_2".to_string(), "other".to_string()]),
            "wisp_3"
        );
    }
}
