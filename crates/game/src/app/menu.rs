use ember_engine::{
    EntityWorld, InputSnapshot, Scene, SceneCommand, SceneContext, SceneKey, UiEvent, UiRect,
    Widget, WidgetId,
};

use super::session::SessionHandle;

const TITLE_Y: f32 = 60.0;
const STATUS_Y: f32 = 96.0;
const LAST_RUN_Y: f32 = 112.0;
const BUTTON_X: f32 = 240.0;
const BUTTON_WIDTH: f32 = 160.0;
const BUTTON_HEIGHT: f32 = 28.0;
const BUTTON_FIRST_Y: f32 = 160.0;
const BUTTON_GAP_Y: f32 = 40.0;

pub struct MenuScene {
    session: SessionHandle,
    widgets: Vec<WidgetId>,
    start_button: Option<WidgetId>,
    settings_button: Option<WidgetId>,
    quit_button: Option<WidgetId>,
}

impl MenuScene {
    pub fn new(session: SessionHandle) -> Self {
        Self {
            session,
            widgets: Vec::new(),
            start_button: None,
            settings_button: None,
            quit_button: None,
        }
    }

    fn status_line(&self) -> String {
        match &self.session.borrow().profile {
            Some(profile) if profile.best_survival_seconds > 0.0 => format!(
                "WISP {} / BEST {:.0}S",
                profile.name, profile.best_survival_seconds
            ),
            Some(profile) => format!("WISP {}", profile.name),
            None => "NO WISP CHOSEN".to_string(),
        }
    }

    fn last_run_line(&self) -> Option<String> {
        let state = self.session.borrow();
        let run = state.last_run.as_ref()?;
        let mut line = format!(
            "LAST RUN {:.0}S / {} EMBERS",
            run.survival_seconds, run.embers
        );
        if run.new_record {
            line.push_str(" / NEW BEST");
        }
        Some(line)
    }
}

impl Scene for MenuScene {
    fn load(&mut self, ctx: &mut SceneContext<'_>, _world: &mut EntityWorld) {
        let title = ctx.ui.add(Widget::label(
            UiRect::new(BUTTON_X, TITLE_Y, BUTTON_WIDTH, 12.0),
            "EMBERWAKE",
        ));
        let status = ctx.ui.add(Widget::label(
            UiRect::new(BUTTON_X, STATUS_Y, BUTTON_WIDTH, 12.0),
            self.status_line(),
        ));
        self.widgets.push(title);
        self.widgets.push(status);
        if let Some(line) = self.last_run_line() {
            let last_run = ctx.ui.add(Widget::label(
                UiRect::new(BUTTON_X, LAST_RUN_Y, BUTTON_WIDTH, 12.0),
                line,
            ));
            self.widgets.push(last_run);
        }

        let labels = ["START", "SETTINGS", "QUIT"];
        let mut buttons = Vec::with_capacity(labels.len());
        for (index, label) in labels.iter().enumerate() {
            let rect = UiRect::new(
                BUTTON_X,
                BUTTON_FIRST_Y + index as f32 * BUTTON_GAP_Y,
                BUTTON_WIDTH,
                BUTTON_HEIGHT,
            );
            let id = ctx.ui.add(Widget::button(rect, *label));
            buttons.push(id);
            self.widgets.push(id);
        }
        ctx.ui.link_column(&buttons);
        self.start_button = Some(buttons[0]);
        self.settings_button = Some(buttons[1]);
        self.quit_button = Some(buttons[2]);
    }

    fn update(
        &mut self,
        _dt_seconds: f32,
        input: &InputSnapshot,
        ctx: &mut SceneContext<'_>,
        _world: &mut EntityWorld,
    ) -> SceneCommand {
        if input.cancel_pressed() {
            return SceneCommand::Quit;
        }

        for event in ctx.ui.take_events() {
            let UiEvent::Clicked(id) = event else {
                continue;
            };
            if self.start_button == Some(id) {
                let has_profile = self.session.borrow().profile.is_some();
                return if has_profile {
                    SceneCommand::SwitchTo(SceneKey::Gameplay)
                } else {
                    SceneCommand::SwitchTo(SceneKey::ProfileSelect)
                };
            }
            if self.settings_button == Some(id) {
                return SceneCommand::SwitchTo(SceneKey::Settings);
            }
            if self.quit_button == Some(id) {
                return SceneCommand::Quit;
            }
        }
        SceneCommand::None
    }

    fn unload(&mut self, ctx: &mut SceneContext<'_>, _world: &mut EntityWorld) {
        for id in self.widgets.drain(..) {
            ctx.ui.remove(id);
        }
        self.start_button = None;
        self.settings_button = None;
        self.quit_button = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::session::{new_session, RunSummary};
    use crate::app::testutil::SceneHarness;
    use ember_engine::{GameSettings, InputClass, PlayerProfile};

    fn loaded_menu(session: SessionHandle) -> (SceneHarness, MenuScene) {
        let mut harness = SceneHarness::new();
        let mut scene = MenuScene::new(session);
        let mut world = EntityWorld::new();
        scene.load(&mut harness.ctx(), &mut world);
        (harness, scene)
    }

    #[test]
    fn start_without_profile_goes_to_profile_select() {
        let session = new_session(GameSettings::default());
        let (mut harness, mut scene) = loaded_menu(session);
        let start = scene.start_button.expect("start button");

        harness.ui.sync_input_class(InputClass::Keyboard);
        harness.ui.set_focused(Some(start));
        harness.ui.activate_focused();

        let mut world = EntityWorld::new();
        let command = scene.update(
            1.0 / 60.0,
            &InputSnapshot::empty(),
            &mut harness.ctx(),
            &mut world,
        );
        assert_eq!(command, SceneCommand::SwitchTo(SceneKey::ProfileSelect));
    }

    #[test]
    fn start_with_profile_goes_to_gameplay() {
        let session = new_session(GameSettings::default());
        session.borrow_mut().profile = Some(PlayerProfile::named("Wren"));
        let (mut harness, mut scene) = loaded_menu(session);
        let start = scene.start_button.expect("start button");

        harness.ui.sync_input_class(InputClass::Keyboard);
        harness.ui.set_focused(Some(start));
        harness.ui.activate_focused();

        let mut world = EntityWorld::new();
        let command = scene.update(
            1.0 / 60.0,
            &InputSnapshot::empty(),
            &mut harness.ctx(),
            &mut world,
        );
        assert_eq!(command, SceneCommand::SwitchTo(SceneKey::Gameplay));
    }

    #[test]
    fn cancel_quits_from_the_menu() {
        let session = new_session(GameSettings::default());
        let (mut harness, mut scene) = loaded_menu(session);
        let mut world = EntityWorld::new();

        let command = scene.update(
            1.0 / 60.0,
            &InputSnapshot::empty().with_cancel_pressed(true),
            &mut harness.ctx(),
            &mut world,
        );
        assert_eq!(command, SceneCommand::Quit);
    }

    #[test]
    fn unload_removes_every_menu_widget() {
        let session = new_session(GameSettings::default());
        session.borrow_mut().last_run = Some(RunSummary {
            survival_seconds: 42.0,
            embers: 3,
            new_record: true,
        });
        let (mut harness, mut scene) = loaded_menu(session);
        assert!(harness.ui.widget_count() > 0);

        let mut world = EntityWorld::new();
        scene.unload(&mut harness.ctx(), &mut world);
        assert_eq!(harness.ui.widget_count(), 0);
    }

    #[test]
    fn buttons_are_reachable_by_column_navigation() {
        let session = new_session(GameSettings::default());
        let (mut harness, scene) = loaded_menu(session);

        harness.ui.sync_input_class(InputClass::Keyboard);
        assert_eq!(harness.ui.focused(), scene.start_button);
        harness.ui.navigate(ember_engine::NavDirection::Down);
        assert_eq!(harness.ui.focused(), scene.settings_button);
        harness.ui.navigate(ember_engine::NavDirection::Down);
        assert_eq!(harness.ui.focused(), scene.quit_button);
        harness.ui.navigate(ember_engine::NavDirection::Down);
        assert_eq!(harness.ui.focused(), scene.quit_button);
    }
}
