use ember_engine::{
    EntityWorld, GameSettings, InputSnapshot, Scene, SceneCommand, SceneContext, SceneKey, UiEvent,
    UiRect, Widget, WidgetId,
};
use tracing::warn;

use super::session::SessionHandle;

const DEADZONE_PRESETS: [f32; 3] = [0.3, 0.5, 0.7];
const TITLE_Y: f32 = 48.0;
const ROW_X: f32 = 200.0;
const ROW_WIDTH: f32 = 240.0;
const ROW_HEIGHT: f32 = 26.0;
const ROW_FIRST_Y: f32 = 100.0;
const ROW_GAP_Y: f32 = 40.0;

pub struct SettingsScene {
    session: SessionHandle,
    widgets: Vec<WidgetId>,
    deadzone_button: Option<WidgetId>,
    overlay_button: Option<WidgetId>,
    back_button: Option<WidgetId>,
}

impl SettingsScene {
    pub fn new(session: SessionHandle) -> Self {
        Self {
            session,
            widgets: Vec::new(),
            deadzone_button: None,
            overlay_button: None,
            back_button: None,
        }
    }

    fn persist(&self, ctx: &mut SceneContext<'_>, settings: GameSettings) {
        if let Err(error) = ctx.profiles.save_settings(&settings) {
            warn!(error = %error, "settings_save_failed");
        }
    }

    fn cycle_deadzone(&mut self, ctx: &mut SceneContext<'_>) {
        let next = {
            let mut state = self.session.borrow_mut();
            state.settings.stick_deadzone = next_deadzone(state.settings.stick_deadzone);
            state.settings
        };
        self.persist(ctx, next);
        if let Some(id) = self.deadzone_button {
            ctx.ui.set_label_text(id, deadzone_label(next.stick_deadzone));
        }
    }

    fn toggle_overlay(&mut self, ctx: &mut SceneContext<'_>) {
        let next = {
            let mut state = self.session.borrow_mut();
            state.settings.overlay_visible = !state.settings.overlay_visible;
            state.settings
        };
        self.persist(ctx, next);
        if let Some(id) = self.overlay_button {
            ctx.ui.set_label_text(id, overlay_label(next.overlay_visible));
        }
    }
}

impl Scene for SettingsScene {
    fn load(&mut self, ctx: &mut SceneContext<'_>, _world: &mut EntityWorld) {
        let settings = self.session.borrow().settings;

        let title = ctx.ui.add(Widget::label(
            UiRect::new(ROW_X, TITLE_Y, ROW_WIDTH, 12.0),
            "SETTINGS",
        ));
        let hint = ctx.ui.add(Widget::label(
            UiRect::new(ROW_X, TITLE_Y + 16.0, ROW_WIDTH, 12.0),
            "DEADZONE APPLIES ON NEXT LAUNCH",
        ));
        self.widgets.push(title);
        self.widgets.push(hint);

        let deadzone_button = ctx.ui.add(Widget::button(
            UiRect::new(ROW_X, ROW_FIRST_Y, ROW_WIDTH, ROW_HEIGHT),
            deadzone_label(settings.stick_deadzone),
        ));
        let overlay_button = ctx.ui.add(Widget::button(
            UiRect::new(ROW_X, ROW_FIRST_Y + ROW_GAP_Y, ROW_WIDTH, ROW_HEIGHT),
            overlay_label(settings.overlay_visible),
        ));
        let back_button = ctx.ui.add(Widget::button(
            UiRect::new(ROW_X, ROW_FIRST_Y + 2.0 * ROW_GAP_Y, ROW_WIDTH, ROW_HEIGHT),
            "BACK",
        ));
        ctx.ui
            .link_column(&[deadzone_button, overlay_button, back_button]);
        self.widgets.push(deadzone_button);
        self.widgets.push(overlay_button);
        self.widgets.push(back_button);
        self.deadzone_button = Some(deadzone_button);
        self.overlay_button = Some(overlay_button);
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
            if self.deadzone_button == Some(id) {
                self.cycle_deadzone(ctx);
            } else if self.overlay_button == Some(id) {
                self.toggle_overlay(ctx);
            } else if self.back_button == Some(id) {
                return SceneCommand::SwitchTo(SceneKey::Menu);
            }
        }
        SceneCommand::None
    }

    fn unload(&mut self, ctx: &mut SceneContext<'_>, _world: &mut EntityWorld) {
        for id in self.widgets.drain(..) {
            ctx.ui.remove(id);
        }
        self.deadzone_button = None;
        self.overlay_button = None;
        self.back_button = None;
    }
}

fn next_deadzone(current: f32) -> f32 {
    let position = DEADZONE_PRESETS
        .iter()
        .position(|preset| (preset - current).abs() < 0.01);
    match position {
        Some(index) => DEADZONE_PRESETS[(index + 1) % DEADZONE_PRESETS.len()],
        None => DEADZONE_PRESETS[0],
    }
}

fn deadzone_label(deadzone: f32) -> String {
    format!("STICK DEADZONE: {deadzone:.1}")
}

fn overlay_label(visible: bool) -> String {
    if visible {
        "OVERLAY ON START: ON".to_string()
    } else {
        "OVERLAY ON START: OFF".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::session::new_session;
    use crate::app::testutil::SceneHarness;
    use ember_engine::{InputClass, WidgetKind};

    fn click(harness: &mut SceneHarness, id: WidgetId) {
        harness.ui.sync_input_class(InputClass::Keyboard);
        harness.ui.set_focused(Some(id));
        harness.ui.activate_focused();
    }

    fn button_label(harness: &SceneHarness, id: WidgetId) -> String {
        match harness.ui.widget(id).expect("widget").kind() {
            WidgetKind::Button { label } => label.clone(),
            other => panic!("expected button, got {other:?}"),
        }
    }

    #[test]
    fn deadzone_cycles_through_presets_and_persists() {
        let mut harness = SceneHarness::new();
        let session = new_session(GameSettings::default());
        let mut scene = SettingsScene::new(session.clone());
        let mut world = EntityWorld::new();
        scene.load(&mut harness.ctx(), &mut world);

        let button = scene.deadzone_button.expect("deadzone button");
        assert_eq!(button_label(&harness, button), "STICK DEADZONE: 0.5");

        click(&mut harness, button);
        scene.update(
            1.0 / 60.0,
            &InputSnapshot::empty(),
            &mut harness.ctx(),
            &mut world,
        );

        assert_eq!(button_label(&harness, button), "STICK DEADZONE: 0.7");
        assert!((session.borrow().settings.stick_deadzone - 0.7).abs() < 0.001);
        let saved = harness
            .profiles
            .load_settings()
            .expect("load")
            .expect("saved settings");
        assert!((saved.stick_deadzone - 0.7).abs() < 0.001);
    }

    #[test]
    fn overlay_toggle_flips_and_persists() {
        let mut harness = SceneHarness::new();
        let session = new_session(GameSettings::default());
        let mut scene = SettingsScene::new(session.clone());
        let mut world = EntityWorld::new();
        scene.load(&mut harness.ctx(), &mut world);

        let button = scene.overlay_button.expect("overlay button");
        click(&mut harness, button);
        scene.update(
            1.0 / 60.0,
            &InputSnapshot::empty(),
            &mut harness.ctx(),
            &mut world,
        );

        assert!(session.borrow().settings.overlay_visible);
        assert_eq!(button_label(&harness, button), "OVERLAY ON START: ON");
    }

    #[test]
    fn back_and_cancel_both_return_to_menu() {
        let mut harness = SceneHarness::new();
        let session = new_session(GameSettings::default());
        let mut scene = SettingsScene::new(session);
        let mut world = EntityWorld::new();
        scene.load(&mut harness.ctx(), &mut world);

        let back = scene.back_button.expect("back button");
        click(&mut harness, back);
        let by_click = scene.update(
            1.0 / 60.0,
            &InputSnapshot::empty(),
            &mut harness.ctx(),
            &mut world,
        );
        assert_eq!(by_click, SceneCommand::SwitchTo(SceneKey::Menu));

        let by_cancel = scene.update(
            1.0 / 60.0,
            &InputSnapshot::empty().with_cancel_pressed(true),
            &mut harness.ctx(),
            &mut world,
        );
        assert_eq!(by_cancel, SceneCommand::SwitchTo(SceneKey::Menu));
    }

    #[test]
    fn unknown_deadzone_value_snaps_to_first_preset() {
        assert!((next_deadzone(0.42) - 0.3).abs() < 0.001);
        assert!((next_deadzone(0.7) - 0.3).abs() < 0.001);
    }
}
