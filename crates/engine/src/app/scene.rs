use std::collections::HashMap;

use thiserror::Error;
use tracing::{info, warn};

use crate::profiles::ProfileStore;

use super::ecs::EntityWorld;
use super::input::{InputClass, InputSnapshot};
use super::rendering::DrawFrame;
use super::ui::UiRegistry;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SceneKey {
    Menu,
    ProfileSelect,
    Settings,
    Gameplay,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SceneCommand {
    None,
    SwitchTo(SceneKey),
    Quit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SceneError {
    #[error("no scene registered under {0:?}")]
    SceneNotFound(SceneKey),
}

/// Shared services handed to scenes on every lifecycle call. The UI registry
/// and profile store are owned by the frame driver and borrowed down, never
/// global.
pub struct SceneContext<'a> {
    pub ui: &'a mut UiRegistry,
    pub profiles: &'a mut ProfileStore,
    pub input_class: InputClass,
}

pub trait Scene {
    /// Populates widgets, entities, and systems. Runs on every activation.
    fn load(&mut self, ctx: &mut SceneContext<'_>, world: &mut EntityWorld);

    fn update(
        &mut self,
        dt_seconds: f32,
        input: &InputSnapshot,
        ctx: &mut SceneContext<'_>,
        world: &mut EntityWorld,
    ) -> SceneCommand;

    fn render(&mut self, _world: &EntityWorld, _frame: &mut DrawFrame<'_>) {}

    /// Tears down what `load` created. Scenes remove their own widgets here;
    /// the director sweeps up (with a warning) anything left behind.
    fn unload(&mut self, ctx: &mut SceneContext<'_>, world: &mut EntityWorld);
}

struct SceneRuntime {
    scene: Box<dyn Scene>,
    world: EntityWorld,
}

/// Owns the registered scenes and the single "current scene" slot, and
/// forwards per-frame calls to it. Transition failures leave the current
/// scene untouched.
#[derive(Default)]
pub struct SceneDirector {
    scenes: HashMap<SceneKey, SceneRuntime>,
    current: Option<SceneKey>,
}

impl SceneDirector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, key: SceneKey, scene: Box<dyn Scene>) {
        let replaced = self
            .scenes
            .insert(
                key,
                SceneRuntime {
                    scene,
                    world: EntityWorld::new(),
                },
            )
            .is_some();
        if replaced {
            warn!(scene = ?key, "scene re-registered; previous instance dropped");
        }
    }

    pub fn is_registered(&self, key: SceneKey) -> bool {
        self.scenes.contains_key(&key)
    }

    pub fn current(&self) -> Option<SceneKey> {
        self.current
    }

    /// Switches to `key`: unload current (cleanup problems are logged, never
    /// abort), then load the new scene. An unknown key fails with
    /// `SceneNotFound` and leaves everything as it was.
    pub fn set_scene(
        &mut self,
        key: SceneKey,
        ctx: &mut SceneContext<'_>,
    ) -> Result<(), SceneError> {
        if !self.scenes.contains_key(&key) {
            return Err(SceneError::SceneNotFound(key));
        }

        if let Some(previous) = self.current.take() {
            if let Some(runtime) = self.scenes.get_mut(&previous) {
                runtime.scene.unload(ctx, &mut runtime.world);
                runtime.world.clear();
            }
            let leftover = ctx.ui.widget_count();
            if leftover > 0 {
                warn!(
                    scene = ?previous,
                    leftover,
                    "scene left widgets registered; sweeping"
                );
            }
            ctx.ui.clear();
        }

        if let Some(runtime) = self.scenes.get_mut(&key) {
            runtime.scene.load(ctx, &mut runtime.world);
            runtime.world.apply_pending();
            info!(
                scene = ?key,
                entity_count = runtime.world.entity_count(),
                widget_count = ctx.ui.widget_count(),
                "scene_entered"
            );
        }
        self.current = Some(key);
        Ok(())
    }

    pub fn update(
        &mut self,
        dt_seconds: f32,
        input: &InputSnapshot,
        ctx: &mut SceneContext<'_>,
    ) -> SceneCommand {
        let Some(runtime) = self.current_runtime_mut() else {
            return SceneCommand::None;
        };
        let command = runtime
            .scene
            .update(dt_seconds, input, ctx, &mut runtime.world);
        runtime.world.apply_pending();
        command
    }

    pub fn render(&mut self, frame: &mut DrawFrame<'_>) {
        if let Some(runtime) = self.current_runtime_mut() {
            runtime.scene.render(&runtime.world, frame);
        }
    }

    pub fn current_world(&self) -> Option<&EntityWorld> {
        self.current
            .and_then(|key| self.scenes.get(&key))
            .map(|runtime| &runtime.world)
    }

    pub fn shutdown(&mut self, ctx: &mut SceneContext<'_>) {
        if let Some(key) = self.current.take() {
            if let Some(runtime) = self.scenes.get_mut(&key) {
                runtime.scene.unload(ctx, &mut runtime.world);
                runtime.world.clear();
            }
            ctx.ui.clear();
            info!(scene = ?key, "scene_shutdown");
        }
    }

    fn current_runtime_mut(&mut self) -> Option<&mut SceneRuntime> {
        let key = self.current?;
        self.scenes.get_mut(&key)
    }
}
