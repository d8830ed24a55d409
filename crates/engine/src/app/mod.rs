mod ecs;
mod input;
mod loop_runner;
mod metrics;
mod overlay;
mod rendering;
mod scene;
mod ui;

pub use ecs::{
    Component, ComponentKind, Entity, EntityId, EntityWorld, GameSystem, ItemKind, SystemSchedule,
};
pub use input::{
    ArbitratorConfig, ArbitratorEvent, GamepadButton, InputArbitrator, InputClass, InputSnapshot,
    NavDirection, PointerButton, RawDeviceEvent,
};
pub use loop_runner::{
    arbitrator_config_from_settings, run_app, run_app_with_metrics, AppError, LoopConfig,
    SLOW_FRAME_ENV_VAR,
};
pub use metrics::{LoopMetricsSnapshot, MetricsHandle};
pub use rendering::{
    draw_widgets, text_width, DrawFrame, Renderer, ScreenMapper, GLYPH_ADVANCE, LINE_ADVANCE,
    TEXT_HEIGHT, UI_HEIGHT, UI_WIDTH,
};
pub use scene::{Scene, SceneCommand, SceneContext, SceneDirector, SceneError, SceneKey};
pub use ui::{UiEvent, UiRect, UiRegistry, VisualState, Widget, WidgetId, WidgetKind};
