use std::env;
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use pixels::Error as PixelsError;
use thiserror::Error;
use tracing::{debug, info, warn};
use winit::dpi::LogicalSize;
use winit::error::{EventLoopError, OsError};
use winit::event::{ElementState, Event, KeyEvent, MouseButton, Touch, TouchPhase, WindowEvent};
use winit::event_loop::{ControlFlow, EventLoop};
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::WindowBuilder;

use crate::profiles::{GameSettings, ProfileStore};
use crate::{resolve_app_paths, StartupError};

use super::input::{
    ArbitratorConfig, ArbitratorEvent, GamepadButton, InputArbitrator, InputClass, InputSnapshot,
    NavDirection, PointerButton, RawDeviceEvent,
};
use super::metrics::MetricsAccumulator;
use super::overlay::{draw_overlay, OverlayData};
use super::rendering::{draw_widgets, Renderer, ScreenMapper};
use super::scene::{Scene, SceneCommand, SceneContext, SceneDirector, SceneKey};
use super::ui::{UiRegistry, WidgetKind};
use super::MetricsHandle;

pub const SLOW_FRAME_ENV_VAR: &str = "EMBERWAKE_SLOW_FRAME_MS";

const FRAME_CLEAR_COLOR: [u8; 4] = [14, 15, 20, 255];

#[derive(Debug, Clone)]
pub struct LoopConfig {
    pub window_title: String,
    pub window_width: u32,
    pub window_height: u32,
    pub target_tps: u32,
    pub max_frame_delta: Duration,
    pub max_ticks_per_frame: u32,
    pub metrics_log_interval: Duration,
    pub simulated_slow_frame_ms: u64,
    pub max_render_fps: Option<u32>,
    pub initial_scene: SceneKey,
}

impl Default for LoopConfig {
    fn default() -> Self {
        Self {
            window_title: "Emberwake".to_string(),
            window_width: 1280,
            window_height: 720,
            target_tps: 60,
            max_frame_delta: Duration::from_millis(250),
            max_ticks_per_frame: 5,
            metrics_log_interval: Duration::from_secs(1),
            simulated_slow_frame_ms: 0,
            max_render_fps: None,
            initial_scene: SceneKey::Menu,
        }
    }
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Startup(#[from] StartupError),
    #[error("failed to create event loop: {0}")]
    CreateEventLoop(#[source] EventLoopError),
    #[error("failed to create application window: {0}")]
    CreateWindow(#[source] OsError),
    #[error("failed to initialize renderer: {0}")]
    CreateRenderer(#[source] PixelsError),
    #[error("failed to enter the initial scene: {0}")]
    InitialScene(#[from] super::scene::SceneError),
    #[error("event loop failed: {0}")]
    EventLoopRun(#[source] EventLoopError),
}

pub fn run_app(config: LoopConfig, scenes: Vec<(SceneKey, Box<dyn Scene>)>) -> Result<(), AppError> {
    run_app_with_metrics(config, scenes, MetricsHandle::default())
}

pub fn run_app_with_metrics(
    config: LoopConfig,
    scenes: Vec<(SceneKey, Box<dyn Scene>)>,
    metrics_handle: MetricsHandle,
) -> Result<(), AppError> {
    let app_paths = resolve_app_paths()?;
    info!(
        root = %app_paths.root.display(),
        data_dir = %app_paths.data_dir.display(),
        "startup"
    );
    let mut profiles = ProfileStore::new(app_paths.data_dir.clone());
    let settings = load_settings_or_default(&profiles);

    let event_loop = EventLoop::new().map_err(AppError::CreateEventLoop)?;
    let window = Arc::new(
        WindowBuilder::new()
            .with_title(config.window_title.clone())
            .with_inner_size(LogicalSize::new(
                config.window_width as f64,
                config.window_height as f64,
            ))
            .build(&event_loop)
            .map_err(AppError::CreateWindow)?,
    );
    let mut renderer = Renderer::new(Arc::clone(&window)).map_err(AppError::CreateRenderer)?;
    event_loop.set_control_flow(ControlFlow::Poll);

    let target_tps = config.target_tps.max(1);
    let max_frame_delta =
        normalize_non_zero_duration(config.max_frame_delta, Duration::from_millis(250));
    let max_ticks_per_frame = config.max_ticks_per_frame.max(1);
    let metrics_log_interval =
        normalize_non_zero_duration(config.metrics_log_interval, Duration::from_secs(1));
    let fixed_dt = Duration::from_secs_f64(1.0 / target_tps as f64);
    let fixed_dt_seconds = fixed_dt.as_secs_f32();
    let slow_frame_delay = resolve_slow_frame_delay(config.simulated_slow_frame_ms);
    let effective_render_cap = normalize_render_fps_cap(config.max_render_fps);
    let render_frame_target = target_frame_duration(effective_render_cap);

    let initial_size = window.inner_size();
    let mut mapper = ScreenMapper::new(initial_size.width, initial_size.height);
    let mut arbitrator = InputArbitrator::new(arbitrator_config_from_settings(&settings));
    let mut ui = UiRegistry::new();
    let mut input_collector = InputCollector::default();
    let mut router = EventRouter::default();
    let mut director = SceneDirector::new();
    for (key, scene) in scenes {
        director.register(key, scene);
    }
    {
        let mut ctx = SceneContext {
            ui: &mut ui,
            profiles: &mut profiles,
            input_class: arbitrator.current_class(),
        };
        director.set_scene(config.initial_scene, &mut ctx)?;
    }

    info!(
        target_tps,
        max_frame_delta_ms = max_frame_delta.as_millis() as u64,
        max_ticks_per_frame,
        slow_frame_delay_ms = slow_frame_delay.as_millis() as u64,
        render_fps_cap = %format_render_cap(effective_render_cap),
        "loop_config"
    );

    let clock_start = Instant::now();
    let mut accumulator = Duration::ZERO;
    let mut last_frame_instant = Instant::now();
    let mut last_present_instant = Instant::now();
    let mut metrics_accumulator = MetricsAccumulator::new(metrics_log_interval);
    let mut overlay_visible = settings.overlay_visible;

    event_loop
        .run(move |event, window_target| match event {
            Event::WindowEvent { window_id, event } if window_id == window.id() => match event {
                WindowEvent::CloseRequested => {
                    info!(reason = "window_close", "shutdown_requested");
                    window_target.exit();
                }
                WindowEvent::Resized(new_size) => {
                    mapper.set_window_size(new_size.width, new_size.height);
                    if let Err(error) = renderer.resize(new_size.width, new_size.height) {
                        warn!(error = %error, "renderer_resize_failed");
                        window_target.exit();
                    }
                }
                WindowEvent::ScaleFactorChanged { .. } => {
                    let size = window.inner_size();
                    mapper.set_window_size(size.width, size.height);
                    if let Err(error) = renderer.resize(size.width, size.height) {
                        warn!(error = %error, "renderer_resize_failed");
                        window_target.exit();
                    }
                }
                WindowEvent::KeyboardInput { event, .. } => {
                    input_collector.handle_keyboard_input(&event);
                }
                WindowEvent::CursorMoved { position, .. } => {
                    input_collector.handle_cursor_moved(position.x as f32, position.y as f32);
                }
                WindowEvent::MouseInput { state, button, .. } => {
                    input_collector.handle_mouse_input(button, state);
                }
                WindowEvent::Touch(touch) => {
                    input_collector.handle_touch(&touch);
                }
                WindowEvent::RedrawRequested => {
                    if input_collector.take_overlay_toggle_pressed() {
                        overlay_visible = !overlay_visible;
                        info!(overlay_visible, "overlay_toggled");
                    }

                    if slow_frame_delay > Duration::ZERO {
                        // Explicit debug perturbation only, not the FPS cap.
                        thread::sleep(slow_frame_delay);
                    }

                    let now = Instant::now();
                    let raw_frame_dt = now.saturating_duration_since(last_frame_instant);
                    last_frame_instant = now;
                    let now_seconds = now.saturating_duration_since(clock_start).as_secs_f64();

                    // Arbitration first, then raw events in arrival order.
                    arbitrator.tick(now_seconds);
                    apply_arbitrator_events(&mut arbitrator, &mut ui);
                    for raw_event in input_collector.take_raw_events() {
                        router.route(raw_event, now_seconds, &mut arbitrator, &mut ui, &mapper);
                    }

                    let clamped_frame_dt = clamp_frame_delta(raw_frame_dt, max_frame_delta);
                    accumulator = accumulator.saturating_add(clamped_frame_dt);
                    let step_plan = plan_sim_steps(accumulator, fixed_dt, max_ticks_per_frame);
                    for _ in 0..step_plan.ticks_to_run {
                        let snapshot = input_collector.snapshot_for_tick();
                        if snapshot.quit_requested() {
                            window_target.exit();
                        }
                        let mut ctx = SceneContext {
                            ui: &mut ui,
                            profiles: &mut profiles,
                            input_class: arbitrator.current_class(),
                        };
                        let command = director.update(fixed_dt_seconds, &snapshot, &mut ctx);
                        match command {
                            SceneCommand::None => {}
                            SceneCommand::SwitchTo(next_scene) => {
                                if let Err(error) = director.set_scene(next_scene, &mut ctx) {
                                    warn!(error = %error, "scene_switch_failed");
                                }
                            }
                            SceneCommand::Quit => {
                                info!(reason = "scene_command", "shutdown_requested");
                                window_target.exit();
                            }
                        }
                    }
                    accumulator = step_plan.remaining_accumulator;
                    metrics_accumulator.record_ticks(step_plan.ticks_to_run);

                    if step_plan.dropped_backlog > Duration::ZERO {
                        warn!(
                            dropped_backlog_ms = step_plan.dropped_backlog.as_millis() as u64,
                            max_ticks_per_frame, "sim_clamp_triggered"
                        );
                    }

                    // Single authoritative FPS cap sleep point.
                    let elapsed_since_last_present =
                        Instant::now().saturating_duration_since(last_present_instant);
                    let cap_sleep =
                        compute_cap_sleep(elapsed_since_last_present, render_frame_target);
                    if cap_sleep > Duration::ZERO {
                        thread::sleep(cap_sleep);
                    }

                    {
                        let mut frame = renderer.frame();
                        frame.clear(FRAME_CLEAR_COLOR);
                        director.render(&mut frame);
                        draw_widgets(&mut frame, &ui);
                        if overlay_visible {
                            let overlay = OverlayData {
                                metrics: metrics_handle.snapshot(),
                                scene: director.current(),
                                input_class: arbitrator.current_class(),
                                entity_count: director
                                    .current_world()
                                    .map_or(0, |world| world.entity_count()),
                                widget_count: ui.widget_count(),
                                focused_label: focused_label(&ui),
                                render_fps_cap: effective_render_cap,
                            };
                            draw_overlay(&mut frame, &overlay);
                        }
                    }
                    if let Err(error) = renderer.present() {
                        warn!(error = %error, "renderer_present_failed");
                        window_target.exit();
                    }
                    last_present_instant = Instant::now();
                    metrics_accumulator.record_frame(raw_frame_dt);

                    if let Some(snapshot) = metrics_accumulator.maybe_snapshot(now) {
                        metrics_handle.publish(snapshot);
                        info!(
                            fps = snapshot.fps,
                            tps = snapshot.tps,
                            frame_time_ms = snapshot.frame_time_ms,
                            scene = ?director.current(),
                            input_class = arbitrator.current_class().label(),
                            "loop_metrics"
                        );
                    }
                }
                _ => {}
            },
            Event::AboutToWait => {
                window.request_redraw();
            }
            Event::LoopExiting => {
                let mut ctx = SceneContext {
                    ui: &mut ui,
                    profiles: &mut profiles,
                    input_class: arbitrator.current_class(),
                };
                director.shutdown(&mut ctx);
                info!("shutdown");
            }
            _ => {}
        })
        .map_err(AppError::EventLoopRun)
}

fn load_settings_or_default(profiles: &ProfileStore) -> GameSettings {
    match profiles.load_settings() {
        Ok(Some(settings)) => settings,
        Ok(None) => GameSettings::default(),
        Err(error) => {
            warn!(error = %error, "settings_load_failed; using defaults");
            GameSettings::default()
        }
    }
}

pub fn arbitrator_config_from_settings(settings: &GameSettings) -> ArbitratorConfig {
    ArbitratorConfig {
        stick_deadzone: settings.stick_deadzone,
        stick_repeat_seconds: settings.stick_repeat_seconds,
        ..ArbitratorConfig::default()
    }
}

fn focused_label(ui: &UiRegistry) -> Option<String> {
    let id = ui.focused()?;
    match ui.widget(id)?.kind() {
        WidgetKind::Button { label } => Some(label.clone()),
        WidgetKind::Label { text } => Some(text.clone()),
        WidgetKind::Image { key } => Some(key.clone()),
        WidgetKind::Panel => Some("panel".to_string()),
    }
}

/// Applies pending arbitration outcomes to the registry: class changes
/// re-route the interaction paths, direction pulses drive focus traversal.
fn apply_arbitrator_events(arbitrator: &mut InputArbitrator, ui: &mut UiRegistry) {
    ui.sync_input_class(arbitrator.current_class());
    for event in arbitrator.take_events() {
        match event {
            ArbitratorEvent::ClassChanged { from, to } => {
                debug!(from = from.label(), to = to.label(), "input_class_changed");
                ui.sync_input_class(to);
            }
            ArbitratorEvent::DirectionPulse { direction, .. } => {
                ui.navigate(direction);
            }
        }
    }
}

/// Feeds one raw device event through arbitration and then dispatches it to
/// whichever interaction path the registry has active.
#[derive(Debug, Default)]
struct EventRouter {
    active_touch: Option<u64>,
}

impl EventRouter {
    fn route(
        &mut self,
        event: RawDeviceEvent,
        now: f64,
        arbitrator: &mut InputArbitrator,
        ui: &mut UiRegistry,
        mapper: &ScreenMapper,
    ) {
        match event {
            RawDeviceEvent::KeyDown(code) => match nav_direction_for_key(code) {
                Some(direction) => {
                    arbitrator.report_direction(InputClass::Keyboard, direction, now)
                }
                None => arbitrator.report_activity(InputClass::Keyboard, now),
            },
            RawDeviceEvent::KeyUp(_) => arbitrator.report_activity(InputClass::Keyboard, now),
            RawDeviceEvent::PointerMoved { .. }
            | RawDeviceEvent::PointerDown { .. }
            | RawDeviceEvent::PointerUp { .. } => {
                arbitrator.report_activity(InputClass::Mouse, now)
            }
            RawDeviceEvent::GamepadButtonDown(button) => match dpad_direction(button) {
                Some(direction) => arbitrator.report_direction(InputClass::Gamepad, direction, now),
                None => arbitrator.report_activity(InputClass::Gamepad, now),
            },
            RawDeviceEvent::GamepadButtonUp(_) => {
                arbitrator.report_activity(InputClass::Gamepad, now)
            }
            RawDeviceEvent::GamepadAxes { x, y } => arbitrator.report_stick(x, y, now),
            RawDeviceEvent::TouchDown { .. }
            | RawDeviceEvent::TouchMoved { .. }
            | RawDeviceEvent::TouchUp { .. } => arbitrator.report_activity(InputClass::Touch, now),
        }

        apply_arbitrator_events(arbitrator, ui);

        match event {
            RawDeviceEvent::PointerMoved { x, y } => {
                let (ui_x, ui_y) = mapper.screen_to_ui(x, y);
                ui.pointer_move(ui_x, ui_y);
            }
            RawDeviceEvent::PointerDown {
                x,
                y,
                button: PointerButton::Primary,
            } => {
                let (ui_x, ui_y) = mapper.screen_to_ui(x, y);
                ui.pointer_press(ui_x, ui_y);
            }
            RawDeviceEvent::PointerUp {
                x,
                y,
                button: PointerButton::Primary,
            } => {
                let (ui_x, ui_y) = mapper.screen_to_ui(x, y);
                ui.pointer_release(ui_x, ui_y);
            }
            RawDeviceEvent::KeyDown(code) if is_confirm_key(code) => ui.activate_focused(),
            RawDeviceEvent::GamepadButtonDown(GamepadButton::South) => ui.activate_focused(),
            RawDeviceEvent::TouchDown { id, x, y } => {
                if self.active_touch.is_none() {
                    self.active_touch = Some(id);
                    let (ui_x, ui_y) = mapper.screen_to_ui(x, y);
                    ui.pointer_press(ui_x, ui_y);
                }
            }
            RawDeviceEvent::TouchMoved { id, x, y } => {
                if self.active_touch == Some(id) {
                    let (ui_x, ui_y) = mapper.screen_to_ui(x, y);
                    ui.pointer_move(ui_x, ui_y);
                }
            }
            RawDeviceEvent::TouchUp { id, x, y } => {
                if self.active_touch == Some(id) {
                    self.active_touch = None;
                    let (ui_x, ui_y) = mapper.screen_to_ui(x, y);
                    ui.pointer_release(ui_x, ui_y);
                }
            }
            _ => {}
        }
    }
}

/// Buffers winit window events into `RawDeviceEvent`s for the next frame and
/// tracks held movement keys for the per-tick snapshot. Press edges are
/// consumed by exactly one tick.
#[derive(Debug, Default)]
struct InputCollector {
    raw_events: Vec<RawDeviceEvent>,
    quit_requested: bool,
    last_cursor: Option<(f32, f32)>,
    move_up_is_down: bool,
    move_down_is_down: bool,
    move_left_is_down: bool,
    move_right_is_down: bool,
    stick_axes: (f32, f32),
    cancel_pressed_edge: bool,
    overlay_toggle_pressed_edge: bool,
}

impl InputCollector {
    fn handle_keyboard_input(&mut self, key_event: &KeyEvent) {
        if key_event.repeat {
            return;
        }
        let PhysicalKey::Code(code) = key_event.physical_key else {
            return;
        };
        let is_pressed = key_event.state == ElementState::Pressed;
        self.raw_events.push(if is_pressed {
            RawDeviceEvent::KeyDown(code)
        } else {
            RawDeviceEvent::KeyUp(code)
        });

        match code {
            KeyCode::KeyW => self.move_up_is_down = is_pressed,
            KeyCode::KeyS => self.move_down_is_down = is_pressed,
            KeyCode::KeyA => self.move_left_is_down = is_pressed,
            KeyCode::KeyD => self.move_right_is_down = is_pressed,
            KeyCode::Escape if is_pressed => self.cancel_pressed_edge = true,
            KeyCode::F3 if is_pressed => self.overlay_toggle_pressed_edge = true,
            _ => {}
        }
    }

    fn handle_cursor_moved(&mut self, x: f32, y: f32) {
        self.last_cursor = Some((x, y));
        self.raw_events.push(RawDeviceEvent::PointerMoved { x, y });
    }

    fn handle_mouse_input(&mut self, button: MouseButton, state: ElementState) {
        let mapped = match button {
            MouseButton::Left => PointerButton::Primary,
            MouseButton::Right => PointerButton::Secondary,
            _ => return,
        };
        let Some((x, y)) = self.last_cursor else {
            return;
        };
        self.raw_events.push(match state {
            ElementState::Pressed => RawDeviceEvent::PointerDown {
                x,
                y,
                button: mapped,
            },
            ElementState::Released => RawDeviceEvent::PointerUp {
                x,
                y,
                button: mapped,
            },
        });
    }

    fn handle_touch(&mut self, touch: &Touch) {
        let x = touch.location.x as f32;
        let y = touch.location.y as f32;
        let id = touch.id;
        self.raw_events.push(match touch.phase {
            TouchPhase::Started => RawDeviceEvent::TouchDown { id, x, y },
            TouchPhase::Moved => RawDeviceEvent::TouchMoved { id, x, y },
            TouchPhase::Ended | TouchPhase::Cancelled => RawDeviceEvent::TouchUp { id, x, y },
        });
    }

    /// Entry point for a gamepad backend; winit carries no controller
    /// events, so they are injected here by whichever backend the embedder
    /// polls.
    #[allow(dead_code)]
    fn handle_gamepad_event(&mut self, event: RawDeviceEvent) {
        if let RawDeviceEvent::GamepadAxes { x, y } = event {
            self.stick_axes = (x, y);
        }
        self.raw_events.push(event);
    }

    fn take_raw_events(&mut self) -> Vec<RawDeviceEvent> {
        std::mem::take(&mut self.raw_events)
    }

    fn snapshot_for_tick(&mut self) -> InputSnapshot {
        // Screen-space convention: +x right, +y down.
        let key_x =
            (self.move_right_is_down as i32 - self.move_left_is_down as i32) as f32;
        let key_y = (self.move_down_is_down as i32 - self.move_up_is_down as i32) as f32;
        let move_x = key_x + self.stick_axes.0;
        let move_y = key_y - self.stick_axes.1;
        let snapshot =
            InputSnapshot::new(move_x, move_y, self.cancel_pressed_edge, self.quit_requested);
        self.cancel_pressed_edge = false;
        snapshot
    }

    fn take_overlay_toggle_pressed(&mut self) -> bool {
        let was_pressed = self.overlay_toggle_pressed_edge;
        self.overlay_toggle_pressed_edge = false;
        was_pressed
    }
}

#[derive(Debug, Clone, Copy)]
struct StepPlan {
    ticks_to_run: u32,
    remaining_accumulator: Duration,
    dropped_backlog: Duration,
}

fn plan_sim_steps(
    mut accumulator: Duration,
    fixed_dt: Duration,
    max_ticks_per_frame: u32,
) -> StepPlan {
    let mut ticks_to_run = 0u32;
    while accumulator >= fixed_dt && ticks_to_run < max_ticks_per_frame {
        accumulator = accumulator.saturating_sub(fixed_dt);
        ticks_to_run = ticks_to_run.saturating_add(1);
    }

    if accumulator >= fixed_dt {
        StepPlan {
            ticks_to_run,
            remaining_accumulator: Duration::ZERO,
            dropped_backlog: accumulator,
        }
    } else {
        StepPlan {
            ticks_to_run,
            remaining_accumulator: accumulator,
            dropped_backlog: Duration::ZERO,
        }
    }
}

fn clamp_frame_delta(frame_dt: Duration, max_frame_delta: Duration) -> Duration {
    frame_dt.min(max_frame_delta)
}

fn normalize_non_zero_duration(value: Duration, fallback: Duration) -> Duration {
    if value.is_zero() {
        fallback
    } else {
        value
    }
}

fn normalize_render_fps_cap(cap: Option<u32>) -> Option<u32> {
    cap.filter(|value| *value > 0)
}

fn target_frame_duration(max_render_fps: Option<u32>) -> Option<Duration> {
    max_render_fps.map(|fps| Duration::from_secs_f64(1.0 / fps as f64))
}

fn compute_cap_sleep(elapsed: Duration, target: Option<Duration>) -> Duration {
    match target {
        Some(frame_target) if elapsed < frame_target => frame_target - elapsed,
        _ => Duration::ZERO,
    }
}

fn format_render_cap(cap: Option<u32>) -> String {
    match cap {
        Some(value) => value.to_string(),
        None => "off".to_string(),
    }
}

fn resolve_slow_frame_delay(config_slow_frame_ms: u64) -> Duration {
    match env::var(SLOW_FRAME_ENV_VAR) {
        Ok(value) => match value.parse::<u64>() {
            Ok(ms) => Duration::from_millis(ms),
            Err(_) => {
                warn!(
                    env_var = SLOW_FRAME_ENV_VAR,
                    value = value.as_str(),
                    "invalid slow-frame env var value; falling back to config"
                );
                Duration::from_millis(config_slow_frame_ms)
            }
        },
        Err(env::VarError::NotPresent) => Duration::from_millis(config_slow_frame_ms),
        Err(err) => {
            warn!(
                env_var = SLOW_FRAME_ENV_VAR,
                error = %err,
                "unable to read slow-frame env var; falling back to config"
            );
            Duration::from_millis(config_slow_frame_ms)
        }
    }
}

fn nav_direction_for_key(code: KeyCode) -> Option<NavDirection> {
    match code {
        KeyCode::ArrowUp => Some(NavDirection::Up),
        KeyCode::ArrowDown => Some(NavDirection::Down),
        KeyCode::ArrowLeft => Some(NavDirection::Left),
        KeyCode::ArrowRight => Some(NavDirection::Right),
        _ => None,
    }
}

fn is_confirm_key(code: KeyCode) -> bool {
    matches!(code, KeyCode::Enter | KeyCode::NumpadEnter | KeyCode::Space)
}

fn dpad_direction(button: GamepadButton) -> Option<NavDirection> {
    match button {
        GamepadButton::DpadUp => Some(NavDirection::Up),
        GamepadButton::DpadDown => Some(NavDirection::Down),
        GamepadButton::DpadLeft => Some(NavDirection::Left),
        GamepadButton::DpadRight => Some(NavDirection::Right),
        _ => None,
    }
}
