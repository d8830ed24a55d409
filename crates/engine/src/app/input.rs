use winit::keyboard::KeyCode;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum InputClass {
    #[default]
    None,
    Keyboard,
    Mouse,
    Gamepad,
    Touch,
}

impl InputClass {
    pub fn is_pointer(self) -> bool {
        matches!(self, InputClass::Mouse | InputClass::Touch)
    }

    pub fn is_directional(self) -> bool {
        matches!(self, InputClass::Keyboard | InputClass::Gamepad)
    }

    pub fn label(self) -> &'static str {
        match self {
            InputClass::None => "none",
            InputClass::Keyboard => "keyboard",
            InputClass::Mouse => "mouse",
            InputClass::Gamepad => "gamepad",
            InputClass::Touch => "touch",
        }
    }

    const fn slot(self) -> Option<usize> {
        match self {
            InputClass::None => None,
            InputClass::Keyboard => Some(0),
            InputClass::Mouse => Some(1),
            InputClass::Gamepad => Some(2),
            InputClass::Touch => Some(3),
        }
    }
}

const CLASS_SLOT_COUNT: usize = 4;

const SLOT_CLASSES: [InputClass; CLASS_SLOT_COUNT] = [
    InputClass::Keyboard,
    InputClass::Mouse,
    InputClass::Gamepad,
    InputClass::Touch,
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NavDirection {
    Up,
    Down,
    Left,
    Right,
}

impl NavDirection {
    pub(crate) const fn index(self) -> usize {
        match self {
            NavDirection::Up => 0,
            NavDirection::Down => 1,
            NavDirection::Left => 2,
            NavDirection::Right => 3,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerButton {
    Primary,
    Secondary,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamepadButton {
    South,
    East,
    Start,
    DpadUp,
    DpadDown,
    DpadLeft,
    DpadRight,
}

/// Device events the runtime consumes. The winit adapter produces the
/// keyboard, pointer, and touch variants; gamepad variants enter through the
/// same queue from whatever backend the embedder wires up.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RawDeviceEvent {
    KeyDown(KeyCode),
    KeyUp(KeyCode),
    PointerMoved { x: f32, y: f32 },
    PointerDown { x: f32, y: f32, button: PointerButton },
    PointerUp { x: f32, y: f32, button: PointerButton },
    GamepadButtonDown(GamepadButton),
    GamepadButtonUp(GamepadButton),
    GamepadAxes { x: f32, y: f32 },
    TouchDown { id: u64, x: f32, y: f32 },
    TouchMoved { id: u64, x: f32, y: f32 },
    TouchUp { id: u64, x: f32, y: f32 },
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ArbitratorEvent {
    ClassChanged {
        from: InputClass,
        to: InputClass,
    },
    DirectionPulse {
        class: InputClass,
        direction: NavDirection,
    },
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArbitratorConfig {
    pub timeout_seconds: f64,
    pub change_cooldown_seconds: f64,
    pub stick_deadzone: f32,
    pub stick_repeat_seconds: f64,
}

impl Default for ArbitratorConfig {
    fn default() -> Self {
        Self {
            timeout_seconds: 5.0,
            change_cooldown_seconds: 1.0,
            stick_deadzone: 0.5,
            stick_repeat_seconds: 0.2,
        }
    }
}

/// Decides which device class owns UI dispatch, frame by frame.
///
/// Two hysteresis windows keep the decision stable: a class that has been
/// silent for `timeout_seconds` drops back to `None`, and a freshly changed
/// class cannot be overridden for `change_cooldown_seconds`. Activity seen
/// during the cooldown window is recorded rather than dropped; `tick`
/// promotes the most recently active class once the window closes.
#[derive(Debug)]
pub struct InputArbitrator {
    config: ArbitratorConfig,
    current_class: InputClass,
    last_activity: [Option<f64>; CLASS_SLOT_COUNT],
    last_class_change: Option<f64>,
    stick_held_direction: Option<NavDirection>,
    last_stick_pulse: Option<f64>,
    pending_events: Vec<ArbitratorEvent>,
}

impl InputArbitrator {
    pub fn new(config: ArbitratorConfig) -> Self {
        Self {
            config,
            current_class: InputClass::None,
            last_activity: [None; CLASS_SLOT_COUNT],
            last_class_change: None,
            stick_held_direction: None,
            last_stick_pulse: None,
            pending_events: Vec::new(),
        }
    }

    pub fn current_class(&self) -> InputClass {
        self.current_class
    }

    pub fn config(&self) -> ArbitratorConfig {
        self.config
    }

    /// Records one raw device event for `class`. The activity timestamp is
    /// always recorded; the class takes over immediately only when no
    /// cooldown window is open.
    pub fn report_activity(&mut self, class: InputClass, now: f64) {
        let Some(slot) = class.slot() else {
            return;
        };
        self.last_activity[slot] = Some(now);

        if class == self.current_class || self.cooldown_open(now) {
            return;
        }
        self.change_class(class, now);
    }

    /// A discrete directional press (arrow key, D-pad). Fires one pulse per
    /// call; callers are expected to send press edges, not repeats.
    pub fn report_direction(&mut self, class: InputClass, direction: NavDirection, now: f64) {
        self.report_activity(class, now);
        if self.current_class == class {
            self.pending_events
                .push(ArbitratorEvent::DirectionPulse { class, direction });
        }
    }

    /// Analog stick sample in [-1, 1] per axis, +y up. Samples inside the
    /// deadzone are not device activity (idle sticks drift) and re-arm the
    /// repeat limiter; held deflection pulses at the configured repeat rate.
    pub fn report_stick(&mut self, x: f32, y: f32, now: f64) {
        let Some(direction) = stick_direction(x, y, self.config.stick_deadzone) else {
            self.stick_held_direction = None;
            self.last_stick_pulse = None;
            return;
        };

        self.report_activity(InputClass::Gamepad, now);
        let direction_changed = self.stick_held_direction != Some(direction);
        self.stick_held_direction = Some(direction);

        if self.current_class != InputClass::Gamepad {
            return;
        }

        let due = direction_changed
            || self
                .last_stick_pulse
                .map_or(true, |at| now - at >= self.config.stick_repeat_seconds);
        if due {
            self.last_stick_pulse = Some(now);
            self.pending_events.push(ArbitratorEvent::DirectionPulse {
                class: InputClass::Gamepad,
                direction,
            });
        }
    }

    /// Runs once per frame before any event dispatch: applies the idle
    /// timeout (which always wins over the cooldown) and then promotes
    /// activity that was recorded while a cooldown window was open.
    pub fn tick(&mut self, now: f64) {
        if self.current_class != InputClass::None {
            let idle = self
                .current_class
                .slot()
                .and_then(|slot| self.last_activity[slot])
                .map(|at| now - at);
            if idle.map_or(true, |idle| idle > self.config.timeout_seconds) {
                self.change_class(InputClass::None, now);
            }
        }

        if !self.cooldown_open(now) {
            if let Some(winner) = self.deferred_winner() {
                self.change_class(winner, now);
            }
        }
    }

    /// Drains notifications accumulated since the last call, in emission
    /// order.
    pub fn take_events(&mut self) -> Vec<ArbitratorEvent> {
        std::mem::take(&mut self.pending_events)
    }

    fn cooldown_open(&self, now: f64) -> bool {
        self.last_class_change
            .map_or(false, |at| now - at < self.config.change_cooldown_seconds)
    }

    /// The most recently active class, considering only activity newer than
    /// the last class change. `None` when the current class is already the
    /// winner or nothing new was recorded.
    fn deferred_winner(&self) -> Option<InputClass> {
        let floor = self.last_class_change.unwrap_or(f64::NEG_INFINITY);
        let mut winner: Option<(InputClass, f64)> = None;
        for class in SLOT_CLASSES {
            let Some(at) = class.slot().and_then(|slot| self.last_activity[slot]) else {
                continue;
            };
            if at <= floor {
                continue;
            }
            match winner {
                Some((_, best)) if best >= at => {}
                _ => winner = Some((class, at)),
            }
        }

        match winner {
            Some((class, _)) if class != self.current_class => Some(class),
            _ => None,
        }
    }

    fn change_class(&mut self, to: InputClass, now: f64) {
        let from = self.current_class;
        if from == to {
            return;
        }
        self.current_class = to;
        self.last_class_change = Some(now);
        self.pending_events
            .push(ArbitratorEvent::ClassChanged { from, to });
    }
}

fn stick_direction(x: f32, y: f32, deadzone: f32) -> Option<NavDirection> {
    if x.abs() >= y.abs() {
        if x > deadzone {
            Some(NavDirection::Right)
        } else if x < -deadzone {
            Some(NavDirection::Left)
        } else {
            None
        }
    } else if y > deadzone {
        Some(NavDirection::Up)
    } else if y < -deadzone {
        Some(NavDirection::Down)
    } else {
        None
    }
}

/// Per-tick view of held movement input and edge-triggered commands, built by
/// the frame driver and handed to the active scene.
#[derive(Debug, Clone, Copy, Default)]
pub struct InputSnapshot {
    move_x: f32,
    move_y: f32,
    cancel_pressed: bool,
    quit_requested: bool,
}

impl InputSnapshot {
    pub fn empty() -> Self {
        Self::default()
    }

    pub(crate) fn new(
        move_x: f32,
        move_y: f32,
        cancel_pressed: bool,
        quit_requested: bool,
    ) -> Self {
        Self {
            move_x,
            move_y,
            cancel_pressed,
            quit_requested,
        }
    }

    /// Held movement direction, normalized so diagonals are not faster.
    pub fn move_axes(&self) -> (f32, f32) {
        let len_sq = self.move_x * self.move_x + self.move_y * self.move_y;
        if len_sq > 1.0 {
            let inv_len = len_sq.sqrt().recip();
            (self.move_x * inv_len, self.move_y * inv_len)
        } else {
            (self.move_x, self.move_y)
        }
    }

    pub fn cancel_pressed(&self) -> bool {
        self.cancel_pressed
    }

    pub fn quit_requested(&self) -> bool {
        self.quit_requested
    }

    pub fn with_move_axes(mut self, move_x: f32, move_y: f32) -> Self {
        self.move_x = move_x;
        self.move_y = move_y;
        self
    }

    pub fn with_cancel_pressed(mut self, cancel_pressed: bool) -> Self {
        self.cancel_pressed = cancel_pressed;
        self
    }
}
