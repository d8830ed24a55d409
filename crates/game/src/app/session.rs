use std::cell::RefCell;
use std::rc::Rc;

use ember_engine::{GameSettings, PlayerProfile};

/// Outcome of the most recent arena run, shown on the menu.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RunSummary {
    pub survival_seconds: f32,
    pub embers: u32,
    pub new_record: bool,
}

/// Cross-scene state: the chosen profile, the editable settings copy, and
/// the last run's outcome. Scenes share one handle; the game is
/// single-threaded, so `Rc<RefCell<_>>` is all the synchronization needed.
#[derive(Debug, Default)]
pub struct SessionState {
    pub profile: Option<PlayerProfile>,
    pub settings: GameSettings,
    pub last_run: Option<RunSummary>,
}

pub type SessionHandle = Rc<RefCell<SessionState>>;

pub fn new_session(settings: GameSettings) -> SessionHandle {
    Rc::new(RefCell::new(SessionState {
        profile: None,
        settings,
        last_run: None,
    }))
}
