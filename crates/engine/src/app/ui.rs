use tracing::debug;

use super::input::{InputClass, NavDirection};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WidgetId(u32);

impl WidgetId {
    fn index(self) -> usize {
        self.0 as usize
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct UiRect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl UiRect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn contains(&self, x: f32, y: f32) -> bool {
        x >= self.x && x < self.x + self.width && y >= self.y && y < self.y + self.height
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum VisualState {
    #[default]
    Normal,
    Hovered,
    Pressed,
    Focused,
}

#[derive(Debug, Clone, PartialEq)]
pub enum WidgetKind {
    Button { label: String },
    Label { text: String },
    Image { key: String },
    Panel,
}

#[derive(Debug, Clone)]
pub struct Widget {
    kind: WidgetKind,
    rect: UiRect,
    focusable: bool,
    neighbors: [Option<WidgetId>; 4],
}

impl Widget {
    pub fn button(rect: UiRect, label: impl Into<String>) -> Self {
        Self {
            kind: WidgetKind::Button {
                label: label.into(),
            },
            rect,
            focusable: true,
            neighbors: [None; 4],
        }
    }

    pub fn label(rect: UiRect, text: impl Into<String>) -> Self {
        Self {
            kind: WidgetKind::Label { text: text.into() },
            rect,
            focusable: false,
            neighbors: [None; 4],
        }
    }

    pub fn image(rect: UiRect, key: impl Into<String>) -> Self {
        Self {
            kind: WidgetKind::Image { key: key.into() },
            rect,
            focusable: false,
            neighbors: [None; 4],
        }
    }

    pub fn panel(rect: UiRect) -> Self {
        Self {
            kind: WidgetKind::Panel,
            rect,
            focusable: false,
            neighbors: [None; 4],
        }
    }

    pub fn with_focusable(mut self, focusable: bool) -> Self {
        self.focusable = focusable;
        self
    }

    pub fn kind(&self) -> &WidgetKind {
        &self.kind
    }

    pub fn rect(&self) -> UiRect {
        self.rect
    }

    pub fn is_focusable(&self) -> bool {
        self.focusable
    }

    pub fn neighbor(&self, direction: NavDirection) -> Option<WidgetId> {
        self.neighbors[direction.index()]
    }

    fn accepts_pointer(&self) -> bool {
        matches!(self.kind, WidgetKind::Button { .. })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiEvent {
    HoverStart(WidgetId),
    HoverEnd(WidgetId),
    Pressed(WidgetId),
    Released(WidgetId),
    Clicked(WidgetId),
    FocusGained(WidgetId),
    FocusLost(WidgetId),
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
enum InteractionPath {
    #[default]
    Inert,
    Pointer,
    Directional,
}

/// Owns the live widget set for the current scene and routes interaction to
/// either the pointer path (hover/press/click) or the directional path
/// (focus traversal), depending on the arbitrated input class.
///
/// Widgets live in an arena; a `WidgetId` is the slot index. Slots are
/// tombstoned on removal and never reused until `clear`, so insertion order
/// doubles as paint order and reverse hit-test order for the lifetime of a
/// scene.
#[derive(Debug, Default)]
pub struct UiRegistry {
    slots: Vec<Option<Widget>>,
    focused: Option<WidgetId>,
    hovered: Option<WidgetId>,
    active: Option<WidgetId>,
    path: InteractionPath,
    pending_events: Vec<UiEvent>,
}

impl UiRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, widget: Widget) -> WidgetId {
        let id = WidgetId(self.slots.len() as u32);
        self.slots.push(Some(widget));
        id
    }

    /// Idempotent: removing an id that is already gone is a no-op. Any of
    /// the three singleton references pointing at the slot are cleared so
    /// they never dangle.
    pub fn remove(&mut self, id: WidgetId) {
        let Some(slot) = self.slots.get_mut(id.index()) else {
            return;
        };
        if slot.take().is_none() {
            return;
        }
        if self.focused == Some(id) {
            self.focused = None;
        }
        if self.hovered == Some(id) {
            self.hovered = None;
        }
        if self.active == Some(id) {
            self.active = None;
        }
    }

    pub fn clear(&mut self) {
        self.slots.clear();
        self.focused = None;
        self.hovered = None;
        self.active = None;
        self.pending_events.clear();
    }

    pub fn widget(&self, id: WidgetId) -> Option<&Widget> {
        self.slots.get(id.index()).and_then(Option::as_ref)
    }

    pub fn widget_count(&self) -> usize {
        self.slots.iter().filter(|slot| slot.is_some()).count()
    }

    pub fn widgets_in_paint_order(&self) -> impl Iterator<Item = (WidgetId, &Widget)> {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(index, slot)| slot.as_ref().map(|w| (WidgetId(index as u32), w)))
    }

    pub fn set_label_text(&mut self, id: WidgetId, text: impl Into<String>) {
        if let Some(widget) = self.slots.get_mut(id.index()).and_then(Option::as_mut) {
            match &mut widget.kind {
                WidgetKind::Label { text: current } => *current = text.into(),
                WidgetKind::Button { label } => *label = text.into(),
                _ => {}
            }
        }
    }

    pub fn set_neighbor(
        &mut self,
        id: WidgetId,
        direction: NavDirection,
        neighbor: Option<WidgetId>,
    ) {
        if let Some(widget) = self.slots.get_mut(id.index()).and_then(Option::as_mut) {
            widget.neighbors[direction.index()] = neighbor;
        }
    }

    /// Chains left/right links through `ids` in order. Endpoints are left
    /// unlinked; there is no wraparound.
    pub fn link_row(&mut self, ids: &[WidgetId]) {
        for pair in ids.windows(2) {
            self.set_neighbor(pair[0], NavDirection::Right, Some(pair[1]));
            self.set_neighbor(pair[1], NavDirection::Left, Some(pair[0]));
        }
    }

    /// Chains up/down links through `ids` in order, topmost first.
    pub fn link_column(&mut self, ids: &[WidgetId]) {
        for pair in ids.windows(2) {
            self.set_neighbor(pair[0], NavDirection::Down, Some(pair[1]));
            self.set_neighbor(pair[1], NavDirection::Up, Some(pair[0]));
        }
    }

    pub fn focused(&self) -> Option<WidgetId> {
        self.focused
    }

    pub fn hovered(&self) -> Option<WidgetId> {
        self.hovered
    }

    pub fn active(&self) -> Option<WidgetId> {
        self.active
    }

    pub fn visual_state(&self, id: WidgetId) -> VisualState {
        if self.active == Some(id) {
            VisualState::Pressed
        } else if self.hovered == Some(id) {
            VisualState::Hovered
        } else if self.focused == Some(id) {
            VisualState::Focused
        } else {
            VisualState::Normal
        }
    }

    /// Moves focus, emitting `FocusLost` for the previous widget and
    /// `FocusGained` for the new one. Reassigning the same widget is a
    /// no-op and emits nothing.
    pub fn set_focused(&mut self, target: Option<WidgetId>) {
        if let Some(id) = target {
            if self.widget(id).is_none() {
                debug!(widget = id.0, "focus target no longer registered");
                return;
            }
        }
        if self.focused == target {
            return;
        }
        if let Some(previous) = self.focused {
            self.pending_events.push(UiEvent::FocusLost(previous));
        }
        self.focused = target;
        if let Some(next) = target {
            self.pending_events.push(UiEvent::FocusGained(next));
        }
    }

    /// Applies the arbitrated input class to the routing state. Entering a
    /// pointer class drops focus (there is nothing pointed-at to focus);
    /// entering a directional class releases any armed press, clears hover,
    /// and seeds focus with the first focusable widget; `None` freezes both
    /// paths without touching state.
    pub fn sync_input_class(&mut self, class: InputClass) {
        let next = if class.is_pointer() {
            InteractionPath::Pointer
        } else if class.is_directional() {
            InteractionPath::Directional
        } else {
            InteractionPath::Inert
        };
        if next == self.path {
            return;
        }
        self.path = next;

        match next {
            InteractionPath::Pointer => self.set_focused(None),
            InteractionPath::Directional => {
                if let Some(id) = self.active.take() {
                    self.pending_events.push(UiEvent::Released(id));
                }
                self.set_hovered(None);
                if self.focused.is_none() {
                    let first = self.first_focusable();
                    self.set_focused(first);
                }
            }
            InteractionPath::Inert => {}
        }
    }

    pub fn pointer_move(&mut self, x: f32, y: f32) {
        if self.path != InteractionPath::Pointer {
            return;
        }
        let target = self.hit_test(x, y);
        self.set_hovered(target);
    }

    pub fn pointer_press(&mut self, x: f32, y: f32) {
        if self.path != InteractionPath::Pointer {
            return;
        }
        let target = self.hit_test(x, y);
        self.set_hovered(target);
        if let Some(id) = self.hovered {
            self.active = Some(id);
            self.pending_events.push(UiEvent::Pressed(id));
        }
    }

    /// Emits `Released` for the armed widget and `Clicked` only when the
    /// pointer is still over it; dragging off before release cancels the
    /// click.
    pub fn pointer_release(&mut self, x: f32, y: f32) {
        if self.path != InteractionPath::Pointer {
            return;
        }
        let target = self.hit_test(x, y);
        self.set_hovered(target);
        if let Some(id) = self.active.take() {
            self.pending_events.push(UiEvent::Released(id));
            if self.hovered == Some(id) {
                self.pending_events.push(UiEvent::Clicked(id));
            }
        }
    }

    /// Follows the focused widget's neighbor link; with no focus, seeds it
    /// from the first focusable widget. Off the edge of the graph nothing
    /// happens.
    pub fn navigate(&mut self, direction: NavDirection) {
        if self.path != InteractionPath::Directional {
            return;
        }
        let Some(current) = self.focused else {
            let first = self.first_focusable();
            self.set_focused(first);
            return;
        };
        let neighbor = self.widget(current).and_then(|w| w.neighbor(direction));
        if let Some(next) = neighbor {
            if self.widget(next).is_some_and(Widget::is_focusable) {
                self.set_focused(Some(next));
            }
        }
    }

    /// Confirm key / south gamepad button: the focused widget is clicked.
    pub fn activate_focused(&mut self) {
        if self.path != InteractionPath::Directional {
            return;
        }
        if let Some(id) = self.focused {
            self.pending_events.push(UiEvent::Clicked(id));
        }
    }

    /// Drains interaction events accumulated since the last call, in
    /// emission order.
    pub fn take_events(&mut self) -> Vec<UiEvent> {
        std::mem::take(&mut self.pending_events)
    }

    fn first_focusable(&self) -> Option<WidgetId> {
        self.widgets_in_paint_order()
            .find(|(_, widget)| widget.is_focusable())
            .map(|(id, _)| id)
    }

    /// Topmost interactive widget under the point: reverse insertion order,
    /// first hit wins.
    fn hit_test(&self, x: f32, y: f32) -> Option<WidgetId> {
        self.slots
            .iter()
            .enumerate()
            .rev()
            .find_map(|(index, slot)| match slot {
                Some(widget) if widget.accepts_pointer() && widget.rect.contains(x, y) => {
                    Some(WidgetId(index as u32))
                }
                _ => None,
            })
    }

    fn set_hovered(&mut self, target: Option<WidgetId>) {
        if self.hovered == target {
            return;
        }
        if let Some(previous) = self.hovered {
            self.pending_events.push(UiEvent::HoverEnd(previous));
        }
        self.hovered = target;
        if let Some(next) = target {
            self.pending_events.push(UiEvent::HoverStart(next));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn button_at(x: f32, y: f32) -> Widget {
        Widget::button(UiRect::new(x, y, 100.0, 30.0), "button")
    }

    fn pointer_registry() -> UiRegistry {
        let mut ui = UiRegistry::new();
        ui.sync_input_class(InputClass::Mouse);
        ui
    }

    fn directional_registry() -> UiRegistry {
        let mut ui = UiRegistry::new();
        ui.sync_input_class(InputClass::Keyboard);
        ui
    }

    #[test]
    fn hit_test_prefers_last_inserted_widget() {
        let mut ui = pointer_registry();
        let below = ui.add(button_at(0.0, 0.0));
        let above = ui.add(button_at(50.0, 0.0));

        ui.pointer_move(75.0, 10.0);
        assert_eq!(ui.hovered(), Some(above));

        ui.pointer_move(25.0, 10.0);
        assert_eq!(ui.hovered(), Some(below));
    }

    #[test]
    fn hover_change_emits_end_then_start() {
        let mut ui = pointer_registry();
        let a = ui.add(button_at(0.0, 0.0));
        let b = ui.add(button_at(200.0, 0.0));

        ui.pointer_move(10.0, 10.0);
        ui.pointer_move(210.0, 10.0);

        assert_eq!(
            ui.take_events(),
            vec![
                UiEvent::HoverStart(a),
                UiEvent::HoverEnd(a),
                UiEvent::HoverStart(b),
            ]
        );
    }

    #[test]
    fn non_interactive_widgets_do_not_hover() {
        let mut ui = pointer_registry();
        ui.add(Widget::panel(UiRect::new(0.0, 0.0, 500.0, 500.0)));
        ui.add(Widget::label(UiRect::new(0.0, 0.0, 500.0, 20.0), "title"));

        ui.pointer_move(10.0, 10.0);
        assert_eq!(ui.hovered(), None);
    }

    #[test]
    fn press_and_release_over_widget_clicks() {
        let mut ui = pointer_registry();
        let target = ui.add(button_at(0.0, 0.0));

        ui.pointer_press(10.0, 10.0);
        assert_eq!(ui.active(), Some(target));
        ui.pointer_release(10.0, 10.0);

        let events = ui.take_events();
        assert!(events.contains(&UiEvent::Pressed(target)));
        assert!(events.contains(&UiEvent::Released(target)));
        assert!(events.contains(&UiEvent::Clicked(target)));
        assert_eq!(ui.active(), None);
    }

    #[test]
    fn drag_off_before_release_cancels_click_but_still_releases() {
        let mut ui = pointer_registry();
        let target = ui.add(button_at(0.0, 0.0));

        ui.pointer_press(10.0, 10.0);
        ui.pointer_move(300.0, 300.0);
        ui.pointer_release(300.0, 300.0);

        let events = ui.take_events();
        assert!(events.contains(&UiEvent::Released(target)));
        assert!(!events.contains(&UiEvent::Clicked(target)));
    }

    #[test]
    fn press_on_empty_space_arms_nothing() {
        let mut ui = pointer_registry();
        ui.add(button_at(0.0, 0.0));

        ui.pointer_press(400.0, 400.0);
        assert_eq!(ui.active(), None);
        ui.pointer_release(400.0, 400.0);
        assert!(ui.take_events().is_empty());
    }

    #[test]
    fn touch_class_drives_the_pointer_path_too() {
        let mut ui = UiRegistry::new();
        ui.sync_input_class(InputClass::Touch);
        let target = ui.add(button_at(0.0, 0.0));

        // A tap arrives as press+release with no prior move.
        ui.pointer_press(10.0, 10.0);
        ui.pointer_release(10.0, 10.0);
        assert!(ui.take_events().contains(&UiEvent::Clicked(target)));
    }

    #[test]
    fn pointer_events_are_suppressed_under_a_directional_class() {
        let mut ui = directional_registry();
        ui.add(button_at(0.0, 0.0));

        ui.pointer_move(10.0, 10.0);
        ui.pointer_press(10.0, 10.0);
        assert_eq!(ui.hovered(), None);
        assert_eq!(ui.active(), None);
    }

    #[test]
    fn navigation_is_suppressed_under_a_pointer_class() {
        let mut ui = pointer_registry();
        ui.add(button_at(0.0, 0.0));

        ui.navigate(NavDirection::Down);
        assert_eq!(ui.focused(), None);
    }

    #[test]
    fn entering_directional_class_focuses_first_focusable_in_insertion_order() {
        let mut ui = UiRegistry::new();
        ui.add(Widget::label(UiRect::new(0.0, 0.0, 100.0, 20.0), "title"));
        let first_button = ui.add(button_at(0.0, 40.0));
        ui.add(button_at(0.0, 80.0));

        ui.sync_input_class(InputClass::Keyboard);
        assert_eq!(ui.focused(), Some(first_button));
        assert_eq!(ui.take_events(), vec![UiEvent::FocusGained(first_button)]);
    }

    #[test]
    fn entering_pointer_class_clears_focus() {
        let mut ui = directional_registry();
        let target = ui.add(button_at(0.0, 0.0));
        ui.navigate(NavDirection::Down);
        assert_eq!(ui.focused(), Some(target));

        ui.sync_input_class(InputClass::Mouse);
        assert_eq!(ui.focused(), None);
    }

    #[test]
    fn switch_from_mouse_to_keyboard_focuses_first_not_hovered() {
        let mut ui = pointer_registry();
        let first = ui.add(button_at(0.0, 0.0));
        let hovered = ui.add(button_at(0.0, 40.0));

        ui.pointer_move(10.0, 50.0);
        assert_eq!(ui.hovered(), Some(hovered));

        ui.sync_input_class(InputClass::Keyboard);
        assert_eq!(ui.focused(), Some(first));
    }

    #[test]
    fn none_class_preserves_existing_state() {
        let mut ui = directional_registry();
        let target = ui.add(button_at(0.0, 0.0));
        ui.navigate(NavDirection::Down);

        ui.sync_input_class(InputClass::None);
        assert_eq!(ui.focused(), Some(target));

        // Both paths are inert until a class returns.
        ui.navigate(NavDirection::Down);
        ui.pointer_press(10.0, 10.0);
        assert_eq!(ui.active(), None);
    }

    #[test]
    fn navigate_follows_links_and_stops_at_graph_edge() {
        let mut ui = directional_registry();
        let a = ui.add(button_at(0.0, 0.0));
        let b = ui.add(button_at(120.0, 0.0));
        ui.link_row(&[a, b]);

        ui.set_focused(Some(a));
        ui.navigate(NavDirection::Right);
        assert_eq!(ui.focused(), Some(b));

        // No link to the right of b: focus stays put.
        ui.navigate(NavDirection::Right);
        assert_eq!(ui.focused(), Some(b));

        ui.navigate(NavDirection::Left);
        assert_eq!(ui.focused(), Some(a));
    }

    #[test]
    fn navigate_never_lands_on_a_non_focusable_widget() {
        let mut ui = directional_registry();
        let a = ui.add(button_at(0.0, 0.0));
        let decoration = ui.add(button_at(120.0, 0.0).with_focusable(false));
        ui.set_neighbor(a, NavDirection::Right, Some(decoration));

        ui.set_focused(Some(a));
        ui.navigate(NavDirection::Right);
        assert_eq!(ui.focused(), Some(a));
    }

    #[test]
    fn refocusing_same_widget_emits_no_duplicate_events() {
        let mut ui = directional_registry();
        let target = ui.add(button_at(0.0, 0.0));

        ui.set_focused(Some(target));
        ui.set_focused(Some(target));

        let gained = ui
            .take_events()
            .iter()
            .filter(|event| matches!(event, UiEvent::FocusGained(_)))
            .count();
        assert_eq!(gained, 1);
    }

    #[test]
    fn focus_move_emits_lost_then_gained() {
        let mut ui = directional_registry();
        let a = ui.add(button_at(0.0, 0.0));
        let b = ui.add(button_at(120.0, 0.0));
        ui.link_row(&[a, b]);
        ui.set_focused(Some(a));
        ui.take_events();

        ui.navigate(NavDirection::Right);
        assert_eq!(
            ui.take_events(),
            vec![UiEvent::FocusLost(a), UiEvent::FocusGained(b)]
        );
    }

    #[test]
    fn activate_clicks_the_focused_widget() {
        let mut ui = directional_registry();
        let target = ui.add(button_at(0.0, 0.0));
        ui.set_focused(Some(target));

        ui.activate_focused();
        assert!(ui.take_events().contains(&UiEvent::Clicked(target)));
    }

    #[test]
    fn activate_without_focus_is_silent() {
        let mut ui = directional_registry();
        let _ = ui.add(button_at(0.0, 0.0).with_focusable(false));
        ui.activate_focused();
        assert!(ui.take_events().is_empty());
    }

    #[test]
    fn remove_clears_singleton_references() {
        let mut ui = pointer_registry();
        let target = ui.add(button_at(0.0, 0.0));
        ui.pointer_press(10.0, 10.0);
        assert_eq!(ui.hovered(), Some(target));
        assert_eq!(ui.active(), Some(target));

        ui.remove(target);
        assert_eq!(ui.hovered(), None);
        assert_eq!(ui.active(), None);
        assert_eq!(ui.widget_count(), 0);
    }

    #[test]
    fn remove_twice_is_a_safe_no_op() {
        let mut ui = directional_registry();
        let keep = ui.add(button_at(0.0, 0.0));
        let target = ui.add(button_at(0.0, 40.0));
        ui.set_focused(Some(keep));

        ui.remove(target);
        ui.remove(target);
        assert_eq!(ui.focused(), Some(keep));
        assert_eq!(ui.widget_count(), 1);
    }

    #[test]
    fn removed_slot_is_not_hit_tested_or_focused() {
        let mut ui = pointer_registry();
        let gone = ui.add(button_at(0.0, 0.0));
        ui.remove(gone);

        ui.pointer_move(10.0, 10.0);
        assert_eq!(ui.hovered(), None);

        ui.sync_input_class(InputClass::Keyboard);
        assert_eq!(ui.focused(), None);
    }

    #[test]
    fn navigate_with_no_focus_seeds_from_first_focusable() {
        let mut ui = directional_registry();
        // Registry was empty when the class arrived, so nothing is focused.
        assert_eq!(ui.focused(), None);
        let first = ui.add(button_at(0.0, 0.0));
        ui.add(button_at(0.0, 40.0));

        ui.navigate(NavDirection::Down);
        assert_eq!(ui.focused(), Some(first));
    }

    #[test]
    fn clear_drops_widgets_state_and_pending_events() {
        let mut ui = pointer_registry();
        let target = ui.add(button_at(0.0, 0.0));
        ui.pointer_press(10.0, 10.0);
        assert_eq!(ui.active(), Some(target));

        ui.clear();
        assert_eq!(ui.widget_count(), 0);
        assert_eq!(ui.hovered(), None);
        assert_eq!(ui.active(), None);
        assert!(ui.take_events().is_empty());
    }

    #[test]
    fn visual_state_precedence_is_pressed_hovered_focused() {
        let mut ui = pointer_registry();
        let target = ui.add(button_at(0.0, 0.0));
        assert_eq!(ui.visual_state(target), VisualState::Normal);

        ui.pointer_move(10.0, 10.0);
        assert_eq!(ui.visual_state(target), VisualState::Hovered);

        ui.pointer_press(10.0, 10.0);
        assert_eq!(ui.visual_state(target), VisualState::Pressed);

        ui.pointer_release(10.0, 10.0);
        ui.sync_input_class(InputClass::Keyboard);
        ui.set_focused(Some(target));
        ui.pointer_move(400.0, 400.0);
        assert_eq!(ui.visual_state(target), VisualState::Focused);
    }
}
