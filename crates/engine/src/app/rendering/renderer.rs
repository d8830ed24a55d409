use std::sync::Arc;

use pixels::{Error, Pixels, SurfaceTexture, TextureError};
use winit::window::Window;

use crate::app::ui::{UiRegistry, VisualState, WidgetKind};

use super::draw::{text_width, DrawFrame, TEXT_HEIGHT};
use super::transform::{UI_HEIGHT, UI_WIDTH};

const BUTTON_FILL_NORMAL: [u8; 4] = [38, 42, 54, 255];
const BUTTON_FILL_HOVERED: [u8; 4] = [56, 62, 80, 255];
const BUTTON_FILL_PRESSED: [u8; 4] = [24, 26, 34, 255];
const BUTTON_FILL_FOCUSED: [u8; 4] = [52, 58, 92, 255];
const BUTTON_BORDER: [u8; 4] = [70, 78, 98, 255];
const BUTTON_BORDER_FOCUSED: [u8; 4] = [255, 196, 80, 255];
const BUTTON_TEXT: [u8; 4] = [228, 230, 238, 255];
const LABEL_TEXT: [u8; 4] = [190, 194, 206, 255];
const PANEL_FILL: [u8; 4] = [16, 18, 24, 230];
const IMAGE_BORDER: [u8; 4] = [90, 96, 112, 255];
const IMAGE_TEXT: [u8; 4] = [120, 126, 142, 255];

/// Presents the fixed-resolution UI buffer through a window surface. The
/// surface scales the buffer up with preserved aspect ratio; pointer input
/// goes through `ScreenMapper` to undo the same mapping.
pub struct Renderer {
    window: Arc<Window>,
    pixels: Pixels<'static>,
}

impl Renderer {
    pub fn new(window: Arc<Window>) -> Result<Self, Error> {
        let size = window.inner_size();
        let pixels =
            Self::build_pixels(Arc::clone(&window), size.width.max(1), size.height.max(1))?;
        Ok(Self { window, pixels })
    }

    fn build_pixels(
        window: Arc<Window>,
        surface_width: u32,
        surface_height: u32,
    ) -> Result<Pixels<'static>, Error> {
        let surface = SurfaceTexture::new(surface_width, surface_height, window);
        Pixels::new(UI_WIDTH, UI_HEIGHT, surface)
    }

    pub fn resize(&mut self, width: u32, height: u32) -> Result<(), TextureError> {
        if width == 0 || height == 0 {
            return Ok(());
        }
        self.pixels.resize_surface(width, height)
    }

    pub fn window(&self) -> &Window {
        &self.window
    }

    pub fn frame(&mut self) -> DrawFrame<'_> {
        DrawFrame::new(self.pixels.frame_mut(), UI_WIDTH, UI_HEIGHT)
    }

    pub fn present(&mut self) -> Result<(), Error> {
        self.pixels.render()
    }
}

/// Paints every registered widget in insertion order, so later additions sit
/// on top. Visual state comes from the registry's hover/press/focus
/// bookkeeping.
pub fn draw_widgets(frame: &mut DrawFrame<'_>, ui: &UiRegistry) {
    for (id, widget) in ui.widgets_in_paint_order() {
        let rect = widget.rect();
        let x = rect.x.round() as i32;
        let y = rect.y.round() as i32;
        let width = rect.width.round() as i32;
        let height = rect.height.round() as i32;

        match widget.kind() {
            WidgetKind::Panel => {
                frame.fill_rect(x, y, width, height, PANEL_FILL);
            }
            WidgetKind::Label { text } => {
                frame.draw_text(x, y, text, LABEL_TEXT);
            }
            WidgetKind::Image { key } => {
                frame.stroke_rect(x, y, width, height, IMAGE_BORDER);
                frame.draw_text(x + 2, y + 2, key, IMAGE_TEXT);
            }
            WidgetKind::Button { label } => {
                let state = ui.visual_state(id);
                let fill = match state {
                    VisualState::Normal => BUTTON_FILL_NORMAL,
                    VisualState::Hovered => BUTTON_FILL_HOVERED,
                    VisualState::Pressed => BUTTON_FILL_PRESSED,
                    VisualState::Focused => BUTTON_FILL_FOCUSED,
                };
                let border = if state == VisualState::Focused {
                    BUTTON_BORDER_FOCUSED
                } else {
                    BUTTON_BORDER
                };
                frame.fill_rect(x, y, width, height, fill);
                frame.stroke_rect(x, y, width, height, border);
                let text_x = x + (width - text_width(label)) / 2;
                let text_y = y + (height - TEXT_HEIGHT) / 2;
                frame.draw_text(text_x, text_y, label, BUTTON_TEXT);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::input::InputClass;
    use crate::app::ui::{UiRect, Widget};

    fn rendered_buffer(ui: &UiRegistry) -> Vec<u8> {
        let mut buffer = vec![0u8; (UI_WIDTH * UI_HEIGHT) as usize * 4];
        let mut frame = DrawFrame::new(&mut buffer, UI_WIDTH, UI_HEIGHT);
        draw_widgets(&mut frame, ui);
        buffer
    }

    fn pixel_at(buffer: &[u8], x: u32, y: u32) -> [u8; 4] {
        let offset = ((y * UI_WIDTH + x) as usize) * 4;
        [
            buffer[offset],
            buffer[offset + 1],
            buffer[offset + 2],
            buffer[offset + 3],
        ]
    }

    #[test]
    fn button_fill_tracks_visual_state() {
        let mut ui = UiRegistry::new();
        ui.sync_input_class(InputClass::Mouse);
        ui.add(Widget::button(UiRect::new(10.0, 10.0, 80.0, 24.0), "play"));

        let normal = rendered_buffer(&ui);
        assert_eq!(pixel_at(&normal, 12, 12), BUTTON_FILL_NORMAL);

        ui.pointer_move(20.0, 20.0);
        let hovered = rendered_buffer(&ui);
        assert_eq!(pixel_at(&hovered, 12, 12), BUTTON_FILL_HOVERED);

        ui.pointer_press(20.0, 20.0);
        let pressed = rendered_buffer(&ui);
        assert_eq!(pixel_at(&pressed, 12, 12), BUTTON_FILL_PRESSED);
    }

    #[test]
    fn focused_button_gets_the_accent_border() {
        let mut ui = UiRegistry::new();
        ui.sync_input_class(InputClass::Keyboard);
        ui.add(Widget::button(UiRect::new(10.0, 10.0, 80.0, 24.0), "play"));

        let buffer = rendered_buffer(&ui);
        assert_eq!(pixel_at(&buffer, 10, 10), BUTTON_BORDER_FOCUSED);
        assert_eq!(pixel_at(&buffer, 12, 12), BUTTON_FILL_FOCUSED);
    }

    #[test]
    fn later_widgets_paint_over_earlier_ones() {
        let mut ui = UiRegistry::new();
        ui.add(Widget::panel(UiRect::new(0.0, 0.0, 100.0, 100.0)));
        ui.add(Widget::button(UiRect::new(0.0, 0.0, 50.0, 50.0), ""));

        let buffer = rendered_buffer(&ui);
        assert_eq!(pixel_at(&buffer, 25, 25), BUTTON_FILL_NORMAL);
        assert_eq!(pixel_at(&buffer, 80, 80), PANEL_FILL);
    }
}
