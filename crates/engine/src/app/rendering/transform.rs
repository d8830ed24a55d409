/// Virtual resolution every scene draws and hit-tests against. The window
/// surface scales this buffer up with preserved aspect ratio; `ScreenMapper`
/// applies the inverse mapping to incoming pointer coordinates.
pub const UI_WIDTH: u32 = 640;
pub const UI_HEIGHT: u32 = 360;

#[derive(Debug, Clone, Copy)]
pub struct ScreenMapper {
    window_width: u32,
    window_height: u32,
}

impl ScreenMapper {
    pub fn new(window_width: u32, window_height: u32) -> Self {
        Self {
            window_width,
            window_height,
        }
    }

    pub fn set_window_size(&mut self, window_width: u32, window_height: u32) {
        self.window_width = window_width;
        self.window_height = window_height;
    }

    /// Uniform scale from UI space to the window, letterboxed.
    pub fn scale(&self) -> f32 {
        if self.window_width == 0 || self.window_height == 0 {
            return 1.0;
        }
        let scale_x = self.window_width as f32 / UI_WIDTH as f32;
        let scale_y = self.window_height as f32 / UI_HEIGHT as f32;
        scale_x.min(scale_y)
    }

    pub fn screen_to_ui(&self, screen_x: f32, screen_y: f32) -> (f32, f32) {
        let scale = self.scale();
        let offset_x = (self.window_width as f32 - UI_WIDTH as f32 * scale) * 0.5;
        let offset_y = (self.window_height as f32 - UI_HEIGHT as f32 * scale) * 0.5;
        ((screen_x - offset_x) / scale, (screen_y - offset_y) / scale)
    }

    pub fn ui_to_screen(&self, ui_x: f32, ui_y: f32) -> (f32, f32) {
        let scale = self.scale();
        let offset_x = (self.window_width as f32 - UI_WIDTH as f32 * scale) * 0.5;
        let offset_y = (self.window_height as f32 - UI_HEIGHT as f32 * scale) * 0.5;
        (ui_x * scale + offset_x, ui_y * scale + offset_y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn integer_scale_window_maps_corners_exactly() {
        let mapper = ScreenMapper::new(1280, 720);
        let (x, y) = mapper.screen_to_ui(0.0, 0.0);
        assert!((x - 0.0).abs() < 0.0001);
        assert!((y - 0.0).abs() < 0.0001);

        let (x, y) = mapper.screen_to_ui(1280.0, 720.0);
        assert!((x - UI_WIDTH as f32).abs() < 0.0001);
        assert!((y - UI_HEIGHT as f32).abs() < 0.0001);
    }

    #[test]
    fn wide_window_letterboxes_horizontally() {
        // 1000x360 window: scale 1.0, 180 px dead band on each side.
        let mapper = ScreenMapper::new(1000, 360);
        let (x, y) = mapper.screen_to_ui(180.0, 0.0);
        assert!((x - 0.0).abs() < 0.0001);
        assert!((y - 0.0).abs() < 0.0001);

        let (x, _) = mapper.screen_to_ui(0.0, 0.0);
        assert!(x < 0.0);
    }

    #[test]
    fn tall_window_letterboxes_vertically() {
        let mapper = ScreenMapper::new(640, 500);
        let (_, y) = mapper.screen_to_ui(0.0, 70.0);
        assert!((y - 0.0).abs() < 0.0001);
    }

    #[test]
    fn round_trip_is_stable() {
        let mapper = ScreenMapper::new(1537, 811);
        let (sx, sy) = mapper.ui_to_screen(123.0, 45.0);
        let (ux, uy) = mapper.screen_to_ui(sx, sy);
        assert!((ux - 123.0).abs() < 0.001);
        assert!((uy - 45.0).abs() < 0.001);
    }

    #[test]
    fn zero_sized_window_does_not_divide_by_zero() {
        let mapper = ScreenMapper::new(0, 0);
        let (x, y) = mapper.screen_to_ui(10.0, 10.0);
        assert!(x.is_finite());
        assert!(y.is_finite());
    }
}
