mod draw;
mod renderer;
mod transform;

pub use draw::{text_width, DrawFrame, GLYPH_ADVANCE, LINE_ADVANCE, TEXT_HEIGHT};
pub use renderer::{draw_widgets, Renderer};
pub use transform::{ScreenMapper, UI_HEIGHT, UI_WIDTH};
