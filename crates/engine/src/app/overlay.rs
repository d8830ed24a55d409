use super::input::InputClass;
use super::metrics::LoopMetricsSnapshot;
use super::rendering::{text_width, DrawFrame, LINE_ADVANCE};
use super::scene::SceneKey;

const OVERLAY_ORIGIN_X: i32 = 4;
const OVERLAY_ORIGIN_Y: i32 = 4;
const OVERLAY_INSET: i32 = 3;
const OVERLAY_PANEL_COLOR: [u8; 4] = [10, 11, 16, 235];
const OVERLAY_TEXT_COLOR: [u8; 4] = [180, 220, 180, 255];

#[derive(Debug, Clone)]
pub(crate) struct OverlayData {
    pub metrics: LoopMetricsSnapshot,
    pub scene: Option<SceneKey>,
    pub input_class: InputClass,
    pub entity_count: usize,
    pub widget_count: usize,
    pub focused_label: Option<String>,
    pub render_fps_cap: Option<u32>,
}

pub(crate) fn draw_overlay(frame: &mut DrawFrame<'_>, data: &OverlayData) {
    let lines = build_overlay_lines(data);
    let longest = lines.iter().map(|line| text_width(line)).max().unwrap_or(0);
    let panel_width = longest + OVERLAY_INSET * 2;
    let panel_height = lines.len() as i32 * LINE_ADVANCE + OVERLAY_INSET * 2;
    frame.fill_rect(
        OVERLAY_ORIGIN_X,
        OVERLAY_ORIGIN_Y,
        panel_width,
        panel_height,
        OVERLAY_PANEL_COLOR,
    );

    let mut y = OVERLAY_ORIGIN_Y + OVERLAY_INSET;
    for line in &lines {
        frame.draw_text(
            OVERLAY_ORIGIN_X + OVERLAY_INSET,
            y,
            line,
            OVERLAY_TEXT_COLOR,
        );
        y += LINE_ADVANCE;
    }
}

fn build_overlay_lines(data: &OverlayData) -> Vec<String> {
    let mut lines = Vec::new();
    lines.push(match data.render_fps_cap {
        Some(cap) => format!(
            "fps {:.0} cap {cap} / tps {:.0}",
            data.metrics.fps, data.metrics.tps
        ),
        None => format!("fps {:.0} / tps {:.0}", data.metrics.fps, data.metrics.tps),
    });
    lines.push(format!("frame {:.2} ms", data.metrics.frame_time_ms));
    lines.push(match data.scene {
        Some(scene) => format!("scene {scene:?}"),
        None => "scene -".to_string(),
    });
    lines.push(format!("input {}", data.input_class.label()));
    lines.push(format!(
        "entities {} / widgets {}",
        data.entity_count, data.widget_count
    ));
    lines.push(match &data.focused_label {
        Some(label) => format!("focus '{label}'"),
        None => "focus -".to_string(),
    });
    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_data() -> OverlayData {
        OverlayData {
            metrics: LoopMetricsSnapshot {
                fps: 59.7,
                tps: 60.2,
                frame_time_ms: 16.61,
            },
            scene: Some(SceneKey::Menu),
            input_class: InputClass::Gamepad,
            entity_count: 12,
            widget_count: 5,
            focused_label: Some("start".to_string()),
            render_fps_cap: None,
        }
    }

    #[test]
    fn lines_cover_rates_scene_input_and_focus() {
        let lines = build_overlay_lines(&sample_data());
        assert!(lines.iter().any(|line| line.contains("fps 60")));
        assert!(lines.iter().any(|line| line.contains("Menu")));
        assert!(lines.iter().any(|line| line.contains("gamepad")));
        assert!(lines.iter().any(|line| line.contains("entities 12")));
        assert!(lines.iter().any(|line| line.contains("'start'")));
    }

    #[test]
    fn missing_scene_and_focus_render_placeholders() {
        let mut data = sample_data();
        data.scene = None;
        data.focused_label = None;
        let lines = build_overlay_lines(&data);
        assert!(lines.iter().any(|line| line == "scene -"));
        assert!(lines.iter().any(|line| line == "focus -"));
    }

    #[test]
    fn draw_overlay_fills_the_backing_panel() {
        let mut buffer = vec![0u8; 640 * 360 * 4];
        let mut frame = DrawFrame::new(&mut buffer, 640, 360);
        draw_overlay(&mut frame, &sample_data());

        let offset = ((OVERLAY_ORIGIN_Y as usize) * 640 + OVERLAY_ORIGIN_X as usize) * 4;
        assert_eq!(buffer[offset], OVERLAY_PANEL_COLOR[0]);
    }
}
