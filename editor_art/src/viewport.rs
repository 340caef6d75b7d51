use eframe::egui::{InputState, Pos2, Rect, Vec2};

const MIN_ZOOM: f32 = 0.25;
const MAX_ZOOM: f32 = 8.0;
const ZOOM_STEP: f32 = 1.1;
const ZOOM_SPEED: f32 = 0.3;

/// Zoom and pan of the canvas inside its panel.
///
/// Ctrl + scroll zooms towards a target level that is approached a bit every
/// frame; dragging with the middle button pans.
pub struct Viewport {
    pan_offset: Vec2,
    zoom: f32,
    target_zoom: f32,
    last_mouse_pos: Option<Pos2>,
}

impl Viewport {
    pub fn new() -> Self {
        Self {
            pan_offset: Vec2::ZERO,
            zoom: 1.0,
            target_zoom: 1.0,
            last_mouse_pos: None,
        }
    }

    pub fn pan_offset(&self) -> Vec2 {
        self.pan_offset
    }

    pub fn zoom(&self) -> f32 {
        self.zoom
    }

    pub fn is_animating(&self) -> bool {
        (self.target_zoom - self.zoom).abs() > f32::EPSILON
    }

    pub fn reset(&mut self) {
        *self = Self::new();
    }

    pub fn update(&mut self, input: &InputState, area: Rect) {
        if input.modifiers.ctrl {
            self.update_zoom(input);
        }
        self.step_zoom();

        if input.pointer.middle_down() {
            self.update_pan(input.pointer.hover_pos(), area);
        } else {
            self.last_mouse_pos = None;
        }
    }

    fn update_zoom(&mut self, input: &InputState) {
        let scroll_delta = input.raw_scroll_delta.y;
        if scroll_delta == 0.0 {
            return;
        }

        let factor = if scroll_delta > 0.0 { ZOOM_STEP } else { 1.0 / ZOOM_STEP };
        self.target_zoom = (self.target_zoom * factor).clamp(MIN_ZOOM, MAX_ZOOM);
    }

    fn step_zoom(&mut self) {
        let old_zoom = self.zoom;
        self.zoom += (self.target_zoom - self.zoom) * ZOOM_SPEED;
        if (self.target_zoom - self.zoom).abs() < 0.001 {
            self.zoom = self.target_zoom;
        }

        // Keep the canvas center fixed relative to the panel
        self.pan_offset *= self.zoom / old_zoom;
    }

    fn update_pan(&mut self, mouse_pos: Option<Pos2>, area: Rect) {
        let Some(mouse_pos) = mouse_pos else {
            return;
        };
        let Some(last_mouse_pos) = self.last_mouse_pos.replace(mouse_pos) else {
            return;
        };

        self.pan_offset += mouse_pos - last_mouse_pos;

        let bound = area.size() / 2.0;
        self.pan_offset.x = self.pan_offset.x.clamp(-bound.x, bound.x);
        self.pan_offset.y = self.pan_offset.y.clamp(-bound.y, bound.y);
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new()
    }
}
