use eframe::egui::{self, Align2, Color32, FontId, Painter, Pos2, Rect, Stroke, Vec2};
use lib_art::{Grid, Position, Rgba};

use crate::viewport::Viewport;

/// Width of a cell relative to its height, roughly that of a monospace glyph.
pub const CELL_ASPECT: f32 = 0.6;

const CANVAS_BACKGROUND: Color32 = Color32::from_gray(24);
const DEFAULT_FOREGROUND: Color32 = Color32::LIGHT_GRAY;
const GRID_LINE: Color32 = Color32::from_gray(60);

pub fn to_color32(color: Rgba) -> Color32 {
    Color32::from_rgba_unmultiplied(color.r, color.g, color.b, color.a)
}

pub fn from_color32(color: Color32) -> Rgba {
    Rgba::from(color.to_srgba_unmultiplied())
}

/// Where the grid lands on screen for the current panel, zoom and pan.
#[derive(Clone, Copy, Debug)]
pub struct CanvasLayout {
    origin: Pos2,
    cell_size: Vec2,
    dimensions: (usize, usize),
}

impl CanvasLayout {
    pub fn new(area: Rect, dimensions: (usize, usize), cell_height: f32, viewport: &Viewport) -> Self {
        let cell_height = cell_height * viewport.zoom();
        let cell_size = Vec2::new(cell_height * CELL_ASPECT, cell_height);
        let size = cell_size * Vec2::new(dimensions.0 as f32, dimensions.1 as f32);

        Self {
            origin: area.center() + viewport.pan_offset() - size / 2.0,
            cell_size,
            dimensions,
        }
    }

    pub fn bounds(&self) -> Rect {
        let (width, height) = self.dimensions;
        Rect::from_min_size(
            self.origin,
            self.cell_size * Vec2::new(width as f32, height as f32),
        )
    }

    pub fn cell_rect(&self, x: usize, y: usize) -> Rect {
        let min = self.origin + self.cell_size * Vec2::new(x as f32, y as f32);
        Rect::from_min_size(min, self.cell_size)
    }

    /// Cell under a screen position. The result may lie outside the grid.
    pub fn to_position(&self, pos: Pos2) -> Position {
        let local = (pos - self.origin) / self.cell_size;
        Position::new(local.x.floor() as i32, local.y.floor() as i32)
    }

    fn visible_range(&self, clip: Rect) -> (std::ops::Range<usize>, std::ops::Range<usize>) {
        let (width, height) = self.dimensions;
        let start = (clip.min - self.origin) / self.cell_size;
        let end = (clip.max - self.origin) / self.cell_size;

        let span = |from: f32, to: f32, len: usize| {
            let from = from.floor().max(0.0) as usize;
            let to = (to.ceil().max(0.0) as usize).min(len);
            from.min(to)..to
        };
        (span(start.x, end.x, width), span(start.y, end.y, height))
    }
}

/// Paints the visible cells of `grid`: background first, then the character.
pub fn draw_grid(painter: &Painter, layout: &CanvasLayout, grid: &Grid, clip: Rect, grid_lines: bool) {
    painter.rect_filled(layout.bounds(), 0.0, CANVAS_BACKGROUND);

    let font = FontId::monospace(layout.cell_size.y * 0.8);
    let (columns, rows) = layout.visible_range(clip);

    for y in rows {
        for x in columns.clone() {
            let Ok(cell) = grid.get(x, y) else {
                continue;
            };
            let rect = layout.cell_rect(x, y);

            if let Some(background) = cell.background {
                painter.rect_filled(rect, 0.0, to_color32(background));
            }
            if let Some(character) = cell.character.filter(|c| !c.is_whitespace()) {
                let color = cell.foreground.map_or(DEFAULT_FOREGROUND, to_color32);
                painter.text(
                    rect.center(),
                    Align2::CENTER_CENTER,
                    character,
                    font.clone(),
                    color,
                );
            }
            if grid_lines {
                painter.rect_stroke(rect, 0.0, Stroke::new(0.5, GRID_LINE));
            }
        }
    }

    painter.rect_stroke(layout.bounds(), 0.0, Stroke::new(1.0, egui::Color32::GRAY));
}

/// Outline around the cell under the pointer.
pub fn draw_hover(painter: &Painter, layout: &CanvasLayout, pos: Position) {
    let (width, height) = layout.dimensions;
    if pos.x < 0 || pos.y < 0 || pos.x as usize >= width || pos.y as usize >= height {
        return;
    }
    let rect = layout.cell_rect(pos.x as usize, pos.y as usize);
    painter.rect_stroke(rect, 0.0, Stroke::new(1.5, Color32::YELLOW));
}
