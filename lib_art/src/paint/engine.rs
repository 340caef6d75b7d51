use log::debug;

use super::{Channel, Mode, PaintError};
use crate::history::History;
use crate::texture::{Cell, Grid, Position, Rect};

#[derive(Debug)]
struct Stroke {
    mode: Mode,
    origin: (usize, usize),
    // Frozen grid the box preview is redrawn over on every update.
    pre_box: Option<Grid>,
    last_rect: Option<Rect>,
}

/// Applies pen and box strokes to a grid.
///
/// Paint and erase each track their own stroke, but at most one of them runs at
/// a time so that a single history checkpoint covers it. Every mutating call
/// returns the region of cells it touched so a renderer can redraw only those.
#[derive(Debug, Default)]
pub struct PaintEngine {
    paint: Option<Stroke>,
    erase: Option<Stroke>,
}

impl PaintEngine {
    pub fn new() -> Self {
        Self::default()
    }

    fn slot(&mut self, channel: Channel) -> &mut Option<Stroke> {
        match channel {
            Channel::Paint => &mut self.paint,
            Channel::Erase => &mut self.erase,
        }
    }

    pub fn is_active(&self, channel: Channel) -> bool {
        match channel {
            Channel::Paint => self.paint.is_some(),
            Channel::Erase => self.erase.is_some(),
        }
    }

    pub fn any_active(&self) -> bool {
        self.paint.is_some() || self.erase.is_some()
    }

    /// Starts a stroke on `channel`, checkpoints the grid and applies the first point.
    ///
    /// # Errors
    /// - Returns `PaintError::StrokeAlreadyActive` if the channel has a running stroke
    /// - Returns `PaintError::OtherStrokeActive` if the other channel has one
    pub fn stroke_start(
        &mut self,
        grid: &mut Grid,
        history: &mut History,
        channel: Channel,
        pos: Position,
        mode: Mode,
        brush: &Cell,
    ) -> Result<Option<Rect>, PaintError> {
        if self.is_active(channel) {
            return Err(PaintError::StrokeAlreadyActive(channel));
        }
        let other = match channel {
            Channel::Paint => Channel::Erase,
            Channel::Erase => Channel::Paint,
        };
        if self.is_active(other) {
            return Err(PaintError::OtherStrokeActive(other));
        }

        history.begin_stroke(grid);

        let pre_box = (mode == Mode::Box).then(|| grid.clone());
        *self.slot(channel) = Some(Stroke {
            mode,
            origin: grid.clamp(pos),
            pre_box,
            last_rect: None,
        });
        debug!("{:?} stroke started at {:?} in {:?} mode", channel, pos, mode);

        Ok(self.stroke_update(grid, channel, pos, brush))
    }

    /// Moves the running stroke of `channel` to `pos`.
    ///
    /// Pen strokes ignore positions outside the grid. Box strokes clamp the corner
    /// onto the grid, restore the frozen snapshot and redraw the whole box.
    /// Does nothing if the channel is idle.
    pub fn stroke_update(
        &mut self,
        grid: &mut Grid,
        channel: Channel,
        pos: Position,
        brush: &Cell,
    ) -> Option<Rect> {
        let stroke = self.slot(channel).as_mut()?;

        match stroke.mode {
            Mode::Pen => {
                let (x, y) = grid.contains(pos)?;
                let cell = grid.cell_mut(x, y).ok()?;
                match channel {
                    Channel::Paint => cell.apply(brush),
                    Channel::Erase => cell.clear(),
                }
                Some(Rect::single(x, y))
            }
            Mode::Box => {
                let rect = Rect::from_corners(stroke.origin, grid.clamp(pos));

                let dirty = match (stroke.last_rect, &stroke.pre_box) {
                    (Some(last), Some(pre_box)) => {
                        grid.restore_rect(pre_box, last);
                        rect.union(&last)
                    }
                    _ => rect,
                };

                match channel {
                    Channel::Paint => grid.fill_rect(rect, brush),
                    Channel::Erase => grid.clear_rect(rect),
                }
                stroke.last_rect = Some(rect);
                Some(dirty)
            }
        }
    }

    /// Finishes the stroke of `channel`. Returns false if the channel was idle.
    pub fn stroke_end(&mut self, grid: &Grid, history: &mut History, channel: Channel) -> bool {
        let Some(stroke) = self.slot(channel).take() else {
            return false;
        };

        history.end_stroke(grid);
        debug!(
            "{:?} stroke ended ({:?} mode, last box {:?})",
            channel, stroke.mode, stroke.last_rect
        );
        true
    }

    /// Drops any running strokes without touching history.
    pub fn reset(&mut self) {
        self.paint = None;
        self.erase = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Rgba;

    fn setup() -> (Grid, History, PaintEngine) {
        (
            Grid::new(5, 4).unwrap(),
            History::new(16).unwrap(),
            PaintEngine::new(),
        )
    }

    fn brush() -> Cell {
        Cell::new(Some('#'), Some(Rgba::rgb(0, 255, 0)), None)
    }

    fn painted_count(grid: &Grid) -> usize {
        grid.cells().iter().filter(|cell| !cell.is_empty()).count()
    }

    #[test]
    fn test_pen_stroke_paints_each_position() {
        let (mut grid, mut history, mut engine) = setup();
        let brush = brush();

        engine
            .stroke_start(&mut grid, &mut history, Channel::Paint, Position::new(0, 0), Mode::Pen, &brush)
            .unwrap();
        engine.stroke_update(&mut grid, Channel::Paint, Position::new(1, 0), &brush);
        engine.stroke_update(&mut grid, Channel::Paint, Position::new(1, 1), &brush);
        assert!(engine.stroke_end(&grid, &mut history, Channel::Paint));

        assert_eq!(painted_count(&grid), 3);
        assert_eq!(grid.get(1, 1).unwrap(), brush);
        assert_eq!(history.undo_len(), 1);
    }

    #[test]
    fn test_pen_outside_grid_is_ignored() {
        let (mut grid, mut history, mut engine) = setup();
        let brush = brush();

        let dirty = engine
            .stroke_start(&mut grid, &mut history, Channel::Paint, Position::new(-1, 2), Mode::Pen, &brush)
            .unwrap();
        assert_eq!(dirty, None);
        assert_eq!(engine.stroke_update(&mut grid, Channel::Paint, Position::new(5, 0), &brush), None);
        engine.stroke_end(&grid, &mut history, Channel::Paint);

        assert_eq!(painted_count(&grid), 0);
        assert_eq!(history.undo_len(), 0);
    }

    #[test]
    fn test_erase_clears_cell() {
        let (mut grid, mut history, mut engine) = setup();
        grid.set(2, 2, brush()).unwrap();

        engine
            .stroke_start(&mut grid, &mut history, Channel::Erase, Position::new(2, 2), Mode::Pen, &brush())
            .unwrap();
        engine.stroke_end(&grid, &mut history, Channel::Erase);

        assert!(grid.get(2, 2).unwrap().is_empty());
    }

    #[test]
    fn test_channel_cannot_start_twice() {
        let (mut grid, mut history, mut engine) = setup();
        let brush = brush();
        let origin = Position::new(0, 0);

        engine
            .stroke_start(&mut grid, &mut history, Channel::Paint, origin, Mode::Pen, &brush)
            .unwrap();
        let result = engine.stroke_start(&mut grid, &mut history, Channel::Paint, origin, Mode::Pen, &brush);
        assert!(matches!(result, Err(PaintError::StrokeAlreadyActive(Channel::Paint))));

        let result = engine.stroke_start(&mut grid, &mut history, Channel::Erase, origin, Mode::Pen, &brush);
        assert!(matches!(result, Err(PaintError::OtherStrokeActive(Channel::Paint))));
        assert!(!engine.is_active(Channel::Erase));

        assert!(engine.stroke_end(&grid, &mut history, Channel::Paint));
        assert!(engine
            .stroke_start(&mut grid, &mut history, Channel::Erase, origin, Mode::Pen, &brush)
            .is_ok());
    }

    #[test]
    fn test_box_shrinking_drag_restores_cells() {
        let (mut grid, mut history, mut engine) = setup();
        let brush = brush();

        engine
            .stroke_start(&mut grid, &mut history, Channel::Paint, Position::new(0, 0), Mode::Box, &brush)
            .unwrap();
        engine.stroke_update(&mut grid, Channel::Paint, Position::new(3, 3), &brush);
        assert_eq!(painted_count(&grid), 16);

        let dirty = engine.stroke_update(&mut grid, Channel::Paint, Position::new(1, 0), &brush);
        assert_eq!(dirty, Some(Rect::from_corners((0, 0), (3, 3))));
        assert_eq!(painted_count(&grid), 2);
        engine.stroke_end(&grid, &mut history, Channel::Paint);
    }

    #[test]
    fn test_box_keeps_untouched_existing_cells() {
        let (mut grid, mut history, mut engine) = setup();
        let existing = Cell::with_character('e');
        grid.set(4, 3, existing).unwrap();
        let brush = Cell::new(None, None, Some(Rgba::BLACK));

        engine
            .stroke_start(&mut grid, &mut history, Channel::Paint, Position::new(2, 2), Mode::Box, &brush)
            .unwrap();
        engine.stroke_update(&mut grid, Channel::Paint, Position::new(4, 3), &brush);
        engine.stroke_update(&mut grid, Channel::Paint, Position::new(2, 2), &brush);

        assert_eq!(grid.get(4, 3).unwrap(), existing);
        assert_eq!(grid.get(2, 2).unwrap().background, Some(Rgba::BLACK));
    }

    #[test]
    fn test_box_clamps_corner_outside_grid() {
        let (mut grid, mut history, mut engine) = setup();
        let brush = brush();

        engine
            .stroke_start(&mut grid, &mut history, Channel::Paint, Position::new(3, 2), Mode::Box, &brush)
            .unwrap();
        let dirty = engine.stroke_update(&mut grid, Channel::Paint, Position::new(40, -7), &brush);

        assert_eq!(dirty, Some(Rect::from_corners((3, 0), (4, 2))));
        assert_eq!(painted_count(&grid), 6);
    }

    #[test]
    fn test_box_erase() {
        let (mut grid, mut history, mut engine) = setup();
        grid.fill_rect(Rect::from_corners((0, 0), (4, 3)), &brush());

        engine
            .stroke_start(&mut grid, &mut history, Channel::Erase, Position::new(1, 1), Mode::Box, &Cell::EMPTY)
            .unwrap();
        engine.stroke_update(&mut grid, Channel::Erase, Position::new(2, 2), &Cell::EMPTY);
        engine.stroke_end(&grid, &mut history, Channel::Erase);

        assert_eq!(painted_count(&grid), 20 - 4);
    }

    #[test]
    fn test_update_on_idle_channel_is_noop() {
        let (mut grid, mut history, mut engine) = setup();
        assert_eq!(engine.stroke_update(&mut grid, Channel::Paint, Position::new(0, 0), &brush()), None);
        assert!(!engine.stroke_end(&grid, &mut history, Channel::Paint));
        assert_eq!(painted_count(&grid), 0);
    }
}
