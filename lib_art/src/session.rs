use std::path::Path;

use log::{debug, info, warn};
use thiserror::Error;

use crate::config::EditorConfig;
use crate::file::{self, FileError};
use crate::history::{History, HistoryError};
use crate::observer::{GridChanged, Observers, SubscriptionId};
use crate::paint::{Channel, Mode, PaintEngine, PaintError};
use crate::palette::{PalettePresets, PresetError};
use crate::texture::{Grid, GridError, Position, Rect};
use crate::toolbar::Toolbar;

#[derive(Error, Debug)]
pub enum SessionError {
    #[error("Invalid texture size: {0}")]
    Grid(#[from] GridError),
    #[error("Invalid history: {0}")]
    History(#[from] HistoryError),
    #[error("Invalid palette: {0}")]
    Palette(#[from] PresetError),
}

/// One open texture together with everything needed to edit it.
///
/// The session owns the grid exclusively. Pointer input is routed to the paint
/// engine with the toolbar's brush, and every change to the grid is announced to
/// the grid subscribers.
#[derive(Debug)]
pub struct Session {
    grid: Grid,
    history: History,
    engine: PaintEngine,
    toolbar: Toolbar,
    mode: Mode,
    grid_changed: Observers<GridChanged>,
}

impl Session {
    pub fn new(config: &EditorConfig) -> Result<Self, SessionError> {
        let grid = Grid::new(config.width, config.height)?;
        let history = History::new(config.undo_length)?;
        let palette = PalettePresets::new(config.palette_columns, config.palette_rows)?;

        info!(
            "New session with a {}x{} texture, {} undo steps",
            config.width, config.height, config.undo_length
        );
        Ok(Self {
            grid,
            history,
            engine: PaintEngine::new(),
            toolbar: Toolbar::new(palette),
            mode: Mode::default(),
            grid_changed: Observers::new(),
        })
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn toolbar(&self) -> &Toolbar {
        &self.toolbar
    }

    pub fn toolbar_mut(&mut self) -> &mut Toolbar {
        &mut self.toolbar
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Mode used by the next stroke. A running stroke keeps the mode it started with.
    pub fn set_mode(&mut self, mode: Mode) {
        self.mode = mode;
    }

    pub fn is_stroke_active(&self) -> bool {
        self.engine.any_active()
    }

    pub fn subscribe_grid_changed(
        &mut self,
        callback: impl FnMut(&GridChanged) + 'static,
    ) -> SubscriptionId {
        self.grid_changed.subscribe(callback)
    }

    pub fn unsubscribe_grid_changed(&mut self, id: SubscriptionId) -> bool {
        self.grid_changed.unsubscribe(id)
    }

    fn notify_region(&mut self, dirty: Option<Rect>) {
        if let Some(rect) = dirty {
            self.grid_changed.notify(&GridChanged::Region(rect));
        }
    }

    /// Button pressed at `pos`: starts a stroke on `channel` with the current brush and mode.
    pub fn press(&mut self, channel: Channel, pos: Position) -> Result<(), PaintError> {
        let brush = self.toolbar.brush();
        let dirty = self.engine.stroke_start(
            &mut self.grid,
            &mut self.history,
            channel,
            pos,
            self.mode,
            &brush,
        )?;
        self.notify_region(dirty);
        Ok(())
    }

    /// Pointer moved to `pos` while the button of `channel` is held.
    pub fn drag(&mut self, channel: Channel, pos: Position) {
        let brush = self.toolbar.brush();
        let dirty = self.engine.stroke_update(&mut self.grid, channel, pos, &brush);
        self.notify_region(dirty);
    }

    pub fn release(&mut self, channel: Channel) -> bool {
        self.engine.stroke_end(&self.grid, &mut self.history, channel)
    }

    fn finish_strokes(&mut self) {
        for channel in [Channel::Paint, Channel::Erase] {
            if self.release(channel) {
                debug!("{:?} stroke finished early", channel);
            }
        }
    }

    /// Restores the previous grid. Refused while a stroke is running.
    pub fn undo(&mut self) -> bool {
        if self.engine.any_active() {
            warn!("Undo ignored while a stroke is running");
            return false;
        }
        match self.history.undo(&self.grid) {
            Some(previous) => {
                self.swap_grid(previous);
                debug!("Undo, {} steps left", self.history.undo_len());
                true
            }
            None => false,
        }
    }

    /// Re-applies the last undone change. Refused while a stroke is running.
    pub fn redo(&mut self) -> bool {
        if self.engine.any_active() {
            warn!("Redo ignored while a stroke is running");
            return false;
        }
        match self.history.redo(&self.grid) {
            Some(next) => {
                self.swap_grid(next);
                debug!("Redo, {} steps left", self.history.redo_len());
                true
            }
            None => false,
        }
    }

    fn swap_grid(&mut self, grid: Grid) {
        let resized = grid.dimensions() != self.grid.dimensions();
        self.grid = grid;
        if resized {
            debug!("Grid is now {}x{}", self.grid.width(), self.grid.height());
        }
        self.grid_changed.notify(&GridChanged::All);
    }

    /// Resizes the texture as one undoable step. On error, or if the size does not
    /// change, the grid and the history are left alone.
    pub fn resize(&mut self, width: usize, height: usize) -> Result<(), GridError> {
        let mut resized = self.grid.clone();
        resized.resize(width, height)?;
        if resized == self.grid {
            debug!("Texture is already {}x{}", width, height);
            return Ok(());
        }

        self.replace_grid(resized);
        info!("Texture resized to {}x{}", width, height);
        Ok(())
    }

    /// Replaces the texture as one undoable step. Replacing it with an equal grid
    /// records nothing.
    pub fn replace_grid(&mut self, grid: Grid) {
        self.finish_strokes();
        if grid == self.grid {
            debug!("Replacement grid is identical, nothing recorded");
            return;
        }

        self.history.begin_stroke(&self.grid);
        self.grid = grid;
        self.history.end_stroke(&self.grid);

        self.grid_changed.notify(&GridChanged::All);
    }

    /// Starts over with an empty texture of the given size.
    pub fn new_texture(&mut self, width: usize, height: usize) -> Result<(), GridError> {
        let grid = Grid::new(width, height)?;
        self.replace_grid(grid);
        info!("New {}x{} texture", width, height);
        Ok(())
    }

    /// Loads a texture file. The current grid is only replaced if loading succeeds.
    pub fn import(&mut self, path: impl AsRef<Path>) -> Result<(), FileError> {
        let grid = file::load_texture(path)?;
        self.replace_grid(grid);
        Ok(())
    }

    pub fn export(&self, path: impl AsRef<Path>) -> Result<(), FileError> {
        file::save_texture(path, &self.grid)
    }
}
