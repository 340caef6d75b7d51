use std::fs;
use std::path::Path;

use log::{debug, error, info};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::constants::{DEFAULT_PALETTE_COLUMNS, DEFAULT_PALETTE_ROWS};
use crate::texture::Cell;

#[derive(Error, Debug)]
pub enum PresetError {
    #[error("Palette must have at least one column and one row, got {columns}x{rows}")]
    InvalidDimensions { columns: usize, rows: usize },
    #[error("Slot ({column}, {row}) is outside of the {columns}x{rows} palette")]
    SlotOutOfRange {
        column: usize,
        row: usize,
        columns: usize,
        rows: usize,
    },
    #[error("Preset file is inconsistent")]
    InvalidShape,
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Preset encoding failed: {0}")]
    Encoding(#[from] bincode::Error),
}

/// One page of stored cells together with its selected slot.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
struct Preset {
    slots: Vec<Cell>,
    selected: (usize, usize),
}

impl Preset {
    fn empty(columns: usize, rows: usize) -> Self {
        Self {
            slots: vec![Cell::EMPTY; columns * rows],
            selected: (0, 0),
        }
    }
}

/// Pages ("presets") of stored cells, each laid out as `columns x rows` slots.
///
/// There is always at least one preset. Each preset remembers its own selected
/// slot, which is what store and load operate on.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PalettePresets {
    columns: usize,
    rows: usize,
    presets: Vec<Preset>,
    current: usize,
}

impl PalettePresets {
    pub fn new(columns: usize, rows: usize) -> Result<Self, PresetError> {
        if columns == 0 || rows == 0 {
            return Err(PresetError::InvalidDimensions { columns, rows });
        }
        Ok(Self {
            columns,
            rows,
            presets: vec![Preset::empty(columns, rows)],
            current: 0,
        })
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn len(&self) -> usize {
        self.presets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.presets.is_empty()
    }

    /// 0-based index of the preset being shown.
    pub fn current_index(&self) -> usize {
        self.current
    }

    /// `"current/total"`, 1-based.
    pub fn label(&self) -> String {
        format!("{}/{}", self.current + 1, self.presets.len())
    }

    fn preset(&self) -> &Preset {
        &self.presets[self.current]
    }

    fn preset_mut(&mut self) -> &mut Preset {
        &mut self.presets[self.current]
    }

    /// Inserts an empty preset right after the current one.
    pub fn extend(&mut self) {
        self.presets
            .insert(self.current + 1, Preset::empty(self.columns, self.rows));
        debug!("Preset added, {} presets", self.presets.len());
    }

    /// Removes the current preset unless it is the only one.
    pub fn shrink(&mut self) -> bool {
        if self.presets.len() == 1 {
            return false;
        }
        self.presets.remove(self.current);
        self.current = self.current.min(self.presets.len() - 1);
        debug!("Preset removed, {} presets", self.presets.len());
        true
    }

    /// Empties every slot of the current preset.
    pub fn clear(&mut self) {
        self.preset_mut().slots.fill(Cell::EMPTY);
    }

    pub fn next(&mut self) {
        self.current = (self.current + 1).min(self.presets.len() - 1);
    }

    pub fn previous(&mut self) {
        self.current = self.current.saturating_sub(1);
    }

    fn slot_index(&self, column: usize, row: usize) -> Result<usize, PresetError> {
        if column >= self.columns || row >= self.rows {
            return Err(PresetError::SlotOutOfRange {
                column,
                row,
                columns: self.columns,
                rows: self.rows,
            });
        }
        Ok(row * self.columns + column)
    }

    pub fn slot(&self, column: usize, row: usize) -> Result<Cell, PresetError> {
        let index = self.slot_index(column, row)?;
        Ok(self.preset().slots[index])
    }

    pub fn select(&mut self, column: usize, row: usize) -> Result<(), PresetError> {
        self.slot_index(column, row)?;
        self.preset_mut().selected = (column, row);
        Ok(())
    }

    /// `(column, row)` of the selected slot in the current preset.
    pub fn selected_position(&self) -> (usize, usize) {
        self.preset().selected
    }

    pub fn selected(&self) -> Cell {
        let (column, row) = self.preset().selected;
        self.preset().slots[row * self.columns + column]
    }

    pub fn selected_mut(&mut self) -> &mut Cell {
        let columns = self.columns;
        let preset = self.preset_mut();
        let (column, row) = preset.selected;
        &mut preset.slots[row * columns + column]
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), PresetError> {
        let path = path.as_ref();
        let data = bincode::serialize(self)?;
        fs::write(path, data)?;
        info!("Saved {} presets to {}", self.presets.len(), path.display());
        Ok(())
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, PresetError> {
        let path = path.as_ref();
        let data = fs::read(path)?;
        let presets: Self = bincode::deserialize(&data)?;

        if !presets.is_consistent() {
            error!("Preset file {} is inconsistent", path.display());
            return Err(PresetError::InvalidShape);
        }

        info!("Loaded {} presets from {}", presets.len(), path.display());
        Ok(presets)
    }

    fn is_consistent(&self) -> bool {
        self.columns > 0
            && self.rows > 0
            && self.current < self.presets.len()
            && self.presets.iter().all(|preset| {
                preset.slots.len() == self.columns * self.rows
                    && preset.selected.0 < self.columns
                    && preset.selected.1 < self.rows
            })
    }
}

impl Default for PalettePresets {
    fn default() -> Self {
        Self {
            columns: DEFAULT_PALETTE_COLUMNS,
            rows: DEFAULT_PALETTE_ROWS,
            presets: vec![Preset::empty(DEFAULT_PALETTE_COLUMNS, DEFAULT_PALETTE_ROWS)],
            current: 0,
        }
    }
}
