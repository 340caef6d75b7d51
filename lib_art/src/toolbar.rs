use log::{debug, warn};
use thiserror::Error;

use crate::observer::{BrushChanged, Observers, SubscriptionId};
use crate::palette::PalettePresets;
use crate::texture::{Cell, Rgba};

#[derive(Error, Debug, PartialEq, Eq)]
pub enum BrushInputError {
    #[error("No character entered")]
    Empty,
    #[error("Invalid character input {0:?}: expected a character, a codepoint or #hex")]
    Invalid(String),
    #[error("{0:#x} is not a valid codepoint")]
    InvalidCodepoint(u32),
}

/// Parses the character entry field.
///
/// Accepts, in this order: a single character, a non-negative decimal codepoint,
/// or a `#`-prefixed hexadecimal codepoint.
pub fn parse_character_input(input: &str) -> Result<char, BrushInputError> {
    let mut chars = input.chars();
    match (chars.next(), chars.next()) {
        (None, _) => return Err(BrushInputError::Empty),
        (Some(character), None) => return Ok(character),
        _ => {}
    }

    let trimmed = input.trim();
    let code = if let Some(hex) = trimmed.strip_prefix('#') {
        u32::from_str_radix(hex, 16)
    } else {
        trimmed.parse::<u32>()
    }
    .map_err(|_| BrushInputError::Invalid(input.to_string()))?;

    char::from_u32(code).ok_or(BrushInputError::InvalidCodepoint(code))
}

/// The brush selection and palette presets shown next to the canvas.
///
/// Every change of the brush is announced to the brush subscribers.
#[derive(Debug, Default)]
pub struct Toolbar {
    brush: Cell,
    palette: PalettePresets,
    brush_changed: Observers<BrushChanged>,
}

impl Toolbar {
    pub fn new(palette: PalettePresets) -> Self {
        Self {
            brush: Cell::EMPTY,
            palette,
            brush_changed: Observers::new(),
        }
    }

    pub fn brush(&self) -> Cell {
        self.brush
    }

    pub fn palette(&self) -> &PalettePresets {
        &self.palette
    }

    pub fn palette_mut(&mut self) -> &mut PalettePresets {
        &mut self.palette
    }

    pub fn subscribe_brush_changed(
        &mut self,
        callback: impl FnMut(&BrushChanged) + 'static,
    ) -> SubscriptionId {
        self.brush_changed.subscribe(callback)
    }

    pub fn unsubscribe_brush_changed(&mut self, id: SubscriptionId) -> bool {
        self.brush_changed.unsubscribe(id)
    }

    fn update_brush(&mut self, update: impl FnOnce(&mut Cell)) {
        let before = self.brush;
        update(&mut self.brush);
        if self.brush != before {
            debug!("Brush changed to {:?}", self.brush);
            self.brush_changed.notify(&BrushChanged(self.brush));
        }
    }

    /// Sets the brush character from the entry field. On error the brush is unchanged.
    pub fn set_character_input(&mut self, input: &str) -> Result<char, BrushInputError> {
        let character = parse_character_input(input).map_err(|e| {
            warn!("Rejected character input {:?}: {}", input, e);
            e
        })?;
        self.set_character(Some(character));
        Ok(character)
    }

    pub fn set_character(&mut self, character: Option<char>) {
        self.update_brush(|brush| brush.character = character);
    }

    pub fn set_foreground(&mut self, color: Option<Rgba>) {
        self.update_brush(|brush| brush.foreground = color);
    }

    pub fn set_background(&mut self, color: Option<Rgba>) {
        self.update_brush(|brush| brush.background = color);
    }

    pub fn set_brush(&mut self, cell: Cell) {
        self.update_brush(|brush| *brush = cell);
    }

    pub fn store_all(&mut self) {
        *self.palette.selected_mut() = self.brush;
    }

    pub fn store_character(&mut self) {
        self.palette.selected_mut().character = self.brush.character;
    }

    pub fn store_foreground(&mut self) {
        self.palette.selected_mut().foreground = self.brush.foreground;
    }

    pub fn store_background(&mut self) {
        self.palette.selected_mut().background = self.brush.background;
    }

    /// Copies the set fields of the selected palette slot into the brush.
    pub fn load_selected(&mut self) {
        let stored = self.palette.selected();
        self.update_brush(|brush| brush.apply(&stored));
    }
}
