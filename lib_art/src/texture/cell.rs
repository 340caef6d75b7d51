use serde::{Deserialize, Serialize};

use super::color::Rgba;

/// One texture position: a glyph and its two colors, each of them optional.
///
/// The same type doubles as the brush: when painting, only the set fields of the
/// brush are written onto the target cell.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Cell {
    pub character: Option<char>,
    pub foreground: Option<Rgba>,
    pub background: Option<Rgba>,
}

impl Cell {
    pub const EMPTY: Cell = Cell {
        character: None,
        foreground: None,
        background: None,
    };

    pub fn new(character: Option<char>, foreground: Option<Rgba>, background: Option<Rgba>) -> Self {
        Self {
            character,
            foreground,
            background,
        }
    }

    pub fn with_character(character: char) -> Self {
        Self {
            character: Some(character),
            ..Self::EMPTY
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::EMPTY
    }

    /// The glyph to render; unset renders as a space.
    pub fn display_char(&self) -> char {
        self.character.unwrap_or(' ')
    }

    /// Writes every set field of `brush` onto this cell.
    pub fn apply(&mut self, brush: &Cell) {
        if let Some(character) = brush.character {
            self.character = Some(character);
        }
        if let Some(foreground) = brush.foreground {
            self.foreground = Some(foreground);
        }
        if let Some(background) = brush.background {
            self.background = Some(background);
        }
    }

    pub fn clear(&mut self) {
        *self = Self::EMPTY;
    }
}
