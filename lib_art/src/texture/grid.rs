use log::debug;
use thiserror::Error;

use super::cell::Cell;
use super::position::{Position, Rect};
use crate::constants::MAX_GRID_DIMENSION;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum GridError {
    #[error("Cell ({x}, {y}) is outside of the {width}x{height} grid")]
    OutOfBounds {
        x: usize,
        y: usize,
        width: usize,
        height: usize,
    },
    #[error("Invalid grid dimensions {width}x{height}: each side must be between 1 and {max}", max = MAX_GRID_DIMENSION)]
    InvalidDimensions { width: usize, height: usize },
}

/// A rectangular texture of cells stored row-major.
///
/// The cell buffer always holds exactly `width * height` cells; every operation
/// that changes the dimensions builds the new buffer first and swaps it in.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Grid {
    width: usize,
    height: usize,
    cells: Vec<Cell>,
}

impl Grid {
    /// Creates a grid of empty cells.
    ///
    /// # Errors
    /// - Returns `GridError::InvalidDimensions` if a side is 0 or above the maximum
    pub fn new(width: usize, height: usize) -> Result<Self, GridError> {
        check_dimensions(width, height)?;
        Ok(Self {
            width,
            height,
            cells: vec![Cell::EMPTY; width * height],
        })
    }

    /// Builds a grid from row-major cells.
    ///
    /// # Errors
    /// - Returns `GridError::InvalidDimensions` if the dimensions are invalid or do
    ///   not match the number of cells
    pub fn from_cells(width: usize, height: usize, cells: Vec<Cell>) -> Result<Self, GridError> {
        check_dimensions(width, height)?;
        if cells.len() != width * height {
            return Err(GridError::InvalidDimensions { width, height });
        }
        Ok(Self {
            width,
            height,
            cells,
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn dimensions(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> {
        self.cells.chunks(self.width)
    }

    fn index(&self, x: usize, y: usize) -> Result<usize, GridError> {
        if x >= self.width || y >= self.height {
            return Err(GridError::OutOfBounds {
                x,
                y,
                width: self.width,
                height: self.height,
            });
        }
        Ok(y * self.width + x)
    }

    pub fn get(&self, x: usize, y: usize) -> Result<Cell, GridError> {
        let index = self.index(x, y)?;
        Ok(self.cells[index])
    }

    pub fn set(&mut self, x: usize, y: usize, cell: Cell) -> Result<(), GridError> {
        let index = self.index(x, y)?;
        self.cells[index] = cell;
        Ok(())
    }

    pub fn cell_mut(&mut self, x: usize, y: usize) -> Result<&mut Cell, GridError> {
        let index = self.index(x, y)?;
        Ok(&mut self.cells[index])
    }

    /// Maps a pointer position to cell coordinates if it lies inside the grid.
    pub fn contains(&self, pos: Position) -> Option<(usize, usize)> {
        let x = usize::try_from(pos.x).ok()?;
        let y = usize::try_from(pos.y).ok()?;
        (x < self.width && y < self.height).then_some((x, y))
    }

    /// Clamps a pointer position onto the nearest cell.
    pub fn clamp(&self, pos: Position) -> (usize, usize) {
        let clamp = |value: i32, len: usize| {
            if value <= 0 {
                0
            } else {
                (value as usize).min(len - 1)
            }
        };
        (clamp(pos.x, self.width), clamp(pos.y, self.height))
    }

    /// Changes the dimensions, keeping the cells inside both the old and new bounds.
    ///
    /// Grows to the right and bottom with empty cells and shrinks from the right and
    /// bottom. On error the grid is left untouched.
    pub fn resize(&mut self, new_width: usize, new_height: usize) -> Result<(), GridError> {
        check_dimensions(new_width, new_height)?;

        if (new_width, new_height) == self.dimensions() {
            return Ok(());
        }

        let mut cells = Vec::with_capacity(new_width * new_height);
        for y in 0..new_height {
            for x in 0..new_width {
                let cell = if x < self.width && y < self.height {
                    self.cells[y * self.width + x]
                } else {
                    Cell::EMPTY
                };
                cells.push(cell);
            }
        }

        debug!(
            "Resized grid from {}x{} to {}x{}",
            self.width, self.height, new_width, new_height
        );

        self.width = new_width;
        self.height = new_height;
        self.cells = cells;
        Ok(())
    }

    pub fn clear(&mut self) {
        self.cells.fill(Cell::EMPTY);
    }

    /// Applies `brush` to every cell of `rect` that lies inside the grid.
    pub fn fill_rect(&mut self, rect: Rect, brush: &Cell) {
        for (x, y) in rect.positions() {
            if let Ok(cell) = self.cell_mut(x, y) {
                cell.apply(brush);
            }
        }
    }

    /// Resets every cell of `rect` that lies inside the grid.
    pub fn clear_rect(&mut self, rect: Rect) {
        for (x, y) in rect.positions() {
            if let Ok(cell) = self.cell_mut(x, y) {
                cell.clear();
            }
        }
    }

    /// Copies the cells of `rect` from `source`, which must have the same dimensions.
    pub fn restore_rect(&mut self, source: &Grid, rect: Rect) {
        if source.dimensions() != self.dimensions() {
            *self = source.clone();
            return;
        }
        for (x, y) in rect.positions() {
            if let (Ok(cell), Ok(original)) = (self.cell_mut(x, y), source.get(x, y)) {
                *cell = original;
            }
        }
    }
}

impl Default for Grid {
    fn default() -> Self {
        use crate::constants::{DEFAULT_HEIGHT, DEFAULT_WIDTH};
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            cells: vec![Cell::EMPTY; DEFAULT_WIDTH * DEFAULT_HEIGHT],
        }
    }
}

/// Checks that a `width` x `height` grid may be created, without allocating it.
pub fn check_dimensions(width: usize, height: usize) -> Result<(), GridError> {
    let valid = 1..=MAX_GRID_DIMENSION;
    if valid.contains(&width) && valid.contains(&height) {
        Ok(())
    } else {
        Err(GridError::InvalidDimensions { width, height })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Rgba;

    fn numbered(width: usize, height: usize) -> Grid {
        let mut grid = Grid::new(width, height).unwrap();
        for y in 0..height {
            for x in 0..width {
                let character = char::from(b'a' + ((y * width + x) % 26) as u8);
                grid.set(x, y, Cell::with_character(character)).unwrap();
            }
        }
        grid
    }

    #[test]
    fn test_new_grid_is_empty() {
        let grid = Grid::new(3, 2).unwrap();
        assert_eq!(grid.dimensions(), (3, 2));
        assert_eq!(grid.cells().len(), 6);
        assert!(grid.cells().iter().all(Cell::is_empty));
    }

    #[test]
    fn test_default_grid_is_10x10() {
        assert_eq!(Grid::default().dimensions(), (10, 10));
    }

    #[test]
    fn test_invalid_dimensions() {
        assert!(matches!(
            Grid::new(0, 4),
            Err(GridError::InvalidDimensions { width: 0, height: 4 })
        ));
        assert!(Grid::new(4, MAX_GRID_DIMENSION + 1).is_err());
    }

    #[test]
    fn test_get_set_out_of_bounds() {
        let mut grid = Grid::new(2, 2).unwrap();
        assert_eq!(
            grid.get(2, 0),
            Err(GridError::OutOfBounds {
                x: 2,
                y: 0,
                width: 2,
                height: 2
            })
        );
        assert!(grid.set(0, 2, Cell::with_character('x')).is_err());

        grid.set(1, 1, Cell::with_character('x')).unwrap();
        assert_eq!(grid.get(1, 1).unwrap().character, Some('x'));
    }

    #[test]
    fn test_resize_grow_keeps_cells() {
        let mut grid = numbered(2, 2);
        let original = grid.clone();
        grid.resize(4, 3).unwrap();

        assert_eq!(grid.dimensions(), (4, 3));
        for y in 0..2 {
            for x in 0..2 {
                assert_eq!(grid.get(x, y), original.get(x, y));
            }
        }
        assert!(grid.get(3, 0).unwrap().is_empty());
        assert!(grid.get(0, 2).unwrap().is_empty());
    }

    #[test]
    fn test_resize_shrink_truncates() {
        let mut grid = numbered(4, 4);
        let original = grid.clone();
        grid.resize(2, 3).unwrap();

        assert_eq!(grid.cells().len(), 6);
        assert_eq!(grid.get(1, 2), original.get(1, 2));
        assert!(grid.get(2, 0).is_err());
    }

    #[test]
    fn test_resize_failure_leaves_grid_unchanged() {
        let mut grid = numbered(3, 3);
        let original = grid.clone();

        assert!(grid.resize(0, 5).is_err());
        assert_eq!(grid, original);
    }

    #[test]
    fn test_contains_and_clamp() {
        let grid = Grid::new(3, 2).unwrap();
        assert_eq!(grid.contains(Position::new(2, 1)), Some((2, 1)));
        assert_eq!(grid.contains(Position::new(-1, 0)), None);
        assert_eq!(grid.contains(Position::new(3, 0)), None);

        assert_eq!(grid.clamp(Position::new(-5, 9)), (0, 1));
        assert_eq!(grid.clamp(Position::new(7, -1)), (2, 0));
    }

    #[test]
    fn test_fill_rect() {
        let mut grid = Grid::new(4, 4).unwrap();
        let brush = Cell::new(Some('#'), None, Some(Rgba::BLACK));
        grid.fill_rect(Rect::from_corners((1, 1), (2, 3)), &brush);

        let painted = grid.cells().iter().filter(|cell| **cell == brush).count();
        assert_eq!(painted, 6);
        assert!(grid.get(0, 0).unwrap().is_empty());
    }

    #[test]
    fn test_rows() {
        let grid = numbered(3, 2);
        let rows: Vec<_> = grid.rows().collect();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1][0].character, Some('d'));
    }
}
