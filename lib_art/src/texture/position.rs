/// A pointer position in cell coordinates. May lie outside the grid.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

impl From<(i32, i32)> for Position {
    fn from((x, y): (i32, i32)) -> Self {
        Self::new(x, y)
    }
}

/// An inclusive rectangle of cells, `min` is the top left corner.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Rect {
    pub min: (usize, usize),
    pub max: (usize, usize),
}

impl Rect {
    /// The rectangle spanning both corners, in any order.
    pub fn from_corners(a: (usize, usize), b: (usize, usize)) -> Self {
        Self {
            min: (a.0.min(b.0), a.1.min(b.1)),
            max: (a.0.max(b.0), a.1.max(b.1)),
        }
    }

    pub fn single(x: usize, y: usize) -> Self {
        Self {
            min: (x, y),
            max: (x, y),
        }
    }

    pub fn width(&self) -> usize {
        self.max.0 - self.min.0 + 1
    }

    pub fn height(&self) -> usize {
        self.max.1 - self.min.1 + 1
    }

    pub fn contains(&self, x: usize, y: usize) -> bool {
        (self.min.0..=self.max.0).contains(&x) && (self.min.1..=self.max.1).contains(&y)
    }

    /// Smallest rectangle covering both.
    pub fn union(&self, other: &Rect) -> Rect {
        Rect {
            min: (self.min.0.min(other.min.0), self.min.1.min(other.min.1)),
            max: (self.max.0.max(other.max.0), self.max.1.max(other.max.1)),
        }
    }

    /// Iterates `(x, y)` in row-major order.
    pub fn positions(&self) -> impl Iterator<Item = (usize, usize)> {
        let (min, max) = (self.min, self.max);
        (min.1..=max.1).flat_map(move |y| (min.0..=max.0).map(move |x| (x, y)))
    }
}
