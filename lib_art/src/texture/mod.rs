pub mod cell;
pub mod color;
pub mod grid;
pub mod position;

pub use cell::Cell;
pub use color::{ColorError, Rgba};
pub use grid::{Grid, GridError};
pub use position::{Position, Rect};
