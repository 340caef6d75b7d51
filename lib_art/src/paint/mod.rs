//! Pointer-driven editing of a texture grid.
//!
//! The left mouse button paints with the current brush, the right one erases.
//! Both work either cell by cell (pen) or as a rectangle spanned by the drag (box).
//! Only one stroke runs at a time; pressing the other button mid-stroke is refused.

pub mod engine;

pub use engine::PaintEngine;

use thiserror::Error;

/// Interaction channel, one per mouse button.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Channel {
    Paint,
    Erase,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Mode {
    #[default]
    Pen,
    Box,
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum PaintError {
    #[error("A {0:?} stroke is already running")]
    StrokeAlreadyActive(Channel),
    #[error("Cannot start a stroke while a {0:?} stroke is running")]
    OtherStrokeActive(Channel),
}
