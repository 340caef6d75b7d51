use std::collections::VecDeque;

use log::debug;
use thiserror::Error;

use crate::constants::DEFAULT_UNDO_LENGTH;
use crate::texture::Grid;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum HistoryError {
    #[error("Undo length must be at least 1")]
    ZeroCapacity,
}

/// Bounded undo and redo stacks of whole-grid snapshots.
///
/// One entry is recorded per gesture: `begin_stroke` checkpoints the grid before
/// the first change and `end_stroke` drops the checkpoint again if nothing changed.
#[derive(Debug)]
pub struct History {
    undo: VecDeque<Grid>,
    redo: VecDeque<Grid>,
    capacity: usize,
    // Set while the top of `undo` was pushed by the running stroke.
    pending: bool,
    // Oldest entry pushed out by that checkpoint, put back if the stroke changes nothing.
    evicted: Option<Grid>,
}

impl History {
    pub fn new(undo_length: usize) -> Result<Self, HistoryError> {
        if undo_length == 0 {
            return Err(HistoryError::ZeroCapacity);
        }
        Ok(Self {
            undo: VecDeque::with_capacity(undo_length),
            redo: VecDeque::with_capacity(undo_length),
            capacity: undo_length,
            pending: false,
            evicted: None,
        })
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn undo_len(&self) -> usize {
        self.undo.len()
    }

    pub fn redo_len(&self) -> usize {
        self.redo.len()
    }

    pub fn can_undo(&self) -> bool {
        !self.undo.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo.is_empty()
    }

    pub fn clear(&mut self) {
        self.undo.clear();
        self.redo.clear();
        self.pending = false;
        self.evicted = None;
    }

    /// Checkpoints `current` unless it already matches the newest undo entry.
    /// Any redo entries are discarded.
    pub fn begin_stroke(&mut self, current: &Grid) {
        self.redo.clear();

        self.pending = self.undo.back() != Some(current);
        self.evicted = None;
        if self.pending {
            self.evicted = push_bounded(&mut self.undo, current.clone(), self.capacity);
            debug!("Checkpoint recorded, {} undo entries", self.undo.len());
        }
    }

    /// Drops the checkpoint taken by `begin_stroke` if the stroke changed nothing.
    pub fn end_stroke(&mut self, current: &Grid) {
        let evicted = self.evicted.take();
        if std::mem::take(&mut self.pending) && self.undo.back() == Some(current) {
            self.undo.pop_back();
            if let Some(oldest) = evicted {
                self.undo.push_front(oldest);
            }
            debug!("Stroke changed nothing, checkpoint dropped");
        }
    }

    /// Returns the grid to restore, moving `current` onto the redo stack.
    pub fn undo(&mut self, current: &Grid) -> Option<Grid> {
        let previous = self.undo.pop_back()?;
        push_bounded(&mut self.redo, current.clone(), self.capacity);
        self.pending = false;
        self.evicted = None;
        Some(previous)
    }

    /// Returns the grid to restore, moving `current` onto the undo stack.
    pub fn redo(&mut self, current: &Grid) -> Option<Grid> {
        let next = self.redo.pop_back()?;
        push_bounded(&mut self.undo, current.clone(), self.capacity);
        self.pending = false;
        self.evicted = None;
        Some(next)
    }
}

impl Default for History {
    fn default() -> Self {
        Self {
            undo: VecDeque::new(),
            redo: VecDeque::new(),
            capacity: DEFAULT_UNDO_LENGTH,
            pending: false,
            evicted: None,
        }
    }
}

/// Pushes `grid`, returning the oldest entry if it had to make room.
fn push_bounded(stack: &mut VecDeque<Grid>, grid: Grid, capacity: usize) -> Option<Grid> {
    let evicted = if stack.len() >= capacity {
        stack.pop_front()
    } else {
        None
    };
    stack.push_back(grid);
    evicted
}
