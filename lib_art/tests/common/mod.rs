#![allow(dead_code)]

use std::path::PathBuf;

use lib_art::{Cell, EditorConfig, Grid, Rgba, Session};

pub const RED: Rgba = Rgba::new(255, 0, 0, 255);
pub const HALF_BLUE: Rgba = Rgba::new(0, 0, 255, 128);

/// 3x3 texture, one painted cell.
pub const SMALL_ART: &str = "\
// size
3 3
// symbols
00 00 00
00 x 00
00 00 00
// foreground color
00000000 00000000 00000000
00000000 ff0000ff 00000000
00000000 00000000 00000000
// background color
00000000 00000000 00000000
00000000 00000000 00000000
00000000 00000000 00000000
";

pub fn brush() -> Cell {
    Cell::new(Some('x'), Some(RED), None)
}

/// A 4x3 grid using every kind of cell the formats can store.
pub fn mixed_grid() -> Grid {
    let mut grid = Grid::new(4, 3).unwrap();
    grid.set(0, 0, Cell::with_character('#')).unwrap();
    grid.set(1, 0, Cell::new(Some(' '), Some(RED), Some(HALF_BLUE))).unwrap();
    grid.set(2, 1, Cell::new(Some('0'), None, Some(Rgba::WHITE))).unwrap();
    grid.set(3, 1, Cell::new(None, Some(Rgba::rgb(1, 2, 3)), None)).unwrap();
    grid.set(0, 2, Cell::new(Some('~'), Some(RED), Some(RED))).unwrap();
    grid
}

pub fn session(width: usize, height: usize, undo_length: usize) -> Session {
    let config = EditorConfig {
        width,
        height,
        undo_length,
        ..EditorConfig::default()
    };
    Session::new(&config).unwrap()
}

pub fn temp_path(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!("lib_art_{}_{}", std::process::id(), name))
}
