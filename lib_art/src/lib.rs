pub mod art;
pub mod cart;
pub mod config;
pub mod constants;
pub mod file;
pub mod history;
pub mod observer;
pub mod paint;
pub mod palette;
pub mod session;
pub mod texture;
pub mod toolbar;

use log::*;
use std::fs::File;
use std::io::{self, Write};
use std::path::Path;

pub use crate::config::EditorConfig;
pub use crate::file::{load_texture, save_texture, FileError, TextureFormat};
pub use crate::history::History;
pub use crate::observer::{BrushChanged, GridChanged, SubscriptionId};
pub use crate::paint::{Channel, Mode, PaintEngine};
pub use crate::palette::PalettePresets;
pub use crate::session::{Session, SessionError};
pub use crate::texture::{Cell, Grid, Position, Rect, Rgba};
pub use crate::toolbar::Toolbar;

/// Sends the records of this crate to `path`, one `[LEVEL file:line] message` per line.
pub fn init_logging(path: impl AsRef<Path>) -> io::Result<()> {
    let target = Box::new(File::create(path)?);

    env_logger::Builder::new()
        .target(env_logger::Target::Pipe(target))
        .filter(Some("lib_art"), LevelFilter::Debug)
        .format(|buf, record| {
            writeln!(
                buf,
                "[{} {}:{}] {}",
                record.level(),
                record.file().unwrap_or("unknown"),
                record.line().unwrap_or(0),
                record.args()
            )
        })
        .try_init()
        .map_err(io::Error::other)
}
