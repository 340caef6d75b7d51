//! The `.art` text format.
//!
//! Four sections, each introduced by a `//` comment line: `size` holds
//! `width height`, `symbols` one line per row with space separated characters
//! (`00` when unset), and `foreground color` / `background color` one line per row
//! with `rrggbbaa` tokens (`00000000` when unset).

pub mod decoder;
pub mod encoder;
pub mod format;

pub use decoder::{decode, ArtDecodeError};
pub use encoder::{encode, ArtEncodeError};
