//! The `.cart` compact binary format.
//!
//! A 16 byte header (`width` and `height` as `u64`) followed by 9 bytes per cell
//! in row-major order: one character byte and two RGBA colors. Zero bytes mark
//! unset fields. The character slot holds a single byte, so only ASCII
//! characters survive a round trip; other characters keep their first UTF-8 byte.

pub mod decoder;
pub mod encoder;
pub mod format;

pub use decoder::{decode, CartDecodeError};
pub use encoder::encode;
pub use format::CartLayout;
