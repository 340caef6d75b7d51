use std::fs;
use std::path::Path;

use log::{debug, error, info};
use thiserror::Error;

use crate::art::{self, ArtDecodeError, ArtEncodeError};
use crate::cart::{self, CartDecodeError};
use crate::constants::ART_FILE_EXT;
use crate::texture::Grid;

#[derive(Error, Debug)]
pub enum FileError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("File is not valid UTF-8 text")]
    NotText(#[from] std::string::FromUtf8Error),

    #[error("Malformed ART file: {0}")]
    ArtDecode(#[from] ArtDecodeError),

    #[error("Cannot write ART file: {0}")]
    ArtEncode(#[from] ArtEncodeError),

    #[error("Malformed CART file: {0}")]
    CartDecode(#[from] CartDecodeError),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TextureFormat {
    Art,
    Cart,
}

impl TextureFormat {
    /// `.art` files are text; every other extension is read as compact binary.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case(ART_FILE_EXT) => TextureFormat::Art,
            _ => TextureFormat::Cart,
        }
    }

    pub fn encode(self, grid: &Grid) -> Result<Vec<u8>, FileError> {
        match self {
            TextureFormat::Art => Ok(art::encode(grid)?.into_bytes()),
            TextureFormat::Cart => Ok(cart::encode(grid)),
        }
    }

    pub fn decode(self, data: Vec<u8>) -> Result<Grid, FileError> {
        match self {
            TextureFormat::Art => Ok(art::decode(&String::from_utf8(data)?)?),
            TextureFormat::Cart => Ok(cart::decode(&data)?),
        }
    }
}

pub fn load_texture(path: impl AsRef<Path>) -> Result<Grid, FileError> {
    let path = path.as_ref();
    let format = TextureFormat::from_path(path);
    debug!("Loading {} as {:?}", path.display(), format);

    let data = fs::read(path)?;
    let grid = format.decode(data).map_err(|e| {
        error!("Failed to load {}: {}", path.display(), e);
        e
    })?;

    info!(
        "Loaded {}x{} texture from {}",
        grid.width(),
        grid.height(),
        path.display()
    );
    Ok(grid)
}

pub fn save_texture(path: impl AsRef<Path>, grid: &Grid) -> Result<(), FileError> {
    let path = path.as_ref();
    let format = TextureFormat::from_path(path);
    debug!("Saving {} as {:?}", path.display(), format);

    let data = format.encode(grid)?;
    fs::write(path, data)?;

    info!("Saved texture to {}", path.display());
    Ok(())
}
