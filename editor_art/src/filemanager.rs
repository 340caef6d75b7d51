use std::path::PathBuf;

use lib_art::constants::{
    ART_FILE_EXT, ART_FORMAT_NAME, CART_FILE_EXT, CART_FORMAT_NAME, PRESET_FILE_EXT,
    PRESET_FORMAT_NAME,
};
use lib_art::file::FileError;
use lib_art::palette::PresetError;
use lib_art::{PalettePresets, Session};
use log::info;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum FileDialogError {
    #[error("File dialog was canceled")]
    DialogCanceled,

    #[error("{0}")]
    Texture(#[from] FileError),

    #[error("{0}")]
    Presets(#[from] PresetError),
}

fn texture_dialog() -> rfd::FileDialog {
    rfd::FileDialog::new()
        .add_filter(ART_FORMAT_NAME, &[ART_FILE_EXT])
        .add_filter(CART_FORMAT_NAME, &[CART_FILE_EXT])
}

fn preset_dialog() -> rfd::FileDialog {
    rfd::FileDialog::new().add_filter(PRESET_FORMAT_NAME, &[PRESET_FILE_EXT])
}

/// Asks for a texture file and loads it into the session.
pub fn open_texture(session: &mut Session) -> Result<PathBuf, FileDialogError> {
    let path = texture_dialog()
        .pick_file()
        .ok_or(FileDialogError::DialogCanceled)?;

    session.import(&path)?;
    info!("Opened {}", path.display());
    Ok(path)
}

/// Asks where to save the texture. The extension picks the format.
pub fn save_texture(session: &Session) -> Result<PathBuf, FileDialogError> {
    let path = texture_dialog()
        .set_file_name(format!("texture.{}", ART_FILE_EXT))
        .save_file()
        .ok_or(FileDialogError::DialogCanceled)?;

    session.export(&path)?;
    info!("Saved {}", path.display());
    Ok(path)
}

pub fn open_presets() -> Result<(PathBuf, PalettePresets), FileDialogError> {
    let path = preset_dialog()
        .pick_file()
        .ok_or(FileDialogError::DialogCanceled)?;

    let presets = PalettePresets::load(&path)?;
    Ok((path, presets))
}

pub fn save_presets(presets: &PalettePresets) -> Result<PathBuf, FileDialogError> {
    let path = preset_dialog()
        .set_file_name(format!("palette.{}", PRESET_FILE_EXT))
        .save_file()
        .ok_or(FileDialogError::DialogCanceled)?;

    presets.save(&path)?;
    Ok(path)
}
