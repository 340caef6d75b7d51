mod app;
mod canvas;
mod filemanager;
mod viewport;

use app::ArtEditor;
use eframe::egui;
use lib_art::constants::CONFIG_FILE_NAME;
use lib_art::EditorConfig;
use log::error;

fn main() -> Result<(), eframe::Error> {
    if let Err(e) = lib_art::init_logging("log.txt") {
        eprintln!("Logging disabled: {}", e);
    }

    let config = EditorConfig::load(CONFIG_FILE_NAME).unwrap_or_else(|e| {
        error!("Ignoring {}: {}", CONFIG_FILE_NAME, e);
        EditorConfig::default()
    });

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default().with_inner_size([1100.0, 720.0]),
        ..Default::default()
    };

    eframe::run_native(
        "ART Editor",
        native_options,
        Box::new(|_cc| Ok(Box::new(ArtEditor::new(config)?))),
    )?;

    Ok(())
}
