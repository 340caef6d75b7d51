pub const ART_FORMAT_NAME: &str = "ART texture";
pub const ART_FILE_EXT: &str = "art";

pub const CART_FORMAT_NAME: &str = "Compact ART texture";
pub const CART_FILE_EXT: &str = "cart";

pub const PRESET_FORMAT_NAME: &str = "ART palette presets";
pub const PRESET_FILE_EXT: &str = "artpal";

pub const CONFIG_FILE_NAME: &str = "art_editor.toml";

pub const DEFAULT_WIDTH: usize = 10;
pub const DEFAULT_HEIGHT: usize = 10;
pub const MAX_GRID_DIMENSION: usize = 4096;

pub const DEFAULT_UNDO_LENGTH: usize = 128;

pub const DEFAULT_PALETTE_COLUMNS: usize = 11;
pub const DEFAULT_PALETTE_ROWS: usize = 4;
