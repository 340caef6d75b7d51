use log::{debug, error, info};
use thiserror::Error;

use super::format::CartLayout;
use crate::texture::{Cell, Grid, Rgba};

#[derive(Error, Debug, PartialEq, Eq)]
pub enum CartDecodeError {
    #[error("Truncated file: expected {expected} bytes, got {actual}")]
    TruncatedFile { expected: usize, actual: usize },
    #[error("Unexpected {extra} bytes after the last cell")]
    TrailingData { extra: usize },
    #[error("Invalid texture dimensions {width}x{height}")]
    InvalidDimensions { width: u64, height: u64 },
}

pub fn decode(encoded_data: &[u8]) -> Result<Grid, CartDecodeError> {
    info!("Starting CART decoding");

    // Read width and height
    if encoded_data.len() < CartLayout::HEADER_SIZE {
        error!("File is shorter than the header");
        return Err(CartDecodeError::TruncatedFile {
            expected: CartLayout::HEADER_SIZE,
            actual: encoded_data.len(),
        });
    }
    let (width_bytes, rest) = encoded_data.split_at(CartLayout::DIMENSION_SIZE);
    let (height_bytes, cell_data) = rest.split_at(CartLayout::DIMENSION_SIZE);
    let width = read_u64(width_bytes);
    let height = read_u64(height_bytes);
    debug!("Texture dimensions read: width={} height={}", width, height);

    // Check the total size before allocating anything
    let invalid_dimensions = || {
        error!("Invalid texture dimensions {}x{}", width, height);
        CartDecodeError::InvalidDimensions { width, height }
    };
    let expected = CartLayout::file_size(width, height).ok_or_else(invalid_dimensions)?;
    if encoded_data.len() < expected {
        error!(
            "Truncated file: expected {} bytes, got {}",
            expected,
            encoded_data.len()
        );
        return Err(CartDecodeError::TruncatedFile {
            expected,
            actual: encoded_data.len(),
        });
    }
    if encoded_data.len() > expected {
        error!("{} unexpected bytes after the last cell", encoded_data.len() - expected);
        return Err(CartDecodeError::TrailingData {
            extra: encoded_data.len() - expected,
        });
    }

    let width = usize::try_from(width).map_err(|_| invalid_dimensions())?;
    let height = usize::try_from(height).map_err(|_| invalid_dimensions())?;

    // Read cells
    let cells = cell_data
        .chunks_exact(CartLayout::CELL_SIZE)
        .map(read_cell)
        .collect();
    let grid = Grid::from_cells(width, height, cells).map_err(|_| invalid_dimensions())?;

    info!("CART decoding completed: {}x{}", width, height);
    Ok(grid)
}

fn read_u64(bytes: &[u8]) -> u64 {
    let mut buffer = [0; 8];
    buffer.copy_from_slice(bytes);
    u64::from_le_bytes(buffer)
}

fn read_cell(bytes: &[u8]) -> Cell {
    let character = match bytes[0] {
        CartLayout::UNSET_CHARACTER => None,
        byte => Some(char::from(byte)),
    };
    Cell::new(
        character,
        read_color(&bytes[1..5]),
        read_color(&bytes[5..9]),
    )
}

fn read_color(bytes: &[u8]) -> Option<Rgba> {
    let color = [bytes[0], bytes[1], bytes[2], bytes[3]];
    (color != CartLayout::UNSET_COLOR).then(|| Rgba::from_array(color))
}
