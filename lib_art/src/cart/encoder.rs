use log::{debug, info, warn};

use super::format::CartLayout;
use crate::texture::{Cell, Grid, Rgba};

pub fn encode(grid: &Grid) -> Vec<u8> {
    info!("Starting CART encoding");

    let (width, height) = grid.dimensions();
    let capacity = CartLayout::HEADER_SIZE + grid.cells().len() * CartLayout::CELL_SIZE;
    let mut encoded_data = Vec::with_capacity(capacity);

    // Step 1: Write header
    encoded_data.extend_from_slice(&(width as u64).to_le_bytes());
    encoded_data.extend_from_slice(&(height as u64).to_le_bytes());
    debug!("Header written: width={} height={}", width, height);

    // Step 2: Write cells
    for (index, cell) in grid.cells().iter().enumerate() {
        encoded_data.push(character_byte(cell, index % width, index / width));
        encoded_data.extend_from_slice(&color_bytes(cell.foreground));
        encoded_data.extend_from_slice(&color_bytes(cell.background));
    }
    debug!("{} cells written", grid.cells().len());

    info!("CART encoding completed: {} bytes", encoded_data.len());
    encoded_data
}

fn character_byte(cell: &Cell, x: usize, y: usize) -> u8 {
    let Some(character) = cell.character else {
        return CartLayout::UNSET_CHARACTER;
    };

    let mut utf8 = [0; 4];
    let byte = character.encode_utf8(&mut utf8).as_bytes()[0];
    if !character.is_ascii() {
        warn!(
            "Character {:?} at ({}, {}) does not fit in one byte, writing 0x{:02x}",
            character, x, y, byte
        );
    }
    byte
}

fn color_bytes(color: Option<Rgba>) -> [u8; 4] {
    color.map_or(CartLayout::UNSET_COLOR, Rgba::to_array)
}
