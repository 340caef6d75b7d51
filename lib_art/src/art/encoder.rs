use log::{debug, error, info};
use thiserror::Error;

use super::format::{Section, CELL_SEPARATOR, UNSET_COLOR, UNSET_SYMBOL};
use crate::texture::{Cell, Grid, Rgba};

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ArtEncodeError {
    #[error("Character {character:?} at ({x}, {y}) cannot be stored in a line-based file")]
    UnrepresentableCharacter { x: usize, y: usize, character: char },
}

pub fn encode(grid: &Grid) -> Result<String, ArtEncodeError> {
    info!("Starting ART encoding");

    let (width, height) = grid.dimensions();
    let mut text = String::new();

    // Step 1: Size
    push_line(&mut text, &Section::Size.marker());
    push_line(&mut text, &format!("{} {}", width, height));
    debug!("Size written: {}x{}", width, height);

    // Step 2: Symbols
    push_line(&mut text, &Section::Symbols.marker());
    for (y, row) in grid.rows().enumerate() {
        let mut line = String::with_capacity(width * 2);
        for (x, cell) in row.iter().enumerate() {
            if x > 0 {
                line.push(CELL_SEPARATOR);
            }
            match cell.character {
                None => line.push_str(UNSET_SYMBOL),
                Some(character @ ('\n' | '\r')) => {
                    error!("Cannot write character {:?} at ({}, {})", character, x, y);
                    return Err(ArtEncodeError::UnrepresentableCharacter { x, y, character });
                }
                Some(character) => line.push(character),
            }
        }
        push_line(&mut text, &line);
    }
    debug!("Symbols written: {} rows", height);

    // Step 3: Colors
    push_color_section(&mut text, grid, Section::Foreground, |cell| cell.foreground);
    push_color_section(&mut text, grid, Section::Background, |cell| cell.background);
    debug!("Colors written");

    info!("ART encoding completed: {} bytes", text.len());
    Ok(text)
}

fn push_color_section(
    text: &mut String,
    grid: &Grid,
    section: Section,
    color: impl Fn(&Cell) -> Option<Rgba>,
) {
    push_line(text, &section.marker());
    for row in grid.rows() {
        let tokens: Vec<String> = row
            .iter()
            .map(|cell| color(cell).map_or_else(|| UNSET_COLOR.to_string(), Rgba::to_hex))
            .collect();
        push_line(text, &tokens.join(&CELL_SEPARATOR.to_string()));
    }
}

fn push_line(text: &mut String, line: &str) {
    text.push_str(line);
    text.push('\n');
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_layout() {
        let mut grid = Grid::new(2, 1).unwrap();
        grid.set(
            1,
            0,
            Cell::new(Some('x'), Some(Rgba::rgb(255, 0, 0)), Some(Rgba::new(0, 0, 255, 128))),
        )
        .unwrap();

        let text = encode(&grid).unwrap();
        let expected = "\
// size
2 1
// symbols
00 x
// foreground color
00000000 ff0000ff
// background color
00000000 0000ff80
";
        assert_eq!(text, expected);
    }

    #[test]
    fn test_encode_space_character() {
        let mut grid = Grid::new(2, 1).unwrap();
        grid.set(0, 0, Cell::with_character(' ')).unwrap();
        grid.set(1, 0, Cell::with_character(' ')).unwrap();

        let text = encode(&grid).unwrap();
        assert!(text.contains("\n// symbols\n   \n"));
    }

    #[test]
    fn test_encode_rejects_line_break() {
        let mut grid = Grid::new(3, 2).unwrap();
        grid.set(2, 1, Cell::with_character('\n')).unwrap();

        assert_eq!(
            encode(&grid),
            Err(ArtEncodeError::UnrepresentableCharacter {
                x: 2,
                y: 1,
                character: '\n'
            })
        );
    }
}
