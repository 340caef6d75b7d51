use log::{debug, error, info};
use thiserror::Error;

use super::format::{Section, CELL_SEPARATOR, COLOR_TOKEN_LEN, COMMENT_PREFIX, UNSET_COLOR};
use crate::texture::grid::check_dimensions;
use crate::texture::{Cell, Grid, GridError, Rgba};

/// Structural problems of an ART file. Every variant means the file is malformed.
///
/// `line` is 1-based; `row` and `column` are 0-based cell coordinates.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ArtDecodeError {
    #[error("Missing section: {0}")]
    MissingSection(Section),
    #[error("Section {0} appears more than once")]
    DuplicateSection(Section),
    #[error("Line {line} does not belong to any section")]
    ContentOutsideSection { line: usize },
    #[error("Invalid size line: {0:?}")]
    InvalidSize(String),
    #[error("Invalid texture dimensions")]
    InvalidDimensions(#[from] GridError),
    #[error("Section {section} has {actual} rows, expected {expected}")]
    RowCountMismatch {
        section: Section,
        expected: usize,
        actual: usize,
    },
    #[error("Row {row} of section {section} has {actual} columns, expected {expected}")]
    ColumnCountMismatch {
        section: Section,
        row: usize,
        expected: usize,
        actual: usize,
    },
    #[error("Row {row} of section symbols is not a list of single characters")]
    InvalidSymbolRow { row: usize },
    #[error("Invalid color {token:?} at column {column} of row {row} in section {section}")]
    InvalidColorToken {
        section: Section,
        row: usize,
        column: usize,
        token: String,
    },
}

pub fn decode(text: &str) -> Result<Grid, ArtDecodeError> {
    info!("Starting ART decoding");

    let sections = split_sections(text)?;
    let rows = |section: Section| sections[section.index()].as_deref().unwrap_or_default();

    // Step 1: Size
    let (width, height) = parse_size(rows(Section::Size))?;
    check_dimensions(width, height).map_err(|e| {
        error!("Invalid texture dimensions {}x{}", width, height);
        ArtDecodeError::from(e)
    })?;
    debug!("Texture dimensions read: width={} height={}", width, height);

    // Step 2: Check every row section against the size before touching cells
    for section in [Section::Symbols, Section::Foreground, Section::Background] {
        let actual = rows(section).len();
        if actual != height {
            error!("Section {} has {} rows instead of {}", section, actual, height);
            return Err(ArtDecodeError::RowCountMismatch {
                section,
                expected: height,
                actual,
            });
        }
    }

    // Step 3: Read the three sections in lockstep, collecting cells as rows parse
    let symbol_rows = rows(Section::Symbols);
    let foreground_rows = rows(Section::Foreground);
    let background_rows = rows(Section::Background);
    let mut cells = Vec::new();

    for y in 0..height {
        let symbols = parse_symbol_row(symbol_rows[y], y, width)?;
        let foregrounds = parse_color_row(foreground_rows[y], Section::Foreground, y, width)?;
        let backgrounds = parse_color_row(background_rows[y], Section::Background, y, width)?;

        cells.extend(
            symbols
                .into_iter()
                .zip(foregrounds)
                .zip(backgrounds)
                .map(|((symbol, foreground), background)| Cell::new(symbol, foreground, background)),
        );
    }

    let grid = Grid::from_cells(width, height, cells)?;
    info!("ART decoding completed: {}x{}", width, height);
    Ok(grid)
}

type SectionRows<'a> = [Option<Vec<&'a str>>; 4];

fn split_sections(text: &str) -> Result<SectionRows<'_>, ArtDecodeError> {
    let mut sections: SectionRows = Default::default();
    let mut current: Option<Section> = None;

    for (index, line) in text.lines().enumerate() {
        if line.starts_with(COMMENT_PREFIX) {
            if let Some(section) = Section::from_marker(line) {
                let slot = &mut sections[section.index()];
                if slot.is_some() {
                    error!("Section {} appears twice", section);
                    return Err(ArtDecodeError::DuplicateSection(section));
                }
                *slot = Some(Vec::new());
                current = Some(section);
            } else {
                debug!("Skipping comment on line {}", index + 1);
            }
            continue;
        }

        if line.is_empty() {
            continue;
        }

        match current {
            Some(section) => {
                if let Some(rows) = sections[section.index()].as_mut() {
                    rows.push(line);
                }
            }
            None => {
                error!("Line {} appears before the first section", index + 1);
                return Err(ArtDecodeError::ContentOutsideSection { line: index + 1 });
            }
        }
    }

    for section in Section::ALL {
        if sections[section.index()].is_none() {
            error!("Missing section {}", section);
            return Err(ArtDecodeError::MissingSection(section));
        }
    }

    Ok(sections)
}

fn parse_size(rows: &[&str]) -> Result<(usize, usize), ArtDecodeError> {
    let invalid = || ArtDecodeError::InvalidSize(rows.join("\n"));

    let [line] = rows else {
        error!("Size section must hold exactly one line, found {}", rows.len());
        return Err(invalid());
    };

    let mut values = line.split_whitespace().map(str::parse::<usize>);
    match (values.next(), values.next(), values.next()) {
        (Some(Ok(width)), Some(Ok(height)), None) => Ok((width, height)),
        _ => {
            error!("Invalid size line {:?}", line);
            Err(invalid())
        }
    }
}

/// Splits a symbol row into cells: each cell is either the unset token `00` or a
/// single character, followed by one separator unless it ends the row.
fn parse_symbol_row(line: &str, row: usize, width: usize) -> Result<Vec<Option<char>>, ArtDecodeError> {
    let chars: Vec<char> = line.chars().collect();
    let mut symbols = Vec::with_capacity(width);
    let mut i = 0;

    while i < chars.len() {
        let unset = chars[i] == '0'
            && chars.get(i + 1) == Some(&'0')
            && matches!(chars.get(i + 2), None | Some(&CELL_SEPARATOR));

        if unset {
            symbols.push(None);
            i += 2;
        } else {
            symbols.push(Some(chars[i]));
            i += 1;
        }

        match chars.get(i) {
            None => break,
            Some(&CELL_SEPARATOR) if i + 1 < chars.len() => i += 1,
            _ => {
                error!("Malformed symbol row {}: {:?}", row, line);
                return Err(ArtDecodeError::InvalidSymbolRow { row });
            }
        }
    }

    if symbols.len() != width {
        error!(
            "Symbol row {} has {} columns instead of {}",
            row,
            symbols.len(),
            width
        );
        return Err(ArtDecodeError::ColumnCountMismatch {
            section: Section::Symbols,
            row,
            expected: width,
            actual: symbols.len(),
        });
    }

    Ok(symbols)
}

fn parse_color_row(
    line: &str,
    section: Section,
    row: usize,
    width: usize,
) -> Result<Vec<Option<Rgba>>, ArtDecodeError> {
    let tokens: Vec<&str> = line.split(CELL_SEPARATOR).collect();

    if tokens.len() != width {
        error!(
            "Row {} of {} has {} columns instead of {}",
            row,
            section,
            tokens.len(),
            width
        );
        return Err(ArtDecodeError::ColumnCountMismatch {
            section,
            row,
            expected: width,
            actual: tokens.len(),
        });
    }

    tokens
        .into_iter()
        .enumerate()
        .map(|(column, token)| parse_color(token, section, row, column))
        .collect()
}

fn parse_color(
    token: &str,
    section: Section,
    row: usize,
    column: usize,
) -> Result<Option<Rgba>, ArtDecodeError> {
    if token == UNSET_COLOR {
        return Ok(None);
    }

    let invalid = || {
        error!("Invalid color token {:?} in {} ({}, {})", token, section, column, row);
        ArtDecodeError::InvalidColorToken {
            section,
            row,
            column,
            token: token.to_string(),
        }
    };

    if token.len() != COLOR_TOKEN_LEN {
        return Err(invalid());
    }
    Rgba::from_hex(token).map(Some).map_err(|_| invalid())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn file(symbols: &str, foreground: &str, background: &str, size: &str) -> String {
        format!(
            "// size\n{size}\n// symbols\n{symbols}\n// foreground color\n{foreground}\n// background color\n{background}\n"
        )
    }

    #[test]
    fn test_decode_simple() {
        let text = file("a 00", "ff0000ff 00000000", "00000000 00FF00FF", "2 1");
        let grid = decode(&text).unwrap();

        assert_eq!(grid.dimensions(), (2, 1));
        assert_eq!(
            grid.get(0, 0).unwrap(),
            Cell::new(Some('a'), Some(Rgba::rgb(255, 0, 0)), None)
        );
        assert_eq!(
            grid.get(1, 0).unwrap(),
            Cell::new(None, None, Some(Rgba::rgb(0, 255, 0)))
        );
    }

    #[test]
    fn test_symbol_row_special_characters() {
        assert_eq!(
            parse_symbol_row("0 00 0", 0, 3).unwrap(),
            vec![Some('0'), None, Some('0')]
        );
        assert_eq!(
            parse_symbol_row("     ", 0, 3).unwrap(),
            vec![Some(' '), Some(' '), Some(' ')]
        );
        assert_eq!(parse_symbol_row("00", 0, 1).unwrap(), vec![None]);
        assert_eq!(parse_symbol_row("é ☃", 0, 2).unwrap(), vec![Some('é'), Some('☃')]);
    }

    #[test]
    fn test_symbol_row_malformed() {
        assert_eq!(
            parse_symbol_row("ab", 4, 1),
            Err(ArtDecodeError::InvalidSymbolRow { row: 4 })
        );
        assert_eq!(
            parse_symbol_row("a b ", 0, 2),
            Err(ArtDecodeError::InvalidSymbolRow { row: 0 })
        );
    }

    #[test]
    fn test_skips_comments_blank_lines_and_crlf() {
        let text = "// exported texture\r\n\r\n// size\r\n1 1\r\n// symbols\r\nq\r\n\r\n// foreground color\r\n00000000\r\n// note\r\n// background color\r\n00000000\r\n";
        let grid = decode(text).unwrap();
        assert_eq!(grid.get(0, 0).unwrap(), Cell::with_character('q'));
    }

    #[test]
    fn test_sections_in_any_order() {
        let text = "// background color\n00000000\n// symbols\nz\n// size\n1 1\n// foreground color\n00000000\n";
        assert_eq!(decode(text).unwrap().get(0, 0).unwrap(), Cell::with_character('z'));
    }

    #[test]
    fn test_missing_section() {
        let text = "// size\n1 1\n// symbols\nq\n// foreground color\n00000000\n";
        assert_eq!(
            decode(text),
            Err(ArtDecodeError::MissingSection(Section::Background))
        );
    }

    #[test]
    fn test_duplicate_section() {
        let text = format!("{}// size\n1 1\n", file("q", "00000000", "00000000", "1 1"));
        assert_eq!(
            decode(&text),
            Err(ArtDecodeError::DuplicateSection(Section::Size))
        );
    }

    #[test]
    fn test_content_before_first_section() {
        let text = format!("stray\n{}", file("q", "00000000", "00000000", "1 1"));
        assert_eq!(
            decode(&text),
            Err(ArtDecodeError::ContentOutsideSection { line: 1 })
        );
    }

    #[test]
    fn test_invalid_size() {
        for size in ["2", "2 x", "2 2 2", "-1 2"] {
            let text = file("q", "00000000", "00000000", size);
            assert!(
                matches!(decode(&text), Err(ArtDecodeError::InvalidSize(_))),
                "size {size:?} should be rejected"
            );
        }

        let text = file("q", "00000000", "00000000", "0 1");
        assert!(matches!(
            decode(&text),
            Err(ArtDecodeError::InvalidDimensions(_))
        ));
    }

    #[test]
    fn test_row_count_mismatch() {
        let text = file("q\nr", "00000000", "00000000", "1 1");
        assert_eq!(
            decode(&text),
            Err(ArtDecodeError::RowCountMismatch {
                section: Section::Symbols,
                expected: 1,
                actual: 2
            })
        );
    }

    #[test]
    fn test_largest_size_with_short_sections() {
        let text = file("q", "00000000", "00000000", "4096 4096");
        assert_eq!(
            decode(&text),
            Err(ArtDecodeError::RowCountMismatch {
                section: Section::Symbols,
                expected: 4096,
                actual: 1
            })
        );

        let text = file("q", "00000000", "00000000", "4097 1");
        assert_eq!(
            decode(&text),
            Err(ArtDecodeError::InvalidDimensions(GridError::InvalidDimensions {
                width: 4097,
                height: 1
            }))
        );
    }

    #[test]
    fn test_color_column_count_mismatch() {
        let text = file("q", "00000000 00000000", "00000000", "1 1");
        assert_eq!(
            decode(&text),
            Err(ArtDecodeError::ColumnCountMismatch {
                section: Section::Foreground,
                row: 0,
                expected: 1,
                actual: 2
            })
        );
    }

    #[test]
    fn test_invalid_color_tokens() {
        for token in ["fff", "ff0000", "ff0000ff0", "gg0000ff", "#ff0000f"] {
            let text = file("q", "00000000", token, "1 1");
            assert!(
                matches!(
                    decode(&text),
                    Err(ArtDecodeError::InvalidColorToken { section: Section::Background, .. })
                ),
                "{token:?} should be rejected"
            );
        }
    }
}
