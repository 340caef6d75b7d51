use std::fmt;

/// Lines starting with this prefix are comments; some of them mark sections.
pub const COMMENT_PREFIX: &str = "//";

/// Symbol token for a cell without a character.
pub const UNSET_SYMBOL: &str = "00";

/// Color token for a cell without that color.
pub const UNSET_COLOR: &str = "00000000";

pub const COLOR_TOKEN_LEN: usize = 8;

pub const CELL_SEPARATOR: char = ' ';

/// The sections of an ART file, in the order they are written.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Section {
    Size,
    Symbols,
    Foreground,
    Background,
}

impl Section {
    pub const ALL: [Section; 4] = [
        Section::Size,
        Section::Symbols,
        Section::Foreground,
        Section::Background,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Section::Size => "size",
            Section::Symbols => "symbols",
            Section::Foreground => "foreground color",
            Section::Background => "background color",
        }
    }

    pub fn marker(self) -> String {
        format!("{} {}", COMMENT_PREFIX, self.name())
    }

    /// Recognizes a section marker line such as `// symbols`.
    pub fn from_marker(line: &str) -> Option<Self> {
        let name = line.strip_prefix(COMMENT_PREFIX)?.trim();
        Self::ALL
            .into_iter()
            .find(|section| section.name().eq_ignore_ascii_case(name))
    }

    pub(crate) fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
