/// Byte layout of a `.cart` file. All integers are little-endian.
pub struct CartLayout;

impl CartLayout {
    pub const DIMENSION_SIZE: usize = std::mem::size_of::<u64>();
    pub const HEADER_SIZE: usize = 2 * Self::DIMENSION_SIZE;

    pub const CHARACTER_SIZE: usize = 1;
    pub const COLOR_SIZE: usize = 4;
    pub const CELL_SIZE: usize = Self::CHARACTER_SIZE + 2 * Self::COLOR_SIZE;

    pub const UNSET_CHARACTER: u8 = 0;
    pub const UNSET_COLOR: [u8; 4] = [0; 4];

    /// Exact file size for the given dimensions, `None` on overflow.
    pub fn file_size(width: u64, height: u64) -> Option<usize> {
        let cells = usize::try_from(width.checked_mul(height)?).ok()?;
        cells
            .checked_mul(Self::CELL_SIZE)?
            .checked_add(Self::HEADER_SIZE)
    }
}
