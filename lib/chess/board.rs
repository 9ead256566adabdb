use crate::chess::Cell;

/// The board's fixed geometry.
///
/// Maps cell coordinates to pixel coordinates for the animation layer; owns
/// no piece state.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct Board {
    cell_w_px: u16,
    cell_h_px: u16,
}

impl Board {
    /// Constructs [`Board`] with the given cell dimensions in pixels.
    #[inline(always)]
    pub fn new(cell_w_px: u16, cell_h_px: u16) -> Self {
        Board { cell_w_px, cell_h_px }
    }

    /// The number of cells along each axis.
    pub const SIDE: u8 = 8;

    /// The pixel coordinate of a cell's top-left corner.
    #[inline(always)]
    pub fn cell_to_pixel(&self, cell: Cell) -> (i32, i32) {
        (
            cell.col() as i32 * self.cell_w_px as i32,
            cell.row() as i32 * self.cell_h_px as i32,
        )
    }
}

impl Default for Board {
    fn default() -> Self {
        Board::new(80, 80)
    }
}
