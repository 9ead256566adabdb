use derive_more::{Display, Error};
use std::fmt::{self, Formatter};
use std::str::FromStr;

/// A cell on the 8×8 board, addressed by (column, row).
///
/// Row 0 is the black back rank, row 7 the white back rank.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
#[cfg_attr(test, derive(test_strategy::Arbitrary))]
pub struct Cell {
    #[cfg_attr(test, strategy(0u8..8))]
    col: u8,
    #[cfg_attr(test, strategy(0u8..8))]
    row: u8,
}

impl Cell {
    /// Constructs [`Cell`], if both coordinates are on the board.
    #[inline(always)]
    pub fn new(col: u8, row: u8) -> Option<Self> {
        if col < 8 && row < 8 {
            Some(Cell { col, row })
        } else {
            None
        }
    }

    /// This cell's column.
    #[inline(always)]
    pub fn col(&self) -> u8 {
        self.col
    }

    /// This cell's row.
    #[inline(always)]
    pub fn row(&self) -> u8 {
        self.row
    }

    /// The signed (dx, dy) displacement from `other` to `self`.
    #[inline(always)]
    pub fn delta(&self, other: Cell) -> (i8, i8) {
        (
            self.col as i8 - other.col as i8,
            self.row as i8 - other.row as i8,
        )
    }

    /// The cell displaced by (dx, dy), if still on the board.
    #[inline(always)]
    pub fn offset(&self, dx: i8, dy: i8) -> Option<Self> {
        let col = (self.col as i8).checked_add(dx)?;
        let row = (self.row as i8).checked_add(dy)?;
        Cell::new(u8::try_from(col).ok()?, u8::try_from(row).ok()?)
    }

    /// The Euclidean distance to `other` in cell units.
    #[inline(always)]
    pub fn distance(&self, other: Cell) -> f64 {
        let (dx, dy) = self.delta(other);
        ((dx as f64).powi(2) + (dy as f64).powi(2)).sqrt()
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.col, self.row)
    }
}

/// The reason why parsing [`Cell`] failed.
#[derive(Debug, Display, Clone, Eq, PartialEq, Error)]
#[display(fmt = "failed to parse cell")]
pub struct ParseCellError;

impl FromStr for Cell {
    type Err = ParseCellError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (col, row) = s.split_once(',').ok_or(ParseCellError)?;
        let col = col.trim().parse().map_err(|_| ParseCellError)?;
        let row = row.trim().parse().map_err(|_| ParseCellError)?;
        Cell::new(col, row).ok_or(ParseCellError)
    }
}
