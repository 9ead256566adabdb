use crate::chess::{Color, Piece, Role};
use derive_more::{Display, Error};
use std::fmt::{self, Formatter};
use std::str::FromStr;

/// A piece's identity token, e.g. `PW0` or `KB0`.
///
/// The external format is `<role letter><color letter><index>`; role and
/// color are parsed once at construction and kept as fields so legality and
/// ownership checks never re-scan the string.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
#[cfg_attr(test, derive(test_strategy::Arbitrary))]
pub struct PieceId {
    piece: Piece,
    #[cfg_attr(test, strategy(0u8..10))]
    index: u8,
}

impl PieceId {
    /// Constructs [`PieceId`] from a [`Piece`] and a disambiguating index.
    #[inline(always)]
    pub fn new(piece: Piece, index: u8) -> Self {
        PieceId { piece, index }
    }

    /// The white king's singleton id.
    #[inline(always)]
    pub fn white_king() -> Self {
        PieceId::new(Piece::WhiteKing, 0)
    }

    /// The black king's singleton id.
    #[inline(always)]
    pub fn black_king() -> Self {
        PieceId::new(Piece::BlackKing, 0)
    }

    /// The piece this id refers to.
    #[inline(always)]
    pub fn piece(&self) -> Piece {
        self.piece
    }

    /// This id's [`Role`].
    #[inline(always)]
    pub fn role(&self) -> Role {
        self.piece.role()
    }

    /// This id's [`Color`].
    #[inline(always)]
    pub fn color(&self) -> Color {
        self.piece.color()
    }

    /// This id's disambiguating index.
    #[inline(always)]
    pub fn index(&self) -> u8 {
        self.index
    }
}

impl fmt::Display for PieceId {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{}{}",
            self.role().letter(),
            self.color().letter(),
            self.index
        )
    }
}

/// The reason why parsing [`PieceId`] failed.
#[derive(Debug, Display, Clone, Eq, PartialEq, Error)]
#[display(fmt = "failed to parse piece id")]
pub struct ParsePieceIdError;

impl FromStr for PieceId {
    type Err = ParsePieceIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.char_indices();
        let role: Role = match chars.next() {
            Some((_, c)) => c.to_string().parse().map_err(|_| ParsePieceIdError)?,
            None => return Err(ParsePieceIdError),
        };

        let color = match chars.next() {
            Some((_, 'W')) => Color::White,
            Some((_, 'B')) => Color::Black,
            _ => return Err(ParsePieceIdError),
        };

        let index = match chars.next() {
            Some((i, _)) => s[i..].parse().map_err(|_| ParsePieceIdError)?,
            None => return Err(ParsePieceIdError),
        };

        Ok(PieceId::new(Piece::new(role, color), index))
    }
}
