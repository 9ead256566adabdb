use crate::chess::{Color, Role};

/// A chess piece of a certain [`Role`] and [`Color`].
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
#[cfg_attr(test, derive(test_strategy::Arbitrary))]
#[repr(u8)]
pub enum Piece {
    WhitePawn,
    BlackPawn,
    WhiteKnight,
    BlackKnight,
    WhiteBishop,
    BlackBishop,
    WhiteRook,
    BlackRook,
    WhiteQueen,
    BlackQueen,
    WhiteKing,
    BlackKing,
}

impl Piece {
    /// Constructs [`Piece`] from a pair of [`Role`] and [`Color`].
    #[inline(always)]
    pub fn new(r: Role, c: Color) -> Self {
        use Piece::*;
        match (r, c) {
            (Role::Pawn, Color::White) => WhitePawn,
            (Role::Pawn, Color::Black) => BlackPawn,
            (Role::Knight, Color::White) => WhiteKnight,
            (Role::Knight, Color::Black) => BlackKnight,
            (Role::Bishop, Color::White) => WhiteBishop,
            (Role::Bishop, Color::Black) => BlackBishop,
            (Role::Rook, Color::White) => WhiteRook,
            (Role::Rook, Color::Black) => BlackRook,
            (Role::Queen, Color::White) => WhiteQueen,
            (Role::Queen, Color::Black) => BlackQueen,
            (Role::King, Color::White) => WhiteKing,
            (Role::King, Color::Black) => BlackKing,
        }
    }

    /// This piece's [`Role`].
    #[inline(always)]
    pub fn role(&self) -> Role {
        use Piece::*;
        match self {
            WhitePawn | BlackPawn => Role::Pawn,
            WhiteKnight | BlackKnight => Role::Knight,
            WhiteBishop | BlackBishop => Role::Bishop,
            WhiteRook | BlackRook => Role::Rook,
            WhiteQueen | BlackQueen => Role::Queen,
            WhiteKing | BlackKing => Role::King,
        }
    }

    /// This piece's [`Color`].
    #[inline(always)]
    pub fn color(&self) -> Color {
        use Piece::*;
        match self {
            WhitePawn | WhiteKnight | WhiteBishop | WhiteRook | WhiteQueen | WhiteKing => {
                Color::White
            }
            BlackPawn | BlackKnight | BlackBishop | BlackRook | BlackQueen | BlackKing => {
                Color::Black
            }
        }
    }

    /// Mirrors this piece's [`Color`].
    #[inline(always)]
    pub fn flip(&self) -> Self {
        Self::new(self.role(), !self.color())
    }

    /// All twelve pieces.
    pub fn iter() -> impl Iterator<Item = Self> {
        use Piece::*;
        [
            WhitePawn,
            BlackPawn,
            WhiteKnight,
            BlackKnight,
            WhiteBishop,
            BlackBishop,
            WhiteRook,
            BlackRook,
            WhiteQueen,
            BlackQueen,
            WhiteKing,
            BlackKing,
        ]
        .into_iter()
    }
}
