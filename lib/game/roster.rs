use crate::chess::{Board, Cell, Color, Piece, PieceId, Role};
use crate::game::{GamePiece, Tempo};
use arrayvec::ArrayVec;

/// The authoritative collection of all pieces currently in play.
///
/// Cell occupancy is derived by scanning, never indexed; a moving piece keeps
/// its pre-move cell until it arrives, so scans stay consistent mid-flight.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Roster {
    pieces: ArrayVec<GamePiece, 32>,
}

impl Roster {
    /// Constructs an empty roster.
    pub fn empty() -> Self {
        Roster::default()
    }

    /// Constructs the standard 32-piece opening roster.
    ///
    /// Black occupies rows 0–1, white rows 6–7; ids follow the external
    /// token convention, e.g. `QW0` at (3,7) and `KB0` at (4,0).
    pub fn standard(board: Board, tempo: Tempo) -> Self {
        use Role::*;
        let back_rank = [Rook, Knight, Bishop, Queen, King, Bishop, Knight, Rook];

        let mut roster = Roster::empty();

        for (color, back_row, pawn_row) in
            [(Color::Black, 0, 1), (Color::White, 7, 6)]
        {
            let mut minor_index = [0u8; 6];

            for (col, &role) in back_rank.iter().enumerate() {
                let index = minor_index[role as usize];
                minor_index[role as usize] += 1;

                let id = PieceId::new(Piece::new(role, color), index);
                let cell = Cell::new(col as u8, back_row).unwrap();
                roster.push(GamePiece::new(id, cell, board, tempo));
            }

            for col in 0..8 {
                let id = PieceId::new(Piece::new(Pawn, color), col);
                let cell = Cell::new(col, pawn_row).unwrap();
                roster.push(GamePiece::new(id, cell, board, tempo));
            }
        }

        roster
    }

    /// The number of pieces in play.
    pub fn len(&self) -> usize {
        self.pieces.len()
    }

    /// Whether no pieces remain.
    pub fn is_empty(&self) -> bool {
        self.pieces.is_empty()
    }

    /// Iterates over the pieces in play.
    pub fn iter(&self) -> impl Iterator<Item = &GamePiece> {
        self.pieces.iter()
    }

    /// Iterates mutably over the pieces in play.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut GamePiece> {
        self.pieces.iter_mut()
    }

    /// The piece with the given id, if in play.
    pub fn by_id(&self, id: PieceId) -> Option<&GamePiece> {
        self.pieces.iter().find(|p| p.id() == id)
    }

    /// The piece with the given id, if in play, mutably.
    pub fn by_id_mut(&mut self, id: PieceId) -> Option<&mut GamePiece> {
        self.pieces.iter_mut().find(|p| p.id() == id)
    }

    /// The piece occupying the given cell, if any.
    pub fn at_cell(&self, cell: Cell) -> Option<&GamePiece> {
        self.pieces.iter().find(|p| p.cell() == cell)
    }

    /// The piece other than `except` occupying the given cell, if any.
    pub fn at_cell_except(&self, cell: Cell, except: PieceId) -> Option<&GamePiece> {
        self.pieces
            .iter()
            .find(|p| p.cell() == cell && p.id() != except)
    }

    /// The number of pieces of the given role and color in play.
    pub fn count(&self, piece: Piece) -> usize {
        self.pieces.iter().filter(|p| p.piece() == piece).count()
    }

    /// One past the highest live id index of the given role and color.
    ///
    /// Counting live pieces instead would re-mint the id of a captured
    /// lower-indexed piece while a higher-indexed one survives.
    pub fn next_index(&self, piece: Piece) -> u8 {
        self.pieces
            .iter()
            .filter(|p| p.piece() == piece)
            .map(|p| p.id().index())
            .max()
            .map_or(0, |i| i + 1)
    }

    /// Adds a piece to the roster.
    pub fn push(&mut self, piece: GamePiece) {
        debug_assert!(self.by_id(piece.id()).is_none(), "duplicate id {}", piece.id());
        self.pieces.push(piece);
    }

    /// Removes the piece with the given id from the roster.
    pub fn remove(&mut self, id: PieceId) -> Option<GamePiece> {
        let index = self.pieces.iter().position(|p| p.id() == id)?;
        Some(self.pieces.remove(index))
    }

    /// Whether no two pieces share a cell.
    ///
    /// Holds at every observation point outside a single arrival resolution
    /// step.
    pub fn is_settled(&self) -> bool {
        self.pieces
            .iter()
            .enumerate()
            .all(|(i, p)| self.pieces[..i].iter().all(|q| q.cell() != p.cell()))
    }
}

impl<'a> IntoIterator for &'a Roster {
    type Item = &'a GamePiece;
    type IntoIter = std::slice::Iter<'a, GamePiece>;

    fn into_iter(self) -> Self::IntoIter {
        self.pieces.iter()
    }
}
