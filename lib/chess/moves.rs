use crate::chess::Piece;
use derive_more::{Display, Error};
use std::str::FromStr;

/// The restriction attached to a move table entry.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
#[cfg_attr(test, derive(test_strategy::Arbitrary))]
pub enum MoveKind {
    /// Only legal when the destination holds an enemy piece.
    Capture,
    /// Only legal when the destination is empty.
    NonCapture,
    /// Only legal while the pawn still sits on its starting row.
    FirstMove,
    /// No occupancy restriction.
    Unrestricted,
}

/// One entry of a piece kind's move table.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
#[cfg_attr(test, derive(test_strategy::Arbitrary))]
pub struct MoveDelta {
    pub dx: i8,
    pub dy: i8,
    pub kind: MoveKind,
}

/// The reason why parsing a move table failed.
#[derive(Debug, Display, Clone, Eq, PartialEq, Error)]
#[display(fmt = "failed to parse move table")]
pub struct ParseMoveTableError;

/// A piece kind's set of permitted displacements.
///
/// Loaded once per kind from the `dx,dy[:tag]` line format; an entry with no
/// tag is [`MoveKind::Unrestricted`].
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct MoveTable {
    deltas: Vec<MoveDelta>,
}

impl MoveTable {
    /// The table's entries.
    #[inline(always)]
    pub fn deltas(&self) -> &[MoveDelta] {
        &self.deltas
    }
}

impl FromStr for MoveTable {
    type Err = ParseMoveTableError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut deltas = Vec::new();

        for line in s.lines() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }

            let (pair, tag) = match line.split_once(':') {
                Some((pair, tag)) => (pair, Some(tag.trim())),
                None => (line, None),
            };

            let (dx, dy) = pair.split_once(',').ok_or(ParseMoveTableError)?;
            let dx = dx.trim().parse().map_err(|_| ParseMoveTableError)?;
            let dy = dy.trim().parse().map_err(|_| ParseMoveTableError)?;

            let kind = match tag {
                Some("capture") => MoveKind::Capture,
                Some("non_capture") => MoveKind::NonCapture,
                Some("first_move") => MoveKind::FirstMove,
                None => MoveKind::Unrestricted,
                Some(_) => return Err(ParseMoveTableError),
            };

            deltas.push(MoveDelta { dx, dy, kind });
        }

        Ok(MoveTable { deltas })
    }
}

/// The per-piece-kind registry of move tables.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct MoveTables {
    tables: [Option<MoveTable>; 12],
}

impl MoveTables {
    /// Constructs an empty registry.
    ///
    /// A kind with no table always fails legality checks.
    pub fn empty() -> Self {
        MoveTables {
            tables: Default::default(),
        }
    }

    /// Constructs the registry from the built-in table assets.
    pub fn builtin() -> Result<Self, ParseMoveTableError> {
        let mut tables = MoveTables::empty();

        for (piece, data) in [
            (Piece::WhitePawn, include_str!("../../data/moves/pw.txt")),
            (Piece::BlackPawn, include_str!("../../data/moves/pb.txt")),
            (Piece::WhiteKnight, include_str!("../../data/moves/nw.txt")),
            (Piece::BlackKnight, include_str!("../../data/moves/nb.txt")),
            (Piece::WhiteBishop, include_str!("../../data/moves/bw.txt")),
            (Piece::BlackBishop, include_str!("../../data/moves/bb.txt")),
            (Piece::WhiteRook, include_str!("../../data/moves/rw.txt")),
            (Piece::BlackRook, include_str!("../../data/moves/rb.txt")),
            (Piece::WhiteQueen, include_str!("../../data/moves/qw.txt")),
            (Piece::BlackQueen, include_str!("../../data/moves/qb.txt")),
            (Piece::WhiteKing, include_str!("../../data/moves/kw.txt")),
            (Piece::BlackKing, include_str!("../../data/moves/kb.txt")),
        ] {
            tables.insert(piece, data.parse()?);
        }

        Ok(tables)
    }

    /// Registers a table for a piece kind.
    pub fn insert(&mut self, piece: Piece, table: MoveTable) {
        self.tables[piece as usize] = Some(table);
    }

    /// The table for a piece kind, if one was loaded.
    #[inline(always)]
    pub fn get(&self, piece: Piece) -> Option<&MoveTable> {
        self.tables[piece as usize].as_ref()
    }
}
