use crate::chess::{Cell, PieceId};
use std::fmt::{self, Formatter};

/// An instruction addressed to one piece.
///
/// Each variant carries exactly the fields its kind needs; commands are
/// immutable once constructed and move by value from producer to consumer.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
#[cfg_attr(test, derive(test_strategy::Arbitrary))]
pub enum Command {
    /// Travel to `target` along an interpolated trajectory.
    Move {
        at: u64,
        piece: PieceId,
        source: Cell,
        target: Cell,
        captured: Option<PieceId>,
    },

    /// Relocate to `target` instantly.
    Jump { at: u64, piece: PieceId, target: Cell },

    /// Reinitialize to idle at `cell`, clearing rest timers.
    Reset { at: u64, piece: PieceId, cell: Cell },

    /// Stand down without relocating.
    Idle { at: u64, piece: PieceId },

    /// The piece's motion completed at `cell`.
    Arrived { at: u64, piece: PieceId, cell: Cell },
}

impl Command {
    /// The timestamp this command originated at, in game milliseconds.
    #[inline(always)]
    pub fn at(&self) -> u64 {
        match *self {
            Command::Move { at, .. }
            | Command::Jump { at, .. }
            | Command::Reset { at, .. }
            | Command::Idle { at, .. }
            | Command::Arrived { at, .. } => at,
        }
    }

    /// The piece this command addresses.
    #[inline(always)]
    pub fn piece(&self) -> PieceId {
        match *self {
            Command::Move { piece, .. }
            | Command::Jump { piece, .. }
            | Command::Reset { piece, .. }
            | Command::Idle { piece, .. }
            | Command::Arrived { piece, .. } => piece,
        }
    }

    /// The destination cell, for the kinds that have one.
    #[inline(always)]
    pub fn target(&self) -> Option<Cell> {
        match *self {
            Command::Move { target, .. } | Command::Jump { target, .. } => Some(target),
            Command::Reset { cell, .. } | Command::Arrived { cell, .. } => Some(cell),
            Command::Idle { .. } => None,
        }
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match *self {
            Command::Move {
                piece,
                source,
                target,
                captured,
                ..
            } => match captured {
                Some(c) => write!(f, "{piece} {source} -> {target} x{c}"),
                None => write!(f, "{piece} {source} -> {target}"),
            },
            Command::Jump { piece, target, .. } => write!(f, "{piece} jumps to {target}"),
            Command::Reset { piece, cell, .. } => write!(f, "{piece} resets to {cell}"),
            Command::Idle { piece, .. } => write!(f, "{piece} idles"),
            Command::Arrived { piece, cell, .. } => write!(f, "{piece} arrived at {cell}"),
        }
    }
}
