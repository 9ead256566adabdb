use crate::chess::{Color, PieceId};
use crate::game::{Player, Roster};
use std::fmt::{self, Formatter};

/// One of the possible outcomes of a game.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
#[cfg_attr(test, derive(test_strategy::Arbitrary))]
pub enum Outcome {
    /// The player of this color captured the enemy king.
    Victory(Color),

    /// Game over without a determined winner.
    ///
    /// Not reachable through normal play; the fallback for an announcement
    /// with both kings still standing.
    GameOver,
}

impl Outcome {
    /// The winning side, if any.
    pub fn winner(&self) -> Option<Color> {
        match *self {
            Outcome::Victory(c) => Some(c),
            Outcome::GameOver => None,
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match *self {
            Outcome::Victory(c) => write!(f, "{} ({}) wins", Player::of(c), c),
            Outcome::GameOver => write!(f, "game over"),
        }
    }
}

/// The win condition: a game is decided once a king leaves the roster.
///
/// King ids are fixed singletons (`KW0`, `KB0`), so presence is checked by
/// id, not by a color scan.
#[derive(Debug, Copy, Clone, Default)]
pub struct WinChecker;

impl WinChecker {
    /// Whether the game is over.
    pub fn is_win(&self, roster: &Roster) -> bool {
        roster.by_id(PieceId::white_king()).is_none()
            || roster.by_id(PieceId::black_king()).is_none()
    }

    /// The outcome to announce.
    ///
    /// The player whose king still stands wins; with both kings present this
    /// falls back to a generic game over.
    pub fn outcome(&self, roster: &Roster) -> Outcome {
        let white = roster.by_id(PieceId::white_king()).is_some();
        let black = roster.by_id(PieceId::black_king()).is_some();

        match (white, black) {
            (true, false) => Outcome::Victory(Color::White),
            (false, true) => Outcome::Victory(Color::Black),
            _ => Outcome::GameOver,
        }
    }
}
