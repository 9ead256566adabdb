use crate::chess::Color;
use derive_more::{Display, Error};
use std::ops::Not;
use std::str::FromStr;

/// One of the two players.
///
/// Player one commands the white pieces, player two the black pieces;
/// ownership is derived from a piece's color, never stored separately.
#[derive(Debug, Display, Copy, Clone, Eq, PartialEq, Hash)]
#[cfg_attr(test, derive(test_strategy::Arbitrary))]
pub enum Player {
    #[display(fmt = "player 1")]
    One,
    #[display(fmt = "player 2")]
    Two,
}

impl Player {
    /// The color of the pieces this player commands.
    #[inline(always)]
    pub fn color(&self) -> Color {
        match self {
            Player::One => Color::White,
            Player::Two => Color::Black,
        }
    }

    /// The player commanding pieces of the given color.
    #[inline(always)]
    pub fn of(color: Color) -> Self {
        match color {
            Color::White => Player::One,
            Color::Black => Player::Two,
        }
    }
}

impl Not for Player {
    type Output = Self;

    fn not(self) -> Self {
        match self {
            Player::One => Player::Two,
            Player::Two => Player::One,
        }
    }
}

/// The reason why parsing [`Player`] failed.
#[derive(Debug, Display, Clone, Eq, PartialEq, Error)]
#[display(fmt = "failed to parse player")]
pub struct ParsePlayerError;

impl FromStr for Player {
    type Err = ParsePlayerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "1" => Ok(Player::One),
            "2" => Ok(Player::Two),
            _ => Err(ParsePlayerError),
        }
    }
}
