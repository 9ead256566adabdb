use async_trait::async_trait;
use derive_more::{Display, Error};
use lib::chess::{Cell, PieceId};
use lib::game::Player;
use std::str::FromStr;
use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin as TokioStdin};
use tracing::warn;

/// A player's request to move one of their pieces.
///
/// The wire format is `<player> <piece-id> <col>,<row>`, e.g. `1 PW4 4,4`.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct Intent {
    pub player: Player,
    pub piece: PieceId,
    pub target: Cell,
}

/// The reason why parsing [`Intent`] failed.
#[derive(Debug, Display, Clone, Eq, PartialEq, Error)]
#[display(fmt = "failed to parse intent")]
pub struct ParseIntentError;

impl FromStr for Intent {
    type Err = ParseIntentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut tokens = s.split_whitespace();

        let player = tokens
            .next()
            .ok_or(ParseIntentError)?
            .parse()
            .map_err(|_| ParseIntentError)?;

        let piece = tokens
            .next()
            .ok_or(ParseIntentError)?
            .parse()
            .map_err(|_| ParseIntentError)?;

        let target = tokens
            .next()
            .ok_or(ParseIntentError)?
            .parse()
            .map_err(|_| ParseIntentError)?;

        match tokens.next() {
            None => Ok(Intent {
                player,
                piece,
                target,
            }),
            Some(_) => Err(ParseIntentError),
        }
    }
}

/// Trait for types that produce move intents.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Source {
    /// The next intent, or [`None`] once exhausted.
    async fn next(&mut self) -> Option<Intent>;
}

/// Reads whitespace-separated intents from the standard input.
pub struct Console {
    lines: Lines<BufReader<TokioStdin>>,
}

impl Console {
    pub fn new() -> Self {
        Console {
            lines: BufReader::new(tokio::io::stdin()).lines(),
        }
    }
}

#[async_trait]
impl Source for Console {
    async fn next(&mut self) -> Option<Intent> {
        loop {
            let line = self.lines.next_line().await.ok()??;
            if line.trim().is_empty() {
                continue;
            }

            match line.parse() {
                Ok(intent) => return Some(intent),
                Err(_) => warn!(%line, "ignoring malformed intent"),
            }
        }
    }
}
