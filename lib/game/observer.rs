use crate::chess::PieceId;
use crate::game::{Command, Lifecycle, Outcome};

/// A notification emitted by the core to its observers.
///
/// Score keeping, move history and sound effects all hang off this seam;
/// none of them are part of the core.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
#[cfg_attr(test, derive(test_strategy::Arbitrary))]
pub enum Notification {
    /// A command was accepted and executed.
    ///
    /// Emitted exactly once per accepted command, never for rejected ones.
    Accepted(Command),

    /// A piece's lifecycle phase changed.
    Transition { piece: PieceId, lifecycle: Lifecycle },

    /// `by` captured `piece`.
    Captured { piece: PieceId, by: PieceId },

    /// `pawn` left the roster and `queen` took its cell.
    Promoted { pawn: PieceId, queen: PieceId },

    /// The game ended; emitted at most once per game.
    GameOver(Outcome),
}

/// Trait for types that react to core notifications.
#[cfg_attr(test, mockall::automock)]
pub trait Observer {
    /// Reacts to a notification.
    fn notify(&mut self, notification: &Notification);
}

/// An observer that records every notification it hears.
#[derive(Debug, Clone, Default)]
pub struct Recorder {
    log: Vec<Notification>,
}

impl Recorder {
    /// Constructs an empty [`Recorder`].
    pub fn new() -> Self {
        Recorder::default()
    }

    /// Every notification heard so far.
    pub fn log(&self) -> &[Notification] {
        &self.log
    }

    /// The accepted move commands heard so far, in order.
    pub fn moves(&self) -> impl Iterator<Item = &Command> {
        self.log.iter().filter_map(|n| match n {
            Notification::Accepted(cmd @ Command::Move { .. }) => Some(cmd),
            _ => None,
        })
    }
}

impl Observer for Recorder {
    fn notify(&mut self, notification: &Notification) {
        self.log.push(*notification);
    }
}
