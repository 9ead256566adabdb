use crate::chess::{Board, Cell, Piece, PieceId};
use crate::game::{Command, Event, Lifecycle, Motion, Tempo};
use tracing::debug;

/// A piece in play: its identity, lifecycle and motion state.
///
/// Every roster member always has a concrete [`Motion`]; position is an
/// invariant of membership, never an optional lookup.
#[derive(Debug, Clone, PartialEq)]
pub struct GamePiece {
    id: PieceId,
    lifecycle: Lifecycle,
    motion: Motion,
    tempo: Tempo,
}

impl GamePiece {
    /// Constructs [`GamePiece`] idle on the given cell.
    pub fn new(id: PieceId, cell: Cell, board: Board, tempo: Tempo) -> Self {
        GamePiece {
            id,
            lifecycle: Lifecycle::Idle,
            motion: Motion::new(id, cell, board),
            tempo,
        }
    }

    /// This piece's id.
    #[inline(always)]
    pub fn id(&self) -> PieceId {
        self.id
    }

    /// This piece's role and color.
    #[inline(always)]
    pub fn piece(&self) -> Piece {
        self.id.piece()
    }

    /// This piece's lifecycle phase.
    #[inline(always)]
    pub fn lifecycle(&self) -> Lifecycle {
        self.lifecycle
    }

    /// The cell this piece occupies.
    #[inline(always)]
    pub fn cell(&self) -> Cell {
        self.motion.cell()
    }

    /// This piece's motion state.
    #[inline(always)]
    pub fn motion(&self) -> &Motion {
        &self.motion
    }

    /// Whether this piece can accept a move or jump at `now`.
    #[inline(always)]
    pub fn is_available(&self, now: u64) -> bool {
        !self.lifecycle.rejects_motion(now, &self.tempo)
    }

    /// Forces this piece into the long rest, as if it had just arrived.
    ///
    /// A queen created by promotion starts under the same cooldown as any
    /// other piece that just completed a move.
    pub fn settle(&mut self, now: u64) {
        self.lifecycle = Lifecycle::RestingLong { since: now };
    }

    /// Gates a command by the lifecycle and delegates it to the motion
    /// engine.
    ///
    /// Returns whether the command was accepted; a rejected command leaves
    /// the piece untouched and must not be surfaced to observers.
    pub fn process_command(&mut self, cmd: &Command) -> bool {
        debug_assert_eq!(cmd.piece(), self.id);

        match cmd {
            Command::Move { .. } | Command::Jump { .. }
                if self.lifecycle.rejects_motion(cmd.at(), &self.tempo) =>
            {
                debug!(piece = %self.id, lifecycle = %self.lifecycle, "rejecting {cmd}");
                false
            }

            Command::Move { .. } => {
                self.motion.reset(cmd, &self.tempo);
                self.lifecycle = Lifecycle::Moving;
                true
            }

            Command::Jump { .. } => {
                self.motion.reset(cmd, &self.tempo);
                self.lifecycle = Lifecycle::Jumping;
                true
            }

            Command::Reset { .. } => {
                self.motion.reset(cmd, &self.tempo);
                self.lifecycle = Lifecycle::Idle;
                true
            }

            Command::Idle { .. }
                if !matches!(self.lifecycle, Lifecycle::Moving | Lifecycle::Jumping) =>
            {
                self.motion.reset(cmd, &self.tempo);
                true
            }

            // An Idle mid-flight would cancel the trajectory and orphan the
            // arrival.
            Command::Idle { .. } => {
                debug!(piece = %self.id, lifecycle = %self.lifecycle, "rejecting {cmd}");
                false
            }

            Command::Arrived { .. } => {
                debug!(piece = %self.id, "ignoring {cmd} addressed to the state machine");
                false
            }
        }
    }

    /// Advances this piece to `now`.
    ///
    /// Self-fires the rest-done transition once the cooldown elapses;
    /// otherwise advances the motion engine and, on arrival, starts the rest
    /// matching the completed motion. The returned [`Command::Arrived`] is
    /// destined for the arrival queue.
    pub fn update(&mut self, now: u64) -> Option<Command> {
        if let Some(since) = self.lifecycle.resting_since() {
            let required = self.lifecycle.rest_required_ms(&self.tempo)?;
            if now.saturating_sub(since) >= required {
                if let Some(next) = self.lifecycle.transition(Event::RestDone, now) {
                    self.lifecycle = next;
                }
            }

            return None;
        }

        let arrived = self.motion.update(now)?;
        match self.lifecycle.transition(Event::Arrived, now) {
            Some(next) => self.lifecycle = next,
            None => debug!(piece = %self.id, lifecycle = %self.lifecycle, "arrival without a motion phase"),
        }

        Some(arrived)
    }
}
