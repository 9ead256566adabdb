use crate::chess::{Cell, MoveKind, MoveTables, PieceId, Role};
use crate::game::{Command, Player, Roster};
use tracing::{debug, instrument, warn};

/// The move legality engine.
///
/// Decides whether a proposed (piece, destination) pair is legal given the
/// piece kind's move table, path obstruction and the pawn special cases, and
/// computes the effective destination. Reads the roster, never mutates it.
#[derive(Debug, Clone)]
pub struct Rules {
    tables: MoveTables,
}

impl Rules {
    /// Constructs [`Rules`] over the given move tables.
    pub fn new(tables: MoveTables) -> Self {
        Rules { tables }
    }

    /// Whether moving the piece to `dest` is legal.
    #[instrument(level = "trace", skip(self, roster), ret)]
    pub fn is_valid_move(&self, roster: &Roster, id: PieceId, dest: Cell) -> bool {
        let piece = match roster.by_id(id) {
            Some(p) => p,
            None => return false,
        };

        let from = piece.cell();
        let (dx, dy) = dest.delta(from);
        let is_capture = roster.at_cell_except(dest, id).is_some();

        let table = match self.tables.get(piece.piece()) {
            Some(t) => t,
            None => {
                warn!(%id, "no move table for this piece kind");
                return false;
            }
        };

        let delta_matches = table.deltas().iter().any(|d| {
            if (d.dx, d.dy) != (dx, dy) {
                return false;
            }

            if piece.piece().role() != Role::Pawn {
                return true;
            }

            match d.kind {
                // Positional by design: a pawn on its starting row regains
                // the double step even if it got there by other means.
                MoveKind::FirstMove => from.row() == piece.piece().color().pawn_row(),
                MoveKind::Capture => is_capture,
                MoveKind::NonCapture => !is_capture,
                MoveKind::Unrestricted => true,
            }
        });

        if !delta_matches {
            debug!(%id, %dest, "no matching move table entry");
            return false;
        }

        match self.check_path(roster, id, from, dest) {
            Some(blocker) if blocker != dest => {
                debug!(%id, %dest, %blocker, "path blocked short of the destination");
                false
            }
            _ => true,
        }
    }

    /// The first occupied cell strictly between `from` and `to`, if any.
    ///
    /// Knights never block; neither do kings moving at most one cell per
    /// axis. A blocker equal to `to` itself is reported, since the move may
    /// still legally end there.
    pub fn check_path(&self, roster: &Roster, id: PieceId, from: Cell, to: Cell) -> Option<Cell> {
        let (dx, dy) = to.delta(from);

        match roster.by_id(id)?.piece().role() {
            Role::Knight => return None,
            Role::King if dx.abs() <= 1 && dy.abs() <= 1 => return None,
            _ => {}
        }

        let (sx, sy) = (dx.signum(), dy.signum());
        let mut cursor = from;

        loop {
            cursor = cursor.offset(sx, sy)?;
            if let Some(blocker) = roster.at_cell_except(cursor, id) {
                return Some(blocker.cell());
            }

            if cursor == to {
                return None;
            }
        }
    }

    /// Validates a proposed move and builds the [`Command::Move`] for it.
    ///
    /// The effective destination is redirected to the first path blocker, so
    /// a slider travels only as far as the obstruction and captures it if
    /// hostile. Returns [`None`] for any illegal proposal; rejection is
    /// silent and mutates nothing.
    #[instrument(level = "debug", skip(self, roster))]
    pub fn propose(
        &self,
        roster: &Roster,
        id: PieceId,
        dest: Cell,
        player: Player,
        now: u64,
    ) -> Option<Command> {
        if !self.is_valid_move(roster, id, dest) {
            debug!(%id, %dest, "invalid move");
            return None;
        }

        let from = roster.by_id(id)?.cell();
        let target = self.check_path(roster, id, from, dest).unwrap_or(dest);

        let captured = match roster.at_cell_except(target, id) {
            Some(other) if Player::of(other.piece().color()) == player => {
                debug!(%id, other = %other.id(), "cannot capture own piece");
                return None;
            }
            Some(other) => Some(other.id()),
            None => None,
        };

        Some(Command::Move {
            at: now,
            piece: id,
            source: from,
            target,
            captured,
        })
    }
}

impl Default for Rules {
    /// Constructs [`Rules`] over the built-in move tables.
    fn default() -> Self {
        Rules::new(MoveTables::builtin().expect("built-in move tables parse"))
    }
}
