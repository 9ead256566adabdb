use crate::chess::{Board, Piece, PieceId, Role};
use crate::game::{Command, GamePiece, Outcome, Roster, Tempo, WinChecker};
use tracing::{debug, info, instrument, warn};

/// What an arrival resolution did to the roster.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Default)]
pub struct ArrivalOutcome {
    /// The pawn that promoted and the queen that replaced it.
    pub promoted: Option<(PieceId, PieceId)>,
    /// The enemy piece removed from the arrival cell.
    pub captured: Option<PieceId>,
    /// The announcement, if the capture decided the game.
    pub outcome: Option<Outcome>,
}

/// The arrival resolver.
///
/// Consumes [`Command::Arrived`] events: promotes pawns on their far rank,
/// removes a captured enemy occupant and checks the win condition. Arriving
/// at an empty cell is a valid no-op, never an error.
#[derive(Debug, Copy, Clone)]
pub struct Resolver {
    board: Board,
    tempo: Tempo,
    win: WinChecker,
}

impl Resolver {
    /// Constructs [`Resolver`]; promotion queens inherit `board` and `tempo`.
    pub fn new(board: Board, tempo: Tempo) -> Self {
        Resolver {
            board,
            tempo,
            win: WinChecker,
        }
    }

    /// Resolves one arrival against the roster.
    #[instrument(level = "debug", skip(self, roster))]
    pub fn resolve(&self, roster: &mut Roster, cmd: &Command) -> ArrivalOutcome {
        let mut resolution = ArrivalOutcome::default();

        let (id, at) = match *cmd {
            Command::Arrived { piece, at, .. } => (piece, at),
            _ => {
                warn!(%cmd, "resolver fed a command that is not an arrival");
                return resolution;
            }
        };

        let cell = match roster.by_id(id) {
            Some(p) => p.cell(),
            None => {
                warn!(%id, "arriving piece is no longer in play");
                return resolution;
            }
        };

        // Promotion replaces the pawn before capture detection runs, so the
        // queen is the piece that captures whatever shared the cell.
        let mut arrived = id;
        if id.role() == Role::Pawn && cell.row() == id.color().promotion_row() {
            let queen = Piece::new(Role::Queen, id.color());
            let promoted = PieceId::new(queen, roster.next_index(queen));

            roster.remove(id);
            let mut piece = GamePiece::new(promoted, cell, self.board, self.tempo);
            piece.settle(at);
            roster.push(piece);

            info!(pawn = %id, queen = %promoted, %cell, "pawn promoted");
            resolution.promoted = Some((id, promoted));
            arrived = promoted;
        }

        if let Some(victim) = roster.at_cell_except(cell, arrived).map(GamePiece::id) {
            if victim.color() != arrived.color() {
                roster.remove(victim);
                info!(%victim, by = %arrived, %cell, "piece captured");
                resolution.captured = Some(victim);

                if self.win.is_win(roster) {
                    resolution.outcome = Some(self.win.outcome(roster));
                }
            }
        } else {
            debug!(%arrived, %cell, "arrived at an empty cell");
        }

        debug_assert!(roster.is_settled(), "two pieces share a cell after resolution");
        resolution
    }
}
