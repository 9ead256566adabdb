use crate::chess::{Board, Cell, PieceId};
use crate::game::{
    Command, Lifecycle, Notification, Observer, Outcome, Player, Resolver, Roster, Rules,
    SessionOptions, Tempo,
};
use std::collections::VecDeque;
use tracing::{debug, info, warn};

/// A running game.
///
/// Owns the roster, both command queues and the game-over flag. Everything
/// runs on one thread; each [`tick`][`Session::tick`] advances motion, drains
/// the inbound queue into the piece state machines and drains the arrival
/// queue into the resolver, in that order.
pub struct Session {
    rules: Rules,
    resolver: Resolver,
    roster: Roster,
    inbound: VecDeque<Command>,
    arrivals: VecDeque<Command>,
    observers: Vec<Box<dyn Observer>>,
    outcome: Option<Outcome>,
}

impl Session {
    /// Starts a standard game under the given options.
    pub fn new(options: SessionOptions) -> Self {
        let board = Board::default();
        let tempo = Tempo::from(options);
        Session::with_roster(options, Roster::standard(board, tempo))
    }

    /// Starts a game from an arbitrary roster.
    pub fn with_roster(options: SessionOptions, roster: Roster) -> Self {
        let board = Board::default();
        let tempo = Tempo::from(options);

        Session {
            rules: Rules::default(),
            resolver: Resolver::new(board, tempo),
            roster,
            inbound: VecDeque::new(),
            arrivals: VecDeque::new(),
            observers: Vec::new(),
            outcome: None,
        }
    }

    /// Registers an observer of accepted commands and game events.
    pub fn subscribe(&mut self, observer: Box<dyn Observer>) {
        self.observers.push(observer);
    }

    /// The pieces in play.
    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    /// The announced outcome, once the game is decided.
    pub fn outcome(&self) -> Option<Outcome> {
        self.outcome
    }

    /// Whether the game is over.
    pub fn is_over(&self) -> bool {
        self.outcome.is_some()
    }

    /// Whether every piece is idle and both queues are drained.
    pub fn is_idle(&self) -> bool {
        self.inbound.is_empty()
            && self.arrivals.is_empty()
            && self.roster.iter().all(|p| p.lifecycle() == Lifecycle::Idle)
    }

    /// Enqueues a command for the next tick.
    pub fn submit(&mut self, cmd: Command) {
        if self.is_over() {
            debug!(%cmd, "game is over, dropping command");
        } else {
            self.inbound.push_back(cmd);
        }
    }

    /// Validates a proposed move and enqueues it if legal.
    ///
    /// Returns whether the proposal was enqueued. The requesting player may
    /// only move pieces of their own color; beyond that there is no turn
    /// enforcement, both players submit whenever they want.
    pub fn propose(&mut self, id: PieceId, dest: Cell, player: Player, now: u64) -> bool {
        if self.is_over() {
            return false;
        }

        if Player::of(id.color()) != player {
            debug!(%id, %player, "piece belongs to the other player");
            return false;
        }

        match self.roster.by_id(id) {
            Some(piece) if !piece.is_available(now) => {
                debug!(%id, lifecycle = %piece.lifecycle(), "piece is not available");
                return false;
            }
            _ => {}
        }

        match self.rules.propose(&self.roster, id, dest, player, now) {
            Some(cmd) => {
                self.submit(cmd);
                true
            }
            None => false,
        }
    }

    /// Enqueues a jump to the piece's own cell.
    ///
    /// The deselection animation; resolves instantly but still runs the
    /// short cooldown.
    pub fn jump_in_place(&mut self, id: PieceId, now: u64) -> bool {
        if self.is_over() {
            return false;
        }

        match self.roster.by_id(id) {
            Some(piece) if piece.is_available(now) => {
                let target = piece.cell();
                self.submit(Command::Jump {
                    at: now,
                    piece: id,
                    target,
                });
                true
            }

            Some(piece) => {
                debug!(%id, lifecycle = %piece.lifecycle(), "piece is not available");
                false
            }

            None => false,
        }
    }

    /// Advances the game to `now`.
    pub fn tick(&mut self, now: u64) {
        let mut notices = Vec::new();

        for piece in self.roster.iter_mut() {
            let before = piece.lifecycle();
            if let Some(arrival) = piece.update(now) {
                self.arrivals.push_back(arrival);
            }

            if piece.lifecycle() != before {
                notices.push(Notification::Transition {
                    piece: piece.id(),
                    lifecycle: piece.lifecycle(),
                });
            }
        }

        while let Some(cmd) = self.inbound.pop_front() {
            let piece = match self.roster.by_id_mut(cmd.piece()) {
                Some(piece) => piece,
                None => {
                    warn!(%cmd, "command addresses a piece that is not in play");
                    continue;
                }
            };

            let before = piece.lifecycle();
            if piece.process_command(&cmd) {
                let lifecycle = piece.lifecycle();
                notices.push(Notification::Accepted(cmd));

                if lifecycle != before {
                    notices.push(Notification::Transition {
                        piece: cmd.piece(),
                        lifecycle,
                    });
                }
            }
        }

        while let Some(cmd) = self.arrivals.pop_front() {
            let resolution = self.resolver.resolve(&mut self.roster, &cmd);
            let by = resolution.promoted.map_or(cmd.piece(), |(_, queen)| queen);

            if let Some((pawn, queen)) = resolution.promoted {
                notices.push(Notification::Promoted { pawn, queen });
            }

            if let Some(piece) = resolution.captured {
                notices.push(Notification::Captured { piece, by });
            }

            if let Some(outcome) = resolution.outcome {
                if self.outcome.is_none() {
                    self.outcome = Some(outcome);
                    info!(%outcome, "game over");
                    notices.push(Notification::GameOver(outcome));
                }
            }
        }

        for notice in notices {
            for observer in self.observers.iter_mut() {
                observer.notify(&notice);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chess::Color;
    use crate::game::{GamePiece, MockObserver};
    use std::sync::mpsc::{channel, Sender};

    fn cell(col: u8, row: u8) -> Cell {
        Cell::new(col, row).unwrap()
    }

    fn roster(pieces: &[(&str, (u8, u8))]) -> Roster {
        let mut roster = Roster::empty();
        for (id, (col, row)) in pieces {
            roster.push(GamePiece::new(
                id.parse().unwrap(),
                cell(*col, *row),
                Board::default(),
                Tempo::default(),
            ));
        }
        roster
    }

    fn session(pieces: &[(&str, (u8, u8))]) -> Session {
        Session::with_roster(SessionOptions::default(), roster(pieces))
    }

    /// Ticks at a 16ms cadence until `until`.
    fn run(session: &mut Session, from: u64, until: u64) {
        let mut now = from;
        while now < until {
            now = (now + 16).min(until);
            session.tick(now);
        }
    }

    struct Tap(Sender<Notification>);

    impl Observer for Tap {
        fn notify(&mut self, n: &Notification) {
            self.0.send(*n).unwrap();
        }
    }

    #[test]
    fn accepted_moves_are_observed_exactly_once() {
        let mut s = session(&[("KW0", (4, 7)), ("KB0", (4, 0)), ("RW0", (0, 7))]);
        let (tx, rx) = channel();
        s.subscribe(Box::new(Tap(tx)));

        let id: PieceId = "RW0".parse().unwrap();
        assert!(s.propose(id, cell(0, 5), Player::One, 0));
        s.tick(16);

        let accepted: Vec<_> = rx
            .try_iter()
            .filter(|n| matches!(n, Notification::Accepted(_)))
            .collect();

        assert_eq!(
            accepted,
            [Notification::Accepted(Command::Move {
                at: 0,
                piece: id,
                source: cell(0, 7),
                target: cell(0, 5),
                captured: None,
            })]
        );
    }

    #[test]
    fn rejected_proposals_are_never_observed() {
        let mut s = session(&[("KW0", (4, 7)), ("KB0", (4, 0)), ("RW0", (0, 7))]);

        let mut observer = MockObserver::new();
        observer.expect_notify().never();
        s.subscribe(Box::new(observer));

        let id: PieceId = "RW0".parse().unwrap();
        assert!(!s.propose(id, cell(5, 3), Player::One, 0));
        assert!(!s.propose(id, cell(0, 5), Player::Two, 0));
        s.tick(16);
    }

    #[test]
    fn a_move_runs_to_arrival_and_the_long_rest() {
        let mut s = session(&[("KW0", (4, 7)), ("KB0", (4, 0)), ("RW0", (0, 7))]);
        let id: PieceId = "RW0".parse().unwrap();

        assert!(s.propose(id, cell(0, 4), Player::One, 0));
        run(&mut s, 0, 1600);

        let piece = s.roster().by_id(id).unwrap();
        assert_eq!(piece.cell(), cell(0, 4));
        assert!(piece.lifecycle().resting_since().is_some());
    }

    #[test]
    fn capture_and_win_flow_through_the_queues() {
        let mut s = session(&[("KW0", (4, 7)), ("KB0", (4, 0)), ("RW0", (4, 4))]);
        let (tx, rx) = channel();
        s.subscribe(Box::new(Tap(tx)));

        // Rook takes the black king: 4 cells at 2 cells/s.
        assert!(s.propose("RW0".parse().unwrap(), cell(4, 0), Player::One, 0));
        run(&mut s, 0, 2100);

        assert_eq!(s.outcome(), Some(Outcome::Victory(Color::White)));
        assert!(s.is_over());
        assert_eq!(s.roster().by_id(PieceId::black_king()), None);

        let game_overs = rx
            .try_iter()
            .filter(|n| matches!(n, Notification::GameOver(_)))
            .count();
        assert_eq!(game_overs, 1);
    }

    #[test]
    fn no_commands_are_accepted_after_the_game_ends() {
        let mut s = session(&[("KW0", (4, 7)), ("KB0", (4, 0)), ("RW0", (4, 4))]);
        assert!(s.propose("RW0".parse().unwrap(), cell(4, 0), Player::One, 0));
        run(&mut s, 0, 2100);
        assert!(s.is_over());

        assert!(!s.propose(PieceId::white_king(), cell(4, 6), Player::One, 2200));
        assert!(!s.jump_in_place(PieceId::white_king(), 2200));
    }

    #[test]
    fn jump_in_place_runs_the_short_cooldown() {
        let mut s = session(&[("KW0", (4, 7)), ("KB0", (4, 0)), ("NW0", (1, 7))]);
        let id: PieceId = "NW0".parse().unwrap();

        assert!(s.jump_in_place(id, 0));
        run(&mut s, 0, 48);

        let piece = s.roster().by_id(id).unwrap();
        assert_eq!(piece.cell(), cell(1, 7));
        assert_eq!(
            piece.lifecycle().rest_required_ms(&Tempo::default()),
            Some(2000)
        );

        // Still cooling down.
        assert!(!s.propose(id, cell(2, 5), Player::One, 1000));
        assert!(!s.jump_in_place(id, 1000));

        run(&mut s, 48, 2100);
        assert!(s.propose(id, cell(2, 5), Player::One, 2100));
    }

    #[test]
    fn concurrent_proposals_resolve_in_submission_order() {
        let mut s = session(&[
            ("KW0", (4, 7)),
            ("KB0", (4, 0)),
            ("RW0", (0, 7)),
            ("RB0", (7, 0)),
        ]);

        // Both players command their rooks in the same tick.
        assert!(s.propose("RW0".parse().unwrap(), cell(0, 5), Player::One, 0));
        assert!(s.propose("RB0".parse().unwrap(), cell(7, 2), Player::Two, 0));
        run(&mut s, 0, 1100);

        assert_eq!(s.roster().by_id("RW0".parse().unwrap()).unwrap().cell(), cell(0, 5));
        assert_eq!(s.roster().by_id("RB0".parse().unwrap()).unwrap().cell(), cell(7, 2));
    }

    #[test]
    fn promotion_is_announced_through_the_observer_seam() {
        let mut s = session(&[("KW0", (4, 7)), ("KB0", (4, 0)), ("PW3", (2, 1))]);
        let (tx, rx) = channel();
        s.subscribe(Box::new(Tap(tx)));

        assert!(s.propose("PW3".parse().unwrap(), cell(2, 0), Player::One, 0));
        run(&mut s, 0, 600);

        assert!(rx.try_iter().any(|n| matches!(
            n,
            Notification::Promoted { queen, .. } if queen == "QW0".parse().unwrap()
        )));
        assert_eq!(s.roster().by_id("PW3".parse().unwrap()), None);
    }
}
