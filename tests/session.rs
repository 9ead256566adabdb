use lib::chess::{Board, Cell, Color, PieceId};
use lib::game::{
    GamePiece, Notification, Observer, Outcome, Player, Roster, Session, SessionOptions, Tempo,
};
use std::sync::mpsc::{channel, Sender};
use test_strategy::proptest;

struct Tap(Sender<Notification>);

impl Observer for Tap {
    fn notify(&mut self, n: &Notification) {
        let _ = self.0.send(*n);
    }
}

/// Ticks at a 16ms cadence until `until` or the game is decided.
fn run(session: &mut Session, from: u64, until: u64) {
    let mut now = from;
    while now < until && !session.is_over() {
        now = (now + 16).min(until);
        session.tick(now);
    }
}

#[proptest(cases = 1)]
fn a_match_from_the_standard_layout_runs_to_a_decision() {
    let mut session = Session::new(SessionOptions::default());
    let (tx, rx) = channel();
    session.subscribe(Box::new(Tap(tx)));

    let pawn: PieceId = "PW4".parse()?;
    let queen: PieceId = "QW0".parse()?;

    // Both sides open with pawn double steps in the same tick.
    assert!(session.propose(pawn, "4,4".parse()?, Player::One, 0));
    assert!(session.propose("PB4".parse()?, "4,3".parse()?, Player::Two, 0));

    // A piece in motion takes no further orders.
    session.tick(16);
    assert!(!session.propose(pawn, "4,3".parse()?, Player::One, 500));

    // Nor does a piece of the other color.
    assert!(!session.propose(queen, "7,3".parse()?, Player::Two, 500));

    run(&mut session, 16, 1100);
    assert_eq!(session.roster().by_id(pawn).unwrap().cell(), "4,4".parse()?);

    // The queen raids along the diagonal the pawn just cleared.
    assert!(session.propose(queen, "7,3".parse()?, Player::One, 1100));
    run(&mut session, 1100, 9000);

    assert!(session.propose(queen, "7,1".parse()?, Player::One, 9008));
    run(&mut session, 9008, 15100);

    assert!(session.propose(queen, "6,0".parse()?, Player::One, 15104));
    run(&mut session, 15104, 20900);

    assert!(session.propose(queen, "5,0".parse()?, Player::One, 20912));
    run(&mut session, 20912, 26500);

    assert!(session.propose(queen, "4,0".parse()?, Player::One, 26512));
    run(&mut session, 26512, 30000);

    assert_eq!(session.outcome(), Some(Outcome::Victory(Color::White)));
    assert_eq!(session.roster().by_id(PieceId::black_king()), None);

    // The decided game takes no further proposals.
    assert!(!session.propose(queen, "4,1".parse()?, Player::One, 35000));

    let captured: Vec<_> = rx
        .try_iter()
        .filter_map(|n| match n {
            Notification::Captured { piece, .. } => Some(piece.to_string()),
            _ => None,
        })
        .collect();

    assert_eq!(captured, ["PB7", "NB1", "BB1", "KB0"]);
}

#[proptest(cases = 1)]
fn a_pawn_walks_to_promotion_and_the_queen_ends_the_game() {
    let board = Board::default();
    let tempo = Tempo::default();

    let mut roster = Roster::empty();
    for (id, cell) in [("KW0", "4,7"), ("KB0", "0,0"), ("PW2", "2,6")] {
        roster.push(GamePiece::new(
            id.parse()?,
            cell.parse::<Cell>()?,
            board,
            tempo,
        ));
    }

    let mut session = Session::with_roster(SessionOptions::default(), roster);
    let (tx, rx) = channel();
    session.subscribe(Box::new(Tap(tx)));

    let pawn: PieceId = "PW2".parse()?;

    assert!(session.propose(pawn, "2,4".parse()?, Player::One, 0));
    run(&mut session, 0, 6100);

    for (at, target) in [(6100, "2,3"), (11700, "2,2"), (17300, "2,1")] {
        assert!(session.propose(pawn, target.parse()?, Player::One, at));
        run(&mut session, at, at + 5600);
    }

    // The last step lands on the far rank and promotes.
    assert!(session.propose(pawn, "2,0".parse()?, Player::One, 22900));
    run(&mut session, 22900, 28500);

    let queen: PieceId = "QW0".parse()?;
    assert_eq!(session.roster().by_id(pawn), None);
    assert_eq!(session.roster().by_id(queen).unwrap().cell(), "2,0".parse()?);

    assert!(rx.try_iter().any(|n| matches!(
        n,
        Notification::Promoted { pawn: p, queen: q } if p == pawn && q == queen
    )));

    assert!(session.propose(queen, "0,0".parse()?, Player::One, 28500));
    run(&mut session, 28500, 32000);

    assert_eq!(session.outcome(), Some(Outcome::Victory(Color::White)));
}
