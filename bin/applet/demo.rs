use crate::applet::Tap;
use anyhow::Error as Anyhow;
use clap::Parser;
use lib::chess::PieceId;
use lib::game::{Notification, Player, Session, SessionOptions};
use std::sync::mpsc::channel;
use tracing::{instrument, warn};

/// A scripted queen raid played out in simulated time.
///
/// The schedule is tuned to the default timing policy; each entry fires once
/// the piece it addresses has finished its cooldown.
const SCRIPT: [(u64, &str, &str); 6] = [
    (0, "PW4", "4,4"),
    (1100, "QW0", "7,3"),
    (9000, "QW0", "7,1"),
    (15100, "QW0", "6,0"),
    (20900, "QW0", "5,0"),
    (26500, "QW0", "4,0"),
];

/// Plays a scripted game against simulated timestamps.
#[derive(Debug, Default, Parser)]
#[clap(disable_help_flag = true, disable_version_flag = true)]
pub struct Demo {}

impl Demo {
    #[instrument(level = "trace", skip(self), err)]
    pub async fn execute(self) -> Result<(), Anyhow> {
        let mut session = Session::new(SessionOptions::default());
        let (tap, notifications) = channel();
        session.subscribe(Box::new(Tap(tap)));

        Self::perform(&mut session)?;

        for n in notifications.try_iter() {
            if let Notification::Accepted(cmd) = n {
                println!("{}", cmd);
            }
        }

        match session.outcome() {
            Some(outcome) => println!("{}", outcome),
            None => warn!("the script ran out before the game was decided"),
        }

        Ok(())
    }

    /// Feeds the script into the session at a 16ms tick cadence.
    fn perform(session: &mut Session) -> Result<(), Anyhow> {
        let mut pending = SCRIPT.iter();
        let mut next = pending.next();
        let mut now = 0;

        while !session.is_over() && now <= 40_000 {
            while let Some(&(at, piece, target)) = next {
                if at > now {
                    break;
                }

                let piece: PieceId = piece.parse()?;
                let player = Player::of(piece.color());
                if !session.propose(piece, target.parse()?, player, now) {
                    warn!(%piece, %target, at, "scripted proposal rejected");
                }

                next = pending.next();
            }

            session.tick(now);
            now += 16;
        }

        Ok(())
    }
}
