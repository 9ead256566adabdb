use crate::applet::Tap;
use crate::input::{Console, Intent, Source};
use anyhow::Error as Anyhow;
use clap::Parser;
use lib::game::{Command, Notification, Outcome, Session, SessionOptions};
use lib::util::Clock;
use std::sync::mpsc::channel;
use std::time::Duration;
use tokio::sync::mpsc::{error::TryRecvError, unbounded_channel};
use tokio::time::interval;
use tracing::{info, instrument};

/// A real-time match driven by intents from the standard input.
///
/// Intents are lines of the form `<player> <piece-id> <col>,<row>`. Both
/// players type into the same console; there are no turns, the session
/// arbitrates by cooldowns alone.
#[derive(Debug, Parser)]
#[clap(disable_help_flag = true, disable_version_flag = true)]
pub struct Play {
    /// The session configuration.
    #[clap(short, long, default_value_t)]
    options: SessionOptions,

    /// The tick rate of the session loop.
    #[clap(long, default_value_t = 60)]
    hz: u32,
}

impl Default for Play {
    fn default() -> Self {
        Play {
            options: SessionOptions::default(),
            hz: 60,
        }
    }
}

impl Play {
    #[instrument(level = "trace", skip(self), err)]
    pub async fn execute(self) -> Result<(), Anyhow> {
        let session = Session::new(self.options);
        let (moves, outcome) = Self::run(session, self.hz, Console::new()).await?;

        for cmd in moves {
            println!("{}", cmd);
        }

        match outcome {
            Some(outcome) => println!("{}", outcome),
            None => info!("the input was exhausted before the game was decided"),
        }

        Ok(())
    }

    /// Paces the session against the wall clock until it is decided or the
    /// source runs dry and every piece has come to rest.
    async fn run<S: Source + Send + 'static>(
        mut session: Session,
        hz: u32,
        source: S,
    ) -> Result<(Vec<Command>, Option<Outcome>), Anyhow> {
        let (tap, notifications) = channel();
        session.subscribe(Box::new(Tap(tap)));

        let (tx, mut intents) = unbounded_channel();
        let reader = tokio::spawn(async move {
            let mut source = source;
            while let Some(intent) = source.next().await {
                if tx.send(intent).is_err() {
                    break;
                }
            }
        });

        let clock = Clock::start();
        let mut ticker = interval(Duration::from_secs(1) / hz.max(1));
        let mut exhausted = false;

        while !session.is_over() && !(exhausted && session.is_idle()) {
            ticker.tick().await;
            let now = clock.now_ms();

            loop {
                match intents.try_recv() {
                    Ok(Intent {
                        player,
                        piece,
                        target,
                    }) => {
                        if !session.propose(piece, target, player, now) {
                            info!(%player, %piece, %target, "proposal rejected");
                        }
                    }
                    Err(TryRecvError::Empty) => break,
                    Err(TryRecvError::Disconnected) => {
                        exhausted = true;
                        break;
                    }
                }
            }

            session.tick(now);
        }

        reader.abort();

        let moves = notifications
            .try_iter()
            .filter_map(|n| match n {
                Notification::Accepted(cmd) => Some(cmd),
                _ => None,
            })
            .collect();

        Ok((moves, session.outcome()))
    }
}
