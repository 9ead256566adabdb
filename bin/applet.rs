use anyhow::Error as Anyhow;
use clap::Subcommand;
use derive_more::From;
use lib::game::{Notification, Observer};
use std::sync::mpsc::Sender;

mod demo;
mod play;

/// Forwards notifications out of the session through a channel.
pub(crate) struct Tap(pub(crate) Sender<Notification>);

impl Observer for Tap {
    fn notify(&mut self, n: &Notification) {
        let _ = self.0.send(*n);
    }
}

#[derive(From, Subcommand)]
pub enum Applet {
    Play(play::Play),
    Demo(demo::Demo),
}

impl Default for Applet {
    fn default() -> Self {
        play::Play::default().into()
    }
}

impl Applet {
    pub async fn execute(self) -> Result<(), Anyhow> {
        match self {
            Applet::Play(a) => Ok(a.execute().await?),
            Applet::Demo(a) => Ok(a.execute().await?),
        }
    }
}
