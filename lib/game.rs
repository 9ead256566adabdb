mod arrival;
mod command;
mod lifecycle;
mod motion;
mod observer;
mod options;
mod piece;
mod player;
mod roster;
mod rules;
mod session;
mod win;

pub use arrival::*;
pub use command::*;
pub use lifecycle::*;
pub use motion::*;
pub use observer::*;
pub use options::*;
pub use piece::*;
pub use player::*;
pub use roster::*;
pub use rules::*;
pub use session::*;
pub use win::*;
