mod board;
mod cell;
mod color;
mod id;
mod moves;
mod piece;
mod role;

pub use board::*;
pub use cell::*;
pub use color::*;
pub use id::*;
pub use moves::*;
pub use piece::*;
pub use role::*;
