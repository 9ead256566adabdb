/// Chess domain types.
pub mod chess;
/// The piece motion and move legality engine.
pub mod game;
/// Assorted utilities.
pub mod util;
