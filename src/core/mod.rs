//! Core data model: player and piece identities, game state, RNG.

mod piece;
mod player;
mod rng;
mod state;

pub use piece::{Piece, PieceId, Position, PIECES_PER_PLAYER};
pub use player::{PlayerId, PlayerMap};
pub use rng::{GameRng, GameRngState};
pub use state::{GameState, MoveRecord, Player, PlayerSetup};
