//! # ashta-chamma
//!
//! Rules engine for Ashta Chamma, a four-player cross-and-circle race
//! game rolled with four binary-outcome tamarind seeds.
//!
//! ## Design Principles
//!
//! 1. **Deterministic core**: roll generation and move execution are pure
//!    computations; a seeded session replays identically.
//!
//! 2. **Functional state**: every operation builds a new `GameState` from
//!    the previous one. Nothing is mutated in place across capture and
//!    rank side effects.
//!
//! 3. **Policy rejections, not exceptions**: bad inputs (rolling twice,
//!    moving an opponent's piece, illegal moves, acting after game over)
//!    are rejected with typed errors and leave the session unchanged.
//!    Invariant violations are programming defects and panic.
//!
//! ## Modules
//!
//! - `board`: grid topology, per-seat paths, safe zones
//! - `core`: player/piece identities, game state, deterministic RNG
//! - `roll`: seed rolls with adaptive probabilities (pity,
//!   capture-seeking bias, end-game tension)
//! - `rules`: move legality, capture resolution, move execution
//! - `session`: turn/win state machine and the in-process interface

pub mod board;
pub mod core;
pub mod roll;
pub mod rules;
pub mod session;

// Re-export commonly used types
pub use crate::board::{BoardType, MAX_PATH_INDEX};

pub use crate::core::{
    GameRng, GameRngState, GameState, MoveRecord, Piece, PieceId, Player, PlayerId, PlayerMap,
    PlayerSetup, Position,
};

pub use crate::roll::{RollContext, RollOutcome, POINT_VALUES};

pub use crate::rules::{
    can_move, execute_move, find_capture, legal_target, movable_pieces, move_path, MoveOutcome,
};

pub use crate::session::{EngineError, GameOutcome, GameSession, MoveReport, RollReport, TurnPhase};
