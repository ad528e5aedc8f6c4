//! Pieces and their positions along a player's path.

use serde::{Deserialize, Serialize};

use super::player::PlayerId;
use crate::board::MAX_PATH_INDEX;

/// Number of pieces per player.
pub const PIECES_PER_PLAYER: usize = 4;

/// Stable piece identifier: owner seat plus ordinal 0-3.
///
/// Pieces are owned by one player for their entire lifetime and are never
/// reassigned.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PieceId {
    /// Owning seat.
    pub owner: PlayerId,
    /// Ordinal within the owner's four pieces.
    pub ordinal: u8,
}

impl PieceId {
    /// Create a new piece ID.
    #[must_use]
    pub const fn new(owner: PlayerId, ordinal: u8) -> Self {
        Self { owner, ordinal }
    }
}

impl std::fmt::Display for PieceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}-{}", self.owner.0, self.ordinal)
    }
}

/// Where a piece is along its owner's path.
///
/// `Path(p)` is a progress index `0..=24`; `Path(24)` means the piece has
/// arrived at the center and is finished. There is no separate finished
/// flag - arrival and finish coincide by construction.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Position {
    /// Off the board, waiting to enter.
    #[default]
    Home,
    /// On the path at the given progress index.
    Path(u8),
}

impl Position {
    /// True if the piece is at home (off the board).
    #[must_use]
    pub fn is_home(self) -> bool {
        matches!(self, Position::Home)
    }

    /// The progress index, if on the path.
    #[must_use]
    pub fn progress(self) -> Option<u8> {
        match self {
            Position::Home => None,
            Position::Path(p) => Some(p),
        }
    }

    /// True once the piece has reached the center.
    #[must_use]
    pub fn is_finished(self) -> bool {
        matches!(self, Position::Path(MAX_PATH_INDEX))
    }
}

/// A single game piece.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Piece {
    /// Stable identity.
    pub id: PieceId,
    /// Current position along the owner's path.
    pub position: Position,
}

impl Piece {
    /// Create a piece at home.
    #[must_use]
    pub const fn new(owner: PlayerId, ordinal: u8) -> Self {
        Self {
            id: PieceId::new(owner, ordinal),
            position: Position::Home,
        }
    }

    /// True once the piece has reached the center.
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.position.is_finished()
    }

    /// Remaining steps to the center, if the piece is on the path.
    #[must_use]
    pub fn distance_to_center(&self) -> Option<u8> {
        self.position.progress().map(|p| MAX_PATH_INDEX - p)
    }
}
