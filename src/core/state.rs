//! Game state: players, pieces, and the move history.
//!
//! `GameState` is a value: operations that change the game build a new
//! state from the previous one rather than mutating shared data. The move
//! history uses an `im::Vector` so snapshots stay cheap to clone.

use im::Vector;
use serde::{Deserialize, Serialize};

use super::piece::{Piece, PieceId, Position, PIECES_PER_PLAYER};
use super::player::PlayerId;
use crate::board::{self, BoardType, SEAT_COUNT};

/// Player configuration supplied at game start.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerSetup {
    /// Display name.
    pub name: String,
    /// Cosmetic token style (presentation only; the engine never reads it).
    pub token_style: String,
}

impl PlayerSetup {
    /// Convenience constructor.
    #[must_use]
    pub fn new(name: impl Into<String>, token_style: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            token_style: token_style.into(),
        }
    }
}

/// A seated player and their four pieces.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    /// Seat identity; also selects the path table.
    pub id: PlayerId,
    /// Display name.
    pub name: String,
    /// Cosmetic token style.
    pub token_style: String,
    /// The player's four pieces.
    pub pieces: [Piece; PIECES_PER_PLAYER],
    /// Golden Rule flag: set the first time this player captures an
    /// opponent, unlocking the inner spiral past the outer loop.
    pub has_first_kill: bool,
    /// Finish placement, assigned once all four pieces reach the center.
    /// Ranks are 1-based, strictly increasing in finish order, permanent.
    pub rank: Option<u8>,
}

impl Player {
    fn new(id: PlayerId, setup: PlayerSetup) -> Self {
        Self {
            id,
            name: setup.name,
            token_style: setup.token_style,
            pieces: std::array::from_fn(|i| Piece::new(id, i as u8)),
            has_first_kill: false,
            rank: None,
        }
    }

    /// Get a piece by ordinal.
    #[must_use]
    pub fn piece(&self, ordinal: u8) -> &Piece {
        &self.pieces[ordinal as usize]
    }

    /// True once all four pieces have reached the center.
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.pieces.iter().all(Piece::is_finished)
    }
}

/// One executed move, recorded for replay and debugging.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveRecord {
    /// The moving player.
    pub player: PlayerId,
    /// The piece that moved.
    pub piece: PieceId,
    /// Points spent (4 for entry, even off an 8-roll).
    pub points: u8,
    /// Position before the move.
    pub from: Position,
    /// Progress index after the move.
    pub to: u8,
    /// Opponent piece sent home, if any.
    pub capture: Option<PieceId>,
}

/// Complete state of one game.
///
/// Seats are assigned in listed order: the k-th player uses path table k.
/// The state is never mutated in place by engine operations; see
/// [`crate::rules::execute_move`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameState {
    players: Vec<Player>,
    /// Whose turn is active.
    pub current_turn: PlayerId,
    /// Points of the roll awaiting consumption, if any. At most one roll
    /// is live at a time.
    pub pending_points: Option<u8>,
    /// Selected board variant.
    pub board: BoardType,
    /// Executed moves, oldest first.
    pub history: Vector<MoveRecord>,
}

impl GameState {
    /// Create a fresh game: all pieces at home, no ranks, first listed
    /// player to move.
    ///
    /// Panics unless 2-4 players are given; the session layer validates
    /// counts before construction.
    #[must_use]
    pub fn new(setups: Vec<PlayerSetup>, board: BoardType) -> Self {
        assert!(
            (2..=SEAT_COUNT).contains(&setups.len()),
            "a game needs 2 to 4 players"
        );

        let players = setups
            .into_iter()
            .enumerate()
            .map(|(i, setup)| Player::new(PlayerId::new(i as u8), setup))
            .collect();

        Self {
            players,
            current_turn: PlayerId::new(0),
            pending_points: None,
            board,
            history: Vector::new(),
        }
    }

    /// Number of seated players.
    #[must_use]
    pub fn player_count(&self) -> usize {
        self.players.len()
    }

    /// All seated players in seat order.
    #[must_use]
    pub fn players(&self) -> &[Player] {
        &self.players
    }

    /// Get a player by seat.
    #[must_use]
    pub fn player(&self, id: PlayerId) -> &Player {
        &self.players[id.index()]
    }

    /// Get a mutable player by seat.
    pub(crate) fn player_mut(&mut self, id: PlayerId) -> &mut Player {
        &mut self.players[id.index()]
    }

    /// The player whose turn is active.
    #[must_use]
    pub fn current_player(&self) -> &Player {
        self.player(self.current_turn)
    }

    /// Look up a piece by ID.
    #[must_use]
    pub fn piece(&self, id: PieceId) -> &Piece {
        self.player(id.owner).piece(id.ordinal)
    }

    pub(crate) fn piece_mut(&mut self, id: PieceId) -> &mut Piece {
        &mut self.player_mut(id.owner).pieces[id.ordinal as usize]
    }

    /// True if the ID names a seated player's piece.
    #[must_use]
    pub fn contains_piece(&self, id: PieceId) -> bool {
        id.owner.index() < self.players.len() && (id.ordinal as usize) < PIECES_PER_PLAYER
    }

    /// The physical square a piece stands on, if it is on the board.
    #[must_use]
    pub fn square_of(&self, piece: &Piece) -> Option<u8> {
        piece
            .position
            .progress()
            .map(|p| board::square_at(piece.id.owner, p))
    }

    /// Number of players with an assigned rank.
    #[must_use]
    pub fn ranked_count(&self) -> usize {
        self.players.iter().filter(|p| p.rank.is_some()).count()
    }

    /// Highest rank assigned so far (0 if none).
    #[must_use]
    pub fn max_rank(&self) -> u8 {
        self.players.iter().filter_map(|p| p.rank).max().unwrap_or(0)
    }
}
