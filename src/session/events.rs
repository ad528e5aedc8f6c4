//! Observable session outputs: turn phases, roll and move reports.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::core::{PieceId, PlayerId};
use crate::roll::RollOutcome;

/// Where the session is in its turn cycle.
///
/// Move application is synchronous, so there is no externally observable
/// in-progress phase: `select_piece` returns with the move's consequences
/// fully resolved. Presentation pacing happens outside the engine.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TurnPhase {
    /// The active player may roll.
    AwaitingRoll,
    /// A roll is live and must be spent on a piece.
    PendingSelection,
    /// Terminal; no further rolls or moves are accepted.
    GameOver,
}

/// Report returned by a roll request.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RollReport {
    /// The generated roll.
    pub outcome: RollOutcome,
    /// Pieces of the active player that can legally use the roll. When
    /// exactly one is listed the caller may auto-move it; when empty the
    /// roll was consumed with no move.
    pub movable: SmallVec<[PieceId; 4]>,
    /// True if the roll had no legal use and did not grant an extra turn,
    /// so the turn passed to the next player.
    pub turn_passed: bool,
}

/// Report returned by a consumed move.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveReport {
    /// The piece that moved.
    pub piece: PieceId,
    /// Destination progress index.
    pub target: u8,
    /// Intermediate progress indices for step-by-step animation.
    pub path: SmallVec<[u8; 8]>,
    /// Opponent piece sent home, if the move captured.
    pub capture: Option<PieceId>,
    /// True if the piece reached the center.
    pub reached_center: bool,
    /// True if the mover retains the turn (extra-turn roll, capture, or
    /// arrival at the center).
    pub keeps_turn: bool,
    /// Present when an 8-roll was spent on entry: the remaining four
    /// points, live as a fresh roll for the same player.
    pub leftover_roll: Option<RollOutcome>,
    /// Present when this move ended the game.
    pub game_over: Option<GameOutcome>,
}

/// Final result of a game.
///
/// The game ends once all but one player have finished; the remaining
/// player is implicitly last and receives no rank.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameOutcome {
    /// The rank-1 player.
    pub winner: PlayerId,
    /// Every seat with its rank, in seat order. `None` marks the
    /// implicit last place.
    pub standings: Vec<(PlayerId, Option<u8>)>,
}

impl GameOutcome {
    /// The seat that finished with the given rank, if any.
    #[must_use]
    pub fn player_with_rank(&self, rank: u8) -> Option<PlayerId> {
        self.standings
            .iter()
            .find(|(_, r)| *r == Some(rank))
            .map(|(id, _)| *id)
    }
}
