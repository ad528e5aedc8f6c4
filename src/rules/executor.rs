//! Move execution: advance a piece, resolve captures, assign ranks.
//!
//! Execution is a functional update: the previous state is left untouched
//! and a new state is returned with only the affected players changed.

use smallvec::SmallVec;

use crate::board::{self, MAX_PATH_INDEX};
use crate::core::{GameState, MoveRecord, PieceId, Position};

use super::capture::find_capture;
use super::legality::{legal_target, move_path};

/// Result of applying one move.
#[derive(Clone, Debug)]
pub struct MoveOutcome {
    /// The state after the move.
    pub state: GameState,
    /// Destination progress index.
    pub target: u8,
    /// Opponent piece sent home, if the move captured.
    pub capture: Option<PieceId>,
    /// True if the piece reached the center this move.
    pub reached_center: bool,
    /// Intermediate progress indices, for presentation-layer animation.
    pub path: SmallVec<[u8; 8]>,
}

/// Apply a validated move and produce the successor state.
///
/// `points` is the amount actually spent: the session layer passes 4 for
/// entry from home even when the roll was an 8. The caller must have
/// checked legality first; an illegal move here is a programming defect
/// and panics.
///
/// Effects, in order: an opponent on the destination (outside safe zones)
/// is sent home and the mover gains the first-kill right; the piece
/// advances; on arrival at the center, if all four of the owner's pieces
/// are finished and the owner is unranked, the next rank is assigned.
/// Any pending roll points are cleared and the move is appended to the
/// history.
#[must_use]
pub fn execute_move(state: &GameState, piece_id: PieceId, points: u8) -> MoveOutcome {
    let player = state.player(piece_id.owner);
    let piece = state.piece(piece_id);

    let Some(target) = legal_target(player, piece, points, state.board) else {
        panic!("execute_move called with illegal move: {piece_id} spending {points}");
    };

    let from = piece.position;
    let path = move_path(piece, points, player.has_first_kill);
    let square = board::square_at(piece_id.owner, target);
    let capture = find_capture(state, square, piece_id.owner);

    let mut next = state.clone();

    if let Some(victim) = capture {
        next.piece_mut(victim).position = Position::Home;
        next.player_mut(piece_id.owner).has_first_kill = true;
    }

    next.piece_mut(piece_id).position = Position::Path(target);

    let reached_center = target == MAX_PATH_INDEX;
    if reached_center {
        let owner = next.player(piece_id.owner);
        if owner.is_finished() && owner.rank.is_none() {
            let rank = next.max_rank() + 1;
            next.player_mut(piece_id.owner).rank = Some(rank);
        }
    }

    next.pending_points = None;
    next.history.push_back(MoveRecord {
        player: piece_id.owner,
        piece: piece_id,
        points,
        from,
        to: target,
        capture,
    });

    MoveOutcome {
        state: next,
        target,
        capture,
        reached_center,
        path,
    }
}
