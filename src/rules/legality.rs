//! Move legality: entry, looping, overshoot, and self-stacking rules.
//!
//! Legality is decided in two layers. [`raw_target`] applies the
//! positional rules alone (entry cost, Golden Rule wrap, spiral
//! overshoot) and yields the destination progress index. [`legal_target`]
//! adds the self-stacking rule, which needs the owner's other pieces and
//! the board's safe zones.

use smallvec::SmallVec;

use crate::board::{self, BoardType, INNER_SPIRAL_START, MAX_PATH_INDEX, OUTER_LOOP_END};
use crate::core::{Piece, PieceId, Player};

/// Point values a roll can produce.
pub const POINT_VALUES: [u8; 5] = [1, 2, 3, 4, 8];

/// Destination progress index under the positional rules, ignoring
/// stacking. `None` means the piece cannot use this point value.
///
/// - A finished piece never moves.
/// - A piece at home enters only on 4 or 8, targeting progress index 0.
///   Entry spends 4 points regardless; the session layer handles the
///   leftover half of an 8.
/// - While on the outer loop without a first kill, a target past index 15
///   wraps back by 16. At most one wrap can occur since the largest move
///   is 8 from index 15.
/// - Inside the spiral, overshooting the center is illegal.
#[must_use]
pub fn raw_target(piece: &Piece, points: u8, has_first_kill: bool) -> Option<u8> {
    if piece.is_finished() {
        return None;
    }

    let Some(position) = piece.position.progress() else {
        return match points {
            4 | 8 => Some(0),
            _ => None,
        };
    };

    let mut target = position + points;

    if position <= OUTER_LOOP_END && !has_first_kill {
        if target > OUTER_LOOP_END {
            target -= OUTER_LOOP_END + 1;
        }
    } else if position >= INNER_SPIRAL_START && target > MAX_PATH_INDEX {
        return None;
    }

    Some(target)
}

/// Fully-checked destination for a move, or `None` if the move is illegal.
///
/// On top of [`raw_target`], the destination square must not already hold
/// another on-board piece of the same owner unless it is a safe zone.
#[must_use]
pub fn legal_target(player: &Player, piece: &Piece, points: u8, board: BoardType) -> Option<u8> {
    let target = raw_target(piece, points, player.has_first_kill)?;
    let square = board::square_at(player.id, target);

    if !board::is_safe_zone(board, square) {
        let blocked = player.pieces.iter().any(|other| {
            other.id != piece.id
                && other
                    .position
                    .progress()
                    .is_some_and(|p| board::square_at(player.id, p) == square)
        });
        if blocked {
            return None;
        }
    }

    Some(target)
}

/// Whether the piece may use this point value at all.
#[must_use]
pub fn can_move(player: &Player, piece: &Piece, points: u8, board: BoardType) -> bool {
    legal_target(player, piece, points, board).is_some()
}

/// The player's pieces that can legally use this point value.
#[must_use]
pub fn movable_pieces(player: &Player, points: u8, board: BoardType) -> SmallVec<[PieceId; 4]> {
    player
        .pieces
        .iter()
        .filter(|piece| can_move(player, piece, points, board))
        .map(|piece| piece.id)
        .collect()
}

/// Intermediate progress indices for animating a move, in step order.
///
/// Entry from home is a single hop to index 0. Otherwise each of the
/// spent points advances one index, wrapping from 15 to 0 while the owner
/// lacks a first kill. The caller supplies the points actually spent
/// (4 for entry, even off an 8-roll).
#[must_use]
pub fn move_path(piece: &Piece, points: u8, has_first_kill: bool) -> SmallVec<[u8; 8]> {
    let Some(position) = piece.position.progress() else {
        return SmallVec::from_slice(&[0]);
    };

    let mut path = SmallVec::new();
    let mut current = position;
    for _ in 0..points {
        if current >= OUTER_LOOP_END && !has_first_kill {
            current = (current + 1) % (OUTER_LOOP_END + 1);
        } else {
            current += 1;
        }
        path.push(current);
    }
    path
}
