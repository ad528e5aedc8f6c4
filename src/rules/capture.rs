//! Capture resolution.

use crate::board::{self, MAX_PATH_INDEX};
use crate::core::{GameState, PieceId, PlayerId};

/// Find an opposing piece on the target square, outside safe zones.
///
/// Returns `None` if the square is a kachha. Pieces that have reached the
/// center never count as occupants. Per-player stacking rules guarantee at
/// most one occupant per owner on a non-safe square; the first match wins
/// if different owners coincide.
#[must_use]
pub fn find_capture(state: &GameState, target_square: u8, mover: PlayerId) -> Option<PieceId> {
    if board::is_safe_zone(state.board, target_square) {
        return None;
    }

    for player in state.players() {
        if player.id == mover {
            continue;
        }
        for piece in &player.pieces {
            let occupied = piece
                .position
                .progress()
                .filter(|&p| p < MAX_PATH_INDEX)
                .map(|p| board::square_at(player.id, p));
            if occupied == Some(target_square) {
                return Some(piece.id);
            }
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::BoardType;
    use crate::core::{PlayerSetup, Position};

    fn state(board: BoardType) -> GameState {
        GameState::new(
            vec![
                PlayerSetup::new("a", "pebble"),
                PlayerSetup::new("b", "bangle"),
            ],
            board,
        )
    }

    #[test]
    fn test_no_capture_on_safe_zone() {
        let mut state = state(BoardType::Standard);
        // Seat 1 path index 0 is square 14, seat 1's start and a kachha.
        let victim = PieceId::new(PlayerId::new(1), 0);
        state.piece_mut(victim).position = Position::Path(0);

        assert_eq!(find_capture(&state, 14, PlayerId::new(0)), None);
    }

    #[test]
    fn test_capture_on_open_square() {
        let mut state = state(BoardType::Standard);
        // Seat 1 path index 1 is square 9, open on both boards.
        let victim = PieceId::new(PlayerId::new(1), 0);
        state.piece_mut(victim).position = Position::Path(1);

        assert_eq!(find_capture(&state, 9, PlayerId::new(0)), Some(victim));
        // The mover's own pieces are never victims.
        assert_eq!(find_capture(&state, 9, PlayerId::new(1)), None);
    }

    #[test]
    fn test_finished_piece_is_not_an_occupant() {
        let mut state = state(BoardType::Standard);
        let victim = PieceId::new(PlayerId::new(1), 0);
        state.piece_mut(victim).position = Position::Path(MAX_PATH_INDEX);

        // Center is safe anyway, but the occupancy filter must also hold.
        assert_eq!(find_capture(&state, 12, PlayerId::new(0)), None);
    }

    #[test]
    fn test_inner_gadulu_shelters_the_diamond() {
        let mut standard = state(BoardType::Standard);
        let mut gadulu = state(BoardType::InnerGadulu);

        // Seat 1 path index 20 is square 6: open on Standard, safe on
        // InnerGadulu.
        let victim = PieceId::new(PlayerId::new(1), 2);
        standard.piece_mut(victim).position = Position::Path(20);
        gadulu.piece_mut(victim).position = Position::Path(20);

        assert_eq!(find_capture(&standard, 6, PlayerId::new(0)), Some(victim));
        assert_eq!(find_capture(&gadulu, 6, PlayerId::new(0)), None);
    }
}
