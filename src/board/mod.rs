//! Board topology: the 5x5 grid, per-seat traversal paths, and safe zones.
//!
//! ## Physical squares
//!
//! The board is a 5x5 grid addressed by a single index `0..25` in row-major
//! order. The center square is index 12.
//!
//! ## Paths
//!
//! Each of the four seats has a fixed path of 25 physical squares: progress
//! indices `0..=15` trace the shared outer perimeter starting at that seat's
//! start square, `16..=23` trace an inner spiral, and `24` is the shared
//! center for every seat. The tables are handcrafted constants; they are the
//! sole translation between a seat-relative progress index and a physical
//! square.
//!
//! ## Safe zones (kachhas)
//!
//! No capture can occur on a safe square, and same-owner pieces may stack
//! there. The `Standard` board has five (the four start squares plus the
//! center); `InnerGadulu` adds four inner squares in a diamond around the
//! center.

use serde::{Deserialize, Serialize};

use crate::core::PlayerId;

/// Width of the square board.
pub const BOARD_SIZE: usize = 5;

/// Number of physical squares.
pub const SQUARE_COUNT: usize = BOARD_SIZE * BOARD_SIZE;

/// Highest progress index; a piece here has reached the center.
pub const MAX_PATH_INDEX: u8 = 24;

/// Last progress index of the shared outer perimeter loop.
pub const OUTER_LOOP_END: u8 = 15;

/// First progress index of the inner spiral.
pub const INNER_SPIRAL_START: u8 = 16;

/// Number of seats the board supports.
pub const SEAT_COUNT: usize = 4;

/// Board variant selecting the safe-zone set.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BoardType {
    /// Four start squares plus the center.
    #[default]
    Standard,
    /// Standard plus four inner squares in a diamond around the center.
    InnerGadulu,
}

/// Safe squares for the standard board: the four edge-midpoint start
/// squares and the center.
const STANDARD_SAFE_ZONES: [u8; 5] = [2, 10, 12, 14, 22];

/// Standard safe zones plus the inner diamond (6, 8, 16, 18).
const INNER_GADULU_SAFE_ZONES: [u8; 9] = [2, 6, 8, 10, 12, 14, 16, 18, 22];

/// Per-seat path tables, indexed by seat (0 = bottom, 1 = right, 2 = top,
/// 3 = left). Each row is a full outer lap from the seat's start square
/// followed by a clockwise inner spiral ending at the center.
const PLAYER_PATHS: [[u8; 25]; SEAT_COUNT] = [
    [
        22, 23, 24, 19, 14, 9, 4, 3, 2, 1, 0, 5, 10, 15, 20, 21, //
        16, 11, 6, 7, 8, 13, 18, 17, 12,
    ],
    [
        14, 9, 4, 3, 2, 1, 0, 5, 10, 15, 20, 21, 22, 23, 24, 19, //
        18, 17, 16, 11, 6, 7, 8, 13, 12,
    ],
    [
        2, 1, 0, 5, 10, 15, 20, 21, 22, 23, 24, 19, 14, 9, 4, 3, //
        8, 13, 18, 17, 16, 11, 6, 7, 12,
    ],
    [
        10, 15, 20, 21, 22, 23, 24, 19, 14, 9, 4, 3, 2, 1, 0, 5, //
        6, 7, 8, 13, 18, 17, 16, 11, 12,
    ],
];

/// Safe squares for the given board variant.
#[must_use]
pub fn safe_zones(board: BoardType) -> &'static [u8] {
    match board {
        BoardType::Standard => &STANDARD_SAFE_ZONES,
        BoardType::InnerGadulu => &INNER_GADULU_SAFE_ZONES,
    }
}

/// Check whether a physical square is a safe zone on this board.
#[must_use]
pub fn is_safe_zone(board: BoardType, square: u8) -> bool {
    safe_zones(board).contains(&square)
}

/// The full path for a seat, ordered by progress index.
///
/// Panics if the seat index is out of range; seats are fixed at
/// construction so that is a programming defect, not an input error.
#[must_use]
pub fn path_of(seat: PlayerId) -> &'static [u8; 25] {
    &PLAYER_PATHS[seat.index()]
}

/// Translate a seat-relative progress index to a physical square.
///
/// Panics on a progress index above [`MAX_PATH_INDEX`].
#[must_use]
pub fn square_at(seat: PlayerId, progress: u8) -> u8 {
    PLAYER_PATHS[seat.index()][progress as usize]
}
