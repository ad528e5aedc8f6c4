//! Game rules: move legality, capture resolution, and move execution.

mod capture;
mod executor;
mod legality;

pub use capture::find_capture;
pub use executor::{execute_move, MoveOutcome};
pub use legality::{
    can_move, legal_target, movable_pieces, move_path, raw_target, POINT_VALUES,
};
