//! Game session: the turn/win state machine and its in-process interface.
//!
//! The presentation layer drives a [`GameSession`] through three inbound
//! operations - construction, [`GameSession::request_roll`], and
//! [`GameSession::select_piece`] - and reads back state snapshots and
//! reports. All rejections are policy decisions surfaced as
//! [`EngineError`]; none change session state.

mod controller;
mod events;

pub use controller::{EngineError, GameSession};
pub use events::{GameOutcome, MoveReport, RollReport, TurnPhase};
