//! The turn/win controller: one live game behind a guarded interface.
//!
//! `GameSession` owns the current `GameState` snapshot plus everything the
//! adaptive roll generator needs between snapshots (RNG, pity counters,
//! end-game attempt counters). All operations are total: bad inputs are
//! rejected with an [`EngineError`] and leave the session unchanged.

use rustc_hash::FxHashMap;
use smallvec::SmallVec;
use tracing::{debug, info};

use crate::board::BoardType;
use crate::core::{GameRng, GameState, PieceId, PlayerId, PlayerMap, PlayerSetup};
use crate::roll::{self, RollContext, RollOutcome, POINT_VALUES};
use crate::rules::{execute_move, legal_target, movable_pieces};

use super::events::{GameOutcome, MoveReport, RollReport, TurnPhase};

/// Points an entry from home consumes, regardless of the roll.
const ENTRY_COST: u8 = 4;

/// Policy rejection. No session state changes when one is returned.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum EngineError {
    #[error("a game needs 2 to 4 players, got {0}")]
    PlayerCount(usize),
    #[error("a {0}-point roll is already awaiting a move")]
    RollPending(u8),
    #[error("no roll is awaiting a move")]
    NoPendingRoll,
    #[error("{0} is not a point value")]
    InvalidRoll(u8),
    #[error("no such piece: {0}")]
    UnknownPiece(PieceId),
    #[error("piece {piece} cannot act, it is {current}'s turn")]
    NotYourTurn { piece: PieceId, current: PlayerId },
    #[error("piece {piece} cannot use a {points}-point roll")]
    IllegalMove { piece: PieceId, points: u8 },
    #[error("the game is over")]
    GameFinished,
}

/// One live game: state machine, roll generator context, and guards.
pub struct GameSession {
    state: GameState,
    phase: TurnPhase,
    pending: Option<RollOutcome>,
    /// Per-player dry-roll streaks (rolls without a 4 or 8).
    pity: PlayerMap<u32>,
    /// Per-piece counts of rolls seen while 1-3 steps from the center.
    /// Never reset, even across capture and re-entry.
    attempts: FxHashMap<PieceId, u32>,
    rng: GameRng,
    outcome: Option<GameOutcome>,
}

impl GameSession {
    /// Start a game with the given players, board variant, and RNG seed.
    /// Seats are assigned in listed order; the first player moves first.
    pub fn new(
        setups: Vec<PlayerSetup>,
        board: BoardType,
        seed: u64,
    ) -> Result<Self, EngineError> {
        let count = setups.len();
        if !(2..=crate::board::SEAT_COUNT).contains(&count) {
            return Err(EngineError::PlayerCount(count));
        }

        Ok(Self {
            state: GameState::new(setups, board),
            phase: TurnPhase::AwaitingRoll,
            pending: None,
            pity: PlayerMap::with_value(count, 0),
            attempts: FxHashMap::default(),
            rng: GameRng::new(seed),
            outcome: None,
        })
    }

    /// The current state snapshot.
    #[must_use]
    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Current phase of the turn cycle.
    #[must_use]
    pub fn phase(&self) -> TurnPhase {
        self.phase
    }

    /// The active player.
    #[must_use]
    pub fn current_player(&self) -> PlayerId {
        self.state.current_turn
    }

    /// The live roll awaiting a move, if any.
    #[must_use]
    pub fn pending_roll(&self) -> Option<&RollOutcome> {
        self.pending.as_ref()
    }

    /// The final result, once the game is over.
    #[must_use]
    pub fn outcome(&self) -> Option<&GameOutcome> {
        self.outcome.as_ref()
    }

    /// The active player's dry-roll streak.
    #[must_use]
    pub fn pity(&self, player: PlayerId) -> u32 {
        self.pity[player]
    }

    /// Pieces that can legally use the live roll (empty when none is live).
    #[must_use]
    pub fn movable(&self) -> SmallVec<[PieceId; 4]> {
        match &self.pending {
            Some(outcome) => movable_pieces(
                self.state.current_player(),
                outcome.points,
                self.state.board,
            ),
            None => SmallVec::new(),
        }
    }

    /// Generate a roll for the active player.
    ///
    /// Rejected while a prior roll is unconsumed or after game over. If
    /// the roll has no legal use it is consumed immediately: the turn
    /// passes unless the roll granted an extra turn.
    pub fn request_roll(&mut self) -> Result<RollReport, EngineError> {
        self.guard_can_roll()?;

        let outcome = roll::roll(
            &RollContext {
                state: &self.state,
                pity: self.pity[self.state.current_turn],
                attempts: &self.attempts,
            },
            &mut self.rng,
        );

        Ok(self.commit_roll(outcome))
    }

    /// Commit a caller-supplied roll through the same pipeline as
    /// [`request_roll`]: counters update, legality is scanned, and the
    /// turn passes on a dead roll. Supports scripted playback and tests.
    pub fn apply_roll(&mut self, outcome: RollOutcome) -> Result<RollReport, EngineError> {
        self.guard_can_roll()?;
        if !POINT_VALUES.contains(&outcome.points) {
            return Err(EngineError::InvalidRoll(outcome.points));
        }
        Ok(self.commit_roll(outcome))
    }

    /// Spend the live roll on a piece.
    ///
    /// Rejects pieces of other players and pieces that cannot use the
    /// roll; both leave the session unchanged. On success the move is
    /// fully resolved: capture, rank assignment, turn advance or
    /// retention, and win detection.
    pub fn select_piece(&mut self, piece_id: PieceId) -> Result<MoveReport, EngineError> {
        if self.phase == TurnPhase::GameOver {
            return Err(EngineError::GameFinished);
        }
        let Some(roll) = self.pending.clone() else {
            return Err(EngineError::NoPendingRoll);
        };
        if !self.state.contains_piece(piece_id) {
            return Err(EngineError::UnknownPiece(piece_id));
        }
        if piece_id.owner != self.state.current_turn {
            return Err(EngineError::NotYourTurn {
                piece: piece_id,
                current: self.state.current_turn,
            });
        }

        let player = self.state.player(piece_id.owner);
        let piece = player.piece(piece_id.ordinal);
        if legal_target(player, piece, roll.points, self.state.board).is_none() {
            return Err(EngineError::IllegalMove {
                piece: piece_id,
                points: roll.points,
            });
        }

        let was_home = piece.position.is_home();
        let points_used = if was_home { ENTRY_COST } else { roll.points };

        let moved = execute_move(&self.state, piece_id, points_used);
        debug!(
            piece = %piece_id,
            target = moved.target,
            capture = ?moved.capture,
            "move executed"
        );
        self.state = moved.state;

        if was_home && roll.points == 8 {
            // The other half of an Ashta becomes a fresh 4-point roll for
            // the same player.
            return Ok(self.hold_leftover_roll(piece_id, moved.target, moved.path));
        }

        let keeps_turn = roll.extra_turn || moved.capture.is_some() || moved.reached_center;

        let game_over = self.detect_game_over();
        if let Some(outcome) = &game_over {
            info!(winner = %outcome.winner, "game over");
            self.phase = TurnPhase::GameOver;
        } else if !keeps_turn {
            self.advance_turn();
        }

        self.pending = None;
        self.state.pending_points = None;
        if self.phase != TurnPhase::GameOver {
            self.phase = TurnPhase::AwaitingRoll;
        }

        Ok(MoveReport {
            piece: piece_id,
            target: moved.target,
            path: moved.path,
            capture: moved.capture,
            reached_center: moved.reached_center,
            keeps_turn,
            leftover_roll: None,
            game_over,
        })
    }

    fn guard_can_roll(&self) -> Result<(), EngineError> {
        match self.phase {
            TurnPhase::GameOver => Err(EngineError::GameFinished),
            TurnPhase::PendingSelection => {
                let points = self.pending.as_ref().map_or(0, |r| r.points);
                Err(EngineError::RollPending(points))
            }
            TurnPhase::AwaitingRoll => Ok(()),
        }
    }

    /// Shared tail of `request_roll` and `apply_roll`.
    fn commit_roll(&mut self, outcome: RollOutcome) -> RollReport {
        let player = self.state.current_turn;

        if outcome.points == 4 || outcome.points == 8 {
            self.pity[player] = 0;
        } else {
            self.pity[player] += 1;
        }

        // Every roll wears down the end-game tension of the roller's
        // near-center pieces, whether or not the roll matched.
        for piece in &self.state.player(player).pieces {
            if matches!(piece.distance_to_center(), Some(1..=3)) {
                *self.attempts.entry(piece.id).or_insert(0) += 1;
            }
        }

        debug!(
            player = %player,
            points = outcome.points,
            extra_turn = outcome.extra_turn,
            pity = self.pity[player],
            "roll generated"
        );

        let movable = movable_pieces(
            self.state.current_player(),
            outcome.points,
            self.state.board,
        );

        if movable.is_empty() {
            let turn_passed = !outcome.extra_turn;
            if turn_passed {
                self.advance_turn();
            }
            self.pending = None;
            self.state.pending_points = None;
            self.phase = TurnPhase::AwaitingRoll;
            RollReport {
                outcome,
                movable,
                turn_passed,
            }
        } else {
            self.state.pending_points = Some(outcome.points);
            self.pending = Some(outcome.clone());
            self.phase = TurnPhase::PendingSelection;
            RollReport {
                outcome,
                movable,
                turn_passed: false,
            }
        }
    }

    /// After an entry spent 4 of an 8-roll: keep the remaining 4 points
    /// live for the same player, or consume them silently if nothing can
    /// use them (the extra turn is retained either way).
    fn hold_leftover_roll(
        &mut self,
        piece: PieceId,
        target: u8,
        path: SmallVec<[u8; 8]>,
    ) -> MoveReport {
        let leftover = RollOutcome::from_points(ENTRY_COST);
        let usable = !movable_pieces(
            self.state.current_player(),
            leftover.points,
            self.state.board,
        )
        .is_empty();

        if usable {
            self.state.pending_points = Some(leftover.points);
            self.pending = Some(leftover.clone());
            self.phase = TurnPhase::PendingSelection;
        } else {
            self.pending = None;
            self.state.pending_points = None;
            self.phase = TurnPhase::AwaitingRoll;
        }

        MoveReport {
            piece,
            target,
            path,
            capture: None,
            reached_center: false,
            keeps_turn: true,
            leftover_roll: usable.then_some(leftover),
            game_over: None,
        }
    }

    /// Pass the turn to the next unranked player, wrapping circularly.
    fn advance_turn(&mut self) {
        let count = self.state.player_count();
        let mut index = (self.state.current_turn.index() + 1) % count;
        for _ in 0..count {
            if self.state.players()[index].rank.is_none() {
                break;
            }
            index = (index + 1) % count;
        }
        self.state.current_turn = PlayerId::new(index as u8);
    }

    /// The game ends once all but one player hold a rank. In a 2-player
    /// game that is the moment the first player finishes.
    fn detect_game_over(&mut self) -> Option<GameOutcome> {
        let ranked = self.state.ranked_count();
        if ranked < self.state.player_count() - 1 {
            return None;
        }

        let winner = self
            .state
            .players()
            .iter()
            .find(|p| p.rank == Some(1))
            .map(|p| p.id)
            .expect("game over requires a rank-1 player");

        let outcome = GameOutcome {
            winner,
            standings: self
                .state
                .players()
                .iter()
                .map(|p| (p.id, p.rank))
                .collect(),
        };
        self.outcome = Some(outcome.clone());
        Some(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Position;

    fn session(count: usize) -> GameSession {
        let names = ["Asha", "Ravi", "Meena", "Kiran"];
        let setups = names
            .iter()
            .take(count)
            .map(|name| PlayerSetup::new(*name, "pebble"))
            .collect();
        GameSession::new(setups, BoardType::Standard, 42).unwrap()
    }

    #[test]
    fn test_rejects_bad_player_counts() {
        for count in [0, 1, 5] {
            let setups = (0..count)
                .map(|i| PlayerSetup::new(format!("p{i}"), "pebble"))
                .collect();
            assert_eq!(
                GameSession::new(setups, BoardType::Standard, 1).err(),
                Some(EngineError::PlayerCount(count))
            );
        }
    }

    #[test]
    fn test_dead_roll_passes_turn() {
        let mut session = session(2);

        // All pieces are home: a 1 cannot be used by anyone.
        let report = session.apply_roll(RollOutcome::from_points(1)).unwrap();

        assert!(report.movable.is_empty());
        assert!(report.turn_passed);
        assert_eq!(session.current_player(), PlayerId::new(1));
        assert_eq!(session.phase(), TurnPhase::AwaitingRoll);
    }

    #[test]
    fn test_dead_extra_turn_roll_retains_player() {
        let mut session = session(2);
        let owner = PlayerId::new(0);

        // Three pieces finished, the last one three short of the center:
        // a 4 overshoots, so the roll is dead but still grants the turn.
        for ordinal in 0..3 {
            session
                .state
                .piece_mut(PieceId::new(owner, ordinal))
                .position = Position::Path(24);
        }
        session.state.piece_mut(PieceId::new(owner, 3)).position = Position::Path(21);
        session.state.player_mut(owner).has_first_kill = true;

        let report = session.apply_roll(RollOutcome::from_points(4)).unwrap();

        assert!(report.movable.is_empty());
        assert!(!report.turn_passed);
        assert_eq!(session.current_player(), owner);
        assert_eq!(session.phase(), TurnPhase::AwaitingRoll);
    }

    #[test]
    fn test_roll_rejected_while_pending() {
        let mut session = session(2);

        session.apply_roll(RollOutcome::from_points(4)).unwrap();

        assert_eq!(
            session.request_roll().err(),
            Some(EngineError::RollPending(4))
        );
        assert_eq!(
            session.apply_roll(RollOutcome::from_points(2)).err(),
            Some(EngineError::RollPending(4))
        );
    }

    #[test]
    fn test_select_requires_pending_roll() {
        let mut session = session(2);
        let piece = PieceId::new(PlayerId::new(0), 0);

        assert_eq!(
            session.select_piece(piece).err(),
            Some(EngineError::NoPendingRoll)
        );
    }

    #[test]
    fn test_select_rejects_foreign_piece() {
        let mut session = session(2);
        session.apply_roll(RollOutcome::from_points(4)).unwrap();

        let foreign = PieceId::new(PlayerId::new(1), 0);
        assert_eq!(
            session.select_piece(foreign).err(),
            Some(EngineError::NotYourTurn {
                piece: foreign,
                current: PlayerId::new(0)
            })
        );
        // The roll is still live afterwards.
        assert_eq!(session.phase(), TurnPhase::PendingSelection);
    }

    #[test]
    fn test_select_rejects_unknown_piece() {
        let mut session = session(2);
        session.apply_roll(RollOutcome::from_points(4)).unwrap();

        let ghost = PieceId::new(PlayerId::new(3), 0);
        assert_eq!(
            session.select_piece(ghost).err(),
            Some(EngineError::UnknownPiece(ghost))
        );
    }

    #[test]
    fn test_entry_move_on_four() {
        let mut session = session(2);
        let piece = PieceId::new(PlayerId::new(0), 0);

        session.apply_roll(RollOutcome::from_points(4)).unwrap();
        let report = session.select_piece(piece).unwrap();

        assert_eq!(report.target, 0);
        assert_eq!(report.path.as_slice(), &[0]);
        assert!(report.keeps_turn); // 4 grants an extra turn
        assert_eq!(session.state().piece(piece).position, Position::Path(0));
        assert_eq!(session.current_player(), PlayerId::new(0));
        assert_eq!(session.phase(), TurnPhase::AwaitingRoll);
    }

    #[test]
    fn test_entry_on_eight_leaves_a_four() {
        let mut session = session(2);
        let piece = PieceId::new(PlayerId::new(0), 0);

        session.apply_roll(RollOutcome::from_points(8)).unwrap();
        let report = session.select_piece(piece).unwrap();

        assert_eq!(report.target, 0);
        let leftover = report.leftover_roll.expect("leftover roll");
        assert_eq!(leftover.points, 4);
        assert!(leftover.extra_turn);
        assert_eq!(session.phase(), TurnPhase::PendingSelection);
        assert_eq!(session.current_player(), PlayerId::new(0));

        // The leftover spends like any roll: the entered piece walks on.
        let follow_up = session.select_piece(piece).unwrap();
        assert_eq!(follow_up.target, 4);
        assert_eq!(follow_up.path.as_slice(), &[1, 2, 3, 4]);
    }

    #[test]
    fn test_invalid_injected_roll() {
        let mut session = session(2);
        let mut bogus = RollOutcome::from_points(4);
        bogus.points = 7;

        assert_eq!(
            session.apply_roll(bogus).err(),
            Some(EngineError::InvalidRoll(7))
        );
    }

    #[test]
    fn test_pity_counters_track_dry_rolls() {
        let mut session = session(2);

        // Dead 1-rolls alternate between the players, each dry.
        for _ in 0..4 {
            session.apply_roll(RollOutcome::from_points(1)).unwrap();
        }
        assert_eq!(session.pity(PlayerId::new(0)), 2);
        assert_eq!(session.pity(PlayerId::new(1)), 2);

        // An 8 resets the roller's streak.
        let piece = PieceId::new(PlayerId::new(0), 0);
        session.apply_roll(RollOutcome::from_points(8)).unwrap();
        session.select_piece(piece).unwrap();
        assert_eq!(session.pity(PlayerId::new(0)), 0);
        assert_eq!(session.pity(PlayerId::new(1)), 2);
    }

    #[test]
    fn test_forced_entry_roll_after_dry_streak() {
        let mut session = session(2);

        // Ten dead 1-rolls: five dry rolls per player.
        for _ in 0..10 {
            session.apply_roll(RollOutcome::from_points(1)).unwrap();
        }
        assert_eq!(session.pity(PlayerId::new(0)), 5);

        // The forced distribution admits only 4 or 8, whatever the seed.
        let report = session.request_roll().unwrap();
        assert!(report.outcome.points == 4 || report.outcome.points == 8);
    }

    #[test]
    fn test_advance_turn_skips_ranked_players() {
        let mut session = session(3);

        // Rank the middle player by hand, then pass player 0's turn.
        session.state.player_mut(PlayerId::new(1)).rank = Some(1);
        session.apply_roll(RollOutcome::from_points(1)).unwrap();

        assert_eq!(session.current_player(), PlayerId::new(2));
    }

    #[test]
    fn test_two_player_game_over_on_first_finish() {
        let mut session = session(2);
        let owner = PlayerId::new(0);

        for ordinal in 0..3 {
            session
                .state
                .piece_mut(PieceId::new(owner, ordinal))
                .position = Position::Path(24);
        }
        session.state.piece_mut(PieceId::new(owner, 3)).position = Position::Path(22);
        session.state.player_mut(owner).has_first_kill = true;

        session.apply_roll(RollOutcome::from_points(2)).unwrap();
        let report = session.select_piece(PieceId::new(owner, 3)).unwrap();

        let outcome = report.game_over.expect("game over");
        assert_eq!(outcome.winner, owner);
        assert_eq!(session.phase(), TurnPhase::GameOver);
        assert_eq!(
            session.request_roll().err(),
            Some(EngineError::GameFinished)
        );
        assert_eq!(
            session.select_piece(PieceId::new(owner, 0)).err(),
            Some(EngineError::GameFinished)
        );
    }

    #[test]
    fn test_four_player_game_ends_at_three_ranks() {
        let mut session = session(4);

        // Two players ranked already; the next finish is rank 3, which
        // leaves only one unranked player and must end the game.
        session.state.player_mut(PlayerId::new(1)).rank = Some(1);
        session.state.player_mut(PlayerId::new(2)).rank = Some(2);

        let owner = PlayerId::new(0);
        for ordinal in 0..3 {
            session
                .state
                .piece_mut(PieceId::new(owner, ordinal))
                .position = Position::Path(24);
        }
        session.state.piece_mut(PieceId::new(owner, 3)).position = Position::Path(23);
        session.state.player_mut(owner).has_first_kill = true;

        session.apply_roll(RollOutcome::from_points(1)).unwrap();
        let report = session.select_piece(PieceId::new(owner, 3)).unwrap();

        let outcome = report.game_over.expect("game over");
        assert_eq!(outcome.winner, PlayerId::new(1));
        assert_eq!(outcome.player_with_rank(3), Some(owner));
        // The unranked fourth player is implicitly last.
        assert_eq!(outcome.standings[3], (PlayerId::new(3), None));
    }
}
