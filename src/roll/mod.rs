//! Roll generation: four binary seeds, adaptive probabilities.
//!
//! A roll conceptually throws four tamarind seeds, each landing open or
//! closed. The open count maps to move points: 1, 2, or 3 open score that
//! many points; all four open score 4 with an extra turn; all closed
//! score 8 with an extra turn.
//!
//! The generator does not sample the seeds directly. It samples the open
//! count from the adaptive categorical distribution in [`bias`], then
//! back-derives a seed pattern: which slots show open is shuffled
//! independently and carries no rule significance.

mod bias;

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::core::{GameRng, GameState, PieceId};

pub use crate::rules::POINT_VALUES;

/// Number of seeds thrown per roll.
pub const SEED_COUNT: usize = 4;

/// Outcome of one seed roll.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RollOutcome {
    /// Which seed slots landed open (display only).
    pub seeds: [bool; SEED_COUNT],
    /// Number of open seeds, 0-4.
    pub open_count: u8,
    /// Move points granted.
    pub points: u8,
    /// Whether the roll grants an extra turn.
    pub extra_turn: bool,
}

impl RollOutcome {
    /// Build the outcome for a point value with a canonical seed pattern
    /// (open seeds first). Used for deterministic roll injection.
    ///
    /// Panics on a value outside `{1, 2, 3, 4, 8}`.
    #[must_use]
    pub fn from_points(points: u8) -> Self {
        let open_count = open_count_for_points(points);
        let mut seeds = [false; SEED_COUNT];
        for slot in seeds.iter_mut().take(open_count as usize) {
            *slot = true;
        }
        let (points, extra_turn) = score_for_open_count(open_count);
        Self {
            seeds,
            open_count,
            points,
            extra_turn,
        }
    }
}

/// Points and extra-turn flag for an open count.
#[must_use]
pub fn score_for_open_count(open_count: u8) -> (u8, bool) {
    match open_count {
        1 => (1, false),
        2 => (2, false),
        3 => (3, false),
        4 => (4, true),
        0 => (8, true),
        _ => panic!("open count out of range: {open_count}"),
    }
}

/// Open count whose score is the given point value.
#[must_use]
pub fn open_count_for_points(points: u8) -> u8 {
    match points {
        1..=4 => points,
        8 => 0,
        _ => panic!("not a point value: {points}"),
    }
}

/// Engine context the adaptive bias reads.
pub struct RollContext<'a> {
    /// Current game state; the bias inspects the active player's pieces.
    pub state: &'a GameState,
    /// The active player's dry-roll streak.
    pub pity: u32,
    /// Per-piece counters of rolls seen while 1-3 steps from the center.
    pub attempts: &'a FxHashMap<PieceId, u32>,
}

/// Generate a roll for the active player.
///
/// Samples a point value from the adaptive distribution, then derives a
/// consistent seed pattern with a random arrangement of open slots.
#[must_use]
pub fn roll(ctx: &RollContext<'_>, rng: &mut GameRng) -> RollOutcome {
    let weights = bias::bucket_weights(ctx);
    let points = sample_points(&weights, rng);
    let open_count = open_count_for_points(points);

    let mut seeds = [false; SEED_COUNT];
    for slot in seeds.iter_mut().take(open_count as usize) {
        *slot = true;
    }
    rng.shuffle(&mut seeds);

    let (points, extra_turn) = score_for_open_count(open_count);
    RollOutcome {
        seeds,
        open_count,
        points,
        extra_turn,
    }
}

/// Dry-roll streak at which a roll is forced to 4 or 8.
pub const PITY_FORCE_THRESHOLD: u32 = bias::PITY_FORCE_THRESHOLD;

/// Rolls at a given near-center distance after which the tension bias
/// stops applying to a piece.
pub const TENSION_MAX_ATTEMPTS: u32 = bias::TENSION_MAX_ATTEMPTS;

/// Walk the buckets in descending point order, accumulating probability
/// mass, and select the first bucket whose cumulative mass meets the draw.
fn sample_points(weights: &[f64; 5], rng: &mut GameRng) -> u8 {
    let draw = rng.unit();
    let mut cumulative = 0.0;
    for &points in &[8u8, 4, 3, 2, 1] {
        cumulative += weights[bias::bucket_index(points)];
        if draw <= cumulative {
            return points;
        }
    }
    // Floating-point shortfall at the very top of the range.
    1
}
