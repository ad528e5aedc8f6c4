//! Adaptive bucket weights for the roll generator.
//!
//! Rolls are sampled from a categorical distribution over the point
//! values `{1, 2, 3, 4, 8}`. Three adjustments are applied to the base
//! weights, in order, before normalization:
//!
//! 1. **Pity** - each dry roll (no 4 or 8) adds weight to the entry
//!    buckets; at five dry rolls the distribution collapses to a forced
//!    `{4: 0.5, 8: 0.5}`.
//! 2. **Capture seeking** - every (piece, point value) pair whose legal
//!    destination square holds a capturable opponent adds a flat bonus to
//!    that value's bucket; bonuses stack.
//! 3. **End-game tension** - while a piece sits 1-3 steps from the center
//!    and has seen fewer than two rolls at that distance, the bucket
//!    matching its exact distance is damped, floored at a minimum.

use super::RollContext;
use crate::board;
use crate::rules::{legal_target, POINT_VALUES};

/// Base unnormalized weights for point values 1, 2, 3, 4, 8.
const BASE_WEIGHTS: [f64; 5] = [0.2275, 0.364, 0.3185, 0.05, 0.04];

/// Dry-roll streak at which the distribution is forced to 4/8.
pub(crate) const PITY_FORCE_THRESHOLD: u32 = 5;

/// Weight added to the 4 and 8 buckets per dry roll.
const PITY_STEP: f64 = 0.02;

/// Weight added for each (piece, value) pair that would capture.
const CAPTURE_BONUS: f64 = 0.15;

/// Weight removed from a bucket matching a near-center piece's distance.
const TENSION_PENALTY: f64 = 0.10;

/// Lower bound applied after the tension penalty.
const TENSION_FLOOR: f64 = 0.01;

/// Tension stops once a piece has seen this many rolls at its distance.
pub(crate) const TENSION_MAX_ATTEMPTS: u32 = 2;

/// Bucket index for a point value.
pub(crate) fn bucket_index(points: u8) -> usize {
    match points {
        1 => 0,
        2 => 1,
        3 => 2,
        4 => 3,
        8 => 4,
        _ => panic!("not a point value: {points}"),
    }
}

/// Compute the normalized bucket weights for the active player's roll.
pub(crate) fn bucket_weights(ctx: &RollContext<'_>) -> [f64; 5] {
    let mut weights = if ctx.pity >= PITY_FORCE_THRESHOLD {
        [0.0, 0.0, 0.0, 0.5, 0.5]
    } else {
        let mut weights = BASE_WEIGHTS;

        let pity_bonus = f64::from(ctx.pity) * PITY_STEP;
        weights[bucket_index(4)] += pity_bonus;
        weights[bucket_index(8)] += pity_bonus;

        let player = ctx.state.current_player();
        for piece in &player.pieces {
            for &points in &POINT_VALUES {
                let Some(target) = legal_target(player, piece, points, ctx.state.board) else {
                    continue;
                };
                let square = board::square_at(player.id, target);
                if crate::rules::find_capture(ctx.state, square, player.id).is_some() {
                    weights[bucket_index(points)] += CAPTURE_BONUS;
                }
            }

            if let Some(dist @ 1..=3) = piece.distance_to_center() {
                let attempts = ctx.attempts.get(&piece.id).copied().unwrap_or(0);
                if attempts < TENSION_MAX_ATTEMPTS {
                    let bucket = bucket_index(dist);
                    weights[bucket] = (weights[bucket] - TENSION_PENALTY).max(TENSION_FLOOR);
                }
            }
        }

        weights
    };

    let total: f64 = weights.iter().sum();
    for w in &mut weights {
        *w /= total;
    }
    weights
}
