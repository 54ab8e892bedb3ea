/// Distribution primitive: priority-weighted spending of a dot budget.

use rand::Rng;

use crate::schema::sheet::Ratings;

/// Attempts allowed per distribution before the rest of the budget is dropped.
pub const MAX_ATTEMPTS: u32 = 100;

/// Chance that an attempt draws from the whole candidate list. The rest of
/// the time it draws from the front half only.
pub const FULL_LIST_PROBABILITY: f64 = 0.6;

/// Spend `points` dots across `candidates` in `pool`, never raising an item
/// past `ceiling`.
///
/// Earlier candidates are favored: each attempt picks from the full list
/// with probability [`FULL_LIST_PROBABILITY`], otherwise from the first
/// `len / 2` entries (at least one). A pick that is already at the ceiling
/// wastes the attempt. Returns the points left unspent when the attempt cap
/// is reached, which is zero unless the candidates were saturated.
pub fn distribute_points<K, P, R>(
    pool: &mut P,
    candidates: &[K],
    points: u32,
    ceiling: u8,
    rng: &mut R,
) -> u32
where
    K: Copy,
    P: Ratings<K> + ?Sized,
    R: Rng + ?Sized,
{
    if candidates.is_empty() {
        return points;
    }

    let mut remaining = points;
    let mut attempts = 0;

    while remaining > 0 && attempts < MAX_ATTEMPTS {
        let key = candidates[pick_index(candidates.len(), rng)];
        if pool.rating(key) < ceiling {
            pool.raise(key);
            remaining -= 1;
        }
        attempts += 1;
    }

    if remaining > 0 {
        tracing::debug!(
            remaining,
            candidates = candidates.len(),
            "distribution stopped with points unspent"
        );
    }
    remaining
}

fn pick_index<R: Rng + ?Sized>(len: usize, rng: &mut R) -> usize {
    if rng.gen_bool(FULL_LIST_PROBABILITY) {
        rng.gen_range(0..len)
    } else {
        rng.gen_range(0..(len / 2).max(1))
    }
}
