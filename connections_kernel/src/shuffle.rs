/// Connections kernel — Deterministic Shuffle
///
/// Fisher–Yates from the last index down to 1. Pure: the input slice is
/// never touched, a new Vec is returned.

use crate::rng::RandomSource;

/// Draw an index in `0..bound` as `floor(r * bound)`.
///
/// Clamped to `bound - 1` so a source that returns exactly 1.0 cannot index
/// out of range. `bound` must be non-zero.
pub fn draw_index(rng: &mut dyn RandomSource, bound: usize) -> usize {
    let r = rng.next_f64();
    let j = (r * bound as f64).floor() as usize;
    j.min(bound - 1)
}

/// Return a permutation of `items`.
pub fn shuffle<T: Clone>(items: &[T], rng: &mut dyn RandomSource) -> Vec<T> {
    let mut out = items.to_vec();
    for i in (1..out.len()).rev() {
        let j = draw_index(rng, i + 1);
        out.swap(i, j);
    }
    out
}

/// Shuffle, then keep the first `count` items.
pub fn sample<T: Clone>(items: &[T], count: usize, rng: &mut dyn RandomSource) -> Vec<T> {
    let mut out = shuffle(items, rng);
    out.truncate(count);
    out
}
