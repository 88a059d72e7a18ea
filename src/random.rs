//! Random number helpers.
//!
//! Every randomized operation in this crate takes an explicit `&mut R`
//! where `R: Rng`, so callers decide between a seeded generator (tests,
//! reproducible runs) and an entropy-seeded one.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

/// Creates a seeded RNG.
///
/// # Examples
///
/// ```
/// use rand::Rng;
/// use u_americano::random::create_rng;
///
/// let mut a = create_rng(7);
/// let mut b = create_rng(7);
/// assert_eq!(a.random::<u64>(), b.random::<u64>());
/// ```
pub fn create_rng(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}

/// Returns `seed`, or a fresh entropy seed when `None`.
pub fn master_seed(seed: Option<u64>) -> u64 {
    seed.unwrap_or_else(rand::random)
}

/// Seed of the `index`-th stream derived from `master` (SplitMix64).
///
/// Any stream can be computed on its own, so workers can evaluate
/// indices in any order and still agree with a sequential run.
///
/// # Examples
///
/// ```
/// use u_americano::random::stream_seed;
///
/// assert_eq!(stream_seed(9, 3), stream_seed(9, 3));
/// assert_ne!(stream_seed(9, 3), stream_seed(9, 4));
/// ```
pub fn stream_seed(master: u64, index: u64) -> u64 {
    let mut z = master.wrapping_add(index.wrapping_mul(0x9E37_79B9_7F4A_7C15));
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}

/// Fisher-Yates shuffle in place.
pub fn shuffle<T, R: Rng + ?Sized>(items: &mut [T], rng: &mut R) {
    items.shuffle(rng);
}

/// Returns a shuffled copy of `items`.
pub fn shuffled<T: Clone, R: Rng + ?Sized>(items: &[T], rng: &mut R) -> Vec<T> {
    let mut out = items.to_vec();
    out.shuffle(rng);
    out
}

/// Picks one of `tied` candidates: the first one, or a uniformly random
/// one when `randomize` is set.
///
/// # Panics
/// Panics if `tied` is empty.
pub(crate) fn break_tie<T: Copy, R: Rng + ?Sized>(tied: &[T], randomize: bool, rng: &mut R) -> T {
    assert!(!tied.is_empty(), "tie-break over an empty candidate set");
    if randomize && tied.len() > 1 {
        tied[rng.random_range(0..tied.len())]
    } else {
        tied[0]
    }
}

/// Wall-clock stopwatch.
///
/// `std::time::Instant` is unavailable on `wasm32-unknown-unknown`, so the
/// browser build reads `Date.now()` instead.
pub(crate) struct Stopwatch {
    #[cfg(not(all(target_arch = "wasm32", feature = "wasm")))]
    start: std::time::Instant,
    #[cfg(all(target_arch = "wasm32", feature = "wasm"))]
    start_ms: f64,
}

impl Stopwatch {
    pub(crate) fn start() -> Self {
        Self {
            #[cfg(not(all(target_arch = "wasm32", feature = "wasm")))]
            start: std::time::Instant::now(),
            #[cfg(all(target_arch = "wasm32", feature = "wasm"))]
            start_ms: js_sys::Date::now(),
        }
    }

    pub(crate) fn elapsed_ms(&self) -> u64 {
        #[cfg(not(all(target_arch = "wasm32", feature = "wasm")))]
        {
            self.start.elapsed().as_millis() as u64
        }
        #[cfg(all(target_arch = "wasm32", feature = "wasm"))]
        {
            (js_sys::Date::now() - self.start_ms).max(0.0).round() as u64
        }
    }
}
