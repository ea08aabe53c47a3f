//! Symmetric random jitter, in minutes.
//!
//! Spreading run times stops every agent configured with the same interval
//! from firing on the exact same minute.

use rand::Rng;

/// Uniform draw over the closed range `[-jitter_minutes, +jitter_minutes]`.
/// Both endpoints are reachable (2j + 1 possible values).
pub fn random_jitter<R: Rng + ?Sized>(rng: &mut R, jitter_minutes: u32) -> i64 {
    let j = i64::from(jitter_minutes);
    rng.gen_range(-j..=j)
}
