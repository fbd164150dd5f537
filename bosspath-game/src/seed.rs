//! Run seeds: normalization, fresh generation, and the session-seed seam.
//!
//! Seed format: up to six characters from `A-Z0-9`, e.g. `TEST12`, `Q7ZK03`.
//! Explicit input is uppercased, stripped of anything outside the alphabet and
//! cut to six characters. Shorter results are kept without padding.

use crate::constants::{SEED_ALPHABET, SEED_LEN};
use rand::Rng;

/// Normalize user or session input into a seed.
///
/// Returns `None` when nothing usable remains, so callers can fall back to
/// another seed source.
#[must_use]
pub fn normalize_seed(raw: &str) -> Option<String> {
    let seed: String = raw
        .chars()
        .map(|c| c.to_ascii_uppercase())
        .filter(char::is_ascii_alphanumeric)
        .take(SEED_LEN)
        .collect();
    (!seed.is_empty()).then_some(seed)
}

/// Draw a fresh full-length seed uniformly from the alphabet.
pub fn generate_seed<R: Rng + ?Sized>(rng: &mut R) -> String {
    (0..SEED_LEN)
        .map(|_| char::from(SEED_ALPHABET[rng.gen_range(0..SEED_ALPHABET.len())]))
        .collect()
}

/// Fresh seed from the thread-local, OS-seeded generator. Not reproducible.
#[must_use]
pub fn generate_entropy_seed() -> String {
    generate_seed(&mut rand::thread_rng())
}

/// Whether `seed` is exactly six alphabet characters.
#[must_use]
pub fn is_canonical_seed(seed: &str) -> bool {
    seed.len() == SEED_LEN && seed.bytes().all(|b| SEED_ALPHABET.contains(&b))
}

/// Host-provided session seed consulted when a run is reset without one.
pub trait SessionSeedProvider {
    fn current_session_seed(&self) -> Option<String>;
}

/// Provider for hosts without a session seed.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoSessionSeed;

impl SessionSeedProvider for NoSessionSeed {
    fn current_session_seed(&self) -> Option<String> {
        None
    }
}

/// Provider that always reports the same session seed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixedSessionSeed(pub String);

impl SessionSeedProvider for FixedSessionSeed {
    fn current_session_seed(&self) -> Option<String> {
        Some(self.0.clone())
    }
}

impl<F> SessionSeedProvider for F
where
    F: Fn() -> Option<String>,
{
    fn current_session_seed(&self) -> Option<String> {
        self()
    }
}
