//! Deterministic boss selection.
//!
//! A selection is a pure function of `(seed, defeated set, direction)`. There
//! is no advancing random stream: the candidate pool is sorted, hashed
//! together with the seed and a direction tag, and indexed by the hash.
use crate::constants::{FNV32_OFFSET, FNV32_PRIME, HASH_FIELD_SEPARATOR};
use crate::error::PathError;
use crate::pool::{self, BossIds};
use crate::roster::{BossEntry, Direction, Roster};
use crate::state::PathState;
use serde::{Deserialize, Serialize};

/// Which rule produced a selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SelectionRoute {
    /// Picked from the requested direction's own group.
    Affinity,
    /// The requested group was exhausted; borrowed from the other one.
    Fallback,
    /// One boss left; direction ignored.
    Converged,
}

/// A selected boss plus the trace of how it was chosen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Selection {
    pub boss: BossEntry,
    pub requested: Direction,
    pub route: SelectionRoute,
    pub candidates: Vec<String>,
    pub hash: u32,
    pub index: usize,
}

pub(crate) fn fnv1a32(bytes: &[u8], mut hash: u32) -> u32 {
    for b in bytes {
        hash = (hash ^ u32::from(*b)).wrapping_mul(FNV32_PRIME);
    }
    hash
}

/// Hash of seed, direction tag and sorted candidates.
#[must_use]
pub fn selection_hash(seed: &str, direction: Direction, sorted_candidates: &[&str]) -> u32 {
    let mut hash = fnv1a32(seed.as_bytes(), FNV32_OFFSET);
    hash = fnv1a32(&[HASH_FIELD_SEPARATOR], hash);
    hash = fnv1a32(direction.tag().as_bytes(), hash);
    for id in sorted_candidates {
        hash = fnv1a32(&[HASH_FIELD_SEPARATOR], hash);
        hash = fnv1a32(id.as_bytes(), hash);
    }
    hash
}

/// `hash mod len`, reduced in `u32` so no hash bits are dropped.
///
/// When `len` does not fit in `u32` the hash is already below it.
#[allow(clippy::cast_possible_truncation)]
pub(crate) fn reduce_index(hash: u32, len: usize) -> usize {
    // Lossless: the Ok value is below a usize length, and Err implies usize is wider than u32.
    u32::try_from(len).map_or(hash as usize, |len| (hash % len) as usize)
}

fn empty_pool(state: &PathState) -> PathError {
    PathError::EmptyPool {
        seed: state.seed.clone(),
    }
}

fn entry_for(roster: &Roster, id: &str) -> Result<BossEntry, PathError> {
    roster.entry(id).cloned().ok_or_else(|| PathError::unknown(id))
}

/// Select the next boss for `direction`.
///
/// # Errors
///
/// Returns [`PathError::EmptyPool`] when every roster boss is already defeated.
pub fn select(
    roster: &Roster,
    state: &PathState,
    direction: Direction,
) -> Result<Selection, PathError> {
    let remaining = pool::available(roster, state);
    if remaining.len() <= 1 {
        let Some(last) = remaining.first().copied() else {
            return Err(empty_pool(state));
        };
        log::debug!(
            "select seed={} dir={} route=converged boss={last}",
            state.seed,
            direction.label()
        );
        return Ok(Selection {
            boss: entry_for(roster, last)?,
            requested: direction,
            route: SelectionRoute::Converged,
            candidates: vec![last.to_string()],
            hash: 0,
            index: 0,
        });
    }

    let (mut candidates, route) = pick_group(roster, state, direction);
    if candidates.is_empty() {
        return Err(empty_pool(state));
    }
    candidates.sort_unstable();

    let hash = selection_hash(&state.seed, direction, &candidates);
    let index = reduce_index(hash, candidates.len());
    let chosen = candidates[index];
    log::debug!(
        "select seed={} dir={} route={route:?} candidates={} index={index} boss={chosen}",
        state.seed,
        direction.label(),
        candidates.len()
    );

    Ok(Selection {
        boss: entry_for(roster, chosen)?,
        requested: direction,
        route,
        candidates: candidates.iter().map(ToString::to_string).collect(),
        hash,
        index,
    })
}

fn pick_group<'a>(
    roster: &'a Roster,
    state: &PathState,
    direction: Direction,
) -> (BossIds<'a>, SelectionRoute) {
    let primary = pool::available_by_affinity(roster, state, direction);
    if primary.is_empty() {
        let borrowed = pool::available_by_affinity(roster, state, direction.opposite());
        (borrowed, SelectionRoute::Fallback)
    } else {
        (primary, SelectionRoute::Affinity)
    }
}

/// Select and return only the boss entry.
///
/// # Errors
///
/// Returns [`PathError::EmptyPool`] when every roster boss is already defeated.
pub fn select_entry(
    roster: &Roster,
    state: &PathState,
    direction: Direction,
) -> Result<BossEntry, PathError> {
    select(roster, state, direction).map(|selection| selection.boss)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state(seed: &str, defeated: &[&str]) -> PathState {
        let mut state = PathState::new(seed);
        for id in defeated {
            state.insert_defeated(id);
        }
        state
    }

    #[test]
    fn fnv_matches_reference_vectors() {
        assert_eq!(fnv1a32(b"", FNV32_OFFSET), 0x811c_9dc5);
        assert_eq!(fnv1a32(b"a", FNV32_OFFSET), 0xe40c_292c);
        assert_eq!(fnv1a32(b"foobar", FNV32_OFFSET), 0xbf9c_f968);
    }

    #[test]
    fn index_reduction_stays_in_u32() {
        assert_eq!(reduce_index(7, 4), 3);
        assert_eq!(reduce_index(u32::MAX, 4), 3);
        assert_eq!(reduce_index(u32::MAX, 1), 0);
        assert_eq!(reduce_index(0x8000_0001, 5), 0x8000_0001 % 5);
    }

    #[test]
    fn repeated_selection_is_stable() {
        let roster = Roster::standard();
        let s = state("ABC123", &["Envy"]);
        for dir in [Direction::Left, Direction::Right] {
            let first = select(roster, &s, dir).unwrap();
            let second = select(roster, &s, dir).unwrap();
            assert_eq!(first, second);
            assert_eq!(first.boss.affinity, dir);
            assert_eq!(first.route, SelectionRoute::Affinity);
        }
    }

    #[test]
    fn index_comes_from_the_sorted_pool() {
        let roster = Roster::standard();
        let s = state("ZZ9", &[]);
        let pick = select(roster, &s, Direction::Left).unwrap();
        assert_eq!(pick.candidates, ["Greed", "Lust", "Pride", "Sloth"]);
        let expected_hash =
            selection_hash("ZZ9", Direction::Left, &["Greed", "Lust", "Pride", "Sloth"]);
        assert_eq!(pick.hash, expected_hash);
        assert_eq!(pick.index, (expected_hash % 4) as usize);
        assert_eq!(pick.boss.id, pick.candidates[pick.index]);
    }

    #[test]
    fn exhausted_group_borrows_from_the_other() {
        let roster = Roster::standard();
        let s = state("SEED01", &["Pride", "Greed", "Lust", "Sloth"]);
        let pick = select(roster, &s, Direction::Left).unwrap();
        assert_eq!(pick.route, SelectionRoute::Fallback);
        assert_eq!(pick.boss.affinity, Direction::Right);
    }

    #[test]
    fn convergence_ignores_direction() {
        let roster = Roster::standard();
        let s = state(
            "SEED01",
            &["Pride", "Greed", "Lust", "Sloth", "Wrath", "Envy", "Devil"],
        );
        let left = select(roster, &s, Direction::Left).unwrap();
        let right = select(roster, &s, Direction::Right).unwrap();
        assert_eq!(left.boss.id, "Gluttony");
        assert_eq!(right.boss.id, "Gluttony");
        assert_eq!(left.route, SelectionRoute::Converged);
    }

    #[test]
    fn empty_pool_is_an_error() {
        let roster = Roster::standard();
        let all: Vec<&str> = roster.all_ids().collect();
        let s = state("END000", &all);
        assert_eq!(
            select_entry(roster, &s, Direction::Right),
            Err(PathError::EmptyPool {
                seed: "END000".into()
            })
        );
    }

    #[test]
    fn defeat_order_does_not_matter() {
        let roster = Roster::standard();
        let a = state("ORDER1", &["Wrath", "Pride", "Lust"]);
        let b = state("ORDER1", &["Lust", "Wrath", "Pride"]);
        for dir in [Direction::Left, Direction::Right] {
            assert_eq!(
                select_entry(roster, &a, dir).unwrap(),
                select_entry(roster, &b, dir).unwrap()
            );
        }
    }
}
