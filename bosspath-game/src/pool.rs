//! Pool tracking: which bosses remain and whether the branches have converged.
use crate::roster::{Direction, Roster};
use crate::state::PathState;
use smallvec::SmallVec;

/// Borrowed boss ids, inline for rosters up to the reference size.
pub type BossIds<'a> = SmallVec<[&'a str; 8]>;

/// Roster ids not yet defeated, in roster order.
#[must_use]
pub fn available<'a>(roster: &'a Roster, state: &PathState) -> BossIds<'a> {
    roster
        .all_ids()
        .filter(|id| !state.is_defeated(id))
        .collect()
}

/// Available ids restricted to one affinity group.
#[must_use]
pub fn available_by_affinity<'a>(
    roster: &'a Roster,
    state: &PathState,
    affinity: Direction,
) -> BossIds<'a> {
    roster
        .ids_with(affinity)
        .filter(|id| !state.is_defeated(id))
        .collect()
}

/// True once at most one boss remains; both branches then lead to it.
#[must_use]
pub fn is_converged(roster: &Roster, state: &PathState) -> bool {
    available(roster, state).len() <= 1
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state_with(defeated: &[&str]) -> PathState {
        let mut state = PathState::new("POOL01");
        for id in defeated {
            state.insert_defeated(id);
        }
        state
    }

    #[test]
    fn fresh_pool_is_the_full_roster() {
        let roster = Roster::standard();
        let state = state_with(&[]);
        assert_eq!(available(roster, &state).len(), 8);
        assert!(!is_converged(roster, &state));
    }

    #[test]
    fn defeated_ids_leave_the_pool() {
        let roster = Roster::standard();
        let state = state_with(&["Greed", "Envy"]);
        let pool = available(roster, &state);
        assert!(!pool.contains(&"Greed"));
        assert!(!pool.contains(&"Envy"));
        assert_eq!(
            available_by_affinity(roster, &state, Direction::Left).as_slice(),
            ["Pride", "Lust", "Sloth"]
        );
        assert_eq!(
            available_by_affinity(roster, &state, Direction::Right).as_slice(),
            ["Wrath", "Gluttony", "Devil"]
        );
    }

    #[test]
    fn converges_with_one_or_zero_left() {
        let roster = Roster::standard();
        let all: Vec<&str> = roster.all_ids().collect();
        assert!(!is_converged(roster, &state_with(&all[..6])));
        assert!(is_converged(roster, &state_with(&all[..7])));
        assert!(is_converged(roster, &state_with(&all)));
    }
}
