//! Look-ahead preview of the branching run.
//!
//! Each level asks the selector for both directions, then assumes the chosen
//! boss is defeated on a cloned state and recurses. When both directions
//! resolve to the same boss the branches are merged into one node.
use crate::constants::PREVIEW_NODE_LIMIT;
use crate::error::PathError;
use crate::pool;
use crate::roster::{BossEntry, Direction, Roster};
use crate::selector::{self, SelectionRoute};
use crate::state::PathState;
use serde::Serialize;
use smallvec::{SmallVec, smallvec};
use std::fmt::Write as _;

/// One hypothetical encounter in the preview.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PathNode {
    pub boss: BossEntry,
    /// Directions that lead here; two entries when both branches agree.
    pub via: SmallVec<[Direction; 2]>,
    pub route: SelectionRoute,
    pub children: Vec<PathNode>,
}

impl PathNode {
    #[must_use]
    pub fn is_final(&self) -> bool {
        self.route == SelectionRoute::Converged
    }

    fn via_label(&self) -> &'static str {
        match self.via.as_slice() {
            [Direction::Left] => "L",
            [Direction::Right] => "R",
            _ => "L/R",
        }
    }
}

/// Preview of every distinct path up to a fixed depth.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PathTree {
    pub seed: String,
    pub depth: usize,
    pub roots: Vec<PathNode>,
    /// Expansion stopped at [`PREVIEW_NODE_LIMIT`] before reaching `depth`.
    pub truncated: bool,
}

impl PathTree {
    /// Number of nodes across all levels.
    #[must_use]
    pub fn node_count(&self) -> usize {
        fn count(nodes: &[PathNode]) -> usize {
            nodes.iter().map(|n| 1 + count(&n.children)).sum()
        }
        count(&self.roots)
    }

    /// Indented ASCII rendering, headed by the seed.
    #[must_use]
    pub fn render(&self) -> String {
        let mut out = format!("[SEED: {}]\n", self.seed);
        render_level(&self.roots, "", &mut out);
        if self.truncated {
            out.push_str("... (truncated)\n");
        }
        out
    }
}

fn render_level(nodes: &[PathNode], prefix: &str, out: &mut String) {
    for (i, node) in nodes.iter().enumerate() {
        let last = i + 1 == nodes.len();
        let branch = if last { "`-- " } else { "+-- " };
        let suffix = if node.is_final() { " (final)" } else { "" };
        let _ = writeln!(
            out,
            "{prefix}{branch}{}: {}{suffix}",
            node.via_label(),
            node.boss.id
        );
        let child_prefix = format!("{prefix}{}", if last { "    " } else { "|   " });
        render_level(&node.children, &child_prefix, out);
    }
}

/// Build a preview `depth` levels deep without touching `state`.
///
/// Depth is capped at the roster size, the longest any run can be, and the
/// tree at [`PREVIEW_NODE_LIMIT`] nodes, filled depth-first.
///
/// # Errors
///
/// Propagates selector errors; none occur for a roster-consistent state.
pub fn build(roster: &Roster, state: &PathState, depth: usize) -> Result<PathTree, PathError> {
    build_limited(roster, state, depth, PREVIEW_NODE_LIMIT)
}

fn build_limited(
    roster: &Roster,
    state: &PathState,
    depth: usize,
    limit: usize,
) -> Result<PathTree, PathError> {
    let depth = depth.min(roster.len());
    let mut budget = Budget {
        remaining: limit,
        truncated: false,
    };
    let roots = expand(roster, state, depth, &mut budget)?;
    Ok(PathTree {
        seed: state.seed.clone(),
        depth,
        roots,
        truncated: budget.truncated,
    })
}

struct Budget {
    remaining: usize,
    truncated: bool,
}

fn expand(
    roster: &Roster,
    state: &PathState,
    depth: usize,
    budget: &mut Budget,
) -> Result<Vec<PathNode>, PathError> {
    if depth == 0 || pool::available(roster, state).is_empty() {
        return Ok(Vec::new());
    }
    if budget.remaining == 0 {
        budget.truncated = true;
        return Ok(Vec::new());
    }

    let left = selector::select(roster, state, Direction::Left)?;
    let right = selector::select(roster, state, Direction::Right)?;

    let branches: SmallVec<[(BossEntry, SmallVec<[Direction; 2]>, SelectionRoute); 2]> =
        if left.boss == right.boss {
            let route = left.route;
            smallvec![(left.boss, smallvec![Direction::Left, Direction::Right], route)]
        } else {
            smallvec![
                (left.boss, smallvec![Direction::Left], left.route),
                (right.boss, smallvec![Direction::Right], right.route),
            ]
        };

    let mut nodes = Vec::with_capacity(branches.len());
    for (boss, via, route) in branches {
        if budget.remaining == 0 {
            budget.truncated = true;
            break;
        }
        budget.remaining -= 1;
        let mut next = state.clone();
        next.insert_defeated(&boss.id);
        nodes.push(PathNode {
            children: expand(roster, &next, depth - 1, budget)?,
            boss,
            via,
            route,
        });
    }
    Ok(nodes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_depth_is_empty() {
        let tree = build(Roster::standard(), &PathState::new("ABC123"), 0).unwrap();
        assert!(tree.roots.is_empty());
        assert_eq!(tree.render(), "[SEED: ABC123]\n");
    }

    #[test]
    fn first_level_matches_the_selector() {
        let roster = Roster::standard();
        let state = PathState::new("ABC123");
        let tree = build(roster, &state, 1).unwrap();
        assert_eq!(tree.roots.len(), 2);
        let left = selector::select_entry(roster, &state, Direction::Left).unwrap();
        let right = selector::select_entry(roster, &state, Direction::Right).unwrap();
        assert_eq!(tree.roots[0].boss, left);
        assert_eq!(tree.roots[1].boss, right);
        assert!(tree.roots.iter().all(|n| n.children.is_empty()));
    }

    #[test]
    fn full_depth_ends_in_final_bosses() {
        let roster = Roster::standard();
        let tree = build(roster, &PathState::new("DEEP42"), 99).unwrap();
        assert_eq!(tree.depth, roster.len());

        fn leaves_are_final(node: &PathNode) -> bool {
            if node.children.is_empty() {
                node.is_final()
            } else {
                node.children.iter().all(leaves_are_final)
            }
        }
        assert!(tree.roots.iter().all(leaves_are_final));
        assert!(tree.node_count() > roster.len());
    }

    #[test]
    fn converged_state_merges_branches() {
        let roster = Roster::standard();
        let mut state = PathState::new("LAST01");
        for id in ["Pride", "Greed", "Lust", "Sloth", "Wrath", "Envy", "Gluttony"] {
            state.insert_defeated(id);
        }
        let tree = build(roster, &state, 3).unwrap();
        assert_eq!(tree.roots.len(), 1);
        assert_eq!(tree.roots[0].boss.id, "Devil");
        assert_eq!(tree.render(), "[SEED: LAST01]\n`-- L/R: Devil (final)\n");
    }

    #[test]
    fn standard_roster_fits_under_the_node_limit() {
        let tree = build(Roster::standard(), &PathState::new("DEEP42"), 8).unwrap();
        assert!(!tree.truncated);
        assert!(tree.node_count() < PREVIEW_NODE_LIMIT);
    }

    #[test]
    fn large_rosters_stop_at_the_node_limit() {
        let bosses = (0..22)
            .map(|i| {
                let affinity = Direction::from_is_left(i % 2 == 0);
                BossEntry::new(format!("Boss{i:02}"), affinity)
            })
            .collect();
        let roster = Roster::new(bosses).unwrap();
        let tree = build(&roster, &PathState::new("WIDE22"), 22).unwrap();
        assert_eq!(tree.depth, 22);
        assert!(tree.truncated);
        assert_eq!(tree.node_count(), PREVIEW_NODE_LIMIT);
        assert!(tree.render().ends_with("... (truncated)\n"));
    }

    #[test]
    fn small_limit_truncates_depth_first() {
        let tree = build_limited(Roster::standard(), &PathState::new("ABC123"), 3, 3).unwrap();
        assert!(tree.truncated);
        assert_eq!(tree.node_count(), 3);
        assert_eq!(tree.roots.len(), 1);
        assert_eq!(tree.roots[0].children.len(), 1);
        assert_eq!(tree.roots[0].children[0].children.len(), 1);
    }

    #[test]
    fn build_leaves_input_untouched() {
        let state = PathState::new("PURE00");
        let before = state.clone();
        let _ = build(Roster::standard(), &state, 4).unwrap();
        assert_eq!(state, before);
    }
}
