use std::collections::{BTreeMap, HashSet};
use std::hash::Hasher;

use bosspath_game::{Direction, PathEngine, Roster, generate_seed};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use twox_hash::XxHash64;

/// Play a whole run choosing branches from `choices`, returning its trace.
fn play(seed: &str, choices: &mut ChaCha8Rng) -> String {
    let mut engine = PathEngine::with_seed(seed);
    let mut trace = vec![engine.path_tree_visualization()];
    while !engine.is_run_complete() {
        let direction = if choices.gen_bool(0.5) {
            Direction::Left
        } else {
            Direction::Right
        };
        let selection = engine.explain_next(direction).unwrap();
        trace.push(format!(
            "{:?} {:?} {} #{}",
            direction, selection.route, selection.boss.id, selection.index
        ));
        engine.mark_boss_as_defeated(&selection.boss.id).unwrap();
    }
    trace.join("\n")
}

fn trace_hash(trace: &str) -> u64 {
    let mut hasher = XxHash64::with_seed(0);
    hasher.write(trace.as_bytes());
    hasher.finish()
}

#[test]
fn replays_produce_identical_digests() {
    for n in 0..32_u64 {
        let seed = generate_seed(&mut ChaCha8Rng::seed_from_u64(n));
        let first = play(&seed, &mut ChaCha8Rng::seed_from_u64(n ^ 0xAA));
        let second = play(&seed, &mut ChaCha8Rng::seed_from_u64(n ^ 0xAA));
        assert_eq!(trace_hash(&first), trace_hash(&second), "trace diverged\n{first}");
    }
}

#[test]
fn seeds_change_the_outcome() {
    let digests: HashSet<u64> = (0..64_u64)
        .map(|n| {
            let seed = generate_seed(&mut ChaCha8Rng::seed_from_u64(n));
            trace_hash(&play(&seed, &mut ChaCha8Rng::seed_from_u64(1)))
        })
        .collect();
    assert!(digests.len() > 1);
}

#[test]
fn every_boss_is_reachable_as_a_first_pick() {
    let roster = Roster::standard();
    let mut counts: BTreeMap<String, usize> = BTreeMap::new();
    let mut rng = ChaCha8Rng::seed_from_u64(0xD15C);
    for _ in 0..512 {
        let engine = PathEngine::with_seed(&generate_seed(&mut rng));
        let (left, right) = engine.preview_next_choices().unwrap();
        *counts.entry(left.id).or_default() += 1;
        *counts.entry(right.id).or_default() += 1;
    }
    for id in roster.all_ids() {
        assert!(counts.get(id).copied().unwrap_or(0) > 0, "{id} never chosen");
    }
}
