#![cfg(test)]

// Property tests for ChainedSet kept inside the crate so they can check
// bucket placement through `assert_invariants`.

use crate::chained_set::ChainedSet;
use crate::hashing::HashStrategy;
use crate::DEFAULT_BUCKETS;
use proptest::prelude::*;
use std::collections::{BTreeSet, HashSet};

// Values are drawn from a small range so that duplicates, erasures of
// present values and chain collisions are frequent.
#[derive(Clone, Debug)]
enum Op {
    Insert(i32),
    Erase(i32),
    Contains(i32),
    Resize(usize),
    Clear,
    Iterate,
    CloneCheck,
}

fn arb_op() -> impl Strategy<Value = Op> {
    let val = prop_oneof![4 => -64i32..64, 1 => any::<i32>()];
    prop_oneof![
        6 => val.clone().prop_map(Op::Insert),
        3 => val.clone().prop_map(Op::Erase),
        3 => val.prop_map(Op::Contains),
        1 => (1usize..50).prop_map(Op::Resize),
        1 => Just(Op::Clear),
        1 => Just(Op::Iterate),
        1 => Just(Op::CloneCheck),
    ]
}

fn arb_strategy() -> impl Strategy<Value = HashStrategy> {
    prop_oneof![
        Just(HashStrategy::Identity),
        Just(HashStrategy::XorShift),
        Just(HashStrategy::Jenkins),
        Just(HashStrategy::ShiftMultiply),
        // Everything lands in one chain.
        Just(HashStrategy::custom(|_| 0)),
    ]
}

fn run(sut: &mut ChainedSet, model: &mut HashSet<i32>, op: Op) -> Result<(), TestCaseError> {
    match op {
        Op::Insert(v) => {
            let before = sut.bucket_count();
            let was_new = model.insert(v);
            prop_assert_eq!(sut.insert(v), was_new);
            if !was_new {
                prop_assert_eq!(sut.bucket_count(), before, "duplicate must not grow");
            } else if sut.bucket_count() != before {
                prop_assert_eq!(sut.bucket_count(), before * 2);
            }
        }
        Op::Erase(v) => {
            let was_present = model.remove(&v);
            prop_assert_eq!(sut.erase(v), was_present);
            prop_assert!(!sut.contains(v));
        }
        Op::Contains(v) => {
            prop_assert_eq!(sut.contains(v), model.contains(&v));
        }
        Op::Resize(n) => {
            sut.resize(n).expect("nonzero bucket count");
            prop_assert_eq!(sut.bucket_count(), n);
        }
        Op::Clear => {
            sut.clear();
            model.clear();
            prop_assert_eq!(sut.bucket_count(), DEFAULT_BUCKETS);
        }
        Op::Iterate => {
            let seen: Vec<i32> = sut.iter().collect();
            prop_assert_eq!(seen.len(), sut.len());
            let unique: BTreeSet<i32> = seen.iter().copied().collect();
            prop_assert_eq!(unique.len(), seen.len(), "each element visited once");
            let expected: BTreeSet<i32> = model.iter().copied().collect();
            prop_assert_eq!(unique, expected);
        }
        Op::CloneCheck => {
            let c = sut.clone();
            c.assert_invariants();
            // Reinsertion reruns the growth check, so an overloaded source
            // yields a larger clone.
            prop_assert!(c.bucket_count() >= sut.bucket_count());
            if !c.is_empty() {
                prop_assert!(c.load_factor() <= c.max_load_factor());
            }
            prop_assert!(c == *sut);
        }
    }
    Ok(())
}

// Property: state-machine equivalence against std::collections::HashSet.
// Invariants exercised across random operation sequences:
// - insert/erase report exactly the model's novelty/presence.
// - contains parity with the model.
// - len equals the sum of chain lengths, and every value sits in its bucket.
// - growth only happens on a new insert, and doubles the bucket count.
// - iteration yields each element exactly once.
proptest! {
    #![proptest_config(ProptestConfig { cases: 64, .. ProptestConfig::default() })]
    #[test]
    fn prop_state_machine(
        strategy in arb_strategy(),
        buckets in 1usize..16,
        ops in proptest::collection::vec(arb_op(), 1..120),
    ) {
        let mut sut = ChainedSet::with_buckets(buckets, strategy).unwrap();
        let mut model = HashSet::new();
        for op in ops {
            run(&mut sut, &mut model, op)?;
            sut.assert_invariants();
            prop_assert_eq!(sut.len(), model.len());
            prop_assert_eq!(sut.is_empty(), model.is_empty());
            prop_assert_eq!(sut.chain_lens().sum::<usize>(), sut.len());
        }
    }
}

// Property: growth preserves membership for arbitrary value sets, starting
// from a single bucket so that several rehashes happen.
proptest! {
    #![proptest_config(ProptestConfig { cases: 64, .. ProptestConfig::default() })]
    #[test]
    fn prop_growth_preserves_membership(
        strategy in arb_strategy(),
        values in proptest::collection::hash_set(any::<i32>(), 0..400),
        probes in proptest::collection::vec(any::<i32>(), 0..50),
    ) {
        let mut sut = ChainedSet::with_buckets(1, strategy).unwrap();
        for &v in &values {
            prop_assert!(sut.insert(v));
        }
        sut.assert_invariants();
        prop_assert_eq!(sut.len(), values.len());
        for &v in &values {
            prop_assert!(sut.contains(v));
        }
        for v in probes {
            prop_assert_eq!(sut.contains(v), values.contains(&v));
        }
    }
}
