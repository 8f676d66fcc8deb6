#![cfg(test)]

// Property tests for Dict kept inside the crate so they can check internal
// occupancy against the public probe API.

use crate::dict::Dict;
use crate::error::Error;
use crate::value::Value;
use proptest::prelude::*;
use proptest::test_runner::TestCaseError;
use std::collections::HashMap;

fn arb_value() -> impl Strategy<Value = Value> {
    prop_oneof![
        any::<i64>().prop_map(Value::Int),
        (-1.0e9f64..1.0e9f64).prop_map(Value::Float),
        "[a-z]{0,8}".prop_map(Value::Text),
    ]
}

// Pool-indexed operations to improve shrinking: indices shrink to earlier
// keys, pool length shrinks, and op lists shrink in length.
#[derive(Clone, Debug)]
enum OpI {
    Insert(usize, Value),
    Update(usize, Value),
    Get(usize),
    Contains(usize),
    Clear,
}

fn arb_scenario() -> impl Strategy<Value = (usize, Vec<String>, Vec<OpI>)> {
    (
        proptest::sample::select(vec![3usize, 7, 13]),
        proptest::collection::vec("[a-z]{0,5}", 1..=8),
    )
        .prop_flat_map(|(capacity, pool)| {
            let idxs: Vec<usize> = (0..pool.len()).collect();
            let idx = proptest::sample::select(idxs);
            let op = prop_oneof![
                4 => (idx.clone(), arb_value()).prop_map(|(i, v)| OpI::Insert(i, v)),
                4 => (idx.clone(), arb_value()).prop_map(|(i, v)| OpI::Update(i, v)),
                3 => idx.clone().prop_map(OpI::Get),
                2 => idx.clone().prop_map(OpI::Contains),
                1 => Just(OpI::Clear),
            ];
            proptest::collection::vec(op, 1..60)
                .prop_map(move |ops| (capacity, pool.clone(), ops))
        })
}

// Checks the occupancy invariant through the public hash API: every occupied
// slot's key walks back to exactly that slot before meeting an empty slot.
fn check_resolution(sut: &Dict) -> std::result::Result<(), TestCaseError> {
    let cap = sut.capacity();
    let occupied = sut.occupied();
    prop_assert_eq!(occupied.len(), sut.len());

    let by_index: HashMap<usize, &str> =
        occupied.iter().map(|(i, k)| (*i, k.as_str())).collect();
    for (idx, key) in &occupied {
        let mut resolved = None;
        for probe_idx in sut.hasher().probe(key, cap).take(cap) {
            match by_index.get(&probe_idx) {
                Some(k) if *k == key => {
                    resolved = Some(probe_idx);
                    break;
                }
                Some(_) => {}
                None => break,
            }
        }
        prop_assert_eq!(resolved, Some(*idx), "key {:?} must re-resolve to its slot", key);
    }
    Ok(())
}

// Property: state-machine equivalence against std::collections::HashMap for
// insert/update/get/contains/clear on prime capacities (no removals, so an
// absent key is exactly a model miss). Invariants exercised per op:
// - insert rejects duplicates and reports Full exactly at len == capacity;
// - update preserves the stored variant and rejects mismatches;
// - get round-trips the model value; contains_key parity;
// - len/is_empty parity and slot re-resolution after every op.
proptest! {
    #![proptest_config(ProptestConfig { cases: 64, .. ProptestConfig::default() })]
    #[test]
    fn prop_state_machine((capacity, pool, ops) in arb_scenario()) {
        let mut sut = Dict::new(capacity).expect("prime capacity");
        let mut model: HashMap<String, Value> = HashMap::new();

        for op in ops {
            match op {
                OpI::Insert(i, v) => {
                    let k = &pool[i];
                    let res = sut.insert(k, v.clone());
                    if model.contains_key(k) {
                        prop_assert_eq!(res, Err(Error::AlreadyInserted));
                    } else if model.len() == capacity {
                        // Prime capacity: the walk covers every slot, so
                        // exhaustion coincides with a truly full table.
                        prop_assert_eq!(res, Err(Error::Full));
                    } else {
                        prop_assert_eq!(res, Ok(()));
                        model.insert(k.clone(), v);
                    }
                }
                OpI::Update(i, v) => {
                    let k = &pool[i];
                    let res = sut.update(k, v.clone());
                    match model.get_mut(k) {
                        None => prop_assert_eq!(res, Err(Error::NotFound)),
                        Some(stored) => {
                            if stored.kind() == v.kind() {
                                prop_assert_eq!(res, Ok(()));
                                *stored = v;
                            } else {
                                prop_assert_eq!(res, Err(Error::TypeMismatch));
                            }
                        }
                    }
                }
                OpI::Get(i) => {
                    let k = &pool[i];
                    match model.get(k) {
                        None => prop_assert_eq!(sut.get(k), Err(Error::NotFound)),
                        Some(v) => prop_assert_eq!(sut.get(k), Ok(v.clone())),
                    }
                }
                OpI::Contains(i) => {
                    let k = &pool[i];
                    prop_assert_eq!(sut.contains_key(k), model.contains_key(k));
                }
                OpI::Clear => {
                    sut.clear();
                    model.clear();
                }
            }

            // Post-conditions after each op
            prop_assert_eq!(sut.len(), model.len());
            prop_assert_eq!(sut.is_empty(), model.is_empty());
            check_resolution(&sut)?;
        }
    }
}

// Property: on a composite capacity the walk stays bounded. Whenever insert
// reports Full, the key's entire walk is verified to sit on occupied slots
// held by other keys; len never drifts from the number of successes.
proptest! {
    #![proptest_config(ProptestConfig { cases: 64, .. ProptestConfig::default() })]
    #[test]
    fn prop_bounded_walk_on_composite_capacity(
        keys in proptest::collection::vec("[a-z]{1,6}", 1..40),
    ) {
        let capacity = 8usize;
        let mut sut = Dict::new(capacity).expect("create");
        let mut inserted: HashMap<String, i64> = HashMap::new();

        for (n, k) in keys.iter().enumerate() {
            match sut.insert_int(k, n as i64) {
                Ok(()) => {
                    prop_assert!(!inserted.contains_key(k));
                    inserted.insert(k.clone(), n as i64);
                }
                Err(Error::AlreadyInserted) => {
                    prop_assert!(inserted.contains_key(k));
                }
                Err(Error::Full) => {
                    prop_assert!(!inserted.contains_key(k));
                    let by_index: HashMap<usize, String> =
                        sut.occupied().into_iter().collect();
                    for idx in sut.hasher().probe(k, capacity).take(capacity) {
                        match by_index.get(&idx) {
                            Some(held) => prop_assert_ne!(held, k),
                            None => prop_assert!(
                                false,
                                "walk met an empty slot yet insert reported full"
                            ),
                        }
                    }
                }
                Err(e) => prop_assert!(false, "unexpected error {:?}", e),
            }
            prop_assert_eq!(sut.len(), inserted.len());
        }

        check_resolution(&sut)?;
    }
}
