//! Dict: the fixed-capacity slot engine.
//!
//! Slots are `Option<Entry>` in a boxed slice that never reallocates.
//! Every operation walks the key's probe sequence and stops at the first
//! slot that decides the outcome: the key itself, an empty slot, or
//! exhaustion after `capacity` attempts. Removal clears a slot straight
//! back to empty; there is no tombstone state.

use crate::error::{self, Error, Result};
use crate::hash::DoubleHash;
use crate::value::Value;

#[derive(Debug)]
struct Entry {
    key: String,
    value: Value,
}

/// Outcome of walking a key's probe sequence. A `Hit` index always holds an
/// occupied slot whose key matched.
enum Probe {
    Hit(usize),
    Vacant(usize),
    Exhausted,
}

/// A fixed-capacity string dictionary using open addressing with double
/// hashing.
///
/// Capacity is chosen at creation and never changes; `len()` counts the
/// occupied slots. Prime capacities guarantee that every key's probe walk
/// covers the whole table, which makes [`Error::Full`] equivalent to a
/// truly full table. Composite capacities are accepted, but a key whose
/// stride shares a factor with the capacity can exhaust its walk early and
/// report [`Error::Full`] while empty slots remain.
pub struct Dict {
    slots: Box<[Option<Entry>]>,
    len: usize,
    hasher: DoubleHash,
}

impl Dict {
    /// Creates a dictionary with the stock hash pairing.
    ///
    /// Fails with [`Error::InvalidCapacity`] when `capacity` is zero and
    /// with [`Error::OutOfMemory`] when the slot array cannot be allocated.
    pub fn new(capacity: usize) -> Result<Dict> {
        Self::with_hasher(capacity, DoubleHash::default())
    }

    /// Creates a dictionary probing with the given function pairing.
    pub fn with_hasher(capacity: usize, hasher: DoubleHash) -> Result<Dict> {
        error::record(Self::build(capacity, hasher))
    }

    fn build(capacity: usize, hasher: DoubleHash) -> Result<Dict> {
        if capacity == 0 {
            return Err(Error::InvalidCapacity);
        }
        let mut slots = Vec::new();
        slots
            .try_reserve_exact(capacity)
            .map_err(|_| Error::OutOfMemory)?;
        slots.resize_with(capacity, || None);
        Ok(Dict {
            slots: slots.into_boxed_slice(),
            len: 0,
            hasher,
        })
    }

    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn is_full(&self) -> bool {
        self.len == self.capacity()
    }

    pub fn hasher(&self) -> &DoubleHash {
        &self.hasher
    }

    /// Walks `key`'s probe sequence for at most `capacity` attempts.
    fn locate(&self, key: &str) -> Probe {
        let cap = self.capacity();
        for idx in self.hasher.probe(key, cap).take(cap) {
            match &self.slots[idx] {
                None => return Probe::Vacant(idx),
                Some(entry) if entry.key == key => return Probe::Hit(idx),
                Some(_) => {}
            }
        }
        Probe::Exhausted
    }

    pub fn contains_key(&self, key: &str) -> bool {
        matches!(self.locate(key), Probe::Hit(_))
    }

    /// Inserts a new key. Insert is strictly additive: a present key fails
    /// with [`Error::AlreadyInserted`] and is never overwritten. The key is
    /// copied in; the value moves in. Fails with [`Error::Full`] when the
    /// walk exhausts without finding the key or an empty slot.
    pub fn insert(&mut self, key: &str, value: Value) -> Result<()> {
        let outcome = match self.locate(key) {
            Probe::Hit(_) => Err(Error::AlreadyInserted),
            Probe::Vacant(idx) => {
                self.slots[idx] = Some(Entry {
                    key: key.to_owned(),
                    value,
                });
                self.len += 1;
                Ok(())
            }
            Probe::Exhausted => Err(Error::Full),
        };
        error::record(outcome)
    }

    /// Replaces the value stored for an existing key, keeping its variant:
    /// a value of a different variant fails with [`Error::TypeMismatch`]
    /// and leaves the stored value untouched. Fails with
    /// [`Error::NotFound`] when the walk ends without a match.
    pub fn update(&mut self, key: &str, value: Value) -> Result<()> {
        let outcome = match self.locate(key) {
            Probe::Hit(idx) => match &mut self.slots[idx] {
                Some(entry) if entry.value.kind() == value.kind() => {
                    entry.value = value;
                    Ok(())
                }
                Some(_) => Err(Error::TypeMismatch),
                None => unreachable!(),
            },
            Probe::Vacant(_) | Probe::Exhausted => Err(Error::NotFound),
        };
        error::record(outcome)
    }

    /// Returns an independent copy of the value stored for `key`, or
    /// [`Error::NotFound`] when the walk ends without a match. An empty
    /// slot on the walk counts as not found, since an insert of `key`
    /// would have used it.
    pub fn get(&self, key: &str) -> Result<Value> {
        let outcome = match self.locate(key) {
            Probe::Hit(idx) => match &self.slots[idx] {
                Some(entry) => Ok(entry.value.clone()),
                None => unreachable!(),
            },
            Probe::Vacant(_) | Probe::Exhausted => Err(Error::NotFound),
        };
        error::record(outcome)
    }

    /// Removes `key` and returns its value, resetting the slot to empty.
    ///
    /// There is no tombstone: a later key whose walk passed through the
    /// vacated slot before reaching its own will resolve as absent until
    /// reinserted. Accepted behavior for a table that never resizes.
    pub fn remove(&mut self, key: &str) -> Result<Value> {
        let outcome = match self.locate(key) {
            Probe::Hit(idx) => match self.slots[idx].take() {
                Some(entry) => {
                    self.len -= 1;
                    Ok(entry.value)
                }
                None => unreachable!(),
            },
            Probe::Vacant(_) | Probe::Exhausted => Err(Error::NotFound),
        };
        error::record(outcome)
    }

    /// Resets every slot to empty. Keeps the slot allocation and the
    /// hasher, and does not touch the last-error channel. Safe to call on
    /// an already-empty dictionary.
    pub fn clear(&mut self) {
        for slot in self.slots.iter_mut() {
            *slot = None;
        }
        self.len = 0;
    }

    // Typed wrappers over insert/update, one per Value variant.

    pub fn insert_int(&mut self, key: &str, value: i64) -> Result<()> {
        self.insert(key, Value::Int(value))
    }

    pub fn insert_float(&mut self, key: &str, value: f64) -> Result<()> {
        self.insert(key, Value::Float(value))
    }

    pub fn insert_text(&mut self, key: &str, value: &str) -> Result<()> {
        self.insert(key, Value::Text(value.to_owned()))
    }

    pub fn update_int(&mut self, key: &str, value: i64) -> Result<()> {
        self.update(key, Value::Int(value))
    }

    pub fn update_float(&mut self, key: &str, value: f64) -> Result<()> {
        self.update(key, Value::Float(value))
    }

    pub fn update_text(&mut self, key: &str, value: &str) -> Result<()> {
        self.update(key, Value::Text(value.to_owned()))
    }
}

#[cfg(test)]
impl Dict {
    /// Test support: occupied slot indices with their keys.
    pub(crate) fn occupied(&self) -> Vec<(usize, String)> {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(i, slot)| slot.as_ref().map(|e| (i, e.key.clone())))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{clear_error, last_error};
    use crate::hash::HashFn;

    /// Invariant: capacity zero is rejected at creation and recorded in the
    /// error channel; a later successful creation clears the record.
    #[test]
    fn new_rejects_zero_capacity() {
        clear_error();
        match Dict::new(0) {
            Err(Error::InvalidCapacity) => {}
            other => panic!("unexpected result: {:?}", other.map(|_| ())),
        }
        assert_eq!(last_error(), Some(Error::InvalidCapacity));

        let d = Dict::new(7).expect("valid capacity");
        assert_eq!(d.capacity(), 7);
        assert_eq!(last_error(), None);
    }

    /// Invariant: inserted values come back as equal, independent copies.
    #[test]
    fn insert_get_round_trip() {
        let mut d = Dict::new(13).expect("create");
        d.insert("i", Value::Int(-7)).expect("insert int");
        d.insert("f", Value::Float(0.5)).expect("insert float");
        d.insert("t", Value::Text("hello".to_string()))
            .expect("insert text");
        assert_eq!(d.len(), 3);
        assert!(d.contains_key("i"));

        assert_eq!(d.get("i"), Ok(Value::Int(-7)));
        assert_eq!(d.get("f"), Ok(Value::Float(0.5)));
        assert_eq!(d.get("t"), Ok(Value::Text("hello".to_string())));
        assert_eq!(d.get("missing"), Err(Error::NotFound));
    }

    /// Invariant: duplicate keys are rejected and the stored value remains
    /// unchanged, regardless of the new value's variant.
    #[test]
    fn duplicate_insert_rejected() {
        let mut d = Dict::new(7).expect("create");
        d.insert_int("dup", 1).expect("first insert");
        assert_eq!(d.insert_int("dup", 2), Err(Error::AlreadyInserted));
        assert_eq!(d.insert_text("dup", "two"), Err(Error::AlreadyInserted));
        assert_eq!(d.len(), 1);
        assert_eq!(d.get("dup"), Ok(Value::Int(1)));
    }

    /// Invariant: update replaces a value in place but never its variant;
    /// a mismatch leaves the stored value untouched.
    #[test]
    fn update_requires_matching_kind() {
        let mut d = Dict::new(7).expect("create");
        d.insert_text("greeting", "hi").expect("insert");

        assert_eq!(d.update_int("greeting", 1), Err(Error::TypeMismatch));
        assert_eq!(d.get("greeting"), Ok(Value::Text("hi".to_string())));

        d.update_text("greeting", "bye").expect("same-kind update");
        assert_eq!(d.get("greeting"), Ok(Value::Text("bye".to_string())));
        assert_eq!(d.len(), 1);

        assert_eq!(d.update_int("absent", 1), Err(Error::NotFound));
    }

    /// Invariant: remove returns the stored value, frees its slot, and the
    /// key can be inserted again afterward.
    #[test]
    fn remove_returns_value_and_frees_slot() {
        let mut d = Dict::new(7).expect("create");
        d.insert_int("k", 42).expect("insert");
        assert_eq!(d.remove("k"), Ok(Value::Int(42)));
        assert_eq!(d.len(), 0);
        assert!(!d.contains_key("k"));
        assert_eq!(d.get("k"), Err(Error::NotFound));
        assert_eq!(d.remove("k"), Err(Error::NotFound));

        d.insert_int("k", 43).expect("reinsert");
        assert_eq!(d.get("k"), Ok(Value::Int(43)));
    }

    /// Invariant: clear empties the table without shrinking it and may be
    /// called repeatedly; the table stays usable afterward.
    #[test]
    fn clear_is_idempotent_and_retains_capacity() {
        let mut d = Dict::new(13).expect("create");
        for i in 0..5i64 {
            d.insert_int(&format!("key_{}", i), i).expect("insert");
        }
        assert_eq!(d.len(), 5);

        d.clear();
        assert_eq!(d.len(), 0);
        assert!(d.is_empty());
        assert_eq!(d.capacity(), 13);

        d.clear();
        assert_eq!(d.len(), 0);

        d.insert_int("key_0", 100).expect("insert after clear");
        assert_eq!(d.get("key_0"), Ok(Value::Int(100)));
    }

    /// Invariant: with a prime capacity the table fills to capacity, and
    /// one more distinct key fails with Full.
    #[test]
    fn full_table_rejects_insert() {
        let mut d = Dict::new(3).expect("create");
        for key in ["a", "b", "c"] {
            d.insert_int(key, 0).expect("prime capacity always finds a slot");
        }
        assert!(d.is_full());
        assert_eq!(d.insert_int("d", 0), Err(Error::Full));
        assert_eq!(d.len(), 3);
    }

    /// Invariant: a single-slot table bounds every walk to one attempt.
    #[test]
    fn single_slot_walk_is_bounded() {
        let mut d = Dict::new(1).expect("create");
        d.insert_int("solo", 1).expect("insert");
        assert_eq!(d.insert_int("other", 2), Err(Error::Full));
        assert_eq!(d.get("other"), Err(Error::NotFound));
        assert_eq!(d.remove("solo"), Ok(Value::Int(1)));
        d.insert_int("other", 2).expect("slot free again");
        assert_eq!(d.get("other"), Ok(Value::Int(2)));
    }

    /// Invariant: a caller-chosen pairing is used for probing and reported
    /// back by `hasher()`.
    #[test]
    fn custom_pairing_round_trip() {
        let pairing = DoubleHash::new(HashFn::Fnv1a, HashFn::Djb2);
        let mut d = Dict::with_hasher(13, pairing).expect("create");
        assert_eq!(d.hasher().primary(), HashFn::Fnv1a);
        assert_eq!(d.hasher().secondary(), HashFn::Djb2);

        for i in 0..8i64 {
            d.insert_int(&format!("key_{}", i), i).expect("insert");
        }
        for i in 0..8i64 {
            assert_eq!(d.get(&format!("key_{}", i)), Ok(Value::Int(i)));
        }
    }

    /// Invariant: every occupied slot re-resolves to itself through the
    /// public hash API within `capacity` attempts.
    #[test]
    fn occupied_slots_re_resolve() {
        let mut d = Dict::new(13).expect("create");
        for i in 0..9i64 {
            d.insert_int(&format!("key_{}", i), i).expect("insert");
        }
        let cap = d.capacity();
        for (idx, key) in d.occupied() {
            let resolved = d
                .hasher()
                .probe(&key, cap)
                .take(cap)
                .find(|&p| p == idx);
            assert_eq!(resolved, Some(idx), "key {:?} must reach its slot", key);
        }
        assert_eq!(d.occupied().len(), d.len());
    }
}
