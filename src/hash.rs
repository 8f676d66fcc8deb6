//! Hash provider: the registered hash functions and the double-hashed probe
//! sequences they generate.
//!
//! `DoubleHash` turns `(key, capacity)` into a deterministic walk over slot
//! indices: the primary hash picks the starting slot, the secondary hash
//! picks the stride. The stride is reduced into `[1, capacity - 1]`, so a
//! walk always advances and never strides a whole lap; it visits every slot
//! exactly once whenever the stride is coprime with the capacity. Prime
//! capacities make that hold for every key, which is why the dictionary
//! documents prime capacities as a precondition instead of checking them.

use core::hash::Hasher;
use fnv::FnvHasher;

/// djb2: `h = h * 33 + byte`, seeded with 5381, wrapping at u64.
///
/// Implements [`core::hash::Hasher`] so it can also serve as a drop-in
/// hasher via `BuildHasherDefault<Djb2Hasher>`, mirroring how
/// [`fnv::FnvHasher`] is used.
#[derive(Clone, Debug)]
pub struct Djb2Hasher(u64);

impl Default for Djb2Hasher {
    fn default() -> Self {
        Djb2Hasher(5381)
    }
}

impl Hasher for Djb2Hasher {
    fn write(&mut self, bytes: &[u8]) {
        for &b in bytes {
            self.0 = self.0.wrapping_mul(33).wrapping_add(u64::from(b));
        }
    }

    fn finish(&self) -> u64 {
        self.0
    }
}

/// The registered hash functions, selectable by name.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum HashFn {
    /// Multiplicative bit mixer (djb2); the stock primary function.
    Djb2,
    /// Byte accumulator (FNV-1a, 64-bit); the stock secondary function.
    Fnv1a,
}

/// Name/function pairs accepted by [`HashFn::by_name`].
pub const REGISTRY: &[(&str, HashFn)] = &[("djb2", HashFn::Djb2), ("fnv1a", HashFn::Fnv1a)];

impl HashFn {
    /// Looks up a function by its registered name.
    pub fn by_name(name: &str) -> Option<HashFn> {
        REGISTRY.iter().find(|(n, _)| *n == name).map(|&(_, f)| f)
    }

    pub fn name(self) -> &'static str {
        match self {
            HashFn::Djb2 => "djb2",
            HashFn::Fnv1a => "fnv1a",
        }
    }

    /// Hashes `bytes` with this function. Pure: same input, same output.
    pub fn hash(self, bytes: &[u8]) -> u64 {
        match self {
            HashFn::Djb2 => {
                let mut h = Djb2Hasher::default();
                h.write(bytes);
                h.finish()
            }
            HashFn::Fnv1a => {
                let mut h = FnvHasher::default();
                h.write(bytes);
                h.finish()
            }
        }
    }
}

/// A primary/secondary pairing driving double-hashed probing.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct DoubleHash {
    primary: HashFn,
    secondary: HashFn,
}

impl Default for DoubleHash {
    /// The stock pairing: djb2 primary, FNV-1a secondary.
    fn default() -> Self {
        DoubleHash::new(HashFn::Djb2, HashFn::Fnv1a)
    }
}

impl DoubleHash {
    pub fn new(primary: HashFn, secondary: HashFn) -> Self {
        DoubleHash { primary, secondary }
    }

    pub fn primary(&self) -> HashFn {
        self.primary
    }

    pub fn secondary(&self) -> HashFn {
        self.secondary
    }

    /// Stride for `key` in a table of `capacity` slots, in
    /// `[1, capacity - 1]`. Pinned to 1 when there is a single slot.
    fn stride(&self, key: &str, capacity: usize) -> usize {
        if capacity > 1 {
            (self.secondary.hash(key.as_bytes()) % (capacity as u64 - 1)) as usize + 1
        } else {
            1
        }
    }

    /// Slot visited on `attempt` of the walk for `key`:
    /// `(primary + attempt * stride) mod capacity`, always in
    /// `[0, capacity)`. Panics if `capacity` is zero.
    pub fn slot(&self, key: &str, attempt: usize, capacity: usize) -> usize {
        assert!(capacity > 0, "capacity must be positive");
        let h1 = self.primary.hash(key.as_bytes());
        let stride = self.stride(key, capacity);
        // Exact over u128: both factors are already reduced below capacity.
        let cap = capacity as u128;
        ((h1 as u128 % cap + (attempt as u128 % cap) * stride as u128) % cap) as usize
    }

    /// Endless iterator over the walk for `key`; callers bound it, the
    /// dictionary with `.take(capacity)`. Panics if `capacity` is zero.
    pub fn probe(&self, key: &str, capacity: usize) -> ProbeSeq {
        assert!(capacity > 0, "capacity must be positive");
        ProbeSeq {
            pos: (self.primary.hash(key.as_bytes()) % capacity as u64) as usize,
            stride: self.stride(key, capacity),
            capacity,
        }
    }
}

/// The slot indices probed for one key, in order. Never terminates on its
/// own.
#[derive(Clone, Debug)]
pub struct ProbeSeq {
    pos: usize,
    stride: usize,
    capacity: usize,
}

impl Iterator for ProbeSeq {
    type Item = usize;

    fn next(&mut self) -> Option<usize> {
        let cur = self.pos;
        self.pos = (self.pos + self.stride) % self.capacity;
        Some(cur)
    }
}
