//! fixed-dict: a fixed-capacity string dictionary using open addressing
//! with double hashing, storing tagged Int/Float/Text values.
//!
//! Internal Design:
//!
//! Summary
//! - Goal: a pre-sized table for small-footprint use; no growth, no
//!   rehashing, predictable worst-case work (at most `capacity` probes per
//!   operation).
//! - Layers:
//!   - hash: the registered hash functions (djb2 and FNV-1a), the
//!     `DoubleHash` pairing, and the `ProbeSeq` walk it generates for a
//!     key.
//!   - dict: the slot engine; owns the fixed `Option<Entry>` array, walks
//!     probe sequences, and enforces occupancy bookkeeping.
//!   - value/error: the tagged payload and the outcome channel shared by
//!     every operation.
//!
//! Constraints
//! - Fixed capacity: chosen at creation, immutable afterward; `len()`
//!   never exceeds it.
//! - Additive insert: duplicate keys are rejected, never overwritten.
//! - Bounded walks: every operation probes at most `capacity` slots, so a
//!   stride sharing a factor with the capacity surfaces as `Error::Full`
//!   instead of looping. Prime capacities make every walk cover the whole
//!   table; the constructors accept any positive capacity and document the
//!   prime recommendation rather than checking it.
//! - No tombstones: removal empties the slot immediately. Removing a key
//!   can shadow a later key whose walk passed through the vacated slot;
//!   accepted for a table that never resizes (see `Dict::remove`).
//! - Single-threaded: mutation requires `&mut Dict`, so the borrow checker
//!   serializes access to an instance; the last-error channel is
//!   per-thread state and never crosses threads.
//!
//! Ownership
//! - Keys are copied in from `&str`; values move in. `get` and `remove`
//!   hand back independent owned values; a `Text` payload never aliases
//!   the stored string. Dropping the dictionary releases every owned key
//!   and payload with the slot array.
//!
//! Error reporting
//! - Operations return `Result` for control flow and also record their
//!   outcome in a per-thread cell read by [`last_error`]; success stores
//!   "no error". `clear` and the read-only accessors do not record.

mod dict;
mod dict_proptest;
mod error;
pub mod hash;
mod value;

// Public surface
pub use dict::Dict;
pub use error::{clear_error, last_error, Error, Result};
pub use hash::{Djb2Hasher, DoubleHash, HashFn, ProbeSeq};
pub use value::{Value, ValueKind};
