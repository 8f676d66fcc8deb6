//! Error: outcome kinds and the per-thread last-error channel.
//!
//! Every recording operation stores its outcome here as well as returning it,
//! so callers can use plain `Result` control flow and still fetch the most
//! recent outcome for diagnostics. The channel is thread-local state: a
//! thread only ever observes its own operations.

use std::cell::Cell;

/// Outcome kinds reported by dictionary operations.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, thiserror::Error)]
pub enum Error {
    /// A capacity of zero was requested.
    #[error("invalid capacity (must be > 0)")]
    InvalidCapacity,
    /// The slot array could not be allocated.
    #[error("memory allocation failed")]
    OutOfMemory,
    /// `insert` found the key already present; insert never overwrites.
    #[error("key already inserted")]
    AlreadyInserted,
    /// The probe walk ended, at an empty slot or by exhaustion, without a
    /// key match.
    #[error("key not found")]
    NotFound,
    /// `update` offered a value of a different variant than the stored one.
    #[error("value type mismatch")]
    TypeMismatch,
    /// A probe walk visited `capacity` slots without finding the key or an
    /// empty slot. This can happen before every slot is occupied when the
    /// key's stride shares a factor with the capacity.
    #[error("dictionary full: probe sequence exhausted")]
    Full,
}

pub type Result<T> = std::result::Result<T, Error>;

thread_local! {
    static LAST_ERROR: Cell<Option<Error>> = const { Cell::new(None) };
}

/// Returns the calling thread's most recently recorded outcome: `None` for
/// success, `Some(kind)` for failure.
pub fn last_error() -> Option<Error> {
    LAST_ERROR.with(Cell::get)
}

/// Resets the calling thread's recorded outcome to "no error".
pub fn clear_error() {
    LAST_ERROR.with(|slot| slot.set(None));
}

/// Stores `outcome` in the calling thread's last-error slot and passes it
/// through unchanged.
pub(crate) fn record<T>(outcome: Result<T>) -> Result<T> {
    LAST_ERROR.with(|slot| slot.set(outcome.as_ref().err().copied()));
    outcome
}
