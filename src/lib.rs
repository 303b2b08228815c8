//! chainset: a single-threaded, separate-chaining hash set of `i32` with
//! swappable hash strategies and probe instrumentation.
//!
//! Internal Design:
//!
//! Summary
//! - Goal: a small hash table whose behavior under different hash
//!   functions can be measured and compared, built in layers that can be
//!   reasoned about independently.
//! - Layers:
//!   - Chain: one bucket; a singly linked list of distinct values whose
//!     nodes live in a per-chain slot arena and link by key.
//!   - ChainedSet: owns the bucket array, the item count and the hash
//!     strategy; routes each value to `hash(v) % bucket_count` and grows by
//!     doubling when the load factor exceeds its threshold (0.75 unless
//!     configured otherwise).
//!   - Instrumented: a borrowing decorator that reports probe counts and
//!     elapsed time per operation without a second code path in the core.
//!
//! Constraints
//! - Single-threaded. A set holding a `Custom` strategy is `!Send`/`!Sync`
//!   because the closure is shared through `Rc`.
//! - No unsafe code. Node lifetime is structural: dropping a chain drops
//!   its arena, dropping the set drops its boxed slice of chains.
//! - The bucket count is never zero; constructors and `resize` reject it
//!   with `SetError::ZeroBuckets`.
//!
//! Growth and rehashing
//! - The threshold is checked after a successful insert, so a set never
//!   rests above it. Duplicate inserts never trigger growth.
//! - Rehashing allocates the new array, then walks the old one with the
//!   flat iterator and reinserts each value without further growth checks.
//!   In debug builds the placement and count invariants are verified after
//!   every rehash.
//!
//! Iteration
//! - `ChainedSet::iter` yields values bucket by bucket, most recent first
//!   within a bucket. Iterators compare equal only at the same position of
//!   the same table.
//!
//! Notes and non-goals
//! - Removing while iterating is rejected by the borrow checker.
//! - Hash strategies are for distribution experiments, not security.
//! - Cloning reinserts through the public insert path, keeping the bucket
//!   count and sharing a custom closure.

pub mod chain;
mod chained_set;
#[cfg(test)]
mod chained_set_proptest;
mod config;
mod error;
pub mod hashing;
pub mod instrument;

// Public surface
pub use chain::Probe;
pub use chained_set::{ChainedSet, Iter, TableStats};
pub use config::{SetConfig, DEFAULT_BUCKETS, DEFAULT_MAX_LOAD_FACTOR};
pub use error::SetError;
pub use hashing::{HashStrategy, UnknownStrategy};
pub use instrument::{Instrumented, OpStats};
