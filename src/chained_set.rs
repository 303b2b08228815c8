//! ChainedSet: a separate-chaining hash set of `i32`.
//!
//! The set owns a boxed slice of `Chain`s and routes every value to the
//! chain at `strategy.hash(v) % bucket_count`. When an insert pushes the
//! load factor above the configured threshold the bucket count doubles and
//! every element is reinserted by value into a freshly allocated array.
//!
//! Invariants
//! - `len` equals the sum of all chain lengths.
//! - Every stored `v` sits in exactly the chain at its bucket index.
//! - The bucket array is never empty.

use crate::chain::{self, Chain, Probe};
use crate::config::{SetConfig, DEFAULT_BUCKETS, DEFAULT_MAX_LOAD_FACTOR};
use crate::error::SetError;
use crate::hashing::HashStrategy;
use core::fmt;
use core::iter::FusedIterator;
use core::ops::{AddAssign, SubAssign};
use tracing::{debug, trace};

pub struct ChainedSet {
    buckets: Box<[Chain]>,
    len: usize,
    strategy: HashStrategy,
    max_load_factor: f64,
}

fn alloc_buckets(n: usize) -> Box<[Chain]> {
    (0..n).map(|_| Chain::new()).collect()
}

impl ChainedSet {
    /// Empty set with 20 buckets and the xorshift strategy.
    pub fn new() -> Self {
        Self::with_strategy(HashStrategy::default())
    }

    /// Empty set with 20 buckets and the given strategy.
    pub fn with_strategy(strategy: HashStrategy) -> Self {
        Self::from_parts(DEFAULT_BUCKETS, strategy, DEFAULT_MAX_LOAD_FACTOR)
    }

    pub fn with_buckets(buckets: usize, strategy: HashStrategy) -> Result<Self, SetError> {
        SetConfig::new().buckets(buckets).strategy(strategy).build()
    }

    /// Empty set routed through a caller-supplied hash function.
    pub fn with_hasher<F>(buckets: usize, f: F) -> Result<Self, SetError>
    where
        F: Fn(i32) -> u64 + 'static,
    {
        SetConfig::new().buckets(buckets).hasher(f).build()
    }

    pub fn from_config(config: SetConfig) -> Result<Self, SetError> {
        config.validate()?;
        Ok(Self::from_parts(
            config.buckets,
            config.strategy,
            config.max_load_factor,
        ))
    }

    fn from_parts(buckets: usize, strategy: HashStrategy, max_load_factor: f64) -> Self {
        debug_assert!(buckets > 0);
        Self {
            buckets: alloc_buckets(buckets),
            len: 0,
            strategy,
            max_load_factor,
        }
    }

    #[inline]
    fn bucket_index(&self, v: i32) -> usize {
        (self.strategy.hash(v) % self.buckets.len() as u64) as usize
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn bucket_count(&self) -> usize {
        self.buckets.len()
    }

    pub fn load_factor(&self) -> f64 {
        self.len as f64 / self.buckets.len() as f64
    }

    pub fn max_load_factor(&self) -> f64 {
        self.max_load_factor
    }

    pub fn strategy(&self) -> &HashStrategy {
        &self.strategy
    }

    /// Length of the longest chain.
    pub fn max_chain_len(&self) -> usize {
        self.buckets.iter().map(Chain::len).max().unwrap_or(0)
    }

    /// Per-bucket chain lengths in bucket order.
    pub fn chain_lens(&self) -> impl Iterator<Item = usize> + '_ {
        self.buckets.iter().map(Chain::len)
    }

    pub fn contains(&self, v: i32) -> bool {
        self.buckets[self.bucket_index(v)].contains(v)
    }

    /// Lookup cost of `v`: one step to address the bucket plus every node
    /// visited in its chain.
    pub fn probe(&self, v: i32) -> Probe {
        let p = self.buckets[self.bucket_index(v)].probe(v);
        Probe {
            found: p.found,
            visited: p.visited + 1,
        }
    }

    pub fn probe_count(&self, v: i32) -> usize {
        self.probe(v).visited
    }

    /// Adds `v` if absent. Returns whether it was added.
    ///
    /// A successful insert that leaves the load factor above the threshold
    /// doubles the bucket count before returning.
    pub fn insert(&mut self, v: i32) -> bool {
        !self.insert_scanned(v).found
    }

    /// Insert that also reports the scan it did, counted like `probe`.
    /// `found` means `v` was already present.
    pub(crate) fn insert_scanned(&mut self, v: i32) -> Probe {
        let p = self.insert_no_grow(v);
        if !p.found && self.load_factor() > self.max_load_factor {
            let grown = self.buckets.len().saturating_mul(2);
            if grown > self.buckets.len() {
                self.rehash(grown);
            }
        }
        Probe {
            found: p.found,
            visited: p.visited + 1,
        }
    }

    fn insert_no_grow(&mut self, v: i32) -> Probe {
        let idx = self.bucket_index(v);
        let p = self.buckets[idx].insert_scanned(v);
        if !p.found {
            self.len += 1;
        }
        p
    }

    /// Removes `v` if present. Returns whether it was removed.
    pub fn erase(&mut self, v: i32) -> bool {
        let idx = self.bucket_index(v);
        let removed = self.buckets[idx].remove(v);
        if removed {
            self.len -= 1;
        }
        removed
    }

    /// Rebuilds the table with `buckets` chains, reinserting every element.
    pub fn resize(&mut self, buckets: usize) -> Result<(), SetError> {
        if buckets == 0 {
            return Err(SetError::ZeroBuckets);
        }
        self.rehash(buckets);
        Ok(())
    }

    fn rehash(&mut self, buckets: usize) {
        let old = core::mem::replace(&mut self.buckets, alloc_buckets(buckets));
        let old_len = core::mem::replace(&mut self.len, 0);
        for v in Iter::new(&old, old_len) {
            self.insert_no_grow(v);
        }
        trace!(reinserted = self.len, "chained set reinsertion done");
        debug!(
            from = old.len(),
            to = buckets,
            items = self.len,
            "rehashed chained set"
        );
        drop(old);

        #[cfg(debug_assertions)]
        self.assert_invariants();
    }

    /// Drops every element and returns to the default bucket count.
    pub fn clear(&mut self) {
        debug!(
            dropped = self.len,
            buckets = self.buckets.len(),
            "clearing chained set"
        );
        self.buckets = alloc_buckets(DEFAULT_BUCKETS);
        self.len = 0;
    }

    /// Flat traversal: bucket order, then most recent first within a bucket.
    pub fn iter(&self) -> Iter<'_> {
        Iter::new(&self.buckets, self.len)
    }

    pub fn stats(&self) -> TableStats {
        TableStats {
            bucket_count: self.bucket_count(),
            len: self.len,
            load_factor: self.load_factor(),
            max_chain_len: self.max_chain_len(),
        }
    }

    #[cfg(any(test, debug_assertions))]
    pub(crate) fn assert_invariants(&self) {
        assert!(!self.buckets.is_empty(), "bucket array must not be empty");
        let mut total = 0;
        for (i, chain) in self.buckets.iter().enumerate() {
            for v in chain {
                assert_eq!(self.bucket_index(v), i, "{} stored in wrong bucket", v);
            }
            total += chain.len();
        }
        assert_eq!(total, self.len, "item count out of sync with chains");
    }
}

impl Default for ChainedSet {
    fn default() -> Self {
        Self::new()
    }
}

/// Starts from the same bucket count and strategy; elements go through the
/// public insert path rather than a structural copy, so an overloaded source
/// produces a clone that has grown past it.
impl Clone for ChainedSet {
    fn clone(&self) -> Self {
        let mut out = Self::from_parts(
            self.buckets.len(),
            self.strategy.clone(),
            self.max_load_factor,
        );
        for v in self {
            out.insert(v);
        }
        out
    }
}

impl PartialEq for ChainedSet {
    fn eq(&self, other: &Self) -> bool {
        self.len == other.len && self.iter().all(|v| other.contains(v))
    }
}

impl Eq for ChainedSet {}

impl fmt::Debug for ChainedSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

/// Sized at twice the input length (20 buckets for an empty input), then
/// filled.
impl From<&[i32]> for ChainedSet {
    fn from(values: &[i32]) -> Self {
        let buckets = match values.len() {
            0 => DEFAULT_BUCKETS,
            n => n.saturating_mul(2),
        };
        let mut set = Self::from_parts(buckets, HashStrategy::default(), DEFAULT_MAX_LOAD_FACTOR);
        set.extend(values);
        set
    }
}

impl<const N: usize> From<[i32; N]> for ChainedSet {
    fn from(values: [i32; N]) -> Self {
        Self::from(&values[..])
    }
}

impl FromIterator<i32> for ChainedSet {
    fn from_iter<I: IntoIterator<Item = i32>>(iter: I) -> Self {
        let values: Vec<i32> = iter.into_iter().collect();
        Self::from(values.as_slice())
    }
}

impl Extend<i32> for ChainedSet {
    fn extend<I: IntoIterator<Item = i32>>(&mut self, iter: I) {
        for v in iter {
            self.insert(v);
        }
    }
}

impl<'a> Extend<&'a i32> for ChainedSet {
    fn extend<I: IntoIterator<Item = &'a i32>>(&mut self, iter: I) {
        self.extend(iter.into_iter().copied());
    }
}

impl AddAssign<i32> for ChainedSet {
    fn add_assign(&mut self, v: i32) {
        self.insert(v);
    }
}

impl SubAssign<i32> for ChainedSet {
    fn sub_assign(&mut self, v: i32) {
        self.erase(v);
    }
}

impl<'a> IntoIterator for &'a ChainedSet {
    type Item = i32;
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Flat iterator over every element of a `ChainedSet`.
///
/// The cursor always rests on a value or at the end: empty buckets are
/// skipped eagerly, so two iterators compare equal exactly when they would
/// yield the same remaining sequence from the same table.
#[derive(Clone, Debug)]
pub struct Iter<'a> {
    buckets: &'a [Chain],
    bucket: usize,
    chain: Option<chain::Iter<'a>>,
    remaining: usize,
}

impl<'a> Iter<'a> {
    fn new(buckets: &'a [Chain], len: usize) -> Self {
        let mut it = Iter {
            buckets,
            bucket: 0,
            chain: buckets.first().map(Chain::iter),
            remaining: len,
        };
        it.settle();
        it
    }

    fn settle(&mut self) {
        while matches!(&self.chain, Some(c) if c.is_exhausted()) {
            self.bucket += 1;
            self.chain = self.buckets.get(self.bucket).map(Chain::iter);
        }
    }

    /// Bucket the next value comes from; `None` once exhausted.
    pub fn bucket(&self) -> Option<usize> {
        self.chain.as_ref().map(|_| self.bucket)
    }
}

impl Iterator for Iter<'_> {
    type Item = i32;

    fn next(&mut self) -> Option<i32> {
        let v = self.chain.as_mut()?.next()?;
        self.remaining -= 1;
        self.settle();
        Some(v)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl ExactSizeIterator for Iter<'_> {}

impl FusedIterator for Iter<'_> {}

impl PartialEq for Iter<'_> {
    fn eq(&self, other: &Self) -> bool {
        core::ptr::eq(self.buckets, other.buckets)
            && self.bucket == other.bucket
            && self.chain == other.chain
    }
}

impl Eq for Iter<'_> {}

/// Snapshot of table shape, for diagnostics.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TableStats {
    pub bucket_count: usize,
    pub len: usize,
    pub load_factor: f64,
    pub max_chain_len: usize,
}

impl fmt::Display for TableStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "buckets: {}, items: {}, load factor: {:.3}, longest chain: {}",
            self.bucket_count, self.len, self.load_factor, self.max_chain_len
        )
    }
}
