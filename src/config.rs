//! SetConfig: validated construction parameters for `ChainedSet`.

use crate::chained_set::ChainedSet;
use crate::error::SetError;
use crate::hashing::HashStrategy;

/// Bucket count of a freshly constructed or cleared set.
pub const DEFAULT_BUCKETS: usize = 20;

/// Load factor above which an insert doubles the bucket count.
pub const DEFAULT_MAX_LOAD_FACTOR: f64 = 0.75;

/// Builder for a `ChainedSet`.
///
/// ```
/// use chainset::{HashStrategy, SetConfig};
///
/// let set = SetConfig::new()
///     .buckets(64)
///     .strategy(HashStrategy::Jenkins)
///     .build()
///     .unwrap();
/// assert_eq!(set.bucket_count(), 64);
/// ```
#[derive(Clone, Debug)]
pub struct SetConfig {
    pub(crate) buckets: usize,
    pub(crate) strategy: HashStrategy,
    pub(crate) max_load_factor: f64,
}

impl Default for SetConfig {
    fn default() -> Self {
        Self {
            buckets: DEFAULT_BUCKETS,
            strategy: HashStrategy::default(),
            max_load_factor: DEFAULT_MAX_LOAD_FACTOR,
        }
    }
}

impl SetConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn buckets(mut self, buckets: usize) -> Self {
        self.buckets = buckets;
        self
    }

    pub fn strategy(mut self, strategy: HashStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// Shorthand for `strategy(HashStrategy::custom(f))`.
    pub fn hasher<F>(self, f: F) -> Self
    where
        F: Fn(i32) -> u64 + 'static,
    {
        self.strategy(HashStrategy::custom(f))
    }

    pub fn max_load_factor(mut self, max_load_factor: f64) -> Self {
        self.max_load_factor = max_load_factor;
        self
    }

    pub fn validate(&self) -> Result<(), SetError> {
        if self.buckets == 0 {
            return Err(SetError::ZeroBuckets);
        }
        if !self.max_load_factor.is_finite() || self.max_load_factor <= 0.0 {
            return Err(SetError::InvalidLoadFactor(self.max_load_factor));
        }
        Ok(())
    }

    pub fn build(self) -> Result<ChainedSet, SetError> {
        ChainedSet::from_config(self)
    }
}
