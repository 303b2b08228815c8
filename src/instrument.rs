//! Instrumented: measurement decorator over a `ChainedSet`.
//!
//! Costs come from the set's own scans: `contains` reads `ChainedSet::probe`
//! and `insert` reads the duplicate scan the insert itself performs. Timings wrap the plain
//! public operations with `Instant`.

use crate::chain::Probe;
use crate::chained_set::ChainedSet;
use core::fmt;
use std::time::{Duration, Instant};

/// Borrowing wrapper that reports the cost of each operation.
pub struct Instrumented<'a> {
    set: &'a mut ChainedSet,
}

impl<'a> Instrumented<'a> {
    pub fn new(set: &'a mut ChainedSet) -> Self {
        Self { set }
    }

    /// Inserts `v` and reports the lookup cost paid before insertion.
    /// `found` is true when `v` was newly added.
    ///
    /// Cost of a growth triggered by this insert is not counted.
    pub fn insert(&mut self, v: i32) -> Probe {
        let p = self.set.insert_scanned(v);
        Probe {
            found: !p.found,
            visited: p.visited,
        }
    }

    pub fn contains(&self, v: i32) -> Probe {
        self.set.probe(v)
    }

    pub fn timed_insert(&mut self, v: i32) -> Duration {
        let t0 = Instant::now();
        self.set.insert(v);
        t0.elapsed()
    }

    pub fn timed_contains(&self, v: i32) -> Duration {
        let t0 = Instant::now();
        let hit = self.set.contains(v);
        let elapsed = t0.elapsed();
        core::hint::black_box(hit);
        elapsed
    }

    pub fn set(&self) -> &ChainedSet {
        self.set
    }

    pub fn into_inner(self) -> &'a mut ChainedSet {
        self.set
    }
}

/// Running count, sum and maximum of a per-operation measurement.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct OpStats {
    pub count: u64,
    pub total: u64,
    pub worst: u64,
}

impl OpStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, sample: u64) {
        self.count += 1;
        self.total = self.total.saturating_add(sample);
        self.worst = self.worst.max(sample);
    }

    pub fn record_duration(&mut self, d: Duration) {
        self.record(u64::try_from(d.as_nanos()).unwrap_or(u64::MAX));
    }

    pub fn average(&self) -> f64 {
        if self.count == 0 {
            return 0.0;
        }
        self.total as f64 / self.count as f64
    }

    /// Worst sample relative to the average; 0 when nothing was recorded.
    pub fn worst_ratio(&self) -> f64 {
        let avg = self.average();
        if avg == 0.0 {
            return 0.0;
        }
        self.worst as f64 / avg
    }
}

impl Extend<u64> for OpStats {
    fn extend<I: IntoIterator<Item = u64>>(&mut self, iter: I) {
        for s in iter {
            self.record(s);
        }
    }
}

impl fmt::Display for OpStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "average: {:.2}, worst: {} ({:.1}x), samples: {}",
            self.average(),
            self.worst,
            self.worst_ratio(),
            self.count
        )
    }
}
