//! The error type of this crate.
//!
//! Lookups and updates on a well-formed set cannot fail; only the shape of
//! a table (its bucket count and growth threshold) is validated.

use core::fmt;

/// Rejected table shape.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum SetError {
    /// A table must always have at least one bucket.
    ZeroBuckets,
    /// The growth threshold must be finite and strictly positive.
    InvalidLoadFactor(f64),
}

impl fmt::Display for SetError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SetError::ZeroBuckets => f.write_str("bucket count must be greater than zero"),
            SetError::InvalidLoadFactor(lf) => {
                write!(f, "max load factor must be finite and positive, got {}", lf)
            }
        }
    }
}

impl std::error::Error for SetError {}
