//! Hash strategies: four fixed integer mixes plus a caller-supplied closure.
//!
//! The built-in mixes are reproduced bit for bit from their classic
//! definitions. Comparisons between them depend on their distribution, so
//! the 32-bit ones keep signed wrapping arithmetic and arithmetic right
//! shifts, and every result is sign-extended to 64 bits.

use core::fmt;
use core::str::FromStr;
use std::rc::Rc;

const XORSHIFT_P: u64 = 0x5555_5555_5555_5555;
const XORSHIFT_C: u64 = 17_316_035_218_449_499_591;

/// Maps an element to a 64-bit hash; the owning set reduces it modulo its
/// bucket count.
#[derive(Clone, Default)]
pub enum HashStrategy {
    /// The value itself. Clusters consecutive keys into consecutive buckets.
    Identity,
    /// Two multiply/fold rounds over 64 bits.
    #[default]
    XorShift,
    /// Robert Jenkins' six-step 32-bit integer hash.
    Jenkins,
    /// Shift/xor/multiply mix with a 32-bit odd multiplier.
    ShiftMultiply,
    /// Caller-supplied pure function. Shared by clones of the owning set.
    Custom(Rc<dyn Fn(i32) -> u64>),
}

impl HashStrategy {
    /// The built-in strategies, in comparison order.
    pub const ALL: [HashStrategy; 4] = [
        HashStrategy::Identity,
        HashStrategy::XorShift,
        HashStrategy::Jenkins,
        HashStrategy::ShiftMultiply,
    ];

    /// Wraps a closure as a custom strategy.
    pub fn custom<F>(f: F) -> Self
    where
        F: Fn(i32) -> u64 + 'static,
    {
        HashStrategy::Custom(Rc::new(f))
    }

    #[inline]
    pub fn hash(&self, v: i32) -> u64 {
        match self {
            HashStrategy::Identity => identity(v),
            HashStrategy::XorShift => xorshift(v),
            HashStrategy::Jenkins => jenkins(v),
            HashStrategy::ShiftMultiply => shift_multiply(v),
            HashStrategy::Custom(f) => f(v),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            HashStrategy::Identity => "identity",
            HashStrategy::XorShift => "xorshift",
            HashStrategy::Jenkins => "jenkins",
            HashStrategy::ShiftMultiply => "shift-multiply",
            HashStrategy::Custom(_) => "custom",
        }
    }
}

impl fmt::Debug for HashStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Name did not match any built-in strategy.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UnknownStrategy(pub String);

impl fmt::Display for UnknownStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown hash strategy `{}`", self.0)
    }
}

impl std::error::Error for UnknownStrategy {}

impl FromStr for HashStrategy {
    type Err = UnknownStrategy;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        HashStrategy::ALL
            .into_iter()
            .find(|h| h.name() == s)
            .ok_or_else(|| UnknownStrategy(s.to_string()))
    }
}

#[inline]
pub fn identity(v: i32) -> u64 {
    v as u64
}

#[inline]
fn fold(n: u64) -> u64 {
    n ^ (n >> 32)
}

#[inline]
pub fn xorshift(v: i32) -> u64 {
    let n = v as u64;
    XORSHIFT_C.wrapping_mul(fold(XORSHIFT_P.wrapping_mul(fold(n))))
}

#[inline]
pub fn jenkins(v: i32) -> u64 {
    let mut v = v;
    v = v.wrapping_add(0x7ed5_5d16).wrapping_add(v << 12);
    v = (v ^ 0xc761_c23c_u32 as i32) ^ (v >> 19);
    v = v.wrapping_add(0x1656_67b1).wrapping_add(v << 5);
    v = v.wrapping_add(0xd3a2_646c_u32 as i32) ^ (v << 9);
    v = v.wrapping_add(0xfd70_46c5_u32 as i32).wrapping_add(v << 3);
    v = (v ^ 0xb55a_4f09_u32 as i32) ^ (v >> 16);
    v as u64
}

#[inline]
pub fn shift_multiply(v: i32) -> u64 {
    let mut v = v;
    v = (v ^ 61) ^ (v >> 16);
    v = v.wrapping_add(v << 3);
    v ^= v >> 4;
    v = v.wrapping_mul(0x27d4_eb2d);
    v ^= v >> 15;
    v as u64
}
