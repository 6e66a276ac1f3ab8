// This program is free software; you can redistribute it and/or
// modify it under the terms of the GNU General Public License as
// published by the Free Software Foundation; either version 2 of the
// License, or (at your option) any later version.

// This program is distributed in the hope that it will be useful, but
// WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the GNU
// General Public License for more details.

// You should have received a copy of the GNU General Public License
// along with this program; if not, write to the Free Software
// Foundation, Inc., 51 Franklin Street, Fifth Floor, Boston, MA
// 02110-1301, USA.

use std::f64::consts::LN_2;

use bit_vec::BitVec;
use md5::Md5;
use sha1::Sha1;
use tracing::debug;

use super::builder::BloomFilterBuilder;
use super::error::{Error, Result};
use super::hashers::DigestHash;
use super::hashing::{ProbeHash, ProbeIter};

/// A standard BloomFilter.  If an item is added then `maybe_contains`
/// is guaranteed to return `true` for that item.  For items not added
/// `maybe_contains` will probably return false.  The probability that
/// `maybe_contains` returns `true` for an item that was not added is
/// called the False Positive Rate.
///
/// The filter never hashes items itself.  It is given two
/// `ProbeHash` implementations, a primary and a secondary, and derives
/// `k` probe positions per item from their two outputs using the
/// Dillinger-Manolios scheme (see `probe_position`).
///
/// # False Positive Rate
/// The false positive rate is specified as a float in the range
/// (0,1).  It indicates that out of `X` probes, `X * rate` should
/// return a false positive once `capacity` items have been added.
/// Higher values will lead to smaller (but more inaccurate) filters.
/// Adding more than `capacity` items does not fail, the rate just
/// climbs.
///
/// # Example Usage
///
/// ```rust
/// use bloomprobe::BloomFilter;
///
/// let expected_num_items = 1000;
///
/// // out of 1000 items that are not added, expect 1 to return true
/// let false_positive_rate = 0.001;
///
/// let mut filter = BloomFilter::with_rate(expected_num_items, false_positive_rate).unwrap();
/// filter.add("foo");
/// assert!(filter.maybe_contains("foo"));
/// ```
///
/// Closures work as hash functions too:
///
/// ```rust
/// use bloomprobe::BloomFilter;
///
/// let mut filter = BloomFilter::with_rate_and_hashers(
///     100, 0.01,
///     |v: &u64| (*v as i64).wrapping_mul(0x9e3779b97f4a7c15u64 as i64),
///     |v: &u64| (*v as i64).rotate_left(29) ^ 0x5bd1e995,
/// ).unwrap();
/// filter.add(&7u64);
/// assert!(filter.maybe_contains(&7u64));
/// ```
///
/// # Concurrency
/// `add` needs `&mut self`, so concurrent writers have to go through
/// an external lock (e.g. `std::sync::RwLock`).
#[derive(Clone, Debug)]
pub struct BloomFilter<P = DigestHash<Sha1>, S = DigestHash<Md5>> {
    bits: BitVec,
    num_hashes: u32,
    capacity: u64,
    error_rate: f64,
    primary: P,
    secondary: S,
}

impl BloomFilter<DigestHash<Sha1>, DigestHash<Md5>> {
    /// Create a BloomFilter that expects to hold `capacity` items
    /// with a false positive rate of `error_rate`, hashing items with
    /// SHA-1 and MD5 folded into `[0, 1000)`.
    pub fn with_rate(capacity: u64, error_rate: f64) -> Result<Self> {
        BloomFilter::with_rate_and_hashers(capacity, error_rate,
                                           DigestHash::new(), DigestHash::new())
    }
}

impl BloomFilter<(), ()> {
    /// Start building a filter.  See `BloomFilterBuilder`.
    pub fn builder() -> BloomFilterBuilder<(), ()> {
        BloomFilterBuilder::new()
    }
}

impl<P, S> BloomFilter<P, S> {
    /// Create a BloomFilter that expects to hold `capacity` items.
    /// The filter will be sized to have a false positive rate of
    /// `error_rate`.  Items are hashed with `primary` and `secondary`,
    /// which should produce independent values.  Passing two hashes
    /// that produce the same or correlated values will break the
    /// false positive guarantees of the BloomFilter.
    ///
    /// Fails with `Error::InvalidArgument` if `capacity` is zero or
    /// `error_rate` is not strictly between 0 and 1.
    pub fn with_rate_and_hashers(capacity: u64, error_rate: f64,
                                 primary: P, secondary: S) -> Result<Self> {
        check_rate(capacity, error_rate)?;
        let bits = needed_bits(capacity, error_rate);
        if !(bits < usize::MAX as f64) {
            return Err(Error::invalid(format!(
                "{} items at rate {} need more bits than fit in memory", capacity, error_rate)));
        }
        let num_bits = bits as usize;
        let num_hashes = optimal_num_hashes(num_bits, capacity);
        debug!(capacity, error_rate, num_bits, num_hashes, "new BloomFilter");
        Ok(BloomFilter::from_parts(num_bits, num_hashes, capacity, error_rate,
                                   primary, secondary))
    }

    /// Create a new BloomFilter with the specified number of bits and
    /// hashes.  `capacity()` reports `0` and `error_rate()` reports
    /// NaN for such filters since neither was given.
    pub fn with_size_and_hashers(num_bits: usize, num_hashes: u32,
                                 primary: P, secondary: S) -> Result<Self> {
        if num_bits == 0 {
            return Err(Error::invalid("number of bits must be at least 1"));
        }
        if num_hashes == 0 {
            return Err(Error::invalid("number of hashes must be at least 1"));
        }
        debug!(num_bits, num_hashes, "new BloomFilter");
        Ok(BloomFilter::from_parts(num_bits, num_hashes, 0, f64::NAN,
                                   primary, secondary))
    }

    fn from_parts(num_bits: usize, num_hashes: u32, capacity: u64, error_rate: f64,
                  primary: P, secondary: S) -> Self {
        BloomFilter {
            bits: BitVec::from_elem(num_bits, false),
            num_hashes,
            capacity,
            error_rate,
            primary,
            secondary,
        }
    }

    /// Get the number of bits this BloomFilter is using
    pub fn num_bits(&self) -> usize {
        self.bits.len()
    }

    /// Get the number of hash functions this BloomFilter is using
    pub fn num_hashes(&self) -> u32 {
        self.num_hashes
    }

    /// The number of items this filter was sized for
    pub fn capacity(&self) -> u64 {
        self.capacity
    }

    /// The false positive rate this filter was sized for
    pub fn error_rate(&self) -> f64 {
        self.error_rate
    }

    /// Number of bits currently set
    pub fn count_ones(&self) -> usize {
        self.bits.iter().filter(|b| *b).count()
    }

    /// Probability that an item that was never added is reported as
    /// present, given how many bits are set right now.
    pub fn estimated_false_positive_rate(&self) -> f64 {
        let fill = self.count_ones() as f64 / self.num_bits() as f64;
        fill.powf(self.num_hashes as f64)
    }

    pub fn primary_hash(&self) -> &P {
        &self.primary
    }

    pub fn secondary_hash(&self) -> &S {
        &self.secondary
    }

    /// Add an item to this BloomFilter.  Adding an item twice is the
    /// same as adding it once.
    pub fn add<T>(&mut self, item: &T)
        where T: ?Sized, P: ProbeHash<T>, S: ProbeHash<T>
    {
        for idx in ProbeIter::from(item, self.num_hashes, self.bits.len(),
                                   &self.primary, &self.secondary) {
            self.bits.set(idx, true);
        }
    }

    /// Check if the item has been added to this bloom filter.  This
    /// function can return false positives, but not false negatives.
    pub fn maybe_contains<T>(&self, item: &T) -> bool
        where T: ?Sized, P: ProbeHash<T>, S: ProbeHash<T>
    {
        for idx in ProbeIter::from(item, self.num_hashes, self.bits.len(),
                                   &self.primary, &self.secondary) {
            match self.bits.get(idx) {
                Some(true) => {}
                Some(false) => { return false; }
                None => { unreachable!("probe {} outside {} bits", idx, self.bits.len()); }
            }
        }
        true
    }
}

fn check_rate(capacity: u64, error_rate: f64) -> Result<()> {
    if capacity < 1 {
        return Err(Error::invalid("capacity must be at least 1"));
    }
    if !(error_rate > 0.0 && error_rate < 1.0) {
        return Err(Error::invalid(format!(
            "error rate must be strictly between 0 and 1, got {}", error_rate)));
    }
    Ok(())
}

/// Return the number of bits needed to satisfy the specified false
/// positive rate, if the filter will hold `num_items` items.
///
/// `ceil(n * ln(p) / ln(1 / 2^ln2))`, rounded up so the filter is
/// never smaller than the formula asks for.  The result is a float so
/// callers can detect sizes that do not fit in a `usize`.  Expects
/// `num_items >= 1` and `0 < false_pos_rate < 1`.
pub fn needed_bits(num_items: u64, false_pos_rate: f64) -> f64 {
    let denom = (1.0 / 2f64.powf(LN_2)).ln();
    (num_items as f64 * false_pos_rate.ln() / denom).ceil()
}

/// Return the optimal number of hashes to use for the given number of
/// bits and items in a filter: `round((m / n) * ln2)`, but never less
/// than one.
pub fn optimal_num_hashes(num_bits: usize, num_items: u64) -> u32 {
    let k = (num_bits as f64 / num_items as f64 * LN_2).round();
    if k < 1.0 {
        1
    } else if k > u32::MAX as f64 {
        u32::MAX
    } else {
        k as u32
    }
}
