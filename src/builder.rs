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

use super::bloom::BloomFilter;
use super::error::{Error, Result};

/// Collects the parameters of a `BloomFilter` and validates them all
/// at once in `build`.
///
/// Every setting is required.  A builder whose primary or secondary
/// hash was never set still type checks, but `build` rejects it with
/// `Error::InvalidArgument`.
///
/// ```rust
/// use bloomprobe::{BloomFilter, DigestHash};
/// use md5::Md5;
/// use sha1::Sha1;
///
/// let mut filter = BloomFilter::builder()
///     .capacity(1000)
///     .error_rate(0.001)
///     .primary_hash(DigestHash::<Sha1>::new())
///     .secondary_hash(DigestHash::<Md5>::new())
///     .build()
///     .unwrap();
/// filter.add("foo");
/// assert!(filter.maybe_contains("foo"));
///
/// let missing = BloomFilter::builder()
///     .capacity(1000)
///     .error_rate(0.001)
///     .primary_hash(DigestHash::<Sha1>::new())
///     .build();
/// assert!(missing.is_err());
/// ```
#[derive(Clone, Debug)]
pub struct BloomFilterBuilder<P, S> {
    capacity: Option<u64>,
    error_rate: Option<f64>,
    primary: Option<P>,
    secondary: Option<S>,
}

impl BloomFilterBuilder<(), ()> {
    pub fn new() -> BloomFilterBuilder<(), ()> {
        BloomFilterBuilder {
            capacity: None,
            error_rate: None,
            primary: None,
            secondary: None,
        }
    }
}

impl Default for BloomFilterBuilder<(), ()> {
    fn default() -> BloomFilterBuilder<(), ()> {
        BloomFilterBuilder::new()
    }
}

impl<P, S> BloomFilterBuilder<P, S> {
    /// Number of items the filter is expected to hold
    pub fn capacity(mut self, capacity: u64) -> Self {
        self.capacity = Some(capacity);
        self
    }

    /// Target false positive rate at `capacity` items
    pub fn error_rate(mut self, error_rate: f64) -> Self {
        self.error_rate = Some(error_rate);
        self
    }

    pub fn primary_hash<Q>(self, primary: Q) -> BloomFilterBuilder<Q, S> {
        self.maybe_primary_hash(Some(primary))
    }

    pub fn secondary_hash<R>(self, secondary: R) -> BloomFilterBuilder<P, R> {
        self.maybe_secondary_hash(Some(secondary))
    }

    /// Like `primary_hash`, but `None` clears it.
    pub fn maybe_primary_hash<Q>(self, primary: Option<Q>) -> BloomFilterBuilder<Q, S> {
        BloomFilterBuilder {
            capacity: self.capacity,
            error_rate: self.error_rate,
            primary,
            secondary: self.secondary,
        }
    }

    /// Like `secondary_hash`, but `None` clears it.
    pub fn maybe_secondary_hash<R>(self, secondary: Option<R>) -> BloomFilterBuilder<P, R> {
        BloomFilterBuilder {
            capacity: self.capacity,
            error_rate: self.error_rate,
            primary: self.primary,
            secondary,
        }
    }

    pub fn build(self) -> Result<BloomFilter<P, S>> {
        let primary = self.primary
            .ok_or_else(|| Error::invalid("primary hash function is missing"))?;
        let secondary = self.secondary
            .ok_or_else(|| Error::invalid("secondary hash function is missing"))?;
        let capacity = self.capacity
            .ok_or_else(|| Error::invalid("capacity is not set"))?;
        let error_rate = self.error_rate
            .ok_or_else(|| Error::invalid("error rate is not set"))?;
        BloomFilter::with_rate_and_hashers(capacity, error_rate, primary, secondary)
    }
}

#[cfg(test)]
mod tests {
    use md5::Md5;
    use sha1::Sha1;
    use super::BloomFilterBuilder;
    use crate::bloom::BloomFilter;
    use crate::error::Error;
    use crate::hashers::DigestHash;

    fn complete() -> BloomFilterBuilder<DigestHash<Sha1>, DigestHash<Md5>> {
        BloomFilter::builder()
            .capacity(1000)
            .error_rate(0.001)
            .primary_hash(DigestHash::new())
            .secondary_hash(DigestHash::new())
    }

    fn message<P, S>(b: BloomFilterBuilder<P, S>) -> String {
        match b.build() {
            Err(Error::InvalidArgument(msg)) => msg,
            Ok(_) => panic!("build succeeded"),
        }
    }

    #[test]
    fn builds() {
        let b = complete().build().unwrap();
        assert_eq!(b.num_bits(), 14378);
        assert_eq!(b.num_hashes(), 10);
    }

    #[test]
    fn missing_hashes() {
        let no_primary = BloomFilter::builder()
            .capacity(1000)
            .error_rate(0.001)
            .secondary_hash(DigestHash::<Md5>::new());
        assert_eq!(message(no_primary), "primary hash function is missing");

        let no_secondary = BloomFilter::builder()
            .capacity(1000)
            .error_rate(0.001)
            .primary_hash(DigestHash::<Sha1>::new());
        assert_eq!(message(no_secondary), "secondary hash function is missing");

        let cleared = complete().maybe_secondary_hash(None::<DigestHash<Md5>>);
        assert_eq!(message(cleared), "secondary hash function is missing");
    }

    #[test]
    fn missing_parameters() {
        let no_capacity = BloomFilterBuilder::new()
            .error_rate(0.001)
            .primary_hash(DigestHash::<Sha1>::new())
            .secondary_hash(DigestHash::<Md5>::new());
        assert_eq!(message(no_capacity), "capacity is not set");

        let no_rate = BloomFilterBuilder::default()
            .capacity(1000)
            .primary_hash(DigestHash::<Sha1>::new())
            .secondary_hash(DigestHash::<Md5>::new());
        assert_eq!(message(no_rate), "error rate is not set");
    }

    #[test]
    fn out_of_domain() {
        assert!(complete().capacity(0).build().is_err());
        assert!(complete().error_rate(0.0).build().is_err());
        assert!(complete().error_rate(1.0).build().is_err());
    }

    #[test]
    fn closures() {
        let mut b = BloomFilter::builder()
            .capacity(10)
            .error_rate(0.1)
            .primary_hash(|s: &str| s.len() as i64)
            .secondary_hash(|s: &str| s.bytes().map(|c| c as i64).sum::<i64>())
            .build()
            .unwrap();
        b.add("hello");
        assert!(b.maybe_contains("hello"));
    }
}
